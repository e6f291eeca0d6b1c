//! Integration tests for basic workflow scenarios

use crate::common::{
    assert_float_eq, create_mock_driver, create_mock_driver_with_config, MockDelay,
};
use mpu9250::{AccelFullScale, GyroFullScale, InitState, Mpu9250Config, ReadMode};

#[test]
fn test_complete_initialization_workflow() {
    let (mut driver, bus) = create_mock_driver();

    // Initialize the device
    driver.init(&mut MockDelay::default()).unwrap();
    assert_eq!(driver.state(), InitState::Configured);

    // Switch to the widest gyro range
    driver.set_gyro_range(GyroFullScale::Dps2000).unwrap();

    // Set up mock sensor data
    bus.set_gyro_data(1640, 0, 0);
    bus.set_accel_data(0, 0, 16384);

    let sample = driver.read_sample().unwrap();
    assert_float_eq(sample.gyro.x, 100.0, 1e-3);
    assert_float_eq(sample.gyro.y, 0.0, 1e-6);
    assert_float_eq(sample.accel.z, 1.0, 1e-4);
    assert_float_eq(sample.accel.magnitude(), 1.0, 1e-4);

    // Read temperature
    let temp = driver.read_temperature_celsius().unwrap();
    assert!(temp > -40.0 && temp < 85.0);
}

#[test]
fn test_error_recovery() {
    let (mut driver, bus) = create_mock_driver();
    driver.init(&mut MockDelay::default()).unwrap();

    // Inject a read failure
    bus.fail_next_read();
    assert!(driver.read_sample().is_err());

    // But subsequent reads should work (error was only for one operation)
    bus.set_accel_data(100, 200, 300);
    let raw = driver.read_raw_sample().unwrap();
    assert_eq!(raw.accel, [100, 200, 300]);
}

#[test]
fn test_burst_workflow() {
    let config = Mpu9250Config {
        read_mode: ReadMode::Burst,
        ..Default::default()
    };
    let (mut driver, bus) = create_mock_driver_with_config(config);
    driver.init(&mut MockDelay::default()).unwrap();
    driver.set_accel_range(AccelFullScale::G16).unwrap();

    bus.set_accel_data(2048, -2048, 0);
    bus.set_gyro_data(-131, 0, 0);
    bus.clear_operations();

    let (raw, scaled) = driver.read_sample_with_raw().unwrap();
    assert_eq!(raw.accel, [2048, -2048, 0]);
    assert_float_eq(scaled.accel.x, 1.0, 1e-4);
    assert_float_eq(scaled.accel.y, -1.0, 1e-4);
    assert_float_eq(scaled.gyro.x, -1.0, 1e-4);
    assert_eq!(bus.read_count(), 1);
}

#[test]
fn test_sample_display() {
    let (mut driver, bus) = create_mock_driver();
    driver.init(&mut MockDelay::default()).unwrap();
    bus.set_gyro_data(1, 2, 3);
    bus.set_accel_data(-4, -5, -6);

    let (raw, _) = driver.read_sample_with_raw().unwrap();
    assert_eq!(
        raw.to_string(),
        "raw gyro  : <1,2,3>\nraw accel : <-4,-5,-6>"
    );

    bus.set_gyro_data(131, 0, -262);
    bus.set_accel_data(0, 8192, 0);
    let scaled = driver.read_sample().unwrap();
    assert_eq!(scaled.to_string(), "gyro  : <1,0,-2>\naccel : <0,0.5,0>");
}

#[test]
fn test_rps_conversion_after_range_change() {
    let (mut driver, bus) = create_mock_driver();
    driver.init(&mut MockDelay::default()).unwrap();
    driver.set_gyro_range(GyroFullScale::Dps1000).unwrap();

    // 180 °/s on Z
    bus.set_gyro_data(0, 0, (180.0 * 32.8) as i16);

    let sample = driver.read_sample().unwrap();
    let rps = sample.gyro.to_radians_per_sec();
    assert_float_eq(rps.z, core::f32::consts::PI, 1e-3);
}

#[cfg(feature = "std")]
#[test]
fn test_streaming_workflow() {
    use mpu9250::SampleLoop;
    use std::time::Duration;

    let (mut driver, bus) = create_mock_driver();
    driver.init(&mut MockDelay::default()).unwrap();
    driver.set_gyro_range(GyroFullScale::Dps2000).unwrap();
    bus.set_gyro_data(1640, -1640, 0);

    let mut readings = Vec::new();
    let summary = SampleLoop::new(Duration::from_millis(1))
        .with_max_samples(3)
        .run(&mut driver, |sample| readings.push(sample.gyro))
        .unwrap();

    assert_eq!(summary.samples, 3);
    for gyro in readings {
        assert_float_eq(gyro.x, 100.0, 1e-3);
        assert_float_eq(gyro.y, -100.0, 1e-3);
    }
}
