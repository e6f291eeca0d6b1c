//! Unit tests for raw sample reconstruction and read strategies

use crate::common::{create_initialized_driver, Operation};
use mpu9250::{Channel, RawSample, ReadMode};

#[test]
fn test_big_endian_reconstruction() {
    let (mut driver, bus) = create_initialized_driver();

    // (0x01, 0x00) -> 256, (0xFF, 0xFF) -> -1
    bus.set_register(0x43, 0x01);
    bus.set_register(0x44, 0x00);
    bus.set_register(0x45, 0xFF);
    bus.set_register(0x46, 0xFF);

    let raw = driver.read_raw_sample().unwrap();
    assert_eq!(raw.get(Channel::GyroX), 256);
    assert_eq!(raw.get(Channel::GyroY), -1);
    assert_eq!(raw.get(Channel::GyroZ), 0);
}

#[test]
fn test_extreme_values() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_gyro_data(i16::MAX, i16::MIN, 0);
    bus.set_accel_data(i16::MIN, i16::MAX, -1);

    let raw = driver.read_raw_sample().unwrap();
    assert_eq!(raw.gyro, [i16::MAX, i16::MIN, 0]);
    assert_eq!(raw.accel, [i16::MIN, i16::MAX, -1]);
}

#[test]
fn test_per_register_transactions() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_gyro_data(1, 2, 3);
    bus.set_accel_data(4, 5, 6);

    let raw = driver.read_raw_sample().unwrap();
    assert_eq!(raw.gyro, [1, 2, 3]);
    assert_eq!(raw.accel, [4, 5, 6]);

    // Twelve single-byte reads, gyro X high byte first
    assert_eq!(bus.read_count(), 12);
    let ops = bus.operations();
    assert_eq!(ops[0], Operation::SetPointer { register: 0x43 });
    assert_eq!(
        ops[1],
        Operation::Read {
            register: 0x43,
            len: 1
        }
    );
    assert_eq!(ops[2], Operation::SetPointer { register: 0x44 });
    assert_eq!(ops[6], Operation::SetPointer { register: 0x46 });
    assert_eq!(
        ops.last(),
        Some(&Operation::Read {
            register: 0x40,
            len: 1
        })
    );
}

#[test]
fn test_paired_transactions() {
    let (mut driver, bus) = create_initialized_driver();
    driver.set_read_mode(ReadMode::Paired);
    bus.set_gyro_data(-300, 0, 300);

    let raw = driver.read_raw_sample().unwrap();
    assert_eq!(raw.gyro, [-300, 0, 300]);

    let reads: Vec<_> = bus
        .operations()
        .into_iter()
        .filter(|op| matches!(op, Operation::Read { .. }))
        .collect();
    assert_eq!(reads.len(), 6);
    for (read, channel) in reads.iter().zip(Channel::ALL) {
        assert_eq!(
            *read,
            Operation::Read {
                register: channel.high_address(),
                len: 2
            }
        );
    }
}

#[test]
fn test_burst_single_transaction() {
    let (mut driver, bus) = create_initialized_driver();
    driver.set_read_mode(ReadMode::Burst);
    bus.set_gyro_data(7, 8, 9);
    bus.set_accel_data(-7, -8, -9);
    bus.set_temperature_data(0x5555);

    let raw = driver.read_raw_sample().unwrap();
    assert_eq!(raw.gyro, [7, 8, 9]);
    assert_eq!(raw.accel, [-7, -8, -9]);
    assert_eq!(
        bus.operations(),
        vec![
            Operation::SetPointer { register: 0x3B },
            Operation::Read {
                register: 0x3B,
                len: 14
            },
        ]
    );
}

#[test]
fn test_read_modes_agree() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_gyro_data(1000, -2000, 3000);
    bus.set_accel_data(-16384, 8192, 16383);

    let mut samples: Vec<RawSample> = Vec::new();
    for mode in [ReadMode::PerRegister, ReadMode::Paired, ReadMode::Burst] {
        driver.set_read_mode(mode);
        samples.push(driver.read_raw_sample().unwrap());
    }
    assert_eq!(samples[0], samples[1]);
    assert_eq!(samples[1], samples[2]);
}

#[test]
fn test_read_word() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_accel_data(0, 0, -12345);

    assert_eq!(driver.read_word(0x3F).unwrap(), -12345);
}
