//! Test utilities and helper functions

use crate::common::mock_bus::MockBus;
use mpu9250::{I2cInterface, Mpu9250Config, Mpu9250Driver};

/// Mock delay implementation for testing
///
/// Does not sleep; accumulates the requested time so tests can check it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDelay {
    /// Total requested delay in nanoseconds
    pub total_ns: u64,
}

#[allow(dead_code)]
impl MockDelay {
    /// Total requested delay in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Create a mock driver for testing
/// Returns (driver, bus) where bus is a clone that shares state with the driver
pub fn create_mock_driver() -> (Mpu9250Driver<MockBus>, MockBus) {
    create_mock_driver_with_config(Mpu9250Config::default())
}

/// Create a mock driver that `init()` programs with `config`
pub fn create_mock_driver_with_config(
    config: Mpu9250Config,
) -> (Mpu9250Driver<MockBus>, MockBus) {
    let bus = MockBus::new();
    let bus_clone = bus.clone();
    let driver = Mpu9250Driver::with_config(I2cInterface::default(bus), config)
        .expect("Failed to create mock driver");
    (driver, bus_clone)
}

/// Create a mock driver and run `init()` on it
#[allow(dead_code)]
pub fn create_initialized_driver() -> (Mpu9250Driver<MockBus>, MockBus) {
    let (mut driver, bus) = create_mock_driver();
    driver
        .init(&mut MockDelay::default())
        .expect("Failed to initialize mock driver");
    bus.clear_operations();
    (driver, bus)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
