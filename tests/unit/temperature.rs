//! Unit tests for temperature sensor reading

use crate::common::{assert_float_eq, create_initialized_driver, Operation};

#[test]
fn test_read_temperature_raw() {
    let (mut driver, bus) = create_initialized_driver();
    bus.set_temperature_data(1234);

    assert_eq!(driver.read_temperature().unwrap(), 1234);
    assert!(bus.operations().contains(&Operation::Read {
        register: 0x41,
        len: 2
    }));
}

#[test]
fn test_temperature_conversion() {
    let (mut driver, bus) = create_initialized_driver();

    // Raw 0 is the 21 °C offset
    bus.set_temperature_data(0);
    assert_float_eq(driver.read_temperature_celsius().unwrap(), 21.0, 1e-4);

    // +1 °C per 333.87 LSB
    bus.set_temperature_data(3339);
    assert_float_eq(driver.read_temperature_celsius().unwrap(), 31.0, 0.01);

    bus.set_temperature_data(-3339);
    assert_float_eq(driver.read_temperature_celsius().unwrap(), 11.0, 0.01);
}

#[test]
fn test_temperature_read_failure() {
    let (mut driver, bus) = create_initialized_driver();
    bus.short_read_next(1);

    assert!(driver.read_temperature().is_err());
}
