//! Unit tests for the register protocol over a transport

use crate::common::{MockBus, Operation};
use embedded_hal::i2c::{ErrorType, I2c, Operation as I2cOperation};
use mpu9250::interface::MAX_WRITE_LEN;
use mpu9250::{Error, HalBus, I2cInterface, Mpu9250Driver};

#[test]
fn test_register_round_trip() {
    let bus = MockBus::new();
    let mut interface = I2cInterface::default(bus.clone());

    interface.write_register_bytes(0x19, &[0x2A]).unwrap();
    let mut buffer = [0u8; 1];
    interface.read_bytes(0x19, &mut buffer).unwrap();

    assert_eq!(buffer, [0x2A]);
    assert_eq!(bus.register(0x19), 0x2A);
}

#[test]
fn test_wire_protocol() {
    let bus = MockBus::new();
    let mut interface = I2cInterface::default(bus.clone());

    interface.write_register_bytes(0x1A, &[0x03]).unwrap();
    let mut buffer = [0u8; 2];
    interface.read_bytes(0x43, &mut buffer).unwrap();

    // Address bound once, pointer byte first, data in register order
    assert_eq!(
        bus.operations(),
        vec![
            Operation::Select { address: 0x68 },
            Operation::Write {
                register: 0x1A,
                data: vec![0x03]
            },
            Operation::SetPointer { register: 0x43 },
            Operation::Read {
                register: 0x43,
                len: 2
            },
        ]
    );
}

#[test]
fn test_multi_byte_auto_increment() {
    let bus = MockBus::new();
    let mut interface = I2cInterface::default(bus.clone());

    interface
        .write_register_bytes(0x3B, &[0x01, 0x02, 0x03, 0x04])
        .unwrap();

    let mut buffer = [0u8; 4];
    interface.read_bytes(0x3B, &mut buffer).unwrap();
    assert_eq!(buffer, [0x01, 0x02, 0x03, 0x04]);
    assert_eq!(bus.register(0x3E), 0x04);
}

#[test]
fn test_oversized_write_rejected() {
    let bus = MockBus::new();
    let mut interface = I2cInterface::default(bus.clone());

    let data = [0u8; MAX_WRITE_LEN + 1];
    let result = interface.write_register_bytes(0x00, &data);

    assert!(matches!(result, Err(Error::InvalidConfig)));
    assert!(bus.operations().is_empty(), "Nothing should reach the bus");
}

#[test]
fn test_reselect_after_failure() {
    let bus = MockBus::new();
    let mut interface = I2cInterface::default(bus.clone());
    let mut buffer = [0u8; 1];

    interface.read_bytes(0x75, &mut buffer).unwrap();
    bus.fail_next_read();
    assert!(interface.read_bytes(0x75, &mut buffer).is_err());
    interface.read_bytes(0x75, &mut buffer).unwrap();

    let selects = bus
        .operations()
        .iter()
        .filter(|op| matches!(op, Operation::Select { .. }))
        .count();
    assert_eq!(selects, 2);
    assert_eq!(buffer, [0x71]);
}

#[test]
fn test_interface_addresses() {
    assert_eq!(I2cInterface::default(MockBus::new()).address(), 0x68);
    assert_eq!(I2cInterface::alternative(MockBus::new()).address(), 0x69);
    assert_eq!(I2cInterface::new(MockBus::new(), 0x42).address(), 0x42);
}

#[test]
fn test_release_returns_bus() {
    let bus = MockBus::new();
    let driver = Mpu9250Driver::new(I2cInterface::default(bus)).unwrap();

    let bus = driver.release().release();
    assert_eq!(bus.register(0x75), 0x71);
}

/// Minimal `embedded-hal` bus answering with a fixed register file
struct FakeI2c {
    registers: [u8; 256],
    pointer: usize,
    addresses: Vec<u8>,
}

impl FakeI2c {
    fn new() -> Self {
        let mut registers = [0u8; 256];
        registers[0x75] = 0x71;
        Self {
            registers,
            pointer: 0,
            addresses: Vec::new(),
        }
    }
}

impl ErrorType for FakeI2c {
    type Error = core::convert::Infallible;
}

impl I2c for FakeI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [I2cOperation<'_>],
    ) -> Result<(), Self::Error> {
        self.addresses.push(address);
        for operation in operations {
            match operation {
                I2cOperation::Write(bytes) => {
                    if let Some((&register, data)) = bytes.split_first() {
                        self.pointer = usize::from(register);
                        for &byte in data {
                            self.registers[self.pointer % 256] = byte;
                            self.pointer += 1;
                        }
                    }
                }
                I2cOperation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer % 256];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

#[test]
fn test_hal_bus_adapter() {
    let interface = I2cInterface::alternative(HalBus::new(FakeI2c::new()));
    let mut driver = Mpu9250Driver::new(interface).unwrap();

    assert_eq!(driver.read_who_am_i().unwrap(), 0x71);
    driver.set_sample_rate_divider(3).unwrap();

    let i2c = driver.release().release().release();
    assert_eq!(i2c.registers[0x19], 3);
    assert!(i2c.addresses.iter().all(|&address| address == 0x69));
}
