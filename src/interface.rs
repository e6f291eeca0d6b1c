//! Bus interface implementations for the MPU-9250
//!
//! The driver talks to the sensor through two layers:
//! - [`Transport`]: raw addressed writes and reads on one bus, reporting how many
//!   bytes actually moved. Implemented by [`HalBus`] for any `embedded-hal` I2C
//!   peripheral and by `LinuxI2c` (feature `linux`) for `/dev/i2c-N`.
//! - [`I2cInterface`]: the register protocol on top of a transport (pointer byte
//!   first, then data) exposed as a `device-driver` [`RegisterInterface`].
//!
//! Every transfer length is checked; a short transfer is an error, never a
//! partially filled buffer.

use crate::{Error, I2C_ADDRESS_AD0_HIGH, I2C_ADDRESS_AD0_LOW};
use device_driver::RegisterInterface;

/// Largest payload accepted by a single register write
pub const MAX_WRITE_LEN: usize = 32;

/// Raw access to a two-wire bus
///
/// Implementations own the bus handle; dropping the transport releases it.
pub trait Transport {
    /// Bus-level error type
    type Error;

    /// Bind subsequent transfers to the 7-bit device `address`
    ///
    /// # Errors
    ///
    /// Returns the bus error if the address cannot be claimed.
    fn select_device(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Write `bytes` to the selected device, returning how many were written
    ///
    /// # Errors
    ///
    /// Returns the bus error on an I/O failure.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;

    /// Read into `buffer` from the selected device, returning how many bytes arrived
    ///
    /// # Errors
    ///
    /// Returns the bus error on an I/O failure.
    fn read_raw(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

/// [`Transport`] over an `embedded-hal` I2C peripheral
///
/// `embedded-hal` transfers are all-or-nothing, so a successful call always
/// reports the full length.
pub struct HalBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> HalBus<I2C> {
    /// Wrap an `embedded-hal` I2C peripheral
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_LOW,
        }
    }

    /// Consume the adapter and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Transport for HalBus<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn select_device(&mut self, address: u8) -> Result<(), Self::Error> {
        // Addressing happens per transfer on embedded-hal buses
        self.address = address;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.i2c.write(self.address, bytes)?;
        Ok(bytes.len())
    }

    fn read_raw(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.read(self.address, buffer)?;
        Ok(buffer.len())
    }
}

/// I2C register interface for the MPU-9250
///
/// Owns the transport exclusively. A register read is two transfers: the
/// 1-byte register pointer, then the data; the device auto-increments its
/// pointer, so reading N bytes from a high-byte register returns the high
/// byte followed by the low byte.
pub struct I2cInterface<T> {
    bus: T,
    address: u8,
    selected: bool,
}

impl<T> I2cInterface<T> {
    /// Create a new I2C interface with the default address (0x68, AD0 pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(bus);
    /// let mut imu = Mpu9250Driver::new(interface)?;
    /// ```
    pub const fn default(bus: T) -> Self {
        Self::new(bus, I2C_ADDRESS_AD0_LOW)
    }

    /// Create a new I2C interface with the alternative address (0x69, AD0 pin HIGH)
    pub const fn alternative(bus: T) -> Self {
        Self::new(bus, I2C_ADDRESS_AD0_HIGH)
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(bus: T, address: u8) -> Self {
        Self {
            bus,
            address,
            selected: false,
        }
    }

    /// The 7-bit device address all transfers target
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the transport
    pub fn release(self) -> T {
        self.bus
    }
}

impl<T: Transport> I2cInterface<T> {
    fn ensure_selected(&mut self) -> Result<(), Error<T::Error>> {
        if !self.selected {
            self.bus.select_device(self.address).map_err(|e| {
                warn!("failed to select device {:#x}", self.address);
                Error::DeviceAddressFailed(e)
            })?;
            self.selected = true;
        }
        Ok(())
    }

    /// Write `bytes` as one transfer and verify the full length went out
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailed`] on an I/O failure and
    /// [`Error::ShortWrite`] if the bus accepted fewer bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        self.ensure_selected()?;
        let written = self.bus.write_raw(bytes).map_err(|e| {
            self.selected = false;
            warn!("failed to write to the I2C bus");
            Error::WriteFailed(e)
        })?;

        if written != bytes.len() {
            self.selected = false;
            warn!(
                "short write, expected {} bytes but wrote {}",
                bytes.len(),
                written
            );
            return Err(Error::ShortWrite {
                expected: bytes.len(),
                actual: written,
            });
        }
        Ok(())
    }

    /// Read `buffer.len()` bytes starting at `register`
    ///
    /// # Errors
    ///
    /// Returns a write error if the register pointer could not be set,
    /// [`Error::ReadFailed`] on an I/O failure and [`Error::ShortRead`] if the
    /// device returned a different number of bytes.
    pub fn read_bytes(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Error<T::Error>> {
        self.write_bytes(&[register])?;

        let count = self.bus.read_raw(buffer).map_err(|e| {
            self.selected = false;
            warn!("failed to read from the I2C bus");
            Error::ReadFailed(e)
        })?;

        if count != buffer.len() {
            self.selected = false;
            warn!(
                "short read, expected {} bytes but got {}",
                buffer.len(),
                count
            );
            return Err(Error::ShortRead {
                expected: buffer.len(),
                actual: count,
            });
        }
        trace!("read {} bytes from {:#x}", buffer.len(), register);
        Ok(())
    }

    /// Write `data` to consecutive registers starting at `register`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `data` exceeds [`MAX_WRITE_LEN`],
    /// otherwise see [`write_bytes`](Self::write_bytes).
    pub fn write_register_bytes(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), Error<T::Error>> {
        if data.len() > MAX_WRITE_LEN {
            return Err(Error::InvalidConfig);
        }
        // Register pointer + data in a single transfer
        let mut buffer = [0u8; MAX_WRITE_LEN + 1];
        buffer[0] = register;
        buffer[1..=data.len()].copy_from_slice(data);

        self.write_bytes(&buffer[..=data.len()])
    }
}

impl<T: Transport> RegisterInterface for I2cInterface<T> {
    type Error = Error<T::Error>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.read_bytes(address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        self.write_register_bytes(address, write_data)
    }
}
