//! Linux `/dev/i2c-N` transport
//!
//! [`LinuxI2c`] opens a Linux I2C character device with `i2cdev`, binds it
//! to the sensor address with the `I2C_SLAVE` ioctl and performs plain
//! `read(2)`/`write(2)` transfers so the byte count of every transfer is
//! visible to the driver.

use std::fs::File;
use std::io::{Read, Write};
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::{Path, PathBuf};

use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};

use crate::interface::{I2cInterface, Transport};
use crate::{Error, I2C_ADDRESS_AD0_LOW};

/// Default bus device
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

/// Where to find the sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// I2C character device, e.g. `/dev/i2c-1`
    pub path: PathBuf,
    /// 7-bit device address
    pub address: u8,
}

impl BusConfig {
    /// Bus configuration for `path` and `address`
    pub fn new(path: impl Into<PathBuf>, address: u8) -> Self {
        Self {
            path: path.into(),
            address,
        }
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_PATH, I2C_ADDRESS_AD0_LOW)
    }
}

/// Exclusive handle on a Linux I2C bus device
///
/// The descriptor is closed when the value is dropped.
pub struct LinuxI2c {
    device: LinuxI2CDevice,
    // Duplicate of the device descriptor; shares the bound slave address
    file: File,
    address: u8,
}

impl LinuxI2c {
    /// Open `config.path` and bind it to `config.address`
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceOpenFailed`] if the device node cannot be
    /// opened and [`Error::DeviceAddressFailed`] if the address cannot be
    /// claimed (e.g. a kernel driver already owns it).
    pub fn open(config: &BusConfig) -> Result<Self, Error<LinuxI2CError>> {
        Self::open_path(&config.path, config.address)
    }

    /// Open the bus and wrap it in an [`I2cInterface`] for `config.address`
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_interface(config: &BusConfig) -> Result<I2cInterface<Self>, Error<LinuxI2CError>> {
        let bus = Self::open(config)?;
        Ok(I2cInterface::new(bus, config.address))
    }

    fn open_path(path: &Path, address: u8) -> Result<Self, Error<LinuxI2CError>> {
        // Address 0 only opens the node; the real address is bound below
        let mut device = LinuxI2CDevice::new(path, 0).map_err(|e| {
            warn!("failed to open the I2C bus");
            Error::DeviceOpenFailed(e)
        })?;

        // SAFETY: the descriptor is owned by `device`, which is alive for this call
        let borrowed = unsafe { BorrowedFd::borrow_raw(device.as_raw_fd()) };
        let file = borrowed
            .try_clone_to_owned()
            .map(File::from)
            .map_err(|e| Error::DeviceOpenFailed(LinuxI2CError::from(e)))?;

        device.set_slave_address(u16::from(address)).map_err(|e| {
            warn!("failed to acquire bus access to {:#x}", address);
            Error::DeviceAddressFailed(e)
        })?;

        info!("opened I2C bus for device {:#x}", address);
        Ok(Self {
            device,
            file,
            address,
        })
    }

    /// Address currently bound to the descriptor
    pub const fn address(&self) -> u8 {
        self.address
    }
}

impl Transport for LinuxI2c {
    type Error = LinuxI2CError;

    fn select_device(&mut self, address: u8) -> Result<(), Self::Error> {
        self.device.set_slave_address(u16::from(address))?;
        self.address = address;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.file.write(bytes).map_err(LinuxI2CError::from)
    }

    fn read_raw(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.file.read(buffer).map_err(LinuxI2CError::from)
    }
}

impl Drop for LinuxI2c {
    fn drop(&mut self) {
        debug!("closing I2C bus for device {:#x}", self.address);
    }
}
