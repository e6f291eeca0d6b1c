#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod device;
pub mod interface;
pub mod registers;
pub mod sample;
pub mod sensors;

#[cfg(feature = "std")]
pub mod clock;
#[cfg(feature = "std")]
pub mod sampling;

#[cfg(feature = "linux")]
pub mod linux;

use core::fmt as core_fmt;

// Re-export main types
pub use device::{InitState, Mpu9250Config, Mpu9250Driver, ReadMode};
pub use interface::{HalBus, I2cInterface, Transport};
pub use registers::Channel;
pub use sample::{FullScaleConfig, RawSample, ScaledSample};
pub use sensors::{
    AccelConfig, AccelDataG, AccelDlpf, AccelFullScale, GyroConfig, GyroDataDps, GyroDataRps,
    GyroDlpf, GyroFullScale,
};

#[cfg(feature = "std")]
pub use clock::{SampleClock, Tick};
#[cfg(feature = "std")]
pub use sampling::{CancelToken, LoopSummary, SampleLoop};

#[cfg(feature = "linux")]
pub use linux::{BusConfig, LinuxI2c};

/// MPU-9250 I2C address when AD0 pin is low (default: 0x68)
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-9250 I2C address when AD0 pin is high (alternative: 0x69)
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// `WHO_AM_I` value of the MPU-9250
pub const WHO_AM_I_MPU9250: u8 = 0x71;

/// `WHO_AM_I` value of the MPU-9255
pub const WHO_AM_I_MPU9255: u8 = 0x73;

/// `WHO_AM_I` value of the MPU-6500 (same accel/gyro die, no magnetometer)
pub const WHO_AM_I_MPU6500: u8 = 0x70;

/// Returns true if `value` is a `WHO_AM_I` response this driver accepts
#[must_use]
pub const fn is_supported_device(value: u8) -> bool {
    matches!(
        value,
        WHO_AM_I_MPU9250 | WHO_AM_I_MPU9255 | WHO_AM_I_MPU6500
    )
}

/// Driver errors
///
/// `E` is the error type of the underlying [`Transport`].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus device could not be opened
    DeviceOpenFailed(E),
    /// The bus could not be claimed for the sensor's address
    DeviceAddressFailed(E),
    /// A bus write failed at the I/O level
    WriteFailed(E),
    /// Fewer bytes were written than requested
    ShortWrite {
        /// Bytes handed to the bus
        expected: usize,
        /// Bytes the bus accepted
        actual: usize,
    },
    /// A bus read failed at the I/O level
    ReadFailed(E),
    /// Fewer (or more) bytes were returned than requested
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes returned
        actual: usize,
    },
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> Error<E> {
    /// True for failures that leave the bus unusable (open / address claim)
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DeviceOpenFailed(_) | Self::DeviceAddressFailed(_))
    }
}

impl<E: core_fmt::Display> core_fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core_fmt::Formatter<'_>) -> core_fmt::Result {
        match self {
            Self::DeviceOpenFailed(e) => write!(f, "failed to open the I2C bus: {e}"),
            Self::DeviceAddressFailed(e) => {
                write!(f, "failed to acquire bus access to the sensor address: {e}")
            }
            Self::WriteFailed(e) => write!(f, "failed to write to the I2C bus: {e}"),
            Self::ShortWrite { expected, actual } => {
                write!(f, "short write, expected {expected} bytes but wrote {actual}")
            }
            Self::ReadFailed(e) => write!(f, "failed to read from the I2C bus: {e}"),
            Self::ShortRead { expected, actual } => {
                write!(f, "short read, expected {expected} bytes but got {actual}")
            }
            Self::InvalidDevice(id) => write!(f, "unexpected WHO_AM_I value {id:#04x}"),
            Self::InvalidConfig => f.write_str("invalid configuration parameter"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core_fmt::Debug + core_fmt::Display> std::error::Error for Error<E> {}
