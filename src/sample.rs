//! Raw and scaled sample types
//!
//! A [`RawSample`] holds the six signed 16-bit register values of one
//! sampling cycle. A [`ScaledSample`] is the same cycle in physical units,
//! derived with the divisors of the [`FullScaleConfig`] that was last written
//! to the device.

use core::fmt;

use crate::registers::Channel;
use crate::sensors::{AccelDataG, AccelFullScale, GyroDataDps, GyroFullScale};

/// Temperature sensitivity in LSB/°C
pub const TEMP_SENSITIVITY: f32 = 333.87;

/// Temperature offset in °C (`RoomTemp_Offset` = 0)
pub const TEMP_OFFSET_C: f32 = 21.0;

/// Full-scale ranges currently programmed into the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FullScaleConfig {
    /// Gyroscope range
    pub gyro: GyroFullScale,
    /// Accelerometer range
    pub accel: AccelFullScale,
}

/// One cycle of raw register values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Gyroscope X/Y/Z (raw)
    pub gyro: [i16; 3],
    /// Accelerometer X/Y/Z (raw)
    pub accel: [i16; 3],
}

impl RawSample {
    /// Store the value of one channel
    pub fn set(&mut self, channel: Channel, value: i16) {
        match channel {
            Channel::GyroX => self.gyro[0] = value,
            Channel::GyroY => self.gyro[1] = value,
            Channel::GyroZ => self.gyro[2] = value,
            Channel::AccelX => self.accel[0] = value,
            Channel::AccelY => self.accel[1] = value,
            Channel::AccelZ => self.accel[2] = value,
        }
    }

    /// Value of one channel
    #[must_use]
    pub const fn get(&self, channel: Channel) -> i16 {
        match channel {
            Channel::GyroX => self.gyro[0],
            Channel::GyroY => self.gyro[1],
            Channel::GyroZ => self.gyro[2],
            Channel::AccelX => self.accel[0],
            Channel::AccelY => self.accel[1],
            Channel::AccelZ => self.accel[2],
        }
    }

    /// Decode the 14-byte `ACCEL_XOUT_H..GYRO_ZOUT_L` block
    ///
    /// The temperature word in the middle of the block is skipped.
    #[must_use]
    pub fn from_block(block: &[u8; crate::registers::SENSOR_DATA_LEN]) -> Self {
        let mut sample = Self::default();
        for channel in Channel::ALL {
            let offset = channel.block_offset();
            sample.set(channel, combine(block[offset], block[offset + 1]));
        }
        sample
    }
}

impl fmt::Display for RawSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [gx, gy, gz] = self.gyro;
        let [ax, ay, az] = self.accel;
        writeln!(f, "raw gyro  : <{gx},{gy},{gz}>")?;
        write!(f, "raw accel : <{ax},{ay},{az}>")
    }
}

/// One cycle in physical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaledSample {
    /// Angular rate in °/s
    pub gyro: GyroDataDps,
    /// Acceleration in g
    pub accel: AccelDataG,
}

impl ScaledSample {
    /// Scale a raw sample with the divisors of `full_scale`
    #[must_use]
    pub fn from_raw(raw: &RawSample, full_scale: FullScaleConfig) -> Self {
        let [gx, gy, gz] = raw.gyro;
        let [ax, ay, az] = raw.accel;
        Self {
            gyro: GyroDataDps::from_raw(gx, gy, gz, full_scale.gyro.sensitivity()),
            accel: AccelDataG::from_raw(ax, ay, az, full_scale.accel.sensitivity()),
        }
    }
}

impl fmt::Display for ScaledSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.gyro;
        let a = &self.accel;
        writeln!(f, "gyro  : <{},{},{}>", g.x, g.y, g.z)?;
        write!(f, "accel : <{},{},{}>", a.x, a.y, a.z)
    }
}

/// Combine a high and a low register byte into a signed 16-bit value
#[must_use]
pub const fn combine(high: u8, low: u8) -> i16 {
    i16::from_be_bytes([high, low])
}

/// Convert raw temperature to degrees Celsius
#[must_use]
pub fn temperature_to_celsius(raw: i16) -> f32 {
    (f32::from(raw) / TEMP_SENSITIVITY) + TEMP_OFFSET_C
}
