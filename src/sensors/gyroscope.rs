//! Gyroscope sensor types and configuration
//!
//! Provides types, enums, and utility functions for the MPU-9250's 3-axis gyroscope.

/// Gyroscope full-scale range (`GYRO_CONFIG.GYRO_FS_SEL`, bits [4:3])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250°/s range (power-on default)
    #[default]
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroFullScale {
    /// Get the sensitivity in LSB/(°/s)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0, // LSB/(°/s)
            Self::Dps500 => 65.5,  // LSB/(°/s)
            Self::Dps1000 => 32.8, // LSB/(°/s)
            Self::Dps2000 => 16.4, // LSB/(°/s)
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    /// Decode the 2-bit `GYRO_FS_SEL` field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Dps250,
            1 => Self::Dps500,
            2 => Self::Dps1000,
            _ => Self::Dps2000,
        }
    }
}

/// Gyroscope and temperature Digital Low Pass Filter (`CONFIG.DLPF_CFG`)
///
/// Narrower bandwidths add latency to every sample; the sampling period
/// should be at least [`delay_us`](Self::delay_us).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroDlpf {
    /// 250 Hz bandwidth, 0.97 ms delay, 8 kHz internal rate
    Hz250 = 0,
    /// 184 Hz bandwidth, 2.9 ms delay
    Hz184 = 1,
    /// 92 Hz bandwidth, 3.9 ms delay
    Hz92 = 2,
    /// 41 Hz bandwidth, 5.9 ms delay
    Hz41 = 3,
    /// 20 Hz bandwidth, 9.9 ms delay
    Hz20 = 4,
    /// 10 Hz bandwidth, 17.85 ms delay
    Hz10 = 5,
    /// 5 Hz bandwidth, 33.48 ms delay
    Hz5 = 6,
    /// 3600 Hz bandwidth, 0.17 ms delay, 8 kHz internal rate
    Hz3600 = 7,
}

impl GyroDlpf {
    /// Get the gyroscope 3dB bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz250 => 250,
            Self::Hz184 => 184,
            Self::Hz92 => 92,
            Self::Hz41 => 41,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
            Self::Hz3600 => 3600,
        }
    }

    /// Get the temperature sensor bandwidth in Hz
    #[must_use]
    pub const fn temperature_bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz250 | Self::Hz3600 => 4000,
            Self::Hz184 => 188,
            Self::Hz92 => 98,
            Self::Hz41 => 42,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
        }
    }

    /// Filter delay in microseconds
    #[must_use]
    pub const fn delay_us(self) -> u32 {
        match self {
            Self::Hz250 => 970,
            Self::Hz184 => 2900,
            Self::Hz92 => 3900,
            Self::Hz41 => 5900,
            Self::Hz20 => 9900,
            Self::Hz10 => 17_850,
            Self::Hz5 => 33_480,
            Self::Hz3600 => 170,
        }
    }

    /// Internal sample rate in Hz before `SMPLRT_DIV` is applied
    #[must_use]
    pub const fn internal_rate_hz(self) -> u16 {
        match self {
            Self::Hz250 | Self::Hz3600 => 8000,
            _ => 1000,
        }
    }
}

/// Gyroscope configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Full-scale range
    pub full_scale: GyroFullScale,
    /// Digital Low Pass Filter configuration (shared with the temperature sensor)
    pub dlpf: GyroDlpf,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            full_scale: GyroFullScale::Dps250,
            dlpf: GyroDlpf::Hz41,
        }
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in LSB/(°/s) (from `GyroFullScale::sensitivity()`)
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity,
            y: f32::from(raw_y) / sensitivity,
            z: f32::from(raw_z) / sensitivity,
        }
    }

    /// Convert to radians per second
    #[must_use]
    pub fn to_radians_per_sec(&self) -> GyroDataRps {
        const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
        GyroDataRps {
            x: self.x * DEG_TO_RAD,
            y: self.y * DEG_TO_RAD,
            z: self.z * DEG_TO_RAD,
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Gyroscope data in radians per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataRps {
    /// X-axis rotation rate in rad/s
    pub x: f32,
    /// Y-axis rotation rate in rad/s
    pub y: f32,
    /// Z-axis rotation rate in rad/s
    pub z: f32,
}
