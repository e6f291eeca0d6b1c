//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the MPU-9250's 3-axis accelerometer.

/// Accelerometer full-scale range (`ACCEL_CONFIG.ACCEL_FS_SEL`, bits [4:3])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range, power-on default)
    #[default]
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelFullScale {
    /// Get the sensitivity in LSB/g (Least Significant Bit per g)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0, // LSB/g
            Self::G4 => 8192.0,  // LSB/g
            Self::G8 => 4096.0,  // LSB/g
            Self::G16 => 2048.0, // LSB/g
        }
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Decode the 2-bit `ACCEL_FS_SEL` field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }
}

/// Accelerometer Digital Low Pass Filter (`ACCEL_CONFIG_2.A_DLPFCFG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelDlpf {
    /// 218.1 Hz bandwidth, 1.88 ms delay (power-on default)
    Hz218 = 0,
    /// 99 Hz bandwidth, 2.88 ms delay
    Hz99 = 2,
    /// 44.8 Hz bandwidth, 4.88 ms delay
    Hz45 = 3,
    /// 21.2 Hz bandwidth, 8.87 ms delay
    Hz21 = 4,
    /// 10.2 Hz bandwidth, 16.83 ms delay
    Hz10 = 5,
    /// 5.05 Hz bandwidth, 32.48 ms delay
    Hz5 = 6,
    /// 420 Hz bandwidth, 1.38 ms delay
    Hz420 = 7,
}

impl AccelDlpf {
    /// Get the 3dB bandwidth in Hz (rounded)
    #[must_use]
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz218 => 218,
            Self::Hz99 => 99,
            Self::Hz45 => 45,
            Self::Hz21 => 21,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
            Self::Hz420 => 420,
        }
    }

    /// Filter delay in microseconds
    #[must_use]
    pub const fn delay_us(self) -> u32 {
        match self {
            Self::Hz218 => 1880,
            Self::Hz99 => 2880,
            Self::Hz45 => 4880,
            Self::Hz21 => 8870,
            Self::Hz10 => 16_830,
            Self::Hz5 => 32_480,
            Self::Hz420 => 1380,
        }
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Full-scale range
    pub full_scale: AccelFullScale,
    /// Digital Low Pass Filter configuration
    pub dlpf: AccelDlpf,
    /// Enable DLPF (if false, the filter is bypassed: 1.046 kHz bandwidth, 4 kHz rate)
    pub dlpf_enable: bool,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            full_scale: AccelFullScale::G2,
            dlpf: AccelDlpf::Hz218,
            dlpf_enable: true,
        }
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in LSB/g (from `AccelFullScale::sensitivity()`)
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity,
            y: f32::from(raw_y) / sensitivity,
            z: f32::from(raw_z) / sensitivity,
        }
    }

    /// Get the magnitude of the acceleration vector (≈1.0 g at rest)
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
