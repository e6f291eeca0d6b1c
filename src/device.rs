//! High-level driver API for the MPU-9250
//!
//! This module provides the device controller (power-up, clock selection,
//! filter and full-scale configuration) and the sample reader built on top of
//! the register interface.

use crate::interface::{I2cInterface, Transport};
use crate::registers::{
    Channel, Mpu9250 as RegisterDevice, SENSOR_DATA_LEN, SENSOR_DATA_START, TEMP_OUT_H,
};
use crate::sample::{self, FullScaleConfig, RawSample, ScaledSample};
use crate::sensors::{AccelConfig, AccelDlpf, AccelFullScale, GyroConfig, GyroDlpf, GyroFullScale};
use crate::{is_supported_device, Error};

/// Settle time after clearing the sleep bit, before the clock source changes
const WAKE_SETTLE_MS: u32 = 100;

/// `PWR_MGMT_1.CLKSEL`: internal 20 MHz oscillator
const CLKSEL_INTERNAL: u8 = 0;

/// `PWR_MGMT_1.CLKSEL`: gyroscope PLL when ready, internal oscillator otherwise
const CLKSEL_GYRO_PLL: u8 = 1;

/// `CONFIG.EXT_SYNC_SET`: FSYNC pin disabled
const EXT_SYNC_DISABLED: u8 = 0;

/// Progress of the configuration sequence run by [`Mpu9250Driver::init`]
///
/// Transitions only move forward during one `init()` call. A failed step
/// leaves the state at the last completed step; `init()` always restarts
/// from [`Uninitialized`](Self::Uninitialized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// Nothing written yet
    Uninitialized,
    /// Sleep cleared, running on the internal oscillator
    AwakeInternalClock,
    /// Clock switched to the gyroscope PLL
    AwakePll,
    /// Filters, ranges and sample rate written
    Configured,
}

/// How the sample reader fetches the six measurement channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadMode {
    /// Two single-byte reads per channel (high then low), twelve transactions
    #[default]
    PerRegister,
    /// One 2-byte read per channel starting at the high byte, six transactions
    Paired,
    /// One 14-byte read of the whole sensor block; all values come from the
    /// same internal sample
    Burst,
}

/// Driver configuration applied by [`Mpu9250Driver::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu9250Config {
    /// Gyroscope range and DLPF
    pub gyro: GyroConfig,
    /// Accelerometer range and DLPF
    pub accel: AccelConfig,
    /// Sample rate divider (`SMPLRT_DIV`)
    /// Actual sample rate = internal rate / (1 + `sample_rate_div`)
    pub sample_rate_div: u8,
    /// Channel read strategy
    pub read_mode: ReadMode,
}

impl Mpu9250Config {
    /// Calculate the effective output data rate in Hz
    #[must_use]
    pub fn sample_rate_hz(&self) -> f32 {
        f32::from(self.gyro.dlpf.internal_rate_hz()) / (1.0 + f32::from(self.sample_rate_div))
    }

    /// Worst-case filter latency added to each sample, in microseconds
    #[must_use]
    pub const fn max_latency_us(&self) -> u32 {
        let gyro = self.gyro.dlpf.delay_us();
        let accel = if self.accel.dlpf_enable {
            self.accel.dlpf.delay_us()
        } else {
            0
        };
        if gyro > accel {
            gyro
        } else {
            accel
        }
    }

    /// Ranges this configuration programs
    #[must_use]
    pub const fn full_scale(&self) -> FullScaleConfig {
        FullScaleConfig {
            gyro: self.gyro.full_scale,
            accel: self.accel.full_scale,
        }
    }
}

/// Main driver for the MPU-9250
pub struct Mpu9250Driver<T> {
    device: RegisterDevice<I2cInterface<T>>,
    config: Mpu9250Config,
    // Ranges last written to (or read back from) the device; all scaling uses these
    full_scale: FullScaleConfig,
    state: InitState,
}

impl<T> Mpu9250Driver<T>
where
    T: Transport,
{
    /// Create a new MPU-9250 driver instance with the default configuration
    ///
    /// This verifies the `WHO_AM_I` register and reads back the currently
    /// programmed full-scale ranges, but does not configure the device.
    /// Call `init()` after construction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value
    pub fn new(interface: I2cInterface<T>) -> Result<Self, Error<T::Error>> {
        Self::with_config(interface, Mpu9250Config::default())
    }

    /// Create a new driver instance that `init()` will program with `config`
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_config(
        interface: I2cInterface<T>,
        config: Mpu9250Config,
    ) -> Result<Self, Error<T::Error>> {
        let mut driver = Self {
            device: RegisterDevice::new(interface),
            config,
            full_scale: FullScaleConfig::default(),
            state: InitState::Uninitialized,
        };

        let who_am_i = driver.read_who_am_i()?;
        if !is_supported_device(who_am_i) {
            warn!("unexpected WHO_AM_I value {:#x}", who_am_i);
            return Err(Error::InvalidDevice(who_am_i));
        }

        driver.full_scale = driver.read_full_scale()?;
        debug!("found device, WHO_AM_I = {:#x}", who_am_i);
        Ok(driver)
    }

    /// Run the configuration sequence
    ///
    /// 1. `PWR_MGMT_1` = 0: clear sleep, internal oscillator; then wait
    /// 2. `PWR_MGMT_1` = 1: gyroscope PLL clock (separate write)
    /// 3. `CONFIG`: FSYNC disabled, gyro/temperature DLPF
    /// 4. `GYRO_CONFIG`: clear self-test bits, set range, keep bits [2:0]
    /// 5. `ACCEL_CONFIG`: clear self-test bits, set range, keep bits [2:0]
    /// 6. `ACCEL_CONFIG_2` and `SMPLRT_DIV`: accelerometer DLPF and rate divider
    ///
    /// There is no retry and no rollback: on error the device may be partly
    /// configured and [`state`](Self::state) reports the last completed step.
    /// Run `init()` again from the start rather than resuming.
    ///
    /// # Errors
    ///
    /// Returns the first bus error encountered.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<T::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let config = self.config;
        self.state = InitState::Uninitialized;

        self.device.pwr_mgmt_1().write(|w| {
            w.set_sleep(false);
            w.set_clksel(CLKSEL_INTERNAL);
        })?;
        self.state = InitState::AwakeInternalClock;
        delay.delay_ms(WAKE_SETTLE_MS);

        // Some parts only latch the clock source once awake
        self.device.pwr_mgmt_1().write(|w| {
            w.set_clksel(CLKSEL_GYRO_PLL);
        })?;
        self.state = InitState::AwakePll;

        self.device.configuration().write(|w| {
            w.set_ext_sync_set(EXT_SYNC_DISABLED);
            w.set_dlpf_cfg(config.gyro.dlpf as u8);
        })?;

        self.device.gyro_config().modify(|w| {
            w.set_xgyro_cten(false);
            w.set_ygyro_cten(false);
            w.set_zgyro_cten(false);
            w.set_gyro_fs_sel(config.gyro.full_scale as u8);
        })?;
        self.full_scale.gyro = config.gyro.full_scale;

        self.device.accel_config().modify(|w| {
            w.set_ax_st_en(false);
            w.set_ay_st_en(false);
            w.set_az_st_en(false);
            w.set_accel_fs_sel(config.accel.full_scale as u8);
        })?;
        self.full_scale.accel = config.accel.full_scale;

        self.device.accel_config_2().modify(|w| {
            w.set_a_dlpfcfg(config.accel.dlpf as u8);
            w.set_accel_fchoice_b(!config.accel.dlpf_enable);
        })?;

        self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(config.sample_rate_div);
        })?;

        self.state = InitState::Configured;
        info!(
            "MPU-9250 configured: gyro ±{} dps, accel ±{} g, DLPF {} Hz",
            config.gyro.full_scale.max_value(),
            config.accel.full_scale.max_value(),
            config.gyro.dlpf.bandwidth_hz()
        );
        Ok(())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x71 for an MPU-9250
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<T::Error>> {
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Read the full-scale ranges currently programmed in the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_full_scale(&mut self) -> Result<FullScaleConfig, Error<T::Error>> {
        let gyro = self.device.gyro_config().read()?;
        let accel = self.device.accel_config().read()?;
        Ok(FullScaleConfig {
            gyro: GyroFullScale::from_bits(gyro.gyro_fs_sel()),
            accel: AccelFullScale::from_bits(accel.accel_fs_sel()),
        })
    }

    /// Set the gyroscope full-scale range
    ///
    /// Only `GYRO_FS_SEL` (bits [4:3]) changes; self-test, reserved and
    /// `FCHOICE_B` bits keep their current values. Scaling switches to the
    /// new divisor once the write has succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_range(&mut self, range: GyroFullScale) -> Result<(), Error<T::Error>> {
        self.device.gyro_config().modify(|w| {
            w.set_gyro_fs_sel(range as u8);
        })?;
        self.full_scale.gyro = range;
        self.config.gyro.full_scale = range;
        debug!("gyro range set to ±{} dps", range.max_value());
        Ok(())
    }

    /// Set the accelerometer full-scale range
    ///
    /// Only `ACCEL_FS_SEL` (bits [4:3]) changes; self-test and reserved bits
    /// keep their current values.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_range(&mut self, range: AccelFullScale) -> Result<(), Error<T::Error>> {
        self.device.accel_config().modify(|w| {
            w.set_accel_fs_sel(range as u8);
        })?;
        self.full_scale.accel = range;
        self.config.accel.full_scale = range;
        debug!("accel range set to ±{} g", range.max_value());
        Ok(())
    }

    /// Set the gyroscope / temperature DLPF bandwidth
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_dlpf(&mut self, dlpf: GyroDlpf) -> Result<(), Error<T::Error>> {
        self.device.configuration().modify(|w| {
            w.set_dlpf_cfg(dlpf as u8);
        })?;
        self.config.gyro.dlpf = dlpf;
        Ok(())
    }

    /// Set the accelerometer DLPF bandwidth, or bypass it with `enable = false`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_dlpf(&mut self, dlpf: AccelDlpf, enable: bool) -> Result<(), Error<T::Error>> {
        self.device.accel_config_2().modify(|w| {
            w.set_a_dlpfcfg(dlpf as u8);
            w.set_accel_fchoice_b(!enable);
        })?;
        self.config.accel.dlpf = dlpf;
        self.config.accel.dlpf_enable = enable;
        Ok(())
    }

    /// Set the sample rate divider
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<T::Error>> {
        self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(divider);
        })?;
        self.config.sample_rate_div = divider;
        Ok(())
    }

    /// Select how channels are fetched by [`read_raw_sample`](Self::read_raw_sample)
    pub fn set_read_mode(&mut self, mode: ReadMode) {
        self.config.read_mode = mode;
    }

    /// Read one cycle of raw register values
    ///
    /// Any transfer error aborts the whole sample; no partially read or
    /// stale values are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, including
    /// [`Error::ShortRead`].
    pub fn read_raw_sample(&mut self) -> Result<RawSample, Error<T::Error>> {
        match self.config.read_mode {
            ReadMode::PerRegister => {
                let mut raw = RawSample::default();
                for channel in Channel::ALL {
                    let high = self.read_byte(channel.high_address())?;
                    let low = self.read_byte(channel.low_address())?;
                    raw.set(channel, sample::combine(high, low));
                }
                Ok(raw)
            }
            ReadMode::Paired => {
                let mut raw = RawSample::default();
                for channel in Channel::ALL {
                    raw.set(channel, self.read_word(channel.high_address())?);
                }
                Ok(raw)
            }
            ReadMode::Burst => {
                let mut block = [0u8; SENSOR_DATA_LEN];
                self.device
                    .interface
                    .read_bytes(SENSOR_DATA_START, &mut block)?;
                Ok(RawSample::from_block(&block))
            }
        }
    }

    /// Read one cycle in physical units
    ///
    /// Divisors come from the ranges last written to the device.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let sample = imu.read_sample()?;
    /// println!("gyro X: {}°/s, accel Z: {}g", sample.gyro.x, sample.accel.z);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_sample(&mut self) -> Result<ScaledSample, Error<T::Error>> {
        self.read_sample_with_raw().map(|(_, scaled)| scaled)
    }

    /// Read one cycle and return both the raw values and the scaled sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_sample_with_raw(&mut self) -> Result<(RawSample, ScaledSample), Error<T::Error>> {
        let raw = self.read_raw_sample()?;
        let scaled = ScaledSample::from_raw(&raw, self.full_scale);
        Ok((raw, scaled))
    }

    /// Read a 16-bit register pair with one 2-byte transfer from `high_address`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_word(&mut self, high_address: u8) -> Result<i16, Error<T::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_bytes(high_address, &mut buffer)?;
        Ok(sample::combine(buffer[0], buffer[1]))
    }

    fn read_byte(&mut self, address: u8) -> Result<u8, Error<T::Error>> {
        let mut buffer = [0u8; 1];
        self.device.interface.read_bytes(address, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Read temperature sensor
    ///
    /// Returns raw 16-bit signed value.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_word(TEMP_OUT_H)
    }

    /// Read temperature in degrees Celsius
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_celsius(&mut self) -> Result<f32, Error<T::Error>> {
        let raw = self.read_temperature()?;
        Ok(sample::temperature_to_celsius(raw))
    }
}

impl<T> Mpu9250Driver<T> {
    /// Ranges the scaling divisors are derived from
    #[must_use]
    pub const fn full_scale(&self) -> FullScaleConfig {
        self.full_scale
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &Mpu9250Config {
        &self.config
    }

    /// Progress of the configuration sequence
    #[must_use]
    pub const fn state(&self) -> InitState {
        self.state
    }

    /// True once `init()` has completed
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.state == InitState::Configured
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I2cInterface<T> {
        self.device.interface
    }
}
