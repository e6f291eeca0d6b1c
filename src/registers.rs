//! Register definitions for the MPU-9250
//!
//! The MPU-9250 exposes a flat 8-bit register space. Only the accelerometer,
//! gyroscope, power and identity registers are described here; every
//! configurable register names its reserved and self-test bits explicitly so
//! that read-modify-write cycles carry them through unchanged.
//!
//! ## Register groups
//! - **Self-test trim**: `SELF_TEST_{X,Y,Z}_GYRO`, `SELF_TEST_{X,Y,Z}_ACCEL`
//! - **Configuration**: `SMPLRT_DIV`, `CONFIG`, `GYRO_CONFIG`, `ACCEL_CONFIG`, `ACCEL_CONFIG_2`
//! - **Control**: `USER_CTRL`
//! - **Power management**: `PWR_MGMT_1`, `PWR_MGMT_2`
//! - **Identity**: `WHO_AM_I`
//! - **Sensor data**: `ACCEL_*OUT`, `TEMP_OUT`, `GYRO_*OUT` (see [`Channel`])

device_driver::create_device!(
    device_name: Mpu9250,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// SELF_TEST_X_GYRO - Gyroscope X self-test trim (0x00)
        register SelfTestXGyro {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Factory self-test output
            xg_st_data: uint = 0..8,
        },

        /// SELF_TEST_Y_GYRO - Gyroscope Y self-test trim (0x01)
        register SelfTestYGyro {
            const ADDRESS = 0x01;
            const SIZE_BITS = 8;

            /// Factory self-test output
            yg_st_data: uint = 0..8,
        },

        /// SELF_TEST_Z_GYRO - Gyroscope Z self-test trim (0x02)
        register SelfTestZGyro {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;

            /// Factory self-test output
            zg_st_data: uint = 0..8,
        },

        /// SELF_TEST_X_ACCEL - Accelerometer X self-test trim (0x0D)
        register SelfTestXAccel {
            const ADDRESS = 0x0D;
            const SIZE_BITS = 8;

            /// Factory self-test output
            xa_st_data: uint = 0..8,
        },

        /// SELF_TEST_Y_ACCEL - Accelerometer Y self-test trim (0x0E)
        register SelfTestYAccel {
            const ADDRESS = 0x0E;
            const SIZE_BITS = 8;

            /// Factory self-test output
            ya_st_data: uint = 0..8,
        },

        /// SELF_TEST_Z_ACCEL - Accelerometer Z self-test trim (0x0F)
        register SelfTestZAccel {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Factory self-test output
            za_st_data: uint = 0..8,
        },

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        /// Sample rate = internal rate / (1 + SMPLRT_DIV)
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            /// Divider applied to the internal sample rate
            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Configuration (0x1A)
        register Configuration {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Gyro and temperature DLPF bandwidth (used when GYRO_CONFIG.FCHOICE_B = 0)
            dlpf_cfg: uint = 0..3,
            /// FSYNC pin sampling location (0 = FSYNC disabled)
            ext_sync_set: uint = 3..6,
            /// FIFO mode: stop writing when full instead of overwriting
            fifo_mode: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// GYRO_CONFIG - Gyroscope Configuration (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            /// DLPF bypass (inverted FCHOICE), 0 keeps the DLPF active
            fchoice_b: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Gyroscope full scale select (±250, ±500, ±1000, ±2000 dps)
            gyro_fs_sel: uint = 3..5,
            /// Z-axis gyroscope self-test
            zgyro_cten: bool = 5,
            /// Y-axis gyroscope self-test
            ygyro_cten: bool = 6,
            /// X-axis gyroscope self-test
            xgyro_cten: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer Configuration (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Accelerometer full scale select (±2g, ±4g, ±8g, ±16g)
            accel_fs_sel: uint = 3..5,
            /// Z-axis accelerometer self-test
            az_st_en: bool = 5,
            /// Y-axis accelerometer self-test
            ay_st_en: bool = 6,
            /// X-axis accelerometer self-test
            ax_st_en: bool = 7,
        },

        /// ACCEL_CONFIG_2 - Accelerometer Configuration 2 (0x1D)
        register AccelConfig2 {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            /// Accelerometer DLPF bandwidth
            a_dlpfcfg: uint = 0..3,
            /// Accelerometer DLPF bypass (inverted FCHOICE)
            accel_fchoice_b: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// USER_CTRL - User Control (0x6A)
        register UserCtrl {
            const ADDRESS = 0x6A;
            const SIZE_BITS = 8;

            /// Reset gyro, accel and temperature signal paths and sensor registers
            sig_cond_rst: bool = 0,
            /// Reset the auxiliary I2C master
            i2c_mst_rst: bool = 1,
            /// Reset the FIFO
            fifo_rst: bool = 2,
            reserved_3: uint = 3..4,
            /// Disable the I2C slave interface (SPI only)
            i2c_if_dis: bool = 4,
            /// Enable the auxiliary I2C master
            i2c_mst_en: bool = 5,
            /// Enable the FIFO
            fifo_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0 = internal 20 MHz, 1 = gyro PLL when ready)
            clksel: uint = 0..3,
            /// Power down the PTAT voltage generator
            pd_ptat: bool = 3,
            /// Gyro drive and PLL stay on, sense paths off
            gyro_standby: bool = 4,
            /// Cycle between sleep and a single sample
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset
            h_reset: bool = 7,
        },

        /// PWR_MGMT_2 - Power Management 2 (0x6C)
        /// A set bit disables the axis
        register PwrMgmt2 {
            const ADDRESS = 0x6C;
            const SIZE_BITS = 8;

            disable_zg: bool = 0,
            disable_yg: bool = 1,
            disable_xg: bool = 2,
            disable_za: bool = 3,
            disable_ya: bool = 4,
            disable_xa: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// WHO_AM_I - Device ID (0x75)
        /// Expected value: 0x71 (MPU-9250), 0x73 (MPU-9255), 0x70 (MPU-6500)
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID
            who_am_i: uint = 0..8,
        },
    }
);

/// First register of the contiguous sensor data block (`ACCEL_XOUT_H`)
pub const SENSOR_DATA_START: u8 = 0x3B;

/// Length of the sensor data block: accel (6) + temperature (2) + gyro (6)
pub const SENSOR_DATA_LEN: usize = 14;

/// `TEMP_OUT_H`, followed by `TEMP_OUT_L`
pub const TEMP_OUT_H: u8 = 0x41;

/// One 16-bit measurement channel, stored as a high-byte register
/// immediately followed by its low-byte register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// `GYRO_XOUT_H` / `GYRO_XOUT_L`
    GyroX,
    /// `GYRO_YOUT_H` / `GYRO_YOUT_L`
    GyroY,
    /// `GYRO_ZOUT_H` / `GYRO_ZOUT_L`
    GyroZ,
    /// `ACCEL_XOUT_H` / `ACCEL_XOUT_L`
    AccelX,
    /// `ACCEL_YOUT_H` / `ACCEL_YOUT_L`
    AccelY,
    /// `ACCEL_ZOUT_H` / `ACCEL_ZOUT_L`
    AccelZ,
}

impl Channel {
    /// All channels in sampling order: gyro X/Y/Z, then accel X/Y/Z
    pub const ALL: [Self; 6] = [
        Self::GyroX,
        Self::GyroY,
        Self::GyroZ,
        Self::AccelX,
        Self::AccelY,
        Self::AccelZ,
    ];

    /// Address of the high byte
    #[must_use]
    pub const fn high_address(self) -> u8 {
        match self {
            Self::AccelX => 0x3B,
            Self::AccelY => 0x3D,
            Self::AccelZ => 0x3F,
            Self::GyroX => 0x43,
            Self::GyroY => 0x45,
            Self::GyroZ => 0x47,
        }
    }

    /// Address of the low byte (always the high-byte address + 1)
    #[must_use]
    pub const fn low_address(self) -> u8 {
        self.high_address() + 1
    }

    /// Byte offset of this channel inside the sensor data block
    #[must_use]
    pub const fn block_offset(self) -> usize {
        (self.high_address() - SENSOR_DATA_START) as usize
    }
}
