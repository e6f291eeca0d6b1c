//! Sensor modules for the MPU-9250
//!
//! This module provides types, enums, and configuration structures for each sensor
//! in the MPU-9250:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//!
//! All sensor operations are performed through methods on `Mpu9250Driver`.

pub mod accelerometer;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{AccelConfig, AccelDataG, AccelDlpf, AccelFullScale};
pub use gyroscope::{GyroConfig, GyroDataDps, GyroDataRps, GyroDlpf, GyroFullScale};
