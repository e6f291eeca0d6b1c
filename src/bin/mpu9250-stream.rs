use std::{error::Error, path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use linux_embedded_hal::Delay;
use mpu9250::{
    linux::DEFAULT_BUS_PATH, BusConfig, LinuxI2c, Mpu9250Config, Mpu9250Driver, ReadMode,
    SampleLoop, I2C_ADDRESS_AD0_LOW,
};

/// Stream accelerometer and gyroscope samples from an MPU-9250 on a Linux I2C bus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// I2C bus device
    #[arg(default_value = DEFAULT_BUS_PATH)]
    device: PathBuf,

    /// 7-bit device address (decimal or 0x-prefixed hex)
    #[arg(default_value_t = I2C_ADDRESS_AD0_LOW, value_parser = parse_address)]
    address: u8,

    /// Number of samples to read
    #[arg(default_value_t = 1000)]
    iterations: u64,

    /// Sampling period in milliseconds
    #[arg(short, long, default_value_t = 10)]
    period_ms: u64,

    /// How the six channels are fetched
    #[arg(short, long, value_enum, default_value_t = Mode::PerRegister)]
    mode: Mode,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    PerRegister,
    Paired,
    Burst,
}

impl From<Mode> for ReadMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::PerRegister => ReadMode::PerRegister,
            Mode::Paired => ReadMode::Paired,
            Mode::Burst => ReadMode::Burst,
        }
    }
}

fn parse_address(value: &str) -> Result<u8, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid address `{value}`: {e}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_env(Env::default().default_filter_or(log::LevelFilter::Info.as_str()))
        .format_target(false)
        .init();

    let args = Args::parse();
    let bus = BusConfig::new(args.device, args.address);

    let config = Mpu9250Config {
        read_mode: args.mode.into(),
        ..Default::default()
    };

    let interface = LinuxI2c::open_interface(&bus)?;
    let mut imu = Mpu9250Driver::with_config(interface, config)?;
    imu.init(&mut Delay)?;

    let mut sampler =
        SampleLoop::new(Duration::from_millis(args.period_ms)).with_max_samples(args.iterations);
    let summary = sampler.run(&mut imu, |sample| println!("{sample}"))?;

    if summary.overruns > 0 {
        log::warn!("{} of {} cycles overran", summary.overruns, summary.samples);
    }
    println!("{}", summary.elapsed.as_micros());

    Ok(())
}
