pub mod source;

use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use driftfix::{
    config::{path::find_config_file, DriftConfig, LoadError},
    input::target::TargetDeviceTypeId,
};
use source::handle_sources;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Path to the physical gamepad (e.g. "/dev/input/event12")
    #[arg(short, long)]
    pub device: Option<String>,
    /// Kind of virtual device to create
    #[arg(short, long, value_enum, default_value_t = TargetDeviceTypeId::Xb360)]
    pub target: TargetDeviceTypeId,
    /// Polling rate in Hz
    #[arg(long)]
    pub poll_rate: Option<u32>,
    /// Deadzone applied to all stick axes
    #[arg(long)]
    pub deadzone: Option<f64>,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Correct drift and emit a virtual gamepad (default)
    Run,
    /// List detected gamepads
    Devices,
    /// Print the effective configuration
    Config,
}

impl Args {
    /// Load the configuration file and apply command line overrides
    pub fn load_config(&self) -> Result<DriftConfig, LoadError> {
        let path = self.config.clone().or_else(find_config_file);
        let mut config = match path {
            Some(path) => {
                log::info!("Loading config from {path:?}");
                DriftConfig::from_yaml_path(&path)?
            }
            None => {
                log::debug!("No config file found. Using defaults.");
                DriftConfig::default()
            }
        };

        if let Some(device) = self.device.as_ref() {
            config.device = Some(device.clone());
        }
        if let Some(poll_rate) = self.poll_rate {
            config.poll_rate = poll_rate;
        }
        if let Some(deadzone) = self.deadzone {
            config.base_deadzone = deadzone;
        }
        config.validate()?;

        Ok(config)
    }
}

/// Handle any command that does not start the polling loop. Returns true if
/// a command was handled.
pub fn main_cli(cmd: &Commands, config: &DriftConfig) -> Result<bool, Box<dyn Error>> {
    match cmd {
        Commands::Run => return Ok(false),
        Commands::Devices => handle_sources(config),
        Commands::Config => print!("{}", config.to_yaml()?),
    }

    Ok(true)
}
