use std::env;
use std::error::Error;
use std::process;

use clap::Parser;
use driftfix::config::DriftConfig;
use driftfix::input::poller::{Poller, EXIT_DEVICE_NOT_FOUND, EXIT_FAILED};
use driftfix::input::source::evdev::gamepad::GamepadEventDevice;
use driftfix::input::source::{InputError, InputSource};
use driftfix::input::target::{TargetDevice, TargetDeviceTypeId};

use crate::cli::{main_cli, Args, Commands};

mod cli;

/// Bias magnitude above which an axis is reported as a major drift axis
const MAJOR_DRIFT_MINIMUM: f64 = 0.1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();

    let args = Args::parse();
    let config = args.load_config()?;
    let cmd = args.cmd.clone().unwrap_or(Commands::Run);
    if main_cli(&cmd, &config)? {
        return Ok(());
    }

    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting driftfix v{}", VERSION);

    if !nix::unistd::geteuid().is_root() {
        log::warn!("Not running as root. Grabbing the controller or creating the virtual device may fail.");
    }

    let code = run(config, args.target).await;
    if code != 0 {
        process::exit(code);
    }

    Ok(())
}

/// Open the devices and run the polling loop. Returns the process exit code.
async fn run(config: DriftConfig, target: TargetDeviceTypeId) -> i32 {
    let source = match GamepadEventDevice::open(config.device.as_deref(), &config.target_name) {
        Ok(source) => source,
        Err(InputError::DeviceNotFound) => {
            log::error!("No controller found.");
            return EXIT_DEVICE_NOT_FOUND;
        }
        Err(e) => {
            log::error!("Unable to open controller: {e}");
            return EXIT_FAILED;
        }
    };
    log::info!("Controller connected: {} ({:?})", source.name(), source.path());
    log_drift_values(&config);

    let sink = match TargetDevice::create(target, &config) {
        Ok(sink) => sink,
        Err(e) => {
            log::error!("Unable to create {target} target device: {e}");
            return EXIT_FAILED;
        }
    };
    log::info!("Created {target} target device: {}", config.target_name);

    let mut poller = Poller::new(source, sink, &config);
    log::debug!("Polling every {:?}", poller.interval());
    let summary = poller.run().await;

    summary.exit_code()
}

fn log_drift_values(config: &DriftConfig) {
    log::info!("Using pre-configured drift values:");
    let major = config.major_drift_axis(MAJOR_DRIFT_MINIMUM);
    for (axis, value) in config.bias.iter().enumerate() {
        if major == Some(axis) {
            log::info!("AXIS {axis}: {value:.5} (MAJOR DRIFT)");
        } else {
            log::info!("AXIS {axis}: {value:.5}");
        }
    }
}
