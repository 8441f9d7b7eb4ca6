use driftfix::{config::DriftConfig, input::source::evdev::find_gamepads};
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SourceDeviceRow {
    path: String,
    name: String,
}

/// Print all gamepads that could be used as a source device
pub fn handle_sources(config: &DriftConfig) {
    let source_devices: Vec<SourceDeviceRow> = find_gamepads(&config.target_name)
        .into_iter()
        .map(|(path, device)| SourceDeviceRow {
            path: path.display().to_string(),
            name: device.name().unwrap_or_default().to_string(),
        })
        .collect();
    let count = source_devices.len();

    let mut table = Table::new(source_devices);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Source Devices"));
    println!("{table}");
    println!("Found {count} source device(s)");
}
