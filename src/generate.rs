use std::fs::{self, File};
use std::io::Write;

use driftfix::config::DriftConfig;
use schemars::schema_for;

const SCHEMA_DIR: &str = "./rootfs/usr/share/driftfix/schema";

fn main() {
    let config_schema = schema_for!(DriftConfig);
    fs::create_dir_all(SCHEMA_DIR).expect("Failed to create schema directory");
    let mut file =
        File::create(format!("{SCHEMA_DIR}/config_v1.json")).expect("Failed to create schema file");
    write!(
        file,
        "{}",
        serde_json::to_string_pretty(&config_schema).unwrap()
    )
    .expect("Failed to write schema");
}
