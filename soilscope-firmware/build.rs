//! Build script for soilscope-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates station.toml at compile time
//! - Emits the station settings as constants (`station_config.rs` in OUT_DIR)

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use soilscope_core::config::{MAX_CHANNEL_CAPACITY, MAX_PERIOD_MS, MAX_SETTLE_READS, MIN_PERIOD_MS};

/// Values pulled out of station.toml
struct Station {
    sampling_period_ms: i64,
    render_period_ms: i64,
    channel_capacity: i64,
    i2c_address: i64,
    i2c_frequency_hz: i64,
    settle_reads: i64,
    climate_probe: &'static str,
}

fn main() {
    setup_linker();
    let station = validate_config();
    emit_config(&station);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate station.toml configuration at compile time
fn validate_config() -> Station {
    // Re-run if station.toml changes
    println!("cargo:rerun-if-changed=station.toml");

    let config_path = Path::new("station.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: station.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a station.toml configuration file.        ║\n\
            ║  Please create one in the soilscope-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read station.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in station.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let sampling_period_ms = read_int(
        &config,
        "sampling",
        "period_ms",
        MIN_PERIOD_MS as i64..=MAX_PERIOD_MS as i64,
        &mut errors,
    );
    let render_period_ms = read_int(
        &config,
        "rendering",
        "period_ms",
        MIN_PERIOD_MS as i64..=MAX_PERIOD_MS as i64,
        &mut errors,
    );
    let channel_capacity = read_int(
        &config,
        "channel",
        "capacity",
        1..=MAX_CHANNEL_CAPACITY as i64,
        &mut errors,
    );
    let i2c_address = read_int(&config, "panel", "i2c_address", 0x08..=0x77, &mut errors);
    let i2c_frequency_hz = read_int(
        &config,
        "panel",
        "i2c_frequency_hz",
        10_000..=1_000_000,
        &mut errors,
    );
    let settle_reads = read_int(
        &config,
        "moisture",
        "settle_reads",
        0..=MAX_SETTLE_READS as i64,
        &mut errors,
    );
    let climate_probe = read_probe(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid station configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=station.toml validated successfully");

    Station {
        sampling_period_ms,
        render_period_ms,
        channel_capacity,
        i2c_address,
        i2c_frequency_hz,
        settle_reads,
        climate_probe,
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read `[section] key` as an integer within `range`
fn read_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return *range.start();
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return *range.start();
        }
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) if range.contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            *range.start()
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            *range.start()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            *range.start()
        }
    }
}

/// Read `[climate] sensor` and map it to a probe variant name
fn read_probe(config: &toml::Value, errors: &mut Vec<String>) -> &'static str {
    match config.get("climate").and_then(|c| c.get("sensor")) {
        Some(toml::Value::String(sensor)) => match sensor.as_str() {
            "dht11" => "Dht11",
            "dht22" => "Dht22",
            _ => {
                errors.push("[climate] sensor must be 'dht11' or 'dht22'".to_string());
                "Dht11"
            }
        },
        Some(_) => {
            errors.push("[climate] sensor must be a string".to_string());
            "Dht11"
        }
        None => {
            errors.push("[climate] missing 'sensor'".to_string());
            "Dht11"
        }
    }
}

/// Write the validated settings as Rust constants
fn emit_config(station: &Station) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let source = format!(
        "/// Readings buffered between the sampling and rendering tasks\n\
         pub const CHANNEL_CAPACITY: usize = {capacity};\n\
         \n\
         /// Station settings from station.toml\n\
         pub const STATION: StationConfig = StationConfig {{\n\
         \x20   telemetry: TelemetryConfig {{\n\
         \x20       sampling_period_ms: {sampling},\n\
         \x20       render_period_ms: {render},\n\
         \x20   }},\n\
         \x20   panel: PanelConfig {{\n\
         \x20       i2c_address: {address:#04x},\n\
         \x20       i2c_frequency_hz: {frequency},\n\
         \x20   }},\n\
         \x20   moisture: MoistureConfig {{\n\
         \x20       settle_reads: {settle},\n\
         \x20   }},\n\
         \x20   climate_probe: ClimateProbeKind::{probe},\n\
         }};\n",
        capacity = station.channel_capacity,
        sampling = station.sampling_period_ms,
        render = station.render_period_ms,
        address = station.i2c_address,
        frequency = station.i2c_frequency_hz,
        settle = station.settle_reads,
        probe = station.climate_probe,
    );

    fs::write(out_dir.join("station_config.rs"), source).unwrap();
}
