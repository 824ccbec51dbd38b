//! Build script for helm-sim
//!
//! Validates the embedded robot.toml at compile time so a broken default
//! configuration never reaches the binary.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=robot.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("robot.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("\nERROR: failed to read robot.toml: {}\n", e),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!("\nERROR: invalid TOML syntax in robot.toml\n{}\n", e),
    };

    let mut errors = Vec::new();
    validate_drive(&config, &mut errors);
    validate_intervals(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\nERROR: invalid robot.toml\n{}\n",
            errors
                .iter()
                .map(|e| format!("  • {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Validate drivetrain geometry, speeds and brake mode
fn validate_drive(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(drive) = config.get("drive") else {
        return;
    };

    if let Some(geometry) = drive.get("geometry") {
        for key in ["wheel_diameter_in", "driving_gear", "driven_gear"] {
            if let Some(v) = geometry.get(key).and_then(number) {
                if v <= 0.0 {
                    errors.push(format!("[drive.geometry] {} must be positive", key));
                }
            }
        }
    }

    for key in ["drive_speed_pct", "turn_speed_pct", "arc_turn_speed_pct"] {
        if let Some(v) = drive.get(key).and_then(number) {
            if !(0.0..=100.0).contains(&v) {
                errors.push(format!("[drive] {} must be 0-100", key));
            }
        }
    }

    if let Some(toml::Value::String(brake)) = drive.get("brake") {
        if !["coast", "brake", "hold"].contains(&brake.as_str()) {
            errors.push("[drive] brake must be 'coast', 'brake', or 'hold'".to_string());
        }
    }
}

/// Validate that polling and timing intervals are non-zero
fn validate_intervals(config: &toml::Value, errors: &mut Vec<String>) {
    let checks = [
        ("watch", "poll_interval_ms"),
        ("auton", "period_ms"),
        ("auton", "telemetry_interval_ms"),
    ];
    for (section, key) in checks {
        if let Some(toml::Value::Integer(v)) = config.get(section).and_then(|s| s.get(key)) {
            if *v <= 0 {
                errors.push(format!("[{}] {} must be greater than zero", section, key));
            }
        }
    }
}
