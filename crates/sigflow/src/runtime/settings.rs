use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct FileSettings {
    motor: Option<MotorSection>,
}

#[derive(Debug, Deserialize)]
struct MotorSection {
    rpm: Option<i64>,
}

/// Resolves the startup actuator speed from a YAML document with a nested
/// `motor.rpm` field. Every failure (unreadable file, parse error, missing
/// field, negative value) is a diagnostic and `None`; the caller keeps the
/// compiled-in default. Configuration failure is never fatal.
pub fn load_initial_speed(path: &Path) -> Option<i64> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            warn!(path = %path.display(), %err, "config file unreadable, keeping default speed");
            return None;
        }
    };
    let settings: FileSettings = match serde_yaml::from_str(&data) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(path = %path.display(), %err, "config parse failed, keeping default speed");
            return None;
        }
    };
    match settings.motor.and_then(|m| m.rpm) {
        Some(rpm) if rpm >= 0 => {
            info!(rpm, "loaded actuator speed from config");
            Some(rpm)
        }
        Some(rpm) => {
            warn!(rpm, "negative rpm in config, keeping default speed");
            None
        }
        None => {
            warn!(path = %path.display(), "config missing motor.rpm, keeping default speed");
            None
        }
    }
}
