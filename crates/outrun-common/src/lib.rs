//! Common configuration types shared across OutRun crates
//!
//! Options are read from a flat JSON or TOML table of scalars. Every value
//! is optional: missing or malformed entries fall back to the defaults
//! below, so loading a file can only fail on I/O or syntax errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML options: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported options format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;
pub const DEFAULT_LANES: u32 = 3;
pub const DEFAULT_ROAD_WIDTH: f32 = 2000.0;
pub const DEFAULT_CAMERA_HEIGHT: f32 = 1000.0;
pub const DEFAULT_DRAW_DISTANCE: u32 = 300;
pub const DEFAULT_FOG_DENSITY: f32 = 5.0;
pub const DEFAULT_FIELD_OF_VIEW: f32 = 100.0;
pub const DEFAULT_SEGMENT_LENGTH: f32 = 200.0;
pub const DEFAULT_RUMBLE_LENGTH: u32 = 3;

/// Tunable race options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaceOptions {
    /// Logical viewport width in pixels
    pub width: u32,
    /// Logical viewport height in pixels
    pub height: u32,
    pub lanes: u32,
    /// Half-width of the road in world units
    pub road_width: f32,
    pub camera_height: f32,
    /// Number of segments projected each frame
    pub draw_distance: u32,
    pub fog_density: f32,
    /// Horizontal field of view in degrees
    pub field_of_view: f32,
    pub segment_length: f32,
    /// Segments per rumble-strip colour band
    pub rumble_length: u32,
}

impl Default for RaceOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            lanes: DEFAULT_LANES,
            road_width: DEFAULT_ROAD_WIDTH,
            camera_height: DEFAULT_CAMERA_HEIGHT,
            draw_distance: DEFAULT_DRAW_DISTANCE,
            fog_density: DEFAULT_FOG_DENSITY,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            rumble_length: DEFAULT_RUMBLE_LENGTH,
        }
    }
}

/// Options together with whether they change the track geometry
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedOptions {
    pub options: RaceOptions,
    /// True when `segmentLength` or `rumbleLength` was supplied; the
    /// track has to be rebuilt from scratch in that case.
    pub geometry_overridden: bool,
}

impl Default for LoadedOptions {
    fn default() -> Self {
        Self {
            options: RaceOptions::default(),
            geometry_overridden: false,
        }
    }
}

impl RaceOptions {
    /// Build options from string key/value pairs, falling back per key.
    pub fn from_map(map: &HashMap<String, String>) -> LoadedOptions {
        let options = Self {
            width: parse_or(map, "width", DEFAULT_WIDTH, |v: &u32| *v > 0),
            height: parse_or(map, "height", DEFAULT_HEIGHT, |v: &u32| *v > 0),
            lanes: parse_or(map, "lanes", DEFAULT_LANES, |v: &u32| *v >= 1),
            road_width: parse_or(map, "roadWidth", DEFAULT_ROAD_WIDTH, positive),
            camera_height: parse_or(map, "cameraHeight", DEFAULT_CAMERA_HEIGHT, positive),
            draw_distance: parse_or(map, "drawDistance", DEFAULT_DRAW_DISTANCE, |v: &u32| *v > 0),
            fog_density: parse_or(map, "fogDensity", DEFAULT_FOG_DENSITY, |v: &f32| {
                v.is_finite() && *v >= 0.0
            }),
            field_of_view: parse_or(map, "fieldOfView", DEFAULT_FIELD_OF_VIEW, |v: &f32| {
                *v > 0.0 && *v < 180.0
            }),
            segment_length: parse_or(map, "segmentLength", DEFAULT_SEGMENT_LENGTH, positive),
            rumble_length: parse_or(map, "rumbleLength", DEFAULT_RUMBLE_LENGTH, |v: &u32| *v > 0),
        };

        let geometry_overridden =
            map.contains_key("segmentLength") || map.contains_key("rumbleLength");

        tracing::debug!(?options, geometry_overridden, "Race options resolved");

        LoadedOptions {
            options,
            geometry_overridden,
        }
    }
}

impl LoadedOptions {
    /// Load options from a `.json` or `.toml` file.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No options file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let map: HashMap<String, String> = match ext.as_str() {
            "json" => {
                let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&text)?;
                raw.into_iter()
                    .filter_map(|(k, v)| json_scalar(&v).map(|s| (k, s)))
                    .collect()
            }
            "toml" => {
                let raw: HashMap<String, toml::Value> = toml::from_str(&text)?;
                raw.into_iter()
                    .filter_map(|(k, v)| toml_scalar(&v).map(|s| (k, s)))
                    .collect()
            }
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!("Loaded {} option(s) from {}", map.len(), path.display());
        Ok(RaceOptions::from_map(&map))
    }
}

fn positive(v: &f32) -> bool {
    v.is_finite() && *v > 0.0
}

/// Parse `key` from the map, keeping the default when absent or rejected.
fn parse_or<T, F>(map: &HashMap<String, String>, key: &str, default: T, valid: F) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Debug,
    F: Fn(&T) -> bool,
{
    let Some(raw) = map.get(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => v,
        Ok(v) => {
            tracing::warn!("Option {} = {:?} out of range, using {:?}", key, v, default);
            default
        }
        Err(_) => {
            tracing::warn!("Option {} = {:?} is malformed, using {:?}", key, raw, default);
            default
        }
    }
}

fn json_scalar(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn toml_scalar(v: &toml::Value) -> Option<String> {
    match v {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
