//! Dashboard configuration.
//!
//! The default configuration is baked into the binary from
//! `config/dashboard.toml` via [`include_str!`]. A different file can be
//! supplied at runtime; fields it leaves out keep their defaults.

use std::path::Path;

use activity_map_filter_models::DatePreset;
use activity_map_record::CoordinateFields;
use activity_map_symbology::renderer::{
    DEFAULT_MAX_PIXEL_INTENSITY, DEFAULT_MIN_PIXEL_INTENSITY, HeatmapRenderer,
};
use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_TOML: &str = include_str!("../config/dashboard.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Heatmap intensity settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Intensity mapped to the hottest color.
    pub max_pixel_intensity: u32,
    /// Intensity mapped to the coolest color.
    pub min_pixel_intensity: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            max_pixel_intensity: DEFAULT_MAX_PIXEL_INTENSITY,
            min_pixel_intensity: DEFAULT_MIN_PIXEL_INTENSITY,
        }
    }
}

impl From<HeatmapConfig> for HeatmapRenderer {
    fn from(config: HeatmapConfig) -> Self {
        Self {
            max_pixel_intensity: config.max_pixel_intensity,
            min_pixel_intensity: config.min_pixel_intensity,
        }
    }
}

/// Host table column names for coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Longitude column.
    pub longitude: String,
    /// Latitude column.
    pub latitude: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        let fields = CoordinateFields::default();
        Self {
            longitude: fields.longitude,
            latitude: fields.latitude,
        }
    }
}

impl From<&FieldsConfig> for CoordinateFields {
    fn from(config: &FieldsConfig) -> Self {
        Self {
            longitude: config.longitude.clone(),
            latitude: config.latitude.clone(),
        }
    }
}

/// Top-level dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Title shown over the map.
    pub title: String,
    /// Host table the records come from.
    pub table_name: String,
    /// Basemap style name.
    pub basemap: String,
    /// Initial map center as `[longitude, latitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Day counts offered as "Past N Days" buttons.
    pub date_presets: Vec<u32>,
    /// Heatmap layer settings.
    pub heatmap: HeatmapConfig,
    /// Coordinate column names.
    pub fields: FieldsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "ICE Activity in the Twin Cities Metro Area (All Data table)".to_string(),
            table_name: "All Data".to_string(),
            basemap: "gray".to_string(),
            center: [-93.25, 44.95],
            zoom: 10,
            date_presets: vec![3, 5],
            heatmap: HeatmapConfig::default(),
            fields: FieldsConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the embedded file is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        parse_config_toml(DEFAULT_TOML)
    }

    /// Loads configuration from `path`, or the embedded default when
    /// `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading dashboard config from {}", path.display());
                let contents = std::fs::read_to_string(path)?;
                parse_config_toml(&contents)
            }
            None => Self::embedded(),
        }
    }

    /// Every preset button, "All Dates" first.
    #[must_use]
    pub fn presets(&self) -> Vec<DatePreset> {
        std::iter::once(DatePreset::AllDates)
            .chain(self.date_presets.iter().copied().map(DatePreset::PastDays))
            .collect()
    }
}

/// Parses a TOML string into a [`DashboardConfig`].
///
/// # Errors
///
/// Returns [`ConfigError::Toml`] if the TOML is invalid.
pub fn parse_config_toml(toml_str: &str) -> Result<DashboardConfig, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}
