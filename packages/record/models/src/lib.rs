#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Event record and attributed map point types.
//!
//! An [`EventRecord`] is what the host table hands us for one row. Once
//! classified and numbered it becomes a [`MapPoint`], whose serialized form
//! is the attribute bag the rendering engine receives at layer
//! construction.

use activity_map_activity_models::SymbolKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cell values read from one host table row.
///
/// Blank cells are empty strings, matching how the host renders a cell as
/// a string. Only `simplified_activity`, `abducted_yn`, `activity_date`,
/// and `start_hour_min` feed classification and filtering; everything else
/// is passed through for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventProperties {
    /// Tri-state yes/no/blank abduction outcome.
    pub abducted_yn: String,
    /// Activity kind name (see `ActivityKind`).
    pub simplified_activity: String,
    /// Calendar date the activity happened on.
    pub activity_date: String,
    /// Start time as `HH:MM`, or blank.
    pub start_hour_min: String,
    /// Street address.
    pub address: String,
    /// Name or type of the location.
    pub location_type: String,
    /// Reporter's confidence in the report.
    pub veracity: String,
    /// Free-text description.
    pub additional_description: String,
    /// Human-readable start date and time.
    pub start_datetime_str: String,
    /// Start time as a host timestamp, if present.
    pub start_timestamp: Option<f64>,
    /// Hour of day as computed by the host, if present.
    pub hour_of_day: Option<f64>,
    /// Activity label used by older map versions.
    pub map_activity: String,
    /// Day of week name.
    pub day_of_week: String,
    /// Hour of day rendered as a string.
    pub hour_of_day_str: String,
    /// Plates of vehicles involved.
    pub ice_license_plates: String,
    /// Number of people taken.
    pub people_taken: String,
    /// Number of agents seen.
    pub agent_qty: String,
    /// Number of vehicles seen.
    pub vehicle_qty: String,
}

/// One host table row with a usable location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Longitude in degrees (WGS84).
    pub longitude: f64,
    /// Latitude in degrees (WGS84).
    pub latitude: f64,
    /// Cell values for the row.
    pub properties: EventProperties,
}

/// A classified, numbered event ready to be handed to the map.
///
/// Derived fields are computed once when the dataset is loaded and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    /// Stable 1-based id in host iteration order.
    pub objectid: u32,
    /// Longitude in degrees (WGS84).
    #[serde(skip)]
    pub longitude: f64,
    /// Latitude in degrees (WGS84).
    #[serde(skip)]
    pub latitude: f64,
    /// Pass-through cell values.
    #[serde(flatten)]
    pub properties: EventProperties,
    /// Style lookup key.
    pub activity_symbol_key: SymbolKey,
    /// Hour parsed from `start_hour_min`, 0-23.
    #[serde(rename = "hourNumber")]
    pub hour_number: Option<u8>,
    /// `activity_date` parsed as a calendar date.
    #[serde(skip)]
    pub activity_day: Option<NaiveDate>,
}

impl MapPoint {
    /// The raw activity kind name for this point.
    #[must_use]
    pub fn activity(&self) -> &str {
        &self.properties.simplified_activity
    }
}
