#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Host table access and record extraction.
//!
//! The host application owns the event table. It is read through the
//! [`HostTable`] / [`HostRow`] traits, which only expose named-cell
//! accessors. [`extract::extract_points`] turns a table into the numbered,
//! classified [`MapPoint`](activity_map_record_models::MapPoint) list that
//! every filter pass runs over.

pub mod csv_table;
pub mod extract;
pub mod geojson_export;
pub mod parsing;

/// Errors that can occur while reading a host table or exporting points.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the host table.
///
/// Mirrors the host's cell accessors: a string rendering of any cell, and
/// a numeric reading for numeric cells.
pub trait HostRow {
    /// The cell rendered as a string. Missing cells are empty.
    fn cell_as_string(&self, field: &str) -> String;

    /// The cell as a number, if it holds one.
    fn cell_as_number(&self, field: &str) -> Option<f64>;
}

/// An ordered, read-only table of event rows supplied by the host.
pub trait HostTable {
    /// Row type handed out by this table.
    type Row: HostRow;

    /// The table's display name (e.g. `"All Data"`).
    fn name(&self) -> &str;

    /// All rows, in host iteration order.
    fn rows(&self) -> &[Self::Row];
}

/// Names of the numeric coordinate columns in the host table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateFields {
    /// Longitude column.
    pub longitude: String,
    /// Latitude column.
    pub latitude: String,
}

impl Default for CoordinateFields {
    fn default() -> Self {
        Self {
            longitude: "long".to_string(),
            latitude: "lat".to_string(),
        }
    }
}
