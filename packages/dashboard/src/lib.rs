#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line host shell for the activity map dashboard.
//!
//! Stands in for the embedding application: loads a CSV export of the
//! event table, builds the layers, replays the filter controls given on
//! the command line through a [`DashboardController`], and reports what
//! the rendering engine ended up with.

pub mod config;
pub mod engine;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr as _;

use activity_map_activity_models::ActivityKind;
use activity_map_filter::controller::{DashboardController, FilterEvent, LayerDefinitions};
use activity_map_filter_models::{DatePreset, DisplayMode, FilterState, HourMode, LayerId};
use activity_map_record::csv_table::CsvTable;
use activity_map_record::{CoordinateFields, RecordError, extract, geojson_export};
use activity_map_symbology::layers::LayerDefinition;
use activity_map_symbology::renderer::HeatmapRenderer;
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use crate::config::{ConfigError, DashboardConfig};
use crate::engine::{LayerState, LoggingEngine};

/// Errors that can occur while running the dashboard shell.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The event table could not be read or exported.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Output serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command-line value was not understood.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what went wrong.
        message: String,
    },
}

/// What to print once the filters are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Render state and visible counts.
    Summary,
    /// Visible points as a `GeoJSON` feature collection.
    Geojson,
    /// Map view and layer definitions.
    Renderer,
}

#[derive(Parser, Debug)]
#[command(
    name = "activity_map_dashboard",
    about = "Filter an activity table and show what the map would draw"
)]
pub struct Cli {
    /// CSV export of the event table (header row = field names)
    #[arg(long)]
    pub data: PathBuf,
    /// Dashboard config TOML (defaults to the built-in config)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Comma-separated activity kinds to show (e.g. "Raid,Drone"); all if omitted
    #[arg(long)]
    pub activities: Option<String>,
    /// First day to show (YYYY-MM-DD); needs --to
    #[arg(long, conflicts_with = "preset")]
    pub from: Option<NaiveDate>,
    /// Last day to show (YYYY-MM-DD); needs --from
    #[arg(long, conflicts_with = "preset")]
    pub to: Option<NaiveDate>,
    /// Date preset: "all" or a configured day count such as 3 or 5
    #[arg(long)]
    pub preset: Option<String>,
    /// Only show this hour of day (0-23)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
    pub hour: Option<u8>,
    /// Display type: points, heatmap, or both
    #[arg(long)]
    pub display: Option<String>,
    /// Date presets count back from (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub today: Option<NaiveDate>,
    /// What to print
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,
}

fn invalid(message: String) -> DashboardError {
    DashboardError::InvalidArgument { message }
}

/// Translates the command-line controls into the events a user clicking
/// through the dashboard would produce, in panel order.
///
/// # Errors
///
/// Returns [`DashboardError::InvalidArgument`] for unknown activity kinds,
/// presets, or display types.
pub fn build_events(
    cli: &Cli,
    config: &DashboardConfig,
    today: NaiveDate,
) -> Result<Vec<FilterEvent>, DashboardError> {
    let mut events = Vec::new();

    if cli.from.is_some() || cli.to.is_some() {
        if cli.from.is_none() || cli.to.is_none() {
            log::warn!("Date filter needs both --from and --to; showing all dates");
        }
        events.push(FilterEvent::ApplyDates {
            start: cli.from,
            end: cli.to,
        });
    }

    if let Some(preset) = &cli.preset {
        events.push(FilterEvent::ApplyPreset {
            preset: parse_preset(preset, config)?,
            today,
        });
    }

    if let Some(hour) = cli.hour {
        events.push(FilterEvent::SetHourMode(HourMode::Hourly));
        events.push(FilterEvent::SetHour(hour));
    }

    if let Some(display) = &cli.display {
        let mode = DisplayMode::from_str(display.trim())
            .map_err(|_| invalid(format!("unknown display type '{display}'")))?;
        events.push(FilterEvent::SetDisplayMode(mode));
    }

    if let Some(activities) = &cli.activities {
        let mut selected = Vec::new();
        for name in activities.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let kind = ActivityKind::from_str(name)
                .map_err(|_| invalid(format!("unknown activity kind '{name}'")))?;
            selected.push(kind);
        }
        events.extend(
            ActivityKind::all()
                .iter()
                .filter(|kind| !selected.contains(kind))
                .map(|kind| FilterEvent::ToggleActivity {
                    activity: kind.as_ref().to_string(),
                    selected: false,
                }),
        );
    }

    Ok(events)
}

fn parse_preset(raw: &str, config: &DashboardConfig) -> Result<DatePreset, DashboardError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("all") {
        return Ok(DatePreset::AllDates);
    }
    let days: u32 = raw
        .parse()
        .map_err(|_| invalid(format!("unknown date preset '{raw}'")))?;
    let preset = DatePreset::PastDays(days);
    if config.presets().contains(&preset) {
        Ok(preset)
    } else {
        Err(invalid(format!(
            "no 'Past {days} Days' preset configured (available: {:?})",
            config.date_presets
        )))
    }
}

/// Render state plus counts, printed by the `summary` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary<'a> {
    /// Map title.
    pub title: &'a str,
    /// Source table.
    pub table_name: &'a str,
    /// Points loaded.
    pub total_points: usize,
    /// Points passing the filters.
    pub visible_points: usize,
    /// Visible points per symbol key.
    pub by_symbol: BTreeMap<String, usize>,
    /// Filter state after all events.
    pub state: &'a FilterState,
    /// What each layer was last told.
    pub layers: BTreeMap<LayerId, LayerState>,
}

/// Map view and layer setup, printed by the `renderer` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetup<'a> {
    /// Map title.
    pub title: &'a str,
    /// Basemap style.
    pub basemap: &'a str,
    /// Initial center `[longitude, latitude]`.
    pub center: [f64; 2],
    /// Initial zoom.
    pub zoom: u8,
    /// Date preset button labels.
    pub date_presets: Vec<String>,
    /// Hour slider tick labels.
    pub hour_labels: Vec<u8>,
    /// Activity checkboxes.
    pub activities: Vec<&'static str>,
    /// Layer definitions keyed by layer.
    pub layers: BTreeMap<LayerId, &'a LayerDefinition>,
}

/// Formats the controller's current state as `format`.
///
/// # Errors
///
/// Returns [`DashboardError`] if serialization fails.
pub fn render_output(
    controller: &DashboardController<LoggingEngine>,
    layers: &LayerDefinitions,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<String, DashboardError> {
    let output = match format {
        OutputFormat::Summary => {
            let mut by_symbol = BTreeMap::new();
            for point in controller.visible_points() {
                *by_symbol
                    .entry(point.activity_symbol_key.to_string())
                    .or_insert(0) += 1;
            }
            let summary = Summary {
                title: &config.title,
                table_name: &config.table_name,
                total_points: controller.points().len(),
                visible_points: controller.update().expression.ids().len(),
                by_symbol,
                state: controller.state(),
                layers: LayerId::all()
                    .iter()
                    .filter_map(|id| Some((*id, controller.engine().layer(*id)?.clone())))
                    .collect(),
            };
            serde_json::to_string_pretty(&summary)?
        }
        OutputFormat::Geojson => {
            let collection = geojson_export::to_feature_collection(
                geojson_export::COLLECTION_NAME,
                controller.visible_points(),
            )?;
            serde_json::to_string_pretty(&collection)?
        }
        OutputFormat::Renderer => {
            let setup = MapSetup {
                title: &config.title,
                basemap: &config.basemap,
                center: config.center,
                zoom: config.zoom,
                date_presets: config.presets().into_iter().map(DatePreset::label).collect(),
                hour_labels: (0..=activity_map_filter_models::MAX_HOUR).collect(),
                activities: ActivityKind::all().iter().map(|kind| kind.as_ref()).collect(),
                layers: LayerId::all()
                    .iter()
                    .map(|id| (*id, layers.get(*id)))
                    .collect(),
            };
            serde_json::to_string_pretty(&setup)?
        }
    };
    Ok(output)
}

/// Runs the dashboard shell end to end and returns what to print.
///
/// # Errors
///
/// Returns [`DashboardError`] if the config or table cannot be loaded, an
/// argument is invalid, or output serialization fails.
pub fn run(cli: &Cli) -> Result<String, DashboardError> {
    let config = DashboardConfig::load(cli.config.as_deref())?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let events = build_events(cli, &config, today)?;

    let table = CsvTable::from_path(&config.table_name, &cli.data)?;
    let points = extract::extract_points(&table, &CoordinateFields::from(&config.fields));

    let layers = LayerDefinitions::new(HeatmapRenderer::from(config.heatmap));
    let mut controller =
        DashboardController::new(LoggingEngine::default(), points, layers.clone());

    for event in events {
        controller.handle(event);
    }

    log::info!(
        "{} of {} points visible",
        controller.update().expression.ids().len(),
        controller.points().len()
    );

    render_output(&controller, &layers, &config, cli.output)
}
