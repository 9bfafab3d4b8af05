#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter state, display mode, and filter expression types.
//!
//! [`FilterState`] is everything the dashboard's controls can set. Together
//! with a point's derived attributes it fully determines whether that point
//! is shown. The output of a filter pass is a [`RenderUpdate`]: one
//! [`FilterExpression`] shared by both layers plus the per-layer
//! [`LayerVisibility`] flags.

use std::collections::BTreeSet;

use activity_map_activity_models::ActivityKind;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Highest selectable hour on the hour slider.
pub const MAX_HOUR: u8 = 23;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive. A range whose
    /// end is before its start contains no dates.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Builds a range from the two date inputs. Both must be set; a single
    /// bound does not constrain anything.
    #[must_use]
    pub fn from_inputs(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        Some(Self::new(start?, end?))
    }

    /// The last `days` days up to and including `today`.
    #[must_use]
    pub fn past_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Date preset buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePreset {
    /// Clears the date range.
    AllDates,
    /// The last N days up to today.
    PastDays(u32),
}

impl DatePreset {
    /// The range this preset selects relative to `today`.
    #[must_use]
    pub fn range(self, today: NaiveDate) -> Option<DateRange> {
        match self {
            Self::AllDates => None,
            Self::PastDays(days) => Some(DateRange::past_days(today, days)),
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::AllDates => "All Dates".to_string(),
            Self::PastDays(days) => format!("Past {days} Days"),
        }
    }
}

/// Whether the hour slider constrains visibility.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HourMode {
    /// Every hour is shown.
    #[default]
    All,
    /// Only the slider's hour is shown.
    Hourly,
}

/// Which of the two layers are switched on.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DisplayMode {
    /// Point layer only.
    #[default]
    #[serde(rename = "points")]
    #[strum(serialize = "points")]
    PointsOnly,
    /// Heatmap layer only.
    #[serde(rename = "heatmap")]
    #[strum(serialize = "heatmap")]
    HeatmapOnly,
    /// Both layers.
    #[serde(rename = "both")]
    #[strum(serialize = "both")]
    Both,
}

impl DisplayMode {
    /// Layer switches for this mode.
    #[must_use]
    pub const fn layer_visibility(self) -> LayerVisibility {
        match self {
            Self::PointsOnly => LayerVisibility {
                points: true,
                heatmap: false,
            },
            Self::HeatmapOnly => LayerVisibility {
                points: false,
                heatmap: true,
            },
            Self::Both => LayerVisibility {
                points: true,
                heatmap: true,
            },
        }
    }
}

/// The two layers drawn over the same points.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LayerId {
    /// Symbolized points.
    Points,
    /// Density surface.
    Heatmap,
}

impl LayerId {
    /// Both layers, in draw order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Points, Self::Heatmap]
    }
}

/// On/off switch per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerVisibility {
    /// Point layer shown.
    pub points: bool,
    /// Heatmap layer shown.
    pub heatmap: bool,
}

impl LayerVisibility {
    /// The switch for `layer`.
    #[must_use]
    pub const fn is_visible(self, layer: LayerId) -> bool {
        match layer {
            LayerId::Points => self.points,
            LayerId::Heatmap => self.heatmap,
        }
    }
}

/// Everything the controls can set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Activity kinds whose records are shown.
    pub selected_activities: BTreeSet<String>,
    /// Inclusive date window, or `None` for all dates.
    pub date_range: Option<DateRange>,
    /// Whether the hour slider applies.
    pub hour_mode: HourMode,
    /// Slider position, 0-23. Kept while the mode is [`HourMode::All`] so
    /// switching back to hourly resumes where the slider was.
    pub selected_hour: u8,
    /// Which layers are switched on.
    pub display_mode: DisplayMode,
}

impl Default for FilterState {
    /// Every activity selected, no date range, all hours, points only.
    fn default() -> Self {
        Self {
            selected_activities: ActivityKind::all()
                .iter()
                .map(|kind| kind.as_ref().to_string())
                .collect(),
            date_range: None,
            hour_mode: HourMode::All,
            selected_hour: 0,
            display_mode: DisplayMode::PointsOnly,
        }
    }
}

impl FilterState {
    /// The hour records must match, or `None` when every hour is shown.
    #[must_use]
    pub const fn active_hour(&self) -> Option<u8> {
        match self.hour_mode {
            HourMode::All => None,
            HourMode::Hourly => Some(self.selected_hour),
        }
    }
}

/// Row-level filter handed to both layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    /// Show exactly these object ids. Never empty.
    Ids(Vec<u32>),
    /// Show nothing.
    Nothing,
}

impl FilterExpression {
    /// Builds the expression for a visible id set. An empty set becomes
    /// [`Self::Nothing`].
    #[must_use]
    pub fn from_visible_ids(ids: Vec<u32>) -> Self {
        if ids.is_empty() {
            Self::Nothing
        } else {
            Self::Ids(ids)
        }
    }

    /// Object ids this expression shows.
    #[must_use]
    pub fn ids(&self) -> &[u32] {
        match self {
            Self::Ids(ids) => ids,
            Self::Nothing => &[],
        }
    }
}

impl std::fmt::Display for FilterExpression {
    /// Query syntax understood by the rendering engine:
    /// `objectid=1 OR objectid=4`, or `1=0` to show nothing.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nothing => f.write_str("1=0"),
            Self::Ids(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    write!(f, "objectid={id}")?;
                }
                Ok(())
            }
        }
    }
}

/// What one filter pass pushes to the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderUpdate {
    /// Row filter, applied identically to both layers.
    pub expression: FilterExpression,
    /// Layer switches from the display mode.
    pub visibility: LayerVisibility,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_state_selects_everything() {
        let state = FilterState::default();
        assert_eq!(state.selected_activities.len(), 9);
        assert!(state.selected_activities.contains("Abduction/Attempt"));
        assert!(state.date_range.is_none());
        assert_eq!(state.active_hour(), None);
        assert_eq!(state.display_mode, DisplayMode::PointsOnly);
    }

    #[test]
    fn active_hour_follows_mode() {
        let mut state = FilterState {
            selected_hour: 14,
            ..FilterState::default()
        };
        assert_eq!(state.active_hour(), None);
        state.hour_mode = HourMode::Hourly;
        assert_eq!(state.active_hour(), Some(14));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 15)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert!(!range.contains(date(2023, 12, 31)));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(!range.contains(date(2024, 1, 15)));
    }

    #[test]
    fn date_inputs_need_both_bounds() {
        assert!(DateRange::from_inputs(Some(date(2024, 1, 1)), None).is_none());
        assert!(DateRange::from_inputs(None, Some(date(2024, 1, 1))).is_none());
        assert_eq!(
            DateRange::from_inputs(Some(date(2024, 1, 1)), Some(date(2024, 1, 2))),
            Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 2)))
        );
    }

    #[test]
    fn presets_count_back_from_today() {
        let today = date(2024, 3, 2);
        assert_eq!(DatePreset::AllDates.range(today), None);
        assert_eq!(
            DatePreset::PastDays(3).range(today),
            Some(DateRange::new(date(2024, 2, 28), today))
        );
        assert_eq!(
            DatePreset::PastDays(5).range(today),
            Some(DateRange::new(date(2024, 2, 26), today))
        );
        assert_eq!(DatePreset::PastDays(5).label(), "Past 5 Days");
    }

    #[test]
    fn display_mode_drives_layer_switches() {
        let heat = DisplayMode::from_str("heatmap").unwrap().layer_visibility();
        assert!(!heat.points);
        assert!(heat.heatmap);

        let points = DisplayMode::PointsOnly.layer_visibility();
        assert!(points.is_visible(LayerId::Points));
        assert!(!points.is_visible(LayerId::Heatmap));

        let both = DisplayMode::Both.layer_visibility();
        assert!(both.points && both.heatmap);
    }

    #[test]
    fn expression_renders_disjunction_or_sentinel() {
        assert_eq!(FilterExpression::from_visible_ids(vec![]).to_string(), "1=0");
        assert_eq!(
            FilterExpression::from_visible_ids(vec![3]).to_string(),
            "objectid=3"
        );
        assert_eq!(
            FilterExpression::from_visible_ids(vec![1, 4, 9]).to_string(),
            "objectid=1 OR objectid=4 OR objectid=9"
        );
    }

    #[test]
    fn state_serializes_with_camel_case_modes() {
        let json = serde_json::to_value(FilterState::default()).unwrap();
        assert_eq!(json["hourMode"], "all");
        assert_eq!(json["displayMode"], "points");
        assert!(json["dateRange"].is_null());
    }
}
