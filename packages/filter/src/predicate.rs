//! Row-level visibility predicates.
//!
//! A point is visible iff its activity is selected, its date falls in the
//! active range, and its hour matches the active hour. Each check only
//! looks at the point's derived attributes and the [`FilterState`].

use activity_map_filter_models::FilterState;
use activity_map_record_models::MapPoint;

/// Whether the point's activity kind is selected. An empty selection
/// matches nothing.
#[must_use]
pub fn activity_matches(point: &MapPoint, state: &FilterState) -> bool {
    state.selected_activities.contains(point.activity())
}

/// Whether the point falls inside the active date range.
///
/// With no range every point matches. With a range, a point whose
/// `activity_date` did not parse never matches.
#[must_use]
pub fn date_matches(point: &MapPoint, state: &FilterState) -> bool {
    match state.date_range {
        None => true,
        Some(range) => point.activity_day.is_some_and(|day| range.contains(day)),
    }
}

/// Whether the point's hour equals the active hour. Points without an
/// hour never match a selected hour.
#[must_use]
pub fn hour_matches(point: &MapPoint, state: &FilterState) -> bool {
    match state.active_hour() {
        None => true,
        Some(hour) => point.hour_number == Some(hour),
    }
}

/// Conjunction of the activity, date, and hour checks.
#[must_use]
pub fn is_visible(point: &MapPoint, state: &FilterState) -> bool {
    activity_matches(point, state) && date_matches(point, state) && hour_matches(point, state)
}
