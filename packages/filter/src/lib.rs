#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter predicates and the dashboard controller.
//!
//! [`predicate::is_visible`] decides visibility for one point.
//! [`compute_update`] runs it over the whole dataset and produces the
//! [`RenderUpdate`] for the rendering engine. [`controller`] owns the
//! session's [`FilterState`] and re-runs the full computation after every
//! control event.

pub mod controller;
pub mod predicate;

use activity_map_filter_models::{FilterExpression, FilterState, RenderUpdate};
use activity_map_record_models::MapPoint;

/// Ids of the points visible under `state`, in dataset order.
#[must_use]
pub fn visible_ids(points: &[MapPoint], state: &FilterState) -> Vec<u32> {
    points
        .iter()
        .filter(|point| predicate::is_visible(point, state))
        .map(|point| point.objectid)
        .collect()
}

/// Recomputes the render state for `state` from scratch.
#[must_use]
pub fn compute_update(points: &[MapPoint], state: &FilterState) -> RenderUpdate {
    RenderUpdate {
        expression: FilterExpression::from_visible_ids(visible_ids(points, state)),
        visibility: state.display_mode.layer_visibility(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use activity_map_activity_models::SymbolKey;
    use activity_map_filter_models::{DisplayMode, HourMode};
    use activity_map_record_models::EventProperties;

    use super::*;

    fn point(objectid: u32, activity: &str, hour: Option<u8>) -> MapPoint {
        MapPoint {
            objectid,
            longitude: -93.25,
            latitude: 44.95,
            properties: EventProperties {
                simplified_activity: activity.to_string(),
                ..EventProperties::default()
            },
            activity_symbol_key: SymbolKey::verbatim(activity),
            hour_number: hour,
            activity_day: None,
        }
    }

    fn dataset() -> Vec<MapPoint> {
        vec![
            point(1, "Drone", Some(14)),
            point(2, "Raid", Some(15)),
            point(3, "Threat", None),
            point(4, "Drone", Some(14)),
        ]
    }

    #[test]
    fn default_state_shows_all_points() {
        let update = compute_update(&dataset(), &FilterState::default());
        assert_eq!(update.expression.ids(), &[1, 2, 3, 4]);
        assert!(update.visibility.points);
        assert!(!update.visibility.heatmap);
    }

    #[test]
    fn hourly_filter_selects_matching_ids() {
        let state = FilterState {
            hour_mode: HourMode::Hourly,
            selected_hour: 14,
            ..FilterState::default()
        };
        assert_eq!(visible_ids(&dataset(), &state), vec![1, 4]);
        assert_eq!(
            compute_update(&dataset(), &state).expression.to_string(),
            "objectid=1 OR objectid=4"
        );
    }

    #[test]
    fn empty_selection_yields_sentinel() {
        let state = FilterState {
            selected_activities: BTreeSet::new(),
            ..FilterState::default()
        };
        let update = compute_update(&dataset(), &state);
        assert_eq!(update.expression, FilterExpression::Nothing);
        assert_eq!(update.expression.to_string(), "1=0");
    }

    #[test]
    fn same_state_twice_yields_same_update() {
        let state = FilterState {
            hour_mode: HourMode::Hourly,
            selected_hour: 15,
            display_mode: DisplayMode::Both,
            ..FilterState::default()
        };
        let points = dataset();
        assert_eq!(compute_update(&points, &state), compute_update(&points, &state));
    }

    #[test]
    fn display_mode_does_not_change_expression() {
        let points = dataset();
        let points_only = compute_update(&points, &FilterState::default());
        let heatmap = compute_update(
            &points,
            &FilterState {
                display_mode: DisplayMode::HeatmapOnly,
                ..FilterState::default()
            },
        );
        assert_eq!(points_only.expression, heatmap.expression);
        assert!(!heatmap.visibility.points);
        assert!(heatmap.visibility.heatmap);
    }
}
