//! Session controller tying the filter controls to the rendering engine.
//!
//! The controller exclusively owns the [`FilterState`], the attributed
//! points, and the engine handle. Each [`FilterEvent`] sets one field of
//! the state, then the whole visible set is recomputed and pushed to both
//! layers. Nothing is carried over between passes except the state itself.

use activity_map_filter_models::{
    DatePreset, DateRange, DisplayMode, FilterExpression, FilterState, HourMode, LayerId,
    MAX_HOUR, RenderUpdate,
};
use activity_map_record_models::MapPoint;
use activity_map_symbology::layers::{self, LayerDefinition};
use activity_map_symbology::renderer::HeatmapRenderer;
use chrono::NaiveDate;

use crate::{compute_update, predicate};

/// The rendering engine as seen by the controller.
///
/// Implementations draw, project, and hit-test; the controller only tells
/// them what to draw and which rows to show.
pub trait MapEngine {
    /// Builds `layer` from its definition and the full point set,
    /// replacing anything previously loaded into it. Called once per
    /// dataset load.
    fn load_layer(&mut self, layer: LayerId, definition: &LayerDefinition, points: &[MapPoint]);

    /// Replaces the row filter on `layer`.
    fn set_definition_expression(&mut self, layer: LayerId, expression: &FilterExpression);

    /// Switches `layer` on or off.
    fn set_layer_visible(&mut self, layer: LayerId, visible: bool);
}

/// Static definitions for both layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDefinitions {
    /// Symbolized point layer.
    pub points: LayerDefinition,
    /// Density layer.
    pub heatmap: LayerDefinition,
}

impl LayerDefinitions {
    /// The standard point layer plus a heatmap layer using `heatmap`.
    #[must_use]
    pub fn new(heatmap: HeatmapRenderer) -> Self {
        Self {
            points: layers::point_layer(),
            heatmap: layers::heatmap_layer(heatmap),
        }
    }

    /// The definition for `layer`.
    #[must_use]
    pub const fn get(&self, layer: LayerId) -> &LayerDefinition {
        match layer {
            LayerId::Points => &self.points,
            LayerId::Heatmap => &self.heatmap,
        }
    }
}

impl Default for LayerDefinitions {
    fn default() -> Self {
        Self::new(HeatmapRenderer::default())
    }
}

/// A change made through one of the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The date inputs were applied. A range needs both bounds; otherwise
    /// the date filter is cleared.
    ApplyDates {
        /// Start date input.
        start: Option<NaiveDate>,
        /// End date input.
        end: Option<NaiveDate>,
    },
    /// A date preset button was pressed on `today`.
    ApplyPreset {
        /// Which preset.
        preset: DatePreset,
        /// The current date.
        today: NaiveDate,
    },
    /// An activity checkbox changed.
    ToggleActivity {
        /// Activity kind name.
        activity: String,
        /// New checkbox state.
        selected: bool,
    },
    /// The time view switched between all hours and the hour slider.
    SetHourMode(HourMode),
    /// The hour slider moved.
    SetHour(u8),
    /// The display type changed.
    SetDisplayMode(DisplayMode),
}

/// Owns the filter state for one dashboard session.
pub struct DashboardController<E: MapEngine> {
    engine: E,
    points: Vec<MapPoint>,
    layers: LayerDefinitions,
    state: FilterState,
    update: RenderUpdate,
}

impl<E: MapEngine> DashboardController<E> {
    /// Loads both layers into `engine` and applies the default state.
    #[must_use]
    pub fn new(engine: E, points: Vec<MapPoint>, layers: LayerDefinitions) -> Self {
        Self::with_state(engine, points, layers, FilterState::default())
    }

    /// Loads both layers into `engine` and applies `state`.
    #[must_use]
    pub fn with_state(
        mut engine: E,
        points: Vec<MapPoint>,
        layers: LayerDefinitions,
        state: FilterState,
    ) -> Self {
        load_layers(&mut engine, &layers, &points);
        let update = compute_update(&points, &state);
        push_update(&mut engine, &update);

        Self {
            engine,
            points,
            layers,
            state,
            update,
        }
    }

    /// Applies one control change and pushes the recomputed render state.
    pub fn handle(&mut self, event: FilterEvent) -> &RenderUpdate {
        log::debug!("Filter event: {event:?}");
        self.apply(event);
        self.recompute()
    }

    /// Swaps in a refreshed dataset, reloading both layers and re-applying
    /// the current state.
    pub fn reload(&mut self, points: Vec<MapPoint>) -> &RenderUpdate {
        log::info!("Reloading dashboard with {} points", points.len());
        self.points = points;
        load_layers(&mut self.engine, &self.layers, &self.points);
        self.recompute()
    }

    /// Current filter state.
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// The render state last pushed to the engine.
    #[must_use]
    pub const fn update(&self) -> &RenderUpdate {
        &self.update
    }

    /// All points in the current dataset.
    #[must_use]
    pub fn points(&self) -> &[MapPoint] {
        &self.points
    }

    /// Points passing the current filters.
    pub fn visible_points(&self) -> impl Iterator<Item = &MapPoint> {
        self.points
            .iter()
            .filter(|point| predicate::is_visible(point, &self.state))
    }

    /// The engine handle.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Ends the session, returning the engine handle.
    #[must_use]
    pub fn into_engine(self) -> E {
        self.engine
    }

    fn apply(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::ApplyDates { start, end } => {
                self.state.date_range = DateRange::from_inputs(start, end);
            }
            FilterEvent::ApplyPreset { preset, today } => {
                self.state.date_range = preset.range(today);
            }
            FilterEvent::ToggleActivity { activity, selected } => {
                if selected {
                    self.state.selected_activities.insert(activity);
                } else {
                    self.state.selected_activities.remove(&activity);
                }
            }
            FilterEvent::SetHourMode(mode) => {
                self.state.hour_mode = mode;
            }
            FilterEvent::SetHour(hour) => {
                if hour > MAX_HOUR {
                    log::warn!("Hour {hour} out of range, clamping to {MAX_HOUR}");
                }
                self.state.selected_hour = hour.min(MAX_HOUR);
            }
            FilterEvent::SetDisplayMode(mode) => {
                self.state.display_mode = mode;
            }
        }
    }

    fn recompute(&mut self) -> &RenderUpdate {
        self.update = compute_update(&self.points, &self.state);
        log::debug!(
            "{} of {} points visible",
            self.update.expression.ids().len(),
            self.points.len()
        );
        push_update(&mut self.engine, &self.update);
        &self.update
    }
}

fn load_layers<E: MapEngine>(engine: &mut E, layers: &LayerDefinitions, points: &[MapPoint]) {
    for layer in LayerId::all() {
        engine.load_layer(*layer, layers.get(*layer), points);
    }
}

fn push_update<E: MapEngine>(engine: &mut E, update: &RenderUpdate) {
    for layer in LayerId::all() {
        engine.set_definition_expression(*layer, &update.expression);
        engine.set_layer_visible(*layer, update.visibility.is_visible(*layer));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use activity_map_activity_models::SymbolKey;
    use activity_map_record_models::EventProperties;

    use super::*;

    #[derive(Default)]
    struct RecordingEngine {
        loads: Vec<(LayerId, usize)>,
        expressions: BTreeMap<LayerId, String>,
        visible: BTreeMap<LayerId, bool>,
        pushes: usize,
    }

    impl MapEngine for RecordingEngine {
        fn load_layer(
            &mut self,
            layer: LayerId,
            _definition: &LayerDefinition,
            points: &[MapPoint],
        ) {
            self.loads.push((layer, points.len()));
        }

        fn set_definition_expression(&mut self, layer: LayerId, expression: &FilterExpression) {
            self.pushes += 1;
            self.expressions.insert(layer, expression.to_string());
        }

        fn set_layer_visible(&mut self, layer: LayerId, visible: bool) {
            self.visible.insert(layer, visible);
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(objectid: u32, activity: &str, day: NaiveDate, hour: Option<u8>) -> MapPoint {
        MapPoint {
            objectid,
            longitude: -93.25,
            latitude: 44.95,
            properties: EventProperties {
                simplified_activity: activity.to_string(),
                activity_date: day.to_string(),
                ..EventProperties::default()
            },
            activity_symbol_key: SymbolKey::verbatim(activity),
            hour_number: hour,
            activity_day: Some(day),
        }
    }

    fn dataset() -> Vec<MapPoint> {
        vec![
            point(1, "Drone", date(2024, 1, 15), Some(14)),
            point(2, "Raid", date(2024, 2, 1), Some(14)),
            point(3, "Threat", date(2024, 1, 20), None),
            point(4, "Drone", date(2024, 3, 1), Some(9)),
        ]
    }

    fn controller() -> DashboardController<RecordingEngine> {
        DashboardController::new(
            RecordingEngine::default(),
            dataset(),
            LayerDefinitions::default(),
        )
    }

    #[test]
    fn construction_loads_layers_and_applies_defaults() {
        let c = controller();
        let engine = c.engine();
        assert_eq!(engine.loads, vec![(LayerId::Points, 4), (LayerId::Heatmap, 4)]);
        assert_eq!(
            engine.expressions[&LayerId::Points],
            "objectid=1 OR objectid=2 OR objectid=3 OR objectid=4"
        );
        assert!(engine.visible[&LayerId::Points]);
        assert!(!engine.visible[&LayerId::Heatmap]);
    }

    #[test]
    fn each_event_pushes_once_to_both_layers() {
        let mut c = controller();
        let before = c.engine().pushes;
        c.handle(FilterEvent::SetHourMode(HourMode::Hourly));
        assert_eq!(c.engine().pushes, before + 2);
        c.handle(FilterEvent::SetHour(14));
        assert_eq!(c.engine().pushes, before + 4);
    }

    #[test]
    fn hour_slider_filters_once_hourly() {
        let mut c = controller();
        c.handle(FilterEvent::SetHour(14));
        assert_eq!(c.update().expression.ids(), &[1, 2, 3, 4]);

        c.handle(FilterEvent::SetHourMode(HourMode::Hourly));
        assert_eq!(c.update().expression.ids(), &[1, 2]);

        c.handle(FilterEvent::SetHour(9));
        assert_eq!(c.update().expression.ids(), &[4]);

        c.handle(FilterEvent::SetHourMode(HourMode::All));
        assert_eq!(c.update().expression.ids().len(), 4);
        assert_eq!(c.state().selected_hour, 9);
    }

    #[test]
    fn out_of_range_hour_is_clamped() {
        let mut c = controller();
        c.handle(FilterEvent::SetHour(40));
        assert_eq!(c.state().selected_hour, MAX_HOUR);
    }

    #[test]
    fn date_inputs_need_both_bounds() {
        let mut c = controller();
        c.handle(FilterEvent::ApplyDates {
            start: Some(date(2024, 1, 1)),
            end: Some(date(2024, 1, 31)),
        });
        assert_eq!(c.update().expression.ids(), &[1, 3]);

        c.handle(FilterEvent::ApplyDates {
            start: Some(date(2024, 1, 1)),
            end: None,
        });
        assert!(c.state().date_range.is_none());
        assert_eq!(c.update().expression.ids().len(), 4);
    }

    #[test]
    fn presets_set_and_clear_range() {
        let mut c = controller();
        c.handle(FilterEvent::ApplyPreset {
            preset: DatePreset::PastDays(3),
            today: date(2024, 2, 2),
        });
        assert_eq!(c.update().expression.ids(), &[2]);

        c.handle(FilterEvent::ApplyPreset {
            preset: DatePreset::AllDates,
            today: date(2024, 2, 2),
        });
        assert_eq!(c.update().expression.ids().len(), 4);
    }

    #[test]
    fn unchecking_every_activity_hides_everything() {
        let mut c = controller();
        for kind in ["Drone", "Raid", "Threat"] {
            c.handle(FilterEvent::ToggleActivity {
                activity: kind.to_string(),
                selected: false,
            });
        }
        assert_eq!(c.update().expression, FilterExpression::Nothing);
        assert_eq!(c.engine().expressions[&LayerId::Heatmap], "1=0");

        c.handle(FilterEvent::ToggleActivity {
            activity: "Raid".to_string(),
            selected: true,
        });
        assert_eq!(c.update().expression.ids(), &[2]);
    }

    #[test]
    fn heatmap_mode_keeps_both_layers_in_sync() {
        let mut c = controller();
        c.handle(FilterEvent::SetDisplayMode(DisplayMode::HeatmapOnly));

        let engine = c.engine();
        assert!(!engine.visible[&LayerId::Points]);
        assert!(engine.visible[&LayerId::Heatmap]);
        assert_eq!(
            engine.expressions[&LayerId::Points],
            engine.expressions[&LayerId::Heatmap]
        );
    }

    #[test]
    fn reapplying_same_state_is_idempotent() {
        let mut c = controller();
        c.handle(FilterEvent::SetDisplayMode(DisplayMode::Both));
        let first = c.update().clone();
        let first_expr = c.engine().expressions[&LayerId::Points].clone();

        c.handle(FilterEvent::SetDisplayMode(DisplayMode::Both));
        assert_eq!(c.update(), &first);
        assert_eq!(c.engine().expressions[&LayerId::Points], first_expr);
    }

    #[test]
    fn reload_replaces_points_and_keeps_state() {
        let mut c = controller();
        c.handle(FilterEvent::SetHourMode(HourMode::Hourly));
        c.handle(FilterEvent::SetHour(9));

        let update = c
            .reload(vec![point(1, "Helicopter", date(2024, 4, 1), Some(9))])
            .clone();
        assert_eq!(update.expression.ids(), &[1]);
        assert_eq!(c.engine().loads.len(), 4);
        assert_eq!(c.state().selected_hour, 9);
    }

    #[test]
    fn visible_points_follow_expression() {
        let mut c = controller();
        c.handle(FilterEvent::ToggleActivity {
            activity: "Drone".to_string(),
            selected: false,
        });
        let ids: Vec<u32> = c.visible_points().map(|p| p.objectid).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn visible_points_with_shared_id_follow_filters() {
        let mut c = DashboardController::new(
            RecordingEngine::default(),
            vec![
                point(1, "Drone", date(2024, 1, 15), Some(14)),
                point(1, "Raid", date(2024, 1, 15), Some(14)),
            ],
            LayerDefinitions::default(),
        );
        c.handle(FilterEvent::ToggleActivity {
            activity: "Drone".to_string(),
            selected: false,
        });

        let visible: Vec<&str> = c.visible_points().map(MapPoint::activity).collect();
        assert_eq!(visible, vec!["Raid"]);
    }
}
