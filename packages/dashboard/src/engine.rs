//! A rendering engine stand-in that logs what it is told to draw.

use std::collections::BTreeMap;

use activity_map_filter::controller::MapEngine;
use activity_map_filter_models::{FilterExpression, LayerId};
use activity_map_record_models::MapPoint;
use activity_map_symbology::layers::LayerDefinition;
use serde::Serialize;

/// Last state pushed to one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerState {
    /// Number of features loaded.
    pub features: usize,
    /// Current row filter.
    pub expression: String,
    /// Whether the layer is switched on.
    pub visible: bool,
}

/// Records and logs everything the controller pushes.
#[derive(Debug, Default)]
pub struct LoggingEngine {
    layers: BTreeMap<LayerId, LayerState>,
}

impl LoggingEngine {
    /// State of `layer`, if it has been loaded.
    #[must_use]
    pub fn layer(&self, layer: LayerId) -> Option<&LayerState> {
        self.layers.get(&layer)
    }
}

impl MapEngine for LoggingEngine {
    fn load_layer(&mut self, layer: LayerId, definition: &LayerDefinition, points: &[MapPoint]) {
        log::info!(
            "Loading {layer} layer: {} features, {} fields",
            points.len(),
            definition.fields.len()
        );
        let state = self.layers.entry(layer).or_default();
        state.features = points.len();
        state.visible = definition.visible;
    }

    fn set_definition_expression(&mut self, layer: LayerId, expression: &FilterExpression) {
        log::debug!("{layer} layer filter: {} ids", expression.ids().len());
        self.layers.entry(layer).or_default().expression = expression.to_string();
    }

    fn set_layer_visible(&mut self, layer: LayerId, visible: bool) {
        log::debug!("{layer} layer visible: {visible}");
        self.layers.entry(layer).or_default().visible = visible;
    }
}
