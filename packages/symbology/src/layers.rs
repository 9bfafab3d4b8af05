//! Static definitions for the point and heatmap layers.
//!
//! Both layers are built once over the same attributed points. The point
//! layer carries the display fields and a popup; the heatmap layer only
//! needs the object id.

use serde::Serialize;

use crate::renderer::{self, HeatmapRenderer, Renderer};

/// Field every layer identifies features by.
pub const OBJECT_ID_FIELD: &str = "objectid";

/// Declared type of a layer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Object id.
    Oid,
    /// Free text.
    String,
    /// Whole number.
    Integer,
}

/// A field declared on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerField {
    /// Attribute name.
    pub name: &'static str,
    /// Attribute type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

const fn field(name: &'static str, field_type: FieldType) -> LayerField {
    LayerField { name, field_type }
}

/// Popup shown when a point is clicked. `{field}` placeholders are filled
/// in by the engine from the point's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupTemplate {
    /// Popup heading.
    pub title: String,
    /// Popup body (HTML).
    pub content: String,
}

/// Everything the engine needs to construct one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDefinition {
    /// Field holding each feature's id.
    pub object_id_field: &'static str,
    /// Declared attribute fields.
    pub fields: Vec<LayerField>,
    /// How features are drawn.
    pub renderer: Renderer,
    /// Click popup, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_template: Option<PopupTemplate>,
    /// Initial visibility.
    pub visible: bool,
}

/// Fields declared on the point layer.
#[must_use]
pub fn point_layer_fields() -> Vec<LayerField> {
    vec![
        field(OBJECT_ID_FIELD, FieldType::Oid),
        field("start_datetime_str", FieldType::String),
        field("start_hour_min", FieldType::String),
        field("simplified_activity", FieldType::String),
        field("address", FieldType::String),
        field("location_type", FieldType::String),
        field("ice_license_plates", FieldType::String),
        field("people_taken", FieldType::String),
        field("agent_qty", FieldType::String),
        field("vehicle_qty", FieldType::String),
        field("additional_description", FieldType::String),
        field("hourNumber", FieldType::Integer),
        field(renderer::SYMBOL_KEY_FIELD, FieldType::String),
    ]
}

/// Popup for the point layer.
#[must_use]
pub fn point_popup() -> PopupTemplate {
    let lines = [
        ("Date", "start_datetime_str"),
        ("Time Start", "start_hour_min"),
        ("Activity", "simplified_activity"),
        ("Address", "address"),
        ("Location Name", "location_type"),
        ("License Plates", "ice_license_plates"),
        ("People Taken", "people_taken"),
        ("Agent Quantity", "agent_qty"),
        ("Vehicle Quantity", "vehicle_qty"),
        ("Additional Description", "additional_description"),
    ];

    PopupTemplate {
        title: "{simplified_activity}".to_string(),
        content: lines
            .iter()
            .map(|(label, name)| format!("<b>{label}:</b> {{{name}}}"))
            .collect::<Vec<_>>()
            .join("<br>"),
    }
}

/// The symbolized point layer, visible initially.
#[must_use]
pub fn point_layer() -> LayerDefinition {
    LayerDefinition {
        object_id_field: OBJECT_ID_FIELD,
        fields: point_layer_fields(),
        renderer: renderer::point_renderer(),
        popup_template: Some(point_popup()),
        visible: true,
    }
}

/// The density layer, hidden initially.
#[must_use]
pub fn heatmap_layer(heatmap: HeatmapRenderer) -> LayerDefinition {
    LayerDefinition {
        object_id_field: OBJECT_ID_FIELD,
        fields: vec![field(OBJECT_ID_FIELD, FieldType::Oid)],
        renderer: Renderer::Heatmap(heatmap),
        popup_template: None,
        visible: false,
    }
}
