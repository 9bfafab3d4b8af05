//! `GeoJSON` export of map points.
//!
//! Produces the same feature collection the host dashboard builds from its
//! table: point geometries in CRS84 with the attribute bag as properties.

use activity_map_record_models::MapPoint;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::RecordError;

/// Collection name used for exports of the whole table.
pub const COLLECTION_NAME: &str = "latest from All Data";

const CRS84: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// Converts one point into a `GeoJSON` feature.
///
/// # Errors
///
/// Returns [`RecordError::Json`] if the attribute bag fails to serialize.
pub fn to_feature(point: &MapPoint) -> Result<Feature, RecordError> {
    let properties = match serde_json::to_value(point)? {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    };

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            point.longitude,
            point.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Builds a named CRS84 feature collection from `points`.
///
/// # Errors
///
/// Returns [`RecordError::Json`] if any point fails to serialize.
pub fn to_feature_collection<'a>(
    name: &str,
    points: impl IntoIterator<Item = &'a MapPoint>,
) -> Result<FeatureCollection, RecordError> {
    let features = points
        .into_iter()
        .map(to_feature)
        .collect::<Result<Vec<_>, _>>()?;

    let mut foreign_members = JsonObject::new();
    foreign_members.insert("name".to_string(), serde_json::json!(name));
    foreign_members.insert(
        "crs".to_string(),
        serde_json::json!({
            "type": "name",
            "properties": { "name": CRS84 },
        }),
    );

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    })
}

#[cfg(test)]
mod tests {
    use activity_map_record_models::{EventProperties, EventRecord};

    use super::*;
    use crate::extract::attribute;

    fn point(id: u32, activity: &str) -> MapPoint {
        attribute(
            id,
            EventRecord {
                longitude: -93.25,
                latitude: 44.95,
                properties: EventProperties {
                    simplified_activity: activity.to_string(),
                    start_hour_min: "09:15".to_string(),
                    ..EventProperties::default()
                },
            },
        )
    }

    #[test]
    fn feature_carries_geometry_and_attributes() {
        let feature = to_feature(&point(3, "Raid")).unwrap();

        match feature.geometry.map(|g| g.value) {
            Some(Value::Point(coords)) => assert_eq!(coords, vec![-93.25, 44.95]),
            other => panic!("expected point geometry, got {other:?}"),
        }

        let props = feature.properties.unwrap();
        assert_eq!(props["objectid"], 3);
        assert_eq!(props["activity_symbol_key"], "Raid_UNKNOWN");
        assert_eq!(props["hourNumber"], 9);
    }

    #[test]
    fn collection_is_named_with_crs84() {
        let points = vec![point(1, "Drone"), point(2, "Helicopter")];
        let collection = to_feature_collection(COLLECTION_NAME, &points).unwrap();

        assert_eq!(collection.features.len(), 2);
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["name"], COLLECTION_NAME);
        assert_eq!(json["crs"]["properties"]["name"], CRS84);
    }
}
