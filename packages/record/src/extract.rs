//! Turns host rows into classified, numbered map points.
//!
//! Runs once per dataset load. Derived attributes (symbol key, hour,
//! parsed date) are computed here and never recomputed by the filters.

use activity_map_record_models::{EventProperties, EventRecord, MapPoint};
use activity_map_symbology::classify;

use crate::parsing::{parse_activity_date, parse_hour, parse_lon_lat};
use crate::{CoordinateFields, HostRow, HostTable};

/// Reads the cells of one row. Returns `None` if the row has no usable
/// coordinates.
#[must_use]
pub fn read_record<R: HostRow>(row: &R, coordinates: &CoordinateFields) -> Option<EventRecord> {
    let (longitude, latitude) = parse_lon_lat(
        row.cell_as_number(&coordinates.longitude),
        row.cell_as_number(&coordinates.latitude),
    )?;

    Some(EventRecord {
        longitude,
        latitude,
        properties: EventProperties {
            abducted_yn: row.cell_as_string("abducted_yn"),
            simplified_activity: row.cell_as_string("simplified_activity"),
            activity_date: row.cell_as_string("activity_date"),
            start_hour_min: row.cell_as_string("start_hour_min"),
            address: row.cell_as_string("address"),
            location_type: row.cell_as_string("location_type"),
            veracity: row.cell_as_string("veracity"),
            additional_description: row.cell_as_string("additional_description"),
            start_datetime_str: row.cell_as_string("start_datetime_str"),
            start_timestamp: row.cell_as_number("start_timestamp"),
            hour_of_day: row.cell_as_number("hour_of_day"),
            map_activity: row.cell_as_string("map_activity"),
            day_of_week: row.cell_as_string("day_of_week"),
            hour_of_day_str: row.cell_as_string("hour_of_day_str"),
            ice_license_plates: row.cell_as_string("ice_license_plates"),
            people_taken: row.cell_as_string("people_taken"),
            agent_qty: row.cell_as_string("agent_qty"),
            vehicle_qty: row.cell_as_string("vehicle_qty"),
        },
    })
}

/// Computes the derived attributes for a record and assigns its id.
#[must_use]
pub fn attribute(objectid: u32, record: EventRecord) -> MapPoint {
    let activity_symbol_key = classify(&record.properties);
    let hour_number = parse_hour(&record.properties.start_hour_min);
    let activity_day = parse_activity_date(&record.properties.activity_date);

    MapPoint {
        objectid,
        longitude: record.longitude,
        latitude: record.latitude,
        properties: record.properties,
        activity_symbol_key,
        hour_number,
        activity_day,
    }
}

/// Extracts every locatable row of `table` as a [`MapPoint`].
///
/// Ids are 1-based and follow host order over the rows that have
/// coordinates; rows without them are skipped.
#[must_use]
pub fn extract_points<T: HostTable>(table: &T, coordinates: &CoordinateFields) -> Vec<MapPoint> {
    let rows = table.rows();
    let mut points = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let Some(record) = read_record(row, coordinates) else {
            log::debug!(
                "Skipping row {} of '{}': no usable coordinates",
                index + 1,
                table.name()
            );
            continue;
        };
        let objectid = u32::try_from(points.len() + 1).unwrap_or(u32::MAX);
        points.push(attribute(objectid, record));
    }

    log::info!(
        "Extracted {} points from {} rows of '{}'",
        points.len(),
        rows.len(),
        table.name()
    );

    points
}
