//! CSV export of the host table.
//!
//! The header row supplies the field names; every later row becomes a
//! [`CsvRow`] keyed by those names.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::{HostRow, HostTable, RecordError};

/// One CSV row, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    cells: BTreeMap<String, String>,
}

impl CsvRow {
    /// Builds a row from `(field, value)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl HostRow for CsvRow {
    fn cell_as_string(&self, field: &str) -> String {
        self.cells.get(field).cloned().unwrap_or_default()
    }

    fn cell_as_number(&self, field: &str) -> Option<f64> {
        self.cells.get(field)?.trim().parse::<f64>().ok()
    }
}

/// A host table loaded from CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    name: String,
    rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Creates a table from already-built rows.
    #[must_use]
    pub fn new(name: &str, rows: Vec<CsvRow>) -> Self {
        Self {
            name: name.to_owned(),
            rows,
        }
    }

    /// Reads a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the file cannot be opened or a row cannot
    /// be parsed.
    pub fn from_path(name: &str, path: &Path) -> Result<Self, RecordError> {
        log::info!("Reading table '{name}' from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(name, file)
    }

    /// Reads CSV with a header row from any reader.
    ///
    /// Short rows are allowed; their missing trailing cells read as blank.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the header or a row cannot be parsed.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, RecordError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let cells = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect();
            rows.push(CsvRow { cells });
        }

        log::debug!("Read {} rows from table '{name}'", rows.len());

        Ok(Self::new(name, rows))
    }
}

impl HostTable for CsvTable {
    type Row = CsvRow;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(&self) -> &[CsvRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_keyed_by_header() {
        let csv = "simplified_activity,long,lat\nDrone,-93.2,44.9\nRaid,-93.3,45.0\n";
        let table = CsvTable::from_reader("All Data", csv.as_bytes()).unwrap();

        assert_eq!(table.name(), "All Data");
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].cell_as_string("simplified_activity"), "Raid");
        assert_eq!(table.rows()[0].cell_as_number("long"), Some(-93.2));
    }

    #[test]
    fn missing_cells_read_blank() {
        let csv = "simplified_activity,abducted_yn,long,lat\nRaid\n";
        let table = CsvTable::from_reader("All Data", csv.as_bytes()).unwrap();
        let row = &table.rows()[0];

        assert_eq!(row.cell_as_string("abducted_yn"), "");
        assert_eq!(row.cell_as_string("no_such_column"), "");
        assert_eq!(row.cell_as_number("long"), None);
    }

    #[test]
    fn non_numeric_cell_has_no_number() {
        let row = CsvRow::from_pairs([("lat", "north"), ("long", " -93.5 ")]);
        assert_eq!(row.cell_as_number("lat"), None);
        assert_eq!(row.cell_as_number("long"), Some(-93.5));
    }
}
