//! Boundary readers: the catalog from JSON, submissions from CSV or JSON.
//! Everything leaving this module is a fully typed record.

mod normalizer;
mod parser;

use crate::catalog::Catalog;
use crate::progress::{Entry, ParseQuarterError, QuarterId};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid entry CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: unknown month '{value}'")]
    UnknownMonth { line: usize, value: String },
    #[error("line {line}: {source}")]
    UnknownQuarter {
        line: usize,
        source: ParseQuarterError,
    },
    #[error("line {line}: {month} belongs to {expected}, not {quarter}")]
    QuarterMismatch {
        line: usize,
        month: &'static str,
        quarter: QuarterId,
        expected: QuarterId,
    },
    #[error("line {line}: sub value '{value}' is not written as key=value")]
    InvalidSubValue { line: usize, value: String },
}

pub(crate) fn validate_entry(entry: &Entry, line: usize) -> Result<(), ImportError> {
    let expected = QuarterId::for_month(entry.month);
    if expected != entry.quarter_id {
        return Err(ImportError::QuarterMismatch {
            line,
            month: entry.month.name(),
            quarter: entry.quarter_id,
            expected,
        });
    }
    Ok(())
}

pub struct CatalogLoader;

impl CatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, ImportError> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        tracing::debug!(indicators = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

pub struct EntryImporter;

impl EntryImporter {
    /// Picks the reader from the file extension: `.json` is read as a JSON
    /// array, anything else as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>, ImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_reader(file)
        }
    }

    /// CSV with `Indicator ID, Quarter, Month, Value, Sub Values` columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Entry>, ImportError> {
        let entries = parser::parse_records(reader)?;
        tracing::debug!(entries = entries.len(), "entries imported from csv");
        Ok(entries)
    }

    /// JSON array of entries in the camelCase wire format. Sub-value keys are
    /// normalised the same way as in CSV.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Entry>, ImportError> {
        let mut entries: Vec<Entry> = serde_json::from_reader(reader)?;
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.sub_values = std::mem::take(&mut entry.sub_values)
                .into_iter()
                .map(|(key, value)| (normalizer::normalize_key(&key), value))
                .collect();
            validate_entry(entry, index + 1)?;
        }
        tracing::debug!(entries = entries.len(), "entries imported from json");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::io::Cursor;

    #[test]
    fn normalize_key_collapses_whitespace_and_case() {
        assert_eq!(normalizer::normalize_for_tests("\u{feff} Maize  KG "), "maize_kg");
        assert_eq!(normalizer::normalize_for_tests("LSD"), "lsd");
    }

    #[test]
    fn sub_values_parse_pairs() {
        let values = parser::parse_sub_values_for_tests("maize = 1,200; BQ=4;; soya=-")
            .expect("sub values parse");
        assert_eq!(values.get("maize"), Some(&1200.0));
        assert_eq!(values.get("bq"), Some(&4.0));
        assert_eq!(values.get("soya"), Some(&0.0));
    }

    #[test]
    fn sub_values_reject_missing_separator() {
        let error = parser::parse_sub_values_for_tests("maize 12").expect_err("expected failure");
        match error {
            ImportError::InvalidSubValue { value, .. } => assert_eq!(value, "maize 12"),
            other => panic!("expected invalid sub value, got {other:?}"),
        }
    }

    #[test]
    fn csv_rows_become_entries() {
        let csv = "Indicator ID,Quarter,Month,Value,Sub Values\n\
beneficiaries,q4,Apr,\"5,000\",\n\
crops,,Sept,,maize=40;bq=2\n";
        let entries = EntryImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].quarter_id, QuarterId::Q4);
        assert_eq!(entries[0].month, Month::April);
        assert_eq!(entries[0].value, 5000.0);
        assert_eq!(entries[1].quarter_id, QuarterId::Q1);
        assert_eq!(entries[1].value, 0.0);
        assert_eq!(entries[1].sub_value("lsd"), 2.0);
    }

    #[test]
    fn csv_rejects_month_outside_quarter() {
        let csv = "Indicator ID,Quarter,Month,Value\nbeneficiaries,q1,April,10\n";
        let error = EntryImporter::from_reader(Cursor::new(csv)).expect_err("expected mismatch");
        match error {
            ImportError::QuarterMismatch {
                line,
                quarter,
                expected,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(quarter, QuarterId::Q1);
                assert_eq!(expected, QuarterId::Q4);
            }
            other => panic!("expected quarter mismatch, got {other:?}"),
        }
    }

    #[test]
    fn csv_rejects_unknown_month_and_quarter() {
        let csv = "Indicator ID,Quarter,Month,Value\nx,q1,Julember,10\n";
        assert!(matches!(
            EntryImporter::from_reader(Cursor::new(csv)),
            Err(ImportError::UnknownMonth { .. })
        ));

        let csv = "Indicator ID,Quarter,Month,Value\nx,q5,July,10\n";
        assert!(matches!(
            EntryImporter::from_reader(Cursor::new(csv)),
            Err(ImportError::UnknownQuarter { .. })
        ));
    }

    #[test]
    fn json_entries_are_validated() {
        let json = r#"[{"indicatorId": "x", "quarterId": "q2", "month": "July", "value": 1}]"#;
        assert!(matches!(
            EntryImporter::from_json_reader(Cursor::new(json)),
            Err(ImportError::QuarterMismatch { line: 1, .. })
        ));
    }

    #[test]
    fn json_sub_value_keys_match_csv_normalisation() {
        let json = r#"[{"indicatorId": "disease", "quarterId": "q1", "month": "Sept",
            "subValues": {"BQ": 4, " Maize  KG ": "1,200"}}]"#;
        let from_json =
            EntryImporter::from_json_reader(Cursor::new(json)).expect("json import succeeds");
        let csv = "Indicator ID,Quarter,Month,Value,Sub Values\n\
disease,q1,Sept,,BQ=4; Maize  KG=1200\n";
        let from_csv = EntryImporter::from_reader(Cursor::new(csv)).expect("csv import succeeds");

        assert_eq!(from_json[0].sub_value("lsd"), 4.0);
        assert_eq!(from_json[0].sub_value("maize"), 1200.0);
        assert_eq!(from_json[0].sub_values, from_csv[0].sub_values);
    }

    #[test]
    fn missing_files_propagate_io_errors() {
        let error = EntryImporter::from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            ImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(matches!(
            CatalogLoader::from_path("./does-not-exist.json"),
            Err(ImportError::Io(_))
        ));
    }
}
