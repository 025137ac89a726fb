use super::normalizer::normalize_key;
use super::ImportError;
use crate::progress::{parse_month, parse_str, Entry, QuarterId};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<Entry>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for (index, record) in csv_reader.deserialize::<EntryRow>().enumerate() {
        let line = index + 2;
        let row = record?;
        entries.push(row.into_entry(line)?);
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct EntryRow {
    #[serde(rename = "Indicator ID")]
    indicator_id: String,
    #[serde(rename = "Quarter", default, deserialize_with = "empty_string_as_none")]
    quarter: Option<String>,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Value", default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(
        rename = "Sub Values",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    sub_values: Option<String>,
}

impl EntryRow {
    fn into_entry(self, line: usize) -> Result<Entry, ImportError> {
        let month = parse_month(&self.month).ok_or_else(|| ImportError::UnknownMonth {
            line,
            value: self.month.clone(),
        })?;

        let quarter_id = match self.quarter.as_deref() {
            Some(raw) => raw
                .parse::<QuarterId>()
                .map_err(|source| ImportError::UnknownQuarter { line, source })?,
            None => QuarterId::for_month(month),
        };

        let sub_values = match self.sub_values.as_deref() {
            Some(raw) => parse_sub_values(raw, line)?,
            None => BTreeMap::new(),
        };

        let entry = Entry {
            indicator_id: self.indicator_id,
            quarter_id,
            month,
            value: self.value.as_deref().map(parse_str).unwrap_or(0.0),
            sub_values,
        };
        super::validate_entry(&entry, line)?;
        Ok(entry)
    }
}

/// Reads `key=value; key=value`. Keys are normalised, values go through
/// [`parse_str`].
fn parse_sub_values(raw: &str, line: usize) -> Result<BTreeMap<String, f64>, ImportError> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| ImportError::InvalidSubValue {
                    line,
                    value: pair.to_string(),
                })?;
            Ok((normalize_key(key), parse_str(value)))
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_sub_values_for_tests(raw: &str) -> Result<BTreeMap<String, f64>, ImportError> {
    parse_sub_values(raw, 2)
}
