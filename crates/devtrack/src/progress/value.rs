use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Target or achievement as it arrives on the wire: a plain number or a
/// display string such as `"50%"`, `"1,200"` or `"-"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Converts a raw value into a number. Missing values, `null` and `"-"`
/// become 0, as does any string that does not yield a finite number.
pub fn parse_value(raw: Option<&RawValue>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawValue::Number(value)) => *value,
        Some(RawValue::Text(text)) => parse_str(text),
    }
}

/// String half of [`parse_value`]. Every character other than an ASCII digit
/// or `.` is dropped, so `"1,200 kg"` reads as 1200. The number is the
/// longest leading run with at most one dot: `"12.5 t."` reads as 12.5.
pub fn parse_str(raw: &str) -> f64 {
    if raw.trim() == "-" {
        return 0.0;
    }

    let mut seen_dot = false;
    let prefix: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .take_while(|ch| {
            if *ch != '.' {
                return true;
            }
            !std::mem::replace(&mut seen_dot, true)
        })
        .collect();

    prefix
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

const LEGACY_KEY_ALIASES: &[(&str, &[&str])] = &[
    ("chicken", &["poultry"]),
    ("poultry", &["chicken"]),
    ("maize", &["maize_kg"]),
    ("maize_kg", &["maize"]),
    ("soya", &["soya_kg"]),
    ("soya_kg", &["soya"]),
    ("lsd", &["bq"]),
    ("bq", &["lsd"]),
];

/// Keys a sub-value may have been stored under before it was renamed.
pub fn key_aliases(key: &str) -> &'static [&'static str] {
    LEGACY_KEY_ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == key)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Looks up a sub-value by its canonical key, then by each legacy alias.
pub fn sub_value(sub_values: &BTreeMap<String, f64>, key: &str) -> f64 {
    if let Some(value) = sub_values.get(key) {
        return *value;
    }

    key_aliases(key)
        .iter()
        .find_map(|alias| sub_values.get(*alias))
        .copied()
        .unwrap_or(0.0)
}

pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(parse_value(raw.as_ref()))
}

pub(crate) fn deserialize_lenient_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<RawValue>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, parse_value(value.as_ref())))
        .collect())
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_degrades_to_zero() {
        assert_eq!(parse_value(None), 0.0);
        assert_eq!(parse_value(Some(&RawValue::from("-"))), 0.0);
        assert_eq!(parse_value(Some(&RawValue::from(" - "))), 0.0);
        assert_eq!(parse_value(Some(&RawValue::from("n/a"))), 0.0);
        assert_eq!(parse_value(Some(&RawValue::from("."))), 0.0);
        assert_eq!(parse_value(Some(&RawValue::from(""))), 0.0);
    }

    #[test]
    fn parse_value_strips_symbols_and_separators() {
        assert_eq!(parse_value(Some(&RawValue::from("50%"))), 50.0);
        assert_eq!(parse_value(Some(&RawValue::from("18,713"))), 18713.0);
        assert_eq!(parse_value(Some(&RawValue::from("MK 2,500.50"))), 2500.5);
        assert_eq!(parse_value(Some(&RawValue::from(42.5))), 42.5);
    }

    #[test]
    fn parse_str_reads_leading_number_before_stray_dots() {
        assert_eq!(parse_str("1.2.3"), 1.2);
        assert_eq!(parse_str("12.5 t."), 12.5);
        assert_eq!(parse_str("12.5 Ha."), 12.5);
        assert_eq!(parse_str("..5"), 0.0);
    }

    #[test]
    fn sub_value_prefers_canonical_key() {
        let mut values = BTreeMap::new();
        values.insert("lsd".to_string(), 3.0);
        values.insert("bq".to_string(), 9.0);
        assert_eq!(sub_value(&values, "lsd"), 3.0);
    }

    #[test]
    fn sub_value_falls_back_through_aliases() {
        let mut values = BTreeMap::new();
        values.insert("bq".to_string(), 12.0);
        values.insert("poultry".to_string(), 40.0);
        values.insert("maize_kg".to_string(), 850.0);
        assert_eq!(sub_value(&values, "lsd"), 12.0);
        assert_eq!(sub_value(&values, "chicken"), 40.0);
        assert_eq!(sub_value(&values, "maize"), 850.0);
        assert_eq!(sub_value(&values, "soya"), 0.0);
        assert_eq!(sub_value(&values, "goats"), 0.0);
    }

    #[test]
    fn lenient_deserializers_accept_strings_numbers_and_null() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "deserialize_lenient")]
            a: f64,
            #[serde(deserialize_with = "deserialize_lenient")]
            b: f64,
            #[serde(deserialize_with = "deserialize_lenient")]
            c: f64,
            #[serde(deserialize_with = "deserialize_lenient_map")]
            subs: BTreeMap<String, f64>,
        }

        let probe: Probe = serde_json::from_str(
            r#"{"a": 12, "b": "80%", "c": null, "subs": {"maize": "1,000", "soya": null}}"#,
        )
        .expect("probe parses");
        assert_eq!(probe.a, 12.0);
        assert_eq!(probe.b, 80.0);
        assert_eq!(probe.c, 0.0);
        assert_eq!(probe.subs.get("maize"), Some(&1000.0));
        assert_eq!(probe.subs.get("soya"), Some(&0.0));
    }
}
