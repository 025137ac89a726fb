use super::value::{self, deserialize_lenient, deserialize_lenient_map, null_as_default};
use chrono::Month;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Reporting quarter of the July–June fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterId {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl QuarterId {
    pub const fn ordered() -> [Self; 4] {
        [Self::Q1, Self::Q2, Self::Q3, Self::Q4]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    pub const fn months(self) -> [Month; 3] {
        match self {
            Self::Q1 => [Month::July, Month::August, Month::September],
            Self::Q2 => [Month::October, Month::November, Month::December],
            Self::Q3 => [Month::January, Month::February, Month::March],
            Self::Q4 => [Month::April, Month::May, Month::June],
        }
    }

    pub const fn for_month(month: Month) -> Self {
        match month {
            Month::July | Month::August | Month::September => Self::Q1,
            Month::October | Month::November | Month::December => Self::Q2,
            Month::January | Month::February | Month::March => Self::Q3,
            Month::April | Month::May | Month::June => Self::Q4,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Q1 => Some(Self::Q2),
            Self::Q2 => Some(Self::Q3),
            Self::Q3 => Some(Self::Q4),
            Self::Q4 => None,
        }
    }

    /// Quarters from Q1 up to and including `self`.
    pub fn through(self) -> impl Iterator<Item = Self> {
        Self::ordered().into_iter().filter(move |quarter| *quarter <= self)
    }

    pub fn owns(self, month: Month) -> bool {
        Self::for_month(month) == self
    }
}

impl fmt::Display for QuarterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQuarterError(pub String);

impl fmt::Display for ParseQuarterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not one of q1, q2, q3, q4", self.0)
    }
}

impl std::error::Error for ParseQuarterError {}

impl FromStr for QuarterId {
    type Err = ParseQuarterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "q1" | "1" => Ok(Self::Q1),
            "q2" | "2" => Ok(Self::Q2),
            "q3" | "3" => Ok(Self::Q3),
            "q4" | "4" => Ok(Self::Q4),
            _ => Err(ParseQuarterError(raw.to_string())),
        }
    }
}

/// Parses a full month name or abbreviation, ignoring case.
pub fn parse_month(raw: &str) -> Option<Month> {
    let trimmed = raw.trim().trim_end_matches('.');
    if trimmed.eq_ignore_ascii_case("sept") {
        return Some(Month::September);
    }
    Month::from_str(trimmed).ok()
}

mod month_name {
    use super::parse_month;
    use chrono::Month;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(month: &Month, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(month.name())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Month, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_month(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown month '{raw}'")))
    }
}

/// How submitted values relate to targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MeasurementType {
    /// Counts reported as running totals for the year.
    #[default]
    Cumulative,
    /// Values already expressed as a percent, one fixed target per quarter.
    Percentage,
    /// Lower is better.
    Decreasing,
    Other(String),
}

impl MeasurementType {
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "cumulative" => Self::Cumulative,
            "percentage" => Self::Percentage,
            "decreasing" => Self::Decreasing,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cumulative => "cumulative",
            Self::Percentage => "percentage",
            Self::Decreasing => "decreasing",
            Self::Other(label) => label,
        }
    }

    /// Percentage and decreasing indicators compare each quarter against its
    /// own target instead of a running sum.
    pub fn uses_fixed_quarter_target(&self) -> bool {
        matches!(self, Self::Percentage | Self::Decreasing)
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MeasurementType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MeasurementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(Self::from_label)
            .unwrap_or_default())
    }
}

/// Fixed per-quarter and annual targets, parsed to numbers on the way in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub q1: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub q2: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub q3: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub q4: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub annual: f64,
}

impl Targets {
    pub fn new(q1: f64, q2: f64, q3: f64, q4: f64, annual: f64) -> Self {
        Self {
            q1,
            q2,
            q3,
            q4,
            annual,
        }
    }

    pub fn for_quarter(&self, quarter: QuarterId) -> f64 {
        match quarter {
            QuarterId::Q1 => self.q1,
            QuarterId::Q2 => self.q2,
            QuarterId::Q3 => self.q3,
            QuarterId::Q4 => self.q4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub measurement_type: MeasurementType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Targets,
    /// Short semantic key to sub-indicator id. Non-empty means composite.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub sub_indicator_ids: BTreeMap<String, String>,
}

impl Indicator {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        measurement_type: MeasurementType,
        targets: Targets,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            measurement_type,
            targets,
            sub_indicator_ids: BTreeMap::new(),
        }
    }

    pub fn with_sub_indicator(mut self, key: impl Into<String>, id: impl Into<String>) -> Self {
        self.sub_indicator_ids.insert(key.into(), id.into());
        self
    }

    pub fn is_composite(&self) -> bool {
        !self.sub_indicator_ids.is_empty()
    }
}

/// One monthly submission for an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub indicator_id: String,
    pub quarter_id: QuarterId,
    #[serde(with = "month_name")]
    pub month: Month,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub value: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub sub_values: BTreeMap<String, f64>,
}

impl Entry {
    /// Builds an entry whose quarter is derived from the month.
    pub fn new(indicator_id: impl Into<String>, month: Month, value: f64) -> Self {
        Self {
            indicator_id: indicator_id.into(),
            quarter_id: QuarterId::for_month(month),
            month,
            value,
            sub_values: BTreeMap::new(),
        }
    }

    pub fn with_sub_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.sub_values.insert(key.into(), value);
        self
    }

    /// Sub-value for `key`, honoring legacy key aliases.
    pub fn sub_value(&self, key: &str) -> f64 {
        value::sub_value(&self.sub_values, key)
    }
}

/// Resolves sub-indicator ids while computing composite progress.
pub trait IndicatorLookup {
    fn indicator(&self, id: &str) -> Option<&Indicator>;
}

impl IndicatorLookup for [Indicator] {
    fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.iter().find(|indicator| indicator.id == id)
    }
}

impl IndicatorLookup for Vec<Indicator> {
    fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.as_slice().indicator(id)
    }
}

impl IndicatorLookup for HashMap<String, Indicator> {
    fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.get(id)
    }
}
