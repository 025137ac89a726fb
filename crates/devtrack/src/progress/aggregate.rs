use super::domain::{Entry, Indicator, MeasurementType, QuarterId};
use chrono::Month;

/// How monthly values in a window collapse into one achievement figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRule {
    Mean,
    /// Later submissions already include earlier ones.
    Max,
    Sum,
}

impl AggregationRule {
    pub fn for_measurement(measurement: &MeasurementType) -> Self {
        match measurement {
            MeasurementType::Percentage => Self::Mean,
            MeasurementType::Cumulative => Self::Max,
            MeasurementType::Decreasing | MeasurementType::Other(_) => Self::Sum,
        }
    }

    pub fn apply<I>(self, values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max: Option<f64> = None;

        for value in values {
            count += 1;
            sum += value;
            max = Some(max.map_or(value, |current| current.max(value)));
        }

        match self {
            Self::Sum => sum,
            Self::Max => max.unwrap_or(0.0),
            Self::Mean if count == 0 => 0.0,
            Self::Mean => sum / count as f64,
        }
    }
}

/// Entries belonging to `indicator_id`, optionally narrowed to a quarter and
/// to a set of months. An empty month list keeps every month.
pub(crate) fn window_entries<'a>(
    indicator_id: &'a str,
    entries: &'a [Entry],
    quarter: Option<QuarterId>,
    months: &'a [Month],
) -> impl Iterator<Item = &'a Entry> + 'a {
    entries.iter().filter(move |entry| {
        entry.indicator_id == indicator_id
            && quarter.map_or(true, |quarter| entry.quarter_id == quarter)
            && (months.is_empty() || months.contains(&entry.month))
    })
}

pub fn aggregate_quarter_achievement(
    indicator: &Indicator,
    entries: &[Entry],
    quarter: QuarterId,
) -> f64 {
    aggregate_window(indicator, entries, Some(quarter), &[])
}

/// Whole-year achievement. For cumulative indicators this is the maximum
/// over every entry of the year, not a sum of quarterly maxima.
pub fn aggregate_annual_achievement(indicator: &Indicator, entries: &[Entry]) -> f64 {
    aggregate_window(indicator, entries, None, &[])
}

pub(crate) fn aggregate_window(
    indicator: &Indicator,
    entries: &[Entry],
    quarter: Option<QuarterId>,
    months: &[Month],
) -> f64 {
    AggregationRule::for_measurement(&indicator.measurement_type).apply(
        window_entries(&indicator.id, entries, quarter, months).map(|entry| entry.value),
    )
}
