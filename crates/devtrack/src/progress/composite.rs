use super::domain::{Entry, Indicator, IndicatorLookup, QuarterId};
use super::formula::{compute_progress, compute_sub_progress};
use super::target::{resolve_annual_target, resolve_quarter_target};
use serde::Serialize;

/// Per sub-indicator breakdown behind a composite figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIndicatorDetail {
    pub key: String,
    pub indicator_id: String,
    pub name: String,
    pub actual: f64,
    pub target: f64,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompositeWindow {
    Quarter(QuarterId),
    Annual,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompositeOutcome {
    pub total_actual: f64,
    pub total_target: f64,
    pub performance: f64,
    pub details: Vec<SubIndicatorDetail>,
}

/// Averages sub-indicator progress over the parent's `entries`, which must
/// already be narrowed to the window. Sub-values are summed across entries.
pub(crate) fn resolve_composite<L>(
    lookup: &L,
    indicator: &Indicator,
    entries: &[&Entry],
    window: CompositeWindow,
) -> CompositeOutcome
where
    L: IndicatorLookup + ?Sized,
{
    let details: Vec<SubIndicatorDetail> = indicator
        .sub_indicator_ids
        .iter()
        .filter_map(|(key, sub_id)| {
            let sub = lookup.indicator(sub_id)?;
            let actual: f64 = entries.iter().map(|entry| entry.sub_value(key)).sum();
            let target = match window {
                CompositeWindow::Quarter(quarter) => resolve_quarter_target(sub, quarter),
                CompositeWindow::Annual => resolve_annual_target(sub),
            };
            let progress = compute_sub_progress(&sub.measurement_type, actual, target);

            Some(SubIndicatorDetail {
                key: key.clone(),
                indicator_id: sub.id.clone(),
                name: sub.name.clone(),
                actual,
                target,
                progress,
            })
        })
        .collect();

    let total_actual = details.iter().map(|detail| detail.actual).sum();
    let total_target = details.iter().map(|detail| detail.target).sum();

    let performance = if details.is_empty() {
        compute_progress(&indicator.measurement_type, total_actual, total_target)
    } else {
        details.iter().map(|detail| detail.progress).sum::<f64>() / details.len() as f64
    };

    CompositeOutcome {
        total_actual,
        total_target,
        performance,
        details,
    }
}

/// Sum of the resolved sub-indicators' targets for `quarter`.
pub(crate) fn composite_quarter_target<L>(lookup: &L, indicator: &Indicator, quarter: QuarterId) -> f64
where
    L: IndicatorLookup + ?Sized,
{
    indicator
        .sub_indicator_ids
        .values()
        .filter_map(|sub_id| lookup.indicator(sub_id))
        .map(|sub| resolve_quarter_target(sub, quarter))
        .sum()
}
