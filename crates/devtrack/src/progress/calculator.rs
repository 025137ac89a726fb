use super::aggregate::{aggregate_annual_achievement, aggregate_window, window_entries, AggregationRule};
use super::composite::{composite_quarter_target, resolve_composite, CompositeWindow, SubIndicatorDetail};
use super::domain::{Entry, Indicator, IndicatorLookup, QuarterId};
use super::formula::compute_progress;
use super::target::{resolve_annual_target, resolve_month_target, resolve_quarter_target};
use super::trend::{classify_trend, TrendStatus};
use chrono::Month;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterProgress {
    pub quarter: QuarterId,
    pub total_actual: f64,
    pub target: f64,
    pub performance: f64,
    pub trend: TrendStatus,
    /// Denominator of the following quarter; `None` after Q4.
    pub next_target: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_indicator_details: Vec<SubIndicatorDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProgress {
    pub month: &'static str,
    pub reported: bool,
    pub value: f64,
    pub target: f64,
    pub progress: f64,
}

/// Quarterly figures for `indicator`. `months_in_quarter` narrows the window
/// to the listed months; an empty slice uses the whole quarter.
pub fn calculate_quarter_progress<L>(
    lookup: &L,
    indicator: &Indicator,
    entries: &[Entry],
    quarter: QuarterId,
    months_in_quarter: &[Month],
) -> QuarterProgress
where
    L: IndicatorLookup + ?Sized,
{
    if indicator.is_composite() {
        let window: Vec<&Entry> =
            window_entries(&indicator.id, entries, Some(quarter), months_in_quarter).collect();
        let outcome = resolve_composite(lookup, indicator, &window, CompositeWindow::Quarter(quarter));

        return QuarterProgress {
            quarter,
            total_actual: outcome.total_actual,
            target: outcome.total_target,
            performance: outcome.performance,
            trend: classify_trend(outcome.performance),
            next_target: quarter
                .next()
                .map(|next| composite_quarter_target(lookup, indicator, next)),
            sub_indicator_details: outcome.details,
        };
    }

    let total_actual = aggregate_window(indicator, entries, Some(quarter), months_in_quarter);
    let target = resolve_quarter_target(indicator, quarter);
    let performance = compute_progress(&indicator.measurement_type, total_actual, target);

    QuarterProgress {
        quarter,
        total_actual,
        target,
        performance,
        trend: classify_trend(performance),
        next_target: quarter
            .next()
            .map(|next| resolve_quarter_target(indicator, next)),
        sub_indicator_details: Vec::new(),
    }
}

/// Whole-year progress against the annual target, in `[0, 100]`.
pub fn calculate_annual_progress<L>(lookup: &L, indicator: &Indicator, entries: &[Entry]) -> f64
where
    L: IndicatorLookup + ?Sized,
{
    if indicator.is_composite() {
        let window: Vec<&Entry> = window_entries(&indicator.id, entries, None, &[]).collect();
        return resolve_composite(lookup, indicator, &window, CompositeWindow::Annual).performance;
    }

    let achieved = aggregate_annual_achievement(indicator, entries);
    compute_progress(
        &indicator.measurement_type,
        achieved,
        resolve_annual_target(indicator),
    )
}

/// Progress of a single month's reported `value` against the target of the
/// quarter owning `month`.
///
/// Composite indicators have no value of their own; when `entries` are given
/// they are averaged from that month's sub-values instead.
pub fn calculate_monthly_progress<L>(
    lookup: &L,
    indicator: &Indicator,
    value: f64,
    month: Month,
    entries: Option<&[Entry]>,
) -> f64
where
    L: IndicatorLookup + ?Sized,
{
    if let (true, Some(entries)) = (indicator.is_composite(), entries) {
        let quarter = QuarterId::for_month(month);
        let months = [month];
        let window: Vec<&Entry> =
            window_entries(&indicator.id, entries, Some(quarter), &months).collect();
        return resolve_composite(lookup, indicator, &window, CompositeWindow::Quarter(quarter))
            .performance;
    }

    compute_progress(
        &indicator.measurement_type,
        value,
        resolve_month_target(indicator, month),
    )
}

/// Month-by-month view of a quarter. Duplicate submissions for the same month
/// collapse with the indicator's aggregation rule.
pub fn monthly_breakdown<L>(
    lookup: &L,
    indicator: &Indicator,
    entries: &[Entry],
    quarter: QuarterId,
) -> Vec<MonthlyProgress>
where
    L: IndicatorLookup + ?Sized,
{
    let rule = AggregationRule::for_measurement(&indicator.measurement_type);

    quarter
        .months()
        .into_iter()
        .map(|month| {
            let months = [month];
            let reported: Vec<f64> = window_entries(&indicator.id, entries, Some(quarter), &months)
                .map(|entry| entry.value)
                .collect();
            let value = rule.apply(reported.iter().copied());
            let target = if indicator.is_composite() {
                composite_quarter_target(lookup, indicator, quarter)
            } else {
                resolve_month_target(indicator, month)
            };
            let progress = calculate_monthly_progress(lookup, indicator, value, month, Some(entries));

            MonthlyProgress {
                month: month.name(),
                reported: !reported.is_empty(),
                value,
                target,
                progress,
            }
        })
        .collect()
}
