use super::domain::{Indicator, QuarterId};
use chrono::Month;

/// Period a denominator is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetWindow {
    Quarter(QuarterId),
    Month(Month),
    Annual,
}

pub fn resolve_target(indicator: &Indicator, window: TargetWindow) -> f64 {
    match window {
        TargetWindow::Quarter(quarter) => resolve_quarter_target(indicator, quarter),
        TargetWindow::Month(month) => resolve_month_target(indicator, month),
        TargetWindow::Annual => resolve_annual_target(indicator),
    }
}

/// Denominator for a quarter. Percentage and decreasing indicators use the
/// quarter's own target; everything else sums Q1 through `quarter` because
/// the submitted values are running totals.
pub fn resolve_quarter_target(indicator: &Indicator, quarter: QuarterId) -> f64 {
    let targets = &indicator.targets;
    if indicator.measurement_type.uses_fixed_quarter_target() {
        targets.for_quarter(quarter)
    } else {
        quarter
            .through()
            .map(|quarter| targets.for_quarter(quarter))
            .sum()
    }
}

pub fn resolve_month_target(indicator: &Indicator, month: Month) -> f64 {
    resolve_quarter_target(indicator, QuarterId::for_month(month))
}

pub fn resolve_annual_target(indicator: &Indicator) -> f64 {
    indicator.targets.annual
}
