//! Progress engine: turns monthly submissions and fixed target schedules into
//! monthly, quarterly and annual progress percentages.
//!
//! Every function here is pure. Composite indicators resolve their
//! sub-indicators through [`IndicatorLookup`], so callers decide where the
//! catalog lives.

mod aggregate;
mod calculator;
mod composite;
pub mod domain;
mod formula;
mod target;
mod trend;
mod unit;
mod value;

pub use aggregate::{aggregate_annual_achievement, aggregate_quarter_achievement, AggregationRule};
pub use calculator::{
    calculate_annual_progress, calculate_monthly_progress, calculate_quarter_progress,
    monthly_breakdown, MonthlyProgress, QuarterProgress,
};
pub use composite::SubIndicatorDetail;
pub use domain::{
    parse_month, Entry, Indicator, IndicatorLookup, MeasurementType, ParseQuarterError, QuarterId,
    Targets,
};
pub use formula::{clamp_percent, compute_progress, compute_sub_progress};
pub use target::{
    resolve_annual_target, resolve_month_target, resolve_quarter_target, resolve_target,
    TargetWindow,
};
pub use trend::{classify_health, classify_trend, HealthStatus, TrendStatus};
pub use unit::indicator_unit;
pub use value::{key_aliases, parse_str, parse_value, sub_value, RawValue};
