use crate::progress::{HealthStatus, QuarterId, SubIndicatorDetail, TrendStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorProgressView {
    pub number: usize,
    pub indicator_id: String,
    pub name: String,
    pub pillar: String,
    pub output: String,
    pub measurement_type: String,
    pub unit: &'static str,
    pub total_actual: f64,
    pub target: f64,
    pub performance: f64,
    pub trend: TrendStatus,
    pub trend_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_target: Option<f64>,
    pub annual_progress: f64,
    pub health: HealthStatus,
    pub health_label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_indicators: Vec<SubIndicatorDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendCountEntry {
    pub trend: TrendStatus,
    pub trend_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCountEntry {
    pub health: HealthStatus,
    pub health_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarPerformanceEntry {
    pub pillar_id: String,
    pub pillar: String,
    pub indicators: usize,
    pub average_performance: f64,
    pub average_annual_progress: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReportSummary {
    pub quarter: QuarterId,
    pub quarter_label: &'static str,
    pub indicators: Vec<IndicatorProgressView>,
    pub trend_counts: Vec<TrendCountEntry>,
    pub health_counts: Vec<HealthCountEntry>,
    pub pillar_performance: Vec<PillarPerformanceEntry>,
}
