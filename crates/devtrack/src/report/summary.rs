use super::views::{
    HealthCountEntry, IndicatorProgressView, PillarPerformanceEntry, ProgressReportSummary,
    TrendCountEntry,
};
use crate::catalog::{number_indicators, Catalog, IndicatorContext};
use crate::progress::{
    calculate_annual_progress, calculate_quarter_progress, classify_health, indicator_unit, Entry,
    HealthStatus, IndicatorLookup, QuarterId, QuarterProgress, TrendStatus,
};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// Quarter and annual figures for one top-level indicator.
#[derive(Debug, Clone)]
pub struct IndicatorProgress {
    pub number: usize,
    pub indicator_id: String,
    pub name: String,
    pub pillar_id: String,
    pub pillar: String,
    pub output: String,
    pub measurement_type: String,
    pub unit: &'static str,
    pub quarter: QuarterProgress,
    pub annual_progress: f64,
    pub health: HealthStatus,
}

impl IndicatorProgress {
    fn evaluate(
        catalog: &Catalog,
        context: &IndicatorContext<'_>,
        entries: &[Entry],
        quarter: QuarterId,
        numbers: &BTreeMap<String, usize>,
    ) -> Self {
        let indicator = context.indicator;
        let months = quarter.months();
        let progress = calculate_quarter_progress(catalog, indicator, entries, quarter, &months);
        let annual_progress = calculate_annual_progress(catalog, indicator, entries);

        Self {
            number: numbers.get(&indicator.id).copied().unwrap_or_default(),
            indicator_id: indicator.id.clone(),
            name: indicator.name.clone(),
            pillar_id: context.pillar.id.clone(),
            pillar: context.pillar.name.clone(),
            output: context.output.name.clone(),
            measurement_type: indicator.measurement_type.to_string(),
            unit: indicator_unit(indicator),
            health: classify_health(progress.performance),
            quarter: progress,
            annual_progress,
        }
    }

    pub fn to_view(&self) -> IndicatorProgressView {
        IndicatorProgressView {
            number: self.number,
            indicator_id: self.indicator_id.clone(),
            name: self.name.clone(),
            pillar: self.pillar.clone(),
            output: self.output.clone(),
            measurement_type: self.measurement_type.clone(),
            unit: self.unit,
            total_actual: self.quarter.total_actual,
            target: self.quarter.target,
            performance: self.quarter.performance,
            trend: self.quarter.trend,
            trend_label: self.quarter.trend.label(),
            next_target: self.quarter.next_target,
            annual_progress: self.annual_progress,
            health: self.health,
            health_label: self.health.label(),
            sub_indicators: self.quarter.sub_indicator_details.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ProgressReport {
    pub quarter: QuarterId,
    pub rows: Vec<IndicatorProgress>,
    pillars: Vec<(String, String)>,
}

impl ProgressReport {
    /// Evaluates every top-level indicator of the catalog. With `parallel`
    /// the indicators are spread over the rayon pool; row order is the
    /// catalog order either way.
    pub fn build(catalog: &Catalog, entries: &[Entry], quarter: QuarterId, parallel: bool) -> Self {
        warn_on_dangling_references(catalog, entries);

        let numbers = number_indicators(catalog);
        let contexts = catalog.top_level_indicators();
        let evaluate = |context: &IndicatorContext<'_>| {
            IndicatorProgress::evaluate(catalog, context, entries, quarter, &numbers)
        };

        let rows: Vec<IndicatorProgress> = if parallel {
            contexts.par_iter().map(evaluate).collect()
        } else {
            contexts.iter().map(evaluate).collect()
        };

        let pillars = catalog
            .pillars()
            .iter()
            .map(|pillar| (pillar.id.clone(), pillar.name.clone()))
            .collect();

        Self {
            quarter,
            rows,
            pillars,
        }
    }

    pub fn row(&self, indicator_id: &str) -> Option<&IndicatorProgress> {
        self.rows.iter().find(|row| row.indicator_id == indicator_id)
    }

    pub fn summary(&self) -> ProgressReportSummary {
        let indicators = self.rows.iter().map(IndicatorProgress::to_view).collect();

        let trend_counts = TrendStatus::ordered()
            .into_iter()
            .map(|trend| TrendCountEntry {
                trend,
                trend_label: trend.label(),
                count: self
                    .rows
                    .iter()
                    .filter(|row| row.quarter.trend == trend)
                    .count(),
            })
            .collect();

        let health_counts = HealthStatus::ordered()
            .into_iter()
            .map(|health| HealthCountEntry {
                health,
                health_label: health.label(),
                count: self.rows.iter().filter(|row| row.health == health).count(),
            })
            .collect();

        let pillar_performance = self
            .pillars
            .iter()
            .filter_map(|(pillar_id, pillar)| {
                let rows: Vec<&IndicatorProgress> = self
                    .rows
                    .iter()
                    .filter(|row| &row.pillar_id == pillar_id)
                    .collect();
                if rows.is_empty() {
                    return None;
                }
                let count = rows.len() as f64;
                Some(PillarPerformanceEntry {
                    pillar_id: pillar_id.clone(),
                    pillar: pillar.clone(),
                    indicators: rows.len(),
                    average_performance: rows.iter().map(|row| row.quarter.performance).sum::<f64>()
                        / count,
                    average_annual_progress: rows.iter().map(|row| row.annual_progress).sum::<f64>()
                        / count,
                })
            })
            .collect();

        ProgressReportSummary {
            quarter: self.quarter,
            quarter_label: self.quarter.label(),
            indicators,
            trend_counts,
            health_counts,
            pillar_performance,
        }
    }
}

fn warn_on_dangling_references(catalog: &Catalog, entries: &[Entry]) {
    let unknown: HashSet<&str> = entries
        .iter()
        .map(|entry| entry.indicator_id.as_str())
        .filter(|id| catalog.indicator(id).is_none())
        .collect();
    for id in unknown {
        tracing::warn!(indicator = id, "entries reference an indicator missing from the catalog");
    }

    for context in catalog.indicators() {
        for (key, sub_id) in &context.indicator.sub_indicator_ids {
            if catalog.indicator(sub_id).is_none() {
                tracing::warn!(
                    indicator = %context.indicator.id,
                    key = %key,
                    sub_indicator = %sub_id,
                    "sub-indicator not found, skipping"
                );
            }
        }
    }
}
