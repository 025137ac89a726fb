use devtrack::progress::{HealthStatus, MonthlyProgress, QuarterProgress};
use devtrack::report::views::ProgressReportSummary;
use serde::Serialize;

/// Everything the `indicator` command prints for one indicator.
#[derive(Debug, Serialize)]
pub(crate) struct IndicatorDetailView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) number: Option<usize>,
    pub(crate) indicator_id: String,
    pub(crate) name: String,
    pub(crate) pillar: String,
    pub(crate) output: String,
    pub(crate) measurement_type: String,
    pub(crate) unit: &'static str,
    pub(crate) annual_target: f64,
    pub(crate) annual_progress: f64,
    pub(crate) quarters: Vec<QuarterDetailView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuarterDetailView {
    #[serde(flatten)]
    pub(crate) progress: QuarterProgress,
    pub(crate) health: HealthStatus,
    pub(crate) months: Vec<MonthlyProgress>,
}

pub(crate) fn render_report(summary: &ProgressReportSummary) {
    println!("Indicator progress, {}", summary.quarter_label);

    if summary.indicators.is_empty() {
        println!("\nNo top-level indicators in catalog");
        return;
    }

    println!("\nIndicators");
    for row in &summary.indicators {
        println!(
            "{:>3}. {} [{}] {} / {} {}: {:.2}% ({}), annual {:.2}%, {}",
            row.number,
            row.name,
            row.measurement_type,
            format_amount(row.total_actual),
            format_amount(row.target),
            row.unit,
            row.performance,
            row.trend_label,
            row.annual_progress,
            row.health_label
        );
        if let Some(next) = row.next_target {
            println!("     next quarter target: {}", format_amount(next));
        }
        for sub in &row.sub_indicators {
            println!(
                "     - {}: {} / {} ({:.2}%)",
                sub.name,
                format_amount(sub.actual),
                format_amount(sub.target),
                sub.progress
            );
        }
    }

    println!("\nTrend");
    for entry in &summary.trend_counts {
        println!("- {}: {}", entry.trend_label, entry.count);
    }

    println!("\nHealth");
    for entry in &summary.health_counts {
        println!("- {}: {}", entry.health_label, entry.count);
    }

    println!("\nPillars");
    for pillar in &summary.pillar_performance {
        println!(
            "- {}: {} indicators, average {:.2}%, annual {:.2}%",
            pillar.pillar,
            pillar.indicators,
            pillar.average_performance,
            pillar.average_annual_progress
        );
    }
}

pub(crate) fn render_indicator(view: &IndicatorDetailView) {
    match view.number {
        Some(number) => println!("{number}. {} ({})", view.name, view.indicator_id),
        None => println!("{} ({}, sub-indicator)", view.name, view.indicator_id),
    }
    println!("{} / {}", view.pillar, view.output);
    println!("Measurement: {}, unit {}", view.measurement_type, view.unit);
    println!(
        "Annual: target {}, progress {:.2}%",
        format_amount(view.annual_target),
        view.annual_progress
    );

    for quarter in &view.quarters {
        let progress = &quarter.progress;
        println!(
            "\n{}: {} / {} = {:.2}% ({}, {})",
            progress.quarter.label(),
            format_amount(progress.total_actual),
            format_amount(progress.target),
            progress.performance,
            progress.trend.label(),
            quarter.health.label()
        );
        match progress.next_target {
            Some(next) => println!("  next quarter target: {}", format_amount(next)),
            None => println!("  next quarter target: none"),
        }

        for month in &quarter.months {
            if month.reported {
                println!(
                    "  - {}: {} ({:.2}%)",
                    month.month,
                    format_amount(month.value),
                    month.progress
                );
            } else {
                println!("  - {}: not reported", month.month);
            }
        }

        for sub in &progress.sub_indicator_details {
            println!(
                "  * {} [{}]: {} / {} ({:.2}%)",
                sub.name,
                sub.key,
                format_amount(sub.actual),
                format_amount(sub.target),
                sub.progress
            );
        }
    }
}

/// Whole numbers print without decimals, everything else with two.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
