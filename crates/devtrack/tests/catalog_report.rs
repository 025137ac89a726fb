use devtrack::catalog::{number_indicators, Catalog};
use devtrack::import::{CatalogLoader, EntryImporter};
use devtrack::progress::{
    calculate_annual_progress, monthly_breakdown, Entry, HealthStatus, QuarterId, TrendStatus,
};
use devtrack::report::ProgressReport;

fn sample() -> (Catalog, Vec<Entry>) {
    let catalog = CatalogLoader::from_reader(&include_bytes!("../sample_catalog.json")[..])
        .expect("sample catalog loads");
    let entries = EntryImporter::from_reader(&include_bytes!("../sample_entries.csv")[..])
        .expect("sample entries import");
    (catalog, entries)
}

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn sample_catalog_numbers_top_level_indicators() {
    let (catalog, entries) = sample();
    assert_eq!(catalog.len(), 10);
    assert_eq!(entries.len(), 12);

    let numbers = number_indicators(&catalog);
    assert_eq!(numbers.len(), 6);
    assert_eq!(numbers.get("ind-beneficiaries"), Some(&1));
    assert_eq!(numbers.get("ind-crops"), Some(&2));
    assert_eq!(numbers.get("ind-disease-control"), Some(&6));
    assert_eq!(numbers.get("ind-maize"), None);
}

#[test]
fn fourth_quarter_report_matches_cumulative_scenario() {
    let (catalog, entries) = sample();
    let report = ProgressReport::build(&catalog, &entries, QuarterId::Q4, true);

    let beneficiaries = report.row("ind-beneficiaries").expect("row present");
    assert_eq!(beneficiaries.quarter.total_actual, 10713.0);
    assert_eq!(beneficiaries.quarter.target, 18713.0);
    approx(beneficiaries.quarter.performance, 57.25);
    assert_eq!(beneficiaries.quarter.trend, TrendStatus::Improving);
    assert_eq!(beneficiaries.health, HealthStatus::Critical);
    assert_eq!(beneficiaries.unit, "Count");

    let crops = report.row("ind-crops").expect("row present");
    assert_eq!(crops.quarter.performance, 0.0);
    assert_eq!(crops.quarter.target, 3000.0);
}

#[test]
fn first_quarter_report_covers_every_measurement_type() {
    let (catalog, entries) = sample();
    let report = ProgressReport::build(&catalog, &entries, QuarterId::Q1, false);

    assert_eq!(report.rows.len(), 6);
    assert!(report.row("ind-maize").is_none());

    let crops = report.row("ind-crops").expect("crops row");
    let details = &crops.quarter.sub_indicator_details;
    assert_eq!(details.len(), 3);
    assert_eq!(details[0].key, "chicken");
    assert_eq!(details[0].actual, 25.0);
    assert_eq!(details[0].progress, 100.0);
    assert_eq!(details[1].key, "maize");
    assert_eq!(details[1].actual, 800.0);
    assert_eq!(details[1].progress, 80.0);
    assert_eq!(details[2].actual, 200.0);
    assert_eq!(details[2].progress, 40.0);
    approx(crops.quarter.performance, 73.33);
    assert_eq!(crops.quarter.total_actual, 1025.0);
    assert_eq!(crops.quarter.target, 1500.0);
    assert_eq!(crops.quarter.next_target, Some(3000.0));

    let revenue = report.row("ind-revenue").expect("revenue row");
    assert_eq!(revenue.unit, "RWF");
    assert_eq!(revenue.quarter.performance, 50.0);
    assert_eq!(revenue.annual_progress, 12.5);

    let vaccination = report.row("ind-vaccination").expect("vaccination row");
    assert_eq!(vaccination.unit, "%");
    assert_eq!(vaccination.quarter.total_actual, 50.0);
    assert_eq!(vaccination.quarter.performance, 100.0);
    assert_eq!(vaccination.quarter.next_target, Some(80.0));

    let outbreaks = report.row("ind-outbreaks").expect("outbreaks row");
    assert_eq!(outbreaks.quarter.total_actual, 40.0);
    assert_eq!(outbreaks.quarter.performance, 50.0);

    let disease = report.row("ind-disease-control").expect("disease row");
    assert_eq!(disease.quarter.sub_indicator_details.len(), 1);
    assert_eq!(disease.quarter.performance, 60.0);
    approx(disease.annual_progress, 15.0);

    let summary = report.summary();
    let counts: Vec<usize> = summary.trend_counts.iter().map(|entry| entry.count).collect();
    assert_eq!(counts, vec![1, 4, 1]);
    assert_eq!(summary.pillar_performance.len(), 2);
    assert_eq!(summary.pillar_performance[0].indicators, 3);
}

#[test]
fn annual_percentage_progress_averages_whole_year() {
    let (catalog, entries) = sample();
    let vaccination = catalog.get("ind-vaccination").expect("indicator").indicator;
    let annual = calculate_annual_progress(&catalog, vaccination, &entries);
    approx(annual, (172.0 / 3.0) / 90.0 * 100.0);
}

#[test]
fn monthly_breakdown_reports_each_month_of_quarter() {
    let (catalog, entries) = sample();
    let beneficiaries = catalog.get("ind-beneficiaries").expect("indicator").indicator;
    let months = monthly_breakdown(&catalog, beneficiaries, &entries, QuarterId::Q4);

    let values: Vec<f64> = months.iter().map(|month| month.value).collect();
    assert_eq!(values, vec![5000.0, 8000.0, 10713.0]);
    assert!(months.iter().all(|month| month.reported));
    approx(months[0].progress, 26.72);
    approx(months[2].progress, 57.25);
}

#[test]
fn summary_serializes_to_json() {
    let (catalog, entries) = sample();
    let summary = ProgressReport::build(&catalog, &entries, QuarterId::Q1, true).summary();
    let json = serde_json::to_value(&summary).expect("summary serializes");

    assert_eq!(json["quarter"], "q1");
    assert_eq!(json["indicators"][0]["trend"], "needs-attention");
    assert_eq!(json["indicators"][3]["health"], "good");
}
