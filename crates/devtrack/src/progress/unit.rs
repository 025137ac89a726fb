use super::domain::{Indicator, MeasurementType};

const CURRENCY_HINTS: &[&str] = &[
    "rwf", "frw", "francs", "revenue", "income", "budget", "funds", "loan", "sales", "value of",
];
const PERCENT_HINTS: &[&str] = &["%", "percent", "proportion", " rate"];
const TONNE_HINTS: &[&str] = &["tons", "tonnes", "(mt)", "metric ton"];
const HECTARE_HINTS: &[&str] = &["hectare", "(ha)", " ha "];
const KILOGRAM_HINTS: &[&str] = &["(kg)", " kg", "kilogram"];

/// Display unit guessed from the measurement type and the indicator name.
pub fn indicator_unit(indicator: &Indicator) -> &'static str {
    if indicator.measurement_type == MeasurementType::Percentage {
        return "%";
    }

    let name = format!(" {} ", indicator.name.to_ascii_lowercase());
    let mentions = |hints: &[&str]| hints.iter().any(|hint| name.contains(hint));

    if mentions(PERCENT_HINTS) {
        "%"
    } else if mentions(CURRENCY_HINTS) {
        "RWF"
    } else if mentions(TONNE_HINTS) {
        "Tons"
    } else if mentions(HECTARE_HINTS) {
        "Ha"
    } else if mentions(KILOGRAM_HINTS) {
        "Kg"
    } else {
        "Count"
    }
}
