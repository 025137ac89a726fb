use super::domain::MeasurementType;

/// Progress of `achieved` against `target` as a percentage in `[0, 100]`.
///
/// A missing target (`<= 0`) always yields 0. Decreasing indicators invert
/// the ratio, and no recorded achievement against an existing target counts
/// as fully met.
pub fn compute_progress(measurement: &MeasurementType, achieved: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }

    let raw = match measurement {
        MeasurementType::Decreasing if achieved > 0.0 => (target / achieved) * 100.0,
        MeasurementType::Decreasing => 100.0,
        _ => (achieved / target) * 100.0,
    };

    clamp_percent(raw)
}

/// Sub-indicator variant of [`compute_progress`]: achievement against a zero
/// target counts as 100 instead of 0.
pub fn compute_sub_progress(measurement: &MeasurementType, achieved: f64, target: f64) -> f64 {
    if target <= 0.0 && achieved > 0.0 {
        return 100.0;
    }
    compute_progress(measurement, achieved, target).min(100.0)
}

/// Bounds a percentage to `[0, 100]`. An overflowing ratio saturates at 100;
/// only NaN degrades to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ratio_is_capped_at_hundred() {
        let kind = MeasurementType::Cumulative;
        assert_eq!(compute_progress(&kind, 50.0, 200.0), 25.0);
        assert_eq!(compute_progress(&kind, 250.0, 200.0), 100.0);
        assert_eq!(compute_progress(&kind, 1e12, 1.0), 100.0);
    }

    #[test]
    fn zero_target_never_divides() {
        let kind = MeasurementType::Cumulative;
        assert_eq!(compute_progress(&kind, 0.0, 0.0), 0.0);
        assert_eq!(compute_progress(&kind, 10.0, 0.0), 0.0);
        assert_eq!(compute_progress(&MeasurementType::Decreasing, 0.0, 0.0), 0.0);
    }

    #[test]
    fn sub_level_zero_target_with_achievement_is_met() {
        let kind = MeasurementType::Cumulative;
        assert_eq!(compute_sub_progress(&kind, 10.0, 0.0), 100.0);
        assert_eq!(compute_sub_progress(&kind, 0.0, 0.0), 0.0);
        assert_eq!(compute_sub_progress(&kind, 30.0, 60.0), 50.0);
    }

    #[test]
    fn decreasing_inverts_ratio() {
        let kind = MeasurementType::Decreasing;
        assert_eq!(compute_progress(&kind, 10.0, 20.0), 100.0);
        assert_eq!(compute_progress(&kind, 40.0, 20.0), 50.0);
        assert_eq!(compute_progress(&kind, 0.0, 20.0), 100.0);
    }

    #[test]
    fn nan_degrades_to_zero_and_infinity_saturates() {
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(f64::INFINITY), 100.0);
        assert_eq!(clamp_percent(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_percent(-5.0), 0.0);
    }

    #[test]
    fn overflowing_ratios_are_fully_met() {
        assert_eq!(
            compute_progress(&MeasurementType::Cumulative, 1e308, 1e-10),
            100.0
        );
        assert_eq!(
            compute_progress(&MeasurementType::Decreasing, 1e-320, 20.0),
            100.0
        );
    }
}
