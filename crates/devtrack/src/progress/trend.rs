use serde::{Deserialize, Serialize};

/// Status shown next to quarterly performance in progress views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendStatus {
    OnTrack,
    Improving,
    NeedsAttention,
}

impl TrendStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::OnTrack, Self::Improving, Self::NeedsAttention]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Improving => "Improving",
            Self::NeedsAttention => "Needs Attention",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::Improving => "improving",
            Self::NeedsAttention => "needs-attention",
        }
    }
}

/// Rating used by the summary and export views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Good, Self::Warning, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// 90 / 50 thresholds.
pub fn classify_trend(performance: f64) -> TrendStatus {
    if performance >= 90.0 {
        TrendStatus::OnTrack
    } else if performance >= 50.0 {
        TrendStatus::Improving
    } else {
        TrendStatus::NeedsAttention
    }
}

/// 90 / 70 thresholds. Kept apart from [`classify_trend`]; the two views
/// disagree on where "warning" starts.
pub fn classify_health(performance: f64) -> HealthStatus {
    if performance >= 90.0 {
        HealthStatus::Good
    } else if performance >= 70.0 {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}
