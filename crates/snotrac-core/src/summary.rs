use crate::fixture::{Condition, Fixture};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Unsafe,
}

impl SafetyLevel {
    /// CSS modifier used by the summary panel.
    pub fn css_class(&self) -> &'static str {
        match self {
            SafetyLevel::Safe => "success",
            SafetyLevel::Caution => "warning",
            SafetyLevel::Unsafe => "danger",
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SafetyLevel::Safe => "Safe",
            SafetyLevel::Caution => "Caution",
            SafetyLevel::Unsafe => "Unsafe",
        };
        f.write_str(label)
    }
}

/// The four headline numbers shown above the analysis panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub active_plows: usize,
    pub clearance_percent: u32,
    pub transit_delay: String,
    pub safety_level: SafetyLevel,
}

impl DashboardSummary {
    pub fn from_fixture(fixture: &Fixture) -> Self {
        let active_plows = fixture.snowplows.iter().filter(|p| p.is_active()).count();

        let total = fixture.road_conditions.len();
        let cleared = fixture
            .road_conditions
            .iter()
            .filter(|r| r.condition == Condition::Cleared)
            .count();
        let clearance_percent = if total == 0 {
            0
        } else {
            ((cleared as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            active_plows,
            clearance_percent,
            transit_delay: fixture.transit_data.bus_delay_text(),
            safety_level: safety_level(fixture.road_conditions.iter().map(|r| r.condition)),
        }
    }
}

/// Impassable beats caution; anything else is safe.
pub fn safety_level<I>(conditions: I) -> SafetyLevel
where
    I: IntoIterator<Item = Condition>,
{
    let mut level = SafetyLevel::Safe;
    for condition in conditions {
        match condition {
            Condition::Impassable => return SafetyLevel::Unsafe,
            Condition::Caution => level = SafetyLevel::Caution,
            Condition::Cleared | Condition::InProgress => {}
        }
    }
    level
}
