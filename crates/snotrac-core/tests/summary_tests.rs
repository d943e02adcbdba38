use snotrac_core::{DashboardSummary, Fixture, SafetyLevel};

/// Minimal fixture with the given road conditions and plow statuses.
fn fixture_with(conditions: &[&str], plow_statuses: &[&str]) -> Fixture {
    let roads: Vec<_> = conditions
        .iter()
        .enumerate()
        .map(|(i, c)| serde_json::json!({ "road": format!("Road {}", i), "condition": c, "snowDepth": 1.0 }))
        .collect();
    let plows: Vec<_> = plow_statuses
        .iter()
        .enumerate()
        .map(|(i, s)| {
            serde_json::json!({
                "id": format!("Plow-{}", i),
                "status": s,
                "position": { "lat": 40.7, "lng": -73.9 },
                "route": "Broadway"
            })
        })
        .collect();

    let doc = serde_json::json!({
        "snowplows": plows,
        "roadConditions": roads,
        "trafficData": { "congestionLevel": "light", "averageSpeedMph": 25.0 },
        "transitData": { "busDelay": "5 min" },
        "weatherSummary": { "temperature": 30, "windSpeed": 5, "forecast": "Flurries" },
        "incidents": []
    });
    serde_json::from_value(doc).expect("valid fixture")
}

#[test]
fn test_impassable_beats_caution() {
    let fixture = fixture_with(&["cleared", "cleared", "impassable", "caution"], &["active"]);
    let summary = DashboardSummary::from_fixture(&fixture);

    assert_eq!(summary.clearance_percent, 50);
    assert_eq!(summary.safety_level, SafetyLevel::Unsafe);
    assert_eq!(summary.safety_level.to_string(), "Unsafe");
}

#[test]
fn test_no_hazards_is_safe() {
    let fixture = fixture_with(&["cleared", "in-progress", "cleared"], &[]);
    let summary = DashboardSummary::from_fixture(&fixture);

    assert_eq!(summary.safety_level, SafetyLevel::Safe);
    assert_eq!(summary.clearance_percent, 67);
    assert_eq!(summary.active_plows, 0);
}

#[test]
fn test_caution_without_impassable() {
    let fixture = fixture_with(&["caution", "in-progress"], &[]);
    let summary = DashboardSummary::from_fixture(&fixture);

    assert_eq!(summary.safety_level, SafetyLevel::Caution);
    assert_eq!(summary.clearance_percent, 0);
}

#[test]
fn test_counts_only_active_plows() {
    let fixture = fixture_with(&["cleared"], &["active", "idle", "active", "refueling"]);
    let summary = DashboardSummary::from_fixture(&fixture);

    assert_eq!(summary.active_plows, 2);
    assert_eq!(summary.transit_delay, "5 min");
    assert_eq!(summary.clearance_percent, 100);
}

#[test]
fn test_empty_road_list() {
    let fixture = fixture_with(&[], &[]);
    let summary = DashboardSummary::from_fixture(&fixture);

    assert_eq!(summary.clearance_percent, 0);
    assert_eq!(summary.safety_level, SafetyLevel::Safe);
}

#[test]
fn test_summary_is_pure() {
    let fixture = fixture_with(&["cleared", "caution", "cleared"], &["active"]);
    assert_eq!(
        DashboardSummary::from_fixture(&fixture),
        DashboardSummary::from_fixture(&fixture)
    );
}

#[test]
fn test_bundled_fixture_summary() {
    let fixture = Fixture::from_json_str(include_str!("../../../data/mock-data.json")).unwrap();
    let summary = DashboardSummary::from_fixture(&fixture);

    assert_eq!(summary.active_plows, 3);
    assert_eq!(summary.clearance_percent, 40);
    assert_eq!(summary.transit_delay, "12-15 min");
    assert_eq!(summary.safety_level, SafetyLevel::Unsafe);
}
