//! HTML fragments for the dashboard panels, plus a self-contained page.
//!
//! Element ids match the ones the browser dashboard swaps fragments into.

use crate::analysis::{AnalysisKind, AnalysisOutcome, AnalysisRequest};
use crate::session::Panel;
use crate::summary::DashboardSummary;
use html_escape::encode_text;

/// Id of the container element an analysis kind renders into.
pub fn container_id(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::SnowplowStatus => "snowplowAnalysis",
        AnalysisKind::Safety => "safetyAnalysis",
        AnalysisKind::TrafficPrediction => "trafficAnalysis",
        AnalysisKind::Route => "routeAnalysis",
    }
}

/// Shown in a panel while its request is in flight.
pub fn loading_placeholder(request: &AnalysisRequest) -> String {
    let message = match request {
        AnalysisRequest::SnowplowStatus => "Analyzing snowplow operations...".to_string(),
        AnalysisRequest::Safety => "Analyzing safety conditions...".to_string(),
        AnalysisRequest::TrafficPrediction => "Predicting traffic patterns...".to_string(),
        AnalysisRequest::Route { start, end } => format!(
            "Analyzing route: {} → {}",
            encode_text(start.trim()),
            encode_text(end.trim())
        ),
    };
    format!(r#"<div class="loading">{}</div>"#, message)
}

pub fn unavailable_placeholder() -> String {
    r#"<div class="loading">Unable to load data</div>"#.to_string()
}

pub fn missing_route_fragment() -> String {
    r#"<p class="error">Please enter both start and end locations</p>"#.to_string()
}

/// Live and fallback text render identically.
pub fn analysis_fragment(outcome: &AnalysisOutcome) -> String {
    let escaped = encode_text(outcome.text());
    format!("<p>{}</p>", escaped.replace('\n', "<br>\n"))
}

pub fn summary_fragment(summary: &DashboardSummary) -> String {
    format!(
        r#"<div class="summary-grid">
    <div class="summary-item"><span class="summary-label">Active Plows</span><span id="activePlows" class="summary-value">{plows}</span></div>
    <div class="summary-item"><span class="summary-label">Routes Cleared</span><span id="routesCleared" class="summary-value">{cleared}%</span></div>
    <div class="summary-item"><span class="summary-label">Transit Delay</span><span id="transitDelay" class="summary-value">{delay}</span></div>
    <div class="summary-item"><span class="summary-label">Safety Level</span><span id="safetyLevel" class="summary-value {class}">{level}</span></div>
</div>"#,
        plows = summary.active_plows,
        cleared = summary.clearance_percent,
        delay = encode_text(&summary.transit_delay),
        class = summary.safety_level.css_class(),
        level = summary.safety_level,
    )
}

fn panel_section(kind: AnalysisKind, body: &str) -> String {
    format!(
        r#"<section class="analysis-card">
    <h2>{title}</h2>
    <div id="{id}" class="analysis-content">{body}</div>
</section>"#,
        title = kind.title(),
        id = container_id(kind),
        body = body,
    )
}

/// Standalone page with the summary and every populated panel. Panels the
/// caller did not supply show the "unable to load" placeholder.
pub fn dashboard_page(summary: Option<&DashboardSummary>, panels: &[Panel]) -> String {
    let summary_html = summary
        .map(summary_fragment)
        .unwrap_or_else(unavailable_placeholder);

    let mut sections = Vec::new();
    for kind in AnalysisKind::DASHBOARD.iter().chain(std::iter::once(&AnalysisKind::Route)) {
        let body = panels
            .iter()
            .find(|p| p.kind == *kind)
            .map(|p| analysis_fragment(&p.outcome))
            .unwrap_or_else(unavailable_placeholder);
        sections.push(panel_section(*kind, &body));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SNOTRAC - NYC Snow Mobility Dashboard</title>
    <style>{css}</style>
</head>
<body>
    <main class="dashboard">
        <h1>SNOTRAC</h1>
        {summary}
        {sections}
    </main>
</body>
</html>
"#,
        css = INLINE_CSS,
        summary = summary_html,
        sections = sections.join("\n        "),
    )
}

const INLINE_CSS: &str = "body{background:#0f1419;color:#e2e8f0;font-family:sans-serif}\
.dashboard{max-width:960px;margin:0 auto;padding:24px}\
.summary-grid{display:grid;grid-template-columns:repeat(4,1fr);gap:12px}\
.summary-item{background:#1a2847;padding:12px;border-radius:6px}\
.summary-label{display:block;font-size:12px;color:#a0aec0}\
.summary-value{font-size:24px;font-weight:bold}\
.success{color:#68d391}.warning{color:#f6ad55}.danger{color:#fc8181}\
.analysis-card{background:#1a202e;margin-top:16px;padding:16px;border-radius:6px}\
.loading{color:#a0aec0;font-style:italic}.error{color:#fc8181}";
