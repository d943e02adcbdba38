//! Prompt templates. Each one embeds only the fixture slices its analysis needs.

use crate::fixture::Fixture;
use serde::Serialize;
use serde_json::Number;

/// Two-space indented JSON, matching what the model was tuned against.
fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

pub fn snowplow_status(fixture: &Fixture) -> String {
    format!(
        "You are SNOTRAC, a real-time snow mobility intelligence assistant for NYC. \
Analyze this snowplow and road condition data and provide a brief, actionable analysis for commuters.

DATA:
Active Snowplows: {plows}
Road Conditions: {roads}
Weather: {weather}

Provide:
1. Current snow removal status (1-2 sentences)
2. Most/Least passable corridors
3. Key recommendations for commuters
Keep response under 150 words, practical and direct.",
        plows = pretty(&fixture.snowplows),
        roads = pretty(&fixture.road_conditions),
        weather = pretty(&fixture.weather_summary),
    )
}

pub fn route_conditions(fixture: &Fixture, start: &str, end: &str) -> String {
    format!(
        "You are SNOTRAC, a real-time snow mobility assistant. \
Analyze route conditions from \"{start}\" to \"{end}\" during this snowstorm.

DATA:
Road Conditions: {roads}
Traffic: {traffic}
Transit: {transit}
Weather: {weather}

Provide:
1. Route Safety Assessment (Low/Medium/High risk)
2. Best travel mode recommendation (driving/transit/wait)
3. Specific travel tips for this route
4. Estimated delay impact
Keep response under 120 words, concise and actionable.",
        roads = pretty(&fixture.road_conditions),
        traffic = pretty(&fixture.traffic_data),
        transit = pretty(&fixture.transit_data),
        weather = pretty(&fixture.weather_summary),
    )
}

pub fn traffic_prediction(fixture: &Fixture) -> String {
    format!(
        "You are SNOTRAC. Based on this live snowstorm data, predict traffic patterns for the next 30-60 minutes.

DATA:
Current Traffic: {traffic}
Snowplows: {plows}
Weather Forecast: {weather}

Provide:
1. Next 30 minutes prediction (worsening/improving/stable)
2. Routes likely to become congested
3. Routes likely to improve
4. Overall recommendation
Keep response under 130 words.",
        traffic = pretty(&fixture.traffic_data),
        plows = pretty(&fixture.snowplows),
        weather = pretty(&fixture.weather_summary),
    )
}

#[derive(Serialize)]
struct TempAndWind {
    temp: Number,
    wind: Number,
}

pub fn safety_insights(fixture: &Fixture) -> String {
    let temp_and_wind = TempAndWind {
        temp: fixture.weather_summary.temperature.clone(),
        wind: fixture.weather_summary.wind_speed.clone(),
    };

    format!(
        "You are SNOTRAC, a safety-focused snow mobility AI. \
Assess current conditions and provide safety recommendations.

DATA:
Road Conditions: {roads}
Incidents: {incidents}
Weather: {weather}
Temperature & Wind: {temp_and_wind}

Provide:
1. Overall Safety Level (Safe/Caution/Unsafe)
2. Top 3 Safety Risks
3. High-Risk Areas to Avoid
4. Safety Recommendations
Keep response under 120 words, practical and clear.",
        roads = pretty(&fixture.road_conditions),
        incidents = pretty(&fixture.incidents),
        weather = pretty(&fixture.weather_summary),
        temp_and_wind = pretty(&temp_and_wind),
    )
}
