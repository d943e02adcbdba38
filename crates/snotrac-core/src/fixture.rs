use crate::SnotracError;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

pub const DEFAULT_FIXTURE_PATH: &str = "data/mock-data.json";

/// Static snapshot of storm conditions. Loaded once and never mutated.
///
/// Only the fields the summary reads are typed. Everything else is kept as
/// loaded, in document order, so prompt slices serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
    pub snowplows: Vec<Snowplow>,
    pub road_conditions: Vec<RoadCondition>,
    pub traffic_data: Value,
    pub transit_data: TransitData,
    pub weather_summary: WeatherSummary,
    pub incidents: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snowplow {
    /// Free-form status string; only `"active"` counts towards the summary.
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snowplow {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn id(&self) -> Option<&str> {
        self.extra.get("id").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadCondition {
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoadCondition {
    pub fn road(&self) -> Option<&str> {
        self.extra.get("road").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Cleared,
    InProgress,
    Caution,
    Impassable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitData {
    /// Usually text such as "12-15 min", sometimes a bare number of minutes.
    pub bus_delay: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransitData {
    /// The delay as displayed: strings verbatim, anything else as JSON text.
    pub fn bus_delay_text(&self) -> String {
        match &self.bus_delay {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    /// Degrees Fahrenheit.
    pub temperature: Number,
    /// Miles per hour.
    pub wind_speed: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fixture {
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Reads the fixture document from disk or over HTTP.
pub struct FixtureLoader;

impl FixtureLoader {
    /// Loads from `source`, which is either a filesystem path or an
    /// `http://`/`https://` URL. No caching and no retry.
    pub fn load(source: &str) -> Result<Fixture, SnotracError> {
        info!("Loading fixture — source={}", source);

        let content = if is_remote(source) {
            fetch_remote(source)?
        } else {
            fs::read_to_string(Path::new(source)).map_err(|e| SnotracError::Fetch {
                location: source.to_string(),
                reason: e.to_string(),
            })?
        };

        let fixture = Fixture::from_json_str(&content).map_err(|e| {
            error!("Fixture failed schema validation — source={} error={}", source, e);
            SnotracError::Fetch {
                location: source.to_string(),
                reason: format!("unexpected schema: {}", e),
            }
        })?;

        debug!(
            "Fixture loaded — snowplows={} roads={} incidents={}",
            fixture.snowplows.len(),
            fixture.road_conditions.len(),
            fixture.incidents.len()
        );
        Ok(fixture)
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_remote(url: &str) -> Result<String, SnotracError> {
    let to_fetch_error = |e: reqwest::Error| SnotracError::Fetch {
        location: url.to_string(),
        reason: e.to_string(),
    };

    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(to_fetch_error)?;
    response.text().map_err(to_fetch_error)
}
