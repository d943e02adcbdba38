pub mod envelope;
pub mod fallback;
pub mod prompt;
pub mod transport;

use crate::fixture::Fixture;
use crate::SnotracError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use transport::{HttpTransport, RawResponse, Transport};

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    SnowplowStatus,
    Safety,
    TrafficPrediction,
    Route,
}

impl AnalysisKind {
    /// Panels populated when the dashboard opens, in display order.
    pub const DASHBOARD: [AnalysisKind; 3] = [
        AnalysisKind::SnowplowStatus,
        AnalysisKind::Safety,
        AnalysisKind::TrafficPrediction,
    ];

    pub fn fallback_text(&self) -> &'static str {
        match self {
            AnalysisKind::SnowplowStatus => fallback::SNOWPLOW_STATUS,
            AnalysisKind::Safety => fallback::SAFETY_INSIGHTS,
            AnalysisKind::TrafficPrediction => fallback::TRAFFIC_PREDICTION,
            AnalysisKind::Route => fallback::ROUTE_CONDITIONS,
        }
    }

    /// The request for this kind. `Route` needs endpoints, so it has none.
    pub fn request(&self) -> Option<AnalysisRequest> {
        match self {
            AnalysisKind::SnowplowStatus => Some(AnalysisRequest::SnowplowStatus),
            AnalysisKind::Safety => Some(AnalysisRequest::Safety),
            AnalysisKind::TrafficPrediction => Some(AnalysisRequest::TrafficPrediction),
            AnalysisKind::Route => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AnalysisKind::SnowplowStatus => "Snowplow Operations",
            AnalysisKind::Safety => "Safety Insights",
            AnalysisKind::TrafficPrediction => "Traffic Prediction",
            AnalysisKind::Route => "Route Analysis",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisKind::SnowplowStatus => "snowplow-status",
            AnalysisKind::Safety => "safety",
            AnalysisKind::TrafficPrediction => "traffic-prediction",
            AnalysisKind::Route => "route",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    SnowplowStatus,
    Safety,
    TrafficPrediction,
    Route { start: String, end: String },
}

impl AnalysisRequest {
    /// Builds a route request with trimmed endpoints, rejecting blank ones.
    pub fn route(start: &str, end: &str) -> Result<Self, SnotracError> {
        let request = AnalysisRequest::Route {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::SnowplowStatus => AnalysisKind::SnowplowStatus,
            AnalysisRequest::Safety => AnalysisKind::Safety,
            AnalysisRequest::TrafficPrediction => AnalysisKind::TrafficPrediction,
            AnalysisRequest::Route { .. } => AnalysisKind::Route,
        }
    }

    pub fn validate(&self) -> Result<(), SnotracError> {
        if let AnalysisRequest::Route { start, end } = self {
            if start.trim().is_empty() {
                return Err(SnotracError::InvalidRequest(
                    "start location is required".to_string(),
                ));
            }
            if end.trim().is_empty() {
                return Err(SnotracError::InvalidRequest(
                    "end location is required".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn prompt(&self, fixture: &Fixture) -> String {
        match self {
            AnalysisRequest::SnowplowStatus => prompt::snowplow_status(fixture),
            AnalysisRequest::Safety => prompt::safety_insights(fixture),
            AnalysisRequest::TrafficPrediction => prompt::traffic_prediction(fixture),
            AnalysisRequest::Route { start, end } => {
                prompt::route_conditions(fixture, start.trim(), end.trim())
            }
        }
    }
}

/// Why a canned paragraph was shown instead of live model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The request was rejected before anything was sent.
    InvalidRequest(String),
    /// The prompt could not be encoded as a request body.
    RequestEncoding(String),
    Transport(String),
    Api { status: u16, message: String },
    MalformedResponse(String),
    /// The endpoint answered well-formed but with an empty string.
    EmptyResponse,
    /// No fixture was loaded for this session.
    FixtureUnavailable,
    /// No API key was configured, so no client exists.
    Unconfigured,
    Settings(String),
    Io(String),
}

impl FallbackReason {
    fn from_error(err: SnotracError) -> Self {
        match err {
            SnotracError::Fetch { .. } => FallbackReason::FixtureUnavailable,
            SnotracError::InvalidRequest(msg) => FallbackReason::InvalidRequest(msg),
            SnotracError::RequestEncoding(msg) => FallbackReason::RequestEncoding(msg),
            SnotracError::Transport(msg) => FallbackReason::Transport(msg),
            SnotracError::Api { status, message } => FallbackReason::Api { status, message },
            SnotracError::MalformedResponse(msg) => FallbackReason::MalformedResponse(msg),
            SnotracError::Settings { path, reason } => {
                FallbackReason::Settings(format!("{}: {}", path.display(), reason))
            }
            SnotracError::Io(e) => FallbackReason::Io(e.to_string()),
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            FallbackReason::RequestEncoding(msg) => write!(f, "request encoding failed: {}", msg),
            FallbackReason::Transport(msg) => write!(f, "transport failure: {}", msg),
            FallbackReason::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            FallbackReason::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
            FallbackReason::EmptyResponse => f.write_str("empty model output"),
            FallbackReason::FixtureUnavailable => f.write_str("fixture unavailable"),
            FallbackReason::Unconfigured => f.write_str("no API key configured"),
            FallbackReason::Settings(msg) => write!(f, "settings error: {}", msg),
            FallbackReason::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

/// Terminal state of one analysis request. Both variants are displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Succeeded(String),
    Fallback { text: String, reason: FallbackReason },
}

impl AnalysisOutcome {
    pub fn fallback(kind: AnalysisKind, reason: FallbackReason) -> Self {
        AnalysisOutcome::Fallback {
            text: kind.fallback_text().to_string(),
            reason,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            AnalysisOutcome::Succeeded(text) => text,
            AnalysisOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            AnalysisOutcome::Succeeded(text) => text,
            AnalysisOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            AnalysisOutcome::Succeeded(_) => None,
            AnalysisOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Client for the remote text-generation endpoint.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
/// Failures never surface as errors: they become [`AnalysisOutcome::Fallback`].
pub struct AnalysisClient {
    endpoint: String,
    api_key: String,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SnotracError> {
        Ok(Self::with_transport(endpoint, api_key, HttpTransport::new()?))
    }

    pub fn with_transport<T>(endpoint: impl Into<String>, api_key: impl Into<String>, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            transport: Box::new(transport),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn snowplow_status(&self, fixture: &Fixture) -> AnalysisOutcome {
        self.run(AnalysisKind::SnowplowStatus, prompt::snowplow_status(fixture))
    }

    pub fn safety_insights(&self, fixture: &Fixture) -> AnalysisOutcome {
        self.run(AnalysisKind::Safety, prompt::safety_insights(fixture))
    }

    pub fn traffic_prediction(&self, fixture: &Fixture) -> AnalysisOutcome {
        self.run(AnalysisKind::TrafficPrediction, prompt::traffic_prediction(fixture))
    }

    /// Fails with `InvalidRequest` before any network call if either endpoint is blank.
    pub fn route_conditions(
        &self,
        fixture: &Fixture,
        start: &str,
        end: &str,
    ) -> Result<AnalysisOutcome, SnotracError> {
        let request = AnalysisRequest::route(start, end)?;
        Ok(self.run(AnalysisKind::Route, request.prompt(fixture)))
    }

    pub fn analyze(
        &self,
        fixture: &Fixture,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, SnotracError> {
        request.validate()?;
        Ok(self.run_request(fixture, request))
    }

    /// Callers must have validated `request`.
    pub(crate) fn run_request(&self, fixture: &Fixture, request: &AnalysisRequest) -> AnalysisOutcome {
        self.run(request.kind(), request.prompt(fixture))
    }

    /// Sends one prompt and returns the raw generated text, which may be empty.
    pub fn generate(&self, prompt: &str) -> Result<String, SnotracError> {
        let body = serde_json::to_value(envelope::GenerateRequest::from_prompt(prompt))
            .map_err(|e| SnotracError::RequestEncoding(e.to_string()))?;
        let response = self.transport.post_json(&self.endpoint, &self.api_key, &body)?;
        envelope::extract_text(&response)
    }

    fn run(&self, kind: AnalysisKind, prompt: String) -> AnalysisOutcome {
        debug!("Requesting analysis — kind={} prompt_chars={}", kind, prompt.len());

        match self.generate(&prompt) {
            Ok(text) if !text.is_empty() => {
                info!("Analysis generated — kind={} result_chars={}", kind, text.len());
                AnalysisOutcome::Succeeded(text)
            }
            Ok(_) => {
                warn!("Model returned empty text; using fallback — kind={}", kind);
                AnalysisOutcome::fallback(kind, FallbackReason::EmptyResponse)
            }
            Err(e) => {
                warn!("Analysis failed; using fallback — kind={} error={}", kind, e);
                AnalysisOutcome::fallback(kind, FallbackReason::from_error(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_trims_and_validates() {
        let request = AnalysisRequest::route("  Times Square ", "East Village").unwrap();
        assert_eq!(
            request,
            AnalysisRequest::Route {
                start: "Times Square".to_string(),
                end: "East Village".to_string(),
            }
        );
        assert!(matches!(
            AnalysisRequest::route("   ", "East Village"),
            Err(SnotracError::InvalidRequest(_))
        ));
        assert!(matches!(
            AnalysisRequest::route("Times Square", ""),
            Err(SnotracError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_fallback_texts_are_distinct() {
        let kinds = [
            AnalysisKind::SnowplowStatus,
            AnalysisKind::Safety,
            AnalysisKind::TrafficPrediction,
            AnalysisKind::Route,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.fallback_text(), b.fallback_text());
            }
        }
    }

    #[test]
    fn test_kind_wire_names() {
        let kind: AnalysisKind = serde_json::from_str(r#""traffic-prediction""#).unwrap();
        assert_eq!(kind, AnalysisKind::TrafficPrediction);
        assert_eq!(AnalysisKind::SnowplowStatus.to_string(), "snowplow-status");
    }

    #[test]
    fn test_error_to_reason() {
        assert_eq!(
            FallbackReason::from_error(SnotracError::Transport("refused".into())),
            FallbackReason::Transport("refused".into())
        );
        assert_eq!(
            FallbackReason::from_error(SnotracError::Api {
                status: 500,
                message: "boom".into()
            }),
            FallbackReason::Api {
                status: 500,
                message: "boom".into()
            }
        );
        assert_eq!(
            FallbackReason::from_error(SnotracError::MalformedResponse("no candidates".into())),
            FallbackReason::MalformedResponse("no candidates".into())
        );
        assert_eq!(
            FallbackReason::from_error(SnotracError::Fetch {
                location: "data/mock-data.json".into(),
                reason: "not found".into()
            }),
            FallbackReason::FixtureUnavailable
        );
    }

    #[test]
    fn test_non_network_errors_keep_their_own_reason() {
        assert_eq!(
            FallbackReason::from_error(SnotracError::InvalidRequest("start location is required".into())),
            FallbackReason::InvalidRequest("start location is required".into())
        );
        assert_eq!(
            FallbackReason::from_error(SnotracError::RequestEncoding("bad body".into())),
            FallbackReason::RequestEncoding("bad body".into())
        );
        assert_eq!(
            FallbackReason::from_error(SnotracError::Settings {
                path: "settings.json".into(),
                reason: "expected value".into()
            }),
            FallbackReason::Settings("settings.json: expected value".into())
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let reason = FallbackReason::from_error(SnotracError::Io(io));
        assert_eq!(reason, FallbackReason::Io("denied".into()));
        assert!(!matches!(reason, FallbackReason::Transport(_)));
        assert_eq!(reason.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_client_debug_redacts_key() {
        struct Never;
        impl Transport for Never {
            fn post_json(
                &self,
                _url: &str,
                _api_key: &str,
                _body: &serde_json::Value,
            ) -> Result<RawResponse, SnotracError> {
                Err(SnotracError::Transport("unreachable".into()))
            }
        }
        let client = AnalysisClient::with_transport(DEFAULT_ENDPOINT, "secret-key", Never);
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
