use crate::analysis::{AnalysisClient, AnalysisKind, AnalysisOutcome, AnalysisRequest, FallbackReason};
use crate::fixture::{Fixture, FixtureLoader};
use crate::settings::Settings;
use crate::summary::DashboardSummary;
use crate::SnotracError;
use log::{error, info, warn};
use rayon::prelude::*;

/// One populated analysis panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub kind: AnalysisKind,
    pub outcome: AnalysisOutcome,
}

/// Everything a dashboard needs, built once at startup and passed around
/// explicitly. Either half may be missing; analyses then fall back.
#[derive(Debug)]
pub struct DashboardSession {
    fixture: Option<Fixture>,
    client: Option<AnalysisClient>,
}

impl DashboardSession {
    pub fn new(fixture: Option<Fixture>, client: Option<AnalysisClient>) -> Self {
        Self { fixture, client }
    }

    /// Loads the fixture and builds the HTTP client from `settings`.
    /// A fixture that cannot be fetched is logged and left unset.
    pub fn start(settings: &Settings) -> Self {
        let fixture = match FixtureLoader::load(&settings.fixture) {
            Ok(fixture) => Some(fixture),
            Err(e) => {
                error!("Fixture unavailable; analyses will use fallback text — error={}", e);
                None
            }
        };

        let client = match settings.api_key() {
            Some(key) => match AnalysisClient::new(settings.endpoint.as_str(), key) {
                Ok(client) => Some(client),
                Err(e) => {
                    error!("Could not build analysis client — error={}", e);
                    None
                }
            },
            None => {
                warn!("No API key configured; analyses will use fallback text");
                None
            }
        };

        info!(
            "Dashboard session started — fixture_loaded={} client_ready={} endpoint={}",
            fixture.is_some(),
            client.is_some(),
            settings.endpoint
        );
        Self::new(fixture, client)
    }

    pub fn fixture(&self) -> Option<&Fixture> {
        self.fixture.as_ref()
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn summary(&self) -> Option<DashboardSummary> {
        self.fixture.as_ref().map(DashboardSummary::from_fixture)
    }

    /// Endpoint validation runs first, so a blank route is rejected even
    /// when no fixture is loaded.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, SnotracError> {
        request.validate()?;
        Ok(self.dispatch(request))
    }

    pub fn snowplow_status(&self) -> AnalysisOutcome {
        self.dispatch(&AnalysisRequest::SnowplowStatus)
    }

    pub fn safety_insights(&self) -> AnalysisOutcome {
        self.dispatch(&AnalysisRequest::Safety)
    }

    pub fn traffic_prediction(&self) -> AnalysisOutcome {
        self.dispatch(&AnalysisRequest::TrafficPrediction)
    }

    pub fn route_conditions(&self, start: &str, end: &str) -> Result<AnalysisOutcome, SnotracError> {
        self.analyze(&AnalysisRequest::route(start, end)?)
    }

    /// Re-runs one of the fixed analyses. Route panels need their endpoints
    /// again, so `Route` yields `None`.
    pub fn refresh(&self, kind: AnalysisKind) -> Option<AnalysisOutcome> {
        kind.request().map(|request| self.dispatch(&request))
    }

    /// Snowplow, safety and traffic panels, one request at a time.
    pub fn initial_panels(&self) -> Vec<Panel> {
        AnalysisKind::DASHBOARD
            .iter()
            .filter_map(|kind| self.panel(*kind))
            .collect()
    }

    /// Same panels and order as [`Self::initial_panels`], requested concurrently.
    pub fn initial_panels_parallel(&self) -> Vec<Panel> {
        AnalysisKind::DASHBOARD
            .par_iter()
            .filter_map(|kind| self.panel(*kind))
            .collect()
    }

    fn panel(&self, kind: AnalysisKind) -> Option<Panel> {
        self.refresh(kind).map(|outcome| Panel { kind, outcome })
    }

    fn dispatch(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        let kind = request.kind();
        match (&self.fixture, &self.client) {
            (None, _) => AnalysisOutcome::fallback(kind, FallbackReason::FixtureUnavailable),
            (Some(_), None) => AnalysisOutcome::fallback(kind, FallbackReason::Unconfigured),
            (Some(fixture), Some(client)) => client.run_request(fixture, request),
        }
    }
}
