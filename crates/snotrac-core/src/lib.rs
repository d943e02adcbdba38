// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod analysis;
pub mod fixture;
pub mod render;
pub mod session;
pub mod settings;
pub mod summary;

use std::path::PathBuf;
use thiserror::Error;

pub use analysis::{AnalysisClient, AnalysisKind, AnalysisOutcome, AnalysisRequest, FallbackReason};
pub use fixture::{Fixture, FixtureLoader};
pub use session::DashboardSession;
pub use settings::Settings;
pub use summary::{DashboardSummary, SafetyLevel};

#[derive(Error, Debug)]
pub enum SnotracError {
    #[error("Failed to fetch fixture from {location}: {reason}")]
    Fetch { location: String, reason: String },
    #[error("Invalid analysis request: {0}")]
    InvalidRequest(String),
    #[error("Failed to encode request: {0}")]
    RequestEncoding(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid settings file {path}: {reason}")]
    Settings { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-user configuration directory (`settings.json` lives here).
/// Falls back to `./.snotrac` when the platform exposes no home directory.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "snotrac", "SNOTRAC")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".snotrac"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SnotracError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 403): API key not valid");

        let err = SnotracError::Fetch {
            location: "data/mock-data.json".to_string(),
            reason: "not found".to_string(),
        };
        assert!(err.to_string().contains("data/mock-data.json"));
    }
}
