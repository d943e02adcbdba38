use crate::SnotracError;
use log::debug;

/// Status and body of an HTTP exchange, before any envelope parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One POST to the generation endpoint. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, SnotracError>;
}

/// Blocking `reqwest` transport. No timeout is set here; reqwest's default applies.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, SnotracError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| SnotracError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// The key travels as a percent-encoded `key` query parameter.
    fn build_request(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> reqwest::Result<reqwest::blocking::Request> {
        self.client
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .build()
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, SnotracError> {
        // The request URL carries the key, keep it out of error text.
        let request = self
            .build_request(url, api_key, body)
            .map_err(|e| SnotracError::Transport(e.without_url().to_string()))?;
        let response = self
            .client
            .execute(request)
            .map_err(|e| SnotracError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SnotracError::Transport(e.without_url().to_string()))?;

        debug!("Generation endpoint replied — status={} body_bytes={}", status, body.len());
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_percent_encoded_in_query() {
        let transport = HttpTransport::new().unwrap();
        let body = serde_json::json!({ "contents": [] });

        let request = transport
            .build_request("https://host/v1/models/m:generateContent", "a&b+c d", &body)
            .unwrap();
        assert_eq!(request.url().path(), "/v1/models/m:generateContent");
        assert_eq!(request.url().query(), Some("key=a%26b%2Bc+d"));
        let pairs: Vec<_> = request.url().query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("key".to_string(), "a&b+c d".to_string())]);

        let request = transport
            .build_request("https://host/gen?alt=json", "abc", &body)
            .unwrap();
        assert_eq!(request.url().query(), Some("alt=json&key=abc"));
    }

    #[test]
    fn test_success_range() {
        let response = |status| RawResponse {
            status,
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(500).is_success());
    }
}
