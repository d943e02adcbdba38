use snotrac_core::analysis::envelope::extract_text;
use snotrac_core::analysis::{HttpTransport, Transport};
use snotrac_core::{AnalysisClient, AnalysisOutcome, FixtureLoader, SnotracError};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// What the loopback server saw: the request line and the body.
struct Captured {
    request_line: String,
    body: String,
}

/// Serves exactly one canned response on 127.0.0.1 and reports the request.
fn serve_once(status: &'static str, body: String) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0usize;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();

        let _ = tx.send(Captured {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8(request_body).unwrap(),
        });
    });

    (base, rx)
}

fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [ { "content": { "parts": [ { "text": text } ], "role": "model" } } ]
    })
    .to_string()
}

#[test]
fn test_post_json_returns_error_status_and_body() {
    let canned = r#"{"error":{"code":403,"message":"API key not valid"}}"#.to_string();
    let (base, seen) = serve_once("403 Forbidden", canned.clone());
    let url = format!("{}/v1beta/models/gemini-pro:generateContent", base);
    let body = serde_json::json!({ "contents": [ { "parts": [ { "text": "How is Broadway?" } ] } ] });

    let transport = HttpTransport::new().unwrap();
    let response = transport.post_json(&url, "a&b+c", &body).unwrap();

    assert_eq!(response.status, 403);
    assert_eq!(response.body, canned);
    match extract_text(&response) {
        Err(SnotracError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("expected Api error, got {:?}", other),
    }

    let captured = seen.recv().unwrap();
    assert!(captured
        .request_line
        .starts_with("POST /v1beta/models/gemini-pro:generateContent?key=a%26b%2Bc "));
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent, body);
}

#[test]
fn test_client_succeeds_against_live_endpoint() {
    let (base, seen) = serve_once("200 OK", candidate_body("Broadway is passable."));
    let url = format!("{}/v1beta/models/gemini-pro:generateContent", base);
    let fixture = snotrac_core::Fixture::from_json_str(include_str!("../../../data/mock-data.json")).unwrap();

    let client = AnalysisClient::new(url, "test-key").unwrap();
    let outcome = client.snowplow_status(&fixture);

    assert_eq!(outcome, AnalysisOutcome::Succeeded("Broadway is passable.".to_string()));
    let captured = seen.recv().unwrap();
    assert!(captured.request_line.contains("?key=test-key "));
    assert!(captured.body.contains("Plow-NYC-001"));
}

#[test]
fn test_unreachable_endpoint_is_transport_error_without_key() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/generate", port);

    let transport = HttpTransport::new().unwrap();
    match transport.post_json(&url, "secret-key-123", &serde_json::json!({})) {
        Err(SnotracError::Transport(message)) => assert!(!message.contains("secret-key-123")),
        other => panic!("expected Transport error, got {:?}", other),
    }
}

#[test]
fn test_fixture_loads_over_http() {
    let (base, seen) = serve_once("200 OK", include_str!("../../../data/mock-data.json").to_string());

    let fixture = FixtureLoader::load(&format!("{}/data/mock-data.json", base)).unwrap();

    assert_eq!(fixture.snowplows.len(), 4);
    assert_eq!(fixture.incidents.len(), 2);
    assert!(seen.recv().unwrap().request_line.starts_with("GET /data/mock-data.json "));
}

#[test]
fn test_fixture_http_error_status_is_fetch_error() {
    let (base, _seen) = serve_once("404 Not Found", "{}".to_string());
    let url = format!("{}/data/mock-data.json", base);

    match FixtureLoader::load(&url) {
        Err(SnotracError::Fetch { location, reason }) => {
            assert_eq!(location, url);
            assert!(reason.contains("404"));
        }
        other => panic!("expected Fetch error, got {:?}", other),
    }
}
