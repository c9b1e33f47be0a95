/// GeminiClient against a local one-shot HTTP server
use serde_json::{Value, json};
use sentiment_scope::{AnalysisError, Analyzer, AnalyzerConfig, GeminiClient, Sentiment};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Raw request as received by the server
struct Captured {
    head: String,
    body: Value,
}

/// Serve exactly one request with the given status and JSON body
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta/models", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let (head, body_start, content_length) = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_string();
                let length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0usize);
                break (head, pos + 4, length);
            }
        };
        while buf.len() < body_start + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let body = serde_json::from_slice(&buf[body_start..body_start + content_length]).unwrap();
        Captured { head, body }
    });

    (base_url, handle)
}

fn candidate(payload: &str) -> String {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": payload }] } }]
    })
    .to_string()
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new(
        AnalyzerConfig::new(Some("test-key".to_string()))
            .with_model("gemini-test")
            .with_base_url(base_url),
    )
}

#[tokio::test]
async fn test_successful_analysis() {
    let payload = r#"{"sentiment":"Positive","score":95,"reasoning":"Strong enthusiasm.","emotions":["Joy","Excitement"],"keywords":["love","product"]}"#;
    let (base_url, server) = serve_once("200 OK", candidate(payload)).await;

    let result = client(&base_url).analyze("I love this product!").await.unwrap();
    assert_eq!(result.sentiment(), Sentiment::Positive);
    assert_eq!(result.score(), 95);
    assert_eq!(result.emotions(), ["Joy", "Excitement"]);
    assert_eq!(result.keywords(), ["love", "product"]);

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /v1beta/models/gemini-test:generateContent "));
    assert!(captured.head.to_lowercase().contains("x-goog-api-key: test-key"));

    let config = &captured.body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["required"].as_array().unwrap().len(), 5);
    let prompt = captured.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"I love this product!\""));
}

#[tokio::test]
async fn test_out_of_range_score_is_malformed() {
    let payload = r#"{"sentiment":"Negative","score":140,"reasoning":"Angry.","emotions":[],"keywords":[]}"#;
    let (base_url, server) = serve_once("200 OK", candidate(payload)).await;

    let err = client(&base_url).analyze("This is awful").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse { .. }), "got {:?}", err);
    server.await.unwrap();
}

#[tokio::test]
async fn test_unknown_sentiment_is_malformed() {
    let payload = r#"{"sentiment":"Mixed","score":50,"reasoning":"Both.","emotions":[],"keywords":[]}"#;
    let (base_url, server) = serve_once("200 OK", candidate(payload)).await;

    let err = client(&base_url).analyze("Good and bad").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn test_success_status_with_foreign_body_is_malformed() {
    let (base_url, server) = serve_once("200 OK", "<html>gateway</html>".to_string()).await;

    let err = client(&base_url).analyze("Hello").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse { .. }), "got {:?}", err);
    server.await.unwrap();
}

#[tokio::test]
async fn test_success_status_with_wrong_envelope_shape_is_malformed() {
    let body = json!({ "candidates": "none" }).to_string();
    let (base_url, server) = serve_once("200 OK", body).await;

    let err = client(&base_url).analyze("Hello").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse { .. }), "got {:?}", err);
    server.await.unwrap();
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let (base_url, server) = serve_once("200 OK", json!({ "candidates": [] }).to_string()).await;

    let err = client(&base_url).analyze("Hello").await.unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse));
    server.await.unwrap();
}

#[tokio::test]
async fn test_api_error_envelope() {
    let body = json!({
        "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" }
    })
    .to_string();
    let (base_url, server) = serve_once("403 Forbidden", body).await;

    let err = client(&base_url).analyze("Hello").await.unwrap_err();
    match err {
        AnalysisError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("PERMISSION_DENIED"));
            assert!(message.contains("API key not valid."));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/models", addr)).analyze("Hello").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
}
