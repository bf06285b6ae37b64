use outreach_engine::{
    CommentGenerator, GeminiCommentGenerator, GenAiClient, GenAiError, GenAiSettings,
    GenerationError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn settings(server: &MockServer, api_key: Option<&str>) -> GenAiSettings {
    GenAiSettings {
        api_key: api_key.map(str::to_string),
        model: "test-model".to_string(),
        base_url: server.uri(),
        ..GenAiSettings::default()
    }
}

fn generator(server: &MockServer) -> GeminiCommentGenerator {
    let client = GenAiClient::new(settings(server, Some("test-key"))).expect("client");
    GeminiCommentGenerator::new(client)
}

#[tokio::test]
async fn generator_returns_trimmed_text() {
    outreach_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "  Loved this post! Our " },
                        { "text": "<a href=\"https://shop.example.com\">garden tools</a> page has more.\n" }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let comment = generator(&server)
        .generate("garden tools", "https://shop.example.com", Some("warm"))
        .await
        .expect("comment");

    assert_eq!(
        comment,
        "Loved this post! Our <a href=\"https://shop.example.com\">garden tools</a> page has more."
    );
}

#[tokio::test]
async fn generation_request_does_not_enable_search() {
    outreach_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        })))
        .mount(&server)
        .await;

    generator(&server)
        .generate("k", "https://x.example.com", None)
        .await
        .expect("comment");

    let requests = server.received_requests().await.expect("recorded");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert!(body.get("tools").is_none());
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    assert!(prompt.contains("https://x.example.com"));
}

#[tokio::test]
async fn empty_text_is_an_error() {
    outreach_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate("k", "https://x.example.com", None)
        .await
        .unwrap_err();
    assert_eq!(err, GenerationError::Empty);
}

#[tokio::test]
async fn service_errors_surface_status() {
    outreach_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate("k", "https://x.example.com", None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GenerationError::Failed(GenAiError::HttpStatus {
            status: 503,
            message: "overloaded".to_string(),
        })
    );
    assert_eq!(err.to_string(), "http status 503: overloaded");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    outreach_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate("k", "https://x.example.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Failed(GenAiError::Decode(_))));
}

#[tokio::test]
async fn missing_api_key_fails_without_request() {
    outreach_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GenAiClient::new(settings(&server, None)).expect("client");
    let err = GeminiCommentGenerator::new(client)
        .generate("k", "https://x.example.com", None)
        .await
        .unwrap_err();
    assert_eq!(err, GenerationError::Failed(GenAiError::MissingApiKey));
}
