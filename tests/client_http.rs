//! HTTP boundary tests against a fake generateContent endpoint.

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use exporizz::api::{AiService, GeminiClient};
use exporizz::error::ApiError;
use exporizz::pages::dashboard::DashboardController;
use exporizz::pages::ViewState;
use exporizz::types::Importer;

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn service_for(server: &MockServer) -> AiService {
    AiService::gemini(GeminiClient::new(
        server.uri(),
        "test-key".to_string(),
        "gemini-2.5-flash".to_string(),
    ))
}

/// A successful model response whose single part carries `payload` as text.
fn text_response(payload: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": payload } ] } }
        ]
    }))
}

#[tokio::test]
async fn hs_code_request_carries_schema_and_parses_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(text_response(
            r#"[{"code":"0902.30.00","description":"Black tea, packaged.","dutyUSA":"0%","dutyEU":"0%","restrictions":"None"}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let suggestions = service.hs_code_suggestions("loose leaf tea").await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].code, "0902.30.00");
}

#[tokio::test]
async fn surrounding_whitespace_in_model_text_is_trimmed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response(
            "\n  {\"low\": 900, \"high\": 1100, \"currency\": \"EUR\"}  \n",
        ))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let estimate = service
        .logistics_cost("Coffee Beans", "Mumbai, India", "Hamburg, Germany", 250)
        .await
        .unwrap();
    assert_eq!(estimate.currency, "EUR");
}

#[tokio::test]
async fn malformed_payload_is_a_typed_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response("this is not json"))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service.dashboard_data("Coffee Beans").await.unwrap_err();
    assert_matches!(err, ApiError::MalformedPayload { .. });
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service.price_insights("Coffee Beans", "USA").await.unwrap_err();
    assert_matches!(err, ApiError::Status { status: 503, ref message } if message.contains("overloaded"));
}

#[tokio::test]
async fn empty_candidate_list_is_a_typed_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service.margin_analysis("Coffee Beans", 20.0, "USA").await.unwrap_err();
    assert_matches!(err, ApiError::EmptyResponse);
}

#[tokio::test]
async fn packaging_request_inlines_the_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "contents": [
                { "parts": [ { "inlineData": { "mimeType": "image/png", "data": "QUJD" } } ] }
            ]
        })))
        .respond_with(text_response("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let issues = service.analyze_packaging("QUJD", "image/png").await.unwrap();
    assert!(issues.is_empty());
}

#[tokio::test]
async fn assistant_request_replays_history_with_roles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "contents": [
                { "role": "user", "parts": [ { "text": "How do I export tea?" } ] },
                { "role": "model", "parts": [ { "text": "Start with an HS code." } ] },
                { "role": "user", "parts": [ { "text": "Which code fits green tea?" } ] }
            ]
        })))
        .respond_with(text_response("Try 0902.10."))
        .expect(1)
        .mount(&server)
        .await;

    use exporizz::chat::MessageType;
    let history = vec![
        (MessageType::User, "How do I export tea?".to_string()),
        (MessageType::Assistant, "Start with an HS code.".to_string()),
    ];

    let service = service_for(&server);
    let reply = service
        .assistant_reply("Which code fits green tea?", &history)
        .await
        .unwrap();
    assert_eq!(reply, "Try 0902.10.");
}

/// Opening a lead's detail view issues exactly one request; closing the view
/// clears the held result.
#[tokio::test]
async fn importer_detail_view_issues_one_request_per_open() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(text_response(
            r#"{"name":"EuroTrade GmbH","country":"Germany","bio":"Importer.","keyContact":"Helga Schmidt","email":"h.schmidt@eurotrade.de","estimatedImportVolume":"30 containers/year"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut controller = DashboardController::new();
    let importer = Importer {
        id: 2,
        name: "EuroTrade GmbH".to_string(),
        country: "Germany".to_string(),
        product: "Coffee Beans".to_string(),
    };

    controller.open_importer(&service, importer).await;
    let details = controller.importer_details.as_loaded().unwrap();
    assert_eq!(details.key_contact, "Helga Schmidt");

    controller.close_importer();
    assert_eq!(controller.importer_details, ViewState::Idle);
    assert!(controller.selected_importer.is_none());
    // MockServer verifies the expect(1) on drop.
}

#[tokio::test]
async fn transport_failure_is_rendered_as_a_user_facing_string() {
    // Unroutable port: connection refused.
    let client = GeminiClient::new(
        "http://127.0.0.1:1".to_string(),
        "test-key".to_string(),
        "gemini-2.5-flash".to_string(),
    );
    let service = AiService::gemini(client);

    let mut controller = DashboardController::new();
    controller.load(&service, "Coffee Beans").await;
    assert_eq!(
        controller.state.failure(),
        Some(exporizz::pages::dashboard::FETCH_FAILED)
    );
}
