//! HTTP session API integration tests
//!
//! Exercises `HttpSessionApi` against a `wiremock` mock server, then drives
//! a full start / send / persona / finalize cycle through `SessionClient`.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chartroom::api::{RespondRequest, SelectPersonaRequest, SessionApi, StartRequest};
use chartroom::error::ChartroomError;
use chartroom::feed::EntryStatus;
use chartroom::mode::{InterviewMode, UiState};
use chartroom::session::{RevealPacing, SessionClient};
use chartroom::setup::SetupPayload;
use chartroom::view::HeadlessView;

mod common;

fn board_start() -> StartRequest {
    StartRequest {
        mode: InterviewMode::BoardInvestors,
        submode: String::new(),
        setup: SetupPayload {
            company_context: "Acme".to_string(),
            ..Default::default()
        },
    }
}

// ---------------------------------------------------------------------------
// Endpoint tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_start_posts_setup_and_decodes_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/start"))
        .and(body_json(json!({
            "mode": "board_investors",
            "submode": "",
            "resume_text": "",
            "company_context": "Acme",
            "projects_text": "",
            "coding_experience_level": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "abc123",
            "mode": "board_investors",
            "selected_boss": "boss_2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let response = api.start(&board_start()).await.expect("start should succeed");

    assert_eq!(response.session_id(), Some("abc123"));
    assert_eq!(response.selected_boss.as_deref(), Some("boss_2"));
}

#[tokio::test]
async fn test_start_error_body_with_400_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/start"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid mode: pitch"})),
        )
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let response = api.start(&board_start()).await.expect("body should decode");

    assert_eq!(response.session_id(), None);
    assert_eq!(response.error.as_deref(), Some("Invalid mode: pitch"));
}

#[tokio::test]
async fn test_non_json_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/message/respond"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let err = api
        .respond(&RespondRequest {
            session_id: "abc123".to_string(),
            message: "hello".to_string(),
            setup: SetupPayload::default(),
        })
        .await
        .expect_err("502 without JSON should fail");

    match err.downcast_ref::<ChartroomError>() {
        Some(ChartroomError::Api(message)) => {
            assert!(message.contains("502"), "unexpected message: {}", message);
            assert!(message.contains("Bad Gateway"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_success_is_serialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/abc123/result"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let err = api.session_result("abc123").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ChartroomError>(),
        Some(ChartroomError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_respond_decodes_replies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/message/respond"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "responses": [
                {"boss_id": "boss_1", "label": "Panel 1", "message": "What is your CAC?"},
                {"boss_id": "boss_2", "label": "Panel 2", "message": ""}
            ]
        })))
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let response = api
        .respond(&RespondRequest {
            session_id: "abc123".to_string(),
            message: "We are growing".to_string(),
            setup: SetupPayload::default(),
        })
        .await
        .unwrap();

    assert!(response.ok);
    assert_eq!(response.responses().len(), 2);
    assert_eq!(response.responses()[0].text(), Some("What is your CAC?"));
    assert_eq!(response.responses()[1].text(), None);
}

#[tokio::test]
async fn test_select_persona_posts_boss_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/abc123/select-boss"))
        .and(body_json(json!({"boss_id": "boss_3"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "selected_boss": "boss_3"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let response = api
        .select_persona(
            "abc123",
            &SelectPersonaRequest {
                boss_id: "boss_3".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(response.ok);
    assert_eq!(response.selected_boss.as_deref(), Some("boss_3"));
}

#[tokio::test]
async fn test_session_result_decodes_summary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/abc123/result"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "abc123",
            "messages_count": 4,
            "has_final": true
        })))
        .mount(&server)
        .await;

    let api = common::api_for(&server.uri());
    let result = api.session_result("abc123").await.unwrap();

    assert_eq!(result.messages_count, 4);
    assert!(result.has_final);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chartroom/api/session/abc123/finalize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api_for(&format!("{}/chartroom/", server.uri()));
    let response = api.finalize("abc123").await.unwrap();

    assert!(response.mock_interview.is_none());
    assert!(response.files.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let api = common::api_for("http://127.0.0.1:9");
    let err = api.start(&board_start()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ChartroomError>(),
        Some(ChartroomError::Http(_))
    ));
}

// ---------------------------------------------------------------------------
// Full session cycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_full_board_session_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s-1",
            "selected_boss": "boss_1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/session/message/respond"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "responses": [
                {"label": "Panel 1", "message": "Margins?"},
                {"label": "Panel 2", "message": "Churn?"},
                {"label": "Panel 3", "message": "Runway?"}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/session/s-1/select-boss"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "selected_boss": "boss_2"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/session/s-1/finalize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mock_interview": {
                "interview_title": "Board Review",
                "scenario": "Series A",
                "turns": [{"speaker": "Panel 1", "message": "Margins?"}],
                "coach_notes": ["Lead with numbers"]
            },
            "files": {"mock_interview": "outputs/mock_interview.json"}
        })))
        .mount(&server)
        .await;

    let client = SessionClient::new(
        Arc::new(common::api_for(&server.uri())),
        RevealPacing::none(),
    );
    let mut state = UiState::new(InterviewMode::BoardInvestors);
    let mut view = HeadlessView::new();

    client.start_session(&mut state, &mut view).await;
    assert_eq!(state.session_id.as_deref(), Some("s-1"));
    assert!(view.controls.chat);
    assert_eq!(view.feed.len(), 1);

    client
        .send_message(&mut state, &mut view, "We grew 20% last quarter")
        .await;
    let texts: Vec<&str> = view.feed.entries()[2..]
        .iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Margins?", "Churn?", "Runway?"]);
    assert!(view.feed.entries()[2..]
        .iter()
        .all(|e| e.status == EntryStatus::Done && !e.pending));

    state.choose_persona("boss_2");
    client.apply_persona(&mut state, &mut view).await;
    assert_eq!(state.persona, "boss_2");
    assert_eq!(view.status, "Panel path applied: boss_2");

    client.finalize_session(&mut state, &mut view).await;
    assert_eq!(
        view.result.as_deref(),
        Some(
            "Interview: Board Review\nScenario: Series A\n\nPanel 1: Margins?\n\nCoach Notes:\n1. Lead with numbers"
        )
    );
    assert_eq!(
        view.status,
        "Backend saved: mock_interview=outputs/mock_interview.json"
    );
    assert!(view.controls.chat);
    assert_eq!(view.feed.pending_count(), 0);
}

#[tokio::test]
async fn test_backend_outage_during_send_marks_replies_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/message/respond"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = SessionClient::new(
        Arc::new(common::api_for(&server.uri())),
        RevealPacing::none(),
    );
    let mut state = UiState::new(InterviewMode::InterviewOneOnOne);
    state.session_id = Some("s-9".to_string());
    let mut view = HeadlessView::new();

    client.send_message(&mut state, &mut view, "Hello coach").await;

    let coach = &view.feed.entries()[1];
    assert_eq!(coach.label, "Coach");
    assert_eq!(coach.status, EntryStatus::Error);
    assert!(coach.text.starts_with("Send failed:"));
    assert!(view.controls.chat);
}

#[tokio::test]
async fn test_off_type_model_output_still_settles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/message/respond"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "responses": {}})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/session/s-4/finalize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mock_interview": {
                "turns": [{"speaker": "Coach", "message": "Why us?"}],
                "coach_notes": [1]
            }
        })))
        .mount(&server)
        .await;

    let client = SessionClient::new(
        Arc::new(common::api_for(&server.uri())),
        RevealPacing::none(),
    );
    let mut state = UiState::new(InterviewMode::InterviewOneOnOne);
    state.session_id = Some("s-4".to_string());
    let mut view = HeadlessView::new();

    client.send_message(&mut state, &mut view, "Hello").await;
    let coach = &view.feed.entries()[1];
    assert_eq!(coach.status, EntryStatus::Done);
    assert_eq!(coach.text, "No response generated.");

    client.finalize_session(&mut state, &mut view).await;
    let finalizing = view.feed.entries().last().unwrap();
    assert_eq!(finalizing.status, EntryStatus::Done);
    assert_eq!(view.result.as_deref(), Some("Coach: Why us?\n\nCoach Notes:\n1. 1"));
}

#[tokio::test]
async fn test_finalize_with_non_list_turns_has_no_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/s-5/finalize"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"mock_interview": {"turns": "none"}})),
        )
        .mount(&server)
        .await;

    let client = SessionClient::new(
        Arc::new(common::api_for(&server.uri())),
        RevealPacing::none(),
    );
    let mut state = UiState::new(InterviewMode::BoardInvestors);
    state.session_id = Some("s-5".to_string());
    let mut view = HeadlessView::new();

    client.finalize_session(&mut state, &mut view).await;

    assert_eq!(view.feed.entries()[0].status, EntryStatus::Done);
    assert_eq!(view.result.as_deref(), Some("No interview output."));
}
