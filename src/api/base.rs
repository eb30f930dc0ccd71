//! Session API trait and wire types for Chartroom
//!
//! This module defines the [`SessionApi`] trait that every backend
//! implementation provides, along with the request and response bodies of
//! the `/api/session/...` endpoints. Response fields the backend may omit
//! are optional or defaulted so that a partial body still decodes.
//!
//! Reply slots and the mock interview carry model-generated JSON that the
//! backend passes through untouched, so those fields decode leniently: a
//! list field holding anything but an array reads as absent, and text fields
//! holding numbers or booleans read as their JSON text.

use crate::error::Result;
use crate::mode::InterviewMode;
use crate::setup::SetupPayload;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /api/session/start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartRequest {
    pub mode: InterviewMode,
    pub submode: String,
    #[serde(flatten)]
    pub setup: SetupPayload,
}

/// Response of `POST /api/session/start`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub selected_boss: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StartResponse {
    /// Session id, treating an empty string as absent
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Body of `POST /api/session/message/respond`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespondRequest {
    pub session_id: String,
    pub message: String,
    #[serde(flatten)]
    pub setup: SetupPayload,
}

/// One AI reply slot in a respond response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PanelResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub boss_id: Option<String>,
}

impl PanelResponse {
    /// Reply text, treating an empty string as absent
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Response of `POST /api/session/message/respond`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RespondResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub responses: Option<Vec<PanelResponse>>,
}

impl RespondResponse {
    /// Reply slots, empty when the backend sent none
    pub fn responses(&self) -> &[PanelResponse] {
        self.responses.as_deref().unwrap_or_default()
    }
}

/// A single speaker turn of a mock interview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTurn {
    #[serde(default, deserialize_with = "lenient_text")]
    pub speaker: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

/// Structured mock interview produced on finalize
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockInterview {
    #[serde(default, deserialize_with = "lenient_text")]
    pub interview_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub scenario: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub turns: Option<Vec<InterviewTurn>>,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub coach_notes: Option<Vec<String>>,
}

/// Response of `POST /api/session/{id}/finalize`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FinalizeResponse {
    #[serde(default)]
    pub error: Option<String>,
    /// `None` unless the backend sent a JSON object
    #[serde(default, deserialize_with = "lenient_object")]
    pub mock_interview: Option<MockInterview>,
    /// Output files the backend wrote, keyed by report name
    #[serde(default, deserialize_with = "lenient_files")]
    pub files: BTreeMap<String, String>,
}

/// Body of `POST /api/session/{id}/select-boss`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectPersonaRequest {
    pub boss_id: String,
}

/// Response of `POST /api/session/{id}/select-boss`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SelectPersonaResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub selected_boss: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /api/session/{id}/result`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionResultResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub messages_count: usize,
    #[serde(default)]
    pub has_final: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// JSON text of a value, with strings unquoted
fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_text(other)),
    })
}

/// Array items that fail to decode fall back to their default
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}

fn lenient_notes<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(value_text).collect()),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn lenient_files<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(name, path)| (name, value_text(path)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Session backend trait
///
/// Implementations perform one request per call and never retry. Backend
/// errors reported inside a decodable body are returned as `Ok` responses
/// carrying `error`/`ok: false`; only transport and decoding failures are
/// `Err`.
///
/// # Examples
///
/// ```no_run
/// use chartroom::api::{
///     FinalizeResponse, RespondRequest, RespondResponse, SelectPersonaRequest,
///     SelectPersonaResponse, SessionApi, SessionResultResponse, StartRequest, StartResponse,
/// };
/// use chartroom::error::Result;
/// use async_trait::async_trait;
///
/// struct OfflineApi;
///
/// #[async_trait]
/// impl SessionApi for OfflineApi {
///     async fn start(&self, _request: &StartRequest) -> Result<StartResponse> {
///         Ok(StartResponse {
///             session_id: Some("offline".to_string()),
///             ..Default::default()
///         })
///     }
///     async fn respond(&self, _request: &RespondRequest) -> Result<RespondResponse> {
///         Ok(RespondResponse::default())
///     }
///     async fn finalize(&self, _session_id: &str) -> Result<FinalizeResponse> {
///         Ok(FinalizeResponse::default())
///     }
///     async fn select_persona(
///         &self,
///         _session_id: &str,
///         _request: &SelectPersonaRequest,
///     ) -> Result<SelectPersonaResponse> {
///         Ok(SelectPersonaResponse::default())
///     }
///     async fn session_result(&self, _session_id: &str) -> Result<SessionResultResponse> {
///         Ok(SessionResultResponse::default())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Start a new session
    async fn start(&self, request: &StartRequest) -> Result<StartResponse>;

    /// Send a chat message and receive the panel or coach replies
    async fn respond(&self, request: &RespondRequest) -> Result<RespondResponse>;

    /// Finalize a session and receive the mock interview
    async fn finalize(&self, session_id: &str) -> Result<FinalizeResponse>;

    /// Apply a persona / board path to a session
    async fn select_persona(
        &self,
        session_id: &str,
        request: &SelectPersonaRequest,
    ) -> Result<SelectPersonaResponse>;

    /// Fetch the session summary
    async fn session_result(&self, session_id: &str) -> Result<SessionResultResponse>;
}
