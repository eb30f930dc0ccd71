//! Session actions
//!
//! [`SessionClient`] implements every user-triggered action: start, send,
//! finalize, persona selection, resume loading, and result lookup. It holds
//! no UI state of its own; callers pass the [`UiState`] and a
//! [`SessionView`] into each action.
//!
//! Failures never escape an action. Validation problems, backend-reported
//! errors, and transport failures all end up as status text or chat
//! entries, and controls are restored when the action finishes.

use crate::api::{PanelResponse, RespondRequest, SelectPersonaRequest, SessionApi, StartRequest};
use crate::error::ChartroomError;
use crate::feed::{ChatEntry, EntryId, EntryStatus, EntryUpdate};
use crate::mode::{InterviewMode, PanelLayout, UiState, DEFAULT_PERSONA};
use crate::setup::{display_name, read_resume};
use crate::transcript::{render_mock_interview, NO_INTERVIEW_OUTPUT};
use crate::view::{Controls, SessionView};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Default pause between revealing consecutive replies
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 220;

const SESSION_LIVE: &str = "Session is live. Your setup context is loaded. Start chatting below.";
const THINKING: &str = "thinking...";
const NO_RESPONSE: &str = "No response generated.";
const UNSUPPORTED_RESUME: &str =
    "Unsupported resume format. Use .txt or .md, or paste text directly.";

/// Pacing of the staged reply reveal
///
/// Purely presentational; a zero delay reveals replies back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacing {
    delay: Duration,
}

impl RevealPacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// No pause between replies
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self::from_millis(DEFAULT_REVEAL_DELAY_MS)
    }
}

/// Drives the backend on behalf of a view
///
/// # Examples
///
/// ```no_run
/// use chartroom::api::create_api;
/// use chartroom::config::ServerConfig;
/// use chartroom::mode::UiState;
/// use chartroom::session::{RevealPacing, SessionClient};
/// use chartroom::view::HeadlessView;
///
/// # async fn example() -> chartroom::error::Result<()> {
/// let api = create_api(&ServerConfig::default())?;
/// let client = SessionClient::new(api, RevealPacing::none());
/// let mut state = UiState::default();
/// let mut view = HeadlessView::new();
///
/// client.start_session(&mut state, &mut view).await;
/// client.send_message(&mut state, &mut view, "We grew 20% month over month.").await;
/// client.finalize_session(&mut state, &mut view).await;
/// println!("{}", view.result.unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionClient {
    api: Arc<dyn SessionApi>,
    pacing: RevealPacing,
}

impl SessionClient {
    pub fn new(api: Arc<dyn SessionApi>, pacing: RevealPacing) -> Self {
        Self { api, pacing }
    }

    pub fn pacing(&self) -> RevealPacing {
        self.pacing
    }

    /// Start a new session, replacing any active one on success
    pub async fn start_session(&self, state: &mut UiState, view: &mut dyn SessionView) {
        view.set_controls(Controls::busy());

        let submode = state.submode_for_request().to_string();
        let request = StartRequest {
            mode: state.mode,
            submode: submode.clone(),
            setup: view.read_form_values().payload(state.mode),
        };
        tracing::info!("Starting {} session", state.mode);

        match self.api.start(&request).await {
            Ok(response) => match response.session_id().map(str::to_string) {
                Some(session_id) => {
                    state.session_id = Some(session_id.clone());
                    state.persona = response
                        .selected_boss
                        .filter(|p| !p.is_empty())
                        .unwrap_or_else(|| DEFAULT_PERSONA.to_string());
                    tracing::info!("Session {} started", session_id);

                    view.clear_feed();
                    view.show_result(None);
                    view.set_status(started_status(
                        state.mode,
                        &submode,
                        &request.setup.coding_experience_level,
                    ));
                    view.render_chat_entry(ChatEntry::system(SESSION_LIVE, EntryStatus::Ready));
                }
                None => {
                    let message = response
                        .error
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| "Failed to start session".to_string());
                    tracing::warn!("Backend refused to start session: {}", message);
                    view.set_status(message);
                }
            },
            Err(e) => {
                tracing::warn!("Start request failed: {}", e);
                view.set_status(format!("Start failed: {}", e));
            }
        }

        view.set_controls(Controls::idle(state.is_active()));
    }

    /// Send a chat message and reveal the replies one slot at a time
    pub async fn send_message(
        &self,
        state: &mut UiState,
        view: &mut dyn SessionView,
        message: &str,
    ) {
        let Some(session_id) = state.session_id.clone() else {
            view.set_status("Start a session first.".to_string());
            return;
        };
        let message = message.trim();
        if message.is_empty() {
            view.set_status("Enter a message before sending.".to_string());
            return;
        }

        let setup = view.read_form_values().payload(state.mode);
        view.render_chat_entry(ChatEntry::user(message));
        view.show_result(None);

        let pending: Vec<EntryId> = state
            .mode
            .responder_labels()
            .iter()
            .map(|label| view.render_chat_entry(ChatEntry::pending(*label, THINKING)))
            .collect();

        view.set_controls(Controls::busy());
        let request = RespondRequest {
            session_id,
            message: message.to_string(),
            setup,
        };
        tracing::debug!(
            "Sending {} byte message, expecting {} replies",
            request.message.len(),
            pending.len()
        );

        match self.api.respond(&request).await {
            Ok(response) if response.ok => {
                let responses = response.responses();
                if responses.len() > pending.len() {
                    tracing::debug!(
                        "Dropping {} extra replies",
                        responses.len() - pending.len()
                    );
                }
                self.reveal(view, &pending, responses).await;
            }
            Ok(response) => {
                let text = response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Request failed".to_string());
                tracing::warn!("Backend rejected message: {}", text);
                fail_all(view, &pending, &text);
            }
            Err(e) => {
                tracing::warn!("Respond request failed: {}", e);
                fail_all(view, &pending, &format!("Send failed: {}", e));
            }
        }

        view.set_controls(Controls::idle(state.is_active()));
    }

    async fn reveal(
        &self,
        view: &mut dyn SessionView,
        pending: &[EntryId],
        responses: &[PanelResponse],
    ) {
        for (idx, id) in pending.iter().enumerate() {
            view.update_chat_entry(*id, EntryUpdate::speaking());
            self.pacing.wait().await;
            let text = responses
                .get(idx)
                .and_then(PanelResponse::text)
                .unwrap_or(NO_RESPONSE);
            view.update_chat_entry(*id, EntryUpdate::done(text));
        }
    }

    /// Finalize the active session and show the rendered interview
    pub async fn finalize_session(&self, state: &mut UiState, view: &mut dyn SessionView) {
        let Some(session_id) = state.session_id.clone() else {
            tracing::debug!("Finalize ignored without an active session");
            return;
        };

        view.set_controls(Controls::busy());
        let pending =
            view.render_chat_entry(ChatEntry::pending("System", "Finalizing output..."));
        tracing::info!("Finalizing session {}", session_id);

        match self.api.finalize(&session_id).await {
            Ok(response) => match response.error.filter(|e| !e.is_empty()) {
                Some(error) => {
                    tracing::warn!("Backend failed to finalize: {}", error);
                    view.update_chat_entry(pending, EntryUpdate::error(error));
                }
                None => {
                    view.update_chat_entry(
                        pending,
                        EntryUpdate::done("Final interview output ready."),
                    );
                    let text = render_mock_interview(response.mock_interview.as_ref());
                    view.show_result(Some(if text.is_empty() {
                        NO_INTERVIEW_OUTPUT.to_string()
                    } else {
                        text
                    }));
                    if !response.files.is_empty() {
                        let files: Vec<String> = response
                            .files
                            .iter()
                            .map(|(name, path)| format!("{}={}", name, path))
                            .collect();
                        view.set_status(format!("Backend saved: {}", files.join(", ")));
                    }
                }
            },
            Err(e) => {
                tracing::warn!("Finalize request failed: {}", e);
                view.update_chat_entry(
                    pending,
                    EntryUpdate::error(format!("Finalize failed: {}", e)),
                );
            }
        }

        view.set_controls(Controls::idle(state.is_active()));
    }

    /// Apply the currently chosen persona to the active session
    pub async fn apply_persona(&self, state: &mut UiState, view: &mut dyn SessionView) {
        let Some(session_id) = state.session_id.clone() else {
            view.set_status("Start a session before selecting panel path.".to_string());
            return;
        };

        view.set_controls(Controls::busy());
        let request = SelectPersonaRequest {
            boss_id: state.persona.clone(),
        };
        tracing::info!("Applying persona {} to session {}", request.boss_id, session_id);

        match self.api.select_persona(&session_id, &request).await {
            Ok(response) if response.ok => {
                let applied = response
                    .selected_boss
                    .filter(|p| !p.is_empty())
                    .unwrap_or(request.boss_id);
                state.persona = applied.clone();
                view.set_status(format!("Panel path applied: {}", applied));
                view.render_chat_entry(ChatEntry::system(
                    format!("Board path switched to {}.", applied),
                    EntryStatus::Updated,
                ));
            }
            Ok(response) => {
                let message = response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Failed to apply panel path".to_string());
                tracing::warn!("Backend rejected persona: {}", message);
                view.set_status(message);
            }
            Err(e) => {
                tracing::warn!("Select request failed: {}", e);
                view.set_status(format!("Select failed: {}", e));
            }
        }

        view.set_controls(Controls::idle(state.is_active()));
    }

    /// Load a `.txt`/`.md` resume into the setup form
    pub async fn load_resume(&self, view: &mut dyn SessionView, path: &Path) {
        let name = display_name(path);
        match read_resume(path).await {
            Ok(text) => {
                view.set_resume_text(text);
                view.render_chat_entry(ChatEntry::system(
                    format!("Resume loaded: {}", name),
                    EntryStatus::Ready,
                ));
            }
            Err(e) => {
                let text = match e.downcast_ref::<ChartroomError>() {
                    Some(ChartroomError::UnsupportedResumeFormat(_)) => {
                        UNSUPPORTED_RESUME.to_string()
                    }
                    _ => format!("Resume load failed: {}", e),
                };
                tracing::warn!("Resume {} not loaded: {}", name, e);
                view.render_chat_entry(ChatEntry::system(text, EntryStatus::Error));
            }
        }
    }

    /// Report the backend's summary of the active session
    pub async fn fetch_result(&self, state: &UiState, view: &mut dyn SessionView) {
        let Some(session_id) = state.session_id.as_deref() else {
            view.set_status("Start a session first.".to_string());
            return;
        };

        match self.api.session_result(session_id).await {
            Ok(result) => match result.error.filter(|e| !e.is_empty()) {
                Some(error) => view.set_status(error),
                None => view.set_status(format!(
                    "Session {}: {} messages | final output: {}",
                    session_id,
                    result.messages_count,
                    if result.has_final { "ready" } else { "pending" }
                )),
            },
            Err(e) => view.set_status(format!("Result failed: {}", e)),
        }
    }

    /// Switch modes and resync the visible setup sections
    pub fn change_mode(
        &self,
        state: &mut UiState,
        view: &mut dyn SessionView,
        mode: InterviewMode,
    ) {
        let old = state.switch_mode(mode);
        tracing::debug!("Mode changed from {} to {}", old, mode);
        self.sync_panels(state, view);
    }

    /// Recompute which setup sections apply and hand them to the view
    pub fn sync_panels(&self, state: &UiState, view: &mut dyn SessionView) {
        let form = view.read_form_values();
        view.sync_panels(PanelLayout::compute(state, &form.experience_level));
    }
}

fn fail_all(view: &mut dyn SessionView, pending: &[EntryId], text: &str) {
    for id in pending {
        view.update_chat_entry(*id, EntryUpdate::error(text));
    }
}

fn started_status(mode: InterviewMode, submode: &str, experience: &str) -> String {
    let submode = if submode.is_empty() {
        String::new()
    } else {
        format!(" | Submode: {}", submode)
    };
    let experience = if experience.is_empty() {
        "not set"
    } else {
        experience
    };
    format!(
        "New session started. Mode: {}{} | Experience: {}",
        mode, submode, experience
    )
}
