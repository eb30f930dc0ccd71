//! View abstraction for session actions
//!
//! Session actions never touch a concrete UI. They talk to a [`SessionView`],
//! which renders chat entries, toggles controls, shows the final result, and
//! hands back the current setup form values.

use crate::feed::{ChatEntry, ChatFeed, EntryId, EntryUpdate};
use crate::mode::PanelLayout;
use crate::setup::SetupForm;

/// Enabled state of the user-facing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Start-session control
    pub start: bool,
    /// Apply-persona control
    pub select_persona: bool,
    /// Chat input, send, and finalize controls
    pub chat: bool,
}

impl Controls {
    /// Everything disabled while a request is in flight
    pub fn busy() -> Self {
        Self {
            start: false,
            select_persona: false,
            chat: false,
        }
    }

    /// Resting state; chat is usable only with an active session
    pub fn idle(session_active: bool) -> Self {
        Self {
            start: true,
            select_persona: true,
            chat: session_active,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::idle(false)
    }
}

/// Capabilities session actions need from a UI
pub trait SessionView {
    /// Append an entry to the chat feed and return its handle
    fn render_chat_entry(&mut self, entry: ChatEntry) -> EntryId;

    /// Update a previously rendered entry
    fn update_chat_entry(&mut self, id: EntryId, update: EntryUpdate);

    /// Remove every entry from the chat feed
    fn clear_feed(&mut self);

    /// Enable or disable controls
    fn set_controls(&mut self, controls: Controls);

    /// Show the final output panel with `Some(text)`, hide it with `None`
    fn show_result(&mut self, result: Option<String>);

    /// Replace the status line
    fn set_status(&mut self, status: String);

    /// Current setup form values
    fn read_form_values(&self) -> SetupForm;

    /// Replace the resume text field
    fn set_resume_text(&mut self, text: String);

    /// Show or hide setup sections
    fn sync_panels(&mut self, _layout: PanelLayout) {}
}

/// In-memory view with no rendering
///
/// Keeps everything a rendered page would show so callers can inspect it.
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    pub feed: ChatFeed,
    pub controls: Controls,
    pub result: Option<String>,
    pub status: String,
    pub form: SetupForm,
    pub layout: PanelLayout,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given form values
    pub fn with_form(form: SetupForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }
}

impl SessionView for HeadlessView {
    fn render_chat_entry(&mut self, entry: ChatEntry) -> EntryId {
        self.feed.push(entry)
    }

    fn update_chat_entry(&mut self, id: EntryId, update: EntryUpdate) {
        if self.feed.update(id, update).is_none() {
            tracing::warn!("Ignoring update for unknown chat entry {:?}", id);
        }
    }

    fn clear_feed(&mut self) {
        self.feed.clear();
    }

    fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    fn show_result(&mut self, result: Option<String>) {
        self.result = result;
    }

    fn set_status(&mut self, status: String) {
        self.status = status;
    }

    fn read_form_values(&self) -> SetupForm {
        self.form.clone()
    }

    fn set_resume_text(&mut self, text: String) {
        self.form.resume_text = text;
    }

    fn sync_panels(&mut self, layout: PanelLayout) {
        self.layout = layout;
    }
}
