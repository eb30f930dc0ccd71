//! Terminal rendering of a session
//!
//! [`TerminalView`] keeps the same state as a [`HeadlessView`] and prints
//! chat entries, status changes, and the final output as they happen.
//! Reveal steps that are still pending are not reprinted; each reply is
//! printed once it settles.

use crate::feed::{ChatEntry, ChatFeed, EntryId, EntryStatus, EntryUpdate, Speaker};
use crate::mode::PanelLayout;
use crate::setup::SetupForm;
use crate::view::{Controls, HeadlessView, SessionView};
use colored::Colorize;

/// Session view that prints to stdout
#[derive(Debug, Default)]
pub struct TerminalView {
    inner: HeadlessView,
}

impl TerminalView {
    pub fn new(form: SetupForm) -> Self {
        Self {
            inner: HeadlessView::with_form(form),
        }
    }

    pub fn form(&self) -> &SetupForm {
        &self.inner.form
    }

    /// Mutable access to the setup form for `/company`, `/projects`, etc.
    pub fn form_mut(&mut self) -> &mut SetupForm {
        &mut self.inner.form
    }

    pub fn controls(&self) -> Controls {
        self.inner.controls
    }

    /// Last rendered final output, if any
    pub fn result(&self) -> Option<&str> {
        self.inner.result.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.inner.status
    }

    pub fn layout(&self) -> PanelLayout {
        self.inner.layout
    }

    pub fn feed(&self) -> &ChatFeed {
        &self.inner.feed
    }
}

impl SessionView for TerminalView {
    fn render_chat_entry(&mut self, entry: ChatEntry) -> EntryId {
        println!("{}", colorize(&entry));
        self.inner.render_chat_entry(entry)
    }

    fn update_chat_entry(&mut self, id: EntryId, update: EntryUpdate) {
        self.inner.update_chat_entry(id, update);
        match self.inner.feed.get(id) {
            Some(entry) if !entry.pending => println!("{}", colorize(entry)),
            Some(entry) => tracing::debug!("{} is {}", entry.label, entry.status),
            None => {}
        }
    }

    fn clear_feed(&mut self) {
        if !self.inner.feed.is_empty() {
            println!("{}", "──────── new session ────────".dimmed());
        }
        self.inner.clear_feed();
    }

    fn set_controls(&mut self, controls: Controls) {
        self.inner.set_controls(controls);
    }

    fn show_result(&mut self, result: Option<String>) {
        if let Some(text) = &result {
            println!("\n{}", "════════ Final Interview Output ════════".bold());
            println!("{}", text);
            println!("{}\n", "════════════════════════════════════════".bold());
        }
        self.inner.show_result(result);
    }

    fn set_status(&mut self, status: String) {
        if !status.is_empty() {
            println!("{}", status.cyan());
        }
        self.inner.set_status(status);
    }

    fn read_form_values(&self) -> SetupForm {
        self.inner.read_form_values()
    }

    fn set_resume_text(&mut self, text: String) {
        self.inner.set_resume_text(text);
    }

    fn sync_panels(&mut self, layout: PanelLayout) {
        self.inner.sync_panels(layout);
    }
}

/// Plain one-line rendering of a chat entry: `label [status]: text`
pub fn format_entry(entry: &ChatEntry) -> String {
    format!("{} [{}]: {}", entry.label, entry.status, entry.text)
}

fn colorize(entry: &ChatEntry) -> String {
    let line = format_entry(entry);
    match (entry.speaker, entry.status) {
        (_, EntryStatus::Error) => line.red().to_string(),
        (_, _) if entry.pending => line.dimmed().to_string(),
        (Speaker::User, _) => line.bold().to_string(),
        (Speaker::Ai, EntryStatus::Ready | EntryStatus::Updated) => line.green().to_string(),
        (Speaker::Ai, _) => line,
    }
}

/// Multi-line description of which setup sections currently apply
pub fn describe_layout(layout: &PanelLayout) -> String {
    let flag = |on: bool| if on { "shown" } else { "hidden" };
    format!(
        "Persona panel:   {}\nSubmodes:        {}\nResume upload:   {}\nExperience:      {}\nSoftware years:  {}",
        flag(layout.persona_panel),
        flag(layout.submodes),
        flag(layout.resume_upload),
        flag(layout.experience),
        flag(layout.software_years)
    )
}
