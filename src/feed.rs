//! Chat feed entries
//!
//! The feed is an ordered, append-only log. Entries are never removed; an
//! entry may be updated in place while it is pending. Clearing the whole
//! feed happens only when a new session starts.

use std::fmt;

/// Who produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
}

/// Status tag shown next to an entry's label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Sent,
    Ready,
    Thinking,
    Speaking,
    Done,
    Error,
    Updated,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Ready => "ready",
            Self::Thinking => "thinking",
            Self::Speaking => "speaking",
            Self::Done => "done",
            Self::Error => "error",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to an entry in a [`ChatFeed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub usize);

/// A single chat feed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub label: String,
    pub text: String,
    pub status: EntryStatus,
    pub pending: bool,
}

impl ChatEntry {
    /// Message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            label: "You".to_string(),
            text: text.into(),
            status: EntryStatus::Sent,
            pending: false,
        }
    }

    /// Settled system notice
    pub fn system(text: impl Into<String>, status: EntryStatus) -> Self {
        Self {
            speaker: Speaker::Ai,
            label: "System".to_string(),
            text: text.into(),
            status,
            pending: false,
        }
    }

    /// Pending AI placeholder
    pub fn pending(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Ai,
            label: label.into(),
            text: text.into(),
            status: EntryStatus::Thinking,
            pending: true,
        }
    }

    /// Apply an in-place update
    pub fn apply(&mut self, update: EntryUpdate) {
        self.status = update.status;
        self.text = update.text;
        self.pending = update.pending;
    }
}

/// New status, text, and pending flag for an existing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate {
    pub status: EntryStatus,
    pub text: String,
    pub pending: bool,
}

impl EntryUpdate {
    /// Intermediate reveal step
    pub fn speaking() -> Self {
        Self {
            status: EntryStatus::Speaking,
            text: "speaking...".to_string(),
            pending: true,
        }
    }

    /// Settled successful entry
    pub fn done(text: impl Into<String>) -> Self {
        Self {
            status: EntryStatus::Done,
            text: text.into(),
            pending: false,
        }
    }

    /// Settled failed entry
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            status: EntryStatus::Error,
            text: text.into(),
            pending: false,
        }
    }
}

/// Ordered log of chat entries for the active session
#[derive(Debug, Clone, Default)]
pub struct ChatFeed {
    entries: Vec<ChatEntry>,
}

impl ChatFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its handle
    pub fn push(&mut self, entry: ChatEntry) -> EntryId {
        self.entries.push(entry);
        EntryId(self.entries.len() - 1)
    }

    /// Update an entry in place; returns the updated entry, or `None` for
    /// an unknown handle
    pub fn update(&mut self, id: EntryId, update: EntryUpdate) -> Option<&ChatEntry> {
        let entry = self.entries.get_mut(id.0)?;
        entry.apply(update);
        Some(entry)
    }

    pub fn get(&self, id: EntryId) -> Option<&ChatEntry> {
        self.entries.get(id.0)
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries still pending
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.pending).count()
    }

    /// Drop every entry; handles issued before this are invalidated
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
