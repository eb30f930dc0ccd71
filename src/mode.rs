//! Interview mode types and session UI state
//!
//! This module defines the two session modes offered by the backend:
//! - Board mode: a three-member investor panel answers every message
//! - Interview mode: a single coach runs a one-on-one interview
//!
//! It also defines [`UiState`], the explicit state object every session
//! action reads and updates, and [`PanelLayout`], which decides which setup
//! fields are relevant for the current selections.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persona selected when the backend does not report one
pub const DEFAULT_PERSONA: &str = "boss_1";

/// Personas the backend accepts for board mode
pub const KNOWN_PERSONAS: [&str; 3] = ["boss_1", "boss_2", "boss_3"];

/// Submode that enables resume upload in interview mode
pub const SOFTWARE_PREP_SUBMODE: &str = "software_engineer_interview_prep";

/// Experience selection that enables the software-years bucket
pub const SOFTWARE_ENGINEER_EXPERIENCE: &str = "software_engineer";

/// Session mode sent to the backend on start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterviewMode {
    /// Three panelists respond to each message
    #[default]
    #[serde(rename = "board_investors")]
    BoardInvestors,

    /// A single coach responds to each message
    #[serde(rename = "interview_1on1")]
    InterviewOneOnOne,
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl InterviewMode {
    /// Wire identifier of this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BoardInvestors => "board_investors",
            Self::InterviewOneOnOne => "interview_1on1",
        }
    }

    /// Parse a mode from its wire identifier or a short alias
    ///
    /// # Examples
    ///
    /// ```
    /// use chartroom::mode::InterviewMode;
    ///
    /// assert_eq!(InterviewMode::parse_str("board").unwrap(), InterviewMode::BoardInvestors);
    /// assert_eq!(
    ///     InterviewMode::parse_str("interview_1on1").unwrap(),
    ///     InterviewMode::InterviewOneOnOne
    /// );
    /// assert!(InterviewMode::parse_str("pitch").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "board_investors" | "board" => Ok(Self::BoardInvestors),
            "interview_1on1" | "interview" | "1on1" => Ok(Self::InterviewOneOnOne),
            other => Err(format!("Unknown interview mode: {}", other)),
        }
    }

    /// Number of AI response slots shown for each user message
    pub fn responder_count(&self) -> usize {
        self.responder_labels().len()
    }

    /// Display labels of the AI response slots, in response order
    pub fn responder_labels(&self) -> &'static [&'static str] {
        match self {
            Self::BoardInvestors => &["Panel 1", "Panel 2", "Panel 3"],
            Self::InterviewOneOnOne => &["Coach"],
        }
    }

    /// Get a user-friendly description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            Self::BoardInvestors => "Three-member investor board",
            Self::InterviewOneOnOne => "One-on-one interview coach",
        }
    }

    /// Get a colored tag representation of this mode
    pub fn colored_tag(&self) -> String {
        match self {
            Self::BoardInvestors => format!("[{}]", "BOARD".purple()),
            Self::InterviewOneOnOne => format!("[{}]", "INTERVIEW".green()),
        }
    }
}

/// Ephemeral UI state shared by all session actions
///
/// Constructed once at startup, replaced in part by a successful start,
/// and read by every other action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Backend-assigned session id; `None` while idle
    pub session_id: Option<String>,
    /// Currently selected mode
    pub mode: InterviewMode,
    /// Free-form submode, only forwarded in interview mode
    pub submode: String,
    /// Selected panelist persona / path id
    pub persona: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(InterviewMode::default())
    }
}

impl UiState {
    /// Create an idle state for the given mode
    ///
    /// # Examples
    ///
    /// ```
    /// use chartroom::mode::{InterviewMode, UiState};
    ///
    /// let state = UiState::new(InterviewMode::InterviewOneOnOne);
    /// assert!(!state.is_active());
    /// assert_eq!(state.persona, "boss_1");
    /// ```
    pub fn new(mode: InterviewMode) -> Self {
        Self {
            session_id: None,
            mode,
            submode: String::new(),
            persona: DEFAULT_PERSONA.to_string(),
        }
    }

    /// Whether a session is active
    pub fn is_active(&self) -> bool {
        self.session_id.is_some()
    }

    /// Switch to a new mode, returning the previous one
    pub fn switch_mode(&mut self, new_mode: InterviewMode) -> InterviewMode {
        let old_mode = self.mode;
        self.mode = new_mode;
        old_mode
    }

    /// Select a persona locally without contacting the backend
    pub fn choose_persona(&mut self, persona: impl Into<String>) {
        self.persona = persona.into();
    }

    /// Submode to send on start; empty outside interview mode
    pub fn submode_for_request(&self) -> &str {
        match self.mode {
            InterviewMode::InterviewOneOnOne => &self.submode,
            InterviewMode::BoardInvestors => "",
        }
    }

    /// Format a prompt string with mode indicators
    ///
    /// # Examples
    ///
    /// ```
    /// use chartroom::mode::{InterviewMode, UiState};
    ///
    /// let state = UiState::new(InterviewMode::BoardInvestors);
    /// assert_eq!(state.format_prompt(), "[board_investors][idle] >> ");
    /// ```
    pub fn format_prompt(&self) -> String {
        let session = if self.is_active() { "live" } else { "idle" };
        format!("[{}][{}] >> ", self.mode, session)
    }

    /// Format a prompt string with colored mode indicators
    pub fn format_colored_prompt(&self) -> String {
        let session = if self.is_active() {
            "LIVE".cyan()
        } else {
            "IDLE".yellow()
        };
        format!("{}[{}] >> ", self.mode.colored_tag(), session)
    }

    /// Get the current status as a multi-line string
    pub fn status(&self) -> String {
        format!(
            "Mode: {} ({})\nSubmode: {}\nPersona: {}\nSession: {}",
            self.mode,
            self.mode.description(),
            if self.submode.is_empty() {
                "none"
            } else {
                &self.submode
            },
            self.persona,
            self.session_id.as_deref().unwrap_or("not started")
        )
    }
}

/// Which setup sections apply to the current selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelLayout {
    /// Persona picker (board mode only)
    pub persona_panel: bool,
    /// Submode picker (interview mode only)
    pub submodes: bool,
    /// Resume file upload (software interview prep only)
    pub resume_upload: bool,
    /// Experience-level selector (interview mode only)
    pub experience: bool,
    /// Software-years bucket (software engineers in interview mode)
    pub software_years: bool,
}

impl PanelLayout {
    /// Compute the layout for the given state and experience selection
    ///
    /// # Examples
    ///
    /// ```
    /// use chartroom::mode::{InterviewMode, PanelLayout, UiState};
    ///
    /// let layout = PanelLayout::compute(&UiState::new(InterviewMode::BoardInvestors), "");
    /// assert!(layout.persona_panel);
    /// assert!(!layout.experience);
    /// ```
    pub fn compute(state: &UiState, experience_level: &str) -> Self {
        let board = state.mode == InterviewMode::BoardInvestors;
        let interview = state.mode == InterviewMode::InterviewOneOnOne;
        Self {
            persona_panel: board,
            submodes: interview,
            resume_upload: interview && state.submode == SOFTWARE_PREP_SUBMODE,
            experience: interview,
            software_years: interview && experience_level == SOFTWARE_ENGINEER_EXPERIENCE,
        }
    }
}
