//! Chartroom - terminal client for board and interview rehearsal sessions
//!
//! This library drives a Chartroom backend: it starts sessions, sends chat
//! messages to a three-member investor board or a one-on-one interview
//! coach, reveals their replies, applies persona paths, and renders the
//! finalized mock interview.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Wire types, the `SessionApi` trait, and its HTTP implementation
//! - `session`: `SessionClient`, one async method per user action
//! - `view`: The `SessionView` trait and an in-memory `HeadlessView`
//! - `terminal`: `TerminalView`, a view that prints to stdout
//! - `feed`: Chat feed entries and in-place updates
//! - `mode`: Modes, UI state, and setup panel layout
//! - `setup`: Setup form values, payload derivation, and resume loading
//! - `transcript`: Plain-text rendering of a mock interview
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chartroom::{Config, HeadlessView, SessionClient, UiState};
//! use chartroom::api::create_api;
//! use chartroom::session::RevealPacing;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let client = SessionClient::new(create_api(&config.server)?, RevealPacing::none());
//!     let mut state = UiState::new(config.initial_mode()?);
//!     let mut view = HeadlessView::new();
//!     client.start_session(&mut state, &mut view).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod mode;
pub mod session;
pub mod setup;
pub mod terminal;
pub mod transcript;
pub mod view;

// Re-export commonly used types
pub use api::{HttpSessionApi, SessionApi};
pub use config::Config;
pub use error::{ChartroomError, Result};
pub use mode::{InterviewMode, UiState};
pub use session::SessionClient;
pub use view::{HeadlessView, SessionView};

#[cfg(test)]
pub mod test_utils;
