//! Backend API module for Chartroom
//!
//! This module contains the wire types for the session endpoints, the
//! [`SessionApi`] abstraction, and its HTTP implementation.

pub mod base;
pub mod http;

pub use base::{
    FinalizeResponse, InterviewTurn, MockInterview, PanelResponse, RespondRequest,
    RespondResponse, SelectPersonaRequest, SelectPersonaResponse, SessionApi,
    SessionResultResponse, StartRequest, StartResponse,
};
pub use http::HttpSessionApi;

#[cfg(test)]
pub use base::MockSessionApi;

use crate::config::ServerConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the HTTP session API for the configured server
///
/// # Errors
///
/// Returns error if the base URL is invalid or the HTTP client cannot be built
pub fn create_api(config: &ServerConfig) -> Result<Arc<dyn SessionApi>> {
    Ok(Arc::new(HttpSessionApi::new(config)?))
}
