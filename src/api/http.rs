//! HTTP implementation of the session API
//!
//! Talks JSON to the Chartroom backend with `reqwest`. The backend reports
//! most failures as JSON bodies with a 4xx/5xx status, so bodies are decoded
//! regardless of status; only undecodable bodies become errors.

use crate::api::base::{
    FinalizeResponse, RespondRequest, RespondResponse, SelectPersonaRequest,
    SelectPersonaResponse, SessionApi, SessionResultResponse, StartRequest, StartResponse,
};
use crate::config::ServerConfig;
use crate::error::{ChartroomError, Result};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Session API backed by the Chartroom HTTP server
///
/// # Examples
///
/// ```no_run
/// use chartroom::api::HttpSessionApi;
/// use chartroom::config::ServerConfig;
///
/// # fn example() -> chartroom::error::Result<()> {
/// let api = HttpSessionApi::new(&ServerConfig {
///     base_url: "http://127.0.0.1:5000".to_string(),
///     timeout_seconds: 30,
/// })?;
/// assert_eq!(api.base_url().as_str(), "http://127.0.0.1:5000/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpSessionApi {
    client: Client,
    base_url: Url,
}

impl HttpSessionApi {
    /// Create a client for the configured server
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse or cannot carry a path
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(ChartroomError::from)?;
        if base_url.cannot_be_a_base() {
            return Err(ChartroomError::Config(format!(
                "Server URL cannot be used as a base: {}",
                config.base_url
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(ChartroomError::from)?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/api/session/<segments...>`, escaping each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ChartroomError::Api(format!("Cannot append path to {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "session"])
            .extend(segments);
        Ok(url)
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Backend request failed: {}", e);
            ChartroomError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(ChartroomError::from)?;
        tracing::debug!("Backend responded {} with {} bytes", status, body.len());

        match serde_json::from_str(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) if status.is_success() => {
                tracing::error!("Failed to parse backend response: {}", e);
                Err(ChartroomError::Serialization(e).into())
            }
            Err(_) => {
                tracing::error!("Backend returned error {}: {}", status, body);
                Err(ChartroomError::Api(format!("HTTP {}: {}", status, body.trim())).into())
            }
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.client.request(method, url)
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn start(&self, request: &StartRequest) -> Result<StartResponse> {
        let url = self.endpoint(&["start"])?;
        self.send(self.request(Method::POST, url).json(request)).await
    }

    async fn respond(&self, request: &RespondRequest) -> Result<RespondResponse> {
        let url = self.endpoint(&["message", "respond"])?;
        self.send(self.request(Method::POST, url).json(request)).await
    }

    async fn finalize(&self, session_id: &str) -> Result<FinalizeResponse> {
        let url = self.endpoint(&[session_id, "finalize"])?;
        self.send(self.request(Method::POST, url)).await
    }

    async fn select_persona(
        &self,
        session_id: &str,
        request: &SelectPersonaRequest,
    ) -> Result<SelectPersonaResponse> {
        let url = self.endpoint(&[session_id, "select-boss"])?;
        self.send(self.request(Method::POST, url).json(request)).await
    }

    async fn session_result(&self, session_id: &str) -> Result<SessionResultResponse> {
        let url = self.endpoint(&[session_id, "result"])?;
        self.send(self.request(Method::GET, url)).await
    }
}
