//! REST client for the training backend.
//!
//! One `ApiClient` is built from [`ClientConfig`] at startup and shared by
//! the navigation guard and the views. Every path is joined onto the
//! configured base URL and, when credentials are enabled, sent with the
//! session cookie: natively through reqwest's cookie store, in the browser
//! through `fetch` with `credentials: "include"`.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; callers decide how much of the
//! distinction between transport, status and decode failures they care
//! about. The guard collapses all of them into "not logged in".

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::types::{
    AccuracyRequest, AccuracyResponse, Credentials, CurrentSession, FileUpload, MessageResponse, PredictionResponse,
    TrainingProgress, TrainingRequest,
};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::guard::SessionCheck;

pub const CURRENT_SESSION_ENDPOINT: &str = "/current_session";
pub const LOGIN_ENDPOINT: &str = "/login";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const START_TRAINING_ENDPOINT: &str = "/start_training";
pub const TRAINING_PROGRESS_ENDPOINT: &str = "/get_training_progress";
pub const TEST_ACCURACY_ENDPOINT: &str = "/test_accuracy";
pub const UPLOAD_MODEL_ENDPOINT: &str = "/upload_model";
pub const PREDICT_ENDPOINT: &str = "/predict";

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    with_credentials: bool,
}

impl ApiClient {
    /// Build the shared client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL does not parse and
    /// [`ApiError::ClientBuild`] if reqwest rejects the builder settings.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.api_base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .cookie_store(config.with_credentials)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        let http = builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url, with_credentials: config.with_credentials })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn with_credentials(&self) -> bool {
        self.with_credentials
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        #[cfg(target_arch = "wasm32")]
        {
            if self.with_credentials {
                return builder.fetch_credentials_include();
            }
        }
        builder
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// `GET /current_session`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, any non-2xx status, or a body that is not
    /// a session object.
    pub async fn current_session(&self) -> Result<CurrentSession, ApiError> {
        send_json(self.request(reqwest::Method::GET, CURRENT_SESSION_ENDPOINT)).await
    }

    /// `POST /login`. On success the backend sets the session cookie.
    ///
    /// # Errors
    ///
    /// Invalid credentials surface as `ApiError::Status { status: 401, .. }`.
    pub async fn login(&self, credentials: &Credentials) -> Result<MessageResponse, ApiError> {
        tracing::debug!(username = %credentials.username, "login");
        send_json(self.request(reqwest::Method::POST, LOGIN_ENDPOINT).json(credentials)).await
    }

    /// `POST /register`.
    ///
    /// # Errors
    ///
    /// Returns the backend's status when registration is refused.
    pub async fn register(&self, credentials: &Credentials) -> Result<MessageResponse, ApiError> {
        tracing::debug!(username = %credentials.username, "register");
        send_json(self.request(reqwest::Method::POST, REGISTER_ENDPOINT).json(credentials)).await
    }

    /// `GET /logout`.
    ///
    /// # Errors
    ///
    /// Returns `401` when there was no session to end.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        send_json(self.request(reqwest::Method::GET, LOGOUT_ENDPOINT)).await
    }

    // =========================================================================
    // TRAINING
    // =========================================================================

    /// `POST /start_training`.
    ///
    /// # Errors
    ///
    /// Requires a session; otherwise returns the backend's status.
    pub async fn start_training(&self, request: &TrainingRequest) -> Result<MessageResponse, ApiError> {
        send_json(self.request(reqwest::Method::POST, START_TRAINING_ENDPOINT).json(request)).await
    }

    /// `GET /get_training_progress`. `Ok(None)` when nothing is training.
    ///
    /// # Errors
    ///
    /// Requires a session; other non-2xx statuses are returned as errors.
    pub async fn training_progress(&self) -> Result<Option<TrainingProgress>, ApiError> {
        match send_json(self.request(reqwest::Method::GET, TRAINING_PROGRESS_ENDPOINT)).await {
            Ok(progress) => Ok(Some(progress)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST /test_accuracy`.
    ///
    /// # Errors
    ///
    /// Requires a session; otherwise returns the backend's status.
    pub async fn test_accuracy(&self, request: &AccuracyRequest) -> Result<AccuracyResponse, ApiError> {
        send_json(self.request(reqwest::Method::POST, TEST_ACCURACY_ENDPOINT).json(request)).await
    }

    // =========================================================================
    // MODELS
    // =========================================================================

    /// `POST /upload_model` with the file in multipart field `model`.
    ///
    /// # Errors
    ///
    /// Requires a session; a rejected file comes back as `400`.
    pub async fn upload_model(&self, model: FileUpload) -> Result<MessageResponse, ApiError> {
        tracing::debug!(file = %model.file_name, len = model.bytes.len(), "upload model");
        let form = Form::new().part("model", file_part(model));
        send_json(self.request(reqwest::Method::POST, UPLOAD_MODEL_ENDPOINT).multipart(form)).await
    }

    /// `POST /predict`: run `model_id` on one image.
    ///
    /// # Errors
    ///
    /// Requires a session; otherwise returns the backend's status.
    pub async fn predict(&self, image: FileUpload, model_id: &str) -> Result<PredictionResponse, ApiError> {
        let form = Form::new()
            .part("image", file_part(image))
            .text("model_id", model_id.to_owned());
        send_json(self.request(reqwest::Method::POST, PREDICT_ENDPOINT).multipart(form)).await
    }
}

fn file_part(file: FileUpload) -> Part {
    Part::bytes(file.bytes).file_name(file.file_name)
}

async fn send_json<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T, ApiError> {
    let response = builder.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
    let status = response.status();
    let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), body: text });
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl SessionCheck for ApiClient {
    async fn check_session(&self) -> Result<CurrentSession, ApiError> {
        self.current_session().await
    }
}
