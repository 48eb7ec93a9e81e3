//! JSON wire types exchanged with the training backend.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// SESSION
// =============================================================================

/// Body of a successful `GET /current_session`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSession {
    pub username: String,
    /// Only a JSON `true` counts; missing, `null` or any other value is `false`.
    #[serde(rename = "isAdmin", default, deserialize_with = "exactly_true")]
    pub is_admin: bool,
}

fn exactly_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value == serde_json::Value::Bool(true))
}

// =============================================================================
// AUTH
// =============================================================================

/// Username/password pair for `POST /login` and `POST /register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// TRAINING
// =============================================================================

/// Body of `POST /start_training`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainingRequest {
    pub dataset_type: String,
    pub epochs: u32,
}

/// Body of `GET /get_training_progress` while a training record exists.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TrainingProgress {
    pub completed: bool,
    #[serde(default)]
    pub loss_list: Vec<f64>,
    #[serde(default)]
    pub acc_list: Vec<f64>,
}

impl TrainingProgress {
    /// Number of epochs reported so far.
    #[must_use]
    pub fn epochs_reported(&self) -> usize {
        self.loss_list.len().max(self.acc_list.len())
    }

    #[must_use]
    pub fn latest_accuracy(&self) -> Option<f64> {
        self.acc_list.last().copied()
    }
}

/// Body of `POST /test_accuracy`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccuracyRequest {
    pub dataset: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct AccuracyResponse {
    pub accuracy: f64,
}

// =============================================================================
// MODELS
// =============================================================================

/// One file sent as a multipart field.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Body of `POST /predict`. The result shape depends on the model.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub result: serde_json::Value,
}
