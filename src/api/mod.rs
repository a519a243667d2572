use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::fleet::dashboard::DashboardStats;
use crate::fleet::kinds::RecordKind;
use crate::fleet::trucks::{FieldError, TruckRequest};
use crate::record::{Record, RecordSet};

mod http;
mod offline;
#[cfg(test)]
pub(crate) mod stub;

pub use http::HttpApi;
pub use offline::OfflineApi;

/// Wire wrapper around every service payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Payload of a successful envelope; a `success: false` body becomes [`ApiError::Rejected`].
    pub fn into_data(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub company_id: String,
    pub company_name: String,
    pub subscription_plan: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("service returned {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    #[error("request rejected{}", .0.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Rejected(Option<String>),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<FieldError>),
}

impl ApiError {
    /// Human-readable message supplied by the service, when there is one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.clone(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The FleetX REST service as seen by the client.
#[async_trait]
pub trait FleetApi: Send + Sync {
    async fn list(&self, kind: RecordKind) -> Result<RecordSet, ApiError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    /// Public lookup; the envelope is returned whole so `success: false` can carry a message.
    async fn track(&self, code: &str) -> Result<Envelope<Value>, ApiError>;
    async fn create_truck(&self, req: &TruckRequest) -> Result<Record, ApiError>;
    async fn update_truck(&self, id: &str, req: &TruckRequest) -> Result<Record, ApiError>;
    async fn delete_truck(&self, id: &str) -> Result<(), ApiError>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
}
