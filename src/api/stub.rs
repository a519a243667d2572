use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::{ApiError, AuthResponse, Envelope, FleetApi};
use crate::fleet::dashboard::DashboardStats;
use crate::fleet::kinds::RecordKind;
use crate::fleet::trucks::TruckRequest;
use crate::record::{record_set, Record, RecordSet};

/// Canned service for unit tests: fixed list rows per kind and a raw stats payload.
/// Anything not configured fails at the transport level.
#[derive(Default)]
pub struct StubApi {
    lists: HashMap<RecordKind, Vec<Value>>,
    stats: Option<Value>,
}

fn unconfigured<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("not configured".to_string()))
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, kind: RecordKind, rows: Vec<Value>) -> Self {
        self.lists.insert(kind, rows);
        self
    }

    /// Decoded the same way the HTTP client decodes `data`.
    pub fn with_stats(mut self, payload: Value) -> Self {
        self.stats = Some(payload);
        self
    }
}

#[async_trait]
impl FleetApi for StubApi {
    async fn list(&self, kind: RecordKind) -> Result<RecordSet, ApiError> {
        match self.lists.get(&kind) {
            Some(rows) => Ok(record_set(rows.clone())),
            None => unconfigured(),
        }
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        match &self.stats {
            Some(payload) => {
                serde_json::from_value(payload.clone()).map_err(|e| ApiError::Decode(e.to_string()))
            }
            None => unconfigured(),
        }
    }

    async fn track(&self, _code: &str) -> Result<Envelope<Value>, ApiError> {
        unconfigured()
    }

    async fn create_truck(&self, _req: &TruckRequest) -> Result<Record, ApiError> {
        unconfigured()
    }

    async fn update_truck(&self, _id: &str, _req: &TruckRequest) -> Result<Record, ApiError> {
        unconfigured()
    }

    async fn delete_truck(&self, _id: &str) -> Result<(), ApiError> {
        unconfigured()
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        unconfigured()
    }
}
