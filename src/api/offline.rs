use async_trait::async_trait;
use serde_json::Value;

use super::{ApiError, AuthResponse, Envelope, FleetApi};
use crate::fleet::dashboard::DashboardStats;
use crate::fleet::kinds::RecordKind;
use crate::fleet::trucks::TruckRequest;
use crate::record::{Record, RecordSet};

// Stand-in for running without a service: every call fails at the transport
// level, so every view resolves to its fallback data.
pub struct OfflineApi;

fn offline<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("offline mode".to_string()))
}

#[async_trait]
impl FleetApi for OfflineApi {
    async fn list(&self, _kind: RecordKind) -> Result<RecordSet, ApiError> {
        offline()
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        offline()
    }

    async fn track(&self, _code: &str) -> Result<Envelope<Value>, ApiError> {
        offline()
    }

    async fn create_truck(&self, req: &TruckRequest) -> Result<Record, ApiError> {
        req.validate().map_err(ApiError::Validation)?;
        offline()
    }

    async fn update_truck(&self, _id: &str, req: &TruckRequest) -> Result<Record, ApiError> {
        req.validate().map_err(ApiError::Validation)?;
        offline()
    }

    async fn delete_truck(&self, _id: &str) -> Result<(), ApiError> {
        offline()
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        offline()
    }
}
