use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use super::{ApiError, AuthResponse, Envelope, FleetApi};
use crate::config::Config;
use crate::fleet::dashboard::DashboardStats;
use crate::fleet::kinds::RecordKind;
use crate::fleet::trucks::TruckRequest;
use crate::logging::{log_request, log_response};
use crate::record::{record_set, Record, RecordSet};
use crate::session::Session;

/// REST client for the FleetX service.
///
/// Attaches the session's bearer token when one is present and invalidates
/// the session on any 401.
pub struct HttpApi {
    client: Client,
    base: Url,
    session: Option<Arc<Session>>,
}

impl HttpApi {
    pub fn new(cfg: &Config, session: Option<Arc<Session>>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = cfg.http_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
            base: Self::parse_base(&cfg.api_url)?,
            session,
        })
    }

    /// Base URL with a trailing slash so relative joins keep the version prefix.
    fn parse_base(raw: &str) -> Result<Url, ApiError> {
        let mut raw = raw.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| ApiError::Url(format!("{}: {}", raw, e)))
    }

    fn url(&self, path: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| ApiError::Url(format!("{}: {}", path, e)))?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| ApiError::Url(format!("{} cannot take path segments", path)))?
                .pop_if_empty()
                .push(id);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let endpoint = url.path().to_string();
        let token = self.session.as_ref().and_then(|s| s.token());
        log_request(method.as_str(), &endpoint, token.is_some());

        let mut req = self.client.request(method.clone(), url);
        if let Some(token) = &token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        let started = Instant::now();
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        log_response(
            method.as_str(),
            &endpoint,
            status.as_u16(),
            started.elapsed().as_secs_f64() * 1000.0,
        );

        if status == StatusCode::UNAUTHORIZED {
            if let Some(session) = &self.session {
                session.invalidate();
            }
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<Value>>(&bytes)
                .ok()
                .and_then(|env| env.message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Envelope {
                success: true,
                data: None,
                message: None,
            });
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_data<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Option<T>, ApiError> {
        self.send::<T>(method, url, body).await?.into_data()
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl FleetApi for HttpApi {
    async fn list(&self, kind: RecordKind) -> Result<RecordSet, ApiError> {
        let url = self.url(kind.endpoint(), None)?;
        let rows: Option<Vec<Value>> = self.send_data(Method::GET, url, None).await?;
        Ok(record_set(rows.unwrap_or_default()))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = self.url("dashboard/stats", None)?;
        self.send_data(Method::GET, url, None)
            .await?
            .ok_or_else(|| ApiError::Decode("dashboard stats missing data".to_string()))
    }

    async fn track(&self, code: &str) -> Result<Envelope<Value>, ApiError> {
        let url = self.url("public/track/", Some(code))?;
        self.send(Method::GET, url, None).await
    }

    async fn create_truck(&self, req: &TruckRequest) -> Result<Record, ApiError> {
        req.validate().map_err(ApiError::Validation)?;
        let url = self.url("trucks", None)?;
        let data: Option<Value> = self.send_data(Method::POST, url, Some(to_body(req)?)).await?;
        Ok(data.map(Record::from_value).unwrap_or_default())
    }

    async fn update_truck(&self, id: &str, req: &TruckRequest) -> Result<Record, ApiError> {
        req.validate().map_err(ApiError::Validation)?;
        let url = self.url("trucks/", Some(id))?;
        let data: Option<Value> = self.send_data(Method::PUT, url, Some(to_body(req)?)).await?;
        Ok(data.map(Record::from_value).unwrap_or_default())
    }

    async fn delete_truck(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url("trucks/", Some(id))?;
        self.send_data::<Value>(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = self.url("auth/login", None)?;
        let body = json!({ "email": email, "password": password });
        self.send_data(Method::POST, url, Some(body))
            .await?
            .ok_or_else(|| ApiError::Decode("login response missing data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        let cfg = Config {
            api_url: base.to_string(),
            ..Config::default()
        };
        HttpApi::new(&cfg, None).unwrap()
    }

    #[test]
    fn test_urls_keep_version_prefix() {
        let api = api("http://localhost:8080/api/v1");
        assert_eq!(
            api.url("loads", None).unwrap().as_str(),
            "http://localhost:8080/api/v1/loads"
        );
        assert_eq!(
            api.url("dashboard/stats", None).unwrap().as_str(),
            "http://localhost:8080/api/v1/dashboard/stats"
        );
    }

    #[test]
    fn test_path_ids_are_encoded() {
        let api = api("http://localhost:8080/api/v1/");
        assert_eq!(
            api.url("public/track/", Some("AB 12/3")).unwrap().as_str(),
            "http://localhost:8080/api/v1/public/track/AB%2012%2F3"
        );
        assert_eq!(
            api.url("trucks/", Some("TRK-001")).unwrap().as_str(),
            "http://localhost:8080/api/v1/trucks/TRK-001"
        );
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let cfg = Config {
            api_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(HttpApi::new(&cfg, None).is_err());
    }
}
