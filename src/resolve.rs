//! Remote-or-fallback data sourcing.
//!
//! Every list view shows *something*: one remote attempt, and if that fails
//! (or comes back empty, under the default policy) the kind's fixed fallback
//! records are used in their entirety. No retry, no merge.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::logging::{log, obj, v_str, Domain, Level};
use crate::record::RecordSet;

/// What an empty remote result means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Treat an empty list like an outage and show the fallback.
    #[default]
    EmptyIsFailure,
    /// An empty list is a real answer (e.g. a new tenant with no data yet).
    EmptyIsValid,
}

impl EmptyPolicy {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "keep" | "valid" | "empty_is_valid" => EmptyPolicy::EmptyIsValid,
            _ => EmptyPolicy::EmptyIsFailure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    Error(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Remote,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub records: RecordSet,
    pub source: Source,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, Source::Fallback(_))
    }
}

/// Await `remote` once and decide between its records and `fallback`.
pub async fn resolve<Fut>(kind: &str, remote: Fut, fallback: RecordSet, policy: EmptyPolicy) -> Resolution
where
    Fut: Future<Output = anyhow::Result<RecordSet>>,
{
    let reason = match remote.await {
        Ok(records) if !records.is_empty() || policy == EmptyPolicy::EmptyIsValid => {
            return Resolution {
                records,
                source: Source::Remote,
            };
        }
        Ok(_) => FallbackReason::Empty,
        Err(err) => FallbackReason::Error(format!("{:#}", err)),
    };

    let detail = match &reason {
        FallbackReason::Error(msg) => msg.as_str(),
        FallbackReason::Empty => "remote returned no records",
    };
    log(
        Level::Warn,
        Domain::Resolve,
        "fallback_used",
        obj(&[
            ("kind", v_str(kind)),
            ("msg", v_str(detail)),
            ("fallback_len", serde_json::json!(fallback.len())),
        ]),
    );

    Resolution {
        records: fallback,
        source: Source::Fallback(reason),
    }
}

/// Issued for each request of one record kind; later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Last-request-wins guard for one record kind.
///
/// Tag each outgoing request with [`issue`](Self::issue); when its response
/// arrives, pass it through [`accept`](Self::accept), which drops responses
/// that a newer request has superseded.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(value)
        } else {
            log(
                Level::Debug,
                Domain::Resolve,
                "stale_response_dropped",
                obj(&[("ticket", serde_json::json!(ticket.0))]),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture;
    use crate::record::record_set;
    use anyhow::anyhow;
    use serde_json::json;

    fn fallback() -> RecordSet {
        record_set(vec![json!({"id": "F1"}), json!({"id": "F2"})])
    }

    #[tokio::test]
    async fn test_remote_records_returned_unmodified() {
        let remote = record_set(vec![json!({"id": "R2"}), json!({"id": "R1"}), json!({"id": "R3"})]);
        let expected = remote.clone();
        let res = resolve("loads", async { Ok(remote) }, fallback(), EmptyPolicy::default()).await;
        assert_eq!(res.records, expected);
        assert_eq!(res.source, Source::Remote);
    }

    #[tokio::test]
    async fn test_error_falls_back_and_logs_once() {
        capture::begin();
        let res = resolve(
            "customers",
            async { Err(anyhow!("connection refused")) },
            fallback(),
            EmptyPolicy::default(),
        )
        .await;
        let entries = capture::finish();
        assert_eq!(res.records, fallback());
        assert!(res.is_fallback());
        assert_eq!(capture::count(&entries, "fallback_used"), 1);
        assert_eq!(entries[0]["kind"], "customers");
        assert!(entries[0]["msg"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_is_failure_by_default() {
        let res = resolve("trucks", async { Ok(Vec::new()) }, fallback(), EmptyPolicy::default()).await;
        assert_eq!(res.records, fallback());
        assert_eq!(res.source, Source::Fallback(FallbackReason::Empty));
    }

    #[tokio::test]
    async fn test_empty_kept_when_policy_says_valid() {
        let res = resolve("trucks", async { Ok(Vec::new()) }, fallback(), EmptyPolicy::EmptyIsValid).await;
        assert!(res.records.is_empty());
        assert_eq!(res.source, Source::Remote);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(EmptyPolicy::parse("keep"), EmptyPolicy::EmptyIsValid);
        assert_eq!(EmptyPolicy::parse("fallback"), EmptyPolicy::EmptyIsFailure);
        assert_eq!(EmptyPolicy::parse("garbage"), EmptyPolicy::EmptyIsFailure);
    }

    #[test]
    fn test_sequencer_last_request_wins() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert_eq!(seq.accept(first, "stale"), None);
        assert_eq!(seq.accept(second, "fresh"), Some("fresh"));
    }
}
