//! The back-office views: list pages, the dispatch board, tracking and the dashboard.

pub mod board;
pub mod dashboard;
pub mod fallback;
pub mod kinds;
pub mod tracking;
pub mod trucks;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::aggregate::{aggregate, Aggregate};
use crate::api::FleetApi;
use crate::filter::{filter, FilterQuery};
use crate::record::Record;
use crate::resolve::{resolve, EmptyPolicy, RequestSequencer, Resolution, Source};

use board::DispatchBoard;
use dashboard::{DashboardView, ReportsView};
use kinds::RecordKind;
use tracking::TruckPosition;

/// One list page after its data has been resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub kind: RecordKind,
    pub records: Vec<Record>,
    pub source: Source,
    /// Computed over every resolved record, not just the visible ones.
    pub stats: Aggregate,
}

impl ListView {
    pub fn new(kind: RecordKind, resolution: Resolution) -> Self {
        let stats = aggregate(&resolution.records, &kind.stat_spec());
        Self {
            kind,
            records: resolution.records,
            source: resolution.source,
            stats,
        }
    }

    pub fn visible(&self, query: &FilterQuery) -> Vec<&Record> {
        filter(&self.records, query, &self.kind.searchable())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, Source::Fallback(_))
    }
}

/// Entry point for every view; owns one request sequencer per record kind.
pub struct Fleet {
    api: Arc<dyn FleetApi>,
    policy: EmptyPolicy,
    sequencers: HashMap<RecordKind, RequestSequencer>,
    board_sequencer: RequestSequencer,
}

impl Fleet {
    pub fn new(api: Arc<dyn FleetApi>, policy: EmptyPolicy) -> Self {
        let sequencers = RecordKind::ALL
            .iter()
            .map(|&kind| (kind, RequestSequencer::new()))
            .collect();
        Self {
            api,
            policy,
            sequencers,
            board_sequencer: RequestSequencer::new(),
        }
    }

    pub fn api(&self) -> &dyn FleetApi {
        self.api.as_ref()
    }

    fn sequencer(&self, kind: RecordKind) -> &RequestSequencer {
        // Populated for every kind in `new`.
        &self.sequencers[&kind]
    }

    /// Fetch one list page. Returns `None` when a newer refresh of the same
    /// kind was issued while this one was in flight.
    pub async fn refresh(&self, kind: RecordKind) -> Option<ListView> {
        let ticket = self.sequencer(kind).issue();
        let api = Arc::clone(&self.api);
        let remote = async move { api.list(kind).await.map_err(anyhow::Error::from) };
        let resolution = resolve(kind.as_str(), remote, kind.fallback(), self.policy).await;
        self.sequencer(kind).accept(ticket, ListView::new(kind, resolution))
    }

    /// Loads grouped by status; falls back to the board's own demo cards.
    pub async fn board(&self) -> Option<DispatchBoard> {
        let ticket = self.board_sequencer.issue();
        let api = Arc::clone(&self.api);
        let remote = async move { api.list(RecordKind::Loads).await.map_err(anyhow::Error::from) };
        let resolution = resolve("board", remote, fallback::dispatch_loads(), self.policy).await;
        self.board_sequencer
            .accept(ticket, DispatchBoard::group(&resolution.records))
    }

    pub async fn dashboard(&self) -> DashboardView {
        dashboard::load_dashboard(self.api.as_ref()).await
    }

    pub async fn reports(&self) -> ReportsView {
        dashboard::load_reports(self.api.as_ref()).await
    }

    pub async fn positions(&self) -> Vec<TruckPosition> {
        tracking::load_positions(self.api.as_ref(), self.policy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OfflineApi;

    #[tokio::test]
    async fn test_offline_views_use_fallbacks() {
        let fleet = Fleet::new(Arc::new(OfflineApi), EmptyPolicy::default());
        for kind in RecordKind::ALL {
            let view = fleet.refresh(kind).await.unwrap();
            assert!(view.is_fallback());
            assert_eq!(view.records, kind.fallback());
        }
    }

    #[tokio::test]
    async fn test_identity_query_shows_everything() {
        let fleet = Fleet::new(Arc::new(OfflineApi), EmptyPolicy::default());
        let view = fleet.refresh(RecordKind::Customers).await.unwrap();
        assert_eq!(view.visible(&FilterQuery::everything()).len(), view.records.len());
        assert_eq!(view.stats.get("total"), Some(6.0));
    }

    #[tokio::test]
    async fn test_offline_board() {
        let fleet = Fleet::new(Arc::new(OfflineApi), EmptyPolicy::default());
        let board = fleet.board().await.unwrap();
        assert_eq!(board.column("created").unwrap().count(), 1);
        assert_eq!(board.unplaced.len(), 1);
    }

    #[tokio::test]
    async fn test_positions_follow_fleet_policy() {
        let api = Arc::new(
            crate::api::stub::StubApi::new()
                .with_list(RecordKind::Trucks, vec![])
                .with_list(RecordKind::Drivers, vec![]),
        );
        let keep = Fleet::new(api.clone(), EmptyPolicy::EmptyIsValid);
        assert!(keep.positions().await.is_empty());
        let strict = Fleet::new(api, EmptyPolicy::EmptyIsFailure);
        assert_eq!(strict.positions().await, tracking::fallback_positions());
    }

    #[tokio::test]
    async fn test_offline_reports_fall_back() {
        let fleet = Fleet::new(Arc::new(OfflineApi), EmptyPolicy::default());
        let reports = fleet.reports().await;
        assert!(matches!(reports.source, Source::Fallback(_)));
        assert_eq!(reports.summary.net_profit, 110000.0);
    }
}
