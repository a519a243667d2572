//! Company overview figures and the monthly revenue report.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::FleetApi;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::resolve::{FallbackReason, Source};

/// Explicit `null` reads as the field's default, same as a missing key.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subscription_plan: String,
    #[serde(deserialize_with = "null_as_default")]
    pub truck_limit: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_truck_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_trucks: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_drivers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_customers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_loads: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub load_status: BTreeMap<String, i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub outstanding_amount: f64,
    // Headline figures read by the reports page.
    #[serde(deserialize_with = "null_as_default")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_loads: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub available_trucks: i64,
}

impl DashboardStats {
    pub fn fallback() -> Self {
        let load_status = [("CREATED", 5), ("DISPATCHED", 8), ("IN_TRANSIT", 6), ("DELIVERED", 5)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            company_name: "Demo Transport".to_string(),
            subscription_plan: "TRIAL".to_string(),
            truck_limit: 5,
            current_truck_count: 3,
            active_trucks: 3,
            active_drivers: 5,
            active_customers: 8,
            total_loads: 24,
            load_status,
            outstanding_amount: 12500.0,
            ..Self::default()
        }
    }

    /// Trucks that can still be added under the current plan.
    pub fn trucks_remaining(&self) -> i64 {
        (self.truck_limit - self.current_truck_count).max(0)
    }
}

/// One attempt at `dashboard/stats`. Any error, including a missing payload,
/// is logged once under `view` and returned as the fallback reason.
async fn fetch_stats(api: &dyn FleetApi, view: &str) -> Result<DashboardStats, FallbackReason> {
    api.dashboard_stats().await.map_err(|err| {
        let msg = err.to_string();
        log(
            Level::Warn,
            Domain::Resolve,
            "fallback_used",
            obj(&[("kind", v_str(view)), ("msg", v_str(&msg))]),
        );
        FallbackReason::Error(msg)
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub source: Source,
}

pub async fn load_dashboard(api: &dyn FleetApi) -> DashboardView {
    match fetch_stats(api, "dashboard").await {
        Ok(stats) => DashboardView {
            stats,
            source: Source::Remote,
        },
        Err(reason) => DashboardView {
            stats: DashboardStats::fallback(),
            source: Source::Fallback(reason),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
}

impl MonthRow {
    fn new(month: &str, revenue: f64, expenses: f64) -> Self {
        Self {
            month: month.to_string(),
            revenue,
            expenses,
        }
    }
}

pub fn fallback_months() -> Vec<MonthRow> {
    vec![
        MonthRow::new("Jan", 42000.0, 28000.0),
        MonthRow::new("Feb", 38000.0, 25000.0),
        MonthRow::new("Mar", 51000.0, 32000.0),
        MonthRow::new("Apr", 46000.0, 29000.0),
        MonthRow::new("May", 58000.0, 35000.0),
        MonthRow::new("Jun", 62000.0, 38000.0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
}

pub fn summarize(rows: &[MonthRow]) -> ReportSummary {
    let total_revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    let total_expenses: f64 = rows.iter().map(|r| r.expenses).sum();
    ReportSummary {
        total_revenue,
        total_expenses,
        net_profit: total_revenue - total_expenses,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub label: &'static str,
    pub value: f64,
}

fn card(label: &'static str, value: f64) -> ReportCard {
    ReportCard { label, value }
}

/// Headline cards plus the monthly chart rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReportsView {
    pub cards: Vec<ReportCard>,
    pub months: Vec<MonthRow>,
    pub summary: ReportSummary,
    pub source: Source,
}

/// Live headline cards from `dashboard/stats`; the demo revenue cards when it fails.
/// The monthly chart rows are demo data either way.
pub async fn load_reports(api: &dyn FleetApi) -> ReportsView {
    let months = fallback_months();
    let summary = summarize(&months);
    match fetch_stats(api, "reports").await {
        Ok(stats) => ReportsView {
            cards: vec![
                card("Total Revenue", stats.total_revenue),
                card("Active Loads", stats.active_loads as f64),
                card("Available Trucks", stats.available_trucks as f64),
                card("Active Drivers", stats.active_drivers as f64),
            ],
            months,
            summary,
            source: Source::Remote,
        },
        Err(reason) => ReportsView {
            cards: vec![
                card("Total Revenue", summary.total_revenue),
                card("Total Expenses", summary.total_expenses),
                card("Net Profit", summary.net_profit),
                card("Avg Revenue/Truck", 18312.0),
            ],
            months,
            summary,
            source: Source::Fallback(reason),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use crate::api::OfflineApi;
    use crate::logging::capture;
    use serde_json::json;

    #[test]
    fn test_fallback_report_totals() {
        let s = summarize(&fallback_months());
        assert_eq!(s.total_revenue, 297000.0);
        assert_eq!(s.total_expenses, 187000.0);
        assert_eq!(s.net_profit, 110000.0);
    }

    #[test]
    fn test_empty_report_is_zero() {
        assert_eq!(summarize(&[]).net_profit, 0.0);
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let stats: DashboardStats =
            serde_json::from_value(json!({"companyName": "Acme", "truckLimit": 10, "currentTruckCount": 12})).unwrap();
        assert_eq!(stats.company_name, "Acme");
        assert!(stats.load_status.is_empty());
        assert_eq!(stats.trucks_remaining(), 0);
        assert_eq!(DashboardStats::fallback().trucks_remaining(), 2);
    }

    #[tokio::test]
    async fn test_offline_dashboard_falls_back() {
        capture::begin();
        let view = load_dashboard(&OfflineApi).await;
        let entries = capture::finish();
        assert_eq!(view.stats, DashboardStats::fallback());
        assert!(matches!(view.source, Source::Fallback(FallbackReason::Error(_))));
        assert_eq!(capture::count(&entries, "fallback_used"), 1);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "companyName": "Acme", "subscriptionPlan": null, "truckLimit": null,
            "currentTruckCount": 2, "loadStatus": null, "outstandingAmount": null
        }))
        .unwrap();
        assert_eq!(stats.company_name, "Acme");
        assert_eq!(stats.subscription_plan, "");
        assert_eq!(stats.truck_limit, 0);
        assert_eq!(stats.current_truck_count, 2);
        assert!(stats.load_status.is_empty());
        assert_eq!(stats.outstanding_amount, 0.0);
    }

    #[tokio::test]
    async fn test_remote_dashboard_with_null_field_is_kept() {
        let api = StubApi::new().with_stats(json!({
            "companyName": "Acme", "truckLimit": null, "currentTruckCount": 4,
            "activeTrucks": 4, "loadStatus": {"CREATED": 1}
        }));
        capture::begin();
        let view = load_dashboard(&api).await;
        let entries = capture::finish();
        assert_eq!(view.source, Source::Remote);
        assert_eq!(view.stats.company_name, "Acme");
        assert_eq!(view.stats.truck_limit, 0);
        assert_eq!(view.stats.load_status.get("CREATED"), Some(&1));
        assert_eq!(capture::count(&entries, "fallback_used"), 0);
    }

    #[tokio::test]
    async fn test_reports_use_live_headline_figures() {
        let api = StubApi::new().with_stats(json!({
            "totalRevenue": 51250.5, "activeLoads": 7, "availableTrucks": null, "activeDrivers": 9
        }));
        let view = load_reports(&api).await;
        assert_eq!(view.source, Source::Remote);
        let cards: Vec<(&str, f64)> = view.cards.iter().map(|c| (c.label, c.value)).collect();
        assert_eq!(
            cards,
            vec![
                ("Total Revenue", 51250.5),
                ("Active Loads", 7.0),
                ("Available Trucks", 0.0),
                ("Active Drivers", 9.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_reports_fall_back_to_demo_cards() {
        capture::begin();
        let view = load_reports(&OfflineApi).await;
        let entries = capture::finish();
        assert!(matches!(view.source, Source::Fallback(FallbackReason::Error(_))));
        assert_eq!(view.cards[0], card("Total Revenue", 297000.0));
        assert_eq!(view.cards[1], card("Total Expenses", 187000.0));
        assert_eq!(view.cards[2], card("Net Profit", 110000.0));
        assert_eq!(view.months.len(), 6);
        assert_eq!(capture::count(&entries, "fallback_used"), 1);
    }
}
