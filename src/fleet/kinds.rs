use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fallback;
use crate::aggregate::{status_in, status_is, Reduction, StatSpec};
use crate::record::{RecordSet, Selector};

pub const LOAD_STATUSES: [&str; 5] = ["CREATED", "DISPATCHED", "PICKED_UP", "IN_TRANSIT", "DELIVERED"];

/// The list pages of the back office, one per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Loads,
    Trucks,
    Drivers,
    Customers,
    Invoices,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Loads,
        RecordKind::Trucks,
        RecordKind::Drivers,
        RecordKind::Customers,
        RecordKind::Invoices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Loads => "loads",
            RecordKind::Trucks => "trucks",
            RecordKind::Drivers => "drivers",
            RecordKind::Customers => "customers",
            RecordKind::Invoices => "invoices",
        }
    }

    /// Path relative to the versioned API base.
    pub fn endpoint(&self) -> &'static str {
        self.as_str()
    }

    pub fn searchable(&self) -> Vec<Selector> {
        match self {
            RecordKind::Loads => vec![
                Selector::first_of(&["loadNumber", "id"]),
                "customer".into(),
                "origin".into(),
                "destination".into(),
            ],
            RecordKind::Trucks => vec![
                Selector::first_of(&["truckNumber", "number"]),
                "make".into(),
                "model".into(),
            ],
            RecordKind::Drivers => vec![
                Selector::joined(&["firstName", "lastName"]),
                "name".into(),
                "email".into(),
                "phone".into(),
            ],
            RecordKind::Customers => vec![
                Selector::first_of(&["companyName", "name"]),
                Selector::first_of(&["contactPerson", "contact"]),
                "email".into(),
                "city".into(),
            ],
            RecordKind::Invoices => vec!["invoiceNumber".into(), "customer".into()],
        }
    }

    /// Status values offered by the page's status dropdown; empty when the page has none.
    pub fn status_options(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Loads => &LOAD_STATUSES,
            _ => &[],
        }
    }

    pub fn stat_spec(&self) -> StatSpec {
        match self {
            RecordKind::Loads => StatSpec::new()
                .with("total", Reduction::Count)
                .with("active", Reduction::count_where(status_in(&["IN_TRANSIT", "PICKED_UP"])))
                .with("delivered", Reduction::count_where(status_is("DELIVERED")))
                .with("totalRevenue", Reduction::sum(Selector::first_of(&["rate", "rateAmount"]))),
            RecordKind::Trucks => StatSpec::new()
                .with("total", Reduction::Count)
                .with("available", Reduction::count_where(status_is("AVAILABLE")))
                .with("inTransit", Reduction::count_where(status_is("IN_TRANSIT")))
                .with("maintenance", Reduction::count_where(status_is("MAINTENANCE"))),
            RecordKind::Drivers => StatSpec::new()
                .with("total", Reduction::Count)
                .with("available", Reduction::count_where(status_is("AVAILABLE")))
                .with("onDuty", Reduction::count_where(status_is("ON_DUTY")))
                .with("avgSafety", Reduction::average("safetyScore")),
            RecordKind::Customers => StatSpec::new()
                .with("total", Reduction::Count)
                .with("totalRevenue", Reduction::sum("revenue"))
                .with("totalBalance", Reduction::sum("balance"))
                .with("avgCreditLimit", Reduction::average("creditLimit")),
            RecordKind::Invoices => {
                let amount = || Selector::first_of(&["total", "amount"]);
                StatSpec::new()
                    .with("total", Reduction::sum(amount()))
                    .with("paid", Reduction::sum_where(status_is("PAID"), amount()))
                    .with("pending", Reduction::sum_where(status_is("PENDING"), amount()))
                    .with("overdue", Reduction::sum_where(status_is("OVERDUE"), amount()))
            }
        }
    }

    pub fn fallback(&self) -> RecordSet {
        match self {
            RecordKind::Loads => fallback::loads(),
            RecordKind::Trucks => fallback::trucks(),
            RecordKind::Drivers => fallback::drivers(),
            RecordKind::Customers => fallback::customers(),
            RecordKind::Invoices => fallback::invoices(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown record kind '{}'", s))
    }
}
