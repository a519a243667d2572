//! Summary statistics over a record set.
//!
//! A [`StatSpec`] is an ordered list of named reductions. [`aggregate`] runs
//! each one over the full record set; the result keeps declaration order so
//! stat cards render in a stable sequence.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::record::{Record, Selector};

pub type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Reduction {
    Count,
    CountWhere(Predicate),
    Sum(Selector),
    SumWhere(Predicate, Selector),
    /// Mean of the selected value; `0.0` over an empty set.
    Average(Selector),
}

impl fmt::Debug for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Count => write!(f, "Count"),
            Reduction::CountWhere(_) => write!(f, "CountWhere(..)"),
            Reduction::Sum(sel) => write!(f, "Sum({:?})", sel),
            Reduction::SumWhere(_, sel) => write!(f, "SumWhere(.., {:?})", sel),
            Reduction::Average(sel) => write!(f, "Average({:?})", sel),
        }
    }
}

impl Reduction {
    pub fn count_where<F>(pred: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Reduction::CountWhere(Arc::new(pred))
    }

    pub fn sum(sel: impl Into<Selector>) -> Self {
        Reduction::Sum(sel.into())
    }

    pub fn sum_where<F>(pred: F, sel: impl Into<Selector>) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Reduction::SumWhere(Arc::new(pred), sel.into())
    }

    pub fn average(sel: impl Into<Selector>) -> Self {
        Reduction::Average(sel.into())
    }

    fn apply(&self, records: &[Record]) -> f64 {
        match self {
            Reduction::Count => records.len() as f64,
            Reduction::CountWhere(pred) => records.iter().filter(|r| pred(r)).count() as f64,
            Reduction::Sum(sel) => records.iter().map(|r| sel.number(r)).sum(),
            Reduction::SumWhere(pred, sel) => records
                .iter()
                .filter(|r| pred(r))
                .map(|r| sel.number(r))
                .sum(),
            Reduction::Average(sel) => {
                if records.is_empty() {
                    return 0.0;
                }
                let total: f64 = records.iter().map(|r| sel.number(r)).sum();
                total / records.len() as f64
            }
        }
    }
}

/// Predicate: `record.status == status`.
pub fn status_is(status: &str) -> impl Fn(&Record) -> bool + Send + Sync + 'static {
    let status = status.to_string();
    move |r: &Record| r.status() == status
}

/// Predicate: the record's status is one of `statuses`.
pub fn status_in(statuses: &[&str]) -> impl Fn(&Record) -> bool + Send + Sync + 'static {
    let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
    move |r: &Record| {
        let status = r.status();
        statuses.iter().any(|s| *s == status)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatSpec {
    entries: Vec<(String, Reduction)>,
}

impl StatSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, reduction: Reduction) -> Self {
        self.entries.push((name.to_string(), reduction));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named values in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    values: Vec<(String, f64)>,
}

impl Aggregate {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Value rounded half away from zero, the way averages are shown on stat cards.
    pub fn rounded(&self, name: &str) -> Option<i64> {
        self.get(name).map(|v| v.round() as i64)
    }
}

impl Serialize for Aggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

pub fn aggregate(records: &[Record], spec: &StatSpec) -> Aggregate {
    Aggregate {
        values: spec
            .entries
            .iter()
            .map(|(name, reduction)| (name.clone(), reduction.apply(records)))
            .collect(),
    }
}
