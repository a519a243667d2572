//! Loosely-typed domain records.
//!
//! The service returns loads, trucks, drivers, customers and invoices as
//! JSON objects whose exact field set varies between backend versions, so
//! records are kept as maps and read through coercing accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// Ordered records of one kind.
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value. Non-objects yield an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    /// String rendering of a field; absent and null read as `""`.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Numeric reading of a field; anything that is not a finite number reads as `0.0`.
    pub fn number(&self, field: &str) -> f64 {
        self.0.get(field).map(numeric).unwrap_or(0.0)
    }

    pub fn status(&self) -> String {
        self.text("status")
    }
}

fn numeric(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Parse a JSON array into a record set. Non-object elements become empty
/// records so positions are preserved.
pub fn record_set(values: Vec<Value>) -> RecordSet {
    values.into_iter().map(Record::from_value).collect()
}

/// How a displayed value is read off a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A single field.
    Field(String),
    /// The first alternative that is non-empty (text) or non-zero (number).
    FirstOf(Vec<String>),
    /// Non-empty parts joined with a single space.
    Joined(Vec<String>),
}

impl Selector {
    pub fn field(name: &str) -> Self {
        Selector::Field(name.to_string())
    }

    pub fn first_of(names: &[&str]) -> Self {
        Selector::FirstOf(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn joined(names: &[&str]) -> Self {
        Selector::Joined(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn text(&self, record: &Record) -> String {
        match self {
            Selector::Field(name) => record.text(name),
            Selector::FirstOf(names) => names
                .iter()
                .map(|n| record.text(n))
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
            Selector::Joined(names) => names
                .iter()
                .map(|n| record.text(n))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn number(&self, record: &Record) -> f64 {
        match self {
            Selector::Field(name) => record.number(name),
            Selector::FirstOf(names) => names
                .iter()
                .map(|n| record.number(n))
                .find(|n| *n != 0.0)
                .unwrap_or(0.0),
            Selector::Joined(names) => names.iter().map(|n| record.number(n)).sum(),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        Record::from_value(v)
    }

    #[test]
    fn test_text_coercion() {
        let r = rec(json!({"name": "Truck-001", "year": 2022, "vin": null}));
        assert_eq!(r.text("name"), "Truck-001");
        assert_eq!(r.text("year"), "2022");
        assert_eq!(r.text("vin"), "");
        assert_eq!(r.text("missing"), "");
    }

    #[test]
    fn test_number_coercion() {
        let r = rec(json!({"rate": 2500, "tax": "187.50", "note": "n/a", "flag": true}));
        assert_eq!(r.number("rate"), 2500.0);
        assert_eq!(r.number("tax"), 187.5);
        assert_eq!(r.number("note"), 0.0);
        assert_eq!(r.number("flag"), 0.0);
        assert_eq!(r.number("missing"), 0.0);
    }

    #[test]
    fn test_selector_first_of() {
        let with_number = rec(json!({"loadNumber": "LN-9", "id": "LD-001"}));
        let id_only = rec(json!({"id": "LD-002", "rateAmount": 900}));
        let sel = Selector::first_of(&["loadNumber", "id"]);
        assert_eq!(sel.text(&with_number), "LN-9");
        assert_eq!(sel.text(&id_only), "LD-002");
        assert_eq!(Selector::first_of(&["rate", "rateAmount"]).number(&id_only), 900.0);
    }

    #[test]
    fn test_selector_joined_skips_empty_parts() {
        let r = rec(json!({"firstName": "John", "lastName": null}));
        assert_eq!(Selector::joined(&["firstName", "lastName"]).text(&r), "John");
    }

    #[test]
    fn test_non_object_becomes_empty_record() {
        let set = record_set(vec![json!(1), json!({"id": 2})]);
        assert_eq!(set.len(), 2);
        assert!(set[0].fields().is_empty());
    }
}
