//! Search and status filtering over a record set.

use serde::{Deserialize, Serialize};

use crate::record::{Record, Selector};

pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    All,
    Is(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Category::All
        } else {
            Category::Is(raw.to_string())
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::All => ALL.to_string(),
            Category::Is(s) => s,
        }
    }
}

/// The user's current narrowing criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub text: String,
    pub category: Category,
}

impl FilterQuery {
    pub fn new(text: &str, category: &str) -> Self {
        Self {
            text: text.to_string(),
            category: Category::parse(category),
        }
    }

    pub fn search(text: &str) -> Self {
        Self::new(text, ALL)
    }

    pub fn everything() -> Self {
        Self::new("", ALL)
    }
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self::everything()
    }
}

pub fn matches(record: &Record, query: &FilterQuery, fields: &[Selector]) -> bool {
    text_matches(record, &query.text, fields) && category_matches(record, &query.category)
}

fn text_matches(record: &Record, text: &str, fields: &[Selector]) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    fields
        .iter()
        .any(|sel| sel.text(record).to_lowercase().contains(&needle))
}

fn category_matches(record: &Record, category: &Category) -> bool {
    match category {
        Category::All => true,
        Category::Is(status) => record.status() == *status,
    }
}

/// Records matching `query`, in their original order.
pub fn filter<'a>(records: &'a [Record], query: &FilterQuery, fields: &[Selector]) -> Vec<&'a Record> {
    records.iter().filter(|r| matches(r, query, fields)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record_set;
    use serde_json::json;

    fn fields() -> Vec<Selector> {
        vec!["name".into(), "city".into()]
    }

    #[test]
    fn test_identity_filter_matches_everything() {
        let records = record_set(vec![json!({}), json!({"name": "X", "status": "DELIVERED"})]);
        let q = FilterQuery::everything();
        assert!(records.iter().all(|r| matches(r, &q, &fields())));
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let r = Record::from_value(json!({"name": "Global Cargo", "city": "Miami"}));
        assert!(matches(&r, &FilterQuery::search("gLoBaL"), &fields()));
        assert!(matches(&r, &FilterQuery::search("MIA"), &fields()));
        assert!(!matches(&r, &FilterQuery::search("dallas"), &fields()));
    }

    #[test]
    fn test_missing_fields_do_not_match_or_fault() {
        let r = Record::from_value(json!({"name": null}));
        assert!(!matches(&r, &FilterQuery::search("a"), &fields()));
    }

    #[test]
    fn test_category_is_exact() {
        let r = Record::from_value(json!({"name": "a", "status": "IN_TRANSIT"}));
        assert!(matches(&r, &FilterQuery::new("", "IN_TRANSIT"), &fields()));
        assert!(!matches(&r, &FilterQuery::new("", "in_transit"), &fields()));
        assert!(!matches(&r, &FilterQuery::new("zzz", "IN_TRANSIT"), &fields()));
    }

    #[test]
    fn test_filter_is_stable() {
        let records = record_set(vec![
            json!({"name": "a1"}),
            json!({"name": "b"}),
            json!({"name": "a2"}),
            json!({"name": "a3"}),
        ]);
        let out = filter(&records, &FilterQuery::search("a"), &fields());
        let names: Vec<String> = out.iter().map(|r| r.text("name")).collect();
        assert_eq!(names, vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_category_serde_uses_all_sentinel() {
        let q: FilterQuery = serde_json::from_value(json!({"text": "x", "category": "all"})).unwrap();
        assert_eq!(q.category, Category::All);
        let back = serde_json::to_value(FilterQuery::new("", "PAID")).unwrap();
        assert_eq!(back["category"], "PAID");
    }
}
