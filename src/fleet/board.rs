//! Kanban grouping of loads for the dispatch board.

use serde::Serialize;

use crate::record::Record;

/// Board columns, left to right.
pub const COLUMNS: [(&str, &str); 4] = [
    ("created", "Created"),
    ("dispatched", "Dispatched"),
    ("in_transit", "In Transit"),
    ("delivered", "Delivered"),
];

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub id: &'static str,
    pub title: &'static str,
    pub cards: Vec<Record>,
}

impl Column {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchBoard {
    pub columns: Vec<Column>,
    /// Loads whose status has no column (e.g. `assigned`).
    pub unplaced: Vec<Record>,
}

impl DispatchBoard {
    /// Statuses are matched case-insensitively so both `IN_TRANSIT` and `in_transit` land in the same column.
    pub fn group(records: &[Record]) -> Self {
        let mut columns: Vec<Column> = COLUMNS
            .iter()
            .map(|&(id, title)| Column {
                id,
                title,
                cards: Vec::new(),
            })
            .collect();
        let mut unplaced = Vec::new();

        for record in records {
            let status = record.status().to_lowercase();
            match columns.iter_mut().find(|c| c.id == status) {
                Some(column) => column.cards.push(record.clone()),
                None => unplaced.push(record.clone()),
            }
        }

        Self { columns, unplaced }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }
}
