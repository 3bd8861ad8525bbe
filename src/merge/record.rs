//! Per-item outcomes of the move stage.

use serde::Serialize;

/// Outcome of moving one top-level child of the restore directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Failed(String),
}

/// One entry per top-level child; created by the mover and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub name: String,
    pub outcome: MoveOutcome,
}

impl MoveRecord {
    pub fn moved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: MoveOutcome::Moved,
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: MoveOutcome::Failed(error.into()),
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self.outcome, MoveOutcome::Moved)
    }
}

/// A failed item as reported to callers (name plus error text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveFailure {
    #[serde(rename = "item")]
    pub name: String,
    pub error: String,
}

/// Ordered list of records produced by a full pass over the restore directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveReport {
    records: Vec<MoveRecord>,
}

impl MoveReport {
    pub(crate) fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Names of moved items, in the order they were processed.
    pub fn moved(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.is_moved())
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn failed(&self) -> Vec<MoveFailure> {
        self.records
            .iter()
            .filter_map(|r| match &r.outcome {
                MoveOutcome::Failed(error) => Some(MoveFailure {
                    name: r.name.clone(),
                    error: error.clone(),
                }),
                MoveOutcome::Moved => None,
            })
            .collect()
    }

    pub fn moved_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_moved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records.len() - self.moved_count()
    }
}
