use crate::models::{CoverType, TerrainInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one completed prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub elevation: i32,
    pub slope: i32,
    pub aspect: i32,
    pub wilderness: u8,
    pub soil_type: u8,
    pub prediction: CoverType,
    pub class: u8,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(input: &TerrainInput, prediction: CoverType) -> Self {
        Self {
            elevation: input.elevation,
            slope: input.slope,
            aspect: input.aspect,
            wilderness: input.wilderness_area,
            soil_type: input.soil_type,
            prediction,
            class: prediction.class(),
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only prediction log for a single session.
///
/// Records are kept oldest-first; readers that display or export use
/// [`PredictionHistory::recent_first`].
#[derive(Debug, Clone, Default)]
pub struct PredictionHistory {
    records: Vec<HistoryRecord>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Records newest first
    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }
}
