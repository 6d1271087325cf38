//! State carried between validation turns

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-session memory shared by the date validators
///
/// Serializable so callers can persist it between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTurnState {
    /// Last accepted arrival date, awaiting a departure date
    #[serde(default)]
    pub arrival_date: Option<NaiveDate>,
}

impl CrossTurnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.arrival_date = None;
    }
}
