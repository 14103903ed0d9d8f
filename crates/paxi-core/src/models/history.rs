//! Past visit records.

use serde::{Deserialize, Serialize};

/// Outcome of a past visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Completed,
    Pending,
    Cancelled,
}

/// A medical history entry for a pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Visit category (e.g., "Vaccination")
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub pet_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    pub status: HistoryStatus,
}
