//! Frontend Models
//!
//! Data structures matching the remote store's wire format.

use serde::{Deserialize, Serialize};

/// Approval status of a bill. Assigned `Pending` on creation,
/// only a reviewer moves it past that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// Expense bill record (matches the store's JSON shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Opaque identifier, empty until the store assigns one
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Expense category, e.g. "Hôtel et logement"
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: f64,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub vat: Option<f64>,
    #[serde(default)]
    pub pct: Option<u32>,
    #[serde(default)]
    pub commentary: Option<String>,
    /// Populated only after a successful receipt upload
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
    /// Set by a reviewer, round-trips untouched
    #[serde(default)]
    pub comment_admin: Option<String>,
}

/// Signed-in user as stored in the session blob
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default)]
    pub email: String,
}

/// Reference to a stored receipt file, returned by the upload call.
/// The store names the identifier `key` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub file_url: String,
    #[serde(alias = "key")]
    pub file_id: String,
}
