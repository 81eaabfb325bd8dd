//! Complaint model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Complaint counts for one book, keyed by complaint type URI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintsResponse {
    #[serde(default)]
    pub complaints: IndexMap<String, u32>,
}

/// Body posted to a book's issues link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComplaint {
    #[serde(rename = "type")]
    pub complaint_type: String,
}
