//! Announcement model

use serde::{Deserialize, Serialize};

/// A library announcement shown to patrons between two dates.
///
/// Dates are `YYYY-MM-DD` strings, as the library settings form stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub content: String,
    pub start: String,
    pub finish: String,
}
