//! Custom list model

use serde::{Deserialize, Serialize};

/// Summary of a curated list, as shown in pickers and the list sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomList {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub entry_count: i64,
}

/// Response body of the custom list listing endpoint
#[derive(Debug, Deserialize)]
pub struct CustomListsResponse {
    pub custom_lists: Vec<CustomList>,
}
