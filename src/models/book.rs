//! Book model

use serde::Deserialize;

/// Admin view of a book: its title and the action links the server offers
/// for it. A missing link means the action is not available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookData {
    #[serde(default)]
    pub title: String,
    pub hide_link: Option<String>,
    pub restore_link: Option<String>,
    pub refresh_link: Option<String>,
    pub issues_link: Option<String>,
}
