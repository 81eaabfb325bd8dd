//! Editing state for lanes, custom lists, books, complaints and
//! announcements.
//!
//! Editors own only their draft. Lanes, custom lists, books and complaints
//! belong to the server; editors reach them through the
//! collaborator traits below and never mutate a snapshot they were given.

pub mod announcements;
pub mod book;
pub mod complaints;
pub mod custom_lists;
pub mod lane;
pub mod name;
pub mod payload;
pub mod pending;
pub mod sidebar;

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

use crate::{
    error::AdminResult,
    models::{BookData, CustomList, Lane, LaneTree, SavedLane},
};

pub use announcements::AnnouncementsSection;
pub use book::{BookAction, BookEditor};
pub use complaints::ComplaintsPanel;
pub use custom_lists::CustomListMembershipEditor;
pub use lane::{EditorState, LaneEditor, ParentInfo, PendingSave, Visibility, VisibilityAction};
pub use name::NameEditor;
pub use payload::LaneForm;
pub use pending::{has_pending_change, PendingChanges, Tracked};
pub use sidebar::{SidebarEntry, SortOrder, SortableListSidebar};

/// Persistence of lanes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LaneStore: Send + Sync {
    /// Create or update a lane; resolves with the lane's id
    async fn edit_lane(&self, form: &LaneForm) -> AdminResult<SavedLane>;

    async fn delete_lane(&self, lane: &Lane) -> AdminResult<()>;

    async fn toggle_lane_visibility(&self, lane: &Lane) -> AdminResult<()>;
}

/// Persistence of custom lists
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomListStore: Send + Sync {
    async fn delete_custom_list(&self, list: &CustomList) -> AdminResult<()>;
}

/// Persistence of complaints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Complaint counts for a book, keyed by complaint type URI
    async fn fetch_complaints(&self, book_admin_url: &str) -> AdminResult<IndexMap<String, u32>>;

    async fn post_complaint(&self, issues_url: &str, complaint_type: &str) -> AdminResult<()>;

    async fn resolve_complaints(&self, book_admin_url: &str, complaint_type: &str) -> AdminResult<()>;
}

/// Admin requests on a single book
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn fetch_book(&self, book_admin_url: &str) -> AdminResult<BookData>;

    /// Post to one of the book's action links
    async fn edit_book(&self, url: &str) -> AdminResult<()>;
}

/// Reloads the catalog view after one of its books changed
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRefresher: Send + Sync {
    fn refresh_catalog(&self);
}

/// Resolves the effective parent of a lane.
///
/// `None` stands for the lane being created.
pub trait ParentLookup: Send + Sync {
    fn find_parent_of_lane(&self, lane: Option<&Lane>) -> Option<Lane>;
}

impl ParentLookup for LaneTree {
    fn find_parent_of_lane(&self, lane: Option<&Lane>) -> Option<Lane> {
        self.parent_of(lane).cloned()
    }
}

/// Blocking yes/no prompt shown to the user
#[cfg_attr(test, mockall::automock)]
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Client-side navigation to another admin view
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Capabilities a lane editor is handed by its container
#[derive(Clone)]
pub struct LaneCollaborators {
    pub store: Arc<dyn LaneStore>,
    pub parents: Arc<dyn ParentLookup>,
    pub confirm: Arc<dyn Confirm>,
    pub navigator: Arc<dyn Navigator>,
}
