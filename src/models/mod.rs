//! Data models served by the admin API

pub mod announcement;
pub mod book;
pub mod complaint;
pub mod custom_list;
pub mod lane;

// Re-export commonly used types
pub use announcement::Announcement;
pub use book::BookData;
pub use custom_list::CustomList;
pub use lane::{Lane, LaneTree, SavedLane};
