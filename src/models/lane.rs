//! Lane model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A node of the lane tree, as served by the admin API.
///
/// The parent is not stored on the lane; it is found by looking the lane up
/// in the tree that owns it (see [`LaneTree::parent_of`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub id: i32,
    pub display_name: String,
    pub visible: bool,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub sublanes: Vec<Lane>,
    #[serde(default)]
    pub custom_list_ids: BTreeSet<i32>,
    #[serde(default)]
    pub inherit_parent_restrictions: bool,
}

/// Response body of the lane listing endpoint
#[derive(Debug, Deserialize)]
pub struct LanesResponse {
    pub lanes: Vec<Lane>,
}

/// Id assigned by the server to a created or updated lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedLane {
    pub id: i32,
}

/// Read-only snapshot of a library's lane forest.
#[derive(Debug, Clone, Default)]
pub struct LaneTree {
    lanes: Vec<Lane>,
    /// Parent selected in the create route, used when the lane being
    /// edited has not been saved yet.
    new_lane_parent: Option<i32>,
}

impl LaneTree {
    pub fn new(lanes: Vec<Lane>) -> Self {
        Self {
            lanes,
            new_lane_parent: None,
        }
    }

    /// Answer parent lookups for an unsaved lane with the given parent
    pub fn for_new_lane_under(mut self, parent_id: Option<i32>) -> Self {
        self.new_lane_parent = parent_id;
        self
    }

    /// Depth-first walk yielding each lane with its depth (0 for roots)
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Lane)> {
        let mut stack: Vec<(usize, &Lane)> = self.lanes.iter().rev().map(|l| (0, l)).collect();
        std::iter::from_fn(move || {
            let (depth, lane) = stack.pop()?;
            stack.extend(lane.sublanes.iter().rev().map(|s| (depth + 1, s)));
            Some((depth, lane))
        })
    }

    pub fn find(&self, id: i32) -> Option<&Lane> {
        self.iter().map(|(_, lane)| lane).find(|lane| lane.id == id)
    }

    /// Parent of a lane, or of the lane being created when `lane` is `None`.
    pub fn parent_of(&self, lane: Option<&Lane>) -> Option<&Lane> {
        match lane {
            Some(lane) => self
                .iter()
                .map(|(_, candidate)| candidate)
                .find(|candidate| candidate.sublanes.iter().any(|s| s.id == lane.id)),
            None => self.new_lane_parent.and_then(|id| self.find(id)),
        }
    }

    /// Number of lanes in the whole tree
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
