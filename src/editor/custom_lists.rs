//! Custom list membership of a lane

use std::collections::BTreeSet;

use super::pending::Tracked;
use crate::{
    error::{AdminError, AdminResult},
    models::CustomList,
};

/// Working set of custom list ids attached to a lane.
///
/// Ids that do not match any available list are kept as they are; they just
/// cannot be picked again once removed.
#[derive(Debug, Clone)]
pub struct CustomListMembershipEditor {
    membership: Tracked<BTreeSet<i32>>,
    available: Vec<CustomList>,
}

impl CustomListMembershipEditor {
    pub fn new(saved: BTreeSet<i32>, available: Vec<CustomList>) -> Self {
        Self {
            membership: Tracked::new(saved),
            available,
        }
    }

    pub fn set_membership(&mut self, ids: BTreeSet<i32>) {
        let unknown = ids.iter().filter(|id| !self.is_available(**id)).count();
        if unknown > 0 {
            tracing::debug!(unknown, "Membership references lists that are not available");
        }
        self.membership.set(ids);
    }

    pub fn membership(&self) -> &BTreeSet<i32> {
        self.membership.current()
    }

    pub fn saved_membership(&self) -> &BTreeSet<i32> {
        self.membership.baseline()
    }

    /// Add a list picked from the available lists
    pub fn add(&mut self, list_id: i32) -> AdminResult<()> {
        if !self.is_available(list_id) {
            return Err(AdminError::NotFound(format!("Custom list {} is not available", list_id)));
        }
        self.membership.update(|ids| {
            ids.insert(list_id);
        });
        Ok(())
    }

    pub fn remove(&mut self, list_id: i32) {
        self.membership.update(|ids| {
            ids.remove(&list_id);
        });
    }

    pub fn reset(&mut self) {
        self.membership.reset();
    }

    pub fn rebase(&mut self, saved: BTreeSet<i32>) {
        self.membership.rebase(saved);
    }

    pub fn is_dirty(&self) -> bool {
        self.membership.is_dirty()
    }

    /// Replace the lists offered by the picker
    pub fn set_available(&mut self, available: Vec<CustomList>) {
        self.available = available;
    }

    pub fn all_custom_lists(&self) -> &[CustomList] {
        &self.available
    }

    /// Lists currently attached, in the order they are offered
    pub fn members(&self) -> Vec<&CustomList> {
        self.available
            .iter()
            .filter(|list| self.membership().contains(&list.id))
            .collect()
    }

    /// Lists the picker can still add
    pub fn available(&self) -> Vec<&CustomList> {
        self.available
            .iter()
            .filter(|list| !self.membership().contains(&list.id))
            .collect()
    }

    /// Member ids with no matching available list
    pub fn unknown_ids(&self) -> Vec<i32> {
        self.membership()
            .iter()
            .copied()
            .filter(|id| !self.is_available(*id))
            .collect()
    }

    fn is_available(&self, list_id: i32) -> bool {
        self.available.iter().any(|list| list.id == list_id)
    }
}
