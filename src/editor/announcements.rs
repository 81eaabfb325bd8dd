//! Announcements list of the library settings form

use std::sync::Arc;

use super::Confirm;
use crate::{
    error::{AdminError, AdminResult, Confirmation},
    models::Announcement,
};

/// A library shows at most this many announcements at once
pub const MAX_ANNOUNCEMENTS: usize = 3;

/// Working list of a library's announcements.
///
/// Editing an announcement takes it out of the list and into the form until
/// it is added back.
pub struct AnnouncementsSection {
    announcements: Vec<Announcement>,
    editing: Option<Announcement>,
    confirm: Arc<dyn Confirm>,
}

impl AnnouncementsSection {
    pub fn new(announcements: Vec<Announcement>, confirm: Arc<dyn Confirm>) -> Self {
        let mut section = Self {
            announcements: Vec::with_capacity(announcements.len()),
            editing: None,
            confirm,
        };
        for announcement in announcements {
            section.push(announcement);
        }
        section
    }

    /// The list as it will be submitted with the settings form
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    /// Announcement the form is prefilled with
    pub fn editing(&self) -> Option<&Announcement> {
        self.editing.as_ref()
    }

    /// Whether the form is offered
    pub fn can_add(&self) -> bool {
        self.announcements.len() < MAX_ANNOUNCEMENTS
    }

    /// Add the announcement from the form to the list
    pub fn add(&mut self, announcement: Announcement) -> AdminResult<()> {
        if !self.can_add() {
            return Err(AdminError::InvalidState(format!(
                "A library can have at most {} announcements",
                MAX_ANNOUNCEMENTS
            )));
        }
        if announcement.content.trim().is_empty() {
            return Err(AdminError::Validation("Announcement content is required".to_string()));
        }
        if !announcement.finish.is_empty() && announcement.finish < announcement.start {
            return Err(AdminError::Validation(
                "An announcement cannot end before it starts".to_string(),
            ));
        }

        self.editing = None;
        self.push(announcement);
        Ok(())
    }

    /// Move an announcement into the form
    pub fn edit(&mut self, id: i32) -> AdminResult<()> {
        let position = self.position(id)?;
        if let Some(previous) = self.editing.take() {
            self.announcements.push(previous);
        }
        self.editing = Some(self.announcements.remove(position));
        Ok(())
    }

    /// Remove an announcement after the user confirms
    pub fn delete(&mut self, id: i32) -> AdminResult<Confirmation> {
        let position = self.position(id)?;
        if !self.confirm.confirm(
            "This will remove this announcement from your list. Are you sure you want to continue?",
        ) {
            return Ok(Confirmation::Declined);
        }
        let removed = self.announcements.remove(position);
        tracing::debug!(id = ?removed.id, "Announcement removed");
        Ok(Confirmation::Confirmed)
    }

    fn position(&self, id: i32) -> AdminResult<usize> {
        self.announcements
            .iter()
            .position(|a| a.id == Some(id))
            .ok_or_else(|| AdminError::NotFound(format!("Announcement {}", id)))
    }

    /// Append, giving the announcement an id when it has none so it can be
    /// edited and deleted
    fn push(&mut self, mut announcement: Announcement) {
        if announcement.id.is_none() {
            let next = self
                .announcements
                .iter()
                .chain(self.editing.iter())
                .filter_map(|a| a.id)
                .max()
                .map_or(1, |id| id + 1);
            announcement.id = Some(next);
        }
        self.announcements.push(announcement);
    }
}
