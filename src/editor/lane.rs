//! Lane editor
//!
//! Holds the draft of one lane (name, custom lists, inherit flag) and moves
//! between [`EditorState`]s as the user edits, saves, deletes or changes the
//! lane's visibility. The bound [`Lane`] is a read-only snapshot: after any
//! request the store pushes fresh data through [`LaneEditor::bind`].

use std::{collections::BTreeSet, fmt, sync::Arc};

use super::{
    custom_lists::CustomListMembershipEditor, name::NameEditor, payload::LaneForm,
    pending::{PendingChanges, Tracked},
    LaneCollaborators, ParentLookup,
};
use crate::{
    error::{AdminError, AdminResult, Confirmation},
    models::{CustomList, Lane, SavedLane},
    routes,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Draft matches the last saved values
    Viewing,
    /// At least one field differs from the last saved values
    Editing,
    /// A save request is in flight
    Saving,
    /// The lane was deleted; the editor accepts no further operations
    Deleted,
}

/// Where the lane sits in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentInfo {
    TopLevel,
    SublaneOf(String),
}

impl fmt::Display for ParentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentInfo::TopLevel => write!(f, "top-level lane"),
            ParentInfo::SublaneOf(parent) => write!(f, "sublane of {}", parent),
        }
    }
}

/// Whether readers can see the lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    HiddenByParent(String),
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Visible => write!(f, "visible"),
            Visibility::Hidden => write!(f, "hidden"),
            Visibility::HiddenByParent(parent) => {
                write!(f, "hidden, because parent {} is hidden", parent)
            }
        }
    }
}

/// Visibility control offered for the lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityAction {
    Hide,
    Show,
}

/// A save request handed out by [`LaneEditor::begin_save`].
///
/// Carries the submitted values so the baseline can move to exactly what
/// the server accepted, even if the user kept editing meanwhile.
#[derive(Debug, Clone)]
pub struct PendingSave {
    generation: u64,
    form: LaneForm,
    name: String,
    custom_list_ids: BTreeSet<i32>,
    inherit_parent_restrictions: bool,
}

impl PendingSave {
    pub fn form(&self) -> &LaneForm {
        &self.form
    }
}

pub struct LaneEditor {
    library: String,
    lane: Option<Lane>,
    /// Id of the bound lane, or of the lane this editor just created
    lane_id: Option<i32>,
    name: NameEditor,
    custom_lists: CustomListMembershipEditor,
    inherit_parent_restrictions: Tracked<bool>,
    state: EditorState,
    error: Option<String>,
    /// Bumped whenever the bound lane changes identity; save responses
    /// from an older generation are ignored.
    generation: u64,
    collaborators: LaneCollaborators,
}

impl LaneEditor {
    /// Create an editor for `lane`, or for a new lane when `lane` is `None`
    pub fn new(
        library: impl Into<String>,
        lane: Option<Lane>,
        custom_lists: Vec<CustomList>,
        collaborators: LaneCollaborators,
    ) -> Self {
        let (name, membership, inherit) = draft_from(lane.as_ref());
        Self {
            library: library.into(),
            lane_id: lane.as_ref().map(|l| l.id),
            lane,
            name,
            custom_lists: CustomListMembershipEditor::new(membership, custom_lists),
            inherit_parent_restrictions: Tracked::new(inherit),
            state: EditorState::Viewing,
            error: None,
            generation: 0,
            collaborators,
        }
    }

    /// Bind a fresh snapshot of the lane pushed by the store.
    ///
    /// The draft is rebuilt only when the lane identity changes.
    pub fn bind(&mut self, lane: Option<Lane>) {
        let same_identity = lane.as_ref().map(|l| l.id) == self.lane_id;
        if same_identity {
            self.lane = lane;
            return;
        }

        tracing::debug!(from = ?self.lane_id, to = ?lane.as_ref().map(|l| l.id), "Rebinding lane editor");
        let (name, membership, inherit) = draft_from(lane.as_ref());
        self.lane_id = lane.as_ref().map(|l| l.id);
        self.lane = lane;
        self.name = name;
        self.custom_lists = CustomListMembershipEditor::new(
            membership,
            self.custom_lists.all_custom_lists().to_vec(),
        );
        self.inherit_parent_restrictions = Tracked::new(inherit);
        self.state = EditorState::Viewing;
        self.error = None;
        self.generation += 1;
    }

    pub fn set_custom_lists(&mut self, custom_lists: Vec<CustomList>) {
        self.custom_lists.set_available(custom_lists);
    }

    pub fn set_parent_lookup(&mut self, parents: Arc<dyn ParentLookup>) {
        self.collaborators.parents = parents;
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn lane(&self) -> Option<&Lane> {
        self.lane.as_ref()
    }

    pub fn lane_id(&self) -> Option<i32> {
        self.lane_id
    }

    pub fn is_new(&self) -> bool {
        self.lane_id.is_none()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Message of the last failed request, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn name(&self) -> &NameEditor {
        &self.name
    }

    pub fn custom_lists(&self) -> &CustomListMembershipEditor {
        &self.custom_lists
    }

    /// The effective parent, as resolved by the parent lookup
    pub fn parent(&self) -> Option<Lane> {
        self.collaborators.parents.find_parent_of_lane(self.lane.as_ref())
    }

    pub fn parent_info(&self) -> ParentInfo {
        match self.parent() {
            Some(parent) => ParentInfo::SublaneOf(parent.display_name),
            None => ParentInfo::TopLevel,
        }
    }

    /// Visibility of a saved lane; `None` while the lane does not exist yet
    pub fn visibility(&self) -> Option<Visibility> {
        let lane = self.lane.as_ref()?;
        let visibility = match self.parent() {
            Some(parent) if !parent.visible => Visibility::HiddenByParent(parent.display_name),
            _ if lane.visible => Visibility::Visible,
            _ => Visibility::Hidden,
        };
        Some(visibility)
    }

    /// Draft inherit flag, or `None` when the lane has no parent and the
    /// setting does not apply.
    pub fn inherit_parent_restrictions(&self) -> Option<bool> {
        self.parent()
            .map(|_| *self.inherit_parent_restrictions.current())
    }

    pub fn pending_changes(&self) -> PendingChanges {
        PendingChanges {
            name: self.name.is_dirty(),
            custom_lists: self.custom_lists.is_dirty(),
            inherit_parent_restrictions: self.inherit_parent_restrictions.is_dirty(),
        }
    }

    /// Whether the "cancel changes" control is offered
    pub fn can_cancel(&self) -> bool {
        self.state == EditorState::Editing
    }

    pub fn can_save(&self) -> bool {
        matches!(self.state, EditorState::Viewing | EditorState::Editing)
    }

    pub fn can_delete(&self) -> bool {
        self.lane.is_some() && self.can_save()
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> AdminResult<()> {
        self.ensure_active()?;
        self.name.update(name);
        self.refresh_state();
        Ok(())
    }

    pub fn start_name_edit(&mut self) -> AdminResult<()> {
        self.ensure_active()?;
        self.name.start_edit();
        Ok(())
    }

    /// Text typed into the name field. It joins the draft when accepted or
    /// when the lane is saved.
    pub fn type_name(&mut self, text: impl Into<String>) -> AdminResult<()> {
        self.ensure_active()?;
        self.name.set_input(text);
        Ok(())
    }

    pub fn change_custom_lists(&mut self, ids: impl IntoIterator<Item = i32>) -> AdminResult<()> {
        self.ensure_active()?;
        self.custom_lists.set_membership(ids.into_iter().collect());
        self.refresh_state();
        Ok(())
    }

    pub fn add_custom_list(&mut self, list_id: i32) -> AdminResult<()> {
        self.ensure_active()?;
        self.custom_lists.add(list_id)?;
        self.refresh_state();
        Ok(())
    }

    pub fn remove_custom_list(&mut self, list_id: i32) -> AdminResult<()> {
        self.ensure_active()?;
        self.custom_lists.remove(list_id);
        self.refresh_state();
        Ok(())
    }

    /// Flip the inherit-parent-restrictions flag
    pub fn change_inherit_parent_restrictions(&mut self) -> AdminResult<()> {
        self.ensure_active()?;
        if self.parent().is_none() {
            return Err(AdminError::InvalidState(
                "A top-level lane has no parent restrictions to inherit".to_string(),
            ));
        }
        self.inherit_parent_restrictions.update(|flag| *flag = !*flag);
        self.refresh_state();
        Ok(())
    }

    /// Discard the draft
    pub fn cancel(&mut self) -> AdminResult<()> {
        self.ensure_active()?;
        if self.state == EditorState::Saving {
            return Err(AdminError::InvalidState(
                "Changes cannot be cancelled while saving".to_string(),
            ));
        }
        self.name.reset();
        self.custom_lists.reset();
        self.inherit_parent_restrictions.reset();
        self.state = EditorState::Viewing;
        tracing::debug!(lane_id = ?self.lane_id, "Cancelled lane changes");
        Ok(())
    }

    /// Build the save request and enter [`EditorState::Saving`]
    pub fn begin_save(&mut self) -> AdminResult<PendingSave> {
        self.ensure_active()?;
        if self.state == EditorState::Saving {
            return Err(AdminError::InvalidState(
                "A save is already in progress".to_string(),
            ));
        }

        let name = self.name.commit().to_string();
        self.refresh_state();
        if name.trim().is_empty() {
            return Err(AdminError::Validation("Lane name is required".to_string()));
        }

        let parent_id = self.parent().map(|parent| parent.id);
        let custom_list_ids = self.custom_lists.membership().clone();
        let inherit = *self.inherit_parent_restrictions.current();
        let form = LaneForm::build(self.lane_id, parent_id, &name, &custom_list_ids, inherit)?;

        tracing::info!(lane_id = ?self.lane_id, parent_id = ?parent_id, "Saving lane");
        self.state = EditorState::Saving;
        self.error = None;

        Ok(PendingSave {
            generation: self.generation,
            form,
            name,
            custom_list_ids,
            inherit_parent_restrictions: inherit,
        })
    }

    /// Apply the server's answer to a save request.
    ///
    /// Returns `Ok(None)` when the response is stale and was ignored.
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        result: AdminResult<SavedLane>,
    ) -> AdminResult<Option<SavedLane>> {
        if pending.generation != self.generation || self.state != EditorState::Saving {
            tracing::warn!(lane_id = ?self.lane_id, "Ignoring stale save response");
            return Ok(None);
        }

        self.state = EditorState::Viewing;
        match result {
            Ok(saved) => {
                let created = self.lane_id.is_none();
                self.lane_id = Some(saved.id);
                self.name.rebase(pending.name);
                self.custom_lists.rebase(pending.custom_list_ids);
                self.inherit_parent_restrictions
                    .rebase(pending.inherit_parent_restrictions);
                self.refresh_state();
                tracing::info!(lane_id = saved.id, created, "Lane saved");

                if created {
                    let location = routes::lane_edit_path(&self.library, saved.id);
                    self.collaborators.navigator.navigate(&location);
                }
                Ok(Some(saved))
            }
            Err(e) => {
                tracing::warn!(lane_id = ?self.lane_id, error = %e, "Lane save failed");
                self.error = Some(e.user_message());
                self.refresh_state();
                Err(e)
            }
        }
    }

    /// Submit the draft and wait for the server's answer
    pub async fn save(&mut self) -> AdminResult<SavedLane> {
        let pending = self.begin_save()?;
        let store = Arc::clone(&self.collaborators.store);
        let result = store.edit_lane(pending.form()).await;
        self.finish_save(pending, result)?
            .ok_or_else(|| AdminError::InvalidState("Save response was superseded".to_string()))
    }

    /// Delete the lane after the user confirms.
    ///
    /// The lane stays in the tree until the store pushes its removal.
    pub async fn delete(&mut self) -> AdminResult<Confirmation> {
        self.ensure_active()?;
        let lane = self.lane.clone().ok_or_else(|| {
            AdminError::InvalidState("A lane that was never saved cannot be deleted".to_string())
        })?;
        if self.state == EditorState::Saving {
            return Err(AdminError::InvalidState(
                "A lane cannot be deleted while saving".to_string(),
            ));
        }

        let message = format!(
            "Delete lane \"{}\" and its sublanes? This cannot be undone.",
            lane.display_name
        );
        if !self.collaborators.confirm.confirm(&message) {
            tracing::debug!(lane_id = lane.id, "Lane deletion declined");
            return Ok(Confirmation::Declined);
        }

        let store = Arc::clone(&self.collaborators.store);
        match store.delete_lane(&lane).await {
            Ok(()) => {
                tracing::info!(lane_id = lane.id, "Lane deleted");
                self.state = EditorState::Deleted;
                self.error = None;
                self.generation += 1;
                Ok(Confirmation::Confirmed)
            }
            Err(e) => {
                tracing::warn!(lane_id = lane.id, error = %e, "Lane deletion failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Visibility control to offer, if any.
    ///
    /// None for an unsaved lane, while a save is in flight and while the
    /// parent is hidden.
    pub fn visibility_action(&self) -> Option<VisibilityAction> {
        if matches!(self.state, EditorState::Deleted | EditorState::Saving) {
            return None;
        }
        let lane = self.lane.as_ref()?;
        if self.parent().is_some_and(|parent| !parent.visible) {
            return None;
        }
        Some(if lane.visible {
            VisibilityAction::Hide
        } else {
            VisibilityAction::Show
        })
    }

    /// Hide or show the lane. Only hiding asks for confirmation.
    pub async fn toggle_visibility(&mut self) -> AdminResult<Confirmation> {
        self.ensure_active()?;
        if self.state == EditorState::Saving {
            return Err(AdminError::InvalidState(
                "Lane visibility cannot be changed while saving".to_string(),
            ));
        }
        let action = self.visibility_action().ok_or_else(|| {
            AdminError::InvalidState("Lane visibility cannot be changed".to_string())
        })?;
        let lane = self.lane.clone().ok_or_else(|| {
            AdminError::InvalidState("A lane that was never saved cannot be hidden".to_string())
        })?;

        if action == VisibilityAction::Hide {
            let message = format!(
                "Hide lane \"{}\"? Readers will no longer see it.",
                lane.display_name
            );
            if !self.collaborators.confirm.confirm(&message) {
                tracing::debug!(lane_id = lane.id, "Hiding lane declined");
                return Ok(Confirmation::Declined);
            }
        }

        let store = Arc::clone(&self.collaborators.store);
        match store.toggle_lane_visibility(&lane).await {
            Ok(()) => {
                tracing::info!(lane_id = lane.id, action = ?action, "Lane visibility toggled");
                self.error = None;
                Ok(Confirmation::Confirmed)
            }
            Err(e) => {
                tracing::warn!(lane_id = lane.id, error = %e, "Lane visibility toggle failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn ensure_active(&self) -> AdminResult<()> {
        if self.state == EditorState::Deleted {
            return Err(AdminError::InvalidState("Lane has been deleted".to_string()));
        }
        Ok(())
    }

    fn refresh_state(&mut self) {
        if matches!(self.state, EditorState::Viewing | EditorState::Editing) {
            self.state = if self.pending_changes().any() {
                EditorState::Editing
            } else {
                EditorState::Viewing
            };
        }
    }
}

fn draft_from(lane: Option<&Lane>) -> (NameEditor, BTreeSet<i32>, bool) {
    match lane {
        Some(lane) => (
            NameEditor::new(Some(lane.display_name.as_str())),
            lane.custom_list_ids.clone(),
            lane.inherit_parent_restrictions,
        ),
        None => (NameEditor::new(None), BTreeSet::new(), false),
    }
}
