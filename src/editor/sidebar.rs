//! Custom list sidebar: sorted list summaries with edit and delete controls

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, sync::Arc};

use super::{Confirm, CustomListStore};
use crate::{
    error::{AdminError, AdminResult, Confirmation},
    models::CustomList,
    routes,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Sort A-Z",
            SortOrder::Descending => "Sort Z-A",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// One row of the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: i32,
    pub name: String,
    pub entry_count: i64,
    /// The list currently open in the editor; shown as "Editing"
    pub is_active: bool,
    pub edit_path: String,
    pub can_delete: bool,
}

pub struct SortableListSidebar {
    library: String,
    lists: Vec<CustomList>,
    sort_order: SortOrder,
    active: Option<i32>,
    is_library_manager: bool,
    store: Arc<dyn CustomListStore>,
    confirm: Arc<dyn Confirm>,
}

impl SortableListSidebar {
    pub fn new(
        library: impl Into<String>,
        lists: Vec<CustomList>,
        is_library_manager: bool,
        store: Arc<dyn CustomListStore>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            library: library.into(),
            lists,
            sort_order: SortOrder::default(),
            active: None,
            is_library_manager,
            store,
            confirm,
        }
    }

    /// Replace the lists with a fresh snapshot from the store
    pub fn set_lists(&mut self, lists: Vec<CustomList>) {
        self.lists = lists;
    }

    pub fn set_active(&mut self, list_id: Option<i32>) {
        self.active = list_id;
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Switch between A-Z and Z-A
    pub fn change_sort(&mut self) {
        self.sort_order = self.sort_order.flipped();
    }

    pub fn create_path(&self) -> String {
        routes::list_create_path(&self.library)
    }

    /// Rows in display order
    pub fn entries(&self) -> Vec<SidebarEntry> {
        sorted(&self.lists, self.sort_order)
            .into_iter()
            .map(|list| SidebarEntry {
                id: list.id,
                name: list.name.clone(),
                entry_count: list.entry_count,
                is_active: self.active == Some(list.id),
                edit_path: routes::list_edit_path(&self.library, list.id),
                can_delete: self.is_library_manager,
            })
            .collect()
    }

    /// Delete a list after the user confirms.
    ///
    /// The sidebar keeps showing the list until the store pushes new lists.
    pub async fn request_delete(&self, list_id: i32) -> AdminResult<Confirmation> {
        if !self.is_library_manager {
            return Err(AdminError::Authorization(
                "Only library managers can delete lists".to_string(),
            ));
        }
        let list = self
            .lists
            .iter()
            .find(|list| list.id == list_id)
            .ok_or_else(|| AdminError::NotFound(format!("Custom list {} not found", list_id)))?;

        let message = format!("Delete list \"{}\"? This cannot be undone.", list.name);
        if !self.confirm.confirm(&message) {
            tracing::debug!(list_id, "List deletion declined");
            return Ok(Confirmation::Declined);
        }

        self.store.delete_custom_list(list).await?;
        tracing::info!(list_id, "Custom list deleted");
        Ok(Confirmation::Confirmed)
    }
}

/// Sort by name, ignoring case. Equal names keep their original order.
pub fn sorted(lists: &[CustomList], order: SortOrder) -> Vec<&CustomList> {
    let mut sorted: Vec<&CustomList> = lists.iter().collect();
    sorted.sort_by(|a, b| {
        let ordering = compare_names(&a.name, &b.name);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
