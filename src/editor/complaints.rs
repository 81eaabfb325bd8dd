//! Complaints about a book, grouped by type

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use super::{CatalogRefresher, ComplaintStore, Confirm};
use crate::error::{AdminError, AdminResult, Confirmation};

const PROBLEM_TYPE_BASE: &str = "http://librarysimplified.org/terms/problem/";

/// Complaint types a staff member can file from the admin interface
pub const COMPLAINT_TYPES: [&str; 11] = [
    "cannot-issue-loan",
    "cannot-render",
    "wrong-title",
    "wrong-author",
    "wrong-audience",
    "cannot-fulfill-loan",
    "bad-description",
    "bad-cover-image",
    "wrong-medium",
    "wrong-age-range",
    "wrong-genre",
];

static PROBLEM_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/terms/problem/(.+)$").expect("Invalid problem type pattern"));

/// Human readable name of a complaint type URI.
///
/// `http://librarysimplified.org/terms/problem/wrong-genre` becomes
/// `wrong genre`; anything else is returned unchanged.
pub fn readable_complaint_type(complaint_type: &str) -> String {
    match PROBLEM_TYPE.captures(complaint_type) {
        Some(captures) => captures[1].replacen('-', " ", 1),
        None => complaint_type.to_string(),
    }
}

/// One row of the complaints table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintRow {
    pub complaint_type: String,
    pub label: String,
    pub count: u32,
}

pub struct ComplaintsPanel {
    book_admin_url: String,
    /// Where new complaints are posted; absent when the book takes none
    issues_url: Option<String>,
    complaints: IndexMap<String, u32>,
    store: Arc<dyn ComplaintStore>,
    confirm: Arc<dyn Confirm>,
    catalog: Arc<dyn CatalogRefresher>,
}

impl ComplaintsPanel {
    pub fn new(
        book_admin_url: impl Into<String>,
        store: Arc<dyn ComplaintStore>,
        confirm: Arc<dyn Confirm>,
        catalog: Arc<dyn CatalogRefresher>,
    ) -> Self {
        Self {
            book_admin_url: book_admin_url.into(),
            issues_url: None,
            complaints: IndexMap::new(),
            store,
            confirm,
            catalog,
        }
    }

    pub fn set_issues_url(&mut self, issues_url: Option<String>) {
        self.issues_url = issues_url;
    }

    /// Whether the complaint form is offered
    pub fn can_post_complaint(&self) -> bool {
        self.issues_url.is_some()
    }

    /// Replace the counts with a fresh snapshot from the store
    pub fn set_complaints(&mut self, complaints: IndexMap<String, u32>) {
        self.complaints = complaints;
    }

    pub fn rows(&self) -> Vec<ComplaintRow> {
        self.complaints
            .iter()
            .map(|(complaint_type, count)| ComplaintRow {
                complaint_type: complaint_type.clone(),
                label: readable_complaint_type(complaint_type),
                count: *count,
            })
            .collect()
    }

    /// Fetch the counts again and reload the catalog
    pub async fn refresh(&mut self) -> AdminResult<()> {
        let result = self.store.fetch_complaints(&self.book_admin_url).await;
        self.catalog.refresh_catalog();
        self.complaints = result?;
        Ok(())
    }

    /// File a complaint of one of [`COMPLAINT_TYPES`], then refresh
    pub async fn post_complaint(&mut self, complaint_type: &str) -> AdminResult<()> {
        let issues_url = self.issues_url.clone().ok_or_else(|| {
            AdminError::InvalidState("This book does not accept complaints".to_string())
        })?;
        if !COMPLAINT_TYPES.contains(&complaint_type) {
            return Err(AdminError::Validation("You must select a complaint type".to_string()));
        }

        let uri = format!("{}{}", PROBLEM_TYPE_BASE, complaint_type);
        self.store.post_complaint(&issues_url, &uri).await?;
        tracing::info!(complaint_type, "Complaint posted");
        self.refresh().await
    }

    /// Resolve every complaint of one type after the user confirms, then
    /// refresh
    pub async fn resolve(&mut self, complaint_type: &str) -> AdminResult<Confirmation> {
        if !self.complaints.contains_key(complaint_type) {
            return Err(AdminError::NotFound(format!(
                "No complaints of type {}",
                complaint_type
            )));
        }
        if !self
            .confirm
            .confirm("Are you sure you want to resolve all complaints of this type?")
        {
            return Ok(Confirmation::Declined);
        }

        self.store
            .resolve_complaints(&self.book_admin_url, complaint_type)
            .await?;
        tracing::info!(complaint_type, "Complaints resolved");
        self.refresh().await?;
        Ok(Confirmation::Confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{MockCatalogRefresher, MockComplaintStore, MockConfirm};

    const WRONG_GENRE: &str = "http://librarysimplified.org/terms/problem/wrong-genre";
    const BOOK_ADMIN_URL: &str = "http://example.org/admin/works/1";

    fn catalog(refreshes: usize) -> Arc<MockCatalogRefresher> {
        let mut catalog = MockCatalogRefresher::new();
        catalog.expect_refresh_catalog().times(refreshes).return_const(());
        Arc::new(catalog)
    }

    #[test]
    fn test_readable_complaint_type() {
        assert_eq!(readable_complaint_type(WRONG_GENRE), "wrong genre");
        assert_eq!(
            readable_complaint_type("http://librarysimplified.org/terms/problem/cannot-fulfill-loan"),
            "cannot fulfill-loan"
        );
        assert_eq!(readable_complaint_type("other"), "other");
    }

    #[tokio::test]
    async fn test_resolve_after_confirmation() {
        let mut store = MockComplaintStore::new();
        store
            .expect_resolve_complaints()
            .withf(|url, complaint_type| url == BOOK_ADMIN_URL && complaint_type == WRONG_GENRE)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_fetch_complaints()
            .withf(|url| url == BOOK_ADMIN_URL)
            .times(1)
            .returning(|_| Ok(IndexMap::new()));
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().times(1).return_const(true);

        let mut panel = ComplaintsPanel::new(BOOK_ADMIN_URL, Arc::new(store), Arc::new(confirm), catalog(1));
        panel.set_complaints(IndexMap::from([(WRONG_GENRE.to_string(), 2)]));

        assert_eq!(panel.rows()[0].label, "wrong genre");
        assert_eq!(panel.resolve(WRONG_GENRE).await.unwrap(), Confirmation::Confirmed);
        assert!(panel.rows().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_declined() {
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().times(1).return_const(false);
        let mut panel = ComplaintsPanel::new(
            BOOK_ADMIN_URL,
            Arc::new(MockComplaintStore::new()),
            Arc::new(confirm),
            catalog(0),
        );
        panel.set_complaints(IndexMap::from([(WRONG_GENRE.to_string(), 1)]));

        assert_eq!(panel.resolve(WRONG_GENRE).await.unwrap(), Confirmation::Declined);
        assert_eq!(panel.rows()[0].count, 1);
    }

    #[tokio::test]
    async fn test_post_complaint_then_refresh() {
        let mut store = MockComplaintStore::new();
        store
            .expect_post_complaint()
            .withf(|url, complaint_type| url == "http://example.org/works/1/issues" && complaint_type == WRONG_GENRE)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_fetch_complaints()
            .times(1)
            .returning(|_| Ok(IndexMap::from([(WRONG_GENRE.to_string(), 3)])));

        let mut panel = ComplaintsPanel::new(
            BOOK_ADMIN_URL,
            Arc::new(store),
            Arc::new(MockConfirm::new()),
            catalog(1),
        );
        panel.set_issues_url(Some("http://example.org/works/1/issues".to_string()));
        assert!(panel.can_post_complaint());

        panel.post_complaint("wrong-genre").await.unwrap();
        assert_eq!(panel.rows()[0].count, 3);
    }

    #[tokio::test]
    async fn test_post_complaint_requires_link_and_known_type() {
        let mut panel = ComplaintsPanel::new(
            BOOK_ADMIN_URL,
            Arc::new(MockComplaintStore::new()),
            Arc::new(MockConfirm::new()),
            catalog(0),
        );
        assert!(matches!(
            panel.post_complaint("wrong-genre").await,
            Err(AdminError::InvalidState(_))
        ));

        panel.set_issues_url(Some("http://example.org/works/1/issues".to_string()));
        assert!(matches!(panel.post_complaint("").await, Err(AdminError::Validation(_))));
    }
}
