//! Hide, restore and metadata refresh for a single book

use std::{fmt, sync::Arc};

use super::{BookStore, CatalogRefresher};
use crate::{
    error::{AdminError, AdminResult},
    models::BookData,
    routes,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Hide,
    Restore,
    RefreshMetadata,
}

impl BookAction {
    const ALL: [BookAction; 3] = [BookAction::Hide, BookAction::Restore, BookAction::RefreshMetadata];
}

impl fmt::Display for BookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookAction::Hide => write!(f, "Hide"),
            BookAction::Restore => write!(f, "Restore"),
            BookAction::RefreshMetadata => write!(f, "Refresh Metadata"),
        }
    }
}

pub struct BookEditor {
    book_admin_url: String,
    book: Option<BookData>,
    error: Option<String>,
    store: Arc<dyn BookStore>,
    catalog: Arc<dyn CatalogRefresher>,
}

impl BookEditor {
    /// Editor for the book at `book_url`, its public catalog address
    pub fn new(
        book_url: &str,
        store: Arc<dyn BookStore>,
        catalog: Arc<dyn CatalogRefresher>,
    ) -> Self {
        Self {
            book_admin_url: routes::book_admin_url(book_url),
            book: None,
            error: None,
            store,
            catalog,
        }
    }

    pub fn book_admin_url(&self) -> &str {
        &self.book_admin_url
    }

    pub fn book(&self) -> Option<&BookData> {
        self.book.as_ref()
    }

    /// Message of the last failed request, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Actions the server currently offers for the book
    pub fn actions(&self) -> Vec<BookAction> {
        BookAction::ALL
            .into_iter()
            .filter(|action| self.link(*action).is_some())
            .collect()
    }

    /// Fetch the book again and reload the catalog
    pub async fn refresh(&mut self) -> AdminResult<()> {
        let result = self.store.fetch_book(&self.book_admin_url).await;
        self.catalog.refresh_catalog();
        match result {
            Ok(book) => {
                self.book = Some(book);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(url = %self.book_admin_url, error = %e, "Book fetch failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Run one of the offered actions, then refresh
    pub async fn perform(&mut self, action: BookAction) -> AdminResult<()> {
        let url = self
            .link(action)
            .map(str::to_string)
            .ok_or_else(|| AdminError::InvalidState(format!("{} is not available for this book", action)))?;

        if let Err(e) = self.store.edit_book(&url).await {
            tracing::warn!(action = ?action, error = %e, "Book action failed");
            self.error = Some(e.user_message());
            return Err(e);
        }
        tracing::info!(action = ?action, url = %self.book_admin_url, "Book updated");
        self.error = None;
        self.refresh().await
    }

    fn link(&self, action: BookAction) -> Option<&str> {
        let book = self.book.as_ref()?;
        let link = match action {
            BookAction::Hide => &book.hide_link,
            BookAction::Restore => &book.restore_link,
            BookAction::RefreshMetadata => &book.refresh_link,
        };
        link.as_deref()
    }
}
