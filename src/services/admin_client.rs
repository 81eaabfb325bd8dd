//! HTTP client for the circulation server's admin API

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{header::ACCEPT, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::AdminApiConfig,
    editor::{BookStore, ComplaintStore, CustomListStore, LaneForm, LaneStore},
    error::{AdminError, AdminResult},
    models::{
        complaint::{ComplaintsResponse, NewComplaint},
        custom_list::CustomListsResponse,
        lane::LanesResponse,
        BookData, CustomList, Lane, LaneTree, SavedLane,
    },
};

/// Error body returned by the server on failed admin requests
#[derive(Debug, Deserialize)]
struct ProblemDetail {
    title: Option<String>,
    detail: Option<String>,
}

#[derive(Clone)]
pub struct AdminClient {
    http: Client,
    base_url: String,
    library: String,
    csrf_token: Option<String>,
}

impl AdminClient {
    pub fn new(config: &AdminApiConfig) -> AdminResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            library: config.library.clone(),
            csrf_token: config.csrf_token.clone(),
        })
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    /// Fetch the library's lane tree
    pub async fn fetch_lanes(&self) -> AdminResult<LaneTree> {
        let url = self.admin_url("lanes");
        tracing::debug!(%url, "Fetching lanes");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body: LanesResponse = response.json().await?;
        Ok(LaneTree::new(body.lanes))
    }

    /// Fetch the library's custom lists
    pub async fn fetch_custom_lists(&self) -> AdminResult<Vec<CustomList>> {
        let url = self.admin_url("custom_lists");
        tracing::debug!(%url, "Fetching custom lists");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body: CustomListsResponse = response.json().await?;
        Ok(body.custom_lists)
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/{}/admin/{}", self.base_url, self.library, path)
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => request.header("X-CSRF-Token", token),
            None => request,
        }
    }
}

#[async_trait]
impl LaneStore for AdminClient {
    async fn edit_lane(&self, form: &LaneForm) -> AdminResult<SavedLane> {
        let url = self.admin_url("lanes");
        tracing::debug!(%url, new = form.is_new(), "Submitting lane");
        let response = self.with_csrf(self.http.post(&url).form(form)).send().await?;
        let body = successful_body(response, AdminError::SaveFailure).await?;
        parse_lane_id(&body).map(|id| SavedLane { id })
    }

    async fn delete_lane(&self, lane: &Lane) -> AdminResult<()> {
        let url = self.admin_url(&format!("lanes/{}", lane.id));
        tracing::debug!(%url, "Deleting lane");
        let response = self.with_csrf(self.http.delete(&url)).send().await?;
        successful_body(response, AdminError::DeleteFailure).await?;
        Ok(())
    }

    async fn toggle_lane_visibility(&self, lane: &Lane) -> AdminResult<()> {
        let action = if lane.visible { "hide" } else { "show" };
        let url = self.admin_url(&format!("lanes/{}/{}", lane.id, action));
        tracing::debug!(%url, "Toggling lane visibility");
        let response = self.with_csrf(self.http.post(&url)).send().await?;
        successful_body(response, AdminError::SaveFailure).await?;
        Ok(())
    }
}

#[async_trait]
impl CustomListStore for AdminClient {
    async fn delete_custom_list(&self, list: &CustomList) -> AdminResult<()> {
        let url = self.admin_url(&format!("custom_list/{}", list.id));
        tracing::debug!(%url, "Deleting custom list");
        let response = self.with_csrf(self.http.delete(&url)).send().await?;
        successful_body(response, AdminError::DeleteFailure).await?;
        Ok(())
    }
}

#[async_trait]
impl ComplaintStore for AdminClient {
    async fn fetch_complaints(&self, book_admin_url: &str) -> AdminResult<IndexMap<String, u32>> {
        let url = format!("{}/complaints", book_admin_url);
        tracing::debug!(%url, "Fetching complaints");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body: ComplaintsResponse = response.json().await?;
        Ok(body.complaints)
    }

    async fn post_complaint(&self, issues_url: &str, complaint_type: &str) -> AdminResult<()> {
        tracing::debug!(url = %issues_url, complaint_type, "Posting complaint");
        let complaint = NewComplaint {
            complaint_type: complaint_type.to_string(),
        };
        let request = self.http.post(issues_url).json(&complaint);
        let response = self.with_csrf(request).send().await?;
        successful_body(response, AdminError::SaveFailure).await?;
        Ok(())
    }

    async fn resolve_complaints(&self, book_admin_url: &str, complaint_type: &str) -> AdminResult<()> {
        let url = format!("{}/resolve_complaints", book_admin_url);
        tracing::debug!(%url, complaint_type, "Resolving complaints");
        let request = self.http.post(&url).form(&[("type", complaint_type)]);
        let response = self.with_csrf(request).send().await?;
        successful_body(response, AdminError::SaveFailure).await?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for AdminClient {
    async fn fetch_book(&self, book_admin_url: &str) -> AdminResult<BookData> {
        tracing::debug!(url = %book_admin_url, "Fetching book");
        let request = self.http.get(book_admin_url).header(ACCEPT, "application/json");
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn edit_book(&self, url: &str) -> AdminResult<()> {
        tracing::debug!(%url, "Posting book action");
        let response = self.with_csrf(self.http.post(url)).send().await?;
        successful_body(response, AdminError::SaveFailure).await?;
        Ok(())
    }
}

/// Body of a successful response. A failure status becomes `failure` with
/// the server's explanation.
async fn successful_body(
    response: Response,
    failure: fn(String) -> AdminError,
) -> AdminResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(failure(failure_message(status, &body)))
    }
}

fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(problem) = serde_json::from_str::<ProblemDetail>(body) {
        if let Some(message) = problem.detail.or(problem.title) {
            return message;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

/// The lane endpoint answers with the lane id as plain text
fn parse_lane_id(body: &str) -> AdminResult<i32> {
    body.trim()
        .parse()
        .map_err(|_| AdminError::SaveFailure(format!("Unexpected response to lane save: {:?}", body)))
}
