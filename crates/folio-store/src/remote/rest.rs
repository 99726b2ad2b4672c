//! PostgREST client for the hosted projects table.

use std::time::Duration;

use async_trait::async_trait;
use folio_config::RemoteConfig;
use folio_core::entities::{ContactMessage, Project, ValidatedDraft};
use folio_core::ids::ProjectId;

use super::http::{check_response, parse_content_range_total, transport_error};
use super::{RemoteError, RemoteFailure, RemoteProjects, RemoteStatus};

/// Remote store speaking the PostgREST dialect (`/rest/v1/<table>`).
pub struct RestRemote {
    http: reqwest::Client,
    base: String,
    key: String,
    projects_table: String,
    contact_table: String,
}

impl std::fmt::Debug for RestRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestRemote")
            .field("base", &self.base)
            .field("projects_table", &self.projects_table)
            .field("contact_table", &self.contact_table)
            .finish_non_exhaustive()
    }
}

impl RestRemote {
    /// Build a client from config, or `None` when no remote is configured.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(config.timeout_secs.max(1)))
                .build()
                .expect("reqwest client should build"),
            base: config.rest_base(),
            key: config.anon_key.clone(),
            projects_table: config.projects_table.clone(),
            contact_table: config.contact_table.clone(),
        })
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{table}", self.base)
        } else {
            format!("{}/{table}?{query}", self.base)
        }
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
        let resp = builder.send().await.map_err(|e| transport_error(&e))?;
        check_response(resp).await
    }
}

#[async_trait]
impl RemoteProjects for RestRemote {
    async fn list(&self) -> Result<Vec<Project>, RemoteError> {
        let url = self.table_url(&self.projects_table, "select=*&order=created_at.desc");
        let resp = self.send(self.request(reqwest::Method::GET, &url)).await?;
        resp.json().await.map_err(|e| transport_error(&e))
    }

    async fn insert(&self, draft: &ValidatedDraft) -> Result<Project, RemoteError> {
        let url = self.table_url(&self.projects_table, "select=*");
        let builder = self
            .request(reqwest::Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(std::slice::from_ref(draft));
        let resp = self.send(builder).await?;
        let rows: Vec<Project> = resp.json().await.map_err(|e| transport_error(&e))?;
        rows.into_iter().next().ok_or_else(|| {
            RemoteError::new(RemoteFailure::Unknown, "insert returned no row")
        })
    }

    async fn remove(&self, id: &ProjectId) -> Result<(), RemoteError> {
        let query = format!("id=eq.{}", urlencoding::encode(&id.to_string()));
        let url = self.table_url(&self.projects_table, &query);
        self.send(self.request(reqwest::Method::DELETE, &url)).await?;
        Ok(())
    }

    async fn probe(&self) -> Result<RemoteStatus, RemoteError> {
        let url = self.table_url(&self.projects_table, "select=id&limit=1");
        let builder = self
            .request(reqwest::Method::GET, &url)
            .header("Prefer", "count=exact");
        let resp = self.send(builder).await?;
        Ok(RemoteStatus {
            rows: parse_content_range_total(&resp),
        })
    }

    async fn insert_contact(&self, message: &ContactMessage) -> Result<(), RemoteError> {
        let url = self.table_url(&self.contact_table, "");
        let builder = self
            .request(reqwest::Method::POST, &url)
            .header("Prefer", "return=minimal")
            .json(std::slice::from_ref(message));
        self.send(builder).await?;
        Ok(())
    }
}
