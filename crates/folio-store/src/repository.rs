//! Remote-first project repository with local fallback.
//!
//! The repository owns the in-memory snapshot of projects. Reads and writes
//! try the remote store first; when it fails (or none is configured) the
//! local store takes over and the caller gets the failure back as an
//! advisory instead of an error. The local store always mirrors the latest
//! snapshot.
//!
//! The snapshot lock is never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_core::clock::Clock;
use folio_core::entities::{ContactMessage, Project, ProjectStats, ValidatedDraft};
use folio_core::enums::StoreSource;
use folio_core::ids::{ProjectId, synthesize_local_id};
use serde::Serialize;

use crate::error::LocalStorageError;
use crate::keys;
use crate::local::LocalStore;
use crate::remote::{RemoteError, RemoteProjects, RemoteStatus};
use crate::seed::demo_projects;

/// Outcome of [`ProjectRepository::load_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub source: StoreSource,
    pub count: usize,
    /// The remote failure that forced the local fallback, if any.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "as_display")]
    pub advisory: Option<RemoteError>,
    /// Whether the local mirror accepted the new snapshot.
    pub mirrored: bool,
}

/// Outcome of [`ProjectRepository::save_one`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub project: Project,
    pub stored_in: StoreSource,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "as_display")]
    pub advisory: Option<RemoteError>,
    pub mirrored: bool,
}

impl SaveReport {
    /// The project was kept only locally although a remote was configured.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Outcome of [`ProjectRepository::delete_one`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    pub id: ProjectId,
    /// Whether the project was in the snapshot at all.
    pub removed: bool,
    /// Remote delete failure. The project is gone locally regardless.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "as_display")]
    pub advisory: Option<RemoteError>,
    pub mirrored: bool,
}

#[allow(clippy::ref_option)]
fn as_display<S: serde::Serializer>(
    value: &Option<RemoteError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

pub struct ProjectRepository {
    remote: Option<Arc<dyn RemoteProjects>>,
    local: LocalStore,
    clock: Arc<dyn Clock>,
    seed: Vec<Project>,
    snapshot: Mutex<Vec<Project>>,
}

impl std::fmt::Debug for ProjectRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRepository")
            .field("has_remote", &self.remote.is_some())
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

impl ProjectRepository {
    /// Create a repository with an empty snapshot. Call
    /// [`Self::load_all`] before reading.
    pub fn new(
        remote: Option<Arc<dyn RemoteProjects>>,
        local: LocalStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            remote,
            local,
            clock,
            seed: demo_projects(),
            snapshot: Mutex::new(Vec::new()),
        }
    }

    /// Replace the data used when the local store holds no projects.
    #[must_use]
    pub fn with_seed(mut self, seed: Vec<Project>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    fn snapshot(&self) -> MutexGuard<'_, Vec<Project>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mirror(&self, projects: &[Project]) -> bool {
        self.local.save(keys::PROJECTS, projects)
    }

    fn load_local(&self) -> Vec<Project> {
        let stored: Vec<Project> = self.local.load(keys::PROJECTS, Vec::new());
        if stored.is_empty() {
            self.seed.clone()
        } else {
            stored
        }
    }

    /// Refresh the snapshot, remote first.
    ///
    /// A remote success replaces the snapshot and is mirrored locally. A
    /// remote failure falls back to the local store (or the seed when it is
    /// empty) and is returned as the report's advisory.
    pub async fn load_all(&self) -> LoadReport {
        let fetched = match &self.remote {
            Some(remote) => Some(remote.list().await),
            None => None,
        };

        match fetched {
            Some(Ok(projects)) => {
                let count = projects.len();
                let mirrored = self.mirror(&projects);
                *self.snapshot() = projects;
                tracing::info!(count, mirrored, "loaded projects from remote");
                LoadReport {
                    source: StoreSource::Remote,
                    count,
                    advisory: None,
                    mirrored,
                }
            }
            Some(Err(error)) => {
                tracing::warn!(cause = %error.cause, %error, "remote load failed; using local store");
                self.replace_from_local(Some(error))
            }
            None => self.replace_from_local(None),
        }
    }

    fn replace_from_local(&self, advisory: Option<RemoteError>) -> LoadReport {
        let projects = self.load_local();
        let count = projects.len();
        *self.snapshot() = projects;
        tracing::debug!(count, "loaded projects from local store");
        LoadReport {
            source: StoreSource::Local,
            count,
            advisory,
            mirrored: true,
        }
    }

    /// Persist a validated draft, remote first.
    ///
    /// On remote success the stored record (with the remote's id) is
    /// prepended to the snapshot and mirrored. On remote failure the draft
    /// gets a local id and is persisted locally; the remote failure is
    /// returned as the advisory.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStorageError`] when the project could only be kept
    /// locally and the local write failed. The snapshot is unchanged.
    pub async fn save_one(&self, draft: ValidatedDraft) -> Result<SaveReport, LocalStorageError> {
        let inserted = match &self.remote {
            Some(remote) => Some(remote.insert(&draft).await),
            None => None,
        };

        match inserted {
            Some(Ok(project)) => {
                let mirrored = {
                    let mut snapshot = self.snapshot();
                    snapshot.retain(|p| p.id != project.id);
                    snapshot.insert(0, project.clone());
                    self.mirror(&snapshot)
                };
                tracing::info!(id = %project.id, mirrored, "saved project to remote");
                Ok(SaveReport {
                    project,
                    stored_in: StoreSource::Remote,
                    advisory: None,
                    mirrored,
                })
            }
            Some(Err(error)) => {
                tracing::warn!(cause = %error.cause, %error, "remote save failed; saving locally");
                self.save_locally(draft, Some(error))
            }
            None => self.save_locally(draft, None),
        }
    }

    fn save_locally(
        &self,
        draft: ValidatedDraft,
        advisory: Option<RemoteError>,
    ) -> Result<SaveReport, LocalStorageError> {
        let mut snapshot = self.snapshot();
        let now = self.clock.now();
        let id = synthesize_local_id(now, snapshot.iter().map(|p| &p.id));
        let project = draft.into_project(id, now);

        let mut candidate = Vec::with_capacity(snapshot.len() + 1);
        candidate.push(project.clone());
        candidate.extend(snapshot.iter().cloned());

        if !self.mirror(&candidate) {
            return Err(LocalStorageError {
                key: keys::PROJECTS.to_string(),
            });
        }
        *snapshot = candidate;
        tracing::info!(id = %project.id, "saved project locally");
        Ok(SaveReport {
            project,
            stored_in: StoreSource::Local,
            advisory,
            mirrored: true,
        })
    }

    /// Delete a project everywhere.
    ///
    /// The remote delete is attempted first, but the project leaves the
    /// snapshot and the local mirror even if the remote refuses. An id not
    /// in the snapshot is a no-op.
    pub async fn delete_one(&self, id: &ProjectId) -> DeleteReport {
        let present = self.snapshot().iter().any(|p| &p.id == id);
        if !present {
            tracing::debug!(%id, "delete of unknown project ignored");
            return DeleteReport {
                id: id.clone(),
                removed: false,
                advisory: None,
                mirrored: false,
            };
        }

        let advisory = match &self.remote {
            Some(remote) => remote.remove(id).await.err(),
            None => None,
        };
        if let Some(error) = &advisory {
            tracing::warn!(%id, cause = %error.cause, %error, "remote delete failed; removing locally");
        }

        let mut snapshot = self.snapshot();
        let before = snapshot.len();
        snapshot.retain(|p| &p.id != id);
        let removed = snapshot.len() != before;
        let mirrored = self.mirror(&snapshot);
        DeleteReport {
            id: id.clone(),
            removed,
            advisory,
            mirrored,
        }
    }

    /// A copy of the current snapshot.
    #[must_use]
    pub fn current_snapshot(&self) -> Vec<Project> {
        self.snapshot().clone()
    }

    #[must_use]
    pub fn find(&self, id: &ProjectId) -> Option<Project> {
        self.snapshot().iter().find(|p| &p.id == id).cloned()
    }

    /// Totals over the current snapshot.
    #[must_use]
    pub fn stats(&self) -> ProjectStats {
        ProjectStats::from_projects(&self.snapshot())
    }

    /// Probe the remote store. `None` when no remote is configured.
    pub async fn probe(&self) -> Option<Result<RemoteStatus, RemoteError>> {
        let remote = self.remote.as_ref()?;
        Some(remote.probe().await)
    }

    /// Deliver a contact message to the remote store. `None` when no remote
    /// is configured.
    pub async fn submit_contact(
        &self,
        message: &ContactMessage,
    ) -> Option<Result<(), RemoteError>> {
        let remote = self.remote.as_ref()?;
        let result = remote.insert_contact(message).await;
        if let Err(error) = &result {
            tracing::warn!(cause = %error.cause, %error, "contact message not delivered");
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemoryStore;
    use crate::remote::RemoteFailure;
    use chrono::DateTime;
    use crate::test_support::helpers::{
        FakeRemote, clock_at, contact_message, draft, remote_project,
    };
    use pretty_assertions::assert_eq;

    fn repo_with(remote: Option<Arc<FakeRemote>>, local: LocalStore) -> ProjectRepository {
        ProjectRepository::new(
            remote.map(|r| r as Arc<dyn RemoteProjects>),
            local,
            clock_at(1_700_000_000_000),
        )
    }

    #[tokio::test]
    async fn remote_load_replaces_snapshot_and_mirrors() {
        let remote = Arc::new(FakeRemote::with_rows(vec![
            remote_project(2, "Second"),
            remote_project(1, "First"),
        ]));
        let local = LocalStore::in_memory();
        let repo = repo_with(Some(remote), local.clone());

        let report = repo.load_all().await;
        assert_eq!(report.source, StoreSource::Remote);
        assert_eq!(report.count, 2);
        assert!(report.advisory.is_none());

        let mirrored: Vec<Project> = local.load(keys::PROJECTS, Vec::new());
        assert_eq!(mirrored, repo.current_snapshot());
        assert_eq!(mirrored[0].title, "Second");
    }

    #[tokio::test]
    async fn failed_remote_load_falls_back_with_advisory() {
        let remote = Arc::new(FakeRemote::failing(RemoteFailure::Connectivity));
        let local = LocalStore::in_memory();
        assert!(local.save(keys::PROJECTS, &vec![remote_project(9, "Cached")]));
        let repo = repo_with(Some(remote), local);

        let report = repo.load_all().await;
        assert_eq!(report.source, StoreSource::Local);
        assert_eq!(
            report.advisory.map(|e| e.cause),
            Some(RemoteFailure::Connectivity)
        );
        assert_eq!(repo.current_snapshot()[0].title, "Cached");
    }

    #[tokio::test]
    async fn empty_local_store_uses_seed() {
        let repo = repo_with(None, LocalStore::in_memory());
        let report = repo.load_all().await;
        assert_eq!(report.source, StoreSource::Local);
        assert!(report.advisory.is_none());
        assert_eq!(report.count, 3);
        assert_eq!(repo.current_snapshot(), demo_projects());
    }

    #[tokio::test]
    async fn load_is_idempotent_without_writes() {
        let repo = repo_with(None, LocalStore::in_memory());
        repo.load_all().await;
        let first = repo.current_snapshot();
        repo.load_all().await;
        assert_eq!(repo.current_snapshot(), first);
    }

    #[tokio::test]
    async fn remote_save_prepends_remote_record() {
        let remote = Arc::new(FakeRemote::with_rows(vec![remote_project(1, "First")]));
        let local = LocalStore::in_memory();
        let repo = repo_with(Some(remote.clone()), local.clone());
        repo.load_all().await;

        let report = repo.save_one(draft("Portfolio")).await.unwrap();
        assert_eq!(report.stored_in, StoreSource::Remote);
        assert!(!report.is_degraded());
        assert_eq!(report.project.id, ProjectId::Numeric(2));

        let snapshot = repo.current_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].title, "Portfolio");
        assert_eq!(local.load::<Vec<Project>>(keys::PROJECTS, Vec::new()), snapshot);
    }

    #[tokio::test]
    async fn degraded_save_synthesizes_local_id() {
        let remote = Arc::new(FakeRemote::failing(RemoteFailure::PermissionDenied));
        let repo = repo_with(Some(remote), LocalStore::in_memory());
        repo.load_all().await;

        let report = repo.save_one(draft("Offline")).await.unwrap();
        assert!(report.is_degraded());
        assert_eq!(report.stored_in, StoreSource::Local);
        assert_eq!(report.project.id, ProjectId::Numeric(1_700_000_000_000));
        assert_eq!(report.project.view_count, 0);
        assert_eq!(repo.current_snapshot()[0].title, "Offline");
    }

    fn my_app_draft() -> ValidatedDraft {
        use folio_core::image::ImageData;
        use folio_core::tags::TagList;
        use folio_core::validation::{RawSubmission, validate};

        let raw = RawSubmission {
            title: "My App".to_string(),
            description: "A sample project description".to_string(),
            link: "https://example.com".to_string(),
            github: "https://github.com/x/y".to_string(),
        };
        let image = ImageData::encode(b"GIF89a", "image/gif").unwrap();
        let tags: TagList = ["Go"].into_iter().collect();
        validate(&raw, Some(image), &tags).unwrap().featured(true)
    }

    #[tokio::test]
    async fn remote_save_keeps_every_draft_field() {
        let remote = Arc::new(FakeRemote::with_rows(vec![remote_project(4, "Existing")]));
        let repo = repo_with(Some(remote), LocalStore::in_memory());
        repo.load_all().await;
        let before = repo.current_snapshot();

        let draft = my_app_draft();
        let report = repo.save_one(draft.clone()).await.unwrap();
        assert_eq!(report.project.id, ProjectId::Numeric(5));
        let expected = draft.into_project(report.project.id.clone(), report.project.created_at);
        assert_eq!(report.project, expected);

        let snapshot = repo.current_snapshot();
        assert_eq!(snapshot.len(), before.len() + 1);
        assert_eq!(snapshot[0], expected);
        assert_eq!(&snapshot[1..], before.as_slice());
    }

    #[tokio::test]
    async fn degraded_save_keeps_every_draft_field() {
        let remote = Arc::new(FakeRemote::failing(RemoteFailure::Connectivity));
        let repo = repo_with(Some(remote), LocalStore::in_memory());
        repo.load_all().await;
        let before = repo.current_snapshot();

        let draft = my_app_draft();
        let report = repo.save_one(draft.clone()).await.unwrap();
        assert_eq!(
            report.advisory.as_ref().map(|e| e.cause),
            Some(RemoteFailure::Connectivity)
        );
        let expected = draft.into_project(
            ProjectId::Numeric(1_700_000_000_000),
            DateTime::UNIX_EPOCH + chrono::TimeDelta::milliseconds(1_700_000_000_000),
        );
        assert_eq!(report.project, expected);

        let snapshot = repo.current_snapshot();
        assert_eq!(snapshot.len(), before.len() + 1);
        assert_eq!(snapshot[0], expected);
        assert_eq!(&snapshot[1..], before.as_slice());
    }

    #[tokio::test]
    async fn local_ids_never_collide_within_one_instant() {
        let repo = repo_with(None, LocalStore::in_memory());
        repo.load_all().await;
        let a = repo.save_one(draft("Alpha")).await.unwrap();
        let b = repo.save_one(draft("Bravo")).await.unwrap();
        assert_ne!(a.project.id, b.project.id);
    }

    #[tokio::test]
    async fn failed_local_write_leaves_snapshot_untouched() {
        let repo = repo_with(None, LocalStore::new(MemoryStore::with_quota(8)));
        repo.load_all().await;
        let before = repo.current_snapshot();

        let err = repo.save_one(draft("Too big")).await.unwrap_err();
        assert_eq!(err.key, keys::PROJECTS);
        assert_eq!(repo.current_snapshot(), before);
    }

    #[tokio::test]
    async fn delete_removes_locally_even_when_remote_refuses() {
        let remote = Arc::new(FakeRemote::with_rows(vec![
            remote_project(2, "Keep"),
            remote_project(1, "Drop"),
        ]));
        let local = LocalStore::in_memory();
        let repo = repo_with(Some(remote.clone()), local.clone());
        repo.load_all().await;

        remote.fail_with(RemoteFailure::PermissionDenied);
        let report = repo.delete_one(&ProjectId::Numeric(1)).await;
        assert!(report.removed);
        assert_eq!(
            report.advisory.map(|e| e.cause),
            Some(RemoteFailure::PermissionDenied)
        );
        let remaining: Vec<Project> = local.load(keys::PROJECTS, Vec::new());
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Keep");
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_noop() {
        let remote = Arc::new(FakeRemote::with_rows(vec![remote_project(1, "Only")]));
        let repo = repo_with(Some(remote.clone()), LocalStore::in_memory());
        repo.load_all().await;

        let report = repo.delete_one(&ProjectId::Numeric(42)).await;
        assert!(!report.removed);
        assert_eq!(remote.remove_calls(), 0);
        assert_eq!(repo.current_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn stats_follow_snapshot() {
        let mut featured = remote_project(1, "Featured");
        featured.featured = true;
        featured.view_count = 10;
        let mut plain = remote_project(2, "Plain");
        plain.view_count = 5;
        let remote = Arc::new(FakeRemote::with_rows(vec![plain, featured]));
        let repo = repo_with(Some(remote), LocalStore::in_memory());
        repo.load_all().await;

        let stats = repo.stats();
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_views, 15);
        assert_eq!(stats.featured, 1);
    }

    #[tokio::test]
    async fn probe_and_contact_need_a_remote() {
        let repo = repo_with(None, LocalStore::in_memory());
        assert!(repo.probe().await.is_none());

        let message = contact_message();
        assert!(repo.submit_contact(&message).await.is_none());

        let remote = Arc::new(FakeRemote::with_rows(vec![remote_project(1, "Only")]));
        let repo = repo_with(Some(remote.clone()), LocalStore::in_memory());
        assert_eq!(repo.probe().await, Some(Ok(RemoteStatus { rows: Some(1) })));
        assert_eq!(repo.submit_contact(&message).await, Some(Ok(())));
        assert_eq!(remote.contacts(), vec![message]);
    }

    #[test]
    fn report_serializes_advisory_as_text() {
        let report = DeleteReport {
            id: ProjectId::Numeric(1),
            removed: true,
            advisory: Some(RemoteError::new(RemoteFailure::Connectivity, "refused")),
            mirrored: true,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["advisory"], "remote connectivity: refused");
    }
}
