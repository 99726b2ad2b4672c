use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ProjectId;
use crate::image::ImageData;
use crate::tags::TagList;

/// A portfolio project as stored remotely and mirrored locally.
///
/// Serialized field names follow the hosted table's columns
/// (`image`, `link`, `github`, `views`, `created_at`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_default")]
    #[schemars(with = "String")]
    pub image_data: String,
    #[serde(rename = "link", default, deserialize_with = "null_as_default")]
    #[schemars(with = "String")]
    pub primary_link: String,
    #[serde(rename = "github", default, deserialize_with = "null_as_default")]
    #[schemars(with = "String")]
    pub source_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Vec<String>")]
    pub technologies: Vec<String>,
    #[serde(rename = "views", default, deserialize_with = "null_as_default")]
    #[schemars(with = "u64")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "bool")]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// A project draft that passed validation and has not been persisted yet.
///
/// Only [`crate::validation::validate`] builds one, so every draft carries
/// all required fields. Serializes to the insert row shape: no `id` and no
/// `created_at`, both of which the persisting store assigns.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(rename = "image")]
    pub(crate) image_data: ImageData,
    #[serde(rename = "link")]
    pub(crate) primary_link: String,
    #[serde(rename = "github")]
    pub(crate) source_link: String,
    pub(crate) technologies: TagList,
    #[serde(rename = "views")]
    pub(crate) view_count: u64,
    pub(crate) featured: bool,
}

impl ValidatedDraft {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn image_data(&self) -> &ImageData {
        &self.image_data
    }

    #[must_use]
    pub fn primary_link(&self) -> &str {
        &self.primary_link
    }

    #[must_use]
    pub fn source_link(&self) -> &str {
        &self.source_link
    }

    #[must_use]
    pub fn technologies(&self) -> &[String] {
        self.technologies.as_slice()
    }

    /// Mark the draft as featured on the public grid.
    #[must_use]
    pub const fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Turn the draft into a stored project with the given identity.
    #[must_use]
    pub fn into_project(self, id: ProjectId, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            image_data: self.image_data.into_string(),
            primary_link: self.primary_link,
            source_link: self.source_link,
            technologies: self.technologies.into_vec(),
            view_count: self.view_count,
            featured: self.featured,
            created_at,
        }
    }
}

/// Aggregate counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub total_views: u64,
    pub featured: usize,
}

impl ProjectStats {
    #[must_use]
    pub fn from_projects(projects: &[Project]) -> Self {
        Self {
            total_projects: projects.len(),
            total_views: projects.iter().map(|p| p.view_count).sum(),
            featured: projects.iter().filter(|p| p.featured).count(),
        }
    }
}

/// Hosted rows may carry `null` in optional columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
