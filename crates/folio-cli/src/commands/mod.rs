pub mod contact;
pub mod dispatch;
pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod project;
pub mod remote;
pub mod schema;
pub mod shell;
pub mod status;
pub mod theme;

use folio_core::entities::Project;
use serde::Serialize;

/// Table-friendly view of a project: no image payload, joined tags.
#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub title: String,
    pub technologies: String,
    pub views: u64,
    pub featured: bool,
    pub created_at: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title.clone(),
            technologies: project.technologies.join(", "),
            views: project.view_count,
            featured: project.featured,
            created_at: project.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
