//! Demo projects shown when nothing has been stored locally yet.

use chrono::{DateTime, TimeDelta, Utc};
use folio_core::entities::Project;
use folio_core::ids::ProjectId;

/// 2024-01-01T00:00:00Z, as days since the epoch.
const SEED_EPOCH_DAYS: i64 = 19_723;

fn seeded_at(day_offset: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::days(SEED_EPOCH_DAYS + day_offset)
}

fn project(
    id: i64,
    title: &str,
    description: &str,
    slug: &str,
    technologies: &[&str],
    day_offset: i64,
) -> Project {
    Project {
        id: ProjectId::Numeric(id),
        title: title.to_string(),
        description: description.to_string(),
        image_data: String::new(),
        primary_link: format!("https://{slug}.example.com"),
        source_link: format!("https://github.com/example/{slug}"),
        technologies: technologies.iter().map(ToString::to_string).collect(),
        view_count: 0,
        featured: false,
        created_at: seeded_at(day_offset),
    }
}

/// The three demo projects, newest first.
#[must_use]
pub fn demo_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "E-Commerce App",
            "Full online store with shopping cart, payment processing and an admin panel.",
            "ecommerce-app",
            &["React", "Node.js", "MongoDB", "Stripe"],
            2,
        ),
        project(
            2,
            "Task Manager",
            "Collaborative task manager with team features, a built-in calendar and real-time notifications.",
            "task-manager",
            &["Vue.js", "Firebase", "Tailwind"],
            1,
        ),
        project(
            3,
            "Dashboard Analytics",
            "Interactive data analysis dashboard with dynamic charts and automated reports.",
            "dashboard-analytics",
            &["React", "D3.js", "Express", "PostgreSQL"],
            0,
        ),
    ]
}
