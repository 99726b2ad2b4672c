use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects (public view, no login needed).
    List,
    /// Add a project (requires login).
    Add(ProjectAddArgs),
    /// Delete a project by id (requires login).
    Delete(ProjectDeleteArgs),
    /// Project, view, and featured counts.
    Stats,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// Live project URL.
    #[arg(long)]
    pub link: String,
    /// Source repository URL.
    #[arg(long)]
    pub github: String,
    /// Screenshot file (image/*, at most 5 MiB).
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Technology label; repeat for several.
    #[arg(long = "tech")]
    pub tech: Vec<String>,
    #[arg(long)]
    pub featured: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectDeleteArgs {
    /// Project id (numeric or text).
    pub id: String,
}
