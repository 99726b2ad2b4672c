use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{PasswordCommands, ProjectCommands, RemoteCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in as the admin.
    Login(LoginArgs),
    /// End the admin session.
    Logout,
    /// Show session, lockout, and remote status.
    Status,
    /// Portfolio projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Hosted data service.
    Remote {
        #[command(subcommand)]
        action: RemoteCommands,
    },
    /// Send a message through the contact form.
    Contact(ContactArgs),
    /// Show or change the site theme.
    Theme(ThemeArgs),
    /// Show or update the owner profile.
    Profile(ProfileArgs),
    /// Admin password.
    Password {
        #[command(subcommand)]
        action: PasswordCommands,
    },
    /// Interactive admin shell with idle timeout.
    Shell,
    /// Print the JSON Schema of a stored project.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,
    /// Password (falls back to the FOLIO_PASSWORD environment variable).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

#[derive(Clone, Debug, Args)]
pub struct ThemeArgs {
    /// New theme; omit to print the current one.
    pub theme: Option<ThemeChoice>,
}

#[derive(Clone, Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl ProfileArgs {
    #[must_use]
    pub const fn is_update(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.phone.is_some()
    }
}
