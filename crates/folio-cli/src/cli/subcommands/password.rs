use clap::{Args, Subcommand};

/// Admin password commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PasswordCommands {
    /// Replace the admin password (at least 6 characters).
    Reset(PasswordResetArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PasswordResetArgs {
    #[arg(long)]
    pub new: String,
}
