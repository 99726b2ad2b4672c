use clap::Subcommand;

/// Remote store commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RemoteCommands {
    /// Check that the projects table is reachable and count its rows.
    Ping,
}
