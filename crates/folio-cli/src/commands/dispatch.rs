use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => commands::login::handle(&args, ctx, flags),
        Commands::Logout => commands::logout::handle(ctx, flags),
        Commands::Status => commands::status::handle(ctx, flags),
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Remote { action } => commands::remote::handle(&action, ctx, flags).await,
        Commands::Contact(args) => commands::contact::handle(&args, ctx, flags).await,
        Commands::Theme(args) => commands::theme::handle(&args, ctx, flags),
        Commands::Profile(args) => commands::profile::handle(&args, ctx, flags),
        Commands::Password { action } => commands::password::handle(&action, ctx, flags),
        Commands::Shell => commands::shell::handle(ctx, flags).await,
        Commands::Schema => unreachable!("schema is pre-dispatched in main"),
    }
}
