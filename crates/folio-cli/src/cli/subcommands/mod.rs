mod password;
mod project;
mod remote;

pub use password::{PasswordCommands, PasswordResetArgs};
pub use project::{ProjectAddArgs, ProjectCommands, ProjectDeleteArgs};
pub use remote::RemoteCommands;
