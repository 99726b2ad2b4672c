//! Interactive admin shell guarded by the idle monitor.
//!
//! Every input line counts as activity. The monitor's warning is printed
//! inline; its timeout ends the session and the shell.

use std::io::Write;

use anyhow::Context;
use folio_auth::{IdleMonitor, SessionSignal};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ProjectCommands, ProjectDeleteArgs};
use crate::commands;
use crate::context::AppContext;

const HELP: &str = "\
commands:
  list           list projects
  stats          project counts
  delete <id>    delete a project
  status         session status
  logout         end the session and leave
  exit           leave, keeping the session
  help           this text";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    List,
    Stats,
    Delete(String),
    Status,
    Logout,
    Exit,
    Help,
    Empty,
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Self::Empty);
        };
        let parsed = match command {
            "list" | "ls" => Self::List,
            "stats" => Self::Stats,
            "delete" | "rm" => {
                let id = words.next().ok_or("usage: delete <id>")?;
                Self::Delete(id.to_string())
            }
            "status" => Self::Status,
            "logout" => Self::Logout,
            "exit" | "quit" => Self::Exit,
            "help" | "?" => Self::Help,
            other => return Err(format!("unknown command `{other}`; try `help`")),
        };
        if words.next().is_some() {
            return Err(format!("too many arguments for `{command}`"));
        }
        Ok(parsed)
    }
}

fn prompt() {
    print!("folio> ");
    let _ = std::io::stdout().flush();
}

/// Handle `folio shell`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.guard.require_active()?;
    let mut monitor = IdleMonitor::from_config(&ctx.config.idle)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !flags.quiet {
        eprintln!("admin shell; type `help` for commands");
    }
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                monitor.touch();
                if let Err(error) = ctx.guard.require_active() {
                    eprintln!("{error}");
                    break;
                }
                match ShellCommand::parse(&line) {
                    Ok(ShellCommand::Exit) => break,
                    Ok(ShellCommand::Logout) => {
                        ctx.guard.logout();
                        eprintln!("logged out");
                        break;
                    }
                    Ok(command) => {
                        if let Err(error) = run(command, ctx, flags).await {
                            eprintln!("error: {error:#}");
                        }
                    }
                    Err(message) => eprintln!("{message}"),
                }
                prompt();
            }
            signal = monitor.next_signal() => {
                if apply_signal(ctx, signal) == Flow::Close {
                    break;
                }
                prompt();
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// React to one idle-monitor signal. Expiry (or a dead monitor) ends the
/// session.
fn apply_signal(ctx: &AppContext, signal: Option<SessionSignal>) -> Flow {
    match signal {
        Some(SessionSignal::Warn { remaining }) => {
            eprintln!(
                "\nwarning: no activity; the session closes in {}s",
                remaining.as_secs()
            );
            Flow::Continue
        }
        Some(SessionSignal::Expired) | None => {
            ctx.guard.expire();
            eprintln!("\nsession closed after inactivity");
            Flow::Close
        }
    }
}

async fn run(command: ShellCommand, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        ShellCommand::List => commands::project::handle(&ProjectCommands::List, ctx, flags).await,
        ShellCommand::Stats => commands::project::handle(&ProjectCommands::Stats, ctx, flags).await,
        ShellCommand::Delete(id) => {
            let action = ProjectCommands::Delete(ProjectDeleteArgs { id });
            commands::project::handle(&action, ctx, flags).await
        }
        ShellCommand::Status => commands::status::handle(ctx, flags),
        ShellCommand::Help => {
            println!("{HELP}");
            Ok(())
        }
        ShellCommand::Empty | ShellCommand::Logout | ShellCommand::Exit => Ok(()),
    }
}
