//! Exit action configuration.
//!
//! Kiosk installs power the machine off after the final save. The default
//! does nothing; `shutdown` asks the OS to halt and `command` runs any
//! program.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::process::Command;
use tracing::info;

/// What to do once all tables have been flushed on exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ExitAction {
    /// Just return from `main`
    #[default]
    None,
    /// Run `shutdown -h now`
    Shutdown,
    /// Run an arbitrary program
    Command {
        /// Executable name or path
        program: String,
        /// Arguments passed verbatim
        #[serde(default)]
        args: Vec<String>,
    },
}

impl ExitAction {
    /// The program and arguments this action would run, if any.
    #[must_use]
    pub fn command_line(&self) -> Option<(&str, Vec<&str>)> {
        match self {
            Self::None => None,
            Self::Shutdown => Some(("shutdown", vec!["-h", "now"])),
            Self::Command { program, args } => {
                Some((program.as_str(), args.iter().map(String::as_str).collect()))
            }
        }
    }

    /// Runs the action and waits for it to finish.
    pub fn run(&self) -> Result<()> {
        let Some((program, args)) = self.command_line() else {
            info!("No exit action configured.");
            return Ok(());
        };

        info!(program, ?args, "Running exit action");
        let status = Command::new(program)
            .args(&args)
            .status()
            .map_err(|e| Error::ExitAction {
                message: format!("failed to start {program}: {e}"),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::ExitAction {
                message: format!("{program} exited with {status}"),
            })
        }
    }
}
