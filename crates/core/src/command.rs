use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::config::RunnerConfig;
use crate::error::{Error, Result};

/// A fully-assembled child invocation: the configured command prefix with
/// the script path appended as its sole positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RenderCommand {
    pub fn for_script(config: &RunnerConfig, script: &Path) -> Result<Self> {
        let mut prefix = config.command_prefix.iter();
        let program = prefix.next().cloned().ok_or_else(|| {
            Error::Config("command_prefix must name at least the program to invoke".to_string())
        })?;

        let mut args: Vec<String> = prefix.cloned().collect();
        args.push(script.to_string_lossy().into_owned());

        Ok(Self { program, args })
    }

    /// Display form, for logs and dry runs.
    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }

    /// Spawn the child and block until it exits.
    pub fn execute(&self) -> io::Result<ExitStatus> {
        debug!("spawning: {}", self.to_shell_command());

        Command::new(&self.program).args(&self.args).status()
    }
}
