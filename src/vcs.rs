use crate::error::{MirrorError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// The two version-control operations a mirror run needs. Both act on the
/// process's current directory and return the tool's combined output.
#[allow(async_fn_in_trait)]
pub trait Vcs {
    async fn clone_repo(&self, url: &str) -> Result<String>;
    async fn pull(&self) -> Result<String>;
}

/// Shells out to a git executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, subcommand: &'static str, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(subcommand).args(args);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(program = %self.program, subcommand, "spawning git");

        let output = cmd.output().await?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(MirrorError::Git {
                program: self.program.clone(),
                subcommand,
                status: output.status,
                output: combined.trim().to_string(),
            });
        }

        Ok(combined)
    }
}

impl Vcs for GitCli {
    async fn clone_repo(&self, url: &str) -> Result<String> {
        self.run("clone", &[url]).await
    }

    async fn pull(&self) -> Result<String> {
        self.run("pull", &[]).await
    }
}
