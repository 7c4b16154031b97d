use crate::config::RunConfig;
use crate::error::{MirrorError, Result};
use crate::github::{list_all, GitHubClient, RepoDescriptor};
use crate::vcs::{GitCli, Vcs};
use crate::workdir::DirGuard;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Skip,
    Clone,
    Pull,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub cloned: usize,
    pub pulled: usize,
    pub skipped: usize,
}

impl MirrorSummary {
    fn record(&mut self, action: Action) {
        match action {
            Action::Skip => self.skipped += 1,
            Action::Clone => self.cloned += 1,
            Action::Pull => self.pulled += 1,
        }
    }
}

/// Forks are left out unless forks were asked for or the fork is named
/// explicitly.
pub fn should_mirror(repo: &RepoDescriptor, config: &RunConfig) -> bool {
    !repo.fork || config.include_forks || config.always_include.iter().any(|r| *r == repo.name)
}

pub struct Mirror<'a, V: Vcs> {
    config: &'a RunConfig,
    vcs: V,
    root: PathBuf,
}

impl<'a, V: Vcs> Mirror<'a, V> {
    /// Mirrors into the current working directory.
    pub fn new(config: &'a RunConfig, vcs: V) -> Result<Self> {
        let root = std::env::current_dir()?;
        Ok(Self { config, vcs, root })
    }

    /// Processes `repos` in order and stops at the first failure.
    pub async fn run(&self, repos: &[RepoDescriptor]) -> Result<MirrorSummary> {
        let mut summary = MirrorSummary::default();
        for repo in repos {
            let action = self.sync_one(repo).await?;
            summary.record(action);
        }
        Ok(summary)
    }

    async fn sync_one(&self, repo: &RepoDescriptor) -> Result<Action> {
        if !should_mirror(repo, self.config) {
            info!(repo = %repo.name, "fork, skipping");
            return Ok(Action::Skip);
        }

        let path = self.root.join(&repo.name);
        match std::fs::metadata(&path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(repo = %repo.name, url = %repo.clone_url, "cloning");
                let output = self.vcs.clone_repo(&repo.clone_url).await?;
                debug!(repo = %repo.name, "{}", output.trim_end());
                Ok(Action::Clone)
            }
            Err(e) => Err(MirrorError::Io(e)),
            Ok(_) => {
                let guard = DirGuard::enter(&path)?;
                info!(repo = %repo.name, "pulling");
                let output = self.vcs.pull().await?;
                debug!(repo = %repo.name, "{}", output.trim_end());
                guard.restore()?;
                Ok(Action::Pull)
            }
        }
    }
}

/// Lists the configured user's repositories and mirrors them into the
/// current directory.
pub async fn run(config: &RunConfig) -> Result<MirrorSummary> {
    let client = GitHubClient::from_config(config)?;
    let repos = list_all(&client, &config.user).await?;
    info!(user = %config.user, count = repos.len(), "listed repositories");

    let mirror = Mirror::new(config, GitCli::new(config.git.clone()))?;
    let summary = mirror.run(&repos).await?;
    info!(
        cloned = summary.cloned,
        pulled = summary.pulled,
        skipped = summary.skipped,
        "mirror complete"
    );
    Ok(summary)
}
