#![cfg(test)]

use crate::config::RunConfig;
use crate::error::{MirrorError, Result};
use crate::github::client::RepoSource;
use crate::github::types::{RepoDescriptor, RepoPage};
use crate::vcs::Vcs;
use std::cell::RefCell;
use std::path::PathBuf;

pub fn url_for(name: &str) -> String {
    format!("https://github.com/alice/{name}.git")
}

pub fn repo(name: &str, fork: bool) -> RepoDescriptor {
    RepoDescriptor {
        name: name.to_string(),
        clone_url: url_for(name),
        fork,
    }
}

pub fn run_config(include_forks: bool, always_include: &[&str]) -> RunConfig {
    RunConfig {
        user: "alice".to_string(),
        token: "token".to_string(),
        include_forks,
        always_include: always_include.iter().map(|s| s.to_string()).collect(),
        verbose: false,
        api_url: None,
        git: "git".to_string(),
    }
}

/// Serves canned pages; every page but the last advertises a successor.
pub struct FakeSource {
    pages: Vec<Vec<RepoDescriptor>>,
    fail_at: Option<u32>,
    requests: RefCell<Vec<(u32, u8)>>,
}

impl FakeSource {
    pub fn new(pages: Vec<Vec<RepoDescriptor>>) -> Self {
        Self {
            pages,
            fail_at: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_at(page: u32, pages: Vec<Vec<RepoDescriptor>>) -> Self {
        Self {
            fail_at: Some(page),
            ..Self::new(pages)
        }
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|(p, _)| *p).collect()
    }

    pub fn requested_sizes(&self) -> Vec<u8> {
        self.requests.borrow().iter().map(|(_, n)| *n).collect()
    }
}

impl RepoSource for FakeSource {
    async fn list_page(&self, _user: &str, page: u32, per_page: u8) -> Result<RepoPage> {
        self.requests.borrow_mut().push((page, per_page));
        if self.fail_at == Some(page) {
            return Err(MirrorError::GitHub(format!("page {page} unavailable")));
        }
        let idx = page as usize - 1;
        let items = self.pages.get(idx).cloned().unwrap_or_default();
        let next = (idx + 1 < self.pages.len()).then_some(page + 1);
        Ok(RepoPage { items, next })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Clone(String),
    /// Directory the pull ran in.
    Pull(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsFailure {
    Clone,
    Pull,
}

#[derive(Default)]
pub struct RecordingVcs {
    calls: RefCell<Vec<VcsCall>>,
    fail: Option<VcsFailure>,
}

impl RecordingVcs {
    pub fn failing(on: VcsFailure) -> Self {
        Self {
            fail: Some(on),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    fn failure(&self, subcommand: &'static str) -> MirrorError {
        MirrorError::Git {
            program: "git".to_string(),
            subcommand,
            status: failed_status(),
            output: "fatal: simulated".to_string(),
        }
    }
}

impl Vcs for RecordingVcs {
    async fn clone_repo(&self, url: &str) -> Result<String> {
        self.calls.borrow_mut().push(VcsCall::Clone(url.to_string()));
        if self.fail == Some(VcsFailure::Clone) {
            return Err(self.failure("clone"));
        }
        Ok(format!("Cloning into '{url}'...\n"))
    }

    async fn pull(&self) -> Result<String> {
        let cwd = std::env::current_dir()?;
        self.calls.borrow_mut().push(VcsCall::Pull(cwd));
        if self.fail == Some(VcsFailure::Pull) {
            return Err(self.failure("pull"));
        }
        Ok("Already up to date.\n".to_string())
    }
}

#[cfg(unix)]
fn failed_status() -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(1 << 8)
}

#[cfg(windows)]
fn failed_status() -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(1)
}
