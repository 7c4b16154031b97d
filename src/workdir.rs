use crate::error::{MirrorError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Holds the process inside another directory until restored or dropped.
///
/// Prefer [`DirGuard::restore`] so a failed change back surfaces as an
/// error; the drop path only logs.
#[derive(Debug)]
pub struct DirGuard {
    original: PathBuf,
    restored: bool,
}

impl DirGuard {
    pub fn enter(path: &Path) -> Result<Self> {
        let original = std::env::current_dir()?;
        std::env::set_current_dir(path).map_err(|source| MirrorError::Workdir {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            original,
            restored: false,
        })
    }

    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        std::env::set_current_dir(&self.original).map_err(|source| MirrorError::Workdir {
            path: self.original.clone(),
            source,
        })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = std::env::set_current_dir(&self.original) {
            warn!(path = %self.original.display(), "failed to restore working directory: {e}");
        }
    }
}
