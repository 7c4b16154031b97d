use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("github error: {0}")]
    GitHub(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{program} {subcommand} failed ({status}): {output}")]
    Git {
        program: String,
        subcommand: &'static str,
        status: ExitStatus,
        output: String,
    },

    #[error("cannot change directory to {}: {source}", path.display())]
    Workdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MirrorError {
    /// Process exit status for this error. Usage problems exit 2, like a
    /// flag parser would; everything else is a runtime failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            MirrorError::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<figment::Error> for MirrorError {
    fn from(e: figment::Error) -> Self {
        MirrorError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
