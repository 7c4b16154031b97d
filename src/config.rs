use crate::error::{MirrorError, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Layered settings as read from defaults, the config file, the environment
/// and the command line. Nothing here is validated yet; see [`Config::validate`].
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub user: Option<String>,
    pub token: Option<String>,
    pub forks: bool,
    /// Forks mirrored even when `forks` is false. Accepts a list or a
    /// comma-separated string.
    #[serde(default, deserialize_with = "repo_list")]
    pub repos: Vec<String>,
    pub verbose: bool,
    pub api_url: Option<String>,
    #[serde(default = "default_git")]
    pub git: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("forks", &self.forks)
            .field("repos", &self.repos)
            .field("verbose", &self.verbose)
            .field("api_url", &self.api_url)
            .field("git", &self.git)
            .finish()
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn split_repo_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

fn repo_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => split_repo_list(&s),
        OneOrMany::Many(v) => v,
    })
}

/// Environment variables whose values are taken verbatim. Typed parsing
/// would turn an all-digit user or token into a number.
const VERBATIM_ENV: &[(&str, &str)] = &[
    ("GH_MIRROR_USER", "user"),
    ("GH_MIRROR_TOKEN", "token"),
    ("GITHUB_TOKEN", "token"),
];

impl Default for Config {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            forks: false,
            repos: Vec::new(),
            verbose: false,
            api_url: None,
            git: default_git(),
        }
    }
}

/// Values given explicitly on the command line. `None` means "not given",
/// so lower layers keep their value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub user: Option<String>,
    pub token: Option<String>,
    pub forks: Option<bool>,
    pub repos: Vec<String>,
    pub verbose: Option<bool>,
}

impl Config {
    pub fn load(overrides: CliOverrides) -> Result<Self> {
        let config_file = config_dir().join("gh-mirror").join("config.toml");
        Self::load_from(&config_file, overrides)
    }

    pub fn load_from(config_file: &Path, overrides: CliOverrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(config_file));
        }

        figment = figment.merge(
            Env::prefixed("GH_MIRROR_").ignore(&["user", "token", "repos"]),
        );
        for &(var, key) in VERBATIM_ENV {
            if let Some(value) = Env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        if let Some(value) = Env::var("GH_MIRROR_REPOS") {
            figment = figment.merge(Serialized::default("repos", split_repo_list(&value)));
        }

        if let Some(user) = overrides.user {
            figment = figment.merge(Serialized::default("user", user));
        }
        if let Some(token) = overrides.token {
            figment = figment.merge(Serialized::default("token", token));
        }
        if let Some(forks) = overrides.forks {
            figment = figment.merge(Serialized::default("forks", forks));
        }
        if !overrides.repos.is_empty() {
            figment = figment.merge(Serialized::default("repos", overrides.repos));
        }
        if let Some(verbose) = overrides.verbose {
            figment = figment.merge(Serialized::default("verbose", verbose));
        }

        Ok(figment.extract()?)
    }

    /// Checks that the required settings are present and freezes them.
    pub fn validate(self) -> Result<RunConfig> {
        let user = match self.user {
            Some(u) if !u.is_empty() => u,
            _ => return Err(MirrorError::Usage("-user is required".to_string())),
        };
        let token = match self.token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(MirrorError::Usage("-token is required".to_string())),
        };
        let always_include = self
            .repos
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        Ok(RunConfig {
            user,
            token,
            include_forks: self.forks,
            always_include,
            verbose: self.verbose,
            api_url: self.api_url.filter(|u| !u.is_empty()),
            git: self.git,
        })
    }
}

/// Immutable settings for one mirror run.
#[derive(Clone)]
pub struct RunConfig {
    pub user: String,
    pub token: String,
    pub include_forks: bool,
    pub always_include: Vec<String>,
    pub verbose: bool,
    pub api_url: Option<String>,
    pub git: String,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .field("include_forks", &self.include_forks)
            .field("always_include", &self.always_include)
            .field("verbose", &self.verbose)
            .field("api_url", &self.api_url)
            .field("git", &self.git)
            .finish()
    }
}

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
