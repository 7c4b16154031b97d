use crate::config::CliOverrides;
use clap::builder::BoolishValueParser;
use clap::{CommandFactory, Parser};

const LONG_FLAGS: &[&str] = &["help", "user", "token", "forks", "repo", "verbose"];

/// Short boolean flags that may also be written `-v=false`, as Go's flag
/// package allows.
const SHORT_BOOLS: &[(&str, &str)] = &[("h", "help"), ("v", "verbose")];

#[derive(Parser, Debug)]
#[command(
    name = "gh-mirror",
    about = "Clone or pull every GitHub repository owned by a user",
    override_usage = "gh-mirror -user <USER> -token <TOKEN> [-forks] [-repo <NAME>] [-v]",
    disable_help_flag = true
)]
pub struct Cli {
    #[arg(
        short = 'h',
        long = "help",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Show this help"
    )]
    pub help: Option<bool>,

    #[arg(long, help = "GitHub username whose repositories are mirrored")]
    pub user: Option<String>,

    #[arg(
        long,
        help = "OAuth or personal access token (https://github.com/settings/tokens)"
    )]
    pub token: Option<String>,

    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Mirror forked repositories as well"
    )]
    pub forks: Option<bool>,

    #[arg(
        long = "repo",
        value_delimiter = ',',
        help = "Fork to mirror even when -forks is off (comma separated, repeatable)"
    )]
    pub repos: Vec<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        help = "Log every action and git's output"
    )]
    pub verbose: Option<bool>,
}

impl Cli {
    pub fn wants_help(&self) -> bool {
        self.help == Some(true)
    }

    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            user: self.user.clone(),
            token: self.token.clone(),
            forks: self.forks,
            repos: self.repos.clone(),
            verbose: self.verbose,
        }
    }
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Rewrites single-dash long flags (`-user alice`, `-forks=false`) and
/// valued short booleans (`-v=true`) to the double-dash form clap
/// understands. Everything after `--` is left alone.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let Some(rest) = arg.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
            out.push(arg);
            continue;
        };
        let (name, value) = match rest.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (rest, None),
        };

        let long = SHORT_BOOLS
            .iter()
            .find(|(short, _)| *short == name && value.is_some())
            .map(|&(_, long)| long)
            .or_else(|| LONG_FLAGS.iter().copied().find(|&l| l == name));

        let rewritten = match (long, value) {
            (Some(long), Some(value)) => Some(format!("--{long}={value}")),
            (Some(long), None) => Some(format!("--{long}")),
            (None, _) => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }

    out
}
