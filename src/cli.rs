//! Command-line surface.
//!
//! The mode is a plain positional token rather than a clap subcommand: an
//! unknown or missing mode is a quiet usage error, not a clap failure, so a
//! mistyped shell alias never prints noise into the prompt.

use crate::core::error::EzjumpError;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[clap(
    name = "ezjump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Jump around directories by typing a fuzzy keyword",
    after_help = "MODES:\n  remember          remember the current directory\n  forget <path>     forget a path and everything below it\n  jump <keyword>    print the best match for keyword\n  pick [keywords]   choose interactively among matches\n  info              show settings and store usage\n  paths [filter]    list remembered paths\n  init <shell>      print shell integration (bash, zsh, fish)"
)]
pub(crate) struct Cli {
    /// Path store file.
    #[clap(long, env = "EZJUMP_PATHS_FILE", value_name = "FILE")]
    pub paths_file: Option<PathBuf>,
    /// Settings file (TOML).
    #[clap(long, env = "EZJUMP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Current directory as seen by the shell.
    #[clap(long, env = "PWD", hide_env_values = true, value_name = "DIR")]
    pub pwd: Option<String>,
    /// `forget` only: keep paths below the forgotten one.
    #[clap(long)]
    pub exact: bool,
    /// Output format for `info` and `paths`.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// remember | forget | jump | pick | info | paths | init
    pub mode: Option<String>,
    /// Keyword(s) for the mode.
    pub keyword: Vec<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Remember,
    Forget,
    Jump,
    Pick,
    Info,
    Paths,
    Init,
}

impl Mode {
    /// Modes that do nothing without a keyword.
    pub fn needs_keyword(self) -> bool {
        matches!(self, Mode::Forget | Mode::Jump | Mode::Init)
    }
}

impl FromStr for Mode {
    type Err = EzjumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remember" => Ok(Mode::Remember),
            "forget" => Ok(Mode::Forget),
            "jump" => Ok(Mode::Jump),
            "pick" => Ok(Mode::Pick),
            "info" => Ok(Mode::Info),
            "paths" => Ok(Mode::Paths),
            "init" => Ok(Mode::Init),
            other => Err(EzjumpError::Usage(format!("unknown mode '{}'", other))),
        }
    }
}

/// Validated mode and keyword, before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub keyword: String,
}

impl Invocation {
    pub fn parse(mode: Option<&str>, keyword: &[String]) -> Result<Self, EzjumpError> {
        let mode: Mode = mode
            .ok_or_else(|| EzjumpError::Usage("missing mode".into()))?
            .parse()?;
        let keyword = keyword.join(" ").trim().to_string();
        if mode.needs_keyword() && keyword.is_empty() {
            return Err(EzjumpError::Usage(format!("{:?} needs a keyword", mode)));
        }
        Ok(Self { mode, keyword })
    }
}
