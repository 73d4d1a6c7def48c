//! ezjump: jump around directories by typing a fuzzy keyword.
//!
//! Directories are remembered as the shell enters them (`ezjump remember`,
//! wired up by `ezjump init <shell>`), most recent first, in a flat text file.
//! `ezjump jump <keyword>` prints the best remembered match for the keyword so
//! the shell wrapper can `cd` into it.
//!
//! # Resolution
//!
//! 1. A keyword starting with `/` is taken literally.
//! 2. Otherwise every segment prefix of every remembered path is scored
//!    against the keyword; the best score wins, shallower paths win ties.
//! 3. With no remembered match, case variants of the keyword are tried as
//!    directories under the current directory and then under home.
//!
//! The winner is promoted to the front of the store and printed.
//!
//! # Examples
//!
//! ```bash
//! eval "$(ezjump init bash)"
//! z music        # cd to the best match for "music"
//! zi pro rust    # pick among paths with "pro…/…/rust…" segments
//! ezjump paths log
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: store, similarity scorer, resolver, fallback guesser, picker
//!   and the mode actions built on them.

pub mod cli;
pub mod core;

use cli::{Cli, Invocation, Mode, OutputFormat};
use crate::core::{
    actions::{self, Context},
    config::{self, Settings},
    error::EzjumpError,
    shell::{self, Shell},
    store::PathStore,
    tui,
};

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "EZJUMP_LOG";

/// Structured logs go to stderr; stdout carries only what the shell consumes.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}

fn load_settings(explicit: Option<PathBuf>) -> Result<Settings, EzjumpError> {
    let file = match explicit {
        Some(file) => file,
        None => match config::default_config_file() {
            Ok(file) => file,
            Err(_) => return Ok(Settings::default()),
        },
    };
    Settings::load(&file)
}

fn open_store(cli_file: Option<PathBuf>, settings: &Settings) -> Result<PathStore, EzjumpError> {
    let file = match cli_file {
        Some(file) => file,
        None => settings.resolve_paths_file()?,
    };
    PathStore::open(file, settings.max_paths)
}

pub fn run() -> Result<(), EzjumpError> {
    let cli = Cli::parse();
    // Usage problems surface before any file is read or created.
    let invocation = Invocation::parse(cli.mode.as_deref(), &cli.keyword)?;
    tracing::debug!(mode = ?invocation.mode, keyword = %invocation.keyword, "invocation");

    if invocation.mode == Mode::Init {
        let shell: Shell = invocation.keyword.parse()?;
        print!("{}", shell::init_script(shell, env!("CARGO_PKG_NAME")));
        return Ok(());
    }

    let settings = load_settings(cli.config)?;
    let mut store = open_store(cli.paths_file, &settings)?;
    let ctx = Context {
        cwd: cli.pwd.unwrap_or_default(),
        home: dirs::home_dir(),
        settings,
    };

    match invocation.mode {
        Mode::Remember => actions::remember(&mut store, &ctx)?,
        Mode::Forget => {
            actions::forget(&mut store, &ctx, &invocation.keyword, !cli.exact)?;
        }
        Mode::Jump => {
            if let Some(path) = actions::jump(&mut store, &ctx, &invocation.keyword)? {
                println!("{}", path);
            }
        }
        Mode::Pick => {
            if let Some(path) = actions::pick(&mut store, &ctx, &invocation.keyword)? {
                println!("{}", path);
            }
        }
        Mode::Paths => {
            let found = actions::paths(&store, &invocation.keyword);
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&found)?),
                OutputFormat::Text => {
                    for path in found {
                        println!("{}", path);
                    }
                }
            }
        }
        Mode::Info => {
            let report = actions::info(&store, &ctx.settings);
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&report)?),
                OutputFormat::Text => print_info(&report),
            }
        }
        // printed before the store was opened
        Mode::Init => {}
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, EzjumpError> {
    serde_json::to_string_pretty(value).map_err(|e| EzjumpError::IoError(e.into()))
}

fn print_info(report: &actions::InfoReport) {
    println!();
    let style = if report.stored >= report.max_paths {
        tui::BoxStyle::Warning
    } else {
        tui::BoxStyle::Info
    };
    tui::render_box(
        &format!("ezjump v{}", report.version),
        "Jump around directories",
        style,
    );

    tui::print_section("Usage");
    tui::print_list(&[
        "z music       jump to the best match for 'music'",
        "zi pro rust   pick interactively",
        "ezjump paths  list remembered paths",
    ]);

    tui::print_section("Store");
    let usage = format!(
        "{}/{} paths saved in {}",
        report.stored, report.max_paths, report.paths_file
    );
    let status = if report.stored >= report.max_paths {
        tui::ItemStatus::Full
    } else if report.stored == 0 {
        tui::ItemStatus::Missing
    } else {
        tui::ItemStatus::Ok
    };
    tui::print_status_line(&usage, status);
    if report.trimmed > 0 {
        tui::print_status_line(
            &format!("{} over capacity, dropped on next save", report.trimmed),
            tui::ItemStatus::Full,
        );
    }
    tui::print_status_line(
        &format!("minimum accuracy {}", report.min_accuracy),
        tui::ItemStatus::Info,
    );
    tui::print_status_line(
        &format!("picker shows up to {} options", report.max_options),
        tui::ItemStatus::Info,
    );
    println!();
}
