//! Mode implementations on top of the store, resolver and guesser.
//!
//! Each action takes the store and an explicit [`Context`]; nothing here
//! reads the process environment, which keeps the whole flow testable.

use crate::core::config::Settings;
use crate::core::error::EzjumpError;
use crate::core::guess;
use crate::core::resolver::{self, Query};
use crate::core::selector::{self, Key};
use crate::core::store::{PathStore, normalize};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Per-invocation inputs supplied by the caller.
#[derive(Debug, Clone)]
pub struct Context {
    /// Current directory as reported by the shell.
    pub cwd: String,
    pub home: Option<PathBuf>,
    pub settings: Settings,
}

impl Context {
    fn query<'a>(&'a self, keyword: &'a str) -> Query<'a> {
        Query {
            keyword,
            cwd: &self.cwd,
            min_accuracy: self.settings.min_accuracy,
        }
    }

    /// Absolute form of `path`, relative ones taken from `cwd`.
    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') || self.cwd.is_empty() {
            normalize(path)
        } else {
            normalize(&format!("{}/{}", normalize(&self.cwd), path))
        }
    }
}

/// Promote the current directory.
pub fn remember(store: &mut PathStore, ctx: &Context) -> Result<(), EzjumpError> {
    if !ctx.cwd.starts_with('/') {
        return Err(EzjumpError::Usage(
            "current directory is unknown or not absolute".into(),
        ));
    }
    store.remember(&ctx.cwd);
    store.commit()?;
    Ok(())
}

/// Forget `path` (and with `include_subpaths` everything under it).
pub fn forget(
    store: &mut PathStore,
    ctx: &Context,
    path: &str,
    include_subpaths: bool,
) -> Result<bool, EzjumpError> {
    let target = ctx.absolute(path);
    let changed = store.forget(&target, include_subpaths);
    store.commit()?;
    Ok(changed)
}

fn fallback(ctx: &Context, keyword: &str) -> Option<String> {
    let home = ctx.home.as_deref();
    let found = if ctx.cwd.is_empty() {
        home.and_then(|h| guess::guess(h, None, keyword))
    } else {
        guess::guess(Path::new(&ctx.cwd), home, keyword)
    };
    found.map(|p| p.to_string_lossy().into_owned())
}

/// Resolve `keyword` against the store, falling back to a filesystem guess.
/// A hit is promoted and persisted.
pub fn jump(
    store: &mut PathStore,
    ctx: &Context,
    keyword: &str,
) -> Result<Option<String>, EzjumpError> {
    if keyword.is_empty() {
        return Ok(None);
    }
    let resolved = resolver::resolve(store.entries(), &ctx.query(keyword)).or_else(|| {
        debug!(keyword, "no remembered match, probing filesystem");
        fallback(ctx, keyword)
    });

    let Some(path) = resolved else {
        info!(keyword, "no match");
        return Ok(None);
    };
    store.remember(&path);
    store.commit()?;
    Ok(Some(path))
}

/// Interactive variant of [`jump`] on the terminal.
pub fn pick(
    store: &mut PathStore,
    ctx: &Context,
    keywords: &str,
) -> Result<Option<String>, EzjumpError> {
    pick_with(store, ctx, keywords, |items, on_delete| {
        selector::pick(items, on_delete)
    })
}

/// [`pick`] with the picker supplied by the caller.
///
/// `choose` gets the shortlist and a delete hook. A deleted row is forgotten
/// on its own, without the paths stored under it, and saved immediately; the
/// confirmed row is promoted and saved.
pub fn pick_with<C>(
    store: &mut PathStore,
    ctx: &Context,
    keywords: &str,
    choose: C,
) -> Result<Option<String>, EzjumpError>
where
    C: FnOnce(
        Vec<String>,
        &mut dyn FnMut(&str) -> Result<(), EzjumpError>,
    ) -> Result<Option<String>, EzjumpError>,
{
    let items = resolver::shortlist(store.entries(), keywords, ctx.settings.max_options);
    debug!(keywords, options = items.len(), "shortlist");

    // a row may be a bare segment prefix; only that exact entry goes
    let mut on_delete = |removed: &str| {
        store.forget(removed, false);
        store.commit().map(|_| ())
    };
    let chosen = choose(items, &mut on_delete)?;

    if let Some(path) = &chosen {
        store.remember(path);
        store.commit()?;
    }
    Ok(chosen)
}

/// Stored paths containing `filter`, case-insensitively.
pub fn paths(store: &PathStore, filter: &str) -> Vec<String> {
    let filter = filter.to_lowercase();
    store
        .entries()
        .iter()
        .filter(|p| filter.is_empty() || p.to_lowercase().contains(&filter))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InfoReport {
    pub version: String,
    pub min_accuracy: f64,
    pub max_paths: usize,
    pub max_options: usize,
    pub stored: usize,
    /// Entries past capacity dropped on load; gone after the next save.
    pub trimmed: usize,
    pub paths_file: String,
}

pub fn info(store: &PathStore, settings: &Settings) -> InfoReport {
    InfoReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        min_accuracy: settings.min_accuracy,
        max_paths: store.max_paths(),
        max_options: settings.max_options,
        stored: store.len(),
        trimmed: store.trimmed(),
        paths_file: store.file().display().to_string(),
    }
}
