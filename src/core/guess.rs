//! Filesystem fallback for keywords the store does not know.
//!
//! Tries a handful of case variants of the keyword as child directories of
//! the current directory, then of the home directory.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Names tried for `keyword`, in the order they are tried.
pub fn variants(keyword: &str) -> Vec<String> {
    vec![
        keyword.to_string(),
        capitalize(keyword),
        keyword.to_lowercase(),
        keyword.to_uppercase(),
        format!(".{}", keyword),
    ]
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Errors (permission denied, vanished entry) count as "not there".
fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

fn first_dir(root: &Path, names: &[String]) -> Option<PathBuf> {
    names.iter().map(|name| root.join(name)).find(|candidate| {
        let hit = is_dir(candidate);
        trace!(candidate = %candidate.display(), hit, "guess candidate");
        hit
    })
}

/// Find a child directory of `base` (or of `home` when `base` is not home)
/// whose name is a case variant of `keyword`.
pub fn guess(base: &Path, home: Option<&Path>, keyword: &str) -> Option<PathBuf> {
    if keyword.is_empty() {
        return None;
    }
    let names = variants(keyword);
    if let Some(found) = first_dir(base, &names) {
        return Some(found);
    }
    match home {
        Some(home) if home != base => first_dir(home, &names),
        _ => None,
    }
}
