//! Path store: the ordered list of remembered directories.
//!
//! Entries are kept most-recently-used first and persisted as a flat text
//! file, one absolute path per line. The free functions are pure list
//! transformations; [`PathStore`] wraps them with a file location, a capacity
//! and a dirty flag so a single invocation writes back only when it changed
//! something.

use crate::core::error::EzjumpError;
use rustc_hash::FxHashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Strip trailing separators. The filesystem root stays `/`.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Read the persisted list. A missing file is created empty and yields no
/// entries; any other read failure is fatal. Repeated lines keep their first,
/// most recent, position.
pub fn load(file: &Path) -> Result<Vec<String>, EzjumpError> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            touch(file)?;
            return Ok(Vec::new());
        }
        Err(e) => return Err(EzjumpError::storage(file, e)),
    };

    let mut seen = FxHashSet::default();
    let entries: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && seen.insert(*line))
        .map(str::to_string)
        .collect();
    debug!(file = %file.display(), count = entries.len(), "loaded path store");
    Ok(entries)
}

/// `path` first, then every other entry in its existing order.
pub fn promote(entries: &[String], path: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(entries.len() + 1);
    out.push(path.to_string());
    out.extend(entries.iter().filter(|e| e.as_str() != path).cloned());
    out
}

/// Drop `path`, and with `include_subpaths` everything below it as well.
pub fn forget(entries: &[String], path: &str, include_subpaths: bool) -> Vec<String> {
    let prefix = format!("{}/", path);
    entries
        .iter()
        .filter(|e| {
            if e.as_str() == path {
                return false;
            }
            !(include_subpaths && e.starts_with(&prefix))
        })
        .cloned()
        .collect()
}

/// Overwrite `file` with the first `max_paths` entries.
///
/// The list goes to a sibling temp file first and is renamed into place, so a
/// failed write never leaves a truncated store behind. A symlinked `file` is
/// written through to its target and stays a link.
pub fn save(file: &Path, entries: &[String], max_paths: usize) -> Result<(), EzjumpError> {
    let kept = &entries[..entries.len().min(max_paths)];
    let body = kept.join("\n");
    let body = body.trim_end();
    let target = write_target(file);
    let file = target.as_path();

    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EzjumpError::storage(parent, e))?;
    }

    let tmp = temp_path(file);
    fs::write(&tmp, body).map_err(|e| EzjumpError::storage(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, file) {
        let _ = fs::remove_file(&tmp);
        return Err(EzjumpError::storage(file, e));
    }
    debug!(file = %file.display(), count = kept.len(), "saved path store");
    Ok(())
}

fn write_target(file: &Path) -> PathBuf {
    match fs::symlink_metadata(file) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf())
        }
        _ => file.to_path_buf(),
    }
}

fn temp_path(file: &Path) -> PathBuf {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "paths.txt".to_string());
    file.with_file_name(format!(".{}.tmp", name))
}

fn touch(file: &Path) -> Result<(), EzjumpError> {
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EzjumpError::storage(parent, e))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(|e| EzjumpError::storage(file, e))?;
    Ok(())
}

/// Store handle for one invocation.
#[derive(Debug, Clone)]
pub struct PathStore {
    file: PathBuf,
    max_paths: usize,
    entries: Vec<String>,
    trimmed: usize,
    dirty: bool,
}

impl PathStore {
    pub fn open(file: impl Into<PathBuf>, max_paths: usize) -> Result<Self, EzjumpError> {
        let file = file.into();
        let mut entries = load(&file)?;
        let trimmed = entries.len().saturating_sub(max_paths);
        if trimmed > 0 {
            debug!(file = %file.display(), trimmed, "store over capacity");
            entries.truncate(max_paths);
        }
        Ok(Self {
            file,
            max_paths,
            entries,
            trimmed,
            dirty: false,
        })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn max_paths(&self) -> usize {
        self.max_paths
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries past capacity dropped when the file was opened. The file keeps
    /// them until the next commit.
    pub fn trimmed(&self) -> usize {
        self.trimmed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Move `path` to the front.
    pub fn remember(&mut self, path: &str) {
        let path = normalize(path);
        if path.is_empty() {
            return;
        }
        if self.entries.first().map(String::as_str) == Some(path.as_str()) {
            return;
        }
        self.entries = promote(&self.entries, &path);
        self.dirty = true;
    }

    /// Returns whether anything was removed.
    pub fn forget(&mut self, path: &str, include_subpaths: bool) -> bool {
        let path = normalize(path);
        let next = forget(&self.entries, &path, include_subpaths);
        if next.len() == self.entries.len() {
            return false;
        }
        debug!(
            path = %path,
            removed = self.entries.len() - next.len(),
            "forgot paths"
        );
        self.entries = next;
        self.dirty = true;
        true
    }

    /// Persist if a mutation happened since the last commit.
    pub fn commit(&mut self) -> Result<bool, EzjumpError> {
        if !self.dirty {
            return Ok(false);
        }
        self.entries.truncate(self.max_paths);
        save(&self.file, &self.entries, self.max_paths)?;
        self.dirty = false;
        Ok(true)
    }
}
