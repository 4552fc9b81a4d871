//! Sub-module entry discovery.
//!
//! Walks the source root for files matching the profile's include patterns
//! and not matching its exclude patterns. Each hit becomes an [`Entry`]
//! carrying its absolute path, logical name (file stem) and group path (its
//! directory relative to the root). Results are sorted lexicographically by
//! absolute path so downstream task ordering is deterministic.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::profile::compile_patterns;
use crate::{Error, Result};

/// A source file that is an independent build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub absolute_path: PathBuf,
    /// File basename without extension.
    pub logical_name: String,
    /// Containing directory relative to the source root, `/`-joined.
    /// Empty for the main entry and for files directly under the root.
    pub group_path: String,
}

impl Entry {
    /// The main entry for a build: lives at `path`, groupless.
    pub fn main(path: PathBuf) -> Self {
        let logical_name = stem_of(&path);
        Entry {
            absolute_path: path,
            logical_name,
            group_path: String::new(),
        }
    }
}

/// Discover sub-module entries under `root`.
///
/// Returns an empty list (not an error) when nothing matches. Fails with
/// [`Error::Discovery`] when the root is missing or unreadable, and with
/// [`Error::InvalidProfile`] on malformed patterns.
pub fn discover(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<Entry>> {
    let root = root.canonicalize().map_err(|e| Error::Discovery {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !root.is_dir() {
        return Err(Error::Discovery {
            path: root,
            reason: "not a directory".to_string(),
        });
    }

    let overrides = compile_patterns(&root, include, exclude)?;
    let walker = WalkBuilder::new(&root)
        .overrides(overrides)
        .standard_filters(false)
        .build();

    let mut entries = Vec::new();
    for dirent in walker {
        let dirent = dirent.map_err(|e| Error::Discovery {
            path: root.clone(),
            reason: e.to_string(),
        })?;
        if !dirent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let absolute_path = dirent.into_path();
        let Ok(relative) = absolute_path.strip_prefix(&root) else {
            continue;
        };
        let logical_name = stem_of(&absolute_path);
        if logical_name.is_empty() {
            continue;
        }
        let group_path = group_of(relative);
        entries.push(Entry {
            absolute_path,
            logical_name,
            group_path,
        });
    }

    entries.sort_by(|a, b| a.absolute_path.cmp(&b.absolute_path));
    tracing::debug!(count = entries.len(), root = %root.display(), "discovered sub-module entries");
    Ok(entries)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn group_of(relative: &Path) -> String {
    let Some(parent) = relative.parent() else {
        return String::new();
    };
    parent
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}
