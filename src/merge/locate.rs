//! Locate the restore directory under the root.
//! Only immediate children are considered; the pattern matches one path segment.

use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::MergeError;
use crate::fs_ops::io_error_with_help;

/// Shell-style matching: `*` never crosses a separator and a leading dot must be literal.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Compile a single-segment glob pattern.
pub fn compile_pattern(pattern: &str) -> Result<Pattern, MergeError> {
    let invalid = |reason: String| MergeError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };
    if pattern.trim().is_empty() {
        return Err(invalid("pattern is empty".into()));
    }
    if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
        return Err(invalid("pattern must match a single directory name".into()));
    }
    if pattern.contains("**") {
        return Err(invalid("recursive wildcards are not supported".into()));
    }
    Pattern::new(pattern).map_err(|e| invalid(e.to_string()))
}

/// Every real directory directly under `root` whose name matches `pattern`, sorted by path.
/// Symlinks are never selected. Names that are not valid UTF-8 cannot be matched
/// against the glob and are skipped, so they never count towards an ambiguous match.
pub fn find_candidates(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, MergeError> {
    let compiled = compile_pattern(pattern)?;

    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(MergeError::RootInvalid(root.to_path_buf())),
    }

    let entries = fs::read_dir(root)
        .map_err(io_error_with_help("read directory", root))
        .map_err(|e| MergeError::unexpected("Error finding restore directories", e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(io_error_with_help("read directory entry", root))
            .map_err(|e| MergeError::unexpected("Error finding restore directories", e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!(name = ?entry.file_name(), "skipping non UTF-8 entry");
            continue;
        };
        if !compiled.matches_with(name, MATCH_OPTIONS) {
            continue;
        }
        let file_type = entry
            .file_type()
            .map_err(io_error_with_help("inspect entry", &entry.path()))
            .map_err(|e| MergeError::unexpected("Error finding restore directories", e))?;
        if file_type.is_dir() {
            candidates.push(entry.path());
        } else {
            debug!(path = %entry.path().display(), "name matches but entry is not a directory");
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Exactly one candidate, or `NotFound` / `AmbiguousMatch`.
pub fn locate_candidate(root: &Path, pattern: &str) -> Result<PathBuf, MergeError> {
    select_single(root, pattern, find_candidates(root, pattern)?)
}

pub(crate) fn select_single(
    root: &Path,
    pattern: &str,
    mut candidates: Vec<PathBuf>,
) -> Result<PathBuf, MergeError> {
    match candidates.len() {
        0 => Err(MergeError::NotFound {
            pattern: pattern.to_string(),
            root: root.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(MergeError::AmbiguousMatch {
            pattern: pattern.to_string(),
            matches: candidates,
        }),
    }
}
