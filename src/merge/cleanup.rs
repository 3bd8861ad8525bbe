//! Remove the emptied restore directory.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::MergeError;
use crate::fs_ops::io_error_with_help;

/// Remove `candidate` if it has no entries left.
///
/// A non-empty directory is `DirectoryNotEmpty` even right after a fully
/// successful move: something may have written into it meanwhile.
pub fn remove_candidate(candidate: &Path) -> Result<(), MergeError> {
    let remaining = fs::read_dir(candidate)
        .map_err(io_error_with_help("read directory", candidate))
        .map_err(|e| MergeError::unexpected("Error removing restore directory", e))?
        .count();
    if remaining > 0 {
        return Err(MergeError::DirectoryNotEmpty {
            path: candidate.to_path_buf(),
            remaining,
        });
    }

    // rmdir, never remove_dir_all: an entry appearing now must make this fail.
    fs::remove_dir(candidate)
        .map_err(io_error_with_help("remove directory", candidate))
        .map_err(|source| MergeError::RemovalFailed {
            path: candidate.to_path_buf(),
            source,
        })?;
    debug!(path = %candidate.display(), "removed empty restore directory");
    Ok(())
}
