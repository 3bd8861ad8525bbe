//! Conflict detection between the restore directory and the root.
//! Read-only: must complete before anything is moved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::MergeError;

/// Every path inside `candidate` (relative to it) that already exists under `root`.
///
/// The full set is returned, in walk order with siblings sorted by name, so one
/// report shows the whole scope of the problem. Symlinks are neither followed
/// while walking nor when testing the destination.
pub fn find_conflicts(candidate: &Path, root: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let mut conflicts = Vec::new();

    for entry in WalkDir::new(candidate)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry
            .map_err(|e| MergeError::unexpected("Error checking for conflicts", io::Error::from(e)))?;
        let relative = entry
            .path()
            .strip_prefix(candidate)
            .map_err(|e| {
                MergeError::unexpected(
                    "Error checking for conflicts",
                    io::Error::new(io::ErrorKind::InvalidData, e),
                )
            })?
            .to_path_buf();

        if exists_no_follow(&root.join(&relative))? {
            conflicts.push(relative);
        }
    }

    Ok(conflicts)
}

/// `ConflictDetected` when any conflict exists.
pub fn ensure_no_conflicts(candidate: &Path, root: &Path) -> Result<(), MergeError> {
    let conflicts = find_conflicts(candidate, root)?;
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(MergeError::ConflictDetected {
            root: root.to_path_buf(),
            conflicts,
        })
    }
}

fn exists_no_follow(path: &Path) -> Result<bool, MergeError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        // A file where a directory is expected: `root/a.txt/b` cannot exist.
        Err(e) if e.raw_os_error() == Some(not_a_directory()) => Ok(false),
        Err(e) => Err(MergeError::unexpected(
            format!("Error checking for conflicts at {}", path.display()),
            e,
        )),
    }
}

#[cfg(unix)]
fn not_a_directory() -> i32 {
    libc::ENOTDIR
}

#[cfg(windows)]
fn not_a_directory() -> i32 {
    // ERROR_DIRECTORY
    267
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn setup() -> (assert_fs::TempDir, PathBuf) {
        let root = assert_fs::TempDir::new().unwrap();
        let cand = root.child("aws-backup-restore_1");
        cand.child("a.txt").write_str("a").unwrap();
        cand.child("sub/b.txt").write_str("b").unwrap();
        let path = cand.path().to_path_buf();
        (root, path)
    }

    #[test]
    fn no_conflicts_on_clean_root() {
        let (root, cand) = setup();
        assert!(find_conflicts(&cand, root.path()).unwrap().is_empty());
        ensure_no_conflicts(&cand, root.path()).unwrap();
    }

    #[test]
    fn reports_every_conflict_not_just_the_first() {
        let (root, cand) = setup();
        root.child("a.txt").write_str("existing").unwrap();
        root.child("sub/b.txt").write_str("existing").unwrap();

        let found = find_conflicts(&cand, root.path()).unwrap();
        assert_eq!(
            found,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("sub"),
                PathBuf::from("sub").join("b.txt")
            ]
        );
    }

    #[test]
    fn nested_path_under_existing_file_is_not_a_conflict() {
        let (root, cand) = setup();
        root.child("sub").write_str("a file, not a dir").unwrap();

        let found = find_conflicts(&cand, root.path()).unwrap();
        assert_eq!(found, vec![PathBuf::from("sub")]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_in_root_counts() {
        let (root, cand) = setup();
        std::os::unix::fs::symlink(root.path().join("gone"), root.path().join("a.txt")).unwrap();

        let err = ensure_no_conflicts(&cand, root.path()).unwrap_err();
        match err {
            MergeError::ConflictDetected { conflicts, .. } => {
                assert_eq!(conflicts, vec![PathBuf::from("a.txt")])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
