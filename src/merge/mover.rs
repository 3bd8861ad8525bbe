//! Move the restore directory's top-level children into the root.
//!
//! Each child is renamed on its own (atomic per item) and carries its subtree
//! with it. The pass is best-effort, not transactional: a failing item is
//! recorded and the remaining items are still moved, so after a
//! `PartialMoveFailure` both the root and the restore directory may hold part
//! of the restored tree. Callers get both lists in the error, and the result
//! carries them as `movedItems` and `failedItems`, to reconcile by hand.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::MergeError;
use crate::fs_ops::{io_error_with_help, rename_no_clobber};
use crate::observer::{MergeObserver, Progress};

use super::record::{MoveOutcome, MoveRecord, MoveReport};

/// Progress is reported every this many items, plus once for the final item.
pub const PROGRESS_EVERY: usize = 10;

/// Immediate children of `candidate` in directory listing order.
pub fn list_children(candidate: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let entries = fs::read_dir(candidate)
        .map_err(io_error_with_help("read directory", candidate))
        .map_err(|e| MergeError::unexpected("Error moving contents", e))?;
    entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(io_error_with_help("read directory entry", candidate))
                .map_err(|e| MergeError::unexpected("Error moving contents", e))
        })
        .collect()
}

/// Rename every child of `candidate` to `root/<name>`.
///
/// Returns the moved names on full success, or `PartialMoveFailure` carrying
/// the moved and failed lists once every item has been attempted.
pub fn move_children(
    candidate: &Path,
    root: &Path,
    observer: &mut dyn MergeObserver,
) -> Result<Vec<String>, MergeError> {
    let report = move_children_report(candidate, root, observer)?;
    if report.failed_count() == 0 {
        Ok(report.moved())
    } else {
        Err(MergeError::PartialMoveFailure {
            moved: report.moved(),
            failed: report.failed(),
        })
    }
}

/// Same pass as [`move_children`], returning every per-item record.
pub fn move_children_report(
    candidate: &Path,
    root: &Path,
    observer: &mut dyn MergeObserver,
) -> Result<MoveReport, MergeError> {
    let items = list_children(candidate)?;
    let total = items.len();
    observer.on_move_started(candidate, total);

    let mut report = MoveReport::default();
    for (index, item) in items.iter().enumerate() {
        let record = match item.file_name() {
            Some(file_name) => {
                let name = file_name.to_string_lossy().into_owned();
                match rename_no_clobber(item, &root.join(file_name)) {
                    Ok(()) => MoveRecord::moved(name),
                    Err(e) => MoveRecord::failed(name, e.to_string()),
                }
            }
            None => MoveRecord::failed(item.display().to_string(), "entry has no file name"),
        };
        if let MoveOutcome::Failed(error) = &record.outcome {
            observer.on_item_failed(&record.name, error);
        }
        report.push(record);

        let processed = index + 1;
        if processed % PROGRESS_EVERY == 0 || processed == total {
            observer.on_progress(Progress {
                processed,
                total,
                moved: report.moved_count(),
                failed: report.failed_count(),
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use assert_fs::prelude::*;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<Progress>,
        failures: Vec<String>,
    }

    impl MergeObserver for Recorder {
        fn on_progress(&mut self, progress: Progress) {
            self.progress.push(progress);
        }
        fn on_item_failed(&mut self, name: &str, _error: &str) {
            self.failures.push(name.to_string());
        }
    }

    #[test]
    fn moves_files_and_subtrees() {
        let root = assert_fs::TempDir::new().unwrap();
        let cand = root.child("restore");
        cand.child("a.txt").write_str("alpha").unwrap();
        cand.child("sub/b.txt").write_str("beta").unwrap();

        let mut moved = move_children(cand.path(), root.path(), &mut NoopObserver).unwrap();
        moved.sort();

        assert_eq!(moved, vec!["a.txt".to_string(), "sub".to_string()]);
        assert_eq!(std::fs::read_to_string(root.path().join("a.txt")).unwrap(), "alpha");
        assert_eq!(std::fs::read_to_string(root.path().join("sub/b.txt")).unwrap(), "beta");
        assert_eq!(std::fs::read_dir(cand.path()).unwrap().count(), 0);
    }

    #[test]
    fn progress_every_ten_and_on_last_item() {
        let root = assert_fs::TempDir::new().unwrap();
        let cand = root.child("restore");
        for i in 0..25 {
            cand.child(format!("f{i:02}")).write_str("x").unwrap();
        }

        let mut rec = Recorder::default();
        move_children(cand.path(), root.path(), &mut rec).unwrap();

        let processed: Vec<usize> = rec.progress.iter().map(|p| p.processed).collect();
        assert_eq!(processed, vec![10, 20, 25]);
        assert!(rec.progress.iter().all(|p| p.total == 25 && p.failed == 0));
        assert_eq!(rec.progress.last().unwrap().moved, 25);
    }

    #[test]
    fn existing_destination_fails_item_but_others_move() {
        let root = assert_fs::TempDir::new().unwrap();
        let cand = root.child("restore");
        cand.child("keep.txt").write_str("restored").unwrap();
        cand.child("other.txt").write_str("other").unwrap();
        root.child("keep.txt").write_str("live").unwrap();

        let mut rec = Recorder::default();
        let err = move_children(cand.path(), root.path(), &mut rec).unwrap_err();

        match err {
            MergeError::PartialMoveFailure { moved, failed } => {
                assert_eq!(moved, vec!["other.txt".to_string()]);
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].name, "keep.txt");
                assert!(failed[0].error.contains("already exists"), "{}", failed[0].error);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(rec.failures, vec!["keep.txt".to_string()]);
        assert_eq!(std::fs::read_to_string(root.path().join("keep.txt")).unwrap(), "live");
        assert!(cand.path().join("keep.txt").exists());
        assert!(root.path().join("other.txt").exists());
    }

    #[test]
    fn empty_candidate_moves_nothing_and_reports_nothing() {
        let root = assert_fs::TempDir::new().unwrap();
        let cand = root.child("restore");
        cand.create_dir_all().unwrap();

        let mut rec = Recorder::default();
        let moved = move_children(cand.path(), root.path(), &mut rec).unwrap();
        assert!(moved.is_empty());
        assert!(rec.progress.is_empty());
    }
}
