//! The structured result returned by one invocation.
//! Success and failure share one shape; the `status` field tells them apart.

use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::merge::{MoveFailure, Stage, StageFailure};
use crate::errors::MergeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    pub status: Status,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_items_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_items: Option<Vec<MoveFailure>>,
    pub execution_time_seconds: f64,
    /// Process exit status for the CLI; 0 on success.
    #[serde(skip)]
    pub exit_code: i32,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Seconds rounded to two decimals.
fn round_secs(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

impl MergeResult {
    pub fn success(root: &Path, candidate: &Path, moved: Vec<String>, elapsed: Duration) -> Self {
        Self {
            status: Status::Ok,
            status_code: 200,
            message: format!(
                "Successfully moved restore directory contents to {}",
                root.display()
            ),
            restore_directory: Some(candidate.display().to_string()),
            moved_items_count: Some(moved.len()),
            moved_items: Some(moved),
            dry_run: false,
            error: None,
            error_kind: None,
            stage: None,
            failed_items: None,
            execution_time_seconds: round_secs(elapsed),
            exit_code: 0,
        }
    }

    /// Dry run: `moved_items` lists what would have been moved.
    pub fn planned(root: &Path, candidate: &Path, planned: Vec<String>, elapsed: Duration) -> Self {
        let message = format!(
            "Dry run: {} items would be moved from {} to {}",
            planned.len(),
            candidate.display(),
            root.display()
        );
        Self {
            message,
            dry_run: true,
            ..Self::success(root, candidate, planned, elapsed)
        }
    }

    pub fn failure(failure: &StageFailure, elapsed: Duration) -> Self {
        let error = &failure.error;
        // Items already in the root after a partial move are reported alongside the failures.
        let (moved_items, failed_items) = match error {
            MergeError::PartialMoveFailure { moved, failed } => {
                (Some(moved.clone()), Some(failed.clone()))
            }
            _ => (None, None),
        };
        Self {
            status: Status::Error,
            status_code: 500,
            message: format!("Restore directory merge operation failed: {error}"),
            restore_directory: None,
            moved_items_count: moved_items.as_ref().map(Vec::len),
            moved_items,
            dry_run: false,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
            stage: Some(failure.stage),
            failed_items,
            execution_time_seconds: round_secs(elapsed),
            exit_code: error.code(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn success_shape_uses_camel_case_and_omits_error_fields() {
        let res = MergeResult::success(
            Path::new("/data"),
            Path::new("/data/aws-backup-restore_20240101"),
            vec!["a.txt".into(), "sub".into()],
            Duration::from_millis(1234),
        );
        let v: serde_json::Value = serde_json::from_str(&res.to_json().unwrap()).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["statusCode"], 200);
        assert_eq!(v["restoreDirectory"], "/data/aws-backup-restore_20240101");
        assert_eq!(v["movedItemsCount"], 2);
        assert_eq!(v["movedItems"], serde_json::json!(["a.txt", "sub"]));
        assert_eq!(v["executionTimeSeconds"], 1.23);
        assert!(v.get("error").is_none());
        assert!(v.get("dryRun").is_none());
    }

    #[test]
    fn failure_shape_carries_error_instead_of_success_fields() {
        let failure = StageFailure {
            stage: Stage::CheckConflicts,
            error: MergeError::ConflictDetected {
                root: PathBuf::from("/data"),
                conflicts: vec![PathBuf::from("a.txt")],
            },
        };
        let res = MergeResult::failure(&failure, Duration::from_millis(5));
        let v: serde_json::Value = serde_json::to_value(&res).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["statusCode"], 500);
        assert_eq!(v["errorKind"], "conflict_detected");
        assert_eq!(v["stage"], "check_conflicts");
        assert!(v["error"].as_str().unwrap().contains("a.txt"));
        assert!(v.get("movedItems").is_none());
        assert!(v.get("restoreDirectory").is_none());
        assert_eq!(res.exit_code, 12);
    }

    #[test]
    fn partial_failure_lists_failed_items() {
        let failure = StageFailure {
            stage: Stage::Move,
            error: MergeError::PartialMoveFailure {
                moved: vec!["a".into()],
                failed: vec![MoveFailure {
                    name: "b".into(),
                    error: "denied".into(),
                }],
            },
        };
        let v = serde_json::to_value(MergeResult::failure(&failure, Duration::ZERO)).unwrap();
        assert_eq!(v["failedItems"], serde_json::json!([{"item": "b", "error": "denied"}]));
        assert_eq!(v["movedItems"], serde_json::json!(["a"]));
        assert_eq!(v["movedItemsCount"], 1);
        assert_eq!(v["errorKind"], "partial_move_failure");
    }
}
