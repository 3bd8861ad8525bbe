//! Config validation.
//! Checks the shape of the configuration before an invocation; whether the root
//! exists is the core's call and is reported in the merge result.

use anyhow::{Result, bail};
use tracing::debug;

use crate::merge::compile_pattern;

use super::types::Config;

impl Config {
    /// Root must be absolute; pattern must be a single, compilable glob segment.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_absolute() {
            bail!("root must be an absolute path: '{}'", self.root.display());
        }
        compile_pattern(&self.pattern)?;
        Ok(())
    }
}

/// Validate, then resolve symlinks in `root` when it exists (dunce keeps Windows paths verbatim-free).
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    cfg.validate()?;
    if let Ok(real) = dunce::canonicalize(&cfg.root) {
        if real != cfg.root {
            debug!(root = %cfg.root.display(), resolved = %real.display(), "normalized root");
        }
        cfg.root = real;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_is_rejected() {
        let cfg = Config::new("relative/root", "aws-backup-restore_*");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn pattern_with_separator_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let cfg = Config::new(td.path(), "nested/restore_*");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_root_passes_validation_unchanged() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("not-mounted");
        let mut cfg = Config::new(&missing, "aws-backup-restore_*");
        validate_and_normalize(&mut cfg).unwrap();
        assert_eq!(cfg.root, missing);
    }
}
