//! Config module.
//! Configuration types, default paths, XML loading and validation.
//! Layering: defaults < XML file < environment < CLI flags.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{load_config, load_config_from_xml_path};

/// Fixed mount point of the filesystem the restore lands on.
pub const ROOT_DEFAULT: &str = "/mnt/efs";

/// Explicit config file location.
pub const CONFIG_ENV: &str = "RESTORE_MERGE_CONFIG";

/// Pattern override, set by the deployment that triggers the merge.
pub const PATTERN_ENV: &str = "RESTORE_DIRECTORY_PATTERN";
