//! Windows implementation of platform helpers (no symlink defense available via std).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open the log file for appending, creating parent directories as needed.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
