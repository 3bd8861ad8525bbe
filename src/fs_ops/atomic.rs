//! Per-item atomic rename that never replaces an existing destination.
//! - POSIX rename silently overwrites files, so the destination is checked first.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
#[cfg(unix)]
use std::fs::File;
use std::io;
use std::path::Path;

use super::helpers::io_error_with_help;

pub fn rename_no_clobber(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::symlink_metadata(dst) {
        Ok(_) => {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists))
                .map_err(io_error_with_help("move into", dst));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).map_err(io_error_with_help("inspect destination", dst)),
    }

    fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A failed fsync does not undo a completed rename.
        let _ = File::open(parent).and_then(|d| d.sync_all());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn renames_into_free_destination() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("src.txt");
        src.write_str("payload").unwrap();
        let dst = dir.child("dst.txt");

        rename_no_clobber(src.path(), dst.path()).unwrap();

        assert!(!src.path().exists());
        assert_eq!(std::fs::read_to_string(dst.path()).unwrap(), "payload");
    }

    #[test]
    fn refuses_existing_destination() {
        let dir = assert_fs::TempDir::new().unwrap();
        let src = dir.child("src.txt");
        src.write_str("new").unwrap();
        let dst = dir.child("dst.txt");
        dst.write_str("old").unwrap();

        let err = rename_no_clobber(src.path(), dst.path()).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(src.path().exists());
        assert_eq!(std::fs::read_to_string(dst.path()).unwrap(), "old");
    }
}
