//! I/O error helpers.
//!
//! Adds the operation, the path and a platform-aware hint to an io::Error so
//! per-item failures in the merge report are actionable on their own.
//!
//!   fs::remove_dir(dir).map_err(io_error_with_help("remove directory", dir))?;

use std::io;
use std::path::Path;

/// Hint for well-known raw OS error codes.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::EXDEV => "cross-filesystem; the restore directory must live on the same filesystem as the root",
        libc::EBUSY => "resource busy; ensure nothing holds the entry open",
        libc::ENOENT => "path not found; it may have been removed concurrently",
        libc::EEXIST => "already exists at the destination; refusing to overwrite",
        libc::ENOTEMPTY => "directory not empty",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem; cannot write here",
        libc::ESTALE => "stale file handle; the network filesystem may have been remounted",
        libc::ENAMETOOLONG => "filename or path too long",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions",
        17 => "not same device; cross-filesystem move",
        32 => "sharing violation; file is in use",
        2 | 3 => "path not found; it may have been removed concurrently",
        80 | 183 => "already exists at the destination; refusing to overwrite",
        145 => "directory not empty",
        _ => return None,
    };
    Some(hint)
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been removed concurrently"),
        io::ErrorKind::AlreadyExists => Some("already exists at the destination; refusing to overwrite"),
        _ => None,
    }
}

/// Human-friendly message: "<op> '<path>': <error> — <hint> [os code: N]".
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
        }
    }
    msg
}

/// `.map_err` adapter that keeps the io::ErrorKind but enriches the message.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_fallback_mentions_path_and_hint() {
        let p = Path::new("/nonexistent/restore");
        let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.contains("open"));
        assert!(msg.contains("/nonexistent/restore"));
        assert!(msg.contains("path not found"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn exdev_hint_and_code() {
        let p = Path::new("/mnt/efs/x");
        let msg = describe_io_error("rename", p, &io::Error::from_raw_os_error(libc::EXDEV));
        assert!(msg.contains("cross-filesystem"), "msg was: {msg}");
        assert!(msg.contains("os code"));
    }

    #[cfg(unix)]
    #[test]
    fn unknown_code_has_no_hint() {
        let p = Path::new("/tmp");
        let msg = describe_io_error("op", p, &io::Error::from_raw_os_error(libc::EINTR));
        assert!(!msg.contains(" — "), "msg was: {msg}");
        assert!(msg.contains("os code"));
    }
}
