//! Platform-specific helpers.
//! Hides OS differences behind one function so the logging setup stays platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::open_log_file_secure_append;

#[cfg(not(unix))]
pub use windows::open_log_file_secure_append;
