//! Filesystem primitives shared by the merge stages.

mod atomic;
mod helpers;

pub use atomic::rename_no_clobber;
pub use helpers::{describe_io_error, io_error_with_help};
