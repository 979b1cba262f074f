//! Async filesystem primitives over libc.
//!
//! Each primitive is an `async fn` that issues its system call on the first
//! poll and completes immediately, so the futures can be awaited from any
//! executor or driven to completion with [`Runtime::block_on`](crate::Runtime::block_on).
//! Errors are the raw [`std::io::Error`] captured right after the failing
//! call; translating them is left to the [`Shim`](crate::Shim).
//!
//! Public API:
//! - [`mkdir`]: create one directory with a numeric mode
//! - [`scandir`]: list one directory as [`DirEntry`] values
//! - [`rename`]: move a path

pub mod dir;
pub mod entry;
pub mod rename;

pub use dir::{mkdir, scandir};
pub use entry::{DirEntry, EntryType};
pub use rename::rename;

use std::ffi::CString;
use std::io;

pub(crate) fn to_cstring(path: &str) -> io::Result<CString> {
    CString::new(path)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))
}
