//! Directory creation, directory scanning and file renaming over libc.
//!
//! The crate exposes three operations on sequences of path strings:
//!
//! - [`make_directory`]: create directories from a POSIX mode string
//!   (`"755"`, `"u=rwx,go=rx"`), treating existing ones as created
//! - [`scan_directory`]: list directories as joined path strings, optionally
//!   filtered by [`EntryType`] and optionally recursive
//! - [`rename_file`]: rename one path
//!
//! # Architecture
//!
//! - **fs**: async primitives issuing the libc calls (`mkdir`, `opendir`/`readdir`, `rename`)
//! - **Runtime**: drives those futures to completion on the calling thread
//! - **Shim**: the three operations, input validation and error translation
//! - **ShimBuilder**: fluent configuration (umask override, entry sorting)
//! - **Mode**: octal and symbolic mode string parsing
//!
//! # Example
//!
//! ```no_run
//! # fn example() -> fs_shim::Result<()> {
//! fs_shim::make_directory(&["/tmp/demo", "/tmp/demo/sub"], "755")?;
//!
//! let dirs = fs_shim::scan_directory(&["/tmp/demo"], Some(fs_shim::EntryType::Directory), false)?;
//! assert_eq!(dirs, vec!["/tmp/demo/sub".to_string()]);
//!
//! fs_shim::rename_file("/tmp/demo/sub", "/tmp/demo/renamed")?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
pub mod fs;
pub mod mode;
mod runtime;
mod shim;

pub use builder::ShimBuilder;
pub use error::{Error, Operation, Result};
pub use fs::{DirEntry, EntryType};
pub use mode::{Mode, ModeError};
pub use runtime::Runtime;
pub use shim::{Shim, join_path};

/// Creates every directory in `paths` with a default [`Shim`].
///
/// See [`Shim::make_directory`].
pub fn make_directory<S: AsRef<str>>(paths: &[S], mode: &str) -> Result<()> {
    Shim::new().make_directory(paths, mode)
}

/// Lists every directory in `paths` with a default [`Shim`].
///
/// See [`Shim::scan_directory`].
pub fn scan_directory<S: AsRef<str>>(
    paths: &[S],
    filter: Option<EntryType>,
    recurse: bool,
) -> Result<Vec<String>> {
    Shim::new().scan_directory(paths, filter, recurse)
}

/// Renames `path` to `new_path` with a default [`Shim`].
///
/// See [`Shim::rename_file`].
pub fn rename_file(path: &str, new_path: &str) -> Result<()> {
    Shim::new().rename_file(path, new_path)
}
