//! The three exposed operations: directory creation, directory scanning and
//! file renaming.
//!
//! Each operation validates its input, drives the matching [`crate::fs`]
//! primitive to completion on the calling thread and converts native failures
//! into [`Error::OperationFailed`]. Batch operations process paths in order
//! and stop at the first failure. Work already done is not rolled back.

use tracing::{debug, warn};

use crate::builder::ShimBuilder;
use crate::error::{Error, Operation, Result};
use crate::fs::{self, EntryType};
use crate::mode::{Mode, process_umask};
use crate::runtime::Runtime;

/// Configured entry point for the filesystem operations.
#[derive(Debug, Clone)]
pub struct Shim {
    umask: Option<u32>,
    sort_entries: bool,
    runtime: Runtime,
}

impl Default for Shim {
    fn default() -> Self {
        Self::new()
    }
}

impl Shim {
    /// Creates a shim with the default configuration.
    pub fn new() -> Self {
        ShimBuilder::new().build()
    }

    /// Returns a builder for a custom configuration.
    pub fn builder() -> ShimBuilder {
        ShimBuilder::new()
    }

    pub(crate) fn with_options(umask: Option<u32>, sort_entries: bool) -> Self {
        Self {
            umask,
            sort_entries,
            runtime: Runtime::new(),
        }
    }

    /// Creates every directory in `paths` with the permissions described by
    /// `mode`.
    ///
    /// The mode string is parsed once before any directory is touched. A path
    /// that already exists counts as created. Parents are not created.
    ///
    /// Symbolic modes need the umask. Unless [`ShimBuilder::umask`] is set it
    /// is read from the process; where `/proc` is unavailable that read sets
    /// the umask to zero for a moment, so files other threads create in that
    /// window are not masked. Set the override in multithreaded hosts.
    pub fn make_directory<S: AsRef<str>>(&self, paths: &[S], mode: &str) -> Result<()> {
        let parsed = Mode::parse(mode).map_err(|source| Error::InvalidMode {
            mode: mode.to_string(),
            source,
        })?;

        // Octal modes ignore the umask, so skip reading the process one.
        let umask = if parsed.is_absolute() {
            0
        } else {
            self.umask.unwrap_or_else(process_umask)
        };
        let bits = parsed.resolve(0, umask, true);

        debug!(
            mode,
            bits = format_args!("{:o}", bits),
            count = paths.len(),
            "making directories"
        );

        for path in paths {
            let path = path.as_ref();
            check_path(path)?;

            match self.runtime.block_on(fs::mkdir(path, bits)) {
                Ok(()) => {}
                Err(err) if err.raw_os_error() == Some(libc::EEXIST) => {
                    debug!(path, "directory already exists");
                }
                Err(err) => return Err(Error::failed(Operation::MakeDirectory, path, err)),
            }
        }

        Ok(())
    }

    /// Lists the entries of every directory in `paths` as joined path strings.
    ///
    /// Results for all inputs are concatenated into one sequence, in input
    /// order. `filter` keeps only entries of one type. With `recurse`,
    /// subdirectories are listed depth-first right after their own entry;
    /// symbolic links are not followed. Entries whose names are not valid
    /// UTF-8 cannot be returned as strings and are skipped, together with
    /// anything below them. Any failure discards the partial result.
    pub fn scan_directory<S: AsRef<str>>(
        &self,
        paths: &[S],
        filter: Option<EntryType>,
        recurse: bool,
    ) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for path in paths {
            let path = path.as_ref();
            check_path(path)?;
            self.scan_into(path, filter, recurse, &mut files)?;
        }

        debug!(count = files.len(), recurse, "scan complete");
        Ok(files)
    }

    fn scan_into(
        &self,
        path: &str,
        filter: Option<EntryType>,
        recurse: bool,
        files: &mut Vec<String>,
    ) -> Result<()> {
        let mut entries = self
            .runtime
            .block_on(fs::scandir(path))
            .map_err(|err| Error::failed(Operation::ScanDirectory, path, err))?;

        if self.sort_entries {
            entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));
        }

        for entry in entries {
            let Some(name) = entry.name() else {
                warn!(path, name = ?entry.file_name(), "skipping entry with non UTF-8 name");
                continue;
            };

            let joined = join_path(path, name);
            let keep = filter.is_none_or(|wanted| wanted == entry.entry_type());

            if recurse && entry.entry_type() == EntryType::Directory {
                if keep {
                    files.push(joined.clone());
                }
                self.scan_into(&joined, filter, recurse, files)?;
            } else if keep {
                files.push(joined);
            }
        }

        Ok(())
    }

    /// Renames `path` to `new_path`.
    ///
    /// Failures such as a missing source, a permission error or a
    /// cross-device move are returned as [`Error::OperationFailed`].
    pub fn rename_file(&self, path: &str, new_path: &str) -> Result<()> {
        check_path(path)?;
        check_path(new_path)?;

        self.runtime
            .block_on(fs::rename(path, new_path))
            .map_err(|source| Error::OperationFailed {
                operation: Operation::RenameFile,
                path: path.to_string(),
                destination: Some(new_path.to_string()),
                source,
            })
    }
}

/// Joins a scanned directory and an entry name.
///
/// `"."` yields the bare name, a directory ending in `/` is concatenated
/// directly and anything else gets exactly one `/` inserted.
///
/// ```
/// use fs_shim::join_path;
///
/// assert_eq!(join_path(".", "a"), "a");
/// assert_eq!(join_path("/tmp/", "a"), "/tmp/a");
/// assert_eq!(join_path("/tmp", "a"), "/tmp/a");
/// ```
pub fn join_path(dir: &str, name: &str) -> String {
    if dir == "." {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

fn check_path(path: &str) -> Result<()> {
    if path.contains('\0') {
        return Err(Error::InvalidPath(path.to_string()));
    }

    Ok(())
}
