//! Directory creation and listing.
//!
//! # Examples
//!
//! ```no_run
//! use fs_shim::Runtime;
//! use fs_shim::fs::{mkdir, scandir};
//!
//! # fn example() -> std::io::Result<()> {
//! let runtime = Runtime::new();
//!
//! runtime.block_on(async {
//!     mkdir("/tmp/fs-shim-demo", 0o755).await?;
//!
//!     for entry in scandir("/tmp").await? {
//!         println!("{} ({})", entry.file_name().to_string_lossy(), entry.entry_type());
//!     }
//!
//!     Ok::<(), std::io::Error>(())
//! })
//! # }
//! ```

use std::ffi::{CStr, CString, OsStr};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use libc::{DIR, closedir, lstat, mkdir as mkdir_raw, opendir, readdir};
use tracing::{debug, trace};

use super::entry::{DirEntry, EntryType};
use super::to_cstring;

/// Creates a single directory with the given permission bits.
///
/// The kernel applies the process umask on top of `mode`. Fails with
/// `EEXIST` when the path already exists and `ENOENT` when a parent is
/// missing.
pub async fn mkdir(path: &str, mode: u32) -> io::Result<()> {
    let c_path = to_cstring(path)?;

    let result = unsafe { mkdir_raw(c_path.as_ptr(), mode as libc::mode_t) };

    if result < 0 {
        return Err(io::Error::last_os_error());
    }

    debug!(path, mode = format_args!("{:o}", mode), "created directory");
    Ok(())
}

/// Lists the entries of one directory in the order the OS returns them.
///
/// `.` and `..` are skipped. Entries the filesystem cannot classify from the
/// directory stream alone are looked up with `lstat`; if that fails too they
/// are reported as [`EntryType::Unknown`].
pub async fn scandir(path: &str) -> io::Result<Vec<DirEntry>> {
    let c_path = to_cstring(path)?;

    let dir = unsafe { opendir(c_path.as_ptr()) };
    if dir.is_null() {
        return Err(io::Error::last_os_error());
    }

    let stream = DirStream(dir);
    let mut entries = Vec::new();

    loop {
        clear_errno();

        let raw = unsafe { readdir(stream.0) };
        if raw.is_null() {
            let err = io::Error::last_os_error();
            match err.raw_os_error() {
                Some(0) | None => break,
                Some(_) => return Err(err),
            }
        }

        let (name, d_type) = unsafe {
            let name = CStr::from_ptr((*raw).d_name.as_ptr());
            (OsStr::from_bytes(name.to_bytes()).to_os_string(), (*raw).d_type)
        };

        if name == "." || name == ".." {
            continue;
        }

        let mut entry_type = EntryType::from_d_type(d_type);
        if entry_type == EntryType::Unknown {
            entry_type = lstat_type(&Path::new(path).join(&name));
        }

        trace!(path, name = ?name, entry_type = %entry_type, "directory entry");
        entries.push(DirEntry::new(name, entry_type));
    }

    debug!(path, count = entries.len(), "scanned directory");
    Ok(entries)
}

// Owns a `DIR*` so the stream is closed on every exit path.
struct DirStream(*mut DIR);

impl Drop for DirStream {
    fn drop(&mut self) {
        unsafe {
            closedir(self.0);
        }
    }
}

fn lstat_type(path: &Path) -> EntryType {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return EntryType::Unknown;
    };

    let mut stat = MaybeUninit::<libc::stat>::uninit();
    let result = unsafe { lstat(c_path.as_ptr(), stat.as_mut_ptr()) };

    if result < 0 {
        return EntryType::Unknown;
    }

    let stat = unsafe { stat.assume_init() };
    EntryType::from_st_mode(stat.st_mode)
}

// `readdir` signals both end-of-stream and failure with a null pointer; only
// errno tells them apart.
fn clear_errno() {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    unsafe {
        *libc::__errno_location() = 0;
    }

    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    unsafe {
        *libc::__error() = 0;
    }
}
