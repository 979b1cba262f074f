//! Path renaming.

use std::io;

use libc::rename as rename_raw;
use tracing::debug;

use super::to_cstring;

/// Renames `from` to `to`.
///
/// Equivalent to `rename(from, to)`: an existing destination file is replaced
/// and moves across filesystems fail with `EXDEV`.
pub async fn rename(from: &str, to: &str) -> io::Result<()> {
    let c_from = to_cstring(from)?;
    let c_to = to_cstring(to)?;

    let result = unsafe { rename_raw(c_from.as_ptr(), c_to.as_ptr()) };

    if result < 0 {
        return Err(io::Error::last_os_error());
    }

    debug!(from, to, "renamed");
    Ok(())
}
