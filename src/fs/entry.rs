//! Directory entries and their type tags.

use std::ffi::{OsStr, OsString};
use std::fmt;

use crate::error::{Error, Result};

/// Kind of a directory entry as reported by the directory stream.
///
/// The integer codes used by [`EntryType::from_filter`] and
/// [`EntryType::code`] are `0` unknown, `1` file, `2` directory, `3` symlink
/// and `4` other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Unknown,
    File,
    Directory,
    Symlink,
    /// Fifo, socket, character or block device.
    Other,
}

impl EntryType {
    /// Converts an integer filter code; `-1` means no filter.
    pub fn from_filter(code: i32) -> Result<Option<Self>> {
        let entry_type = match code {
            -1 => return Ok(None),
            0 => EntryType::Unknown,
            1 => EntryType::File,
            2 => EntryType::Directory,
            3 => EntryType::Symlink,
            4 => EntryType::Other,
            _ => return Err(Error::InvalidFilter(code)),
        };

        Ok(Some(entry_type))
    }

    /// The integer code of this type.
    pub fn code(self) -> i32 {
        match self {
            EntryType::Unknown => 0,
            EntryType::File => 1,
            EntryType::Directory => 2,
            EntryType::Symlink => 3,
            EntryType::Other => 4,
        }
    }

    pub(crate) fn from_d_type(d_type: u8) -> Self {
        match d_type {
            libc::DT_REG => EntryType::File,
            libc::DT_DIR => EntryType::Directory,
            libc::DT_LNK => EntryType::Symlink,
            libc::DT_FIFO | libc::DT_SOCK | libc::DT_CHR | libc::DT_BLK => EntryType::Other,
            _ => EntryType::Unknown,
        }
    }

    pub(crate) fn from_st_mode(st_mode: libc::mode_t) -> Self {
        match st_mode & libc::S_IFMT {
            libc::S_IFREG => EntryType::File,
            libc::S_IFDIR => EntryType::Directory,
            libc::S_IFLNK => EntryType::Symlink,
            libc::S_IFIFO | libc::S_IFSOCK | libc::S_IFCHR | libc::S_IFBLK => EntryType::Other,
            _ => EntryType::Unknown,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryType::Unknown => "unknown",
            EntryType::File => "file",
            EntryType::Directory => "directory",
            EntryType::Symlink => "symlink",
            EntryType::Other => "other",
        };

        f.write_str(name)
    }
}

/// One entry of a directory listing, without the directory prefix.
///
/// The name is kept as the raw bytes the directory stream returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    name: OsString,
    entry_type: EntryType,
}

impl DirEntry {
    pub(crate) fn new(name: OsString, entry_type: EntryType) -> Self {
        Self { name, entry_type }
    }

    /// The entry's file name as stored on disk.
    pub fn file_name(&self) -> &OsStr {
        &self.name
    }

    /// The entry's file name, or `None` if it is not valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        self.name.to_str()
    }

    /// The entry's type tag.
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }
}
