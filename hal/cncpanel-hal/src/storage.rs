//! Removable storage abstractions
//!
//! Provides a narrow, line-oriented view of a FAT volume on an SD card or
//! USB stick. The panel only ever needs to enumerate the root directory,
//! read and write short text files line by line, delete a file and query
//! its size.

use heapless::String;

/// Longest file name a directory entry can carry (FAT long file names)
pub const MAX_LFN_LEN: usize = 255;

/// Driver status: operation succeeded
pub const STATUS_OK: u8 = 0;
/// Driver status: low level disk I/O error
pub const STATUS_DISK_ERR: u8 = 1;
/// Driver status: medium not ready (no card inserted)
pub const STATUS_NOT_READY: u8 = 3;
/// Driver status: file does not exist
pub const STATUS_NO_FILE: u8 = 4;
/// Driver status: path does not exist
pub const STATUS_NO_PATH: u8 = 5;
/// Driver status: access denied or directory full
pub const STATUS_DENIED: u8 = 7;
/// Driver status: no valid FAT volume
pub const STATUS_NO_FILESYSTEM: u8 = 13;

/// Error reported by the storage driver
///
/// Both codes are shown to the operator verbatim, so they keep the
/// driver's own numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorageError {
    /// Filesystem status code
    pub status: u8,
    /// Low level card driver error number (0 if not applicable)
    pub device_errno: u16,
}

impl StorageError {
    /// Create an error with a filesystem status and no device detail
    pub const fn new(status: u8) -> Self {
        Self {
            status,
            device_errno: 0,
        }
    }

    /// Create an error carrying the card driver's error number
    pub const fn with_device(status: u8, device_errno: u16) -> Self {
        Self {
            status,
            device_errno,
        }
    }

    /// Check if the error means the file or path is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self.status, STATUS_NO_FILE | STATUS_NO_PATH)
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Long file name if present, otherwise the 8.3 name
    pub name: String<MAX_LFN_LEN>,
    /// Entry is a directory
    pub is_dir: bool,
}

impl DirEntry {
    /// Create a plain file entry
    ///
    /// Names longer than [`MAX_LFN_LEN`] bytes are cut at the limit.
    pub fn file(name: &str) -> Self {
        Self::new(name, false)
    }

    /// Create a directory entry
    pub fn dir(name: &str) -> Self {
        Self::new(name, true)
    }

    fn new(name: &str, is_dir: bool) -> Self {
        let mut n = String::new();
        for ch in name.chars() {
            if n.push(ch).is_err() {
                break;
            }
        }
        Self { name: n, is_dir }
    }

    /// Check whether the entry is hidden (leading `.`, which also covers
    /// the `.` and `..` links)
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Storage trait
///
/// Every operation returns the driver status on failure; nothing here is
/// expected to panic. Files are plain handles owned by the caller, who
/// must hand them back through [`FileStorage::close`].
pub trait FileStorage {
    /// Open file handle
    type File;

    /// Directory listing iterator
    type Entries<'a>: Iterator<Item = Result<DirEntry, StorageError>>
    where
        Self: 'a;

    /// Mount the volume
    fn mount(&mut self) -> Result<(), StorageError>;

    /// Enumerate a directory in on-disk order
    ///
    /// Opening the directory may fail immediately; individual reads may
    /// fail later through the iterator.
    fn list_entries(&mut self, path: &str) -> Result<Self::Entries<'_>, StorageError>;

    /// Open an existing file for reading
    fn open(&mut self, name: &str) -> Result<Self::File, StorageError>;

    /// Read the next line of a file into `buf`
    ///
    /// Returns the line without its CR/LF terminator, or `None` at end of
    /// file. A line longer than `buf` is split; the remainder comes back
    /// on the next call.
    fn read_line<'b>(
        &mut self,
        file: &mut Self::File,
        buf: &'b mut [u8],
    ) -> Result<Option<&'b str>, StorageError>;

    /// Create a file, truncating any existing one, and open it for writing
    fn create(&mut self, name: &str) -> Result<Self::File, StorageError>;

    /// Append `line` followed by a newline
    fn write_line(&mut self, file: &mut Self::File, line: &str) -> Result<(), StorageError>;

    /// Flush and release a file handle
    fn close(&mut self, file: Self::File) -> Result<(), StorageError>;

    /// Remove a file
    fn delete(&mut self, name: &str) -> Result<(), StorageError>;

    /// Size of a file in bytes
    fn stat(&mut self, name: &str) -> Result<u32, StorageError>;
}
