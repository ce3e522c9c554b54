//! Filesystem port used by catalog resolution and publishing.
//!
//! The catalog and publisher only touch the disk through [`CatalogFs`], which
//! keeps the resolution rules testable against fault-injecting wrappers.

use std::ffi::OsString;
use std::fs::FileTimes;
use std::io;
use std::path::Path;

use crate::atomic_io::write_text_atomic;

/// Coarse classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntryKind {
    File,
    Directory,
    Other,
}

/// One entry returned by [`CatalogFs::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: OsString,
    pub kind: DirEntryKind,
}

impl DirEntryInfo {
    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == DirEntryKind::File
    }
}

/// Trait contract for the filesystem operations the catalog consumes.
pub trait CatalogFs: Send + Sync {
    /// Lists the entries directly inside `dir`, in no particular order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replaces the content of `path`, creating parent directories as needed.
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Copies bytes and permissions, then carries over the source's access and
    /// modification times where the platform reports them.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`CatalogFs`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl CatalogFs for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // follows symlinks so linked model folders still count as directories
            let kind = match std::fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_dir() => DirEntryKind::Directory,
                Ok(metadata) if metadata.is_file() => DirEntryKind::File,
                _ => DirEntryKind::Other,
            };
            entries.push(DirEntryInfo {
                name: entry.file_name(),
                kind,
            });
        }
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        write_text_atomic(path, content).map_err(|error| io::Error::other(format!("{error:#}")))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let copied = std::fs::copy(from, to)?;
        let source_metadata = std::fs::metadata(from)?;
        let mut times = FileTimes::new();
        if let Ok(modified) = source_metadata.modified() {
            times = times.set_modified(modified);
        }
        if let Ok(accessed) = source_metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        // copied permissions may leave the destination read-only
        let destination = std::fs::OpenOptions::new()
            .write(true)
            .open(to)
            .or_else(|_| std::fs::File::open(to))?;
        destination.set_times(times)?;
        Ok(copied)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
