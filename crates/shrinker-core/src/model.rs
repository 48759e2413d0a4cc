use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A regular file as seen by the walker. Not re-validated before deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            size,
            modified,
        }
    }
}

/// A directory that had no entries when its subtree walk completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub path: PathBuf,
}

impl DirectoryRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub root: PathBuf,
    /// Walk order, unsorted.
    pub files: Vec<FileRecord>,
    /// Post-order: a directory never precedes one of its descendants.
    pub empty_dirs: Vec<DirectoryRecord>,
    pub total_bytes: u64,
}

impl Inventory {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn push_file(&mut self, record: FileRecord) {
        self.total_bytes += record.size;
        self.files.push(record);
    }

    pub fn push_empty_dir(&mut self, record: DirectoryRecord) {
        self.empty_dirs.push(record);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
    Deleted,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub kind: EntryKind,
    pub path: PathBuf,
    /// Bytes the entry held at walk time; always 0 for directories.
    pub bytes: u64,
    pub status: DeletionStatus,
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        self.status == DeletionStatus::Deleted
    }
}
