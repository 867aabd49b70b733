//! File access for the drivers.
//!
//! Drivers never touch the filesystem directly; they read and write whole
//! files through a [`SourceStore`]. [`FileStore`] keeps every file it has
//! seen in memory so a dry run behaves exactly like a real one: later
//! findings read the edits made by earlier ones, and the ledger stays in
//! step with what is on "disk".

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait SourceStore {
    fn read_to_string(&mut self, path: &Path) -> Result<String>;

    /// Replace the whole file.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;

    /// The file as lines, each keeping its terminator.
    fn read_lines(&mut self, path: &Path) -> Result<Vec<String>> {
        Ok(split_lines(&self.read_to_string(path)?))
    }
}

/// Split text into lines the way `readlines` does: terminators stay attached,
/// and a final line without one is kept as-is.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Original and current content of a file touched during a run
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub old_content: String,
    pub new_content: String,
}

impl FileChange {
    pub fn is_modified(&self) -> bool {
        self.old_content != self.new_content
    }
}

/// Disk-backed store with an in-memory overlay.
///
/// With `write_through` every write lands on disk immediately as a plain
/// overwrite. Without it nothing on disk changes.
#[derive(Debug, Default)]
pub struct FileStore {
    write_through: bool,
    files: BTreeMap<PathBuf, FileChange>,
}

impl FileStore {
    pub fn new(write_through: bool) -> Self {
        Self {
            write_through,
            files: BTreeMap::new(),
        }
    }

    /// Files whose content differs from what was first read, in path order.
    pub fn changes(&self) -> impl Iterator<Item = &FileChange> {
        self.files.values().filter(|change| change.is_modified())
    }

    fn entry(&mut self, path: &Path) -> Result<&mut FileChange> {
        if !self.files.contains_key(path) {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            self.files.insert(
                path.to_path_buf(),
                FileChange {
                    path: path.to_path_buf(),
                    old_content: content.clone(),
                    new_content: content,
                },
            );
        }
        self.files
            .get_mut(path)
            .with_context(|| format!("File vanished from overlay: {}", path.display()))
    }
}

impl SourceStore for FileStore {
    fn read_to_string(&mut self, path: &Path) -> Result<String> {
        Ok(self.entry(path)?.new_content.clone())
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        let write_through = self.write_through;
        let entry = self.entry(path)?;
        entry.new_content = content.to_string();
        if write_through {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }
}
