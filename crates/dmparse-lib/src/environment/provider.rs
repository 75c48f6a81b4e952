//! File access for the environment.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Source of file contents. Implementations decide how (and whether) to cache.
pub trait FileProvider {
    fn read(&mut self, path: &Path) -> io::Result<String>;

    fn write(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// Reads straight from disk on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileProvider;

impl FileProvider for FsFileProvider {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }
}

#[derive(Debug, Clone)]
struct CachedFile {
    modified: Option<SystemTime>,
    text: String,
}

/// Keeps file contents in memory, revalidated by modification time.
#[derive(Debug, Clone, Default)]
pub struct CachedFileProvider {
    files: HashMap<PathBuf, CachedFile>,
}

impl CachedFileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached copy; the next read goes to disk.
    pub fn invalidate(&mut self, path: &Path) {
        self.files.remove(path);
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl FileProvider for CachedFileProvider {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        let current = modified(path);
        if let Some(cached) = self
            .files
            .get(path)
            .filter(|c| c.modified.is_some() && c.modified == current)
        {
            tracing::trace!(path = %path.display(), "cache hit");
            return Ok(cached.text.clone());
        }

        let text = fs::read_to_string(path)?;
        self.files.insert(
            path.to_path_buf(),
            CachedFile {
                modified: current,
                text: text.clone(),
            },
        );
        Ok(text)
    }

    fn write(&mut self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)?;
        self.files.insert(
            path.to_path_buf(),
            CachedFile {
                modified: modified(path),
                text: text.to_owned(),
            },
        );
        Ok(())
    }
}
