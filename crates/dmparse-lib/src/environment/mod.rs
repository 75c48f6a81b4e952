//! Multi-file projects.
//!
//! An environment starts at a `.dme` file and follows `#include`s depth first,
//! in order. The preprocessor context threads through the walk: every file is
//! seeded with the context left by the file processed just before it, so
//! defines and open conditionals flow across file boundaries.

mod provider;


use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};

pub use provider::{CachedFileProvider, FileProvider, FsFileProvider};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::preprocessor::{IncludePath, PreprocessorContext};
use crate::source_file::{Options, SourceFile};
use crate::{Error, Result};

/// A file of the project with the context it was parsed from.
#[derive(Debug, Clone)]
pub struct EnvironmentFile {
    path: PathBuf,
    incoming: PreprocessorContext,
    file: SourceFile,
    diagnostics: Diagnostics,
}

impl EnvironmentFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Context this file was seeded with.
    pub fn incoming(&self) -> &PreprocessorContext {
        &self.incoming
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    /// Pipeline issues followed by include resolution issues.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[derive(Debug)]
pub struct Environment<P = FsFileProvider> {
    provider: P,
    options: Options,
    root: Option<PathBuf>,
    files: Vec<EnvironmentFile>,
    final_context: PreprocessorContext,
}

impl<P: FileProvider> Environment<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: Options::default(),
            root: None,
            files: Vec::new(),
            final_context: PreprocessorContext::new(),
        }
    }

    pub fn with_tab_width(mut self, tab_width: u32) -> Self {
        self.options.tab_width = tab_width;
        self
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.options.exec_fuel = limit;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Parses the project rooted at `path` from scratch.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let root = normalize(path);
        tracing::debug!(root = %root.display(), "loading environment");
        self.root = Some(root.clone());
        self.files.clear();
        self.walk(&root, HashMap::new())
    }

    /// Re-reads the project after `path` changed.
    ///
    /// Every file is re-read; a file whose text and incoming context are both
    /// unchanged keeps its previous parse. Anything downstream of a context
    /// change is parsed again.
    pub fn reparse(&mut self, path: &Path) -> Result<()> {
        let Some(root) = self.root.clone() else {
            return self.load(path);
        };
        let changed = normalize(path);
        tracing::debug!(path = %changed.display(), "reparsing environment");

        let previous = self
            .files
            .drain(..)
            .filter(|f| f.path != changed)
            .map(|f| (f.path.clone(), f))
            .collect();
        self.walk(&root, previous)
    }

    /// Files in visiting order, root first.
    pub fn files(&self) -> &[EnvironmentFile] {
        &self.files
    }

    pub fn file(&self, path: &Path) -> Option<&EnvironmentFile> {
        let path = normalize(path);
        self.files.iter().find(|f| f.path == path)
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.diagnostics.has_errors())
    }

    pub fn has_warnings(&self) -> bool {
        self.files.iter().any(|f| f.diagnostics.has_warnings())
    }

    /// Context after the last file of the walk.
    pub fn final_context(&self) -> &PreprocessorContext {
        &self.final_context
    }

    fn walk(&mut self, root: &Path, previous: HashMap<PathBuf, EnvironmentFile>) -> Result<()> {
        let text = self.provider.read(root).map_err(|source| Error::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let mut walk = Walk {
            previous,
            visited: HashSet::from([root.to_path_buf()]),
        };
        self.final_context = self.visit(&mut walk, root, text, PreprocessorContext::new())?;
        Ok(())
    }

    /// Parses one file, then its own includes. Returns the context after the
    /// last of them.
    fn visit(
        &mut self,
        walk: &mut Walk,
        path: &Path,
        text: String,
        incoming: PreprocessorContext,
    ) -> Result<PreprocessorContext> {
        let file = match walk.previous.remove(path) {
            Some(old) if old.file.source() == text && old.incoming == incoming => {
                tracing::debug!(path = %path.display(), "unchanged, reusing");
                old.file
            }
            _ => {
                tracing::debug!(path = %path.display(), "parsing");
                SourceFile::parse(&text, Some(&incoming), &self.options)?
            }
        };

        let includes: Vec<IncludePath> = file.context().includes[incoming.includes.len()..].to_vec();
        let mut context = file.context().clone();
        let index = self.files.len();
        self.files.push(EnvironmentFile {
            path: path.to_path_buf(),
            diagnostics: file.diagnostics().clone(),
            incoming,
            file,
        });

        let directory = path.parent().unwrap_or(Path::new(""));
        for include in includes.iter().filter(|i| !i.is_library()) {
            let target = resolve(directory, include);

            if !walk.visited.insert(target.clone()) {
                self.report(index, DiagnosticKind::IncludeCycle, include);
                continue;
            }

            let text = match self.provider.read(&target) {
                Ok(text) => text,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(path = %target.display(), "include not found");
                    self.report(index, DiagnosticKind::FileNotFound, include);
                    continue;
                }
                Err(source) => {
                    return Err(Error::Io {
                        path: target,
                        source,
                    });
                }
            };
            context = self.visit(walk, &target, text, context)?;
        }

        Ok(context)
    }

    fn report(&mut self, index: usize, kind: DiagnosticKind, include: &IncludePath) {
        self.files[index]
            .diagnostics
            .report_range(kind, include.range, include.position)
            .argument(include.unquoted())
            .emit();
    }
}

struct Walk {
    previous: HashMap<PathBuf, EnvironmentFile>,
    visited: HashSet<PathBuf>,
}

/// Path of `include` relative to the including file's directory.
fn resolve(directory: &Path, include: &IncludePath) -> PathBuf {
    let relative = include.unquoted().replace('\\', "/");
    normalize(&directory.join(relative))
}

/// Folds `.` and `..` lexically; the file system is not consulted.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
