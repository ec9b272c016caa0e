//! Document loader
//!
//! Reads documents from disk and parses them. A directory of documents (one file per page or
//! project, say) is discovered non-recursively and loaded in slug order, where the slug of a
//! file is its name without the extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::yamlet::config::Settings;
use crate::yamlet::document::Node;
use crate::yamlet::error::ParseError;
use crate::yamlet::parsing::parse;

pub const DEFAULT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `context` holds the source lines around the error, ready to print.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
        context: String,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

/// A parsed document and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub slug: String,
    pub path: PathBuf,
    pub root: Node,
}

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    extensions: Vec<String>,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS)
    }

    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_extensions(settings.check.extensions.iter().cloned())
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Parse text that was read from `path`.
    pub fn parse(&self, path: &Path, text: &str) -> Result<Node, LoadError> {
        parse(text).map_err(|source| {
            tracing::debug!(
                path = %path.display(),
                line = source.line,
                lexical = source.kind.is_lexical(),
                "parse failed"
            );
            LoadError::Parse {
                path: path.to_path_buf(),
                context: source.source_context(text),
                source,
            }
        })
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedDocument, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read document");

        let root = self.parse(path, &text)?;
        Ok(LoadedDocument {
            slug: slug_of(path),
            path: path.to_path_buf(),
            root,
        })
    }

    /// Files in `dir` (not its subdirectories) with a known extension, sorted by slug.
    pub fn discover(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoadError> {
        let dir = dir.as_ref();
        let io_error = |source: io::Error| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && self.accepts(&path) {
                paths.push(path);
            }
        }
        paths.sort_by_key(|path| slug_of(path));

        if paths.is_empty() {
            tracing::warn!(dir = %dir.display(), extensions = ?self.extensions, "no documents found");
        }
        Ok(paths)
    }

    /// Load every discovered document, stopping at the first failure.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<LoadedDocument>, LoadError> {
        let dir = dir.as_ref();
        let documents = self
            .discover(dir)?
            .iter()
            .map(|path| self.load(path))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(dir = %dir.display(), count = documents.len(), "loaded documents");
        Ok(documents)
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// File name without its extension.
pub fn slug_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
