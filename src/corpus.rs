use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::slice;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::encoding::TextEncoding;
use crate::error::{PipelineError, Result};

/// The files that make up one run's input, in directory listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    paths: Vec<PathBuf>,
}

impl Corpus {
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Starts a fresh pass over the corpus. Every call re-reads and
    /// re-decodes the files; nothing is cached between passes.
    pub fn documents(&self, encoding: TextEncoding) -> Documents<'_> {
        Documents {
            paths: self.paths.iter(),
            encoding,
        }
    }
}

pub struct Documents<'a> {
    paths: slice::Iter<'a, PathBuf>,
    encoding: TextEncoding,
}

impl Iterator for Documents<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(read_document(path, self.encoding))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

pub fn read_document(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), %encoding, "decoding document");
    encoding.decode(&bytes, path)
}

/// Lists the regular files directly inside `dir`. Subdirectories and
/// symlinks to directories are skipped; symlinks to files are kept.
pub fn resolve_corpus(dir: &Path) -> Result<Corpus> {
    fs::read_dir(dir).map_err(|source| PipelineError::DirectoryNotFound {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"));
                return Err(PipelineError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!("skipping unreadable corpus entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        paths.push(entry.into_path());
    }

    Ok(Corpus { paths })
}
