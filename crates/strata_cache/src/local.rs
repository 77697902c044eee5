//! File-backed cache addressing identifiers by content digest.
//!
//! One file per identifier at `<dir>/<sha256(id)>`; file content is a
//! sequence of newline-terminated opaque serialized records, one per
//! [`Cache::add`] call, each independently decodable. No header, no footer,
//! no index.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use strata_row::Rows;
use strata_serializer::{CompressingSerializer, JsonSerializer, Serializer};
use tracing::{debug, trace};

use crate::cache::{Cache, RowsStream};
use crate::digest::ContentDigest;
use crate::error::CacheError;

/// Environment variable naming the cache directory when no explicit
/// directory is given.
pub const CACHE_DIR_ENV: &str = "FLOW_LOCAL_FILESYSTEM_CACHE_DIR";

/// A single-node, file-backed [`Cache`].
///
/// Appends are the only write path: records are added in append mode and
/// existing content is never rewritten, so sequential writers within one
/// process are safe. Multi-process writers to the same identifier are not
/// coordinated; that is an accepted limitation. Reads are lazy line streams
/// that tolerate a torn trailing record from a crashed writer.
pub struct LocalFilesystemCache {
    dir: PathBuf,
    serializer: Box<dyn Serializer>,
}

impl LocalFilesystemCache {
    /// Creates a cache rooted at an explicit directory, using the default
    /// compressing JSON serializer.
    ///
    /// Fails with [`CacheError::InvalidCacheDir`] when the path does not
    /// exist or is not a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Self::with_serializer(dir, Box::new(CompressingSerializer::new(JsonSerializer)))
    }

    /// Creates a cache rooted at an explicit directory with a caller-chosen
    /// serializer.
    pub fn with_serializer(
        dir: impl Into<PathBuf>,
        serializer: Box<dyn Serializer>,
    ) -> Result<Self, CacheError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CacheError::InvalidCacheDir { path: dir });
        }
        Ok(Self { dir, serializer })
    }

    /// Creates a cache using the directory named by the
    /// [`CACHE_DIR_ENV`] environment variable, falling back to the platform
    /// temporary directory.
    pub fn from_env() -> Result<Self, CacheError> {
        let dir = std::env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::new(dir)
    }

    /// Returns the directory this cache stores its files in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing the given identifier.
    ///
    /// Deterministic and collision-resistant: the same identifier always maps
    /// to the same file, and the identifier is not recoverable from it.
    pub fn cache_path(&self, id: &str) -> PathBuf {
        self.dir
            .join(ContentDigest::from_bytes(id.as_bytes()).to_string())
    }
}

impl Cache for LocalFilesystemCache {
    fn add(&self, id: &str, rows: Rows) -> Result<(), CacheError> {
        let record = self
            .serializer
            .serialize(&rows)
            .map_err(|source| CacheError::Serialize {
                id: id.to_string(),
                source,
            })?;

        let path = self.cache_path(id);
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| CacheError::Io {
                path: path.clone(),
                source,
            })?;

        file.write_all(&record)
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|source| CacheError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(id, path = %path.display(), bytes = record.len(), "appended batch to cache");
        Ok(())
    }

    fn read(&self, id: &str) -> RowsStream<'_> {
        let path = self.cache_path(id);
        trace!(id, path = %path.display(), "opening cache stream");

        match File::open(&path) {
            Ok(file) => Box::new(RecordStream::new(
                BufReader::new(file),
                self.serializer.as_ref(),
                path,
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Box::new(std::iter::empty()),
            Err(source) => Box::new(std::iter::once(Err(CacheError::Io { path, source }))),
        }
    }

    fn clear(&self, id: &str) -> Result<(), CacheError> {
        let path = self.cache_path(id);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(id, path = %path.display(), "cleared cache file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }
}

/// Lazy line-by-line decoder over one cache file.
///
/// Keeps one line of lookahead so a record that fails to decode can be
/// classified: a corrupt final line is a torn write and ends the stream, a
/// corrupt interior line is a hard error. Each line is read, decoded,
/// yielded, and discarded before the next is touched; the file handle is
/// released when the stream is dropped.
struct RecordStream<'a> {
    reader: BufReader<File>,
    serializer: &'a dyn Serializer,
    path: PathBuf,
    lookahead: Option<String>,
    primed: bool,
    index: usize,
    done: bool,
}

impl<'a> RecordStream<'a> {
    fn new(reader: BufReader<File>, serializer: &'a dyn Serializer, path: PathBuf) -> Self {
        Self {
            reader,
            serializer,
            path,
            lookahead: None,
            primed: false,
            index: 0,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, CacheError> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(source) => Err(CacheError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Iterator for RecordStream<'_> {
    type Item = Result<Rows, CacheError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = if self.primed {
            self.lookahead.take()
        } else {
            self.primed = true;
            match self.read_line() {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        };
        let Some(line) = current else {
            self.done = true;
            return None;
        };

        self.lookahead = match self.read_line() {
            Ok(line) => line,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let index = self.index;
        self.index += 1;

        match self.serializer.deserialize(line.trim_end().as_bytes()) {
            Ok(rows) => Some(Ok(rows)),
            Err(source) => {
                self.done = true;
                if self.lookahead.is_none() {
                    // Final record failed to decode: consistent with a crash
                    // mid-append, so the stream ends here.
                    debug!(path = %self.path.display(), "discarding torn trailing record");
                    None
                } else {
                    Some(Err(CacheError::CorruptRecord {
                        index,
                        path: self.path.clone(),
                        source,
                    }))
                }
            }
        }
    }
}
