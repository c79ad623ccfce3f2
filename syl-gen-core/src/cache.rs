//! Key/blob stores used to persist trained probability tables.
//!
//! The model treats every store as best-effort: a [`CacheError`] is logged
//! and handled as a miss (on read) or a no-op (on write).

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::io::build_entry_path;

/// Extension of cache entries written by [`FileCache`].
const ENTRY_EXTENSION: &str = "bin";

/// Failure inside a cache store.
#[derive(Debug, Error)]
pub enum CacheError {
	#[error("cache I/O error for {path}: {source}")]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("failed to encode cache entry: {0}")]
	Encode(String),

	#[error("failed to decode cache entry '{key}': {reason}")]
	Decode {
		key: String,
		reason: String,
	},

	#[error("in-memory cache lock poisoned")]
	Poisoned,
}

impl CacheError {
	fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// A key/blob store.
pub trait CacheStore {
	/// Returns the blob stored under `key`, or `None` on a miss.
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

	/// Stores `blob` under `key`, replacing any previous entry.
	fn set(&self, key: &str, blob: &[u8]) -> Result<(), CacheError>;

	fn exists(&self, key: &str) -> bool;

	/// Removes the entry under `key`; missing entries are not an error.
	fn clear(&self, key: &str) -> Result<(), CacheError>;
}

/// Stores one file per key in a directory.
///
/// Writes go through a temporary file that is atomically persisted, so a
/// crashed write never leaves a truncated entry behind.
#[derive(Clone, Debug)]
pub struct FileCache {
	dir: PathBuf,
}

impl FileCache {
	/// Default cache directory, relative to the working directory.
	pub const DEFAULT_DIR: &'static str = ".rng_cache";

	/// Creates a cache rooted at `dir`. The directory is created on first write.
	pub fn new<P: AsRef<Path>>(dir: P) -> Self {
		Self {
			dir: dir.as_ref().to_path_buf(),
		}
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn entry_path(&self, key: &str) -> PathBuf {
		build_entry_path(&self.dir, key, ENTRY_EXTENSION)
	}
}

impl CacheStore for FileCache {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
		let path = self.entry_path(key);
		if !path.exists() {
			return Ok(None);
		}
		fs::read(&path).map(Some).map_err(|e| CacheError::io(path, e))
	}

	fn set(&self, key: &str, blob: &[u8]) -> Result<(), CacheError> {
		fs::create_dir_all(&self.dir).map_err(|e| CacheError::io(&self.dir, e))?;

		let path = self.entry_path(key);
		let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(|e| CacheError::io(&self.dir, e))?;
		temp_file.write_all(blob).map_err(|e| CacheError::io(temp_file.path(), e))?;
		temp_file.persist(&path).map_err(|e| CacheError::io(&path, e.error))?;
		Ok(())
	}

	fn exists(&self, key: &str) -> bool {
		self.entry_path(key).exists()
	}

	fn clear(&self, key: &str) -> Result<(), CacheError> {
		let path = self.entry_path(key);
		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(CacheError::io(path, e)),
		}
	}
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCache {
	entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored entries.
	pub fn len(&self) -> usize {
		self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl CacheStore for MemoryCache {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
		let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
		Ok(entries.get(key).cloned())
	}

	fn set(&self, key: &str, blob: &[u8]) -> Result<(), CacheError> {
		let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
		entries.insert(key.to_owned(), blob.to_vec());
		Ok(())
	}

	fn exists(&self, key: &str) -> bool {
		self.entries.lock().is_ok_and(|entries| entries.contains_key(key))
	}

	fn clear(&self, key: &str) -> Result<(), CacheError> {
		let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
		entries.remove(key);
		Ok(())
	}
}

/// A store that never holds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl CacheStore for NoCache {
	fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
		Ok(None)
	}

	fn set(&self, _key: &str, _blob: &[u8]) -> Result<(), CacheError> {
		Ok(())
	}

	fn exists(&self, _key: &str) -> bool {
		false
	}

	fn clear(&self, _key: &str) -> Result<(), CacheError> {
		Ok(())
	}
}
