//! Name corpora: loading, normalization and segmentation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use xxhash_rust::xxh3::Xxh3;

use crate::error::{capitalize, NameError, Result};
use crate::io::{get_filename, list_files, read_file};
use crate::segmentation::{SegmentedName, Segmenter, SegmenterKind};

/// Extensions of built-in name lists.
const NAME_LIST_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Optional description block of a YAML name list.
#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CorpusMetadata {
	pub name: Option<String>,
	pub description: Option<String>,
	/// Declared segmenter (`fantasy` or `japanese`).
	pub segmenter: Option<String>,
}

/// On-disk shape of a YAML name list.
#[derive(Deserialize)]
struct CorpusFile {
	#[serde(default)]
	metadata: Option<CorpusMetadata>,
	#[serde(default)]
	names: Vec<serde_yaml::Value>,
}

/// A list of real names, each segmented with the same grammar.
///
/// # Invariants
/// - Names are trimmed, capitalized and sorted alphabetically
/// - Every name was segmented by `segmenter`
#[derive(Clone, Debug)]
pub struct Corpus {
	source: String,
	metadata: CorpusMetadata,
	segmenter: Segmenter,
	names: Vec<SegmentedName>,
}

impl Corpus {
	/// Builds a corpus from plain name strings.
	///
	/// Blank entries are skipped. Each name is normalized (trimmed,
	/// lowercased, first letter uppercased) before segmentation.
	///
	/// # Errors
	/// Fails fast with [`NameError::Segmentation`] on the first name the
	/// grammar cannot cover.
	pub fn from_names<I, S>(names: I, kind: SegmenterKind) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::build("inline".to_owned(), CorpusMetadata::default(), names, kind)
	}

	fn build<I, S>(source: String, metadata: CorpusMetadata, names: I, kind: SegmenterKind) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let segmenter = Segmenter::new(kind);
		let mut segmented = names
			.into_iter()
			.map(|name| name.as_ref().trim().to_owned())
			.filter(|name| !name.is_empty())
			.map(|name| SegmentedName::new(&capitalize(&name), &segmenter))
			.collect::<Result<Vec<_>>>()?;
		segmented.sort_by(|a, b| a.name().cmp(b.name()));

		debug!("Loaded {} names from '{}' ({})", segmented.len(), source, kind);
		Ok(Self {
			source,
			metadata,
			segmenter,
			names: segmented,
		})
	}

	/// Loads a name list from disk.
	///
	/// - `.txt` files hold one name per line
	/// - Anything else is parsed as YAML: `{metadata: {...}, names: [...]}`
	///
	/// The segmenter is `segmenter` if given, else the one declared in the
	/// metadata, else fantasy.
	///
	/// # Errors
	/// Returns [`NameError::CorpusLoad`] if the file is missing, unreadable
	/// or malformed, and [`NameError::Segmentation`] for names the grammar
	/// cannot cover.
	pub fn load<P: AsRef<Path>>(path: P, segmenter: Option<SegmenterKind>) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			return Err(NameError::corpus(path, "file does not exist"));
		}
		let source = get_filename(path).map_err(|e| NameError::corpus(path, e.to_string()))?;

		if path.extension().is_some_and(|ext| ext == "txt") {
			let lines = read_file(path).map_err(|e| NameError::corpus(path, e.to_string()))?;
			let kind = segmenter.unwrap_or_default();
			return Self::build(source, CorpusMetadata::default(), lines, kind);
		}

		let contents = std::fs::read_to_string(path).map_err(|e| NameError::corpus(path, e.to_string()))?;
		let file: CorpusFile = serde_yaml::from_str(&contents).map_err(|e| NameError::corpus(path, e.to_string()))?;
		let metadata = file.metadata.unwrap_or_default();

		let kind = match segmenter {
			Some(kind) => kind,
			None => match metadata.segmenter.as_deref() {
				None => SegmenterKind::default(),
				Some(declared) => declared.parse().unwrap_or_else(|_| {
					warn!("Unknown segmenter '{}' in '{}', using fantasy", declared, path.display());
					SegmenterKind::default()
				}),
			},
		};

		// Non-string entries are ignored
		let names = file.names.iter().filter_map(|value| value.as_str()).collect::<Vec<_>>();
		Self::build(source, metadata, names, kind)
	}

	/// Identifier of the corpus (file stem, or `inline`).
	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn metadata(&self) -> &CorpusMetadata {
		&self.metadata
	}

	pub fn segmenter(&self) -> &Segmenter {
		&self.segmenter
	}

	pub fn kind(&self) -> SegmenterKind {
		self.segmenter.kind()
	}

	pub fn names(&self) -> &[SegmentedName] {
		&self.names
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Rendered syllables of every name, in corpus order.
	pub fn syllable_sequences(&self) -> Vec<Vec<String>> {
		self.names.iter().map(SegmentedName::syllable_strings).collect()
	}

	/// Distinct rendered syllables, sorted.
	pub fn unique_syllables(&self) -> Vec<String> {
		self.names
			.iter()
			.flat_map(SegmentedName::syllable_strings)
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	/// Content signature of the corpus.
	///
	/// Changes whenever any name is added, removed or altered.
	pub fn signature(&self) -> String {
		let mut hasher = Xxh3::new();
		for name in &self.names {
			hasher.update(name.name().as_bytes());
			hasher.update(b"\n");
		}
		format!("{:016x}", hasher.digest())
	}

	/// Case-insensitive membership test.
	pub fn contains(&self, name: &str) -> bool {
		let needle = name.to_lowercase();
		self.names.iter().any(|n| n.name().to_lowercase() == needle)
	}
}

/// Resolves a name list identifier to a file.
///
/// An existing path wins. Identifiers containing a path separator are never
/// looked up in `data_dir`; other identifiers are tried as
/// `<data_dir>/<id>.yaml` then `<data_dir>/<id>.yml`.
pub fn resolve_name_list<P: AsRef<Path>>(identifier: &str, data_dir: P) -> Option<PathBuf> {
	let direct = PathBuf::from(identifier);
	if direct.exists() {
		return Some(direct);
	}
	if identifier.contains(['/', '\\']) {
		return None;
	}

	NAME_LIST_EXTENSIONS
		.iter()
		.map(|ext| data_dir.as_ref().join(format!("{identifier}.{ext}")))
		.find(|candidate| candidate.exists())
}

/// Identifiers of the name lists available in `data_dir`, sorted.
///
/// A missing or unreadable directory yields an empty list.
pub fn available_name_lists<P: AsRef<Path>>(data_dir: P) -> Vec<String> {
	let files = list_files(data_dir, &NAME_LIST_EXTENSIONS).unwrap_or_default();
	let mut identifiers: Vec<String> = files.iter().filter_map(|file| get_filename(file).ok()).collect();
	identifiers.sort();
	identifiers.dedup();
	identifiers
}
