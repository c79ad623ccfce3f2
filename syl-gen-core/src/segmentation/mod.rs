//! Phonetic segmentation of names into syllables.
//!
//! Two grammars are supported:
//! - Fantasy: English-like clusters, bidirectional greedy peeling (`fantasy`)
//! - Japanese: romanized Japanese, forward tokenizer (`japanese`)
//!
//! Both are reached through the closed [`Segmenter`] enum.

use std::fmt;
use std::str::FromStr;

use crate::error::{capitalize, NameError, Result};

/// Longest-first sound inventories per grammar.
pub mod catalog;

/// Bidirectional greedy peeling over a [`catalog::PhoneticCatalog`].
pub mod fantasy;

/// Forward deterministic tokenizer for romanized Japanese.
pub mod japanese;

/// The immutable syllable value.
pub mod syllable;

use catalog::PhoneticCatalog;
use syllable::Syllable;

/// Identifies one of the supported segmentation grammars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SegmenterKind {
	#[default]
	Fantasy,
	Japanese,
}

impl SegmenterKind {
	/// Stable identifying name, part of the cache fingerprint.
	pub fn variant_name(self) -> &'static str {
		match self {
			SegmenterKind::Fantasy => "FantasyNameSegmenter",
			SegmenterKind::Japanese => "JapaneseNameSegmenter",
		}
	}
}

impl fmt::Display for SegmenterKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SegmenterKind::Fantasy => f.write_str("fantasy"),
			SegmenterKind::Japanese => f.write_str("japanese"),
		}
	}
}

impl FromStr for SegmenterKind {
	type Err = NameError;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_lowercase().as_str() {
			"fantasy" => Ok(SegmenterKind::Fantasy),
			"japanese" => Ok(SegmenterKind::Japanese),
			other => Err(NameError::InvalidInput(format!(
				"Unknown segmenter '{other}', expected 'fantasy' or 'japanese'"
			))),
		}
	}
}

/// A segmentation grammar together with its catalog.
///
/// Catalogs are built once when the segmenter is created and are only read
/// afterwards.
#[derive(Clone, Debug)]
pub enum Segmenter {
	Fantasy(PhoneticCatalog),
	Japanese(PhoneticCatalog),
}

impl Segmenter {
	/// Creates the segmenter for `kind` with its built-in catalog.
	pub fn new(kind: SegmenterKind) -> Self {
		match kind {
			SegmenterKind::Fantasy => Segmenter::Fantasy(PhoneticCatalog::fantasy()),
			SegmenterKind::Japanese => Segmenter::Japanese(PhoneticCatalog::japanese()),
		}
	}

	pub fn kind(&self) -> SegmenterKind {
		match self {
			Segmenter::Fantasy(_) => SegmenterKind::Fantasy,
			Segmenter::Japanese(_) => SegmenterKind::Japanese,
		}
	}

	pub fn catalog(&self) -> &PhoneticCatalog {
		match self {
			Segmenter::Fantasy(catalog) | Segmenter::Japanese(catalog) => catalog,
		}
	}

	/// Splits `name` into syllables.
	///
	/// # Errors
	/// Only the fantasy grammar can fail, with [`NameError::Segmentation`].
	pub fn segment(&self, name: &str) -> Result<Vec<Syllable>> {
		match self {
			Segmenter::Fantasy(catalog) => fantasy::segment(catalog, name),
			Segmenter::Japanese(catalog) => Ok(japanese::segment(catalog, name)),
		}
	}
}

/// A name paired with the syllables produced by one grammar.
///
/// For the fantasy grammar the rendered syllables concatenate back to the
/// lowercased name. Never mutated: re-segmenting produces a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentedName {
	name: String,
	syllables: Vec<Syllable>,
}

impl SegmentedName {
	/// Segments `name` with `segmenter`.
	pub fn new(name: &str, segmenter: &Segmenter) -> Result<Self> {
		Ok(Self {
			name: name.to_owned(),
			syllables: segmenter.segment(name)?,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn syllables(&self) -> &[Syllable] {
		&self.syllables
	}

	/// Rendered syllables, in order.
	pub fn syllable_strings(&self) -> Vec<String> {
		self.syllables.iter().map(ToString::to_string).collect()
	}

	/// Syllables joined by `/`, capitalized (`"Tho/rin"`).
	pub fn raw_name(&self) -> String {
		capitalize(&self.syllable_strings().join("/"))
	}
}

impl fmt::Display for SegmentedName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}
