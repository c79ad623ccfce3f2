//! Error types for the `syl-gen-core` crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to callers of the core library.
///
/// Generation-time degradations (retry exhaustion, unreachable probability
/// thresholds) are never reported through this type: they degrade to
/// best-effort results instead.
#[derive(Debug, Error)]
pub enum NameError {
	/// The bidirectional segmenter could not consume a name within its pass limit.
	#[error(
		"Cannot segment name '{}'. It is likely that a required syllable is missing at '{}'.",
		capitalize(.name),
		.residue
	)]
	Segmentation {
		/// The lowercased name that was being segmented.
		name: String,
		/// What was left unconsumed when segmentation gave up.
		residue: String,
	},

	/// Sampling was requested on a model without usable probability tables.
	#[error("Model must be trained on a non-empty vocabulary before generating sequences")]
	ModelNotTrained,

	/// A corpus file could not be read or has an invalid shape.
	#[error("Error loading name file '{path}': {reason}")]
	CorpusLoad {
		/// The file that failed to load.
		path: PathBuf,
		/// Human readable cause.
		reason: String,
	},

	/// Out-of-range or unknown configuration value.
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	/// I/O error outside corpus loading.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// A specialized `Result` type for name generation operations.
pub type Result<T> = std::result::Result<T, NameError>;

impl NameError {
	/// Creates a corpus loading error for the given path.
	pub fn corpus<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
		Self::CorpusLoad {
			path: path.into(),
			reason: reason.into(),
		}
	}
}

/// Uppercases the first character and lowercases the rest.
pub(crate) fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first
			.to_uppercase()
			.chain(chars.flat_map(char::to_lowercase))
			.collect(),
		None => String::new(),
	}
}
