use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::corpus::Corpus;

/// Version tag mixed into every fingerprint.
///
/// Bump it whenever the layout or meaning of cached tables changes, so stale
/// entries are simply never looked up again.
pub const MODEL_VERSION: &str = "v1.0";

/// Cache key of a trained model.
///
/// Lowercase hex of xxh3-64 over `"<corpus signature>_<segmenter variant>_<version>"`.
/// Distinct corpora or segmenters never share a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
	pub fn new(corpus_signature: &str, variant_name: &str, version: &str) -> Self {
		let digest = xxh3_64(format!("{corpus_signature}_{variant_name}_{version}").as_bytes());
		Self(format!("{digest:016x}"))
	}

	/// Fingerprint of `corpus` segmented with its own segmenter.
	pub fn for_corpus(corpus: &Corpus) -> Self {
		Self::new(&corpus.signature(), corpus.kind().variant_name(), MODEL_VERSION)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
