use std::fmt;

/// A phonetic syllable: initial consonant cluster, inner vowel cluster and
/// final consonant cluster.
///
/// All three parts are stored lowercase. The rendered syllable is their
/// concatenation; it is empty only if every part is empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Syllable {
	initial: String,
	inner: String,
	coda: String,
}

impl Syllable {
	/// Creates a syllable, lowercasing every part.
	pub fn new(initial: &str, inner: &str, coda: &str) -> Self {
		Self {
			initial: initial.to_lowercase(),
			inner: inner.to_lowercase(),
			coda: coda.to_lowercase(),
		}
	}

	/// Initial consonant cluster (may be empty).
	pub fn initial(&self) -> &str {
		&self.initial
	}

	/// Inner vowel cluster (may be empty).
	pub fn inner(&self) -> &str {
		&self.inner
	}

	/// Final consonant cluster (may be empty).
	pub fn coda(&self) -> &str {
		&self.coda
	}

	/// Length of the rendered syllable, in bytes.
	pub fn len(&self) -> usize {
		self.initial.len() + self.inner.len() + self.coda.len()
	}

	/// Returns `true` for the degenerate all-empty syllable.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl fmt::Display for Syllable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.initial, self.inner, self.coda)
	}
}
