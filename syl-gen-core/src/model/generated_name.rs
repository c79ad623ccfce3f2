use std::fmt;

/// A generated name with its provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedName {
	/// Cleaned, capitalized name.
	pub name: String,
	/// Corpus names whose syllables were spliced (empty for Bayesian samples).
	pub source_names: Vec<String>,
	/// Length-normalized probability, when a Bayesian model scored the name.
	pub probability: Option<f64>,
	/// Set when the name exceeds the requested length after all retries.
	pub best_effort: bool,
}

impl GeneratedName {
	pub fn new(name: String, source_names: Vec<String>) -> Self {
		Self {
			name,
			source_names,
			probability: None,
			best_effort: false,
		}
	}

	pub fn with_probability(mut self, probability: Option<f64>) -> Self {
		self.probability = probability;
		self
	}

	/// Length in characters.
	pub fn char_len(&self) -> usize {
		self.name.chars().count()
	}

	pub(crate) fn fits(&self, max_length: usize) -> bool {
		self.char_len() <= max_length
	}
}

impl fmt::Display for GeneratedName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}
