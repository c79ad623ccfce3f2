use std::fmt;
use std::str::FromStr;

use crate::error::{NameError, Result};

/// Strategy used to assemble a name.
///
/// # Variants
/// - `Minimal`: first syllable of one corpus name + last syllable of another.
/// - `Variable`: like `Minimal`, with zero to three random syllables in between.
/// - `Bayesian`: sequence sampled from the trained bigram model, kept if its
///   probability reaches the requested threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
	Minimal,
	#[default]
	Variable,
	Bayesian,
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Algorithm::Minimal => f.write_str("minimal"),
			Algorithm::Variable => f.write_str("variable"),
			Algorithm::Bayesian => f.write_str("bayesian"),
		}
	}
}

impl FromStr for Algorithm {
	type Err = NameError;

	/// Accepts the current names and the legacy `very_simple` / `simple`.
	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_lowercase().as_str() {
			"minimal" | "very_simple" => Ok(Algorithm::Minimal),
			"variable" | "simple" => Ok(Algorithm::Variable),
			"bayesian" => Ok(Algorithm::Bayesian),
			other => Err(NameError::InvalidInput(format!(
				"Unknown algorithm '{other}', expected 'minimal', 'variable' or 'bayesian'"
			))),
		}
	}
}

/// Default number of names per call.
pub const DEFAULT_COUNT: usize = 5;

/// Default maximum name length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 12;

/// Default raw probability a Bayesian sample must reach.
pub const DEFAULT_MIN_PROBABILITY: f64 = 1.0e-8;

/// Parameters of a [`Generator::generate`](super::generator::Generator::generate) call.
///
/// # Invariants
/// - `min_probability` is within `[0, 1]`
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Number of names to produce.
	pub count: usize,

	/// Maximum length in characters (values below 2 are raised to 2).
	pub max_length: usize,

	pub algorithm: Algorithm,

	/// Threshold on the raw joint probability (Bayesian only).
	min_probability: f64,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			count: DEFAULT_COUNT,
			max_length: DEFAULT_MAX_LENGTH,
			algorithm: Algorithm::default(),
			min_probability: DEFAULT_MIN_PROBABILITY,
		}
	}
}

impl GenerationInput {
	pub fn new(count: usize, max_length: usize, algorithm: Algorithm) -> Self {
		Self {
			count,
			max_length,
			algorithm,
			..Self::default()
		}
	}

	pub fn min_probability(&self) -> f64 {
		self.min_probability
	}

	/// Sets the Bayesian acceptance threshold (0.0..=1.0).
	///
	/// # Errors
	/// Returns [`NameError::InvalidInput`] if the value is outside the valid range.
	pub fn set_min_probability(&mut self, min_probability: f64) -> Result<()> {
		if !(0.0..=1.0).contains(&min_probability) {
			return Err(NameError::InvalidInput(format!(
				"Minimum probability must be between 0.0 and 1.0, got {min_probability}"
			)));
		}
		self.min_probability = min_probability;
		Ok(())
	}
}
