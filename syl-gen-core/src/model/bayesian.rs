use log::{debug, info, warn};
use rand::Rng;

use super::fingerprint::Fingerprint;
use super::tables::ProbabilityTables;
use super::transitions::weighted_choice;
use crate::cache::{CacheError, CacheStore};
use crate::error::{NameError, Result};

/// Number of transitions reported by [`BayesianModel::syllable_info`].
const TOP_TRANSITIONS: usize = 5;

/// Where the probability tables of a model come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableOrigin {
	/// Counted and smoothed from the corpus.
	Computed,
	/// Decoded from a cache entry.
	Cached,
}

/// Probabilities attached to one syllable.
#[derive(Clone, Debug, PartialEq)]
pub struct SyllableInfo {
	pub syllable: String,
	pub start_probability: f64,
	pub end_probability: f64,
	/// Most likely successors, by descending probability.
	pub top_transitions: Vec<(String, f64)>,
}

/// A trained bigram model over syllables.
///
/// A value of this type only exists once training happened (from the cache
/// or from counts), so sampling and scoring never see a half-built model.
///
/// # Invariants
/// - `tables` were built for the corpus identified by `fingerprint`
#[derive(Clone, Debug)]
pub struct BayesianModel {
	tables: ProbabilityTables,
	fingerprint: Fingerprint,
	origin: TableOrigin,
}

impl BayesianModel {
	/// Loads tables cached under `fingerprint`, otherwise computes them from
	/// `sequences` and stores them.
	///
	/// # Parameters
	/// - `sequences`: rendered syllables of every corpus name
	/// - `fingerprint`: cache key of this corpus/segmenter pair
	/// - `cache`: best-effort store
	///
	/// # Notes
	/// - Cache failures never abort training: a failing or corrupt read is a
	///   miss, a failing write is skipped. Both are logged at `warn`.
	pub fn train<S, C>(sequences: &[S], fingerprint: Fingerprint, cache: &C) -> Self
	where
		S: AsRef<[String]>,
		C: CacheStore + ?Sized,
	{
		if let Some(tables) = Self::load_cached(&fingerprint, cache) {
			info!("Loaded Bayesian probabilities from cache ({} syllables)", tables.vocabulary().len());
			return Self {
				tables,
				fingerprint,
				origin: TableOrigin::Cached,
			};
		}

		let tables = ProbabilityTables::from_sequences(sequences);
		Self::store(&fingerprint, &tables, cache);
		info!("Computed probabilities for {} syllables", tables.vocabulary().len());

		Self {
			tables,
			fingerprint,
			origin: TableOrigin::Computed,
		}
	}

	fn load_cached<C: CacheStore + ?Sized>(fingerprint: &Fingerprint, cache: &C) -> Option<ProbabilityTables> {
		let bytes = match cache.get(fingerprint.as_str()) {
			Ok(Some(bytes)) => bytes,
			Ok(None) => return None,
			Err(e) => {
				warn!("{e}");
				return None;
			}
		};

		match postcard::from_bytes::<ProbabilityTables>(&bytes) {
			Ok(tables) => Some(tables),
			Err(e) => {
				let error = CacheError::Decode {
					key: fingerprint.to_string(),
					reason: e.to_string(),
				};
				warn!("{error}, recomputing");
				None
			}
		}
	}

	fn store<C: CacheStore + ?Sized>(fingerprint: &Fingerprint, tables: &ProbabilityTables, cache: &C) {
		let bytes = match postcard::to_stdvec(tables) {
			Ok(bytes) => bytes,
			Err(e) => {
				warn!("{}", CacheError::Encode(e.to_string()));
				return;
			}
		};
		if let Err(e) = cache.set(fingerprint.as_str(), &bytes) {
			warn!("{e}");
		}
	}

	pub fn tables(&self) -> &ProbabilityTables {
		&self.tables
	}

	pub fn fingerprint(&self) -> &Fingerprint {
		&self.fingerprint
	}

	pub fn origin(&self) -> TableOrigin {
		self.origin
	}

	/// Samples a syllable sequence of at most `max_syllables` syllables.
	///
	/// # Behavior
	/// - The first syllable is drawn from the start distribution
	/// - Each next syllable is drawn from the current row (uniform over the
	///   vocabulary if the row is missing)
	/// - After each appended syllable, stops if a uniform draw in `[0, 1)`
	///   falls below its end probability
	///
	/// At least two syllables are produced whenever `max_syllables >= 2`.
	///
	/// # Errors
	/// [`NameError::ModelNotTrained`] if the vocabulary is empty.
	pub fn sample<R: Rng + ?Sized>(&self, max_syllables: usize, rng: &mut R) -> Result<Vec<String>> {
		let first = weighted_choice(self.tables.start_distribution(), rng).ok_or(NameError::ModelNotTrained)?;
		let mut sequence = vec![first.to_owned()];

		while sequence.len() < max_syllables {
			let current = sequence.last().map(String::as_str).unwrap_or(first);
			let next = match self.tables.row(current) {
				Some(row) => weighted_choice(row.iter().map(|(s, p)| (s.as_str(), *p)), rng),
				None => {
					debug!("No transitions from '{current}', drawing uniformly");
					let uniform = 1.0 / self.tables.vocabulary().len() as f64;
					weighted_choice(self.tables.vocabulary().iter().map(|s| (s.as_str(), uniform)), rng)
				}
			};
			let Some(next) = next else {
				return Err(NameError::ModelNotTrained);
			};

			sequence.push(next.to_owned());
			if rng.random::<f64>() < self.tables.end_probability(next) {
				break;
			}
		}

		Ok(sequence)
	}

	/// Raw joint probability of a sequence:
	/// `start(s0) × Π transition(s_i, s_i+1) × end(s_last)`.
	///
	/// Returns 0 for an empty sequence or unknown syllables.
	pub fn probability<S: AsRef<str>>(&self, sequence: &[S]) -> f64 {
		let (Some(first), Some(last)) = (sequence.first(), sequence.last()) else {
			return 0.0;
		};

		let transitions: f64 = sequence
			.windows(2)
			.map(|pair| self.tables.transition_probability(pair[0].as_ref(), pair[1].as_ref()))
			.product();

		self.tables.start_probability(first.as_ref()) * transitions * self.tables.end_probability(last.as_ref())
	}

	/// Length-normalized score: `probability^(1 / (n + 1))`.
	///
	/// The geometric mean over the `n + 1` factors of the joint probability,
	/// comparable across sequence lengths.
	pub fn normalized_probability<S: AsRef<str>>(&self, sequence: &[S]) -> f64 {
		let raw = self.probability(sequence);
		if sequence.is_empty() || raw <= 0.0 {
			return 0.0;
		}
		raw.powf(1.0 / (sequence.len() as f64 + 1.0))
	}

	/// Start/end probabilities and most likely successors of `syllable`.
	///
	/// Returns `None` for a syllable outside the vocabulary.
	pub fn syllable_info(&self, syllable: &str) -> Option<SyllableInfo> {
		let syllable = syllable.to_lowercase();
		let row = self.tables.row(&syllable)?;

		let mut top_transitions: Vec<(String, f64)> = row.iter().map(|(next, p)| (next.clone(), *p)).collect();
		// Stable: ties keep vocabulary order
		top_transitions.sort_by(|a, b| b.1.total_cmp(&a.1));
		top_transitions.truncate(TOP_TRANSITIONS);

		Some(SyllableInfo {
			start_probability: self.tables.start_probability(&syllable),
			end_probability: self.tables.end_probability(&syllable),
			syllable,
			top_transitions,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::{MemoryCache, NoCache};
	use approx::assert_relative_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn seq(syllables: &[&str]) -> Vec<String> {
		syllables.iter().map(|s| s.to_string()).collect()
	}

	fn corpus() -> Vec<Vec<String>> {
		vec![
			seq(&["tho", "rin"]),
			seq(&["ba", "lin"]),
			seq(&["dwa", "lin"]),
			seq(&["ki", "li"]),
			seq(&["fi", "li"]),
			seq(&["gan", "dalf"]),
		]
	}

	fn fingerprint() -> Fingerprint {
		Fingerprint::new("test", "FantasyNameSegmenter", "v1.0")
	}

	#[test]
	fn cache_hit_restores_identical_tables() {
		let cache = MemoryCache::new();

		let computed = BayesianModel::train(&corpus(), fingerprint(), &cache);
		assert_eq!(computed.origin(), TableOrigin::Computed);
		assert!(cache.exists(fingerprint().as_str()));

		// Sequences are ignored on a hit
		let cached = BayesianModel::train(&Vec::<Vec<String>>::new(), fingerprint(), &cache);
		assert_eq!(cached.origin(), TableOrigin::Cached);
		assert_eq!(cached.tables(), computed.tables());

		for name in corpus() {
			assert_eq!(
				cached.probability(&name).to_bits(),
				computed.probability(&name).to_bits()
			);
		}
	}

	#[test]
	fn corrupt_entry_is_recomputed_and_overwritten() {
		let cache = MemoryCache::new();
		cache.set(fingerprint().as_str(), &[0xff, 0xff, 0xff]).unwrap();

		let model = BayesianModel::train(&corpus(), fingerprint(), &cache);
		assert_eq!(model.origin(), TableOrigin::Computed);
		assert_eq!(model.tables().vocabulary().len(), 10);

		let again = BayesianModel::train(&corpus(), fingerprint(), &cache);
		assert_eq!(again.origin(), TableOrigin::Cached);
	}

	#[test]
	fn scores_known_sequence() {
		let model = BayesianModel::train(&corpus(), fingerprint(), &NoCache);
		let tables = model.tables();

		let raw = model.probability(&["tho", "rin"]);
		let expected = tables.start_probability("tho") * tables.transition_probability("tho", "rin") * tables.end_probability("rin");
		assert_relative_eq!(raw, expected);
		assert_relative_eq!(model.normalized_probability(&["tho", "rin"]), expected.powf(1.0 / 3.0));

		// A name seen in the corpus beats a shuffled one
		assert!(raw > model.probability(&["rin", "tho"]));
	}

	#[test]
	fn empty_or_unknown_sequences_score_zero() {
		let model = BayesianModel::train(&corpus(), fingerprint(), &NoCache);
		assert_eq!(model.probability::<&str>(&[]), 0.0);
		assert_eq!(model.normalized_probability::<&str>(&[]), 0.0);
		assert_eq!(model.normalized_probability(&["tho", "zzz"]), 0.0);
	}

	#[test]
	fn samples_within_bounds() {
		let model = BayesianModel::train(&corpus(), fingerprint(), &NoCache);
		let mut rng = StdRng::seed_from_u64(1);

		for max in 2..6 {
			for _ in 0..50 {
				let sequence = model.sample(max, &mut rng).unwrap();
				assert!(sequence.len() >= 2 && sequence.len() <= max, "{sequence:?}");
				assert!(sequence.iter().all(|s| model.tables().contains(s)));
			}
		}
	}

	#[test]
	fn sampling_is_reproducible_with_a_seed() {
		let model = BayesianModel::train(&corpus(), fingerprint(), &NoCache);
		let mut a = StdRng::seed_from_u64(99);
		let mut b = StdRng::seed_from_u64(99);
		for _ in 0..20 {
			assert_eq!(model.sample(4, &mut a).unwrap(), model.sample(4, &mut b).unwrap());
		}
	}

	#[test]
	fn empty_vocabulary_cannot_sample() {
		let model = BayesianModel::train(&Vec::<Vec<String>>::new(), fingerprint(), &NoCache);
		let mut rng = StdRng::seed_from_u64(0);
		assert!(matches!(model.sample(3, &mut rng), Err(NameError::ModelNotTrained)));
		assert_eq!(model.probability(&["tho"]), 0.0);
	}

	#[test]
	fn reports_top_transitions() {
		let model = BayesianModel::train(&corpus(), fingerprint(), &NoCache);

		let info = model.syllable_info("Tho").unwrap();
		assert_eq!(info.syllable, "tho");
		assert_eq!(info.top_transitions.len(), 5);
		assert_eq!(info.top_transitions[0].0, "rin");
		assert!(info.top_transitions.windows(2).all(|w| w[0].1 >= w[1].1));
		// Ties keep vocabulary order
		assert_eq!(info.top_transitions[1].0, "ba");
		assert_relative_eq!(info.start_probability, model.tables().start_probability("tho"));

		assert!(model.syllable_info("zzz").is_none());
	}
}
