use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::bayesian::{BayesianModel, SyllableInfo};
use super::fingerprint::Fingerprint;
use super::generated_name::GeneratedName;
use super::generation_input::{Algorithm, GenerationInput};
use crate::cache::{CacheStore, NoCache};
use crate::corpus::Corpus;
use crate::error::{capitalize, NameError, Result};

/// Retry bound of every splice loop and of [`Generator::generate`].
pub const MAX_ATTEMPTS: usize = 100;

/// Number of sequences sampled by the Bayesian strategy before giving up on
/// the threshold.
pub const BAYESIAN_ATTEMPTS: usize = 500;

/// Upper bound of the random syllables inserted by the variable strategy.
const MAX_MIDDLE_SYLLABLES: usize = 3;

/// Shortest name length that can be requested.
const MIN_LENGTH: usize = 2;

/// Cosmetic cleanup shared by every strategy.
///
/// Collapses `ll` and `nn` into a single letter, then capitalizes.
pub fn cleanup(name: &str) -> String {
	capitalize(&name.to_lowercase().replace("ll", "l").replace("nn", "n"))
}

fn char_len(s: &str) -> usize {
	s.chars().count()
}

/// Outcome of the Bayesian sampling loop.
enum BayesianSearch {
	/// A sample reached the probability threshold.
	Accepted(GeneratedName),
	/// No sample reached the threshold; the best one that fitted is kept.
	BestSeen(GeneratedName),
	/// No sample fitted the length budget.
	Exhausted,
}

/// High-level name generator over one corpus.
///
/// # Responsibilities
/// - Splice corpus syllables (minimal and variable strategies)
/// - Train the Bayesian model on first use and sample from it
/// - Enforce the length budget with bounded retries
///
/// Randomness comes from the owned `rng`, so a seeded generator is
/// fully reproducible.
pub struct Generator<R: Rng = StdRng> {
	corpus: Corpus,
	rng: R,
	cache: Box<dyn CacheStore>,
	bayesian: Option<BayesianModel>,
}

impl Generator<StdRng> {
	/// Creates a generator seeded from the operating system.
	pub fn new(corpus: Corpus) -> Self {
		Self::with_rng(corpus, StdRng::from_os_rng())
	}

	/// Creates a reproducible generator.
	pub fn seeded(corpus: Corpus, seed: u64) -> Self {
		Self::with_rng(corpus, StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> Generator<R> {
	/// Creates a generator drawing from `rng`, without cache.
	pub fn with_rng(corpus: Corpus, rng: R) -> Self {
		Self {
			corpus,
			rng,
			cache: Box::new(NoCache),
			bayesian: None,
		}
	}

	/// Replaces the cache used to persist Bayesian tables.
	///
	/// Must be called before the model is trained to have any effect on it.
	pub fn with_cache<C: CacheStore + 'static>(mut self, cache: C) -> Self {
		self.cache = Box::new(cache);
		self
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	/// Generates `input.count` names.
	///
	/// # Behavior
	/// - Each name is regenerated (up to [`MAX_ATTEMPTS`] times) while it
	///   exceeds `input.max_length`
	/// - The last attempt is kept otherwise, flagged `best_effort`
	///
	/// # Errors
	/// See [`Generator::generate_name`].
	pub fn generate(&mut self, input: &GenerationInput) -> Result<Vec<GeneratedName>> {
		let max_length = input.max_length.max(MIN_LENGTH);
		let mut names = Vec::with_capacity(input.count);

		for _ in 0..input.count {
			let mut name = self.generate_name(max_length, input.algorithm, input.min_probability())?;
			let mut attempts = 1;
			while !name.fits(max_length) && attempts < MAX_ATTEMPTS {
				name = self.generate_name(max_length, input.algorithm, input.min_probability())?;
				attempts += 1;
			}
			if name.best_effort {
				debug!("'{}' exceeds {} characters after {} attempts", name, max_length, attempts);
			}
			names.push(name);
		}

		Ok(names)
	}

	/// Generates a single name with the given strategy.
	///
	/// # Parameters
	/// - `max_length`: budget in characters (raised to 2 if lower)
	/// - `algorithm`: strategy to use
	/// - `min_probability`: raw probability a Bayesian sample must reach
	///
	/// # Errors
	/// - [`NameError::InvalidInput`] if the corpus is empty
	/// - [`NameError::ModelNotTrained`] if the Bayesian strategy is used on a
	///   corpus without any syllable
	pub fn generate_name(&mut self, max_length: usize, algorithm: Algorithm, min_probability: f64) -> Result<GeneratedName> {
		if self.corpus.is_empty() {
			return Err(NameError::InvalidInput("Cannot generate names from an empty corpus".to_owned()));
		}
		let max_length = max_length.max(MIN_LENGTH);

		let name = match algorithm {
			Algorithm::Minimal => self.minimal(max_length),
			Algorithm::Variable => self.variable(max_length),
			Algorithm::Bayesian => self.bayesian(max_length, min_probability)?,
		};
		Ok(name)
	}

	/// Trains the Bayesian model if needed and returns it.
	///
	/// Idempotent: the model is built once per generator, from the cache when
	/// an entry matches the corpus fingerprint.
	pub fn train_bayesian(&mut self) -> &BayesianModel {
		let corpus = &self.corpus;
		let cache = &self.cache;
		self.bayesian.get_or_insert_with(|| {
			BayesianModel::train(&corpus.syllable_sequences(), Fingerprint::for_corpus(corpus), cache.as_ref())
		})
	}

	/// The Bayesian model, if it was trained already.
	pub fn bayesian_model(&self) -> Option<&BayesianModel> {
		self.bayesian.as_ref()
	}

	/// Probabilities of `syllable` in the (lazily trained) Bayesian model.
	pub fn syllable_info(&mut self, syllable: &str) -> Option<SyllableInfo> {
		self.train_bayesian().syllable_info(syllable)
	}

	pub fn name_exists_in_corpus(&self, name: &str) -> bool {
		self.corpus.contains(name)
	}

	/// Picks the first syllable of a random name, shorter than `max_length`.
	///
	/// Returns the capitalized syllable and its source. After
	/// [`MAX_ATTEMPTS`] misses, the last candidate is kept without a source.
	fn pick_beginning(&mut self, max_length: usize) -> (String, Option<String>) {
		let mut beginning = String::new();
		for _ in 0..MAX_ATTEMPTS {
			let Some(source) = self.corpus.names().choose(&mut self.rng) else {
				break;
			};
			let Some(first) = source.syllables().first() else {
				continue;
			};
			beginning = capitalize(&first.to_string());
			if char_len(&beginning) < max_length {
				return (beginning, Some(source.name().to_owned()));
			}
		}
		(beginning, None)
	}

	/// Picks the last syllable of a random name so that `beginning + ending`
	/// fits in `max_length`.
	fn pick_ending(&mut self, beginning: &str, max_length: usize) -> (String, Option<String>) {
		let mut ending = String::new();
		for _ in 0..MAX_ATTEMPTS {
			let Some(source) = self.corpus.names().choose(&mut self.rng) else {
				break;
			};
			let Some(last) = source.syllables().last() else {
				continue;
			};
			ending = last.to_string();
			if char_len(beginning) + char_len(&ending) <= max_length {
				return (ending, Some(source.name().to_owned()));
			}
		}
		(ending, None)
	}

	fn finish(name: String, source_names: Vec<String>, max_length: usize) -> GeneratedName {
		let mut generated = GeneratedName::new(name, source_names);
		generated.best_effort = !generated.fits(max_length);
		generated
	}

	/// First syllable of one name + last syllable of another.
	fn minimal(&mut self, max_length: usize) -> GeneratedName {
		let (beginning, first_source) = self.pick_beginning(max_length);
		let (ending, last_source) = self.pick_ending(&beginning, max_length);

		let sources = first_source.into_iter().chain(last_source).collect();
		Self::finish(cleanup(&format!("{beginning}{ending}")), sources, max_length)
	}

	/// Same as [`Generator::minimal`], with zero to three random syllables in
	/// between. The middle part is redrawn until the cleaned name fits.
	fn variable(&mut self, max_length: usize) -> GeneratedName {
		let (beginning, first_source) = self.pick_beginning(max_length);
		let (ending, last_source) = self.pick_ending(&beginning, max_length);

		let mut name = cleanup(&format!("{beginning}{ending}"));
		let mut middle_sources = Vec::new();
		for _ in 0..MAX_ATTEMPTS {
			let mut middle = String::new();
			let mut touched = Vec::new();

			let count = self.rng.random_range(0..=MAX_MIDDLE_SYLLABLES);
			for _ in 0..count {
				let Some(source) = self.corpus.names().choose(&mut self.rng) else {
					break;
				};
				if let Some(syllable) = source.syllables().choose(&mut self.rng) {
					middle.push_str(&syllable.to_string());
					touched.push(source.name().to_owned());
				}
			}

			name = cleanup(&format!("{beginning}{middle}{ending}"));
			if char_len(&name) <= max_length {
				middle_sources = touched;
				break;
			}
		}

		let sources = first_source
			.into_iter()
			.chain(middle_sources)
			.chain(last_source)
			.collect();
		Self::finish(name, sources, max_length)
	}

	/// Samples from the Bayesian model until a fitting sequence reaches
	/// `min_probability`, then degrades to the best fitting sample, then to
	/// the variable strategy.
	fn bayesian(&mut self, max_length: usize, min_probability: f64) -> Result<GeneratedName> {
		match self.search_bayesian(max_length, min_probability)? {
			BayesianSearch::Accepted(name) => Ok(name),
			BayesianSearch::BestSeen(name) => {
				debug!("No sample reached probability {min_probability:e}, keeping best candidate '{name}'");
				Ok(name)
			}
			BayesianSearch::Exhausted => {
				debug!("No sample fitted {max_length} characters, falling back to the variable strategy");
				let fallback = self.variable(max_length);
				let probability = self.rescore(&fallback.name);
				Ok(fallback.with_probability(probability))
			}
		}
	}

	fn search_bayesian(&mut self, max_length: usize, min_probability: f64) -> Result<BayesianSearch> {
		self.train_bayesian();
		let Some(model) = self.bayesian.as_ref() else {
			return Err(NameError::ModelNotTrained);
		};

		let max_syllables = (max_length / 3).max(2);
		let mut best: Option<(f64, GeneratedName)> = None;

		for _ in 0..BAYESIAN_ATTEMPTS {
			let syllables = model.sample(max_syllables, &mut self.rng)?;
			let name = cleanup(&syllables.concat());
			if char_len(&name) > max_length {
				continue;
			}

			let raw = model.probability(&syllables);
			let normalized = model.normalized_probability(&syllables);
			let candidate = GeneratedName::new(name, Vec::new()).with_probability(Some(normalized));
			if raw >= min_probability {
				return Ok(BayesianSearch::Accepted(candidate));
			}
			if normalized > best.as_ref().map_or(0.0, |(score, _)| *score) {
				best = Some((normalized, candidate));
			}
		}

		Ok(match best {
			Some((_, name)) => BayesianSearch::BestSeen(name),
			None => BayesianSearch::Exhausted,
		})
	}

	/// Re-segments a spliced name to score it with the Bayesian model.
	fn rescore(&self, name: &str) -> Option<f64> {
		let model = self.bayesian.as_ref()?;
		match self.corpus.segmenter().segment(name) {
			Ok(syllables) => {
				let syllables: Vec<String> = syllables.iter().map(ToString::to_string).collect();
				Some(model.normalized_probability(&syllables))
			}
			Err(e) => {
				debug!("Cannot score fallback name: {e}");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::MemoryCache;
	use crate::model::bayesian::TableOrigin;
	use crate::segmentation::SegmenterKind;

	const NAMES: [&str; 15] = [
		"Thorin", "Balin", "Kili", "Bilbo", "Frodo", "Aragorn", "Legolas", "Gandalf", "Elrond", "Galadriel", "Arwen",
		"Boromir", "Beren", "Turin", "Sauron",
	];

	fn corpus() -> Corpus {
		Corpus::from_names(NAMES, SegmenterKind::Fantasy).unwrap()
	}

	#[test]
	fn cleanup_collapses_double_letters() {
		assert_eq!(cleanup("gallion"), "Galion");
		assert_eq!(cleanup("ANNA"), "Ana");
		assert_eq!(cleanup("Tho"), "Tho");
		assert_eq!(cleanup(""), "");
	}

	#[test]
	fn every_strategy_respects_the_length_budget() {
		let mut generator = Generator::seeded(corpus(), 3);
		for algorithm in [Algorithm::Minimal, Algorithm::Variable, Algorithm::Bayesian] {
			let input = GenerationInput::new(20, 12, algorithm);
			for name in generator.generate(&input).unwrap() {
				assert!(name.char_len() <= 12, "{algorithm}: {name}");
				assert!(!name.best_effort);
				assert!(name.name.starts_with(|c: char| c.is_uppercase()));
			}
		}
	}

	#[test]
	fn minimal_records_both_sources() {
		let mut generator = Generator::seeded(corpus(), 11);
		let name = generator.generate_name(12, Algorithm::Minimal, 0.0).unwrap();
		assert_eq!(name.source_names.len(), 2);
		assert!(name.source_names.iter().all(|source| generator.name_exists_in_corpus(source)));
		assert_eq!(name.probability, None);
	}

	#[test]
	fn tiny_budget_is_flagged_best_effort() {
		let mut generator = Generator::seeded(corpus(), 5);
		// Raised to 2; no first syllable of this corpus is shorter than that
		let name = generator.generate_name(0, Algorithm::Minimal, 0.0).unwrap();
		assert_eq!(name.best_effort, name.char_len() > 2);
		assert!(name.best_effort);
	}

	#[test]
	fn bayesian_sample_is_scored_without_sources() {
		let mut generator = Generator::seeded(corpus(), 17);
		let name = generator.generate_name(12, Algorithm::Bayesian, 0.0).unwrap();
		assert!(name.source_names.is_empty());
		let probability = name.probability.unwrap();
		assert!(probability > 0.0 && probability < 1.0);
	}

	#[test]
	fn unreachable_threshold_degrades_gracefully() {
		let mut generator = Generator::seeded(corpus(), 23);
		let name = generator.generate_name(12, Algorithm::Bayesian, 1.0).unwrap();
		assert!(!name.name.is_empty());
		assert!(name.probability.is_some());
	}

	#[test]
	fn oversized_samples_fall_back_to_variable() {
		// Every start syllable is longer than two characters
		let corpus = Corpus::from_names(["Thranduil", "Bramwell", "Gandalf"], SegmenterKind::Fantasy).unwrap();
		let mut generator = Generator::seeded(corpus, 9);
		let name = generator.generate_name(2, Algorithm::Bayesian, 0.0).unwrap();
		assert!(!name.name.is_empty());
		assert!(name.probability.is_some());
		assert!(name.best_effort);
	}

	#[test]
	fn seeded_generators_agree() {
		for algorithm in [Algorithm::Minimal, Algorithm::Variable, Algorithm::Bayesian] {
			let input = GenerationInput::new(10, 10, algorithm);
			let a = Generator::seeded(corpus(), 42).generate(&input).unwrap();
			let b = Generator::seeded(corpus(), 42).generate(&input).unwrap();
			assert_eq!(a, b);
		}
	}

	#[test]
	fn training_is_lazy_and_idempotent() {
		let mut generator = Generator::seeded(corpus(), 1);
		assert!(generator.bayesian_model().is_none());

		let fingerprint = generator.train_bayesian().fingerprint().clone();
		assert_eq!(generator.train_bayesian().fingerprint(), &fingerprint);
		assert_eq!(generator.bayesian_model().map(BayesianModel::origin), Some(TableOrigin::Computed));
	}

	#[test]
	fn second_generator_reads_the_shared_cache() {
		use std::sync::Arc;

		struct Shared(Arc<MemoryCache>);
		impl CacheStore for Shared {
			fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, crate::cache::CacheError> {
				self.0.get(key)
			}
			fn set(&self, key: &str, blob: &[u8]) -> std::result::Result<(), crate::cache::CacheError> {
				self.0.set(key, blob)
			}
			fn exists(&self, key: &str) -> bool {
				self.0.exists(key)
			}
			fn clear(&self, key: &str) -> std::result::Result<(), crate::cache::CacheError> {
				self.0.clear(key)
			}
		}

		let cache = Arc::new(MemoryCache::new());
		let mut first = Generator::seeded(corpus(), 1).with_cache(Shared(Arc::clone(&cache)));
		let mut second = Generator::seeded(corpus(), 1).with_cache(Shared(Arc::clone(&cache)));

		assert_eq!(first.train_bayesian().origin(), TableOrigin::Computed);
		assert_eq!(second.train_bayesian().origin(), TableOrigin::Cached);
		assert_eq!(cache.len(), 1);
		assert_eq!(first.bayesian_model().map(BayesianModel::tables), second.bayesian_model().map(BayesianModel::tables));
	}

	#[test]
	fn syllable_info_trains_on_demand() {
		let mut generator = Generator::seeded(corpus(), 1);
		let info = generator.syllable_info("tho").unwrap();
		assert_eq!(info.top_transitions[0].0, "rin");
		assert!(generator.syllable_info("xyz").is_none());
	}

	#[test]
	fn empty_corpus_is_rejected() {
		let empty = Corpus::from_names(Vec::<String>::new(), SegmenterKind::Fantasy).unwrap();
		let mut generator = Generator::seeded(empty, 1);
		assert!(matches!(
			generator.generate_name(10, Algorithm::Minimal, 0.0),
			Err(NameError::InvalidInput(_))
		));
	}

	#[test]
	fn syllable_free_corpus_cannot_sample() {
		// The forward tokenizer drops consonant-only input
		let corpus = Corpus::from_names(["Kyl"], SegmenterKind::Japanese).unwrap();
		let mut generator = Generator::seeded(corpus, 1);
		assert!(matches!(
			generator.generate_name(10, Algorithm::Bayesian, 0.0),
			Err(NameError::ModelNotTrained)
		));
	}
}
