use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

/// Observed successors of one syllable.
///
/// Conceptually a node in a Markov chain whose outgoing edges are weighted by
/// how many times they were observed.
///
/// ## Invariants
/// - All transitions start from the same `key`
/// - Each transition occurrence count is strictly positive
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionCounts {
	/// The preceding syllable.
	key: String,
	/// Occurrences indexed by the following syllable.
	/// Example: { "rin" => 4, "gorn" => 1 }
	transitions: BTreeMap<String, usize>,
}

impl TransitionCounts {
	/// Creates an empty node for the given syllable.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: BTreeMap::new(),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Records one occurrence of `key -> next`.
	pub fn add_transition(&mut self, next: &str) {
		*self.transitions.entry(next.to_owned()).or_insert(0) += 1;
	}

	/// Occurrences of `key -> next`.
	pub fn count(&self, next: &str) -> usize {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	/// Total number of outgoing transitions observed.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}
}

/// Raw counts gathered from a corpus of syllable sequences.
///
/// This is the input of Laplace smoothing; nothing here is normalized.
#[derive(Clone, Debug, Default)]
pub struct SyllableCounts {
	vocabulary: BTreeSet<String>,
	starts: BTreeMap<String, usize>,
	ends: BTreeMap<String, usize>,
	transitions: BTreeMap<String, TransitionCounts>,
}

impl SyllableCounts {
	/// Counts every sequence of `sequences`.
	pub fn from_sequences<S: AsRef<[String]>>(sequences: &[S]) -> Self {
		let mut counts = Self::default();
		for sequence in sequences {
			counts.add_sequence(sequence.as_ref());
		}
		counts
	}

	/// Records one name. Empty sequences are ignored.
	///
	/// - The first syllable counts as a start, the last as an end
	/// - Every adjacent pair counts as a transition
	pub fn add_sequence(&mut self, sequence: &[String]) {
		let (Some(first), Some(last)) = (sequence.first(), sequence.last()) else {
			return;
		};

		self.vocabulary.extend(sequence.iter().cloned());
		*self.starts.entry(first.clone()).or_insert(0) += 1;
		*self.ends.entry(last.clone()).or_insert(0) += 1;

		for pair in sequence.windows(2) {
			self.transitions
				.entry(pair[0].clone())
				.or_insert_with(|| TransitionCounts::new(&pair[0]))
				.add_transition(&pair[1]);
		}
	}

	/// Distinct syllables, sorted.
	pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
		self.vocabulary.iter().map(String::as_str)
	}

	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary.len()
	}

	pub fn start_count(&self, syllable: &str) -> usize {
		self.starts.get(syllable).copied().unwrap_or(0)
	}

	pub fn total_starts(&self) -> usize {
		self.starts.values().sum()
	}

	pub fn end_count(&self, syllable: &str) -> usize {
		self.ends.get(syllable).copied().unwrap_or(0)
	}

	pub fn total_ends(&self) -> usize {
		self.ends.values().sum()
	}

	/// Outgoing transitions of `syllable`, if it was ever seen as a predecessor.
	pub fn transitions(&self, syllable: &str) -> Option<&TransitionCounts> {
		self.transitions.get(syllable)
	}
}

/// Picks an item with probability proportional to its weight.
///
/// This method performs:
/// - an O(n) pass to compute the total weight
/// - a cumulative subtraction to select a bucket
///
/// Items are visited in iteration order, so a seeded `rng` gives
/// reproducible picks. Returns `None` if there is no item with a positive
/// weight.
pub fn weighted_choice<'a, I, R>(items: I, rng: &mut R) -> Option<&'a str>
where
	I: IntoIterator<Item = (&'a str, f64)>,
	R: Rng + ?Sized,
{
	let items: Vec<(&str, f64)> = items.into_iter().filter(|(_, weight)| *weight > 0.0).collect();
	let total: f64 = items.iter().map(|(_, weight)| weight).sum();
	if items.is_empty() || total <= 0.0 {
		return None;
	}

	let mut r = rng.random::<f64>() * total;
	for (item, weight) in &items {
		if r < *weight {
			return Some(item);
		}
		r -= weight;
	}

	// Rounding can leave a tiny remainder past the last bucket
	items.last().map(|(item, _)| *item)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn seq(syllables: &[&str]) -> Vec<String> {
		syllables.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn counts_starts_ends_and_pairs() {
		let counts = SyllableCounts::from_sequences(&[seq(&["tho", "rin"]), seq(&["tho", "rin", "dil"]), seq(&["dil"])]);

		assert_eq!(counts.vocabulary().collect::<Vec<_>>(), vec!["dil", "rin", "tho"]);
		assert_eq!(counts.start_count("tho"), 2);
		assert_eq!(counts.start_count("dil"), 1);
		assert_eq!(counts.end_count("rin"), 1);
		assert_eq!(counts.end_count("dil"), 2);
		assert_eq!(counts.total_starts(), 3);

		let from_tho = counts.transitions("tho").unwrap();
		assert_eq!(from_tho.key(), "tho");
		assert_eq!(from_tho.count("rin"), 2);
		assert_eq!(from_tho.total(), 2);
		assert!(counts.transitions("dil").is_none());
	}

	#[test]
	fn ignores_empty_sequences() {
		let counts = SyllableCounts::from_sequences(&[Vec::<String>::new()]);
		assert_eq!(counts.vocabulary_size(), 0);
		assert_eq!(counts.total_starts(), 0);
	}

	#[test]
	fn weighted_choice_skips_zero_weights() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..100 {
			let pick = weighted_choice([("a", 0.0), ("b", 1.0), ("c", 0.0)], &mut rng);
			assert_eq!(pick, Some("b"));
		}
		assert_eq!(weighted_choice([("a", 0.0)], &mut rng), None);
		assert_eq!(weighted_choice(Vec::<(&str, f64)>::new(), &mut rng), None);
	}

	#[test]
	fn weighted_choice_follows_weights() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut heavy = 0;
		for _ in 0..2000 {
			if weighted_choice([("heavy", 0.9), ("light", 0.1)], &mut rng) == Some("heavy") {
				heavy += 1;
			}
		}
		assert!((1650..=1950).contains(&heavy), "heavy picked {heavy} times");
	}
}
