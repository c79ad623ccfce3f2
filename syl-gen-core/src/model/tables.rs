use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::transitions::SyllableCounts;

/// Additive smoothing constant applied to every count.
pub const SMOOTHING_ALPHA: f64 = 0.01;

/// Laplace-smoothed start, end and bigram probabilities over a syllable
/// vocabulary.
///
/// This is the unit persisted by the cache: a `postcard` blob of this struct
/// fully restores a trained model.
///
/// # Invariants
/// - `vocabulary` is sorted and free of duplicates
/// - `start` and `end` each hold one entry per vocabulary syllable and sum to 1
/// - Every row of `transitions` holds one entry per vocabulary syllable and
///   sums to 1, so no syllable is a dead end
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProbabilityTables {
	vocabulary: Vec<String>,
	start: BTreeMap<String, f64>,
	end: BTreeMap<String, f64>,
	transitions: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ProbabilityTables {
	/// Counts and smooths a corpus of syllable sequences.
	pub fn from_sequences<S: AsRef<[String]>>(sequences: &[S]) -> Self {
		Self::from_counts(&SyllableCounts::from_sequences(sequences))
	}

	/// Converts raw counts into probabilities.
	///
	/// With `V` the vocabulary size and `α` = [`SMOOTHING_ALPHA`]:
	/// - `start[s] = (starts(s) + α) / (total_starts + V·α)`
	/// - `end[s] = (ends(s) + α) / (total_ends + V·α)`
	/// - `transitions[s][t] = (count(s→t) + α) / (total_from(s) + V·α)`
	///
	/// A syllable never seen as a predecessor still gets a full (uniform) row.
	pub fn from_counts(counts: &SyllableCounts) -> Self {
		let vocabulary: Vec<String> = counts.vocabulary().map(str::to_owned).collect();
		let smoothing = vocabulary.len() as f64 * SMOOTHING_ALPHA;

		let smooth = |count: usize, total: usize| (count as f64 + SMOOTHING_ALPHA) / (total as f64 + smoothing);

		let total_starts = counts.total_starts();
		let total_ends = counts.total_ends();

		let mut start = BTreeMap::new();
		let mut end = BTreeMap::new();
		let mut transitions = BTreeMap::new();

		for syllable in &vocabulary {
			start.insert(syllable.clone(), smooth(counts.start_count(syllable), total_starts));
			end.insert(syllable.clone(), smooth(counts.end_count(syllable), total_ends));

			let outgoing = counts.transitions(syllable);
			let total_from = outgoing.map_or(0, |node| node.total());
			let row = vocabulary
				.iter()
				.map(|next| {
					let count = outgoing.map_or(0, |node| node.count(next));
					(next.clone(), smooth(count, total_from))
				})
				.collect::<BTreeMap<_, _>>();
			transitions.insert(syllable.clone(), row);
		}

		Self {
			vocabulary,
			start,
			end,
			transitions,
		}
	}

	/// Sorted list of distinct syllables.
	pub fn vocabulary(&self) -> &[String] {
		&self.vocabulary
	}

	pub fn is_empty(&self) -> bool {
		self.vocabulary.is_empty()
	}

	pub fn contains(&self, syllable: &str) -> bool {
		self.start.contains_key(syllable)
	}

	/// Probability that a name starts with `syllable` (0 if unknown).
	pub fn start_probability(&self, syllable: &str) -> f64 {
		self.start.get(syllable).copied().unwrap_or(0.0)
	}

	/// Probability that a name ends with `syllable` (0 if unknown).
	pub fn end_probability(&self, syllable: &str) -> f64 {
		self.end.get(syllable).copied().unwrap_or(0.0)
	}

	/// Probability of `next` following `current` (0 if either is unknown).
	pub fn transition_probability(&self, current: &str, next: &str) -> f64 {
		self.row(current)
			.and_then(|row| row.get(next))
			.copied()
			.unwrap_or(0.0)
	}

	/// Full distribution of successors of `syllable`.
	pub fn row(&self, syllable: &str) -> Option<&BTreeMap<String, f64>> {
		self.transitions.get(syllable)
	}

	/// Start distribution, in vocabulary order.
	pub fn start_distribution(&self) -> impl Iterator<Item = (&str, f64)> {
		self.start.iter().map(|(syllable, p)| (syllable.as_str(), *p))
	}
}
