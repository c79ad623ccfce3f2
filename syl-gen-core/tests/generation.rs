//! End-to-end generation over the built-in name lists.

use std::fs;
use std::path::PathBuf;

use syl_gen_core::{
	Algorithm, Corpus, FileCache, Fingerprint, GenerationInput, Generator, NameError, TableOrigin,
};

fn load(name: &str) -> Corpus {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("data").join(name);
	Corpus::load(path, None).unwrap()
}

#[test]
fn generates_requested_count_within_budget() {
	let mut generator = Generator::seeded(load("generic-fantasy.yaml"), 2024);

	for algorithm in [Algorithm::Minimal, Algorithm::Variable, Algorithm::Bayesian] {
		let input = GenerationInput::new(25, 10, algorithm);
		let names = generator.generate(&input).unwrap();
		assert_eq!(names.len(), 25);
		for name in &names {
			assert!(name.char_len() <= 10 || name.best_effort, "{algorithm}: {name}");
		}
	}
}

#[test]
fn japanese_corpus_generates_names() {
	let mut generator = Generator::seeded(load("japanese-sengoku.yaml"), 8);
	let input = GenerationInput::new(10, 12, Algorithm::Bayesian);
	let names = generator.generate(&input).unwrap();
	assert_eq!(names.len(), 10);
	assert!(names.iter().all(|name| name.probability.is_some()));
}

#[test]
fn file_cache_is_reused_across_generators() {
	let dir = tempfile::tempdir().unwrap();

	let mut first = Generator::seeded(load("generic-fantasy.yaml"), 1).with_cache(FileCache::new(dir.path()));
	assert_eq!(first.train_bayesian().origin(), TableOrigin::Computed);

	let fingerprint = Fingerprint::for_corpus(first.corpus());
	let entry = dir.path().join(format!("{fingerprint}.bin"));
	assert!(entry.exists());

	let mut second = Generator::seeded(load("generic-fantasy.yaml"), 1).with_cache(FileCache::new(dir.path()));
	assert_eq!(second.train_bayesian().origin(), TableOrigin::Cached);

	let input = GenerationInput::new(5, 12, Algorithm::Bayesian);
	assert_eq!(first.generate(&input).unwrap(), second.generate(&input).unwrap());
}

#[test]
fn corrupt_cache_entry_is_recomputed() {
	let dir = tempfile::tempdir().unwrap();
	let corpus = load("generic-fantasy.yaml");
	let fingerprint = Fingerprint::for_corpus(&corpus);
	let entry = dir.path().join(format!("{fingerprint}.bin"));
	fs::write(&entry, b"not postcard").unwrap();

	let mut generator = Generator::seeded(corpus, 1).with_cache(FileCache::new(dir.path()));
	assert_eq!(generator.train_bayesian().origin(), TableOrigin::Computed);
	assert_ne!(fs::read(&entry).unwrap(), b"not postcard");
}

#[test]
fn corpora_do_not_share_cache_entries() {
	let dir = tempfile::tempdir().unwrap();

	let mut fantasy = Generator::seeded(load("generic-fantasy.yaml"), 1).with_cache(FileCache::new(dir.path()));
	let mut sengoku = Generator::seeded(load("japanese-sengoku.yaml"), 1).with_cache(FileCache::new(dir.path()));
	fantasy.train_bayesian();
	assert_eq!(sengoku.train_bayesian().origin(), TableOrigin::Computed);
	assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn unreachable_threshold_still_returns_names() {
	let mut generator = Generator::seeded(load("generic-fantasy.yaml"), 5);
	let mut input = GenerationInput::new(3, 8, Algorithm::Bayesian);
	input.set_min_probability(1.0).unwrap();

	let names = generator.generate(&input).unwrap();
	assert_eq!(names.len(), 3);
	assert!(names.iter().all(|name| !name.name.is_empty()));
}

#[test]
fn missing_list_is_a_load_error() {
	let result = Corpus::load("does/not/exist.yaml", None);
	assert!(matches!(result, Err(NameError::CorpusLoad { .. })));
}
