//! Segmentation of the built-in name lists and of known names.

use std::path::PathBuf;

use syl_gen_core::{Corpus, NameError, SegmentedName, Segmenter, SegmenterKind};

fn data_file(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("data").join(name)
}

fn split(segmenter: &Segmenter, name: &str) -> Vec<String> {
	SegmentedName::new(name, segmenter).unwrap().syllable_strings()
}

#[test]
fn fantasy_names_split_as_expected() {
	let segmenter = Segmenter::new(SegmenterKind::Fantasy);
	let expected: &[(&str, &[&str])] = &[
		("Aragorn", &["ar", "a", "gorn"]),
		("Legolas", &["leg", "o", "las"]),
		("Gandalf", &["gan", "dalf"]),
		("Galadriel", &["gal", "a", "dri", "el"]),
		("Boromir", &["bor", "o", "mir"]),
		("Eowyn", &["eo", "wyn"]),
		("Samwise", &["sam", "wi", "se"]),
		("Isildur", &["is", "il", "dur"]),
		("Glorfindel", &["glor", "fin", "del"]),
		("Thranduil", &["thrand", "u", "il"]),
		("Beorn", &["beorn"]),
		("Celeborn", &["cel", "e", "born"]),
		("Rhiannon", &["rh", "i", "an", "non"]),
	];

	for (name, syllables) in expected {
		assert_eq!(split(&segmenter, name), *syllables, "{name}");
	}
}

#[test]
fn japanese_names_split_as_expected() {
	let segmenter = Segmenter::new(SegmenterKind::Japanese);
	let expected: &[(&str, &[&str])] = &[
		("Hattori", &["ha", "tto", "ri"]),
		("Chousokabe", &["cho", "u", "so", "ka", "be"]),
		("Honganji", &["hon", "gan", "ji"]),
		("Gen'i", &["gen", "'i"]),
		("Tokugawa", &["to", "ku", "ga", "wa"]),
		("Ittetsu", &["i", "tte", "tsu"]),
		("Akechi", &["a", "ke", "chi"]),
		("Maeda", &["ma", "e", "da"]),
		("Uesugi", &["u", "e", "su", "gi"]),
		("Hideyoshi", &["hi", "de", "yo", "shi"]),
	];

	for (name, syllables) in expected {
		assert_eq!(split(&segmenter, name), *syllables, "{name}");
	}
}

#[test]
fn fantasy_list_round_trips() {
	let corpus = Corpus::load(data_file("generic-fantasy.yaml"), None).unwrap();
	assert_eq!(corpus.kind(), SegmenterKind::Fantasy);
	assert!(corpus.len() > 50);

	for name in corpus.names() {
		assert!(!name.syllables().is_empty(), "{}", name.name());
		assert_eq!(name.syllable_strings().concat(), name.name().to_lowercase());
	}
}

#[test]
fn sengoku_list_uses_the_declared_segmenter() {
	let corpus = Corpus::load(data_file("japanese-sengoku.yaml"), None).unwrap();
	assert_eq!(corpus.kind(), SegmenterKind::Japanese);
	assert_eq!(corpus.metadata().name.as_deref(), Some("Japanese Sengoku"));
	assert!(corpus.names().iter().all(|name| !name.syllables().is_empty()));

	let hattori = corpus.names().iter().find(|name| name.name() == "Hattori").unwrap();
	assert_eq!(hattori.raw_name(), "Ha/tto/ri");
}

#[test]
fn gap_in_the_catalog_is_reported() {
	let segmenter = Segmenter::new(SegmenterKind::Fantasy);
	let err = SegmentedName::new("Bob'", &segmenter).unwrap_err();
	assert!(matches!(err, NameError::Segmentation { .. }));
	assert_eq!(
		err.to_string(),
		"Cannot segment name 'Bob''. It is likely that a required syllable is missing at '''."
	);
}
