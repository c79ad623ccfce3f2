use super::catalog::PhoneticCatalog;
use super::syllable::Syllable;
use crate::error::{NameError, Result};

/// Maximum number of peeling passes before a name is declared unsegmentable.
pub const PASS_LIMIT: usize = 50;

/// Splits a name by peeling syllables alternately from its end and its
/// beginning.
///
/// Each pass extracts one trailing syllable (coda, then inner, then initial,
/// all matched as suffixes) and, if anything remains, one leading syllable
/// (initial, inner, coda matched as prefixes). The leading syllables are
/// followed by the trailing ones in the result.
///
/// # Errors
/// Returns [`NameError::Segmentation`] when the catalog cannot cover the
/// name within [`PASS_LIMIT`] passes, or when the name is empty.
pub fn segment(catalog: &PhoneticCatalog, name: &str) -> Result<Vec<Syllable>> {
	let original = name.to_lowercase();
	let mut remaining = original.as_str();

	if remaining.is_empty() {
		return Err(NameError::Segmentation {
			name: original.clone(),
			residue: String::new(),
		});
	}

	let mut beginning = Vec::new();
	let mut ending = Vec::new();

	for _ in 0..PASS_LIMIT {
		let last = extract_last(catalog, remaining);
		remaining = &remaining[..remaining.len() - last.len()];
		ending.push(last);

		// A single syllable name is done after the first extraction
		if remaining.is_empty() {
			break;
		}

		let first = extract_first(catalog, remaining);
		remaining = &remaining[first.len()..];
		beginning.push(first);

		if remaining.is_empty() {
			break;
		}
	}

	if !remaining.is_empty() {
		return Err(NameError::Segmentation {
			residue: remaining.to_owned(),
			name: original,
		});
	}

	// Trailing syllables were collected from the end inwards
	beginning.extend(ending.into_iter().rev());
	Ok(beginning)
}

/// Extracts the leading syllable of `name` using prefix matches.
pub fn extract_first(catalog: &PhoneticCatalog, name: &str) -> Syllable {
	let (initial, rest) = match_prefix(catalog.initials(), name);
	let (inner, rest) = match_prefix(catalog.inners(), rest);
	let (coda, _) = match_prefix(catalog.codas(), rest);
	Syllable::new(initial, inner, coda)
}

/// Extracts the trailing syllable of `name` using suffix matches.
pub fn extract_last(catalog: &PhoneticCatalog, name: &str) -> Syllable {
	let (coda, rest) = match_suffix(catalog.codas(), name);
	let (inner, rest) = match_suffix(catalog.inners(), rest);
	let (initial, _) = match_suffix(catalog.initials(), rest);
	Syllable::new(initial, inner, coda)
}

/// First sound (in catalog order) that prefixes `text`, with the rest of the text.
fn match_prefix<'a>(sounds: &[&'static str], text: &'a str) -> (&'static str, &'a str) {
	sounds
		.iter()
		.find_map(|sound| text.strip_prefix(sound).map(|rest| (*sound, rest)))
		.unwrap_or(("", text))
}

/// First sound (in catalog order) that suffixes `text`, with the rest of the text.
fn match_suffix<'a>(sounds: &[&'static str], text: &'a str) -> (&'static str, &'a str) {
	sounds
		.iter()
		.find_map(|sound| text.strip_suffix(sound).map(|rest| (*sound, rest)))
		.unwrap_or(("", text))
}
