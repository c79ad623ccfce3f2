use super::catalog::PhoneticCatalog;
use super::syllable::Syllable;

const VOWELS: &str = "aiueo";

/// Characters after which a trailing "n" starts a new syllable instead of
/// closing the current one.
const GLIDE_OR_VOWEL: &str = "yaiueo";

/// Consonants that can be doubled (gemination). "n" is excluded: "nn" is a
/// final "n" followed by a new syllable.
const GEMINATES: &str = "kgstdhbpmyrwzj";

/// Consonants that can start a syllable on their own.
const SINGLE_INITIALS: &str = "kgstdnhbpmyrwzjf";

fn is_vowel(c: char) -> bool {
	VOWELS.contains(c)
}

/// Tokenizes a romanized Japanese name left to right.
///
/// Handles gemination ("tt" in "hattori" stays in the initial of "tto"),
/// long vowels (the second vowel of "aa" or "ou" is merged into the first),
/// palatalized clusters, CV(n) syllables and standalone "n".
///
/// # Notes
/// - Never fails: characters that cannot start a syllable are attached to
///   the next vowel, or dropped when no vowel follows.
pub fn segment(catalog: &PhoneticCatalog, name: &str) -> Vec<Syllable> {
	let chars: Vec<char> = name.to_lowercase().chars().collect();
	let mut syllables = Vec::new();
	let mut pos = 0;

	while pos < chars.len() {
		if let Some((syllable, consumed)) = extract_next(catalog, &chars[pos..]) {
			syllables.push(syllable);
			pos += consumed;
			continue;
		}

		// Fallback for characters no rule accepts
		let c = chars[pos];
		if is_vowel(c) {
			syllables.push(Syllable::new("", &c.to_string(), ""));
		} else if c == 'n' && takes_coda(&chars[pos..], 0) {
			syllables.push(Syllable::new("", "", "n"));
		} else if let Some(offset) = chars[pos + 1..].iter().position(|c| is_vowel(*c)) {
			let vowel_pos = pos + 1 + offset;
			let consonants: String = chars[pos..vowel_pos].iter().collect();
			syllables.push(Syllable::new(&consonants, &chars[vowel_pos].to_string(), ""));
			pos = vowel_pos + 1;
			continue;
		}
		// Otherwise no vowel follows: drop the character

		pos += 1;
	}

	syllables
}

/// Tries every rule, in priority order, at the start of `rest`.
///
/// Returns the syllable and the number of characters it consumed.
fn extract_next(catalog: &PhoneticCatalog, rest: &[char]) -> Option<(Syllable, usize)> {
	let first = *rest.first()?;

	// Gemination: "tto", "kka", ...
	if rest.len() >= 3 && rest[1] == first && GEMINATES.contains(first) && is_vowel(rest[2]) {
		let initial: String = rest[..2].iter().collect();
		return Some(with_coda(rest, &initial, rest[2], 3));
	}

	// Long vowel: keep the first vowel, merge the second into it
	if rest.len() >= 2 && is_vowel(first) && (rest[1] == first || (first == 'o' && rest[1] == 'u')) {
		return Some((Syllable::new("", &first.to_string(), ""), 2));
	}

	// Palatalized and affricate clusters
	for cluster in catalog.initials().iter().filter(|s| s.chars().count() >= 2) {
		let len = cluster.chars().count();
		if rest.len() > len && rest.iter().take(len).copied().eq(cluster.chars()) && is_vowel(rest[len]) {
			return Some(with_coda(rest, cluster, rest[len], len + 1));
		}
	}

	// Single consonant + vowel
	if rest.len() >= 2 && SINGLE_INITIALS.contains(first) && is_vowel(rest[1]) {
		return Some(with_coda(rest, &first.to_string(), rest[1], 2));
	}

	if is_vowel(first) {
		return Some(with_coda(rest, "", first, 1));
	}

	if first == 'n' && takes_coda(rest, 0) {
		return Some((Syllable::new("", "", "n"), 1));
	}

	None
}

/// Builds `initial + vowel`, closing it with "n" when the character at
/// `consumed` is a syllable-final "n".
fn with_coda(rest: &[char], initial: &str, vowel: char, consumed: usize) -> (Syllable, usize) {
	let vowel = vowel.to_string();
	if takes_coda(rest, consumed) {
		(Syllable::new(initial, &vowel, "n"), consumed + 1)
	} else {
		(Syllable::new(initial, &vowel, ""), consumed)
	}
}

/// `true` if `rest[at]` is an "n" that ends the string or precedes a
/// character other than a vowel or glide.
fn takes_coda(rest: &[char], at: usize) -> bool {
	rest.get(at) == Some(&'n') && rest.get(at + 1).is_none_or(|next| !GLIDE_OR_VOWEL.contains(*next))
}
