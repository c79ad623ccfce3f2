/// Sound inventories of one segmentation grammar.
///
/// Each list is ordered for greedy matching: longest fragment first, equal
/// lengths in declaration order, and the empty fragment (if any) last so that
/// it only matches when nothing else does.
///
/// ## Invariants
/// - Built once per grammar and never mutated afterwards
/// - Every fragment is lowercase
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhoneticCatalog {
	initials: Vec<&'static str>,
	inners: Vec<&'static str>,
	codas: Vec<&'static str>,
}

impl PhoneticCatalog {
	/// Builds a catalog from unsorted sound lists.
	pub fn new(initials: &[&'static str], inners: &[&'static str], codas: &[&'static str]) -> Self {
		Self {
			initials: longest_first(initials),
			inners: longest_first(inners),
			codas: longest_first(codas),
		}
	}

	/// Initial consonant clusters, longest first.
	pub fn initials(&self) -> &[&'static str] {
		&self.initials
	}

	/// Inner vowel clusters, longest first.
	pub fn inners(&self) -> &[&'static str] {
		&self.inners
	}

	/// Final consonant clusters, longest first.
	pub fn codas(&self) -> &[&'static str] {
		&self.codas
	}

	/// Sounds of the fantasy grammar (English-like clusters).
	pub fn fantasy() -> Self {
		Self::new(FANTASY_INITIALS, FANTASY_INNERS, FANTASY_CODAS)
	}

	/// Sounds of the Japanese romanization grammar.
	pub fn japanese() -> Self {
		Self::new(JAPANESE_INITIALS, JAPANESE_INNERS, JAPANESE_CODAS)
	}
}

/// Sorts sounds longest first, keeping declaration order among equal
/// lengths and forcing the empty sound to the end.
pub fn longest_first<S: AsRef<str> + Clone>(sounds: &[S]) -> Vec<S> {
	let mut sorted = sounds.to_vec();
	// Stable: ties keep their relative order.
	sorted.sort_by_key(|sound| {
		let len = sound.as_ref().chars().count();
		(len == 0, std::cmp::Reverse(len))
	});
	sorted
}

const FANTASY_INITIALS: &[&str] = &[
	"b", "br", "bh", "bl",
	"c", "cr", "ch", "cl", "chr",
	"d", "dr", "dw",
	"f", "fr", "fl",
	"g", "gr", "gl", "gw", "gh",
	"h",
	"j",
	"k", "kr", "kh",
	"l", "ll",
	"m",
	"n",
	"p", "ph", "pr",
	"q", "qu",
	"r",
	"s", "sh", "sl",
	"t", "th", "tr", "thr",
	"v", "vh",
	"w",
	"x",
	"y",
	"z",
	"",
];

const FANTASY_INNERS: &[&str] = &[
	"a", "ae", "ai", "au", "aa",
	"e", "eo", "ei", "ea", "ee",
	"i",
	"o", "oo",
	"u", "uu",
	"y",
];

const FANTASY_CODAS: &[&str] = &[
	"b",
	"c", "ch",
	"d",
	"f",
	"g", "gh",
	"h",
	"j",
	"k", "kh",
	"l", "ld", "lm", "lf", "ll", "lth",
	"m", "mm", "msh",
	"n", "nn", "nd", "nt", "ng",
	"p", "ph",
	"q",
	"r", "rd", "rn", "rm", "rk", "rl", "rth",
	"s", "sh", "st", "ss", "sk",
	"t", "th", "tz",
	"v",
	"w", "wn",
	"x",
	"y",
	"z", "zzt",
	"",
];

// Palatalized clusters and affricates come first so the two-letter
// initials keep this order after sorting.
const JAPANESE_INITIALS: &[&str] = &[
	"ky", "gy", "sh", "ch", "ny", "hy", "by", "py", "my", "ry",
	"ts", "dz",
	"k", "g", "s", "z", "t", "d", "n", "h", "b", "p", "m", "y", "r", "w",
	"",
];

const JAPANESE_INNERS: &[&str] = &["a", "i", "u", "e", "o"];

const JAPANESE_CODAS: &[&str] = &["n", ""];
