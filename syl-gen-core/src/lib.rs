//! Syllable-based name generation library.
//!
//! This crate learns the phonetic structure of a list of real names and
//! recombines it into new ones:
//! - Segmentation of names into syllables (fantasy and Japanese grammars)
//! - Corpus loading from YAML or plain text name lists
//! - A Laplace-smoothed bigram model over syllables, cached between runs
//! - Splice and sampling strategies under a length budget
//!
//! ```no_run
//! use syl_gen_core::{Algorithm, Corpus, FileCache, GenerationInput, Generator};
//!
//! let corpus = Corpus::load("data/generic-fantasy.yaml", None)?;
//! let mut generator = Generator::new(corpus).with_cache(FileCache::new(".rng_cache"));
//! for name in generator.generate(&GenerationInput::new(5, 10, Algorithm::Bayesian))? {
//!     println!("{name}");
//! }
//! # Ok::<(), syl_gen_core::NameError>(())
//! ```

/// Crate error type.
pub mod error;

/// Phonetic segmentation engine.
pub mod segmentation;

/// Name lists and their segmentation.
pub mod corpus;

/// Best-effort key/blob stores for trained tables.
pub mod cache;

/// Bayesian model and generation strategies.
pub mod model;

/// I/O utilities (file loading, path helpers).
///
/// Mostly internal
pub mod io;

pub use cache::{CacheError, CacheStore, FileCache, MemoryCache, NoCache};
pub use corpus::{available_name_lists, resolve_name_list, Corpus, CorpusMetadata};
pub use error::{NameError, Result};
pub use model::bayesian::{BayesianModel, SyllableInfo, TableOrigin};
pub use model::fingerprint::{Fingerprint, MODEL_VERSION};
pub use model::generated_name::GeneratedName;
pub use model::generation_input::{Algorithm, GenerationInput};
pub use model::generator::Generator;
pub use segmentation::syllable::Syllable;
pub use segmentation::{SegmentedName, Segmenter, SegmenterKind};
