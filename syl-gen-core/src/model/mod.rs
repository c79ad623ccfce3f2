//! Statistical model and generation strategies.
//!
//! This module provides:
//! - Transition counting over syllable sequences (`SyllableCounts`)
//! - Laplace-smoothed probability tables (`ProbabilityTables`)
//! - A trained bigram model with sampling and scoring (`BayesianModel`)
//! - Generation configuration (`GenerationInput`, `Algorithm`)
//! - A high-level generation interface (`Generator`)

/// Trained bigram model over syllables.
///
/// Training goes through a cache collaborator keyed by a [`fingerprint::Fingerprint`].
pub mod bayesian;

/// Cache key derivation.
pub mod fingerprint;

/// Result of one generation.
pub mod generated_name;

/// Generation parameters and strategy selection.
pub mod generation_input;

/// High-level interface tying a corpus, a random source and the strategies.
pub mod generator;

/// Smoothed start, end and transition probabilities.
pub mod tables;

/// Raw counts and weighted random choice.
pub mod transitions;
