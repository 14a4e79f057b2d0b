use thiserror::Error;

/// Errors that abort a run before or during the GA loop.
///
/// Conditions that the specification treats as internally absorbed (a box
/// that fits nowhere, a zero-spread objective scale, an empty trailing
/// front) are deliberately not variants here — they never reach the
/// caller as an `Err`.
#[derive(Error, Debug)]
pub enum GaError {
    #[error("box record at index {0} has neither 5 nor 6 fields")]
    InvalidBoxRecord(usize),

    #[error("population_size must be at least 1, got 0")]
    EmptyPopulation,

    #[error("grid dimensions must all be positive, got ({0}, {1}, {2})")]
    InvalidGrid(u32, u32, u32),

    #[error("mutation_probability must be within [0, 1], got {0}")]
    InvalidMutationProbability(f64),

    /// The tournament selector needs at least `number_of_competitors`
    /// individuals to draw from; see `SPEC_FULL.md` §7 for why this
    /// supplements, rather than loosens, the documented taxonomy.
    #[error("selector needs at least {needed} individuals, population has {available}")]
    SelectorOperator { needed: usize, available: usize },
}
