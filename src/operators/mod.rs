pub use comparison::{BinaryComparisonOperator, CrowdedComparison, ParetoDominance, PreferredSolution, dominates};
pub use crossover::pmx;
pub use mutation::maybe_mutate;
pub use selector::{select_two_distinct_parents, Selector, TournamentSelector};

pub mod comparison;
pub mod crossover;
pub mod mutation;
pub mod selector;
