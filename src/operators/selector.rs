use std::marker::PhantomData;

use rand::seq::index::sample;
use rand::RngCore;

use crate::error::GaError;
use crate::model::Individual;
use crate::operators::comparison::{BinaryComparisonOperator, PreferredSolution};

/// Choose individuals from a population for reproduction.
pub trait Selector {
    fn select_fit_individual(
        &self,
        individuals: &[Individual],
        rng: &mut dyn RngCore,
    ) -> Result<Individual, GaError>;
}

/// Tournament of `number_of_competitors` individuals, drawn without
/// replacement: the first drawn is the running winner, each subsequent draw
/// challenges it via `Operator::compare`. On a mutually-preferred tie the
/// challenger wins, matching "prefer lower rank; on tie, prefer higher
/// crowding distance; otherwise pick the second" verbatim — no extra RNG
/// draw. With `number_of_competitors = 2` this is exactly the binary
/// tournament the spec describes: two distinct individuals, one comparison.
pub struct TournamentSelector<Operator: BinaryComparisonOperator> {
    number_of_competitors: usize,
    _operator: PhantomData<Operator>,
}

impl<Operator: BinaryComparisonOperator> TournamentSelector<Operator> {
    pub fn new(number_of_competitors: usize) -> Self {
        Self {
            number_of_competitors,
            _operator: PhantomData,
        }
    }

    /// Run one tournament and return the winner's index into `individuals`,
    /// rather than a clone, so callers can compare draws by identity.
    fn select_fit_index(&self, individuals: &[Individual], rng: &mut dyn RngCore) -> Result<usize, GaError> {
        if individuals.len() < self.number_of_competitors {
            return Err(GaError::SelectorOperator {
                needed: self.number_of_competitors,
                available: individuals.len(),
            });
        }

        let drawn = sample(rng, individuals.len(), self.number_of_competitors);
        let mut winner_idx = drawn.index(0);
        for i in 1..drawn.len() {
            let challenger_idx = drawn.index(i);
            let preferred = Operator::compare(&individuals[winner_idx], &individuals[challenger_idx])?;
            winner_idx = resolve_preference(preferred, winner_idx, challenger_idx);
        }
        Ok(winner_idx)
    }
}

impl<Operator: BinaryComparisonOperator> Selector for TournamentSelector<Operator> {
    fn select_fit_individual(
        &self,
        individuals: &[Individual],
        rng: &mut dyn RngCore,
    ) -> Result<Individual, GaError> {
        let idx = self.select_fit_index(individuals, rng)?;
        Ok(individuals[idx].clone())
    }
}

/// Apply a single comparison's verdict to the running tournament winner.
/// On `MutuallyPreferred` the challenger wins outright — "prefer lower
/// rank; on tie, prefer higher crowding distance; otherwise pick the
/// second" leaves no room for a random tie-break.
fn resolve_preference(preferred: PreferredSolution, current_winner: usize, challenger: usize) -> usize {
    match preferred {
        PreferredSolution::Second | PreferredSolution::MutuallyPreferred => challenger,
        PreferredSolution::First => current_winner,
    }
}

/// Pick two distinct parents via repeated binary tournaments, comparing the
/// drawn population index rather than chromosome value — "distinct" means
/// a different population slot, not a different permutation. A population
/// can legitimately converge to every individual sharing the same
/// chromosome (e.g. under `mutation_probability = 0.0`); comparing values
/// there would never terminate, while comparing indices still does, since
/// each tournament draws fresh among the same pool of slots.
pub fn select_two_distinct_parents<Operator: BinaryComparisonOperator>(
    selector: &TournamentSelector<Operator>,
    individuals: &[Individual],
    rng: &mut dyn RngCore,
) -> Result<(Individual, Individual), GaError> {
    let idx1 = selector.select_fit_index(individuals, rng)?;
    if individuals.len() < 2 {
        return Ok((individuals[idx1].clone(), individuals[idx1].clone()));
    }
    loop {
        let idx2 = selector.select_fit_index(individuals, rng)?;
        if idx2 != idx1 {
            return Ok((individuals[idx1].clone(), individuals[idx2].clone()));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::PackedBox;
    use crate::operators::comparison::CrowdedComparison;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn individual(rank: usize, crowding_distance: f64) -> Individual {
        let boxes = vec![PackedBox::new(1, 1, 1, 1, 1.0, 0)];
        let mut ind = Individual::new(boxes, (1, 1, 1));
        ind.rank = rank;
        ind.crowding_distance = crowding_distance;
        ind
    }

    #[test]
    fn lower_rank_wins_tournament() {
        let population = vec![individual(0, 0.0), individual(1, 100.0)];
        let selector = TournamentSelector::<CrowdedComparison>::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let winner = selector.select_fit_individual(&population, &mut rng).unwrap();
            assert_eq!(winner.rank, 0);
        }
    }

    #[test]
    fn mutually_preferred_tie_picks_the_challenger() {
        assert_eq!(resolve_preference(PreferredSolution::MutuallyPreferred, 0, 1), 1);
        assert_eq!(resolve_preference(PreferredSolution::MutuallyPreferred, 5, 2), 2);
        assert_eq!(resolve_preference(PreferredSolution::First, 0, 1), 0);
        assert_eq!(resolve_preference(PreferredSolution::Second, 0, 1), 1);
    }

    #[test]
    fn distinct_parents_terminate_on_a_converged_population() {
        // Every individual shares the same chromosome (a converged
        // population under zero mutation). Comparing by index rather than
        // chromosome value must still let this terminate.
        let boxes = vec![PackedBox::new(1, 1, 1, 1, 1.0, 0)];
        let population: Vec<Individual> = (0..4).map(|_| Individual::new(boxes.clone(), (1, 1, 1))).collect();
        let selector = TournamentSelector::<CrowdedComparison>::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (p1, p2) = select_two_distinct_parents(&selector, &population, &mut rng).unwrap();
        assert_eq!(p1.chromosome(), p2.chromosome());
    }

    #[test]
    fn single_individual_population_pairs_with_itself() {
        let population = vec![individual(0, 0.0)];
        let selector = TournamentSelector::<CrowdedComparison>::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let (p1, p2) = select_two_distinct_parents(&selector, &population, &mut rng).unwrap();
        assert_eq!(p1.chromosome(), p2.chromosome());
    }
}
