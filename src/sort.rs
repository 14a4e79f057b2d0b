//! Fast non-dominated sorting and crowding distance, the two per-generation
//! bookkeeping passes NSGA-II runs over a population.

use crate::model::Individual;
use crate::operators::dominates;

/// Partition `individuals` into fronts by Pareto dominance (section IIIA of
/// Deb et al. 2002). Sets `rank` and `dominated_solutions` on every
/// individual as a side effect; `domination_count` is left at the value it
/// reached once the individual was assigned to a front (zero).
///
/// The returned fronts always end in one empty trailing front: the
/// algorithm keeps peeling fronts off until a round produces nothing, and
/// that empty round is the sentinel. Callers that index `fronts[k]`
/// directly must stop before it, not assume every front is non-empty.
pub fn fast_non_dominated_sort(individuals: &mut [Individual]) -> Vec<Vec<usize>> {
    let n = individuals.len();
    if n == 0 {
        return vec![Vec::new()];
    }

    let objectives: Vec<_> = individuals.iter().map(|i| i.objectives()).collect();
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    // Every unordered pair is visited twice, once as (p, q) and once as
    // (q, p); between the two visits both `dominated[p]` and
    // `domination_count[q]` get updated for a `p` that dominates `q`.
    for p in 0..n {
        for q in 0..n {
            if p == q {
                continue;
            }
            if dominates(objectives[p], objectives[q]) {
                dominated[p].push(q);
            } else if dominates(objectives[q], objectives[p]) {
                domination_count[p] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    for &i in &current_front {
        individuals[i].rank = 0;
    }

    let mut rank = 0;
    loop {
        fronts.push(current_front.clone());
        if current_front.is_empty() {
            break;
        }
        let mut next_front = Vec::new();
        for &p in &current_front {
            for &q in &dominated[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    individuals[q].rank = rank + 1;
                    next_front.push(q);
                }
            }
        }
        rank += 1;
        current_front = next_front;
    }

    for i in 0..n {
        individuals[i].dominated_solutions = std::mem::take(&mut dominated[i]);
        individuals[i].domination_count = domination_count[i];
    }

    fronts
}

/// Crowding distance for one front (section IIIB of Deb et al. 2002).
/// `front` must hold indices of a single non-dominated rank; distances on
/// individuals outside `front` are untouched.
///
/// The boundary individual on each objective gets `10^5` (a large finite
/// stand-in for infinity, since the rest of the bookkeeping is plain `f64`).
/// Interior individuals accumulate `(next - prev) / scale` across all three
/// objectives.
pub fn crowding_distance(individuals: &mut [Individual], front: &[usize]) {
    const BOUNDARY_DISTANCE: f64 = 1e5;
    let n = front.len();
    for &i in front {
        individuals[i].crowding_distance = 0.0;
    }
    if n == 0 {
        return;
    }

    type Key = fn(&Individual) -> f64;
    let keys: [Key; 3] = [
        |i: &Individual| i.objectives().volume,
        |i: &Individual| i.objectives().weight,
        |i: &Individual| i.objectives().center_of_mass,
    ];

    for key in keys {
        let mut sorted = front.to_vec();
        sorted.sort_by(|&a, &b| key(&individuals[a]).partial_cmp(&key(&individuals[b])).unwrap());
        let values: Vec<f64> = sorted.iter().map(|&i| key(&individuals[i])).collect();

        let min = values[0];
        let max = values[n - 1];
        let scale = if (max - min).abs() < f64::EPSILON { 1.0 } else { max - min };

        individuals[sorted[0]].crowding_distance = BOUNDARY_DISTANCE;
        individuals[sorted[n - 1]].crowding_distance = BOUNDARY_DISTANCE;

        for idx in 1..n.saturating_sub(1) {
            let delta = (values[idx + 1] - values[idx - 1]) / scale;
            individuals[sorted[idx]].crowding_distance += delta;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Objectives, PackedBox};

    fn individual_with(volume: f64, weight: f64, center_of_mass: f64) -> Individual {
        let boxes = vec![PackedBox::new(1, 1, 1, 1, 1.0, 0)];
        let mut ind = Individual::new(boxes, (1, 1, 1));
        ind.set_objectives_for_test(Objectives {
            volume,
            weight,
            center_of_mass,
        });
        ind
    }

    #[test]
    fn front_zero_is_the_non_dominated_set() {
        let mut pop = vec![
            individual_with(10.0, 5.0, 3.0),
            individual_with(8.0, 5.0, 3.0),
            individual_with(10.0, 6.0, 3.0),
        ];
        let fronts = fast_non_dominated_sort(&mut pop);
        assert_eq!(fronts[0], vec![0]);
        assert_eq!(pop[0].rank, 0);
        assert!(pop[1].rank > 0);
        assert!(pop[2].rank > 0);
    }

    #[test]
    fn fronts_partition_the_population_and_end_with_an_empty_sentinel() {
        let mut pop = vec![
            individual_with(10.0, 5.0, 3.0),
            individual_with(8.0, 5.0, 3.0),
            individual_with(10.0, 6.0, 3.0),
            individual_with(1.0, 9.0, 9.0),
        ];
        let fronts = fast_non_dominated_sort(&mut pop);
        assert!(fronts.last().unwrap().is_empty());
        let covered: usize = fronts.iter().map(|f| f.len()).sum();
        assert_eq!(covered, pop.len());
    }

    #[test]
    fn crowding_extremes_get_the_boundary_distance() {
        let mut pop = vec![
            individual_with(0.0, 0.0, 0.0),
            individual_with(5.0, 5.0, 5.0),
            individual_with(10.0, 10.0, 10.0),
        ];
        let front: Vec<usize> = (0..pop.len()).collect();
        crowding_distance(&mut pop, &front);
        assert_eq!(pop[0].crowding_distance, 3e5);
        assert_eq!(pop[2].crowding_distance, 3e5);
        assert!(pop[1].crowding_distance < 3e5);
    }
}
