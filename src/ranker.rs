use std::collections::HashMap;

use crate::model::Individual;

/// The four criteria a caller can request an exemplar for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingCriterion {
    Fitness,
    Volume,
    Weight,
    CenterOfMass,
}

impl RankingCriterion {
    pub const ALL: [RankingCriterion; 4] = [
        RankingCriterion::Fitness,
        RankingCriterion::Volume,
        RankingCriterion::Weight,
        RankingCriterion::CenterOfMass,
    ];
}

fn min_max(values: &[f64]) -> (f64, f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let scale = if (max - min).abs() < f64::EPSILON { 1.0 } else { max - min };
    (min, max, scale)
}

/// Composite fitness: each objective is min-max normalized to `[0, 1]`
/// across `individuals`, then summed. Volume and weight are maximized so
/// their normalized value is added as-is; center_of_mass is minimized so
/// its normalized value is inverted before adding.
pub fn composite_fitness(individuals: &[Individual]) -> Vec<f64> {
    let volumes: Vec<f64> = individuals.iter().map(|i| i.objectives().volume).collect();
    let weights: Vec<f64> = individuals.iter().map(|i| i.objectives().weight).collect();
    let coms: Vec<f64> = individuals.iter().map(|i| i.objectives().center_of_mass).collect();

    let (vol_min, _, vol_scale) = min_max(&volumes);
    let (wei_min, _, wei_scale) = min_max(&weights);
    let (com_min, _, com_scale) = min_max(&coms);

    (0..individuals.len())
        .map(|i| {
            let mut f = 1.0 - (coms[i] - com_min) / com_scale;
            f += (weights[i] - wei_min) / wei_scale;
            f += (volumes[i] - vol_min) / vol_scale;
            f
        })
        .collect()
}

/// Sort indices of `individuals` by `criterion`. Descending for fitness,
/// volume, weight; ascending for center_of_mass. Index 0 is the best.
pub fn ranked_indices(individuals: &[Individual], criterion: RankingCriterion) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..individuals.len()).collect();
    match criterion {
        RankingCriterion::Fitness => {
            let fitness = composite_fitness(individuals);
            idx.sort_by(|&a, &b| fitness[b].partial_cmp(&fitness[a]).unwrap());
        }
        RankingCriterion::Volume => {
            idx.sort_by(|&a, &b| {
                individuals[b]
                    .objectives()
                    .volume
                    .partial_cmp(&individuals[a].objectives().volume)
                    .unwrap()
            });
        }
        RankingCriterion::Weight => {
            idx.sort_by(|&a, &b| {
                individuals[b]
                    .objectives()
                    .weight
                    .partial_cmp(&individuals[a].objectives().weight)
                    .unwrap()
            });
        }
        RankingCriterion::CenterOfMass => {
            idx.sort_by(|&a, &b| {
                individuals[a]
                    .objectives()
                    .center_of_mass
                    .partial_cmp(&individuals[b].objectives().center_of_mass)
                    .unwrap()
            });
        }
    }
    idx
}

/// The top exemplar of `individuals` under `criterion`, or `None` if the
/// collection is empty.
pub fn select_exemplar(individuals: &[Individual], criterion: RankingCriterion) -> Option<&Individual> {
    ranked_indices(individuals, criterion)
        .first()
        .map(|&i| &individuals[i])
}

/// One exemplar per criterion, all four picked from the same collection.
pub fn select_exemplars(individuals: &[Individual]) -> HashMap<RankingCriterion, &Individual> {
    RankingCriterion::ALL
        .iter()
        .filter_map(|&c| select_exemplar(individuals, c).map(|ind| (c, ind)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::Objectives;
    use crate::model::PackedBox;

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
    fn volume_exemplar_is_the_largest() {
        let pop = vec![
            individual_with(5.0, 1.0, 1.0),
            individual_with(20.0, 1.0, 1.0),
            individual_with(8.0, 1.0, 1.0),
        ];
        let best = select_exemplar(&pop, RankingCriterion::Volume).unwrap();
        assert_eq!(best.objectives().volume, 20.0);
    }

    #[test]
    fn center_of_mass_exemplar_is_the_smallest() {
        let pop = vec![
            individual_with(5.0, 1.0, 3.0),
            individual_with(5.0, 1.0, 0.5),
            individual_with(5.0, 1.0, 1.0),
        ];
        let best = select_exemplar(&pop, RankingCriterion::CenterOfMass).unwrap();
        assert_eq!(best.objectives().center_of_mass, 0.5);
    }

    #[test]
    fn ranking_is_idempotent() {
        let pop = vec![
            individual_with(5.0, 2.0, 3.0),
            individual_with(20.0, 1.0, 1.0),
            individual_with(8.0, 3.0, 0.5),
        ];
        let first = ranked_indices(&pop, RankingCriterion::Fitness);
        let second = ranked_indices(&pop, RankingCriterion::Fitness);
        assert_eq!(first, second);
    }
}
