//! The external request/response shapes: a `PackingRequest` the caller
//! deserializes off the wire, and a `PackingOutcome` with the exemplars the
//! driver hands back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GaError;
use crate::model::{Individual, Population};
use crate::ranker::{select_exemplars, RankingCriterion};

/// One GA request. `boxes` holds raw JSON values rather than a typed
/// struct because a box record is either a 5- or 6-element array — the
/// sixth (orientation) field is optional and its absence is meaningful
/// (the driver randomizes orientation per individual per gene), which a
/// fixed-arity struct can't express without losing the "field omitted vs.
/// field present" distinction the spec cares about.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackingRequest {
    pub boxes: Vec<Value>,
    pub grid_x: u32,
    pub grid_y: u32,
    pub grid_z: u32,
    pub mutation_probability: f64,
    pub max_generation: usize,
    pub population_size: usize,
}

impl PackingRequest {
    pub fn grid(&self) -> (u32, u32, u32) {
        (self.grid_x, self.grid_y, self.grid_z)
    }

    /// Parse every box record, failing on the first one with the wrong
    /// arity. This is the one fatal condition the spec requires to abort
    /// the request before the GA starts.
    pub fn parsed_boxes(&self) -> Result<Vec<BoxTemplate>, GaError> {
        self.boxes
            .iter()
            .enumerate()
            .map(|(i, v)| BoxTemplate::parse(i, v))
            .collect()
    }
}

/// A box template as given by the caller: dimensions and weight are fixed,
/// but `orientation` may be unset, in which case the driver picks it at
/// random independently for every individual in the initial population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxTemplate {
    pub code: u32,
    pub length: u32,
    pub width: u32,
    pub height: u32,
    pub weight: f64,
    pub orientation: Option<u8>,
}

impl BoxTemplate {
    fn parse(index: usize, value: &Value) -> Result<Self, GaError> {
        let arr = value.as_array().ok_or(GaError::InvalidBoxRecord(index))?;
        if arr.len() != 5 && arr.len() != 6 {
            return Err(GaError::InvalidBoxRecord(index));
        }

        let field_u32 = |v: &Value| v.as_u64().map(|n| n as u32);
        let field_f64 = |v: &Value| v.as_f64();

        let code = field_u32(&arr[0]).ok_or(GaError::InvalidBoxRecord(index))?;
        let length = field_u32(&arr[1]).ok_or(GaError::InvalidBoxRecord(index))?;
        let width = field_u32(&arr[2]).ok_or(GaError::InvalidBoxRecord(index))?;
        let height = field_u32(&arr[3]).ok_or(GaError::InvalidBoxRecord(index))?;
        let weight = field_f64(&arr[4]).ok_or(GaError::InvalidBoxRecord(index))?;
        let orientation = match arr.get(5) {
            Some(v) => Some(field_u32(v).ok_or(GaError::InvalidBoxRecord(index))? as u8),
            None => None,
        };

        Ok(Self {
            code,
            length,
            width,
            height,
            weight,
            orientation,
        })
    }
}

/// One placed box in a returned layout: its identity, the minimum corner it
/// was placed at, and the footprint it occupies under its chosen
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedBox {
    pub code: u32,
    pub position: (u32, u32, u32),
    pub shape: (u32, u32, u32),
}

/// A structured description of one individual's packing: the container it
/// was packed into, plus every box that made it into `insertedBoxes`.
#[derive(Debug, Clone, Serialize)]
pub struct PackedLayout {
    pub grid: (u32, u32, u32),
    pub boxes: Vec<PlacedBox>,
}

impl PackedLayout {
    pub fn from_individual(individual: &Individual) -> Self {
        let boxes = individual
            .inserted_boxes()
            .iter()
            .map(|b| PlacedBox {
                code: b.code,
                position: b.position.expect("inserted box must carry a position"),
                shape: b.shape(),
            })
            .collect();
        Self {
            grid: individual.grid(),
            boxes,
        }
    }
}

/// What a finished run hands back to the caller: the final population, and
/// one exemplar layout per ranking criterion.
#[derive(Debug, Clone)]
pub struct PackingOutcome {
    pub population: Population,
    pub exemplars: HashMap<RankingCriterion, PackedLayout>,
}

impl PackingOutcome {
    /// Exemplars are picked from front 0 only — the Pareto approximation —
    /// never from the whole population, matching the glossary definition:
    /// "the top-ranked individual of front 0 under a chosen criterion".
    pub fn new(population: Population) -> Self {
        let front_zero: Vec<Individual> = population
            .fronts
            .first()
            .filter(|front| !front.is_empty())
            .map(|front| front.iter().map(|&i| population.individuals[i].clone()).collect())
            .unwrap_or_else(|| population.individuals.clone());

        let exemplars = select_exemplars(&front_zero)
            .into_iter()
            .map(|(criterion, individual)| (criterion, PackedLayout::from_individual(individual)))
            .collect();
        Self {
            population,
            exemplars,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn five_field_record_has_no_orientation() {
        let v = json!([1, 2, 2, 2, 5.0]);
        let t = BoxTemplate::parse(0, &v).unwrap();
        assert_eq!(t.orientation, None);
    }

    #[test]
    fn six_field_record_carries_orientation() {
        let v = json!([1, 1, 2, 1, 1.0, 1]);
        let t = BoxTemplate::parse(0, &v).unwrap();
        assert_eq!(t.orientation, Some(1));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let v = json!([1, 2, 2, 2]);
        assert!(matches!(
            BoxTemplate::parse(3, &v),
            Err(GaError::InvalidBoxRecord(3))
        ));
    }

    #[test]
    fn exemplars_come_only_from_front_zero() {
        use crate::model::Objectives;

        let mut front0 = Individual::new(vec![crate::model::PackedBox::new(1, 1, 1, 1, 1.0, 0)], (1, 1, 1));
        front0.set_objectives_for_test(Objectives {
            volume: 10.0,
            weight: 1.0,
            center_of_mass: 1.0,
        });

        // Rank-1 individual with an inflated volume that would win if the
        // full population (not just front 0) were considered.
        let mut rank1 = Individual::new(vec![crate::model::PackedBox::new(2, 1, 1, 1, 1.0, 0)], (1, 1, 1));
        rank1.set_objectives_for_test(Objectives {
            volume: 100.0,
            weight: 1.0,
            center_of_mass: 1.0,
        });

        let mut population = Population::new(vec![front0, rank1]);
        population.fronts = vec![vec![0], vec![1], vec![]];

        let outcome = PackingOutcome::new(population);
        let best_by_volume = &outcome.exemplars[&RankingCriterion::Volume];
        assert_eq!(best_by_volume.boxes[0].code, 1);
    }
}
