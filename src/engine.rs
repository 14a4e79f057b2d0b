//! The NSGA-II engine: owns one population and steps it through a bounded
//! number of generations. Single-threaded and synchronous at the control-flow
//! level — the only sanctioned concurrency is decoding a generation's
//! individuals on a `rayon` pool, which touches no RNG state and no shared
//! mutable state (see `SPEC_FULL.md` §5).

use std::time::Instant;

use log::{debug, info};
use rand::{Rng, RngCore};

use crate::error::GaError;
use crate::model::{Individual, PackedBox, Population};
use crate::operators::{
    maybe_mutate, pmx, select_two_distinct_parents, CrowdedComparison, TournamentSelector,
};
use crate::progress::{GaProgressEvent, ProgressSink, StatusEvent};
use crate::request::BoxTemplate;
use crate::rng::get_rng;
use crate::sort::{crowding_distance, fast_non_dominated_sort};

/// Validated configuration for one GA run.
#[derive(Debug, Clone, Copy)]
pub struct GaConfig {
    pub grid: (u32, u32, u32),
    pub mutation_probability: f64,
    pub max_generation: usize,
    pub population_size: usize,
}

impl GaConfig {
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::EmptyPopulation);
        }
        if self.grid.0 == 0 || self.grid.1 == 0 || self.grid.2 == 0 {
            return Err(GaError::InvalidGrid(self.grid.0, self.grid.1, self.grid.2));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(GaError::InvalidMutationProbability(self.mutation_probability));
        }
        Ok(())
    }
}

/// Decode `chromosomes` into individuals. Uses a `rayon` pool when the
/// feature is enabled: decoding is a pure function of one chromosome and
/// touches no RNG, so it parallelizes without affecting the determinism
/// contract (only sequential RNG draws are required to be reproducible).
#[cfg(feature = "rayon")]
fn decode_all(chromosomes: Vec<Vec<PackedBox>>, grid: (u32, u32, u32)) -> Vec<Individual> {
    use rayon::prelude::*;
    chromosomes.into_par_iter().map(|c| Individual::new(c, grid)).collect()
}

#[cfg(not(feature = "rayon"))]
fn decode_all(chromosomes: Vec<Vec<PackedBox>>, grid: (u32, u32, u32)) -> Vec<Individual> {
    chromosomes.into_iter().map(|c| Individual::new(c, grid)).collect()
}

fn random_chromosome(templates: &[BoxTemplate], rng: &mut dyn RngCore) -> Vec<PackedBox> {
    use rand::seq::SliceRandom;

    let mut genes: Vec<PackedBox> = templates
        .iter()
        .map(|t| {
            let orientation = t.orientation.unwrap_or_else(|| u8::from(rng.gen_bool(0.5)));
            PackedBox::new(t.code, t.length, t.width, t.height, t.weight, orientation)
        })
        .collect();
    genes.shuffle(rng);
    genes
}

/// NSGA-II over a permutation-plus-orientation chromosome, decoded by the
/// deepest-bottom-left-fill placer.
pub struct GaEngine {
    config: GaConfig,
    rng: Box<dyn RngCore>,
    selector: TournamentSelector<CrowdedComparison>,
    population: Population,
    generation: usize,
    start: Instant,
}

impl GaEngine {
    /// Build the engine and its random initial population. Every gene's
    /// orientation is taken from the template when the caller specified
    /// one, otherwise it is drawn fresh per individual.
    pub fn new(templates: &[BoxTemplate], config: GaConfig, seed: Option<u64>) -> Result<Self, GaError> {
        config.validate()?;
        let mut rng = get_rng(seed);

        let chromosomes: Vec<_> = (0..config.population_size)
            .map(|_| random_chromosome(templates, rng.as_mut()))
            .collect();
        let individuals = decode_all(chromosomes, config.grid);

        Ok(Self {
            config,
            rng,
            selector: TournamentSelector::new(2),
            population: Population::new(individuals),
            generation: 0,
            start: Instant::now(),
        })
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Run until `max_generation` generations have elapsed, emitting a
    /// progress event after each one. Returns the final population.
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> Result<&Population, GaError> {
        sink.status(StatusEvent::GaBegin);
        info!("Evaluating initial population of {} individuals", self.population.len());
        self.rebuild_fronts();

        while self.generation < self.config.max_generation {
            self.evolve()?;
            self.generation += 1;

            let elapsed = self.start.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 { self.generation as f64 / elapsed } else { 0.0 };
            debug!("Generation {}/{} complete", self.generation, self.config.max_generation);
            sink.progress(GaProgressEvent {
                current: self.generation,
                total: self.config.max_generation,
                rate,
                elapsed_seconds: elapsed,
            });
        }

        sink.status(StatusEvent::GaEnd);
        Ok(&self.population)
    }

    /// Rebuild `rank`/`dominated_solutions`/`crowding_distance` for the
    /// current population and store the resulting front partition.
    fn rebuild_fronts(&mut self) {
        let fronts = fast_non_dominated_sort(&mut self.population.individuals);
        for front in &fronts {
            crowding_distance(&mut self.population.individuals, front);
        }
        self.population.fronts = fronts;
    }

    /// One generation: select parents, produce `population_size` children
    /// by PMX plus mutation, combine with the current population, and
    /// truncate back down to `population_size` by (rank, crowding distance).
    fn evolve(&mut self) -> Result<(), GaError> {
        let target = self.config.population_size;

        let mut child_chromosomes = Vec::with_capacity(target);
        while child_chromosomes.len() < target {
            let (parent1, parent2) =
                select_two_distinct_parents(&self.selector, &self.population.individuals, self.rng.as_mut())?;
            let mut child = pmx(parent1.chromosome(), parent2.chromosome(), self.rng.as_mut());
            maybe_mutate(&mut child, self.config.mutation_probability, self.rng.as_mut());
            child_chromosomes.push(child);
        }
        let children = decode_all(child_chromosomes, self.config.grid);

        let mut combined: Vec<Individual> = self.population.individuals.drain(..).collect();
        combined.extend(children);

        let fronts = fast_non_dominated_sort(&mut combined);

        let mut next = Vec::with_capacity(target);
        for front in &fronts {
            if front.is_empty() {
                continue;
            }
            if next.len() + front.len() <= target {
                next.extend(front.iter().map(|&i| combined[i].clone()));
            } else {
                crowding_distance(&mut combined, front);
                let mut ranked = front.clone();
                ranked.sort_by(|&a, &b| {
                    combined[b]
                        .crowding_distance
                        .partial_cmp(&combined[a].crowding_distance)
                        .unwrap()
                });
                let remaining = target - next.len();
                next.extend(ranked.into_iter().take(remaining).map(|i| combined[i].clone()));
                break;
            }
            if next.len() == target {
                break;
            }
        }

        self.population.individuals = next;
        self.rebuild_fronts();
        Ok(())
    }
}
