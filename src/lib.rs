//! Multi-objective 3D bin-packing via NSGA-II.
//!
//! Given a container and a list of boxes, [`run_packing`] searches for
//! packings that jointly maximize packed volume and weight while minimizing
//! the distance between the pack's center of mass and the geometric center
//! of the volume actually used. It searches with NSGA-II over a permutation
//! chromosome (each gene carrying its own orientation bit), decoded by a
//! deterministic deepest-bottom-left-fill placer (see [`decode`]).
//!
//! The crate has no opinion on transport, plotting, or persistence: a
//! caller injects a [`ProgressSink`](progress::ProgressSink) to observe a
//! run and reads the returned [`PackingOutcome`](request::PackingOutcome)
//! for the result.

pub mod decode;
pub mod engine;
pub mod error;
pub mod model;
pub mod operators;
pub mod progress;
pub mod ranker;
pub mod request;
pub mod rng;
pub mod sort;

use log::info;

use crate::engine::{GaConfig, GaEngine};
use crate::error::GaError;
use crate::progress::ProgressSink;
use crate::ranker::RankingCriterion;
use crate::request::{PackingOutcome, PackingRequest};

/// Run one GA request to completion: validate it, build the initial
/// population, evolve it for `request.max_generation` generations, and pick
/// one exemplar per [`RankingCriterion`] from the final population.
///
/// `seed` fixes the RNG so that identical `(request, seed)` pairs produce
/// identical outcomes; pass `None` for a (still deterministic, see
/// [`rng::get_rng`]) default run.
pub fn run_packing(
    request: &PackingRequest,
    seed: Option<u64>,
    sink: &mut dyn ProgressSink,
) -> Result<PackingOutcome, GaError> {
    let templates = request.parsed_boxes()?;
    let config = GaConfig {
        grid: request.grid(),
        mutation_probability: request.mutation_probability,
        max_generation: request.max_generation,
        population_size: request.population_size,
    };

    info!(
        "Starting packing run: {} boxes, grid {:?}, {} individuals over {} generations",
        templates.len(),
        config.grid,
        config.population_size,
        config.max_generation
    );

    let mut engine = GaEngine::new(&templates, config, seed)?;
    let population = engine.run(sink)?.clone();

    for criterion in RankingCriterion::ALL {
        sink.status(progress::StatusEvent::GenerateBestBegin(criterion));
    }
    let outcome = PackingOutcome::new(population);
    for criterion in RankingCriterion::ALL {
        sink.status(progress::StatusEvent::GenerateBestEnd(criterion));
    }
    sink.status(progress::StatusEvent::Done);

    Ok(outcome)
}
