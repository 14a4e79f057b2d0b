//! Packs a handful of boxes into a small container and prints the exemplar
//! chosen for every ranking criterion. Run with `cargo run --example run_packing`.

use packeroo::progress::NullProgressSink;
use packeroo::ranker::RankingCriterion;
use packeroo::request::PackingRequest;
use packeroo::run_packing;
use serde_json::json;

fn main() {
    env_logger::init();

    let request = PackingRequest {
        boxes: vec![
            json!([1, 4, 3, 2, 8.0]),
            json!([2, 2, 2, 2, 3.0]),
            json!([3, 3, 3, 1, 2.5, 1]),
            json!([4, 1, 1, 1, 0.5]),
        ],
        grid_x: 6,
        grid_y: 6,
        grid_z: 6,
        mutation_probability: 0.15,
        max_generation: 30,
        population_size: 20,
    };

    let mut sink = NullProgressSink;
    let outcome = run_packing(&request, Some(42), &mut sink).expect("packing run failed");

    for criterion in RankingCriterion::ALL {
        let layout = &outcome.exemplars[&criterion];
        println!("{criterion:?}: {} boxes placed in grid {:?}", layout.boxes.len(), layout.grid);
        for b in &layout.boxes {
            println!("  box {} at {:?}, shape {:?}", b.code, b.position, b.shape);
        }
    }
}
