use rand::Rng;
use rand::RngCore;

use crate::model::PackedBox;

/// With probability `mutation_probability`, mutate the chromosome in
/// place: with probability 0.5 swap two random genes, otherwise flip one
/// gene's orientation bit.
pub fn maybe_mutate(chromosome: &mut [PackedBox], mutation_probability: f64, rng: &mut dyn RngCore) {
    if !rng.gen_bool(mutation_probability.clamp(0.0, 1.0)) {
        return;
    }
    let n = chromosome.len();
    if n == 0 {
        return;
    }

    if rng.gen_bool(0.5) {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        chromosome.swap(i, j);
    } else {
        let i = rng.gen_range(0..n);
        chromosome[i].orientation = (chromosome[i].orientation + 1) % 2;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_probability_never_mutates() {
        let mut chromosome = vec![
            PackedBox::new(1, 1, 1, 1, 1.0, 0),
            PackedBox::new(2, 1, 1, 1, 1.0, 0),
        ];
        let before = chromosome.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            maybe_mutate(&mut chromosome, 0.0, &mut rng);
        }
        assert_eq!(chromosome, before);
    }

    #[test]
    fn mutation_preserves_code_multiset() {
        let mut chromosome = vec![
            PackedBox::new(1, 1, 1, 1, 1.0, 0),
            PackedBox::new(2, 1, 1, 1, 1.0, 0),
            PackedBox::new(3, 1, 1, 1, 1.0, 0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            maybe_mutate(&mut chromosome, 1.0, &mut rng);
        }
        let mut codes: Vec<u32> = chromosome.iter().map(|b| b.code).collect();
        codes.sort();
        assert_eq!(codes, vec![1, 2, 3]);
    }
}
