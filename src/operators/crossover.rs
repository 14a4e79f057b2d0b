use rand::Rng;
use rand::RngCore;

use crate::model::PackedBox;

/// Partially-matched crossover (PMX) on a permutation chromosome. Produces
/// one child; orientation bits ride along with their box since genes are
/// copied whole.
///
/// Only one child is produced per pair, matching the procedure this was
/// grounded on: the second PMX child (swapping the roles of `p1`/`p2`) is
/// never generated. See the crate-level design notes for why this is kept
/// rather than "fixed".
pub fn pmx(p1: &[PackedBox], p2: &[PackedBox], rng: &mut dyn RngCore) -> Vec<PackedBox> {
    let n = p1.len();
    assert_eq!(n, p2.len(), "PMX requires equal-length parents");

    let mut pos1 = vec![0usize; n + 1];
    let mut pos2 = vec![0usize; n + 1];
    for (i, b) in p1.iter().enumerate() {
        pos1[b.code as usize] = i;
    }
    for (i, b) in p2.iter().enumerate() {
        pos2[b.code as usize] = i;
    }

    let (mut cx1, mut cx2) = cut_points(n, rng);
    if cx2 >= cx1 {
        cx2 += 1;
    } else {
        std::mem::swap(&mut cx1, &mut cx2);
    }

    let mut child: Vec<Option<PackedBox>> = vec![None; n];
    let mut done = vec![false; n + 1];

    for i in cx1..cx2 {
        child[i] = Some(fresh(p1[i]));
        done[p1[i].code as usize] = true;
    }

    for i in cx1..cx2 {
        let code_from_p2 = p2[i].code;
        if !done[code_from_p2 as usize] {
            let mut k = pos2[p1[i].code as usize];
            while child[k].is_some() {
                k = pos2[p1[k].code as usize];
            }
            child[k] = Some(fresh(p2[i]));
            done[code_from_p2 as usize] = true;
        }
    }

    let mut j = 0;
    for gene in p2.iter() {
        if !done[gene.code as usize] {
            while child[j].is_some() {
                j += 1;
            }
            child[j] = Some(fresh(*gene));
            done[gene.code as usize] = true;
        }
    }

    child.into_iter().map(|g| g.expect("PMX must fill every slot")).collect()
}

fn cut_points(n: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let cx1 = rng.gen_range(0..=n);
    let cx2 = rng.gen_range(0..n);
    (cx1, cx2)
}

fn fresh(mut b: PackedBox) -> PackedBox {
    b.position = None;
    b
}
