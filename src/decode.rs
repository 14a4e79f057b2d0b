//! Deepest-bottom-left-fill (DBLF) decoder: turns an ordered chromosome of
//! [`PackedBox`](crate::model::PackedBox) genes into a concrete 3D placement.

use crate::model::boxes::PackedBox;

/// Candidate anchor corners where the next box's minimum corner may be
/// tried, kept sorted by `(z, y, x)` ascending — bottom first, then front,
/// then left.
///
/// This is a flat list, not a set: the same anchor can appear more than
/// once and is never deduplicated. That is the documented behavior of the
/// decoder this was ported from and changing it would change outputs.
#[derive(Debug, Clone)]
pub struct PositionSet(Vec<(u32, u32, u32)>);

impl PositionSet {
    pub fn seeded() -> Self {
        Self(vec![(0, 0, 0)])
    }

    pub fn as_slice(&self) -> &[(u32, u32, u32)] {
        &self.0
    }

    fn remove_at(&mut self, idx: usize) -> (u32, u32, u32) {
        self.0.remove(idx)
    }

    fn grow_from(&mut self, p: (u32, u32, u32), shape: (u32, u32, u32)) {
        let (x, y, z) = p;
        let (l, w, h) = shape;
        self.0.push((x + l, y, z));
        self.0.push((x, y + w, z));
        self.0.push((x, y, z + h));
        self.0
            .sort_by_key(|&(px, py, pz)| (pz, py, px));
    }
}

/// Outcome of decoding a chromosome: which genes were placed, in insertion
/// order, and the tallest z reached.
#[derive(Debug, Clone, Default)]
pub struct DecodeResult {
    pub inserted: Vec<usize>,
    pub max_height: u32,
    pub position_set: Vec<(u32, u32, u32)>,
}

/// Two axis-aligned boxes overlap if all three axis tests hold. The x/y
/// axes are shrunk by 0.5 so boxes may sit flush without tripping on
/// floating-point drift; z is compared exactly so resting on top of
/// another box is never an overlap.
fn overlaps(
    a_pos: (u32, u32, u32),
    a_shape: (u32, u32, u32),
    b_pos: (u32, u32, u32),
    b_shape: (u32, u32, u32),
) -> bool {
    let (x, y, z) = (a_pos.0 as f64, a_pos.1 as f64, a_pos.2 as f64);
    let (l, w, h) = (a_shape.0 as f64, a_shape.1 as f64, a_shape.2 as f64);
    let (xp, yp, zp) = (b_pos.0 as f64, b_pos.1 as f64, b_pos.2 as f64);
    let (lp, wp, hp) = (b_shape.0 as f64, b_shape.1 as f64, b_shape.2 as f64);

    let x_overlap = x + 0.5 < xp + lp && xp < x + l - 0.5;
    let y_overlap = y + 0.5 < yp + wp && yp < y + w - 0.5;
    let z_overlap = z < zp + hp && zp < z + h;

    x_overlap && y_overlap && z_overlap
}

/// Intersection area of the two boxes' footprints, using un-shrunk
/// coordinates (max-of-mins, min-of-maxes).
fn footprint_intersection_area(
    a_pos: (u32, u32, u32),
    a_shape: (u32, u32, u32),
    b_pos: (u32, u32, u32),
    b_shape: (u32, u32, u32),
) -> f64 {
    let (x, y) = (a_pos.0 as f64, a_pos.1 as f64);
    let (l, w) = (a_shape.0 as f64, a_shape.1 as f64);
    let (xp, yp) = (b_pos.0 as f64, b_pos.1 as f64);
    let (lp, wp) = (b_shape.0 as f64, b_shape.1 as f64);

    let ix0 = x.max(xp);
    let ix1 = (x + l).min(xp + lp);
    let iy0 = y.max(yp);
    let iy1 = (y + w).min(yp + wp);

    (ix1 - ix0).max(0.0) * (iy1 - iy0).max(0.0)
}

fn in_bounds(pos: (u32, u32, u32), shape: (u32, u32, u32), grid: (u32, u32, u32)) -> bool {
    pos.0 + shape.0 <= grid.0 && pos.1 + shape.1 <= grid.1 && pos.2 + shape.2 <= grid.2
}

fn is_supported(
    pos: (u32, u32, u32),
    shape: (u32, u32, u32),
    placed: &[(usize, (u32, u32, u32), (u32, u32, u32))],
) -> bool {
    if pos.2 == 0 {
        return true;
    }
    let needed = (shape.0 as f64) * (shape.1 as f64);
    let mut area = 0.0;
    for &(_, other_pos, other_shape) in placed {
        if other_pos.2 + other_shape.2 == pos.2 {
            area += footprint_intersection_area(pos, shape, other_pos, other_shape);
        }
    }
    (area - needed).abs() < 1e-6
}

fn is_valid(
    pos: (u32, u32, u32),
    shape: (u32, u32, u32),
    grid: (u32, u32, u32),
    placed: &[(usize, (u32, u32, u32), (u32, u32, u32))],
) -> bool {
    if !in_bounds(pos, shape, grid) {
        return false;
    }
    for &(_, other_pos, other_shape) in placed {
        if overlaps(pos, shape, other_pos, other_shape) {
            return false;
        }
    }
    is_supported(pos, shape, placed)
}

/// Decode a chromosome in place: every successfully placed gene has its
/// `position` set; genes that fit nowhere are left with `position = None`
/// and are omitted from [`DecodeResult::inserted`].
pub fn decode(chromosome: &mut [PackedBox], grid: (u32, u32, u32)) -> DecodeResult {
    let mut positions = PositionSet::seeded();
    let mut placed: Vec<(usize, (u32, u32, u32), (u32, u32, u32))> = Vec::new();
    let mut inserted = Vec::new();
    let mut max_height = 0u32;

    for (i, gene) in chromosome.iter_mut().enumerate() {
        let shape = gene.shape();
        let mut found = None;
        for (idx, &p) in positions.as_slice().iter().enumerate() {
            if is_valid(p, shape, grid, &placed) {
                found = Some((idx, p));
                break;
            }
        }
        let Some((idx, p)) = found else {
            continue;
        };
        positions.remove_at(idx);
        positions.grow_from(p, shape);
        gene.position = Some(p);
        placed.push((i, p, shape));
        inserted.push(i);
        max_height = max_height.max(p.2 + shape.2);
    }

    DecodeResult {
        inserted,
        max_height,
        position_set: positions.0,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_box_fits_exactly() {
        let mut chromosome = vec![PackedBox::new(1, 2, 2, 2, 5.0, 0)];
        let result = decode(&mut chromosome, (2, 2, 2));
        assert_eq!(result.inserted, vec![0]);
        assert_eq!(chromosome[0].position, Some((0, 0, 0)));
        assert_eq!(result.max_height, 2);
    }

    #[test]
    fn box_too_tall_is_skipped() {
        let mut chromosome = vec![PackedBox::new(1, 2, 2, 2, 5.0, 0)];
        let result = decode(&mut chromosome, (2, 2, 1));
        assert!(result.inserted.is_empty());
        assert_eq!(chromosome[0].position, None);
        assert_eq!(result.max_height, 0);
    }

    #[test]
    fn two_unit_cubes_stack() {
        let mut chromosome = vec![
            PackedBox::new(1, 1, 1, 1, 1.0, 0),
            PackedBox::new(2, 1, 1, 1, 1.0, 0),
        ];
        let result = decode(&mut chromosome, (1, 1, 2));
        assert_eq!(result.inserted, vec![0, 1]);
        assert_eq!(chromosome[0].position, Some((0, 0, 0)));
        assert_eq!(chromosome[1].position, Some((0, 0, 1)));
        assert_eq!(result.max_height, 2);
    }

    #[test]
    fn orientation_changes_fit() {
        let mut oriented = vec![PackedBox::new(1, 1, 2, 1, 1.0, 1)];
        let result = decode(&mut oriented, (2, 1, 1));
        assert_eq!(result.inserted, vec![0]);
        assert_eq!(oriented[0].position, Some((0, 0, 0)));

        let mut unoriented = vec![PackedBox::new(1, 1, 2, 1, 1.0, 0)];
        let result = decode(&mut unoriented, (2, 1, 1));
        assert!(result.inserted.is_empty());
    }

    #[test]
    fn flush_boxes_do_not_overlap() {
        let mut chromosome = vec![
            PackedBox::new(1, 2, 2, 1, 1.0, 0),
            PackedBox::new(2, 2, 2, 1, 1.0, 0),
        ];
        let result = decode(&mut chromosome, (4, 2, 1));
        assert_eq!(result.inserted.len(), 2);
        assert_eq!(chromosome[0].position, Some((0, 0, 0)));
        assert_eq!(chromosome[1].position, Some((2, 0, 0)));
    }

    #[test]
    fn partially_supported_box_is_skipped() {
        // A covers only half of B's footprint at z=0; B can only land at z=1
        // there, which leaves it half-unsupported, so it must be rejected.
        let mut chromosome = vec![
            PackedBox::new(1, 1, 1, 1, 1.0, 0),
            PackedBox::new(2, 2, 1, 1, 1.0, 0),
        ];
        let result = decode(&mut chromosome, (2, 1, 2));
        assert_eq!(result.inserted, vec![0]);
        assert_eq!(chromosome[1].position, None);
    }
}
