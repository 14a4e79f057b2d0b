use serde::{Deserialize, Serialize};

/// A box to be packed: its dimensions, weight, orientation, and (once
/// decoded) the position of its minimum corner inside the container.
///
/// `Box` is a value type: it is never shared between individuals. Every
/// individual owns its own chromosome of boxes, and crossover/mutation copy
/// values rather than references.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackedBox {
    /// 1-based identity, unique within an individual's chromosome.
    pub code: u32,
    pub length: u32,
    pub width: u32,
    pub height: u32,
    pub weight: f64,
    /// 0 or 1. 1 swaps length and width; height is never rotated.
    pub orientation: u8,
    /// Minimum corner once placed by the decoder. `None` until then.
    pub position: Option<(u32, u32, u32)>,
}

impl PackedBox {
    pub fn new(code: u32, length: u32, width: u32, height: u32, weight: f64, orientation: u8) -> Self {
        Self {
            code,
            length,
            width,
            height,
            weight,
            orientation,
            position: None,
        }
    }

    /// Effective footprint under the current orientation: `(l, w, h)`.
    pub fn shape(&self) -> (u32, u32, u32) {
        if self.orientation == 1 {
            (self.width, self.length, self.height)
        } else {
            (self.length, self.width, self.height)
        }
    }

    pub fn volume(&self) -> f64 {
        let (l, w, h) = self.shape();
        (l as f64) * (w as f64) * (h as f64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shape_respects_orientation() {
        let b = PackedBox::new(1, 1, 2, 1, 1.0, 1);
        assert_eq!(b.shape(), (2, 1, 1));
        let b = PackedBox::new(1, 1, 2, 1, 1.0, 0);
        assert_eq!(b.shape(), (1, 2, 1));
    }
}
