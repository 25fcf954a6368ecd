//! Occupancy queries relative to the module being drawn.

/// Answers whether the module at offset `(dx, dy)` from the current one is dark.
///
/// `dx` counts columns to the right, `dy` rows downward. The morse style
/// asks for arbitrary positive offsets along one axis, every other style only
/// for the four unit offsets. Modules outside the matrix must report `false`.
pub trait NeighborQuery {
    fn has_neighbor(&self, dx: i32, dy: i32) -> bool;
}

impl<F> NeighborQuery for F
where
    F: Fn(i32, i32) -> bool,
{
    fn has_neighbor(&self, dx: i32, dy: i32) -> bool {
        self(dx, dy)
    }
}

/// A query with every neighbor absent, for callers that have no matrix at hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNeighbors;

impl NeighborQuery for NoNeighbors {
    fn has_neighbor(&self, _dx: i32, _dy: i32) -> bool {
        false
    }
}

/// Occupancy of the four orthogonal neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Neighbors {
    pub fn query<Q: NeighborQuery + ?Sized>(neighbors: &Q) -> Self {
        Neighbors {
            left: neighbors.has_neighbor(-1, 0),
            right: neighbors.has_neighbor(1, 0),
            top: neighbors.has_neighbor(0, -1),
            bottom: neighbors.has_neighbor(0, 1),
        }
    }

    pub fn count(&self) -> u8 {
        u8::from(self.left) + u8::from(self.right) + u8::from(self.top) + u8::from(self.bottom)
    }

    /// Builds the snapshot from a 4-bit mask: left, right, top, bottom from the low bit up.
    pub fn from_bits(bits: u8) -> Self {
        Neighbors {
            left: bits & 0b0001 != 0,
            right: bits & 0b0010 != 0,
            top: bits & 0b0100 != 0,
            bottom: bits & 0b1000 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_query() {
        let only_left = |dx: i32, dy: i32| dx == -1 && dy == 0;
        let n = Neighbors::query(&only_left);
        assert_eq!(
            n,
            Neighbors {
                left: true,
                ..Neighbors::default()
            }
        );
        assert_eq!(n.count(), 1);
    }

    #[test]
    fn test_no_neighbors() {
        assert_eq!(Neighbors::query(&NoNeighbors).count(), 0);
    }

    #[test]
    fn test_from_bits_covers_all_sixteen() {
        for bits in 0u8..16 {
            assert_eq!(Neighbors::from_bits(bits).count() as u32, bits.count_ones());
        }
        assert_eq!(Neighbors::from_bits(0b1111).count(), 4);
    }
}
