//! Strongly-typed indexes into grid cells

/// A single axis, represented as a `u8` with one bit (between 0 and 2) set
///
/// Bit 0 is the grid's first axis (`i`), bit 1 the second (`j`), and bit 2
/// the third (`k`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Axis(u8);

/// The first grid axis
pub const X: Axis = Axis(1);
/// The second grid axis
pub const Y: Axis = Axis(2);
/// The third grid axis
pub const Z: Axis = Axis(4);

/// Strongly-typed cell corner, in the `[0, 8)` range
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Corner(u8);

impl Corner {
    /// Builds a new corner
    ///
    /// # Panics
    /// If `i >= 8`, which is not a valid corner index
    pub const fn new(i: u8) -> Self {
        assert!(i < 8);
        Self(i)
    }

    /// Returns the value of this corner as an index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the `(i, j, k)` offset of this corner from the cell's origin
    pub fn offset(self) -> (usize, usize, usize) {
        ((self & X) as usize, (self & Y) as usize, (self & Z) as usize)
    }
}

impl std::ops::BitAnd<Axis> for Corner {
    type Output = bool;
    fn bitand(self, rhs: Axis) -> bool {
        (self.0 & rhs.0) != 0
    }
}

/// Builds the tetrahedron walking from corner 0 to corner 7 along `a`, `b`,
/// then the remaining axis
const fn kuhn(a: Axis, b: Axis) -> [Corner; 4] {
    [Corner(0), Corner(a.0), Corner(a.0 | b.0), Corner(7)]
}

/// Six tetrahedra tiling a cell, all sharing the `0 → 7` diagonal
///
/// Every face diagonal runs from the face's lowest corner to its highest, so
/// neighbouring cells split their shared faces identically.
pub const TETRAHEDRA: [[Corner; 4]; 6] = [
    kuhn(X, Y),
    kuhn(X, Z),
    kuhn(Y, X),
    kuhn(Y, Z),
    kuhn(Z, X),
    kuhn(Z, Y),
];
