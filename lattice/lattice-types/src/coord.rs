//! Integer lattice coordinates.

use nalgebra::Vector3;

/// Bits per component in [`LatticeCoord::pack`].
const PACK_BITS: u32 = 21;
const PACK_MASK: u64 = (1 << PACK_BITS) - 1;

const AXIS_OFFSETS: [LatticeCoord; 6] = [
    LatticeCoord::new(1, 0, 0),
    LatticeCoord::new(-1, 0, 0),
    LatticeCoord::new(0, 1, 0),
    LatticeCoord::new(0, -1, 0),
    LatticeCoord::new(0, 0, 1),
    LatticeCoord::new(0, 0, -1),
];

/// A discrete lattice site `(i, j, k)`.
///
/// Equality, ordering and hashing are exact integer operations, so the type
/// can key occupancy maps directly without any string or float formatting.
///
/// # Example
///
/// ```
/// use lattice_types::LatticeCoord;
///
/// let a = LatticeCoord::new(1, 2, 3);
/// let b = LatticeCoord::from([1, 2, 4]);
/// assert_eq!(a.manhattan_distance(b), 1);
/// assert_eq!(a + LatticeCoord::new(0, 0, 1), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeCoord {
    /// First lattice index.
    pub i: i32,
    /// Second lattice index.
    pub j: i32,
    /// Third lattice index.
    pub k: i32,
}

impl LatticeCoord {
    /// Creates a new lattice coordinate.
    #[must_use]
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// The lattice origin `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.i, self.j, self.k]
    }

    /// Converts to a floating-point vector in lattice space.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_types::LatticeCoord;
    /// use nalgebra::Vector3;
    ///
    /// assert_eq!(LatticeCoord::new(1, -2, 3).to_vector(), Vector3::new(1.0, -2.0, 3.0));
    /// ```
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.i), f64::from(self.j), f64::from(self.k))
    }

    /// The axis-aligned neighbors (Manhattan distance 1).
    ///
    /// Neighbors that would overflow `i32` are skipped, so a coordinate on
    /// the edge of the range has fewer than 6.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_types::LatticeCoord;
    ///
    /// assert_eq!(LatticeCoord::origin().axis_neighbors().count(), 6);
    /// assert_eq!(LatticeCoord::new(i32::MAX, 0, 0).axis_neighbors().count(), 5);
    /// ```
    pub fn axis_neighbors(self) -> impl Iterator<Item = Self> {
        AXIS_OFFSETS.into_iter().filter_map(move |offset| self.checked_add(offset))
    }

    /// Sum of absolute component differences.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_types::LatticeCoord;
    ///
    /// let a = LatticeCoord::new(0, 0, 0);
    /// assert_eq!(a.manhattan_distance(LatticeCoord::new(3, -4, 5)), 12);
    /// ```
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        let dk = self.k.abs_diff(other.k);
        di.saturating_add(dj).saturating_add(dk)
    }

    /// Largest absolute component difference.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        let dk = self.k.abs_diff(other.k);
        di.max(dj).max(dk)
    }

    /// Chebyshev norm of this coordinate treated as an offset.
    #[must_use]
    pub fn chebyshev_norm(self) -> u32 {
        self.chebyshev_distance(Self::origin())
    }

    /// Adds an offset, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.i.checked_add(other.i)?,
            self.j.checked_add(other.j)?,
            self.k.checked_add(other.k)?,
        ))
    }

    /// Subtracts an offset, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.i.checked_sub(other.i)?,
            self.j.checked_sub(other.j)?,
            self.k.checked_sub(other.k)?,
        ))
    }

    /// Packs the coordinate into a single `u64` key.
    ///
    /// Each component occupies 21 bits in two's complement, so the packing is
    /// lossless for components in `-1_048_576..=1_048_575`. Components outside
    /// that range are truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_types::LatticeCoord;
    ///
    /// let c = LatticeCoord::new(-7, 0, 12);
    /// assert_eq!(LatticeCoord::unpack(c.pack()), c);
    /// ```
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn pack(self) -> u64 {
        ((self.i as u64 & PACK_MASK) << (2 * PACK_BITS))
            | ((self.j as u64 & PACK_MASK) << PACK_BITS)
            | (self.k as u64 & PACK_MASK)
    }

    /// Inverse of [`pack`](Self::pack).
    #[must_use]
    pub const fn unpack(key: u64) -> Self {
        Self::new(
            sign_extend((key >> (2 * PACK_BITS)) & PACK_MASK),
            sign_extend((key >> PACK_BITS) & PACK_MASK),
            sign_extend(key & PACK_MASK),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn sign_extend(field: u64) -> i32 {
    let shift = 64 - PACK_BITS;
    (((field << shift) as i64) >> shift) as i32
}

impl std::fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

impl From<(i32, i32, i32)> for LatticeCoord {
    fn from((i, j, k): (i32, i32, i32)) -> Self {
        Self::new(i, j, k)
    }
}

impl From<[i32; 3]> for LatticeCoord {
    fn from([i, j, k]: [i32; 3]) -> Self {
        Self::new(i, j, k)
    }
}

impl From<LatticeCoord> for [i32; 3] {
    fn from(coord: LatticeCoord) -> Self {
        coord.as_array()
    }
}

impl std::ops::Add for LatticeCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.i.wrapping_add(other.i),
            self.j.wrapping_add(other.j),
            self.k.wrapping_add(other.k),
        )
    }
}

impl std::ops::Sub for LatticeCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.i.wrapping_sub(other.i),
            self.j.wrapping_sub(other.j),
            self.k.wrapping_sub(other.k),
        )
    }
}

impl std::ops::Neg for LatticeCoord {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(
            self.i.wrapping_neg(),
            self.j.wrapping_neg(),
            self.k.wrapping_neg(),
        )
    }
}
