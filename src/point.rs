/// A point on the 3D integer lattice.
///
/// Coordinates are `i64` so that Manhattan distances between points anywhere in the
/// 32-bit coordinate range, and sums of three such differences, never overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// The origin, against which the final answer is measured.
pub const ORIGIN: Point3 = Point3 { x: 0, y: 0, z: 0 };

impl Point3 {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance from this point to the origin.
    pub fn distance_to_origin(&self) -> i64 {
        manhattan(*self, ORIGIN)
    }
}

impl From<[i64; 3]> for Point3 {
    fn from(p: [i64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<Point3> for [i64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Sum of absolute coordinate differences.
pub fn manhattan(a: Point3, b: Point3) -> i64 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}

/// Bounds `value` to `[lo, hi]`. Requires `lo <= hi`.
pub fn clamp(value: i64, lo: i64, hi: i64) -> i64 {
    debug_assert!(lo <= hi, "clamp bounds out of order: {} > {}", lo, hi);
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
