use crate::emitter::Emitter;
use crate::point::{ORIGIN, Point3, clamp, manhattan};

/// Axis-aligned box on the integer lattice, inclusive on both corners.
///
/// Invariant: `min <= max` on every axis. A region with `min == max` holds a single point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub min: Point3,
    pub max: Point3,
}

impl Region {
    /// The fixed `[i32::MIN, i32::MAX]` cube on every axis.
    pub const FULL_I32: Region = Region {
        min: Point3::new(i32::MIN as i64, i32::MIN as i64, i32::MIN as i64),
        max: Point3::new(i32::MAX as i64, i32::MAX as i64, i32::MAX as i64),
    };

    pub fn new(min: Point3, max: Point3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "region min must be <= max on all axes: {:?} {:?}",
            min,
            max
        );
        Self { min, max }
    }

    /// A region holding exactly one point.
    pub fn point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest region containing the range of every emitter.
    ///
    /// Returns `None` for an empty slice. Corner arithmetic saturates at the `i64` limits.
    pub fn enclosing(emitters: &[Emitter]) -> Option<Self> {
        let (first, rest) = emitters.split_first()?;
        Some(rest.iter().fold(first.reach(), |region, e| region.union(&e.reach())))
    }

    /// Smallest region containing both `self` and `other`.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Whether `other` lies entirely inside this region.
    pub fn encloses(&self, other: &Region) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Number of lattice points along each axis.
    pub fn extent(&self) -> [u128; 3] {
        [
            (self.max.x as i128 - self.min.x as i128 + 1) as u128,
            (self.max.y as i128 - self.min.y as i128 + 1) as u128,
            (self.max.z as i128 - self.min.z as i128 + 1) as u128,
        ]
    }

    /// Total number of lattice points in the region.
    pub fn point_count(&self) -> u128 {
        let [nx, ny, nz] = self.extent();
        nx.saturating_mul(ny).saturating_mul(nz)
    }

    /// The point of this region nearest to `p`, found by clamping each coordinate.
    pub fn closest_point(&self, p: Point3) -> Point3 {
        Point3::new(
            clamp(p.x, self.min.x, self.max.x),
            clamp(p.y, self.min.y, self.max.y),
            clamp(p.z, self.min.z, self.max.z),
        )
    }

    /// Exact Manhattan distance from `p` to the nearest point of the region.
    pub fn distance_to(&self, p: Point3) -> i64 {
        manhattan(p, self.closest_point(p))
    }

    /// Lower bound on the distance to the origin of any point in the region.
    pub fn distance_to_origin(&self) -> i64 {
        self.distance_to(ORIGIN)
    }

    /// Splits the region into disjoint octants.
    ///
    /// Each axis with more than one value is cut into `[min, mid]` and `[mid + 1, max]`
    /// with `mid` rounded toward negative infinity. Axes holding a single value are left
    /// whole, so a region that is flat along some axes yields 2 or 4 children instead of 8.
    /// The children cover the parent exactly and each is strictly smaller than it.
    pub fn octants(&self) -> Vec<Region> {
        let (xs, nx) = halves(self.min.x, self.max.x);
        let (ys, ny) = halves(self.min.y, self.max.y);
        let (zs, nz) = halves(self.min.z, self.max.z);

        let mut children = Vec::with_capacity(nx * ny * nz);
        for &(min_z, max_z) in &zs[..nz] {
            for &(min_y, max_y) in &ys[..ny] {
                for &(min_x, max_x) in &xs[..nx] {
                    children.push(Region::new(
                        Point3::new(min_x, min_y, min_z),
                        Point3::new(max_x, max_y, max_z),
                    ));
                }
            }
        }
        children
    }
}

fn halves(lo: i64, hi: i64) -> ([(i64, i64); 2], usize) {
    if lo == hi {
        return ([(lo, hi), (lo, hi)], 1);
    }
    // i128 keeps the sum exact at the i64 limits.
    let mid = (lo as i128 + hi as i128).div_euclid(2) as i64;
    ([(lo, mid), (mid + 1, hi)], 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octants_cover_parent() {
        let region = Region::new(Point3::new(-3, 0, 5), Point3::new(4, 1, 9));
        let children = region.octants();
        assert_eq!(children.len(), 8);

        let total: u128 = children.iter().map(|c| c.point_count()).sum();
        assert_eq!(total, region.point_count());

        for x in -3..=4 {
            for y in 0..=1 {
                for z in 5..=9 {
                    let p = Point3::new(x, y, z);
                    let holders = children.iter().filter(|c| c.contains(p)).count();
                    assert_eq!(holders, 1, "point {:?} covered {} times", p, holders);
                }
            }
        }
    }

    #[test]
    fn test_octants_floor_midpoint() {
        let region = Region::new(Point3::new(-3, -3, -3), Point3::new(-2, -2, -2));
        let children = region.octants();
        assert_eq!(children.len(), 8);
        assert!(children.iter().all(|c| c.is_point()));
        assert_eq!(children[0].min, Point3::new(-3, -3, -3));
        assert_eq!(children[7].max, Point3::new(-2, -2, -2));
    }

    #[test]
    fn test_octants_flat_axes() {
        let region = Region::new(Point3::new(0, 7, 7), Point3::new(1, 7, 7));
        let children = region.octants();
        assert_eq!(children, vec![
            Region::point(Point3::new(0, 7, 7)),
            Region::point(Point3::new(1, 7, 7)),
        ]);
    }

    #[test]
    fn test_octants_full_universe() {
        let children = Region::FULL_I32.octants();
        assert_eq!(children.len(), 8);
        assert_eq!(children[0].max, Point3::new(-1, -1, -1));
        assert_eq!(children[7].min, Point3::new(0, 0, 0));
    }

    #[test]
    fn test_distance_to_origin() {
        let straddling = Region::new(Point3::new(-5, -5, -5), Point3::new(5, 5, 5));
        assert_eq!(straddling.distance_to_origin(), 0);

        let positive = Region::new(Point3::new(1, 2, 3), Point3::new(10, 10, 10));
        assert_eq!(positive.distance_to_origin(), 6);

        let negative = Region::new(Point3::new(-10, -10, -10), Point3::new(-1, -2, -3));
        assert_eq!(negative.distance_to_origin(), 6);
    }

    #[test]
    fn test_enclosing() {
        let emitters = [
            Emitter::new(Point3::new(0, 0, 0), 4),
            Emitter::new(Point3::new(10, -2, 1), 5),
        ];
        let region = Region::enclosing(&emitters).unwrap();
        assert_eq!(region.min, Point3::new(-4, -7, -4));
        assert_eq!(region.max, Point3::new(15, 4, 6));
        assert!(Region::enclosing(&[]).is_none());
    }

    #[test]
    fn test_union() {
        let a = Region::new(Point3::new(0, 0, 0), Point3::new(2, 2, 2));
        let b = Region::new(Point3::new(-1, 1, 5), Point3::new(1, 3, 6));
        let u = a.union(&b);
        assert_eq!(u, Region::new(Point3::new(-1, 0, 0), Point3::new(2, 3, 6)));
        assert!(u.encloses(&a) && u.encloses(&b));
        assert_eq!(Region::FULL_I32.union(&a), Region::FULL_I32);
    }
}
