use crate::bounds::Region;
use crate::input::COORDINATE_LIMIT;
use crate::point::{Point3, manhattan};
use rand::Rng;

/// A signal source reaching every lattice point within `radius` Manhattan distance of `center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Emitter {
    pub center: Point3,
    pub radius: i64,
}

impl Emitter {
    pub fn new(center: Point3, radius: i64) -> Self {
        debug_assert!(radius >= 0, "emitter radius must be non-negative, got {}", radius);
        Self { center, radius }
    }

    /// Builds an emitter only if its radius is non-negative and every value stays within
    /// [`COORDINATE_LIMIT`].
    pub fn checked(center: Point3, radius: i64) -> Option<Self> {
        let within = |v: i64| v.unsigned_abs() <= COORDINATE_LIMIT as u64;
        let valid = radius >= 0
            && within(radius)
            && within(center.x)
            && within(center.y)
            && within(center.z);
        valid.then(|| Self::new(center, radius))
    }

    /// Whether `p` is within range of this emitter.
    pub fn in_range(&self, p: Point3) -> bool {
        manhattan(self.center, p) <= self.radius
    }

    /// Whether any point of `region` is within range of this emitter.
    ///
    /// Exact for axis-aligned boxes: the nearest point of the box to the center is found
    /// by clamping, and the emitter reaches the box iff it reaches that point.
    pub fn intersects(&self, region: &Region) -> bool {
        self.in_range(region.closest_point(self.center))
    }

    /// The axis-aligned box circumscribing the emitter's range.
    pub fn reach(&self) -> Region {
        let c = self.center;
        let r = self.radius;
        Region::new(
            Point3::new(c.x.saturating_sub(r), c.y.saturating_sub(r), c.z.saturating_sub(r)),
            Point3::new(c.x.saturating_add(r), c.y.saturating_add(r), c.z.saturating_add(r)),
        )
    }
}

/// Number of emitters whose range reaches into `region`.
pub fn coverage(emitters: &[Emitter], region: &Region) -> usize {
    emitters.iter().filter(|e| e.intersects(region)).count()
}

/// Generates `count` emitters with centers uniform in `[-extent, extent]^3`
/// and radii uniform in `[0, max_radius]`.
///
/// `extent` and `max_radius` are clamped to [`COORDINATE_LIMIT`].
pub fn random_emitters<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    extent: i64,
    max_radius: i64,
) -> Vec<Emitter> {
    let extent = extent.unsigned_abs().min(COORDINATE_LIMIT as u64) as i64;
    let max_radius = max_radius.clamp(0, COORDINATE_LIMIT);
    (0..count)
        .map(|_| {
            let center = Point3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            );
            Emitter::new(center, rng.gen_range(0..=max_radius))
        })
        .collect()
}
