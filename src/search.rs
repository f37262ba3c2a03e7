use crate::bounds::Region;
use crate::emitter::{Emitter, coverage};
use crate::frontier::RegionQueue;
use crate::point::Point3;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Emitter count from which child bounds are computed on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// The region the search starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Universe {
    /// Tight box around the range of every emitter. Always contains the optimum.
    #[default]
    FromEmitters,
    /// `[i32::MIN, i32::MAX]` on every axis, widened to the range of any emitter outside it.
    Full32,
    /// A caller-chosen region; the answer is the best point inside it.
    Fixed(Region),
}

impl Universe {
    /// The concrete starting region, or `None` when there is nothing to enclose.
    pub fn resolve(&self, emitters: &[Emitter]) -> Option<Region> {
        match self {
            Universe::FromEmitters => Region::enclosing(emitters),
            Universe::Full32 => Some(match Region::enclosing(emitters) {
                Some(reach) => Region::FULL_I32.union(&reach),
                None => Region::FULL_I32,
            }),
            Universe::Fixed(region) => Some(*region),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub universe: Universe,
    /// Minimum number of emitters before bounds of sibling octants are computed in parallel.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            universe: Universe::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// A lattice point together with the number of emitters in range of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestPoint {
    pub point: Point3,
    pub count: usize,
}

impl BestPoint {
    /// Manhattan distance from the origin to the point.
    pub fn distance(&self) -> i64 {
        self.point.distance_to_origin()
    }
}

/// Counters describing how much of the octree was visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub popped: usize,
    pub pushed: usize,
    /// Children discarded because no emitter reaches them.
    pub pruned: usize,
    pub subdivisions: usize,
    pub max_frontier: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: Option<BestPoint>,
    pub stats: SearchStats,
}

/// Best-first branch-and-bound search over an implicit octree.
///
/// Regions are explored in order of their coverage bound, so the first single-point
/// region that comes off the frontier with no better bound remaining is optimal. Among
/// equally covered points the one nearest the origin is found first, since the frontier
/// breaks bound ties by a lower bound on distance to the origin.
pub struct OctreeSearch<'a> {
    emitters: &'a [Emitter],
    config: SearchConfig,
}

impl<'a> OctreeSearch<'a> {
    pub fn new(emitters: &'a [Emitter]) -> Self {
        Self::with_config(emitters, SearchConfig::default())
    }

    pub fn with_config(emitters: &'a [Emitter], config: SearchConfig) -> Self {
        Self { emitters, config }
    }

    pub fn run(&self) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let mut best: Option<BestPoint> = None;

        let universe = match self.config.universe.resolve(self.emitters) {
            Some(universe) if !self.emitters.is_empty() => universe,
            _ => {
                debug!("no emitters, skipping octree search");
                return SearchOutcome { best, stats };
            }
        };

        debug!(
            emitters = self.emitters.len(),
            ?universe,
            parallel = self.is_parallel(),
            "starting octree search"
        );

        let mut queue = RegionQueue::new();
        let initial = coverage(self.emitters, &universe);
        if initial > 0 {
            queue.push(universe, initial);
            stats.pushed += 1;
        }

        while let Some(item) = queue.pop() {
            stats.popped += 1;

            // Bounds never grow on subdivision and only a strictly higher count replaces
            // the answer, so nothing left in the frontier can change it.
            if let Some(current) = &best {
                if item.bound() <= current.count {
                    break;
                }
            }

            let region = item.region();
            if region.is_point() {
                let candidate = BestPoint {
                    point: region.min,
                    count: item.bound(),
                };
                trace!(
                    count = candidate.count,
                    distance = candidate.distance(),
                    point = ?candidate.point,
                    "improved best point"
                );
                best = Some(candidate);
                continue;
            }

            stats.subdivisions += 1;
            let children = region.octants();
            let bounds = self.child_bounds(&children);
            for (child, bound) in children.into_iter().zip(bounds) {
                if bound == 0 {
                    stats.pruned += 1;
                    continue;
                }
                queue.push(child, bound);
                stats.pushed += 1;
            }
            stats.max_frontier = stats.max_frontier.max(queue.len());
        }

        debug!(
            popped = stats.popped,
            pushed = stats.pushed,
            pruned = stats.pruned,
            subdivisions = stats.subdivisions,
            max_frontier = stats.max_frontier,
            found = best.is_some(),
            "octree search finished"
        );

        SearchOutcome { best, stats }
    }

    fn is_parallel(&self) -> bool {
        self.emitters.len() >= self.config.parallel_threshold
    }

    /// Coverage bound of every child, fully computed before any of them is queued.
    fn child_bounds(&self, children: &[Region]) -> Vec<usize> {
        let emitters = self.emitters;
        if self.is_parallel() {
            children.par_iter().map(|child| coverage(emitters, child)).collect()
        } else {
            children.iter().map(|child| coverage(emitters, child)).collect()
        }
    }
}

/// Runs the search with the default configuration.
///
/// Returns `None` when no emitters are given.
pub fn find_best_point(emitters: &[Emitter]) -> Option<BestPoint> {
    OctreeSearch::new(emitters).run().best
}

/// Exhaustive scan of every lattice point in `region`.
///
/// Uses the same preference as the octree search: most emitters in range, then nearest
/// to the origin, then the lowest point in `(x, y, z)` order. Returns `None` when no point
/// of the region is in range of any emitter. Only practical for small regions.
pub fn brute_force_best(emitters: &[Emitter], region: Region) -> Option<BestPoint> {
    let mut best: Option<BestPoint> = None;
    for x in region.min.x..=region.max.x {
        for y in region.min.y..=region.max.y {
            for z in region.min.z..=region.max.z {
                let point = Point3::new(x, y, z);
                let count = emitters.iter().filter(|e| e.in_range(point)).count();
                if count == 0 {
                    continue;
                }
                let candidate = BestPoint { point, count };
                let better = match &best {
                    None => true,
                    Some(current) => {
                        (count, -candidate.distance()) > (current.count, -current.distance())
                    }
                };
                if better {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_resolve() {
        let emitters = [Emitter::new(Point3::new(1, 2, 3), 1)];
        assert_eq!(
            Universe::FromEmitters.resolve(&emitters),
            Some(Region::new(Point3::new(0, 1, 2), Point3::new(2, 3, 4)))
        );
        assert_eq!(Universe::Full32.resolve(&[]), Some(Region::FULL_I32));
        assert_eq!(Universe::FromEmitters.resolve(&[]), None);

        let far = [Emitter::new(Point3::new(5_000_000_000, 0, 0), 2)];
        let widened = Universe::Full32.resolve(&far).unwrap();
        assert_eq!(widened.min, Region::FULL_I32.min);
        assert_eq!(widened.max, Point3::new(5_000_000_002, i32::MAX as i64, i32::MAX as i64));
    }

    #[test]
    fn test_single_point_universe() {
        let emitters = [Emitter::new(Point3::new(3, 3, 3), 0)];
        let outcome = OctreeSearch::new(&emitters).run();
        assert_eq!(outcome.best, Some(BestPoint { point: Point3::new(3, 3, 3), count: 1 }));
        assert_eq!(outcome.stats.subdivisions, 0);
    }

    #[test]
    fn test_fixed_universe_out_of_reach() {
        let emitters = [Emitter::new(Point3::new(0, 0, 0), 2)];
        let far = Region::new(Point3::new(10, 10, 10), Point3::new(20, 20, 20));
        let config = SearchConfig { universe: Universe::Fixed(far), ..SearchConfig::default() };
        let outcome = OctreeSearch::with_config(&emitters, config).run();
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.stats.pushed, 0);
    }
}
