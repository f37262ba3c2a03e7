use crate::bounds::Region;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A region tagged with an upper bound on how many emitters can reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundedRegion {
    region: Region,
    bound: usize,
    origin_distance: i64,
}

impl BoundedRegion {
    pub fn new(region: Region, bound: usize) -> Self {
        Self {
            region,
            bound,
            origin_distance: region.distance_to_origin(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Cached `region.distance_to_origin()`, the secondary ordering key.
    pub fn origin_distance(&self) -> i64 {
        self.origin_distance
    }
}

impl Ord for BoundedRegion {
    /// Greater means explored sooner: higher bound first, then nearer to the origin,
    /// then lower corners first so that equal keys still pop in a fixed order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.bound
            .cmp(&other.bound)
            .then_with(|| other.origin_distance.cmp(&self.origin_distance))
            .then_with(|| other.region.min.cmp(&self.region.min))
            .then_with(|| other.region.max.cmp(&self.region.max))
    }
}

impl PartialOrd for BoundedRegion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-priority queue of regions awaiting exploration.
#[derive(Debug, Default)]
pub struct RegionQueue {
    heap: BinaryHeap<BoundedRegion>,
}

impl RegionQueue {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new() }
    }

    pub fn push(&mut self, region: Region, bound: usize) {
        self.heap.push(BoundedRegion::new(region, bound));
    }

    /// Removes the most promising region, or `None` once the frontier is exhausted.
    pub fn pop(&mut self) -> Option<BoundedRegion> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
