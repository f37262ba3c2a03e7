//! # signalpoint
//!
//! `signalpoint` finds the point of the 3D integer lattice that is in range of the most
//! emitters, where every emitter reaches all points within a Manhattan radius of its center.
//! Among all maximally covered points it returns the one nearest to the origin.
//!
//! ## Approach
//!
//! The coordinate space spans billions of points per axis, so it is never enumerated. Instead
//! a best-first branch-and-bound search walks an implicit octree:
//!
//! - **Bounds**: every region carries the number of emitters whose range reaches into it, an
//!   upper bound on the coverage of any point inside.
//! - **Frontier**: regions are explored highest bound first, nearest to the origin on ties.
//! - **Subdivision**: a popped region is split into octants whose bounds are recomputed;
//!   octants no emitter reaches are dropped.
//!
//! The first single-point region popped with no better bound remaining is the answer.
//!
//! ## Main Interface
//!
//! [`find_best_point`] for a one-shot search, or [`OctreeSearch`] with a [`SearchConfig`]
//! for control over the starting region and parallelism. Emitters are read with
//! [`load_emitters`].

mod bounds;
mod emitter;
mod error;
mod frontier;
mod input;
mod point;
mod search;
pub mod wasm;

pub use bounds::Region;
pub use emitter::{Emitter, coverage, random_emitters};
pub use error::ParseError;
pub use frontier::{BoundedRegion, RegionQueue};
pub use input::{COORDINATE_LIMIT, load_emitters, load_emitters_from_path, parse_emitter};
pub use point::{ORIGIN, Point3, clamp, manhattan};
pub use search::{
    BestPoint, DEFAULT_PARALLEL_THRESHOLD, OctreeSearch, SearchConfig, SearchOutcome, SearchStats,
    Universe, brute_force_best, find_best_point,
};
