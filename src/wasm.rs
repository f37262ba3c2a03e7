use crate::emitter::{Emitter, random_emitters};
use crate::input::{COORDINATE_LIMIT, load_emitters};
use crate::point::Point3;
use crate::search::{BestPoint, OctreeSearch};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// Converts a JS number to a lattice coordinate. Rejects fractions, NaN, infinities and
/// magnitudes beyond `COORDINATE_LIMIT`.
fn coordinate(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > COORDINATE_LIMIT as f64 {
        return None;
    }
    Some(value as i64)
}

fn emitter_from_js(x: f64, y: f64, z: f64, radius: f64) -> Option<Emitter> {
    let center = Point3::new(coordinate(x)?, coordinate(y)?, coordinate(z)?);
    Emitter::checked(center, coordinate(radius)?)
}

/// A set of emitters that can be searched from JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct Emitters3D {
    inner: Vec<Emitter>,
}

#[wasm_bindgen]
impl Emitters3D {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Emitters3D {
        Emitters3D::default()
    }

    /// Parses `pos=<X,Y,Z>, r=R` records, one per line.
    pub fn parse(text: &str) -> Result<Emitters3D, JsError> {
        let inner = load_emitters(text.as_bytes())?;
        Ok(Emitters3D { inner })
    }

    /// Random emitters with centers in `[-extent, extent]^3` and radii up to `max_radius`.
    ///
    /// Both are clamped to the supported coordinate magnitude; NaN counts as zero.
    pub fn random(count: usize, extent: f64, max_radius: f64) -> Emitters3D {
        let limit = COORDINATE_LIMIT as f64;
        let extent = if extent.is_nan() { 0.0 } else { extent.abs().min(limit) };
        let max_radius = if max_radius.is_nan() { 0.0 } else { max_radius.clamp(0.0, limit) };
        let mut rng = rand::thread_rng();
        Emitters3D {
            inner: random_emitters(&mut rng, count, extent as i64, max_radius as i64),
        }
    }

    /// Adds an emitter; fails for non-integer values, negative radii, or magnitudes beyond
    /// the supported coordinate range.
    pub fn add(&mut self, x: f64, y: f64, z: f64, radius: f64) -> Result<(), JsError> {
        let emitter = emitter_from_js(x, y, z, radius).ok_or_else(|| {
            JsError::new(&format!(
                "invalid emitter pos=<{},{},{}>, r={}: expected integers within {}",
                x, y, z, radius, COORDINATE_LIMIT
            ))
        })?;
        self.inner.push(emitter);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    /// Runs the search; `undefined` when there are no emitters.
    pub fn solve(&self) -> Option<BestPoint3D> {
        OctreeSearch::new(&self.inner).run().best.map(BestPoint3D::from)
    }
}

/// WASM view of the best point found.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BestPoint3D {
    inner: BestPoint,
}

#[wasm_bindgen]
impl BestPoint3D {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.point.x as f64
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.point.y as f64
    }

    #[wasm_bindgen(getter)]
    pub fn z(&self) -> f64 {
        self.inner.point.z as f64
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.count
    }

    #[wasm_bindgen(getter)]
    pub fn distance(&self) -> f64 {
        self.inner.distance() as f64
    }
}

impl From<BestPoint> for BestPoint3D {
    fn from(inner: BestPoint) -> Self {
        Self { inner }
    }
}
