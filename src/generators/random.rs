//! Random Sources
//!
//! Randomness is the only effect the validation engine has, so it is
//! injected: every generator holds a [`RandomSource`] and tests swap in a
//! constant or a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A shareable handle producing numbers in `[0, 1)`.
#[derive(Clone)]
pub struct RandomSource {
    draw: Arc<dyn Fn() -> f64 + Send + Sync>,
    kind: &'static str,
}

impl RandomSource {
    /// Wraps an arbitrary closure.
    pub fn from_fn(f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self {
            draw: Arc::new(f),
            kind: "custom",
        }
    }

    /// The thread-local RNG. This is the default.
    pub fn thread_rng() -> Self {
        Self {
            draw: Arc::new(|| rand::thread_rng().gen::<f64>()),
            kind: "thread_rng",
        }
    }

    /// A reproducible source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        let rng = Mutex::new(StdRng::seed_from_u64(seed));
        Self {
            draw: Arc::new(move || {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                rng.gen::<f64>()
            }),
            kind: "seeded",
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            draw: Arc::new(move || value),
            kind: "constant",
        }
    }

    /// Cycles through `values` in order. An empty list yields zeros.
    pub fn sequence(values: Vec<f64>) -> Self {
        let cursor = AtomicUsize::new(0);
        Self {
            draw: Arc::new(move || {
                if values.is_empty() {
                    return 0.0;
                }
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                values[i % values.len()]
            }),
            kind: "sequence",
        }
    }

    pub fn next(&self) -> f64 {
        (self.draw)()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::thread_rng()
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").field("kind", &self.kind).finish()
    }
}
