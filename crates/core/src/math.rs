//! Transcendental math behind a swappable kernel.
//!
//! Pattern functions and the pointer modulator never call `f64::sin` and
//! friends directly; they go through a [`MathKernel`]. Two kernels exist:
//!
//! - [`DirectMath`] evaluates every call exactly.
//! - [`CachedMath`] rounds each input to a fixed grain (3 decimals for trig,
//!   atan2 and distance, 2 decimals for `exp`) and memoizes the function
//!   evaluated at the rounded input. A hit and a miss for the same key return
//!   the same value, so output never depends on cache state.
//!
//! The cache is bounded. Each function keeps two generations of entries: new
//! entries go into the hot map; when it reaches capacity the cold map is
//! dropped and the hot map takes its place. Hits in the cold generation are
//! promoted. At most `2 * capacity` entries live per function.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Rounding grain for sine, cosine, atan2 and distance keys (3 decimals).
const TRIG_SCALE: f64 = 1000.0;
/// Rounding grain for exponential keys (2 decimals).
const EXP_SCALE: f64 = 100.0;

/// Default number of hot entries per cached function.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// The transcendental operations the pattern engine needs.
///
/// Methods take `&mut self` so implementations may memoize.
pub trait MathKernel {
    fn sin(&mut self, x: f64) -> f64;
    fn cos(&mut self, x: f64) -> f64;
    fn atan2(&mut self, y: f64, x: f64) -> f64;
    fn exp(&mut self, x: f64) -> f64;
    /// Euclidean length of `(x, y)`.
    fn distance(&mut self, x: f64, y: f64) -> f64;
}

/// Uncached kernel: every call evaluates the std function.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMath;

impl MathKernel for DirectMath {
    fn sin(&mut self, x: f64) -> f64 {
        x.sin()
    }

    fn cos(&mut self, x: f64) -> f64 {
        x.cos()
    }

    fn atan2(&mut self, y: f64, x: f64) -> f64 {
        y.atan2(x)
    }

    fn exp(&mut self, x: f64) -> f64 {
        x.exp()
    }

    fn distance(&mut self, x: f64, y: f64) -> f64 {
        x.hypot(y)
    }
}

/// Hit/miss counters for a [`CachedMath`] kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped when a cold generation was discarded.
    pub evictions: u64,
    /// Entries currently held across all functions and generations.
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, or 0 before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Two-generation bounded map from a quantized key to a computed value.
#[derive(Debug, Clone)]
struct Generations<K> {
    hot: HashMap<K, f64>,
    cold: HashMap<K, f64>,
    capacity: usize,
}

impl<K: Eq + Hash + Copy> Generations<K> {
    fn new(capacity: usize) -> Self {
        Self {
            hot: HashMap::new(),
            cold: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    fn get_or_compute(&mut self, key: K, counters: &mut Counters, f: impl FnOnce() -> f64) -> f64 {
        if let Some(&v) = self.hot.get(&key) {
            counters.hits += 1;
            return v;
        }
        let value = match self.cold.remove(&key) {
            Some(v) => {
                counters.hits += 1;
                v
            }
            None => {
                counters.misses += 1;
                f()
            }
        };
        if self.hot.len() >= self.capacity {
            counters.evictions += self.cold.len() as u64;
            self.cold = std::mem::take(&mut self.hot);
            tracing::trace!(capacity = self.capacity, "rotated cache generation");
        }
        self.hot.insert(key, value);
        value
    }

    fn len(&self) -> usize {
        self.hot.len() + self.cold.len()
    }

    fn clear(&mut self) {
        self.hot.clear();
        self.cold.clear();
    }
}

fn quantize(x: f64, scale: f64) -> i64 {
    (x * scale).round() as i64
}

fn dequantize(key: i64, scale: f64) -> f64 {
    key as f64 / scale
}

/// Memoizing kernel with bounded memory.
#[derive(Debug, Clone)]
pub struct CachedMath {
    sin: Generations<i64>,
    cos: Generations<i64>,
    atan2: Generations<(i64, i64)>,
    exp: Generations<i64>,
    distance: Generations<(i64, i64)>,
    counters: Counters,
}

impl Default for CachedMath {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl CachedMath {
    /// Creates a kernel holding at most `2 * capacity` entries per function.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sin: Generations::new(capacity),
            cos: Generations::new(capacity),
            atan2: Generations::new(capacity),
            exp: Generations::new(capacity),
            distance: Generations::new(capacity),
            counters: Counters::default(),
        }
    }

    /// Hot-generation capacity per function.
    pub fn capacity(&self) -> usize {
        self.sin.capacity
    }

    /// Current counters and entry count.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            entries: self.sin.len()
                + self.cos.len()
                + self.atan2.len()
                + self.exp.len()
                + self.distance.len(),
        }
    }

    /// Drops every cached entry and resets the counters.
    pub fn clear(&mut self) {
        self.sin.clear();
        self.cos.clear();
        self.atan2.clear();
        self.exp.clear();
        self.distance.clear();
        self.counters = Counters::default();
    }
}

impl MathKernel for CachedMath {
    fn sin(&mut self, x: f64) -> f64 {
        let key = quantize(x, TRIG_SCALE);
        self.sin
            .get_or_compute(key, &mut self.counters, || dequantize(key, TRIG_SCALE).sin())
    }

    fn cos(&mut self, x: f64) -> f64 {
        let key = quantize(x, TRIG_SCALE);
        self.cos
            .get_or_compute(key, &mut self.counters, || dequantize(key, TRIG_SCALE).cos())
    }

    fn atan2(&mut self, y: f64, x: f64) -> f64 {
        let key = (quantize(y, TRIG_SCALE), quantize(x, TRIG_SCALE));
        self.atan2.get_or_compute(key, &mut self.counters, || {
            dequantize(key.0, TRIG_SCALE).atan2(dequantize(key.1, TRIG_SCALE))
        })
    }

    fn exp(&mut self, x: f64) -> f64 {
        let key = quantize(x, EXP_SCALE);
        self.exp
            .get_or_compute(key, &mut self.counters, || dequantize(key, EXP_SCALE).exp())
    }

    fn distance(&mut self, x: f64, y: f64) -> f64 {
        let key = (quantize(x, TRIG_SCALE), quantize(y, TRIG_SCALE));
        self.distance.get_or_compute(key, &mut self.counters, || {
            dequantize(key.0, TRIG_SCALE).hypot(dequantize(key.1, TRIG_SCALE))
        })
    }
}
