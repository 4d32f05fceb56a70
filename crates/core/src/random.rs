//! Injectable randomness for the generators.
//!
//! Generators never touch a global rng. They read uniform draws in `[0, 1)` through
//! [`Draws`], which keeps every topic reproducible from a seed or from a fixed script.

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

//
// ─── SOURCES ───────────────────────────────────────────────────────────────────
//

/// Seedable ChaCha-backed source used by live sessions.
#[derive(Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

impl fmt::Debug for ChaChaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaChaSource").finish_non_exhaustive()
    }
}

/// Replays a fixed list of draws, then repeats `fallback` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: 0.0,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of scripted draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

//
// ─── DRAWS ─────────────────────────────────────────────────────────────────────
//

/// Helpers shared by every generator, bound to one source and one retry budget.
pub struct Draws<'a> {
    source: &'a mut dyn RandomSource,
    max_attempts: u32,
}

impl<'a> Draws<'a> {
    pub fn new(source: &'a mut dyn RandomSource, max_attempts: u32) -> Self {
        Self {
            source,
            max_attempts: max_attempts.max(1),
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Next draw, folded into `[0, 1)` whatever the source returned.
    pub fn unit(&mut self) -> f64 {
        let u = self.source.next_unit();
        if u.is_nan() {
            0.0
        } else if (0.0..1.0).contains(&u) {
            u
        } else {
            u.rem_euclid(1.0)
        }
    }

    /// Uniform integer in `lo..=hi`, computed as `lo + floor(u * (hi - lo + 1))`.
    pub fn int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        let offset = (self.unit() * span).floor() as i64;
        lo + offset.min(hi - lo)
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let i = (self.unit() * len as f64).floor() as usize;
        i.min(len - 1)
    }

    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn pick<'t, T>(&mut self, items: &'t [T]) -> &'t T {
        let i = self.index(items.len());
        &items[i]
    }

    pub fn pick_copy<T: Copy>(&mut self, items: &[T]) -> T {
        *self.pick(items)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// True when the draw is above one half.
    pub fn coin(&mut self) -> bool {
        self.unit() > 0.5
    }

    /// `-1` or `1`.
    pub fn sign(&mut self) -> i64 {
        if self.coin() { -1 } else { 1 }
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// `count` distinct indices below `len`, in draw order.
    pub fn distinct_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let mut chosen = Vec::with_capacity(count.min(len));
        while chosen.len() < count && !pool.is_empty() {
            let i = self.index(pool.len());
            chosen.push(pool.remove(i));
        }
        chosen
    }

    /// Runs `draw` until it produces a value or the retry budget is spent.
    ///
    /// On exhaustion the `fallback` value is used, which must satisfy whatever
    /// constraint `draw` was searching for.
    pub fn retry<T>(
        &mut self,
        what: &'static str,
        mut draw: impl FnMut(&mut Self) -> Option<T>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        for _ in 0..self.max_attempts {
            if let Some(value) = draw(self) {
                return value;
            }
        }
        tracing::warn!(
            constraint = what,
            attempts = self.max_attempts,
            "retry budget exhausted, using fallback"
        );
        fallback()
    }
}

impl fmt::Debug for Draws<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draws")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
