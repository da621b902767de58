//! Random decision source
//!
//! The resolver never touches a global RNG. Every random decision goes
//! through a [`RandomSource`] so that a combat can be replayed exactly:
//! [`SeededRand`] for play, [`ScriptedRand`] for tests that pin down the
//! draw order.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Whether the upper bound of an integer range is included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// `[low, high]`
    Closed,
    /// `[low, high)`
    HalfOpen,
}

/// The three primitives the combat engine draws from
pub trait RandomSource {
    /// True with probability `p`; `p` is already clamped to `[0, 1]`
    fn bernoulli(&mut self, p: f64) -> bool;

    fn between_ints(&mut self, low: i32, high: i32, interval: Interval) -> i32;

    /// Uniform in `[low, high)`
    fn between_doubles(&mut self, low: f64, high: f64) -> f64;
}

/// Clamp a probability before handing it to a random source
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

/// Production source backed by a seeded ChaCha8 stream
#[derive(Debug, Clone)]
pub struct SeededRand {
    rng: ChaCha8Rng,
}

impl SeededRand {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl RandomSource for SeededRand {
    fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.gen_bool(clamp_probability(p))
    }

    fn between_ints(&mut self, low: i32, high: i32, interval: Interval) -> i32 {
        match interval {
            Interval::Closed if low <= high => self.rng.gen_range(low..=high),
            Interval::HalfOpen if low < high => self.rng.gen_range(low..high),
            // Degenerate range
            _ => low,
        }
    }

    fn between_doubles(&mut self, low: f64, high: f64) -> f64 {
        if low < high {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }
}

/// One expected draw and the value to answer it with
#[derive(Debug, Clone, PartialEq)]
enum ScriptedDraw {
    Bernoulli { p: f64, result: bool },
    BetweenInts { low: i32, high: i32, interval: Interval, result: i32 },
    BetweenDoubles { low: f64, high: f64, result: f64 },
}

/// Probabilities are compared with this tolerance
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Replays a fixed sequence of draws and checks each request against it
///
/// A request that does not match the next scripted draw (wrong primitive,
/// wrong probability or bounds, or no draws left) panics, the same way a
/// mock with strict expectations would. Meant for tests and replay
/// tooling only; live games use [`SeededRand`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedRand {
    script: VecDeque<ScriptedDraw>,
}

impl ScriptedRand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_bernoulli(&mut self, p: f64, result: bool) -> &mut Self {
        self.script.push_back(ScriptedDraw::Bernoulli { p, result });
        self
    }

    pub fn expect_between_ints(
        &mut self,
        low: i32,
        high: i32,
        interval: Interval,
        result: i32,
    ) -> &mut Self {
        self.script.push_back(ScriptedDraw::BetweenInts { low, high, interval, result });
        self
    }

    pub fn expect_between_doubles(&mut self, low: f64, high: f64, result: f64) -> &mut Self {
        self.script.push_back(ScriptedDraw::BetweenDoubles { low, high, result });
        self
    }

    /// True once every scripted draw has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next_draw(&mut self, request: &str) -> ScriptedDraw {
        match self.script.pop_front() {
            Some(draw) => draw,
            None => panic!("unexpected random draw {}: script is exhausted", request),
        }
    }
}

impl RandomSource for ScriptedRand {
    fn bernoulli(&mut self, p: f64) -> bool {
        let request = format!("bernoulli({})", p);
        match self.next_draw(&request) {
            ScriptedDraw::Bernoulli { p: expected, result }
                if (expected - p).abs() < PROBABILITY_TOLERANCE =>
            {
                result
            }
            other => panic!("unexpected random draw {}: expected {:?}", request, other),
        }
    }

    fn between_ints(&mut self, low: i32, high: i32, interval: Interval) -> i32 {
        let request = format!("between_ints({}, {}, {:?})", low, high, interval);
        match self.next_draw(&request) {
            ScriptedDraw::BetweenInts { low: l, high: h, interval: i, result }
                if l == low && h == high && i == interval =>
            {
                result
            }
            other => panic!("unexpected random draw {}: expected {:?}", request, other),
        }
    }

    fn between_doubles(&mut self, low: f64, high: f64) -> f64 {
        let request = format!("between_doubles({}, {})", low, high);
        match self.next_draw(&request) {
            ScriptedDraw::BetweenDoubles { low: l, high: h, result }
                if (l - low).abs() < PROBABILITY_TOLERANCE
                    && (h - high).abs() < PROBABILITY_TOLERANCE =>
            {
                result
            }
            other => panic!("unexpected random draw {}: expected {:?}", request, other),
        }
    }
}
