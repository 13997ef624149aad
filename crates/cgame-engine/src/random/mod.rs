//! Random number helpers.
//!
//! The free functions share one generator per thread, seeded from OS entropy
//! until [`seed`] is called. [`Random`] is an independent, owned generator.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

thread_local! {
    static RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

/// Reseeds this thread's generator; the following sequence is reproducible.
pub fn seed(s: u32) {
    RNG.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(u64::from(s)));
}

/// Uniform in `[0, 1)`.
pub fn random() -> f32 {
    RNG.with(|rng| sample_unit(&mut *rng.borrow_mut()))
}

/// Uniform in `[a, b)`; reversed bounds are swapped, equal bounds return `a`.
pub fn uniform(a: f32, b: f32) -> f32 {
    RNG.with(|rng| sample_uniform(&mut *rng.borrow_mut(), a, b))
}

/// Uniform integer in `[a, b]`, both ends inclusive; reversed bounds are swapped.
pub fn randint(a: i32, b: i32) -> i32 {
    RNG.with(|rng| sample_int(&mut *rng.borrow_mut(), a, b))
}

fn sample_unit<R: Rng>(rng: &mut R) -> f32 {
    rng.r#gen::<f32>()
}

fn sample_uniform<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi || !(hi - lo).is_finite() {
        return a;
    }
    rng.gen_range(lo..hi)
}

fn sample_int<R: Rng>(rng: &mut R, a: i32, b: i32) -> i32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(lo..=hi)
}

/// Owned generator with the same operations as the free functions.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(s: u32) -> Self {
        Self { rng: StdRng::seed_from_u64(u64::from(s)) }
    }

    pub fn seed(&mut self, s: u32) {
        self.rng = StdRng::seed_from_u64(u64::from(s));
    }

    pub fn random(&mut self) -> f32 {
        sample_unit(&mut self.rng)
    }

    pub fn uniform(&mut self, a: f32, b: f32) -> f32 {
        sample_uniform(&mut self.rng, a, b)
    }

    pub fn randint(&mut self, a: i32, b: i32) -> i32 {
        sample_int(&mut self.rng, a, b)
    }

    /// A random element, `None` for an empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
