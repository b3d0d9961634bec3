//! Amortized random-value pools.
//!
//! Generating random values one call at a time is slow; the pools here generate a
//! large batch up front and dispense values one at a time, regenerating a fresh
//! batch transparently when the current one runs out. Callers never observe an
//! end-of-data condition.

use crate::error::PopulateError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution};
use uuid::Uuid;

/// Batch size for the UUID pool.
pub const UUID_POOL_SIZE: usize = 100_000;

/// Batch size for the uniform-float pool.
pub const FLOAT_POOL_SIZE: usize = 10_000_000;

/// Batch size for the binomial fan-out pool.
pub const FANOUT_POOL_SIZE: usize = 100_000;

/// A pool that dispenses values from a pre-generated batch, refilling itself
/// with the same generation closure whenever the batch is exhausted.
pub struct Pool<T> {
    batch: std::vec::IntoIter<T>,
    size: usize,
    generate: Box<dyn FnMut(usize) -> Vec<T> + Send>,
}

impl<T> Pool<T> {
    /// Create a pool with the given batch size and generation closure.
    ///
    /// The first batch is generated eagerly so the cost is paid at startup
    /// rather than on the first draw.
    pub fn new<F>(size: usize, mut generate: F) -> Self
    where
        F: FnMut(usize) -> Vec<T> + Send + 'static,
    {
        let batch = generate(size).into_iter();
        Self {
            batch,
            size,
            generate: Box::new(generate),
        }
    }

    /// Dispense one value, regenerating a full batch first if needed.
    pub fn next(&mut self) -> T {
        if let Some(value) = self.batch.next() {
            return value;
        }
        self.batch = (self.generate)(self.size).into_iter();
        // A generation closure always returns `size` values and size > 0.
        self.batch.next().unwrap()
    }
}

impl Pool<Uuid> {
    /// Pool of statistically-unique v4 UUIDs, deterministic under the seed.
    pub fn uuids(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(size, move |n| (0..n).map(|_| uuid_v4(&mut rng)).collect())
    }
}

impl Pool<f64> {
    /// Pool of independent uniform draws over [0, 1).
    pub fn uniform(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(size, move |n| (0..n).map(|_| rng.gen::<f64>()).collect())
    }
}

impl Pool<u64> {
    /// Pool of binomial draws with the given trials and success probability,
    /// used as per-node fan-out counts.
    ///
    /// A probability outside [0, 1] is a configuration error. A parameterization
    /// whose draws are all zero is legal and simply produces childless nodes.
    pub fn binomial(size: usize, trials: u64, p: f64, seed: u64) -> Result<Self, PopulateError> {
        let dist = Binomial::new(trials, p).map_err(|e| {
            PopulateError::Config(format!("invalid binomial parameters (n={trials}, p={p}): {e}"))
        })?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Self::new(size, move |n| {
            (0..n).map(|_| dist.sample(&mut rng)).collect()
        }))
    }

    /// Pool that always dispenses the same fan-out. Used in tests and useful
    /// for generating trees of exactly known shape.
    pub fn fixed_fanout(size: usize, fanout: u64) -> Self {
        Self::new(size, move |n| vec![fanout; n])
    }
}

/// Build a v4 UUID from RNG bytes so that generation is deterministic
/// under a seeded RNG.
fn uuid_v4(rng: &mut StdRng) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}
