use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, RngCore, SeedableRng};

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Supplies leaf content for generated items.
pub trait TextSource {
    /// A string of `len` characters drawn from `a..=z`.
    fn string(&mut self, len: usize) -> String;

    /// `len` random bytes.
    fn bytes(&mut self, len: usize) -> Vec<u8>;
}

/// [`TextSource`] backed by any `rand` generator.
///
/// The default instance wraps the thread-local generator, so each thread
/// gets its own state and nothing is shared or locked.
#[derive(Debug, Clone)]
pub struct RandomTextSource<R = ThreadRng> {
    rng: R,
}

impl RandomTextSource<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomTextSource<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomTextSource<StdRng> {
    /// Same seed, same sequence of leaves.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> RandomTextSource<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> TextSource for RandomTextSource<R> {
    fn string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(ALPHA[self.rng.gen_range(0..ALPHA.len())]))
            .collect()
    }

    fn bytes(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.rng.fill_bytes(&mut buf);
        buf
    }
}
