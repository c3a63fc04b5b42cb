/// Deterministic RNG helpers.
///
/// This is intentionally small and dependency-free. It is **not** cryptographic.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw from `[0, 1)` using the top 53 bits.
    fn next_f64_unit(&mut self) -> f64 {
        let x = self.next_u64() >> 11;
        (x as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    fn next_below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "next_below requires a non-empty range");
        (((self.next_u64() as u128) * (n as u128)) >> 64) as usize
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Derive an independent seed for `(stream, index)` from a root seed.
///
/// The agent uses one stream for exploration and one per sampled penalty function, so adding
/// penalty functions never perturbs the exploration sequence.
pub fn derive_seed(root_seed: u64, stream: u64, index: u64) -> u64 {
    let x = root_seed ^ mix64(stream.wrapping_add(0x9E3779B97F4A7C15)) ^ mix64(index);
    mix64(x)
}
