//! Shuffles for building flag orders.
//!
//! The daily order must be byte-for-byte reproducible across every client that
//! shares the same seed string, so it uses a fixed FNV-1a/mulberry32 pair with
//! exact 32-bit arithmetic rather than [`rand`]. Classic runs have no such
//! constraint and use ordinary thread-local entropy.

use rand::Rng;
use rand::seq::SliceRandom;

/// FNV-1a 32-bit hash of the seed string's bytes.
pub fn fnv1a_32(input: &str) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for byte in input.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

/// The mulberry32 generator: a 32-bit state advanced by a fixed odd increment,
/// mixed into a uniform float in `[0, 1)` per draw.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Seed the generator.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next uniform draw in `[0, 1)`, bit-exact with the reference algorithm.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

/// Fisher–Yates permutation of `items` driven by mulberry32 seeded from
/// `fnv1a_32(seed)`. Identical seeds yield identical orders on every platform.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut out = items.to_vec();
    let mut rng = Mulberry32::new(fnv1a_32(seed));
    for i in (1..out.len()).rev() {
        let j = (rng.next_f64() * (i as f64 + 1.0)).floor() as usize;
        out.swap(i, j);
    }
    out
}

/// Uniform random permutation of `items` using the caller's entropy source.
pub fn random_shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        // Published FNV-1a 32-bit test vectors.
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn mulberry32_is_deterministic_and_in_unit_range() {
        let mut a = Mulberry32::new(fnv1a_32("daily:2025-03-01"));
        let mut b = Mulberry32::new(fnv1a_32("daily:2025-03-01"));
        for _ in 0..1000 {
            let draw = a.next_f64();
            assert_eq!(draw, b.next_f64());
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn mulberry32_seeds_diverge() {
        let mut a = Mulberry32::new(fnv1a_32("daily:2025-03-01"));
        let mut b = Mulberry32::new(fnv1a_32("daily:2025-03-02"));
        let first: Vec<f64> = (0..8).map(|_| a.next_f64()).collect();
        let second: Vec<f64> = (0..8).map(|_| b.next_f64()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn seeded_shuffle_same_seed_same_order() {
        let items: Vec<u32> = (0..250).collect();
        assert_eq!(
            seeded_shuffle(&items, "daily:2025-03-01"),
            seeded_shuffle(&items, "daily:2025-03-01")
        );
    }

    #[test]
    fn seeded_shuffle_different_seeds_differ() {
        let items: Vec<u32> = (0..250).collect();
        assert_ne!(
            seeded_shuffle(&items, "daily:2025-03-01"),
            seeded_shuffle(&items, "daily:2025-03-02")
        );
    }

    #[test]
    fn seeded_shuffle_is_a_permutation() {
        let items: Vec<u32> = (0..250).collect();
        let mut shuffled = seeded_shuffle(&items, "daily:2025-03-01");
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn random_shuffle_runs_differ_with_overwhelming_probability() {
        let items: Vec<u32> = (0..250).collect();
        let mut rng = rand::rng();
        let first = random_shuffle(&items, &mut rng);
        let second = random_shuffle(&items, &mut rng);
        assert_ne!(first, second);
    }
}
