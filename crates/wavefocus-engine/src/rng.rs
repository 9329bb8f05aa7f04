//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Randomized control runs draw from here so the same seed always yields
//! the same delays.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Derives an independent stream seed from a base seed and a key.
///
/// The base seed (little-endian) and the UTF-8 key are hashed with BLAKE3
/// and the first eight bytes become the stream seed.
pub fn derive_seed(base_seed: u32, key: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&base_seed.to_le_bytes());
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Creates a PCG32 generator for one named stream.
pub fn create_rng(base_seed: u32, key: &str) -> Pcg32 {
    Pcg32::seed_from_u64(derive_seed(base_seed, key))
}
