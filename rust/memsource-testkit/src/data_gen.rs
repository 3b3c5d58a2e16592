//! Deterministic pseudo-random test data.

/// Returns `len` pseudo-random bytes generated from `seed`.
pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data);
    data
}

/// Returns `len` bytes where byte `i` is `i` truncated to a byte.
pub fn sequential_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Returns `len` random `f64` bit patterns, NaN payloads and infinities included.
pub fn random_f64_bits(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| f64::from_bits(rng.u64(..))).collect()
}

/// Returns `len` random `f32` bit patterns, NaN payloads and infinities included.
pub fn random_f32_bits(seed: u64, len: usize) -> Vec<f32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| f32::from_bits(rng.u32(..))).collect()
}
