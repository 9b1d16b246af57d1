use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builds the generator used by a sampler.
///
/// A seeded generator is reproducible across runs; without a seed the
/// generator is drawn from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Derives an independent seed for one consumer of a shared base seed.
///
/// Used so the split, the pair dataset and the triplet builder each get
/// their own stream from a single configured seed.
pub fn derive_seed(seed: Option<u64>, stream: u64) -> Option<u64> {
    // splitmix64 finaliser
    seed.map(|s| {
        let mut z = s.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    })
}
