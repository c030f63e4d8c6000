// src/domain/shuffle.rs
use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen index in `0..=i`, so every permutation is equally likely.
/// Slices of length 0 or 1 are left untouched.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle a copy of `items` and keep at most `count` of them.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy.truncate(count);
    copy
}
