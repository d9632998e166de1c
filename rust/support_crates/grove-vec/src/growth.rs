//! Amortized growth policy shared by all vector flavors.
//!
//! When an append would exceed the current capacity, the new capacity is
//! `max(capacity * 1.5 + MIN_GROWTH, needed)`, with the factor rounded down.

/// Fixed increment added on every growth step.
pub const MIN_GROWTH: usize = 4;

/// Computes the capacity to grow to from `current` so that at least `needed`
/// slots are available.
#[inline]
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    let scaled = current
        .saturating_add(current / 2)
        .saturating_add(MIN_GROWTH);
    scaled.max(needed)
}
