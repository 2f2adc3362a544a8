//! Circular index arithmetic and quotient/remainder distribution helpers.

/// Wraps a (possibly negative) index into `0..len`.
///
/// Returns `0` when `len` is zero so callers never divide by zero; such
/// callers must not index into the empty buffer anyway.
#[must_use]
pub fn cyclic_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    #[allow(clippy::cast_possible_wrap)]
    let len = len as isize;
    #[allow(clippy::cast_sign_loss)]
    let wrapped = index.rem_euclid(len) as usize;
    wrapped
}

/// Distributes `total` items over `parts` buckets as evenly as possible.
///
/// Every bucket receives `total / parts`; the first `total % parts` buckets
/// receive one more. Returns an empty vector when `parts` is zero.
#[must_use]
pub fn even_distribution(total: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let quotient = total / parts;
    let remainder = total % parts;
    (0..parts)
        .map(|k| quotient + usize::from(k < remainder))
        .collect()
}
