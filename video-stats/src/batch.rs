//! Splitting id lists into request-sized groups.

/// Lazy iterator over contiguous, order-preserving chunks of a slice.
pub type Batches<'a, T> = std::slice::Chunks<'a, T>;

/// Splits `items` into consecutive chunks of `batch_size` elements.
///
/// Every chunk but the last holds exactly `batch_size` items; the last holds whatever remains.
/// An empty slice yields no chunks at all. Each call returns a new iterator, so the same input
/// can be batched as many times as needed.
///
/// # Panics
///
/// Panics if `batch_size` is zero.
pub fn batch<T>(items: &[T], batch_size: usize) -> Batches<'_, T> {
    assert!(batch_size > 0, "batch size must be greater than zero");
    items.chunks(batch_size)
}
