//! Per-index value selection from repeated parameters.
//!
//! A single call may describe several related searches. Each parameter
//! carries a list of values, and search `n` takes the `n`th value. Lists
//! shorter than the number of searches repeat their last value, so a
//! client only spells out the values that change.

/// Returns the value for sub-request `n`, borrowed from `values`.
///
/// Indices past the end clamp to the last value. An empty list yields
/// `None`.
///
/// # Examples
///
/// ```
/// use plan_server::params::resolve_ref;
///
/// let speeds = [1.2, 1.5];
/// assert_eq!(resolve_ref(&speeds, 0), Some(&1.2));
/// assert_eq!(resolve_ref(&speeds, 1), Some(&1.5));
/// assert_eq!(resolve_ref(&speeds, 7), Some(&1.5));
///
/// let none: [f64; 0] = [];
/// assert_eq!(resolve_ref(&none, 0), None);
/// ```
pub fn resolve_ref<T>(values: &[T], n: usize) -> Option<&T> {
    let max_index = values.len().checked_sub(1)?;
    values.get(n.min(max_index))
}

/// Returns a copy of the value for sub-request `n`.
///
/// See [`resolve_ref`].
pub fn resolve<T: Clone>(values: &[T], n: usize) -> Option<T> {
    resolve_ref(values, n).cloned()
}
