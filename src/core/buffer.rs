// Two-call buffer protocol
//
// Callers first pass a capacity of 0 to learn the required size, then call again
// with a large enough capacity to receive the data. A non-zero capacity that is
// too small is an error. Every size-queried output in the crate goes through here.

use crate::input::{XrError, XrResult};

/// Check a capacity against the required element count
///
/// Returns `Ok(true)` when the data should be written, `Ok(false)` for a
/// size-only query.
pub fn check_capacity(required: usize, capacity: usize) -> XrResult<bool> {
    if capacity == 0 {
        return Ok(false);
    }
    if capacity < required {
        return Err(XrError::SizeInsufficient { required, capacity });
    }
    Ok(true)
}

/// Copy `items` into `out` following the two-call protocol
///
/// Returns the required element count.
pub fn fill_slice<T: Clone>(items: &[T], capacity: usize, out: &mut Vec<T>) -> XrResult<usize> {
    if check_capacity(items.len(), capacity)? {
        out.clear();
        out.extend_from_slice(items);
    }
    Ok(items.len())
}

/// Copy `text` into `out` following the two-call protocol
///
/// The required size counts a terminator, so it is always `text.len() + 1`.
pub fn fill_string(text: &str, capacity: usize, out: &mut String) -> XrResult<usize> {
    let required = text.len() + 1;
    if check_capacity(required, capacity)? {
        out.clear();
        out.push_str(text);
    }
    Ok(required)
}
