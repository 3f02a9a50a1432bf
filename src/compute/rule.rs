//! Conway transition rule and the row kernels built on it.
//!
//! Kernels operate on padded row-major buffers (stride `n + 2`) and only ever
//! touch interior columns `1..=n`. Each kernel writes to exactly one row, so
//! rows can be dispatched to workers independently. Callers must pass an
//! interior row (`1..=n`); the propagator derives it from the row chunk index.

/// Conway's rule: B3/S23.
///
/// - dead with exactly 3 neighbors is born
/// - alive with 2 or 3 neighbors survives
/// - everything else is dead
#[inline]
pub fn next_status(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Sum of the 8 Moore neighbors of flat index `i`.
#[inline(always)]
fn moore_sum(status: &[u8], i: usize, stride: usize) -> u8 {
    let above = i - stride;
    let below = i + stride;
    status[above - 1]
        + status[above]
        + status[above + 1]
        + status[i - 1]
        + status[i + 1]
        + status[below - 1]
        + status[below]
        + status[below + 1]
}

/// Counting pass for one interior row.
///
/// `counts_row` is the padded row `row` of the neighbor buffer; only interior
/// columns are written.
pub(crate) fn count_row_into(status: &[u8], row: usize, counts_row: &mut [u8], n: usize, stride: usize) {
    debug_assert!(row >= 1 && row <= n);
    let base = row * stride;
    for col in 1..=n {
        counts_row[col] = moore_sum(status, base + col, stride);
    }
}

/// Apply pass for one interior row, in place.
pub(crate) fn apply_row(status_row: &mut [u8], counts_row: &[u8], n: usize) {
    for col in 1..=n {
        let alive = status_row[col] != 0;
        status_row[col] = next_status(alive, counts_row[col]) as u8;
    }
}

/// Fused count-and-decide for one interior row, reading the current
/// generation and writing the next one into `next_row`.
pub(crate) fn advance_row_into(status: &[u8], row: usize, next_row: &mut [u8], n: usize, stride: usize) {
    debug_assert!(row >= 1 && row <= n);
    let base = row * stride;
    for col in 1..=n {
        let i = base + col;
        next_row[col] = next_status(status[i] != 0, moore_sum(status, i, stride)) as u8;
    }
}
