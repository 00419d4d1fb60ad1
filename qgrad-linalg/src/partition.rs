//! Index partitioning and small numeric helpers

/// Split `[0, data_size)` into `n` contiguous ranges
///
/// Returns `n + 1` non-decreasing boundaries starting at 0 and ending at
/// `data_size`. Every range has `data_size / n` elements except the last,
/// which absorbs the remainder.
///
/// # Example
/// ```
/// use qgrad_linalg::partition;
///
/// assert_eq!(partition(3, 10), vec![0, 3, 6, 10]);
/// ```
pub fn partition(n: usize, data_size: usize) -> Vec<usize> {
    debug_assert!(n > 0, "partition count must be positive");
    if n <= 1 {
        return vec![0, data_size];
    }
    let d = data_size / n;
    let mut bounds = Vec::with_capacity(n + 1);
    bounds.push(0);
    for i in 1..n {
        bounds.push(i * d);
    }
    bounds.push(data_size);
    bounds
}

/// Cut `out` into disjoint row blocks following `bounds`
///
/// Each block is paired with the index of its first row. `row_len` is the
/// number of elements per row.
#[cfg(not(feature = "blas"))]
pub(crate) fn split_rows<'a, T>(
    mut out: &'a mut [T],
    bounds: &[usize],
    row_len: usize,
) -> Vec<(usize, &'a mut [T])> {
    let mut blocks = Vec::with_capacity(bounds.len().saturating_sub(1));
    for range in bounds.windows(2) {
        let (block, rest) = std::mem::take(&mut out).split_at_mut((range[1] - range[0]) * row_len);
        blocks.push((range[0], block));
        out = rest;
    }
    blocks
}

/// 2^n
#[inline]
pub fn exp2(n: usize) -> usize {
    1 << n
}

/// Floor of log2, with `log2(0) == 0`
#[inline]
pub fn log2(value: usize) -> usize {
    if value == 0 {
        0
    } else {
        (usize::BITS - 1 - value.leading_zeros()) as usize
    }
}

/// Decimal value of the basis bit owned by `wire` under the big-endian
/// convention (wire 0 is the most significant bit)
#[inline]
pub fn max_decimal_for_qubit(wire: usize, num_qubits: usize) -> usize {
    debug_assert!(wire < num_qubits);
    exp2(num_qubits - wire - 1)
}

/// `num_points` evenly spaced values over `[start, end]`
pub fn linspace(start: f64, end: f64, num_points: usize) -> Vec<f64> {
    match num_points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num_points - 1) as f64;
            (0..num_points).map(|i| start + step * i as f64).collect()
        }
    }
}
