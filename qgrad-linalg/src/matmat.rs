//! Matrix-matrix product

#[cfg(not(feature = "blas"))]
use crate::partition::{partition, split_rows};
use num_complex::Complex64;
#[cfg(not(feature = "blas"))]
use rayon::prelude::*;

/// `out = left · right` for a row-major `m × k` left operand
///
/// Without `transpose`, `right` is the `k × n` operand. With `transpose`,
/// `right` holds that operand's transpose as an `n × k` row-major matrix,
/// which keeps the inner loop contiguous on both sides. `out` is the
/// `m × n` result and is overwritten; an empty `out` makes the call a no-op.
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use qgrad_linalg::matrix_mat_prod;
///
/// let c = |re: f64| Complex64::new(re, 0.0);
/// let left = vec![c(1.0), c(2.0), c(3.0), c(4.0)];
/// let right = vec![c(0.0), c(1.0), c(1.0), c(0.0)];
/// let mut out = vec![c(0.0); 4];
/// matrix_mat_prod(&left, &right, &mut out, 2, 2, 2, 2, false);
/// assert_eq!(out, vec![c(2.0), c(1.0), c(4.0), c(3.0)]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn matrix_mat_prod(
    left: &[Complex64],
    right: &[Complex64],
    out: &mut [Complex64],
    m: usize,
    n: usize,
    k: usize,
    nthreads: usize,
    transpose: bool,
) {
    if out.is_empty() {
        return;
    }
    debug_assert_eq!(left.len(), m * k);
    debug_assert_eq!(right.len(), k * n);
    debug_assert_eq!(out.len(), m * n);

    #[cfg(feature = "blas")]
    {
        let _ = nthreads;
        crate::blas::gemm(left, right, out, m, n, k, transpose);
    }

    #[cfg(not(feature = "blas"))]
    {
        let bounds = partition(nthreads.max(1), m);
        split_rows(out, &bounds, n)
            .into_par_iter()
            .for_each(|(start, block)| {
                for (offset, out_row) in block.chunks_exact_mut(n).enumerate() {
                    let r = start + offset;
                    let left_row = &left[r * k..(r + 1) * k];
                    for (c, entry) in out_row.iter_mut().enumerate() {
                        *entry = if transpose {
                            let right_row = &right[c * k..(c + 1) * k];
                            left_row.iter().zip(right_row).map(|(&a, &b)| a * b).sum()
                        } else {
                            left_row
                                .iter()
                                .enumerate()
                                .map(|(b, &a)| a * right[b * n + c])
                                .sum()
                        };
                    }
                }
            });
    }
}
