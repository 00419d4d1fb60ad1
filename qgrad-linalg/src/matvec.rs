//! Matrix-vector product

#[cfg(not(feature = "blas"))]
use crate::partition::{partition, split_rows};
use num_complex::Complex64;
#[cfg(not(feature = "blas"))]
use rayon::prelude::*;

/// `v_out = mat · v_in`, or `v_out = matᵀ · v_in` when `transpose` is set
///
/// `mat` is a row-major `rows × cols` matrix. Without `transpose`, `v_in`
/// has `cols` entries and `v_out` has `rows`; with it the two lengths swap.
/// `v_out` is overwritten. An empty `v_out` makes the call a no-op.
///
/// The fallback path always partitions the output rows into `nthreads`
/// disjoint blocks, whatever the size.
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use qgrad_linalg::matrix_vec_prod;
///
/// let c = |re: f64| Complex64::new(re, 0.0);
/// let mat = vec![c(1.0), c(2.0), c(3.0), c(4.0), c(5.0), c(6.0)];
/// let mut out = vec![c(0.0); 2];
/// matrix_vec_prod(&mat, &[c(1.0), c(0.0), c(1.0)], &mut out, 2, 3, 1, false);
/// assert_eq!(out, vec![c(4.0), c(10.0)]);
/// ```
pub fn matrix_vec_prod(
    mat: &[Complex64],
    v_in: &[Complex64],
    v_out: &mut [Complex64],
    rows: usize,
    cols: usize,
    nthreads: usize,
    transpose: bool,
) {
    if v_out.is_empty() {
        return;
    }
    debug_assert_eq!(mat.len(), rows * cols);
    debug_assert_eq!(v_in.len(), if transpose { rows } else { cols });
    debug_assert_eq!(v_out.len(), if transpose { cols } else { rows });

    #[cfg(feature = "blas")]
    {
        let _ = nthreads;
        crate::blas::gemv(mat, v_in, v_out, rows, cols, transpose);
    }

    #[cfg(not(feature = "blas"))]
    {
        let out_len = v_out.len();
        let bounds = partition(nthreads.max(1), out_len);
        split_rows(v_out, &bounds, 1)
            .into_par_iter()
            .for_each(|(start, block)| {
                for (offset, out) in block.iter_mut().enumerate() {
                    let r = start + offset;
                    *out = if transpose {
                        (0..rows).map(|c| mat[c * cols + r] * v_in[c]).sum()
                    } else {
                        let row = &mat[r * cols..(r + 1) * cols];
                        row.iter().zip(v_in).map(|(&m, &v)| m * v).sum()
                    };
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn identity(dim: usize) -> Vec<Complex64> {
        let mut m = vec![Complex64::new(0.0, 0.0); dim * dim];
        for i in 0..dim {
            m[i * dim + i] = Complex64::new(1.0, 0.0);
        }
        m
    }

    #[test]
    fn test_identity_leaves_vector_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let dim = 37;
        let v: Vec<Complex64> = (0..dim)
            .map(|_| Complex64::new(rng.gen(), rng.gen()))
            .collect();
        let mat = identity(dim);
        for nthreads in [1, 2, 3, 8, 64] {
            for transpose in [false, true] {
                let mut out = vec![Complex64::new(9.0, 9.0); dim];
                matrix_vec_prod(&mat, &v, &mut out, dim, dim, nthreads, transpose);
                assert_eq!(out, v);
            }
        }
    }

    #[test]
    fn test_transpose_rectangular() {
        let c = |re: f64, im: f64| Complex64::new(re, im);
        // 2 × 3
        let mat = vec![c(1.0, 0.0), c(0.0, 1.0), c(2.0, 0.0), c(0.0, 0.0), c(1.0, 1.0), c(3.0, 0.0)];
        let v_in = vec![c(1.0, 0.0), c(0.0, 2.0)];
        let mut out = vec![c(0.0, 0.0); 3];
        matrix_vec_prod(&mat, &v_in, &mut out, 2, 3, 2, true);
        assert_relative_eq!(out[0].re, 1.0);
        // i·1 + (1+i)·2i = i + 2i - 2
        assert_relative_eq!(out[1].re, -2.0);
        assert_relative_eq!(out[1].im, 3.0);
        assert_relative_eq!(out[2].im, 6.0);
    }

    #[test]
    fn test_empty_output_is_noop() {
        let mat = identity(2);
        let v = vec![Complex64::new(1.0, 0.0); 2];
        let mut out: Vec<Complex64> = Vec::new();
        matrix_vec_prod(&mat, &v, &mut out, 2, 2, 2, false);
        assert!(out.is_empty());
    }
}
