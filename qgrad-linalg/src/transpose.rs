//! Cache-blocked out-of-place transpose

use num_complex::Complex64;

/// Extent below which a block is transposed directly
pub const BLOCK_THRESHOLD: usize = 16;

/// Transpose the row-major `rows × cols` matrix `mat` into `mat_t`
/// (`cols × rows`, row-major)
///
/// The index space is halved along its longer remaining extent until both
/// extents are at most [`BLOCK_THRESHOLD`], and each such block is copied
/// with a plain double loop.
pub fn transpose(mat: &[Complex64], mat_t: &mut [Complex64], rows: usize, cols: usize) {
    debug_assert_eq!(mat.len(), rows * cols);
    debug_assert_eq!(mat_t.len(), rows * cols);
    blocked(mat, mat_t, rows, cols, 0..rows, 0..cols);
}

fn blocked(
    mat: &[Complex64],
    mat_t: &mut [Complex64],
    rows: usize,
    cols: usize,
    mut row_range: std::ops::Range<usize>,
    mut col_range: std::ops::Range<usize>,
) {
    loop {
        let row_extent = row_range.len();
        let col_extent = col_range.len();
        if row_extent >= col_extent && row_extent > BLOCK_THRESHOLD {
            let mid = (row_range.start + row_range.end) / 2;
            blocked(mat, mat_t, rows, cols, row_range.start..mid, col_range.clone());
            row_range.start = mid;
        } else if col_extent > BLOCK_THRESHOLD {
            let mid = (col_range.start + col_range.end) / 2;
            blocked(mat, mat_t, rows, cols, row_range.clone(), col_range.start..mid);
            col_range.start = mid;
        } else {
            for r in row_range {
                for c in col_range.clone() {
                    mat_t[c * rows + r] = mat[r * cols + c];
                }
            }
            return;
        }
    }
}
