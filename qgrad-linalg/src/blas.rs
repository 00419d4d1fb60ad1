//! CBLAS-backed kernels
//!
//! Row-major throughout. The provider library is linked by the final binary.

use cblas::{Layout, Transpose};
use num_complex::Complex64;

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const ZERO: Complex64 = Complex64::new(0.0, 0.0);

pub(crate) fn dotu(v1: &[Complex64], v2: &[Complex64]) -> Complex64 {
    let mut result = [ZERO];
    // SAFETY: both slices hold `v1.len()` elements with unit stride
    unsafe { cblas::zdotu_sub(v1.len() as i32, v1, 1, v2, 1, &mut result) };
    result[0]
}

pub(crate) fn dotc(v1: &[Complex64], v2: &[Complex64]) -> Complex64 {
    let mut result = [ZERO];
    // SAFETY: both slices hold `v1.len()` elements with unit stride
    unsafe { cblas::zdotc_sub(v1.len() as i32, v1, 1, v2, 1, &mut result) };
    result[0]
}

pub(crate) fn gemv(
    mat: &[Complex64],
    v_in: &[Complex64],
    v_out: &mut [Complex64],
    rows: usize,
    cols: usize,
    transpose: bool,
) {
    log::trace!(target: crate::LOG_TARGET, "zgemv {}x{} transpose={}", rows, cols, transpose);
    let trans = if transpose { Transpose::Ordinary } else { Transpose::None };
    // SAFETY: shapes are checked by the caller in debug builds
    unsafe {
        cblas::zgemv(
            Layout::RowMajor,
            trans,
            rows as i32,
            cols as i32,
            ONE,
            mat,
            cols as i32,
            v_in,
            1,
            ZERO,
            v_out,
            1,
        )
    };
}

pub(crate) fn gemm(
    left: &[Complex64],
    right: &[Complex64],
    out: &mut [Complex64],
    m: usize,
    n: usize,
    k: usize,
    transpose: bool,
) {
    log::trace!(target: crate::LOG_TARGET, "zgemm {}x{}x{} transpose={}", m, n, k, transpose);
    let (trans_b, ldb) = if transpose {
        (Transpose::Ordinary, k)
    } else {
        (Transpose::None, n)
    };
    // SAFETY: shapes are checked by the caller in debug builds
    unsafe {
        cblas::zgemm(
            Layout::RowMajor,
            Transpose::None,
            trans_b,
            m as i32,
            n as i32,
            k as i32,
            ONE,
            left,
            k as i32,
            right,
            ldb as i32,
            ZERO,
            out,
            n as i32,
        )
    };
}
