//! Numeric kernels for qgrad
//!
//! Complex inner products, matrix-vector and matrix-matrix products and a
//! cache-blocked transpose over row-major `Complex64` buffers.
//!
//! With the `blas` feature enabled, inner products and matrix products are
//! delegated to CBLAS. Otherwise they run on a portable fallback that splits
//! the work into contiguous partitions and maps them over the rayon pool.
//!
//! The kernels assume well-formed input: shapes are checked with
//! `debug_assert!` only, validation lives at the state and observable
//! boundary.
//!
//! # Example
//! ```
//! use num_complex::Complex64;
//! use qgrad_linalg::{inner_prod_c, transpose};
//!
//! let v = vec![Complex64::new(1.0, 1.0), Complex64::new(0.0, 2.0)];
//! assert_eq!(inner_prod_c(&v, &v), Complex64::new(6.0, 0.0));
//!
//! let m: Vec<Complex64> = (0..6).map(|x| Complex64::new(x as f64, 0.0)).collect();
//! let mut m_t = vec![Complex64::new(0.0, 0.0); 6];
//! transpose(&m, &mut m_t, 2, 3);
//! assert_eq!(m_t[1], m[3]);
//! ```

#[cfg(feature = "blas")]
mod blas;
pub mod config;
pub mod inner;
pub mod matmat;
pub mod matvec;
pub mod partition;
pub mod transpose;

pub use config::KernelConfig;
pub use inner::{inner_prod, inner_prod_c, inner_prod_c_with, inner_prod_with};
pub use matmat::matrix_mat_prod;
pub use matvec::matrix_vec_prod;
pub use partition::{exp2, linspace, log2, max_decimal_for_qubit, partition};
pub use transpose::{transpose, BLOCK_THRESHOLD};

/// Log target for kernel dispatch decisions
pub(crate) const LOG_TARGET: &str = "qgrad_linalg::dispatch";
