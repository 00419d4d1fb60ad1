//! Complex inner products
//!
//! `inner_prod` computes `Σ v1[i]·v2[i]`, `inner_prod_c` conjugates the first
//! argument: `Σ conj(v1[i])·v2[i]`.
//!
//! The fallback path reduces buffers longer than the configured crossover
//! sequentially. Shorter buffers are split by [`partition`] into one range
//! per worker; each worker produces a partial sum and the partials are added
//! in partition order once all workers have joined, so the result does not
//! depend on scheduling.

use crate::config::KernelConfig;
#[cfg(not(feature = "blas"))]
use crate::partition::partition;
use num_complex::Complex64;
#[cfg(not(feature = "blas"))]
use rayon::prelude::*;

/// `Σ v1[i]·v2[i]` with the default kernel configuration
#[inline]
pub fn inner_prod(v1: &[Complex64], v2: &[Complex64]) -> Complex64 {
    inner_prod_with(v1, v2, &KernelConfig::default())
}

/// `Σ conj(v1[i])·v2[i]` with the default kernel configuration
#[inline]
pub fn inner_prod_c(v1: &[Complex64], v2: &[Complex64]) -> Complex64 {
    inner_prod_c_with(v1, v2, &KernelConfig::default())
}

/// `Σ v1[i]·v2[i]`
#[cfg(not(feature = "blas"))]
pub fn inner_prod_with(v1: &[Complex64], v2: &[Complex64], config: &KernelConfig) -> Complex64 {
    debug_assert_eq!(v1.len(), v2.len());
    reduce(v1, v2, config.num_threads, config.dotu_crossover, |a, b| a * b)
}

/// `Σ conj(v1[i])·v2[i]`
#[cfg(not(feature = "blas"))]
pub fn inner_prod_c_with(v1: &[Complex64], v2: &[Complex64], config: &KernelConfig) -> Complex64 {
    debug_assert_eq!(v1.len(), v2.len());
    reduce(v1, v2, config.num_threads, config.dotc_crossover, |a, b| a.conj() * b)
}

/// `Σ v1[i]·v2[i]`
#[cfg(feature = "blas")]
pub fn inner_prod_with(v1: &[Complex64], v2: &[Complex64], _config: &KernelConfig) -> Complex64 {
    debug_assert_eq!(v1.len(), v2.len());
    crate::blas::dotu(v1, v2)
}

/// `Σ conj(v1[i])·v2[i]`
#[cfg(feature = "blas")]
pub fn inner_prod_c_with(v1: &[Complex64], v2: &[Complex64], _config: &KernelConfig) -> Complex64 {
    debug_assert_eq!(v1.len(), v2.len());
    crate::blas::dotc(v1, v2)
}

#[cfg(not(feature = "blas"))]
fn reduce<F>(v1: &[Complex64], v2: &[Complex64], nthreads: usize, crossover: usize, f: F) -> Complex64
where
    F: Fn(Complex64, Complex64) -> Complex64 + Sync,
{
    let data_size = v1.len();
    if data_size > crossover || nthreads <= 1 {
        log::trace!(target: crate::LOG_TARGET, "sequential inner product over {} entries", data_size);
        return sequential(v1, v2, &f);
    }

    log::trace!(
        target: crate::LOG_TARGET,
        "partitioned inner product over {} entries, {} partitions",
        data_size,
        nthreads
    );
    let bounds = partition(nthreads, data_size);
    let partials: Vec<Complex64> = bounds
        .par_windows(2)
        .map(|range| sequential(&v1[range[0]..range[1]], &v2[range[0]..range[1]], &f))
        .collect();
    partials.into_iter().sum()
}

#[cfg(not(feature = "blas"))]
#[inline]
fn sequential<F>(v1: &[Complex64], v2: &[Complex64], f: &F) -> Complex64
where
    F: Fn(Complex64, Complex64) -> Complex64,
{
    v1.iter()
        .zip(v2)
        .fold(Complex64::new(0.0, 0.0), |acc, (&a, &b)| acc + f(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vector(rng: &mut StdRng, len: usize) -> Vec<Complex64> {
        (0..len)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect()
    }

    #[test]
    fn test_inner_prod_small() {
        let v1 = vec![Complex64::new(1.0, 2.0), Complex64::new(0.0, 1.0)];
        let v2 = vec![Complex64::new(3.0, 0.0), Complex64::new(1.0, 1.0)];
        // (1+2i)·3 + i·(1+i) = 3+6i + i-1
        assert_eq!(inner_prod(&v1, &v2), Complex64::new(2.0, 7.0));
        // (1-2i)·3 + (-i)·(1+i) = 3-6i - i+1
        assert_eq!(inner_prod_c(&v1, &v2), Complex64::new(4.0, -7.0));
    }

    #[test]
    fn test_inner_prod_c_self_is_norm_squared() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [1, 2, 16, 100, 1024] {
            let v = random_vector(&mut rng, len);
            let norm_sqr: f64 = v.iter().map(|z| z.norm_sqr()).sum();
            for nthreads in [1, 2, 3, 8] {
                let config = KernelConfig::new().with_num_threads(nthreads);
                let result = inner_prod_c_with(&v, &v, &config);
                assert_eq!(result.im, 0.0);
                assert_relative_eq!(result.re, norm_sqr, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_partitioned_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(11);
        let v1 = random_vector(&mut rng, 777);
        let v2 = random_vector(&mut rng, 777);
        let reference = inner_prod_with(&v1, &v2, &KernelConfig::sequential());
        for nthreads in [2, 4, 5, 16] {
            let config = KernelConfig::new().with_num_threads(nthreads);
            let result = inner_prod_with(&v1, &v2, &config);
            assert_relative_eq!(result.re, reference.re, epsilon = 1e-10);
            assert_relative_eq!(result.im, reference.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_above_crossover_is_sequential_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let v1 = random_vector(&mut rng, 64);
        let v2 = random_vector(&mut rng, 64);
        let forced = KernelConfig::new().with_num_threads(4).with_crossover(8);
        assert_eq!(
            inner_prod_c_with(&v1, &v2, &forced),
            inner_prod_c_with(&v1, &v2, &KernelConfig::sequential())
        );
    }

    #[test]
    fn test_partitioned_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(5);
        let v1 = random_vector(&mut rng, 4096);
        let v2 = random_vector(&mut rng, 4096);
        let config = KernelConfig::new().with_num_threads(8);
        let first = inner_prod_with(&v1, &v2, &config);
        for _ in 0..10 {
            assert_eq!(inner_prod_with(&v1, &v2, &config), first);
        }
    }

    #[test]
    fn test_empty_buffers() {
        assert_eq!(inner_prod(&[], &[]), Complex64::new(0.0, 0.0));
    }
}
