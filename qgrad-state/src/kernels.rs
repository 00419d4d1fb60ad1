//! Wire-indexed matrix application
//!
//! Wires follow the big-endian convention: wire `w` of an `n`-qubit register
//! owns bit `n - 1 - w` of the basis index, so wire 0 is the most
//! significant bit. Within an operator matrix the first listed wire is the
//! most significant bit of the local index.
//!
//! The amplitude buffer is cut into blocks of `2^(n - w_min)` entries, where
//! `w_min` is the smallest wire touched. Every amplitude group an operator
//! mixes lives inside one block, so blocks are independent and large
//! states process them on the rayon pool.

use num_complex::Complex64;
use qgrad_linalg::max_decimal_for_qubit;
use rayon::prelude::*;
use smallvec::SmallVec;
use std::borrow::Cow;

/// States of at least this many amplitudes process blocks in parallel
pub const PARALLEL_DIMENSION: usize = 1 << 14;

/// Conjugate transpose of a row-major `dim × dim` matrix
pub fn adjoint_matrix(matrix: &[Complex64], dim: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); dim * dim];
    for r in 0..dim {
        for c in 0..dim {
            out[c * dim + r] = matrix[r * dim + c].conj();
        }
    }
    out
}

/// Apply the row-major matrix to `wires` of the state, in place
///
/// With `inverse` set the conjugate transpose is applied. Wires must be
/// distinct and in range and `matrix` must hold `4^wires.len()` entries;
/// callers validate, this routine only debug-asserts.
pub fn apply_matrix(
    data: &mut [Complex64],
    num_qubits: usize,
    matrix: &[Complex64],
    wires: &[usize],
    inverse: bool,
) {
    let dim = 1usize << wires.len();
    debug_assert_eq!(data.len(), 1 << num_qubits);
    debug_assert_eq!(matrix.len(), dim * dim);
    debug_assert!(wires.iter().all(|&w| w < num_qubits));

    let matrix: Cow<'_, [Complex64]> = if inverse {
        Cow::Owned(adjoint_matrix(matrix, dim))
    } else {
        Cow::Borrowed(matrix)
    };

    match wires {
        [] => {}
        [wire] => apply_single(data, num_qubits, &matrix, *wire),
        [w0, w1] => apply_two(data, num_qubits, &matrix, *w0, *w1),
        _ => apply_multi(data, num_qubits, &matrix, wires),
    }
}

fn for_each_block<F>(data: &mut [Complex64], block: usize, f: F)
where
    F: Fn(&mut [Complex64]) + Send + Sync,
{
    if data.len() >= PARALLEL_DIMENSION && data.len() > block {
        data.par_chunks_mut(block).for_each(f);
    } else {
        data.chunks_mut(block).for_each(f);
    }
}

fn apply_single(data: &mut [Complex64], num_qubits: usize, matrix: &[Complex64], wire: usize) {
    let mask = max_decimal_for_qubit(wire, num_qubits);
    let (m00, m01, m10, m11) = (matrix[0], matrix[1], matrix[2], matrix[3]);

    for_each_block(data, mask << 1, |block| {
        let (low, high) = block.split_at_mut(mask);
        for (a0, a1) in low.iter_mut().zip(high.iter_mut()) {
            let (v0, v1) = (*a0, *a1);
            *a0 = m00 * v0 + m01 * v1;
            *a1 = m10 * v0 + m11 * v1;
        }
    });
}

fn apply_two(data: &mut [Complex64], num_qubits: usize, matrix: &[Complex64], w0: usize, w1: usize) {
    let mask0 = max_decimal_for_qubit(w0, num_qubits);
    let mask1 = max_decimal_for_qubit(w1, num_qubits);
    let both = mask0 | mask1;
    let offsets = [0, mask1, mask0, both];

    for_each_block(data, mask0.max(mask1) << 1, |block| {
        for base in 0..block.len() {
            if base & both != 0 {
                continue;
            }
            let v = offsets.map(|o| block[base + o]);
            for (r, &o) in offsets.iter().enumerate() {
                let row = &matrix[r * 4..r * 4 + 4];
                block[base + o] = row[0] * v[0] + row[1] * v[1] + row[2] * v[2] + row[3] * v[3];
            }
        }
    });
}

fn apply_multi(data: &mut [Complex64], num_qubits: usize, matrix: &[Complex64], wires: &[usize]) {
    let k = wires.len();
    let dim = 1usize << k;
    let masks: SmallVec<[usize; 8]> = wires.iter().map(|&w| max_decimal_for_qubit(w, num_qubits)).collect();
    let all = masks.iter().fold(0, |acc, m| acc | m);
    let offsets: Vec<usize> = (0..dim)
        .map(|local| {
            masks
                .iter()
                .enumerate()
                .filter(|&(j, _)| (local >> (k - 1 - j)) & 1 == 1)
                .fold(0, |acc, (_, m)| acc | m)
        })
        .collect();
    let block_len = masks.iter().copied().max().unwrap_or(0) << 1;

    for_each_block(data, block_len, |block| {
        let mut v = vec![Complex64::new(0.0, 0.0); dim];
        for base in 0..block.len() {
            if base & all != 0 {
                continue;
            }
            for (slot, &o) in v.iter_mut().zip(&offsets) {
                *slot = block[base + o];
            }
            for (r, &o) in offsets.iter().enumerate() {
                let row = &matrix[r * dim..(r + 1) * dim];
                block[base + o] = row.iter().zip(&v).map(|(&m, &a)| m * a).sum();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qgrad_gates::matrices;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    fn basis(num_qubits: usize, index: usize) -> Vec<Complex64> {
        let mut v = vec![c(0.0); 1 << num_qubits];
        v[index] = c(1.0);
        v
    }

    fn random_state(rng: &mut StdRng, num_qubits: usize) -> Vec<Complex64> {
        let v: Vec<Complex64> = (0..1 << num_qubits)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        v.into_iter().map(|z| z / norm).collect()
    }

    /// Reference: build the full operator by permuting basis indices
    fn dense_apply(state: &[Complex64], num_qubits: usize, matrix: &[Complex64], wires: &[usize]) -> Vec<Complex64> {
        let k = wires.len();
        let dim = 1 << k;
        let mut out = vec![c(0.0); state.len()];
        for (i, &amp) in state.iter().enumerate() {
            let col: usize = (0..k).fold(0, |acc, j| (acc << 1) | ((i >> (num_qubits - 1 - wires[j])) & 1));
            for row in 0..dim {
                let mut target = i;
                for (j, &w) in wires.iter().enumerate() {
                    let bit = (row >> (k - 1 - j)) & 1;
                    let mask = 1 << (num_qubits - 1 - w);
                    target = if bit == 1 { target | mask } else { target & !mask };
                }
                out[target] += matrix[row * dim + col] * amp;
            }
        }
        out
    }

    #[test]
    fn test_x_on_wire_zero_flips_msb() {
        let mut state = basis(3, 0);
        apply_matrix(&mut state, 3, &matrices::flatten(&matrices::PAULI_X), &[0], false);
        assert_eq!(state, basis(3, 0b100));
    }

    #[test]
    fn test_x_on_each_wire_sets_its_big_endian_bit() {
        let num_qubits = 4;
        for wire in 0..num_qubits {
            let mut state = basis(num_qubits, 0);
            apply_matrix(&mut state, num_qubits, &matrices::flatten(&matrices::PAULI_X), &[wire], false);
            assert_eq!(state, basis(num_qubits, 1 << (num_qubits - 1 - wire)));
        }
    }

    #[test]
    fn test_cnot_control_is_first_wire() {
        // |10⟩ with control on wire 0 → |11⟩
        let mut state = basis(2, 0b10);
        apply_matrix(&mut state, 2, &matrices::flatten(&matrices::CNOT), &[0, 1], false);
        assert_eq!(state, basis(2, 0b11));

        // reversed wires: control on wire 1, which is clear
        let mut state = basis(2, 0b10);
        apply_matrix(&mut state, 2, &matrices::flatten(&matrices::CNOT), &[1, 0], false);
        assert_eq!(state, basis(2, 0b10));
    }

    #[test]
    fn test_toffoli_on_scattered_wires() {
        // controls on wires 3 and 0, target on wire 1 of a 4-qubit register
        let mut state = basis(4, 0b1001);
        apply_matrix(&mut state, 4, &matrices::flatten(&matrices::TOFFOLI), &[3, 0, 1], false);
        assert_eq!(state, basis(4, 0b1101));
    }

    #[test]
    fn test_kernels_match_dense_reference() {
        let mut rng = StdRng::seed_from_u64(17);
        let num_qubits = 5;
        let cases: Vec<(Vec<Complex64>, Vec<usize>)> = vec![
            (matrices::flatten(&matrices::rotation_y(0.4)), vec![3]),
            (matrices::flatten(&matrices::rxx(1.1)), vec![4, 1]),
            (matrices::flatten(&matrices::controlled(&matrices::rotation_x(0.8))), vec![2, 0]),
            (matrices::flatten(&matrices::FREDKIN), vec![1, 4, 2]),
        ];
        for (matrix, wires) in cases {
            let state = random_state(&mut rng, num_qubits);
            let expected = dense_apply(&state, num_qubits, &matrix, &wires);
            let mut actual = state.clone();
            apply_matrix(&mut actual, num_qubits, &matrix, &wires, false);
            for (a, b) in actual.iter().zip(&expected) {
                assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
                assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_undoes_forward() {
        let mut rng = StdRng::seed_from_u64(18);
        let num_qubits = 15;
        let state = random_state(&mut rng, num_qubits);
        let matrix = matrices::flatten(&matrices::ryy(0.37));
        let mut evolved = state.clone();
        apply_matrix(&mut evolved, num_qubits, &matrix, &[7, 2], false);
        apply_matrix(&mut evolved, num_qubits, &matrix, &[7, 2], true);
        for (a, b) in evolved.iter().zip(&state) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parallel_blocks_match_sequential_reference() {
        let mut rng = StdRng::seed_from_u64(19);
        let num_qubits = 15;
        let state = random_state(&mut rng, num_qubits);
        let matrix = matrices::flatten(&matrices::HADAMARD);
        let expected = dense_apply(&state, num_qubits, &matrix, &[9]);
        let mut actual = state;
        apply_matrix(&mut actual, num_qubits, &matrix, &[9], false);
        for (a, b) in actual.iter().zip(&expected) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}
