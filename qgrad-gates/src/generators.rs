//! Gate generators
//!
//! Every differentiable gate `U(θ)` in the catalog satisfies
//! `dU/dθ = i·s·G·U(θ)` for a Hermitian generator `G` and a real scaling
//! factor `s`. The adjoint engine applies `G` to a copy of the state and
//! scales the resulting overlap by `s`.

use crate::matrices::{flatten, kron2, PAULI_X, PAULI_Y, PAULI_Z, PROJECTOR_1, PROJECTOR_11};
use num_complex::Complex64;
use qgrad_core::{GateKind, QuantumError, Result};

/// Generator matrix and scaling factor of a parametric gate
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    /// Row-major generator matrix over the gate's wires
    pub matrix: Vec<Complex64>,
    /// Scaling factor `s` in `dU/dθ = i·s·G·U`
    pub scale: f64,
}

impl Generator {
    fn new(matrix: Vec<Complex64>, scale: f64) -> Self {
        Self { matrix, scale }
    }

    /// Number of wires the generator acts on
    pub fn num_wires(&self) -> usize {
        (self.matrix.len().trailing_zeros() / 2) as usize
    }
}

/// Generator of a gate kind
///
/// # Errors
/// Returns [`QuantumError::UnsupportedGenerator`] for non-parametric kinds and
/// explicit matrices.
pub fn generator(kind: GateKind) -> Result<Generator> {
    let generator = match kind {
        GateKind::RX => Generator::new(flatten(&PAULI_X), -0.5),
        GateKind::RY => Generator::new(flatten(&PAULI_Y), -0.5),
        GateKind::RZ => Generator::new(flatten(&PAULI_Z), -0.5),
        GateKind::PhaseShift => Generator::new(flatten(&PROJECTOR_1), 1.0),
        GateKind::CRX => Generator::new(flatten(&kron2(&PROJECTOR_1, &PAULI_X)), -0.5),
        GateKind::CRY => Generator::new(flatten(&kron2(&PROJECTOR_1, &PAULI_Y)), -0.5),
        GateKind::CRZ => Generator::new(flatten(&kron2(&PROJECTOR_1, &PAULI_Z)), -0.5),
        GateKind::ControlledPhaseShift => Generator::new(flatten(&PROJECTOR_11), 1.0),
        GateKind::IsingXX => Generator::new(flatten(&kron2(&PAULI_X, &PAULI_X)), -0.5),
        GateKind::IsingYY => Generator::new(flatten(&kron2(&PAULI_Y, &PAULI_Y)), -0.5),
        GateKind::IsingZZ => Generator::new(flatten(&kron2(&PAULI_Z, &PAULI_Z)), -0.5),
        other => return Err(QuantumError::UnsupportedGenerator(other.name().to_string())),
    };
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GateMatrices;
    use approx::assert_relative_eq;

    fn matmul(a: &[Complex64], b: &[Complex64], dim: usize) -> Vec<Complex64> {
        let mut out = vec![Complex64::new(0.0, 0.0); dim * dim];
        for i in 0..dim {
            for j in 0..dim {
                for k in 0..dim {
                    out[i * dim + j] += a[i * dim + k] * b[k * dim + j];
                }
            }
        }
        out
    }

    #[test]
    fn test_generators_match_finite_differences() {
        let theta = 0.731;
        let h = 1e-6;
        for kind in GateKind::ALL.iter().copied().filter(|k| k.is_parametric()) {
            let g = generator(kind).unwrap();
            let u = kind.matrix(Some(theta)).unwrap();
            let plus = kind.matrix(Some(theta + h)).unwrap();
            let minus = kind.matrix(Some(theta - h)).unwrap();
            let dim = 1 << g.num_wires();
            let gu = matmul(&g.matrix, &u, dim);
            let i_s = Complex64::new(0.0, g.scale);
            for idx in 0..dim * dim {
                let numeric = (plus[idx] - minus[idx]) / (2.0 * h);
                let analytic = i_s * gu[idx];
                assert_relative_eq!(numeric.re, analytic.re, epsilon = 1e-7);
                assert_relative_eq!(numeric.im, analytic.im, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn test_generators_are_hermitian() {
        for kind in GateKind::ALL.iter().copied().filter(|k| k.is_parametric()) {
            let g = generator(kind).unwrap();
            let dim = 1 << g.num_wires();
            for r in 0..dim {
                for c in 0..dim {
                    assert_eq!(g.matrix[r * dim + c], g.matrix[c * dim + r].conj(), "{}", kind);
                }
            }
        }
    }

    #[test]
    fn test_fixed_gates_have_no_generator() {
        for kind in [GateKind::Hadamard, GateKind::CNOT, GateKind::Toffoli, GateKind::Matrix] {
            assert!(matches!(generator(kind), Err(QuantumError::UnsupportedGenerator(_))));
        }
    }

    #[test]
    fn test_generator_wire_count() {
        assert_eq!(generator(GateKind::RZ).unwrap().num_wires(), 1);
        assert_eq!(generator(GateKind::IsingYY).unwrap().num_wires(), 2);
    }
}
