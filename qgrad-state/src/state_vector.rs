//! Dense state vector

use crate::error::{Result, StateError};
use crate::kernels;
use num_complex::Complex64;
use qgrad_core::error::{ensure_distinct_wires, ensure_wires_in_range};
use qgrad_core::{GateKind, GateOp};
use qgrad_gates::{op_generator, op_matrix};
use qgrad_linalg::{exp2, log2};

/// Largest register a state vector may be allocated for
pub const MAX_QUBITS: usize = 30;

/// Dense quantum state over `2^n` complex amplitudes
///
/// Wire 0 is the most significant bit of the basis index. Cloning copies
/// the amplitude buffer, so every clone evolves independently.
///
/// # Example
///
/// ```
/// use qgrad_core::GateKind;
/// use qgrad_state::StateVector;
///
/// let mut state = StateVector::new(2).unwrap();
/// state.apply_gate(GateKind::PauliX, &[0], None, false).unwrap();
/// // |10⟩
/// assert_eq!(state.amplitudes()[2].re, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    num_qubits: usize,

    /// Amplitudes, `2^num_qubits` entries
    data: Vec<Complex64>,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or exceeds [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(StateError::InvalidDimension {
                dimension: 1usize.checked_shl(num_qubits as u32).unwrap_or(0),
            });
        }

        let mut data = vec![Complex64::new(0.0, 0.0); exp2(num_qubits)];
        data[0] = Complex64::new(1.0, 0.0);
        Ok(Self { num_qubits, data })
    }

    /// Create a state vector that takes ownership of `amplitudes`
    ///
    /// # Errors
    /// Returns error if the length is not a power of two of at least 2
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let dimension = amplitudes.len();
        if dimension < 2 || !dimension.is_power_of_two() {
            return Err(StateError::InvalidDimension { dimension });
        }
        Ok(Self {
            num_qubits: log2(dimension),
            data: amplitudes,
        })
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.data
    }

    /// Get a mutable reference to the state amplitudes
    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.data
    }

    /// Consume the state and return its amplitudes
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.data
    }

    /// Overwrite the amplitudes with those of `other`
    ///
    /// # Errors
    /// Returns error if the dimensions differ
    pub fn copy_from(&mut self, other: &StateVector) -> Result<()> {
        if other.dimension() != self.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Compute the L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Scale all amplitudes so that the norm equals 1
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 1e-10 {
            let inv_norm = 1.0 / norm;
            for amplitude in &mut self.data {
                *amplitude *= inv_norm;
            }
        }
    }

    /// Check if |norm - 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Reset the state to |0...0⟩
    pub fn reset(&mut self) {
        self.data.fill(Complex64::new(0.0, 0.0));
        self.data[0] = Complex64::new(1.0, 0.0);
    }

    /// Apply a row-major matrix to `wires`
    ///
    /// With `inverse` set the conjugate transpose is applied. The matrix
    /// need not be unitary; observables and generators go through here too.
    ///
    /// # Errors
    /// Returns error if a wire is out of range or repeated, or if the matrix
    /// is not `2^k × 2^k` for `k = wires.len()`
    pub fn apply_matrix(&mut self, matrix: &[Complex64], wires: &[usize], inverse: bool) -> Result<()> {
        self.check_wires(wires)?;
        let expected = 1usize << (2 * wires.len());
        if wires.is_empty() || matrix.len() != expected {
            return Err(StateError::MatrixShape {
                len: matrix.len(),
                wires: wires.len(),
            });
        }
        kernels::apply_matrix(&mut self.data, self.num_qubits, matrix, wires, inverse);
        Ok(())
    }

    /// Apply a gate by kind
    ///
    /// # Errors
    /// Returns error if the operation is malformed or a wire is out of range
    pub fn apply_gate(&mut self, kind: GateKind, wires: &[usize], param: Option<f64>, adjoint: bool) -> Result<()> {
        let op = GateOp::new(kind, wires, param, adjoint)?;
        self.apply_op(&op, false)
    }

    /// Apply a gate operation, or its inverse when `inverse` is set
    ///
    /// The operation's own adjoint flag is honoured: `inverse` toggles it.
    pub fn apply_op(&mut self, op: &GateOp, inverse: bool) -> Result<()> {
        let matrix = op_matrix(op)?;
        self.apply_matrix(&matrix, op.wires(), op.is_adjoint() != inverse)
    }

    /// Apply operations in order
    pub fn apply_ops(&mut self, ops: &[GateOp]) -> Result<()> {
        ops.iter().try_for_each(|op| self.apply_op(op, false))
    }

    /// Undo operations: apply their inverses from last to first
    pub fn apply_ops_adjoint(&mut self, ops: &[GateOp]) -> Result<()> {
        ops.iter().rev().try_for_each(|op| self.apply_op(op, true))
    }

    /// Apply the generator of a parametric operation, returning its
    /// scaling factor
    ///
    /// The generator is Hermitian but in general not unitary, so the norm is
    /// not preserved. The returned factor `s` satisfies `dU/dθ = i·s·G·U`
    /// and already accounts for the operation's adjoint flag.
    ///
    /// # Errors
    /// Returns [`qgrad_core::QuantumError::UnsupportedGenerator`] (wrapped)
    /// for operations without a generator
    pub fn apply_generator(&mut self, op: &GateOp) -> Result<f64> {
        let generator = op_generator(op)?;
        self.apply_matrix(&generator.matrix, op.wires(), false)?;
        Ok(generator.scale)
    }

    fn check_wires(&self, wires: &[usize]) -> Result<()> {
        ensure_wires_in_range(wires, self.num_qubits)?;
        ensure_distinct_wires(wires)?;
        Ok(())
    }
}
