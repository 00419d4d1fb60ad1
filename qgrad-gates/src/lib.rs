//! Gate matrices and generators for qgrad
//!
//! This crate turns a [`GateKind`](qgrad_core::GateKind) into the dense
//! matrix the state container applies, and into the generator used by the
//! adjoint Jacobian engine.
//!
//! # Examples
//!
//! ```
//! use qgrad_core::GateKind;
//! use qgrad_gates::{matrices, GateMatrices};
//!
//! // Fixed gates come from compile-time constants
//! let h = GateKind::Hadamard.matrix(None).unwrap();
//! assert_eq!(h.len(), 4);
//!
//! // Parametric gates are built from their angle
//! let rx = GateKind::RX.matrix(Some(0.5)).unwrap();
//! assert_eq!(rx, matrices::flatten(&matrices::rotation_x(0.5)));
//!
//! // RX(θ) = exp(-iθX/2): generator X, scaling factor -1/2
//! let generator = GateKind::RX.generator().unwrap();
//! assert_eq!(generator.scale, -0.5);
//! ```

pub mod generators;
pub mod matrices;

pub use generators::Generator;

use num_complex::Complex64;
use qgrad_core::{GateKind, GateOp, QuantumError, Result};
use std::borrow::Cow;

/// Matrix and generator construction for a gate kind
pub trait GateMatrices {
    /// Row-major unitary for the given angle
    ///
    /// # Errors
    /// Returns [`QuantumError::MissingParameter`] when a parametric kind gets no
    /// angle, and [`QuantumError::UnsupportedGate`] for kinds whose matrix is not
    /// derivable from the kind alone.
    fn matrix(&self, param: Option<f64>) -> Result<Vec<Complex64>>;

    /// Generator `G` and scaling factor `s` with `dU/dθ = i·s·G·U`
    ///
    /// # Errors
    /// Returns [`QuantumError::UnsupportedGenerator`] for gates without one.
    fn generator(&self) -> Result<Generator>;
}

impl GateMatrices for GateKind {
    fn matrix(&self, param: Option<f64>) -> Result<Vec<Complex64>> {
        use matrices::*;

        let theta = || param.ok_or_else(|| QuantumError::MissingParameter(self.name().to_string()));

        let matrix = match self {
            GateKind::Identity => flatten(&IDENTITY),
            GateKind::PauliX => flatten(&PAULI_X),
            GateKind::PauliY => flatten(&PAULI_Y),
            GateKind::PauliZ => flatten(&PAULI_Z),
            GateKind::Hadamard => flatten(&HADAMARD),
            GateKind::S => flatten(&S_GATE),
            GateKind::T => flatten(&T_GATE),
            GateKind::CNOT => flatten(&CNOT),
            GateKind::CZ => flatten(&CZ),
            GateKind::SWAP => flatten(&SWAP),
            GateKind::Toffoli => flatten(&TOFFOLI),
            GateKind::CSWAP => flatten(&FREDKIN),
            GateKind::RX => flatten(&rotation_x(theta()?)),
            GateKind::RY => flatten(&rotation_y(theta()?)),
            GateKind::RZ => flatten(&rotation_z(theta()?)),
            GateKind::PhaseShift => flatten(&phase(theta()?)),
            GateKind::CRX => flatten(&controlled(&rotation_x(theta()?))),
            GateKind::CRY => flatten(&controlled(&rotation_y(theta()?))),
            GateKind::CRZ => flatten(&controlled(&rotation_z(theta()?))),
            GateKind::ControlledPhaseShift => flatten(&controlled_phase(theta()?)),
            GateKind::IsingXX => flatten(&rxx(theta()?)),
            GateKind::IsingYY => flatten(&ryy(theta()?)),
            GateKind::IsingZZ => flatten(&rzz(theta()?)),
            GateKind::Matrix => return Err(QuantumError::UnsupportedGate(self.name().to_string())),
        };
        Ok(matrix)
    }

    fn generator(&self) -> Result<Generator> {
        generators::generator(*self)
    }
}

/// Matrix of a gate operation, borrowed for explicit unitaries
pub fn op_matrix(op: &GateOp) -> Result<Cow<'_, [Complex64]>> {
    match op.matrix() {
        Some(matrix) => Ok(Cow::Borrowed(matrix)),
        None => Ok(Cow::Owned(op.kind().matrix(op.param())?)),
    }
}

/// Generator of a gate operation, with the scaling factor negated for adjoint ops
pub fn op_generator(op: &GateOp) -> Result<Generator> {
    let mut generator = op.kind().generator()?;
    if op.is_adjoint() {
        generator.scale = -generator.scale;
    }
    Ok(generator)
}
