//! Error types for state vector operations

use qgrad_core::QuantumError;
use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid state dimension
    #[error("Invalid state dimension {dimension}, expected a power of 2 of at least 2")]
    InvalidDimension { dimension: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Operator matrix does not fit the wires it is applied to
    #[error("Matrix of {len} entries cannot act on {wires} wires")]
    MatrixShape { len: usize, wires: usize },

    /// Gate, wire or observable construction error
    #[error(transparent)]
    Quantum(#[from] QuantumError),
}

impl StateError {
    /// Whether the error reports an unknown gate or a missing generator
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StateError::Quantum(e) if e.is_unsupported())
    }
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;
