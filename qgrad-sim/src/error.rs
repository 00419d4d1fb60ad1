//! Error types for the Jacobian engine

use qgrad_core::QuantumError;
use qgrad_state::StateError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur while computing a Jacobian
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// State and circuit disagree on the register size
    #[error("State has {state} qubits but the circuit acts on {circuit}")]
    QubitCountMismatch { state: usize, circuit: usize },

    /// Output buffer does not match (#observables × #trainable parameters)
    #[error("Jacobian buffer holds {actual} entries, expected {rows}x{cols}")]
    JacobianShape { rows: usize, cols: usize, actual: usize },

    /// A trainable index refers to a parameter the circuit does not have
    #[error("Trainable parameter {index} out of range for a circuit with {num_params} parameters")]
    InvalidTrainableParam { index: usize, num_params: usize },

    /// The forward pass changed the norm of the state
    #[error("Forward pass changed the state norm from {before} to {after}")]
    NormNotPreserved { before: f64, after: f64 },

    /// Gate, wire or observable error
    #[error(transparent)]
    Quantum(#[from] QuantumError),

    /// State vector error
    #[error(transparent)]
    State(#[from] StateError),
}

impl SimulatorError {
    /// Whether the error reports an unknown gate or a missing generator
    pub fn is_unsupported(&self) -> bool {
        match self {
            SimulatorError::Quantum(e) => e.is_unsupported(),
            SimulatorError::State(e) => e.is_unsupported(),
            _ => false,
        }
    }
}
