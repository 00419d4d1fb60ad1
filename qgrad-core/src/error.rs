//! Error types for qgrad

use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Errors raised while building or interpreting circuits and observables
///
/// The variants fall into three groups: construction errors (malformed
/// shapes, wires or observables), unsupported operations (no matrix or
/// generator exists for the requested gate) and features that are planned
/// but not implemented yet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Buffer length is not a power of two
    #[error("Invalid dimension {dimension}: expected a power of two")]
    InvalidDimension { dimension: usize },

    /// Flattened matrix is not a square power-of-two operator
    #[error("Invalid matrix of {len} elements: {reason}")]
    InvalidMatrix { len: usize, reason: &'static str },

    /// Wire index outside the register
    #[error("Invalid wire {wire}: register has only {num_qubits} qubits")]
    InvalidWire { wire: usize, num_qubits: usize },

    /// Same wire listed twice for one operator
    #[error("Duplicate wire {0} in operation")]
    DuplicateWire(usize),

    /// Operator applied to the wrong number of wires
    #[error("Gate '{gate}' requires {expected} wires, but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Parametric gate built without an angle
    #[error("Gate '{0}' requires a parameter")]
    MissingParameter(String),

    /// Malformed observable description
    #[error("Invalid observable: {0}")]
    InvalidObservable(String),

    /// Gate name with no known matrix
    #[error("Unsupported gate '{0}'")]
    UnsupportedGate(String),

    /// Gate with no known generator
    #[error("Gate '{0}' has no generator and cannot be differentiated")]
    UnsupportedGenerator(String),

    /// Planned functionality that is not available yet
    #[error("Function is not implemented: {0}")]
    NotImplemented(String),

    /// Precondition violation tagged with the caller's source location
    #[error("[{location}]: {message}")]
    Abort {
        message: String,
        location: SourceLocation,
    },
}

/// File and line of the code that raised an [`QuantumError::Abort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}][Line:{}", self.file, self.line)
    }
}

impl QuantumError {
    /// Create an invalid wire error
    pub fn invalid_wire(wire: usize, num_qubits: usize) -> Self {
        Self::InvalidWire { wire, num_qubits }
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid observable error
    pub fn invalid_observable(message: impl Into<String>) -> Self {
        Self::InvalidObservable(message.into())
    }

    /// Create an abort error carrying the caller's file and line
    #[track_caller]
    pub fn abort(message: impl Into<String>) -> Self {
        let caller = Location::caller();
        Self::Abort {
            message: message.into(),
            location: SourceLocation {
                file: caller.file(),
                line: caller.line(),
            },
        }
    }

    /// Whether this error marks an unsupported operation rather than bad input
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedGate(_) | Self::UnsupportedGenerator(_))
    }
}

/// Check that no wire appears twice in `wires`
pub fn ensure_distinct_wires(wires: &[usize]) -> Result<(), QuantumError> {
    for i in 0..wires.len() {
        for j in (i + 1)..wires.len() {
            if wires[i] == wires[j] {
                return Err(QuantumError::DuplicateWire(wires[i]));
            }
        }
    }
    Ok(())
}

/// Check that every wire addresses a qubit of an `num_qubits` register
pub fn ensure_wires_in_range(wires: &[usize], num_qubits: usize) -> Result<(), QuantumError> {
    match wires.iter().find(|&&w| w >= num_qubits) {
        Some(&wire) => Err(QuantumError::invalid_wire(wire, num_qubits)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_wire_error() {
        let err = QuantumError::invalid_wire(5, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("5"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_invalid_qubit_count_error() {
        let err = QuantumError::invalid_qubit_count("CNOT", 2, 1);
        let msg = format!("{}", err);
        assert!(msg.contains("CNOT"));
        assert!(msg.contains("2"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn test_abort_records_caller() {
        let err = QuantumError::abort("bad shape");
        match &err {
            QuantumError::Abort { message, location } => {
                assert_eq!(message, "bad shape");
                assert!(location.file.ends_with("error.rs"));
                assert!(location.line > 0);
            },
            other => panic!("expected Abort, got {:?}", other),
        }
        assert!(err.to_string().contains("Line:"));
    }

    #[test]
    fn test_unsupported_is_distinct_from_not_implemented() {
        assert!(QuantumError::UnsupportedGenerator("H".into()).is_unsupported());
        assert!(QuantumError::UnsupportedGate("Foo".into()).is_unsupported());
        assert!(!QuantumError::NotImplemented("sampling".into()).is_unsupported());
    }

    #[test]
    fn test_wire_checks() {
        assert!(ensure_distinct_wires(&[0, 1, 2]).is_ok());
        assert_eq!(ensure_distinct_wires(&[0, 2, 0]), Err(QuantumError::DuplicateWire(0)));
        assert!(ensure_wires_in_range(&[0, 1], 2).is_ok());
        assert_eq!(
            ensure_wires_in_range(&[0, 3], 2),
            Err(QuantumError::invalid_wire(3, 2))
        );
    }
}
