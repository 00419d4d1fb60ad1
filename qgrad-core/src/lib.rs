//! Core types for the qgrad adjoint-differentiation simulator
//!
//! This crate provides the data model every other qgrad crate shares:
//! - [`GateKind`]: closed enumeration of supported gate kinds
//! - [`GateOp`]: a gate kind bound to wires, an optional angle and an adjoint flag
//! - [`Circuit`]: an ordered list of operations with global parameter indices
//! - [`TrainableParams`]: the ordered set of parameter indices to differentiate
//! - [`QuantumError`]: construction and unsupported-operation errors
//!
//! # Example
//! ```
//! use qgrad_core::{Circuit, GateKind, GateOp};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.push(GateOp::parametric(GateKind::RX, &[0], 0.3).unwrap()).unwrap();
//! circuit.push(GateOp::fixed(GateKind::CNOT, &[0, 1]).unwrap()).unwrap();
//! assert_eq!(circuit.num_params(), 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod trainable;

pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{GateKind, GateOp};
pub use num_complex::Complex64;
pub use trainable::TrainableParams;

/// Type alias for results in qgrad
pub type Result<T> = std::result::Result<T, QuantumError>;
