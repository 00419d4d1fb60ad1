//! Dense state vector and observables for qgrad
//!
//! This crate provides the mutable amplitude buffer the adjoint engine
//! evolves, the kernels that apply gate, observable and generator matrices
//! to selected wires, and the observable model.
//!
//! # Example
//!
//! ```
//! use qgrad_core::{GateKind, GateOp};
//! use qgrad_state::{NamedObservable, Observable, StateVector};
//!
//! let mut state = StateVector::new(1).unwrap();
//! state.apply_op(&GateOp::parametric(GateKind::RY, &[0], 0.5).unwrap(), false).unwrap();
//!
//! let x = Observable::named(NamedObservable::PauliX, 0);
//! let expectation = x.expectation_value(&state).unwrap();
//! assert!((expectation - 0.5f64.sin()).abs() < 1e-12);
//! ```

pub mod error;
pub mod kernels;
pub mod observable;
pub mod state_vector;

pub use error::{Result, StateError};
pub use observable::{NamedObservable, Observable, ObservableTerm};
pub use state_vector::StateVector;
