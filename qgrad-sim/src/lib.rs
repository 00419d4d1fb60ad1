//! Adjoint-method Jacobian engine for qgrad
//!
//! Computes the Jacobian of a batch of observables with respect to the
//! trainable parameters of a circuit in a single forward pass plus a single
//! reverse pass, instead of two simulations per parameter.
//!
//! # Features
//!
//! - **Batched observables**: one Jacobian row per observable, all rows from
//!   the same pass
//! - **Trainable subsets**: only selected parameter indices produce columns
//! - **Parallel bras**: optional per-observable work on the rayon pool
//! - **BLAS**: the `blas` feature routes inner products through CBLAS
//!
//! # Example
//!
//! ```
//! use qgrad_core::{Circuit, GateKind, GateOp, TrainableParams};
//! use qgrad_sim::{AdjointJacobian, JacobianConfig};
//! use qgrad_state::{NamedObservable, Observable, StateVector};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.push(GateOp::parametric(GateKind::RY, &[0], 0.3).unwrap()).unwrap();
//! circuit.push(GateOp::fixed(GateKind::CNOT, &[0, 1]).unwrap()).unwrap();
//! circuit.push(GateOp::parametric(GateKind::RX, &[1], 0.8).unwrap()).unwrap();
//!
//! let observables = [
//!     Observable::named(NamedObservable::PauliZ, 0),
//!     Observable::named(NamedObservable::PauliZ, 1),
//! ];
//!
//! let engine = AdjointJacobian::new(JacobianConfig::default()).unwrap();
//! let jac = engine
//!     .jacobian(&StateVector::new(2).unwrap(), &circuit, &observables, &TrainableParams::all(2))
//!     .unwrap();
//! assert_eq!((jac.rows(), jac.cols()), (2, 2));
//! ```

pub mod config;
pub mod error;
pub mod gradient;
pub mod jacobian;

pub use config::JacobianConfig;
pub use error::{Result, SimulatorError};
pub use gradient::AdjointJacobian;
pub use jacobian::Jacobian;
