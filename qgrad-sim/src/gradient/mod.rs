//! Gradient computation for parametric circuits
//!
//! - [`AdjointJacobian`]: Jacobian of a batch of observables with respect
//!   to the trainable parameters, in one forward and one reverse pass

pub mod adjoint;

pub use adjoint::AdjointJacobian;
