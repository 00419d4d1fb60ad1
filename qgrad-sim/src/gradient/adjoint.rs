//! Adjoint-method Jacobian
//!
//! For a circuit `U = U_N ⋯ U_1` acting on `|ψ₀⟩` and observables `O_k`,
//! the derivative with respect to the parameter of gate `U_i(θ)` is
//!
//! ```text
//! d⟨O_k⟩/dθ = 2·Re(i·s·⟨φ_k,i|G_i|ψ_i⟩)
//! ```
//!
//! where `|ψ_i⟩ = U_i ⋯ U_1|ψ₀⟩`, `⟨φ_k,i| = ⟨ψ_N|O_k U_N ⋯ U_{i+1}` and
//! `dU_i/dθ = i·s·G_i·U_i`. The engine evolves the ket forward once, forms
//! one bra per observable from the final ket, then walks the circuit
//! backwards, reading off derivatives and un-applying each gate from the
//! ket and every bra.

use crate::config::{JacobianConfig, NORM_TOLERANCE};
use crate::error::{Result, SimulatorError};
use crate::jacobian::Jacobian;
use num_complex::Complex64;
use qgrad_core::{Circuit, GateOp, TrainableParams};
use qgrad_linalg::inner_prod_c_with;
use qgrad_state::{Observable, StateVector};
use rayon::prelude::*;

const LOG_TARGET: &str = "qgrad_sim::adjoint";

/// Adjoint Jacobian engine
///
/// # Example
/// ```
/// use qgrad_core::{Circuit, GateKind, GateOp, TrainableParams};
/// use qgrad_sim::{AdjointJacobian, JacobianConfig};
/// use qgrad_state::{NamedObservable, Observable, StateVector};
///
/// let theta = 0.4;
/// let mut circuit = Circuit::new(1);
/// circuit.push(GateOp::parametric(GateKind::RX, &[0], theta).unwrap()).unwrap();
///
/// let engine = AdjointJacobian::new(JacobianConfig::default()).unwrap();
/// let jac = engine
///     .jacobian(
///         &StateVector::new(1).unwrap(),
///         &circuit,
///         &[Observable::named(NamedObservable::PauliZ, 0)],
///         &TrainableParams::all(1),
///     )
///     .unwrap();
/// assert!((jac.get(0, 0) + theta.sin()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdjointJacobian {
    config: JacobianConfig,
}

impl AdjointJacobian {
    /// Create an engine
    ///
    /// # Errors
    /// Returns [`SimulatorError::InvalidConfig`] if the configuration is invalid
    pub fn new(config: JacobianConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Engine configuration
    pub fn config(&self) -> &JacobianConfig {
        &self.config
    }

    /// Jacobian of `observables` with respect to the `trainable` parameters
    /// of `circuit`, starting from `psi`
    ///
    /// # Errors
    /// Returns error if the inputs disagree on sizes, an observable touches
    /// a wire outside the register, or a trainable gate has no generator
    pub fn jacobian(
        &self,
        psi: &StateVector,
        circuit: &Circuit,
        observables: &[Observable],
        trainable: &TrainableParams,
    ) -> Result<Jacobian> {
        let mut jac = Jacobian::zeros(observables.len(), trainable.len());
        self.run(psi, jac.as_mut_slice(), circuit, observables, trainable, None)?;
        Ok(jac)
    }

    /// Like [`jacobian`](Self::jacobian), also returning the expectation
    /// values of the observables at the final state
    pub fn jacobian_with_values(
        &self,
        psi: &StateVector,
        circuit: &Circuit,
        observables: &[Observable],
        trainable: &TrainableParams,
    ) -> Result<(Jacobian, Vec<f64>)> {
        let mut jac = Jacobian::zeros(observables.len(), trainable.len());
        let mut values = Vec::with_capacity(observables.len());
        self.run(psi, jac.as_mut_slice(), circuit, observables, trainable, Some(&mut values))?;
        Ok((jac, values))
    }

    /// Write the Jacobian into a caller-owned row-major buffer of
    /// (#observables × #trainable parameters) entries
    ///
    /// The buffer is overwritten in full.
    ///
    /// # Errors
    /// Returns [`SimulatorError::JacobianShape`] if the buffer has the wrong
    /// length, plus the errors of [`jacobian`](Self::jacobian)
    pub fn jacobian_into(
        &self,
        psi: &StateVector,
        jac: &mut [f64],
        circuit: &Circuit,
        observables: &[Observable],
        trainable: &TrainableParams,
    ) -> Result<()> {
        self.run(psi, jac, circuit, observables, trainable, None)
    }

    /// Expectation values of `observables` at the end of `circuit`
    pub fn expectation_values(
        &self,
        psi: &StateVector,
        circuit: &Circuit,
        observables: &[Observable],
    ) -> Result<Vec<f64>> {
        self.check_inputs(psi, circuit, observables)?;
        let ket = self.forward(psi, circuit)?;
        observables
            .iter()
            .map(|obs| obs.expectation_value(&ket).map_err(SimulatorError::from))
            .collect()
    }

    fn run(
        &self,
        psi: &StateVector,
        jac: &mut [f64],
        circuit: &Circuit,
        observables: &[Observable],
        trainable: &TrainableParams,
        values: Option<&mut Vec<f64>>,
    ) -> Result<()> {
        let rows = observables.len();
        let cols = trainable.len();
        if jac.len() != rows * cols {
            return Err(SimulatorError::JacobianShape {
                rows,
                cols,
                actual: jac.len(),
            });
        }
        self.check_inputs(psi, circuit, observables)?;
        if let Some(index) = trainable.max_index().filter(|&i| i >= circuit.num_params()) {
            return Err(SimulatorError::InvalidTrainableParam {
                index,
                num_params: circuit.num_params(),
            });
        }
        jac.fill(0.0);

        log::debug!(
            target: LOG_TARGET,
            "jacobian: {} qubits, {} ops, {} observables, {} trainable",
            circuit.num_qubits(),
            circuit.len(),
            rows,
            cols
        );

        // Forward phase
        let mut ket = self.forward(psi, circuit)?;

        // Bra phase
        let mut bras = self.init_bras(&ket, observables)?;
        if let Some(values) = values {
            values.clear();
            values.extend(bras.iter().map(|bra| {
                inner_prod_c_with(ket.amplitudes(), bra.amplitudes(), &self.config.kernel).re
            }));
        }

        // Reverse phase. Gates before the first trainable one cannot add
        // entries, so the walk stops there.
        let ops = circuit.operations();
        let param_indices = circuit.param_indices();
        let first_trainable = param_indices
            .iter()
            .position(|p| p.is_some_and(|p| trainable.contains(p)));
        let Some(first_trainable) = first_trainable else {
            log::debug!(target: LOG_TARGET, "no trainable gate, jacobian is zero");
            return Ok(());
        };

        for i in (first_trainable..ops.len()).rev() {
            let op = &ops[i];
            if let Some(col) = param_indices[i].and_then(|p| trainable.column(p)) {
                log::trace!(target: LOG_TARGET, "gate {} {}: column {}", i, op, col);
                self.accumulate_column(&ket, &bras, op, col, cols, jac)?;
            } else {
                log::trace!(target: LOG_TARGET, "gate {} {}: not trainable", i, op);
            }

            if i == first_trainable {
                break;
            }
            ket.apply_op(op, true)?;
            self.for_each_bra(&mut bras, |bra| bra.apply_op(op, true))?;
        }

        log::debug!(target: LOG_TARGET, "reverse pass stopped at gate {}", first_trainable);
        Ok(())
    }

    fn check_inputs(&self, psi: &StateVector, circuit: &Circuit, observables: &[Observable]) -> Result<()> {
        if psi.num_qubits() != circuit.num_qubits() {
            return Err(SimulatorError::QubitCountMismatch {
                state: psi.num_qubits(),
                circuit: circuit.num_qubits(),
            });
        }
        for obs in observables {
            obs.check_wires(psi.num_qubits())?;
        }
        Ok(())
    }

    fn forward(&self, psi: &StateVector, circuit: &Circuit) -> Result<StateVector> {
        let mut ket = psi.clone();
        if !self.config.apply_forward_pass {
            return Ok(ket);
        }

        ket.apply_ops(circuit.operations())?;
        if self.config.check_norm {
            let (before, after) = (psi.norm(), ket.norm());
            if (after - before).abs() > NORM_TOLERANCE * before.max(1.0) {
                return Err(SimulatorError::NormNotPreserved { before, after });
            }
        }
        log::debug!(target: LOG_TARGET, "forward pass applied {} ops", circuit.len());
        Ok(ket)
    }

    fn init_bras(&self, ket: &StateVector, observables: &[Observable]) -> Result<Vec<StateVector>> {
        let bra = |obs: &Observable| -> Result<StateVector> {
            let mut bra = ket.clone();
            obs.apply_to(&mut bra)?;
            Ok(bra)
        };
        if self.config.parallel_observables {
            observables.par_iter().map(bra).collect()
        } else {
            observables.iter().map(bra).collect()
        }
    }

    fn for_each_bra<F>(&self, bras: &mut [StateVector], f: F) -> Result<()>
    where
        F: Fn(&mut StateVector) -> qgrad_state::Result<()> + Send + Sync,
    {
        if self.config.parallel_observables {
            bras.par_iter_mut().try_for_each(f)?;
        } else {
            bras.iter_mut().try_for_each(f)?;
        }
        Ok(())
    }

    /// Add `2·Re(i·s·⟨bra|G|ket⟩)` for every bra to column `col`
    fn accumulate_column(
        &self,
        ket: &StateVector,
        bras: &[StateVector],
        op: &GateOp,
        col: usize,
        cols: usize,
        jac: &mut [f64],
    ) -> Result<()> {
        let mut generated = ket.clone();
        let scale = generated.apply_generator(op)?;
        let factor = Complex64::new(0.0, scale);
        let kernel = &self.config.kernel;

        let entry = |bra: &StateVector| {
            let overlap = inner_prod_c_with(bra.amplitudes(), generated.amplitudes(), kernel);
            2.0 * (factor * overlap).re
        };
        let entries: Vec<f64> = if self.config.parallel_observables {
            bras.par_iter().map(entry).collect()
        } else {
            bras.iter().map(entry).collect()
        };

        for (row, value) in entries.into_iter().enumerate() {
            jac[row * cols + col] += value;
        }
        Ok(())
    }
}
