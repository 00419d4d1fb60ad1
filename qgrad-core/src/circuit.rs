//! Quantum circuit representation

use crate::error::ensure_wires_in_range;
use crate::{GateOp, QuantumError, Result};

/// A quantum circuit
///
/// Holds the ordered gate operations together with the parallel array of
/// global parameter indices: entry `i` is `Some(p)` when operation `i`
/// consumes global parameter `p`.
///
/// # Example
/// ```
/// use qgrad_core::{Circuit, GateKind, GateOp};
///
/// let mut circuit = Circuit::new(3);
/// circuit.push(GateOp::parametric(GateKind::RX, &[0], 0.1).unwrap()).unwrap();
/// circuit.push(GateOp::fixed(GateKind::Hadamard, &[1]).unwrap()).unwrap();
/// circuit.push(GateOp::parametric(GateKind::RY, &[2], 0.2).unwrap()).unwrap();
///
/// assert_eq!(circuit.param_index(0), Some(0));
/// assert_eq!(circuit.param_index(1), None);
/// assert_eq!(circuit.param_index(2), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<GateOp>,
    param_indices: Vec<Option<usize>>,
    num_params: usize,
}

impl Circuit {
    /// Create a new circuit over `num_qubits` wires
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::new(),
            param_indices: Vec::new(),
            num_params: 0,
        }
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
            param_indices: Vec::with_capacity(capacity),
            num_params: 0,
        }
    }

    /// Build a circuit from `(name, wires, param, adjoint)` tuples
    ///
    /// Parameter indices are assigned in order of appearance.
    pub fn from_names<'a, I>(num_qubits: usize, ops: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [usize], Option<f64>, bool)>,
    {
        let mut circuit = Self::new(num_qubits);
        for (name, wires, param, adjoint) in ops {
            circuit.push(GateOp::from_name(name, wires, param, adjoint)?)?;
        }
        Ok(circuit)
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operations
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of global parameters referenced by the circuit
    #[inline]
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    /// Append an operation, assigning the next global parameter index
    /// if the operation is parametric
    ///
    /// # Errors
    /// Returns error if any wire is out of range
    pub fn push(&mut self, op: GateOp) -> Result<()> {
        let index = op.is_parametric().then_some(self.num_params);
        self.push_with_param_index(op, index)
    }

    /// Append an operation with an explicit global parameter index
    ///
    /// # Errors
    /// Returns error if any wire is out of range, or if a parameter index is
    /// given for a non-parametric operation or omitted for a parametric one
    pub fn push_with_param_index(&mut self, op: GateOp, param_index: Option<usize>) -> Result<()> {
        ensure_wires_in_range(op.wires(), self.num_qubits)?;
        match (op.is_parametric(), param_index) {
            (true, None) => return Err(QuantumError::MissingParameter(op.name().to_string())),
            (false, Some(_)) => {
                return Err(QuantumError::abort(format!(
                    "parameter index given for non-parametric gate {}",
                    op.name()
                )))
            },
            _ => {},
        }
        if let Some(index) = param_index {
            self.num_params = self.num_params.max(index + 1);
        }
        self.operations.push(op);
        self.param_indices.push(param_index);
        Ok(())
    }

    /// Get the operations in order
    #[inline]
    pub fn operations(&self) -> &[GateOp] {
        &self.operations
    }

    /// Global parameter indices, parallel to [`Circuit::operations`]
    #[inline]
    pub fn param_indices(&self) -> &[Option<usize>] {
        &self.param_indices
    }

    /// Global parameter index of operation `i`
    #[inline]
    pub fn param_index(&self, i: usize) -> Option<usize> {
        self.param_indices.get(i).copied().flatten()
    }

    /// Current parameter values, indexed by global parameter index
    pub fn parameters(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.num_params];
        for (op, index) in self.operations.iter().zip(&self.param_indices) {
            if let (Some(i), Some(theta)) = (index, op.param()) {
                values[*i] = theta;
            }
        }
        values
    }

    /// Rebuild the circuit with new parameter values
    ///
    /// # Errors
    /// Returns error if `values` is shorter than [`Circuit::num_params`]
    pub fn with_parameters(&self, values: &[f64]) -> Result<Self> {
        if values.len() < self.num_params {
            return Err(QuantumError::abort(format!(
                "expected {} parameter values, got {}",
                self.num_params,
                values.len()
            )));
        }
        let mut circuit = Self::with_capacity(self.num_qubits, self.len());
        for (op, index) in self.operations.iter().zip(&self.param_indices) {
            let op = match index {
                Some(i) => GateOp::new(op.kind(), op.wires(), Some(values[*i]), op.is_adjoint())?,
                None => op.clone(),
            };
            circuit.push_with_param_index(op, *index)?;
        }
        Ok(circuit)
    }

    /// Iterate over `(operation, parameter index)` pairs
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&GateOp, Option<usize>)> + '_ {
        self.operations.iter().zip(self.param_indices.iter().copied())
    }
}
