//! Observables for expectation values and adjoint differentiation
//!
//! An observable is either a tensor product of elementary operators acting
//! on disjoint wires, or a weighted sum of such products. Elementary
//! operators are named (Pauli, Hadamard, identity) or carry an explicit
//! Hermitian matrix.
//!
//! Applying an observable to a state is the building block of the adjoint
//! method: the bra of each observable is `O|ψ⟩`, computed on a copy of the
//! final ket.

use crate::error::Result;
use crate::state_vector::StateVector;
use num_complex::Complex64;
use qgrad_core::error::{ensure_distinct_wires, ensure_wires_in_range};
use qgrad_core::gate::dim_size;
use qgrad_core::QuantumError;
use qgrad_gates::matrices::{self, flatten};
use qgrad_linalg::inner_prod_c;
use std::fmt;
use std::sync::Arc;

/// Tolerance used when checking that an explicit matrix is Hermitian
pub const HERMITIAN_TOLERANCE: f64 = 1e-10;

/// Named single-wire observable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedObservable {
    /// Identity operator
    Identity,
    /// Pauli X
    PauliX,
    /// Pauli Y
    PauliY,
    /// Pauli Z
    PauliZ,
    /// Hadamard
    Hadamard,
}

impl NamedObservable {
    /// Parse an observable name
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidObservable`] for unknown names
    pub fn from_name(name: &str) -> std::result::Result<Self, QuantumError> {
        match name {
            "Identity" => Ok(NamedObservable::Identity),
            "PauliX" => Ok(NamedObservable::PauliX),
            "PauliY" => Ok(NamedObservable::PauliY),
            "PauliZ" => Ok(NamedObservable::PauliZ),
            "Hadamard" => Ok(NamedObservable::Hadamard),
            other => Err(QuantumError::invalid_observable(format!("unknown observable '{}'", other))),
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            NamedObservable::Identity => "Identity",
            NamedObservable::PauliX => "PauliX",
            NamedObservable::PauliY => "PauliY",
            NamedObservable::PauliZ => "PauliZ",
            NamedObservable::Hadamard => "Hadamard",
        }
    }

    /// Row-major 2×2 matrix
    pub fn matrix(self) -> Vec<Complex64> {
        match self {
            NamedObservable::Identity => flatten(&matrices::IDENTITY),
            NamedObservable::PauliX => flatten(&matrices::PAULI_X),
            NamedObservable::PauliY => flatten(&matrices::PAULI_Y),
            NamedObservable::PauliZ => flatten(&matrices::PAULI_Z),
            NamedObservable::Hadamard => flatten(&matrices::HADAMARD),
        }
    }
}

impl fmt::Display for NamedObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One factor of a tensor-product observable
///
/// Only built through [`ObservableTerm::named`] and
/// [`ObservableTerm::hermitian`], so an explicit matrix is always a
/// Hermitian operator on distinct wires.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableTerm(Term);

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Named { op: NamedObservable, wire: usize },
    Hermitian { matrix: Arc<[Complex64]>, wires: Vec<usize> },
}

impl ObservableTerm {
    /// Named operator on `wire`
    pub fn named(op: NamedObservable, wire: usize) -> Self {
        ObservableTerm(Term::Named { op, wire })
    }

    /// Explicit Hermitian matrix on `wires`
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidMatrix`] if the matrix is not square
    /// with a power-of-two side, and [`QuantumError::InvalidObservable`] if it
    /// does not act on `wires.len()` wires, a wire is repeated, or it is not
    /// Hermitian
    pub fn hermitian(matrix: Vec<Complex64>, wires: &[usize]) -> std::result::Result<Self, QuantumError> {
        let num_wires = dim_size(matrix.len())?;
        if num_wires != wires.len() {
            return Err(QuantumError::invalid_observable(format!(
                "Hermitian matrix acts on {} wires but {} were given",
                num_wires,
                wires.len()
            )));
        }
        ensure_distinct_wires(wires)
            .map_err(|e| QuantumError::invalid_observable(format!("Hermitian on {:?}: {}", wires, e)))?;

        let dim = 1 << num_wires;
        for r in 0..dim {
            for c in r..dim {
                if (matrix[r * dim + c] - matrix[c * dim + r].conj()).norm() > HERMITIAN_TOLERANCE {
                    return Err(QuantumError::invalid_observable(format!(
                        "matrix is not Hermitian at ({}, {})",
                        r, c
                    )));
                }
            }
        }

        Ok(ObservableTerm(Term::Hermitian {
            matrix: matrix.into(),
            wires: wires.to_vec(),
        }))
    }

    /// Wires the term acts on
    pub fn wires(&self) -> &[usize] {
        match &self.0 {
            Term::Named { wire, .. } => std::slice::from_ref(wire),
            Term::Hermitian { wires, .. } => wires,
        }
    }

    /// Apply the operator to `state` in place
    pub fn apply_to(&self, state: &mut StateVector) -> Result<()> {
        match &self.0 {
            Term::Named {
                op: NamedObservable::Identity,
                wire,
            } => {
                ensure_wires_in_range(std::slice::from_ref(wire), state.num_qubits())?;
                Ok(())
            },
            Term::Named { op, wire } => state.apply_matrix(&op.matrix(), &[*wire], false),
            Term::Hermitian { matrix, wires } => state.apply_matrix(matrix, wires, false),
        }
    }
}

impl fmt::Display for ObservableTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Term::Named { op, wire } => write!(f, "{}[{}]", op, wire),
            Term::Hermitian { wires, .. } => write!(f, "Hermitian{:?}", wires),
        }
    }
}

/// Observable whose expectation value is measured and differentiated
///
/// The constructors are the only way to build one: products are non-empty
/// and their factors act on disjoint wires, so every observable is
/// Hermitian. Constructors other than [`Observable::from_names`] do not
/// know the register size; [`Observable::check_wires`] performs that check
/// and the Jacobian engine runs it on the whole batch before any state is
/// touched.
///
/// # Example
/// ```
/// use qgrad_state::{NamedObservable, Observable, ObservableTerm, StateVector};
///
/// let zz = Observable::tensor(vec![
///     ObservableTerm::named(NamedObservable::PauliZ, 0),
///     ObservableTerm::named(NamedObservable::PauliZ, 1),
/// ])
/// .unwrap();
/// let state = StateVector::new(2).unwrap();
/// assert_eq!(zz.expectation_value(&state).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Observable(Products);

#[derive(Debug, Clone, PartialEq)]
enum Products {
    /// Tensor product of factors on disjoint wires
    Tensor(Vec<ObservableTerm>),
    /// Weighted sum of tensor products
    Sum(Vec<(f64, Vec<ObservableTerm>)>),
}

impl Observable {
    /// Single named operator
    pub fn named(op: NamedObservable, wire: usize) -> Self {
        Observable(Products::Tensor(vec![ObservableTerm::named(op, wire)]))
    }

    /// Single explicit Hermitian matrix
    ///
    /// # Errors
    /// See [`ObservableTerm::hermitian`]
    pub fn hermitian(matrix: Vec<Complex64>, wires: &[usize]) -> std::result::Result<Self, QuantumError> {
        Ok(Observable(Products::Tensor(vec![ObservableTerm::hermitian(matrix, wires)?])))
    }

    /// Tensor product of factors
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidObservable`] if the product is empty
    /// or two factors share a wire
    pub fn tensor(terms: Vec<ObservableTerm>) -> std::result::Result<Self, QuantumError> {
        check_product(&terms)?;
        Ok(Observable(Products::Tensor(terms)))
    }

    /// Weighted sum of tensor products
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidObservable`] if the sum is empty or
    /// one of its products is malformed
    pub fn sum(terms: Vec<(f64, Vec<ObservableTerm>)>) -> std::result::Result<Self, QuantumError> {
        if terms.is_empty() {
            return Err(QuantumError::invalid_observable("empty sum"));
        }
        for (_, product) in &terms {
            check_product(product)?;
        }
        Ok(Observable(Products::Sum(terms)))
    }

    /// Build a tensor product from parallel name, parameter and wire lists
    ///
    /// An empty parameter entry selects a named operator on a single wire;
    /// a non-empty entry must belong to `"Hermitian"` and holds its
    /// row-major matrix.
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidObservable`] if the list lengths
    /// differ, a name is unknown, a wire list is malformed, or a wire
    /// exceeds `num_qubits`
    ///
    /// # Example
    /// ```
    /// use qgrad_state::Observable;
    ///
    /// let obs = Observable::from_names(2, &["PauliZ", "PauliX"], &[vec![], vec![]], &[vec![0], vec![1]]).unwrap();
    /// assert_eq!(obs.wires(), vec![0, 1]);
    /// ```
    pub fn from_names<S: AsRef<str>>(
        num_qubits: usize,
        names: &[S],
        params: &[Vec<Complex64>],
        wires: &[Vec<usize>],
    ) -> std::result::Result<Self, QuantumError> {
        if names.len() != params.len() || names.len() != wires.len() {
            return Err(QuantumError::invalid_observable(format!(
                "got {} names, {} parameter lists and {} wire lists",
                names.len(),
                params.len(),
                wires.len()
            )));
        }

        let mut terms = Vec::with_capacity(names.len());
        for ((name, param), term_wires) in names.iter().zip(params).zip(wires) {
            let name = name.as_ref();
            ensure_wires_in_range(term_wires, num_qubits)
                .map_err(|e| QuantumError::invalid_observable(format!("{}: {}", name, e)))?;

            let term = if param.is_empty() {
                let op = NamedObservable::from_name(name)?;
                match term_wires.as_slice() {
                    [wire] => ObservableTerm::named(op, *wire),
                    other => {
                        return Err(QuantumError::invalid_observable(format!(
                            "{} acts on one wire, got {:?}",
                            name, other
                        )))
                    },
                }
            } else if name == "Hermitian" {
                ObservableTerm::hermitian(param.clone(), term_wires)?
            } else {
                return Err(QuantumError::invalid_observable(format!(
                    "{} takes no matrix parameters",
                    name
                )));
            };
            terms.push(term);
        }
        Self::tensor(terms)
    }

    /// Whether the observable is a weighted sum rather than a single product
    pub fn is_sum(&self) -> bool {
        matches!(self.0, Products::Sum(_))
    }

    /// Sorted, deduplicated wires the observable touches
    pub fn wires(&self) -> Vec<usize> {
        let mut wires: Vec<usize> = match &self.0 {
            Products::Tensor(terms) => terms.iter().flat_map(|t| t.wires().iter().copied()).collect(),
            Products::Sum(terms) => terms
                .iter()
                .flat_map(|(_, product)| product.iter().flat_map(|t| t.wires().iter().copied()))
                .collect(),
        };
        wires.sort_unstable();
        wires.dedup();
        wires
    }

    /// Check every wire against a register of `num_qubits`
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidObservable`] naming the offending wire
    pub fn check_wires(&self, num_qubits: usize) -> std::result::Result<(), QuantumError> {
        match self.wires().last() {
            Some(&wire) if wire >= num_qubits => Err(QuantumError::invalid_observable(format!(
                "wire {} out of range for {} qubits",
                wire, num_qubits
            ))),
            _ => Ok(()),
        }
    }

    /// Replace `state` with `O|state⟩`
    ///
    /// Tensor factors are applied one after the other. A sum is accumulated
    /// from one fresh copy of the input per term.
    pub fn apply_to(&self, state: &mut StateVector) -> Result<()> {
        match &self.0 {
            Products::Tensor(terms) => terms.iter().try_for_each(|t| t.apply_to(state)),
            Products::Sum(terms) => {
                let mut total = vec![Complex64::new(0.0, 0.0); state.dimension()];
                for (coeff, product) in terms {
                    let mut branch = state.clone();
                    product.iter().try_for_each(|t| t.apply_to(&mut branch))?;
                    for (acc, amp) in total.iter_mut().zip(branch.amplitudes()) {
                        *acc += *amp * *coeff;
                    }
                }
                state.amplitudes_mut().copy_from_slice(&total);
                Ok(())
            },
        }
    }

    /// Compute ⟨ψ|O|ψ⟩
    pub fn expectation_value(&self, state: &StateVector) -> Result<f64> {
        let mut bra = state.clone();
        self.apply_to(&mut bra)?;
        Ok(inner_prod_c(state.amplitudes(), bra.amplitudes()).re)
    }
}

fn check_product(terms: &[ObservableTerm]) -> std::result::Result<(), QuantumError> {
    if terms.is_empty() {
        return Err(QuantumError::invalid_observable("empty tensor product"));
    }
    let wires: Vec<usize> = terms.iter().flat_map(|t| t.wires().iter().copied()).collect();
    ensure_distinct_wires(&wires)
        .map_err(|_| QuantumError::invalid_observable(format!("tensor factors overlap on wires {:?}", wires)))
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn product(f: &mut fmt::Formatter<'_>, terms: &[ObservableTerm]) -> fmt::Result {
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    write!(f, " @ ")?;
                }
                write!(f, "{}", term)?;
            }
            Ok(())
        }

        match &self.0 {
            Products::Tensor(terms) => product(f, terms),
            Products::Sum(terms) => {
                for (i, (coeff, terms)) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{:.4}·(", coeff)?;
                    product(f, terms)?;
                    write!(f, ")")?;
                }
                Ok(())
            },
        }
    }
}
