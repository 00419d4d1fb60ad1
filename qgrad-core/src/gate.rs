//! Gate kinds and gate operations
//!
//! Gate names are resolved to a [`GateKind`] once, when the operation is
//! built. Everything downstream (matrix construction, generator lookup,
//! adjoint application) matches on the enum instead of comparing strings.

use crate::error::ensure_distinct_wires;
use crate::{QuantumError, Result};
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Supported gate kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Identity,
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    S,
    T,
    CNOT,
    CZ,
    SWAP,
    Toffoli,
    CSWAP,
    RX,
    RY,
    RZ,
    PhaseShift,
    CRX,
    CRY,
    CRZ,
    ControlledPhaseShift,
    IsingXX,
    IsingYY,
    IsingZZ,
    /// Explicit unitary carried by the operation
    Matrix,
}

impl GateKind {
    /// All named kinds, in catalog order
    pub const ALL: [GateKind; 23] = [
        GateKind::Identity,
        GateKind::PauliX,
        GateKind::PauliY,
        GateKind::PauliZ,
        GateKind::Hadamard,
        GateKind::S,
        GateKind::T,
        GateKind::CNOT,
        GateKind::CZ,
        GateKind::SWAP,
        GateKind::Toffoli,
        GateKind::CSWAP,
        GateKind::RX,
        GateKind::RY,
        GateKind::RZ,
        GateKind::PhaseShift,
        GateKind::CRX,
        GateKind::CRY,
        GateKind::CRZ,
        GateKind::ControlledPhaseShift,
        GateKind::IsingXX,
        GateKind::IsingYY,
        GateKind::IsingZZ,
    ];

    /// Conventional gate name
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Identity => "Identity",
            GateKind::PauliX => "PauliX",
            GateKind::PauliY => "PauliY",
            GateKind::PauliZ => "PauliZ",
            GateKind::Hadamard => "Hadamard",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::CNOT => "CNOT",
            GateKind::CZ => "CZ",
            GateKind::SWAP => "SWAP",
            GateKind::Toffoli => "Toffoli",
            GateKind::CSWAP => "CSWAP",
            GateKind::RX => "RX",
            GateKind::RY => "RY",
            GateKind::RZ => "RZ",
            GateKind::PhaseShift => "PhaseShift",
            GateKind::CRX => "CRX",
            GateKind::CRY => "CRY",
            GateKind::CRZ => "CRZ",
            GateKind::ControlledPhaseShift => "ControlledPhaseShift",
            GateKind::IsingXX => "IsingXX",
            GateKind::IsingYY => "IsingYY",
            GateKind::IsingZZ => "IsingZZ",
            GateKind::Matrix => "QubitUnitary",
        }
    }

    /// Resolve a gate name
    ///
    /// # Errors
    /// Returns [`QuantumError::UnsupportedGate`] for names outside the catalog.
    pub fn from_name(name: &str) -> Result<Self> {
        let kind = match name {
            "Identity" | "I" => GateKind::Identity,
            "PauliX" | "X" => GateKind::PauliX,
            "PauliY" | "Y" => GateKind::PauliY,
            "PauliZ" | "Z" => GateKind::PauliZ,
            "Hadamard" | "H" => GateKind::Hadamard,
            "S" => GateKind::S,
            "T" => GateKind::T,
            "CNOT" | "CX" => GateKind::CNOT,
            "CZ" => GateKind::CZ,
            "SWAP" => GateKind::SWAP,
            "Toffoli" | "CCNOT" => GateKind::Toffoli,
            "CSWAP" => GateKind::CSWAP,
            "RX" => GateKind::RX,
            "RY" => GateKind::RY,
            "RZ" => GateKind::RZ,
            "PhaseShift" => GateKind::PhaseShift,
            "CRX" => GateKind::CRX,
            "CRY" => GateKind::CRY,
            "CRZ" => GateKind::CRZ,
            "ControlledPhaseShift" => GateKind::ControlledPhaseShift,
            "IsingXX" => GateKind::IsingXX,
            "IsingYY" => GateKind::IsingYY,
            "IsingZZ" => GateKind::IsingZZ,
            "QubitUnitary" => GateKind::Matrix,
            other => return Err(QuantumError::UnsupportedGate(other.to_string())),
        };
        Ok(kind)
    }

    /// Number of wires the gate acts on, `None` for explicit matrices
    pub fn num_wires(self) -> Option<usize> {
        match self {
            GateKind::Identity
            | GateKind::PauliX
            | GateKind::PauliY
            | GateKind::PauliZ
            | GateKind::Hadamard
            | GateKind::S
            | GateKind::T
            | GateKind::RX
            | GateKind::RY
            | GateKind::RZ
            | GateKind::PhaseShift => Some(1),
            GateKind::CNOT
            | GateKind::CZ
            | GateKind::SWAP
            | GateKind::CRX
            | GateKind::CRY
            | GateKind::CRZ
            | GateKind::ControlledPhaseShift
            | GateKind::IsingXX
            | GateKind::IsingYY
            | GateKind::IsingZZ => Some(2),
            GateKind::Toffoli | GateKind::CSWAP => Some(3),
            GateKind::Matrix => None,
        }
    }

    /// Whether the gate takes a single real angle
    pub fn is_parametric(self) -> bool {
        matches!(
            self,
            GateKind::RX
                | GateKind::RY
                | GateKind::RZ
                | GateKind::PhaseShift
                | GateKind::CRX
                | GateKind::CRY
                | GateKind::CRZ
                | GateKind::ControlledPhaseShift
                | GateKind::IsingXX
                | GateKind::IsingYY
                | GateKind::IsingZZ
        )
    }

    /// Whether the gate is its own inverse
    pub fn is_hermitian(self) -> bool {
        matches!(
            self,
            GateKind::Identity
                | GateKind::PauliX
                | GateKind::PauliY
                | GateKind::PauliZ
                | GateKind::Hadamard
                | GateKind::CNOT
                | GateKind::CZ
                | GateKind::SWAP
                | GateKind::Toffoli
                | GateKind::CSWAP
        )
    }
}

impl FromStr for GateKind {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of wires addressed by a flattened square matrix
///
/// # Errors
/// Returns [`QuantumError::InvalidMatrix`] if the matrix is smaller than 2×2,
/// its length is not a power of two, or it is not a perfect square.
pub fn dim_size(len: usize) -> Result<usize> {
    if len < 4 {
        return Err(QuantumError::InvalidMatrix {
            len,
            reason: "the matrix must be at least 2x2",
        });
    }
    if !len.is_power_of_two() {
        return Err(QuantumError::InvalidMatrix {
            len,
            reason: "the matrix size must be a power of 2",
        });
    }
    let log_len = len.trailing_zeros() as usize;
    if log_len % 2 != 0 {
        return Err(QuantumError::InvalidMatrix {
            len,
            reason: "the matrix must be a perfect square",
        });
    }
    Ok(log_len / 2)
}

/// A gate applied to specific wires
///
/// Immutable once constructed. Parametric kinds always carry an angle;
/// [`GateKind::Matrix`] operations always carry their unitary.
///
/// # Example
/// ```
/// use qgrad_core::{GateKind, GateOp};
///
/// let op = GateOp::parametric(GateKind::CRY, &[0, 2], 0.25).unwrap();
/// assert_eq!(op.wires(), &[0, 2]);
/// assert_eq!(op.param(), Some(0.25));
/// ```
#[derive(Clone, PartialEq)]
pub struct GateOp {
    kind: GateKind,
    wires: SmallVec<[usize; 3]>,
    param: Option<f64>,
    adjoint: bool,
    matrix: Option<Arc<[Complex64]>>,
}

impl GateOp {
    /// Create a new gate operation
    ///
    /// # Errors
    /// Returns error if:
    /// - the wire count doesn't match the gate
    /// - a wire is listed twice
    /// - a parametric gate has no parameter
    /// - `kind` is [`GateKind::Matrix`] (use [`GateOp::unitary`])
    pub fn new(kind: GateKind, wires: &[usize], param: Option<f64>, adjoint: bool) -> Result<Self> {
        let expected = kind
            .num_wires()
            .ok_or_else(|| QuantumError::abort("explicit matrices must be built with GateOp::unitary"))?;
        if wires.len() != expected {
            return Err(QuantumError::invalid_qubit_count(
                kind.name(),
                expected,
                wires.len(),
            ));
        }
        ensure_distinct_wires(wires)?;
        if kind.is_parametric() && param.is_none() {
            return Err(QuantumError::MissingParameter(kind.name().to_string()));
        }

        Ok(Self {
            kind,
            wires: SmallVec::from_slice(wires),
            param: if kind.is_parametric() { param } else { None },
            adjoint,
            matrix: None,
        })
    }

    /// Create a non-parametric gate operation
    pub fn fixed(kind: GateKind, wires: &[usize]) -> Result<Self> {
        Self::new(kind, wires, None, false)
    }

    /// Create a parametric gate operation
    pub fn parametric(kind: GateKind, wires: &[usize], param: f64) -> Result<Self> {
        Self::new(kind, wires, Some(param), false)
    }

    /// Create a gate operation from its name
    pub fn from_name(name: &str, wires: &[usize], param: Option<f64>, adjoint: bool) -> Result<Self> {
        Self::new(GateKind::from_name(name)?, wires, param, adjoint)
    }

    /// Create an operation carrying an explicit row-major unitary
    ///
    /// # Errors
    /// Returns error if the matrix is not a 2^k × 2^k operator with
    /// k = `wires.len()`, or if a wire is repeated.
    pub fn unitary(matrix: Vec<Complex64>, wires: &[usize], adjoint: bool) -> Result<Self> {
        let matrix_wires = dim_size(matrix.len())?;
        if matrix_wires != wires.len() {
            return Err(QuantumError::invalid_qubit_count(
                GateKind::Matrix.name(),
                matrix_wires,
                wires.len(),
            ));
        }
        ensure_distinct_wires(wires)?;

        Ok(Self {
            kind: GateKind::Matrix,
            wires: SmallVec::from_slice(wires),
            param: None,
            adjoint,
            matrix: Some(matrix.into()),
        })
    }

    /// Return the same operation with its adjoint flag toggled
    pub fn adjointed(&self) -> Self {
        let mut op = self.clone();
        op.adjoint = !op.adjoint;
        op
    }

    #[inline]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn wires(&self) -> &[usize] {
        &self.wires
    }

    #[inline]
    pub fn param(&self) -> Option<f64> {
        self.param
    }

    #[inline]
    pub fn is_adjoint(&self) -> bool {
        self.adjoint
    }

    /// Explicit matrix for [`GateKind::Matrix`] operations
    #[inline]
    pub fn matrix(&self) -> Option<&[Complex64]> {
        self.matrix.as_deref()
    }

    /// Whether this operation contributes a Jacobian column when trainable
    #[inline]
    pub fn is_parametric(&self) -> bool {
        self.kind.is_parametric()
    }
}

impl fmt::Debug for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())?;
        if self.adjoint {
            write!(f, "†")?;
        }
        if let Some(theta) = self.param {
            write!(f, "[{}]", theta)?;
        }
        write!(f, "(")?;
        for (i, w) in self.wires.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "q{}", w)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
