//! Gate matrices
//!
//! Fixed gates are compile-time constants; parametric gates are built from
//! their angle. Multi-wire matrices use the big-endian convention: the
//! first wire of an operation is the most significant bit of the local
//! index, so `CNOT` on wires `[c, t]` has its control on `c`.

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Row-major flattening of a square matrix
#[inline]
pub fn flatten<const N: usize>(matrix: &[[Complex64; N]; N]) -> Vec<Complex64> {
    matrix.iter().flatten().copied().collect()
}

// Single-qubit gate matrices (2x2)

/// Identity gate matrix
pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// Pauli-X gate matrix
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(INV_SQRT2, 0.0)],
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(-INV_SQRT2, 0.0)],
];

/// S gate matrix (√Z)
pub const S_GATE: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, I]];

/// T gate matrix (√S)
pub const T_GATE: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)], // e^(iπ/4)
];

/// Projector onto |1⟩
/// P1 = [[0, 0],
///       [0, 1]]
pub const PROJECTOR_1: [[Complex64; 2]; 2] = [[ZERO, ZERO], [ZERO, ONE]];

// Two-qubit gate matrices (4x4)

/// CNOT gate matrix, control on the first wire
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

/// CZ gate matrix
pub const CZ: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ZERO, NEG_ONE],
];

/// SWAP gate matrix
pub const SWAP: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

/// Projector onto |11⟩
pub const PROJECTOR_11: [[Complex64; 4]; 4] = [
    [ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
];

// Three-qubit gate matrices (8x8)

/// Toffoli gate matrix (CCNOT), controls on the first two wires
pub const TOFFOLI: [[Complex64; 8]; 8] = [
    [ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO],
];

/// Fredkin gate matrix (CSWAP), control on the first wire
pub const FREDKIN: [[Complex64; 8]; 8] = [
    [ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE],
];

// Parametric gates

/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_x(theta: f64) -> [[Complex64; 2]; 2] {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), Complex64::new(0.0, -s)],
        [Complex64::new(0.0, -s), Complex64::new(c, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_y(theta: f64) -> [[Complex64; 2]; 2] {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
        [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
    ]
}

/// RZ(θ) = [[e^(-iθ/2), 0       ],
///          [0,         e^(iθ/2)]]
#[inline]
pub fn rotation_z(theta: f64) -> [[Complex64; 2]; 2] {
    let (s, c) = (theta / 2.0).sin_cos();
    [[Complex64::new(c, -s), ZERO], [ZERO, Complex64::new(c, s)]]
}

/// P(θ) = [[1, 0     ],
///         [0, e^(iθ)]]
#[inline]
pub fn phase(theta: f64) -> [[Complex64; 2]; 2] {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

/// Controlled version of a single-qubit gate, control on the first wire
#[inline]
pub fn controlled(u: &[[Complex64; 2]; 2]) -> [[Complex64; 4]; 4] {
    [
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, u[0][0], u[0][1]],
        [ZERO, ZERO, u[1][0], u[1][1]],
    ]
}

/// CP(θ) = diag(1, 1, 1, e^(iθ))
#[inline]
pub fn controlled_phase(theta: f64) -> [[Complex64; 4]; 4] {
    controlled(&phase(theta))
}

/// RXX(θ) = exp(-iθ/2 X⊗X)
#[inline]
pub fn rxx(theta: f64) -> [[Complex64; 4]; 4] {
    let (s, c) = (theta / 2.0).sin_cos();
    let c = Complex64::new(c, 0.0);
    let s = Complex64::new(0.0, -s);
    [
        [c, ZERO, ZERO, s],
        [ZERO, c, s, ZERO],
        [ZERO, s, c, ZERO],
        [s, ZERO, ZERO, c],
    ]
}

/// RYY(θ) = exp(-iθ/2 Y⊗Y)
#[inline]
pub fn ryy(theta: f64) -> [[Complex64; 4]; 4] {
    let (s, c) = (theta / 2.0).sin_cos();
    let c = Complex64::new(c, 0.0);
    let s = Complex64::new(0.0, s);
    [
        [c, ZERO, ZERO, s],
        [ZERO, c, -s, ZERO],
        [ZERO, -s, c, ZERO],
        [s, ZERO, ZERO, c],
    ]
}

/// RZZ(θ) = exp(-iθ/2 Z⊗Z)
#[inline]
pub fn rzz(theta: f64) -> [[Complex64; 4]; 4] {
    let (s, c) = (theta / 2.0).sin_cos();
    let e_neg = Complex64::new(c, -s);
    let e_pos = Complex64::new(c, s);
    [
        [e_neg, ZERO, ZERO, ZERO],
        [ZERO, e_pos, ZERO, ZERO],
        [ZERO, ZERO, e_pos, ZERO],
        [ZERO, ZERO, ZERO, e_neg],
    ]
}

/// Kronecker product of two 2×2 matrices
#[inline]
pub fn kron2(a: &[[Complex64; 2]; 2], b: &[[Complex64; 2]; 2]) -> [[Complex64; 4]; 4] {
    let mut out = [[ZERO; 4]; 4];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, entry) in row.iter_mut().enumerate() {
            *entry = a[r >> 1][c >> 1] * b[r & 1][c & 1];
        }
    }
    out
}
