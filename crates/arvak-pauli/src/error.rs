//! Error types for the Pauli algebra crate.

use thiserror::Error;

/// Errors produced by Pauli-string construction, multiplication and
/// Clifford propagation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PauliError {
    /// A mapping value is not interpretable as a Pauli gate.
    #[error("Expected {key}: {value} to be a Pauli (I, X, Y, Z or 0..=3)")]
    InvalidPauli {
        /// Debug rendering of the qubit key.
        key: String,
        /// Rendering of the rejected value.
        value: String,
    },

    /// A value has no interpretation as a Pauli string.
    #[error("{0} is not Pauli-string-like")]
    NotPauliStringLike(String),

    /// An operation is not a known Clifford and does not decompose into known Cliffords.
    #[error("Operation is not a known Clifford and did not decompose into known Cliffords: {0}")]
    UnsupportedOperation(String),

    /// An operation cannot supply the inverse needed to propagate through it.
    #[error("Operation has no inverse: {0}")]
    NotInvertible(String),

    /// A single-qubit Clifford table that does not describe a Clifford.
    #[error("Invalid single-qubit Clifford map: {0}")]
    InvalidCliffordMap(String),

    /// A Pauli interaction gate with an identity axis.
    #[error("Pauli interaction axes must be X, Y or Z")]
    InvalidInteraction,

    /// Number of replacement qubits does not match the Pauli string.
    #[error("Expected {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Qubits in the Pauli string.
        expected: usize,
        /// Qubits supplied.
        got: usize,
    },

    /// A qubit remapping sends two qubits onto the same key.
    #[error("Qubit remapping is not injective: {0} appears twice")]
    DuplicateQubit(String),

    /// A qubit remapping has no entry for a qubit of the Pauli string.
    #[error("Qubit map has no entry for {0}")]
    MissingQubit(String),

    /// A qubit-index map does not cover every qubit of the Pauli string.
    #[error("Input qubit map must be a complete mapping over all of this Pauli string's qubits")]
    IncompleteQubitMap,

    /// Qubit-index map entries collide or fall outside the state.
    #[error("Input qubit map indices must be valid for a state over {num_qubits} qubits")]
    InvalidQubitIndex {
        /// Number of qubits the state is defined over.
        num_qubits: usize,
    },

    /// Expectation requested for a non-Hermitian Pauli string, or against a
    /// non-Hermitian density matrix.
    #[error("Cannot compute expectation value with non-Hermitian {0}")]
    NonHermitian(String),

    /// State array length is not a valid state shape.
    #[error("Invalid state shape: {0}")]
    InvalidStateShape(String),

    /// State is not normalized.
    #[error("State is not normalized (norm {0})")]
    NotNormalized(f64),

    /// Error raised by the circuit IR.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] arvak_ir::IrError),
}

/// Result type for Pauli algebra operations.
pub type PauliResult<T> = Result<T, PauliError>;
