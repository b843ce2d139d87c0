//! Arvak Pauli Algebra
//!
//! Exact symbolic algebra over Pauli strings: coefficient-scaled tensor
//! products of `I`, `X`, `Y` and `Z` on arbitrary qubit keys. Phases are
//! tracked as exact powers of `i` through multiplication and through
//! conjugation by Clifford circuits.
//!
//! # Core Components
//!
//! - **Symbols**: [`Pauli`] and its closed-form product table
//! - **Strings**: [`PauliString`] (frozen, hashable) and [`MutablePauliString`]
//!   (in-place builder), converted with [`PauliString::to_builder`] and
//!   [`MutablePauliString::freeze`]
//! - **Multiplication**: [`PauliStringLike`] inputs multiplied on either [`Side`]
//!   with all-or-nothing semantics
//! - **Cliffords**: [`SingleQubitClifford`] and [`PauliInteraction`] primitives,
//!   and the [`CliffordOperation`] capability implemented by
//!   [`arvak_ir::Instruction`]
//! - **Expectation values** against state vectors and density matrices
//!
//! # Example: Propagating Through a Circuit
//!
//! ```rust
//! use arvak_ir::{Circuit, QubitId};
//! use arvak_pauli::{Pauli, PauliString};
//!
//! let mut circuit = Circuit::with_size("h_cx", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let x0 = PauliString::from(Pauli::X.on(QubitId(0)));
//! let out = x0.conjugated_by_circuit(&circuit).unwrap();
//!
//! assert_eq!(out.get(&QubitId(0)), Some(Pauli::Z));
//! assert_eq!(out.get(&QubitId(1)), Some(Pauli::X));
//! assert_eq!(out.coefficient().re, 1.0);
//! ```

pub mod clifford;
pub mod error;
pub mod expectation;
pub mod ir;
pub mod multiply;
pub mod mutable;
pub mod pauli;
pub mod propagate;
pub mod string;

pub use clifford::{CliffordPrimitive, PauliInteraction, PauliTransform, SingleQubitClifford};
pub use error::{PauliError, PauliResult};
pub use expectation::{ExpectationOptions, validate_qubit_mapping};
pub use multiply::{PauliStringLike, Side};
pub use mutable::MutablePauliString;
pub use pauli::{Pauli, PauliGateLike, PauliOperation, QubitKey};
pub use propagate::{CliffordOperation, decompose_into_cliffords, propagate};
pub use string::{DEFAULT_ATOL, HERMITIAN_ATOL, PauliString, UNITARY_ATOL};
