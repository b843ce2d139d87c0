//! Arvak Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures consumed by the Arvak
//! Pauli algebra engine: qubit identifiers, gates, instructions and an
//! ordered circuit builder.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing quantum registers
//! - **Gates**: [`StandardGate`] for built-in gates (H, S, CX, etc.) and [`CustomGate`]
//!   for user-defined operations with an optional definition
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use arvak_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `SX`, `SXdg`, `SY`, `SYdg` | 1 | Square roots of X and Y |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `Rz` | 1 | Z rotation |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Paulis |
//! | `Swap`, `ISwap`, `ISwapDg` | 2 | SWAP family |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
