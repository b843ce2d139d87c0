//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// sqrt(Y) gate.
    SY,
    /// sqrt(Y)-dagger gate.
    SYdg,

    // Single-qubit non-Clifford gates
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around Z axis by an angle in radians.
    Rz(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// iSWAP-dagger gate.
    ISwapDg,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::SY => "sy",
            StandardGate::SYdg => "sydg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::ISwapDg => "iswapdg",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::SY
            | StandardGate::SYdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rz(_) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::ISwapDg => 2,

            StandardGate::CCX => 3,
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::SY => StandardGate::SYdg,
            StandardGate::SYdg => StandardGate::SY,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::Rz(theta) => StandardGate::Rz(-theta),
            StandardGate::ISwap => StandardGate::ISwapDg,
            StandardGate::ISwapDg => StandardGate::ISwap,
            other => other,
        }
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }
}

/// A user-defined gate, optionally carrying a definition.
///
/// The definition is a sequence of instructions over local qubits
/// `QubitId(0) .. QubitId(num_qubits - 1)`; applying the gate substitutes
/// the instruction's operands for the local qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Body of the gate in circuit order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Vec<Instruction>>,
}

impl CustomGate {
    /// Create a new opaque custom gate.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            definition: None,
        }
    }

    /// Attach a definition to the gate.
    ///
    /// Fails if the body touches a local qubit outside `0..num_qubits`.
    pub fn with_definition(mut self, body: Vec<Instruction>) -> IrResult<Self> {
        for inst in &body {
            for &q in &inst.qubits {
                if q.0 >= self.num_qubits {
                    return Err(IrError::InvalidDefinition {
                        gate_name: self.name.clone(),
                        qubit: q,
                        num_qubits: self.num_qubits,
                    });
                }
            }
        }
        self.definition = Some(body);
        Ok(self)
    }

    /// The inverse gate, when a definition is present.
    ///
    /// The body is reversed and each instruction inverted.
    pub fn inverse(&self) -> IrResult<CustomGate> {
        let body = self
            .definition
            .as_ref()
            .ok_or_else(|| IrError::NotInvertible(self.name.clone()))?;
        let inverted = body
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(CustomGate {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            definition: Some(inverted),
        })
    }
}

/// A gate as it appears in an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
        }
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The standard gate, if this is one.
    pub fn as_standard(&self) -> Option<StandardGate> {
        match &self.kind {
            GateKind::Standard(g) => Some(*g),
            GateKind::Custom(_) => None,
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> IrResult<Gate> {
        Ok(match &self.kind {
            GateKind::Standard(g) => Gate::standard(g.inverse()),
            GateKind::Custom(g) => Gate::custom(g.inverse()?),
        })
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
