//! Circuit instructions combining gates with operands.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, StandardGate};
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Multiplies the whole state by a scalar phase. Acts on no qubits.
    GlobalPhase {
        /// The phase factor.
        phase: Complex64,
    },
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a global phase instruction.
    pub fn global_phase(phase: Complex64) -> Self {
        Self {
            kind: InstructionKind::GlobalPhase { phase },
            qubits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a global phase.
    pub fn is_global_phase(&self) -> bool {
        matches!(self.kind, InstructionKind::GlobalPhase { .. })
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// The standard gate, if this instruction applies one.
    pub fn standard_gate(&self) -> Option<StandardGate> {
        self.as_gate().and_then(Gate::as_standard)
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::GlobalPhase { .. } => "global_phase",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// The inverse instruction on the same operands.
    pub fn inverse(&self) -> IrResult<Instruction> {
        let kind = match &self.kind {
            InstructionKind::Gate(g) => InstructionKind::Gate(g.inverse()?),
            InstructionKind::GlobalPhase { phase } => {
                if phase.norm_sqr() == 0.0 {
                    return Err(IrError::NotInvertible(self.name().to_string()));
                }
                InstructionKind::GlobalPhase {
                    phase: phase.inv(),
                }
            }
            InstructionKind::Barrier => InstructionKind::Barrier,
        };
        Ok(Instruction {
            kind,
            qubits: self.qubits.clone(),
        })
    }

    /// Expand a defined custom gate onto this instruction's operands.
    ///
    /// Returns `None` for standard gates, opaque custom gates and
    /// non-gate instructions.
    pub fn expand_definition(&self) -> Option<Vec<Instruction>> {
        let InstructionKind::Gate(Gate {
            kind: GateKind::Custom(custom),
        }) = &self.kind
        else {
            return None;
        };
        let body = custom.definition.as_ref()?;
        body.iter()
            .map(|inst| {
                let qubits = inst
                    .qubits
                    .iter()
                    .map(|local| self.qubits.get(local.0 as usize).copied())
                    .collect::<Option<Vec<_>>>()?;
                Some(Instruction {
                    kind: inst.kind.clone(),
                    qubits,
                })
            })
            .collect()
    }
}
