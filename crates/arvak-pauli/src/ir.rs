//! Binding between `arvak-ir` instructions and the Pauli engine.
//!
//! | Instruction | Treatment |
//! |-------------|-----------|
//! | `X Y Z H S Sdg SX SXdg SY SYdg` | single-qubit primitive |
//! | `CX CY CZ` | Pauli-interaction primitive |
//! | `I`, barrier, `Rz(kπ/2)` | private Clifford decomposition |
//! | `Swap ISwap ISwapDg`, defined custom gates | decomposition into instructions |
//! | global phase | ignored |
//! | `T Tdg`, other `Rz`, `CCX`, opaque custom gates | unsupported |

use std::f64::consts::FRAC_PI_2;

use arvak_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};

use crate::clifford::{CliffordPrimitive, PauliInteraction, SingleQubitClifford};
use crate::error::PauliResult;
use crate::multiply::PauliStringLike;
use crate::pauli::Pauli;
use crate::propagate::CliffordOperation;
use crate::string::PauliString;

/// Angles within this distance of a multiple of `π/2` count as Clifford.
const ANGLE_ATOL: f64 = 1e-9;

fn single_qubit_clifford(gate: StandardGate) -> Option<SingleQubitClifford> {
    let clifford = match gate {
        StandardGate::X => SingleQubitClifford::x(),
        StandardGate::Y => SingleQubitClifford::y(),
        StandardGate::Z => SingleQubitClifford::z(),
        StandardGate::H => SingleQubitClifford::h(),
        StandardGate::S => SingleQubitClifford::s(),
        StandardGate::Sdg => SingleQubitClifford::sdg(),
        StandardGate::SX => SingleQubitClifford::sx(),
        StandardGate::SXdg => SingleQubitClifford::sxdg(),
        StandardGate::SY => SingleQubitClifford::sy(),
        StandardGate::SYdg => SingleQubitClifford::sydg(),
        _ => return None,
    };
    Some(clifford)
}

fn interaction(gate: StandardGate) -> Option<PauliInteraction> {
    match gate {
        StandardGate::CX => Some(PauliInteraction::cnot()),
        StandardGate::CY => Some(PauliInteraction::cy()),
        StandardGate::CZ => Some(PauliInteraction::cz()),
        _ => None,
    }
}

/// `Rz(θ)` as a Clifford when `θ` is a multiple of `π/2`.
fn rz_clifford(theta: f64) -> Option<SingleQubitClifford> {
    if !theta.is_finite() {
        return None;
    }
    let quarter_turns = theta / FRAC_PI_2;
    let rounded = quarter_turns.round();
    if (quarter_turns - rounded).abs() > ANGLE_ATOL {
        return None;
    }
    let clifford = match (rounded as i64).rem_euclid(4) {
        0 => SingleQubitClifford::identity(),
        1 => SingleQubitClifford::s(),
        2 => SingleQubitClifford::z(),
        _ => SingleQubitClifford::sdg(),
    };
    Some(clifford)
}

impl CliffordOperation<QubitId> for Instruction {
    fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    fn as_primitive(&self) -> Option<CliffordPrimitive<QubitId>> {
        let gate = self.standard_gate()?;
        match self.qubits.as_slice() {
            [q] => single_qubit_clifford(gate).map(|g| CliffordPrimitive::single(g, *q)),
            [q0, q1] if q0 != q1 => {
                interaction(gate).map(|g| CliffordPrimitive::interaction(g, *q0, *q1))
            }
            _ => None,
        }
    }

    fn is_global_phase(&self) -> bool {
        Instruction::is_global_phase(self)
    }

    fn decompose_into_cliffords(&self) -> Option<Vec<CliffordPrimitive<QubitId>>> {
        if self.is_barrier() {
            return Some(Vec::new());
        }
        match (self.standard_gate()?, self.qubits.as_slice()) {
            (StandardGate::I, _) => Some(Vec::new()),
            (StandardGate::Rz(theta), [q]) => {
                let clifford = rz_clifford(theta)?;
                if clifford == SingleQubitClifford::identity() {
                    Some(Vec::new())
                } else {
                    Some(vec![CliffordPrimitive::single(clifford, *q)])
                }
            }
            _ => None,
        }
    }

    fn decompose(&self) -> Option<Vec<Self>> {
        use StandardGate::{CX, CZ, S, Sdg, Swap};

        let Some(gate) = self.standard_gate() else {
            return self.expand_definition();
        };
        let [a, b] = *self.qubits.as_slice() else {
            return None;
        };
        let ops = match gate {
            StandardGate::Swap => vec![
                Instruction::two_qubit_gate(CX, a, b),
                Instruction::two_qubit_gate(CX, b, a),
                Instruction::two_qubit_gate(CX, a, b),
            ],
            StandardGate::ISwap => vec![
                Instruction::two_qubit_gate(CZ, a, b),
                Instruction::two_qubit_gate(Swap, a, b),
                Instruction::single_qubit_gate(S, a),
                Instruction::single_qubit_gate(S, b),
            ],
            StandardGate::ISwapDg => vec![
                Instruction::single_qubit_gate(Sdg, a),
                Instruction::single_qubit_gate(Sdg, b),
                Instruction::two_qubit_gate(Swap, a, b),
                Instruction::two_qubit_gate(CZ, a, b),
            ],
            _ => return None,
        };
        Some(ops)
    }

    fn inverse(&self) -> Option<Self> {
        Instruction::inverse(self).ok()
    }
}

impl From<&Instruction> for PauliStringLike<QubitId> {
    fn from(inst: &Instruction) -> Self {
        if let InstructionKind::GlobalPhase { phase } = inst.kind {
            return PauliStringLike::Scalar(phase);
        }
        let pauli = match inst.standard_gate() {
            Some(StandardGate::I) => return PauliStringLike::Identity(inst.qubits.clone()),
            Some(StandardGate::X) => Pauli::X,
            Some(StandardGate::Y) => Pauli::Y,
            Some(StandardGate::Z) => Pauli::Z,
            _ => return PauliStringLike::Opaque(format!("{inst:?}")),
        };
        match inst.qubits.as_slice() {
            [q] => PauliStringLike::Operation(pauli.on(*q)),
            _ => PauliStringLike::Opaque(format!("{inst:?}")),
        }
    }
}

impl From<Instruction> for PauliStringLike<QubitId> {
    fn from(inst: Instruction) -> Self {
        PauliStringLike::from(&inst)
    }
}

impl PauliString<QubitId> {
    /// `C† P C` for the whole circuit.
    pub fn conjugated_by_circuit(&self, circuit: &Circuit) -> PauliResult<Self> {
        self.conjugated_by(circuit.instructions())
    }

    /// `C P C†` for the whole circuit, using the circuit's own inverse.
    pub fn after_circuit(&self, circuit: &Circuit) -> PauliResult<Self> {
        let inverse = circuit.inverse()?;
        self.conjugated_by(inverse.instructions())
    }
}
