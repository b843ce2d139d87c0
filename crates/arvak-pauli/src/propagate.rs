//! Clifford propagation.
//!
//! Operations are reduced to [`CliffordPrimitive`]s and a qubit to Pauli map
//! is pushed through them one primitive at a time, tracking a single sign
//! bit. Two directions are supported:
//!
//! - `after_to_before = false`: operations move from before the string to
//!   after it, giving `C† P C`. Operations and their decompositions are
//!   walked back to front and single-qubit tables are inverted.
//! - `after_to_before = true`: the result is `C P C†`, walking forward.
//!
//! Operations (and primitives) acting only on qubits outside the map are
//! skipped without being decomposed.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::clifford::{CliffordPrimitive, PauliInteraction, SingleQubitClifford};
use crate::error::{PauliError, PauliResult};
use crate::mutable::MutablePauliString;
use crate::pauli::{Pauli, QubitKey};
use crate::string::PauliString;

/// An operation the propagation engine can push a Pauli string through.
///
/// Implementors expose one of: a primitive Clifford, a private Clifford
/// decomposition, a decomposition into further operations, or a global
/// phase. Anything else is unsupported.
pub trait CliffordOperation<Q>: fmt::Debug + Sized {
    /// Qubits acted on.
    fn qubits(&self) -> &[Q];

    fn as_primitive(&self) -> Option<CliffordPrimitive<Q>> {
        None
    }

    /// True for operations that only multiply the state by a scalar.
    fn is_global_phase(&self) -> bool {
        false
    }

    /// A direct decomposition into primitive Cliffords, if known.
    fn decompose_into_cliffords(&self) -> Option<Vec<CliffordPrimitive<Q>>> {
        None
    }

    /// A decomposition into simpler operations of the same type.
    fn decompose(&self) -> Option<Vec<Self>> {
        None
    }

    fn inverse(&self) -> Option<Self> {
        None
    }
}

impl<Q: QubitKey> CliffordOperation<Q> for CliffordPrimitive<Q> {
    fn qubits(&self) -> &[Q] {
        self.qubit_slice()
    }

    fn as_primitive(&self) -> Option<CliffordPrimitive<Q>> {
        Some(self.clone())
    }

    fn inverse(&self) -> Option<Self> {
        Some(CliffordPrimitive::inverse(self))
    }
}

/// Reduce `op` to primitive Cliffords.
///
/// Global phases reduce to nothing and primitives to themselves; otherwise
/// the private Clifford decomposition is preferred over a recursive one.
pub fn decompose_into_cliffords<Q, O>(op: &O) -> PauliResult<Vec<CliffordPrimitive<Q>>>
where
    Q: QubitKey,
    O: CliffordOperation<Q>,
{
    if op.is_global_phase() {
        return Ok(Vec::new());
    }
    if let Some(primitive) = op.as_primitive() {
        return Ok(vec![primitive]);
    }
    if let Some(primitives) = op.decompose_into_cliffords() {
        return Ok(primitives);
    }
    if let Some(sub_ops) = op.decompose() {
        let mut primitives = Vec::new();
        for sub_op in &sub_ops {
            primitives.extend(decompose_into_cliffords(sub_op)?);
        }
        return Ok(primitives);
    }
    Err(PauliError::UnsupportedOperation(format!("{op:?}")))
}

/// Push `map` through `ops`, returning true if the sign flipped.
///
/// On error `map` may be partially updated; callers work on a copy.
pub fn propagate<Q, O>(
    map: &mut BTreeMap<Q, Pauli>,
    ops: &[O],
    after_to_before: bool,
) -> PauliResult<bool>
where
    Q: QubitKey,
    O: CliffordOperation<Q>,
{
    let mut ordered: Vec<&O> = ops.iter().collect();
    if !after_to_before {
        ordered.reverse();
    }

    let mut negate = false;
    let mut applied = 0usize;
    for op in ordered {
        if is_disjoint(map, op.qubits()) {
            trace!(?op, "skipping operation outside the string");
            continue;
        }
        let mut primitives = decompose_into_cliffords(op)?;
        if !after_to_before {
            primitives.reverse();
        }
        for primitive in &primitives {
            if has_coincident_qubits(primitive) {
                return Err(PauliError::UnsupportedOperation(format!(
                    "{op:?} (interaction on a single qubit)"
                )));
            }
            if is_disjoint(map, primitive.qubit_slice()) {
                continue;
            }
            negate ^= pass_primitive(map, primitive, after_to_before);
            applied += 1;
        }
    }

    debug!(
        operations = ops.len(),
        primitives = applied,
        after_to_before,
        negate,
        "propagated Pauli string"
    );
    Ok(negate)
}

fn has_coincident_qubits<Q: QubitKey>(primitive: &CliffordPrimitive<Q>) -> bool {
    match primitive {
        CliffordPrimitive::Single { .. } => false,
        CliffordPrimitive::Interaction { qubits: [q0, q1], .. } => q0 == q1,
    }
}

fn is_disjoint<Q: QubitKey>(map: &BTreeMap<Q, Pauli>, qubits: &[Q]) -> bool {
    !qubits.iter().any(|q| map.contains_key(q))
}

fn pass_primitive<Q: QubitKey>(
    map: &mut BTreeMap<Q, Pauli>,
    primitive: &CliffordPrimitive<Q>,
    after_to_before: bool,
) -> bool {
    trace!(?primitive, "passing primitive");
    match primitive {
        CliffordPrimitive::Single { gate, qubit } => pass_single(map, gate, qubit, after_to_before),
        CliffordPrimitive::Interaction { gate, qubits } => {
            pass_interaction(map, gate, qubits, after_to_before)
        }
    }
}

fn pass_single<Q: QubitKey>(
    map: &mut BTreeMap<Q, Pauli>,
    gate: &SingleQubitClifford,
    qubit: &Q,
    after_to_before: bool,
) -> bool {
    let Some(&pauli) = map.get(qubit) else {
        return false;
    };
    let gate = if after_to_before {
        *gate
    } else {
        gate.inverse()
    };
    let image = gate.transform(pauli);
    map.insert(qubit.clone(), image.to);
    image.flip
}

fn pass_interaction<Q: QubitKey>(
    map: &mut BTreeMap<Q, Pauli>,
    gate: &PauliInteraction,
    qubits: &[Q; 2],
    after_to_before: bool,
) -> bool {
    let [q0, q1] = qubits;
    let mut quarter_kickback = 0i32;
    if map
        .get(q0)
        .is_some_and(|p| !p.commutes_with(gate.pauli0()))
    {
        quarter_kickback += merge_and_kickback(
            map,
            q1,
            gate.pauli1(),
            true,
            gate.invert1(),
            after_to_before,
        );
    }
    if map
        .get(q1)
        .is_some_and(|p| !p.commutes_with(gate.pauli1()))
    {
        quarter_kickback += merge_and_kickback(
            map,
            q0,
            gate.pauli0(),
            false,
            gate.invert0(),
            after_to_before,
        );
    }
    assert!(
        quarter_kickback % 2 == 0,
        "odd quarter kickback {quarter_kickback} through {gate:?}"
    );
    quarter_kickback.rem_euclid(4) == 2
}

/// Multiply the interaction axis into `qubit`, returning quarter turns of phase.
///
/// An inverted axis always contributes an extra half turn.
fn merge_and_kickback<Q: QubitKey>(
    map: &mut BTreeMap<Q, Pauli>,
    qubit: &Q,
    axis: Pauli,
    axis_on_left: bool,
    invert: bool,
    after_to_before: bool,
) -> i32 {
    let half_turn = if invert { 2 } else { 0 };
    let Some(current) = map.get(qubit).copied() else {
        map.insert(qubit.clone(), axis);
        return half_turn;
    };
    if current == axis {
        map.remove(qubit);
        return half_turn;
    }
    let (left, right) = if axis_on_left {
        (axis, current)
    } else {
        (current, axis)
    };
    map.insert(qubit.clone(), left.third(right));
    if (right == left.next()) ^ after_to_before {
        half_turn + 1
    } else {
        half_turn - 1
    }
}

fn inverted_sequence<Q, O: CliffordOperation<Q>>(ops: &[O]) -> PauliResult<Vec<O>> {
    ops.iter()
        .rev()
        .map(|op| {
            op.inverse()
                .ok_or_else(|| PauliError::NotInvertible(format!("{op:?}")))
        })
        .collect()
}

impl<Q: QubitKey> PauliString<Q> {
    /// `C† P C` for the circuit `C = ops`.
    pub fn conjugated_by<O: CliffordOperation<Q>>(&self, ops: &[O]) -> PauliResult<Self> {
        self.pass_operations_over(ops, false)
    }

    /// The string `P'` with `P · C = C · P'`, i.e. `C† P C`.
    pub fn before<O: CliffordOperation<Q>>(&self, ops: &[O]) -> PauliResult<Self> {
        self.conjugated_by(ops)
    }

    /// The string `P'` with `C · P = P' · C`, i.e. `C P C†`.
    ///
    /// Requires every operation to have an inverse.
    pub fn after<O: CliffordOperation<Q>>(&self, ops: &[O]) -> PauliResult<Self> {
        self.conjugated_by(&inverted_sequence(ops)?)
    }

    /// Move `ops` across the string.
    ///
    /// With `after_to_before = false` the operations start before the string
    /// and the result is `C† P C`; with `true` they start after it and the
    /// result is `C P C†`.
    pub fn pass_operations_over<O: CliffordOperation<Q>>(
        &self,
        ops: &[O],
        after_to_before: bool,
    ) -> PauliResult<Self> {
        let mut qubit_pauli_map = self.qubit_pauli_map.clone();
        let negate = propagate(&mut qubit_pauli_map, ops, after_to_before)?;
        let coefficient = if negate {
            -self.coefficient
        } else {
            self.coefficient
        };
        Ok(PauliString {
            qubit_pauli_map,
            coefficient,
        })
    }
}

impl<Q: QubitKey> MutablePauliString<Q> {
    /// Replace `P` with `C P C†`. On error the builder is unchanged.
    pub fn inplace_after<O: CliffordOperation<Q>>(&mut self, ops: &[O]) -> PauliResult<&mut Self> {
        self.inplace_propagate(ops, true)
    }

    /// Replace `P` with `C† P C`. On error the builder is unchanged.
    pub fn inplace_before<O: CliffordOperation<Q>>(&mut self, ops: &[O]) -> PauliResult<&mut Self> {
        self.inplace_propagate(ops, false)
    }

    fn inplace_propagate<O: CliffordOperation<Q>>(
        &mut self,
        ops: &[O],
        after_to_before: bool,
    ) -> PauliResult<&mut Self> {
        let mut map = self.freeze().qubit_pauli_map;
        let negate = propagate(&mut map, ops, after_to_before)?;
        self.pauli_int_dict = map.into_iter().map(|(q, p)| (q, p.index())).collect();
        if negate {
            self.coefficient = -self.coefficient;
        }
        Ok(self)
    }
}
