//! Primitive Clifford gates understood natively by the propagation engine.
//!
//! A [`SingleQubitClifford`] is stored as the signed image of each of X, Y
//! and Z under conjugation `P → U P U†`. A [`PauliInteraction`] is the
//! two-qubit gate `U = I - 2 Π0 ⊗ Π1` with `Πk = (I - (-1)^invert_k Pk) / 2`;
//! CZ, CNOT and CY are the uninverted cases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PauliError, PauliResult};
use crate::pauli::{Pauli, product_phase};

/// The image of one Pauli under a single-qubit Clifford: `±to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliTransform {
    /// The image symbol.
    pub to: Pauli,
    /// True if the image carries a minus sign.
    pub flip: bool,
}

impl PauliTransform {
    pub fn new(to: Pauli, flip: bool) -> Self {
        Self { to, flip }
    }
}

/// A single-qubit Clifford as a signed permutation table over X, Y, Z.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleQubitClifford {
    table: [PauliTransform; 3],
}

impl SingleQubitClifford {
    /// Build from the images of X and Z; the image of Y follows from
    /// `Y = i X Z`.
    pub fn from_xz_map(x_to: (Pauli, bool), z_to: (Pauli, bool)) -> PauliResult<Self> {
        let (x, fx) = x_to;
        let (z, fz) = z_to;
        if x.is_identity() || z.is_identity() || x == z {
            return Err(PauliError::InvalidCliffordMap(format!(
                "X -> {}{x}, Z -> {}{z}",
                sign(fx),
                sign(fz)
            )));
        }
        Ok(Self::from_xz_unchecked(x, fx, z, fz))
    }

    fn from_xz_unchecked(x: Pauli, fx: bool, z: Pauli, fz: bool) -> Self {
        // i (±X')(±Z') = ±i · i^k · third, so Y' keeps a plus sign only when k = -1.
        let y = x.third(z);
        let fy = fx ^ fz ^ (product_phase(x.index(), z.index()) == 1);
        Self {
            table: [
                PauliTransform::new(x, fx),
                PauliTransform::new(y, fy),
                PauliTransform::new(z, fz),
            ],
        }
    }

    /// The Clifford sending `from` to `±to` that is closest to the identity.
    ///
    /// Equal symbols give the identity, or the Pauli gate that anticommutes
    /// with `from` when `flip` is set. Distinct symbols give a quarter turn
    /// about the remaining axis.
    pub fn from_single_map(from: Pauli, to: Pauli, flip: bool) -> PauliResult<Self> {
        if from.is_identity() || to.is_identity() {
            return Err(PauliError::InvalidCliffordMap(format!(
                "{from} -> {}{to}",
                sign(flip)
            )));
        }
        if from == to {
            return Ok(if flip {
                Self::pauli(from.next())
            } else {
                Self::identity()
            });
        }
        let target = PauliTransform::new(to, flip);
        let turn = Self::quarter_turn(from.third(to));
        if turn.transform(from) == target {
            Ok(turn)
        } else {
            Ok(turn.inverse())
        }
    }

    pub fn identity() -> Self {
        Self::from_xz_unchecked(Pauli::X, false, Pauli::Z, false)
    }

    pub fn x() -> Self {
        Self::from_xz_unchecked(Pauli::X, false, Pauli::Z, true)
    }

    pub fn y() -> Self {
        Self::from_xz_unchecked(Pauli::X, true, Pauli::Z, true)
    }

    pub fn z() -> Self {
        Self::from_xz_unchecked(Pauli::X, true, Pauli::Z, false)
    }

    /// Hadamard.
    pub fn h() -> Self {
        Self::from_xz_unchecked(Pauli::Z, false, Pauli::X, false)
    }

    /// Quarter turn about Z.
    pub fn s() -> Self {
        Self::from_xz_unchecked(Pauli::Y, false, Pauli::Z, false)
    }

    pub fn sdg() -> Self {
        Self::from_xz_unchecked(Pauli::Y, true, Pauli::Z, false)
    }

    /// Quarter turn about X.
    pub fn sx() -> Self {
        Self::from_xz_unchecked(Pauli::X, false, Pauli::Y, true)
    }

    pub fn sxdg() -> Self {
        Self::from_xz_unchecked(Pauli::X, false, Pauli::Y, false)
    }

    /// Quarter turn about Y.
    pub fn sy() -> Self {
        Self::from_xz_unchecked(Pauli::Z, true, Pauli::X, false)
    }

    pub fn sydg() -> Self {
        Self::from_xz_unchecked(Pauli::Z, false, Pauli::X, true)
    }

    /// The Pauli gate for `p`; identity for `Pauli::I`.
    pub fn pauli(p: Pauli) -> Self {
        match p {
            Pauli::I => Self::identity(),
            Pauli::X => Self::x(),
            Pauli::Y => Self::y(),
            Pauli::Z => Self::z(),
        }
    }

    /// The positive quarter turn about `axis`; identity for `Pauli::I`.
    pub fn quarter_turn(axis: Pauli) -> Self {
        match axis {
            Pauli::I => Self::identity(),
            Pauli::X => Self::sx(),
            Pauli::Y => Self::sy(),
            Pauli::Z => Self::s(),
        }
    }

    /// All 24 single-qubit Cliffords, up to global phase.
    pub fn all() -> Vec<Self> {
        let mut out = Vec::with_capacity(24);
        for x in Pauli::NON_IDENTITY {
            for z in Pauli::NON_IDENTITY {
                if x == z {
                    continue;
                }
                for fx in [false, true] {
                    for fz in [false, true] {
                        out.push(Self::from_xz_unchecked(x, fx, z, fz));
                    }
                }
            }
        }
        out
    }

    /// The signed image of `pauli`. Identity maps to itself.
    pub fn transform(&self, pauli: Pauli) -> PauliTransform {
        match pauli {
            Pauli::I => PauliTransform::new(Pauli::I, false),
            p => self.table[usize::from(p.index()) - 1],
        }
    }

    pub fn inverse(&self) -> Self {
        let mut table = self.table;
        for p in Pauli::NON_IDENTITY {
            let image = self.transform(p);
            table[usize::from(image.to.index()) - 1] = PauliTransform::new(p, image.flip);
        }
        Self { table }
    }

    /// Apply `self` first, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        let mut table = self.table;
        for (slot, first) in table.iter_mut().zip(self.table) {
            let second = next.transform(first.to);
            *slot = PauliTransform::new(second.to, first.flip ^ second.flip);
        }
        Self { table }
    }
}

fn sign(flip: bool) -> &'static str {
    if flip { "-" } else { "+" }
}

impl fmt::Debug for SingleQubitClifford {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, _, z] = self.table;
        write!(
            f,
            "SingleQubitClifford(X -> {}{}, Z -> {}{})",
            sign(x.flip),
            x.to,
            sign(z.flip),
            z.to
        )
    }
}

/// Two-qubit Pauli interaction `I - 2 Π0 ⊗ Π1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliInteraction {
    pauli0: Pauli,
    invert0: bool,
    pauli1: Pauli,
    invert1: bool,
}

impl PauliInteraction {
    pub fn new(pauli0: Pauli, invert0: bool, pauli1: Pauli, invert1: bool) -> PauliResult<Self> {
        if pauli0.is_identity() || pauli1.is_identity() {
            return Err(PauliError::InvalidInteraction);
        }
        Ok(Self {
            pauli0,
            invert0,
            pauli1,
            invert1,
        })
    }

    pub fn cz() -> Self {
        Self {
            pauli0: Pauli::Z,
            invert0: false,
            pauli1: Pauli::Z,
            invert1: false,
        }
    }

    /// Controlled-X with qubit 0 as control.
    pub fn cnot() -> Self {
        Self {
            pauli1: Pauli::X,
            ..Self::cz()
        }
    }

    /// Controlled-Y with qubit 0 as control.
    pub fn cy() -> Self {
        Self {
            pauli1: Pauli::Y,
            ..Self::cz()
        }
    }

    pub fn pauli0(&self) -> Pauli {
        self.pauli0
    }

    pub fn invert0(&self) -> bool {
        self.invert0
    }

    pub fn pauli1(&self) -> Pauli {
        self.pauli1
    }

    pub fn invert1(&self) -> bool {
        self.invert1
    }

    /// The same interaction with the qubit roles exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            pauli0: self.pauli1,
            invert0: self.invert1,
            pauli1: self.pauli0,
            invert1: self.invert0,
        }
    }

    /// Interactions are involutions.
    pub fn inverse(&self) -> Self {
        *self
    }
}

/// A primitive Clifford placed on qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CliffordPrimitive<Q> {
    Single {
        gate: SingleQubitClifford,
        qubit: Q,
    },
    Interaction {
        gate: PauliInteraction,
        qubits: [Q; 2],
    },
}

impl<Q> CliffordPrimitive<Q> {
    pub fn single(gate: SingleQubitClifford, qubit: Q) -> Self {
        CliffordPrimitive::Single { gate, qubit }
    }

    pub fn interaction(gate: PauliInteraction, q0: Q, q1: Q) -> Self {
        CliffordPrimitive::Interaction {
            gate,
            qubits: [q0, q1],
        }
    }

    pub fn qubit_slice(&self) -> &[Q] {
        match self {
            CliffordPrimitive::Single { qubit, .. } => std::slice::from_ref(qubit),
            CliffordPrimitive::Interaction { qubits, .. } => qubits,
        }
    }
}

impl<Q: Clone> CliffordPrimitive<Q> {
    pub fn inverse(&self) -> Self {
        match self {
            CliffordPrimitive::Single { gate, qubit } => CliffordPrimitive::Single {
                gate: gate.inverse(),
                qubit: qubit.clone(),
            },
            CliffordPrimitive::Interaction { .. } => self.clone(),
        }
    }
}
