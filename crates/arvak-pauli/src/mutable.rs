//! The mutable Pauli string builder.

use num_complex::Complex64;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::ops::Neg;

use crate::error::{PauliError, PauliResult};
use crate::multiply::PauliStringLike;
use crate::pauli::{Pauli, QubitKey};
use crate::string::PauliString;

/// Exclusively owned, in-place form of a Pauli string.
///
/// Stores raw symbol codes `1..=3` keyed by qubit; identity is never stored.
/// Every fallible mutation either completes or leaves the builder untouched.
#[derive(Debug, Clone)]
pub struct MutablePauliString<Q> {
    pub(crate) pauli_int_dict: FxHashMap<Q, u8>,
    pub(crate) coefficient: Complex64,
}

impl<Q: QubitKey> MutablePauliString<Q> {
    /// An empty builder with unit coefficient.
    pub fn new() -> Self {
        Self {
            pauli_int_dict: FxHashMap::default(),
            coefficient: Complex64::new(1.0, 0.0),
        }
    }

    /// A builder holding the product of `contents`, read left to right.
    pub fn from_like(contents: impl Into<PauliStringLike<Q>>) -> PauliResult<Self> {
        let mut builder = Self::new();
        builder.inplace_right_multiply_by(contents)?;
        Ok(builder)
    }

    /// A frozen copy of the current state.
    pub fn freeze(&self) -> PauliString<Q> {
        let qubit_pauli_map: BTreeMap<Q, Pauli> = self
            .pauli_int_dict
            .iter()
            .filter_map(|(q, &code)| Pauli::from_index(code).map(|p| (q.clone(), p)))
            .filter(|(_, p)| !p.is_identity())
            .collect();
        PauliString {
            qubit_pauli_map,
            coefficient: self.coefficient,
        }
    }

    /// The Pauli on `qubit`, or `None` for an implicit identity.
    pub fn get(&self, qubit: &Q) -> Option<Pauli> {
        self.pauli_int_dict
            .get(qubit)
            .and_then(|&code| Pauli::from_index(code))
    }

    /// Set the Pauli on `qubit`. Setting the identity removes the entry.
    pub fn set(&mut self, qubit: Q, pauli: Pauli) {
        if pauli.is_identity() {
            self.pauli_int_dict.remove(&qubit);
        } else {
            self.pauli_int_dict.insert(qubit, pauli.index());
        }
    }

    /// Reset `qubit` to the identity, returning its previous Pauli.
    pub fn remove(&mut self, qubit: &Q) -> Option<Pauli> {
        self.pauli_int_dict
            .remove(qubit)
            .and_then(Pauli::from_index)
    }

    /// Qubits acted on, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &Q> {
        self.pauli_int_dict.keys()
    }

    /// Number of non-identity factors.
    pub fn len(&self) -> usize {
        self.pauli_int_dict.len()
    }

    /// True for a scalar multiple of the identity.
    pub fn is_empty(&self) -> bool {
        self.pauli_int_dict.is_empty()
    }

    /// The scalar factor.
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// Replace the scalar factor.
    pub fn set_coefficient(&mut self, coefficient: Complex64) {
        self.coefficient = coefficient;
    }

    /// A copy with qubits renamed through `func`.
    pub fn transform_qubits<R: QubitKey>(
        &self,
        mut func: impl FnMut(&Q) -> R,
    ) -> PauliResult<MutablePauliString<R>> {
        let mut pauli_int_dict = FxHashMap::default();
        for (q, &code) in &self.pauli_int_dict {
            let renamed = func(q);
            if pauli_int_dict.contains_key(&renamed) {
                return Err(PauliError::DuplicateQubit(format!("{renamed:?}")));
            }
            pauli_int_dict.insert(renamed, code);
        }
        Ok(MutablePauliString {
            pauli_int_dict,
            coefficient: self.coefficient,
        })
    }

    /// Rename qubits in place. Fails without mutating on a collision.
    pub fn inplace_transform_qubits(&mut self, mut func: impl FnMut(&Q) -> Q) -> PauliResult<&mut Self> {
        let mut seen = FxHashSet::default();
        let renamed: Vec<(Q, u8)> = self
            .pauli_int_dict
            .iter()
            .map(|(q, &code)| (func(q), code))
            .collect();
        for (q, _) in &renamed {
            if !seen.insert(q.clone()) {
                return Err(PauliError::DuplicateQubit(format!("{q:?}")));
            }
        }
        self.pauli_int_dict = renamed.into_iter().collect();
        Ok(self)
    }
}

impl<Q: QubitKey> Default for MutablePauliString<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: QubitKey> PartialEq for MutablePauliString<Q> {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && self.pauli_int_dict == other.pauli_int_dict
    }
}

impl<Q: QubitKey> From<&PauliString<Q>> for MutablePauliString<Q> {
    fn from(p: &PauliString<Q>) -> Self {
        Self {
            pauli_int_dict: p
                .qubit_pauli_map
                .iter()
                .map(|(q, p)| (q.clone(), p.index()))
                .collect(),
            coefficient: p.coefficient,
        }
    }
}

impl<Q: QubitKey> From<PauliString<Q>> for MutablePauliString<Q> {
    fn from(p: PauliString<Q>) -> Self {
        Self {
            pauli_int_dict: p
                .qubit_pauli_map
                .into_iter()
                .map(|(q, p)| (q, p.index()))
                .collect(),
            coefficient: p.coefficient,
        }
    }
}

impl<Q: QubitKey> Neg for MutablePauliString<Q> {
    type Output = MutablePauliString<Q>;

    fn neg(mut self) -> Self::Output {
        self.coefficient = -self.coefficient;
        self
    }
}
