//! The frozen Pauli string.

use num_complex::Complex64;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Div, Mul, Neg};

use crate::clifford::{CliffordPrimitive, SingleQubitClifford};
use crate::error::{PauliError, PauliResult};
use crate::multiply::{PauliStringLike, Side};
use crate::mutable::MutablePauliString;
use crate::pauli::{Pauli, PauliOperation, QubitKey, hash_single_term};

/// Tolerance used by [`PauliString::approx_eq`] when no other is given.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Tolerance on `|coefficient| - 1` for [`PauliString::is_unitary`].
pub const UNITARY_ATOL: f64 = 1e-6;

/// Largest imaginary coefficient part accepted by expectation values.
pub const HERMITIAN_ATOL: f64 = 1e-4;

/// An immutable, coefficient-scaled tensor product of Paulis.
///
/// Qubits absent from the map carry an implicit identity; the map never
/// stores [`Pauli::I`].
///
/// Equality compares the maps and the bit patterns of the coefficients,
/// with `-0.0` equal to `0.0`, so `Eq` is reflexive even for NaN
/// coefficients and agrees with `Hash`. Use [`PauliString::approx_eq`] for
/// numerical comparisons.
#[derive(Debug, Clone)]
pub struct PauliString<Q> {
    pub(crate) qubit_pauli_map: BTreeMap<Q, Pauli>,
    pub(crate) coefficient: Complex64,
}

impl<Q: QubitKey> PauliString<Q> {
    /// The empty string with unit coefficient.
    pub fn identity() -> Self {
        Self {
            qubit_pauli_map: BTreeMap::new(),
            coefficient: Complex64::new(1.0, 0.0),
        }
    }

    /// The product of `contents`, read left to right.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arvak_pauli::{Pauli, PauliString};
    ///
    /// let p: PauliString<u32> = PauliString::new(vec![Pauli::X.on(0u32), Pauli::Y.on(0u32)]).unwrap();
    /// assert_eq!(p.get(&0), Some(Pauli::Z));
    /// assert_eq!(p.coefficient().im, 1.0);
    /// ```
    pub fn new(contents: impl Into<PauliStringLike<Q>>) -> PauliResult<Self> {
        let mut builder = MutablePauliString::new();
        builder.inplace_right_multiply_by(contents)?;
        Ok(builder.freeze())
    }

    /// Build from an explicit map and coefficient. Identity entries are dropped.
    pub fn from_map(map: impl IntoIterator<Item = (Q, Pauli)>, coefficient: Complex64) -> Self {
        let qubit_pauli_map = map.into_iter().filter(|(_, p)| !p.is_identity()).collect();
        Self {
            qubit_pauli_map,
            coefficient,
        }
    }

    /// The same operator with a different coefficient.
    pub fn with_coefficient(&self, coefficient: Complex64) -> Self {
        Self {
            qubit_pauli_map: self.qubit_pauli_map.clone(),
            coefficient,
        }
    }

    /// The scalar factor.
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// The Pauli on `qubit`, or `None` for an implicit identity.
    pub fn get(&self, qubit: &Q) -> Option<Pauli> {
        self.qubit_pauli_map.get(qubit).copied()
    }

    /// True if `qubit` carries a non-identity Pauli.
    pub fn contains(&self, qubit: &Q) -> bool {
        self.qubit_pauli_map.contains_key(qubit)
    }

    /// The qubits acted on, in order.
    pub fn qubits(&self) -> Vec<Q> {
        self.qubit_pauli_map.keys().cloned().collect()
    }

    /// Qubits acted on, in order.
    pub fn keys(&self) -> impl Iterator<Item = &Q> {
        self.qubit_pauli_map.keys()
    }

    /// The Paulis, in qubit order.
    pub fn values(&self) -> impl Iterator<Item = Pauli> + '_ {
        self.qubit_pauli_map.values().copied()
    }

    /// `(qubit, pauli)` pairs in qubit order.
    pub fn iter(&self) -> impl Iterator<Item = (&Q, Pauli)> {
        self.qubit_pauli_map.iter().map(|(q, p)| (q, *p))
    }

    /// Number of non-identity factors.
    pub fn len(&self) -> usize {
        self.qubit_pauli_map.len()
    }

    /// True for a scalar multiple of the identity.
    pub fn is_empty(&self) -> bool {
        self.qubit_pauli_map.is_empty()
    }

    /// The underlying qubit map.
    pub fn as_map(&self) -> &BTreeMap<Q, Pauli> {
        &self.qubit_pauli_map
    }

    /// True if the two strings differ at most in their coefficients.
    pub fn equal_up_to_coefficient(&self, other: &Self) -> bool {
        self.qubit_pauli_map == other.qubit_pauli_map
    }

    /// Equal maps and coefficients within `atol` of each other.
    pub fn approx_eq(&self, other: &Self, atol: f64) -> bool {
        self.equal_up_to_coefficient(other) && (self.coefficient - other.coefficient).norm() <= atol
    }

    /// Shared qubits with the Pauli each string applies there.
    pub fn zip_items<'a>(
        &'a self,
        other: &'a Self,
    ) -> impl Iterator<Item = (&'a Q, (Pauli, Pauli))> + 'a {
        self.qubit_pauli_map
            .iter()
            .filter_map(|(q, p0)| other.qubit_pauli_map.get(q).map(|p1| (q, (*p0, *p1))))
    }

    pub fn zip_paulis<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = (Pauli, Pauli)> + 'a {
        self.zip_items(other).map(|(_, pair)| pair)
    }

    /// Two strings commute iff an even number of shared qubits anticommute.
    pub fn commutes(&self, other: &Self) -> bool {
        self.zip_paulis(other)
            .filter(|(p0, p1)| !p0.commutes_with(*p1))
            .count()
            % 2
            == 0
    }

    /// `P^-1`: the same map with the reciprocal coefficient.
    pub fn inverse(&self) -> PauliResult<Self> {
        if self.coefficient.norm_sqr() == 0.0 {
            return Err(PauliError::NotInvertible(
                "Pauli string with zero coefficient".to_string(),
            ));
        }
        Ok(self.with_coefficient(self.coefficient.inv()))
    }

    /// Integer power. Even powers collapse the map to the identity.
    pub fn powi(&self, exponent: i32) -> PauliResult<Self> {
        let base = if exponent < 0 {
            self.inverse()?
        } else {
            self.clone()
        };
        let coefficient = base.coefficient.powu(exponent.unsigned_abs());
        if exponent % 2 == 0 {
            Ok(Self::from_map([], coefficient))
        } else {
            Ok(base.with_coefficient(coefficient))
        }
    }

    /// True if the coefficient has unit modulus.
    pub fn is_unitary(&self) -> bool {
        (self.coefficient.norm() - 1.0).abs() <= UNITARY_ATOL
    }

    /// Rename qubits positionally: the `k`-th qubit becomes `qubits[k]`.
    pub fn with_qubits<R: QubitKey>(
        &self,
        qubits: impl IntoIterator<Item = R>,
    ) -> PauliResult<PauliString<R>> {
        let qubits: Vec<R> = qubits.into_iter().collect();
        if qubits.len() != self.len() {
            return Err(PauliError::QubitCountMismatch {
                expected: self.len(),
                got: qubits.len(),
            });
        }
        let mut renamed = qubits.into_iter();
        self.transform_qubits(|_| renamed.next())?
            .ok_or_else(|| PauliError::MissingQubit("with_qubits".to_string()))
    }

    /// Rename qubits through `qubit_map`, which must cover every qubit.
    pub fn map_qubits<R: QubitKey>(&self, qubit_map: &BTreeMap<Q, R>) -> PauliResult<PauliString<R>> {
        self.transform_qubits(|q| qubit_map.get(q).cloned())?
            .ok_or_else(|| {
                let missing = self
                    .keys()
                    .find(|q| !qubit_map.contains_key(q))
                    .map(|q| format!("{q:?}"))
                    .unwrap_or_default();
                PauliError::MissingQubit(missing)
            })
    }

    /// Rename qubits through `func`.
    ///
    /// Returns `Ok(None)` if `func` yields `None` for any qubit, and an error
    /// if two qubits are sent to the same key.
    pub fn transform_qubits<R: QubitKey>(
        &self,
        mut func: impl FnMut(&Q) -> Option<R>,
    ) -> PauliResult<Option<PauliString<R>>> {
        let mut seen = BTreeSet::new();
        let mut qubit_pauli_map = BTreeMap::new();
        for (q, p) in &self.qubit_pauli_map {
            let Some(renamed) = func(q) else {
                return Ok(None);
            };
            if !seen.insert(renamed.clone()) {
                return Err(PauliError::DuplicateQubit(format!("{renamed:?}")));
            }
            qubit_pauli_map.insert(renamed, *p);
        }
        Ok(Some(PauliString {
            qubit_pauli_map,
            coefficient: self.coefficient,
        }))
    }

    /// Single-qubit Cliffords that rotate each factor onto Z.
    pub fn to_z_basis_ops(&self) -> Vec<CliffordPrimitive<Q>> {
        self.qubit_pauli_map
            .iter()
            .filter_map(|(q, p)| {
                SingleQubitClifford::from_single_map(*p, Pauli::Z, false)
                    .ok()
                    .map(|gate| CliffordPrimitive::Single {
                        gate,
                        qubit: q.clone(),
                    })
            })
            .collect()
    }

    /// A mutable copy of this string.
    pub fn to_builder(&self) -> MutablePauliString<Q> {
        MutablePauliString::from(self)
    }

    pub(crate) fn product(&self, other: &Self) -> Self {
        let mut builder = self.to_builder();
        builder.mul_frozen(other, Side::Right);
        builder.freeze()
    }
}

impl<Q: QubitKey> Default for PauliString<Q> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<Q: PartialEq> PartialEq for PauliString<Q> {
    fn eq(&self, other: &Self) -> bool {
        coefficient_bits(self.coefficient) == coefficient_bits(other.coefficient)
            && self.qubit_pauli_map == other.qubit_pauli_map
    }
}

impl<Q: Eq> Eq for PauliString<Q> {}

impl<Q: PartialEq> PartialEq<PauliOperation<Q>> for PauliString<Q> {
    fn eq(&self, other: &PauliOperation<Q>) -> bool {
        self.coefficient == Complex64::new(1.0, 0.0)
            && self.qubit_pauli_map.len() == 1
            && self
                .qubit_pauli_map
                .iter()
                .all(|(q, p)| *q == other.qubit && *p == other.pauli)
    }
}

impl<Q: PartialEq> PartialEq<PauliString<Q>> for PauliOperation<Q> {
    fn eq(&self, other: &PauliString<Q>) -> bool {
        other == self
    }
}

fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 { 0 } else { x.to_bits() }
}

fn coefficient_bits(c: Complex64) -> (u64, u64) {
    (canonical_bits(c.re), canonical_bits(c.im))
}

impl<Q: Hash> Hash for PauliString<Q> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.coefficient == Complex64::new(1.0, 0.0) && self.qubit_pauli_map.len() == 1 {
            if let Some((q, p)) = self.qubit_pauli_map.iter().next() {
                hash_single_term(q, *p, state);
                return;
            }
        }
        state.write_u8(0x5a);
        state.write_usize(self.qubit_pauli_map.len());
        for (q, p) in &self.qubit_pauli_map {
            q.hash(state);
            p.hash(state);
        }
        state.write_u64(canonical_bits(self.coefficient.re));
        state.write_u64(canonical_bits(self.coefficient.im));
    }
}

impl<Q: fmt::Display> fmt::Display for PauliString<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut factors = Vec::with_capacity(self.qubit_pauli_map.len() + 1);
        if self.coefficient == Complex64::new(-1.0, 0.0) {
            f.write_str("-")?;
        } else if self.coefficient != Complex64::new(1.0, 0.0) {
            factors.push(format!("({})", self.coefficient));
        }
        if self.qubit_pauli_map.is_empty() {
            factors.push("I".to_string());
        }
        for (q, p) in &self.qubit_pauli_map {
            factors.push(format!("{p}({q})"));
        }
        f.write_str(&factors.join("*"))
    }
}

impl<Q: QubitKey> From<PauliOperation<Q>> for PauliString<Q> {
    fn from(op: PauliOperation<Q>) -> Self {
        Self::from_map([(op.qubit, op.pauli)], Complex64::new(1.0, 0.0))
    }
}

impl<Q: QubitKey> Neg for PauliString<Q> {
    type Output = PauliString<Q>;

    fn neg(mut self) -> Self::Output {
        self.coefficient = -self.coefficient;
        self
    }
}

impl<Q: QubitKey> Neg for &PauliString<Q> {
    type Output = PauliString<Q>;

    fn neg(self) -> Self::Output {
        self.with_coefficient(-self.coefficient)
    }
}

impl<Q: QubitKey> Mul for PauliString<Q> {
    type Output = PauliString<Q>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(&rhs)
    }
}

impl<Q: QubitKey> Mul<&PauliString<Q>> for &PauliString<Q> {
    type Output = PauliString<Q>;

    fn mul(self, rhs: &PauliString<Q>) -> Self::Output {
        self.product(rhs)
    }
}

impl<Q: QubitKey> Mul<PauliOperation<Q>> for PauliString<Q> {
    type Output = PauliString<Q>;

    fn mul(self, rhs: PauliOperation<Q>) -> Self::Output {
        self.product(&PauliString::from(rhs))
    }
}

impl<Q: QubitKey> Mul for PauliOperation<Q> {
    type Output = PauliString<Q>;

    fn mul(self, rhs: Self) -> Self::Output {
        PauliString::from(self).product(&PauliString::from(rhs))
    }
}

impl<Q: QubitKey> Mul<PauliString<Q>> for PauliOperation<Q> {
    type Output = PauliString<Q>;

    fn mul(self, rhs: PauliString<Q>) -> Self::Output {
        PauliString::from(self).product(&rhs)
    }
}

impl<Q: QubitKey> Mul<Complex64> for PauliString<Q> {
    type Output = PauliString<Q>;

    fn mul(mut self, rhs: Complex64) -> Self::Output {
        self.coefficient *= rhs;
        self
    }
}

impl<Q: QubitKey> Mul<f64> for PauliString<Q> {
    type Output = PauliString<Q>;

    fn mul(self, rhs: f64) -> Self::Output {
        self * Complex64::new(rhs, 0.0)
    }
}

impl<Q: QubitKey> Mul<PauliString<Q>> for Complex64 {
    type Output = PauliString<Q>;

    fn mul(self, rhs: PauliString<Q>) -> Self::Output {
        rhs * self
    }
}

impl<Q: QubitKey> Mul<PauliString<Q>> for f64 {
    type Output = PauliString<Q>;

    fn mul(self, rhs: PauliString<Q>) -> Self::Output {
        rhs * self
    }
}

impl<Q: QubitKey> Div<Complex64> for PauliString<Q> {
    type Output = PauliString<Q>;

    fn div(mut self, rhs: Complex64) -> Self::Output {
        self.coefficient /= rhs;
        self
    }
}

impl<Q: QubitKey> Div<f64> for PauliString<Q> {
    type Output = PauliString<Q>;

    fn div(self, rhs: f64) -> Self::Output {
        self / Complex64::new(rhs, 0.0)
    }
}
