//! The multiplication engine.
//!
//! Anything that can be read as a Pauli string is first lifted into a
//! [`PauliStringLike`] value. A builder is multiplied by such a value on the
//! left (`self = other · self`) or on the right (`self = self · other`):
//!
//! - scalars scale the coefficient;
//! - maps, strings and single-qubit operations merge qubit by qubit, summing
//!   the phase exponents of each local product and applying `i^sum` once;
//! - sequences multiply element by element in written order, which on the
//!   left means walking them back to front;
//! - anything else is rejected.
//!
//! Inputs that can fail (maps, sequences, opaque values) are multiplied into
//! a scratch copy first and only committed once the whole input has been
//! accepted, so a failed call leaves the builder exactly as it was.

use num_complex::Complex64;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::ops::MulAssign;

use tracing::trace;

use crate::error::{PauliError, PauliResult};
use crate::mutable::MutablePauliString;
use crate::pauli::{PauliGateLike, PauliOperation, QubitKey, i_pow, product_phase};
use crate::string::PauliString;

/// Which side the incoming factor is multiplied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `self = other · self`
    Left,
    /// `self = self · other`
    Right,
}

/// A value that can be interpreted as a Pauli string.
#[derive(Debug, Clone)]
pub enum PauliStringLike<Q> {
    /// A bare coefficient.
    Scalar(Complex64),
    /// Qubit to Pauli entries, validated when multiplied.
    Map(Vec<(Q, PauliGateLike)>),
    /// A frozen string.
    Frozen(PauliString<Q>),
    /// A builder.
    Mutable(MutablePauliString<Q>),
    /// A single Pauli on one qubit.
    Operation(PauliOperation<Q>),
    /// An identity gate on the listed qubits.
    Identity(Vec<Q>),
    /// A product of the elements, in written order.
    Sequence(Vec<PauliStringLike<Q>>),
    /// Something with no Pauli string reading, described for the error.
    Opaque(String),
}

impl<Q> PauliStringLike<Q> {
    /// A map input from `(qubit, pauli)` pairs.
    pub fn map<P: Into<PauliGateLike>>(entries: impl IntoIterator<Item = (Q, P)>) -> Self {
        PauliStringLike::Map(entries.into_iter().map(|(q, p)| (q, p.into())).collect())
    }

    /// An input that will be rejected, carrying a description of the value.
    pub fn opaque(description: impl Into<String>) -> Self {
        PauliStringLike::Opaque(description.into())
    }

    /// True if multiplying by this value can never fail.
    fn is_infallible(&self) -> bool {
        !matches!(
            self,
            PauliStringLike::Map(_) | PauliStringLike::Sequence(_) | PauliStringLike::Opaque(_)
        )
    }
}

impl<Q> From<Complex64> for PauliStringLike<Q> {
    fn from(c: Complex64) -> Self {
        PauliStringLike::Scalar(c)
    }
}

impl<Q> From<f64> for PauliStringLike<Q> {
    fn from(x: f64) -> Self {
        PauliStringLike::Scalar(Complex64::new(x, 0.0))
    }
}

impl<Q> From<i32> for PauliStringLike<Q> {
    fn from(x: i32) -> Self {
        PauliStringLike::Scalar(Complex64::new(f64::from(x), 0.0))
    }
}

impl<Q> From<PauliString<Q>> for PauliStringLike<Q> {
    fn from(p: PauliString<Q>) -> Self {
        PauliStringLike::Frozen(p)
    }
}

impl<Q: Clone> From<&PauliString<Q>> for PauliStringLike<Q> {
    fn from(p: &PauliString<Q>) -> Self {
        PauliStringLike::Frozen(p.clone())
    }
}

impl<Q> From<MutablePauliString<Q>> for PauliStringLike<Q> {
    fn from(p: MutablePauliString<Q>) -> Self {
        PauliStringLike::Mutable(p)
    }
}

impl<Q: Clone> From<&MutablePauliString<Q>> for PauliStringLike<Q> {
    fn from(p: &MutablePauliString<Q>) -> Self {
        PauliStringLike::Mutable(p.clone())
    }
}

impl<Q> From<PauliOperation<Q>> for PauliStringLike<Q> {
    fn from(op: PauliOperation<Q>) -> Self {
        PauliStringLike::Operation(op)
    }
}

impl<Q, T: Into<PauliStringLike<Q>>> From<Vec<T>> for PauliStringLike<Q> {
    fn from(items: Vec<T>) -> Self {
        PauliStringLike::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<Q, T: Into<PauliStringLike<Q>>, const N: usize> From<[T; N]> for PauliStringLike<Q> {
    fn from(items: [T; N]) -> Self {
        PauliStringLike::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<Q, P: Into<PauliGateLike>> From<BTreeMap<Q, P>> for PauliStringLike<Q> {
    fn from(map: BTreeMap<Q, P>) -> Self {
        PauliStringLike::map(map)
    }
}

impl<Q, P: Into<PauliGateLike>, S: BuildHasher> From<HashMap<Q, P, S>> for PauliStringLike<Q> {
    fn from(map: HashMap<Q, P, S>) -> Self {
        PauliStringLike::map(map)
    }
}

impl<Q: QubitKey> MutablePauliString<Q> {
    /// `self = other · self`.
    ///
    /// A sequence `[u, v]` multiplies as `u · v · self`. On error the
    /// builder is unchanged.
    pub fn inplace_left_multiply_by(
        &mut self,
        other: impl Into<PauliStringLike<Q>>,
    ) -> PauliResult<&mut Self> {
        self.imul_checkpoint(&other.into(), Side::Left)?;
        Ok(self)
    }

    /// `self = self · other`.
    ///
    /// A sequence `[u, v]` multiplies as `self · u · v`. On error the
    /// builder is unchanged.
    pub fn inplace_right_multiply_by(
        &mut self,
        other: impl Into<PauliStringLike<Q>>,
    ) -> PauliResult<&mut Self> {
        self.imul_checkpoint(&other.into(), Side::Right)?;
        Ok(self)
    }

    fn imul_checkpoint(&mut self, other: &PauliStringLike<Q>, side: Side) -> PauliResult<()> {
        if other.is_infallible() {
            return self.imul_helper(other, side);
        }
        let mut scratch = self.clone();
        scratch.imul_helper(other, side)?;
        *self = scratch;
        Ok(())
    }

    fn imul_helper(&mut self, other: &PauliStringLike<Q>, side: Side) -> PauliResult<()> {
        match other {
            PauliStringLike::Scalar(c) => {
                self.coefficient *= c;
            }
            PauliStringLike::Map(entries) => {
                let codes = entries
                    .iter()
                    .map(|(q, p)| {
                        p.to_index()
                            .map(|code| (q, code))
                            .ok_or_else(|| PauliError::InvalidPauli {
                                key: format!("{q:?}"),
                                value: p.to_string(),
                            })
                    })
                    .collect::<PauliResult<Vec<_>>>()?;
                self.imul_terms(codes, side);
            }
            PauliStringLike::Frozen(p) => self.mul_frozen(p, side),
            PauliStringLike::Mutable(m) => {
                let terms: Vec<_> = m.pauli_int_dict.iter().map(|(q, &code)| (q, code)).collect();
                self.imul_terms(terms, side);
                self.coefficient *= m.coefficient;
            }
            PauliStringLike::Operation(op) => {
                self.imul_atom(&op.qubit, op.pauli.index(), side);
            }
            PauliStringLike::Identity(_) => {}
            PauliStringLike::Sequence(items) => match side {
                Side::Left => {
                    for item in items.iter().rev() {
                        self.imul_helper(item, side)?;
                    }
                }
                Side::Right => {
                    for item in items {
                        self.imul_helper(item, side)?;
                    }
                }
            },
            PauliStringLike::Opaque(description) => {
                return Err(PauliError::NotPauliStringLike(description.clone()));
            }
        }
        Ok(())
    }

    pub(crate) fn mul_frozen(&mut self, other: &PauliString<Q>, side: Side) {
        self.imul_terms(
            other.qubit_pauli_map.iter().map(|(q, p)| (q, p.index())),
            side,
        );
        self.coefficient *= other.coefficient;
    }

    /// Merge `terms` qubit by qubit and apply the summed phase once.
    fn imul_terms<'a, I>(&mut self, terms: I, side: Side)
    where
        Q: 'a,
        I: IntoIterator<Item = (&'a Q, u8)>,
        I::IntoIter: DoubleEndedIterator,
    {
        let terms = terms.into_iter();
        let mut phase = 0i32;
        match side {
            Side::Left => {
                for (q, code) in terms.rev() {
                    phase += self.merge_code(q, code, side);
                }
            }
            Side::Right => {
                for (q, code) in terms {
                    phase += self.merge_code(q, code, side);
                }
            }
        }
        trace!(phase, ?side, "merged Pauli terms");
        self.coefficient *= i_pow(phase);
    }

    fn imul_atom(&mut self, qubit: &Q, code: u8, side: Side) {
        let phase = self.merge_code(qubit, code, side);
        self.coefficient *= i_pow(phase);
    }

    /// Multiply one qubit's symbol by `incoming`, returning the phase exponent.
    fn merge_code(&mut self, qubit: &Q, incoming: u8, side: Side) -> i32 {
        let old = self.pauli_int_dict.get(qubit).copied().unwrap_or(0);
        let (a, b) = match side {
            Side::Left => (incoming, old),
            Side::Right => (old, incoming),
        };
        let merged = old ^ incoming;
        if merged == 0 {
            self.pauli_int_dict.remove(qubit);
        } else {
            self.pauli_int_dict.insert(qubit.clone(), merged);
        }
        i32::from(product_phase(a, b))
    }
}

impl<Q: QubitKey> MulAssign<Complex64> for MutablePauliString<Q> {
    fn mul_assign(&mut self, rhs: Complex64) {
        self.coefficient *= rhs;
    }
}

impl<Q: QubitKey> MulAssign<f64> for MutablePauliString<Q> {
    fn mul_assign(&mut self, rhs: f64) {
        self.coefficient *= rhs;
    }
}

impl<Q: QubitKey> MulAssign<&PauliString<Q>> for MutablePauliString<Q> {
    fn mul_assign(&mut self, rhs: &PauliString<Q>) {
        self.mul_frozen(rhs, Side::Right);
    }
}

impl<Q: QubitKey> MulAssign<PauliOperation<Q>> for MutablePauliString<Q> {
    fn mul_assign(&mut self, rhs: PauliOperation<Q>) {
        self.imul_atom(&rhs.qubit, rhs.pauli.index(), Side::Right);
    }
}
