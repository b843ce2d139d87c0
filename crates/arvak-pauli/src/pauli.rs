//! The single-qubit Pauli symbol table.
//!
//! Symbols are encoded as `I = 0, X = 1, Y = 2, Z = 3`. With this encoding the
//! product of two symbols is their XOR, and the phase of a product of two
//! distinct non-identity symbols follows the cyclic order `X → Y → Z → X`:
//!
//! ```text
//!   a·b = i^k · (a XOR b),   k = +1 if (b - a) mod 3 == 1, else -1
//! ```
//!
//! which reproduces `XY = iZ`, `YZ = iX`, `ZX = iY` and their reversals.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Requirements on the keys a Pauli string is defined over.
///
/// Blanket-implemented for every totally ordered, hashable, cloneable type.
pub trait QubitKey: Clone + Ord + Hash + fmt::Debug {}

impl<T: Clone + Ord + Hash + fmt::Debug> QubitKey for T {}

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Pauli {
    /// Identity; never stored in a Pauli string.
    I = 0,
    /// Pauli-X.
    X = 1,
    /// Pauli-Y.
    Y = 2,
    /// Pauli-Z.
    Z = 3,
}

impl Pauli {
    /// All four symbols in code order.
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// The three non-identity Paulis in cyclic order.
    pub const NON_IDENTITY: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    /// Integer code `0..=3`.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Symbol for an integer code, if it is in `0..=3`.
    #[inline]
    pub fn from_index(index: u8) -> Option<Pauli> {
        match index {
            0 => Some(Pauli::I),
            1 => Some(Pauli::X),
            2 => Some(Pauli::Y),
            3 => Some(Pauli::Z),
            _ => None,
        }
    }

    /// True for the identity.
    #[inline]
    pub fn is_identity(self) -> bool {
        self == Pauli::I
    }

    /// The product `self · rhs` as `(symbol, k)` meaning `i^k · symbol`.
    pub fn product(self, rhs: Pauli) -> (Pauli, i8) {
        let symbol = self.third(rhs);
        (symbol, product_phase(self.index(), rhs.index()))
    }

    /// XOR of the two codes: the third Pauli for distinct non-identity
    /// inputs, the other input when one side is identity, identity when
    /// both are equal.
    #[inline]
    pub fn third(self, other: Pauli) -> Pauli {
        match self.index() ^ other.index() {
            1 => Pauli::X,
            2 => Pauli::Y,
            3 => Pauli::Z,
            _ => Pauli::I,
        }
    }

    /// Whether the two operators commute.
    #[inline]
    pub fn commutes_with(self, other: Pauli) -> bool {
        self.is_identity() || other.is_identity() || self == other
    }

    /// Successor in the cyclic order `X → Y → Z → X`. Identity maps to itself.
    pub fn next(self) -> Pauli {
        match self {
            Pauli::I => Pauli::I,
            Pauli::X => Pauli::Y,
            Pauli::Y => Pauli::Z,
            Pauli::Z => Pauli::X,
        }
    }

    /// Predecessor in the cyclic order. Identity maps to itself.
    pub fn prev(self) -> Pauli {
        match self {
            Pauli::I => Pauli::I,
            Pauli::X => Pauli::Z,
            Pauli::Y => Pauli::X,
            Pauli::Z => Pauli::Y,
        }
    }

    /// This Pauli applied to `qubit`.
    pub fn on<Q>(self, qubit: Q) -> PauliOperation<Q> {
        PauliOperation { qubit, pauli: self }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(s)
    }
}

/// Phase exponent `k` of the product `a·b = i^k · (a XOR b)` for raw codes.
///
/// Zero whenever either side is identity or the two are equal.
#[inline]
pub(crate) fn product_phase(a: u8, b: u8) -> i8 {
    if a == 0 || b == 0 || a == b {
        return 0;
    }
    if (i16::from(b) - i16::from(a)).rem_euclid(3) == 1 {
        1
    } else {
        -1
    }
}

/// `i^k`, computed exactly.
#[inline]
pub(crate) fn i_pow(k: i32) -> Complex64 {
    match k.rem_euclid(4) {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

/// Anything that names a Pauli: a symbol, a letter, or an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauliGateLike {
    /// A symbol.
    Symbol(Pauli),
    /// One of `I X Y Z`, either case.
    Char(char),
    /// An integer code `0..=3`.
    Index(i64),
}

impl PauliGateLike {
    /// The integer code, if the value names a Pauli.
    pub fn to_index(self) -> Option<u8> {
        match self {
            PauliGateLike::Symbol(p) => Some(p.index()),
            PauliGateLike::Char(c) => match c {
                'I' | 'i' => Some(0),
                'X' | 'x' => Some(1),
                'Y' | 'y' => Some(2),
                'Z' | 'z' => Some(3),
                _ => None,
            },
            PauliGateLike::Index(i) => u8::try_from(i).ok().filter(|&i| i <= 3),
        }
    }

    /// The symbol, if the value names a Pauli.
    pub fn to_pauli(self) -> Option<Pauli> {
        self.to_index().and_then(Pauli::from_index)
    }
}

impl fmt::Display for PauliGateLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauliGateLike::Symbol(p) => write!(f, "{p}"),
            PauliGateLike::Char(c) => write!(f, "{c:?}"),
            PauliGateLike::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<Pauli> for PauliGateLike {
    fn from(p: Pauli) -> Self {
        PauliGateLike::Symbol(p)
    }
}

impl From<char> for PauliGateLike {
    fn from(c: char) -> Self {
        PauliGateLike::Char(c)
    }
}

impl From<i64> for PauliGateLike {
    fn from(i: i64) -> Self {
        PauliGateLike::Index(i)
    }
}

impl From<i32> for PauliGateLike {
    fn from(i: i32) -> Self {
        PauliGateLike::Index(i64::from(i))
    }
}

impl From<u8> for PauliGateLike {
    fn from(i: u8) -> Self {
        PauliGateLike::Index(i64::from(i))
    }
}

/// A single Pauli applied to one qubit.
///
/// Compares equal to, and hashes identically to, the one-term Pauli string
/// with unit coefficient on the same qubit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauliOperation<Q> {
    /// The qubit acted on.
    pub qubit: Q,
    /// The Pauli applied.
    pub pauli: Pauli,
}

impl<Q: Hash> Hash for PauliOperation<Q> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_single_term(&self.qubit, self.pauli, state);
    }
}

/// Shared hash of a unit-coefficient single-qubit Pauli term.
pub(crate) fn hash_single_term<Q: Hash, H: Hasher>(qubit: &Q, pauli: Pauli, state: &mut H) {
    state.write_u8(0xa5);
    qubit.hash(state);
    pauli.hash(state);
}

impl<Q: fmt::Display> fmt::Display for PauliOperation<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.pauli, self.qubit)
    }
}
