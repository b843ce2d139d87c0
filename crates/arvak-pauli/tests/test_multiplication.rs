//! Tests for Pauli-string construction and multiplication.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::{Hash, Hasher};

use arvak_pauli::{
    MutablePauliString, Pauli, PauliError, PauliGateLike, PauliOperation, PauliString,
    PauliStringLike,
};
use num_complex::Complex64;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn ps(terms: &[(u32, Pauli)], coefficient: Complex64) -> PauliString<u32> {
    PauliString::from_map(terms.iter().copied(), coefficient)
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Symbol table
// ---------------------------------------------------------------------------

#[test]
fn ordered_anticommuting_pairs() {
    use Pauli::{X, Y, Z};
    let table = [
        ((X, Y), (Z, 1)),
        ((Y, Z), (X, 1)),
        ((Z, X), (Y, 1)),
        ((Y, X), (Z, -1)),
        ((Z, Y), (X, -1)),
        ((X, Z), (Y, -1)),
    ];
    for ((a, b), expected) in table {
        assert_eq!(a.product(b), expected, "{a} * {b}");
    }
}

#[test]
fn single_qubit_products_match_operator_overloads() {
    let xy = Pauli::X.on(0u32) * Pauli::Y.on(0u32);
    assert_eq!(xy, ps(&[(0, Pauli::Z)], c(0.0, 1.0)));

    let yx = Pauli::Y.on(0u32) * Pauli::X.on(0u32);
    assert_eq!(yx, ps(&[(0, Pauli::Z)], c(0.0, -1.0)));

    let zz = Pauli::Z.on(0u32) * Pauli::Z.on(0u32);
    assert!(zz.is_empty());
    assert_eq!(zz.coefficient(), c(1.0, 0.0));
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn new_from_map_drops_identity_entries() {
    let p = PauliString::new(PauliStringLike::map([(0u32, 'X'), (1, 'I'), (2, 'z')])).unwrap();
    assert_eq!(p, ps(&[(0, Pauli::X), (2, Pauli::Z)], c(1.0, 0.0)));
}

#[test]
fn new_accepts_integer_codes_and_symbols() {
    let from_codes = PauliString::new(PauliStringLike::map([(0u32, 1i64), (1, 2), (2, 3)])).unwrap();
    let from_symbols =
        PauliString::new(PauliStringLike::map([(0u32, Pauli::X), (1, Pauli::Y), (2, Pauli::Z)]))
            .unwrap();
    assert_eq!(from_codes, from_symbols);
}

#[test]
fn new_from_std_maps() {
    let btree: BTreeMap<u32, char> = [(0, 'Y'), (3, 'X')].into_iter().collect();
    let hash: HashMap<u32, Pauli> = [(0, Pauli::Y), (3, Pauli::X)].into_iter().collect();
    assert_eq!(PauliString::new(btree).unwrap(), PauliString::new(hash).unwrap());
}

#[test]
fn new_reads_sequence_left_to_right() {
    let p = PauliString::new(vec![Pauli::X.on(0u32), Pauli::Y.on(0u32)]).unwrap();
    assert_eq!(p, ps(&[(0, Pauli::Z)], c(0.0, 1.0)));

    let q = PauliString::new(vec![Pauli::Y.on(0u32), Pauli::X.on(0u32)]).unwrap();
    assert_eq!(q, ps(&[(0, Pauli::Z)], c(0.0, -1.0)));
}

#[test]
fn new_from_nested_mixed_sequence() {
    let items: Vec<PauliStringLike<u32>> = vec![
        2.0f64.into(),
        Pauli::X.on(0u32).into(),
        vec![Pauli::Z.on(1u32), Pauli::Z.on(0u32)].into(),
        PauliStringLike::Identity(vec![5, 6]),
        c(0.0, 1.0).into(),
    ];
    // 2 * X0 * Z1 * Z0 * i = 2i * (X0 Z0) * Z1 = 2i * (-i Y0) * Z1 = 2 Y0 Z1
    let p = PauliString::new(items).unwrap();
    assert_eq!(p, ps(&[(0, Pauli::Y), (1, Pauli::Z)], c(2.0, 0.0)));
}

#[test]
fn scalar_only_input_is_identity() {
    let p: PauliString<u32> = PauliString::new(-1).unwrap();
    assert!(p.is_empty());
    assert_eq!(p.coefficient(), c(-1.0, 0.0));
    assert_eq!(p.to_string(), "-I");
}

#[test]
fn invalid_symbol_is_rejected() {
    let err = PauliString::new(PauliStringLike::map([(7u32, 'Q')])).unwrap_err();
    match err {
        PauliError::InvalidPauli { key, value } => {
            assert_eq!(key, "7");
            assert_eq!(value, "'Q'");
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = PauliString::new(PauliStringLike::map([(0u32, PauliGateLike::Index(4))])).unwrap_err();
    assert!(matches!(err, PauliError::InvalidPauli { .. }));
}

#[test]
fn opaque_input_is_rejected() {
    let err = PauliString::<u32>::new(PauliStringLike::opaque("measurement")).unwrap_err();
    assert!(matches!(err, PauliError::NotPauliStringLike(ref s) if s == "measurement"));
    assert_eq!(err.to_string(), "measurement is not Pauli-string-like");
}

// ---------------------------------------------------------------------------
// Builder multiplication
// ---------------------------------------------------------------------------

#[test]
fn left_multiply_cancels_equal_symbols() {
    let mut m = MutablePauliString::from_like(Pauli::X.on(0u32)).unwrap();
    m.inplace_left_multiply_by(Pauli::X.on(0u32)).unwrap();
    assert!(m.is_empty());
    assert_eq!(m.coefficient(), c(1.0, 0.0));
}

#[test]
fn left_multiply_puts_incoming_first() {
    // Y · X = -i Z
    let mut m = MutablePauliString::from_like(Pauli::X.on(0u32)).unwrap();
    m.inplace_left_multiply_by(Pauli::Y.on(0u32)).unwrap();
    assert_eq!(m.freeze(), ps(&[(0, Pauli::Z)], c(0.0, -1.0)));
}

#[test]
fn right_multiply_puts_incoming_last() {
    // X · Y = i Z
    let mut m = MutablePauliString::from_like(Pauli::X.on(0u32)).unwrap();
    m.inplace_right_multiply_by(Pauli::Y.on(0u32)).unwrap();
    assert_eq!(m.freeze(), ps(&[(0, Pauli::Z)], c(0.0, 1.0)));
}

#[test]
fn left_sequence_is_applied_as_written() {
    // [Y, Z] · X = Y Z X = (i X) X = i
    let mut m = MutablePauliString::from_like(Pauli::X.on(0u32)).unwrap();
    m.inplace_left_multiply_by(vec![Pauli::Y.on(0u32), Pauli::Z.on(0u32)])
        .unwrap();
    assert!(m.is_empty());
    assert_eq!(m.coefficient(), c(0.0, 1.0));

    // [Z, Y] · X = Z Y X = (-i X) X = -i
    let mut m = MutablePauliString::from_like(Pauli::X.on(0u32)).unwrap();
    m.inplace_left_multiply_by(vec![Pauli::Z.on(0u32), Pauli::Y.on(0u32)])
        .unwrap();
    assert_eq!(m.coefficient(), c(0.0, -1.0));
}

#[test]
fn multi_qubit_phases_accumulate() {
    let a = ps(&[(0, Pauli::X), (1, Pauli::Y), (2, Pauli::Z)], c(1.0, 0.0));
    let b = ps(&[(0, Pauli::Y), (1, Pauli::Z), (3, Pauli::X)], c(1.0, 0.0));
    // (X Y)(Y Z) on qubits 0, 1 gives (iZ)(iX) = -Z X
    let expected = ps(
        &[(0, Pauli::Z), (1, Pauli::X), (2, Pauli::Z), (3, Pauli::X)],
        c(-1.0, 0.0),
    );
    assert_eq!(&a * &b, expected);

    let mut m = a.to_builder();
    m.inplace_right_multiply_by(&b).unwrap();
    assert_eq!(m.freeze(), expected);

    let mut m = b.to_builder();
    m.inplace_left_multiply_by(&a).unwrap();
    assert_eq!(m.freeze(), expected);
}

#[test]
fn builder_by_builder() {
    let lhs = MutablePauliString::from_like(vec![Pauli::X.on(0u32), Pauli::Z.on(1u32)]).unwrap();
    let mut rhs = MutablePauliString::from_like(Pauli::Z.on(0u32)).unwrap();
    rhs.set_coefficient(c(3.0, 0.0));

    let mut product = lhs.clone();
    product.inplace_right_multiply_by(&rhs).unwrap();
    // X0 Z1 · 3 Z0 = 3 (X Z)0 Z1 = -3i Y0 Z1
    assert_eq!(product.freeze(), ps(&[(0, Pauli::Y), (1, Pauli::Z)], c(0.0, -3.0)));
}

#[test]
fn failed_multiplication_leaves_builder_unchanged() {
    let mut m = MutablePauliString::from_like(vec![Pauli::X.on(0u32), Pauli::Y.on(1u32)]).unwrap();
    let before = m.clone();

    let bad_map = PauliStringLike::map([
        (0u32, PauliGateLike::from('Z')),
        (1, PauliGateLike::from(9i64)),
    ]);
    assert!(m.inplace_right_multiply_by(bad_map).is_err());
    assert_eq!(m, before);

    let bad_sequence: Vec<PauliStringLike<u32>> = vec![
        Pauli::Z.on(0u32).into(),
        c(0.0, 1.0).into(),
        PauliStringLike::opaque("reset"),
    ];
    assert!(m.inplace_left_multiply_by(bad_sequence).is_err());
    assert_eq!(m, before);
}

#[test]
fn mul_assign_operators() {
    let mut m = MutablePauliString::<u32>::new();
    m *= Pauli::X.on(0u32);
    m *= &ps(&[(0, Pauli::Y)], c(1.0, 0.0));
    m *= 2.0;
    m *= c(0.0, -1.0);
    // X · Y = iZ, times 2, times -i
    assert_eq!(m.freeze(), ps(&[(0, Pauli::Z)], c(2.0, 0.0)));
}

// ---------------------------------------------------------------------------
// Frozen algebra
// ---------------------------------------------------------------------------

#[test]
fn scalar_operators() {
    let p = ps(&[(0, Pauli::X)], c(1.0, 0.0));
    assert_eq!(-p.clone(), ps(&[(0, Pauli::X)], c(-1.0, 0.0)));
    assert_eq!(p.clone() * 2.0, ps(&[(0, Pauli::X)], c(2.0, 0.0)));
    assert_eq!(c(0.0, 1.0) * p.clone(), ps(&[(0, Pauli::X)], c(0.0, 1.0)));
    assert_eq!(p.clone() / 2.0, ps(&[(0, Pauli::X)], c(0.5, 0.0)));
    assert_eq!(p / c(0.0, 1.0), ps(&[(0, Pauli::X)], c(0.0, -1.0)));
}

#[test]
fn commutation_counts_anticommuting_overlaps() {
    let xy = ps(&[(0, Pauli::X), (1, Pauli::Y)], c(1.0, 0.0));
    let yx = ps(&[(0, Pauli::Y), (1, Pauli::X)], c(1.0, 0.0));
    assert!(xy.commutes(&yx));

    // Only qubit 1 anticommutes.
    let xz = ps(&[(0, Pauli::X), (1, Pauli::Z)], c(1.0, 0.0));
    assert!(!xy.commutes(&xz));
    assert!(!xz.commutes(&xy));

    let x0 = ps(&[(0, Pauli::X)], c(1.0, 0.0));
    assert!(x0.commutes(&ps(&[(1, Pauli::Z)], c(1.0, 0.0))));
    assert!(x0.commutes(&ps(&[(0, Pauli::X), (1, Pauli::Z)], c(-1.0, 0.0))));
}

#[test]
fn powers_and_inverse() {
    let p = ps(&[(0, Pauli::X), (1, Pauli::Z)], c(0.0, 2.0));
    assert_eq!(p.inverse().unwrap(), ps(&[(0, Pauli::X), (1, Pauli::Z)], c(0.0, -0.5)));
    assert_eq!(p.powi(2).unwrap(), ps(&[], c(-4.0, 0.0)));
    assert_eq!(p.powi(3).unwrap(), ps(&[(0, Pauli::X), (1, Pauli::Z)], c(0.0, -8.0)));
    assert_eq!(p.powi(0).unwrap(), ps(&[], c(1.0, 0.0)));

    let zero = ps(&[(0, Pauli::X)], c(0.0, 0.0));
    assert!(matches!(zero.inverse(), Err(PauliError::NotInvertible(_))));
    assert!(zero.powi(-1).is_err());
}

#[test]
fn unitary_strings() {
    assert!(ps(&[(0, Pauli::X)], c(0.0, -1.0)).is_unitary());
    assert!(!ps(&[(0, Pauli::X)], c(2.0, 0.0)).is_unitary());
}

// ---------------------------------------------------------------------------
// Equality, hashing, display
// ---------------------------------------------------------------------------

#[test]
fn single_operation_equals_unit_string() {
    let op: PauliOperation<u32> = Pauli::Y.on(4);
    let p = PauliString::from(op.clone());
    assert_eq!(p, op);
    assert_eq!(op, p);
    assert_eq!(hash_of(&p), hash_of(&op));

    let scaled = p.with_coefficient(c(-1.0, 0.0));
    assert_ne!(scaled, op);
}

#[test]
fn equal_strings_hash_equal() {
    let a = PauliString::new(vec![Pauli::X.on(0u32), Pauli::Z.on(1u32)]).unwrap();
    let b = PauliString::new(PauliStringLike::map([(1u32, 'Z'), (0, 'X')])).unwrap();
    assert_eq!(a, b);

    let set: HashSet<PauliString<u32>> = [a.clone(), b, -a.clone()].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn negative_zero_coefficient_hashes_like_zero() {
    let a = ps(&[(0, Pauli::X)], c(0.0, 0.0));
    let b = ps(&[(0, Pauli::X)], c(-0.0, -0.0));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn approximate_equality() {
    let a = ps(&[(0, Pauli::X)], c(1.0, 0.0));
    let b = ps(&[(0, Pauli::X)], c(1.0 + 1e-12, 0.0));
    assert_ne!(a, b);
    assert!(a.approx_eq(&b, arvak_pauli::DEFAULT_ATOL));
    assert!(a.equal_up_to_coefficient(&(b.clone() * 5.0)));
    assert!(!a.approx_eq(&ps(&[(1, Pauli::X)], c(1.0, 0.0)), arvak_pauli::DEFAULT_ATOL));
}

#[test]
fn display_formats() {
    assert_eq!(ps(&[(0, Pauli::X), (1, Pauli::Y)], c(1.0, 0.0)).to_string(), "X(0)*Y(1)");
    assert_eq!(ps(&[(0, Pauli::Z)], c(-1.0, 0.0)).to_string(), "-Z(0)");
    assert_eq!(ps(&[], c(1.0, 0.0)).to_string(), "I");
    assert_eq!(Pauli::X.on(3u32).to_string(), "X(3)");
}

// ---------------------------------------------------------------------------
// Qubit renaming
// ---------------------------------------------------------------------------

#[test]
fn rename_qubits_to_strings() {
    let p = ps(&[(0, Pauli::X), (1, Pauli::Z)], c(0.0, 1.0));
    let renamed = p.with_qubits(["a".to_string(), "b".to_string()]).unwrap();
    assert_eq!(renamed.get(&"a".to_string()), Some(Pauli::X));
    assert_eq!(renamed.get(&"b".to_string()), Some(Pauli::Z));
    assert_eq!(renamed.coefficient(), c(0.0, 1.0));

    assert!(matches!(
        p.with_qubits(["a".to_string()]),
        Err(PauliError::QubitCountMismatch { expected: 2, got: 1 })
    ));
}

#[test]
fn map_qubits_requires_full_injective_map() {
    let p = ps(&[(0, Pauli::X), (1, Pauli::Z)], c(1.0, 0.0));

    let shift: BTreeMap<u32, u32> = [(0, 10), (1, 11)].into_iter().collect();
    assert_eq!(p.map_qubits(&shift).unwrap(), ps(&[(10, Pauli::X), (11, Pauli::Z)], c(1.0, 0.0)));

    let partial: BTreeMap<u32, u32> = [(0, 10)].into_iter().collect();
    assert!(matches!(p.map_qubits(&partial), Err(PauliError::MissingQubit(ref q)) if q == "1"));

    let collide: BTreeMap<u32, u32> = [(0, 5), (1, 5)].into_iter().collect();
    assert!(matches!(p.map_qubits(&collide), Err(PauliError::DuplicateQubit(_))));
}

#[test]
fn builder_rename_is_atomic() {
    let mut m = MutablePauliString::from_like(vec![Pauli::X.on(0u32), Pauli::Y.on(1u32)]).unwrap();
    let before = m.clone();
    assert!(m.inplace_transform_qubits(|_| 7).is_err());
    assert_eq!(m, before);

    m.inplace_transform_qubits(|q| q + 100).unwrap();
    assert_eq!(m.freeze(), ps(&[(100, Pauli::X), (101, Pauli::Y)], c(1.0, 0.0)));
}
