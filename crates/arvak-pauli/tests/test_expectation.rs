//! Expectation values of propagated stabilizers.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;

use arvak_ir::{Circuit, QubitId};
use arvak_pauli::{ExpectationOptions, Pauli, PauliError, PauliString};
use num_complex::Complex64;

fn q(i: u32) -> QubitId {
    QubitId(i)
}

fn ghz_circuit(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("ghz", n);
    circuit.h(q(0)).unwrap();
    for k in 1..n {
        circuit.cx(q(k - 1), q(k)).unwrap();
    }
    circuit
}

/// `(|0...0> + |1...1>) / sqrt(2)`.
fn ghz_state(n: u32) -> Vec<Complex64> {
    let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
    state[0] = Complex64::new(FRAC_1_SQRT_2, 0.0);
    state[(1 << n) - 1] = Complex64::new(FRAC_1_SQRT_2, 0.0);
    state
}

fn density(psi: &[Complex64]) -> Vec<Complex64> {
    psi.iter()
        .flat_map(|a| psi.iter().map(move |b| a * b.conj()))
        .collect()
}

fn index_map(n: u32) -> BTreeMap<QubitId, usize> {
    (0..n).map(|k| (q(k), k as usize)).collect()
}

fn string(terms: &[(u32, Pauli)]) -> PauliString<QubitId> {
    PauliString::from_map(
        terms.iter().map(|&(k, p)| (q(k), p)),
        Complex64::new(1.0, 0.0),
    )
}

// ---------------------------------------------------------------------------
// Stabilizers
// ---------------------------------------------------------------------------

#[test]
fn propagated_stabilizers_have_unit_expectation() {
    let n = 4;
    let circuit = ghz_circuit(n);
    let state = ghz_state(n);
    let rho = density(&state);
    let map = index_map(n);
    let opts = ExpectationOptions::default();

    for k in 0..n {
        let stabilizer = PauliString::from(Pauli::Z.on(q(k)))
            .after_circuit(&circuit)
            .unwrap();
        let sv = stabilizer
            .expectation_from_state_vector(&state, &map, &opts)
            .unwrap();
        let dm = stabilizer
            .expectation_from_density_matrix(&rho, &map, &opts)
            .unwrap();
        assert!((sv - 1.0).abs() < 1e-12, "{stabilizer}: {sv}");
        assert!((dm - 1.0).abs() < 1e-12, "{stabilizer}: {dm}");
    }
}

#[test]
fn ghz_parity_correlations() {
    let n = 3;
    let state = ghz_state(n);
    let map = index_map(n);
    let opts = ExpectationOptions::default();
    let cases = [
        (string(&[(0, Pauli::X), (1, Pauli::X), (2, Pauli::X)]), 1.0),
        (string(&[(0, Pauli::Y), (1, Pauli::Y), (2, Pauli::X)]), -1.0),
        (string(&[(0, Pauli::X), (1, Pauli::Y), (2, Pauli::Y)]), -1.0),
        (string(&[(0, Pauli::Z), (1, Pauli::Z)]), 1.0),
        (string(&[(0, Pauli::Z)]), 0.0),
        (string(&[(0, Pauli::X)]), 0.0),
    ];
    for (p, expected) in cases {
        let value = p.expectation_from_state_vector(&state, &map, &opts).unwrap();
        assert!((value - expected).abs() < 1e-12, "{p}: {value} != {expected}");
    }
}

#[test]
fn coefficient_scales_expectation() {
    let state = ghz_state(2);
    let map = index_map(2);
    let p = string(&[(0, Pauli::Z), (1, Pauli::Z)]) * -0.25;
    let value = p
        .expectation_from_state_vector(&state, &map, &ExpectationOptions::default())
        .unwrap();
    assert!((value + 0.25).abs() < 1e-12);
}

#[test]
fn permuted_index_map() {
    // |01> with qubit 7 on index 0 and qubit 3 on index 1.
    let mut state = vec![Complex64::new(0.0, 0.0); 4];
    state[0b01] = Complex64::new(1.0, 0.0);
    let map: BTreeMap<QubitId, usize> = [(q(7), 0), (q(3), 1)].into_iter().collect();
    let opts = ExpectationOptions::default();

    let z7 = string(&[(7, Pauli::Z)]);
    let z3 = string(&[(3, Pauli::Z)]);
    assert!((z7.expectation_from_state_vector(&state, &map, &opts).unwrap() - 1.0).abs() < 1e-12);
    assert!((z3.expectation_from_state_vector(&state, &map, &opts).unwrap() + 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

#[test]
fn non_hermitian_string_is_rejected() {
    let state = ghz_state(2);
    let map = index_map(2);
    let p = string(&[(0, Pauli::Z)]).with_coefficient(Complex64::new(0.0, 1.0));
    let err = p
        .expectation_from_state_vector(&state, &map, &ExpectationOptions::default())
        .unwrap_err();
    assert!(matches!(err, PauliError::NonHermitian(_)));
}

#[test]
fn unnormalized_state_check_can_be_disabled() {
    let state: Vec<Complex64> = ghz_state(2).into_iter().map(|a| a * 2.0).collect();
    let map = index_map(2);
    let p = string(&[(0, Pauli::Z), (1, Pauli::Z)]);

    let strict = ExpectationOptions::default();
    assert!(matches!(
        p.expectation_from_state_vector(&state, &map, &strict),
        Err(PauliError::NotNormalized(_))
    ));

    let lenient = ExpectationOptions {
        check_preconditions: false,
        ..ExpectationOptions::default()
    };
    let value = p.expectation_from_state_vector(&state, &map, &lenient).unwrap();
    assert!((value - 4.0).abs() < 1e-12);
}

#[test]
fn bad_qubit_maps_are_rejected() {
    let state = ghz_state(2);
    let opts = ExpectationOptions::default();
    let p = string(&[(0, Pauli::Z), (1, Pauli::Z)]);

    let incomplete: BTreeMap<QubitId, usize> = [(q(0), 0)].into_iter().collect();
    assert!(matches!(
        p.expectation_from_state_vector(&state, &incomplete, &opts),
        Err(PauliError::IncompleteQubitMap)
    ));

    let repeated: BTreeMap<QubitId, usize> = [(q(0), 1), (q(1), 1)].into_iter().collect();
    assert!(matches!(
        p.expectation_from_state_vector(&state, &repeated, &opts),
        Err(PauliError::InvalidQubitIndex { num_qubits: 2 })
    ));

    let out_of_range: BTreeMap<QubitId, usize> = [(q(0), 0), (q(1), 2)].into_iter().collect();
    assert!(matches!(
        p.expectation_from_state_vector(&state, &out_of_range, &opts),
        Err(PauliError::InvalidQubitIndex { num_qubits: 2 })
    ));
}

#[test]
fn malformed_states_are_rejected() {
    let map = index_map(1);
    let opts = ExpectationOptions::default();
    let p = string(&[(0, Pauli::Z)]);
    let three = vec![Complex64::new(1.0, 0.0); 3];

    assert!(matches!(
        p.expectation_from_state_vector(&three, &map, &opts),
        Err(PauliError::InvalidStateShape(_))
    ));
    assert!(matches!(
        p.expectation_from_density_matrix(&three, &map, &opts),
        Err(PauliError::InvalidStateShape(_))
    ));
}
