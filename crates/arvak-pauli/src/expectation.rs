//! Expectation values of Pauli strings against explicit states.
//!
//! States are flat slices in big-endian qubit order: state index bit
//! `n - 1 - k` belongs to the qubit mapped to `k`. Density matrices are
//! row-major `2^n × 2^n`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PauliError, PauliResult};
use crate::pauli::{Pauli, QubitKey, i_pow};
use crate::string::{HERMITIAN_ATOL, PauliString};

/// Options for expectation-value evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectationOptions {
    /// Tolerance for the normalization checks.
    pub atol: f64,
    /// Validate that the state is normalized before evaluating.
    pub check_preconditions: bool,
}

impl Default for ExpectationOptions {
    fn default() -> Self {
        Self {
            atol: 1e-7,
            check_preconditions: true,
        }
    }
}

/// Check that `qubit_map` covers `qubits` with distinct indices below `num_qubits`.
pub fn validate_qubit_mapping<'a, Q: QubitKey + 'a>(
    qubit_map: &BTreeMap<Q, usize>,
    qubits: impl IntoIterator<Item = &'a Q>,
    num_qubits: usize,
) -> PauliResult<()> {
    let mut used = BTreeSet::new();
    for q in qubits {
        let index = *qubit_map.get(q).ok_or(PauliError::IncompleteQubitMap)?;
        if index >= num_qubits || !used.insert(index) {
            return Err(PauliError::InvalidQubitIndex { num_qubits });
        }
    }
    Ok(())
}

/// `log2(len)` if `len` is a positive power of two.
fn qubit_count(len: usize) -> Option<usize> {
    len.is_power_of_two().then(|| len.trailing_zeros() as usize)
}

/// Bit masks of the string on `num_qubits` big-endian qubits.
struct PauliMasks {
    x_mask: usize,
    z_mask: usize,
    y_count: u32,
}

impl PauliMasks {
    fn new<Q: QubitKey>(
        string: &PauliString<Q>,
        qubit_map: &BTreeMap<Q, usize>,
        num_qubits: usize,
    ) -> Self {
        let mut masks = PauliMasks {
            x_mask: 0,
            z_mask: 0,
            y_count: 0,
        };
        for (q, pauli) in string.iter() {
            let Some(&k) = qubit_map.get(q) else {
                continue;
            };
            let bit = 1usize << (num_qubits - 1 - k);
            match pauli {
                Pauli::X => masks.x_mask |= bit,
                Pauli::Y => {
                    masks.x_mask |= bit;
                    masks.z_mask |= bit;
                    masks.y_count += 1;
                }
                Pauli::Z => masks.z_mask |= bit,
                Pauli::I => {}
            }
        }
        masks
    }

    /// `⟨i ^ x_mask| P |i⟩` for the bare tensor product.
    fn phase(&self, i: usize) -> Complex64 {
        let mut k = self.y_count as i32;
        if (i & self.z_mask).count_ones() % 2 == 1 {
            k += 2;
        }
        i_pow(k)
    }
}

impl<Q: QubitKey> PauliString<Q> {
    fn check_hermitian(&self) -> PauliResult<()> {
        if self.coefficient.im.abs() > HERMITIAN_ATOL {
            return Err(PauliError::NonHermitian(format!(
                "coefficient {}",
                self.coefficient
            )));
        }
        Ok(())
    }

    /// `⟨ψ| P |ψ⟩` for a state vector of `2^n` amplitudes.
    pub fn expectation_from_state_vector(
        &self,
        state: &[Complex64],
        qubit_map: &BTreeMap<Q, usize>,
        options: &ExpectationOptions,
    ) -> PauliResult<f64> {
        self.check_hermitian()?;
        let num_qubits = qubit_count(state.len()).ok_or_else(|| {
            PauliError::InvalidStateShape(format!(
                "state vector of length {} is not a power of two",
                state.len()
            ))
        })?;
        validate_qubit_mapping(qubit_map, self.keys(), num_qubits)?;
        if options.check_preconditions {
            let norm: f64 = state.iter().map(Complex64::norm_sqr).sum();
            if (norm - 1.0).abs() > options.atol {
                return Err(PauliError::NotNormalized(norm));
            }
        }

        let masks = PauliMasks::new(self, qubit_map, num_qubits);
        let value: Complex64 = state
            .iter()
            .enumerate()
            .map(|(i, amp)| state[i ^ masks.x_mask].conj() * masks.phase(i) * amp)
            .sum();
        Ok((value * self.coefficient).re)
    }

    /// `Tr(ρ P)` for a row-major density matrix of `4^n` entries.
    pub fn expectation_from_density_matrix(
        &self,
        state: &[Complex64],
        qubit_map: &BTreeMap<Q, usize>,
        options: &ExpectationOptions,
    ) -> PauliResult<f64> {
        self.check_hermitian()?;
        let dim = (state.len() as f64).sqrt().round() as usize;
        let num_qubits = (dim * dim == state.len())
            .then(|| qubit_count(dim))
            .flatten()
            .ok_or_else(|| {
                PauliError::InvalidStateShape(format!(
                    "density matrix of {} entries is not 2^n x 2^n",
                    state.len()
                ))
            })?;
        validate_qubit_mapping(qubit_map, self.keys(), num_qubits)?;
        if options.check_preconditions {
            validate_density_matrix(state, dim, options.atol)?;
        }

        let masks = PauliMasks::new(self, qubit_map, num_qubits);
        let value: Complex64 = (0..dim)
            .map(|j| state[j * dim + (j ^ masks.x_mask)] * masks.phase(j))
            .sum();
        Ok((value * self.coefficient).re)
    }
}

fn validate_density_matrix(state: &[Complex64], dim: usize, atol: f64) -> PauliResult<()> {
    for i in 0..dim {
        for j in i..dim {
            if (state[i * dim + j] - state[j * dim + i].conj()).norm() > atol {
                return Err(PauliError::NonHermitian(format!(
                    "density matrix entries ({i}, {j}) and ({j}, {i})"
                )));
            }
        }
    }
    let trace: Complex64 = (0..dim).map(|i| state[i * dim + i]).sum();
    if (trace - Complex64::new(1.0, 0.0)).norm() > atol {
        return Err(PauliError::NotNormalized(trace.re));
    }
    Ok(())
}
