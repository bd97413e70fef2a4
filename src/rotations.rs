#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{UtilError, UtilResult};
use crate::types::Precision;
use crate::utils::{get_bit, get_flat_index, set_bit};
use crate::Complex;
use num_traits::{One, Zero};
use std::str::FromStr;

/// A single-qubit 2x2 operator, row-major.
pub type SingleQubitOp<P> = [Complex<P>; 4];

/// Basis in which every qubit is measured.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Basis {
    /// Pauli X eigenbasis.
    X,
    /// Pauli Y eigenbasis.
    Y,
    /// Computational basis.
    Z,
}

impl Basis {
    /// The rotation taking this basis onto the computational basis, or `None` for `Z`.
    ///
    /// X uses a -90 degree rotation about Y, Y uses a +90 degree rotation about X.
    pub fn rotation<P: Precision>(self) -> Option<SingleQubitOp<P>> {
        match self {
            Basis::X => Some(ry(-P::FRAC_PI_2())),
            Basis::Y => Some(rx(P::FRAC_PI_2())),
            Basis::Z => None,
        }
    }
}

impl TryFrom<char> for Basis {
    type Error = UtilError;

    fn try_from(c: char) -> UtilResult<Self> {
        match c.to_ascii_uppercase() {
            'X' => Ok(Basis::X),
            'Y' => Ok(Basis::Y),
            'Z' => Ok(Basis::Z),
            _ => Err(UtilError::invalid_argument(format!(
                "measurement basis must be X, Y, or Z, found {:?}",
                c
            ))),
        }
    }
}

impl FromStr for Basis {
    type Err = UtilError;

    fn from_str(s: &str) -> UtilResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Basis::try_from(c),
            _ => Err(UtilError::invalid_argument(format!(
                "measurement basis must be X, Y, or Z, found {:?}",
                s
            ))),
        }
    }
}

fn half<P: Precision>(theta: P) -> (P, P) {
    let half_theta = theta / (P::one() + P::one());
    (half_theta.cos(), half_theta.sin())
}

/// Rotation by `theta` about the X axis.
pub fn rx<P: Precision>(theta: P) -> SingleQubitOp<P> {
    let (c, s) = half(theta);
    [
        Complex::new(c, P::zero()),
        Complex::new(P::zero(), -s),
        Complex::new(P::zero(), -s),
        Complex::new(c, P::zero()),
    ]
}

/// Rotation by `theta` about the Y axis.
pub fn ry<P: Precision>(theta: P) -> SingleQubitOp<P> {
    let (c, s) = half(theta);
    [
        Complex::new(c, P::zero()),
        Complex::new(-s, P::zero()),
        Complex::new(s, P::zero()),
        Complex::new(c, P::zero()),
    ]
}

/// Rotation by `theta` about the Z axis.
pub fn rz<P: Precision>(theta: P) -> SingleQubitOp<P> {
    let half_theta = theta / (P::one() + P::one());
    [
        Complex::from_polar(P::one(), -half_theta),
        Complex::zero(),
        Complex::zero(),
        Complex::from_polar(P::one(), half_theta),
    ]
}

fn square_side(len: usize) -> UtilResult<usize> {
    let side = (len as f64).sqrt().round() as usize;
    if side * side == len {
        Ok(side)
    } else {
        Err(UtilError::dimension_mismatch(format!(
            "{} entries do not form a square matrix",
            len
        )))
    }
}

fn check_state_len<P>(psi: &[Complex<P>], n_qubits: usize) -> UtilResult<()> {
    if n_qubits >= usize::BITS as usize || psi.len() != 1 << n_qubits {
        let message = format!(
            "state has {} amplitudes, expected 2^{} for {} qubits",
            psi.len(),
            n_qubits,
            n_qubits
        );
        Err(UtilError::dimension_mismatch(message))
    } else {
        Ok(())
    }
}

/// Kronecker product of two square row-major matrices.
pub fn kron<P: Precision>(a: &[Complex<P>], b: &[Complex<P>]) -> UtilResult<Vec<Complex<P>>> {
    let a_side = square_side(a.len())?;
    let b_side = square_side(b.len())?;
    let side = a_side * b_side;
    let r = 0..side * side;
    Ok(into_iter!(r)
        .map(|flat| {
            let (row, col) = (flat / side, flat % side);
            let a_val = a[row / b_side * a_side + col / b_side];
            let b_val = b[(row % b_side) * b_side + col % b_side];
            a_val * b_val
        })
        .collect())
}

/// `mat` tensored with itself `n` times. For `n == 0` this is the 1x1 identity.
pub fn tensor_power<P: Precision>(mat: &[Complex<P>], n: usize) -> UtilResult<Vec<Complex<P>>> {
    (0..n).try_fold(vec![Complex::one()], |acc, _| kron(&acc, mat))
}

/// Apply `mat` to `qubit` of the `n` qubit state `input`, writing the result to `output`.
///
/// Qubits are big-endian to match kron product standards: `|abc>` means `q0=a`, `q1=b`, `q2=c`.
pub fn apply_single_qubit<P: Precision>(
    n: usize,
    qubit: usize,
    mat: &SingleQubitOp<P>,
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) -> UtilResult<()> {
    check_state_len(input, n)?;
    if output.len() != input.len() {
        let message = format!(
            "output has {} amplitudes, input has {}",
            output.len(),
            input.len()
        );
        return Err(UtilError::dimension_mismatch(message));
    }
    if qubit >= n {
        let message = format!("qubit {} is out of range for {} qubits", qubit, n);
        return Err(UtilError::invalid_argument(message));
    }
    let bit_index = n - 1 - qubit;
    iter_mut!(output).enumerate().for_each(|(row, out)| {
        let matrow = usize::from(get_bit(row, bit_index));
        let col0 = set_bit(row, bit_index, false);
        let col1 = set_bit(row, bit_index, true);
        *out = mat[get_flat_index(1, matrow, 0)] * input[col0]
            + mat[get_flat_index(1, matrow, 1)] * input[col1];
    });
    Ok(())
}

/// Left-multiply `psi` by the dense square operator `op`.
pub fn apply_dense<P: Precision>(
    op: &[Complex<P>],
    psi: &[Complex<P>],
) -> UtilResult<Vec<Complex<P>>> {
    let side = square_side(op.len())?;
    if side != psi.len() {
        let message = format!(
            "operator of side {} cannot act on a state of {} amplitudes",
            side,
            psi.len()
        );
        return Err(UtilError::dimension_mismatch(message));
    }
    let r = 0..side;
    Ok(into_iter!(r)
        .map(|row| {
            let op_row = &op[row * side..(row + 1) * side];
            op_row.iter().zip(psi).map(|(a, b)| a * b).sum::<Complex<P>>()
        })
        .collect())
}

/// The dense `2^n_qubits` operator which rotates every qubit from `basis` onto the
/// computational basis.
pub fn prerotation_operator<P: Precision>(
    basis: Basis,
    n_qubits: usize,
) -> UtilResult<Vec<Complex<P>>> {
    match basis.rotation::<P>() {
        Some(mat) => tensor_power(&mat, n_qubits),
        None => {
            let id = [Complex::one(), Complex::zero(), Complex::zero(), Complex::one()];
            tensor_power(&id, n_qubits)
        }
    }
}

/// Rotate every qubit of `psi` so that measuring in the computational basis measures `basis`.
///
/// The same single-qubit rotation is applied to each of the `n_qubits` qubits in turn, which is
/// the same as applying their tensor product. The `Z` basis returns a copy of `psi`.
///
/// # Example
/// ```
/// use qcirc_utils::rotations::{prerotation, Basis};
/// use qcirc_utils::Complex;
///
/// # fn main() -> qcirc_utils::errors::UtilResult<()> {
/// let h = std::f64::consts::FRAC_1_SQRT_2;
/// // |+> measured in X is always 0.
/// let plus = [Complex::new(h, 0.0), Complex::new(h, 0.0)];
/// let rotated = prerotation(&plus, Basis::X, 1)?;
/// assert!((rotated[0].norm_sqr() - 1.0).abs() < 1e-12);
/// assert!(rotated[1].norm_sqr() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn prerotation<P: Precision>(
    psi: &[Complex<P>],
    basis: Basis,
    n_qubits: usize,
) -> UtilResult<Vec<Complex<P>>> {
    check_state_len(psi, n_qubits)?;
    let mat = match basis.rotation::<P>() {
        Some(mat) => mat,
        None => return Ok(psi.to_vec()),
    };
    tracing::debug!(?basis, n_qubits, "rotating state into measurement basis");

    let mut input = psi.to_vec();
    let mut output = vec![Complex::zero(); psi.len()];
    for qubit in 0..n_qubits {
        tracing::trace!(qubit, "applying basis rotation");
        apply_single_qubit(n_qubits, qubit, &mat, &input, &mut output)?;
        std::mem::swap(&mut input, &mut output);
    }
    Ok(input)
}

#[cfg(test)]
mod rotation_tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn approx_eq(a: &[Complex<f64>], b: &[Complex<f64>]) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).norm() < 1e-10, "index {}: {} != {}", i, x, y);
        }
    }

    #[test]
    fn test_basis_parse() {
        assert_eq!("x".parse::<Basis>().unwrap(), Basis::X);
        assert_eq!(Basis::try_from('Y').unwrap(), Basis::Y);
        assert!(matches!(
            "W".parse::<Basis>(),
            Err(UtilError::InvalidArgument(_))
        ));
        assert!("XY".parse::<Basis>().is_err());
    }

    #[test]
    fn test_z_is_identity() {
        let psi = vec![
            Complex::new(0.5, 0.0),
            Complex::new(0.0, 0.5),
            Complex::new(-0.5, 0.0),
            Complex::new(0.0, -0.5),
        ];
        let out = prerotation(&psi, Basis::Z, 2).unwrap();
        assert_eq!(out, psi);
    }

    #[test]
    fn test_x_maps_plus_to_zero() {
        let h = FRAC_1_SQRT_2;
        let plus = [Complex::new(h, 0.0), Complex::new(h, 0.0)];
        let out = prerotation(&plus, Basis::X, 1).unwrap();
        approx_eq(&out, &[Complex::one(), Complex::zero()]);
    }

    #[test]
    fn test_y_maps_plus_i_to_zero() {
        let h = FRAC_1_SQRT_2;
        let plus_i = [Complex::new(h, 0.0), Complex::new(0.0, h)];
        let out = prerotation(&plus_i, Basis::Y, 1).unwrap();
        approx_eq(&out, &[Complex::one(), Complex::zero()]);
    }

    #[test]
    fn test_single_qubit_targets_big_endian() {
        let flip = [Complex::zero(), Complex::one(), Complex::one(), Complex::zero()];
        let input = [Complex::one(), Complex::zero(), Complex::zero(), Complex::zero()];
        let mut output = [Complex::zero(); 4];
        apply_single_qubit(2, 0, &flip, &input, &mut output).unwrap();
        approx_eq(
            &output,
            &[Complex::zero(), Complex::zero(), Complex::one(), Complex::zero()],
        );
        apply_single_qubit(2, 1, &flip, &input, &mut output).unwrap();
        approx_eq(
            &output,
            &[Complex::zero(), Complex::one(), Complex::zero(), Complex::zero()],
        );
    }

    #[test]
    fn test_kron() {
        let id: SingleQubitOp<f64> = [Complex::one(), Complex::zero(), Complex::zero(), Complex::one()];
        let flip: SingleQubitOp<f64> = [Complex::zero(), Complex::one(), Complex::one(), Complex::zero()];
        let k = kron(&flip, &id).unwrap();
        let mut expected = vec![Complex::zero(); 16];
        expected[get_flat_index(2, 0, 2)] = Complex::one();
        expected[get_flat_index(2, 1, 3)] = Complex::one();
        expected[get_flat_index(2, 2, 0)] = Complex::one();
        expected[get_flat_index(2, 3, 1)] = Complex::one();
        approx_eq(&k, &expected);
        assert!(kron(&flip, &[Complex::one(); 3]).is_err());
    }

    #[test]
    fn test_operator_matches_per_qubit() {
        let n = 3;
        let norm = (1..=8).map(|i| (i * i) as f64).sum::<f64>().sqrt();
        let psi: Vec<_> = (1..=8)
            .map(|i| Complex::new(i as f64 / norm, 0.0))
            .collect();
        for basis in [Basis::X, Basis::Y, Basis::Z] {
            let op = prerotation_operator::<f64>(basis, n).unwrap();
            let dense = apply_dense(&op, &psi).unwrap();
            let rotated = prerotation(&psi, basis, n).unwrap();
            approx_eq(&dense, &rotated);
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let psi = [Complex::<f64>::one(); 3];
        assert!(matches!(
            prerotation(&psi, Basis::X, 2),
            Err(UtilError::DimensionMismatch(_))
        ));
        let op = prerotation_operator::<f64>(Basis::X, 1).unwrap();
        assert!(apply_dense(&op, &psi).is_err());
    }
}
