#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{UtilError, UtilResult};
use crate::types::{Bitstring, Precision, Representation};
use crate::utils::{get_bit, num_bits_for, reverse_bits};
use crate::Complex;
use ndarray::Array2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::HashMap;

/// Largest allowed distance between the sum of a probability vector and one.
///
/// Matches the square root of the machine epsilon for `P`, never tighter than for f64.
pub fn probability_tolerance<P: Precision>() -> f64 {
    let eps = P::epsilon().to_f64().unwrap_or(f64::EPSILON);
    eps.sqrt().max(f64::EPSILON.sqrt())
}

/// Write `index` as a bitstring of at least `num_bits` characters using the given qubit `order`.
/// An index too large for `num_bits` is widened to its own bit length, never truncated.
///
/// # Example
/// ```
/// use qcirc_utils::sampling::index_to_bitstring_with;
/// use qcirc_utils::Representation;
///
/// assert_eq!(index_to_bitstring_with(1, 3, Representation::BigEndian), "001");
/// assert_eq!(index_to_bitstring_with(1, 3, Representation::LittleEndian), "100");
/// assert_eq!(index_to_bitstring_with(9, 3, Representation::BigEndian), "1001");
/// ```
pub fn index_to_bitstring_with(index: usize, num_bits: usize, order: Representation) -> Bitstring {
    let index_bits = (usize::BITS - index.leading_zeros()) as usize;
    let width = num_bits.max(index_bits);
    (0..width)
        .map(|i| {
            let bit_index = match order {
                Representation::LittleEndian => i,
                Representation::BigEndian => width - 1 - i,
            };
            if bit_index < usize::BITS as usize && get_bit(index, bit_index) {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

/// Write `index` as a bitstring of `num_bits` characters in the reversed (little-endian)
/// convention used for measurement outcomes: the plain binary string, read back to front.
///
/// # Example
/// ```
/// use qcirc_utils::sampling::index_to_bitstring;
///
/// assert_eq!(index_to_bitstring(0, 3), "000");
/// assert_eq!(index_to_bitstring(1, 3), "100");
/// assert_eq!(index_to_bitstring(6, 3), "011");
/// ```
pub fn index_to_bitstring(index: usize, num_bits: usize) -> Bitstring {
    index_to_bitstring_with(index, num_bits, Representation::default())
}

/// Read a bitstring written with `order` back into its index.
///
/// # Example
/// ```
/// use qcirc_utils::sampling::bitstring_to_index;
/// use qcirc_utils::Representation;
///
/// # fn main() -> qcirc_utils::errors::UtilResult<()> {
/// assert_eq!(bitstring_to_index("100", Representation::LittleEndian)?, 1);
/// assert_eq!(bitstring_to_index("100", Representation::BigEndian)?, 4);
/// # Ok(())
/// # }
/// ```
pub fn bitstring_to_index(bitstring: &str, order: Representation) -> UtilResult<usize> {
    let num_bits = bitstring.len();
    if num_bits == 0 {
        return Ok(0);
    }
    if num_bits > usize::BITS as usize {
        let message = format!(
            "bitstring of length {} does not fit in a {} bit index",
            num_bits,
            usize::BITS
        );
        return Err(UtilError::dimension_mismatch(message));
    }
    if let Some(c) = bitstring.chars().find(|c| *c != '0' && *c != '1') {
        let message = format!("bitstring {:?} contains {:?}", bitstring, c);
        return Err(UtilError::invalid_argument(message));
    }
    let natural = usize::from_str_radix(bitstring, 2)
        .map_err(|e| UtilError::invalid_argument(e.to_string()))?;
    Ok(match order {
        Representation::LittleEndian => reverse_bits(num_bits, natural),
        Representation::BigEndian => natural,
    })
}

/// Bitstrings for every index of `p`, in index order.
///
/// Only the length of `p` matters. Each bitstring has `num_bits_for(p.len())` characters.
pub fn generate_bitstrings<T>(p: &[T]) -> Vec<Bitstring> {
    let num_bits = num_bits_for(p.len());
    let r = 0..p.len();
    into_iter!(r)
        .map(|index| index_to_bitstring(index, num_bits))
        .collect()
}

/// Check that `p` is a probability vector: nonempty, finite, non-negative, and summing to one
/// within [`probability_tolerance`].
pub fn validate_probabilities<P: Precision>(p: &[P]) -> UtilResult<()> {
    if p.is_empty() {
        return Err(UtilError::dimension_mismatch(
            "probability vector must have at least one entry",
        ));
    }
    if let Some((i, x)) = p
        .iter()
        .enumerate()
        .find(|(_, x)| !x.is_finite() || **x < P::zero())
    {
        let message = format!("probability {} at index {} is not a non-negative number", x, i);
        return Err(UtilError::dimension_mismatch(message));
    }
    let total: f64 = p.iter().filter_map(|x| x.to_f64()).sum();
    let tolerance = probability_tolerance::<P>();
    if (total - 1.0).abs() > tolerance {
        let message = format!(
            "probabilities sum to {}, expected 1 within {:e}",
            total, tolerance
        );
        return Err(UtilError::dimension_mismatch(message));
    }
    Ok(())
}

/// Measurement probabilities of the amplitudes in `psi`.
///
/// No renormalization is done: the result sums to the squared norm of `psi`.
pub fn probabilities<P: Precision>(psi: &[Complex<P>]) -> Vec<P> {
    iter!(psi).map(Complex::<P>::norm_sqr).collect()
}

/// Draw `n_samples` indices with replacement from the categorical distribution `p`.
/// Draws are returned in the order they were made.
pub fn sample_indices_with_rng<P, R>(p: &[P], n_samples: usize, rng: &mut R) -> UtilResult<Vec<usize>>
where
    P: Precision,
    R: Rng + ?Sized,
{
    validate_probabilities(p)?;
    let weights = p.iter().map(|x| {
        x.to_f64()
            .ok_or_else(|| UtilError::invalid_argument(format!("{} is not representable as f64", x)))
    });
    let weights = weights.collect::<UtilResult<Vec<f64>>>()?;
    let dist = WeightedIndex::new(&weights)?;
    Ok((0..n_samples).map(|_| dist.sample(rng)).collect())
}

/// Draw `n_samples` outcomes from `p` and return them as bitstrings, in draw order.
///
/// # Example
/// ```
/// use qcirc_utils::sampling::sample_bitstrings_with_rng;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// # fn main() -> qcirc_utils::errors::UtilResult<()> {
/// let mut rng = SmallRng::seed_from_u64(7);
/// let samples = sample_bitstrings_with_rng(&[0.0, 1.0, 0.0, 0.0], 3, &mut rng)?;
/// assert_eq!(samples, vec!["10", "10", "10"]);
/// # Ok(())
/// # }
/// ```
pub fn sample_bitstrings_with_rng<P, R>(
    p: &[P],
    n_samples: usize,
    rng: &mut R,
) -> UtilResult<Vec<Bitstring>>
where
    P: Precision,
    R: Rng + ?Sized,
{
    tracing::debug!(outcomes = p.len(), n_samples, "sampling bitstrings");
    let indices = sample_indices_with_rng(p, n_samples, rng)?;
    let bitstrings = generate_bitstrings(p);
    Ok(indices.into_iter().map(|i| bitstrings[i].clone()).collect())
}

/// Same as [`sample_bitstrings_with_rng`] using the thread-local generator.
pub fn sample_bitstrings<P: Precision>(p: &[P], n_samples: usize) -> UtilResult<Vec<Bitstring>> {
    sample_bitstrings_with_rng(p, n_samples, &mut rand::thread_rng())
}

/// Tally how many times each distinct bitstring occurs. Only bitstrings which occur are keys.
///
/// # Example
/// ```
/// use qcirc_utils::sampling::count_bitstring_occurrences;
///
/// let counts = count_bitstring_occurrences(&["00", "01", "00"]);
/// assert_eq!(counts["00"], 2);
/// assert_eq!(counts["01"], 1);
/// assert_eq!(counts.len(), 2);
/// ```
pub fn count_bitstring_occurrences<S: AsRef<str>>(samples: &[S]) -> HashMap<Bitstring, usize> {
    samples.iter().fold(HashMap::new(), |mut counts, s| {
        *counts.entry(s.as_ref().to_string()).or_insert(0) += 1;
        counts
    })
}

/// Convert each bitstring into a row of 0/1 integers.
///
/// All bitstrings must have the same length. The result has shape
/// `(bitstrings.len(), bit length)`.
pub fn bitstrings_to_bitlists<S: AsRef<str>>(bitstrings: &[S]) -> UtilResult<Array2<u8>> {
    let num_bits = bitstrings.first().map(|s| s.as_ref().len()).unwrap_or(0);
    let mut data = Vec::with_capacity(bitstrings.len() * num_bits);
    for (row, s) in bitstrings.iter().enumerate() {
        let s = s.as_ref();
        if s.len() != num_bits {
            let message = format!(
                "bitstring {} has {} characters, expected {}",
                row,
                s.len(),
                num_bits
            );
            return Err(UtilError::dimension_mismatch(message));
        }
        for c in s.chars() {
            match c {
                '0' => data.push(0),
                '1' => data.push(1),
                c => {
                    let message = format!("bitstring {} contains {:?}", row, c);
                    return Err(UtilError::invalid_argument(message));
                }
            }
        }
    }
    Ok(Array2::from_shape_vec((bitstrings.len(), num_bits), data)?)
}

/// Sample `n_samples` measurements of every qubit of `psi`.
///
/// Returns the outcomes as a `(n_samples, n_qubits)` array of bits alongside the bitstrings
/// they were read from. The squared amplitudes must sum to one within
/// [`probability_tolerance`].
pub fn sample_psi_with_rng<P, R>(
    psi: &[Complex<P>],
    n_samples: usize,
    rng: &mut R,
) -> UtilResult<(Array2<u8>, Vec<Bitstring>)>
where
    P: Precision,
    R: Rng + ?Sized,
{
    let prob = probabilities(psi);
    let bitstrings = sample_bitstrings_with_rng(&prob, n_samples, rng)?;
    let outcomes = bitstrings_to_bitlists(&bitstrings)?;
    Ok((outcomes, bitstrings))
}

/// Same as [`sample_psi_with_rng`] using the thread-local generator.
pub fn sample_psi<P: Precision>(
    psi: &[Complex<P>],
    n_samples: usize,
) -> UtilResult<(Array2<u8>, Vec<Bitstring>)> {
    sample_psi_with_rng(psi, n_samples, &mut rand::thread_rng())
}
