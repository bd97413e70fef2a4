/// Set the `bit_index` bit in `num` to `value`.
///
/// # Example
/// ```
/// use qcirc_utils::utils::set_bit;
/// assert_eq!(set_bit(0, 1, true), 2);
/// assert_eq!(set_bit(3, 0, false), 2);
/// ```
#[inline]
pub fn set_bit(num: usize, bit_index: usize, value: bool) -> usize {
    let v = 1 << bit_index;
    if value {
        num | v
    } else {
        num & !v
    }
}

/// Get the `bit_index` bit value from `num`.
///
/// # Example
/// ```
/// use qcirc_utils::utils::get_bit;
/// assert!(get_bit(2, 1));
/// assert!(!get_bit(2, 0));
/// ```
#[inline]
pub fn get_bit(num: usize, bit_index: usize) -> bool {
    ((num >> bit_index) & 1) != 0
}

/// Reverses the order of the lowest `n` bits in `num`. This moves bits, it does not
/// complement them.
///
/// # Example
///
/// ```
/// use qcirc_utils::utils::reverse_bits;
///
/// assert_eq!(reverse_bits(3, 0b100), 0b001);
/// assert_eq!(reverse_bits(3, 0b010), 0b010);
/// assert_eq!(reverse_bits(4, 0b1010), 0b0101);
/// ```
#[inline]
pub fn reverse_bits(n: usize, num: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let leading_zeros = usize::BITS as usize - n;
    num.reverse_bits() >> leading_zeros
}

/// Number of bits needed to write every index of a vector of length `len`.
/// This is the bit length of `len - 1`, so a single entry needs no bits at all.
///
/// # Example
/// ```
/// use qcirc_utils::utils::num_bits_for;
///
/// assert_eq!(num_bits_for(1), 0);
/// assert_eq!(num_bits_for(4), 2);
/// assert_eq!(num_bits_for(5), 3);
/// ```
#[inline]
pub fn num_bits_for(len: usize) -> usize {
    let max_index = len.saturating_sub(1);
    (usize::BITS - max_index.leading_zeros()) as usize
}

/// Get the index into a row-major `2^nindices` by `2^nindices` matrix.
#[inline]
pub fn get_flat_index(nindices: usize, i: usize, j: usize) -> usize {
    let mat_side = 1 << nindices;
    (i * mat_side) + j
}
