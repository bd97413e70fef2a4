use num_traits::{Float, FloatConst, NumAssign};
use std::fmt::{Debug, Display};
use std::iter::{Product, Sum};

/// The float precision of states and probability vectors.
pub trait Precision:
    Default + NumAssign + Float + FloatConst + Sum + Send + Sync + Display + Product + Debug
{
}

impl Precision for f64 {}

impl Precision for f32 {}

/// A fixed-length string of '0'/'1' characters encoding a computational-basis outcome.
pub type Bitstring = String;

/// Order of qubits when an index is written out as a bitstring.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Representation {
    /// Qubit with index 0 is the least significant index bit, so the first character of the
    /// bitstring is the lowest bit of the index. This is the pulse-sequence simulator ordering.
    #[default]
    LittleEndian,
    /// Qubit with index 0 is the most significant index bit (plain binary formatting).
    BigEndian,
}
