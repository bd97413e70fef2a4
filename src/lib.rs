#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    missing_docs
)]

//! Helpers for quantum circuit simulation experiments: qubit interaction graphs for laying out
//! multi-qubit gates, and measurement sampling from dense state vectors.
//!
//! Measurement outcomes are written as bitstrings in the little-endian convention: the first
//! character is the lowest bit of the basis-state index. This is the ordering pulse-sequence
//! simulators use, and is the reverse of plain binary formatting. See
//! [`sampling::index_to_bitstring_with`] for the single place this choice is made.
//!
//! # Example
//! ```
//! use qcirc_utils::prelude::*;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> UtilResult<()> {
//! // Two-body gates on a ring of four qubits.
//! let edges = interaction_graph(Topology::Ring, 4, Degree::Two)?;
//! assert_eq!(edges.len(), 4);
//!
//! // The Bell state (|00> + |11>)/sqrt(2), measured in X.
//! let h = std::f64::consts::FRAC_1_SQRT_2;
//! let psi = [
//!     Complex::new(h, 0.0),
//!     Complex::new(0.0, 0.0),
//!     Complex::new(0.0, 0.0),
//!     Complex::new(h, 0.0),
//! ];
//! let rotated = prerotation(&psi, Basis::X, 2)?;
//!
//! let mut rng = SmallRng::seed_from_u64(1234);
//! let (outcomes, bitstrings) = sample_psi_with_rng(&rotated, 100, &mut rng)?;
//! assert_eq!(outcomes.shape(), &[100, 2]);
//!
//! // X parity of this Bell state is even: only "00" and "11" can appear.
//! let counts = count_bitstring_occurrences(&bitstrings);
//! assert!(counts.keys().all(|s| s == "00" || s == "11"));
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod rayon_helper;

/// Error types.
pub mod errors;
/// Qubit interaction graphs: rings, lines, and fully connected layouts.
pub mod graphs;
/// Single-qubit rotations and basis changes before measurement.
pub mod rotations;
/// Measurement sampling and bitstring encoding.
pub mod sampling;
/// Reusable types.
pub mod types;
/// Utility functions for bit and index manipulation
pub mod utils;

pub use num_complex::Complex;
pub use rand;
pub use types::*;

/// Commonly used types and functions.
/// ```
/// use qcirc_utils::prelude::*;
/// ```
pub mod prelude {
    pub use super::*;
    pub use crate::errors::*;
    pub use crate::graphs::*;
    pub use crate::rotations::*;
    pub use crate::sampling::*;
}
