use crate::errors::{UtilError, UtilResult};
use smallvec::{smallvec, SmallVec};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Qubit indices jointly acted on by one multi-qubit gate, strictly increasing.
pub type Interaction = SmallVec<[usize; 3]>;

/// Number of qubits participating in each interaction.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Degree {
    /// Pairwise interactions.
    #[default]
    Two,
    /// Three-body interactions.
    Three,
}

impl Degree {
    /// Number of qubits in each interaction of this degree.
    pub fn arity(self) -> usize {
        match self {
            Degree::Two => 2,
            Degree::Three => 3,
        }
    }
}

impl TryFrom<usize> for Degree {
    type Error = UtilError;

    fn try_from(degree: usize) -> UtilResult<Self> {
        match degree {
            2 => Ok(Degree::Two),
            3 => Ok(Degree::Three),
            d => Err(UtilError::invalid_argument(format!(
                "interaction degree must be 2 or 3, found {}",
                d
            ))),
        }
    }
}

impl FromStr for Degree {
    type Err = UtilError;

    fn from_str(s: &str) -> UtilResult<Self> {
        let degree = s.trim().parse::<usize>().map_err(|_| {
            UtilError::invalid_argument(format!("interaction degree {:?} is not an integer", s))
        })?;
        Degree::try_from(degree)
    }
}

impl Display for Degree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.arity())
    }
}

/// Connectivity layouts for interaction graphs.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Topology {
    /// Nearest neighbours on a closed cycle, see [`ring_graph`].
    Ring,
    /// Consecutive runs on an open chain, see [`line_graph`].
    Line,
    /// Every strictly increasing tuple, see [`fully_connected`].
    FullyConnected,
}

impl FromStr for Topology {
    type Err = UtilError;

    fn from_str(s: &str) -> UtilResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ring" => Ok(Topology::Ring),
            "line" => Ok(Topology::Line),
            "fully_connected" | "full" => Ok(Topology::FullyConnected),
            other => Err(UtilError::invalid_argument(format!(
                "unknown topology {:?}, expected ring, line, or fully_connected",
                other
            ))),
        }
    }
}

/// Nearest-neighbour edges on a cycle of `n` qubits.
///
/// Edges are grouped into layers which can run in parallel: first the edges starting on an even
/// qubit, then (for even `n`) the closing edge `(0, n-1)`, then the edges starting on an odd
/// qubit. A cycle of odd length cannot be split into two such layers, so its closing edge comes
/// last, on its own. Two qubits share a single edge, and fewer than two qubits have none.
///
/// Older experiment scripts left odd rings open, without the final `(0, n-1)` edge. Callers
/// replaying their edge order for odd `n` should drop the last edge.
///
/// # Example
/// ```
/// use qcirc_utils::graphs::ring_graph;
///
/// let g = ring_graph(4);
/// let g: Vec<Vec<usize>> = g.into_iter().map(|e| e.to_vec()).collect();
/// assert_eq!(g, vec![vec![0, 1], vec![2, 3], vec![0, 3], vec![1, 2]]);
/// ```
pub fn ring_graph(n: usize) -> Vec<Interaction> {
    match n {
        0 | 1 => vec![],
        2 => vec![smallvec![0, 1]],
        n => {
            let even = (0..n - 1).step_by(2).map(|i| -> Interaction { smallvec![i, i + 1] });
            let odd = (1..n - 1).step_by(2).map(|i| -> Interaction { smallvec![i, i + 1] });
            let closing: Interaction = smallvec![0, n - 1];
            let mut g: Vec<Interaction> = even.collect();
            if n % 2 == 0 {
                g.push(closing);
                g.extend(odd);
            } else {
                g.extend(odd);
                g.push(closing);
            }
            g
        }
    }
}

/// Consecutive runs of `degree` qubits along an open chain of `n` qubits.
///
/// # Example
/// ```
/// use qcirc_utils::graphs::{line_graph, Degree};
///
/// let g = line_graph(4, Degree::Three);
/// assert_eq!(g.len(), 2);
/// assert_eq!(g[1].as_slice(), &[1, 2, 3]);
/// ```
pub fn line_graph(n: usize, degree: Degree) -> Vec<Interaction> {
    let k = degree.arity();
    if n < k {
        return vec![];
    }
    (0..=n - k).map(|i| (i..i + k).collect()).collect()
}

/// Every strictly increasing tuple of `degree` qubits out of `n`, in lexicographic order.
///
/// # Example
/// ```
/// use qcirc_utils::graphs::{fully_connected, Degree};
///
/// let g = fully_connected(4, Degree::Two);
/// assert_eq!(g.len(), 6);
/// assert_eq!(g[0].as_slice(), &[0, 1]);
/// assert_eq!(g[5].as_slice(), &[2, 3]);
/// ```
pub fn fully_connected(n: usize, degree: Degree) -> Vec<Interaction> {
    match degree {
        Degree::Two => (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| smallvec![i, j]))
            .collect(),
        Degree::Three => (0..n)
            .flat_map(|i| {
                (i + 1..n).flat_map(move |j| (j + 1..n).map(move |k| smallvec![i, j, k]))
            })
            .collect(),
    }
}

/// Build the interaction list for `topology` on `n` qubits.
///
/// Rings are only defined for pairwise interactions; asking for a three-body ring is an error.
pub fn interaction_graph(
    topology: Topology,
    n: usize,
    degree: Degree,
) -> UtilResult<Vec<Interaction>> {
    let g = match (topology, degree) {
        (Topology::Ring, Degree::Two) => ring_graph(n),
        (Topology::Ring, Degree::Three) => {
            return Err(UtilError::invalid_argument(
                "ring topology only supports degree 2 interactions",
            ))
        }
        (Topology::Line, degree) => line_graph(n, degree),
        (Topology::FullyConnected, degree) => fully_connected(n, degree),
    };
    tracing::debug!(?topology, n, %degree, interactions = g.len(), "built interaction graph");
    Ok(g)
}
