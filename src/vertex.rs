/*!
Vertex keys and distances.

Graphs in this crate are keyed: every vertex is identified by a value of
some key type `K`, and all representations store keys in sorted order so
that iteration is deterministic.
*/

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Edge weights are signed so that negative-weight algorithms work.
pub type Weight = i64;

/// Blanket trait for types usable as vertex keys.
///
/// Anything ordered, hashable, cloneable and printable qualifies, i.e.
/// integers, strings, chars, tuples of those, and so on.
pub trait VertexKey: Ord + Hash + Clone + Debug + Display {}

impl<T: Ord + Hash + Clone + Debug + Display> VertexKey for T {}

/// Sort key for an optional edge weight: an absent weight orders below
/// every present weight.
pub(crate) fn weight_rank(weight: Option<Weight>) -> (bool, Weight) {
    match weight {
        None => (false, 0),
        Some(w) => (true, w),
    }
}

/// A possibly-unreachable distance.
///
/// The derived order places every finite distance below [`Distance::Infinite`],
/// so min-selection over distances needs no special casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(Weight),
    Infinite,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Distance::Infinite)
    }

    pub fn finite(self) -> Option<Weight> {
        match self {
            Distance::Finite(w) => Some(w),
            Distance::Infinite => None,
        }
    }

    /// Adds a finite weight, with `Infinite` absorbing.
    pub fn plus(self, weight: Weight) -> Distance {
        match self {
            Distance::Finite(w) => Distance::Finite(w + weight),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{w}"),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

impl From<Weight> for Distance {
    fn from(weight: Weight) -> Self {
        Distance::Finite(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_ordering() {
        assert!(Distance::Finite(-5) < Distance::Finite(0));
        assert!(Distance::Finite(1_000_000) < Distance::Infinite);
        assert_eq!(
            Distance::Finite(3).min(Distance::Infinite),
            Distance::Finite(3)
        );
    }

    #[test]
    fn distance_plus_absorbs_infinity() {
        assert_eq!(Distance::Finite(2).plus(3), Distance::Finite(5));
        assert_eq!(Distance::Infinite.plus(3), Distance::Infinite);
    }

    #[test]
    fn weight_rank_orders_unweighted_first() {
        assert!(weight_rank(None) < weight_rank(Some(Weight::MIN)));
        assert!(weight_rank(Some(1)) < weight_rank(Some(2)));
    }
}
