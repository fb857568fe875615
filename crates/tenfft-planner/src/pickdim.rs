//! Choosing which vector dimension to peel
//!
//! Sibling solvers ("buddies") share one ordered list of [`DimChoice`]s and
//! each owns one entry. A choice resolves to a concrete index of the vector
//! shape:
//!
//! - `FromStart(k)`: the k-th eligible dimension, outermost first
//! - `FromEnd(k)`: the k-th eligible dimension, innermost first
//!
//! Out of place, every dimension is eligible. In place, a loop whose input
//! and output strides differ would overwrite data later iterations still
//! read, so only equal-stride dimensions are eligible, and a dimension that
//! an earlier buddy already resolves to is left to that buddy.
//!
//! ```
//! use tenfft_core::Tensor;
//! use tenfft_planner::{pick_dim, DimChoice};
//!
//! let buddies = [DimChoice::FromStart(0), DimChoice::FromEnd(0)];
//! let vecsz = Tensor::from_triples(&[(5, 1, 1), (2, 100, 100)]);
//!
//! assert_eq!(pick_dim(DimChoice::FromStart(0), &buddies, &vecsz, true), Some(0));
//! assert_eq!(pick_dim(DimChoice::FromEnd(0), &buddies, &vecsz, true), Some(1));
//! ```

use std::fmt;
use tenfft_core::Tensor;

/// Which vector dimension a solver peels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimChoice {
    /// k-th eligible dimension counting from the outermost
    FromStart(usize),
    /// k-th eligible dimension counting from the innermost
    FromEnd(usize),
}

impl DimChoice {
    /// Resolve against `vecsz` without looking at buddies
    pub fn resolve(self, vecsz: &Tensor, out_of_place: bool) -> Option<usize> {
        if !vecsz.is_finite() {
            return None;
        }
        let mut eligible = vecsz
            .dims()
            .iter()
            .enumerate()
            .filter(|(_, d)| out_of_place || d.has_equal_strides())
            .map(|(i, _)| i);

        match self {
            DimChoice::FromStart(k) => eligible.nth(k),
            DimChoice::FromEnd(k) => eligible.rev().nth(k),
        }
    }
}

impl fmt::Display for DimChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimChoice::FromStart(k) => write!(f, "{}", k + 1),
            DimChoice::FromEnd(k) => write!(f, "-{}", k + 1),
        }
    }
}

/// Resolve `choice` to a dimension index of `vecsz`.
///
/// `None` if the choice has no eligible dimension, or if (in place) an
/// earlier entry of `buddies` claims the same dimension.
pub fn pick_dim(
    choice: DimChoice,
    buddies: &[DimChoice],
    vecsz: &Tensor,
    out_of_place: bool,
) -> Option<usize> {
    let dim = choice.resolve(vecsz, out_of_place)?;

    if !out_of_place {
        for &buddy in buddies {
            if buddy == choice {
                break;
            }
            if buddy.resolve(vecsz, out_of_place) == Some(dim) {
                return None;
            }
        }
    }

    Some(dim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDDIES: [DimChoice; 2] = [DimChoice::FromStart(0), DimChoice::FromEnd(0)];

    #[test]
    fn test_single_dim_resolves_both_ways_out_of_place() {
        let vecsz = Tensor::from_triples(&[(3, 10, 20)]);
        assert_eq!(pick_dim(BUDDIES[0], &BUDDIES, &vecsz, true), Some(0));
        assert_eq!(pick_dim(BUDDIES[1], &BUDDIES, &vecsz, true), Some(0));
    }

    #[test]
    fn test_out_of_range() {
        let vecsz = Tensor::from_triples(&[(3, 1, 1), (4, 3, 3)]);
        assert_eq!(DimChoice::FromStart(2).resolve(&vecsz, true), None);
        assert_eq!(DimChoice::FromEnd(1).resolve(&vecsz, true), Some(0));
        assert_eq!(DimChoice::FromStart(0).resolve(&Tensor::rank0(), true), None);
        assert_eq!(DimChoice::FromEnd(0).resolve(&Tensor::non_finite(), true), None);
    }

    #[test]
    fn test_in_place_skips_unequal_strides() {
        let vecsz = Tensor::from_triples(&[(3, 1, 2), (4, 8, 8), (2, 5, 7)]);
        assert_eq!(DimChoice::FromStart(0).resolve(&vecsz, false), Some(1));
        assert_eq!(DimChoice::FromEnd(0).resolve(&vecsz, false), Some(1));
        assert_eq!(DimChoice::FromStart(0).resolve(&vecsz, true), Some(0));
    }

    #[test]
    fn test_in_place_buddy_claims_shared_dimension() {
        let vecsz = Tensor::from_triples(&[(3, 4, 4)]);
        assert_eq!(pick_dim(BUDDIES[0], &BUDDIES, &vecsz, false), Some(0));
        assert_eq!(pick_dim(BUDDIES[1], &BUDDIES, &vecsz, false), None);
    }

    #[test]
    fn test_in_place_distinct_dimensions_both_pick() {
        let vecsz = Tensor::from_triples(&[(3, 4, 4), (5, 1, 1)]);
        assert_eq!(pick_dim(BUDDIES[0], &BUDDIES, &vecsz, false), Some(0));
        assert_eq!(pick_dim(BUDDIES[1], &BUDDIES, &vecsz, false), Some(1));
    }

    #[test]
    fn test_in_place_no_eligible_dimension() {
        let vecsz = Tensor::from_triples(&[(3, 1, 2)]);
        assert_eq!(pick_dim(BUDDIES[0], &BUDDIES, &vecsz, false), None);
        assert_eq!(pick_dim(BUDDIES[1], &BUDDIES, &vecsz, false), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(DimChoice::FromStart(0).to_string(), "1");
        assert_eq!(DimChoice::FromEnd(0).to_string(), "-1");
        assert_eq!(DimChoice::FromEnd(2).to_string(), "-3");
    }
}
