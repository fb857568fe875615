//! The solver contract
//!
//! A solver is one optimization rule of the search: it judges whether it
//! can handle a problem, how much it likes doing so, and builds the plan.
//! Solvers are immutable once registered; all mutable search state lives
//! in the [`Planner`] passed to [`Solver::make_plan`].

use crate::flags::SearchFlags;
use crate::plan::Plan;
use crate::planner::Planner;
use std::fmt;
use tenfft_core::Problem;

/// How strongly a solver wants a problem. Ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    /// Cannot handle the problem
    Infeasible,
    /// Usable, but only when nothing better exists
    Discouraged,
    /// Usable
    Acceptable,
    /// Best fit
    Preferred,
}

impl Score {
    /// Usable tiers, best first
    pub const TIERS: [Score; 3] = [Score::Preferred, Score::Acceptable, Score::Discouraged];

    /// Whether the solver can be tried at all
    pub fn is_feasible(self) -> bool {
        self != Score::Infeasible
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Score::Infeasible => "infeasible",
            Score::Discouraged => "discouraged",
            Score::Acceptable => "acceptable",
            Score::Preferred => "preferred",
        };
        write!(f, "{}", s)
    }
}

/// A plan generator registered with the [`Planner`]
pub trait Solver: fmt::Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Whether the solver can handle `problem` at all
    fn applicable(&self, problem: &Problem) -> bool;

    /// Rank this solver for `problem` under the current session flags.
    ///
    /// Must not have side effects.
    fn score(&self, problem: &Problem, flags: &SearchFlags) -> Score;

    /// Build a plan, planning any sub-problems through `planner`.
    ///
    /// Returns `None` when construction fails; nothing built along the way
    /// survives the failure.
    fn make_plan(&self, problem: &Problem, planner: &mut Planner) -> Option<Box<dyn Plan>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_order() {
        assert!(Score::Infeasible < Score::Discouraged);
        assert!(Score::Discouraged < Score::Acceptable);
        assert!(Score::Acceptable < Score::Preferred);
        assert!(!Score::Infeasible.is_feasible());
        assert!(Score::TIERS.iter().all(|s| s.is_feasible()));
        assert_eq!(Score::Discouraged.to_string(), "discouraged");
    }
}
