//! Rank-0 transforms: copies
//!
//! A transform of core rank 0 has size 1 and is the identity, so solving it
//! means copying the real and imaginary parts from input to output. This
//! solver takes vector rank 0 and 1 directly with a single copy loop, which
//! is cheaper than wrapping a scalar copy in a vector-loop plan.

use crate::error::PlanError;
use crate::flags::SearchFlags;
use crate::opcount::OpCount;
use crate::plan::{load, store, Plan, Wakefulness};
use crate::planner::Planner;
use crate::solver::{Score, Solver};
use anyhow::Result;
use std::fmt;
use tenfft_core::{IoDim, IoPtrs, Problem, Real};

const PLAN_NAME: &str = "dft-rank0";

/// Register the rank-0 solver
pub fn register_rank0(planner: &mut Planner) {
    planner.register(Rank0Solver::new());
}

/// Solver for core rank 0 with at most one vector dimension
#[derive(Debug, Clone, Default)]
pub struct Rank0Solver;

impl Rank0Solver {
    /// Create the solver
    pub fn new() -> Self {
        Self
    }

    /// The copy loop for `problem`, if this solver applies
    fn copy_loop(problem: &Problem) -> Option<IoDim> {
        let p = problem.as_dft()?;
        if p.core_shape.finite_rank()? != 0 {
            return None;
        }
        // in place, unequal strides would overwrite unread input
        if !p.is_out_of_place() && !p.vector_shape.has_inplace_strides() {
            return None;
        }
        match p.vector_shape.finite_rank()? {
            0 => Some(IoDim::new(1, 0, 0)),
            1 => p.vector_shape.dim(0).copied(),
            _ => None,
        }
    }
}

impl Solver for Rank0Solver {
    fn name(&self) -> &str {
        PLAN_NAME
    }

    fn applicable(&self, problem: &Problem) -> bool {
        Self::copy_loop(problem).is_some()
    }

    fn score(&self, problem: &Problem, _flags: &SearchFlags) -> Score {
        if self.applicable(problem) {
            Score::Preferred
        } else {
            Score::Infeasible
        }
    }

    fn make_plan(&self, problem: &Problem, _planner: &mut Planner) -> Option<Box<dyn Plan>> {
        let d = Self::copy_loop(problem)?;
        Some(Box::new(Rank0Plan::new(d)))
    }
}

/// Copy loop: `vl` element pairs from input to output
#[derive(Debug, Clone)]
pub struct Rank0Plan {
    vl: usize,
    is: isize,
    os: isize,
}

impl Rank0Plan {
    /// Copy loop over `d`
    pub fn new(d: IoDim) -> Self {
        Self {
            vl: d.n,
            is: d.is,
            os: d.os,
        }
    }

    /// Number of complex elements copied
    pub fn loop_length(&self) -> usize {
        self.vl
    }
}

impl Plan for Rank0Plan {
    fn apply(&self, buf: &mut [Real], ptrs: IoPtrs) -> Result<()> {
        // identity only when every iteration reads and writes the same slot
        if ptrs.ri == ptrs.ro && ptrs.ii == ptrs.io && self.is == self.os {
            return Ok(());
        }
        for i in 0..self.vl {
            let at = isize::try_from(i)
                .ok()
                .and_then(|s| Some((s.checked_mul(self.is)?, s.checked_mul(self.os)?)))
                .and_then(|(is, os)| ptrs.offset(is, os))
                .ok_or_else(|| PlanError::offset_overflow(PLAN_NAME, i))?;
            let re = load(buf, at.ri, PLAN_NAME)?;
            let im = load(buf, at.ii, PLAN_NAME)?;
            store(buf, at.ro, re, PLAN_NAME)?;
            store(buf, at.io, im, PLAN_NAME)?;
        }
        Ok(())
    }

    fn awake(&mut self, _state: Wakefulness) {}

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-x{})", PLAN_NAME, self.vl)
    }

    fn ops(&self) -> OpCount {
        OpCount::other(2 * self.vl as u64)
    }

    fn pcost(&self) -> f64 {
        self.ops().total() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::PlannerConfig;
    use tenfft_core::Tensor;

    fn planner() -> Planner {
        Planner::new(PlannerConfig::default()).unwrap()
    }

    #[test]
    fn test_scalar_copy() {
        let p = Problem::dft(Tensor::rank0(), Tensor::rank0(), IoPtrs::new(0, 1, 2, 3));
        let plan = Rank0Solver::new().make_plan(&p, &mut planner()).unwrap();

        let mut buf = vec![1.5, -2.0, 0.0, 0.0];
        plan.apply(&mut buf, IoPtrs::new(0, 1, 2, 3)).unwrap();
        assert_eq!(buf, vec![1.5, -2.0, 1.5, -2.0]);
        assert_eq!(plan.to_string(), "(dft-rank0-x1)");
        assert_eq!(plan.pcost(), 2.0);
    }

    #[test]
    fn test_strided_copy_loop() {
        let p = Problem::dft(
            Tensor::rank0(),
            Tensor::from_triples(&[(3, 2, 4)]),
            IoPtrs::interleaved(0, 6),
        );
        let plan = Rank0Solver::new().make_plan(&p, &mut planner()).unwrap();

        let mut buf = vec![0.0; 18];
        for (i, x) in buf.iter_mut().take(6).enumerate() {
            *x = i as f64 + 1.0;
        }
        plan.apply(&mut buf, IoPtrs::interleaved(0, 6)).unwrap();

        assert_eq!(&buf[6..8], &[1.0, 2.0]);
        assert_eq!(&buf[10..12], &[3.0, 4.0]);
        assert_eq!(&buf[14..16], &[5.0, 6.0]);
        assert_eq!(plan.ops(), OpCount::other(6));
    }

    #[test]
    fn test_out_of_bounds_reported() {
        let plan = Rank0Plan::new(IoDim::new(2, 1, 1));
        let mut buf = vec![0.0; 3];
        let err = plan.apply(&mut buf, IoPtrs::new(0, 1, 2, 3)).unwrap_err();
        assert!(err.to_string().contains("outside buffer"));
    }

    #[test]
    fn test_applicability() {
        let s = Rank0Solver::new();
        let flags = SearchFlags::default();
        let core1 = Problem::dft(
            Tensor::from_triples(&[(4, 1, 1)]),
            Tensor::rank0(),
            IoPtrs::new(0, 1, 8, 9),
        );
        assert_eq!(s.score(&core1, &flags), Score::Infeasible);

        let vrank2 = Problem::dft(
            Tensor::rank0(),
            Tensor::from_triples(&[(2, 1, 1), (2, 2, 2)]),
            IoPtrs::new(0, 1, 8, 9),
        );
        assert!(!s.applicable(&vrank2));

        let in_place_skew = Problem::dft(
            Tensor::rank0(),
            Tensor::from_triples(&[(2, 1, 2)]),
            IoPtrs::new(0, 1, 0, 1),
        );
        assert!(!s.applicable(&in_place_skew));
        assert!(!s.applicable(&Problem::Unsolvable));
    }

    #[test]
    fn test_in_place_is_noop() {
        let p = Problem::dft(
            Tensor::rank0(),
            Tensor::from_triples(&[(2, 2, 2)]),
            IoPtrs::new(0, 1, 0, 1),
        );
        let plan = Rank0Solver::new().make_plan(&p, &mut planner()).unwrap();
        let mut buf = vec![1.0, 2.0, 3.0, 4.0];
        plan.apply(&mut buf, IoPtrs::new(0, 1, 0, 1)).unwrap();
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_shared_start_with_unequal_strides_still_copies() {
        // input and output start at the same slot but diverge after it
        let plan = Rank0Plan::new(IoDim::new(2, 1, 2));
        let mut buf: Vec<f64> = (0..8).map(|x| x as f64).collect();
        plan.apply(&mut buf, IoPtrs::new(0, 4, 0, 4)).unwrap();

        assert_eq!(buf[0], 0.0);
        assert_eq!(buf[2], 1.0);
        assert_eq!(buf[4], 4.0);
        assert_eq!(buf[6], 5.0);
    }
}
