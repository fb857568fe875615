//! Vector-loop solver: peel one vector dimension into a loop
//!
//! Each plan built here reduces the vector rank of a transform problem by
//! one. It loops over the chosen dimension and hands every iteration to a
//! child plan for the residual problem, which the planner finds
//! recursively. Solvers that know nothing about vector shapes therefore
//! only ever see problems of vector rank 0.
//!
//! Which dimension is peeled is fixed per solver instance by a
//! [`DimChoice`]. [`register_vrank_geq1`] registers one instance per entry
//! of [`VRANK_GEQ1_BUDDIES`] so the search can compare peeling the
//! outermost against the innermost dimension first.
//!
//! # Example
//!
//! ```
//! use tenfft_core::{IoPtrs, Problem, Tensor};
//! use tenfft_planner::{Planner, PlannerConfig};
//!
//! let mut planner = Planner::with_default_solvers(PlannerConfig::default()).unwrap();
//!
//! // A size-1 transform (a copy) repeated over a 3x2 grid
//! let problem = Problem::dft(
//!     Tensor::rank0(),
//!     Tensor::from_triples(&[(3, 4, 4), (2, 2, 2)]),
//!     IoPtrs::new(0, 1, 32, 33),
//! );
//! let plan = planner.plan(&problem).unwrap();
//! assert!(plan.to_string().starts_with("(dft-vrank>=1-x"));
//! ```

use crate::error::PlanError;
use crate::flags::{PlannerConfig, SearchFlags};
use crate::opcount::OpCount;
use crate::pickdim::{pick_dim, DimChoice};
use crate::plan::{Plan, Wakefulness};
use crate::planner::Planner;
use crate::solver::{Score, Solver};
use anyhow::Result;
use std::fmt;
use tenfft_core::{alignment_of, DftProblem, IoDim, IoPtrs, Problem, Real};

/// Buddy choices registered by [`register_vrank_geq1`]; the first entry is
/// the canonical one kept in impatient mode.
pub static VRANK_GEQ1_BUDDIES: [DimChoice; 2] = [DimChoice::FromStart(0), DimChoice::FromEnd(0)];

const PLAN_NAME: &str = "dft-vrank>=1";

/// Register one vector-loop solver per buddy choice
pub fn register_vrank_geq1(planner: &mut Planner) {
    for &choice in VRANK_GEQ1_BUDDIES.iter() {
        planner.register(VrankGeq1Solver::new(choice, &VRANK_GEQ1_BUDDIES));
    }
}

/// Solver that peels the vector dimension selected by its [`DimChoice`]
#[derive(Debug, Clone)]
pub struct VrankGeq1Solver {
    choice: DimChoice,
    buddies: &'static [DimChoice],
    name: String,
}

impl VrankGeq1Solver {
    /// Create a solver for `choice`, one of `buddies`
    pub fn new(choice: DimChoice, buddies: &'static [DimChoice]) -> Self {
        Self {
            choice,
            buddies,
            name: format!("{}/{}", PLAN_NAME, choice),
        }
    }

    /// The dimension choice of this solver
    pub fn choice(&self) -> DimChoice {
        self.choice
    }

    /// Transform problem and chosen vector dimension, if this solver applies
    fn pick<'p>(&self, problem: &'p Problem) -> Option<(&'p DftProblem, usize)> {
        let p = problem.as_dft()?;
        let vrank = p.vector_shape.finite_rank()?;
        if vrank == 0 {
            return None;
        }
        let dim = pick_dim(self.choice, self.buddies, &p.vector_shape, p.is_out_of_place())?;
        Some((p, dim))
    }

    /// Index of the vector dimension this solver would peel
    pub fn chosen_dim(&self, problem: &Problem) -> Option<usize> {
        self.pick(problem).map(|(_, dim)| dim)
    }

    /// The problem left after peeling, and the peeled dimension.
    ///
    /// Same buffers and core shape, vector shape without the chosen
    /// dimension.
    pub fn residual(&self, problem: &Problem) -> Option<(Problem, IoDim)> {
        let (p, dim) = self.pick(problem)?;
        let d = *p.vector_shape.dim(dim)?;
        let vector_shape = match p.vector_shape.copy_except(dim) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("{}: {}", self.name, e);
                return None;
            }
        };
        Some((
            Problem::dft(p.core_shape.clone(), vector_shape, p.ptrs),
            d,
        ))
    }
}

/// Whether stepping any buffer once along `d` leaves the alignment grid
fn loop_misaligns(ptrs: &IoPtrs, d: &IoDim, config: &PlannerConfig) -> bool {
    let misaligned = |position: usize, stride: isize| {
        let stepped = (position as isize).wrapping_add(stride);
        alignment_of(stepped, config.element_bytes, config.alignment_bytes) != 0
    };
    misaligned(ptrs.ri, d.is)
        || misaligned(ptrs.ii, d.is)
        || misaligned(ptrs.ro, d.os)
        || misaligned(ptrs.io, d.os)
}

impl Solver for VrankGeq1Solver {
    fn name(&self) -> &str {
        &self.name
    }

    fn applicable(&self, problem: &Problem) -> bool {
        self.pick(problem).is_some()
    }

    fn score(&self, problem: &Problem, flags: &SearchFlags) -> Score {
        let Some((p, dim)) = self.pick(problem) else {
            return Score::Infeasible;
        };

        if flags.impatient && self.buddies.first() != Some(&self.choice) {
            return Score::Infeasible;
        }

        let vrank = p.vector_shape.dims().len();
        if flags.force_vrecurse && vrank == 1 {
            return Score::Discouraged;
        }

        // A vector stride inside the transform's footprint combines better
        // with the transform dimensions than with a plain loop.
        let Some(d) = p.vector_shape.dim(dim) else {
            return Score::Infeasible;
        };
        let core_rank = p.core_shape.finite_rank();
        if core_rank.is_some_and(|r| r > 1)
            && d.min_stride() < p.core_shape.max_stride_magnitude()
        {
            return Score::Discouraged;
        }

        // rank-0 solvers handle this directly
        if core_rank == Some(0) && vrank == 1 {
            return Score::Discouraged;
        }

        Score::Preferred
    }

    fn make_plan(&self, problem: &Problem, planner: &mut Planner) -> Option<Box<dyn Plan>> {
        let (p, dim) = self.pick(problem)?;
        let vrank = p.vector_shape.dims().len();

        // last vector dimension: recursion pressure ends here
        if vrank == 1 && planner.flags().classic_vrecurse {
            let flags = planner.flags_mut();
            flags.classic_vrecurse = false;
            flags.force_vrecurse = false;
        }

        let d = *p.vector_shape.dim(dim)?;
        if d.n > 0 && loop_misaligns(&p.ptrs, &d, planner.config()) {
            planner.flags_mut().possibly_unaligned = true;
        }

        let (residual, _) = self.residual(problem)?;
        log::trace!("{}: peel dim {} {} -> {}", self.name, dim, d, residual);

        let child = planner.plan_for(&residual)?;
        Some(Box::new(VrankGeq1Plan::new(child, d, self.choice)))
    }
}

/// Loop over one vector dimension around a child plan
#[derive(Debug)]
pub struct VrankGeq1Plan {
    child: Box<dyn Plan>,
    vl: usize,
    ivs: isize,
    ovs: isize,
    choice: DimChoice,
    ops: OpCount,
    pcost: f64,
}

impl VrankGeq1Plan {
    /// Wrap `child` in a loop over `d`
    pub fn new(child: Box<dyn Plan>, d: IoDim, choice: DimChoice) -> Self {
        let ops = child.ops().scale(d.n);
        let pcost = d.n as f64 * child.pcost();
        Self {
            child,
            vl: d.n,
            ivs: d.is,
            ovs: d.os,
            choice,
            ops,
            pcost,
        }
    }

    /// Loop trip count
    pub fn loop_length(&self) -> usize {
        self.vl
    }

    /// Input advance per iteration
    pub fn input_stride(&self) -> isize {
        self.ivs
    }

    /// Output advance per iteration
    pub fn output_stride(&self) -> isize {
        self.ovs
    }

    /// Choice of the solver that built this plan
    pub fn choice(&self) -> DimChoice {
        self.choice
    }

    /// Plan applied on every iteration
    pub fn child(&self) -> &dyn Plan {
        self.child.as_ref()
    }
}

impl Plan for VrankGeq1Plan {
    fn apply(&self, buf: &mut [Real], ptrs: IoPtrs) -> Result<()> {
        for i in 0..self.vl {
            let step = isize::try_from(i).ok();
            let at = step
                .and_then(|s| Some((s.checked_mul(self.ivs)?, s.checked_mul(self.ovs)?)))
                .and_then(|(is, os)| ptrs.offset(is, os))
                .ok_or_else(|| PlanError::offset_overflow(PLAN_NAME, i))?;
            self.child.apply(buf, at)?;
        }
        Ok(())
    }

    fn awake(&mut self, state: Wakefulness) {
        self.child.awake(state);
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-x{}/{}{})", PLAN_NAME, self.vl, self.choice, self.child)
    }

    fn ops(&self) -> OpCount {
        self.ops
    }

    fn pcost(&self) -> f64 {
        self.pcost
    }
}
