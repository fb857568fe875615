//! # tenfft-planner
//!
//! Recursive plan search for batched transforms.
//!
//! A transform problem is a core shape (the transform itself) repeated over
//! a vector shape. The [`Planner`] asks every registered [`Solver`] how well
//! it fits a problem, constructs the candidates of the best score tier and
//! keeps the cheapest. Solvers may split a problem and plan the pieces by
//! calling back into the planner, so a finished [`Plan`] is a tree of nodes.
//!
//! ## Features
//!
//! - **Vector-loop solvers** ([`VrankGeq1Solver`]): peel one vector dimension
//!   into a loop around a child plan, reducing vector rank by one per level
//! - **Buddy dimension choices** ([`DimChoice`], [`pick_dim`]): sibling solvers
//!   that peel different dimensions so the search can compare loop orders
//! - **Rank-0 copies** ([`Rank0Solver`]): size-1 transforms executed as copies
//! - **Session flags** ([`SearchFlags`]): impatient search, forced vector
//!   recursion and alignment tracking, scoped to each construction
//! - **Wisdom**: the winning solver is remembered per problem and flag state
//!
//! ## Quick Start
//!
//! ```
//! use tenfft_core::{IoPtrs, Problem, Tensor};
//! use tenfft_planner::{Planner, PlannerConfig};
//!
//! let mut planner = Planner::with_default_solvers(PlannerConfig::default()).unwrap();
//!
//! // Copy a 2x3 grid of complex values from position 0 to position 12
//! let problem = Problem::dft(
//!     Tensor::rank0(),
//!     Tensor::from_triples(&[(2, 6, 6), (3, 2, 2)]),
//!     IoPtrs::interleaved(0, 12),
//! );
//! let plan = planner.plan(&problem).unwrap();
//! println!("{} costs {:.1}", plan, plan.pcost());
//!
//! let mut buf: Vec<f64> = (0..24).map(|x| x as f64).collect();
//! plan.apply(&mut buf, IoPtrs::interleaved(0, 12)).unwrap();
//! assert_eq!(&buf[..12], &buf[12..]);
//! ```
//!
//! ## Scoring
//!
//! Scores are ordered `Infeasible < Discouraged < Acceptable < Preferred`.
//! Lower tiers are only constructed when no candidate of a better tier
//! produced a plan. Within a tier the lowest `pcost` wins.
//!
//! ## Logging
//!
//! The planner reports through the [`log`] facade: sessions at `debug`,
//! individual candidates and peeled dimensions at `trace`.

#![deny(warnings)]

pub mod error;
pub mod flags;
pub mod opcount;
pub mod pickdim;
pub mod plan;
pub mod planner;
pub mod rank0;
pub mod solver;
pub mod vrank_geq1;


// Re-exports
pub use error::PlanError;
pub use flags::{PlannerConfig, SearchFlags};
pub use opcount::OpCount;
pub use pickdim::{pick_dim, DimChoice};
pub use plan::{Plan, Wakefulness};
pub use planner::{Planner, PlannerStats};
pub use rank0::{register_rank0, Rank0Plan, Rank0Solver};
pub use solver::{Score, Solver};
pub use vrank_geq1::{register_vrank_geq1, VrankGeq1Plan, VrankGeq1Solver, VRANK_GEQ1_BUDDIES};
