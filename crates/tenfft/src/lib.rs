//! # TenFFT - Transform Plan Search
//!
//! Recursive, cost-guided planning for batched multidimensional transforms.
//!
//! This is the **meta crate** that re-exports all TenFFT components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tenfft::prelude::*;
//!
//! let mut planner = Planner::with_default_solvers(PlannerConfig::default())?;
//!
//! // A size-1 transform repeated over 4 strided elements: a gather
//! let problem = Problem::dft(
//!     Tensor::rank0(),
//!     Tensor::from_triples(&[(4, 4, 2)]),
//!     IoPtrs::interleaved(0, 16),
//! );
//! let plan = planner.plan(&problem)?;
//!
//! let mut buf = vec![0.0; 24];
//! buf[4] = 7.0;
//! plan.apply(&mut buf, IoPtrs::interleaved(0, 16))?;
//! assert_eq!(buf[18], 7.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Problem Model ([`core`])
//!
//! Strided loop nests ([`core::Tensor`]), buffer positions and transform problems.
//!
//! ```
//! use tenfft::core::Tensor;
//!
//! let vecsz = Tensor::from_triples(&[(3, 10, 20), (2, 1, 1)]);
//! let residual = vecsz.copy_except(0).unwrap();
//! assert_eq!(residual.to_string(), "[2x(1,1)]");
//! ```
//!
//! ### Plan Search ([`planner`])
//!
//! Solvers, scores, session flags and the recursive search driver.
//!
//! ```
//! use tenfft::planner::{Planner, PlannerConfig};
//!
//! let planner = Planner::with_default_solvers(PlannerConfig::default()).unwrap();
//! assert_eq!(planner.solvers().count(), 3);
//! ```
//!
//! ## Features
//!
//! - `serde`: Serialize and deserialize problems, flags and configuration

#![deny(warnings)]

// Re-export all components
pub use tenfft_core as core;
pub use tenfft_planner as planner;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenfft::prelude::*;
    //!
    //! let t = Tensor::from_triples(&[(4, 1, 1)]);
    //! assert_eq!(t.finite_rank(), Some(1));
    //! ```

    // Problem model
    pub use crate::core::{DftProblem, IoDim, IoPtrs, Problem, Rank, Real, Tensor};

    // Search
    pub use crate::planner::{
        DimChoice, OpCount, Plan, Planner, PlannerConfig, Score, SearchFlags, Solver,
        Wakefulness,
    };
}
