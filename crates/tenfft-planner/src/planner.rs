//! Plan search driver
//!
//! The [`Planner`] owns the registered solvers and the mutable state of a
//! planning session: the [`SearchFlags`], statistics and the wisdom memo.
//! Solvers receive it by `&mut` during construction and call back into
//! [`Planner::plan_for`] to plan the sub-problems they create, so the
//! search recurses through solver and planner in turn.
//!
//! # Search
//!
//! For a problem, every solver is scored. Feasible solvers are tried tier
//! by tier, best tier first; within a tier every candidate is constructed
//! and the one with the lowest estimated cost wins. Lower tiers are only
//! tried when no candidate of a better tier produced a plan.
//!
//! Flag changes a solver makes during construction apply to the
//! sub-problems it plans and are undone once its construction returns.
//!
//! # Wisdom
//!
//! With `use_wisdom` enabled the planner remembers, per problem and flag
//! state, which solver won (or that none did). Later requests for the same
//! problem construct that solver directly. Plans themselves are never
//! shared; each request builds a fresh tree.
//!
//! # Example
//!
//! ```
//! use tenfft_core::{IoPtrs, Problem, Tensor};
//! use tenfft_planner::{Planner, PlannerConfig};
//!
//! let mut planner = Planner::with_default_solvers(PlannerConfig::default()).unwrap();
//! let problem = Problem::dft(
//!     Tensor::rank0(),
//!     Tensor::from_triples(&[(4, 2, 2)]),
//!     IoPtrs::interleaved(0, 8),
//! );
//!
//! let plan = planner.plan(&problem).unwrap();
//! let mut buf: Vec<f64> = (0..16).map(|x| x as f64).collect();
//! plan.apply(&mut buf, IoPtrs::interleaved(0, 8)).unwrap();
//! assert_eq!(&buf[8..16], &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
//! ```

use crate::flags::{PlannerConfig, SearchFlags};
use crate::plan::Plan;
use crate::rank0::register_rank0;
use crate::solver::{Score, Solver};
use crate::vrank_geq1::register_vrank_geq1;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::rc::Rc;
use tenfft_core::Problem;

/// Key identifying one planning request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WisdomKey {
    problem: Problem,
    flags: SearchFlags,
}

/// Counters describing the work a planner has done
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerStats {
    /// Calls to [`Planner::plan_for`]
    pub problems: usize,
    /// Solver scorings performed
    pub scorings: usize,
    /// Solver constructions attempted
    pub constructions: usize,
    /// Constructions that produced no plan
    pub failed_constructions: usize,
    /// Requests answered from wisdom
    pub wisdom_hits: usize,
    /// Requests that needed a full search
    pub wisdom_misses: usize,
}

impl PlannerStats {
    /// Fraction of requests answered from wisdom (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.wisdom_hits + self.wisdom_misses;
        if total == 0 {
            0.0
        } else {
            self.wisdom_hits as f64 / total as f64
        }
    }
}

/// Solver registry plus the state of one planning session
pub struct Planner {
    solvers: Vec<Rc<dyn Solver>>,
    config: PlannerConfig,
    flags: SearchFlags,
    wisdom: HashMap<WisdomKey, Option<usize>>,
    stats: PlannerStats,
    depth: usize,
}

impl Planner {
    /// Create a planner with no solvers
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            solvers: Vec::new(),
            flags: config.initial_flags,
            config,
            wisdom: HashMap::new(),
            stats: PlannerStats::default(),
            depth: 0,
        })
    }

    /// Create a planner with the vector-loop and rank-0 solvers registered
    pub fn with_default_solvers(config: PlannerConfig) -> Result<Self> {
        let mut planner = Self::new(config)?;
        register_vrank_geq1(&mut planner);
        register_rank0(&mut planner);
        Ok(planner)
    }

    /// Register a solver; solvers are scored in registration order
    pub fn register<S: Solver + 'static>(&mut self, solver: S) {
        log::debug!("register solver {}", solver.name());
        self.solvers.push(Rc::new(solver));
        self.wisdom.clear();
    }

    /// Registered solvers, in registration order
    pub fn solvers(&self) -> impl Iterator<Item = &dyn Solver> + '_ {
        self.solvers.iter().map(|s| s.as_ref())
    }

    /// Planner configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Current session flags
    pub fn flags(&self) -> &SearchFlags {
        &self.flags
    }

    /// Session flags, for solvers narrowing the search of their sub-problems
    pub fn flags_mut(&mut self) -> &mut SearchFlags {
        &mut self.flags
    }

    /// Restore the session flags to the configured initial flags
    pub fn reset_flags(&mut self) {
        self.flags = self.config.initial_flags;
    }

    /// Work counters
    pub fn stats(&self) -> &PlannerStats {
        &self.stats
    }

    /// Number of remembered planning outcomes
    pub fn wisdom_len(&self) -> usize {
        self.wisdom.len()
    }

    /// Drop all remembered planning outcomes
    pub fn forget_wisdom(&mut self) {
        self.wisdom.clear();
    }

    /// Plan `problem` as a new session.
    ///
    /// Session flags start from the configured initial flags. Fails if no
    /// combination of registered solvers can plan the problem.
    pub fn plan(&mut self, problem: &Problem) -> Result<Box<dyn Plan>> {
        self.reset_flags();
        log::debug!("plan {} flags={}", problem, self.flags);

        let plan = self
            .plan_for(problem)
            .ok_or_else(|| anyhow!("no solver could plan {}", problem))?;

        log::debug!(
            "planned {} (pcost {:.1}, {} ops)",
            plan,
            plan.pcost(),
            plan.ops().total()
        );
        Ok(plan)
    }

    /// Plan `problem` within the current session.
    ///
    /// This is the recursive entry point solvers use for sub-problems.
    /// Returns `None` if no registered solver produces a plan.
    pub fn plan_for(&mut self, problem: &Problem) -> Option<Box<dyn Plan>> {
        self.stats.problems += 1;
        let key = WisdomKey {
            problem: problem.clone(),
            flags: self.flags,
        };

        if self.config.use_wisdom {
            if let Some(&remembered) = self.wisdom.get(&key) {
                self.stats.wisdom_hits += 1;
                match remembered {
                    None => return None,
                    Some(index) => {
                        if let Some(plan) = self.invoke(index, problem) {
                            return Some(plan);
                        }
                        log::warn!(
                            "wisdom: {} no longer plans {}, searching again",
                            self.solvers[index].name(),
                            problem
                        );
                    }
                }
            } else {
                self.stats.wisdom_misses += 1;
            }
        }

        let winner = self.search(problem);
        let index = winner.as_ref().map(|(index, _)| *index);
        if self.config.use_wisdom {
            self.wisdom.insert(key, index);
        }
        winner.map(|(_, plan)| plan)
    }

    /// Score all solvers and construct the cheapest plan of the best tier
    fn search(&mut self, problem: &Problem) -> Option<(usize, Box<dyn Plan>)> {
        let scores: Vec<Score> = self
            .solvers
            .iter()
            .map(|s| s.score(problem, &self.flags))
            .collect();
        self.stats.scorings += scores.len();

        for tier in Score::TIERS {
            let mut best: Option<(usize, Box<dyn Plan>)> = None;

            for index in (0..scores.len()).filter(|&i| scores[i] == tier) {
                let Some(plan) = self.invoke(index, problem) else {
                    continue;
                };
                log::trace!(
                    "{:indent$}{} [{}] pcost {:.1}",
                    "",
                    self.solvers[index].name(),
                    tier,
                    plan.pcost(),
                    indent = self.depth * 2
                );
                let better = best
                    .as_ref()
                    .map_or(true, |(_, current)| plan.pcost() < current.pcost());
                if better {
                    best = Some((index, plan));
                }
            }

            if best.is_some() {
                return best;
            }
        }

        log::trace!("{:indent$}no plan for {}", "", problem, indent = self.depth * 2);
        None
    }

    /// Construct with solver `index`, restoring the session flags afterwards
    fn invoke(&mut self, index: usize, problem: &Problem) -> Option<Box<dyn Plan>> {
        let solver = Rc::clone(&self.solvers[index]);
        let saved = self.flags;

        self.depth += 1;
        let plan = solver.make_plan(problem, self);
        self.depth -= 1;
        self.flags = saved;

        self.stats.constructions += 1;
        if plan.is_none() {
            self.stats.failed_constructions += 1;
        }
        plan
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("solvers", &self.solvers.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("config", &self.config)
            .field("flags", &self.flags)
            .field("wisdom", &self.wisdom.len())
            .field("stats", &self.stats)
            .finish()
    }
}
