//! Executable plans
//!
//! A plan is the product of a successful solver construction. It owns the
//! plans of whatever sub-problems it delegates to, so a finished plan is a
//! tree (in practice a chain) of boxed nodes. Dropping the root releases the
//! whole tree exactly once.

use crate::error::PlanError;
use crate::opcount::OpCount;
use anyhow::Result;
use std::fmt;
use tenfft_core::{IoPtrs, Real};

/// Lifecycle state forwarded through a plan tree before and after use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wakefulness {
    /// Released any per-use resources
    #[default]
    Sleeping,
    /// Ready to be applied
    Awake,
}

/// An executable node of a plan tree
pub trait Plan: fmt::Debug {
    /// Run the plan on `buf`, reading and writing at `ptrs`
    fn apply(&self, buf: &mut [Real], ptrs: IoPtrs) -> Result<()>;

    /// Lifecycle notification; plans forward it to their children
    fn awake(&mut self, state: Wakefulness);

    /// Structural summary, including children
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Operations performed by one application
    fn ops(&self) -> OpCount;

    /// Estimated cost of one application
    fn pcost(&self) -> f64;
}

impl fmt::Display for dyn Plan + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f)
    }
}

/// Read `buf[position]`, reporting positions past the end
pub(crate) fn load(buf: &[Real], position: usize, plan: &'static str) -> Result<Real> {
    buf.get(position)
        .copied()
        .ok_or_else(|| PlanError::out_of_bounds(plan, position, buf.len()).into())
}

/// Write `buf[position]`, reporting positions past the end
pub(crate) fn store(
    buf: &mut [Real],
    position: usize,
    value: Real,
    plan: &'static str,
) -> Result<()> {
    let len = buf.len();
    let slot = buf
        .get_mut(position)
        .ok_or_else(|| PlanError::out_of_bounds(plan, position, len))?;
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_bounds() {
        let mut buf = vec![0.0; 4];
        store(&mut buf, 3, 2.5, "test").unwrap();
        assert_eq!(load(&buf, 3, "test").unwrap(), 2.5);

        let err = load(&buf, 4, "test").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PlanError>(),
            Some(&PlanError::out_of_bounds("test", 4, 4))
        );
        assert!(store(&mut buf, 9, 1.0, "test").is_err());
    }

    #[test]
    fn test_wakefulness_default() {
        assert_eq!(Wakefulness::default(), Wakefulness::Sleeping);
    }
}
