//! Error types for plan construction and application

use thiserror::Error;

/// Errors raised by planner configuration and plan execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A plan touched a position outside the workspace buffer
    #[error("{plan}: position {position} outside buffer of length {len}")]
    OutOfBounds {
        plan: &'static str,
        position: usize,
        len: usize,
    },

    /// Loop offsets left the addressable range
    #[error("{plan}: offset overflow at iteration {iteration}")]
    OffsetOverflow { plan: &'static str, iteration: usize },

    /// Rejected planner configuration
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

impl PlanError {
    /// Create an out-of-bounds error
    pub fn out_of_bounds(plan: &'static str, position: usize, len: usize) -> Self {
        PlanError::OutOfBounds { plan, position, len }
    }

    /// Create an offset overflow error
    pub fn offset_overflow(plan: &'static str, iteration: usize) -> Self {
        PlanError::OffsetOverflow { plan, iteration }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = PlanError::out_of_bounds("dft-rank0", 12, 8);
        let msg = err.to_string();
        assert!(msg.contains("dft-rank0"));
        assert!(msg.contains("position 12"));
        assert!(msg.contains("length 8"));
    }

    #[test]
    fn test_offset_overflow_display() {
        let err = PlanError::offset_overflow("dft-vrank>=1", 3);
        assert_eq!(err.to_string(), "dft-vrank>=1: offset overflow at iteration 3");
    }
}
