//! Session-scoped search flags and planner configuration

use crate::error::PlanError;
use std::fmt;
use tenfft_core::Real;

/// Search-mode flags shared by one planning session.
///
/// Solvers read them while scoring. Plan construction may narrow them for
/// the sub-problems it plans; the planner restores them once a candidate's
/// construction returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchFlags {
    /// Only the canonical choice of each buddy family is considered
    pub impatient: bool,
    /// Keep peeling vector dimensions rather than stopping early
    pub force_vrecurse: bool,
    /// Vector recursion was requested for this session
    pub classic_vrecurse: bool,
    /// Some enclosing loop may leave buffers unaligned
    pub possibly_unaligned: bool,
}

impl SearchFlags {
    /// No flags set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the impatient flag
    pub fn with_impatient(mut self, on: bool) -> Self {
        self.impatient = on;
        self
    }

    /// Set the force-vector-recursion flag
    pub fn with_force_vrecurse(mut self, on: bool) -> Self {
        self.force_vrecurse = on;
        self
    }

    /// Set the classic vector-recursion flag
    pub fn with_classic_vrecurse(mut self, on: bool) -> Self {
        self.classic_vrecurse = on;
        self
    }

    /// Set the possibly-unaligned flag
    pub fn with_possibly_unaligned(mut self, on: bool) -> Self {
        self.possibly_unaligned = on;
        self
    }
}

impl fmt::Display for SearchFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.impatient, "impatient"),
            (self.force_vrecurse, "force-vrecurse"),
            (self.classic_vrecurse, "classic-vrecurse"),
            (self.possibly_unaligned, "possibly-unaligned"),
        ];
        let set: Vec<&str> = names.iter().filter(|(on, _)| *on).map(|(_, n)| *n).collect();
        if set.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{{}}}", set.join("|"))
        }
    }
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Alignment granularity in bytes (default: 16)
    pub alignment_bytes: usize,
    /// Size of one buffer element in bytes (default: size of [`Real`])
    pub element_bytes: usize,
    /// Flags every planning session starts from
    pub initial_flags: SearchFlags,
    /// Remember the winning solver per problem (default: true)
    pub use_wisdom: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            alignment_bytes: 16,
            element_bytes: std::mem::size_of::<Real>(),
            initial_flags: SearchFlags::default(),
            use_wisdom: true,
        }
    }
}

impl PlannerConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set alignment granularity
    pub fn with_alignment(mut self, bytes: usize) -> Self {
        self.alignment_bytes = bytes;
        self
    }

    /// Set element size
    pub fn with_element_bytes(mut self, bytes: usize) -> Self {
        self.element_bytes = bytes;
        self
    }

    /// Set the flags sessions start from
    pub fn with_flags(mut self, flags: SearchFlags) -> Self {
        self.initial_flags = flags;
        self
    }

    /// Enable or disable wisdom
    pub fn with_wisdom(mut self, on: bool) -> Self {
        self.use_wisdom = on;
        self
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.alignment_bytes == 0 || !self.alignment_bytes.is_power_of_two() {
            return Err(PlanError::InvalidConfig(format!(
                "alignment must be a power of two, got {}",
                self.alignment_bytes
            )));
        }
        if self.element_bytes == 0 {
            return Err(PlanError::InvalidConfig(
                "element size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_display() {
        assert_eq!(SearchFlags::new().to_string(), "{}");
        let f = SearchFlags::new()
            .with_impatient(true)
            .with_possibly_unaligned(true);
        assert_eq!(f.to_string(), "{impatient|possibly-unaligned}");
    }

    #[test]
    fn test_config_defaults() {
        let c = PlannerConfig::default();
        assert_eq!(c.alignment_bytes, 16);
        assert_eq!(c.element_bytes, 8);
        assert_eq!(c.initial_flags, SearchFlags::default());
        assert!(c.use_wisdom);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        assert!(PlannerConfig::new().with_alignment(0).validate().is_err());
        assert!(PlannerConfig::new().with_alignment(24).validate().is_err());
        assert!(PlannerConfig::new().with_alignment(1).validate().is_ok());
        assert!(PlannerConfig::new().with_element_bytes(0).validate().is_err());
    }
}
