//! Operation counts attached to plans

/// Tally of arithmetic and other operations one plan application performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpCount {
    /// Additions
    pub add: u64,
    /// Multiplications
    pub mul: u64,
    /// Fused multiply-adds
    pub fma: u64,
    /// Everything else (loads, stores, copies)
    pub other: u64,
}

impl OpCount {
    /// All-zero count
    pub fn zero() -> Self {
        Self::default()
    }

    /// Count made only of non-arithmetic operations
    pub fn other(other: u64) -> Self {
        Self {
            other,
            ..Self::default()
        }
    }

    /// Count for `n` repetitions
    pub fn scale(self, n: usize) -> Self {
        let n = n as u64;
        Self {
            add: self.add.saturating_mul(n),
            mul: self.mul.saturating_mul(n),
            fma: self.fma.saturating_mul(n),
            other: self.other.saturating_mul(n),
        }
    }

    /// Sum of all categories
    pub fn total(&self) -> u64 {
        self.add
            .saturating_add(self.mul)
            .saturating_add(self.fma)
            .saturating_add(self.other)
    }
}
