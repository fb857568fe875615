//! Transform problems handed to the planner.
//!
//! A [`DftProblem`] pairs a core shape (the transform itself) with a vector
//! shape (independent repetitions of it) and the buffer positions of the
//! real and imaginary parts of input and output. [`Problem`] wraps it
//! together with the other problem kinds a planner may be asked about.

use crate::tensor::Tensor;
use std::fmt;

/// Element positions of the four buffers within one shared workspace.
///
/// Positions stand in for pointers: two problems alias exactly when their
/// positions coincide, so in-place transforms have `ri == ro`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IoPtrs {
    /// Input, real part
    pub ri: usize,
    /// Input, imaginary part
    pub ii: usize,
    /// Output, real part
    pub ro: usize,
    /// Output, imaginary part
    pub io: usize,
}

impl IoPtrs {
    /// Create from explicit positions
    pub const fn new(ri: usize, ii: usize, ro: usize, io: usize) -> Self {
        Self { ri, ii, ro, io }
    }

    /// Interleaved complex storage: imaginary part right after the real part
    ///
    /// ```
    /// use tenfft_core::IoPtrs;
    ///
    /// let p = IoPtrs::interleaved(0, 64);
    /// assert_eq!((p.ri, p.ii, p.ro, p.io), (0, 1, 64, 65));
    /// ```
    pub const fn interleaved(input: usize, output: usize) -> Self {
        Self::new(input, input + 1, output, output + 1)
    }

    /// Whether input and output are distinct buffers
    pub fn is_out_of_place(&self) -> bool {
        self.ri != self.ro
    }

    /// Positions advanced by `is` on the input side and `os` on the output
    /// side. `None` if any position would fall below zero or overflow.
    pub fn offset(&self, is: isize, os: isize) -> Option<IoPtrs> {
        Some(IoPtrs {
            ri: self.ri.checked_add_signed(is)?,
            ii: self.ii.checked_add_signed(is)?,
            ro: self.ro.checked_add_signed(os)?,
            io: self.io.checked_add_signed(os)?,
        })
    }
}

impl fmt::Display for IoPtrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ri={} ii={} ro={} io={}", self.ri, self.ii, self.ro, self.io)
    }
}

/// A complex transform over batched data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DftProblem {
    /// Shape of the transform itself
    pub core_shape: Tensor,
    /// Shape of the repetitions of the transform
    pub vector_shape: Tensor,
    /// Buffer positions
    pub ptrs: IoPtrs,
}

impl DftProblem {
    /// Create a problem
    pub fn new(core_shape: Tensor, vector_shape: Tensor, ptrs: IoPtrs) -> Self {
        Self {
            core_shape,
            vector_shape,
            ptrs,
        }
    }

    /// Whether input and output are distinct buffers
    pub fn is_out_of_place(&self) -> bool {
        self.ptrs.is_out_of_place()
    }
}

/// Any problem the planner can be asked to solve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Problem {
    /// Complex transform
    Dft(DftProblem),
    /// Sentinel that no solver accepts
    Unsolvable,
}

impl Problem {
    /// Create a transform problem
    ///
    /// ```
    /// use tenfft_core::{IoPtrs, Problem, Tensor};
    ///
    /// let p = Problem::dft(
    ///     Tensor::from_triples(&[(4, 1, 1)]),
    ///     Tensor::from_triples(&[(3, 10, 20)]),
    ///     IoPtrs::new(0, 100, 200, 300),
    /// );
    /// assert!(p.as_dft().is_some());
    /// assert!(Problem::Unsolvable.as_dft().is_none());
    /// ```
    pub fn dft(core_shape: Tensor, vector_shape: Tensor, ptrs: IoPtrs) -> Self {
        Problem::Dft(DftProblem::new(core_shape, vector_shape, ptrs))
    }

    /// The transform problem, if this is one
    pub fn as_dft(&self) -> Option<&DftProblem> {
        match self {
            Problem::Dft(p) => Some(p),
            Problem::Unsolvable => None,
        }
    }
}

impl From<DftProblem> for Problem {
    fn from(p: DftProblem) -> Self {
        Problem::Dft(p)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Dft(p) => write!(
                f,
                "dft sz={} vecsz={} {}",
                p.core_shape, p.vector_shape, p.ptrs
            ),
            Problem::Unsolvable => write!(f, "unsolvable"),
        }
    }
}
