//! Iteration shapes with independent input and output strides.
//!
//! A [`Tensor`] describes a loop nest: each [`IoDim`] is one loop with a trip
//! count and the element strides it applies to the input and the output
//! buffer. Dimensions are stored outermost first.
//!
//! Tensors are values. Operations that drop or duplicate dimensions return a
//! new tensor and leave the receiver untouched.
//!
//! # Examples
//!
//! ```
//! use tenfft_core::{IoDim, Tensor};
//!
//! // 3 repetitions, input stride 10, output stride 20
//! let vecsz = Tensor::new([IoDim::new(3, 10, 20)]);
//! assert_eq!(vecsz.finite_rank(), Some(1));
//!
//! let residual = vecsz.copy_except(0).unwrap();
//! assert_eq!(residual.finite_rank(), Some(0));
//! assert_eq!(vecsz.finite_rank(), Some(1));
//! ```

use crate::error::{TensorError, TensorResult};
use smallvec::SmallVec;
use std::fmt;

/// Number of dimensions stored inline before spilling to the heap.
pub const INLINE_RANK: usize = 4;

/// Dimension storage.
pub type Dims = SmallVec<[IoDim; INLINE_RANK]>;

/// One loop of an iteration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IoDim {
    /// Trip count (0 means the loop is empty)
    pub n: usize,
    /// Input stride in elements
    pub is: isize,
    /// Output stride in elements
    pub os: isize,
}

impl IoDim {
    /// Create a dimension
    pub const fn new(n: usize, is: isize, os: isize) -> Self {
        Self { n, is, os }
    }

    /// Whether both buffers advance by the same amount per iteration
    pub fn has_equal_strides(&self) -> bool {
        self.is == self.os
    }

    /// Smaller of the two strides (signed)
    pub fn min_stride(&self) -> isize {
        self.is.min(self.os)
    }
}

impl fmt::Display for IoDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x({},{})", self.n, self.is, self.os)
    }
}

/// Rank of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// A finite loop nest of this depth
    Finite(usize),
    /// Not a simple loop nest; used by sentinel problems
    Infinite,
}

impl Rank {
    /// The finite depth, if any
    pub fn finite(self) -> Option<usize> {
        match self {
            Rank::Finite(r) => Some(r),
            Rank::Infinite => None,
        }
    }

    /// Whether the rank is finite
    pub fn is_finite(self) -> bool {
        matches!(self, Rank::Finite(_))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Finite(r) => write!(f, "{}", r),
            Rank::Infinite => write!(f, "-inf"),
        }
    }
}

/// An ordered loop nest of [`IoDim`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tensor {
    rank: Rank,
    dims: Dims,
}

impl Tensor {
    /// Create a finite tensor from dimensions, outermost first
    pub fn new(dims: impl IntoIterator<Item = IoDim>) -> Self {
        let dims: Dims = dims.into_iter().collect();
        Self {
            rank: Rank::Finite(dims.len()),
            dims,
        }
    }

    /// Create a finite tensor from `(n, is, os)` triples
    ///
    /// ```
    /// use tenfft_core::Tensor;
    ///
    /// let t = Tensor::from_triples(&[(5, 1, 1), (2, 100, 100)]);
    /// assert_eq!(t.dims()[1].is, 100);
    /// ```
    pub fn from_triples(triples: &[(usize, isize, isize)]) -> Self {
        Self::new(triples.iter().map(|&(n, is, os)| IoDim::new(n, is, os)))
    }

    /// The rank-0 tensor (a single point, no loops)
    pub fn rank0() -> Self {
        Self {
            rank: Rank::Finite(0),
            dims: Dims::new(),
        }
    }

    /// The non-finite sentinel tensor
    pub fn non_finite() -> Self {
        Self {
            rank: Rank::Infinite,
            dims: Dims::new(),
        }
    }

    /// Rank of this tensor
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Rank if finite
    pub fn finite_rank(&self) -> Option<usize> {
        self.rank.finite()
    }

    /// Whether the tensor is a finite loop nest
    pub fn is_finite(&self) -> bool {
        self.rank.is_finite()
    }

    /// Dimensions, outermost first (empty for non-finite tensors)
    pub fn dims(&self) -> &[IoDim] {
        &self.dims
    }

    /// Dimension at `index`
    pub fn dim(&self, index: usize) -> Option<&IoDim> {
        self.dims.get(index)
    }

    /// Copy of this tensor with dimension `index` removed.
    ///
    /// Every other dimension keeps its relative order.
    pub fn copy_except(&self, index: usize) -> TensorResult<Tensor> {
        let rank = self
            .finite_rank()
            .ok_or_else(|| TensorError::non_finite("copy_except"))?;
        if index >= rank {
            return Err(TensorError::index_out_of_range("copy_except", index, rank));
        }

        Ok(Tensor::new(
            self.dims
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, d)| *d),
        ))
    }

    /// Largest stride magnitude over all dimensions and both buffers.
    ///
    /// Zero for tensors without dimensions.
    pub fn max_stride_magnitude(&self) -> isize {
        self.dims
            .iter()
            .map(|d| d.is.unsigned_abs().max(d.os.unsigned_abs()))
            .max()
            .map_or(0, |m| isize::try_from(m).unwrap_or(isize::MAX))
    }

    /// Whether every dimension advances input and output equally
    pub fn has_inplace_strides(&self) -> bool {
        self.dims.iter().all(IoDim::has_equal_strides)
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_finite() {
            return write!(f, "[-inf]");
        }
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

/// Misalignment in bytes of the element at `position`.
///
/// Buffers are assumed to start on an `alignment_bytes` boundary. Returns 0
/// when the position is aligned, or when `alignment_bytes <= 1`.
///
/// ```
/// use tenfft_core::alignment_of;
///
/// assert_eq!(alignment_of(2, 8, 16), 0);
/// assert_eq!(alignment_of(3, 8, 16), 8);
/// assert_eq!(alignment_of(-1, 8, 16), 8);
/// ```
pub fn alignment_of(position: isize, element_bytes: usize, alignment_bytes: usize) -> usize {
    if alignment_bytes <= 1 {
        return 0;
    }
    let bytes = position as i128 * element_bytes as i128;
    bytes.rem_euclid(alignment_bytes as i128) as usize
}
