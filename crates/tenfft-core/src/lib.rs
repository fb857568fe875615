//! # tenfft-core
//!
//! Iteration-shape and problem model for TenFFT transform planning.
//!
//! This crate holds the value types every planner component agrees on:
//!
//! - **Dimensions** ([`IoDim`]): a loop count with separate input and output strides
//! - **Tensors** ([`Tensor`]): ordered loop nests, possibly of non-finite [`Rank`]
//! - **Buffer positions** ([`IoPtrs`]): real/imaginary input and output locations
//! - **Problems** ([`Problem`], [`DftProblem`]): a core shape repeated over a vector shape
//!
//! ## Quick Start
//!
//! ```
//! use tenfft_core::{IoPtrs, Problem, Tensor};
//!
//! // A length-4 transform, repeated 3 times
//! let problem = Problem::dft(
//!     Tensor::from_triples(&[(4, 1, 1)]),
//!     Tensor::from_triples(&[(3, 10, 20)]),
//!     IoPtrs::new(0, 64, 128, 192),
//! );
//!
//! let dft = problem.as_dft().unwrap();
//! assert_eq!(dft.vector_shape.finite_rank(), Some(1));
//! assert!(dft.is_out_of_place());
//! ```
//!
//! All types here are immutable values; the planner derives residual
//! problems by building new tensors, never by editing shared ones.

#![deny(warnings)]

pub mod error;
pub mod problem;
pub mod tensor;


pub use error::{TensorError, TensorResult};
pub use problem::{DftProblem, IoPtrs, Problem};
pub use tensor::{alignment_of, Dims, IoDim, Rank, Tensor, INLINE_RANK};

/// Scalar type of transform buffers.
pub type Real = f64;
