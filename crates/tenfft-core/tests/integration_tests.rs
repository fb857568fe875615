//! Integration tests for tenfft-core
//!
//! These tests exercise the problem model the way planners use it:
//! deriving residual problems one vector dimension at a time.

use std::collections::HashSet;
use tenfft_core::{alignment_of, IoDim, IoPtrs, Problem, Tensor, TensorError};

#[test]
fn test_peeling_every_vector_dimension() {
    let vecsz = Tensor::from_triples(&[(2, 24, 24), (3, 8, 8), (4, 2, 2)]);
    let mut current = vecsz.clone();
    let mut peeled = Vec::new();

    while current.finite_rank() != Some(0) {
        peeled.push(*current.dim(0).unwrap());
        current = current.copy_except(0).unwrap();
    }

    assert_eq!(peeled, vecsz.dims().to_vec());
    assert_eq!(current, Tensor::rank0());
}

#[test]
fn test_residual_problem_keeps_core_and_buffers() {
    let core = Tensor::from_triples(&[(8, 1, 1), (8, 50, 50)]);
    let ptrs = IoPtrs::new(0, 1, 2000, 2001);
    let problem = Problem::dft(
        core.clone(),
        Tensor::from_triples(&[(5, 1, 1), (2, 100, 100)]),
        ptrs,
    );

    let dft = problem.as_dft().unwrap();
    let residual = Problem::dft(
        dft.core_shape.clone(),
        dft.vector_shape.copy_except(1).unwrap(),
        dft.ptrs,
    );

    assert_eq!(
        residual.to_string(),
        "dft sz=[8x(1,1) 8x(50,50)] vecsz=[5x(1,1)] ri=0 ii=1 ro=2000 io=2001"
    );
    assert_eq!(core.max_stride_magnitude(), 50);
    assert_ne!(residual, problem);
}

#[test]
fn test_problems_usable_as_map_keys() {
    let a = Problem::dft(
        Tensor::rank0(),
        Tensor::new([IoDim::new(3, 2, 2)]),
        IoPtrs::interleaved(0, 6),
    );
    let b = a.clone();
    let c = Problem::dft(Tensor::rank0(), Tensor::rank0(), IoPtrs::interleaved(0, 6));

    let set: HashSet<Problem> = [a, b, c, Problem::Unsolvable].into_iter().collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn test_loop_offsets_and_alignment() {
    let ptrs = IoPtrs::new(0, 1, 16, 17);
    let d = IoDim::new(3, 4, 2);

    let last = ptrs.offset(d.is * 2, d.os * 2).unwrap();
    assert_eq!(last, IoPtrs::new(8, 9, 20, 21));
    assert_eq!(alignment_of(last.ri as isize, 8, 16), 0);
    assert_eq!(alignment_of(last.ii as isize, 8, 16), 8);
}

#[test]
fn test_errors_name_operation() {
    let err = Tensor::rank0().copy_except(0).unwrap_err();
    assert!(matches!(err, TensorError::IndexOutOfRange { index: 0, rank: 0, .. }));
    assert!(err.to_string().contains("copy_except"));
}
