// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Slice-level polynomial algebra.
//!
//! These helpers work on caller-owned buffers and do not know whether a buffer holds
//! coefficients or evaluations; [`crate::polys::univariate::Polynomial`] tracks that at the type
//! level.
use crate::{
  domain::EvaluationDomain,
  parallel::{Executor, RayonExecutor, chunk_size, map_tasks, parallelize},
  polys::chunked::ChunkedPolynomial,
};
use ff::{Field, PrimeField};

fn horner<F: Field>(coeffs: &[F], z: F) -> F {
  coeffs.iter().rev().fold(F::ZERO, |acc, c| acc * z + c)
}

/// Evaluates the first `n` coefficients of `coeffs` at `z` on the global rayon pool.
pub fn evaluate<F: Field>(coeffs: &[F], z: F, n: usize) -> F {
  evaluate_with(&RayonExecutor::new(), coeffs, z, n)
}

/// Evaluates the first `n` coefficients of `coeffs` at `z`.
///
/// The coefficients are split into one contiguous range per thread; range `t` starting at
/// `offset` contributes `z^offset · Σ_i coeffs[offset + i] · z^i`.
pub fn evaluate_with<F: Field, E: Executor + ?Sized>(
  executor: &E,
  coeffs: &[F],
  z: F,
  n: usize,
) -> F {
  assert!(
    n <= coeffs.len(),
    "cannot evaluate {n} coefficients of a {}-entry buffer",
    coeffs.len()
  );
  let coeffs = &coeffs[..n];
  if n == 0 {
    return F::ZERO;
  }
  let size = chunk_size(n, executor.num_threads());
  let num_ranges = n.div_ceil(size);
  map_tasks(executor, num_ranges, |t| {
    let start = t * size;
    let end = (start + size).min(n);
    horner(&coeffs[start..end], z) * z.pow_vartime([start as u64])
  })
  .into_iter()
  .sum()
}

/// Evaluates the first `large_n` coefficients of a chunked polynomial at `z`; segment `idx`
/// is weighted by `z^{segment_size · idx}`.
pub fn evaluate_chunked<F: Field>(poly: &ChunkedPolynomial<F>, z: F, large_n: usize) -> F {
  assert!(
    large_n <= poly.len(),
    "cannot evaluate {large_n} coefficients of a {}-entry polynomial",
    poly.len()
  );
  let segment_size = poly.segment_size();
  let z_segment = z.pow_vartime([segment_size as u64]);

  let mut result = F::ZERO;
  let mut weight = F::ONE;
  for (idx, segment) in poly.segments().enumerate() {
    let start = idx * segment_size;
    if start >= large_n {
      break;
    }
    let len = segment_size.min(large_n - start);
    result += evaluate(segment, z, len) * weight;
    weight *= z_segment;
  }
  result
}

/// Copies `num_src` entries of `src` into `dest` and zero-fills `dest` up to `num_target`.
///
/// Copying into a shorter target is a caller error and panics.
pub fn copy_polynomial<F: Field>(src: &[F], dest: &mut [F], num_src: usize, num_target: usize) {
  assert!(
    num_target >= num_src,
    "copy would truncate {num_src} entries to {num_target}"
  );
  assert!(num_src <= src.len() && num_target <= dest.len());
  dest[..num_src].copy_from_slice(&src[..num_src]);
  dest[num_src..num_target].fill(F::ZERO);
}

fn pointwise<F: PrimeField>(
  a: &[F],
  b: &[F],
  dest: &mut [F],
  domain: &EvaluationDomain<F>,
  op: impl Fn(F, F) -> F + Sync,
) {
  let n = domain.size();
  assert!(
    a.len() >= n && b.len() >= n && dest.len() >= n,
    "operands must cover the {n} positions of the domain"
  );
  parallelize(domain.executor(), &mut dest[..n], |chunk, start| {
    for (i, d) in chunk.iter_mut().enumerate() {
      *d = op(a[start + i], b[start + i]);
    }
  });
}

/// `dest[i] = a[i] + b[i]` for the `n` positions of the domain. Valid in either representation.
pub fn add<F: PrimeField>(a: &[F], b: &[F], dest: &mut [F], domain: &EvaluationDomain<F>) {
  pointwise(a, b, dest, domain, |x, y| x + y);
}

/// `dest[i] = a[i] - b[i]` for the `n` positions of the domain. Valid in either representation.
pub fn sub<F: PrimeField>(a: &[F], b: &[F], dest: &mut [F], domain: &EvaluationDomain<F>) {
  pointwise(a, b, dest, domain, |x, y| x - y);
}

/// `dest[i] = a[i] · b[i]` for the `n` positions of the domain.
///
/// Only meaningful for evaluations over a domain with `n > deg(a) + deg(b)`; nothing here checks
/// that.
pub fn mul<F: PrimeField>(a: &[F], b: &[F], dest: &mut [F], domain: &EvaluationDomain<F>) {
  pointwise(a, b, dest, domain, |x, y| x * y);
}

/// Sum of the first `n` entries.
pub fn compute_sum<F: Field>(src: &[F], n: usize) -> F {
  src[..n].iter().sum()
}

/// Keeps every `2^compress_factor`-th of the first `current_size` samples.
///
/// Applied to evaluations over a domain of size `current_size`, the result holds the
/// evaluations over the subgroup of size `current_size >> compress_factor`.
pub fn compress_fft<F: Field>(
  src: &[F],
  dest: &mut [F],
  current_size: usize,
  compress_factor: usize,
) {
  assert!(
    current_size.is_power_of_two() && compress_factor <= current_size.trailing_zeros() as usize,
    "cannot compress {current_size} samples by a factor of 2^{compress_factor}"
  );
  let stride = 1usize << compress_factor;
  let new_size = current_size >> compress_factor;
  assert!(current_size <= src.len() && new_size <= dest.len());
  for (i, d) in dest[..new_size].iter_mut().enumerate() {
    *d = src[i * stride];
  }
}
