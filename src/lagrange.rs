// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Vanishing and Lagrange polynomials over an evaluation domain.
//!
//! The pseudo-vanishing polynomial with `cut` roots removed is
//! `Z*(X) = (X^n - 1) / ∏_{j=1}^{cut} (X - ω^{-j})`, i.e. the product of `X - ω^i` over the
//! kept roots `ω^0, ..., ω^{n-cut-1}`.
//!
//! Lagrange basis polynomials are numbered by the domain point they select, except that `l_1`
//! names the one selecting the first point `ω^0`; `l_i` selects `ω^i` for `i > 0`.
//!
//! For the Lagrange basis over a `k·n` coset, only `l_1` is ever transformed: `l_i(X)` equals
//! `l_1(ω^{-i}·X)`, and multiplying a coset point `g·ψ^t` by `ω^{-i}` moves it `k·i`
//! positions back, so the vector of `l_i` is the vector of `l_1` rotated right by `k·i`.
use crate::{
  domain::EvaluationDomain,
  errors::PolyError,
  fft::{coset_fft, fft, scale_by_powers},
  field::batch_invert,
  math::Math,
  parallel::parallelize,
  polys::chunked::ChunkedPolynomial,
  start_span,
};
use ff::PrimeField;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Number of roots removed from the vanishing polynomial unless the caller says otherwise.
pub const DEFAULT_NUM_ROOTS_CUT: usize = 4;

/// `Z*(z)`, `l_start(z)` and `l_end(z)` at a single point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LagrangeEvaluations<F> {
  /// The pseudo-vanishing polynomial `Z*(z)`.
  pub vanishing_poly: F,
  /// The basis polynomial of index `0`.
  pub l_start: F,
  /// The basis polynomial of index `n - cut - 1`.
  pub l_end: F,
}

fn bool_to_field<F: PrimeField>(b: bool) -> F {
  if b { F::ONE } else { F::ZERO }
}

/// Evaluates `Z*`, `l_start` and `l_end` at `z`, sharing one batch inversion between the three
/// denominators.
///
/// For `z` in the domain the exact values are returned: the basis polynomials are `0` or `1`,
/// and `Z*(z)` is `0` at a kept root and `∏_{kept i} (z - ω^i)` at a removed one.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` only if an inversion unexpectedly fails.
pub fn get_lagrange_evaluations<F: PrimeField>(
  z: F,
  domain: &EvaluationDomain<F>,
  num_roots_cut: usize,
) -> Result<LagrangeEvaluations<F>, PolyError> {
  let n = domain.size();
  assert!(
    num_roots_cut < n,
    "cannot cut {num_roots_cut} roots from a domain of size {n}"
  );
  let numerator = z.pow_vartime([n as u64]) - F::ONE;

  if numerator.is_zero_vartime() {
    return Ok(lagrange_evaluations_in_domain(z, domain, num_roots_cut));
  }

  let root_inverse = domain.root_inverse();
  let mut vanishing_denominator = F::ONE;
  let mut removed = F::ONE;
  for _ in 0..num_roots_cut {
    removed *= root_inverse;
    vanishing_denominator *= z - removed;
  }

  // l_end = (z^n - 1) / (n·(z·ω^{cut + 1} - 1))
  let end_shift = domain.root().pow_vartime([(num_roots_cut + 1) as u64]);
  let mut denominators = [
    vanishing_denominator,
    domain.size_as_field() * (z - F::ONE),
    domain.size_as_field() * (z * end_shift - F::ONE),
  ];
  batch_invert(&mut denominators)?;

  Ok(LagrangeEvaluations {
    vanishing_poly: numerator * denominators[0],
    l_start: numerator * denominators[1],
    l_end: numerator * denominators[2],
  })
}

fn lagrange_evaluations_in_domain<F: PrimeField>(
  z: F,
  domain: &EvaluationDomain<F>,
  num_roots_cut: usize,
) -> LagrangeEvaluations<F> {
  let n = domain.size();
  let end_index = n - num_roots_cut - 1;

  let mut index = 0;
  let mut point = F::ONE;
  while point != z {
    point *= domain.root();
    index += 1;
  }

  let vanishing_poly = if index > end_index {
    // a removed root: Z*(z) = ∏_{i <= end_index} (z - ω^i)
    let mut acc = F::ONE;
    let mut kept = F::ONE;
    for _ in 0..=end_index {
      acc *= z - kept;
      kept *= domain.root();
    }
    acc
  } else {
    F::ZERO
  };

  LagrangeEvaluations {
    vanishing_poly,
    l_start: bool_to_field(index == 0),
    l_end: bool_to_field(index == end_index),
  }
}

/// The `2^log2_subgroup_size` values `(g·ψ^t)^n`, with `n` the size of `src_domain` and `ψ` a
/// primitive root of order `n·2^log2_subgroup_size`. These are the only values `X^n` takes on
/// the coset of the extended domain; entry `t` is the one at positions `t mod k`.
pub fn compute_multiplicative_subgroup<F: PrimeField>(
  log2_subgroup_size: usize,
  src_domain: &EvaluationDomain<F>,
) -> Vec<F> {
  assert!(
    log2_subgroup_size <= F::S as usize,
    "no subgroup of order 2^{log2_subgroup_size}"
  );
  let mut subgroup_root = F::ROOT_OF_UNITY;
  for _ in log2_subgroup_size..F::S as usize {
    subgroup_root = subgroup_root.square();
  }

  let mut cofactor = src_domain.generator();
  for _ in 0..src_domain.log2_size() {
    cofactor = cofactor.square();
  }

  let mut acc = cofactor;
  (0..1usize << log2_subgroup_size)
    .map(|_| {
      let value = acc;
      acc *= subgroup_root;
      value
    })
    .collect()
}

fn extension_of<F: PrimeField>(
  src_domain: &EvaluationDomain<F>,
  target_domain: &EvaluationDomain<F>,
) -> usize {
  assert!(
    target_domain.size() >= src_domain.size(),
    "target domain is smaller than the source domain"
  );
  debug_assert_eq!(src_domain.generator(), target_domain.generator());
  target_domain.size() / src_domain.size()
}

/// Fills `l_1` with the evaluations of `l_1(X) = (X^n - 1) / (n·(X - 1))` on the coset of
/// `target_domain`, where `n` is the size of `src_domain`.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if the coset contains `1`.
#[tracing::instrument(
  skip_all,
  name = "compute_lagrange_polynomial_fft",
  fields(n = src_domain.size(), large_n = target_domain.size())
)]
pub fn compute_lagrange_polynomial_fft<F: PrimeField>(
  l_1: &mut [F],
  src_domain: &EvaluationDomain<F>,
  target_domain: &EvaluationDomain<F>,
) -> Result<(), PolyError> {
  let k = extension_of(src_domain, target_domain);
  assert_eq!(
    l_1.len(),
    target_domain.size(),
    "output must have the target domain size"
  );
  let executor = target_domain.executor();

  // X_t - 1 with X_t = g·ψ^t
  l_1.fill(F::ONE);
  scale_by_powers(
    executor,
    l_1,
    target_domain.generator(),
    target_domain.root(),
  );
  parallelize(executor, l_1, |chunk, _| {
    for x in chunk.iter_mut() {
      *x -= F::ONE;
    }
  });
  batch_invert(l_1)?;

  let numerators: Vec<F> = compute_multiplicative_subgroup(k.log_2(), src_domain)
    .into_iter()
    .map(|x_pow_n| (x_pow_n - F::ONE) * src_domain.size_inverse())
    .collect();
  parallelize(executor, l_1, |chunk, start| {
    for (offset, x) in chunk.iter_mut().enumerate() {
      *x *= numerators[(start + offset) % k];
    }
  });
  Ok(())
}

/// Writes the coset evaluations of `l_index` into `dest`, given those of `l_1` as computed by
/// [`compute_lagrange_polynomial_fft`] over a domain `domain_extension` times larger.
pub fn rotate_lagrange_polynomial_fft<F: PrimeField>(
  l_1: &[F],
  dest: &mut [F],
  index: usize,
  domain_extension: usize,
) {
  assert_eq!(l_1.len(), dest.len());
  let shift = (domain_extension * index) % l_1.len();
  dest.copy_from_slice(l_1);
  dest.rotate_right(shift);
}

/// Divides coset evaluations on `target_domain` by the pseudo-vanishing polynomial of
/// `src_domain`, multiplying each value by `∏_{j=1}^{cut} (X - ω^{-j}) / (X^n - 1)`.
///
/// The dividend must be divisible by `Z*`; otherwise the result is not a polynomial quotient
/// and nothing reports it.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if `X^n - 1` vanishes somewhere on the coset.
pub fn divide_by_pseudo_vanishing_polynomial<F: PrimeField>(
  poly: &mut ChunkedPolynomial<F>,
  src_domain: &EvaluationDomain<F>,
  target_domain: &EvaluationDomain<F>,
  num_roots_cut: usize,
) -> Result<(), PolyError> {
  let n = src_domain.size();
  let k = extension_of(src_domain, target_domain);
  assert_eq!(
    poly.len(),
    target_domain.size(),
    "dividend must span the target domain"
  );
  assert!(
    num_roots_cut < n,
    "cannot cut {num_roots_cut} roots from a domain of size {n}"
  );

  let (_inv_span, inv_t) = start_span!("invert_vanishing_polynomial", k);
  let mut vanishing_inverses: Vec<F> = compute_multiplicative_subgroup(k.log_2(), src_domain)
    .into_iter()
    .map(|x_pow_n| x_pow_n - F::ONE)
    .collect();
  batch_invert(&mut vanishing_inverses)?;
  info!(elapsed_ms = %inv_t.elapsed().as_millis(), "invert_vanishing_polynomial");

  let removed_roots: Vec<F> = (1..=num_roots_cut)
    .map(|j| src_domain.root_inverse().pow_vartime([j as u64]))
    .collect();

  let (_div_span, div_t) = start_span!("divide_by_pseudo_vanishing_polynomial", size = poly.len());
  let generator = target_domain.generator();
  let root = target_domain.root();
  parallelize(target_domain.executor(), poly.as_mut_slice(), |chunk, start| {
    let mut x = generator * root.pow_vartime([start as u64]);
    for (offset, value) in chunk.iter_mut().enumerate() {
      let numerator = removed_roots.iter().fold(F::ONE, |acc, r| acc * (x - r));
      *value *= numerator * vanishing_inverses[(start + offset) % k];
      x *= root;
    }
  });
  info!(elapsed_ms = %div_t.elapsed().as_millis(), "divide_by_pseudo_vanishing_polynomial");
  Ok(())
}

/// Writes the `n + 1` coefficients of `∏_{i<n} (X - roots[i])` into `dest`, one linear factor at
/// a time.
pub fn compute_linear_polynomial_product<F: PrimeField>(roots: &[F], dest: &mut [F], n: usize) {
  assert!(roots.len() >= n, "{n} roots requested, {} given", roots.len());
  assert!(
    dest.len() > n,
    "the product of {n} linear factors has {} coefficients",
    n + 1
  );
  dest[..=n].fill(F::ZERO);
  dest[0] = F::ONE;
  for (i, root) in roots[..n].iter().enumerate() {
    for j in (1..=i + 1).rev() {
      dest[j] = dest[j - 1] - *root * dest[j];
    }
    dest[0] = -(*root * dest[0]);
  }
}

/// `∏_{i<n} (z - roots[i])`.
pub fn compute_linear_polynomial_product_evaluation<F: PrimeField>(
  roots: &[F],
  z: F,
  n: usize,
) -> F {
  roots[..n].iter().fold(F::ONE, |acc, r| acc * (z - r))
}

/// Writes the evaluations of `∏_{i<n} (X - roots[i])` over the domain, or over its coset when
/// `is_coset`, into `dest`.
///
/// Products of degree below the domain size are built in coefficient form and transformed; larger
/// ones are evaluated point by point.
pub fn fft_linear_polynomial_product<F: PrimeField>(
  roots: &[F],
  dest: &mut [F],
  n: usize,
  domain: &EvaluationDomain<F>,
  is_coset: bool,
) {
  assert_eq!(dest.len(), domain.size());
  if n >= domain.size() {
    let root = domain.root();
    let shift = if is_coset { domain.generator() } else { F::ONE };
    parallelize(domain.executor(), dest, |chunk, start| {
      let mut x = shift * root.pow_vartime([start as u64]);
      for value in chunk.iter_mut() {
        *value = compute_linear_polynomial_product_evaluation(roots, x, n);
        x *= root;
      }
    });
    return;
  }
  compute_linear_polynomial_product(roots, dest, n);
  dest[n + 1..].fill(F::ZERO);
  if is_coset {
    coset_fft(dest, domain);
  } else {
    fft(dest, domain);
  }
}
