// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Opening quotients, barycentric evaluation and interpolation.
use crate::{
  domain::EvaluationDomain,
  errors::PolyError,
  field::{batch_invert, invert},
  lagrange::compute_linear_polynomial_product,
  parallel::parallelize,
};
use ff::{Field, PrimeField};
use itertools::izip;

/// Divides `f(X) - f(z)` by `X - z`, writing the quotient's coefficients into `dest` and
/// returning `f(z)`.
///
/// `src` holds the `n` coefficients of `f`. The quotient has degree `n - 2`, so `dest[n - 1]`
/// is set to zero.
pub fn compute_kate_opening_coefficients<F: Field>(src: &[F], dest: &mut [F], z: F, n: usize) -> F {
  assert!(n > 0, "cannot open an empty polynomial");
  assert!(src.len() >= n && dest.len() >= n);

  // q_{i-1} = a_i + z·q_i, from the top coefficient down
  let mut acc = F::ZERO;
  for i in (1..n).rev() {
    acc = acc * z + src[i];
    dest[i - 1] = acc;
  }
  dest[n - 1] = F::ZERO;
  acc * z + src[0]
}

/// Evaluates at `z` the polynomial of degree `< n` whose values on the first `num_values`
/// domain points are `values` and which vanishes on the remaining ones:
/// `f(z) = (z^n - 1)/n · Σ_i values[i] / (z·ω^{-i} - 1)`.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if `z` is a point of the domain.
pub fn compute_barycentric_evaluation<F: PrimeField>(
  values: &[F],
  num_values: usize,
  z: F,
  domain: &EvaluationDomain<F>,
) -> Result<F, PolyError> {
  assert!(
    num_values <= domain.size() && num_values <= values.len(),
    "{num_values} values do not fit a domain of size {}",
    domain.size()
  );
  let numerator = (z.pow_vartime([domain.size() as u64]) - F::ONE) * domain.size_inverse();
  if numerator.is_zero_vartime() {
    return Err(PolyError::DivisionByZero);
  }

  let root_inverse = domain.root_inverse();
  let mut denominators = vec![F::ZERO; num_values];
  parallelize(domain.executor(), &mut denominators, |chunk, start| {
    let mut acc = z * root_inverse.pow_vartime([start as u64]);
    for d in chunk.iter_mut() {
      *d = acc - F::ONE;
      acc *= root_inverse;
    }
  });
  batch_invert(&mut denominators)?;

  let sum: F = values[..num_values]
    .iter()
    .zip(denominators.iter())
    .map(|(v, d)| *v * d)
    .sum();
  Ok(numerator * sum)
}

/// Evaluates at `z` a polynomial of degree `< small_domain.size()` given its evaluations on the
/// coset of `large_domain`.
///
/// Every `large / small`-th sample is a value on the coset `g·H_small`, so the polynomial
/// `f(g·Y)` is evaluated barycentrically at `Y = z·g^{-1}`.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if `z` lies on the coset `g·H_small`.
pub fn evaluate_from_fft<F: PrimeField>(
  poly_coset_fft: &[F],
  large_domain: &EvaluationDomain<F>,
  z: F,
  small_domain: &EvaluationDomain<F>,
) -> Result<F, PolyError> {
  assert!(large_domain.size() >= small_domain.size());
  assert_eq!(poly_coset_fft.len(), large_domain.size());
  let ratio = large_domain.size() / small_domain.size();

  let small_values: Vec<F> = poly_coset_fft
    .iter()
    .step_by(ratio)
    .copied()
    .collect();
  compute_barycentric_evaluation(
    &small_values,
    small_domain.size(),
    z * large_domain.generator_inverse(),
    small_domain,
  )
}

fn check_interpolation_shape<F>(values: &[F], dest: &[F], points: &[F], n: usize) {
  assert!(
    values.len() >= n && points.len() >= n && dest.len() >= n,
    "interpolating {n} points needs {n} values, points and output slots"
  );
}

/// Coefficients of `N(X) / (X - x)` for a root `x` of `N`, by synthetic division from the top.
fn divide_by_root<F: Field>(numerator: &[F], x: F, quotient: &mut [F]) {
  let n = numerator.len() - 1;
  let mut acc = F::ZERO;
  for k in (1..=n).rev() {
    acc = acc * x + numerator[k];
    quotient[k - 1] = acc;
  }
}

/// `∏_{j != i} (x_i - x_j)`
fn denominator<F: Field>(points: &[F], i: usize) -> F {
  points
    .iter()
    .enumerate()
    .filter(|(j, _)| *j != i)
    .fold(F::ONE, |acc, (_, x)| acc * (points[i] - x))
}

/// Writes into `dest` the `n` coefficients of the unique polynomial of degree `< n` taking
/// `values[i]` at `points[i]`.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if two points coincide.
pub fn compute_interpolation<F: PrimeField>(
  values: &[F],
  dest: &mut [F],
  points: &[F],
  n: usize,
) -> Result<(), PolyError> {
  check_interpolation_shape(values, dest, points, n);
  if n == 0 {
    return Ok(());
  }
  let mut numerator = vec![F::ZERO; n + 1];
  compute_linear_polynomial_product(points, &mut numerator, n);

  dest[..n].fill(F::ZERO);
  let mut quotient = vec![F::ZERO; n];
  for i in 0..n {
    divide_by_root(&numerator, points[i], &mut quotient);
    let weight = values[i] * invert(&denominator(&points[..n], i))?;
    for (d, q) in dest[..n].iter_mut().zip(quotient.iter()) {
      *d += weight * q;
    }
  }
  Ok(())
}

/// Same result as [`compute_interpolation`], with every denominator inverted by a single batch
/// inversion.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if two points coincide.
#[tracing::instrument(skip_all, name = "compute_efficient_interpolation", fields(n = n))]
pub fn compute_efficient_interpolation<F: PrimeField>(
  values: &[F],
  dest: &mut [F],
  points: &[F],
  n: usize,
) -> Result<(), PolyError> {
  check_interpolation_shape(values, dest, points, n);
  if n == 0 {
    return Ok(());
  }
  let mut numerator = vec![F::ZERO; n + 1];
  compute_linear_polynomial_product(points, &mut numerator, n);

  let mut denominators: Vec<F> = (0..n).map(|i| denominator(&points[..n], i)).collect();
  batch_invert(&mut denominators)?;

  dest[..n].fill(F::ZERO);
  let mut quotient = vec![F::ZERO; n];
  for (x, inverse, value) in izip!(points.iter(), denominators, values) {
    divide_by_root(&numerator, *x, &mut quotient);
    let weight = *value * inverse;
    for (d, q) in dest[..n].iter_mut().zip(quotient.iter()) {
      *d += weight * q;
    }
  }
  Ok(())
}
