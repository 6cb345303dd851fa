// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Main components:
//! - `Polynomial`: a domain-sized buffer tagged with the basis its entries are expressed in,
//! - `Coeff`, `Lagrange`, `CosetLagrange`: the basis markers.
//!
//! Conversions between bases go through the transform engine, and operations that only make
//! sense in one representation (evaluation at a point, pointwise products) only exist for it.
use crate::{
  domain::EvaluationDomain,
  errors::PolyError,
  fft,
  polys::dense,
};
use core::{
  fmt::Debug,
  marker::PhantomData,
  ops::{Add, Sub},
};
use ff::PrimeField;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

/// The representation a [`Polynomial`]'s entries are in.
pub trait Basis: Copy + Debug + Send + Sync + 'static {}

/// An evaluation representation, which can be interpolated back to coefficients.
pub trait EvaluationBasis: Basis {
  /// Interpolates `values` in place.
  fn interpolate<F: PrimeField>(values: &mut [F], domain: &EvaluationDomain<F>);
}

/// Entry `i` is the coefficient of `X^i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coeff;
impl Basis for Coeff {}

/// Entry `i` is the evaluation at `ω^i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lagrange;
impl Basis for Lagrange {}
impl EvaluationBasis for Lagrange {
  fn interpolate<F: PrimeField>(values: &mut [F], domain: &EvaluationDomain<F>) {
    fft::ifft(values, domain);
  }
}

/// Entry `i` is the evaluation at `g·ω^i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosetLagrange;
impl Basis for CosetLagrange {}
impl EvaluationBasis for CosetLagrange {
  fn interpolate<F: PrimeField>(values: &mut [F], domain: &EvaluationDomain<F>) {
    fft::coset_ifft(values, domain);
  }
}

/// A polynomial of domain size whose entries are expressed in the basis `B`.
///
/// Deserialization rejects lengths that no evaluation domain over `F` can have.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
  bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"),
  try_from = "RawPolynomial<F>"
)]
pub struct Polynomial<F: PrimeField, B: Basis> {
  values: Vec<F>,
  #[serde(skip)]
  _marker: PhantomData<B>,
}

#[derive(Deserialize)]
struct RawPolynomial<F> {
  values: Vec<F>,
}

impl<F: PrimeField, B: Basis> TryFrom<RawPolynomial<F>> for Polynomial<F, B> {
  type Error = PolyError;

  fn try_from(raw: RawPolynomial<F>) -> Result<Self, Self::Error> {
    let size = raw.values.len();
    if !size.is_power_of_two() || size.trailing_zeros() > F::S {
      return Err(PolyError::InvalidDomainSize {
        size,
        max_log2_size: F::S,
      });
    }
    Ok(Self::wrap(raw.values))
  }
}

impl<F: PrimeField, B: Basis> Polynomial<F, B> {
  /// Wraps `values`, which must have exactly the domain's size.
  ///
  /// # Errors
  /// Returns `PolyError::InvalidInputLength` if the length does not match.
  pub fn from_vec(values: Vec<F>, domain: &EvaluationDomain<F>) -> Result<Self, PolyError> {
    if values.len() != domain.size() {
      return Err(PolyError::InvalidInputLength {
        expected: domain.size(),
        actual: values.len(),
      });
    }
    Ok(Self::wrap(values))
  }

  /// The zero polynomial over `domain`.
  pub fn zero(domain: &EvaluationDomain<F>) -> Self {
    Self::wrap(vec![F::ZERO; domain.size()])
  }

  /// A polynomial with uniformly random entries.
  pub fn random(domain: &EvaluationDomain<F>, mut rng: impl RngCore) -> Self {
    Self::wrap((0..domain.size()).map(|_| F::random(&mut rng)).collect())
  }

  fn wrap(values: Vec<F>) -> Self {
    Self {
      values,
      _marker: PhantomData,
    }
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.values.len()
  }

  /// Returns true if there are no entries.
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The entries.
  pub fn values(&self) -> &[F] {
    &self.values
  }

  /// The entries, mutably.
  pub fn values_mut(&mut self) -> &mut [F] {
    &mut self.values
  }

  /// Returns the entries.
  pub fn into_vec(self) -> Vec<F> {
    self.values
  }
}

impl<F: PrimeField> Polynomial<F, Coeff> {
  /// Evaluations over the domain.
  pub fn to_evaluations(&self, domain: &EvaluationDomain<F>) -> Polynomial<F, Lagrange> {
    let mut values = self.values.clone();
    fft::fft(&mut values, domain);
    Polynomial::wrap(values)
  }

  /// Evaluations over the domain's coset.
  pub fn to_coset_evaluations(&self, domain: &EvaluationDomain<F>) -> Polynomial<F, CosetLagrange> {
    let mut values = self.values.clone();
    fft::coset_fft(&mut values, domain);
    Polynomial::wrap(values)
  }

  /// Evaluates the polynomial at `z`.
  pub fn evaluate(&self, z: F) -> F {
    dense::evaluate(&self.values, z, self.values.len())
  }

  /// Index of the highest non-zero coefficient, zero for the zero polynomial.
  pub fn degree(&self) -> usize {
    self
      .values
      .iter()
      .rposition(|c| !c.is_zero_vartime())
      .unwrap_or(0)
  }
}

impl<F: PrimeField, B: EvaluationBasis> Polynomial<F, B> {
  /// Interpolates back to coefficient form.
  pub fn to_coefficients(&self, domain: &EvaluationDomain<F>) -> Polynomial<F, Coeff> {
    let mut values = self.values.clone();
    B::interpolate(&mut values, domain);
    Polynomial::wrap(values)
  }

  /// Pointwise product. The result represents `a(X)·b(X)` only while
  /// `deg(a) + deg(b) < n`, which is checked in debug builds.
  pub fn mul(&self, other: &Self, domain: &EvaluationDomain<F>) -> Self {
    debug_assert!(
      self.to_coefficients(domain).degree() + other.to_coefficients(domain).degree()
        < domain.size(),
      "product degree exceeds the domain size"
    );
    let mut values = vec![F::ZERO; domain.size()];
    dense::mul(&self.values, &other.values, &mut values, domain);
    Self::wrap(values)
  }
}

impl<F: PrimeField, B: Basis> Add for &Polynomial<F, B> {
  type Output = Polynomial<F, B>;

  fn add(self, rhs: Self) -> Self::Output {
    assert_eq!(self.len(), rhs.len());
    Polynomial::wrap(
      self
        .values
        .iter()
        .zip(rhs.values.iter())
        .map(|(a, b)| *a + b)
        .collect(),
    )
  }
}

impl<F: PrimeField, B: Basis> Sub for &Polynomial<F, B> {
  type Output = Polynomial<F, B>;

  fn sub(self, rhs: Self) -> Self::Output {
    assert_eq!(self.len(), rhs.len());
    Polynomial::wrap(
      self
        .values
        .iter()
        .zip(rhs.values.iter())
        .map(|(a, b)| *a - b)
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::provider::{bn254::Scalar as Fr, pasta::pallas};
  use ff::Field;

  fn test_basis_conversions_with<F: PrimeField>() {
    let domain = EvaluationDomain::<F>::new(8).unwrap();
    // polynomial is 2x^2 + 3x + 1
    let mut coeffs = vec![F::ZERO; 8];
    coeffs[0] = F::ONE;
    coeffs[1] = F::from(3);
    coeffs[2] = F::from(2);
    let poly = Polynomial::<F, Coeff>::from_vec(coeffs, &domain).unwrap();
    assert_eq!(poly.degree(), 2);
    assert_eq!(poly.evaluate(F::from(3)), F::from(28));

    let evals = poly.to_evaluations(&domain);
    assert_eq!(evals.values()[0], F::from(6));
    assert_eq!(evals.to_coefficients(&domain), poly);

    let coset = poly.to_coset_evaluations(&domain);
    assert_eq!(coset.values()[0], poly.evaluate(domain.generator()));
    assert_eq!(coset.to_coefficients(&domain), poly);
  }

  #[test]
  fn test_basis_conversions() {
    test_basis_conversions_with::<Fr>();
    test_basis_conversions_with::<pallas::Scalar>();
  }

  #[test]
  fn test_mul_in_evaluation_form() {
    let domain = EvaluationDomain::<Fr>::new(8).unwrap();
    // (x + 1)(x - 1) = x^2 - 1
    let mut a = vec![Fr::ZERO; 8];
    a[0] = Fr::ONE;
    a[1] = Fr::ONE;
    let mut b = vec![Fr::ZERO; 8];
    b[0] = -Fr::ONE;
    b[1] = Fr::ONE;
    let a = Polynomial::<Fr, Coeff>::from_vec(a, &domain).unwrap();
    let b = Polynomial::<Fr, Coeff>::from_vec(b, &domain).unwrap();

    let product = a
      .to_coset_evaluations(&domain)
      .mul(&b.to_coset_evaluations(&domain), &domain)
      .to_coefficients(&domain);
    let mut expected = vec![Fr::ZERO; 8];
    expected[0] = -Fr::ONE;
    expected[2] = Fr::ONE;
    assert_eq!(product.into_vec(), expected);

    let sum = &a + &b;
    assert_eq!(sum.values()[1], Fr::from(2u64));
    assert_eq!(&sum - &b, a);
  }

  #[test]
  fn test_length_is_checked() {
    let domain = EvaluationDomain::<Fr>::new(8).unwrap();
    assert_eq!(
      Polynomial::<Fr, Lagrange>::from_vec(vec![Fr::ONE; 4], &domain),
      Err(PolyError::InvalidInputLength {
        expected: 8,
        actual: 4
      })
    );
    assert!(
      Polynomial::<Fr, Lagrange>::zero(&domain)
        .values()
        .iter()
        .all(|v| *v == Fr::ZERO)
    );
  }

  #[test]
  fn test_serde_checks_length() {
    let domain = EvaluationDomain::<Fr>::new(8).unwrap();
    let poly = Polynomial::<Fr, Lagrange>::from_vec(
      (1..=8u64).map(Fr::from).collect(),
      &domain,
    )
    .unwrap();
    let bytes = bincode::serialize(&poly).unwrap();
    let decoded: Polynomial<Fr, Lagrange> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, poly);

    // six entries cannot be the size of any domain
    let mut truncated = poly.into_vec();
    truncated.truncate(6);
    let bytes = bincode::serialize(&Polynomial::<Fr, Lagrange>::wrap(truncated)).unwrap();
    assert!(bincode::deserialize::<Polynomial<Fr, Lagrange>>(&bytes).is_err());
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "product degree exceeds the domain size")]
  fn test_mul_degree_check() {
    let domain = EvaluationDomain::<Fr>::new(4).unwrap();
    let mut x3 = vec![Fr::ZERO; 4];
    x3[3] = Fr::ONE;
    let x3 = Polynomial::<Fr, Coeff>::from_vec(x3, &domain)
      .unwrap()
      .to_evaluations(&domain);
    let _ = x3.mul(&x3, &domain);
  }
}
