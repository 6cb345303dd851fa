// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! The evaluation domain consumed by every transform.
//!
//! An [`EvaluationDomain`] of size `n = 2^k` describes the multiplicative subgroup
//! `H = {1, ω, ω^2, ..., ω^{n-1}}`, the coset generator `g` used for coset transforms, and the
//! root-of-unity tables that drive the radix-2 butterflies.
//!
//! Root table layout: layer `l` (for `l < k`) serves the butterfly stage of half-width
//! `m = 2^l` and stores the natural-order powers `ψ_l^0, ..., ψ_l^{m-1}` of the primitive
//! `2m`-th root `ψ_l = ω^{n / 2m}`. In particular the last layer holds `ω^0, ..., ω^{n/2 - 1}`.
//! The inverse table has the same layout for `ω^{-1}`.
//!
//! A domain is immutable once built. Domains of different sizes are always constructed
//! independently; no operation derives one domain from another.
use crate::{
  errors::PolyError,
  field::invert,
  math::Math,
  parallel::{Executor, Sequential},
};
use ff::PrimeField;
use std::sync::Arc;
use tracing::debug;

/// Precomputed constants for radix-2 transforms of a fixed size.
#[derive(Clone, Debug)]
pub struct EvaluationDomain<F: PrimeField> {
  size: usize,
  log2_size: usize,
  root: F,
  root_inverse: F,
  size_as_field: F,
  size_inverse: F,
  generator: F,
  generator_inverse: F,
  round_roots: Vec<Vec<F>>,
  inverse_round_roots: Vec<Vec<F>>,
  executor: Arc<dyn Executor>,
}

impl<F: PrimeField> EvaluationDomain<F> {
  /// Builds the domain of the given size with `F::MULTIPLICATIVE_GENERATOR` as coset
  /// generator and sequential execution.
  ///
  /// # Errors
  /// Returns `PolyError::InvalidDomainSize` if `size` is not a power of two or the field has no
  /// subgroup of that order.
  pub fn new(size: usize) -> Result<Self, PolyError> {
    if size == 0 || !size.is_power_of_two() || size.log_2() > F::S as usize {
      return Err(PolyError::InvalidDomainSize {
        size,
        max_log2_size: F::S,
      });
    }
    let log2_size = size.log_2();

    // ω = ROOT_OF_UNITY^{2^{S - k}}
    let mut root = F::ROOT_OF_UNITY;
    for _ in log2_size..F::S as usize {
      root = root.square();
    }
    let root_inverse = invert(&root)?;

    let size_as_field = F::from(size as u64);
    let size_inverse = invert(&size_as_field)?;

    let generator = F::MULTIPLICATIVE_GENERATOR;
    let generator_inverse = invert(&generator)?;

    let round_roots = compute_lookup_table(root, log2_size);
    let inverse_round_roots = compute_lookup_table(root_inverse, log2_size);

    debug!(size, log2_size, "constructed evaluation domain");

    Ok(Self {
      size,
      log2_size,
      root,
      root_inverse,
      size_as_field,
      size_inverse,
      generator,
      generator_inverse,
      round_roots,
      inverse_round_roots,
      executor: Arc::new(Sequential),
    })
  }

  /// Replaces the coset generator.
  ///
  /// # Errors
  /// Returns `PolyError::DivisionByZero` if `generator` is zero.
  pub fn with_generator(mut self, generator: F) -> Result<Self, PolyError> {
    self.generator_inverse = invert(&generator)?;
    self.generator = generator;
    Ok(self)
  }

  /// Replaces the executor used to run the independent tasks of every kernel.
  pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
    debug!(
      size = self.size,
      num_threads = executor.num_threads(),
      "evaluation domain executor set"
    );
    self.executor = executor;
    self
  }

  /// Number of points `n`.
  pub fn size(&self) -> usize {
    self.size
  }

  /// `log2(n)`.
  pub fn log2_size(&self) -> usize {
    self.log2_size
  }

  /// The primitive `n`-th root of unity `ω`.
  pub fn root(&self) -> F {
    self.root
  }

  /// `ω^{-1}`.
  pub fn root_inverse(&self) -> F {
    self.root_inverse
  }

  /// `n` as a field element.
  pub fn size_as_field(&self) -> F {
    self.size_as_field
  }

  /// `n^{-1}`.
  pub fn size_inverse(&self) -> F {
    self.size_inverse
  }

  /// The coset generator `g`.
  pub fn generator(&self) -> F {
    self.generator
  }

  /// `g^{-1}`.
  pub fn generator_inverse(&self) -> F {
    self.generator_inverse
  }

  /// Forward root table, one layer per butterfly stage.
  pub fn round_roots(&self) -> &[Vec<F>] {
    &self.round_roots
  }

  /// Inverse root table, one layer per butterfly stage.
  pub fn inverse_round_roots(&self) -> &[Vec<F>] {
    &self.inverse_round_roots
  }

  /// The executor kernels hand their independent tasks to.
  pub fn executor(&self) -> &dyn Executor {
    self.executor.as_ref()
  }

  /// Returns `ω^i`.
  pub fn element(&self, i: usize) -> F {
    self.root.pow_vartime([(i % self.size) as u64])
  }

  /// Returns `g·ω^i`.
  pub fn coset_element(&self, i: usize) -> F {
    self.generator * self.element(i)
  }
}

/// Builds the per-stage root layers for `root`, a primitive `2^log2_size`-th root of unity.
fn compute_lookup_table<F: PrimeField>(root: F, log2_size: usize) -> Vec<Vec<F>> {
  if log2_size == 0 {
    return vec![];
  }
  let half = 1usize << (log2_size - 1);

  let mut top = Vec::with_capacity(half);
  let mut acc = F::ONE;
  for _ in 0..half {
    top.push(acc);
    acc *= root;
  }

  // ψ_l = ω^{n / 2m}, so layer l is the top layer sampled with stride n / 2m
  let mut layers: Vec<Vec<F>> = (0..log2_size - 1)
    .map(|l| {
      let m = 1usize << l;
      let stride = half / m;
      (0..m).map(|j| top[j * stride]).collect()
    })
    .collect();
  layers.push(top);
  layers
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::provider::{bn254::Scalar as Fr, pasta::pallas};
  use ff::Field;

  fn test_domain_constants_with<F: PrimeField>() {
    let domain = EvaluationDomain::<F>::new(32).unwrap();
    assert_eq!(domain.size(), 32);
    assert_eq!(domain.log2_size(), 5);

    // ω has order exactly 32
    let mut r = domain.root();
    for _ in 1..32 {
      assert_ne!(r, F::ONE);
      r *= domain.root();
    }
    assert_eq!(r, F::ONE);

    assert_eq!(domain.root() * domain.root_inverse(), F::ONE);
    assert_eq!(domain.size_as_field() * domain.size_inverse(), F::ONE);
    assert_eq!(domain.generator() * domain.generator_inverse(), F::ONE);
    // the coset is disjoint from the subgroup
    assert_ne!(domain.generator().pow_vartime([32u64]), F::ONE);
  }

  #[test]
  fn test_domain_constants() {
    test_domain_constants_with::<Fr>();
    test_domain_constants_with::<pallas::Scalar>();
  }

  #[test]
  fn test_round_roots_layout() {
    let domain = EvaluationDomain::<Fr>::new(16).unwrap();
    let roots = domain.round_roots();
    assert_eq!(roots.len(), 4);

    for (l, layer) in roots.iter().enumerate() {
      let m = 1usize << l;
      assert_eq!(layer.len(), m);
      assert_eq!(layer[0], Fr::ONE);
      // layer l is generated by a primitive 2m-th root
      let psi = domain.root().pow_vartime([(16 / (2 * m)) as u64]);
      for (j, value) in layer.iter().enumerate() {
        assert_eq!(*value, psi.pow_vartime([j as u64]));
      }
    }
    assert_eq!(roots[3][1], domain.root());

    for (forward, inverse) in roots.iter().zip(domain.inverse_round_roots()) {
      for (a, b) in forward.iter().zip(inverse) {
        assert_eq!(*a * b, Fr::ONE);
      }
    }
  }

  #[test]
  fn test_invalid_sizes() {
    assert!(matches!(
      EvaluationDomain::<Fr>::new(0),
      Err(PolyError::InvalidDomainSize { size: 0, .. })
    ));
    assert!(matches!(
      EvaluationDomain::<Fr>::new(24),
      Err(PolyError::InvalidDomainSize { size: 24, .. })
    ));
    assert!(matches!(
      EvaluationDomain::<Fr>::new(1 << 29),
      Err(PolyError::InvalidDomainSize { max_log2_size: 28, .. })
    ));
  }

  #[test]
  fn test_trivial_domain() {
    let domain = EvaluationDomain::<Fr>::new(1).unwrap();
    assert_eq!(domain.root(), Fr::ONE);
    assert!(domain.round_roots().is_empty());
    assert_eq!(domain.element(5), Fr::ONE);
  }

  #[test]
  fn test_with_generator() {
    let domain = EvaluationDomain::<Fr>::new(8)
      .unwrap()
      .with_generator(Fr::from(5u64))
      .unwrap();
    assert_eq!(domain.generator(), Fr::from(5u64));
    assert_eq!(domain.coset_element(0), Fr::from(5u64));
    assert!(
      EvaluationDomain::<Fr>::new(8)
        .unwrap()
        .with_generator(Fr::ZERO)
        .is_err()
    );
  }
}
