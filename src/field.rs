// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Checked field inversion.
//!
//! Every inversion in the crate goes through these helpers so that an attempt to invert zero
//! surfaces as [`PolyError::DivisionByZero`] instead of an arbitrary value.
use crate::errors::PolyError;
use ff::Field;

/// Returns `a^{-1}`.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if `a` is zero.
pub fn invert<F: Field>(a: &F) -> Result<F, PolyError> {
  a.invert().into_option().ok_or(PolyError::DivisionByZero)
}

/// Division of two field elements
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if `b` is zero (not invertible).
pub fn div_f<F: Field>(a: F, b: F) -> Result<F, PolyError> {
  Ok(a * invert(&b)?)
}

/// Inverts every element of `values` in place with Montgomery's trick: one field inversion
/// plus three multiplications per element.
///
/// # Errors
/// Returns `PolyError::DivisionByZero` if any element is zero; `values` is left untouched.
pub fn batch_invert<F: Field>(values: &mut [F]) -> Result<(), PolyError> {
  if values.is_empty() {
    return Ok(());
  }

  // prefix[i] = values[0] * ... * values[i - 1]
  let mut prefix = Vec::with_capacity(values.len());
  let mut acc = F::ONE;
  for v in values.iter() {
    if v.is_zero_vartime() {
      return Err(PolyError::DivisionByZero);
    }
    prefix.push(acc);
    acc *= v;
  }

  let mut inv = invert(&acc)?;
  for (v, p) in values.iter_mut().zip(prefix).rev() {
    let next = inv * *v;
    *v = inv * p;
    inv = next;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::provider::{bn254::Scalar as Fr, pasta::pallas};
  use ff::PrimeField;
  use rand::{SeedableRng, rngs::StdRng};

  fn test_batch_invert_with<F: PrimeField>() {
    let mut rng = StdRng::seed_from_u64(11);
    let values: Vec<F> = (0..33).map(|_| F::random(&mut rng)).collect();
    let mut inverted = values.clone();
    batch_invert(&mut inverted).unwrap();
    for (v, inv) in values.iter().zip(inverted.iter()) {
      assert_eq!(*v * inv, F::ONE);
      assert_eq!(invert(v).unwrap(), *inv);
    }
  }

  #[test]
  fn test_batch_invert() {
    test_batch_invert_with::<Fr>();
    test_batch_invert_with::<pallas::Scalar>();
  }

  #[test]
  fn test_zero_is_rejected() {
    assert_eq!(invert(&Fr::ZERO), Err(PolyError::DivisionByZero));
    assert_eq!(div_f(Fr::ONE, Fr::ZERO), Err(PolyError::DivisionByZero));

    let mut values = vec![Fr::from(3u64), Fr::ZERO, Fr::from(5u64)];
    assert_eq!(batch_invert(&mut values), Err(PolyError::DivisionByZero));
    assert_eq!(values, vec![Fr::from(3u64), Fr::ZERO, Fr::from(5u64)]);

    let mut empty: Vec<Fr> = vec![];
    assert!(batch_invert(&mut empty).is_ok());
  }

  #[test]
  fn test_div_f() {
    let a = Fr::from(84u64);
    let b = Fr::from(2u64);
    assert_eq!(div_f(a, b).unwrap(), Fr::from(42u64));
  }
}
