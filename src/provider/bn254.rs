// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Scalar field of BN254 (also known as BN256 or alt_bn128).

/// Re-exports that give access to the standard aliases used in the code base, for bn254
#[allow(clippy::module_inception)]
pub mod bn254 {
  pub use halo2curves::bn256::{Fq as Base, Fr as Scalar};
}

pub use bn254::{Base, Scalar};

#[cfg(test)]
mod tests {
  use super::Scalar;
  use ff::{Field, PrimeField};

  #[test]
  fn test_two_adic_root() {
    // Fr - 1 = 2^28 * t
    assert_eq!(Scalar::S, 28);
    let mut root = Scalar::ROOT_OF_UNITY;
    for _ in 0..Scalar::S - 1 {
      root = root.square();
    }
    assert_eq!(root, -Scalar::ONE);
    assert_eq!(Scalar::ROOT_OF_UNITY * Scalar::ROOT_OF_UNITY_INV, Scalar::ONE);
  }
}
