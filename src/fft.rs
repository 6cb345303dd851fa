// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Radix-2 transforms between coefficient and evaluation form.
//!
//! The core transform is an iterative decimation-in-time Cooley-Tukey FFT: the input is
//! bit-reversed, then `log2(n)` butterfly stages run in order, stage `l` combining pairs at
//! distance `m = 2^l` with the `m` roots of layer `l` of the domain's root table. Output is in
//! natural order, so `fft(p)[i] = p(ω^i)`.
//!
//! Within a stage the butterflies are split into disjoint contiguous ranges and handed to the
//! domain's executor. Early stages are split on whole blocks of `2m` entries; once a block is
//! larger than a thread's share, each block is split into its low and high halves and both
//! halves are cut into matching pieces.
use crate::{
  domain::EvaluationDomain,
  math::Math,
  parallel::{Executor, Sequential, Task, chunk_size, parallelize, parallelize_with_chunk_size},
  polys::chunked::ChunkedPolynomial,
};
use ff::{Field, PrimeField};
use itertools::izip;
use std::iter;

/// Extension factor used by [`partial_fft`] and [`partial_fft_serial`].
pub const DEFAULT_PARTIAL_FFT_EXTENSION: usize = 4;

fn assert_domain_size<F: PrimeField>(len: usize, domain: &EvaluationDomain<F>) {
  assert_eq!(
    len,
    domain.size(),
    "buffer length {len} does not match the domain size {}",
    domain.size()
  );
}

/// Multiplies entry `i` of `coeffs` by `start * shift^i`.
pub(crate) fn scale_by_powers<F: Field, E: Executor + ?Sized>(
  executor: &E,
  coeffs: &mut [F],
  start: F,
  shift: F,
) {
  parallelize(executor, coeffs, |chunk, offset| {
    let mut acc = start * shift.pow_vartime([offset as u64]);
    for c in chunk.iter_mut() {
      *c *= acc;
      acc *= shift;
    }
  });
}

fn scale<F: Field, E: Executor + ?Sized>(executor: &E, coeffs: &mut [F], constant: F) {
  parallelize(executor, coeffs, |chunk, _| {
    for c in chunk.iter_mut() {
      *c *= constant;
    }
  });
}

fn bit_reverse<F: Field, E: Executor + ?Sized>(executor: &E, coeffs: &mut [F], log2_size: usize) {
  if executor.num_threads() == 1 {
    for i in 0..coeffs.len() {
      let j = i.reverse_bits_in(log2_size);
      if i < j {
        coeffs.swap(i, j);
      }
    }
    return;
  }
  let scratch = coeffs.to_vec();
  parallelize(executor, coeffs, |chunk, start| {
    for (offset, c) in chunk.iter_mut().enumerate() {
      *c = scratch[(start + offset).reverse_bits_in(log2_size)];
    }
  });
}

fn butterflies<F: Field>(lo: &mut [F], hi: &mut [F], roots: &[F]) {
  for (a, b, w) in izip!(lo.iter_mut(), hi.iter_mut(), roots) {
    let t = *b * w;
    *b = *a - t;
    *a += t;
  }
}

fn butterfly_stage<F: Field, E: Executor + ?Sized>(executor: &E, coeffs: &mut [F], layer: &[F]) {
  let m = layer.len();
  let piece = chunk_size(coeffs.len(), executor.num_threads()).next_power_of_two();

  if piece >= 2 * m {
    parallelize_with_chunk_size(executor, coeffs, piece, |chunk, _| {
      for block in chunk.chunks_mut(2 * m) {
        let (lo, hi) = block.split_at_mut(m);
        butterflies(lo, hi, layer);
      }
    });
    return;
  }

  // blocks are wider than a thread's share: cut every block into matching half-pieces
  let tasks: Vec<Task<'_>> = coeffs
    .chunks_mut(2 * m)
    .flat_map(|block| {
      let (lo, hi) = block.split_at_mut(m);
      izip!(
        lo.chunks_mut(piece),
        hi.chunks_mut(piece),
        layer.chunks(piece)
      )
      .map(|(lo, hi, roots)| Box::new(move || butterflies(lo, hi, roots)) as Task<'_>)
    })
    .collect();
  executor.execute(tasks);
}

fn fft_inner<F: Field, E: Executor + ?Sized>(
  executor: &E,
  coeffs: &mut [F],
  root_table: &[Vec<F>],
  log2_size: usize,
) {
  bit_reverse(executor, coeffs, log2_size);
  for layer in root_table {
    butterfly_stage(executor, coeffs, layer);
  }
}

/// Evaluates the polynomial with coefficients `coeffs` on the domain, in place.
#[tracing::instrument(skip_all, name = "fft", fields(n = coeffs.len()))]
pub fn fft<F: PrimeField>(coeffs: &mut [F], domain: &EvaluationDomain<F>) {
  assert_domain_size(coeffs.len(), domain);
  fft_inner(
    domain.executor(),
    coeffs,
    domain.round_roots(),
    domain.log2_size(),
  );
}

/// Writes the evaluations of `coeffs` on the domain into `target`.
pub fn fft_into<F: PrimeField>(coeffs: &[F], target: &mut [F], domain: &EvaluationDomain<F>) {
  assert_domain_size(coeffs.len(), domain);
  assert_domain_size(target.len(), domain);
  target.copy_from_slice(coeffs);
  fft(target, domain);
}

/// [`fft`] followed by multiplying every output by `constant`.
pub fn fft_with_constant<F: PrimeField>(
  coeffs: &mut [F],
  domain: &EvaluationDomain<F>,
  constant: F,
) {
  fft(coeffs, domain);
  scale(domain.executor(), coeffs, constant);
}

/// Interpolates the evaluations in `coeffs` back to coefficients, with every output multiplied
/// by `constant`. The constant is folded into the `n^{-1}` scaling.
#[tracing::instrument(skip_all, name = "ifft", fields(n = coeffs.len()))]
pub fn ifft_with_constant<F: PrimeField>(
  coeffs: &mut [F],
  domain: &EvaluationDomain<F>,
  constant: F,
) {
  assert_domain_size(coeffs.len(), domain);
  let executor = domain.executor();
  fft_inner(
    executor,
    coeffs,
    domain.inverse_round_roots(),
    domain.log2_size(),
  );
  scale(executor, coeffs, domain.size_inverse() * constant);
}

/// Interpolates the evaluations in `coeffs` back to coefficients, in place.
pub fn ifft<F: PrimeField>(coeffs: &mut [F], domain: &EvaluationDomain<F>) {
  ifft_with_constant(coeffs, domain, F::ONE);
}

/// Writes the coefficients interpolating `values` into `target`.
pub fn ifft_into<F: PrimeField>(values: &[F], target: &mut [F], domain: &EvaluationDomain<F>) {
  assert_domain_size(values.len(), domain);
  assert_domain_size(target.len(), domain);
  target.copy_from_slice(values);
  ifft(target, domain);
}

/// Evaluates `coeffs` on the coset `g·H`: entry `i` becomes `p(g·ω^i)`.
pub fn coset_fft<F: PrimeField>(coeffs: &mut [F], domain: &EvaluationDomain<F>) {
  coset_fft_with_constant(coeffs, domain, F::ONE);
}

/// Writes the evaluations of `coeffs` on the coset `g·H` into `target`.
pub fn coset_fft_into<F: PrimeField>(
  coeffs: &[F],
  target: &mut [F],
  domain: &EvaluationDomain<F>,
) {
  assert_domain_size(coeffs.len(), domain);
  assert_domain_size(target.len(), domain);
  target.copy_from_slice(coeffs);
  coset_fft(target, domain);
}

/// Coset transform of `constant · p`: coefficient `i` is scaled by `constant · g^i` first.
pub fn coset_fft_with_constant<F: PrimeField>(
  coeffs: &mut [F],
  domain: &EvaluationDomain<F>,
  constant: F,
) {
  assert_domain_size(coeffs.len(), domain);
  scale_by_powers(domain.executor(), coeffs, constant, domain.generator());
  fft(coeffs, domain);
}

/// Evaluates `coeffs` on the coset `shift·g·H`.
pub fn coset_fft_with_generator_shift<F: PrimeField>(
  coeffs: &mut [F],
  domain: &EvaluationDomain<F>,
  shift: F,
) {
  assert_domain_size(coeffs.len(), domain);
  scale_by_powers(domain.executor(), coeffs, F::ONE, shift * domain.generator());
  fft(coeffs, domain);
}

/// Inverse of [`coset_fft`]: interpolates values given on `g·H` back to coefficients.
pub fn coset_ifft<F: PrimeField>(values: &mut [F], domain: &EvaluationDomain<F>) {
  ifft(values, domain);
  scale_by_powers(
    domain.executor(),
    values,
    F::ONE,
    domain.generator_inverse(),
  );
}

/// Writes the coefficients interpolating the coset values `values` into `target`.
pub fn coset_ifft_into<F: PrimeField>(
  values: &[F],
  target: &mut [F],
  domain: &EvaluationDomain<F>,
) {
  assert_domain_size(values.len(), domain);
  assert_domain_size(target.len(), domain);
  target.copy_from_slice(values);
  coset_ifft(target, domain);
}

/// Evaluates a polynomial of degree `< n` on the coset of a domain `domain_extension` times
/// larger, using `domain_extension` transforms of size `n`.
///
/// `coeffs` has the large domain's length and only its first `n` entries are read. On return
/// entry `t` holds `p(g·ψ^t)` with `ψ` the large domain's root, which is exactly what
/// [`coset_fft`] over the large domain produces for the zero-padded polynomial. Both domains are
/// expected to share their coset generator.
#[tracing::instrument(
  skip_all,
  name = "coset_fft_extended",
  fields(n = small_domain.size(), k = domain_extension)
)]
pub fn coset_fft_extended<F: PrimeField>(
  coeffs: &mut [F],
  small_domain: &EvaluationDomain<F>,
  large_domain: &EvaluationDomain<F>,
  domain_extension: usize,
) {
  let n = small_domain.size();
  assert!(
    domain_extension.is_power_of_two(),
    "domain extension {domain_extension} is not a power of two"
  );
  assert_eq!(
    large_domain.size(),
    n * domain_extension,
    "large domain must be {domain_extension} times the small domain"
  );
  assert_domain_size(coeffs.len(), large_domain);
  debug_assert_eq!(small_domain.generator(), large_domain.generator());

  let executor = small_domain.executor();
  let psi = large_domain.root();

  // the j-th transform evaluates p(g·ψ^j·X) on the small domain
  let mut shift = small_domain.generator();
  let mut evaluations = Vec::with_capacity(domain_extension);
  for _ in 0..domain_extension {
    let mut buf = coeffs[..n].to_vec();
    scale_by_powers(executor, &mut buf, F::ONE, shift);
    fft_inner(
      executor,
      &mut buf,
      small_domain.round_roots(),
      small_domain.log2_size(),
    );
    evaluations.push(buf);
    shift *= psi;
  }

  parallelize(executor, coeffs, |chunk, start| {
    for (offset, c) in chunk.iter_mut().enumerate() {
      let t = start + offset;
      *c = evaluations[t % domain_extension][t / domain_extension];
    }
  });
}

/// `ω^exponent`, read from the top root layer `ω^0, ..., ω^{N/2 - 1}`.
fn root_power<F: Field>(top_layer: &[F], exponent: usize, size: usize) -> F {
  let e = exponent % size;
  let half = size / 2;
  if e >= half {
    -top_layer[e - half]
  } else {
    top_layer[e]
  }
}

fn partial_fft_inner<F: PrimeField, E: Executor + ?Sized>(
  executor: &E,
  coeffs: &[F],
  target: &mut [F],
  domain: &EvaluationDomain<F>,
  extension: usize,
  constant: F,
  is_coset: bool,
) {
  let size = domain.size();
  assert_domain_size(coeffs.len(), domain);
  assert_domain_size(target.len(), domain);
  assert!(size >= 2, "partial transforms need a domain of at least two points");
  assert!(
    extension.is_power_of_two() && extension <= size,
    "extension {extension} must be a power of two dividing {size}"
  );

  let n = size / extension;
  let top_layer = &domain.round_roots()[domain.log2_size() - 1];
  let generator = if is_coset {
    domain.generator()
  } else {
    F::ONE
  };
  let g_n = generator.pow_vartime([n as u64]);
  // g^{j·n} for every residue class offset
  let block_shifts: Vec<F> = iter::successors(Some(F::ONE), |x| Some(*x * g_n))
    .take(extension)
    .collect();

  // pieces never straddle two output segments
  let piece = chunk_size(size, executor.num_threads())
    .next_power_of_two()
    .min(n);
  parallelize_with_chunk_size(executor, target, piece, |chunk, start| {
    let s = extension - 1 - start / n;
    let first = start % n;
    let mut g_i = constant * generator.pow_vartime([first as u64]);
    for (offset, out) in chunk.iter_mut().enumerate() {
      let i = first + offset;
      let mut acc = F::ZERO;
      for (j, block_shift) in block_shifts.iter().enumerate() {
        let index = i + j * n;
        acc += coeffs[index] * root_power(top_layer, index * (s + 1), size) * block_shift;
      }
      *out = acc * g_i;
      g_i *= generator;
    }
  });
}

/// Splits the transform of `coeffs` into `extension` partial sums per residue class.
///
/// With `N` the domain size and `n = N / extension`, entry `(extension - 1 - s)·n + i` of the
/// output holds
/// `constant · Σ_j Y[i + j·n] · ω^{(i + j·n)(s + 1)} · (g^{i + j·n} if is_coset)`,
/// so that summing segment `extension - 1 - s` gives `constant · fft(Y)[s + 1]` (the coset
/// transform when `is_coset`).
#[tracing::instrument(skip_all, name = "partial_fft", fields(n = coeffs.len(), k = extension))]
pub fn partial_fft_with_extension<F: PrimeField>(
  coeffs: &mut [F],
  domain: &EvaluationDomain<F>,
  extension: usize,
  constant: F,
  is_coset: bool,
) {
  let scratch = coeffs.to_vec();
  partial_fft_inner(
    domain.executor(),
    &scratch,
    coeffs,
    domain,
    extension,
    constant,
    is_coset,
  );
}

/// [`partial_fft_with_extension`] with the default extension of four.
pub fn partial_fft<F: PrimeField>(
  coeffs: &mut [F],
  domain: &EvaluationDomain<F>,
  constant: F,
  is_coset: bool,
) {
  partial_fft_with_extension(
    coeffs,
    domain,
    DEFAULT_PARTIAL_FFT_EXTENSION,
    constant,
    is_coset,
  );
}

/// Single-threaded, non-coset, unscaled partial transform of `coeffs` into `target`.
pub fn partial_fft_serial<F: PrimeField>(
  coeffs: &[F],
  target: &mut [F],
  domain: &EvaluationDomain<F>,
) {
  partial_fft_inner(
    &Sequential,
    coeffs,
    target,
    domain,
    DEFAULT_PARTIAL_FFT_EXTENSION,
    F::ONE,
    false,
  );
}

/// [`fft`] over a chunked polynomial whose total length is the domain size.
pub fn fft_chunked<F: PrimeField>(poly: &mut ChunkedPolynomial<F>, domain: &EvaluationDomain<F>) {
  fft(poly.as_mut_slice(), domain);
}

/// [`ifft`] over a chunked polynomial whose total length is the domain size.
pub fn ifft_chunked<F: PrimeField>(poly: &mut ChunkedPolynomial<F>, domain: &EvaluationDomain<F>) {
  ifft(poly.as_mut_slice(), domain);
}

/// [`coset_fft`] over a chunked polynomial whose total length is the domain size.
pub fn coset_fft_chunked<F: PrimeField>(
  poly: &mut ChunkedPolynomial<F>,
  domain: &EvaluationDomain<F>,
) {
  coset_fft(poly.as_mut_slice(), domain);
}

/// [`coset_ifft`] over a chunked polynomial whose total length is the domain size.
pub fn coset_ifft_chunked<F: PrimeField>(
  poly: &mut ChunkedPolynomial<F>,
  domain: &EvaluationDomain<F>,
) {
  coset_ifft(poly.as_mut_slice(), domain);
}

/// [`coset_fft_extended`] over a chunked polynomial spanning the large domain.
pub fn coset_fft_extended_chunked<F: PrimeField>(
  poly: &mut ChunkedPolynomial<F>,
  small_domain: &EvaluationDomain<F>,
  large_domain: &EvaluationDomain<F>,
  domain_extension: usize,
) {
  coset_fft_extended(
    poly.as_mut_slice(),
    small_domain,
    large_domain,
    domain_extension,
  );
}

/// [`partial_fft`] over a chunked polynomial whose total length is the domain size.
pub fn partial_fft_chunked<F: PrimeField>(
  poly: &mut ChunkedPolynomial<F>,
  domain: &EvaluationDomain<F>,
  constant: F,
  is_coset: bool,
) {
  partial_fft(poly.as_mut_slice(), domain, constant, is_coset);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    parallel::RayonExecutor,
    provider::{bn254::Scalar as Fr, pasta::pallas},
  };
  use rand::{SeedableRng, rngs::StdRng};
  use std::sync::Arc;

  fn horner<F: Field>(coeffs: &[F], z: F) -> F {
    coeffs.iter().rev().fold(F::ZERO, |acc, c| acc * z + c)
  }

  fn random_poly<F: PrimeField>(rng: &mut StdRng, n: usize) -> Vec<F> {
    (0..n).map(|_| F::random(&mut *rng)).collect()
  }

  fn test_fft_matches_naive_evaluation_with<F: PrimeField>() {
    let mut rng = StdRng::seed_from_u64(1);
    for log2 in 0..6 {
      let domain = EvaluationDomain::<F>::new(1 << log2).unwrap();
      let coeffs = random_poly::<F>(&mut rng, domain.size());

      let mut evals = coeffs.clone();
      fft(&mut evals, &domain);
      for (i, e) in evals.iter().enumerate() {
        assert_eq!(*e, horner(&coeffs, domain.element(i)));
      }

      ifft(&mut evals, &domain);
      assert_eq!(evals, coeffs);
    }
  }

  #[test]
  fn test_fft_matches_naive_evaluation() {
    test_fft_matches_naive_evaluation_with::<Fr>();
    test_fft_matches_naive_evaluation_with::<pallas::Scalar>();
  }

  fn test_coset_fft_with<F: PrimeField>() {
    let mut rng = StdRng::seed_from_u64(2);
    let domain = EvaluationDomain::<F>::new(16).unwrap();
    let coeffs = random_poly::<F>(&mut rng, 16);

    let mut evals = vec![F::ZERO; 16];
    coset_fft_into(&coeffs, &mut evals, &domain);
    for (i, e) in evals.iter().enumerate() {
      assert_eq!(*e, horner(&coeffs, domain.coset_element(i)));
    }

    let mut back = vec![F::ZERO; 16];
    coset_ifft_into(&evals, &mut back, &domain);
    assert_eq!(back, coeffs);

    let mut plain = vec![F::ZERO; 16];
    fft_into(&coeffs, &mut plain, &domain);
    let mut back = vec![F::ONE; 16];
    ifft_into(&plain, &mut back, &domain);
    assert_eq!(back, coeffs);
  }

  #[test]
  fn test_coset_fft() {
    test_coset_fft_with::<Fr>();
    test_coset_fft_with::<pallas::Scalar>();
  }

  #[test]
  fn test_constant_variants() {
    let mut rng = StdRng::seed_from_u64(3);
    let domain = EvaluationDomain::<Fr>::new(8).unwrap();
    let coeffs = random_poly::<Fr>(&mut rng, 8);
    let c = Fr::from(7u64);

    let mut expected = vec![Fr::ZERO; 8];
    fft_into(&coeffs, &mut expected, &domain);
    let mut scaled = coeffs.clone();
    fft_with_constant(&mut scaled, &domain, c);
    for (a, b) in scaled.iter().zip(expected.iter()) {
      assert_eq!(*a, *b * c);
    }

    ifft_with_constant(&mut scaled, &domain, c.invert().unwrap());
    assert_eq!(scaled, coeffs);

    let mut coset = coeffs.clone();
    coset_fft_with_constant(&mut coset, &domain, c);
    for (i, e) in coset.iter().enumerate() {
      assert_eq!(*e, c * horner(&coeffs, domain.coset_element(i)));
    }

    let mut shifted = coeffs.clone();
    coset_fft_with_generator_shift(&mut shifted, &domain, c);
    for (i, e) in shifted.iter().enumerate() {
      assert_eq!(*e, horner(&coeffs, c * domain.coset_element(i)));
    }
  }

  #[test]
  fn test_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(4);
    let sequential = EvaluationDomain::<Fr>::new(64).unwrap();
    let coeffs = random_poly::<Fr>(&mut rng, 64);

    let mut expected = coeffs.clone();
    fft(&mut expected, &sequential);

    // 3 threads gives non power-of-two shares, 32 forces the split-block path on most stages
    for threads in [2, 3, 8, 32, 128] {
      let domain = EvaluationDomain::<Fr>::new(64)
        .unwrap()
        .with_executor(Arc::new(RayonExecutor::with_num_threads(threads)));
      let mut evals = coeffs.clone();
      fft(&mut evals, &domain);
      assert_eq!(evals, expected);
      coset_ifft(&mut evals, &domain);
      coset_fft(&mut evals, &domain);
      ifft(&mut evals, &domain);
      assert_eq!(evals, coeffs);
    }
  }

  fn test_coset_fft_extended_with<F: PrimeField>() {
    let mut rng = StdRng::seed_from_u64(5);
    let small = EvaluationDomain::<F>::new(8).unwrap();
    let large = EvaluationDomain::<F>::new(32).unwrap();

    let mut padded = random_poly::<F>(&mut rng, 8);
    padded.resize(32, F::ZERO);

    let mut expected = padded.clone();
    coset_fft(&mut expected, &large);

    // entries past the small polynomial are ignored
    let mut extended = padded.clone();
    for e in extended[8..].iter_mut() {
      *e = F::ONE;
    }
    coset_fft_extended(&mut extended, &small, &large, 4);
    assert_eq!(extended, expected);
  }

  #[test]
  fn test_coset_fft_extended() {
    test_coset_fft_extended_with::<Fr>();
    test_coset_fft_extended_with::<pallas::Scalar>();
  }

  fn test_partial_fft_with<F: PrimeField>(is_coset: bool) {
    let mut rng = StdRng::seed_from_u64(6);
    let domain = EvaluationDomain::<F>::new(32).unwrap();
    let coeffs = random_poly::<F>(&mut rng, 32);
    let constant = F::from(3u64);

    let mut full = coeffs.clone();
    if is_coset {
      coset_fft_with_constant(&mut full, &domain, constant);
    } else {
      fft_with_constant(&mut full, &domain, constant);
    }

    for extension in [1, 2, 4, 8] {
      let n = 32 / extension;
      let mut partial = coeffs.clone();
      partial_fft_with_extension(&mut partial, &domain, extension, constant, is_coset);
      for s in 0..extension {
        let segment = &partial[(extension - 1 - s) * n..(extension - s) * n];
        let sum = segment.iter().fold(F::ZERO, |acc, v| acc + v);
        assert_eq!(sum, full[(s + 1) % 32]);
      }
    }
  }

  #[test]
  fn test_partial_fft() {
    test_partial_fft_with::<Fr>(false);
    test_partial_fft_with::<Fr>(true);
    test_partial_fft_with::<pallas::Scalar>(true);
  }

  #[test]
  fn test_partial_fft_serial_matches_parallel() {
    let mut rng = StdRng::seed_from_u64(7);
    let coeffs = random_poly::<Fr>(&mut rng, 64);
    let domain = EvaluationDomain::<Fr>::new(64)
      .unwrap()
      .with_executor(Arc::new(RayonExecutor::with_num_threads(16)));

    let mut serial = vec![Fr::ZERO; 64];
    partial_fft_serial(&coeffs, &mut serial, &domain);

    let mut parallel = coeffs.clone();
    partial_fft(&mut parallel, &domain, Fr::ONE, false);
    assert_eq!(serial, parallel);
  }

  #[test]
  fn test_chunked_matches_contiguous() {
    let mut rng = StdRng::seed_from_u64(8);
    let domain = EvaluationDomain::<Fr>::new(32).unwrap();
    let coeffs = random_poly::<Fr>(&mut rng, 32);

    let mut contiguous = coeffs.clone();
    coset_fft(&mut contiguous, &domain);

    let mut chunked = ChunkedPolynomial::from_vec(coeffs.clone(), 4).unwrap();
    coset_fft_chunked(&mut chunked, &domain);
    assert_eq!(chunked.as_slice(), contiguous.as_slice());

    coset_ifft_chunked(&mut chunked, &domain);
    fft_chunked(&mut chunked, &domain);
    ifft_chunked(&mut chunked, &domain);
    assert_eq!(chunked.into_vec(), coeffs);

    let c = Fr::from(3u64);
    for is_coset in [false, true] {
      let mut contiguous = coeffs.clone();
      partial_fft(&mut contiguous, &domain, c, is_coset);
      let mut chunked = ChunkedPolynomial::from_vec(coeffs.clone(), 8).unwrap();
      partial_fft_chunked(&mut chunked, &domain, c, is_coset);
      assert_eq!(chunked.into_vec(), contiguous);
    }
  }

  #[test]
  #[should_panic(expected = "does not match the domain size")]
  fn test_wrong_length_panics() {
    let domain = EvaluationDomain::<Fr>::new(8).unwrap();
    let mut coeffs = vec![Fr::ONE; 4];
    fft(&mut coeffs, &domain);
  }
}
