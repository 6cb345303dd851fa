// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! A polynomial stored as a sequence of equally sized segments.
//!
//! Large extended-domain polynomials are handed around in segments of equal power-of-two size.
//! [`ChunkedPolynomial`] keeps them in a single contiguous arena and addresses an entry by
//! `(segment, offset)`, so logical index `segment * segment_size + offset` is the arena index.
//! The shape is validated once, when the arena is built; every transform on it then runs on the
//! contiguous backing storage.
use crate::errors::PolyError;
use ff::Field;
use serde::{Deserialize, Serialize};

/// A polynomial of power-of-two length split into `num_segments` equal segments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkedPolynomial<F: Field> {
  data: Vec<F>,
  segment_size: usize,
}

fn check_shape(num_segments: usize, segment_size: usize) -> Result<(), PolyError> {
  if num_segments == 0 || !num_segments.is_power_of_two() {
    return Err(PolyError::InvalidChunking {
      reason: format!("segment count {num_segments} is not a power of two"),
    });
  }
  if segment_size == 0 || !segment_size.is_power_of_two() {
    return Err(PolyError::InvalidChunking {
      reason: format!("segment size {segment_size} is not a power of two"),
    });
  }
  Ok(())
}

impl<F: Field> ChunkedPolynomial<F> {
  /// A zero polynomial of `num_segments * segment_size` entries.
  pub fn zero(num_segments: usize, segment_size: usize) -> Result<Self, PolyError> {
    check_shape(num_segments, segment_size)?;
    Ok(Self {
      data: vec![F::ZERO; num_segments * segment_size],
      segment_size,
    })
  }

  /// Splits `data` into `num_segments` equal segments.
  pub fn from_vec(data: Vec<F>, num_segments: usize) -> Result<Self, PolyError> {
    if num_segments == 0 || data.len() % num_segments != 0 {
      return Err(PolyError::InvalidChunking {
        reason: format!(
          "{} entries cannot be split into {num_segments} segments",
          data.len()
        ),
      });
    }
    let segment_size = data.len() / num_segments;
    check_shape(num_segments, segment_size)?;
    Ok(Self { data, segment_size })
  }

  /// Concatenates caller-provided segments, which must all have the same power-of-two length.
  pub fn from_segments(segments: Vec<Vec<F>>) -> Result<Self, PolyError> {
    let segment_size = segments.first().map_or(0, Vec::len);
    check_shape(segments.len(), segment_size)?;
    if let Some(bad) = segments.iter().position(|s| s.len() != segment_size) {
      return Err(PolyError::InvalidChunking {
        reason: format!(
          "segment {bad} has {} entries, expected {segment_size}",
          segments[bad].len()
        ),
      });
    }
    Ok(Self {
      data: segments.into_iter().flatten().collect(),
      segment_size,
    })
  }

  /// Splits the arena back into owned segments.
  pub fn into_segments(self) -> Vec<Vec<F>> {
    self
      .data
      .chunks(self.segment_size)
      .map(<[F]>::to_vec)
      .collect()
  }

  /// Total number of entries.
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// True only for an arena with no entries, which the constructors never produce.
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Number of segments.
  pub fn num_segments(&self) -> usize {
    self.data.len() / self.segment_size
  }

  /// Entries per segment.
  pub fn segment_size(&self) -> usize {
    self.segment_size
  }

  /// The entry at `(segment, offset)`.
  pub fn get(&self, segment: usize, offset: usize) -> F {
    assert!(offset < self.segment_size, "offset out of range");
    self.data[segment * self.segment_size + offset]
  }

  /// The `index`-th segment.
  pub fn segment(&self, index: usize) -> &[F] {
    let start = index * self.segment_size;
    &self.data[start..start + self.segment_size]
  }

  /// The `index`-th segment, mutably.
  pub fn segment_mut(&mut self, index: usize) -> &mut [F] {
    let start = index * self.segment_size;
    &mut self.data[start..start + self.segment_size]
  }

  /// Iterates over the segments in index order.
  pub fn segments(&self) -> impl Iterator<Item = &[F]> {
    self.data.chunks(self.segment_size)
  }

  /// The entries in logical order.
  pub fn as_slice(&self) -> &[F] {
    &self.data
  }

  /// The entries in logical order, mutably.
  pub fn as_mut_slice(&mut self) -> &mut [F] {
    &mut self.data
  }

  /// Returns the backing storage.
  pub fn into_vec(self) -> Vec<F> {
    self.data
  }
}
