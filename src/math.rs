// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

pub trait Math {
  fn log_2(self) -> usize;
  fn reverse_bits_in(self, log2_size: usize) -> usize;
}

impl Math for usize {
  fn log_2(self) -> usize {
    assert_ne!(self, 0);

    if self.is_power_of_two() {
      (1usize.leading_zeros() - self.leading_zeros()) as usize
    } else {
      (0usize.leading_zeros() - self.leading_zeros()) as usize
    }
  }

  /// Reverses the lowest `log2_size` bits of `self`.
  fn reverse_bits_in(self, log2_size: usize) -> usize {
    if log2_size == 0 {
      return 0;
    }
    self.reverse_bits() >> (usize::BITS as usize - log2_size)
  }
}

#[cfg(test)]
mod tests {
  use super::Math;

  #[test]
  fn test_log_2() {
    assert_eq!(1usize.log_2(), 0);
    assert_eq!(2usize.log_2(), 1);
    assert_eq!(8usize.log_2(), 3);
    // non powers of two round up
    assert_eq!(5usize.log_2(), 3);
  }

  #[test]
  fn test_reverse_bits_in() {
    assert_eq!(0b001usize.reverse_bits_in(3), 0b100);
    assert_eq!(0b110usize.reverse_bits_in(3), 0b011);
    assert_eq!(5usize.reverse_bits_in(0), 0);
    for i in 0..16usize {
      assert_eq!(i.reverse_bits_in(4).reverse_bits_in(4), i);
    }
  }
}
