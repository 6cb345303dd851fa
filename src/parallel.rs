// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polyarith project.
// See the LICENSE file in the project root for full license information.

//! Work distribution for the transform and algebra kernels.
//!
//! Every kernel in this crate splits its output into disjoint contiguous ranges and hands one
//! task per range to an [`Executor`]. Tasks never share a write target, so executors are free to
//! run them in any order or concurrently. [`Sequential`] runs them in order on the calling
//! thread; [`RayonExecutor`] spreads them over the rayon pool. Both produce identical results.
use core::fmt::Debug;
use rayon::prelude::*;

/// A unit of independent work handed to an [`Executor`].
pub type Task<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Runs batches of independent tasks to completion.
pub trait Executor: Debug + Send + Sync {
  /// Number of tasks a kernel should aim to split its work into.
  fn num_threads(&self) -> usize;

  /// Runs every task and returns once all of them have finished.
  fn execute<'a>(&self, tasks: Vec<Task<'a>>);
}

/// Runs tasks one after another on the calling thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sequential;

impl Executor for Sequential {
  fn num_threads(&self) -> usize {
    1
  }

  fn execute<'a>(&self, tasks: Vec<Task<'a>>) {
    for task in tasks {
      task();
    }
  }
}

/// Runs tasks on the global rayon pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayonExecutor {
  num_threads: usize,
}

impl RayonExecutor {
  /// Splits work into as many tasks as the current rayon pool has threads.
  pub fn new() -> Self {
    Self::with_num_threads(rayon::current_num_threads())
  }

  /// Splits work into `num_threads` tasks regardless of the pool size.
  pub fn with_num_threads(num_threads: usize) -> Self {
    assert!(num_threads > 0, "an executor needs at least one thread");
    Self { num_threads }
  }
}

impl Default for RayonExecutor {
  fn default() -> Self {
    Self::new()
  }
}

impl Executor for RayonExecutor {
  fn num_threads(&self) -> usize {
    self.num_threads
  }

  fn execute<'a>(&self, tasks: Vec<Task<'a>>) {
    tasks.into_par_iter().for_each(|task| task());
  }
}

/// Size of each of the (at most `num_threads`) contiguous pieces covering `len` elements.
pub(crate) fn chunk_size(len: usize, num_threads: usize) -> usize {
  len.div_ceil(num_threads.max(1)).max(1)
}

/// Splits `v` into at most `executor.num_threads()` contiguous chunks and calls
/// `f(chunk, start)` on each, where `start` is the index of the chunk's first element in `v`.
pub(crate) fn parallelize<T, E, F>(executor: &E, v: &mut [T], f: F)
where
  T: Send,
  E: Executor + ?Sized,
  F: Fn(&mut [T], usize) + Sync,
{
  let size = chunk_size(v.len(), executor.num_threads());
  parallelize_with_chunk_size(executor, v, size, f);
}

/// Same as [`parallelize`] with a caller-chosen chunk size.
pub(crate) fn parallelize_with_chunk_size<T, E, F>(executor: &E, v: &mut [T], size: usize, f: F)
where
  T: Send,
  E: Executor + ?Sized,
  F: Fn(&mut [T], usize) + Sync,
{
  if v.is_empty() {
    return;
  }
  assert!(size > 0, "chunk size must be positive");
  let f = &f;
  let tasks: Vec<Task<'_>> = v
    .chunks_mut(size)
    .enumerate()
    .map(|(i, chunk)| Box::new(move || f(chunk, i * size)) as Task<'_>)
    .collect();
  executor.execute(tasks);
}

/// Runs `f(task_index)` for `num_tasks` tasks and collects the results in task order.
pub(crate) fn map_tasks<R, E, F>(executor: &E, num_tasks: usize, f: F) -> Vec<R>
where
  R: Send + Default + Clone,
  E: Executor + ?Sized,
  F: Fn(usize) -> R + Sync,
{
  let mut results = vec![R::default(); num_tasks];
  parallelize_with_chunk_size(executor, &mut results, 1, |slot, index| {
    slot[0] = f(index);
  });
  results
}
