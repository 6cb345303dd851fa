//! This library implements the polynomial transform and evaluation engine of a
//! polynomial-commitment-based prover.
//! It converts polynomials over a prime field between coefficient and evaluation form with radix-2
//! FFTs (including coset and domain-extending variants), combines them pointwise, and computes the
//! vanishing-polynomial, Lagrange-basis, opening-quotient and interpolation values such a prover
//! needs.
#![deny(
  warnings,
  unused,
  future_incompatible,
  nonstandard_style,
  rust_2018_idioms,
  missing_docs
)]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]

// private modules
mod math;

// public modules
pub mod domain;
pub mod errors;
pub mod fft;
pub mod field;
pub mod lagrange;
pub mod opening;
pub mod parallel;
pub mod polys;
pub mod provider;

/// Start a span + timer, return `(Span, Instant)`.
macro_rules! start_span {
    ($name:expr $(, $($fmt:tt)+)?) => {{
        let span       = tracing::info_span!($name $(, $($fmt)+)?);
        let span_clone = span.clone();    // lives as long as the guard
        let _guard      = span_clone.enter();
        (span, std::time::Instant::now())
    }};
}
pub(crate) use start_span;

pub use domain::EvaluationDomain;
pub use errors::PolyError;
pub use lagrange::{DEFAULT_NUM_ROOTS_CUT, LagrangeEvaluations};
pub use parallel::{Executor, RayonExecutor, Sequential};
pub use polys::{
  chunked::ChunkedPolynomial,
  univariate::{Coeff, CosetLagrange, Lagrange, Polynomial},
};
