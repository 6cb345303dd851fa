//! This module contains the polynomial representations and the slice-level algebra on them.
pub mod chunked;
pub mod dense;
pub mod univariate;
