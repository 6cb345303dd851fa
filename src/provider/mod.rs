//! Concrete scalar fields the engine is exercised with.
//!
//! Any `ff::PrimeField` with a large enough two-adic subgroup works; these modules only
//! re-export the `halo2curves` fields under the aliases used across the code base.
pub mod bn254;
pub mod pasta;
