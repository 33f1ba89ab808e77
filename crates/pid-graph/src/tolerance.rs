//! Tolerance bundle shared by every geometric predicate in the engine.
//!
//! Purpose
//! - Centralize the epsilons used for degeneracy and boundary-containment
//!   tests so callers can tune them without threading magic numbers through
//!   every function (spec.md §9 "Floating tolerance").
//!
//! Defaults
//! - `eps_sq`: squared-length degeneracy threshold (segments/vectors treated
//!   as zero-length below this).
//! - `eps_len`: length-scale degeneracy threshold.
//! - `boundary_tol_frac`: fraction of a shape's bounding extent used as the
//!   boundary-containment tolerance for the "boundary contact" invariant.

/// Tolerance bundle (spec.md §9). Centralizes epsilons for degeneracy and
/// boundary-containment tests.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub eps_sq: f64,
    pub eps_len: f64,
    pub boundary_tol_frac: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            eps_sq: 1e-9,
            eps_len: 1e-6,
            boundary_tol_frac: 1e-4,
        }
    }
}
