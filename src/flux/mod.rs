//! Numerical flux functions and the physical-flux model seam.
//!
//! Provides approximate Riemann solvers over fixed-size conserved-variable
//! vectors:
//! - [`hll_flux`]: HLL two-wave solver (the default)
//! - [`rusanov_flux`]: local Lax-Friedrichs, simpler and more diffusive
//!
//! The physical flux `f(u)` and the signal-speed estimates come from a
//! [`FluxModel`], so a real equation-of-state/eigenvalue model can replace
//! the identity stub without touching the solvers or the updater.

mod hll;
mod model;
mod rusanov;

pub use hll::hll_flux;
pub use model::{FluxModel, IdentityFlux, RiemannSolverKind};
pub use rusanov::rusanov_flux;

use thiserror::Error;

/// Error type for numerical flux evaluation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum FluxError {
    /// The HLL denominator `s_r - s_l` vanishes (or is not finite) in the
    /// transonic branch.
    #[error("degenerate wave speeds s_l = {s_l}, s_r = {s_r}: HLL denominator vanishes")]
    DegenerateWaveSpeeds {
        /// Left signal-speed estimate.
        s_l: f64,
        /// Right signal-speed estimate.
        s_r: f64,
    },
}
