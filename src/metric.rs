//! Schwarzschild metric components in the equatorial plane.
//!
//! Diagonal components in geometric units (G = c = 1), coordinates
//! `(t, r, phi)` at `theta = pi/2`. A physical-flux model wired through
//! [`crate::flux::FluxModel`] consumes these when computing relativistic
//! fluxes and characteristic speeds.

use thiserror::Error;

/// Error type for metric evaluation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MetricError {
    /// Radius at or inside the event horizon, where `g_rr` diverges.
    #[error("radius r = {r} is at or inside the horizon r = 2M (M = {mass})")]
    InsideHorizon {
        /// Radial coordinate.
        r: f64,
        /// Black hole mass.
        mass: f64,
    },
}

/// Diagonal Schwarzschild metric components at one radius.
///
/// All three components are always present; consumers rely on the full set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricComponents {
    /// Time-time component `g_tt = -(1 - 2M/r)`.
    pub g_tt: f64,
    /// Radial component `g_rr = 1 / (1 - 2M/r)`.
    pub g_rr: f64,
    /// Azimuthal component `g_phiphi = r^2`.
    pub g_phiphi: f64,
}

/// Evaluate the Schwarzschild metric at radius `r` for mass `mass`.
///
/// The domain precondition `r > 2M` is enforced; at or inside the horizon
/// `g_rr` diverges and the evaluation is rejected.
pub fn schwarzschild(r: f64, mass: f64) -> Result<MetricComponents, MetricError> {
    if r <= 2.0 * mass {
        return Err(MetricError::InsideHorizon { r, mass });
    }

    let f = 1.0 - 2.0 * mass / r;
    Ok(MetricComponents {
        g_tt: -f,
        g_rr: 1.0 / f,
        g_phiphi: r * r,
    })
}
