//! HLL (Harten-Lax-van Leer) approximate Riemann solver.
//!
//! The HLL solver bounds the Riemann fan with two signal speeds and blends
//! the left/right fluxes:
//!
//! F* = (s_r * f_l - s_l * f_r + s_l * s_r * (u_r - u_l)) / (s_r - s_l)
//!
//! outside the fan the upwind flux is returned unchanged.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics"

use crate::flux::FluxError;
use crate::state::Conserved;

/// HLL numerical flux between left and right states.
///
/// Precondition: `s_l <= s_r` (the model's contract).
///
/// # Arguments
/// * `u_l`, `u_r` - Conserved states on either side of the interface
/// * `f_l`, `f_r` - Physical fluxes evaluated at those states
/// * `s_l`, `s_r` - Minimum and maximum signal-speed estimates
///
/// # Errors
/// Returns [`FluxError::DegenerateWaveSpeeds`] when the transonic branch is
/// reached with a vanishing or non-finite denominator `s_r - s_l`, instead
/// of silently producing infinities.
pub fn hll_flux<const N: usize>(
    u_l: &Conserved<N>,
    u_r: &Conserved<N>,
    f_l: &Conserved<N>,
    f_r: &Conserved<N>,
    s_l: f64,
    s_r: f64,
) -> Result<Conserved<N>, FluxError> {
    // All waves move right: the interface is entirely upwind of the left state
    if s_l >= 0.0 {
        return Ok(*f_l);
    }
    // All waves move left
    if s_r <= 0.0 {
        return Ok(*f_r);
    }

    // Transonic: blend. Here s_l < 0 < s_r for finite inputs, so the
    // denominator can only vanish via non-finite speeds.
    let ds = s_r - s_l;
    if !(ds > 0.0) || !ds.is_finite() {
        return Err(FluxError::DegenerateWaveSpeeds { s_l, s_r });
    }
    let inv_ds = 1.0 / ds;

    let mut flux = Conserved::zero();
    for k in 0..N {
        flux[k] = inv_ds * (s_r * f_l[k] - s_l * f_r[k] + s_l * s_r * (u_r[k] - u_l[k]));
    }
    Ok(flux)
}
