//! Rusanov (local Lax-Friedrichs) flux.
//!
//! Uses the single fastest wave speed instead of the HLL fan bounds:
//!
//! F* = (f_l + f_r) / 2 - a * (u_r - u_l) / 2,  a = max(|s_l|, |s_r|)
//!
//! More diffusive than HLL but never degenerate.

use crate::state::Conserved;

/// Rusanov numerical flux between left and right states.
///
/// Takes the same inputs as [`crate::flux::hll_flux`] for interchangeable
/// dispatch; only the magnitudes of the speed estimates are used.
pub fn rusanov_flux<const N: usize>(
    u_l: &Conserved<N>,
    u_r: &Conserved<N>,
    f_l: &Conserved<N>,
    f_r: &Conserved<N>,
    s_l: f64,
    s_r: f64,
) -> Conserved<N> {
    let a = s_l.abs().max(s_r.abs());

    let mut flux = Conserved::zero();
    for k in 0..N {
        flux[k] = 0.5 * (f_l[k] + f_r[k]) - 0.5 * a * (u_r[k] - u_l[k]);
    }
    flux
}
