//! Pluggable physical-flux models and Riemann-solver dispatch.

use serde::{Deserialize, Serialize};

use crate::flux::{hll_flux, rusanov_flux, FluxError};
use crate::state::{Conserved, Direction};

/// Physical flux and signal-speed estimates for a conservation law.
///
/// The updater calls this per interface: `physical_flux` turns a cell state
/// into the directional flux vector, `signal_speeds` bounds the local
/// Riemann fan. Implementations must keep `s_l <= s_r`.
pub trait FluxModel<const N: usize>: Send + Sync {
    /// Physical flux `f(u)` in the given grid direction.
    fn physical_flux(&self, u: &Conserved<N>, dir: Direction) -> Conserved<N>;

    /// Signal-speed bounds `(s_l, s_r)` for an interface between `u_l` and
    /// `u_r` in the given direction.
    fn signal_speeds(&self, u_l: &Conserved<N>, u_r: &Conserved<N>, dir: Direction) -> (f64, f64);

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Placeholder physical model: the state is its own flux and the fan is
/// bounded by unit speeds.
///
/// Not physically meaningful; it exists so the discrete update machinery can
/// run (and be tested) before a real equation-of-state model is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityFlux;

impl<const N: usize> FluxModel<N> for IdentityFlux {
    #[inline(always)]
    fn physical_flux(&self, u: &Conserved<N>, _dir: Direction) -> Conserved<N> {
        *u
    }

    #[inline(always)]
    fn signal_speeds(&self, _u_l: &Conserved<N>, _u_r: &Conserved<N>, _dir: Direction) -> (f64, f64) {
        (-1.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Riemann solver selection for the updater.
///
/// Dispatch is by enum match, so the choice is runtime-configurable at zero
/// per-interface cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiemannSolverKind {
    /// HLL two-wave solver.
    #[default]
    Hll,
    /// Rusanov / local Lax-Friedrichs.
    Rusanov,
}

impl RiemannSolverKind {
    /// Compute the interface flux with the selected solver.
    #[inline]
    pub fn flux<const N: usize>(
        self,
        u_l: &Conserved<N>,
        u_r: &Conserved<N>,
        f_l: &Conserved<N>,
        f_r: &Conserved<N>,
        s_l: f64,
        s_r: f64,
    ) -> Result<Conserved<N>, FluxError> {
        match self {
            RiemannSolverKind::Hll => hll_flux(u_l, u_r, f_l, f_r, s_l, s_r),
            RiemannSolverKind::Rusanov => Ok(rusanov_flux(u_l, u_r, f_l, f_r, s_l, s_r)),
        }
    }

    /// Solver name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            RiemannSolverKind::Hll => "hll",
            RiemannSolverKind::Rusanov => "rusanov",
        }
    }
}
