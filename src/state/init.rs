//! Initial-condition profiles.
//!
//! An [`InitialCondition`] maps cell-center coordinates to a conserved
//! state; [`Field::from_initial_condition`] evaluates it over a grid.

use crate::grid::PolarGrid;
use crate::state::{Conserved, Field, NVAR};

/// Initial conserved state as a function of cell-center coordinates.
pub trait InitialCondition<const N: usize> {
    /// State at cell center `(r, phi)`.
    fn state(&self, r: f64, phi: f64) -> Conserved<N>;
}

/// Spatially uniform state.
///
/// Every interface sees identical left/right states, so the consistent
/// flux `F(u, u) = f(u)` is the same everywhere and interior flux
/// differences cancel. The zero state is exactly steady for any model
/// with `f(0) = 0`.
#[derive(Clone, Copy, Debug)]
pub struct Uniform<const N: usize>(pub Conserved<N>);

impl<const N: usize> InitialCondition<N> for Uniform<N> {
    fn state(&self, _r: f64, _phi: f64) -> Conserved<N> {
        self.0
    }
}

/// Reference disc profile: uniform density with a small sinusoidal radial
/// velocity perturbation and a weak radial field.
///
/// `U = [rho, rho*v_r, rho*v_phi, B_r, B_phi]`
///   `= [1, 0.01*sin(phi), 0, 0.001, 0]`
#[derive(Clone, Copy, Debug, Default)]
pub struct PerturbedDisc;

impl InitialCondition<NVAR> for PerturbedDisc {
    fn state(&self, _r: f64, phi: f64) -> Conserved<NVAR> {
        Conserved::new([1.0, 0.01 * phi.sin(), 0.0, 0.001, 0.0])
    }
}

impl<const N: usize> Field<N> {
    /// Populate the `t = 0` field by evaluating an initial condition at
    /// every cell center of the grid.
    pub fn from_initial_condition<IC>(grid: &PolarGrid, ic: &IC) -> Self
    where
        IC: InitialCondition<N>,
    {
        Field::from_fn(grid.nr(), grid.nphi(), |i, j| {
            ic.state(grid.radius(i), grid.azimuth(j))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_uniform_profile() {
        let ic = Uniform(Conserved::new([2.0, 1.0]));
        let u = ic.state(5.0, 1.0);
        assert_eq!(u, Conserved::new([2.0, 1.0]));
    }

    #[test]
    fn test_perturbed_disc_values() {
        let ic = PerturbedDisc;

        let u = ic.state(10.0, 0.0);
        assert!((u.density() - 1.0).abs() < TOL);
        assert!(u.momentum_r().abs() < TOL);
        assert!((u.b_r() - 0.001).abs() < TOL);
        assert!(u.b_phi().abs() < TOL);

        let quarter = ic.state(10.0, std::f64::consts::FRAC_PI_2);
        assert!((quarter.momentum_r() - 0.01).abs() < TOL);
    }

    #[test]
    fn test_field_from_initial_condition() {
        let grid = PolarGrid::build(1.0, 2.0, 4, 8, true).unwrap();
        let field = Field::from_initial_condition(&grid, &PerturbedDisc);

        assert_eq!(field.shape(), (4, 8));
        for i in 0..4 {
            for j in 0..8 {
                let expected = 0.01 * grid.azimuth(j).sin();
                assert!((field.get(i, j).momentum_r() - expected).abs() < TOL);
            }
        }
    }
}
