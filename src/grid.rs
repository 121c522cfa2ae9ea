//! 2D polar grid construction.
//!
//! A [`PolarGrid`] is a uniform structured mesh in `(r, phi)`: radius spans
//! `[r_min, r_max]` and azimuth spans `[0, 2*pi)`. Cell-center coordinates
//! and the two scalar spacings are fixed at construction and shared
//! read-only by the flux updater and any physical-flux model.

use std::f64::consts::TAU;

use thiserror::Error;

/// Error type for grid construction.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    /// An axis has fewer than two zones.
    #[error("{axis} axis needs at least 2 zones, got {n}")]
    TooFewZones {
        /// Axis name ("radial" or "azimuthal").
        axis: &'static str,
        /// Requested zone count.
        n: usize,
    },

    /// The radial extent is empty or inverted.
    #[error("empty radial extent: r_min = {r_min} must be less than r_max = {r_max}")]
    EmptyExtent {
        /// Inner radius.
        r_min: f64,
        /// Outer radius.
        r_max: f64,
    },
}

/// Uniform 2D polar grid.
///
/// When `endpoint` is true the last radial sample coincides with `r_max`
/// (and the last azimuthal sample with `2*pi`) and the spacing divisor is
/// `n - 1`; otherwise the divisor is `n` and the endpoint is excluded.
#[derive(Clone, Debug)]
pub struct PolarGrid {
    r: Vec<f64>,
    phi: Vec<f64>,
    dr: f64,
    dphi: f64,
    endpoint: bool,
}

impl PolarGrid {
    /// Build a uniform polar grid.
    ///
    /// # Arguments
    /// * `r_min` - Inner radius
    /// * `r_max` - Outer radius
    /// * `nr` - Number of radial zones (>= 2)
    /// * `nphi` - Number of azimuthal zones (>= 2)
    /// * `endpoint` - Include `r_max` / `2*pi` as the last sample
    pub fn build(
        r_min: f64,
        r_max: f64,
        nr: usize,
        nphi: usize,
        endpoint: bool,
    ) -> Result<Self, GridError> {
        if nr < 2 {
            return Err(GridError::TooFewZones { axis: "radial", n: nr });
        }
        if nphi < 2 {
            return Err(GridError::TooFewZones {
                axis: "azimuthal",
                n: nphi,
            });
        }
        if !(r_min < r_max) {
            return Err(GridError::EmptyExtent { r_min, r_max });
        }

        let divisor = |n: usize| if endpoint { (n - 1) as f64 } else { n as f64 };
        let dr = (r_max - r_min) / divisor(nr);
        let dphi = TAU / divisor(nphi);

        let r = (0..nr).map(|i| r_min + i as f64 * dr).collect();
        let phi = (0..nphi).map(|j| j as f64 * dphi).collect();

        Ok(Self {
            r,
            phi,
            dr,
            dphi,
            endpoint,
        })
    }

    /// Number of radial zones.
    #[inline(always)]
    pub fn nr(&self) -> usize {
        self.r.len()
    }

    /// Number of azimuthal zones.
    #[inline(always)]
    pub fn nphi(&self) -> usize {
        self.phi.len()
    }

    /// Radial zone width.
    #[inline(always)]
    pub fn dr(&self) -> f64 {
        self.dr
    }

    /// Azimuthal zone width.
    #[inline(always)]
    pub fn dphi(&self) -> f64 {
        self.dphi
    }

    /// Whether the last sample coincides with the domain endpoint.
    pub fn has_endpoint(&self) -> bool {
        self.endpoint
    }

    /// Radius of cell `i`.
    #[inline(always)]
    pub fn radius(&self, i: usize) -> f64 {
        self.r[i]
    }

    /// Azimuth of cell `j`.
    #[inline(always)]
    pub fn azimuth(&self, j: usize) -> f64 {
        self.phi[j]
    }

    /// Radial coordinate vector.
    pub fn radii(&self) -> &[f64] {
        &self.r
    }

    /// Azimuthal coordinate vector.
    pub fn azimuths(&self) -> &[f64] {
        &self.phi
    }

    /// Smaller of the two zone widths, used by the CFL time-step bound.
    #[inline]
    pub fn min_spacing(&self) -> f64 {
        self.dr.min(self.dphi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_reference_grid_spacings() {
        let grid = PolarGrid::build(2.5, 20.0, 64, 128, true).unwrap();

        assert!((grid.dr() - (20.0 - 2.5) / 63.0).abs() < TOL);
        assert!((grid.dphi() - TAU / 127.0).abs() < TOL);
        assert_eq!(grid.nr(), 64);
        assert_eq!(grid.nphi(), 128);
    }

    #[test]
    fn test_endpoint_included() {
        let grid = PolarGrid::build(1.0, 3.0, 5, 4, true).unwrap();

        assert!((grid.radius(0) - 1.0).abs() < TOL);
        assert!((grid.radius(4) - 3.0).abs() < TOL);
        assert!((grid.azimuth(3) - TAU).abs() < TOL);
    }

    #[test]
    fn test_endpoint_excluded() {
        let grid = PolarGrid::build(1.0, 3.0, 4, 4, false).unwrap();

        assert!((grid.dr() - 0.5).abs() < TOL);
        assert!((grid.dphi() - TAU / 4.0).abs() < TOL);
        // Last samples stop short of the endpoints
        assert!((grid.radius(3) - 2.5).abs() < TOL);
        assert!((grid.azimuth(3) - 3.0 * TAU / 4.0).abs() < TOL);
    }

    #[test]
    fn test_min_spacing() {
        let grid = PolarGrid::build(2.5, 20.0, 64, 128, true).unwrap();
        assert_eq!(grid.min_spacing(), grid.dr().min(grid.dphi()));
    }

    #[test]
    fn test_rejects_too_few_zones() {
        let err = PolarGrid::build(1.0, 2.0, 1, 8, true).unwrap_err();
        assert_eq!(err, GridError::TooFewZones { axis: "radial", n: 1 });

        let err = PolarGrid::build(1.0, 2.0, 8, 1, true).unwrap_err();
        assert_eq!(
            err,
            GridError::TooFewZones {
                axis: "azimuthal",
                n: 1
            }
        );
    }

    #[test]
    fn test_rejects_empty_extent() {
        let err = PolarGrid::build(2.0, 2.0, 8, 8, true).unwrap_err();
        assert!(matches!(err, GridError::EmptyExtent { .. }));

        let err = PolarGrid::build(5.0, 2.0, 8, 8, true).unwrap_err();
        assert!(matches!(err, GridError::EmptyExtent { .. }));
    }
}
