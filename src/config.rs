//! Run configuration.
//!
//! [`RunConfig`] collects everything a run needs up front: grid extent and
//! resolution, end time, CFL number, snapshot cadence, solver and boundary
//! selection, and the liveness guards. Validation happens before the loop
//! starts and names the offending parameter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flux::RiemannSolverKind;
use crate::solver::BoundaryPolicy;

/// Error type for run configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `r_min >= r_max`.
    #[error("invalid radial extent: r_min = {r_min} must be less than r_max = {r_max}")]
    InvalidRadialExtent {
        /// Inner radius.
        r_min: f64,
        /// Outer radius.
        r_max: f64,
    },

    /// A grid axis has fewer than two zones.
    #[error("{axis} resolution must be at least 2, got {n}")]
    TooFewZones {
        /// Axis name.
        axis: &'static str,
        /// Requested zone count.
        n: usize,
    },

    /// CFL number is not positive.
    #[error("cfl must be positive, got {cfl}")]
    NonPositiveCfl {
        /// Configured value.
        cfl: f64,
    },

    /// End time is not positive.
    #[error("t_end must be positive, got {t_end}")]
    NonPositiveEndTime {
        /// Configured value.
        t_end: f64,
    },

    /// Snapshot interval is zero.
    #[error("snapshot_interval must be at least 1")]
    ZeroSnapshotInterval,

    /// The inner radius lies inside the horizon of the configured mass.
    #[error("r_min = {r_min} is inside the horizon r = 2M of mass M = {mass}")]
    InnerRadiusInsideHorizon {
        /// Inner radius.
        r_min: f64,
        /// Configured central mass.
        mass: f64,
    },
}

/// Configuration for a simulation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Inner radius of the grid.
    pub r_min: f64,
    /// Outer radius of the grid.
    pub r_max: f64,
    /// Number of radial zones.
    pub nr: usize,
    /// Number of azimuthal zones.
    pub nphi: usize,
    /// Include `r_max` / `2*pi` as the last grid sample.
    pub endpoint: bool,
    /// Simulation end time.
    pub t_end: f64,
    /// CFL number for the time-step bound.
    pub cfl: f64,
    /// Steps between snapshots.
    pub snapshot_interval: usize,
    /// Riemann solver selection.
    pub solver: RiemannSolverKind,
    /// Azimuthal boundary policy.
    pub boundary: BoundaryPolicy,
    /// Minimum time step; the run aborts if `dt` falls below this.
    pub dt_min: Option<f64>,
    /// Maximum number of steps; the run aborts past this.
    pub max_steps: Option<usize>,
    /// Central mass in geometric units, for metric-aware flux models.
    pub mass: Option<f64>,
}

impl Default for RunConfig {
    /// The reference run: the disc from `r = 2.5` to `20` on a 64 x 128
    /// grid, integrated to `t = 1` at CFL 0.4 with a snapshot every 10
    /// steps.
    fn default() -> Self {
        Self {
            r_min: 2.5,
            r_max: 20.0,
            nr: 64,
            nphi: 128,
            endpoint: true,
            t_end: 1.0,
            cfl: 0.4,
            snapshot_interval: 10,
            solver: RiemannSolverKind::default(),
            boundary: BoundaryPolicy::default(),
            dt_min: None,
            max_steps: None,
            mass: None,
        }
    }
}

impl RunConfig {
    /// Set the radial extent.
    pub fn with_extent(mut self, r_min: f64, r_max: f64) -> Self {
        self.r_min = r_min;
        self.r_max = r_max;
        self
    }

    /// Set the grid resolution.
    pub fn with_resolution(mut self, nr: usize, nphi: usize) -> Self {
        self.nr = nr;
        self.nphi = nphi;
        self
    }

    /// Set the end time.
    pub fn with_t_end(mut self, t_end: f64) -> Self {
        self.t_end = t_end;
        self
    }

    /// Set the CFL number.
    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.cfl = cfl;
        self
    }

    /// Set the snapshot cadence.
    pub fn with_snapshot_interval(mut self, every: usize) -> Self {
        self.snapshot_interval = every;
        self
    }

    /// Select the Riemann solver.
    pub fn with_solver(mut self, solver: RiemannSolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Select the azimuthal boundary policy.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the minimum time step guard.
    pub fn with_dt_min(mut self, dt_min: f64) -> Self {
        self.dt_min = Some(dt_min);
        self
    }

    /// Set the step-count cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Set the central mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Reject invalid parameters before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.r_min < self.r_max) {
            return Err(ConfigError::InvalidRadialExtent {
                r_min: self.r_min,
                r_max: self.r_max,
            });
        }
        if self.nr < 2 {
            return Err(ConfigError::TooFewZones {
                axis: "radial",
                n: self.nr,
            });
        }
        if self.nphi < 2 {
            return Err(ConfigError::TooFewZones {
                axis: "azimuthal",
                n: self.nphi,
            });
        }
        if !(self.cfl > 0.0) {
            return Err(ConfigError::NonPositiveCfl { cfl: self.cfl });
        }
        if !(self.t_end > 0.0) {
            return Err(ConfigError::NonPositiveEndTime { t_end: self.t_end });
        }
        if self.snapshot_interval == 0 {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        if let Some(mass) = self.mass {
            if self.r_min <= 2.0 * mass {
                return Err(ConfigError::InnerRadiusInsideHorizon {
                    r_min: self.r_min,
                    mass,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = RunConfig::default()
            .with_extent(3.0, 30.0)
            .with_resolution(32, 64)
            .with_t_end(2.0)
            .with_cfl(0.2)
            .with_snapshot_interval(5)
            .with_solver(RiemannSolverKind::Rusanov)
            .with_boundary(BoundaryPolicy::Periodic)
            .with_dt_min(1e-9)
            .with_max_steps(10_000)
            .with_mass(1.0);

        assert!(config.validate().is_ok());
        assert_eq!(config.nr, 32);
        assert_eq!(config.solver, RiemannSolverKind::Rusanov);
        assert_eq!(config.dt_min, Some(1e-9));
    }

    #[test]
    fn test_rejects_bad_extent() {
        let err = RunConfig::default().with_extent(5.0, 5.0).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRadialExtent { .. })));
    }

    #[test]
    fn test_rejects_bad_resolution() {
        let err = RunConfig::default().with_resolution(1, 64).validate();
        assert_eq!(
            err,
            Err(ConfigError::TooFewZones {
                axis: "radial",
                n: 1
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_cfl() {
        let err = RunConfig::default().with_cfl(0.0).validate();
        assert_eq!(err, Err(ConfigError::NonPositiveCfl { cfl: 0.0 }));

        let err = RunConfig::default().with_cfl(-0.4).validate();
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_zero_snapshot_interval() {
        let err = RunConfig::default().with_snapshot_interval(0).validate();
        assert_eq!(err, Err(ConfigError::ZeroSnapshotInterval));
    }

    #[test]
    fn test_rejects_inner_radius_inside_horizon() {
        // Default r_min = 2.5 with M = 1.25 puts the inner edge at 2M
        let err = RunConfig::default().with_mass(1.25).validate();
        assert!(matches!(
            err,
            Err(ConfigError::InnerRadiusInsideHorizon { .. })
        ));

        assert!(RunConfig::default().with_mass(1.0).validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = RunConfig::default().with_solver(RiemannSolverKind::Rusanov);
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.solver, RiemannSolverKind::Rusanov);
        assert_eq!(back.nr, config.nr);
    }
}
