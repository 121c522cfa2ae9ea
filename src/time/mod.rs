//! Time integration driver.
//!
//! [`Simulation`] owns the grid, the field, and the clock for one run and
//! drives the step loop. Its lifecycle has three phases:
//! - *initialized*: constructed from a validated [`RunConfig`], grid built,
//!   initial field populated
//! - *running*: [`Simulation::run`] emits the `U0` snapshot, then loops:
//!   CFL-bounded `dt` (clamped so the final step lands exactly on `t_end`),
//!   one flux-difference update, clock advance, periodic snapshots
//! - *finished*: the loop exits at `t >= t_end` and the sink is closed; the
//!   sink is also closed on every error path
//!
//! The time step is the diffusion-style bound `dt = cfl * min(dr, dphi)`.
//! It deliberately ignores local wave speeds; a wave-speed-aware bound
//! belongs in the [`FluxModel`] seam when a real physical model is wired in.
//!
//! There are no retries: numerical time integration is not safe to retry
//! after a failed step. Any failure aborts the run with step and cell
//! context; the correct recovery is a fresh run with adjusted parameters.

use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, RunConfig};
use crate::flux::FluxModel;
use crate::grid::{GridError, PolarGrid};
use crate::io::{SnapshotError, SnapshotSink};
use crate::solver::{FieldDiagnostics, FluxUpdater, UpdateError};
use crate::state::{Field, InitialCondition};

/// Error type for a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Grid construction failed.
    #[error("grid construction failed: {0}")]
    Grid(#[from] GridError),

    /// The flux-difference update failed.
    #[error("update failed at step {step} (t = {time}): {source}")]
    Update {
        /// Step being computed when the failure occurred.
        step: usize,
        /// Simulation time at the start of the step.
        time: f64,
        /// Underlying update error.
        #[source]
        source: UpdateError,
    },

    /// A non-finite value appeared in the field after a step.
    ///
    /// The primary diagnostic for numerical instability, e.g. a CFL
    /// violation.
    #[error(
        "non-finite value at step {step} (t = {time}), cell ({i}, {j}), variable {var}"
    )]
    NonFinite {
        /// Completed step count.
        step: usize,
        /// Simulation time after the step.
        time: f64,
        /// Radial cell index.
        i: usize,
        /// Azimuthal cell index.
        j: usize,
        /// Conserved-variable index.
        var: usize,
    },

    /// The CFL time step is below the configured floor.
    #[error("time step {dt} is below the floor {dt_min}")]
    TimeStepUnderflow {
        /// Computed step size.
        dt: f64,
        /// Configured floor.
        dt_min: f64,
    },

    /// The step cap was reached before `t_end`.
    #[error("step limit {max_steps} reached at t = {time} before t_end = {t_end}")]
    StepLimitReached {
        /// Configured cap.
        max_steps: usize,
        /// Simulation time when the cap was hit.
        time: f64,
        /// Configured end time.
        t_end: f64,
    },

    /// Snapshot persistence failed.
    #[error("snapshot write failed: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result of a completed run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    /// Final simulation time reached.
    pub final_time: f64,
    /// Total number of steps taken.
    pub n_steps: usize,
    /// Smallest step size used.
    pub dt_min: f64,
    /// Largest step size used.
    pub dt_max: f64,
    /// Number of snapshots written, including `U0`.
    pub snapshots_written: usize,
}

/// Time-marching driver for one run.
///
/// Owns the field exclusively for the run's duration; each step consumes
/// the previous field and installs the updater's new one.
#[derive(Debug)]
pub struct Simulation<M, const N: usize> {
    config: RunConfig,
    grid: PolarGrid,
    updater: FluxUpdater<M, N>,
    field: Field<N>,
    t: f64,
    step_num: usize,
}

impl<M, const N: usize> Simulation<M, N>
where
    M: FluxModel<N>,
{
    /// Validate the configuration, build the grid, and populate the
    /// initial field.
    pub fn new<IC>(config: RunConfig, model: M, initial: &IC) -> Result<Self, SimulationError>
    where
        IC: InitialCondition<N>,
    {
        config.validate()?;
        let grid = PolarGrid::build(
            config.r_min,
            config.r_max,
            config.nr,
            config.nphi,
            config.endpoint,
        )?;
        let field = Field::from_initial_condition(&grid, initial);
        let updater = FluxUpdater::new(model)
            .with_solver(config.solver)
            .with_boundary(config.boundary);

        Ok(Self {
            config,
            grid,
            updater,
            field,
            t: 0.0,
            step_num: 0,
        })
    }

    /// The grid this run integrates on.
    pub fn grid(&self) -> &PolarGrid {
        &self.grid
    }

    /// The current field.
    pub fn field(&self) -> &Field<N> {
        &self.field
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Completed step count.
    pub fn step_num(&self) -> usize {
        self.step_num
    }

    /// Run to `t_end`, emitting snapshots into `sink`.
    ///
    /// The sink is closed on every exit path. If the run itself fails, the
    /// run error wins and a secondary close failure is only logged.
    pub fn run<S>(mut self, sink: &mut S) -> Result<RunSummary, SimulationError>
    where
        S: SnapshotSink<N>,
    {
        let result = self.run_loop(sink);
        let closed = sink.finish();
        match (result, closed) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!("snapshot sink close failed after run error: {close_err}");
                }
                Err(e)
            }
        }
    }

    fn run_loop<S>(&mut self, sink: &mut S) -> Result<RunSummary, SimulationError>
    where
        S: SnapshotSink<N>,
    {
        info!(
            "starting run: {}x{} grid, solver {}, model {}, t_end {}",
            self.grid.nr(),
            self.grid.nphi(),
            self.updater.solver().name(),
            self.updater.model().name(),
            self.config.t_end,
        );

        sink.write("U0", self.t, &self.field)?;
        let mut snapshots_written = 1;

        // The CFL bound is grid-only, so the nominal step is constant for
        // the whole run; only the landing step shrinks.
        let dt_nominal = self.config.cfl * self.grid.min_spacing();
        if let Some(dt_min) = self.config.dt_min {
            if dt_nominal < dt_min {
                return Err(SimulationError::TimeStepUnderflow {
                    dt: dt_nominal,
                    dt_min,
                });
            }
        }

        let t_end = self.config.t_end;
        let mut dt_min_used = f64::INFINITY;
        let mut dt_max_used: f64 = 0.0;

        while self.t < t_end {
            if let Some(max_steps) = self.config.max_steps {
                if self.step_num >= max_steps {
                    return Err(SimulationError::StepLimitReached {
                        max_steps,
                        time: self.t,
                        t_end,
                    });
                }
            }

            // Land exactly on t_end
            let mut dt = dt_nominal;
            if self.t + dt > t_end {
                dt = t_end - self.t;
            }

            self.field = self
                .updater
                .advance(&self.field, &self.grid, dt)
                .map_err(|source| SimulationError::Update {
                    step: self.step_num + 1,
                    time: self.t,
                    source,
                })?;
            self.t += dt;
            self.step_num += 1;

            if let Some((i, j, var)) = self.field.first_non_finite() {
                return Err(SimulationError::NonFinite {
                    step: self.step_num,
                    time: self.t,
                    i,
                    j,
                    var,
                });
            }

            dt_min_used = dt_min_used.min(dt);
            dt_max_used = dt_max_used.max(dt);

            if self.step_num % self.config.snapshot_interval == 0 {
                let label = format!("U{}", self.step_num);
                let diag = FieldDiagnostics::compute(&self.field);
                info!(
                    "snapshot {label} at t = {:.6}, field range [{:.3e}, {:.3e}]",
                    self.t, diag.min_value, diag.max_value
                );
                sink.write(&label, self.t, &self.field)?;
                snapshots_written += 1;
            }
        }

        info!(
            "run finished: {} steps to t = {:.6}, {} snapshots",
            self.step_num, self.t, snapshots_written
        );

        Ok(RunSummary {
            final_time: self.t,
            n_steps: self.step_num,
            dt_min: dt_min_used,
            dt_max: dt_max_used,
            snapshots_written,
        })
    }
}
