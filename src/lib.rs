//! # fv-rs
//!
//! A finite-volume library for hyperbolic conservation laws on 2D polar
//! grids.
//!
//! The crate provides the discrete update machinery for an explicit
//! time-marching scheme:
//! - Conserved-state containers ([`Conserved`], [`Field`])
//! - Uniform polar grid construction ([`PolarGrid`])
//! - Approximate Riemann solvers (HLL, Rusanov) behind a pluggable
//!   physical-flux model ([`FluxModel`])
//! - The operator-split flux-difference updater ([`FluxUpdater`])
//! - A CFL-bounded time-integration driver ([`Simulation`])
//! - Snapshot persistence ([`SnapshotSink`], [`VtkSeriesSink`])
//! - Schwarzschild metric components for metric-aware models
//!
//! # Example
//!
//! ```
//! use fv_rs::{IdentityFlux, MemorySink, PerturbedDisc, RunConfig, Simulation};
//!
//! let config = RunConfig::default()
//!     .with_resolution(16, 32)
//!     .with_t_end(0.1);
//!
//! let sim = Simulation::new(config, IdentityFlux, &PerturbedDisc).unwrap();
//! let mut sink = MemorySink::new();
//! let summary = sim.run(&mut sink).unwrap();
//!
//! assert!((summary.final_time - 0.1).abs() < 1e-12);
//! assert_eq!(sink.labels()[0], "U0");
//! ```

pub mod config;
pub mod flux;
pub mod grid;
pub mod io;
pub mod metric;
pub mod solver;
pub mod state;
pub mod time;

// Re-export the main types for convenience
pub use config::{ConfigError, RunConfig};
pub use flux::{
    hll_flux, rusanov_flux, FluxError, FluxModel, IdentityFlux, RiemannSolverKind,
};
pub use grid::{GridError, PolarGrid};
pub use io::{MemorySink, SnapshotError, SnapshotSink, VtkSeriesSink};
pub use metric::{schwarzschild, MetricComponents, MetricError};
pub use solver::{BoundaryPolicy, FieldDiagnostics, FluxUpdater, UpdateError};
pub use state::{
    Conserved, Direction, Field, InitialCondition, PerturbedDisc, Uniform, NVAR,
};
pub use time::{RunSummary, Simulation, SimulationError};
