//! Finite-volume update machinery.
//!
//! - [`FluxUpdater`]: applies the Riemann solver across every interface in
//!   both grid directions and accumulates the flux-difference update
//! - [`FieldDiagnostics`]: conservation totals and bounds for a field

mod diagnostics;
mod update;

pub use diagnostics::FieldDiagnostics;
pub use update::{BoundaryPolicy, FluxUpdater, UpdateError};
