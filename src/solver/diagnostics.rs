//! Runtime diagnostics for a conserved field.
//!
//! Tracks the quantities a run reports between steps: per-component totals
//! (the discrete conservation check), value bounds, and finiteness.

use crate::state::Field;

/// Diagnostic quantities for one field snapshot.
#[derive(Clone, Debug)]
pub struct FieldDiagnostics<const N: usize> {
    /// Sum of each conserved component over all cells.
    pub totals: [f64; N],
    /// Smallest value across all cells and components.
    pub min_value: f64,
    /// Largest value across all cells and components.
    pub max_value: f64,
    /// Whether every value in the field is finite.
    pub all_finite: bool,
}

impl<const N: usize> FieldDiagnostics<N> {
    /// Compute all diagnostics for a field.
    pub fn compute(field: &Field<N>) -> Self {
        let mut totals = [0.0; N];
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        let mut all_finite = true;

        for u in field.iter() {
            for k in 0..N {
                let v = u[k];
                totals[k] += v;
                min_value = min_value.min(v);
                max_value = max_value.max(v);
                all_finite &= v.is_finite();
            }
        }

        Self {
            totals,
            min_value,
            max_value,
            all_finite,
        }
    }

    /// Largest absolute drift of any component total against a baseline.
    ///
    /// Zero (to rounding) under no-flux or periodic boundaries.
    pub fn max_total_drift(&self, baseline: &Self) -> f64 {
        self.totals
            .iter()
            .zip(baseline.totals.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
