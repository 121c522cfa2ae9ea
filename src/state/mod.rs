//! Conserved-state storage for finite-volume solvers.
//!
//! Two containers make up the data model:
//! - [`Conserved`]: a fixed-size vector of conserved variables at one cell
//!   or interface, with elementwise arithmetic
//! - [`Field`]: the conserved state over the whole grid at one instant,
//!   stored contiguously with layout `[nr, nphi]`
//!
//! The number of conserved components is a const generic `N`. The reference
//! configuration uses `N = 5`: density, radial and azimuthal momentum, and
//! radial and azimuthal magnetic field.

mod init;

pub use init::{InitialCondition, PerturbedDisc, Uniform};

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub, SubAssign};

/// Grid direction for directional sweeps and flux evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Radial direction (index i).
    Radial,
    /// Azimuthal direction (index j).
    Azimuthal,
}

/// Number of conserved components in the reference configuration.
pub const NVAR: usize = 5;

/// Conserved variable vector at a single cell or interface.
///
/// All arithmetic is elementwise in double precision. `Conserved` is `Copy`
/// and has no heap storage, so interface fluxes are transient values with no
/// persistent identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conserved<const N: usize>(pub [f64; N]);

impl<const N: usize> Conserved<N> {
    /// Create a state from component values.
    #[inline(always)]
    pub fn new(components: [f64; N]) -> Self {
        Self(components)
    }

    /// Create a zero state.
    #[inline(always)]
    pub fn zero() -> Self {
        Self([0.0; N])
    }

    /// Components as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Whether every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Index of the first non-finite component, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.0.iter().position(|v| !v.is_finite())
    }
}

impl<const N: usize> Default for Conserved<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Index<usize> for Conserved<N> {
    type Output = f64;

    #[inline(always)]
    fn index(&self, k: usize) -> &f64 {
        &self.0[k]
    }
}

impl<const N: usize> IndexMut<usize> for Conserved<N> {
    #[inline(always)]
    fn index_mut(&mut self, k: usize) -> &mut f64 {
        &mut self.0[k]
    }
}

impl<const N: usize> Add for Conserved<N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for k in 0..N {
            out.0[k] += rhs.0[k];
        }
        out
    }
}

impl<const N: usize> Sub for Conserved<N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for k in 0..N {
            out.0[k] -= rhs.0[k];
        }
        out
    }
}

impl<const N: usize> Mul<f64> for Conserved<N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, c: f64) -> Self {
        let mut out = self;
        for k in 0..N {
            out.0[k] *= c;
        }
        out
    }
}

impl<const N: usize> AddAssign for Conserved<N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        for k in 0..N {
            self.0[k] += rhs.0[k];
        }
    }
}

impl<const N: usize> SubAssign for Conserved<N> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        for k in 0..N {
            self.0[k] -= rhs.0[k];
        }
    }
}

/// Named accessors for the reference five-variable configuration.
impl Conserved<NVAR> {
    /// Mass density rho.
    #[inline(always)]
    pub fn density(&self) -> f64 {
        self.0[0]
    }

    /// Radial momentum rho * v_r.
    #[inline(always)]
    pub fn momentum_r(&self) -> f64 {
        self.0[1]
    }

    /// Azimuthal momentum rho * v_phi.
    #[inline(always)]
    pub fn momentum_phi(&self) -> f64 {
        self.0[2]
    }

    /// Radial magnetic field B_r.
    #[inline(always)]
    pub fn b_r(&self) -> f64 {
        self.0[3]
    }

    /// Azimuthal magnetic field B_phi.
    #[inline(always)]
    pub fn b_phi(&self) -> f64 {
        self.0[4]
    }
}

/// Conserved state over the whole grid at one instant.
///
/// Cells are stored row-major: cell `(i, j)` lives at `i * nphi + j`. The
/// shape is fixed for the lifetime of a run; the updater returns a new
/// `Field` rather than mutating in place, so a sweep never reads
/// partially-updated state.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<const N: usize> {
    data: Vec<Conserved<N>>,
    nr: usize,
    nphi: usize,
}

impl<const N: usize> Field<N> {
    /// Create a zero-initialized field of shape `(nr, nphi)`.
    pub fn zeros(nr: usize, nphi: usize) -> Self {
        Self {
            data: vec![Conserved::zero(); nr * nphi],
            nr,
            nphi,
        }
    }

    /// Create a field by evaluating `f(i, j)` at every cell.
    pub fn from_fn<F>(nr: usize, nphi: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Conserved<N>,
    {
        let mut field = Self::zeros(nr, nphi);
        for i in 0..nr {
            for j in 0..nphi {
                field.set(i, j, f(i, j));
            }
        }
        field
    }

    /// Number of radial cells.
    #[inline(always)]
    pub fn nr(&self) -> usize {
        self.nr
    }

    /// Number of azimuthal cells.
    #[inline(always)]
    pub fn nphi(&self) -> usize {
        self.nphi
    }

    /// Shape as `(nr, nphi)`.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.nr, self.nphi)
    }

    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nr && j < self.nphi);
        i * self.nphi + j
    }

    /// State at cell `(i, j)`.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> Conserved<N> {
        self.data[self.idx(i, j)]
    }

    /// Mutable state at cell `(i, j)`.
    #[inline(always)]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut Conserved<N> {
        let idx = self.idx(i, j);
        &mut self.data[idx]
    }

    /// Set the state at cell `(i, j)`.
    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: Conserved<N>) {
        let idx = self.idx(i, j);
        self.data[idx] = value;
    }

    /// Iterate over all cell states in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Conserved<N>> {
        self.data.iter()
    }

    /// Sum of component `k` over all cells.
    ///
    /// Under the flux-difference update with no-flux boundaries this total
    /// is conserved to floating-point tolerance.
    pub fn component_total(&self, k: usize) -> f64 {
        self.data.iter().map(|u| u[k]).sum()
    }

    /// First cell holding a non-finite value, as `(i, j, var)`.
    ///
    /// Scans in storage order; used to locate the onset of numerical
    /// instability after a step.
    pub fn first_non_finite(&self) -> Option<(usize, usize, usize)> {
        for (idx, u) in self.data.iter().enumerate() {
            if let Some(k) = u.first_non_finite() {
                return Some((idx / self.nphi, idx % self.nphi, k));
            }
        }
        None
    }
}
