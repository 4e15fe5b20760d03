pub type Float = f64;

pub const DELTA_T: Float = 1.0;

pub const DELTA_X: Float = 1.0;

pub const LATTICE_DENSITY: Float = 1.0;

pub const CS_2: Float = 1.0 / 3.0 * DELTA_X * DELTA_X / DELTA_T / DELTA_T;

pub const CS_2_INV: Float = 3.0;

pub const CS_4_INV: Float = 9.0;

/// TRT magic parameter giving viscosity-independent wall location.
pub const TRT_MAGIC: Float = 0.25;

pub const DEFAULT_TAU: Float = 1.0;

pub const CONVERGENCE_VELOCITY_SCALE: Float = 1.0;

pub const CONVERGENCE_WINDOW_SIZE: Float = 1000.0;

pub const CONVERGENCE_TOLERANCE: Float = 1e-4;

/// Ratio between the long and the short averaging windows of the convergence tracker.
pub const SHORT_WINDOW_RATIO: usize = 10;

pub(crate) const ENERGY_REPORT_INTERVAL: usize = 1000;

/// Lattice kinematic viscosity of a relaxation time `tau`.
pub fn lattice_viscosity(tau: Float) -> Float {
    CS_2 * (tau - 0.5 * DELTA_T)
}
