// ------------------------------------------------------------------------------- MODULES

pub mod bc;
mod lattice;
mod node;

// ------------------------------------------------------------------------------- IMPORTS

use crate::axis::DomainExtent;
use crate::prelude_crate::*;
pub use lattice::Lattice;
pub use node::Node;

// ------------------------------------------------------------- ENUM: CollisionOperator

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOperator {
    /// Single relaxation time `tau`.
    BGK(Float),
    /// Symmetric and antisymmetric relaxation frequencies.
    TRT(Float, Float),
    /// Multiple relaxation time in moment space; `tau` sets the viscous rates.
    MRT(Float),
}

impl CollisionOperator {
    pub fn bgk(tau: Float) -> Self {
        CollisionOperator::BGK(tau)
    }

    /// TRT with the antisymmetric rate fixed by the magic parameter.
    pub fn trt(tau: Float) -> Self {
        let omega_plus = DELTA_T / tau;
        let tau_minus = TRT_MAGIC / (tau / DELTA_T - 0.5) + 0.5;
        let omega_minus = 1.0 / tau_minus;
        CollisionOperator::TRT(omega_plus, omega_minus)
    }

    pub fn mrt(tau: Float) -> Self {
        CollisionOperator::MRT(tau)
    }

    pub fn get_tau(&self) -> Float {
        match self {
            CollisionOperator::BGK(tau) | CollisionOperator::MRT(tau) => *tau,
            CollisionOperator::TRT(omega_plus, _) => DELTA_T / omega_plus,
        }
    }

    pub fn get_viscosity(&self) -> Float {
        lattice_viscosity(self.get_tau())
    }
}

impl Default for CollisionOperator {
    fn default() -> Self {
        CollisionOperator::BGK(DEFAULT_TAU)
    }
}

impl std::fmt::Display for CollisionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionOperator::BGK(tau) => write!(f, "BGK (tau = {tau})"),
            CollisionOperator::TRT(omega_plus, omega_minus) => {
                write!(f, "TRT (omega+ = {omega_plus}, omega- = {omega_minus})")
            }
            CollisionOperator::MRT(tau) => write!(f, "MRT (tau = {tau})"),
        }
    }
}

// -------------------------------------------------------------------- STRUCT: Parameters

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub extent: DomainExtent,
    pub collision_operator: CollisionOperator,
    pub velocity_set: VelocitySet,
    /// Periodic wrap-around per dimension; non-periodic faces without a pressure
    /// boundary become no-slip walls.
    pub periodic: [bool; 3],
}

impl Parameters {
    #[cfg(test)]
    pub(crate) fn test_default(n: [usize; 3]) -> Self {
        Parameters {
            extent: DomainExtent::new(n[0], n[1], n[2]).unwrap(),
            collision_operator: CollisionOperator::default(),
            velocity_set: VelocitySet::D3Q19,
            periodic: [false; 3],
        }
    }
}
