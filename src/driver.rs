use crate::constants::ENERGY_REPORT_INTERVAL;
use crate::convergence::ConvergenceTracker;
use crate::engine::LatticeEngine;
use crate::error::{LbError, LbResult};
use colored::*;

/// Lattice refinement level; finer levels get fewer iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementLevel {
    Coarse = 1,
    Medium = 2,
    Fine = 3,
}

impl TryFrom<i64> for RefinementLevel {
    type Error = LbError;

    fn try_from(value: i64) -> LbResult<Self> {
        match value {
            1 => Ok(RefinementLevel::Coarse),
            2 => Ok(RefinementLevel::Medium),
            3 => Ok(RefinementLevel::Fine),
            _ => Err(LbError::InvalidRefinementLevel(value)),
        }
    }
}

impl RefinementLevel {
    pub fn get_max_iterations(&self) -> usize {
        match self {
            RefinementLevel::Coarse => 100_000,
            RefinementLevel::Medium => 25_000,
            RefinementLevel::Fine => 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOutcome {
    /// Number of completed collide-and-stream steps.
    pub iterations: usize,
    pub converged: bool,
}

/// Advances `engine` until the tracked energy settles or `max_iterations`
/// steps have been run.
pub fn run<E>(
    engine: &mut E,
    tracker: &mut ConvergenceTracker,
    max_iterations: usize,
) -> SimulationOutcome
where
    E: LatticeEngine + ?Sized,
{
    log::info!(
        "Simulation begins (at most {} iterations).",
        max_iterations.to_string().yellow().bold()
    );
    let mut iterations = 0;
    while iterations < max_iterations {
        engine.collide_and_stream();
        iterations += 1;
        let energy = engine.average_energy();
        tracker.take_value(energy);
        if iterations % ENERGY_REPORT_INTERVAL == 0 {
            log::info!("Iteration {iterations:>8}: average energy {energy:.8e}");
        }
        if tracker.has_converged() {
            break;
        }
    }
    let converged = tracker.has_converged();
    if converged {
        log::info!(
            "Converged after {} iterations.",
            iterations.to_string().green().bold()
        );
    } else {
        log::warn!(
            "Iteration cap of {} reached before convergence.",
            max_iterations.to_string().red().bold()
        );
    }
    SimulationOutcome {
        iterations,
        converged,
    }
}
