use crate::analysis::{self, TransportMetrics};
use crate::cli;
use crate::constants::CONVERGENCE_VELOCITY_SCALE;
use crate::convergence::ConvergenceTracker;
use crate::driver::{self, SimulationOutcome};
use crate::geometry::GeometryField;
use crate::io;
use crate::momentum::{self, Lattice};
use crate::prelude::*;
use crate::setup;
use colored::*;

/// Result of a complete permeability run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub outcome: SimulationOutcome,
    pub metrics: TransportMetrics,
    pub velocity_field: VelocityField,
}

/// Sets up, drives and analyses `engine` for the flow described by `config`.
pub fn simulate<E>(engine: &mut E, config: &Config, geometry: &GeometryField) -> LbResult<Report>
where
    E: LatticeEngine + ?Sized,
{
    setup::configure(engine, config.axis, config.delta_p, geometry)?;

    let mut tracker = ConvergenceTracker::new(
        CONVERGENCE_VELOCITY_SCALE,
        config.window_size,
        config.tolerance,
    );
    let outcome = driver::run(engine, &mut tracker, config.get_max_iterations());

    let velocity_field = engine.velocity_field();
    let metrics = analysis::compute_permeability(
        &velocity_field,
        config.collision_operator.get_viscosity(),
        config.delta_p,
        config.axis,
    )?;
    Ok(Report {
        outcome,
        metrics,
        velocity_field,
    })
}

pub fn run(config: &Config) -> LbResult<Report> {
    log::info!(
        "Flow along {} with pressure drop {} on a {}x{}x{} domain.",
        config.axis.to_string().yellow().bold(),
        config.delta_p.to_string().yellow().bold(),
        config.extent.nx,
        config.extent.ny,
        config.extent.nz
    );
    let geometry = io::read_geometry(&config.geometry_path, config.extent)?;
    io::create_output_directory(&config.output_directory)?;

    let mut lattice = Lattice::new(momentum::Parameters {
        extent: config.extent,
        collision_operator: config.collision_operator,
        velocity_set: config.velocity_set,
        periodic: config.get_periodic(),
    });
    let report = simulate(&mut lattice, config, &geometry)?;

    println!("{}", report.metrics);
    log::info!(
        "Permeability {} and tortuosity {}.",
        format!("{:.6e}", report.metrics.permeability).green().bold(),
        format!("{:.6}", report.metrics.tortuosity).green().bold()
    );

    let iteration = report.outcome.iterations;
    io::write_vtk(
        &config.output_directory,
        &config.file_stem,
        iteration,
        &report.velocity_field,
    )?;
    io::write_velocity_dump(
        &config.output_directory,
        &config.file_stem,
        iteration,
        &report.velocity_field,
    )?;
    log::info!("End of the simulation at iteration {}.", iteration.to_string().yellow().bold());
    Ok(report)
}

/// Command-line entry point: any error is printed and ends the process with status 1.
pub fn load() {
    let config = match cli::parse_matches(&cli::get_args()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::init_global_pool(config.get_number_of_threads(), config.core_affinity) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RefinementLevel;
    use crate::engine::testing::{EngineCall, RecordingEngine};
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    fn config(extent: DomainExtent) -> Config {
        Config {
            geometry_path: PathBuf::from("geometry.dat"),
            output_directory: PathBuf::from("out"),
            file_stem: "test".to_string(),
            extent,
            delta_p: 0.01,
            axis: FlowAxis::X,
            transverse_periodic: false,
            refinement_level: RefinementLevel::Fine,
            number_of_threads: NonZeroUsize::MIN,
            core_affinity: false,
            collision_operator: CollisionOperator::default(),
            velocity_set: D3Q19,
            tolerance: 1e-4,
            window_size: 100.0,
        }
    }

    #[test]
    fn test_simulate_surfaces_degenerate_flow() {
        let extent = DomainExtent::new(4, 4, 4).unwrap();
        let mut engine = RecordingEngine::new(extent);
        let geometry = GeometryField::uniform(extent, 0);

        let result = simulate(&mut engine, &config(extent), &geometry);

        assert!(matches!(result, Err(LbError::DegenerateResult { .. })));
        assert_eq!(engine.calls.last(), Some(&EngineCall::Initialize));
        assert_eq!(engine.steps, 100);
    }

    #[test]
    fn test_simulate_rejects_mismatched_geometry_before_stepping() {
        let extent = DomainExtent::new(4, 4, 4).unwrap();
        let mut engine = RecordingEngine::new(extent);
        let geometry = GeometryField::uniform(DomainExtent::new(4, 4, 3).unwrap(), 0);

        let result = simulate(&mut engine, &config(extent), &geometry);

        assert!(matches!(result, Err(LbError::ExtentMismatch { .. })));
        assert!(engine.calls.is_empty());
        assert_eq!(engine.steps, 0);
    }

    #[test]
    fn test_run_reports_missing_geometry() {
        let extent = DomainExtent::new(4, 4, 4).unwrap();
        let mut config = config(extent);
        config.geometry_path = PathBuf::from("/nonexistent/geometry.dat");

        assert!(matches!(run(&config), Err(LbError::Io(_))));
    }
}
