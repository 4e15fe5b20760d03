use crate::driver::RefinementLevel;
use crate::prelude_crate::*;
use clap::{Arg, ArgAction, Command};
use core_affinity::{get_core_ids, set_for_current};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Typed run configuration assembled from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub geometry_path: PathBuf,
    pub output_directory: PathBuf,
    pub file_stem: String,
    pub extent: DomainExtent,
    pub delta_p: Float,
    pub axis: FlowAxis,
    pub transverse_periodic: bool,
    pub refinement_level: RefinementLevel,
    pub number_of_threads: NonZeroUsize,
    pub core_affinity: bool,
    pub collision_operator: CollisionOperator,
    pub velocity_set: VelocitySet,
    pub tolerance: Float,
    pub window_size: Float,
}

impl Config {
    pub fn get_number_of_threads(&self) -> usize {
        usize::from(self.number_of_threads)
    }

    pub fn get_max_iterations(&self) -> usize {
        self.refinement_level.get_max_iterations()
    }

    /// Periodic dimensions; the flow axis never wraps around.
    pub fn get_periodic(&self) -> [bool; 3] {
        let mut periodic = [false; 3];
        if self.transverse_periodic {
            self.axis
                .transverse_dimensions()
                .iter()
                .for_each(|&x| periodic[x] = true);
        }
        periodic
    }
}

/// Maps the periodicity flag: 0 walls the transverse faces, 1 makes them periodic.
pub fn parse_periodicity(flag: i64) -> LbResult<bool> {
    match flag {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(LbError::InvalidPeriodicity(flag)),
    }
}

pub fn command() -> Command {
    clap::command!()
        .about("Permeability and tortuosity of a porous sample from a pressure-driven lattice Boltzmann flow")
        .arg(
            Arg::new("geometry")
                .value_name("GEOMETRY")
                .help("Geometry file: nx*ny*nz integers, z varying fastest (0 fluid, 1 solid, 2 inert)")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output_directory")
                .value_name("OUTPUT_DIR")
                .help("Directory receiving the VTK and velocity files")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("file_stem")
                .value_name("STEM")
                .help("Stem of the output file names")
                .required(true),
        )
        .arg(
            Arg::new("nx")
                .value_name("NX")
                .help("Number of cells along x")
                .value_parser(clap::value_parser!(usize))
                .required(true),
        )
        .arg(
            Arg::new("ny")
                .value_name("NY")
                .help("Number of cells along y")
                .value_parser(clap::value_parser!(usize))
                .required(true),
        )
        .arg(
            Arg::new("nz")
                .value_name("NZ")
                .help("Number of cells along z")
                .value_parser(clap::value_parser!(usize))
                .required(true),
        )
        .arg(
            Arg::new("delta_p")
                .value_name("DELTA_P")
                .help("Pressure drop between inlet and outlet, in lattice units")
                .value_parser(clap::value_parser!(Float))
                .allow_negative_numbers(true)
                .required(true),
        )
        .arg(
            Arg::new("axis")
                .value_name("AXIS")
                .help("Flow axis: 0 (x), 1 (y) or 2 (z)")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .required(true),
        )
        .arg(
            Arg::new("periodicity")
                .value_name("PERIODIC")
                .help("1 makes the two faces parallel to the flow periodic, 0 walls them")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .required(true),
        )
        .arg(
            Arg::new("refinement_level")
                .value_name("LEVEL")
                .help("Refinement level 1, 2 or 3 (100000, 25000 or 10000 iterations at most)")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .required(true),
        )
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1)")
                .value_parser(clap::value_parser!(NonZeroUsize))
                .default_value("1"),
        )
        .arg(
            Arg::new("core_affinity")
                .long("affinity")
                .help("Pin the worker threads to the cores")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tau")
                .long("tau")
                .value_name("TAU")
                .help("Relaxation time (> 0.5)")
                .value_parser(clap::value_parser!(Float))
                .default_value("1.0"),
        )
        .arg(
            Arg::new("collision")
                .long("collision")
                .value_name("OPERATOR")
                .help("Collision operator")
                .value_parser(["bgk", "trt", "mrt"])
                .default_value("bgk"),
        )
        .arg(
            Arg::new("velocity_set")
                .long("velocity-set")
                .value_name("SET")
                .help("Lattice velocity set")
                .value_parser(["d3q19", "d3q27"])
                .default_value("d3q19"),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .value_name("EPS")
                .help("Relative tolerance of the energy convergence test")
                .value_parser(clap::value_parser!(Float))
                .default_value("1e-4"),
        )
        .arg(
            Arg::new("window")
                .long("window")
                .value_name("SIZE")
                .help("Length of the long averaging window, in iterations")
                .value_parser(clap::value_parser!(Float))
                .default_value("1000"),
        )
}

/// Parses the process arguments; a wrong argument count prints the usage and exits.
pub fn get_args() -> clap::ArgMatches {
    command().get_matches()
}

fn get_required<T>(matches: &clap::ArgMatches, id: &str) -> LbResult<T>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| LbError::Configuration(format!("missing argument '{id}'")))
}

pub fn parse_matches(matches: &clap::ArgMatches) -> LbResult<Config> {
    let geometry_path = get_required::<PathBuf>(matches, "geometry")?;
    let output_directory = get_required::<PathBuf>(matches, "output_directory")?;
    let file_stem = get_required::<String>(matches, "file_stem")?;
    let extent = DomainExtent::new(
        get_required::<usize>(matches, "nx")?,
        get_required::<usize>(matches, "ny")?,
        get_required::<usize>(matches, "nz")?,
    )?;
    let delta_p = get_required::<Float>(matches, "delta_p")?;
    if !delta_p.is_finite() || delta_p < 0.0 {
        return Err(LbError::Configuration(format!(
            "pressure drop must be a non-negative number, got {delta_p}"
        )));
    }
    let axis = FlowAxis::try_from(get_required::<i64>(matches, "axis")?)?;
    let transverse_periodic = parse_periodicity(get_required::<i64>(matches, "periodicity")?)?;
    let refinement_level =
        RefinementLevel::try_from(get_required::<i64>(matches, "refinement_level")?)?;

    let tau = get_required::<Float>(matches, "tau")?;
    if !tau.is_finite() || tau <= 0.5 {
        return Err(LbError::Configuration(format!(
            "relaxation time must be greater than 0.5, got {tau}"
        )));
    }
    let collision_operator = match get_required::<String>(matches, "collision")?.as_str() {
        "trt" => CollisionOperator::trt(tau),
        "mrt" => CollisionOperator::mrt(tau),
        _ => CollisionOperator::bgk(tau),
    };
    let velocity_set = get_required::<String>(matches, "velocity_set")?.parse::<VelocitySet>()?;
    let tolerance = get_required::<Float>(matches, "tolerance")?;
    let window_size = get_required::<Float>(matches, "window")?;
    if !(tolerance > 0.0) {
        return Err(LbError::Configuration(format!(
            "convergence tolerance must be positive, got {tolerance}"
        )));
    }
    // A window longer than the largest iteration cap can never fill.
    let max_window =
        RefinementLevel::Coarse.get_max_iterations() as Float * CONVERGENCE_VELOCITY_SCALE;
    if !window_size.is_finite() || !(1.0..=max_window).contains(&window_size) {
        return Err(LbError::Configuration(format!(
            "convergence window must lie between 1 and {max_window}, got {window_size}"
        )));
    }

    Ok(Config {
        geometry_path,
        output_directory,
        file_stem,
        extent,
        delta_p,
        axis,
        transverse_periodic,
        refinement_level,
        number_of_threads: get_required::<NonZeroUsize>(matches, "number_of_threads")?,
        core_affinity: matches.get_flag("core_affinity"),
        collision_operator,
        velocity_set,
        tolerance,
        window_size,
    })
}

pub fn init_global_pool(num_threads: usize, pin_all_cores: bool) -> LbResult<()> {
    let builder = rayon::ThreadPoolBuilder::new().num_threads(num_threads);
    let builder = if pin_all_cores {
        let cores = get_core_ids()
            .filter(|cores| !cores.is_empty())
            .ok_or_else(|| LbError::Configuration("could not list the system cores".to_string()))?;
        builder.start_handler(move |idx| {
            let core = cores[idx % cores.len()];
            let _ = set_for_current(core);
        })
    } else {
        builder
    };
    builder
        .build_global()
        .map_err(|e| LbError::Configuration(format!("could not build the thread pool: {e}")))
}
