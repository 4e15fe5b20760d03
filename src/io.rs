use crate::axis::DomainExtent;
use crate::engine::{self, VelocityField};
use crate::error::LbResult;
use crate::geometry::GeometryField;
use colored::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn vtk_file_name(stem: &str, iteration: usize) -> String {
    format!("vtk_{stem}_{iteration:06}.vtk")
}

pub fn velocity_dump_file_name(stem: &str, iteration: usize) -> String {
    format!("u_3Dfield_{stem}_{iteration:06}.dat")
}

pub fn create_output_directory(path: &Path) -> LbResult<()> {
    if path.exists() {
        log::info!("The {} path already exists.", path.display().to_string().yellow().bold());
    } else {
        log::info!("Creating the {} path.", path.display().to_string().yellow().bold());
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn read_geometry(path: &Path, extent: DomainExtent) -> LbResult<GeometryField> {
    log::info!("Reading geometry from {}.", path.display().to_string().yellow().bold());
    let contents = fs::read_to_string(path)?;
    GeometryField::parse(extent, &contents)
}

/// Writes `field` as legacy VTK structured points with a `velocityNorm` scalar
/// and a `velocity` vector per cell.
pub fn write_vtk(
    output_directory: &Path,
    stem: &str,
    iteration: usize,
    field: &VelocityField,
) -> LbResult<PathBuf> {
    let path = output_directory.join(vtk_file_name(stem, iteration));
    let extent = field.get_extent();
    let number_of_cells = extent.get_number_of_cells();
    let mut file = BufWriter::new(File::create(&path)?);
    writeln!(file, "# vtk DataFile Version 3.0")?;
    writeln!(file, "lbperm velocity field")?;
    writeln!(file, "ASCII")?;
    writeln!(file, "DATASET STRUCTURED_POINTS")?;
    writeln!(file, "DIMENSIONS {} {} {}", extent.nx, extent.ny, extent.nz)?;
    writeln!(file, "ORIGIN 0 0 0")?;
    writeln!(file, "SPACING 1 1 1")?;
    writeln!(file, "POINT_DATA {number_of_cells}")?;
    writeln!(file, "SCALARS velocityNorm double 1")?;
    writeln!(file, "LOOKUP_TABLE default")?;
    for u in field.get_data() {
        writeln!(file, "{:.8e}", engine::norm(u))?;
    }
    writeln!(file, "VECTORS velocity double")?;
    for u in field.get_data() {
        writeln!(file, "{:.8e} {:.8e} {:.8e}", u[0], u[1], u[2])?;
    }
    file.flush()?;
    log::info!("Wrote {}.", path.display().to_string().yellow().bold());
    Ok(path)
}

/// Writes one `|u| ux uy uz` line per moving cell, x outermost and z innermost.
pub fn write_velocity_dump(
    output_directory: &Path,
    stem: &str,
    iteration: usize,
    field: &VelocityField,
) -> LbResult<PathBuf> {
    let path = output_directory.join(velocity_dump_file_name(stem, iteration));
    let mut file = BufWriter::new(File::create(&path)?);
    for index in field.get_extent().get_bounding_box().cells() {
        let u = field.get(index);
        let norm = engine::norm(&u);
        if norm > 0.0 {
            writeln!(file, "{norm:.10e} {:.10e} {:.10e} {:.10e}", u[0], u[1], u[2])?;
        }
    }
    file.flush()?;
    log::info!("Wrote {}.", path.display().to_string().yellow().bold());
    Ok(path)
}
