use crate::axis::{self, Box3D, DomainExtent, FlowAxis};
use crate::engine::LatticeEngine;
use crate::error::{LbError, LbResult};
use crate::geometry::GeometryField;
use crate::material::{self, MaterialCounts};
use crate::prelude::*;
use colored::*;

/// Inlet and outlet density conditions of one pressure-driven run. Built,
/// applied to the engine by value and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureBoundaries {
    inlet: (Box3D, BoundaryFace, Float),
    outlet: (Box3D, BoundaryFace, Float),
}

impl PressureBoundaries {
    pub fn new(extent: &DomainExtent, axis: FlowAxis, delta_p: Float, inv_cs2: Float) -> Self {
        PressureBoundaries {
            inlet: (axis::inlet_region(extent, axis), axis.inlet_face(), 1.0),
            outlet: (
                axis::outlet_region(extent, axis),
                axis.outlet_face(),
                1.0 - delta_p * inv_cs2,
            ),
        }
    }

    pub fn get_inlet_density(&self) -> Float {
        self.inlet.2
    }

    pub fn get_outlet_density(&self) -> Float {
        self.outlet.2
    }

    pub fn apply<E>(self, engine: &mut E)
    where
        E: LatticeEngine + ?Sized,
    {
        let (region, face, density) = self.inlet;
        engine.add_pressure_boundary(&region, face, density);
        let (region, face, density) = self.outlet;
        engine.add_pressure_boundary(&region, face, density);
    }
}

/// Configures `engine` for flow along `axis` driven by the pressure drop `delta_p`.
///
/// Preconditions are checked before the engine is touched.
pub fn configure<E>(
    engine: &mut E,
    axis: FlowAxis,
    delta_p: Float,
    geometry: &GeometryField,
) -> LbResult<MaterialCounts>
where
    E: LatticeEngine + ?Sized,
{
    let extent = engine.extent();
    let geometry_extent = geometry.get_extent();
    if *geometry_extent != extent {
        return Err(LbError::ExtentMismatch {
            geometry: *geometry_extent,
            domain: extent,
        });
    }
    if !delta_p.is_finite() || delta_p < 0.0 {
        return Err(LbError::Configuration(format!(
            "pressure drop must be a non-negative number, got {delta_p}"
        )));
    }
    let inv_cs2 = engine.inv_cs2();
    let axis_length = axis.length(&extent);

    log::info!("Definition of inlet/outlet along {}.", axis.to_string().yellow().bold());
    let boundaries = PressureBoundaries::new(&extent, axis, delta_p, inv_cs2);
    log::debug!(
        "Inlet density {:.6}, outlet density {:.6}",
        boundaries.get_inlet_density(),
        boundaries.get_outlet_density()
    );
    boundaries.apply(engine);

    log::info!("Definition of the geometry.");
    let counts = material::apply_materials(engine, geometry);
    log::info!(
        "{} fluid, {} solid and {} inert cells.",
        counts.fluid.to_string().yellow().bold(),
        counts.solid.to_string().yellow().bold(),
        counts.inert.to_string().yellow().bold()
    );

    log::info!("Initialization of density and velocity.");
    let pressure_gradient = move |index: [usize; 3]| {
        axis::initial_pressure_field(index, delta_p, axis_length, axis, inv_cs2)
    };
    engine.initialize_at_equilibrium(&extent.get_bounding_box(), &pressure_gradient);

    engine.initialize();
    Ok(counts)
}
