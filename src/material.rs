use crate::engine::LatticeEngine;
use crate::geometry::GeometryField;
use crate::NodeType;

pub const FLUID_CODE: i32 = 0;
pub const SOLID_CODE: i32 = 1;
pub const INERT_CODE: i32 = 2;

/// Dynamics assigned to a geometry code; unknown codes stay fluid.
pub fn classify(code: i32) -> NodeType {
    match code {
        SOLID_CODE => NodeType::Solid,
        INERT_CODE => NodeType::Inert,
        _ => NodeType::Fluid,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaterialCounts {
    pub fluid: usize,
    pub solid: usize,
    pub inert: usize,
}

/// Relabels the engine cells from the geometry codes. Fluid is the engine's
/// default, so only solid and inert cells are touched.
pub fn apply_materials<E>(engine: &mut E, geometry: &GeometryField) -> MaterialCounts
where
    E: LatticeEngine + ?Sized,
{
    let mut counts = MaterialCounts::default();
    geometry
        .get_extent()
        .get_bounding_box()
        .cells()
        .for_each(|index| match classify(geometry.get(index)) {
            NodeType::Fluid => counts.fluid += 1,
            node_type @ NodeType::Solid => {
                engine.define_dynamics(index, node_type);
                counts.solid += 1;
            }
            node_type @ NodeType::Inert => {
                engine.define_dynamics(index, node_type);
                counts.inert += 1;
            }
        });
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::DomainExtent;
    use crate::engine::testing::{EngineCall, RecordingEngine};

    #[test]
    fn test_classify() {
        assert_eq!(classify(0), NodeType::Fluid);
        assert_eq!(classify(1), NodeType::Solid);
        assert_eq!(classify(2), NodeType::Inert);
        assert_eq!(classify(3), NodeType::Fluid);
        assert_eq!(classify(-1), NodeType::Fluid);
    }

    #[test]
    fn test_apply_materials_only_touches_non_fluid_cells() {
        let extent = DomainExtent::new(3, 3, 3).unwrap();
        let mut geometry = GeometryField::uniform(extent, 0);
        geometry.set([1, 1, 1], 1);
        geometry.set([0, 2, 1], 2);
        geometry.set([2, 2, 2], 7);
        let mut engine = RecordingEngine::new(extent);

        let counts = apply_materials(&mut engine, &geometry);

        assert_eq!(
            counts,
            MaterialCounts {
                fluid: 25,
                solid: 1,
                inert: 1
            }
        );
        assert_eq!(
            engine.calls,
            vec![
                EngineCall::DefineDynamics([0, 2, 1], NodeType::Inert),
                EngineCall::DefineDynamics([1, 1, 1], NodeType::Solid),
            ]
        );
    }

    #[test]
    fn test_apply_materials_leaves_geometry_untouched() {
        let extent = DomainExtent::new(2, 2, 2).unwrap();
        let geometry = GeometryField::uniform(extent, 1);
        let copy = geometry.clone();
        let mut engine = RecordingEngine::new(extent);

        let counts = apply_materials(&mut engine, &geometry);

        assert_eq!(counts.solid, 8);
        assert_eq!(geometry, copy);
    }
}
