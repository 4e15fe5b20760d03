use crate::axis::{Box3D, DomainExtent, FlowAxis};
use crate::constants::Float;
use crate::{BoundaryFace, NodeType};

/// The lattice operations the permeability driver relies on.
///
/// Every call is blocking: it returns once the whole lattice has been updated,
/// whatever parallelism the implementation uses internally.
pub trait LatticeEngine {
    fn extent(&self) -> DomainExtent;

    /// Inverse squared lattice sound speed.
    fn inv_cs2(&self) -> Float;

    /// Fixes the density on `region`, a slab lying on `face`. Unknown populations
    /// are reconstructed from the inward normal of the face.
    fn add_pressure_boundary(&mut self, region: &Box3D, face: BoundaryFace, density: Float);

    fn define_dynamics(&mut self, index: [usize; 3], node_type: NodeType);

    fn initialize_at_equilibrium(
        &mut self,
        region: &Box3D,
        field: &(dyn Fn([usize; 3]) -> (Float, [Float; 3]) + Sync),
    );

    /// Commits the configuration; called once after all boundaries and dynamics are set.
    fn initialize(&mut self);

    /// Collision followed by streaming and boundary treatment.
    fn collide_and_stream(&mut self);

    /// Domain average of the kinetic energy density ½|u|².
    fn average_energy(&self) -> Float;

    fn velocity_field(&self) -> VelocityField;
}

// ------------------------------------------------------------------ STRUCT: VelocityField

/// Per-cell velocity over the whole domain, x varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityField {
    extent: DomainExtent,
    data: Vec<[Float; 3]>,
}

impl VelocityField {
    pub fn new(extent: DomainExtent, data: Vec<[Float; 3]>) -> Self {
        assert_eq!(
            data.len(),
            extent.get_number_of_cells(),
            "Velocity field size must match the domain"
        );
        VelocityField { extent, data }
    }

    pub fn uniform(extent: DomainExtent, velocity: [Float; 3]) -> Self {
        VelocityField {
            extent,
            data: vec![velocity; extent.get_number_of_cells()],
        }
    }

    pub fn get_extent(&self) -> &DomainExtent {
        &self.extent
    }

    pub fn get_data(&self) -> &[[Float; 3]] {
        &self.data
    }

    pub fn get(&self, index: [usize; 3]) -> [Float; 3] {
        self.data[self.extent.linear_index(index)]
    }

    pub fn component(&self, index: [usize; 3], axis: FlowAxis) -> Float {
        axis.component(&self.get(index))
    }
}

pub fn norm(u: &[Float; 3]) -> Float {
    u.iter().map(|u_x| u_x * u_x).sum::<Float>().sqrt()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum EngineCall {
        AddPressureBoundary(Box3D, BoundaryFace, Float),
        DefineDynamics([usize; 3], NodeType),
        InitializeAtEquilibrium(Box3D, Vec<Float>),
        Initialize,
    }

    /// Engine stand-in that records configuration calls and replays an energy signal.
    pub(crate) struct RecordingEngine {
        pub(crate) extent: DomainExtent,
        pub(crate) calls: Vec<EngineCall>,
        pub(crate) steps: usize,
        pub(crate) energy: Box<dyn Fn(usize) -> Float>,
    }

    impl RecordingEngine {
        pub(crate) fn new(extent: DomainExtent) -> Self {
            RecordingEngine {
                extent,
                calls: Vec::new(),
                steps: 0,
                energy: Box::new(|_| 1.0),
            }
        }

        pub(crate) fn with_energy(extent: DomainExtent, energy: impl Fn(usize) -> Float + 'static) -> Self {
            RecordingEngine {
                energy: Box::new(energy),
                ..RecordingEngine::new(extent)
            }
        }
    }

    impl LatticeEngine for RecordingEngine {
        fn extent(&self) -> DomainExtent {
            self.extent
        }

        fn inv_cs2(&self) -> Float {
            3.0
        }

        fn add_pressure_boundary(&mut self, region: &Box3D, face: BoundaryFace, density: Float) {
            self.calls
                .push(EngineCall::AddPressureBoundary(*region, face, density));
        }

        fn define_dynamics(&mut self, index: [usize; 3], node_type: NodeType) {
            self.calls.push(EngineCall::DefineDynamics(index, node_type));
        }

        fn initialize_at_equilibrium(
            &mut self,
            region: &Box3D,
            field: &(dyn Fn([usize; 3]) -> (Float, [Float; 3]) + Sync),
        ) {
            let densities = region.cells().map(|index| field(index).0).collect();
            self.calls
                .push(EngineCall::InitializeAtEquilibrium(*region, densities));
        }

        fn initialize(&mut self) {
            self.calls.push(EngineCall::Initialize);
        }

        fn collide_and_stream(&mut self) {
            self.steps += 1;
        }

        fn average_energy(&self) -> Float {
            (self.energy)(self.steps)
        }

        fn velocity_field(&self) -> VelocityField {
            VelocityField::uniform(self.extent, [0.0; 3])
        }
    }
}
