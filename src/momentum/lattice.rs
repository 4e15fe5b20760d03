use super::bc::BoundaryCondition::{self, *};
use super::{CollisionOperator, Node, Parameters};
use crate::axis::{Box3D, DomainExtent};
use crate::engine::{LatticeEngine, VelocityField};
use crate::prelude_crate::*;
use crate::FACES_3D;
use colored::*;
use rayon::prelude::*;

// ----------------------------------------------------------------------- STRUCT: Lattice

/// Boundary nodes grouped by face, in the order they are treated.
type BoundaryNodes = Vec<(BoundaryFace, BoundaryCondition, Vec<usize>)>;

#[derive(Debug)]
pub struct Lattice {
    nodes: Vec<Node>,
    extent: DomainExtent,
    collision_operator: CollisionOperator,
    velocity_set_parameters: Arc<VelocitySetParameters>,
    periodic: [bool; 3],
    fluid_nodes: Vec<usize>,
    inert_nodes: Vec<usize>,
    active_nodes: Vec<usize>,
    bounce_back_nodes: Vec<usize>,
    pressure_boundaries: Vec<(Box3D, BoundaryFace, Float)>,
    boundary_nodes: BoundaryNodes,
    time_step: usize,
}

impl Lattice {
    pub fn new(params: Parameters) -> Self {
        let extent = params.extent;
        let velocity_set_parameters = Arc::new(params.velocity_set.get_velocity_set_parameters());
        log::info!(
            "Creating lattice {}x{}x{} with {:?} and {}.",
            extent.nx,
            extent.ny,
            extent.nz,
            params.velocity_set,
            params.collision_operator.to_string().yellow().bold()
        );

        let n = extent.as_array();
        let c = velocity_set_parameters.get_c();
        let nodes = (0..extent.get_number_of_cells())
            .into_par_iter()
            .map(|i| {
                let index = extent.cell_index(i);
                let neighbor_nodes = c
                    .iter()
                    .map(|c_i| {
                        let mut neighbor_index = [0; 3];
                        (0..3).for_each(|x| {
                            neighbor_index[x] =
                                (index[x] as i32 + c_i[x]).rem_euclid(n[x] as i32) as usize;
                        });
                        extent.linear_index(neighbor_index)
                    })
                    .collect::<Vec<usize>>();
                Node::new(index, neighbor_nodes, Arc::clone(&velocity_set_parameters))
            })
            .collect::<Vec<Node>>();

        Lattice {
            nodes,
            extent,
            collision_operator: params.collision_operator,
            velocity_set_parameters,
            periodic: params.periodic,
            fluid_nodes: Vec::new(),
            inert_nodes: Vec::new(),
            active_nodes: Vec::new(),
            bounce_back_nodes: Vec::new(),
            pressure_boundaries: Vec::new(),
            boundary_nodes: Vec::new(),
            time_step: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn test_default(n: [usize; 3]) -> Self {
        Lattice::new(Parameters::test_default(n))
    }
}

impl Lattice {
    pub fn get_node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub fn get_node_by_index(&self, index: [usize; 3]) -> &Node {
        &self.nodes[self.extent.linear_index(index)]
    }

    pub fn get_fluid_nodes(&self) -> &Vec<usize> {
        &self.fluid_nodes
    }

    pub fn get_bounce_back_nodes(&self) -> &Vec<usize> {
        &self.bounce_back_nodes
    }

    /// Faces with their boundary condition, walls first.
    pub fn get_boundary_conditions(&self) -> Vec<(BoundaryFace, BoundaryCondition)> {
        self.boundary_nodes
            .iter()
            .map(|(face, condition, _)| (*face, *condition))
            .collect()
    }

    pub fn get_time_step(&self) -> usize {
        self.time_step
    }

    pub fn get_total_mass(&self) -> Float {
        self.active_nodes
            .par_iter()
            .map(|&i| kernel::density(&self.nodes[i].get_f()))
            .sum()
    }
}

fn face_region(extent: &DomainExtent, face: BoundaryFace) -> Box3D {
    let mut region = extent.get_bounding_box();
    let x = face.dimension();
    let coordinate = match face {
        West | South | Bottom => 0,
        East | North | Top => extent.as_array()[x] - 1,
    };
    match x {
        0 => region.x = [coordinate; 2],
        1 => region.y = [coordinate; 2],
        _ => region.z = [coordinate; 2],
    }
    region
}

impl Lattice {
    fn identify_nodes(&mut self) {
        let node_types = self
            .nodes
            .iter()
            .map(|node| node.get_node_type())
            .collect::<Vec<NodeType>>();
        self.fluid_nodes = (0..self.nodes.len())
            .filter(|&i| node_types[i] == Fluid)
            .collect();
        self.inert_nodes = (0..self.nodes.len())
            .filter(|&i| node_types[i] == Inert)
            .collect();
        self.active_nodes = (0..self.nodes.len())
            .filter(|&i| node_types[i] != Solid)
            .collect();

        self.nodes.par_iter_mut().for_each(|node| {
            let directions = match node.get_node_type() {
                Solid => Vec::new(),
                Fluid | Inert => node
                    .get_neighbor_nodes()
                    .iter()
                    .enumerate()
                    .filter(|(_, &neighbor)| node_types[neighbor] == Solid)
                    .map(|(i, _)| i)
                    .collect(),
            };
            node.set_bounce_back_directions(directions);
        });
        self.bounce_back_nodes = self
            .active_nodes
            .iter()
            .copied()
            .filter(|&i| !self.nodes[i].get_bounce_back_directions().is_empty())
            .collect();
    }

    fn identify_boundary_nodes(&mut self) {
        let nodes_in = |region: &Box3D| {
            self.active_nodes
                .iter()
                .copied()
                .filter(|&i| region.contains(self.nodes[i].get_index()))
                .collect::<Vec<usize>>()
        };
        let mut boundary_nodes: BoundaryNodes = FACES_3D
            .iter()
            .filter(|face| !self.periodic[face.dimension()])
            .filter(|face| {
                !self
                    .pressure_boundaries
                    .iter()
                    .any(|(_, pressure_face, _)| pressure_face == *face)
            })
            .map(|face| (*face, NoSlip, nodes_in(&face_region(&self.extent, *face))))
            .collect();
        self.pressure_boundaries
            .iter()
            .for_each(|(region, face, density)| {
                boundary_nodes.push((
                    *face,
                    AntiBounceBack { density: *density },
                    nodes_in(region),
                ));
            });
        self.boundary_nodes = boundary_nodes;
    }
}

impl Lattice {
    pub fn collision_step(&self) {
        self.fluid_nodes.par_iter().for_each(|&i| {
            self.nodes[i].compute_collision(&self.collision_operator);
        });
        self.inert_nodes.par_iter().for_each(|&i| {
            self.nodes[i].compute_identity_collision();
        });
    }

    pub fn streaming_step(&self) {
        self.active_nodes.par_iter().for_each(|&i| {
            self.nodes[i].compute_streaming(&self.nodes);
        });
    }

    pub fn inner_bounce_back_step(&self) {
        self.bounce_back_nodes.par_iter().for_each(|&i| {
            self.nodes[i].compute_inner_bounce_back();
        });
    }

    pub fn boundary_conditions_step(&self) {
        self.boundary_nodes
            .iter()
            .for_each(|(boundary_face, boundary_condition, nodes)| match boundary_condition {
                NoSlip => nodes.par_iter().for_each(|&i| {
                    self.nodes[i].compute_no_slip_bc(boundary_face);
                }),
                AntiBounceBack { density } => {
                    let i_normal = self
                        .velocity_set_parameters
                        .get_face_normal_direction(boundary_face);
                    nodes.par_iter().for_each(|&i| {
                        let node = &self.nodes[i];
                        let neighbor = &self.nodes[node.get_neighbor_node(i_normal)];
                        node.compute_anti_bounce_back_bc(
                            boundary_face,
                            *density,
                            neighbor.get_density(),
                            &neighbor.get_velocity(),
                        );
                    })
                }
            });
    }

    pub fn update_density_and_velocity_step(&self) {
        self.fluid_nodes.par_iter().for_each(|&i| {
            let node = &self.nodes[i];
            node.compute_density();
            node.compute_velocity();
        });
        self.inert_nodes.par_iter().for_each(|&i| {
            self.nodes[i].compute_density();
        });
    }
}

impl LatticeEngine for Lattice {
    fn extent(&self) -> DomainExtent {
        self.extent
    }

    fn inv_cs2(&self) -> Float {
        CS_2_INV
    }

    fn add_pressure_boundary(&mut self, region: &Box3D, face: BoundaryFace, density: Float) {
        log::debug!("Pressure boundary on {face:?} with density {density}");
        self.pressure_boundaries.push((*region, face, density));
    }

    fn define_dynamics(&mut self, index: [usize; 3], node_type: NodeType) {
        let i = self.extent.linear_index(index);
        self.nodes[i].set_node_type(node_type);
    }

    fn initialize_at_equilibrium(
        &mut self,
        region: &Box3D,
        field: &(dyn Fn([usize; 3]) -> (Float, [Float; 3]) + Sync),
    ) {
        self.nodes
            .par_iter()
            .filter(|node| region.contains(node.get_index()))
            .for_each(|node| {
                let (density, velocity) = field(node.get_index());
                node.set_density(density);
                node.set_velocity(velocity);
                node.initialize_at_equilibrium();
            });
    }

    fn initialize(&mut self) {
        self.identify_nodes();
        self.identify_boundary_nodes();
        self.active_nodes.par_iter().for_each(|&i| {
            self.nodes[i].initialize_at_equilibrium();
        });
        log::info!(
            "Lattice ready: {} fluid nodes, {} bounce-back nodes, {} boundary faces.",
            self.fluid_nodes.len().to_string().yellow().bold(),
            self.bounce_back_nodes.len(),
            self.boundary_nodes.len()
        );
    }

    fn collide_and_stream(&mut self) {
        self.collision_step();
        self.streaming_step();
        self.inner_bounce_back_step();
        self.boundary_conditions_step();
        self.update_density_and_velocity_step();
        self.time_step += 1;
    }

    fn average_energy(&self) -> Float {
        let total = self
            .nodes
            .par_iter()
            .map(|node| node.get_kinetic_energy())
            .sum::<Float>();
        total / self.nodes.len() as Float
    }

    fn velocity_field(&self) -> VelocityField {
        let data = self
            .nodes
            .par_iter()
            .map(|node| node.get_velocity())
            .collect::<Vec<[Float; 3]>>();
        VelocityField::new(self.extent, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{self, FlowAxis};
    use approx::assert_relative_eq;

    fn at_rest(_: [usize; 3]) -> (Float, [Float; 3]) {
        (1.0, [0.0; 3])
    }

    fn pressure_driven_lattice(params: Parameters, delta_p: Float) -> Lattice {
        let extent = params.extent;
        let mut lattice = Lattice::new(params);
        let axis_length = extent.nx;
        let outlet_density = 1.0 - delta_p * CS_2_INV;
        lattice.add_pressure_boundary(&axis::inlet_region(&extent, FlowAxis::X), West, 1.0);
        lattice.add_pressure_boundary(
            &axis::outlet_region(&extent, FlowAxis::X),
            East,
            outlet_density,
        );
        let field = move |index: [usize; 3]| {
            axis::initial_pressure_field(index, delta_p, axis_length, FlowAxis::X, CS_2_INV)
        };
        lattice.initialize_at_equilibrium(&extent.get_bounding_box(), &field);
        lattice.initialize();
        lattice
    }

    #[test]
    fn test_neighbor_nodes_wrap_around() {
        let lattice = Lattice::test_default([4, 3, 5]);
        let node = lattice.get_node_by_index([0, 2, 4]);

        // D3Q19 directions 2 (-x), 3 (+y) and 5 (+z).
        assert_eq!(lattice.get_node(node.get_neighbor_node(2)).get_index(), [3, 2, 4]);
        assert_eq!(lattice.get_node(node.get_neighbor_node(3)).get_index(), [0, 0, 4]);
        assert_eq!(lattice.get_node(node.get_neighbor_node(5)).get_index(), [0, 2, 0]);
        assert_eq!(node.get_neighbor_node(0), lattice.extent.linear_index([0, 2, 4]));
    }

    #[test]
    fn test_face_region() {
        let extent = DomainExtent::new(4, 5, 6).unwrap();

        assert_eq!(face_region(&extent, West), Box3D::new([0, 0], [0, 4], [0, 5]));
        assert_eq!(face_region(&extent, North), Box3D::new([0, 3], [4, 4], [0, 5]));
        assert_eq!(face_region(&extent, Top), Box3D::new([0, 3], [0, 4], [5, 5]));
    }

    #[test]
    fn test_walls_on_non_periodic_faces_only() {
        let params = Parameters {
            periodic: [false, true, false],
            ..Parameters::test_default([5, 4, 4])
        };
        let lattice = pressure_driven_lattice(params, 0.001);

        let conditions = lattice.get_boundary_conditions();
        assert_eq!(conditions.len(), 4);
        assert_eq!(conditions[0], (Bottom, NoSlip));
        assert_eq!(conditions[1], (Top, NoSlip));
        assert_eq!(conditions[2], (West, AntiBounceBack { density: 1.0 }));
        assert_eq!(conditions[3].0, East);
    }

    #[test]
    fn test_solid_neighbors_are_bounce_back_directions() {
        let mut lattice = Lattice::test_default([4, 4, 4]);
        lattice.define_dynamics([1, 1, 1], Solid);
        lattice.initialize_at_equilibrium(&lattice.extent.get_bounding_box(), &at_rest);
        lattice.initialize();

        assert_eq!(lattice.get_fluid_nodes().len(), 63);
        let node = lattice.get_node_by_index([0, 1, 1]);
        assert_eq!(node.get_bounce_back_directions(), &vec![1]);
        let node = lattice.get_node_by_index([2, 2, 1]);
        assert_eq!(node.get_bounce_back_directions(), &vec![8]);
        assert_eq!(lattice.get_bounce_back_nodes().len(), 18);
    }

    #[test]
    fn test_closed_box_at_rest_stays_at_rest() {
        let mut lattice = Lattice::test_default([5, 5, 5]);
        lattice.define_dynamics([2, 2, 2], Solid);
        lattice.initialize_at_equilibrium(&lattice.extent.get_bounding_box(), &at_rest);
        lattice.initialize();
        let mass = lattice.get_total_mass();

        (0..20).for_each(|_| lattice.collide_and_stream());

        assert_eq!(lattice.get_time_step(), 20);
        assert_relative_eq!(lattice.get_total_mass(), mass, epsilon = 1e-10);
        assert!(lattice.average_energy() < 1e-25);
    }

    #[test]
    fn test_pressure_drop_drives_flow_along_x() {
        for collision_operator in [
            CollisionOperator::bgk(1.0),
            CollisionOperator::trt(1.0),
            CollisionOperator::mrt(1.0),
        ] {
            let params = Parameters {
                collision_operator,
                ..Parameters::test_default([12, 5, 5])
            };
            let mut lattice = pressure_driven_lattice(params, 0.001);

            (0..300).for_each(|_| lattice.collide_and_stream());

            let field = lattice.velocity_field();
            let center = field.get([6, 2, 2]);
            assert!(center[0] > 0.0);
            assert!(center[1].abs() < 1e-3 * center[0]);
            assert!(center[2].abs() < 1e-3 * center[0]);
            assert!(field.get([6, 2, 2])[0] > field.get([6, 0, 2])[0]);
            assert!(lattice.average_energy() > 0.0);
        }
    }

    #[test]
    fn test_pressure_faces_hold_their_density() {
        let delta_p = 0.001;
        let mut lattice = pressure_driven_lattice(Parameters::test_default([12, 5, 5]), delta_p);

        (0..1500).for_each(|_| lattice.collide_and_stream());

        let drop = delta_p * CS_2_INV;
        let inlet = lattice.get_node_by_index([0, 2, 2]).get_density();
        let outlet = lattice.get_node_by_index([11, 2, 2]).get_density();
        assert_relative_eq!(inlet, 1.0, epsilon = 0.05 * drop);
        assert_relative_eq!(outlet, 1.0 - drop, epsilon = 0.05 * drop);
        let middle = lattice.get_node_by_index([6, 2, 2]).get_density();
        assert_relative_eq!(middle, 1.0 - drop * 6.0 / 11.0, epsilon = 0.05 * drop);
    }

    #[test]
    fn test_solid_and_inert_cells_report_zero_velocity() {
        let params = Parameters::test_default([8, 4, 4]);
        let extent = params.extent;
        let mut lattice = Lattice::new(params);
        lattice.define_dynamics([4, 1, 1], Solid);
        lattice.define_dynamics([4, 2, 2], Inert);
        lattice.add_pressure_boundary(&axis::inlet_region(&extent, FlowAxis::X), West, 1.0);
        lattice.add_pressure_boundary(&axis::outlet_region(&extent, FlowAxis::X), East, 0.99);
        lattice.initialize_at_equilibrium(&extent.get_bounding_box(), &at_rest);
        lattice.initialize();

        (0..200).for_each(|_| lattice.collide_and_stream());

        let field = lattice.velocity_field();
        assert_eq!(field.get([4, 1, 1]), [0.0; 3]);
        assert_eq!(field.get([4, 2, 2]), [0.0; 3]);
        assert!(field.get([2, 2, 2])[0] > 0.0);
    }

    #[test]
    fn test_average_energy_includes_every_cell() {
        let mut lattice = Lattice::test_default([2, 2, 2]);
        let moving = |index: [usize; 3]| {
            if index == [0, 0, 0] {
                (1.0, [0.08, 0.0, 0.0])
            } else {
                (1.0, [0.0; 3])
            }
        };
        lattice.initialize_at_equilibrium(&lattice.extent.get_bounding_box(), &moving);
        lattice.initialize();

        assert_relative_eq!(lattice.average_energy(), 0.5 * 0.0064 / 8.0, epsilon = 1e-15);
    }
}
