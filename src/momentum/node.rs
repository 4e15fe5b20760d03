use super::CollisionOperator;
use crate::prelude_crate::*;

// -------------------------------------------------------------------------- STRUCT: Node

#[derive(Debug)]
pub struct Node {
    density: RwLock<Float>,
    velocity: RwLock<[Float; 3]>,
    f: RwLock<Vec<Float>>,
    f_star: RwLock<Vec<Float>>,
    node_type: NodeType,
    index: [usize; 3],
    velocity_set_parameters: Arc<VelocitySetParameters>,
    neighbor_nodes: Vec<usize>,
    bounce_back_directions: Vec<usize>,
}

impl Node {
    pub(super) fn new(
        index: [usize; 3],
        neighbor_nodes: Vec<usize>,
        velocity_set_parameters: Arc<VelocitySetParameters>,
    ) -> Self {
        let q = velocity_set_parameters.get_q();
        Node {
            density: RwLock::new(LATTICE_DENSITY),
            velocity: RwLock::new([0.0; 3]),
            f: RwLock::new(vec![0.0; q]),
            f_star: RwLock::new(vec![0.0; q]),
            node_type: Fluid,
            index,
            velocity_set_parameters,
            neighbor_nodes,
            bounce_back_directions: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn test_default() -> Self {
        let params = Arc::new(VelocitySetParameters::default());
        let neighbor_nodes = vec![0; params.get_q()];
        Node::new([3, 5, 7], neighbor_nodes, params)
    }
}

impl Node {
    pub fn get_density(&self) -> Float {
        *self.density.read().unwrap()
    }

    pub(super) fn set_density(&self, density: Float) {
        let mut density_guard = self.density.write().unwrap();
        *density_guard = density;
    }

    /// Velocity carried by the node; solid and inert nodes always report zero.
    pub fn get_velocity(&self) -> [Float; 3] {
        match self.node_type {
            Fluid => *self.velocity.read().unwrap(),
            Solid | Inert => [0.0; 3],
        }
    }

    pub(super) fn set_velocity(&self, velocity: [Float; 3]) {
        let mut velocity_guard = self.velocity.write().unwrap();
        *velocity_guard = velocity;
    }

    pub fn get_f(&self) -> Vec<Float> {
        self.f.read().unwrap().clone()
    }

    pub fn set_f(&self, f: Vec<Float>) {
        let mut f_guard = self.f.write().unwrap();
        *f_guard = f;
    }

    pub fn get_f_star(&self) -> Vec<Float> {
        self.f_star.read().unwrap().clone()
    }

    pub(crate) fn set_f_star(&self, f_star: Vec<Float>) {
        let mut f_star_guard = self.f_star.write().unwrap();
        *f_star_guard = f_star;
    }

    fn get_f_star_i(&self, i: usize) -> Float {
        self.f_star.read().unwrap()[i]
    }

    pub fn get_node_type(&self) -> NodeType {
        self.node_type
    }

    pub(super) fn set_node_type(&mut self, node_type: NodeType) {
        self.node_type = node_type;
    }

    pub fn get_index(&self) -> [usize; 3] {
        self.index
    }

    /// Linear index of the node reached by following lattice direction `i`.
    pub fn get_neighbor_node(&self, i: usize) -> usize {
        self.neighbor_nodes[i]
    }

    pub fn get_neighbor_nodes(&self) -> &Vec<usize> {
        &self.neighbor_nodes
    }

    pub fn get_bounce_back_directions(&self) -> &Vec<usize> {
        &self.bounce_back_directions
    }

    pub(super) fn set_bounce_back_directions(&mut self, directions: Vec<usize>) {
        self.bounce_back_directions = directions;
    }

    pub(crate) fn get_velocity_set_parameters(&self) -> &Arc<VelocitySetParameters> {
        &self.velocity_set_parameters
    }

    pub fn get_opposite_direction(&self, direction: usize) -> usize {
        self.velocity_set_parameters.get_opposite_direction(direction)
    }

    pub fn get_kinetic_energy(&self) -> Float {
        let u = self.get_velocity();
        0.5 * u.iter().map(|u_x| u_x * u_x).sum::<Float>()
    }
}

impl Node {
    pub fn compute_density(&self) {
        let density = kernel::density(&self.f.read().unwrap());
        self.set_density(density);
    }

    pub fn compute_velocity(&self) {
        let velocity = kernel::velocity(
            &self.f.read().unwrap(),
            self.get_density(),
            &self.velocity_set_parameters,
        );
        self.set_velocity(velocity);
    }

    /// Resets the populations to the equilibrium of the stored density and velocity.
    pub fn initialize_at_equilibrium(&self) {
        let velocity = *self.velocity.read().unwrap();
        let f_eq = kernel::equilibrium(self.get_density(), &velocity, &self.velocity_set_parameters);
        self.set_f(f_eq);
    }

    pub fn compute_collision(&self, collision_operator: &CollisionOperator) {
        let f = self.get_f();
        let velocity = *self.velocity.read().unwrap();
        let f_eq = kernel::equilibrium(self.get_density(), &velocity, &self.velocity_set_parameters);
        let f_star = match collision_operator {
            CollisionOperator::BGK(tau) => kernel::bgk_collision(&f, &f_eq, *tau),
            CollisionOperator::TRT(omega_plus, omega_minus) => kernel::trt_collision(
                &f,
                &f_eq,
                *omega_plus,
                *omega_minus,
                &self.velocity_set_parameters,
            ),
            CollisionOperator::MRT(tau) => kernel::mrt_collision(
                &f,
                &f_eq,
                &self
                    .velocity_set_parameters
                    .get_mrt_relaxation_vector(DELTA_T / tau),
                &self.velocity_set_parameters,
            ),
        };
        self.set_f_star(f_star);
    }

    /// Inert nodes carry their populations through the collision unchanged.
    pub fn compute_identity_collision(&self) {
        self.set_f_star(self.get_f());
    }

    /// $$ f\_{i}(\mathbf{x}, t+\Delta t) = f\_{i}^{\star}(\mathbf{x}-\mathbf{c}\_{i}\Delta t,t) $$
    pub fn compute_streaming(&self, nodes: &[Node]) {
        let f = (0..self.neighbor_nodes.len())
            .map(|i| {
                let upstream = self.neighbor_nodes[self.get_opposite_direction(i)];
                nodes[upstream].get_f_star_i(i)
            })
            .collect::<Vec<Float>>();
        self.set_f(f);
    }

    /// Halfway bounce-back against solid neighbours.
    pub fn compute_inner_bounce_back(&self) {
        if self.bounce_back_directions.is_empty() {
            return;
        }
        let mut f = self.get_f();
        let f_star = self.get_f_star();
        self.bounce_back_directions.iter().for_each(|&i| {
            let i_bar = self.get_opposite_direction(i);
            f[i_bar] = f_star[i];
        });
        self.set_f(f);
    }
}
