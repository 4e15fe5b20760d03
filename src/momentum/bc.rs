use super::Node;
use crate::prelude_crate::*;

pub use BoundaryCondition::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    NoSlip,
    AntiBounceBack { density: Float },
}

impl Node {
    /// Bounces the populations leaving through `boundary_face` back into the domain.
    pub(crate) fn compute_no_slip_bc(&self, boundary_face: &BoundaryFace) {
        let mut f = self.get_f();
        let f_star = self.get_f_star();
        let vel_set_params = self.get_velocity_set_parameters();
        let q_faces = vel_set_params.get_q_faces(boundary_face);
        q_faces.iter().for_each(|&i| {
            let i_bar = vel_set_params.get_opposite_direction(i);
            f[i_bar] = f_star[i];
        });
        self.set_f(f);
    }

    /// Imposes `density` on the boundary node itself. The wall sits half a cell
    /// outside, so its density and velocity are extrapolated from the node and
    /// its inward neighbour.
    pub(crate) fn compute_anti_bounce_back_bc(
        &self,
        boundary_face: &BoundaryFace,
        density: Float,
        neighbor_density: Float,
        neighbor_velocity: &[Float; 3],
    ) {
        let mut f = self.get_f();
        let f_star = self.get_f_star();
        let vel_set_params = self.get_velocity_set_parameters();
        let w = vel_set_params.get_w();
        let c = vel_set_params.get_c();
        let q_faces = vel_set_params.get_q_faces(boundary_face);
        let node_velocity = self.get_velocity();
        let mut velocity = [0.0; 3];
        velocity
            .iter_mut()
            .zip(node_velocity.iter().zip(neighbor_velocity.iter()))
            .for_each(|(u_x, (nu_x, nnu_x))| *u_x = 1.5 * nu_x - 0.5 * nnu_x);
        let u_dot_u = velocity.iter().map(|u_x| u_x * u_x).sum::<Float>();
        let wall_density = 1.5 * density - 0.5 * neighbor_density;
        q_faces.iter().for_each(|&i| {
            let i_bar = vel_set_params.get_opposite_direction(i);
            let u_dot_c = velocity
                .iter()
                .zip(c[i].iter())
                .map(|(u_x, c_x)| u_x * (*c_x as Float))
                .sum::<Float>();
            f[i_bar] = -f_star[i]
                + 2.0
                    * w[i]
                    * wall_density
                    * (1.0 + 0.5 * u_dot_c * u_dot_c * CS_4_INV - 0.5 * u_dot_u * CS_2_INV);
        });
        self.set_f(f);
    }
}
