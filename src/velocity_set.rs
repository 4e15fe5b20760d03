// ------------------------------------------------------------------------------- MODULES

mod d3q19;
mod d3q27;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude_crate::*;
use crate::FACES_3D;

pub(crate) type MomentComputation = fn(&[i32; 3]) -> Vec<Float>;

pub(crate) type RelaxationComputation = fn(Float) -> Vec<Float>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocitySet {
    D3Q19 = 0,
    D3Q27 = 1,
}

impl VelocitySet {
    pub(crate) fn get_velocity_set_parameters(&self) -> Parameters {
        match self {
            D3Q19 => Parameters::build(
                &d3q19::C,
                d3q19::weight,
                d3q19::moments,
                d3q19::mrt_relaxation_vector,
            ),
            D3Q27 => Parameters::build(
                &d3q27::C,
                d3q27::weight,
                d3q27::moments,
                d3q27::mrt_relaxation_vector,
            ),
        }
    }

    pub fn get_q(&self) -> usize {
        match self {
            D3Q19 => d3q19::Q,
            D3Q27 => d3q27::Q,
        }
    }
}

impl std::str::FromStr for VelocitySet {
    type Err = LbError;

    fn from_str(s: &str) -> LbResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "d3q19" => Ok(D3Q19),
            "d3q27" => Ok(D3Q27),
            _ => Err(LbError::Configuration(format!("unknown velocity set '{s}'"))),
        }
    }
}

// ---------------------------------------------------------------------- STRUCT: Parameters

#[derive(Debug, PartialEq)]
pub(crate) struct Parameters {
    pub(crate) q: usize,
    pub(crate) c: Vec<[i32; 3]>,
    pub(crate) w: Vec<Float>,
    pub(crate) q_bar: Vec<usize>,
    pub(crate) q_faces: HashMap<BoundaryFace, Vec<usize>>,
    pub(crate) face_normal_directions: HashMap<BoundaryFace, usize>,
    pub(crate) mrt_matrix: Vec<Vec<Float>>,
    pub(crate) mrt_inverse_matrix: Vec<Vec<Float>>,
    pub(crate) mrt_relaxation_computation: RelaxationComputation,
}

impl Parameters {
    fn build(
        c: &[[i32; 3]],
        weight: fn(i32) -> Float,
        moments: MomentComputation,
        mrt_relaxation_computation: RelaxationComputation,
    ) -> Self {
        let dot = |a: &[i32; 3], b: &[i32; 3]| a.iter().zip(b.iter()).map(|(x, y)| x * y).sum::<i32>();
        let w = c.iter().map(|c_i| weight(dot(c_i, c_i))).collect();
        let q_bar = c
            .iter()
            .map(|c_i| {
                let opposite = [-c_i[0], -c_i[1], -c_i[2]];
                c.iter()
                    .position(|c_j| *c_j == opposite)
                    .expect("Lattice vectors come in opposite pairs")
            })
            .collect();
        // Directions leaving the domain through each face.
        let q_faces = FACES_3D
            .iter()
            .map(|face| {
                let normal = face.inward_normal();
                let outgoing = (0..c.len())
                    .filter(|&i| dot(&c[i], &normal) < 0)
                    .collect::<Vec<usize>>();
                (*face, outgoing)
            })
            .collect();
        let face_normal_directions = FACES_3D
            .iter()
            .map(|face| {
                let normal = face.inward_normal();
                let i = c
                    .iter()
                    .position(|c_i| *c_i == normal)
                    .expect("Lattice holds the axis unit vectors");
                (*face, i)
            })
            .collect();
        // Row k holds moment k of every lattice vector.
        let columns = c.iter().map(moments).collect::<Vec<Vec<Float>>>();
        let mrt_matrix = (0..c.len())
            .map(|k| columns.iter().map(|column| column[k]).collect())
            .collect::<Vec<Vec<Float>>>();
        let mrt_inverse_matrix = compute_inverse_matrix(&mrt_matrix);
        Parameters {
            q: c.len(),
            c: c.to_vec(),
            w,
            q_bar,
            q_faces,
            face_normal_directions,
            mrt_matrix,
            mrt_inverse_matrix,
            mrt_relaxation_computation,
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        D3Q19.get_velocity_set_parameters()
    }
}

impl Parameters {
    pub(crate) fn get_q(&self) -> usize {
        self.q
    }

    pub(crate) fn get_c(&self) -> &Vec<[i32; 3]> {
        &self.c
    }

    pub(crate) fn get_w(&self) -> &Vec<Float> {
        &self.w
    }

    pub(crate) fn get_opposite_direction(&self, direction: usize) -> usize {
        self.q_bar[direction]
    }

    pub(crate) fn get_q_faces(&self, boundary_face: &BoundaryFace) -> &Vec<usize> {
        self.q_faces
            .get(boundary_face)
            .expect("Every face has outgoing directions")
    }

    pub(crate) fn get_face_normal_direction(&self, boundary_face: &BoundaryFace) -> usize {
        *self
            .face_normal_directions
            .get(boundary_face)
            .expect("Every face has a normal direction")
    }

    pub(crate) fn get_mrt_matrix(&self) -> &Vec<Vec<Float>> {
        &self.mrt_matrix
    }

    pub(crate) fn get_mrt_inverse_matrix(&self) -> &Vec<Vec<Float>> {
        &self.mrt_inverse_matrix
    }

    /// Moment relaxation rates for a shear relaxation frequency `omega`.
    pub(crate) fn get_mrt_relaxation_vector(&self, omega: Float) -> Vec<Float> {
        (self.mrt_relaxation_computation)(omega)
    }
}

fn compute_inverse_matrix(matrix: &[Vec<Float>]) -> Vec<Vec<Float>> {
    let rows = matrix.len();
    let cols = matrix[0].len();
    let flat_data = matrix.iter().flatten().cloned().collect::<Vec<Float>>();
    let dmatrix = nalgebra::DMatrix::from_row_slice(rows, cols, &flat_data);
    let inverse = dmatrix
        .try_inverse()
        .expect("Moment basis spans the lattice vectors");
    (0..inverse.nrows())
        .map(|i| inverse.row(i).iter().cloned().collect())
        .collect()
}
