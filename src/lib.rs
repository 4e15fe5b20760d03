pub mod analysis;
pub mod axis;
pub mod cli;
pub mod constants;
pub mod convergence;
pub mod driver;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod io;
mod kernel;
pub mod material;
pub mod momentum;
pub mod prelude;
mod prelude_crate;
pub mod setup;
pub mod simulation;
pub mod velocity_set;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BoundaryFace {
    West = 0,
    East = 1,
    South = 2,
    North = 3,
    Bottom = 4,
    Top = 5,
}

impl BoundaryFace {
    /// Unit vector pointing from the face into the domain.
    pub fn inward_normal(&self) -> [i32; 3] {
        match self {
            BoundaryFace::West => [1, 0, 0],
            BoundaryFace::East => [-1, 0, 0],
            BoundaryFace::South => [0, 1, 0],
            BoundaryFace::North => [0, -1, 0],
            BoundaryFace::Bottom => [0, 0, 1],
            BoundaryFace::Top => [0, 0, -1],
        }
    }

    /// Axis perpendicular to the face (0 = x, 1 = y, 2 = z).
    pub fn dimension(&self) -> usize {
        *self as usize / 2
    }
}

pub const FACES_3D: [BoundaryFace; 6] = [
    BoundaryFace::West,
    BoundaryFace::East,
    BoundaryFace::South,
    BoundaryFace::North,
    BoundaryFace::Bottom,
    BoundaryFace::Top,
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NodeType {
    Fluid = 0,
    Solid = 1,
    Inert = 2,
}
