use crate::constants::Float;
use crate::error::{LbError, LbResult};
use crate::BoundaryFace;

// ------------------------------------------------------------------- STRUCT: DomainExtent

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainExtent {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl DomainExtent {
    /// Every dimension must hold at least two cells.
    pub fn new(nx: usize, ny: usize, nz: usize) -> LbResult<Self> {
        if nx < 2 || ny < 2 || nz < 2 {
            return Err(LbError::Configuration(format!(
                "domain extent {nx}x{ny}x{nz} must have more than one cell along every axis"
            )));
        }
        Ok(DomainExtent { nx, ny, nz })
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    pub fn get_number_of_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn get_bounding_box(&self) -> Box3D {
        Box3D::new([0, self.nx - 1], [0, self.ny - 1], [0, self.nz - 1])
    }

    /// Linear index of a cell, x varying fastest.
    pub fn linear_index(&self, index: [usize; 3]) -> usize {
        index[0] + self.nx * (index[1] + self.ny * index[2])
    }

    pub fn cell_index(&self, i: usize) -> [usize; 3] {
        let x = i % self.nx;
        let y = (i / self.nx) % self.ny;
        let z = i / (self.nx * self.ny);
        [x, y, z]
    }
}

// -------------------------------------------------------------------------- STRUCT: Box3D

/// Inclusive axis-aligned box of lattice cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Box3D {
    pub x: [usize; 2],
    pub y: [usize; 2],
    pub z: [usize; 2],
}

impl Box3D {
    pub fn new(x: [usize; 2], y: [usize; 2], z: [usize; 2]) -> Self {
        Box3D { x, y, z }
    }

    pub fn range(&self, dimension: usize) -> [usize; 2] {
        match dimension {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn contains(&self, index: [usize; 3]) -> bool {
        (0..3).all(|x| {
            let [lo, hi] = self.range(x);
            lo <= index[x] && index[x] <= hi
        })
    }

    pub fn get_number_of_cells(&self) -> usize {
        (0..3)
            .map(|x| {
                let [lo, hi] = self.range(x);
                hi + 1 - lo
            })
            .product()
    }

    pub fn intersects(&self, other: &Box3D) -> bool {
        (0..3).all(|x| {
            let [lo, hi] = self.range(x);
            let [other_lo, other_hi] = other.range(x);
            lo <= other_hi && other_lo <= hi
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (self.x[0]..=self.x[1]).flat_map(move |x| {
            (self.y[0]..=self.y[1])
                .flat_map(move |y| (self.z[0]..=self.z[1]).map(move |z| [x, y, z]))
        })
    }
}

// ----------------------------------------------------------------------- ENUM: FlowAxis

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAxis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl TryFrom<i64> for FlowAxis {
    type Error = LbError;

    fn try_from(value: i64) -> LbResult<Self> {
        match value {
            0 => Ok(FlowAxis::X),
            1 => Ok(FlowAxis::Y),
            2 => Ok(FlowAxis::Z),
            _ => Err(LbError::InvalidAxis(value)),
        }
    }
}

impl FlowAxis {
    pub fn dimension(&self) -> usize {
        *self as usize
    }

    /// Component of a vector along the axis.
    pub fn component<T: Copy>(&self, vector: &[T; 3]) -> T {
        vector[self.dimension()]
    }

    /// Number of cells along the axis.
    pub fn length(&self, extent: &DomainExtent) -> usize {
        self.component(&extent.as_array())
    }

    pub fn inlet_face(&self) -> BoundaryFace {
        match self {
            FlowAxis::X => BoundaryFace::West,
            FlowAxis::Y => BoundaryFace::South,
            FlowAxis::Z => BoundaryFace::Bottom,
        }
    }

    pub fn outlet_face(&self) -> BoundaryFace {
        match self {
            FlowAxis::X => BoundaryFace::East,
            FlowAxis::Y => BoundaryFace::North,
            FlowAxis::Z => BoundaryFace::Top,
        }
    }

    /// The domain bounding box collapsed to `coordinate` along the axis.
    pub fn slab(&self, extent: &DomainExtent, coordinate: usize) -> Box3D {
        let mut slab = extent.get_bounding_box();
        let range = [coordinate, coordinate];
        match self {
            FlowAxis::X => slab.x = range,
            FlowAxis::Y => slab.y = range,
            FlowAxis::Z => slab.z = range,
        }
        slab
    }

    /// The two axes perpendicular to the flow.
    pub fn transverse_dimensions(&self) -> [usize; 2] {
        match self {
            FlowAxis::X => [1, 2],
            FlowAxis::Y => [0, 2],
            FlowAxis::Z => [0, 1],
        }
    }
}

impl std::fmt::Display for DomainExtent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

impl std::fmt::Display for FlowAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlowAxis::X => "x",
            FlowAxis::Y => "y",
            FlowAxis::Z => "z",
        };
        write!(f, "{name}")
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// # Examples
/// ```
/// # use lbperm::axis::{inlet_region, DomainExtent, FlowAxis};
/// let extent = DomainExtent::new(10, 4, 6).unwrap();
/// let inlet = inlet_region(&extent, FlowAxis::Y);
///
/// assert_eq!(inlet.x, [0, 9]);
/// assert_eq!(inlet.y, [0, 0]);
/// assert_eq!(inlet.z, [0, 5]);
/// ```
pub fn inlet_region(extent: &DomainExtent, axis: FlowAxis) -> Box3D {
    axis.slab(extent, 0)
}

pub fn outlet_region(extent: &DomainExtent, axis: FlowAxis) -> Box3D {
    axis.slab(extent, axis.length(extent) - 1)
}

/// Zero velocity and a density decreasing linearly from 1 at the inlet to
/// `1 - delta_p * inv_cs2` at the outlet.
pub fn initial_pressure_field(
    index: [usize; 3],
    delta_p: Float,
    axis_length: usize,
    axis: FlowAxis,
    inv_cs2: Float,
) -> (Float, [Float; 3]) {
    let coordinate = axis.component(&index) as Float;
    let density = 1.0 - delta_p * inv_cs2 / (axis_length - 1) as Float * coordinate;
    (density, [0.0; 3])
}
