pub use crate::BoundaryFace::{self, *};
pub use crate::NodeType::{self, *};
pub use crate::axis::{Box3D, DomainExtent, FlowAxis};
pub use crate::cli::Config;
pub use crate::constants::Float;
pub use crate::engine::{LatticeEngine, VelocityField};
pub use crate::error::{LbError, LbResult};
pub use crate::momentum::{self, CollisionOperator};
pub use crate::velocity_set::VelocitySet::{self, *};
