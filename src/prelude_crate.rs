pub(crate) use crate::constants::*;
pub(crate) use crate::kernel;
pub(crate) use crate::prelude::*;
pub(crate) use crate::velocity_set;
pub(crate) use crate::velocity_set::Parameters as VelocitySetParameters;
pub(crate) use std::collections::HashMap;
pub(crate) use std::sync::{Arc, RwLock};
