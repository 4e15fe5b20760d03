use crate::axis::FlowAxis;
use crate::constants::Float;
use crate::engine::{self, VelocityField};
use crate::error::{LbError, LbResult};
use rayon::prelude::*;

/// Transport coefficients of a converged run, in lattice units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportMetrics {
    pub mean_velocity: Float,
    pub viscosity: Float,
    pub pressure_gradient: Float,
    pub permeability: Float,
    pub tortuosity: Float,
}

/// Space separated, in the order mean velocity, viscosity, pressure gradient,
/// permeability, tortuosity.
impl std::fmt::Display for TransportMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.mean_velocity,
            self.viscosity,
            self.pressure_gradient,
            self.permeability,
            self.tortuosity
        )
    }
}

fn axial_velocity_sum(field: &VelocityField, axis: FlowAxis) -> Float {
    field
        .get_data()
        .par_iter()
        .map(|u| axis.component(u))
        .sum::<Float>()
}

/// Ratio of the summed velocity magnitude to the summed velocity along `axis`.
///
/// # Examples
/// ```
/// # use lbperm::analysis::compute_tortuosity;
/// # use lbperm::axis::{DomainExtent, FlowAxis};
/// # use lbperm::engine::VelocityField;
/// let extent = DomainExtent::new(4, 4, 4).unwrap();
/// let field = VelocityField::uniform(extent, [0.0, 0.0, 0.01]);
///
/// assert_eq!(compute_tortuosity(&field, FlowAxis::Z).unwrap(), 1.0);
/// assert!(compute_tortuosity(&field, FlowAxis::X).is_err());
/// ```
pub fn compute_tortuosity(field: &VelocityField, axis: FlowAxis) -> LbResult<Float> {
    let axial_sum = axial_velocity_sum(field, axis);
    if axial_sum == 0.0 {
        return Err(LbError::DegenerateResult {
            quantity: "flow-direction velocity sum",
            value: axial_sum,
        });
    }
    let magnitude_sum = field
        .get_data()
        .par_iter()
        .map(engine::norm)
        .sum::<Float>();
    Ok(magnitude_sum / axial_sum)
}

/// Darcy permeability `viscosity * mean_u / (delta_p / (axis_length - 1))`
/// together with the tortuosity of the field.
pub fn compute_permeability(
    field: &VelocityField,
    viscosity: Float,
    delta_p: Float,
    axis: FlowAxis,
) -> LbResult<TransportMetrics> {
    let axis_length = axis.length(field.get_extent());
    let pressure_gradient = delta_p / (axis_length - 1) as Float;
    if pressure_gradient == 0.0 {
        return Err(LbError::DegenerateResult {
            quantity: "pressure gradient",
            value: pressure_gradient,
        });
    }
    let tortuosity = compute_tortuosity(field, axis)?;
    let number_of_cells = field.get_data().len() as Float;
    let mean_velocity = axial_velocity_sum(field, axis) / number_of_cells;
    let permeability = viscosity * mean_velocity / pressure_gradient;
    Ok(TransportMetrics {
        mean_velocity,
        viscosity,
        pressure_gradient,
        permeability,
        tortuosity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::DomainExtent;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_axial_flow() {
        let extent = DomainExtent::new(10, 5, 5).unwrap();
        let v = 0.004;
        let viscosity = 1.0 / 6.0;
        let delta_p = 0.009;
        let field = VelocityField::uniform(extent, [v, 0.0, 0.0]);

        let metrics = compute_permeability(&field, viscosity, delta_p, FlowAxis::X).unwrap();

        assert_eq!(metrics.tortuosity, 1.0);
        assert_relative_eq!(metrics.mean_velocity, v, epsilon = 1e-15);
        assert_relative_eq!(metrics.pressure_gradient, 0.001, epsilon = 1e-15);
        assert_relative_eq!(metrics.permeability, viscosity * v / 0.001, epsilon = 1e-12);
        assert_eq!(metrics.viscosity, viscosity);
    }

    #[test]
    fn test_uniform_flow_along_every_axis() {
        let extent = DomainExtent::new(6, 8, 12).unwrap();
        for axis in [FlowAxis::X, FlowAxis::Y, FlowAxis::Z] {
            let mut u = [0.0; 3];
            u[axis.dimension()] = 0.01;
            let field = VelocityField::uniform(extent, u);

            let metrics = compute_permeability(&field, 0.1, 0.02, axis).unwrap();
            let gradient = 0.02 / (axis.length(&extent) - 1) as Float;

            assert_relative_eq!(metrics.tortuosity, 1.0);
            assert_relative_eq!(metrics.permeability, 0.1 * 0.01 / gradient, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tortuosity_of_inclined_flow() {
        let extent = DomainExtent::new(3, 3, 3).unwrap();
        let field = VelocityField::uniform(extent, [0.03, 0.04, 0.0]);

        let tortuosity = compute_tortuosity(&field, FlowAxis::X).unwrap();

        assert_relative_eq!(tortuosity, 0.05 / 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_velocity_includes_solid_cells() {
        let extent = DomainExtent::new(2, 2, 2).unwrap();
        let mut data = vec![[0.0; 3]; 8];
        data[0] = [0.08, 0.0, 0.0];
        let field = VelocityField::new(extent, data);

        let metrics = compute_permeability(&field, 1.0, 1.0, FlowAxis::X).unwrap();

        assert_relative_eq!(metrics.mean_velocity, 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_transverse_flow_is_degenerate() {
        let extent = DomainExtent::new(4, 4, 4).unwrap();
        let field = VelocityField::uniform(extent, [0.0, 0.02, 0.0]);

        assert!(matches!(
            compute_tortuosity(&field, FlowAxis::X),
            Err(LbError::DegenerateResult { .. })
        ));
        assert!(matches!(
            compute_permeability(&field, 0.1, 0.01, FlowAxis::X),
            Err(LbError::DegenerateResult { .. })
        ));
    }

    #[test]
    fn test_cancelling_flow_is_degenerate() {
        let extent = DomainExtent::new(2, 2, 2).unwrap();
        let data = (0..8)
            .map(|i| if i % 2 == 0 { [0.5, 0.0, 0.0] } else { [-0.5, 0.0, 0.0] })
            .collect();
        let field = VelocityField::new(extent, data);

        assert!(compute_tortuosity(&field, FlowAxis::X).is_err());
    }

    #[test]
    fn test_zero_pressure_drop_is_degenerate() {
        let extent = DomainExtent::new(4, 4, 4).unwrap();
        let field = VelocityField::uniform(extent, [0.01, 0.0, 0.0]);

        assert!(matches!(
            compute_permeability(&field, 0.1, 0.0, FlowAxis::X),
            Err(LbError::DegenerateResult {
                quantity: "pressure gradient",
                ..
            })
        ));
    }

    #[test]
    fn test_display_order() {
        let metrics = TransportMetrics {
            mean_velocity: 1.0,
            viscosity: 2.0,
            pressure_gradient: 3.0,
            permeability: 4.0,
            tortuosity: 5.5,
        };

        assert_eq!(metrics.to_string(), "1 2 3 4 5.5");
    }
}
