use crate::prelude_crate::*;

pub(crate) fn equilibrium(
    density: Float,
    velocity: &[Float; 3],
    vel_set_params: &VelocitySetParameters,
) -> Vec<Float> {
    let c = vel_set_params.get_c();
    let w = vel_set_params.get_w();
    let u_dot_u = velocity.iter().map(|u_x| u_x * u_x).sum::<Float>();
    c.iter()
        .zip(w.iter())
        .map(|(c_i, w_i)| {
            let u_dot_c = velocity
                .iter()
                .zip(c_i.iter())
                .map(|(u_x, c_x)| u_x * (*c_x as Float))
                .sum::<Float>();
            w_i * density
                * (1.0 + u_dot_c * CS_2_INV + 0.5 * u_dot_c * u_dot_c * CS_4_INV
                    - 0.5 * u_dot_u * CS_2_INV)
        })
        .collect()
}

pub(crate) fn bgk_collision(f: &[Float], f_eq: &[Float], tau: Float) -> Vec<Float> {
    let omega = DELTA_T / tau;
    let omega_prime = 1.0 - omega;
    f.iter()
        .zip(f_eq.iter())
        .map(|(f_i, f_eq_i)| omega_prime * f_i + omega * f_eq_i)
        .collect()
}

/// Two-relaxation-time collision; `omega_plus` sets the viscosity and
/// `omega_minus` follows from the magic parameter.
pub(crate) fn trt_collision(
    f: &[Float],
    f_eq: &[Float],
    omega_plus: Float,
    omega_minus: Float,
    vel_set_params: &VelocitySetParameters,
) -> Vec<Float> {
    (0..vel_set_params.get_q())
        .map(|i| {
            let i_bar = vel_set_params.get_opposite_direction(i);
            let f_plus = 0.5 * (f[i] + f[i_bar]);
            let f_eq_plus = 0.5 * (f_eq[i] + f_eq[i_bar]);
            let f_minus = 0.5 * (f[i] - f[i_bar]);
            let f_eq_minus = 0.5 * (f_eq[i] - f_eq[i_bar]);
            f[i] - omega_plus * DELTA_T * (f_plus - f_eq_plus)
                - omega_minus * DELTA_T * (f_minus - f_eq_minus)
        })
        .collect()
}

/// Relaxes the moments `M f` towards `M f_eq` at their own rates and maps
/// them back to populations.
pub(crate) fn mrt_collision(
    f: &[Float],
    f_eq: &[Float],
    relaxation_vector: &[Float],
    vel_set_params: &VelocitySetParameters,
) -> Vec<Float> {
    let mrt_matrix = vel_set_params.get_mrt_matrix();
    let mrt_inverse_matrix = vel_set_params.get_mrt_inverse_matrix();
    let m_star = mrt_matrix
        .iter()
        .zip(relaxation_vector.iter())
        .map(|(row, s_k)| {
            let (m_k, m_eq_k) = row
                .iter()
                .zip(f.iter().zip(f_eq.iter()))
                .fold((0.0, 0.0), |(m, m_eq), (matrix_ki, (f_i, f_eq_i))| {
                    (m + matrix_ki * f_i, m_eq + matrix_ki * f_eq_i)
                });
            m_k - s_k * DELTA_T * (m_k - m_eq_k)
        })
        .collect::<Vec<Float>>();
    mrt_inverse_matrix
        .iter()
        .map(|row| {
            row.iter()
                .zip(m_star.iter())
                .map(|(inverse_matrix_ik, m_star_k)| inverse_matrix_ik * m_star_k)
                .sum::<Float>()
        })
        .collect()
}

pub(crate) fn density(f: &[Float]) -> Float {
    f.iter().sum()
}

pub(crate) fn velocity(f: &[Float], density: Float, vel_set_params: &VelocitySetParameters) -> [Float; 3] {
    let c = vel_set_params.get_c();
    let mut velocity = [0.0; 3];
    velocity.iter_mut().enumerate().for_each(|(x, u_x)| {
        *u_x = f
            .iter()
            .zip(c.iter())
            .map(|(f_i, c_i)| f_i * (c_i[x] as Float))
            .sum::<Float>()
            / density;
    });
    velocity
}
