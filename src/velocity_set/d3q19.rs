use crate::constants::Float;

pub const Q: usize = 19;

pub const C: [[i32; 3]; Q] = [
    [0, 0, 0],
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, -1],
    [1, -1, 0],
    [-1, 1, 0],
    [1, 0, -1],
    [-1, 0, 1],
    [0, 1, -1],
    [0, -1, 1],
];

/// Weight of a lattice vector from its squared length.
pub fn weight(c_dot_c: i32) -> Float {
    match c_dot_c {
        0 => 1.0 / 3.0,
        1 => 1.0 / 18.0,
        _ => 1.0 / 36.0,
    }
}

/// Moment polynomials of the d'Humieres D3Q19 basis evaluated at `c`:
/// density, energy, energy squared, momentum, heat flux, the stress
/// components and the third-order antisymmetric moments.
pub fn moments(c: &[i32; 3]) -> Vec<Float> {
    let [x, y, z] = (*c).map(|c_x| c_x as Float);
    let c2 = x * x + y * y + z * z;
    let heat_flux = 5.0 * c2 - 9.0;
    let pxx = 3.0 * x * x - c2;
    let pww = y * y - z * z;
    vec![
        1.0,
        19.0 * c2 - 30.0,
        (21.0 * c2 * c2 - 53.0 * c2 + 24.0) / 2.0,
        x,
        heat_flux * x,
        y,
        heat_flux * y,
        z,
        heat_flux * z,
        pxx,
        (3.0 * c2 - 5.0) * pxx,
        pww,
        (3.0 * c2 - 5.0) * pww,
        x * y,
        y * z,
        x * z,
        (y * y - z * z) * x,
        (z * z - x * x) * y,
        (x * x - y * y) * z,
    ]
}

/// Relaxation rates of the moments; the viscous stresses relax with `omega`.
pub fn mrt_relaxation_vector(omega: Float) -> Vec<Float> {
    vec![
        0.0, 1.19, 1.4, 0.0, 1.2, 0.0, 1.2, 0.0, 1.2, omega, 1.4, omega, 1.4, omega, omega, omega,
        1.98, 1.98, 1.98,
    ]
}
