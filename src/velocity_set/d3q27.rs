use crate::constants::Float;

pub const Q: usize = 27;

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
    [1, 1, 1],
    [-1, -1, -1],
    [1, 1, -1],
    [-1, -1, 1],
    [1, -1, 1],
    [-1, 1, -1],
    [-1, 1, 1],
    [1, -1, -1],
];

pub fn weight(c_dot_c: i32) -> Float {
    match c_dot_c {
        0 => 8.0 / 27.0,
        1 => 2.0 / 27.0,
        2 => 1.0 / 54.0,
        _ => 1.0 / 216.0,
    }
}

const RAW_MOMENT_EXPONENTS: [[i32; 3]; Q] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
    [1, 0, 1],
    [0, 1, 1],
    [2, 0, 0],
    [0, 2, 0],
    [0, 0, 2],
    [1, 2, 0],
    [1, 0, 2],
    [2, 1, 0],
    [0, 1, 2],
    [2, 0, 1],
    [0, 2, 1],
    [1, 1, 1],
    [2, 2, 0],
    [2, 0, 2],
    [0, 2, 2],
    [2, 1, 1],
    [1, 2, 1],
    [1, 1, 2],
    [2, 2, 1],
    [2, 1, 2],
    [1, 2, 2],
    [2, 2, 2],
];

/// Raw moments `c_x^a c_y^b c_z^c` with exponents up to two.
pub fn moments(c: &[i32; 3]) -> Vec<Float> {
    RAW_MOMENT_EXPONENTS
        .iter()
        .map(|exponents| {
            c.iter()
                .zip(exponents.iter())
                .map(|(&c_x, &n)| (c_x as Float).powi(n))
                .product()
        })
        .collect()
}

/// Second-order moments relax with `omega`, higher orders to equilibrium.
pub fn mrt_relaxation_vector(omega: Float) -> Vec<Float> {
    RAW_MOMENT_EXPONENTS
        .iter()
        .map(|exponents| match exponents.iter().sum::<i32>() {
            0 | 1 => 0.0,
            2 => omega,
            _ => 1.0,
        })
        .collect()
}
