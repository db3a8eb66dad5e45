/// Geometrically spaced samples from `start` to `stop` inclusive.
///
/// Interpolates linearly in log10 space and pins both endpoints to their exact values. `n == 1`
/// yields `[start]`; `n == 0` yields an empty vector.
pub(crate) fn geomspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let log_start = start.log10();
    let log_stop = stop.log10();
    let step = (log_stop - log_start) / (n - 1) as f64;

    let mut out: Vec<f64> = (0..n)
        .map(|i| 10f64.powf(log_start + i as f64 * step))
        .collect();
    out[0] = start;
    out[n - 1] = stop;
    out
}

/// Round to the nearest integer, ties to even.
pub(crate) fn round_half_even(x: f64) -> f64 {
    x.round_ties_even()
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Blend `src` over `dst` with 8-bit coverage `alpha`.
pub(crate) fn lerp_u8(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    let inv = 255 - a;
    (mul_div255_u16(u16::from(src), a) + mul_div255_u16(u16::from(dst), inv)).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
