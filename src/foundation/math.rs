use std::f64::consts::TAU;

/// One step of exponential approach: move `current` by `rate` of the remaining distance.
pub(crate) fn approach(current: f64, target: f64, rate: f64) -> f64 {
    current + (target - current) * rate
}

/// Evenly spread oscillation phase for slot `index` of a pool of `total`.
pub(crate) fn phase_for_index(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (index as f64 / total as f64) * TAU
}

/// Alpha-only "source over destination".
pub(crate) fn alpha_over(src: u8, dst: u8) -> u8 {
    let s = u16::from(src);
    let d = u16::from(dst);
    (s + mul_div255(d, 255 - s)) as u8
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
