//! Numeric helpers shared by the track builder, projector and integrators.
//!
//! All functions are pure. Easing curves map `percent` in `[0, 1]` onto the
//! range `a..b`.

use std::f32::consts::PI;

/// Linear interpolation
pub fn interpolate(a: f32, b: f32, percent: f32) -> f32 {
    a + (b - a) * percent
}

/// Quadratic ease-in
pub fn ease_in(a: f32, b: f32, percent: f32) -> f32 {
    a + (b - a) * percent.powi(2)
}

/// Quadratic ease-out
pub fn ease_out(a: f32, b: f32, percent: f32) -> f32 {
    a + (b - a) * (1.0 - (1.0 - percent).powi(2))
}

/// Cosine ease-in-out
pub fn ease_in_out(a: f32, b: f32, percent: f32) -> f32 {
    a + (b - a) * ((-(percent * PI).cos() / 2.0) + 0.5)
}

/// Exponential fog falloff: 1.0 at distance 0, approaching 0 with distance.
pub fn exponential_fog(distance: f32, density: f32) -> f32 {
    1.0 / (distance * distance * density).exp()
}

/// Add `increment` to `start` and wrap the result into `[0, max)`.
///
/// Handles increments spanning several multiples of `max` in either direction.
pub fn increase(start: f32, increment: f32, max: f32) -> f32 {
    let result = (start + increment).rem_euclid(max);
    // rem_euclid can round up to `max` for tiny negative inputs
    if result >= max {
        0.0
    } else {
        result
    }
}

/// Fractional progress of `n` through its containing `total`-sized slot.
pub fn percent_remaining(n: f32, total: f32) -> f32 {
    n.rem_euclid(total) / total
}

/// Apply an acceleration (or deceleration, when negative) for `dt` seconds.
pub fn accelerate(v: f32, accel: f32, dt: f32) -> f32 {
    v + accel * dt
}

/// Clamp `value` into `[min, max]`
pub fn limit(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// 1-D overlap of two centred intervals.
///
/// Each entity spans `width * percent` around its centre; bounds are inclusive.
/// `percent` below 1.0 shrinks both hitboxes.
pub fn overlap(x1: f32, w1: f32, x2: f32, w2: f32, percent: f32) -> bool {
    let half = percent / 2.0;
    let min1 = x1 - w1 * half;
    let max1 = x1 + w1 * half;
    let min2 = x2 - w2 * half;
    let max2 = x2 + w2 * half;
    !(max1 < min2 || min1 > max2)
}

/// Format a lap time as `m.ss.t`, or `s.t` under a minute.
pub fn format_time(dt: f32) -> String {
    let minutes = (dt / 60.0).floor() as i32;
    let seconds = (dt - minutes as f32 * 60.0).floor() as i32;
    let tenths = (10.0 * (dt - dt.floor())).floor() as i32;

    if minutes > 0 {
        format!("{}.{:02}.{}", minutes, seconds, tenths)
    } else {
        format!("{}.{}", seconds, tenths)
    }
}
