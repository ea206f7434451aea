//! Angle helpers shared by the scrolling scales.
//!
//! [`limit`] wraps a single step only: the input must be within one
//! range-width of the target window. Values further out come back outside
//! `[lower, upper)`.

/// Sensor samples arrive as tenths of a degree.
pub const TENTHS_PER_DEGREE: i32 = 10;

pub const PITCH_LIMIT_TENTHS: i32 = 900;
pub const ROLL_LIMIT_TENTHS: i32 = 1800;

/// Wrap `value` into `[lower, upper)` by adding or subtracting the range
/// width once.
pub fn limit(value: f64, lower: f64, upper: f64) -> f64 {
    let width = upper - lower;
    let mut value = value;
    if value < lower {
        value += width;
    }
    if value >= upper {
        value -= width;
    }
    value
}

/// Compass heading wrap into `[0, 360)`.
pub fn limit_heading(value: f64) -> f64 {
    limit(value, 0.0, 360.0)
}

/// First logical value of a window of `window_tick_count + 1` ticks
/// centred on `current`.
pub fn window_start(current: f64, tick_spacing: f64, window_tick_count: u32) -> f64 {
    (current / tick_spacing).floor() * tick_spacing - tick_spacing * f64::from(window_tick_count / 2)
}

/// Sub-tick remainder of `current` in `[0, tick_spacing)`.
pub fn sub_tick(current: f64, tick_spacing: f64) -> f64 {
    current.rem_euclid(tick_spacing)
}

/// Pitch wrap into `[-900, 900)` tenths.
pub fn wrap_pitch_tenths(pitch: i32) -> i32 {
    wrap_repeated(pitch, PITCH_LIMIT_TENTHS)
}

/// Roll wrap into `[-1800, 1800)` tenths.
pub fn wrap_roll_tenths(roll: i32) -> i32 {
    wrap_repeated(roll, ROLL_LIMIT_TENTHS)
}

fn wrap_repeated(mut value: i32, half_width: i32) -> i32 {
    let width = 2 * half_width;
    while value >= half_width {
        value -= width;
    }
    while value < -half_width {
        value += width;
    }
    value
}

pub fn tenths_to_degrees(tenths: i32) -> f64 {
    f64::from(tenths) / f64::from(TENTHS_PER_DEGREE)
}

pub fn degrees_to_tenths(degrees: f64) -> i32 {
    (degrees * f64::from(TENTHS_PER_DEGREE)).round() as i32
}
