//! Scalar interpolation helpers shared by the timeline phases.

/// Normalize `value` into `0..=1` relative to `[min, max]`.
///
/// Values before `min` give 0 and values after `max` give 1. A degenerate
/// range (`min == max`) is treated as a step at `min`.
pub fn normalize(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        return 0.0;
    }
    if value > max || max <= min {
        return 1.0;
    }
    (value - min) / (max - min)
}

/// Inclusive range check that accepts the bounds in either order.
pub fn is_between(value: f32, start: f32, end: f32) -> bool {
    let (lo, hi) = if start > end { (end, start) } else { (start, end) };
    value >= lo && value <= hi
}

/// Grow from `start` toward a larger `end`.
pub fn enlarge(start: f32, end: f32, t: f32) -> f32 {
    if start > end {
        log::warn!("enlarge called with start {} > end {}", start, end);
    }
    start + (end - start) * t
}

/// Shrink from `start` toward a smaller `end`.
pub fn reduce(start: f32, end: f32, t: f32) -> f32 {
    if start < end {
        log::warn!("reduce called with start {} < end {}", start, end);
    }
    end + (start - end) * (1.0 - t)
}

/// Piecewise-linear function through `(value, at)` keyframes.
///
/// Before the first keyframe the first value is returned, after the last
/// keyframe the last value.
pub fn keyframes(t: f32, frames: &[(f32, f32)]) -> f32 {
    let Some(&(first, first_at)) = frames.first() else {
        log::warn!("keyframes called without frames");
        return 0.0;
    };
    if t < first_at {
        return first;
    }
    for pair in frames.windows(2) {
        let (a, a_at) = pair[0];
        let (b, b_at) = pair[1];
        if t >= a_at && t <= b_at {
            return a + normalize(t, a_at, b_at) * (b - a);
        }
    }
    frames[frames.len() - 1].0
}
