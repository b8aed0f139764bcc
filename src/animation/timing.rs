//! Timing functions (easing curves) for timeline phases.
//!
//! A timing function remaps the normalized progress of a phase before the
//! phase effect sees it. Phases that move, resize or recolor something opt
//! in to the widget's configured easing; discrete toggles (icon visibility,
//! particle activation) always see linear progress.

/// Easing curve applied to phase progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimingFunction {
    /// Constant speed
    #[default]
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Accelerate-decelerate
    EaseInOut,
}

impl TimingFunction {
    /// Evaluate the curve at `t` in `0..=1`.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_and_out_bend_opposite_ways() {
        assert_eq!(TimingFunction::EaseIn.evaluate(0.5), 0.25);
        assert_eq!(TimingFunction::EaseOut.evaluate(0.5), 0.75);
        assert_eq!(TimingFunction::EaseOut.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        let f = TimingFunction::EaseInOut;
        assert!(f.evaluate(0.0).abs() < 1e-6);
        assert!((f.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!((f.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!(f.evaluate(0.25) < 0.25);
    }
}
