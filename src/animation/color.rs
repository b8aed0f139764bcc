use super::Animatable;
use crate::widgets::Color;

/// Linear RGB crossfade between two colors.
///
/// The transition is a pure function of progress, so the same instance can
/// be sampled from several phases without interfering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorTransition {
    pub from: Color,
    pub to: Color,
}

impl ColorTransition {
    pub fn new(from: Color, to: Color) -> Self {
        Self { from, to }
    }

    /// Color at progress `t`, exact at both endpoints.
    pub fn at(&self, t: f32) -> Color {
        if t <= 0.0 {
            return self.from;
        }
        if t >= 1.0 {
            return self.to;
        }
        Color::lerp(&self.from, &self.to, t)
    }

    /// The same transition played backwards.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let transition = ColorTransition::new(Color::BLACK, Color::WHITE);
        assert_eq!(transition.at(0.0), Color::BLACK);
        assert_eq!(transition.at(1.0), Color::WHITE);
        assert_eq!(transition.at(2.0), Color::WHITE);
    }

    #[test]
    fn test_midpoint_and_reverse() {
        let transition = ColorTransition::new(Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0));
        let mid = transition.at(0.5);
        assert_eq!((mid.r, mid.g, mid.b), (0.5, 0.0, 0.5));
        assert_eq!(transition.reversed().at(0.0), transition.at(1.0));
    }
}
