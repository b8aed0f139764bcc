//! Clamp policies for draggable surfaces.

use crate::layout::{Rect, Size};

/// Maps an unclamped candidate frame to the top-left it may occupy.
///
/// Implementations must be pure: the same candidate and screen always give
/// the same result, and clamping an already clamped frame changes nothing.
pub trait BoundsClamp {
    fn clamp(&self, candidate: Rect, screen: Size) -> (f32, f32);
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Keeps the whole surface on screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenClamp;

impl BoundsClamp for ScreenClamp {
    fn clamp(&self, candidate: Rect, screen: Size) -> (f32, f32) {
        (
            clamp_axis(candidate.x, 0.0, screen.width - candidate.width),
            clamp_axis(candidate.y, 0.0, screen.height - candidate.height),
        )
    }
}

/// Lets a wide surface hang off either horizontal edge as long as a slice
/// of `visible_slice` pixels stays on screen. Vertically the full height
/// must fit.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSliceClamp {
    pub visible_slice: f32,
}

impl EdgeSliceClamp {
    pub fn new(visible_slice: f32) -> Self {
        Self { visible_slice }
    }
}

impl BoundsClamp for EdgeSliceClamp {
    fn clamp(&self, candidate: Rect, screen: Size) -> (f32, f32) {
        let slice = self.visible_slice.min(candidate.width);
        (
            clamp_axis(
                candidate.x,
                slice - candidate.width,
                screen.width - slice,
            ),
            clamp_axis(candidate.y, 0.0, screen.height - candidate.height),
        )
    }
}
