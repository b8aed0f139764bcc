//! Screen geometry and the shared surface layout table.
//!
//! Every overlay surface the widget manages has exactly one frame in the
//! [`SurfaceLayout`] table, indexed by [`SurfaceId`]. Only the orchestrator
//! writes to the table; components that need a frame receive a copy.

use std::ops::{Index, IndexMut};

use crate::surface::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from its four edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Square of the given half-side centered on (cx, cy).
    pub fn centered(cx: f32, cy: f32, half_side: f32) -> Self {
        Self::from_ltrb(cx - half_side, cy - half_side, cx + half_side, cy + half_side)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn with_origin(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }

    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - amount * 2.0).max(0.0),
            height: (self.height - amount * 2.0).max(0.0),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// One frame per overlay surface, in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceLayout {
    button: Rect,
    expanded: Rect,
    remove_target: Rect,
}

impl SurfaceLayout {
    pub fn new(button: Size, expanded: Size, remove_target: Size) -> Self {
        Self {
            button: Rect::new(0.0, 0.0, button.width, button.height),
            expanded: Rect::new(0.0, 0.0, expanded.width, expanded.height),
            remove_target: Rect::new(0.0, 0.0, remove_target.width, remove_target.height),
        }
    }

    /// Move a surface without touching its size.
    pub fn set_origin(&mut self, id: SurfaceId, x: f32, y: f32) {
        let frame = &mut self[id];
        frame.x = x;
        frame.y = y;
    }

    /// Read-only copy handed to components that are not allowed to write.
    pub fn snapshot(&self) -> SurfaceLayout {
        *self
    }
}

impl Index<SurfaceId> for SurfaceLayout {
    type Output = Rect;

    fn index(&self, id: SurfaceId) -> &Rect {
        match id {
            SurfaceId::Button => &self.button,
            SurfaceId::Expanded => &self.expanded,
            SurfaceId::RemoveTarget => &self.remove_target,
        }
    }
}

impl IndexMut<SurfaceId> for SurfaceLayout {
    fn index_mut(&mut self, id: SurfaceId) -> &mut Rect {
        match id {
            SurfaceId::Button => &mut self.button,
            SurfaceId::Expanded => &mut self.expanded,
            SurfaceId::RemoveTarget => &mut self.remove_target,
        }
    }
}
