use crate::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Opaque handle to a bitmap owned by the host's asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Icons the widget asks the renderer to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Playlist,
    Previous,
    Play,
    Pause,
    Next,
    DefaultAlbum,
    AlbumCover(ImageHandle),
    /// Cross drawn inside the remove target
    Cross,
}

/// Draw calls the external renderer must accept.
///
/// Coordinates are local to the surface being painted.
pub trait Canvas {
    fn rounded_rect(&mut self, bounds: Rect, corner_radius: f32, color: Color);
    fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    /// Stroke an arc; angles in degrees, 0 at twelve o'clock, clockwise.
    fn arc(&mut self, bounds: Rect, start_deg: f32, sweep_deg: f32, stroke: f32, color: Color);
    fn icon(&mut self, icon: Icon, bounds: Rect, alpha: f32);
}
