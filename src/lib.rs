//! Core of a floating, draggable audio control widget.
//!
//! The crate owns everything except the platform: gesture recognition,
//! phased animations, the bubble particle field and the widget lifecycle.
//! Drawing goes through the [`Canvas`](widgets::Canvas) trait and surface
//! management through [`OverlayHost`](surface::OverlayHost), so the host
//! only forwards pointer events, supplies a monotonic clock and paints.

pub mod animation;
pub mod audio_widget;
pub mod config;
pub mod error;
pub mod gesture;
pub mod jobs;
pub mod layout;
pub mod playback;
pub mod surface;
pub mod widgets;

/// Host-supplied monotonic time in milliseconds.
pub type Millis = u64;

pub use audio_widget::{AudioWidget, ControlsListener, WidgetState, WidgetStateListener};
pub use config::{WidgetBuilder, WidgetConfig};
pub use error::{ConfigError, HostError, Result};

pub mod prelude {
    pub use crate::animation::TimingFunction;
    pub use crate::gesture::{PointerEvent, Thresholds};
    pub use crate::layout::{Rect, Size};
    pub use crate::playback::{PlaybackListener, PlaybackStatus};
    pub use crate::surface::{CommandHost, OverlayHost, SurfaceCommand, SurfaceId};
    pub use crate::widgets::{Canvas, Color, ExpandDirection, ExpandState, Icon, ImageHandle};
    pub use crate::{
        AudioWidget, ControlsListener, Millis, WidgetBuilder, WidgetConfig, WidgetState,
        WidgetStateListener,
    };
}
