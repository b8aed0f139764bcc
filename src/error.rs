use thiserror::Error;

use crate::surface::SurfaceId;

/// Rejected widget configuration, returned by the builder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("bubbles max size {max} is smaller than min size {min}")]
    BubbleRange { min: f32, max: f32 },
    #[error("click threshold {click_ms}ms exceeds long-press threshold {long_press_ms}ms")]
    Thresholds { click_ms: u64, long_press_ms: u64 },
    #[error("frame speed must be positive (got {0})")]
    FrameSpeed(f32),
    #[error("expanded width {width} must exceed button height {height}")]
    TooNarrow { width: f32, height: f32 },
}

/// Failure reported by the overlay host.
///
/// The widget treats these as recoverable: surface presence may legitimately
/// lag behind widget state during rapid show/hide sequences.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("surface {0:?} is not attached")]
    NotAttached(SurfaceId),
    #[error("surface {0:?} is already attached")]
    AlreadyAttached(SurfaceId),
    #[error("host rejected surface {id:?}: {reason}")]
    Rejected { id: SurfaceId, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
