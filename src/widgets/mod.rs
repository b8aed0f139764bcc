pub mod expand_collapse;
pub mod play_pause;
pub mod remove_target;
pub mod widget;

pub use expand_collapse::{
    BarScene, ControlButton, ExpandCollapseController, ExpandDirection, ExpandState,
};
pub use play_pause::PlayPauseButton;
pub use remove_target::{RemoveTarget, SlideEvent};
pub use widget::{Canvas, Color, Icon, ImageHandle};
