//! Overlay surfaces and the host service that places them.
//!
//! The widget owns three always-on-top surfaces. It never talks to a window
//! system directly: every add, move and remove goes through an
//! [`OverlayHost`]. [`CommandHost`] is a ready-made host that records the
//! requests as [`SurfaceCommand`]s for an event loop to drain each frame.
//!
//! ```ignore
//! let mut host = CommandHost::new(Size::new(1080.0, 1920.0));
//! // ... widget calls ...
//! for command in host.drain_commands() {
//!     match command {
//!         SurfaceCommand::Add { id, frame } => window_system.open(id, frame),
//!         SurfaceCommand::Move { id, x, y } => window_system.place(id, x, y),
//!         SurfaceCommand::Remove(id) => window_system.close(id),
//!         SurfaceCommand::Redraw(id) => window_system.damage(id),
//!     }
//! }
//! ```

use std::collections::HashSet;

use crate::error::HostError;
use crate::layout::{Rect, Size};

/// The overlay surfaces managed by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// Collapsed play/pause button
    Button,
    /// Expanded control bar
    Expanded,
    /// Drag-to-remove affordance
    RemoveTarget,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 3] = [SurfaceId::Button, SurfaceId::Expanded, SurfaceId::RemoveTarget];

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceId::Button => "button",
            SurfaceId::Expanded => "expanded",
            SurfaceId::RemoveTarget => "remove-target",
        }
    }
}

/// Host positioning service.
pub trait OverlayHost {
    /// Usable screen area in pixels.
    fn screen_size(&self) -> Size;
    fn add_surface(&mut self, id: SurfaceId, frame: Rect) -> Result<(), HostError>;
    fn move_surface(&mut self, id: SurfaceId, x: f32, y: f32);
    fn remove_surface(&mut self, id: SurfaceId) -> Result<(), HostError>;
    /// Visual state of the surface changed.
    fn request_redraw(&mut self, id: SurfaceId);
}

/// Deferred request for the window system.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Add { id: SurfaceId, frame: Rect },
    Move { id: SurfaceId, x: f32, y: f32 },
    Remove(SurfaceId),
    Redraw(SurfaceId),
}

/// Host that queues surface commands instead of executing them.
///
/// Tracks which surfaces are attached so it reports the same errors a real
/// window system would. Consecutive redraws of one surface are coalesced.
#[derive(Debug, Default)]
pub struct CommandHost {
    screen: Size,
    attached: HashSet<SurfaceId>,
    commands: Vec<SurfaceCommand>,
}

impl CommandHost {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            ..Default::default()
        }
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    pub fn is_attached(&self, id: SurfaceId) -> bool {
        self.attached.contains(&id)
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Take all pending commands. Called by the event loop once per frame.
    pub fn drain_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl OverlayHost for CommandHost {
    fn screen_size(&self) -> Size {
        self.screen
    }

    fn add_surface(&mut self, id: SurfaceId, frame: Rect) -> Result<(), HostError> {
        if !self.attached.insert(id) {
            return Err(HostError::AlreadyAttached(id));
        }
        self.commands.push(SurfaceCommand::Add { id, frame });
        Ok(())
    }

    fn move_surface(&mut self, id: SurfaceId, x: f32, y: f32) {
        if self.attached.contains(&id) {
            self.commands.push(SurfaceCommand::Move { id, x, y });
        }
    }

    fn remove_surface(&mut self, id: SurfaceId) -> Result<(), HostError> {
        if !self.attached.remove(&id) {
            return Err(HostError::NotAttached(id));
        }
        self.commands.push(SurfaceCommand::Remove(id));
        Ok(())
    }

    fn request_redraw(&mut self, id: SurfaceId) {
        if self.commands.last() != Some(&SurfaceCommand::Redraw(id)) {
            self.commands.push(SurfaceCommand::Redraw(id));
        }
    }
}
