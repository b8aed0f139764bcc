//! Pointer gesture recognition for draggable overlay surfaces.
//!
//! A [`GestureRecognizer`] turns the raw pointer stream of one surface into
//! touched / moved / click / long-click / released / outside callbacks on a
//! [`GestureHandler`]. It also drags the surface: every move computes the
//! candidate frame, runs it through the surface's [`BoundsClamp`] and
//! commits the result through the handler.
//!
//! Long-press detection is a deferred check. Instead of owning a timer the
//! recognizer remembers when the check is due; the host's frame clock calls
//! [`GestureRecognizer::poll`], and every later event of the same session
//! polls first so the check is never observed out of order.

mod bounds;

pub use bounds::{BoundsClamp, EdgeSliceClamp, ScreenClamp};

use bitflags::bitflags;

use crate::layout::{Rect, Size};
use crate::Millis;

/// Time and distance thresholds separating click, long-press and drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Longest press that still counts as a click (inclusive)
    pub click_max_ms: Millis,
    /// Hold time after which a press becomes a long-press (inclusive)
    pub long_press_min_ms: Millis,
    /// Displacement that marks the session as a drag
    pub significant_movement_px: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            click_max_ms: 200,
            long_press_min_ms: 628,
            significant_movement_px: 20.0,
        }
    }
}

/// Raw pointer input in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32, time: Millis },
    Move { x: f32, y: f32, time: Millis },
    Up { x: f32, y: f32, time: Millis },
    /// Pointer activity outside the surface
    Outside { time: Millis },
}

impl PointerEvent {
    pub fn time(&self) -> Millis {
        match self {
            PointerEvent::Down { time, .. }
            | PointerEvent::Move { time, .. }
            | PointerEvent::Up { time, .. }
            | PointerEvent::Outside { time } => *time,
        }
    }
}

bitflags! {
    /// Per-session classification state
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct SessionFlags: u8 {
        const LONG_PRESS_CANCELED  = 0b001;
        const MOVED_PAST_THRESHOLD = 0b010;
        const LONG_PRESS_FIRED     = 0b100;
    }
}

/// State of one down → up touch sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSession {
    pub start_x: f32,
    pub start_y: f32,
    pub start_time: Millis,
    /// Surface frame at pointer-down
    pub start_frame: Rect,
    pub current_x: f32,
    pub current_y: f32,
    /// Distance from the down position at the last move
    pub displacement: f32,
    pub flags: SessionFlags,
}

impl PointerSession {
    fn local_start(&self) -> (f32, f32) {
        (
            self.start_x - self.start_frame.x,
            self.start_y - self.start_frame.y,
        )
    }
}

/// Receiver of classified gestures for one surface.
///
/// Coordinates passed to the callbacks are local to the surface frame as it
/// was at pointer-down.
pub trait GestureHandler {
    /// Current frame of the dragged surface in screen coordinates
    fn frame(&self) -> Rect;
    fn screen_size(&self) -> Size;
    /// Commit a new, already clamped, top-left for the surface
    fn move_to(&mut self, x: f32, y: f32);

    fn can_be_touched(&self) -> bool {
        true
    }
    fn on_touched(&mut self, _x: f32, _y: f32) {}
    /// Delta actually applied to the surface since the previous move
    fn on_moved(&mut self, _dx: f32, _dy: f32) {}
    fn on_click(&mut self, _x: f32, _y: f32) {}
    fn on_long_click(&mut self, _x: f32, _y: f32) {}
    fn on_released(&mut self, _x: f32, _y: f32) {}
    fn on_touch_outside(&mut self) {}
}

pub struct GestureRecognizer {
    thresholds: Thresholds,
    clamp: Box<dyn BoundsClamp>,
    session: Option<PointerSession>,
}

impl GestureRecognizer {
    pub fn new(thresholds: Thresholds, clamp: Box<dyn BoundsClamp>) -> Self {
        Self {
            thresholds,
            clamp,
            session: None,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    /// Feed one pointer event. Returns whether the event was consumed.
    pub fn handle<H: GestureHandler + ?Sized>(&mut self, event: PointerEvent, handler: &mut H) -> bool {
        match event {
            PointerEvent::Down { x, y, time } => self.on_down(x, y, time, handler),
            PointerEvent::Move { x, y, time } => {
                self.poll(time, handler);
                self.on_move(x, y, handler)
            }
            PointerEvent::Up { x, y, time } => {
                self.poll(time, handler);
                self.on_up(x, y, time, handler)
            }
            PointerEvent::Outside { .. } => {
                handler.on_touch_outside();
                false
            }
        }
    }

    /// Run the deferred long-press check if it is due at `now`.
    ///
    /// The check is a no-op once the session moved, was released early or
    /// already fired.
    pub fn poll<H: GestureHandler + ?Sized>(&mut self, now: Millis, handler: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let blocked = SessionFlags::LONG_PRESS_CANCELED
            | SessionFlags::MOVED_PAST_THRESHOLD
            | SessionFlags::LONG_PRESS_FIRED;
        if session.flags.intersects(blocked) {
            return;
        }
        if now.saturating_sub(session.start_time) < self.thresholds.long_press_min_ms {
            return;
        }
        session.flags.insert(SessionFlags::LONG_PRESS_FIRED);
        let (x, y) = session.local_start();
        log::debug!("long press at ({}, {})", x, y);
        handler.on_long_click(x, y);
    }

    /// Drop the current session without classifying it.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn on_down<H: GestureHandler + ?Sized>(&mut self, x: f32, y: f32, time: Millis, handler: &mut H) -> bool {
        if !handler.can_be_touched() {
            return false;
        }
        let frame = handler.frame();
        self.session = Some(PointerSession {
            start_x: x,
            start_y: y,
            start_time: time,
            start_frame: frame,
            current_x: x,
            current_y: y,
            displacement: 0.0,
            flags: SessionFlags::empty(),
        });
        handler.on_touched(x - frame.x, y - frame.y);
        true
    }

    fn on_move<H: GestureHandler + ?Sized>(&mut self, x: f32, y: f32, handler: &mut H) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.flags.contains(SessionFlags::LONG_PRESS_FIRED) {
            return false;
        }
        let dx = x - session.start_x;
        let dy = y - session.start_y;
        session.current_x = x;
        session.current_y = y;
        session.displacement = dx.hypot(dy);
        if session.displacement >= self.thresholds.significant_movement_px {
            session.flags.insert(SessionFlags::MOVED_PAST_THRESHOLD);
        }

        let frame = handler.frame();
        let candidate = Rect::new(
            session.start_frame.x + dx,
            session.start_frame.y + dy,
            frame.width,
            frame.height,
        );
        let (left, top) = self.clamp.clamp(candidate, handler.screen_size());
        handler.move_to(left, top);
        handler.on_moved(left - frame.x, top - frame.y);
        true
    }

    fn on_up<H: GestureHandler + ?Sized>(&mut self, x: f32, y: f32, time: Millis, handler: &mut H) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        let elapsed = time.saturating_sub(session.start_time);
        if elapsed <= self.thresholds.long_press_min_ms {
            session.flags.insert(SessionFlags::LONG_PRESS_CANCELED);
        }
        if elapsed <= self.thresholds.click_max_ms
            && !session.flags.contains(SessionFlags::LONG_PRESS_FIRED)
        {
            let (cx, cy) = session.local_start();
            handler.on_click(cx, cy);
        }
        handler.on_released(x - session.start_frame.x, y - session.start_frame.y);
        true
    }
}
