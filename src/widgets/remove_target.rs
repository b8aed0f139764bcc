//! Drag-to-remove affordance.
//!
//! A round target with a cross that waits below the bottom screen edge and
//! slides into view while the button is being dragged. Dropping the
//! button's center onto it removes the widget.

use crate::animation::{Animatable, AnimationRun};
use crate::config::WidgetConfig;
use crate::layout::{Rect, Size};
use crate::Millis;

use super::widget::{Canvas, Color, Icon};

/// Result of advancing the slide animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideEvent {
    /// Target moved to a new top edge
    Moved(f32),
    /// Slide-out finished at the hidden position
    Hidden(f32),
}

#[derive(Debug, Clone)]
struct Slide {
    run: AnimationRun,
    from: f32,
    to: f32,
}

pub struct RemoveTarget {
    size: f32,
    x: f32,
    hidden_y: f32,
    visible_y: f32,
    y: f32,
    shown: bool,
    overlapped: bool,
    slide: Option<Slide>,
    slide_ms: f32,
    stroke: f32,
    color: Color,
    overlapped_color: Color,
}

impl RemoveTarget {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            size: config.height,
            x: 0.0,
            hidden_y: 0.0,
            visible_y: 0.0,
            y: 0.0,
            shown: false,
            overlapped: false,
            slide: None,
            slide_ms: config.remove_slide_ms as f32,
            stroke: config.cross_stroke_width,
            color: config.cross_color,
            overlapped_color: config.cross_overlapped_color,
        }
    }

    /// Stage the target centered horizontally below the screen.
    pub fn layout(&mut self, screen: Size) {
        let radius = self.size / 2.0;
        self.x = screen.width / 2.0 - radius;
        self.hidden_y = screen.height + radius;
        self.visible_y = screen.height - self.size - radius;
        self.y = self.hidden_y;
        self.shown = false;
        self.overlapped = false;
        self.slide = None;
    }

    pub fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    pub fn hidden_y(&self) -> f32 {
        self.hidden_y
    }

    pub fn visible_y(&self) -> f32 {
        self.visible_y
    }

    /// Whether the target has been revealed and not yet fully slid out.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    pub fn is_overlapped(&self) -> bool {
        self.overlapped
    }

    /// Update the armed indicator. Returns true only when it changed.
    pub fn set_overlapped(&mut self, overlapped: bool) -> bool {
        if self.overlapped == overlapped {
            return false;
        }
        self.overlapped = overlapped;
        true
    }

    /// Whether a point (usually the dragged button's center) lies on the
    /// target at its current position.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.frame().contains(x, y)
    }

    pub fn slide_in(&mut self, now: Millis) {
        self.shown = true;
        self.start_slide(now, self.hidden_y, self.visible_y);
    }

    /// Start sliding out. No-op unless the target is shown.
    pub fn slide_out(&mut self, now: Millis) -> bool {
        if !self.shown {
            return false;
        }
        self.start_slide(now, self.y, self.hidden_y);
        true
    }

    fn start_slide(&mut self, now: Millis, from: f32, to: f32) {
        self.slide = Some(Slide {
            run: AnimationRun::start(now, self.slide_ms),
            from,
            to,
        });
    }

    pub fn advance(&mut self, now: Millis) -> Option<SlideEvent> {
        let slide = self.slide.as_mut()?;
        let step = slide.run.advance(now);
        let t = if slide.run.duration() > 0.0 {
            slide.run.position() / slide.run.duration()
        } else {
            1.0
        };
        self.y = <f32 as Animatable>::lerp(&slide.from, &slide.to, t);
        if !step.is_finished() {
            return Some(SlideEvent::Moved(self.y));
        }
        let hidden = slide.to == self.hidden_y;
        self.slide = None;
        if hidden {
            self.shown = false;
            self.overlapped = false;
            Some(SlideEvent::Hidden(self.y))
        } else {
            Some(SlideEvent::Moved(self.y))
        }
    }

    /// Jump straight to the hidden position.
    pub fn reset(&mut self) {
        self.slide = None;
        self.shown = false;
        self.overlapped = false;
        self.y = self.hidden_y;
    }

    pub fn paint(&self, canvas: &mut dyn Canvas) {
        let color = if self.overlapped {
            self.overlapped_color
        } else {
            self.color
        };
        let local = Rect::new(0.0, 0.0, self.size, self.size);
        canvas.arc(local.inset(self.stroke / 2.0), 0.0, 360.0, self.stroke, color);
        canvas.icon(Icon::Cross, local.inset(self.size / 4.0), color.a);
    }
}
