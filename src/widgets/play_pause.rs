//! The collapsed play/pause button.
//!
//! Paints a filled circle whose color follows playback, a progress ring
//! around it, and the play or pause icon. A click starts a short ripple
//! pulse; while the pulse runs the button refuses new touches.

use crate::animation::interpolate::keyframes;
use crate::animation::{AnimationRun, ColorTransition, Timeline};
use crate::config::WidgetConfig;
use crate::layout::Rect;
use crate::playback::PlaybackStatus;
use crate::Millis;

use super::widget::{Canvas, Color, Icon};

/// Fraction of the circle radius the ripple grows past the button edge.
const RIPPLE_REACH: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PulseVisual {
    /// Inner circle scale
    scale: f32,
    /// Ripple ring radius as a fraction of `RIPPLE_REACH`
    ripple: f32,
    ripple_alpha: f32,
}

pub struct PlayPauseButton {
    radius: f32,
    padding: f32,
    stroke: f32,
    dark_color: Color,
    light_color: Color,
    progress_color: Color,
    shadow_color: Color,
    shadow_offset: (f32, f32),
    pressed: bool,
    /// Progress shown while changes are frozen
    frozen_progress: Option<f32>,
    pulse_duration: f32,
    pulse: Option<AnimationRun>,
    pulse_timeline: Timeline<PulseVisual>,
    visual: PulseVisual,
}

impl PlayPauseButton {
    pub fn new(config: &WidgetConfig) -> Self {
        let pulse_duration = config.click_pulse_ms as f32;
        let pulse_timeline = Timeline::<PulseVisual>::new(pulse_duration)
            .phase(0.0, pulse_duration, |v, t| {
                v.scale = keyframes(t, &[(1.0, 0.0), (0.9, 0.4), (1.0, 1.0)]);
            })
            .eased_phase(0.0, pulse_duration, config.easing.clone(), |v, t| {
                v.ripple = t;
                v.ripple_alpha = 1.0 - t;
            })
            .on_exit(|v| *v = PulseVisual::rest());
        Self {
            radius: config.radius(),
            padding: config.button_padding,
            stroke: config.progress_stroke_width,
            dark_color: config.dark_color,
            light_color: config.light_color,
            progress_color: config.progress_color,
            shadow_color: config.shadow_color,
            shadow_offset: (config.shadow_dx, config.shadow_dy),
            pressed: false,
            frozen_progress: None,
            pulse_duration,
            pulse: None,
            pulse_timeline,
            visual: PulseVisual::rest(),
        }
    }

    /// Fill color for the given playback status.
    pub fn color(&self, status: PlaybackStatus) -> Color {
        match status {
            PlaybackStatus::Playing => self.dark_color,
            PlaybackStatus::Paused | PlaybackStatus::Stopped => self.light_color,
        }
    }

    pub fn on_touch_down(&mut self) {
        self.pressed = true;
    }

    pub fn on_touch_up(&mut self) {
        self.pressed = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Start the click pulse.
    pub fn on_click(&mut self, now: Millis) {
        let mut run = AnimationRun::start(now, self.pulse_duration);
        self.pulse_timeline.drive(&mut run, now, &mut self.visual);
        self.pulse = Some(run);
    }

    /// Freeze or unfreeze the progress ring. While frozen the ring keeps the
    /// value it had at the moment of freezing.
    pub fn enable_progress_changes(&mut self, enabled: bool, current: f32) {
        self.frozen_progress = if enabled { None } else { Some(current) };
    }

    pub fn progress_changes_enabled(&self) -> bool {
        self.frozen_progress.is_none()
    }

    /// Progress the ring should show given the live playback progress.
    pub fn displayed_progress(&self, live: f32) -> f32 {
        self.frozen_progress.unwrap_or(live).clamp(0.0, 1.0)
    }

    pub fn is_animation_in_progress(&self) -> bool {
        self.pulse.as_ref().is_some_and(AnimationRun::is_running)
    }

    /// Advance the pulse. Returns whether anything visible changed.
    pub fn advance(&mut self, now: Millis) -> bool {
        let Some(run) = self.pulse.as_mut() else {
            return false;
        };
        let step = self.pulse_timeline.drive(run, now, &mut self.visual);
        if step.is_finished() {
            self.pulse = None;
            self.visual = PulseVisual::rest();
        }
        true
    }

    /// Stop the pulse at its resting frame.
    pub fn cancel(&mut self) {
        if let Some(mut run) = self.pulse.take() {
            let end = run.cancel();
            self.pulse_timeline.tick(end, &mut self.visual);
        }
        self.visual = PulseVisual::rest();
        self.pressed = false;
    }

    /// Paint onto the button surface. The surface is twice the circle's
    /// diameter; the circle sits in its center.
    pub fn paint(&self, canvas: &mut dyn Canvas, status: PlaybackStatus, live_progress: f32) {
        let center = self.radius * 2.0;
        let radius = self.radius * self.visual.scale;

        if self.visual.ripple_alpha > 0.0 && self.pulse.is_some() {
            let ripple = self.radius * (1.0 + RIPPLE_REACH * self.visual.ripple);
            canvas.circle(
                center,
                center,
                ripple,
                self.color(status).with_alpha(0.3 * self.visual.ripple_alpha),
            );
        }

        let (dx, dy) = self.shadow_offset;
        canvas.circle(center + dx, center + dy, radius, self.shadow_color);
        let fill = if self.pressed {
            ColorTransition::new(self.color(status), self.progress_color).at(0.15)
        } else {
            self.color(status)
        };
        canvas.circle(center, center, radius, fill);

        let ring = Rect::centered(center, center, self.radius + self.stroke);
        let sweep = 360.0 * self.displayed_progress(live_progress);
        if sweep > 0.0 {
            canvas.arc(ring, 0.0, sweep, self.stroke, self.progress_color);
        }

        let icon = match status {
            PlaybackStatus::Playing => Icon::Pause,
            PlaybackStatus::Paused | PlaybackStatus::Stopped => Icon::Play,
        };
        let half = (radius - self.padding).max(0.0) / 2.0;
        canvas.icon(icon, Rect::centered(center, center, half), 1.0);
    }
}

impl PulseVisual {
    fn rest() -> Self {
        Self {
            scale: 1.0,
            ripple: 0.0,
            ripple_alpha: 0.0,
        }
    }
}
