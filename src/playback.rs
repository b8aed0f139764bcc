//! Minimal playback model the widget reflects.
//!
//! The widget does not play audio. It mirrors the play/pause flag and the
//! progress of whatever player the host drives, and reports every change to
//! one optional outward listener.

use crate::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Outward subscriber for playback changes.
pub trait PlaybackListener {
    fn on_state_changed(&mut self, _old: PlaybackStatus, _new: PlaybackStatus) {}
    /// `percentage` is in `0..=1`.
    fn on_progress_changed(&mut self, _position: Millis, _duration: Millis, _percentage: f32) {}
}

/// A status transition produced by a playback command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub old: PlaybackStatus,
    pub new: PlaybackStatus,
}

#[derive(Default)]
pub struct PlaybackState {
    status: PlaybackStatus,
    duration: Millis,
    position: Millis,
    listener: Option<Box<dyn PlaybackListener>>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn position(&self) -> Millis {
        self.position
    }

    /// Played fraction in `0..=1`; zero when the duration is unknown.
    pub fn percentage(&self) -> f32 {
        if self.duration == 0 {
            return 0.0;
        }
        (self.position as f32 / self.duration as f32).clamp(0.0, 1.0)
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn PlaybackListener>>) {
        self.listener = listener;
    }

    pub fn start(&mut self) -> Option<StatusChange> {
        self.transition(PlaybackStatus::Playing)
    }

    /// Pause playback. No-op unless currently playing.
    pub fn pause(&mut self) -> Option<StatusChange> {
        if self.status != PlaybackStatus::Playing {
            return None;
        }
        self.transition(PlaybackStatus::Paused)
    }

    /// Stop playback and rewind to the start.
    pub fn stop(&mut self) -> Option<StatusChange> {
        let change = self.transition(PlaybackStatus::Stopped);
        if change.is_some() && self.position != 0 {
            self.set_position(0);
        }
        change
    }

    pub fn set_duration(&mut self, duration: Millis) -> bool {
        if self.duration == duration {
            return false;
        }
        self.duration = duration;
        self.notify_progress();
        true
    }

    pub fn set_position(&mut self, position: Millis) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        self.notify_progress();
        true
    }

    fn transition(&mut self, new: PlaybackStatus) -> Option<StatusChange> {
        let old = self.status;
        if old == new {
            return None;
        }
        self.status = new;
        log::debug!("playback {:?} -> {:?}", old, new);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_state_changed(old, new);
        }
        Some(StatusChange { old, new })
    }

    fn notify_progress(&mut self) {
        let (position, duration, percentage) = (self.position, self.duration, self.percentage());
        if let Some(listener) = self.listener.as_mut() {
            listener.on_progress_changed(position, duration, percentage);
        }
    }
}
