//! The floating audio widget.
//!
//! [`AudioWidget`] owns the three overlay surfaces and routes input between
//! them. The host forwards pointer events for each surface, calls
//! [`AudioWidget::advance`] once per frame with the current time and paints
//! whichever surfaces it was asked to redraw.
//!
//! ```ignore
//! let mut widget = WidgetBuilder::new().build(CommandHost::new(screen))?;
//! widget.set_state_listener(Some(Box::new(MyListener)));
//! widget.show(500.0, 800.0);
//!
//! // event loop
//! widget.on_button_event(PointerEvent::Down { x, y, time });
//! widget.advance(frame_time);
//! for command in widget.host_mut().drain_commands() { /* ... */ }
//! ```

use bitflags::bitflags;

use crate::animation::random_source;
use crate::config::WidgetConfig;
use crate::gesture::{EdgeSliceClamp, GestureHandler, GestureRecognizer, PointerEvent, ScreenClamp};
use crate::jobs::JobQueue;
use crate::layout::{Rect, Size, SurfaceLayout};
use crate::playback::{PlaybackListener, PlaybackState, PlaybackStatus};
use crate::surface::{OverlayHost, SurfaceId};
use crate::widgets::{
    Canvas, ControlButton, ExpandCollapseController, ExpandDirection, ExpandState, ImageHandle,
    PlayPauseButton, RemoveTarget, SlideEvent,
};
use crate::Millis;

/// Lifecycle state reported to the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Collapsed,
    Expanded,
    Removed,
}

/// Receiver of control button clicks.
pub trait ControlsListener {
    fn on_playlist_clicked(&mut self) {}
    fn on_previous_clicked(&mut self) {}
    /// Return false to suppress the default start/pause toggle.
    fn on_play_pause_clicked(&mut self) -> bool {
        true
    }
    fn on_next_clicked(&mut self) {}
    fn on_album_clicked(&mut self) {}
}

/// Receiver of lifecycle and position changes.
pub trait WidgetStateListener {
    fn on_widget_state_changed(&mut self, _state: WidgetState) {}
    /// New center of the collapsed button in screen coordinates.
    fn on_widget_position_changed(&mut self, _cx: f32, _cy: f32) {}
}

bitflags! {
    /// Surfaces currently attached to the host
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    struct Attached: u8 {
        const BUTTON        = 0b001;
        const EXPANDED      = 0b010;
        const REMOVE_TARGET = 0b100;
    }
}

impl Attached {
    fn of(id: SurfaceId) -> Self {
        match id {
            SurfaceId::Button => Attached::BUTTON,
            SurfaceId::Expanded => Attached::EXPANDED,
            SurfaceId::RemoveTarget => Attached::REMOVE_TARGET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidgetJob {
    /// Slide the remove target in if press `n` is still down
    RevealRemoveTarget(u64),
    /// Open the expanded bar after the long-press of press `n`
    ExpandAfterLongPress(u64),
}

pub struct AudioWidget<H: OverlayHost> {
    button_touch: GestureRecognizer,
    expanded_touch: GestureRecognizer,
    core: WidgetCore<H>,
}

struct WidgetCore<H: OverlayHost> {
    config: WidgetConfig,
    host: H,
    screen: Size,
    layout: SurfaceLayout,
    attached: Attached,
    state: WidgetState,
    shown: bool,
    /// Pointer is up, or the press already turned into a long-press
    released: bool,
    /// Counts button presses; deferred jobs only act for their own press
    press: u64,
    now: Millis,
    button: PlayPauseButton,
    controller: ExpandCollapseController,
    remove_target: RemoveTarget,
    playback: PlaybackState,
    jobs: JobQueue<WidgetJob>,
    controls_listener: Option<Box<dyn ControlsListener>>,
    state_listener: Option<Box<dyn WidgetStateListener>>,
}

impl<H: OverlayHost> AudioWidget<H> {
    /// Create a widget without validating `config`. Prefer
    /// [`WidgetBuilder`](crate::WidgetBuilder).
    pub fn new(config: WidgetConfig, host: H) -> Self {
        let thresholds = config.thresholds;
        let rng = random_source(config.random_seed);
        let core = WidgetCore {
            screen: host.screen_size(),
            layout: SurfaceLayout::new(
                config.button_size(),
                config.expanded_size(),
                config.remove_target_size(),
            ),
            attached: Attached::empty(),
            state: WidgetState::Removed,
            shown: false,
            released: true,
            press: 0,
            now: 0,
            button: PlayPauseButton::new(&config),
            controller: ExpandCollapseController::new(&config, rng),
            remove_target: RemoveTarget::new(&config),
            playback: PlaybackState::new(),
            jobs: JobQueue::new(),
            controls_listener: None,
            state_listener: None,
            host,
            config,
        };
        Self {
            button_touch: GestureRecognizer::new(thresholds, Box::new(ScreenClamp)),
            expanded_touch: GestureRecognizer::new(
                thresholds,
                Box::new(EdgeSliceClamp::new(core.config.height)),
            ),
            core,
        }
    }

    /// Show the collapsed button centered on `(cx, cy)`. No-op while shown.
    pub fn show(&mut self, cx: f32, cy: f32) {
        let core = &mut self.core;
        if core.shown {
            return;
        }
        core.shown = true;
        core.released = true;
        core.screen = core.host.screen_size();

        core.remove_target.layout(core.screen);
        let staged = core.remove_target.frame();
        core.layout.set_origin(SurfaceId::RemoveTarget, staged.x, staged.y);
        if core.attached.contains(Attached::REMOVE_TARGET) {
            core.host.move_surface(SurfaceId::RemoveTarget, staged.x, staged.y);
        } else {
            core.add_surface(SurfaceId::RemoveTarget);
        }

        let h = core.config.height;
        core.layout.set_origin(SurfaceId::Button, cx - h, cy - h);
        core.add_surface(SurfaceId::Button);
        core.state = WidgetState::Collapsed;
        log::info!("widget shown at ({}, {})", cx, cy);
    }

    /// Remove the widget from the screen. No-op while hidden.
    pub fn hide(&mut self) {
        self.button_touch.cancel();
        self.expanded_touch.cancel();
        self.core.hide();
    }

    pub fn is_shown(&self) -> bool {
        self.core.shown
    }

    pub fn state(&self) -> WidgetState {
        self.core.state
    }

    /// Fine-grained state of the expanded bar.
    pub fn expand_state(&self) -> ExpandState {
        self.core.controller.state()
    }

    pub fn expand_direction(&self) -> ExpandDirection {
        self.core.controller.direction()
    }

    /// Whether the dragged button currently sits on the remove target.
    pub fn is_armed(&self) -> bool {
        self.core.remove_target.is_overlapped()
    }

    pub fn is_remove_target_shown(&self) -> bool {
        self.core.remove_target.is_shown()
    }

    /// Current frame of a surface in screen coordinates.
    pub fn surface_frame(&self, id: SurfaceId) -> Rect {
        self.core.layout[id]
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.core.config
    }

    pub fn host(&self) -> &H {
        &self.core.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.core.host
    }

    /// Pointer input on the collapsed button surface.
    pub fn on_button_event(&mut self, event: PointerEvent) -> bool {
        if !self.core.shown {
            return false;
        }
        self.core.now = self.core.now.max(event.time());
        let consumed = self.button_touch.handle(event, &mut ButtonHandler(&mut self.core));
        if !self.core.shown {
            self.button_touch.cancel();
            self.expanded_touch.cancel();
        }
        consumed
    }

    /// Pointer input on the expanded bar surface, including outside touches.
    pub fn on_expanded_event(&mut self, event: PointerEvent) -> bool {
        if !self.core.shown || !self.core.attached.contains(Attached::EXPANDED) {
            return false;
        }
        self.core.now = self.core.now.max(event.time());
        self.expanded_touch.handle(event, &mut ExpandedHandler(&mut self.core))
    }

    /// Drive the widget to `now`.
    ///
    /// Pending long-press checks run first, then deferred jobs that are due,
    /// then all animations.
    pub fn advance(&mut self, now: Millis) {
        self.core.now = self.core.now.max(now);
        let now = self.core.now;
        if self.core.shown {
            self.button_touch.poll(now, &mut ButtonHandler(&mut self.core));
            if self.core.attached.contains(Attached::EXPANDED) {
                self.expanded_touch.poll(now, &mut ExpandedHandler(&mut self.core));
            }
        }
        for job in self.core.jobs.drain_due(now) {
            self.core.run_job(job);
        }
        self.core.advance_animations(now);
    }

    /// Earliest time a deferred job wants to run.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.core.jobs.next_due()
    }

    pub fn is_animating(&self) -> bool {
        let core = &self.core;
        core.button.is_animation_in_progress()
            || core.controller.is_animation_in_progress()
            || core.remove_target.is_sliding()
    }

    // Playback controls

    pub fn play(&mut self) {
        if self.core.playback.start().is_some() {
            self.core.redraw_all();
        }
    }

    pub fn pause(&mut self) {
        if self.core.playback.pause().is_some() {
            self.core.redraw_all();
        }
    }

    pub fn stop(&mut self) {
        if self.core.playback.stop().is_some() {
            self.core.redraw_all();
        }
    }

    pub fn playback_status(&self) -> PlaybackStatus {
        self.core.playback.status()
    }

    pub fn duration(&self) -> Millis {
        self.core.playback.duration()
    }

    pub fn set_duration(&mut self, duration: Millis) {
        if self.core.playback.set_duration(duration) {
            self.core.redraw(SurfaceId::Button);
        }
    }

    pub fn position(&self) -> Millis {
        self.core.playback.position()
    }

    pub fn set_position(&mut self, position: Millis) {
        if self.core.playback.set_position(position) {
            self.core.redraw(SurfaceId::Button);
        }
    }

    /// Album art for the bar's album slot. `None` restores the default icon.
    pub fn set_album_cover(&mut self, cover: Option<ImageHandle>) {
        if self.core.controller.set_album_cover(cover) {
            self.core.redraw(SurfaceId::Expanded);
        }
    }

    pub fn set_controls_listener(&mut self, listener: Option<Box<dyn ControlsListener>>) {
        self.core.controls_listener = listener;
    }

    pub fn set_state_listener(&mut self, listener: Option<Box<dyn WidgetStateListener>>) {
        self.core.state_listener = listener;
    }

    pub fn set_playback_listener(&mut self, listener: Option<Box<dyn PlaybackListener>>) {
        self.core.playback.set_listener(listener);
    }

    // Painting, in surface-local coordinates

    pub fn paint_button(&self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        core.button
            .paint(canvas, core.playback.status(), core.playback.percentage());
    }

    pub fn paint_expanded(&self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        core.controller.paint(canvas, core.playback.is_playing());
    }

    pub fn paint_remove_target(&self, canvas: &mut dyn Canvas) {
        self.core.remove_target.paint(canvas);
    }
}

impl<H: OverlayHost> WidgetCore<H> {
    fn add_surface(&mut self, id: SurfaceId) {
        match self.host.add_surface(id, self.layout[id]) {
            Ok(()) => log::debug!("added {} surface", id.name()),
            Err(err) => log::warn!("could not add {} surface: {}", id.name(), err),
        }
        self.attached.insert(Attached::of(id));
    }

    /// Detach a surface, swallowing host errors.
    fn remove_surface(&mut self, id: SurfaceId) {
        self.attached.remove(Attached::of(id));
        match self.host.remove_surface(id) {
            Ok(()) => log::debug!("removed {} surface", id.name()),
            Err(err) => log::warn!("ignoring failed removal of {} surface: {}", id.name(), err),
        }
    }

    fn move_surface(&mut self, id: SurfaceId, x: f32, y: f32) {
        self.layout.set_origin(id, x, y);
        self.host.move_surface(id, x, y);
    }

    fn redraw(&mut self, id: SurfaceId) {
        if self.attached.contains(Attached::of(id)) {
            self.host.request_redraw(id);
        }
    }

    fn redraw_all(&mut self) {
        for id in SurfaceId::ALL {
            self.redraw(id);
        }
    }

    fn notify_state(&mut self, state: WidgetState) {
        self.state = state;
        log::debug!("widget state {:?}", state);
        if let Some(listener) = self.state_listener.as_mut() {
            listener.on_widget_state_changed(state);
        }
    }

    fn notify_position(&mut self) {
        let h = self.config.height;
        let frame = self.layout[SurfaceId::Button];
        if let Some(listener) = self.state_listener.as_mut() {
            listener.on_widget_position_changed(frame.x + h, frame.y + h);
        }
    }

    fn hide(&mut self) {
        if !self.shown {
            return;
        }
        self.shown = false;
        self.released = true;
        self.jobs.clear();
        self.controller.reset();
        self.button.cancel();
        self.button.enable_progress_changes(true, 0.0);

        self.remove_surface(SurfaceId::Button);
        if self.attached.contains(Attached::EXPANDED) {
            self.remove_surface(SurfaceId::Expanded);
        }
        if !self.remove_target.slide_out(self.now) {
            self.remove_target.reset();
            self.remove_surface(SurfaceId::RemoveTarget);
        }
        log::info!("widget hidden");
        self.notify_state(WidgetState::Removed);
    }

    fn is_ready_to_remove(&self) -> bool {
        let h = self.config.height;
        let frame = self.layout[SurfaceId::Button];
        self.remove_target.contains(frame.x + h, frame.y + h)
    }

    fn update_armed(&mut self) {
        let ready = self.is_ready_to_remove();
        if self.remove_target.set_overlapped(ready) {
            log::debug!("remove target armed: {}", ready);
            self.redraw(SurfaceId::RemoveTarget);
        }
    }

    fn run_job(&mut self, job: WidgetJob) {
        match job {
            WidgetJob::RevealRemoveTarget(press) => {
                if self.shown && !self.released && press == self.press {
                    self.remove_target.slide_in(self.now);
                }
            }
            WidgetJob::ExpandAfterLongPress(press) => {
                if self.shown && press == self.press {
                    self.show_expanded();
                }
            }
        }
    }

    /// Pick a direction from the button's screen half and open the bar.
    fn show_expanded(&mut self) {
        if self.controller.state() != ExpandState::Collapsed {
            return;
        }
        let h = self.config.height;
        let width = self.config.width;
        let button = self.layout[SurfaceId::Button];
        let direction = if button.x + h > self.screen.width / 2.0 {
            ExpandDirection::Left
        } else {
            ExpandDirection::Right
        };
        let x = match direction {
            ExpandDirection::Left => button.x - (width - h * 1.5),
            ExpandDirection::Right => button.x + h / 2.0,
        };
        self.layout.set_origin(SurfaceId::Expanded, x, button.y);
        if !self.attached.contains(Attached::EXPANDED) {
            self.add_surface(SurfaceId::Expanded);
        }
        let playing = self.playback.is_playing();
        self.controller.expand(direction, playing, self.now);
        self.redraw(SurfaceId::Expanded);
    }

    /// Keep the collapsed button under the bar's anchor end.
    fn follow_expanded(&mut self) {
        let h = self.config.height;
        let r = self.config.radius();
        let bar = self.layout[SurfaceId::Expanded];
        let x = match self.controller.direction() {
            ExpandDirection::Right => bar.x - r,
            ExpandDirection::Left => bar.x + self.config.width - h - r,
        };
        self.move_surface(SurfaceId::Button, x, bar.y);
        self.notify_position();
    }

    fn advance_animations(&mut self, now: Millis) {
        if self.button.advance(now) {
            self.redraw(SurfaceId::Button);
        }

        match self.remove_target.advance(now) {
            Some(SlideEvent::Moved(y)) => {
                let x = self.layout[SurfaceId::RemoveTarget].x;
                self.move_surface(SurfaceId::RemoveTarget, x, y);
            }
            Some(SlideEvent::Hidden(y)) => {
                let x = self.layout[SurfaceId::RemoveTarget].x;
                self.move_surface(SurfaceId::RemoveTarget, x, y);
                if !self.shown {
                    self.remove_surface(SurfaceId::RemoveTarget);
                }
            }
            None => {}
        }

        if self.controller.is_animation_in_progress() {
            let finished = self.controller.advance(now);
            self.redraw(SurfaceId::Expanded);
            match finished {
                Some(ExpandState::Expanded) => self.notify_state(WidgetState::Expanded),
                Some(ExpandState::Collapsed) => {
                    self.remove_surface(SurfaceId::Expanded);
                    let progress = self.playback.percentage();
                    self.button.enable_progress_changes(true, progress);
                    self.redraw(SurfaceId::Button);
                    self.notify_state(WidgetState::Collapsed);
                }
                _ => {}
            }
        }
    }

    fn play_pause_clicked(&mut self) {
        let toggle = self
            .controls_listener
            .as_mut()
            .map_or(true, |listener| listener.on_play_pause_clicked());
        if !toggle {
            return;
        }
        let change = if self.playback.is_playing() {
            self.playback.pause()
        } else {
            self.playback.start()
        };
        if change.is_some() {
            self.redraw_all();
        }
    }

    fn controls_clicked(&mut self, x: f32, y: f32) {
        let Some(button) = self.controller.on_controls_clicked(x, y) else {
            return;
        };
        log::debug!("{:?} clicked", button);
        if button == ControlButton::PlayPause {
            self.play_pause_clicked();
            return;
        }
        let Some(listener) = self.controls_listener.as_mut() else {
            return;
        };
        match button {
            ControlButton::Playlist => listener.on_playlist_clicked(),
            ControlButton::Previous => listener.on_previous_clicked(),
            ControlButton::Next => listener.on_next_clicked(),
            ControlButton::Album => listener.on_album_clicked(),
            ControlButton::PlayPause => {}
        }
    }
}

/// Gesture callbacks of the collapsed button.
struct ButtonHandler<'a, H: OverlayHost>(&'a mut WidgetCore<H>);

impl<H: OverlayHost> GestureHandler for ButtonHandler<'_, H> {
    fn frame(&self) -> Rect {
        self.0.layout[SurfaceId::Button]
    }

    fn screen_size(&self) -> Size {
        self.0.screen
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_surface(SurfaceId::Button, x, y);
    }

    fn can_be_touched(&self) -> bool {
        self.0.shown && !self.0.button.is_animation_in_progress()
    }

    fn on_touched(&mut self, _x: f32, _y: f32) {
        let core = &mut *self.0;
        core.released = false;
        core.press += 1;
        let due = core.now + core.config.thresholds.long_press_min_ms;
        core.jobs.schedule(due, WidgetJob::RevealRemoveTarget(core.press));
        core.button.on_touch_down();
        core.redraw(SurfaceId::Button);
    }

    fn on_moved(&mut self, _dx: f32, _dy: f32) {
        self.0.update_armed();
    }

    fn on_click(&mut self, _x: f32, _y: f32) {
        let core = &mut *self.0;
        core.button.on_click(core.now);
        core.play_pause_clicked();
    }

    fn on_long_click(&mut self, _x: f32, _y: f32) {
        let core = &mut *self.0;
        if core.remove_target.is_overlapped() {
            return;
        }
        core.released = true;
        let progress = core.playback.percentage();
        core.button.enable_progress_changes(false, progress);
        let due = core.now + core.config.thresholds.long_press_min_ms;
        core.jobs.schedule(due, WidgetJob::ExpandAfterLongPress(core.press));
    }

    fn on_released(&mut self, _x: f32, _y: f32) {
        let core = &mut *self.0;
        core.button.on_touch_up();
        core.released = true;
        core.redraw(SurfaceId::Button);
        let ready = core.is_ready_to_remove();
        core.remove_target.slide_out(core.now);
        if ready {
            core.hide();
        } else {
            core.notify_position();
        }
    }
}

/// Gesture callbacks of the expanded bar.
struct ExpandedHandler<'a, H: OverlayHost>(&'a mut WidgetCore<H>);

impl<H: OverlayHost> GestureHandler for ExpandedHandler<'_, H> {
    fn frame(&self) -> Rect {
        self.0.layout[SurfaceId::Expanded]
    }

    fn screen_size(&self) -> Size {
        self.0.screen
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_surface(SurfaceId::Expanded, x, y);
    }

    fn can_be_touched(&self) -> bool {
        !self.0.controller.is_animation_in_progress()
    }

    fn on_moved(&mut self, _dx: f32, _dy: f32) {
        self.0.follow_expanded();
    }

    fn on_click(&mut self, x: f32, y: f32) {
        self.0.controls_clicked(x, y);
    }

    fn on_touch_outside(&mut self) {
        let core = &mut *self.0;
        if core.controller.state() != ExpandState::Expanded {
            return;
        }
        let bar = core.layout[SurfaceId::Expanded];
        let direction = core.controller.direction();
        let overflows = match direction {
            ExpandDirection::Right => bar.x < 0.0,
            ExpandDirection::Left => bar.x + core.config.width > core.screen.width,
        };
        if overflows {
            log::debug!("bar overflows the screen, collapsing {:?}", direction.flipped());
            core.controller.set_direction(direction.flipped());
            core.follow_expanded();
        }
        let playing = core.playback.is_playing();
        core.controller.collapse(playing, core.now);
        core.redraw(SurfaceId::Expanded);
    }
}
