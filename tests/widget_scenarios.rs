//! End-to-end widget behavior driven through a command-queue host.

use std::cell::RefCell;
use std::rc::Rc;

use audio_widget::prelude::*;
use audio_widget::{ConfigError, HostError};

const SCREEN: Size = Size::new(1080.0, 1920.0);
const LONG_PRESS: Millis = 628;
const EXPAND_MS: Millis = 34 * 70;
const COLLAPSE_MS: Millis = 12 * 70;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    State(WidgetState),
    Position(f32, f32),
    Playlist,
    Previous,
    PlayPause,
    Next,
    Album,
}

type Log = Rc<RefCell<Vec<Seen>>>;

struct StateRecorder(Log);

impl WidgetStateListener for StateRecorder {
    fn on_widget_state_changed(&mut self, state: WidgetState) {
        self.0.borrow_mut().push(Seen::State(state));
    }

    fn on_widget_position_changed(&mut self, cx: f32, cy: f32) {
        self.0.borrow_mut().push(Seen::Position(cx, cy));
    }
}

struct ControlsRecorder {
    log: Log,
    allow_toggle: bool,
}

impl ControlsListener for ControlsRecorder {
    fn on_playlist_clicked(&mut self) {
        self.log.borrow_mut().push(Seen::Playlist);
    }

    fn on_previous_clicked(&mut self) {
        self.log.borrow_mut().push(Seen::Previous);
    }

    fn on_play_pause_clicked(&mut self) -> bool {
        self.log.borrow_mut().push(Seen::PlayPause);
        self.allow_toggle
    }

    fn on_next_clicked(&mut self) {
        self.log.borrow_mut().push(Seen::Next);
    }

    fn on_album_clicked(&mut self) {
        self.log.borrow_mut().push(Seen::Album);
    }
}

fn widget() -> (AudioWidget<CommandHost>, Log) {
    let _ = env_logger::builder().is_test(true).try_init();
    let log = Log::default();
    let mut widget = WidgetBuilder::new()
        .random_seed(7)
        .build(CommandHost::new(SCREEN))
        .expect("default config is valid");
    widget.set_state_listener(Some(Box::new(StateRecorder(log.clone()))));
    (widget, log)
}

fn down(x: f32, y: f32, time: Millis) -> PointerEvent {
    PointerEvent::Down { x, y, time }
}

fn moved(x: f32, y: f32, time: Millis) -> PointerEvent {
    PointerEvent::Move { x, y, time }
}

fn up(x: f32, y: f32, time: Millis) -> PointerEvent {
    PointerEvent::Up { x, y, time }
}

fn states(log: &Log) -> Vec<WidgetState> {
    log.borrow()
        .iter()
        .filter_map(|seen| match seen {
            Seen::State(state) => Some(*state),
            _ => None,
        })
        .collect()
}

fn positions(log: &Log) -> Vec<(f32, f32)> {
    log.borrow()
        .iter()
        .filter_map(|seen| match seen {
            Seen::Position(x, y) => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

/// Long-press the button centered at `(cx, cy)` starting at `start` and run
/// the expansion to completion. Returns the completion time.
fn expand_from(widget: &mut AudioWidget<CommandHost>, cx: f32, cy: f32, start: Millis) -> Millis {
    widget.on_button_event(down(cx, cy, start));
    widget.advance(start + LONG_PRESS);
    widget.on_button_event(up(cx, cy, start + LONG_PRESS + 50));
    widget.advance(start + 2 * LONG_PRESS);
    assert_eq!(widget.expand_state(), ExpandState::Expanding);
    let done = start + 2 * LONG_PRESS + EXPAND_MS;
    widget.advance(done);
    done
}

#[test]
fn test_show_places_surfaces() {
    let (mut widget, log) = widget();
    widget.show(500.0, 800.0);

    assert!(widget.is_shown());
    assert_eq!(widget.state(), WidgetState::Collapsed);
    assert_eq!(
        widget.surface_frame(SurfaceId::Button),
        Rect::new(380.0, 680.0, 240.0, 240.0)
    );
    let commands = widget.host_mut().drain_commands();
    assert_eq!(
        commands,
        vec![
            SurfaceCommand::Add {
                id: SurfaceId::RemoveTarget,
                frame: Rect::new(480.0, 1980.0, 120.0, 120.0),
            },
            SurfaceCommand::Add {
                id: SurfaceId::Button,
                frame: Rect::new(380.0, 680.0, 240.0, 240.0),
            },
        ]
    );

    widget.show(10.0, 10.0);
    assert!(widget.host().commands().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_click_toggles_playback_and_blocks_during_pulse() {
    let (mut widget, log) = widget();
    widget.show(500.0, 800.0);

    assert!(widget.on_button_event(down(500.0, 800.0, 0)));
    assert!(widget.on_button_event(up(500.0, 800.0, 100)));
    assert_eq!(widget.playback_status(), PlaybackStatus::Playing);
    assert_eq!(positions(&log), vec![(500.0, 800.0)]);

    assert!(!widget.on_button_event(down(500.0, 800.0, 150)));
    widget.advance(400);
    assert!(widget.on_button_event(down(500.0, 800.0, 450)));
    widget.on_button_event(up(500.0, 800.0, 500));
    assert_eq!(widget.playback_status(), PlaybackStatus::Paused);

    widget.advance(700);
    assert!(!widget.is_remove_target_shown());
}

#[test]
fn test_play_pause_listener_can_veto_toggle() {
    let (mut widget, log) = widget();
    widget.set_controls_listener(Some(Box::new(ControlsRecorder {
        log: log.clone(),
        allow_toggle: false,
    })));
    widget.show(500.0, 800.0);

    widget.on_button_event(down(500.0, 800.0, 0));
    widget.on_button_event(up(500.0, 800.0, 50));

    assert_eq!(widget.playback_status(), PlaybackStatus::Stopped);
    assert_eq!(
        log.borrow().iter().filter(|seen| **seen == Seen::PlayPause).count(),
        1
    );
}

#[test]
fn test_long_press_expands_left_on_right_half() {
    let (mut widget, log) = widget();
    widget.show(800.0, 800.0);

    widget.on_button_event(down(800.0, 800.0, 0));
    widget.advance(LONG_PRESS);
    assert!(!widget.is_remove_target_shown());
    assert!(!widget.host().is_attached(SurfaceId::Expanded));

    widget.advance(2 * LONG_PRESS);
    assert_eq!(widget.expand_direction(), ExpandDirection::Left);
    assert_eq!(widget.expand_state(), ExpandState::Expanding);
    assert!(widget.host().is_attached(SurfaceId::Expanded));
    let bar = widget.surface_frame(SurfaceId::Expanded);
    assert_eq!((bar.x, bar.y), (260.0, 680.0));

    widget.advance(2 * LONG_PRESS + EXPAND_MS - 1);
    assert!(states(&log).is_empty());
    widget.advance(2 * LONG_PRESS + EXPAND_MS);
    widget.advance(2 * LONG_PRESS + EXPAND_MS + 500);

    assert_eq!(widget.expand_state(), ExpandState::Expanded);
    assert_eq!(widget.state(), WidgetState::Expanded);
    assert_eq!(states(&log), vec![WidgetState::Expanded]);
}

#[test]
fn test_long_press_expands_right_on_left_half() {
    let (mut widget, _log) = widget();
    widget.show(200.0, 800.0);
    expand_from(&mut widget, 200.0, 800.0, 0);

    assert_eq!(widget.expand_direction(), ExpandDirection::Right);
    assert_eq!(widget.surface_frame(SurfaceId::Expanded).x, 140.0);
    assert_eq!(widget.state(), WidgetState::Expanded);
}

#[test]
fn test_drag_onto_remove_target_removes_widget() {
    let (mut widget, log) = widget();
    widget.show(500.0, 800.0);

    widget.on_button_event(down(500.0, 800.0, 0));
    widget.on_button_event(moved(500.0, 850.0, 100));
    widget.advance(700);
    assert!(widget.is_remove_target_shown());
    widget.advance(900);
    assert_eq!(widget.surface_frame(SurfaceId::RemoveTarget).y, 1740.0);

    widget.on_button_event(moved(540.0, 1800.0, 950));
    assert_eq!(
        widget.surface_frame(SurfaceId::Button),
        Rect::new(420.0, 1680.0, 240.0, 240.0)
    );
    assert!(widget.is_armed());

    widget.on_button_event(up(540.0, 1800.0, 1000));
    assert!(!widget.is_shown());
    assert_eq!(widget.state(), WidgetState::Removed);
    assert_eq!(states(&log), vec![WidgetState::Removed]);
    assert!(positions(&log).is_empty());
    assert!(!widget.host().is_attached(SurfaceId::Button));
    assert!(widget.host().is_attached(SurfaceId::RemoveTarget));

    widget.advance(1200);
    assert!(!widget.host().is_attached(SurfaceId::RemoveTarget));
    assert!(!widget.on_button_event(down(540.0, 1800.0, 1300)));
}

#[test]
fn test_drag_release_reports_clamped_position_once() {
    let (mut widget, log) = widget();
    widget.show(500.0, 800.0);

    widget.on_button_event(down(500.0, 800.0, 0));
    widget.on_button_event(moved(600.0, 900.0, 50));
    widget.on_button_event(moved(2000.0, 900.0, 100));
    widget.on_button_event(up(2000.0, 900.0, 300));

    assert_eq!(positions(&log), vec![(960.0, 900.0)]);
    assert_eq!(widget.playback_status(), PlaybackStatus::Stopped);
    widget.advance(700);
    assert!(!widget.is_remove_target_shown());
    assert!(widget.is_shown());
}

#[test]
fn test_arming_redraws_only_on_edges() {
    let (mut widget, _log) = widget();
    widget.show(500.0, 800.0);
    widget.on_button_event(down(500.0, 800.0, 0));
    widget.on_button_event(moved(500.0, 850.0, 100));
    widget.advance(700);
    widget.advance(900);

    let target_redraws = |widget: &mut AudioWidget<CommandHost>| {
        widget
            .host_mut()
            .drain_commands()
            .into_iter()
            .filter(|c| *c == SurfaceCommand::Redraw(SurfaceId::RemoveTarget))
            .count()
    };
    target_redraws(&mut widget);

    widget.on_button_event(moved(540.0, 1800.0, 950));
    assert!(widget.is_armed());
    assert_eq!(target_redraws(&mut widget), 1);

    widget.on_button_event(moved(550.0, 1810.0, 960));
    assert!(widget.is_armed());
    assert_eq!(target_redraws(&mut widget), 0);

    widget.on_button_event(moved(800.0, 1810.0, 970));
    assert!(!widget.is_armed());
    assert_eq!(target_redraws(&mut widget), 1);
}

#[test]
fn test_touch_outside_flips_overflowing_bar_and_collapses() {
    let (mut widget, log) = widget();
    widget.show(200.0, 800.0);
    let done = expand_from(&mut widget, 200.0, 800.0, 0);
    log.borrow_mut().clear();

    assert!(widget.on_expanded_event(down(300.0, 800.0, done + 100)));
    widget.on_expanded_event(moved(-100.0, 800.0, done + 150));
    widget.on_expanded_event(up(-100.0, 800.0, done + 400));
    assert_eq!(widget.surface_frame(SurfaceId::Expanded).x, -260.0);
    assert_eq!(positions(&log), vec![(-200.0, 800.0)]);

    widget.on_expanded_event(PointerEvent::Outside { time: done + 500 });
    assert_eq!(widget.expand_direction(), ExpandDirection::Left);
    assert_eq!(widget.expand_state(), ExpandState::Collapsing);
    assert_eq!(
        widget.surface_frame(SurfaceId::Button),
        Rect::new(160.0, 680.0, 240.0, 240.0)
    );
    assert_eq!(positions(&log).last(), Some(&(280.0, 800.0)));

    widget.advance(done + 500 + COLLAPSE_MS);
    assert_eq!(widget.state(), WidgetState::Collapsed);
    assert_eq!(states(&log), vec![WidgetState::Collapsed]);
    assert!(!widget.host().is_attached(SurfaceId::Expanded));
    assert!(!widget.on_expanded_event(PointerEvent::Outside { time: done + 2000 }));
}

#[test]
fn test_bar_controls_route_to_listener() {
    let (mut widget, log) = widget();
    widget.set_controls_listener(Some(Box::new(ControlsRecorder {
        log: log.clone(),
        allow_toggle: true,
    })));
    widget.show(200.0, 800.0);
    widget.on_button_event(down(200.0, 800.0, 0));
    widget.advance(LONG_PRESS);
    widget.advance(2 * LONG_PRESS);

    // the bar ignores input while it animates
    assert!(!widget.on_expanded_event(down(560.0, 800.0, 2 * LONG_PRESS + 10)));

    let done = 2 * LONG_PRESS + EXPAND_MS;
    widget.advance(done);
    log.borrow_mut().clear();

    // bar starts at x = 140, slots are 120 wide
    widget.on_expanded_event(down(560.0, 800.0, done + 100));
    widget.on_expanded_event(up(560.0, 800.0, done + 150));
    widget.on_expanded_event(down(200.0, 800.0, done + 200));
    widget.on_expanded_event(up(200.0, 800.0, done + 250));
    widget.on_expanded_event(down(440.0, 800.0, done + 300));
    widget.on_expanded_event(up(440.0, 800.0, done + 350));

    assert_eq!(
        *log.borrow(),
        vec![Seen::Next, Seen::Playlist, Seen::PlayPause]
    );
    assert_eq!(widget.playback_status(), PlaybackStatus::Playing);
}

#[test]
fn test_hide_is_idempotent() {
    let (mut widget, log) = widget();
    widget.show(500.0, 800.0);
    widget.hide();
    widget.hide();

    assert_eq!(states(&log), vec![WidgetState::Removed]);
    for id in SurfaceId::ALL {
        assert!(!widget.host().is_attached(id));
    }

    widget.show(300.0, 300.0);
    assert_eq!(widget.state(), WidgetState::Collapsed);
    assert!(widget.host().is_attached(SurfaceId::Button));
}

#[test]
fn test_hide_while_expanding_removes_bar() {
    let (mut widget, log) = widget();
    widget.show(200.0, 800.0);
    widget.on_button_event(down(200.0, 800.0, 0));
    widget.advance(LONG_PRESS);
    widget.advance(2 * LONG_PRESS + 100);
    assert!(widget.is_animating());

    widget.hide();
    widget.advance(5000);

    assert_eq!(widget.expand_state(), ExpandState::Collapsed);
    assert!(!widget.host().is_attached(SurfaceId::Expanded));
    assert_eq!(states(&log), vec![WidgetState::Removed]);
}

#[test]
fn test_playback_changes_request_redraw() {
    let (mut widget, _log) = widget();
    widget.show(500.0, 800.0);
    widget.host_mut().drain_commands();

    widget.set_duration(10_000);
    widget.set_position(2_500);
    assert_eq!(widget.position(), 2_500);
    assert!(widget
        .host()
        .commands()
        .contains(&SurfaceCommand::Redraw(SurfaceId::Button)));
}

#[test]
fn test_builder_rejects_invalid_config() {
    let result = WidgetBuilder::new()
        .bubbles(10, 30.0, 5.0)
        .build(CommandHost::new(SCREEN));
    assert!(matches!(result, Err(ConfigError::BubbleRange { .. })));
}

#[test]
fn test_reveal_from_earlier_press_is_ignored() {
    let (mut widget, _log) = widget();
    widget.show(500.0, 800.0);

    widget.on_button_event(down(500.0, 800.0, 0));
    assert_eq!(widget.next_deadline(), Some(LONG_PRESS));
    widget.on_button_event(up(500.0, 800.0, 300));

    widget.on_button_event(down(500.0, 800.0, 400));
    widget.on_button_event(moved(500.0, 850.0, 450));
    widget.advance(LONG_PRESS);
    assert!(!widget.is_remove_target_shown());
    assert_eq!(widget.next_deadline(), Some(400 + LONG_PRESS));

    widget.advance(400 + LONG_PRESS);
    assert!(widget.is_remove_target_shown());
}

#[test]
fn test_expand_from_earlier_press_is_ignored() {
    let (mut widget, _log) = widget();
    widget.show(200.0, 800.0);

    widget.on_button_event(down(200.0, 800.0, 0));
    widget.advance(LONG_PRESS);
    widget.on_button_event(up(200.0, 800.0, 700));

    widget.on_button_event(down(200.0, 800.0, 800));
    widget.on_button_event(up(200.0, 800.0, 850));
    assert_eq!(widget.playback_status(), PlaybackStatus::Playing);

    widget.advance(2 * LONG_PRESS);
    assert_eq!(widget.expand_state(), ExpandState::Collapsed);
    assert!(!widget.host().is_attached(SurfaceId::Expanded));
}

/// Window system that refuses the remove target and every removal.
#[derive(Default)]
struct RejectingHost {
    added: Vec<SurfaceId>,
    failures: usize,
}

impl OverlayHost for RejectingHost {
    fn screen_size(&self) -> Size {
        SCREEN
    }

    fn add_surface(&mut self, id: SurfaceId, _frame: Rect) -> Result<(), HostError> {
        if id == SurfaceId::RemoveTarget {
            self.failures += 1;
            return Err(HostError::Rejected {
                id,
                reason: "overlay permission revoked".to_string(),
            });
        }
        self.added.push(id);
        Ok(())
    }

    fn move_surface(&mut self, _id: SurfaceId, _x: f32, _y: f32) {}

    fn remove_surface(&mut self, id: SurfaceId) -> Result<(), HostError> {
        self.failures += 1;
        Err(HostError::NotAttached(id))
    }

    fn request_redraw(&mut self, _id: SurfaceId) {}
}

#[test]
fn test_host_errors_are_swallowed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let log = Log::default();
    let mut widget = WidgetBuilder::new()
        .random_seed(7)
        .build(RejectingHost::default())
        .expect("default config is valid");
    widget.set_state_listener(Some(Box::new(StateRecorder(log.clone()))));

    widget.show(500.0, 800.0);
    widget.hide();
    assert!(!widget.is_shown());
    widget.show(500.0, 800.0);

    assert!(widget.is_shown());
    assert_eq!(widget.state(), WidgetState::Collapsed);
    assert_eq!(states(&log), vec![WidgetState::Removed]);
    assert_eq!(widget.host().added, vec![SurfaceId::Button, SurfaceId::Button]);
    assert_eq!(widget.host().failures, 4);

    widget.on_button_event(down(500.0, 800.0, 0));
    widget.on_button_event(up(500.0, 800.0, 50));
    assert_eq!(widget.playback_status(), PlaybackStatus::Playing);
}
