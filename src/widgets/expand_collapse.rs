//! The expanded control bar and its expand / collapse choreography.
//!
//! The bar is five equal slots: playlist, previous, play/pause, next and
//! album. Expanding grows a pill from the button's position to the full bar
//! width, crossfades it from the button color to the bar color, slides the
//! play icon from the anchor slot (album when growing left, playlist when
//! growing right) to the middle slot, fades the other icons in and releases
//! a burst of bubbles. Collapsing plays the reverse in a shorter time.
//!
//! Both animations are [`Timeline`]s over a [`BarScene`]. Breakpoints are
//! expressed in frame units scaled by the configured frame speed.

use crate::animation::interpolate::{enlarge, keyframes, reduce};
use crate::animation::{AnimationRun, ColorTransition, ParticleField, RandomSource, RunStep, Timeline};
use crate::config::WidgetConfig;
use crate::layout::Rect;
use crate::Millis;

use super::widget::{Canvas, Color, Icon, ImageHandle};

mod frames {
    pub const EXPAND_TOTAL: f32 = 34.0;
    pub const EXPAND_COLOR_END: f32 = 9.0;
    pub const EXPAND_SIZE_END: f32 = 12.0;
    pub const EXPAND_POSITION_START: f32 = 10.0;
    pub const EXPAND_POSITION_END: f32 = 18.0;
    pub const EXPAND_BUBBLES_START: f32 = 18.0;
    pub const EXPAND_BUBBLES_END: f32 = 32.0;
    pub const EXPAND_ELEMENTS_START: f32 = 20.0;
    pub const EXPAND_ELEMENTS_END: f32 = 27.0;

    pub const COLLAPSE_TOTAL: f32 = 12.0;
    pub const COLLAPSE_ELEMENTS_END: f32 = 3.0;
    pub const COLLAPSE_SIZE_START: f32 = 2.0;
    pub const COLLAPSE_SIZE_END: f32 = 12.0;
    pub const COLLAPSE_POSITION_START: f32 = 3.0;
    pub const COLLAPSE_POSITION_END: f32 = 12.0;
}

/// Gap kept between a fully grown icon and its slot edge.
const ELEMENT_INSET: f32 = 16.0;

/// Bubble alpha over the particle window: fade in, hold, fade out.
const BUBBLE_ALPHA: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.33), (1.0, 0.66), (0.0, 1.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandState {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Side of the button the bar grows toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandDirection {
    Left,
    #[default]
    Right,
}

impl ExpandDirection {
    pub fn flipped(self) -> Self {
        match self {
            ExpandDirection::Left => ExpandDirection::Right,
            ExpandDirection::Right => ExpandDirection::Left,
        }
    }
}

/// The five bar slots, in left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Playlist,
    Previous,
    PlayPause,
    Next,
    Album,
}

impl ControlButton {
    pub const ALL: [ControlButton; 5] = [
        ControlButton::Playlist,
        ControlButton::Previous,
        ControlButton::PlayPause,
        ControlButton::Next,
        ControlButton::Album,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

const PLAY: usize = ControlButton::PlayPause as usize;

/// Mutable visual state of the bar, written only by the timelines.
pub struct BarScene {
    width: f32,
    radius: f32,
    step: f32,
    button_padding: f32,
    surface_padding: f32,
    direction: ExpandDirection,
    transition: ColorTransition,
    color: Color,
    background: Rect,
    icons: [Rect; 5],
    alphas: [f32; 5],
    bubbles: ParticleField,
    bubble_alpha: f32,
}

impl BarScene {
    fn new(config: &WidgetConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut scene = Self {
            width: config.width,
            radius: config.radius(),
            step: config.width / 5.0,
            button_padding: config.button_padding,
            surface_padding: config.surface_padding,
            direction: ExpandDirection::default(),
            transition: ColorTransition::new(config.light_color, config.expanded_color),
            color: config.light_color,
            background: Rect::default(),
            icons: [Rect::default(); 5],
            alphas: [0.0; 5],
            bubbles: ParticleField::new(
                config.bubbles_count,
                config.bubbles_min_size,
                config.bubbles_max_size,
                rng,
            ),
            bubble_alpha: 0.0,
        };
        scene.alphas[PLAY] = 1.0;
        scene
    }

    /// Slot rectangle `index` shrunk by `padding` on every side.
    pub fn slot(&self, index: usize, padding: f32) -> Rect {
        Rect::from_ltrb(
            index as f32 * self.step + padding,
            self.radius + padding,
            (index + 1) as f32 * self.step - padding,
            self.radius * 3.0 - padding,
        )
    }

    fn anchor_index(&self) -> usize {
        match self.direction {
            ExpandDirection::Left => ControlButton::Album.index(),
            ExpandDirection::Right => ControlButton::Playlist.index(),
        }
    }

    /// Pill from button-sized (`t = 0`) to full bar width (`t = 1`).
    fn set_background(&mut self, t: f32) {
        let height = self.radius * 2.0;
        let top = self.radius;
        let grown = height + (self.width - height) * t;
        self.background = match self.direction {
            ExpandDirection::Left => Rect::from_ltrb(self.width - grown, top, self.width, top + height),
            ExpandDirection::Right => Rect::from_ltrb(0.0, top, grown, top + height),
        };
    }

    /// Grow the four secondary icons from their slot centers.
    fn scale_elements(&mut self, t: f32) {
        let alpha = t.clamp(0.0, 1.0);
        let half = t * (self.step / 2.0 - ELEMENT_INSET);
        for index in (0..5).filter(|&i| i != PLAY) {
            let slot = self.slot(index, self.button_padding);
            self.icons[index] = Rect::centered(slot.center_x(), slot.center_y(), half);
            self.alphas[index] = alpha;
        }
    }

    fn hide_elements(&mut self) {
        for index in (0..5).filter(|&i| i != PLAY) {
            self.alphas[index] = 0.0;
        }
    }

    fn place_play(&mut self, left: f32) {
        let slot = self.slot(PLAY, self.button_padding);
        self.icons[PLAY] = slot.with_origin(left, slot.y);
    }

    fn play_at_anchor(&mut self) {
        let anchor = self.slot(self.anchor_index(), self.button_padding);
        self.place_play(anchor.x);
    }

    fn play_at_center(&mut self) {
        self.icons[PLAY] = self.slot(PLAY, self.button_padding);
    }

    fn slide_play_out(&mut self, t: f32) {
        let center = self.slot(PLAY, self.button_padding).x;
        let anchor = self.slot(self.anchor_index(), self.button_padding).x;
        let left = match self.direction {
            ExpandDirection::Left => reduce(anchor, center, t),
            ExpandDirection::Right => enlarge(anchor, center, t),
        };
        self.place_play(left);
    }

    fn slide_play_back(&mut self, t: f32) {
        let center = self.slot(PLAY, self.button_padding).x;
        let anchor = self.slot(self.anchor_index(), self.button_padding).x;
        let left = match self.direction {
            ExpandDirection::Left => enlarge(center, anchor, t),
            ExpandDirection::Right => reduce(center, anchor, t),
        };
        self.place_play(left);
    }

    fn update_bubbles(&mut self, t: f32) {
        if !self.bubbles.is_active() {
            let center_y = self.background.center_y();
            self.bubbles.activate(self.surface_padding, self.width, center_y);
        }
        self.bubbles.advance(t);
        self.bubble_alpha = keyframes(t, &BUBBLE_ALPHA);
    }

    fn end_bubbles(&mut self) {
        self.bubbles.deactivate();
        self.bubble_alpha = 0.0;
    }

    pub fn direction(&self) -> ExpandDirection {
        self.direction
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn background(&self) -> Rect {
        self.background
    }

    pub fn icon_bounds(&self, button: ControlButton) -> Rect {
        self.icons[button.index()]
    }

    pub fn icon_alpha(&self, button: ControlButton) -> f32 {
        self.alphas[button.index()]
    }

    pub fn bubbles(&self) -> &ParticleField {
        &self.bubbles
    }

    pub fn bubble_alpha(&self) -> f32 {
        self.bubble_alpha
    }
}

fn expand_timeline(config: &WidgetConfig) -> Timeline<BarScene> {
    use frames::*;
    let u = config.frame_speed;
    let easing = config.easing.clone();
    Timeline::<BarScene>::new(EXPAND_TOTAL * u)
        .eased_phase(0.0, EXPAND_COLOR_END * u, easing.clone(), |s, t| {
            s.color = s.transition.at(t);
        })
        .on_exit(|s| s.color = s.transition.at(1.0))
        .eased_phase(0.0, EXPAND_SIZE_END * u, easing.clone(), BarScene::set_background)
        .on_exit(|s| s.set_background(1.0))
        .phase(0.0, EXPAND_POSITION_START * u, |s, _| s.play_at_anchor())
        .phase(0.0, EXPAND_ELEMENTS_START * u, |s, _| s.hide_elements())
        .phase(EXPAND_ELEMENTS_START * u, EXPAND_ELEMENTS_END * u, BarScene::scale_elements)
        .on_exit(|s| s.scale_elements(1.0))
        .eased_phase(EXPAND_POSITION_START * u, EXPAND_POSITION_END * u, easing, BarScene::slide_play_out)
        .on_exit(BarScene::play_at_center)
        .phase(EXPAND_BUBBLES_START * u, EXPAND_BUBBLES_END * u, BarScene::update_bubbles)
        .on_exit(BarScene::end_bubbles)
}

fn collapse_timeline(config: &WidgetConfig) -> Timeline<BarScene> {
    use frames::*;
    let u = config.frame_speed;
    let easing = config.easing.clone();
    Timeline::<BarScene>::new(COLLAPSE_TOTAL * u)
        .phase(0.0, COLLAPSE_ELEMENTS_END * u, |s, t| s.scale_elements(1.0 - t))
        .on_exit(BarScene::hide_elements)
        .eased_phase(COLLAPSE_POSITION_START * u, COLLAPSE_POSITION_END * u, easing.clone(), BarScene::slide_play_back)
        .eased_phase(COLLAPSE_SIZE_START * u, COLLAPSE_SIZE_END * u, easing, |s, t| {
            s.color = s.transition.at(t);
            s.set_background(1.0 - t);
        })
}

pub struct ExpandCollapseController {
    state: ExpandState,
    scene: BarScene,
    expand: Timeline<BarScene>,
    collapse: Timeline<BarScene>,
    run: Option<AnimationRun>,
    dark_color: Color,
    light_color: Color,
    expanded_color: Color,
    bubble_color: Color,
    shadow_color: Color,
    shadow_offset: (f32, f32),
    album: Icon,
}

impl ExpandCollapseController {
    pub fn new(config: &WidgetConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            state: ExpandState::Collapsed,
            scene: BarScene::new(config, rng),
            expand: expand_timeline(config),
            collapse: collapse_timeline(config),
            run: None,
            dark_color: config.dark_color,
            light_color: config.light_color,
            expanded_color: config.expanded_color,
            bubble_color: config.bubble_color(),
            shadow_color: config.shadow_color,
            shadow_offset: (config.shadow_dx, config.shadow_dy),
            album: Icon::DefaultAlbum,
        }
    }

    pub fn state(&self) -> ExpandState {
        self.state
    }

    pub fn direction(&self) -> ExpandDirection {
        self.scene.direction
    }

    /// Change the direction used by the next collapse.
    pub fn set_direction(&mut self, direction: ExpandDirection) {
        self.scene.direction = direction;
    }

    pub fn scene(&self) -> &BarScene {
        &self.scene
    }

    pub fn is_animation_in_progress(&self) -> bool {
        matches!(self.state, ExpandState::Expanding | ExpandState::Collapsing)
    }

    fn button_color(&self, playing: bool) -> Color {
        if playing {
            self.dark_color
        } else {
            self.light_color
        }
    }

    /// Start expanding toward `direction`. Returns false when ignored.
    pub fn expand(&mut self, direction: ExpandDirection, playing: bool, now: Millis) -> bool {
        if self.state != ExpandState::Collapsed {
            return false;
        }
        self.scene.direction = direction;
        self.scene.transition = ColorTransition::new(self.button_color(playing), self.expanded_color);
        self.scene.bubbles.deactivate();
        self.state = ExpandState::Expanding;
        log::debug!("expanding {:?}", direction);
        self.start(now)
    }

    /// Start collapsing. Returns false unless fully expanded.
    pub fn collapse(&mut self, playing: bool, now: Millis) -> bool {
        if self.state != ExpandState::Expanded {
            return false;
        }
        self.scene.transition = ColorTransition::new(self.expanded_color, self.button_color(playing));
        self.state = ExpandState::Collapsing;
        log::debug!("collapsing {:?}", self.scene.direction);
        self.start(now)
    }

    fn start(&mut self, now: Millis) -> bool {
        let timeline = match self.state {
            ExpandState::Collapsing => &self.collapse,
            _ => &self.expand,
        };
        let mut run = AnimationRun::start(now, timeline.duration());
        timeline.drive(&mut run, now, &mut self.scene);
        self.run = Some(run);
        true
    }

    /// Advance the running animation to `now`.
    ///
    /// Returns the new state exactly once, on the frame the animation
    /// completes.
    pub fn advance(&mut self, now: Millis) -> Option<ExpandState> {
        let run = self.run.as_mut()?;
        let timeline = match self.state {
            ExpandState::Collapsing => &self.collapse,
            _ => &self.expand,
        };
        match timeline.drive(run, now, &mut self.scene) {
            RunStep::Finished(_) => {
                self.run = None;
                self.state = self.terminal_state();
                log::debug!("expand/collapse finished in {:?}", self.state);
                Some(self.state)
            }
            RunStep::Running(_) => None,
            RunStep::Idle => {
                self.run = None;
                None
            }
        }
    }

    fn terminal_state(&self) -> ExpandState {
        match self.state {
            ExpandState::Expanding | ExpandState::Expanded => ExpandState::Expanded,
            ExpandState::Collapsing | ExpandState::Collapsed => ExpandState::Collapsed,
        }
    }

    /// Stop a running animation on its final frame without reporting
    /// completion.
    pub fn cancel(&mut self) {
        let Some(mut run) = self.run.take() else {
            return;
        };
        let end = run.cancel();
        let timeline = match self.state {
            ExpandState::Collapsing => &self.collapse,
            _ => &self.expand,
        };
        timeline.tick(end, &mut self.scene);
        self.state = self.terminal_state();
        log::debug!("expand/collapse canceled into {:?}", self.state);
    }

    /// Cancel anything running and return to the collapsed state.
    pub fn reset(&mut self) {
        self.cancel();
        self.scene.end_bubbles();
        self.scene.hide_elements();
        self.state = ExpandState::Collapsed;
    }

    /// Slot under the local point `(x, y)`, ignoring icon padding.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ControlButton> {
        ControlButton::ALL
            .into_iter()
            .find(|button| self.scene.slot(button.index(), 0.0).contains(x, y))
    }

    /// Resolve a click on the bar. Ignored while animating; a miss is logged.
    pub fn on_controls_clicked(&self, x: f32, y: f32) -> Option<ControlButton> {
        if self.is_animation_in_progress() {
            return None;
        }
        let hit = self.hit_test(x, y);
        if hit.is_none() {
            log::warn!("click at ({}, {}) hit no control slot", x, y);
        }
        hit
    }

    /// Replace the album slot icon. `None` restores the default. Returns
    /// whether anything changed.
    pub fn set_album_cover(&mut self, cover: Option<ImageHandle>) -> bool {
        let icon = cover.map_or(Icon::DefaultAlbum, Icon::AlbumCover);
        if self.album == icon {
            return false;
        }
        self.album = icon;
        true
    }

    pub fn album_icon(&self) -> Icon {
        self.album
    }

    pub fn paint(&self, canvas: &mut dyn Canvas, playing: bool) {
        let scene = &self.scene;
        if self.state == ExpandState::Expanding && scene.bubbles.is_active() {
            let color = self.bubble_color.with_alpha(self.bubble_color.a * scene.bubble_alpha);
            for (cx, cy, radius) in scene.bubbles.positions() {
                canvas.circle(cx, cy, radius, color);
            }
        }

        let (dx, dy) = self.shadow_offset;
        canvas.rounded_rect(scene.background.offset(dx, dy), scene.radius, self.shadow_color);
        canvas.rounded_rect(scene.background, scene.radius, scene.color);

        for button in ControlButton::ALL {
            let index = button.index();
            let icon = match button {
                ControlButton::Playlist => Icon::Playlist,
                ControlButton::Previous => Icon::Previous,
                ControlButton::PlayPause if playing => Icon::Pause,
                ControlButton::PlayPause => Icon::Play,
                ControlButton::Next => Icon::Next,
                ControlButton::Album => self.album,
            };
            let mut alpha = scene.alphas[index];
            if button == ControlButton::PlayPause && alpha <= 0.0 {
                log::warn!("play/pause icon had zero alpha, drawing it opaque");
                alpha = 1.0;
            }
            if alpha > 0.0 {
                canvas.icon(icon, scene.icons[index], alpha);
            }
        }
    }
}
