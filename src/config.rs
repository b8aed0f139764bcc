use crate::animation::TimingFunction;
use crate::error::{ConfigError, Result};
use crate::gesture::Thresholds;
use crate::layout::Size;
use crate::surface::OverlayHost;
use crate::widgets::Color;
use crate::{AudioWidget, Millis};

/// Appearance and timing of an [`AudioWidget`].
///
/// All sizes are in pixels. `height` is the diameter of the collapsed
/// button's inner circle and the height of the expanded bar; `width` is the
/// length of the expanded bar.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub width: f32,
    pub height: f32,
    /// Inset of each icon inside its bar slot
    pub button_padding: f32,
    /// Margin around the expanded bar inside its surface
    pub surface_padding: f32,
    pub cross_stroke_width: f32,
    pub progress_stroke_width: f32,
    pub shadow_radius: f32,
    pub shadow_dx: f32,
    pub shadow_dy: f32,
    pub bubbles_count: usize,
    pub bubbles_min_size: f32,
    pub bubbles_max_size: f32,

    /// Button color while playing
    pub dark_color: Color,
    /// Button color while paused or stopped
    pub light_color: Color,
    pub progress_color: Color,
    pub expanded_color: Color,
    pub cross_color: Color,
    pub cross_overlapped_color: Color,
    pub shadow_color: Color,
    /// Defaults to `expanded_color` when unset
    pub bubble_color: Option<Color>,

    /// Milliseconds per animation frame unit
    pub frame_speed: f32,
    pub thresholds: Thresholds,
    pub remove_slide_ms: Millis,
    pub click_pulse_ms: Millis,
    /// Applied to the size, position and color phases
    pub easing: TimingFunction,
    /// Pins the particle random source
    pub random_seed: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 120.0,
            button_padding: 8.0,
            surface_padding: 4.0,
            cross_stroke_width: 6.0,
            progress_stroke_width: 4.0,
            shadow_radius: 10.0,
            shadow_dx: 2.0,
            shadow_dy: 2.0,
            bubbles_count: 30,
            bubbles_min_size: 10.0,
            bubbles_max_size: 25.0,
            dark_color: Color::from_hex(0x3C3A4E),
            light_color: Color::from_hex(0xF2F1F7),
            progress_color: Color::from_hex(0xFF5A79),
            expanded_color: Color::from_hex(0x5E5A80),
            cross_color: Color::from_hex(0xC9C8D3),
            cross_overlapped_color: Color::from_hex(0xFF5A79),
            shadow_color: Color::rgba(0.0, 0.0, 0.0, 80.0 / 255.0),
            bubble_color: None,
            frame_speed: 70.0,
            thresholds: Thresholds::default(),
            remove_slide_ms: 200,
            click_pulse_ms: 280,
            easing: TimingFunction::Linear,
            random_seed: None,
        }
    }
}

impl WidgetConfig {
    pub fn radius(&self) -> f32 {
        self.height / 2.0
    }

    /// Button surface: the inner circle plus room for the progress ring.
    pub fn button_size(&self) -> Size {
        Size::new(self.height * 2.0, self.height * 2.0)
    }

    pub fn expanded_size(&self) -> Size {
        Size::new(
            self.width + self.surface_padding * 2.0,
            self.height * 2.0 + self.surface_padding * 2.0,
        )
    }

    pub fn remove_target_size(&self) -> Size {
        Size::new(self.height, self.height)
    }

    pub fn bubble_color(&self) -> Color {
        self.bubble_color.unwrap_or(self.expanded_color)
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("width", self.width),
            ("height", self.height),
            ("button_padding", self.button_padding),
            ("surface_padding", self.surface_padding),
            ("cross_stroke_width", self.cross_stroke_width),
            ("progress_stroke_width", self.progress_stroke_width),
            ("shadow_radius", self.shadow_radius),
            ("shadow_dx", self.shadow_dx),
            ("shadow_dy", self.shadow_dy),
            ("bubbles_min_size", self.bubbles_min_size),
            ("bubbles_max_size", self.bubbles_max_size),
            ("significant_movement_px", self.thresholds.significant_movement_px),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.bubbles_max_size < self.bubbles_min_size {
            return Err(ConfigError::BubbleRange {
                min: self.bubbles_min_size,
                max: self.bubbles_max_size,
            });
        }
        if self.thresholds.click_max_ms > self.thresholds.long_press_min_ms {
            return Err(ConfigError::Thresholds {
                click_ms: self.thresholds.click_max_ms,
                long_press_ms: self.thresholds.long_press_min_ms,
            });
        }
        if !(self.frame_speed > 0.0) {
            return Err(ConfigError::FrameSpeed(self.frame_speed));
        }
        if self.width <= self.height {
            return Err(ConfigError::TooNarrow {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Chainable construction of an [`AudioWidget`].
///
/// ```ignore
/// let widget = WidgetBuilder::new()
///     .size(640.0, 128.0)
///     .expanded_color(Color::from_hex(0x202030))
///     .random_seed(7)
///     .build(host)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct WidgetBuilder {
    config: WidgetConfig,
}

impl WidgetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WidgetConfig) -> Self {
        Self { config }
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn button_padding(mut self, padding: f32) -> Self {
        self.config.button_padding = padding;
        self
    }

    pub fn surface_padding(mut self, padding: f32) -> Self {
        self.config.surface_padding = padding;
        self
    }

    pub fn cross_stroke_width(mut self, width: f32) -> Self {
        self.config.cross_stroke_width = width;
        self
    }

    pub fn progress_stroke_width(mut self, width: f32) -> Self {
        self.config.progress_stroke_width = width;
        self
    }

    pub fn shadow(mut self, radius: f32, dx: f32, dy: f32, color: Color) -> Self {
        self.config.shadow_radius = radius;
        self.config.shadow_dx = dx;
        self.config.shadow_dy = dy;
        self.config.shadow_color = color;
        self
    }

    pub fn bubbles(mut self, count: usize, min_size: f32, max_size: f32) -> Self {
        self.config.bubbles_count = count;
        self.config.bubbles_min_size = min_size;
        self.config.bubbles_max_size = max_size;
        self
    }

    pub fn dark_color(mut self, color: Color) -> Self {
        self.config.dark_color = color;
        self
    }

    pub fn light_color(mut self, color: Color) -> Self {
        self.config.light_color = color;
        self
    }

    pub fn progress_color(mut self, color: Color) -> Self {
        self.config.progress_color = color;
        self
    }

    pub fn expanded_color(mut self, color: Color) -> Self {
        self.config.expanded_color = color;
        self
    }

    pub fn cross_colors(mut self, normal: Color, overlapped: Color) -> Self {
        self.config.cross_color = normal;
        self.config.cross_overlapped_color = overlapped;
        self
    }

    pub fn bubble_color(mut self, color: Color) -> Self {
        self.config.bubble_color = Some(color);
        self
    }

    pub fn frame_speed(mut self, ms_per_unit: f32) -> Self {
        self.config.frame_speed = ms_per_unit;
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    pub fn remove_slide_ms(mut self, ms: Millis) -> Self {
        self.config.remove_slide_ms = ms;
        self
    }

    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.config.easing = easing;
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Validate the configuration and create the widget on `host`.
    pub fn build<H: OverlayHost>(self, host: H) -> Result<AudioWidget<H>> {
        self.config.validate()?;
        Ok(AudioWidget::new(self.config, host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WidgetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let config = WidgetBuilder::new().cross_stroke_width(-1.0).config().clone();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "cross_stroke_width",
                value: -1.0
            })
        );
        let config = WidgetBuilder::new().surface_padding(f32::NAN).config().clone();
        assert!(matches!(config.validate(), Err(ConfigError::Negative { field: "surface_padding", .. })));
    }

    #[test]
    fn test_bubble_range_is_checked() {
        let config = WidgetBuilder::new().bubbles(30, 20.0, 10.0).config().clone();
        assert_eq!(config.validate(), Err(ConfigError::BubbleRange { min: 20.0, max: 10.0 }));
        let config = WidgetBuilder::new().bubbles(30, 12.0, 12.0).config().clone();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_order_and_speed() {
        let thresholds = Thresholds {
            click_max_ms: 700,
            ..Thresholds::default()
        };
        let config = WidgetBuilder::new().thresholds(thresholds).config().clone();
        assert!(matches!(config.validate(), Err(ConfigError::Thresholds { .. })));
        let config = WidgetBuilder::new().frame_speed(0.0).config().clone();
        assert_eq!(config.validate(), Err(ConfigError::FrameSpeed(0.0)));
    }

    #[test]
    fn test_bar_must_be_wider_than_button() {
        let config = WidgetBuilder::new().size(100.0, 120.0).config().clone();
        assert!(matches!(config.validate(), Err(ConfigError::TooNarrow { .. })));
    }

    #[test]
    fn test_derived_sizes() {
        let config = WidgetConfig::default();
        assert_eq!(config.radius(), 60.0);
        assert_eq!(config.button_size(), Size::new(240.0, 240.0));
        assert_eq!(config.expanded_size(), Size::new(608.0, 248.0));
        assert_eq!(config.remove_target_size(), Size::new(120.0, 120.0));
        assert_eq!(config.bubble_color(), config.expanded_color);
    }
}
