use bon::Builder;

use crate::error::ConfigError;
use crate::geometry::{Area, Point};

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);
    pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fully opaque.
pub const OPA_COVER: u8 = 0xff;

/// Stroke parameters for lines and arcs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: i32,
    pub color: Color,
    pub opa: u8,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 2,
            color: Color::GREEN,
            opa: OPA_COVER,
        }
    }
}

/// Text parameters for tick labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub opa: u8,
    pub letter_space: i32,
    pub font_size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::GREEN,
            opa: OPA_COVER,
            letter_space: 0,
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Padding {
    pub const fn all(value: i32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// The three visual parts of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Baseline or arc
    Main,
    /// Major ticks, their labels and the needle
    Indicator,
    /// Minor ticks
    Items,
}

/// Resolved style of one part
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartStyle {
    pub line: LineStyle,
    pub text: TextStyle,
    pub padding: Padding,
    /// Tick length for indicator/items, unused for main
    pub length: i32,
}

/// Base style of a gauge, used wherever no section overrides apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeStyle {
    pub main: PartStyle,
    pub indicator: PartStyle,
    pub items: PartStyle,
    pub border_width: i32,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            main: PartStyle {
                padding: Padding::all(2),
                ..PartStyle::default()
            },
            indicator: PartStyle {
                padding: Padding::all(2),
                length: 10,
                ..PartStyle::default()
            },
            items: PartStyle {
                line: LineStyle {
                    width: 1,
                    ..LineStyle::default()
                },
                length: 5,
                ..PartStyle::default()
            },
            border_width: 0,
        }
    }
}

impl GaugeStyle {
    pub fn part(&self, part: Part) -> &PartStyle {
        match part {
            Part::Main => &self.main,
            Part::Indicator => &self.indicator,
            Part::Items => &self.items,
        }
    }
}

/// Placement of the scale within its area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeMode {
    HorizontalTop,
    HorizontalBottom,
    VerticalLeft,
    VerticalRight,
    RoundInner,
    RoundOuter,
}

impl GaugeMode {
    pub fn is_round(self) -> bool {
        matches!(self, GaugeMode::RoundInner | GaugeMode::RoundOuter)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, GaugeMode::VerticalLeft | GaugeMode::VerticalRight)
    }
}

/// Per-instance configuration of a heading scale
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    pub area: Area,
    #[builder(default = GaugeMode::HorizontalBottom)]
    pub mode: GaugeMode,
    #[builder(default = 11)]
    pub total_tick_count: u32,
    #[builder(default = 5)]
    pub major_tick_every: u32,
    #[builder(default = true)]
    pub labels_enabled: bool,

    // Logical range; `range_max` is exclusive for scrolling scales
    #[builder(default = 0.0)]
    pub range_min: f64,
    #[builder(default = 360.0)]
    pub range_max: f64,

    // Scrolling scales
    #[builder(default = 10.0)]
    pub tick_spacing: f64,

    // Round scales, degrees clockwise from 3 o'clock
    #[builder(default = 270)]
    pub angle_range: u32,
    #[builder(default = 135)]
    pub rotation: i32,
    #[builder(default = 15)]
    pub label_gap: i32,
    /// Needle line from the centre. Negative lengths are measured back from the radius.
    pub needle_length: Option<i32>,

    #[builder(default = false)]
    pub draw_ticks_on_top: bool,
    /// Major tick labels, by major tick ordinal. Numeric labels when absent.
    pub text_source: Option<Vec<String>>,
    #[builder(default)]
    pub style: GaugeStyle,
}

impl GaugeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_tick_count < 2 {
            return Err(ConfigError::TooFewTicks(self.total_tick_count));
        }
        if self.major_tick_every == 0 {
            return Err(ConfigError::ZeroMajorTickEvery);
        }
        if self.area.is_empty() {
            return Err(ConfigError::EmptyArea {
                width: self.area.width(),
                height: self.area.height(),
            });
        }
        if !(self.range_max > self.range_min) {
            return Err(ConfigError::EmptyRange {
                min: self.range_min,
                max: self.range_max,
            });
        }
        if !self.tick_spacing.is_finite() || self.tick_spacing <= 0.0 {
            return Err(ConfigError::InvalidTickSpacing(self.tick_spacing));
        }
        if !self.mode.is_round() {
            check_window(
                self.tick_spacing,
                self.total_tick_count - 1,
                self.range_max - self.range_min,
            )?;
        }
        if self.mode.is_round() {
            let content = self.area.shrink(self.style.main.padding);
            if content.is_empty() {
                return Err(ConfigError::EmptyArea {
                    width: content.width(),
                    height: content.height(),
                });
            }
            if self.needle_length.is_some() && self.area.width() != self.area.height() {
                return Err(ConfigError::NonSquareRoundArea {
                    width: self.area.width(),
                    height: self.area.height(),
                });
            }
        }
        Ok(())
    }
}

/// Colour preset for the attitude ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderTheme {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderPalette {
    pub line: Color,
    pub text: Color,
    pub background: Color,
}

impl LadderTheme {
    pub fn palette(self) -> LadderPalette {
        match self {
            LadderTheme::Dark => LadderPalette {
                line: Color::BLUE,
                text: Color::BLUE,
                background: Color::BLACK,
            },
            LadderTheme::Light => LadderPalette {
                line: Color::BLACK,
                text: Color::BLACK,
                background: Color::WHITE,
            },
        }
    }
}

/// Configuration of the pitch/roll ladder canvas
#[derive(Debug, Clone, Builder)]
pub struct LadderConfig {
    #[builder(default = Point::new(0, 0))]
    pub origin: Point,
    #[builder(default = 80)]
    pub canvas_width: i32,
    #[builder(default = 53)]
    pub canvas_height: i32,
    #[builder(default = 8)]
    pub aim_width: i32,
    /// Vertical distance between rungs in pixels
    #[builder(default = 16)]
    pub rung_spacing: i32,
    /// Length of the end ticks on pitch rungs
    #[builder(default = 4)]
    pub rung_end_tick: i32,
    /// Rung inset from the canvas edges
    #[builder(default = 5)]
    pub rung_inset: i32,
    #[builder(default = 16)]
    pub label_width: i32,
    #[builder(default = 4)]
    pub label_x_offset: i32,
    /// Degrees between rungs
    #[builder(default = 10.0)]
    pub pitch_scale: f64,
    #[builder(default = 4)]
    pub window_tick_count: u32,
    #[builder(default = LadderTheme::Light)]
    pub theme: LadderTheme,
    #[builder(default = 1)]
    pub line_width: i32,
    #[builder(default = 14.0)]
    pub font_size: f32,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LadderConfig {
    pub fn area(&self) -> Area {
        Area::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.canvas_width - 1,
            self.origin.y + self.canvas_height - 1,
        )
    }

    /// Gap left in the middle of a rung for its label
    pub fn horizontal_gap(&self) -> i32 {
        self.canvas_width / 4
    }

    pub fn left_rung_end(&self) -> i32 {
        (self.canvas_width - self.horizontal_gap()) / 2
    }

    pub fn right_rung_start(&self) -> i32 {
        self.left_rung_end() + self.horizontal_gap()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0 || self.canvas_height <= 0 {
            return Err(ConfigError::EmptyArea {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.window_tick_count < 1 {
            return Err(ConfigError::TooFewTicks(self.window_tick_count + 1));
        }
        if !self.pitch_scale.is_finite() || self.pitch_scale <= 0.0 {
            return Err(ConfigError::InvalidTickSpacing(self.pitch_scale));
        }
        if self.rung_spacing <= 0 {
            return Err(ConfigError::InvalidRungSpacing(self.rung_spacing));
        }
        check_window(self.pitch_scale, self.window_tick_count, PITCH_WIDTH)
    }
}

/// Degrees covered by the pitch scale, `[-90, 90)`.
const PITCH_WIDTH: f64 = 180.0;

/// A scrolling window reaches at most half its intervals plus one tick
/// from the value on either side. Tick values are wrapped in a single
/// step, so that reach has to fit inside the range.
fn check_window(tick_spacing: f64, window_tick_count: u32, width: f64) -> Result<(), ConfigError> {
    let reach = tick_spacing * f64::from(window_tick_count / 2) + tick_spacing;
    if reach > width {
        return Err(ConfigError::WindowExceedsRange { reach, width });
    }
    Ok(())
}
