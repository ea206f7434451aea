//! Mapping from scale positions to pixel coordinates.
//!
//! Screen coordinates grow right and down. Angles are measured clockwise
//! from 3 o'clock, in tenths of a degree where integer.

use crate::config::{GaugeConfig, GaugeMode, GaugeStyle, Padding};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Rectangle with inclusive corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width - 1,
            origin.y + size.height - 1,
        )
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn shrink(&self, padding: Padding) -> Area {
        Area::new(
            self.x1 + padding.left,
            self.y1 + padding.top,
            self.x2 - padding.right,
            self.y2 - padding.bottom,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    pub fn intersects(&self, other: &Area) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// Whether the segment `a`-`b` (zero width) passes through the area.
    pub fn touches_segment(&self, a: Point, b: Point) -> bool {
        // sampled at pixel resolution
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).max(1);
        (0..=steps).any(|i| {
            let t = f64::from(i) / f64::from(steps);
            let p = Point::new(
                (f64::from(a.x) + f64::from(b.x - a.x) * t).round() as i32,
                (f64::from(a.y) + f64::from(b.y - a.y) * t).round() as i32,
            );
            self.contains(p)
        })
    }
}

/// Rotate `p` about `pivot` by `angle_tenths` (clockwise on screen).
pub fn rotate_point(p: Point, angle_tenths: i32, pivot: Point) -> Point {
    if angle_tenths % 3600 == 0 {
        return p;
    }
    let radians = (f64::from(angle_tenths) / 10.0).to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = f64::from(p.x - pivot.x);
    let dy = f64::from(p.y - pivot.y);
    Point::new(
        (dx * cos - dy * sin).round() as i32 + pivot.x,
        (dx * sin + dy * cos).round() as i32 + pivot.y,
    )
}

/// Angle of tick `index` on a round scale, in tenths. Not normalised.
pub fn radial_angle_tenths(index: u32, total_tick_count: u32, angle_range: u32, rotation: i32) -> i32 {
    let steps = i64::from(total_tick_count.saturating_sub(1).max(1));
    let swept = i64::from(index) * i64::from(angle_range) * 10 / steps;
    (swept + i64::from(rotation) * 10) as i32
}

/// Line frame of a horizontal or vertical scale.
///
/// The primary axis runs along the scale (x for horizontal, y for
/// vertical), the secondary axis across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFrame {
    mode: GaugeMode,
    /// Secondary-axis coordinate of the main line
    anchor: i32,
    /// Primary-axis bounds after padding
    start: i32,
    end: i32,
}

impl LinearFrame {
    pub fn new(config: &GaugeConfig) -> Self {
        let area = config.area;
        let style = &config.style;
        let main_pad = style.main.padding;
        let items_pad = style.items.padding;
        let border = style.border_width;
        let half_main = style.main.line.width / 2;

        let (start, end) = if config.mode.is_vertical() {
            (
                area.y1 + main_pad.top + border + items_pad.top,
                area.y2 - main_pad.bottom - border - items_pad.bottom,
            )
        } else {
            (
                area.x1 + main_pad.left + border + items_pad.left,
                area.x2 - main_pad.right - border - items_pad.right,
            )
        };

        let anchor = match config.mode {
            GaugeMode::HorizontalBottom => area.y1 + main_pad.top + border + half_main,
            GaugeMode::HorizontalTop => area.y2 - main_pad.bottom - border - half_main,
            GaugeMode::VerticalLeft => area.x2 - main_pad.right - border - half_main,
            GaugeMode::VerticalRight | GaugeMode::RoundInner | GaugeMode::RoundOuter => {
                area.x1 + main_pad.left + border + half_main
            }
        };

        Self {
            mode: config.mode,
            anchor,
            start,
            end,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.mode.is_vertical()
    }

    pub fn anchor(&self) -> i32 {
        self.anchor
    }

    pub fn span(&self) -> i32 {
        self.end - self.start
    }

    pub fn centre(&self) -> i32 {
        (self.start + self.end) / 2
    }

    /// Pixels between neighbouring ticks for a window of `total_tick_count`.
    pub fn spacing_px(&self, total_tick_count: u32) -> f64 {
        f64::from(self.span()) / f64::from(total_tick_count.saturating_sub(1).max(1))
    }

    /// Sign of the direction ticks grow away from the main line.
    pub fn outward(&self) -> i32 {
        match self.mode {
            GaugeMode::HorizontalTop | GaugeMode::VerticalLeft => -1,
            _ => 1,
        }
    }

    /// Primary-axis position for a tick offset; values grow right or up.
    pub fn primary(&self, pixel_offset: i32) -> i32 {
        if self.is_vertical() {
            self.centre() - pixel_offset
        } else {
            self.centre() + pixel_offset
        }
    }

    pub fn point(&self, primary: i32, secondary: i32) -> Point {
        if self.is_vertical() {
            Point::new(secondary, primary)
        } else {
            Point::new(primary, secondary)
        }
    }

    /// Base and tip of a tick at `pixel_offset` from the centre.
    pub fn tick_points(&self, pixel_offset: i32, length: i32) -> (Point, Point) {
        let primary = self.primary(pixel_offset);
        (
            self.point(primary, self.anchor),
            self.point(primary, self.anchor + self.outward() * length),
        )
    }

    /// Extend a segment between two tick positions by half the width of the
    /// ticks at each end. `low` is the end holding lower values.
    pub fn extended_segment(&self, low: (i32, i32), high: (i32, i32)) -> (Point, Point) {
        let (low_primary, low_width) = low;
        let (high_primary, high_width) = high;
        if self.is_vertical() {
            (
                self.point(low_primary + low_width / 2, self.anchor),
                self.point(high_primary - high_width / 2, self.anchor),
            )
        } else {
            (
                self.point(low_primary - low_width / 2, self.anchor),
                self.point(high_primary + high_width / 2, self.anchor),
            )
        }
    }

    /// Main line endpoints, stretched to cover the end ticks' widths.
    pub fn main_line(&self, compensation: MainLineCompensation) -> (Point, Point) {
        if self.is_vertical() {
            self.extended_segment(
                (self.end, compensation.low_end),
                (self.start, compensation.high_end),
            )
        } else {
            self.extended_segment(
                (self.start, compensation.low_end),
                (self.end, compensation.high_end),
            )
        }
    }
}

/// Widths of the ticks sitting at the two ends of the main line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainLineCompensation {
    pub low_end: i32,
    pub high_end: i32,
}

/// Even out an odd tick width, rounding the way the stroke's pixels fall at
/// that end of the segment.
pub fn compensation_width(width: i32, vertical: bool, at_low_end: bool) -> i32 {
    if width % 2 == 0 {
        return width;
    }
    match (vertical, at_low_end) {
        (true, true) | (false, false) => width + 1,
        (true, false) | (false, true) => width - 1,
    }
}

/// Circle frame of a round scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadialFrame {
    mode: GaugeMode,
    centre: Point,
    radius: i32,
    main_width: i32,
}

impl RadialFrame {
    pub fn new(config: &GaugeConfig) -> Self {
        Self::with_style(config.mode, config.area, &config.style)
    }

    fn with_style(mode: GaugeMode, area: Area, style: &GaugeStyle) -> Self {
        let content = area.shrink(style.main.padding);
        let radius = (content.width() / 2).min(content.height() / 2);
        Self {
            mode,
            centre: Point::new(content.x1 + radius, content.y1 + radius),
            radius,
            main_width: style.main.line.width,
        }
    }

    pub fn centre(&self) -> Point {
        self.centre
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Radius where ticks start, just inside the main arc.
    pub fn tick_base_radius(&self) -> i32 {
        self.radius - self.main_width
    }

    fn tip_radius(&self, length: i32) -> i32 {
        match self.mode {
            GaugeMode::RoundOuter => self.tick_base_radius() + length,
            _ => self.tick_base_radius() - length,
        }
    }

    fn on_circle(&self, radius: i32, angle_tenths: i32) -> Point {
        rotate_point(
            Point::new(self.centre.x + radius, self.centre.y),
            angle_tenths,
            self.centre,
        )
    }

    pub fn tick_points(&self, angle_tenths: i32, length: i32) -> (Point, Point) {
        (
            self.on_circle(self.tick_base_radius(), angle_tenths),
            self.on_circle(self.tip_radius(length), angle_tenths),
        )
    }

    /// Centre of a label placed `gap` further in (or out) than the tip.
    pub fn label_anchor(&self, angle_tenths: i32, length: i32, gap: i32) -> Point {
        let radius = match self.mode {
            GaugeMode::RoundOuter => self.tip_radius(length) + gap,
            _ => self.tip_radius(length) - gap,
        };
        self.on_circle(radius, angle_tenths)
    }

    /// Needle line from the centre. Non-positive lengths are measured back
    /// from the radius, positive ones are clamped to it.
    pub fn needle_points(&self, angle_tenths: i32, needle_length: i32) -> (Point, Point) {
        let length = if needle_length > 0 {
            needle_length.min(self.radius)
        } else {
            (self.radius + needle_length).max(0)
        };
        (self.centre, self.on_circle(length, angle_tenths))
    }
}

/// Angle in degrees of a logical value on a round scale spanning `min..=max`.
pub fn value_angle(value: f64, min: f64, max: f64, angle_range: u32, rotation: i32) -> f64 {
    let clamped = value.clamp(min, max);
    f64::from(rotation) + f64::from(angle_range) * (clamped - min) / (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_without_padding() -> GaugeStyle {
        let mut style = GaugeStyle::default();
        style.main.padding = Padding::default();
        style.items.padding = Padding::default();
        style.main.line.width = 2;
        style
    }

    fn config(mode: GaugeMode, area: Area) -> GaugeConfig {
        GaugeConfig::builder()
            .area(area)
            .mode(mode)
            .style(style_without_padding())
            .build()
    }

    #[test]
    fn rotation_quarter_turn_is_clockwise() {
        let pivot = Point::new(10, 10);
        assert_eq!(rotate_point(Point::new(20, 10), 900, pivot), Point::new(10, 20));
        assert_eq!(rotate_point(Point::new(20, 10), -900, pivot), Point::new(10, 0));
        assert_eq!(rotate_point(Point::new(20, 10), 3600, pivot), Point::new(20, 10));
    }

    #[test]
    fn radial_angles_span_range() {
        assert_eq!(radial_angle_tenths(0, 11, 270, 135), 1350);
        assert_eq!(radial_angle_tenths(10, 11, 270, 135), 4050);
        assert_eq!(radial_angle_tenths(5, 11, 270, 135), 2700);
    }

    #[test]
    fn horizontal_bottom_ticks_grow_down() {
        let frame = LinearFrame::new(&config(GaugeMode::HorizontalBottom, Area::new(0, 0, 100, 30)));
        assert_eq!(frame.anchor(), 1);
        assert_eq!(frame.centre(), 50);
        let (a, b) = frame.tick_points(10, 5);
        assert_eq!(a, Point::new(60, 1));
        assert_eq!(b, Point::new(60, 6));
    }

    #[test]
    fn vertical_values_grow_upwards() {
        let frame = LinearFrame::new(&config(GaugeMode::VerticalRight, Area::new(0, 0, 30, 100)));
        let (a, b) = frame.tick_points(10, 5);
        assert_eq!(a, Point::new(1, 40));
        assert_eq!(b, Point::new(6, 40));

        let left = LinearFrame::new(&config(GaugeMode::VerticalLeft, Area::new(0, 0, 30, 100)));
        let (a, b) = left.tick_points(0, 5);
        assert_eq!(a, Point::new(29, 50));
        assert_eq!(b, Point::new(24, 50));
    }

    #[test]
    fn horizontal_top_ticks_grow_up() {
        let frame = LinearFrame::new(&config(GaugeMode::HorizontalTop, Area::new(0, 0, 100, 30)));
        let (a, b) = frame.tick_points(0, 5);
        assert_eq!(a, Point::new(50, 29));
        assert_eq!(b, Point::new(50, 24));
    }

    #[test]
    fn main_line_covers_end_ticks() {
        let frame = LinearFrame::new(&config(GaugeMode::HorizontalBottom, Area::new(0, 0, 100, 30)));
        let (a, b) = frame.main_line(MainLineCompensation {
            low_end: 4,
            high_end: 2,
        });
        assert_eq!(a, Point::new(-2, 1));
        assert_eq!(b, Point::new(101, 1));

        let vertical = LinearFrame::new(&config(GaugeMode::VerticalLeft, Area::new(0, 0, 30, 100)));
        let (a, b) = vertical.main_line(MainLineCompensation {
            low_end: 2,
            high_end: 2,
        });
        assert_eq!(a.y, 101);
        assert_eq!(b.y, -1);
    }

    #[test]
    fn odd_widths_round_outwards() {
        assert_eq!(compensation_width(3, false, true), 2);
        assert_eq!(compensation_width(3, false, false), 4);
        assert_eq!(compensation_width(3, true, true), 4);
        assert_eq!(compensation_width(3, true, false), 2);
        assert_eq!(compensation_width(4, true, false), 4);
    }

    #[test]
    fn round_frame_inner_and_outer() {
        let area = Area::new(0, 0, 99, 99);
        let inner = RadialFrame::new(&config(GaugeMode::RoundInner, area));
        assert_eq!(inner.radius(), 50);
        assert_eq!(inner.centre(), Point::new(50, 50));
        let (a, b) = inner.tick_points(0, 10);
        assert_eq!(a, Point::new(98, 50));
        assert_eq!(b, Point::new(88, 50));

        let outer = RadialFrame::new(&config(GaugeMode::RoundOuter, area));
        let (_, b) = outer.tick_points(900, 10);
        assert_eq!(b, Point::new(50, 108));
    }

    #[test]
    fn needle_length_rule() {
        let frame = RadialFrame::new(&config(GaugeMode::RoundInner, Area::new(0, 0, 99, 99)));
        let (_, tip) = frame.needle_points(0, 20);
        assert_eq!(tip, Point::new(70, 50));
        let (_, tip) = frame.needle_points(0, 500);
        assert_eq!(tip, Point::new(100, 50));
        let (_, tip) = frame.needle_points(0, -10);
        assert_eq!(tip, Point::new(90, 50));
    }

    #[test]
    fn value_angle_clamps() {
        assert_eq!(value_angle(50.0, 0.0, 100.0, 270, 135), 270.0);
        assert_eq!(value_angle(500.0, 0.0, 100.0, 270, 135), 405.0);
        assert_eq!(value_angle(-5.0, 0.0, 100.0, 270, 135), 135.0);
    }

    #[test]
    fn segment_hit_test() {
        let area = Area::new(10, 10, 20, 20);
        assert!(area.touches_segment(Point::new(0, 15), Point::new(30, 15)));
        assert!(!area.touches_segment(Point::new(0, 5), Point::new(30, 5)));
        assert!(!area.intersects(&Area::new(21, 0, 30, 9)));
    }
}
