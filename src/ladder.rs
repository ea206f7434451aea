//! Pitch ladder rotated by roll.
//!
//! Rungs are laid out on an unrotated canvas in local coordinates, then
//! every point is rotated about the canvas centre and moved to the
//! configured origin.

use log::{debug, trace};

use crate::angle::{tenths_to_degrees, wrap_pitch_tenths, wrap_roll_tenths};
use crate::compass::RedrawPhase;
use crate::config::{GaugeStyle, LadderConfig, LineStyle, TextStyle, OPA_COVER};
use crate::error::ConfigError;
use crate::geometry::{rotate_point, Point};
use crate::label::centred_label_area;
use crate::scene::{DrawCommand, Scene, TextMeasure};
use crate::section::{Section, SectionSet};
use crate::state::{SharedOrientation, Snapshot};
use crate::ticks::{ScrollingScale, TickPlacement};

const PITCH_MIN: f64 = -90.0;
const PITCH_MAX: f64 = 90.0;

#[derive(Debug, Clone)]
pub struct LadderRenderer {
    config: LadderConfig,
    sections: SectionSet,
    phase: RedrawPhase,
    drawn_generation: Option<u64>,
    pitch_tenths: i32,
    roll_tenths: i32,
}

impl LadderRenderer {
    pub fn new(config: LadderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "ladder {}x{} at {:?}, {:?} theme",
            config.canvas_width, config.canvas_height, config.origin, config.theme
        );
        Ok(Self {
            config,
            sections: SectionSet::new(),
            phase: RedrawPhase::Idle,
            drawn_generation: None,
            pitch_tenths: 0,
            roll_tenths: 0,
        })
    }

    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    pub fn add_section(&mut self, section: Section) -> usize {
        self.invalidate();
        self.sections.add(section)
    }

    pub fn section_mut(&mut self, id: usize) -> Option<&mut Section> {
        self.invalidate();
        self.sections.get_mut(id)
    }

    pub fn invalidate(&mut self) {
        self.drawn_generation = None;
    }

    pub fn phase(&self) -> RedrawPhase {
        self.phase
    }

    /// Wrapped pitch and roll of the last redraw, in tenths.
    pub fn attitude(&self) -> (i32, i32) {
        (self.pitch_tenths, self.roll_tenths)
    }

    pub fn needs_redraw(&self, shared: &SharedOrientation) -> bool {
        self.drawn_generation != Some(shared.generation())
    }

    pub fn redraw(&mut self, shared: &SharedOrientation, measure: &dyn TextMeasure) -> Scene {
        self.phase = RedrawPhase::SnapshotValue;
        let snapshot = shared.snapshot();
        self.redraw_snapshot(&snapshot, measure)
    }

    pub fn redraw_snapshot(&mut self, snapshot: &Snapshot, measure: &dyn TextMeasure) -> Scene {
        self.phase = RedrawPhase::SnapshotValue;
        self.drawn_generation = Some(snapshot.generation);
        trace!(
            "ladder snapshot #{}: pitch {} roll {}",
            snapshot.generation,
            snapshot.orientation.pitch,
            snapshot.orientation.roll
        );
        self.render_attitude(snapshot.orientation.pitch, snapshot.orientation.roll, measure)
    }

    fn base_style(&self) -> GaugeStyle {
        let palette = self.config.theme.palette();
        let line = LineStyle {
            width: self.config.line_width,
            color: palette.line,
            opa: OPA_COVER,
        };
        let text = TextStyle {
            color: palette.text,
            font_size: self.config.font_size,
            ..TextStyle::default()
        };
        let mut style = GaugeStyle::default();
        for part in [&mut style.main, &mut style.indicator, &mut style.items] {
            part.line = line;
            part.text = text;
        }
        style
    }

    /// Segments of one rung at local height `y`, before rotation.
    fn rung_segments(&self, value: f64, y: i32) -> Vec<(Point, Point)> {
        let c = &self.config;
        let right_edge = c.canvas_width - 1;
        let left_end = c.left_rung_end();
        let right_start = c.right_rung_start() + c.label_width;

        if value == 0.0 {
            return vec![
                (Point::new(0, y), Point::new(left_end, y)),
                (Point::new(right_start, y), Point::new(right_edge, y)),
            ];
        }

        // pitch-up rungs hang their end ticks down, pitch-down rungs point up
        let tick = if value > 0.0 { c.rung_end_tick } else { -c.rung_end_tick };
        let left = c.rung_inset;
        let right = right_edge - c.rung_inset;
        vec![
            (Point::new(left, y), Point::new(left_end, y)),
            (Point::new(right_start, y), Point::new(right, y)),
            (Point::new(left, y), Point::new(left, y + tick)),
            (Point::new(right, y), Point::new(right, y + tick)),
        ]
    }

    fn aim_segments(&self) -> [(Point, Point); 2] {
        let c = &self.config;
        let (cx, cy) = (c.canvas_width / 2, c.canvas_height / 2);
        let half = c.aim_width / 2;
        [
            (Point::new(cx - half, cy), Point::new(cx + half, cy)),
            (Point::new(cx, cy - half), Point::new(cx, cy + half)),
        ]
    }

    /// Lay out the ladder for an attitude given in tenths of a degree.
    pub fn render_attitude(&mut self, pitch_tenths: i32, roll_tenths: i32, measure: &dyn TextMeasure) -> Scene {
        self.pitch_tenths = wrap_pitch_tenths(pitch_tenths);
        self.roll_tenths = wrap_roll_tenths(roll_tenths);
        let pitch = tenths_to_degrees(self.pitch_tenths);
        let roll = self.roll_tenths;

        self.phase = RedrawPhase::BuildTickWindow;
        let c = &self.config;
        let entries = ScrollingScale {
            tick_spacing: c.pitch_scale,
            spacing_px: f64::from(c.rung_spacing),
            window_tick_count: c.window_tick_count,
            major_tick_every: 1,
            range_min: PITCH_MIN,
            range_max: PITCH_MAX,
        }
        .window(pitch);

        self.phase = RedrawPhase::LayoutTicks;
        let style = self.base_style();
        let pivot = Point::new(c.canvas_width / 2, c.canvas_height / 2);
        let origin = c.origin;
        let place = |p: Point| rotate_point(p, roll, pivot).offset(origin.x, origin.y);

        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Fill {
            area: c.area(),
            color: c.theme.palette().background,
        });

        for entry in &entries {
            let TickPlacement::Linear { pixel_offset } = entry.placement else {
                continue;
            };
            let y = pivot.y - pixel_offset;
            let resolved = self.sections.resolve(entry.value, entry.is_major, &style);
            for (a, b) in self.rung_segments(entry.value, y) {
                scene.line(place(a), place(b), resolved.line);
            }

            let text = rung_label(entry.value);
            let size = measure.measure_text(&text, &resolved.text);
            let centre = Point::new(pivot.x + c.label_x_offset + size.width / 2, y);
            scene.label(centred_label_area(place(centre), size), text, resolved.text);
        }

        for (a, b) in self.aim_segments() {
            scene.line(place(a), place(b), style.main.line);
        }

        self.phase = RedrawPhase::EmitDrawCommands;
        trace!(
            "ladder rungs {:?} at roll {roll}",
            entries.iter().map(|t| t.value).collect::<Vec<_>>()
        );
        self.phase = RedrawPhase::Idle;
        scene
    }
}

/// Non-negative pitch gets a leading space so digits line up with the
/// minus sign.
pub fn rung_label(value: f64) -> String {
    let degrees = value.round() as i64;
    if degrees >= 0 {
        format!(" {degrees}")
    } else {
        format!("{degrees}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, LadderTheme, Part};
    use crate::scene::FixedAdvance;
    use crate::section::StyleOverride;
    use crate::state::Orientation;

    fn ladder() -> LadderRenderer {
        LadderRenderer::new(LadderConfig::default()).unwrap()
    }

    fn has_line(scene: &Scene, a: Point, b: Point) -> bool {
        scene.lines().any(|(p, q, _)| p == a && q == b)
    }

    #[test]
    fn level_flight() {
        let mut ladder = ladder();
        let scene = ladder.render_attitude(0, 0, &FixedAdvance::default());
        let labels: Vec<&str> = scene.labels().map(|(_, t, _)| t).collect();
        assert_eq!(labels, vec!["-20", "-10", " 0", " 10", " 20"]);
        // horizon split around its label
        assert!(has_line(&scene, Point::new(0, 26), Point::new(30, 26)));
        assert!(has_line(&scene, Point::new(66, 26), Point::new(79, 26)));
        // aim cross
        assert!(has_line(&scene, Point::new(36, 26), Point::new(44, 26)));
        assert!(has_line(&scene, Point::new(40, 22), Point::new(40, 30)));
    }

    #[test]
    fn rung_end_ticks_point_at_horizon() {
        let mut ladder = ladder();
        let scene = ladder.render_attitude(0, 0, &FixedAdvance::default());
        // +10 rung sits one spacing above the horizon, ticks hang down
        assert!(has_line(&scene, Point::new(5, 10), Point::new(5, 14)));
        // -10 rung below, ticks point up
        assert!(has_line(&scene, Point::new(5, 42), Point::new(5, 38)));
    }

    #[test]
    fn pitch_up_moves_horizon_down() {
        let mut ladder = ladder();
        let scene = ladder.render_attitude(47, 0, &FixedAdvance::default());
        assert!(has_line(&scene, Point::new(0, 34), Point::new(30, 34)));
    }

    #[test]
    fn roll_rotates_whole_ladder() {
        let mut ladder = ladder();
        let scene = ladder.render_attitude(0, 900, &FixedAdvance::default());
        assert!(has_line(&scene, Point::new(40, -14), Point::new(40, 16)));
        assert_eq!(ladder.attitude(), (0, 900));
    }

    #[test]
    fn attitude_wraps() {
        let mut ladder = ladder();
        ladder.render_attitude(950, -1900, &FixedAdvance::default());
        assert_eq!(ladder.attitude(), (-850, 1700));
    }

    #[test]
    fn dark_theme_and_origin() {
        let config = LadderConfig::builder()
            .theme(LadderTheme::Dark)
            .origin(Point::new(100, 50))
            .line_width(2)
            .build();
        let mut ladder = LadderRenderer::new(config).unwrap();
        let scene = ladder.render_attitude(0, 0, &FixedAdvance::default());
        assert!(matches!(
            scene.commands()[0],
            DrawCommand::Fill { color: Color::BLACK, .. }
        ));
        assert!(scene
            .lines()
            .all(|(_, _, s)| s.color == Color::BLUE && s.width == 2));
        assert!(has_line(&scene, Point::new(100, 76), Point::new(130, 76)));
    }

    #[test]
    fn sections_restyle_rungs() {
        let red = Color::new(0xff, 0, 0);
        let mut ladder = ladder();
        ladder.add_section(
            Section::new(10.0, 90.0)
                .with_style(Part::Indicator, StyleOverride::default().line_color(red)),
        );
        let scene = ladder.render_attitude(0, 0, &FixedAdvance::default());
        let red_lines = scene.lines().filter(|(_, _, s)| s.color == red).count();
        // +10 and +20 rungs, four segments each
        assert_eq!(red_lines, 8);
    }

    #[test]
    fn redraw_reads_shared_attitude() {
        let shared = SharedOrientation::new();
        shared.publish(Orientation::new(0, 120, -300));
        let mut ladder = ladder();
        assert!(ladder.needs_redraw(&shared));
        ladder.redraw(&shared, &FixedAdvance::default());
        assert_eq!(ladder.attitude(), (120, -300));
        assert!(!ladder.needs_redraw(&shared));
    }

    #[test]
    fn labels_have_leading_space() {
        assert_eq!(rung_label(10.0), " 10");
        assert_eq!(rung_label(0.0), " 0");
        assert_eq!(rung_label(-30.0), "-30");
    }
}
