// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::{Color, LineStyle, TextStyle};
use crate::geometry::{Area, Point, Size};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle, used for canvas backgrounds
    Fill { area: Area, color: Color },
    Line {
        a: Point,
        b: Point,
        style: LineStyle,
    },
    /// Arc stroke; angles in degrees clockwise from 3 o'clock
    Arc {
        centre: Point,
        radius: i32,
        start_angle: f64,
        end_angle: f64,
        style: LineStyle,
    },
    Label {
        area: Area,
        text: String,
        style: TextStyle,
    },
}

/// Anything draw commands can be replayed onto.
pub trait DrawBackend {
    fn fill(&mut self, area: Area, color: Color);
    fn draw_line(&mut self, a: Point, b: Point, style: &LineStyle);
    fn draw_arc(&mut self, centre: Point, radius: i32, start_angle: f64, end_angle: f64, style: &LineStyle);
    fn draw_label(&mut self, area: Area, text: &str, style: &TextStyle);
}

/// Text extents as laid out by the host's font.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size;
}

/// Fixed-advance measurement for when no font is loaded.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        let glyphs = text.chars().count() as i32;
        if glyphs == 0 {
            return Size::new(0, style.font_size.ceil() as i32);
        }
        let advance = (style.font_size * self.advance).round() as i32;
        Size::new(
            glyphs * advance + (glyphs - 1) * style.letter_space,
            style.font_size.ceil() as i32,
        )
    }
}

/// Ordered draw commands for one redraw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn line(&mut self, a: Point, b: Point, style: LineStyle) {
        self.add_command(DrawCommand::Line { a, b, style });
    }

    pub fn label(&mut self, area: Area, text: String, style: TextStyle) {
        self.add_command(DrawCommand::Label { area, text, style });
    }

    pub fn extend(&mut self, other: Scene) {
        self.commands.extend(other.commands);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, &LineStyle)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { a, b, style } => Some((*a, *b, style)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = (&Area, &str, &TextStyle)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Label { area, text, style } => Some((area, text.as_str(), style)),
            _ => None,
        })
    }

    pub fn render(&self, backend: &mut impl DrawBackend) {
        for command in &self.commands {
            match command {
                DrawCommand::Fill { area, color } => backend.fill(*area, *color),
                DrawCommand::Line { a, b, style } => backend.draw_line(*a, *b, style),
                DrawCommand::Arc {
                    centre,
                    radius,
                    start_angle,
                    end_angle,
                    style,
                } => backend.draw_arc(*centre, *radius, *start_angle, *end_angle, style),
                DrawCommand::Label { area, text, style } => backend.draw_label(*area, text, style),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl DrawBackend for Recorder {
        fn fill(&mut self, _: Area, _: Color) {
            self.calls.push("fill");
        }
        fn draw_line(&mut self, _: Point, _: Point, _: &LineStyle) {
            self.calls.push("line");
        }
        fn draw_arc(&mut self, _: Point, _: i32, _: f64, _: f64, _: &LineStyle) {
            self.calls.push("arc");
        }
        fn draw_label(&mut self, _: Area, _: &str, _: &TextStyle) {
            self.calls.push("label");
        }
    }

    #[test]
    fn render_replays_in_order() {
        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Fill {
            area: Area::new(0, 0, 9, 9),
            color: Color::BLACK,
        });
        scene.label(Area::new(0, 0, 4, 4), "N".into(), TextStyle::default());
        scene.line(Point::new(0, 0), Point::new(5, 0), LineStyle::default());
        scene.add_command(DrawCommand::Arc {
            centre: Point::new(5, 5),
            radius: 4,
            start_angle: 135.0,
            end_angle: 405.0,
            style: LineStyle::default(),
        });

        let mut recorder = Recorder::default();
        scene.render(&mut recorder);
        assert_eq!(recorder.calls, vec!["fill", "label", "line", "arc"]);
        assert_eq!(scene.lines().count(), 1);
        assert_eq!(scene.labels().map(|(_, t, _)| t).collect::<Vec<_>>(), vec!["N"]);
    }

    #[test]
    fn fixed_advance_measures() {
        let style = TextStyle {
            font_size: 10.0,
            letter_space: 1,
            ..TextStyle::default()
        };
        assert_eq!(FixedAdvance::default().measure_text("340", &style), Size::new(20, 10));
        assert_eq!(FixedAdvance::default().measure_text("", &style), Size::new(0, 10));
    }
}
