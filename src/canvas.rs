// ============================================================================
// PIXEL BACKEND (RGBA frame + rusttype)
// ============================================================================

use std::path::Path;

use log::trace;
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::{Color, LineStyle, TextStyle};
use crate::error::HudError;
use crate::geometry::{Area, Point, Size};
use crate::scene::{DrawBackend, FixedAdvance, TextMeasure};

pub fn load_font(path: &Path) -> Result<Font<'static>, HudError> {
    let data = std::fs::read(path).map_err(|source| HudError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(data).ok_or_else(|| HudError::FontParse(path.to_path_buf()))
}

/// Draw backend over an RGBA8 frame buffer.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize, font: Option<&'a Font<'static>>) -> Self {
        Self {
            frame,
            width,
            height,
            font,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Canvas-clipped pixel bounds of `area`, if any part is visible.
    fn clip(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(self.width as i32 - 1);
        let y2 = y2.min(self.height as i32 - 1);
        (x1 <= x2 && y1 <= y2).then_some((x1, y1, x2, y2))
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        set_pixel(self.frame, self.width, x as usize, y as usize, color, alpha);
    }
}

fn opacity(opa: u8) -> f32 {
    f32::from(opa) / 255.0
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
        let out = [
            (src[0] * a + f32::from(frame[idx]) * (1.0 - a)).round() as u8,
            (src[1] * a + f32::from(frame[idx + 1]) * (1.0 - a)).round() as u8,
            (src[2] * a + f32::from(frame[idx + 2]) * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn draw_thick_line_aa(canvas: &mut Canvas, a: Point, b: Point, thickness: f32, color: Color, opa: f32) {
    let pad = thickness.ceil() as i32 + 1;
    let Some((min_x, min_y, max_x, max_y)) = canvas.clip(
        a.x.min(b.x) - pad,
        a.y.min(b.y) - pad,
        a.x.max(b.x) + pad,
        a.y.max(b.y) + pad,
    ) else {
        return;
    };
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    let len_sq = dx * dx + dy * dy;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = (x - a.x) as f32;
            let py = (y - a.y) as f32;
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lx = a.x as f32 + t * dx;
            let ly = a.y as f32 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa * opa);
            }
        }
    }
}

/// Arc stroke centred on `radius`; angles in degrees clockwise from 3 o'clock.
fn draw_arc_aa(canvas: &mut Canvas, centre: Point, radius: i32, start: f64, end: f64, style: &LineStyle) {
    let half = f64::from(style.width.max(1)) / 2.0;
    let outer = f64::from(radius) + half;
    let inner = f64::from(radius) - half;
    let reach = outer.ceil() as i32 + 1;
    let Some((min_x, min_y, max_x, max_y)) = canvas.clip(
        centre.x - reach,
        centre.y - reach,
        centre.x + reach,
        centre.y + reach,
    ) else {
        return;
    };
    let sweep = end - start;
    let opa = opacity(style.opa);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = f64::from(x - centre.x);
            let dy = f64::from(y - centre.y);
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < inner - 1.0 || dist > outer + 1.0 {
                continue;
            }
            let in_arc = sweep >= 360.0 || {
                let angle = dy.atan2(dx).to_degrees();
                (angle - start).rem_euclid(360.0) <= sweep
            };
            if !in_arc {
                continue;
            }
            let aa = if dist > outer {
                1.0 - (dist - outer).min(1.0)
            } else if dist < inner {
                1.0 - (inner - dist).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0 {
                canvas.blend(x, y, style.color, aa as f32 * opa);
            }
        }
    }
}

fn layout_glyphs<'f>(font: &'f Font<'static>, text: &str, style: &TextStyle) -> Vec<PositionedGlyph<'f>> {
    let scale = Scale::uniform(style.font_size);
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent))
        .enumerate()
        .map(|(i, glyph)| {
            let mut position = glyph.position();
            position.x += (i as i32 * style.letter_space) as f32;
            glyph.into_unpositioned().positioned(position)
        })
        .collect()
}

fn calculate_text_width(glyphs: &[PositionedGlyph]) -> i32 {
    let (min_x, max_x) = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN), |(min_x, max_x), bb| {
            (min_x.min(bb.min.x), max_x.max(bb.max.x))
        });
    if min_x < max_x {
        max_x - min_x
    } else {
        0
    }
}

/// Rasterise `text` with its layout box's top-left at `area`'s corner.
fn draw_text(canvas: &mut Canvas, font: &Font<'static>, area: Area, text: &str, style: &TextStyle) {
    let opa = opacity(style.opa);
    for glyph in layout_glyphs(font, text, style) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = area.x1 + bb.min.x + gx as i32;
                let py = area.y1 + bb.min.y + gy as i32;
                canvas.blend(px, py, style.color, v * opa);
            });
        }
    }
}

/// Text measurement with the loaded font, or fixed advances without one.
#[derive(Clone, Copy)]
pub struct FontMeasure<'a> {
    font: Option<&'a Font<'static>>,
}

impl<'a> FontMeasure<'a> {
    pub fn new(font: Option<&'a Font<'static>>) -> Self {
        Self { font }
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        match self.font {
            Some(font) => {
                let v_metrics = font.v_metrics(Scale::uniform(style.font_size));
                let glyphs = layout_glyphs(font, text, style);
                Size::new(
                    calculate_text_width(&glyphs),
                    (v_metrics.ascent - v_metrics.descent).ceil() as i32,
                )
            }
            None => FixedAdvance::default().measure_text(text, style),
        }
    }
}

impl DrawBackend for Canvas<'_> {
    fn fill(&mut self, area: Area, color: Color) {
        let Some((x1, y1, x2, y2)) = self.clip(area.x1, area.y1, area.x2, area.y2) else {
            return;
        };
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn draw_line(&mut self, a: Point, b: Point, style: &LineStyle) {
        draw_thick_line_aa(self, a, b, style.width as f32, style.color, opacity(style.opa));
    }

    fn draw_arc(&mut self, centre: Point, radius: i32, start_angle: f64, end_angle: f64, style: &LineStyle) {
        draw_arc_aa(self, centre, radius, start_angle, end_angle, style);
    }

    fn draw_label(&mut self, area: Area, text: &str, style: &TextStyle) {
        match self.font {
            Some(font) => draw_text(self, font, area, text, style),
            None => trace!("no font, skipping label {text:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: usize, h: usize) -> Vec<u8> {
        vec![0; w * h * 4]
    }

    fn pixel(frame: &[u8], w: usize, x: usize, y: usize) -> [u8; 4] {
        let i = (y * w + x) * 4;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn clear_and_fill() {
        let mut buf = frame(10, 10);
        let mut canvas = Canvas::new(&mut buf, 10, 10, None);
        canvas.clear(Color::BLACK);
        canvas.fill(Area::new(2, 2, 4, 4), Color::WHITE);
        // partly off-canvas fills are clipped
        canvas.fill(Area::new(8, 8, 20, 20), Color::BLUE);
        assert_eq!(pixel(&buf, 10, 3, 3), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(pixel(&buf, 10, 5, 5), [0, 0, 0, 0xff]);
        assert_eq!(pixel(&buf, 10, 9, 9), [0, 0, 0xff, 0xff]);
    }

    #[test]
    fn line_covers_its_axis() {
        let mut buf = frame(20, 20);
        let mut canvas = Canvas::new(&mut buf, 20, 20, None);
        canvas.draw_line(
            Point::new(2, 10),
            Point::new(17, 10),
            &LineStyle {
                width: 2,
                color: Color::WHITE,
                opa: 0xff,
            },
        );
        assert_eq!(pixel(&buf, 20, 10, 10)[0], 0xff);
        assert_eq!(pixel(&buf, 20, 10, 15)[0], 0);
    }

    #[test]
    fn degenerate_and_off_canvas_geometry() {
        let mut buf = frame(8, 8);
        let mut canvas = Canvas::new(&mut buf, 8, 8, None);
        let style = LineStyle::default();
        canvas.draw_line(Point::new(-50, -50), Point::new(-40, -40), &style);
        canvas.draw_line(Point::new(3, 3), Point::new(3, 3), &style);
        canvas.draw_arc(Point::new(100, 100), 10, 0.0, 90.0, &style);
        // only the single-point line lands on the canvas
        assert_ne!(pixel(&buf, 8, 3, 3)[1], 0);
        assert_eq!(pixel(&buf, 8, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn arc_respects_sweep() {
        let mut buf = frame(40, 40);
        let mut canvas = Canvas::new(&mut buf, 40, 40, None);
        let style = LineStyle {
            width: 2,
            color: Color::WHITE,
            opa: 0xff,
        };
        // lower-right quarter only
        canvas.draw_arc(Point::new(20, 20), 10, 0.0, 90.0, &style);
        assert_eq!(pixel(&buf, 40, 30, 20)[0], 0xff);
        assert_eq!(pixel(&buf, 40, 20, 30)[0], 0xff);
        assert_eq!(pixel(&buf, 40, 10, 20)[0], 0);
        assert_eq!(pixel(&buf, 40, 20, 10)[0], 0);
    }

    #[test]
    fn labels_without_font_fall_back() {
        let style = TextStyle {
            font_size: 10.0,
            ..TextStyle::default()
        };
        let size = FontMeasure::new(None).measure_text("12", &style);
        assert_eq!(size, Size::new(12, 10));

        let mut buf = frame(8, 8);
        let mut canvas = Canvas::new(&mut buf, 8, 8, None);
        canvas.draw_label(Area::new(0, 0, 7, 7), "12", &style);
        assert!(buf.iter().all(|&v| v == 0));
    }

    #[test]
    fn missing_font_file() {
        let err = load_font(Path::new("/definitely/not/here.ttf")).unwrap_err();
        assert!(matches!(err, HudError::FontRead { .. }));
    }
}
