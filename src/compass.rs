//! Heading compass: a scrolling linear scale or a static round dial.

use log::{debug, trace};

use crate::angle::{limit, tenths_to_degrees};
use crate::config::GaugeConfig;
use crate::error::ConfigError;
use crate::geometry::{value_angle, LinearFrame, MainLineCompensation, RadialFrame};
use crate::label::{centred_label_area, linear_label_area, LabelSide};
use crate::scene::{DrawCommand, Scene, TextMeasure};
use crate::section::{Section, SectionSet, TrackedTick};
use crate::state::{SharedOrientation, Snapshot};
use crate::ticks::{format_value, RadialScale, ScrollingScale, TickPlacement};

/// Where a renderer is within one redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedrawPhase {
    #[default]
    Idle,
    SnapshotValue,
    BuildTickWindow,
    LayoutTicks,
    EmitDrawCommands,
}

#[derive(Debug, Clone)]
pub struct CompassRenderer {
    config: GaugeConfig,
    sections: SectionSet,
    phase: RedrawPhase,
    /// Generation of the last sample drawn; `None` forces a redraw
    drawn_generation: Option<u64>,
    value: f64,
}

impl CompassRenderer {
    pub fn new(config: GaugeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "compass {:?}: {} ticks, major every {}, range [{}, {})",
            config.mode,
            config.total_tick_count,
            config.major_tick_every,
            config.range_min,
            config.range_max
        );
        Ok(Self {
            value: config.range_min,
            config,
            sections: SectionSet::new(),
            phase: RedrawPhase::Idle,
            drawn_generation: None,
        })
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn sections(&self) -> &SectionSet {
        &self.sections
    }

    /// Returns the id used by [`CompassRenderer::section_mut`].
    pub fn add_section(&mut self, section: Section) -> usize {
        self.invalidate();
        self.sections.add(section)
    }

    pub fn section_mut(&mut self, id: usize) -> Option<&mut Section> {
        self.invalidate();
        self.sections.get_mut(id)
    }

    /// Force the next [`CompassRenderer::needs_redraw`] to report true.
    pub fn invalidate(&mut self) {
        self.drawn_generation = None;
    }

    pub fn phase(&self) -> RedrawPhase {
        self.phase
    }

    /// Heading of the last redraw
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn needs_redraw(&self, shared: &SharedOrientation) -> bool {
        self.drawn_generation != Some(shared.generation())
    }

    /// Snapshot the shared heading and lay out a frame for it.
    pub fn redraw(&mut self, shared: &SharedOrientation, measure: &dyn TextMeasure) -> Scene {
        self.phase = RedrawPhase::SnapshotValue;
        let snapshot = shared.snapshot();
        self.redraw_snapshot(&snapshot, measure)
    }

    /// Lay out a frame for a snapshot taken by the caller.
    pub fn redraw_snapshot(&mut self, snapshot: &Snapshot, measure: &dyn TextMeasure) -> Scene {
        self.phase = RedrawPhase::SnapshotValue;
        self.drawn_generation = Some(snapshot.generation);
        let heading = limit(
            tenths_to_degrees(snapshot.orientation.heading),
            self.config.range_min,
            self.config.range_max,
        );
        trace!("compass snapshot #{}: {heading}", snapshot.generation);
        self.render_value(heading, measure)
    }

    /// Lay out a frame for `value` without touching shared state.
    pub fn render_value(&mut self, value: f64, measure: &dyn TextMeasure) -> Scene {
        self.value = value;
        self.phase = RedrawPhase::BuildTickWindow;
        let scene = if self.config.mode.is_round() {
            self.render_round(value, measure)
        } else {
            self.render_linear(value, measure)
        };
        self.phase = RedrawPhase::Idle;
        scene
    }

    fn label_text(&self, value: f64, major_ordinal: usize) -> Option<String> {
        if !self.config.labels_enabled {
            return None;
        }
        match &self.config.text_source {
            Some(texts) => major_ordinal
                .checked_sub(1)
                .and_then(|i| texts.get(i))
                .cloned(),
            None => Some(format_value(value)),
        }
    }

    fn render_linear(&mut self, value: f64, measure: &dyn TextMeasure) -> Scene {
        let config = &self.config;
        let style = &config.style;
        let frame = LinearFrame::new(config);
        let window_tick_count = config.total_tick_count - 1;
        let scale = ScrollingScale {
            tick_spacing: config.tick_spacing,
            spacing_px: frame.spacing_px(config.total_tick_count),
            window_tick_count,
            major_tick_every: config.major_tick_every,
            range_min: config.range_min,
            range_max: config.range_max,
        };
        let entries = scale.window(value);
        trace!(
            "compass window: {:?}",
            entries.iter().map(|t| t.value).collect::<Vec<_>>()
        );

        self.phase = RedrawPhase::LayoutTicks;
        self.sections.begin_pass();
        let vertical = frame.is_vertical();
        let mut ticks = Scene::new();
        let mut compensation = MainLineCompensation::default();
        let mut major_ordinal = 0;

        for entry in &entries {
            let TickPlacement::Linear { pixel_offset } = entry.placement else {
                continue;
            };
            let resolved = self.sections.resolve(entry.value, entry.is_major, style);
            let part = if entry.is_major {
                &style.indicator
            } else {
                &style.items
            };
            let (a, b) = frame.tick_points(pixel_offset, part.length);

            if entry.index == 0 {
                compensation.low_end = resolved.line.width;
            }
            if entry.index == window_tick_count {
                compensation.high_end = resolved.line.width;
            }
            if let Some(id) = resolved.section {
                self.sections.track(
                    id,
                    TrackedTick {
                        index: entry.index,
                        is_major: entry.is_major,
                        width: resolved.line.width,
                        point: a,
                    },
                    vertical,
                );
            }

            ticks.line(a, b, resolved.line);
            if entry.is_major {
                major_ordinal += 1;
                if let Some(text) = self.label_text(entry.value, major_ordinal) {
                    let size = measure.measure_text(&text, &resolved.text);
                    let area = linear_label_area(
                        &frame,
                        a,
                        b,
                        size,
                        style.indicator.padding.top,
                        style.main.line.width,
                        LabelSide::Baseline,
                    );
                    ticks.label(area, text, resolved.text);
                }
            }
        }

        // Baseline and one segment per section that received ticks
        let mut main = Scene::new();
        let (a, b) = frame.main_line(compensation);
        main.line(a, b, style.main.line);
        for (id, section) in self.sections.iter().enumerate() {
            let (Some(first), Some(last)) = (section.first_tick(), section.last_tick()) else {
                continue;
            };
            let (low, high) = if vertical {
                ((first.point.y, first.width), (last.point.y, last.width))
            } else {
                ((first.point.x, first.width), (last.point.x, last.width))
            };
            let (a, b) = frame.extended_segment(low, high);
            main.line(a, b, self.sections.main_style(id, style));
        }

        // Needle on the centre tick, with the live value past its tip
        let mut needle = Scene::new();
        let (a, b) = frame.tick_points(0, style.indicator.length);
        needle.line(a, b, style.indicator.line);
        if config.labels_enabled {
            let text = format_value(limit(value.round(), config.range_min, config.range_max));
            let size = measure.measure_text(&text, &style.indicator.text);
            let area = linear_label_area(
                &frame,
                a,
                b,
                size,
                style.indicator.padding.top,
                style.indicator.line.width,
                LabelSide::Tip,
            );
            needle.label(area, text, style.indicator.text);
        }

        self.phase = RedrawPhase::EmitDrawCommands;
        assemble(self.config.draw_ticks_on_top, ticks, main, needle)
    }

    fn render_round(&mut self, value: f64, measure: &dyn TextMeasure) -> Scene {
        let config = &self.config;
        let style = &config.style;
        let frame = RadialFrame::new(config);
        let entries = RadialScale {
            total_tick_count: config.total_tick_count,
            major_tick_every: config.major_tick_every,
            angle_range: config.angle_range,
            rotation: config.rotation,
            range_min: config.range_min,
            range_max: config.range_max,
        }
        .ticks();

        self.phase = RedrawPhase::LayoutTicks;
        self.sections.begin_pass();
        let mut ticks = Scene::new();
        let mut major_ordinal = 0;

        for entry in &entries {
            let TickPlacement::Radial { angle_tenths } = entry.placement else {
                continue;
            };
            let resolved = self.sections.resolve(entry.value, entry.is_major, style);
            let part = if entry.is_major {
                &style.indicator
            } else {
                &style.items
            };
            let (a, b) = frame.tick_points(angle_tenths, part.length);
            ticks.line(a, b, resolved.line);

            if entry.is_major {
                major_ordinal += 1;
                if let Some(text) = self.label_text(entry.value, major_ordinal) {
                    let size = measure.measure_text(&text, &resolved.text);
                    let anchor = frame.label_anchor(
                        angle_tenths,
                        part.length,
                        config.label_gap + resolved.text.letter_space,
                    );
                    ticks.label(centred_label_area(anchor, size), text, resolved.text);
                }
            }
        }

        let arc_radius = frame.radius() - style.main.line.width / 2;
        let mut main = Scene::new();
        main.add_command(DrawCommand::Arc {
            centre: frame.centre(),
            radius: arc_radius,
            start_angle: f64::from(config.rotation),
            end_angle: f64::from(config.rotation) + f64::from(config.angle_range),
            style: style.main.line,
        });
        for (id, section) in self.sections.iter().enumerate() {
            if section.max < config.range_min || section.min > config.range_max {
                continue;
            }
            let map = |v| value_angle(v, config.range_min, config.range_max, config.angle_range, config.rotation);
            main.add_command(DrawCommand::Arc {
                centre: frame.centre(),
                radius: arc_radius,
                start_angle: map(section.min),
                end_angle: map(section.max),
                style: self.sections.main_style(id, style),
            });
        }

        let pointer_tenths = (value_angle(
            value,
            config.range_min,
            config.range_max,
            config.angle_range,
            config.rotation,
        ) * 10.0)
            .round() as i32;
        let mut needle = Scene::new();
        let (a, b) = frame.tick_points(pointer_tenths, style.indicator.length);
        needle.line(a, b, style.indicator.line);
        if let Some(length) = config.needle_length {
            let (a, b) = frame.needle_points(pointer_tenths, length);
            needle.line(a, b, style.indicator.line);
        }

        self.phase = RedrawPhase::EmitDrawCommands;
        assemble(config.draw_ticks_on_top, ticks, main, needle)
    }
}

fn assemble(ticks_on_top: bool, ticks: Scene, main: Scene, needle: Scene) -> Scene {
    let mut scene = Scene::new();
    if ticks_on_top {
        scene.extend(main);
        scene.extend(ticks);
    } else {
        scene.extend(ticks);
        scene.extend(main);
    }
    scene.extend(needle);
    scene
}
