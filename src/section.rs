//! Value ranges with their own styling.
//!
//! Sections are consulted newest first and the first one containing a
//! value wins. A part without an override in the winning section falls
//! back to the gauge's base style.

use crate::config::{Color, GaugeStyle, LineStyle, Part, TextStyle};
use crate::geometry::{compensation_width, Point};

/// Optional style properties layered over the base style.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StyleOverride {
    pub line_width: Option<i32>,
    pub line_color: Option<Color>,
    pub line_opa: Option<u8>,
    pub text_color: Option<Color>,
    pub text_opa: Option<u8>,
    pub letter_space: Option<i32>,
    pub font_size: Option<f32>,
}

impl StyleOverride {
    pub fn line_width(mut self, width: i32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn apply_line(&self, base: LineStyle) -> LineStyle {
        LineStyle {
            width: self.line_width.unwrap_or(base.width),
            color: self.line_color.unwrap_or(base.color),
            opa: self.line_opa.unwrap_or(base.opa),
        }
    }

    pub fn apply_text(&self, base: TextStyle) -> TextStyle {
        TextStyle {
            color: self.text_color.unwrap_or(base.color),
            opa: self.text_opa.unwrap_or(base.opa),
            letter_space: self.letter_space.unwrap_or(base.letter_space),
            font_size: self.font_size.unwrap_or(base.font_size),
        }
    }
}

/// A tick seen during one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedTick {
    pub index: u32,
    pub is_major: bool,
    /// Line width after odd-width adjustment
    pub width: i32,
    pub point: Point,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub min: f64,
    pub max: f64,
    main: Option<StyleOverride>,
    indicator: Option<StyleOverride>,
    items: Option<StyleOverride>,
    first: Option<TrackedTick>,
    last: Option<TrackedTick>,
}

impl Section {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, part: Part, style: StyleOverride) -> Self {
        self.set_style(part, Some(style));
        self
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_style(&mut self, part: Part, style: Option<StyleOverride>) {
        match part {
            Part::Main => self.main = style,
            Part::Indicator => self.indicator = style,
            Part::Items => self.items = style,
        }
    }

    pub fn style(&self, part: Part) -> Option<&StyleOverride> {
        match part {
            Part::Main => self.main.as_ref(),
            Part::Indicator => self.indicator.as_ref(),
            Part::Items => self.items.as_ref(),
        }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn first_tick(&self) -> Option<&TrackedTick> {
        self.first.as_ref()
    }

    pub fn last_tick(&self) -> Option<&TrackedTick> {
        self.last.as_ref()
    }
}

/// Styles chosen for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTick {
    pub line: LineStyle,
    pub text: TextStyle,
    /// Index of the section that matched, if any
    pub section: Option<usize>,
}

/// Sections of one gauge in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new section's index.
    pub fn add(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    pub fn get(&self, id: usize) -> Option<&Section> {
        self.sections.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Section> {
        self.sections.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Oldest first, which is also the order section lines are drawn in.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    fn matching(&self, value: f64) -> Option<(usize, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .rev()
            .find(|(_, section)| section.contains(value))
    }

    pub fn resolve(&self, value: f64, is_major: bool, base: &GaugeStyle) -> ResolvedTick {
        let part = if is_major { Part::Indicator } else { Part::Items };
        let base_part = base.part(part);
        let matched = self.matching(value);
        let overrides = matched.and_then(|(_, section)| section.style(part));
        ResolvedTick {
            line: overrides.map_or(base_part.line, |o| o.apply_line(base_part.line)),
            text: overrides.map_or(base_part.text, |o| o.apply_text(base_part.text)),
            section: matched.map(|(id, _)| id),
        }
    }

    /// Main line style for a section, falling back to the base main style.
    pub fn main_style(&self, id: usize, base: &GaugeStyle) -> LineStyle {
        self.sections
            .get(id)
            .and_then(|section| section.style(Part::Main))
            .map_or(base.main.line, |o| o.apply_line(base.main.line))
    }

    /// Forget the ticks seen during the previous pass.
    pub fn begin_pass(&mut self) {
        for section in &mut self.sections {
            section.first = None;
            section.last = None;
        }
    }

    /// Record a tick against the section it resolved to.
    pub fn track(&mut self, section: usize, mut tick: TrackedTick, vertical: bool) {
        let Some(section) = self.sections.get_mut(section) else {
            return;
        };
        if section.first.is_none() {
            tick.width = compensation_width(tick.width, vertical, true);
            section.first = Some(tick);
        } else {
            tick.width = compensation_width(tick.width, vertical, false);
            section.last = Some(tick);
        }
    }
}
