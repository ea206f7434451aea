//! Tick generation for scrolling (linear) and static (round) scales.

use crate::angle::{limit, sub_tick, window_start};
use crate::geometry::radial_angle_tenths;

/// Where a tick sits, before it is mapped onto a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPlacement {
    /// Pixels from the scale centre along the value axis
    Linear { pixel_offset: i32 },
    /// Angle from 3 o'clock, tenths of a degree
    Radial { angle_tenths: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickEntry {
    pub index: u32,
    /// Logical value, already wrapped into the scale range
    pub value: f64,
    pub is_major: bool,
    pub placement: TickPlacement,
}

impl TickEntry {
    pub fn pixel_offset(&self) -> Option<i32> {
        match self.placement {
            TickPlacement::Linear { pixel_offset } => Some(pixel_offset),
            TickPlacement::Radial { .. } => None,
        }
    }

    pub fn angle_tenths(&self) -> Option<i32> {
        match self.placement {
            TickPlacement::Radial { angle_tenths } => Some(angle_tenths),
            TickPlacement::Linear { .. } => None,
        }
    }
}

/// A window of ticks that scrolls with the current value, which always
/// sits at the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollingScale {
    /// Logical units between ticks
    pub tick_spacing: f64,
    /// Pixels between ticks
    pub spacing_px: f64,
    /// Intervals in the window; `window_tick_count + 1` ticks are produced
    pub window_tick_count: u32,
    pub major_tick_every: u32,
    pub range_min: f64,
    pub range_max: f64,
}

impl ScrollingScale {
    /// Index of the tick nearest the centre
    pub fn centre_index(&self) -> u32 {
        self.window_tick_count / 2
    }

    /// Pixel shift of the whole window for the sub-tick part of `current`.
    pub fn fractional_offset(&self, current: f64) -> f64 {
        -sub_tick(current, self.tick_spacing) * self.spacing_px / self.tick_spacing
    }

    fn is_major(&self, value: f64) -> bool {
        let ordinal = (value / self.tick_spacing).round() as i64;
        ordinal.rem_euclid(i64::from(self.major_tick_every.max(1))) == 0
    }

    pub fn window(&self, current: f64) -> Vec<TickEntry> {
        let start = window_start(current, self.tick_spacing, self.window_tick_count);
        let frac = self.fractional_offset(current);
        let half = f64::from(self.centre_index());

        (0..=self.window_tick_count)
            .map(|index| {
                let i = f64::from(index);
                let value = limit(start + i * self.tick_spacing, self.range_min, self.range_max);
                TickEntry {
                    index,
                    value,
                    is_major: self.is_major(value),
                    placement: TickPlacement::Linear {
                        pixel_offset: ((i - half) * self.spacing_px + frac).round() as i32,
                    },
                }
            })
            .collect()
    }
}

/// Fixed ticks spread evenly over an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialScale {
    pub total_tick_count: u32,
    pub major_tick_every: u32,
    pub angle_range: u32,
    pub rotation: i32,
    pub range_min: f64,
    pub range_max: f64,
}

impl RadialScale {
    pub fn ticks(&self) -> Vec<TickEntry> {
        let steps = f64::from(self.total_tick_count.saturating_sub(1).max(1));
        let every = self.major_tick_every.max(1);
        (0..self.total_tick_count)
            .map(|index| TickEntry {
                index,
                value: self.range_min + (self.range_max - self.range_min) * f64::from(index) / steps,
                is_major: index % every == 0,
                placement: TickPlacement::Radial {
                    angle_tenths: radial_angle_tenths(
                        index,
                        self.total_tick_count,
                        self.angle_range,
                        self.rotation,
                    ),
                },
            })
            .collect()
    }
}

/// Text for a tick value; integral values drop the fraction.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compass(window_tick_count: u32, spacing_px: f64) -> ScrollingScale {
        ScrollingScale {
            tick_spacing: 10.0,
            spacing_px,
            window_tick_count,
            major_tick_every: 5,
            range_min: 0.0,
            range_max: 360.0,
        }
    }

    fn values(entries: &[TickEntry]) -> Vec<f64> {
        entries.iter().map(|t| t.value).collect()
    }

    fn offsets(entries: &[TickEntry]) -> Vec<i32> {
        entries.iter().filter_map(TickEntry::pixel_offset).collect()
    }

    #[test]
    fn window_around_47() {
        let ticks = compass(4, 20.0).window(47.0);
        assert_eq!(values(&ticks), vec![20.0, 30.0, 40.0, 50.0, 60.0]);
        // 7 units past the 40 tick shifts the window left by 14 px
        assert_eq!(offsets(&ticks), vec![-54, -34, -14, 6, 26]);
    }

    #[test]
    fn window_wraps_through_north() {
        let ticks = compass(4, 20.0).window(5.0);
        assert_eq!(values(&ticks), vec![340.0, 350.0, 0.0, 10.0, 20.0]);
        assert!(ticks[2].is_major);
        assert!(ticks[1].is_major);
        assert!(!ticks[0].is_major);
    }

    #[test]
    fn half_spacing_moves_by_half_spacing_px() {
        let scale = compass(4, 20.0);
        let at_tick = scale.window(40.0);
        let half_way = scale.window(45.0);
        assert_eq!(values(&at_tick), values(&half_way));
        for (a, b) in offsets(&at_tick).iter().zip(offsets(&half_way)) {
            assert_eq!(a - b, 10);
        }
    }

    #[test]
    fn centre_tick_is_zero_offset_on_exact_value() {
        let ticks = compass(4, 20.0).window(90.0);
        assert_eq!(ticks[2].value, 90.0);
        assert_eq!(ticks[2].pixel_offset(), Some(0));
    }

    #[test]
    fn symmetric_range_window() {
        let scale = ScrollingScale {
            tick_spacing: 10.0,
            spacing_px: 16.0,
            window_tick_count: 4,
            major_tick_every: 1,
            range_min: -90.0,
            range_max: 90.0,
        };
        let ticks = scale.window(-85.0);
        assert_eq!(values(&ticks), vec![70.0, 80.0, -90.0, -80.0, -70.0]);
        assert!(ticks.iter().all(|t| t.is_major));
    }

    #[test]
    fn radial_scale_defaults() {
        let ticks = RadialScale {
            total_tick_count: 11,
            major_tick_every: 5,
            angle_range: 270,
            rotation: 135,
            range_min: 0.0,
            range_max: 100.0,
        }
        .ticks();
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0].angle_tenths(), Some(1350));
        assert_eq!(ticks[10].angle_tenths(), Some(4050));
        assert_eq!(ticks[5].value, 50.0);
        let majors: Vec<u32> = ticks.iter().filter(|t| t.is_major).map(|t| t.index).collect();
        assert_eq!(majors, vec![0, 5, 10]);
    }

    #[test]
    fn formats_values() {
        assert_eq!(format_value(340.0), "340");
        assert_eq!(format_value(-20.0), "-20");
        assert_eq!(format_value(12.5), "12.5");
    }
}
