//! Label boxes next to ticks.

use crate::geometry::{Area, LinearFrame, Point, Size};

/// Which end of a tick a label sits beyond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    /// Behind the main line, away from the ticks
    Baseline,
    /// Past the free end of the tick
    Tip,
}

/// Place a `size` box beside the tick `a`-`b` on a linear scale.
///
/// The box is centred on the tick along the scale and kept `padding` pixels
/// clear of the stroke across it.
pub fn linear_label_area(
    frame: &LinearFrame,
    a: Point,
    b: Point,
    size: Size,
    padding: i32,
    line_width: i32,
    side: LabelSide,
) -> Area {
    let outward = frame.outward();
    let clearance = padding + line_width / 2 + 1;
    let (from, direction) = match side {
        LabelSide::Tip => (b, outward),
        LabelSide::Baseline => (a, -outward),
    };

    if frame.is_vertical() {
        let x1 = if direction > 0 {
            from.x + clearance
        } else {
            from.x - clearance - size.width + 1
        };
        let y1 = from.y - size.height / 2;
        Area::from_origin_size(Point::new(x1, y1), size)
    } else {
        let y1 = if direction > 0 {
            from.y + clearance
        } else {
            from.y - clearance - size.height + 1
        };
        let x1 = from.x - size.width / 2;
        Area::from_origin_size(Point::new(x1, y1), size)
    }
}

/// Box centred on `anchor`.
pub fn centred_label_area(anchor: Point, size: Size) -> Area {
    Area::from_origin_size(
        Point::new(anchor.x - size.width / 2, anchor.y - size.height / 2),
        size,
    )
}
