//! Pure geometry helpers for bounding boxes, alignment, and distribution.
//!
//! Everything here works on plain `kurbo` values so the command layer can
//! compute target positions without touching document state.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Alignment modes for a set of bounding boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignMode {
    /// Left edges share the minimum x.
    Left,
    /// Horizontal centers share the mean center x.
    CenterHorizontal,
    /// Right edges share the maximum right.
    Right,
    /// Top edges share the minimum y.
    Top,
    /// Vertical centers share the mean center y.
    CenterVertical,
    /// Bottom edges share the maximum bottom.
    Bottom,
}

impl AlignMode {
    /// Human-readable label, used in command descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            AlignMode::Left => "left",
            AlignMode::CenterHorizontal => "horizontal centers",
            AlignMode::Right => "right",
            AlignMode::Top => "top",
            AlignMode::CenterVertical => "vertical centers",
            AlignMode::Bottom => "bottom",
        }
    }
}

/// Distribution axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Human-readable label, used in command descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontally",
            Axis::Vertical => "vertically",
        }
    }
}

/// Bounding box for a positioned, sized entity.
///
/// Negative extents clamp to zero so a degenerate size still yields a valid
/// (possibly empty) box.
pub fn bounding_box(position: Point, size: Size) -> Rect {
    Rect::from_origin_size(
        position,
        Size::new(size.width.max(0.0), size.height.max(0.0)),
    )
}

/// Union box over a set of bounding boxes, `None` for an empty set.
pub fn selection_bounds<I>(boxes: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    boxes.into_iter().fold(None, |acc, bounds| {
        Some(match acc {
            Some(r) => r.union(bounds),
            None => bounds,
        })
    })
}

/// New origins placing every box so that it satisfies the shared alignment
/// coordinate computed from the full set.
///
/// Alignment of fewer than two boxes is vacuous; the current origins are
/// returned unchanged.
pub fn align_positions(boxes: &[Rect], mode: AlignMode) -> Vec<Point> {
    if boxes.len() < 2 {
        return boxes.iter().map(|b| b.origin()).collect();
    }

    match mode {
        AlignMode::Left => {
            let target = fold_min(boxes.iter().map(|b| b.x0));
            boxes.iter().map(|b| Point::new(target, b.y0)).collect()
        }
        AlignMode::Right => {
            let target = fold_max(boxes.iter().map(|b| b.x1));
            boxes
                .iter()
                .map(|b| Point::new(target - b.width(), b.y0))
                .collect()
        }
        AlignMode::CenterHorizontal => {
            let target = mean(boxes.iter().map(|b| b.center().x));
            boxes
                .iter()
                .map(|b| Point::new(target - b.width() / 2.0, b.y0))
                .collect()
        }
        AlignMode::Top => {
            let target = fold_min(boxes.iter().map(|b| b.y0));
            boxes.iter().map(|b| Point::new(b.x0, target)).collect()
        }
        AlignMode::Bottom => {
            let target = fold_max(boxes.iter().map(|b| b.y1));
            boxes
                .iter()
                .map(|b| Point::new(b.x0, target - b.height()))
                .collect()
        }
        AlignMode::CenterVertical => {
            let target = mean(boxes.iter().map(|b| b.center().y));
            boxes
                .iter()
                .map(|b| Point::new(b.x0, target - b.height() / 2.0))
                .collect()
        }
    }
}

/// New origins spacing interior boxes at equal center-to-center distance
/// between the two extreme boxes along `axis`. The extremes stay fixed.
///
/// Distribution is undefined below three boxes; the current origins are
/// returned unchanged. Results are in input order.
pub fn distribute_positions(boxes: &[Rect], axis: Axis) -> Vec<Point> {
    let mut positions: Vec<Point> = boxes.iter().map(|b| b.origin()).collect();
    if boxes.len() < 3 {
        return positions;
    }

    let center = |b: &Rect| match axis {
        Axis::Horizontal => b.center().x,
        Axis::Vertical => b.center().y,
    };

    // Sort indices by center along the axis; ties keep input order.
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| center(&boxes[a]).total_cmp(&center(&boxes[b])));

    let first = center(&boxes[order[0]]);
    let last = center(&boxes[order[order.len() - 1]]);
    let spacing = (last - first) / (boxes.len() - 1) as f64;

    for (slot, &idx) in order.iter().enumerate().skip(1).take(order.len() - 2) {
        let target_center = first + slot as f64 * spacing;
        let b = &boxes[idx];
        positions[idx] = match axis {
            Axis::Horizontal => Point::new(target_center - b.width() / 2.0, b.y0),
            Axis::Vertical => Point::new(b.x0, target_center - b.height() / 2.0),
        };
    }

    positions
}

fn fold_min<I: Iterator<Item = f64>>(values: I) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

fn fold_max<I: Iterator<Item = f64>>(values: I) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    sum / count as f64
}
