//! Eraser: geometric deletion and stroke splitting
//!
//! The eraser is a circle in canvas pixels. Box-like objects are deleted
//! outright when the circle reaches their bounding box; strokes are split
//! into the point runs that survive outside the circle, and shapes are
//! first rasterized into a dense outline so they split the same way.
//! Fragments of a split shape are re-emitted as plain pen strokes, because
//! a two-point shape cannot represent an arbitrary broken outline.
//!
//! Every deletion or split pushes one erase record carrying the original
//! and its fragments, so undo restores the object as a single unit.

use crate::annotation::{Annotation, AnnotationKind, MeasureGeometry, ShapeKind};
use crate::bounds::{bounds_of, TextMeasurer};
use crate::document::Page;
use crate::geometry::{self, CanvasSize, PagePoint};
use log::debug;

/// Default brush radius in canvas pixels
pub const DEFAULT_ERASER_RADIUS: f32 = 20.0;

/// Samples per straight edge when rasterizing a shape outline
const SHAPE_EDGE_SAMPLES: usize = 50;
/// Samples around a full circle
const CIRCLE_SAMPLES: usize = 100;

enum EraseAction {
    Keep,
    DeleteWhole,
    Split(Vec<Vec<PagePoint>>),
}

/// Apply the eraser at a pixel position. Returns true when anything
/// changed. Walks the page newest-first; each affected annotation gets its
/// own undo record.
pub fn erase_at(
    page: &mut Page,
    x: f32,
    y: f32,
    radius: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
) -> bool {
    let mut changed = false;
    let mut index = page.annotations().len();

    while index > 0 {
        index -= 1;

        let (action, color, width) = {
            let annotation = &page.annotations()[index];
            let color = annotation.kind.color().unwrap_or_default();
            let stroke_width = match &annotation.kind {
                AnnotationKind::Pen { width, .. }
                | AnnotationKind::Highlight { width, .. }
                | AnnotationKind::Shape { width, .. } => *width,
                _ => 2.0,
            };
            (
                action_for(&annotation.kind, x, y, radius, canvas, measurer),
                color,
                stroke_width,
            )
        };

        match action {
            EraseAction::Keep => {}
            EraseAction::DeleteWhole => {
                debug!("eraser removed whole annotation at index {index}");
                page.apply_erase(index, Vec::new());
                changed = true;
            }
            EraseAction::Split(runs) => {
                debug!("eraser split annotation at index {index} into {} runs", runs.len());
                let fragments: Vec<Annotation> = runs
                    .into_iter()
                    .map(|points| {
                        Annotation::new(AnnotationKind::Pen {
                            color,
                            width,
                            points,
                        })
                    })
                    .collect();
                page.apply_erase(index, fragments);
                changed = true;
            }
        }
    }

    changed
}

fn action_for(
    kind: &AnnotationKind,
    x: f32,
    y: f32,
    radius: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
) -> EraseAction {
    match kind {
        // Whole-object variants: a single rectangle-vs-circle proximity
        // test against the bounding box
        AnnotationKind::Text { .. }
        | AnnotationKind::SignatureImage { .. }
        | AnnotationKind::Stamp { .. }
        | AnnotationKind::Checkbox { .. }
        | AnnotationKind::DateStamp { .. }
        | AnnotationKind::TextField { .. }
        | AnnotationKind::Comment { .. }
        | AnnotationKind::Watermark { .. }
        | AnnotationKind::Redaction { .. } => match bounds_of(kind, canvas, measurer) {
            Some(bounds) => {
                let (cx, cy) = bounds.closest_point_to(x, y);
                if geometry::distance(x, y, cx, cy) <= radius {
                    EraseAction::DeleteWhole
                } else {
                    EraseAction::Keep
                }
            }
            None => EraseAction::Keep,
        },
        // Placed images are not erasable with the brush; the delete tool
        // removes them
        AnnotationKind::Image { .. } => EraseAction::Keep,
        AnnotationKind::Measurement { geometry, .. } => match geometry {
            MeasureGeometry::Distance { start, end } => {
                let (x1, y1) = start.to_pixels(canvas);
                let (x2, y2) = end.to_pixels(canvas);
                if geometry::point_to_segment_distance(x, y, x1, y1, x2, y2) <= radius {
                    EraseAction::DeleteWhole
                } else {
                    EraseAction::Keep
                }
            }
            MeasureGeometry::Area { points } => {
                let vertices: Vec<(f32, f32)> =
                    points.iter().map(|p| p.to_pixels(canvas)).collect();
                if geometry::point_in_polygon(x, y, &vertices) {
                    EraseAction::DeleteWhole
                } else {
                    EraseAction::Keep
                }
            }
        },
        AnnotationKind::Shape { .. } => {
            let outline = rasterize_shape(kind, canvas);
            split_action(&outline, x, y, radius, canvas)
        }
        AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
            split_action(points, x, y, radius, canvas)
        }
    }
}

/// Classify the split outcome for a point sequence: untouched, fully
/// consumed, or broken into surviving runs
fn split_action(
    points: &[PagePoint],
    x: f32,
    y: f32,
    radius: f32,
    canvas: CanvasSize,
) -> EraseAction {
    if points.is_empty() {
        return EraseAction::Keep;
    }

    let runs = split_runs(points, x, y, radius, canvas);
    if runs.is_empty() {
        EraseAction::DeleteWhole
    } else if runs.len() == 1 && runs[0].len() == points.len() {
        EraseAction::Keep
    } else {
        EraseAction::Split(runs)
    }
}

/// Walk the point sequence keeping maximal contiguous runs of points that
/// lie outside the eraser circle
fn split_runs(
    points: &[PagePoint],
    x: f32,
    y: f32,
    radius: f32,
    canvas: CanvasSize,
) -> Vec<Vec<PagePoint>> {
    let mut runs = Vec::new();
    let mut current: Vec<PagePoint> = Vec::new();

    for point in points {
        let (px, py) = point.to_pixels(canvas);
        if geometry::distance(x, y, px, py) > radius {
            current.push(*point);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Rasterize a shape outline into an ordered normalized point sequence so
/// the eraser can split it like a freehand stroke
fn rasterize_shape(kind: &AnnotationKind, canvas: CanvasSize) -> Vec<PagePoint> {
    let AnnotationKind::Shape {
        kind: shape_kind,
        start,
        end,
        radius_x,
        radius_y,
        ..
    } = kind
    else {
        return Vec::new();
    };

    let (x1, y1) = start.to_pixels(canvas);
    let (x2, y2) = end.to_pixels(canvas);
    let mut pixels: Vec<(f32, f32)> = Vec::new();

    match shape_kind {
        ShapeKind::Rectangle => {
            let steps = SHAPE_EDGE_SAMPLES;
            let width = x2 - x1;
            let height = y2 - y1;
            for i in 0..=steps {
                pixels.push((x1 + width * i as f32 / steps as f32, y1));
            }
            for i in 1..=steps {
                pixels.push((x2, y1 + height * i as f32 / steps as f32));
            }
            for i in 1..=steps {
                pixels.push((x2 - width * i as f32 / steps as f32, y2));
            }
            for i in 1..steps {
                pixels.push((x1, y2 - height * i as f32 / steps as f32));
            }
        }
        ShapeKind::Circle => {
            let (rx, ry) = match (radius_x, radius_y) {
                (Some(rx), Some(ry)) => (rx * canvas.width, ry * canvas.height),
                _ => {
                    let r = geometry::distance(x1, y1, x2, y2);
                    (r, r)
                }
            };
            for i in 0..CIRCLE_SAMPLES {
                let angle = i as f32 / CIRCLE_SAMPLES as f32 * std::f32::consts::TAU;
                pixels.push((x1 + rx * angle.cos(), y1 + ry * angle.sin()));
            }
        }
        ShapeKind::Line | ShapeKind::Arrow => {
            let steps = SHAPE_EDGE_SAMPLES;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                pixels.push((x1 + (x2 - x1) * t, y1 + (y2 - y1) * t));
            }
        }
    }

    pixels
        .into_iter()
        .map(|(px, py)| PagePoint::from_pixels(px, py, canvas))
        .collect()
}
