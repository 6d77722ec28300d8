//! Point hit-testing against a page's annotations
//!
//! Tests walk the annotation sequence from most-recently-added to oldest,
//! so later draws win on overlap. Stroke proximity is vertex-based rather
//! than true polyline distance: a path matches when the pointer is within a
//! fixed radius of any of its points. That is intentionally cheap; dense
//! input sampling makes it accurate enough for pointer-sized targets.

use crate::annotation::{Annotation, AnnotationKind, MeasureGeometry};
use crate::bounds::{bounds_of, TextMeasurer};
use crate::geometry::{self, CanvasSize};

/// Extra margin around shape boxes so thin lines and outlines stay clickable
pub const SHAPE_HIT_MARGIN: f32 = 35.0;
/// Loose vertex-proximity radius, used by click selection
pub const STROKE_HIT_RADIUS_LOOSE: f32 = 20.0;
/// Tight vertex-proximity radius, used by move and delete
pub const STROKE_HIT_RADIUS_TIGHT: f32 = 10.0;

/// Fixed priority order for the cross-type combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeClass {
    Text,
    Image,
    Shape,
    Stamp,
    Signature,
    Stroke,
    Checkbox,
    DateStamp,
    TextField,
    Comment,
    Watermark,
    Measurement,
    Redaction,
}

const PRIORITY_ORDER: [TypeClass; 13] = [
    TypeClass::Text,
    TypeClass::Image,
    TypeClass::Shape,
    TypeClass::Stamp,
    TypeClass::Signature,
    TypeClass::Stroke,
    TypeClass::Checkbox,
    TypeClass::DateStamp,
    TypeClass::TextField,
    TypeClass::Comment,
    TypeClass::Watermark,
    TypeClass::Measurement,
    TypeClass::Redaction,
];

fn class_of(kind: &AnnotationKind) -> TypeClass {
    match kind {
        AnnotationKind::Text { .. } => TypeClass::Text,
        AnnotationKind::Image { .. } => TypeClass::Image,
        AnnotationKind::Shape { .. } => TypeClass::Shape,
        AnnotationKind::Stamp { .. } => TypeClass::Stamp,
        AnnotationKind::SignatureImage { .. } => TypeClass::Signature,
        AnnotationKind::Pen { .. } | AnnotationKind::Highlight { .. } => TypeClass::Stroke,
        AnnotationKind::Checkbox { .. } => TypeClass::Checkbox,
        AnnotationKind::DateStamp { .. } => TypeClass::DateStamp,
        AnnotationKind::TextField { .. } => TypeClass::TextField,
        AnnotationKind::Comment { .. } => TypeClass::Comment,
        AnnotationKind::Watermark { .. } => TypeClass::Watermark,
        AnnotationKind::Measurement { .. } => TypeClass::Measurement,
        AnnotationKind::Redaction { .. } => TypeClass::Redaction,
    }
}

/// Geometric test for a single annotation at a pixel position.
///
/// `stroke_radius` selects the loose or tight vertex-proximity radius for
/// point-carrying variants.
pub fn hit_test_kind(
    kind: &AnnotationKind,
    x: f32,
    y: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    stroke_radius: f32,
) -> bool {
    match kind {
        AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
            points.iter().any(|p| {
                let (px, py) = p.to_pixels(canvas);
                geometry::distance(x, y, px, py) <= stroke_radius
            })
        }
        AnnotationKind::Shape { .. } => match bounds_of(kind, canvas, measurer) {
            Some(bounds) => bounds.expanded(SHAPE_HIT_MARGIN).contains(x, y),
            None => false,
        },
        AnnotationKind::Measurement { geometry, .. } => match geometry {
            MeasureGeometry::Distance { start, end } => {
                let (x1, y1) = start.to_pixels(canvas);
                let (x2, y2) = end.to_pixels(canvas);
                geometry::point_to_segment_distance(x, y, x1, y1, x2, y2)
                    <= STROKE_HIT_RADIUS_TIGHT
            }
            MeasureGeometry::Area { points } => {
                let vertices: Vec<(f32, f32)> =
                    points.iter().map(|p| p.to_pixels(canvas)).collect();
                geometry::point_in_polygon(x, y, &vertices)
            }
        },
        // Every remaining variant is a plain box test against its own
        // bounds rule (baseline-anchored text, centered stamp, measured
        // watermark ignoring rotation, fixed comment icon)
        AnnotationKind::Text { .. }
        | AnnotationKind::Image { .. }
        | AnnotationKind::SignatureImage { .. }
        | AnnotationKind::Stamp { .. }
        | AnnotationKind::Checkbox { .. }
        | AnnotationKind::DateStamp { .. }
        | AnnotationKind::TextField { .. }
        | AnnotationKind::Comment { .. }
        | AnnotationKind::Watermark { .. }
        | AnnotationKind::Redaction { .. } => match bounds_of(kind, canvas, measurer) {
            Some(bounds) => bounds.contains(x, y),
            None => false,
        },
    }
}

/// Topmost annotation at a position, in pure z-order (newest first)
pub fn hit_test<'a>(
    annotations: &'a [Annotation],
    x: f32,
    y: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    stroke_radius: f32,
) -> Option<&'a Annotation> {
    annotations
        .iter()
        .rev()
        .find(|a| hit_test_kind(&a.kind, x, y, canvas, measurer, stroke_radius))
}

/// First hit walking the fixed type priority order.
///
/// Across types the priority order decides regardless of z-order; within a
/// type the most recently added annotation wins.
pub fn hit_test_any<'a>(
    annotations: &'a [Annotation],
    x: f32,
    y: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    stroke_radius: f32,
) -> Option<&'a Annotation> {
    for class in PRIORITY_ORDER {
        let hit = annotations.iter().rev().find(|a| {
            class_of(&a.kind) == class
                && hit_test_kind(&a.kind, x, y, canvas, measurer, stroke_radius)
        });
        if hit.is_some() {
            return hit;
        }
    }
    None
}

/// Every annotation under a position, in type priority order then
/// newest-first within a type. For overlap-aware tooling.
pub fn hit_test_all<'a>(
    annotations: &'a [Annotation],
    x: f32,
    y: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    stroke_radius: f32,
) -> Vec<&'a Annotation> {
    let mut hits = Vec::new();
    for class in PRIORITY_ORDER {
        for annotation in annotations.iter().rev() {
            if class_of(&annotation.kind) == class
                && hit_test_kind(&annotation.kind, x, y, canvas, measurer, stroke_radius)
            {
                hits.push(annotation);
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Color, ShapeKind};
    use crate::bounds::HeuristicTextMeasurer;
    use crate::geometry::PagePoint;

    const CANVAS: CanvasSize = CanvasSize {
        width: 1000.0,
        height: 800.0,
    };

    fn measurer() -> HeuristicTextMeasurer {
        HeuristicTextMeasurer::default()
    }

    fn pen_at(points: &[(f32, f32)]) -> Annotation {
        Annotation::new(AnnotationKind::Pen {
            color: Color::RED,
            width: 2.0,
            points: points.iter().map(|&(x, y)| PagePoint::new(x, y)).collect(),
        })
    }

    fn text_at(x: f32, y: f32) -> Annotation {
        Annotation::new(AnnotationKind::Text {
            text: "hello".to_string(),
            x,
            y,
            color: Color::BLACK,
            font_size: 0.05,
            width: 0.2,
        })
    }

    #[test]
    fn test_stroke_radius_loose_vs_tight() {
        let pen = pen_at(&[(0.5, 0.5)]);
        let annotations = vec![pen];
        // Point is 15 px from the single vertex
        let (x, y) = (515.0, 400.0);
        assert!(hit_test(&annotations, x, y, CANVAS, &measurer(), STROKE_HIT_RADIUS_LOOSE)
            .is_some());
        assert!(hit_test(&annotations, x, y, CANVAS, &measurer(), STROKE_HIT_RADIUS_TIGHT)
            .is_none());
    }

    #[test]
    fn test_shape_hit_margin() {
        let shape = Annotation::new(AnnotationKind::Shape {
            kind: ShapeKind::Line,
            color: Color::RED,
            width: 2.0,
            start: PagePoint::new(0.2, 0.5),
            end: PagePoint::new(0.4, 0.5),
            radius_x: None,
            radius_y: None,
        });
        let annotations = vec![shape];
        // A thin horizontal line; 30 px above it is inside the 35 px margin
        assert!(hit_test(&annotations, 300.0, 370.0, CANVAS, &measurer(), 0.0).is_some());
        assert!(hit_test(&annotations, 300.0, 360.0, CANVAS, &measurer(), 0.0).is_none());
    }

    #[test]
    fn test_priority_beats_z_order() {
        // Text first, pen drawn later on top of it; priority still
        // returns the text
        let text = text_at(0.1, 0.5);
        let pen = pen_at(&[(0.15, 0.48)]);
        let annotations = vec![text, pen];
        let hit = hit_test_any(
            &annotations,
            150.0,
            390.0,
            CANVAS,
            &measurer(),
            STROKE_HIT_RADIUS_LOOSE,
        )
        .unwrap();
        assert_eq!(hit.kind.type_name(), "text");
    }

    #[test]
    fn test_same_type_recency_wins() {
        let older = text_at(0.1, 0.5);
        let newer = text_at(0.1, 0.5);
        let newer_id = newer.id;
        let annotations = vec![older, newer];
        let hit = hit_test_any(
            &annotations,
            150.0,
            390.0,
            CANVAS,
            &measurer(),
            STROKE_HIT_RADIUS_LOOSE,
        )
        .unwrap();
        assert_eq!(hit.id, newer_id);
    }

    #[test]
    fn test_measurement_distance_segment_hit() {
        let measurement = Annotation::new(AnnotationKind::Measurement {
            color: Color::BLACK,
            value: 0.0,
            unit: crate::measurement::MeasureUnit::Px,
            geometry: crate::annotation::MeasureGeometry::Distance {
                start: PagePoint::new(0.1, 0.5),
                end: PagePoint::new(0.5, 0.5),
            },
        });
        let annotations = vec![measurement];
        // Midway along the segment, 8 px off the line
        assert!(hit_test(&annotations, 300.0, 408.0, CANVAS, &measurer(), 0.0).is_some());
        assert!(hit_test(&annotations, 300.0, 420.0, CANVAS, &measurer(), 0.0).is_none());
    }

    #[test]
    fn test_hit_test_all_collects_overlaps() {
        let text = text_at(0.1, 0.5);
        let pen = pen_at(&[(0.15, 0.48)]);
        let annotations = vec![pen, text];
        let hits = hit_test_all(
            &annotations,
            150.0,
            390.0,
            CANVAS,
            &measurer(),
            STROKE_HIT_RADIUS_LOOSE,
        );
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].kind.type_name(), "text");
        assert_eq!(hits[1].kind.type_name(), "pen");
    }

    #[test]
    fn test_miss_returns_none() {
        let annotations = vec![text_at(0.1, 0.5)];
        assert!(hit_test_any(
            &annotations,
            900.0,
            700.0,
            CANVAS,
            &measurer(),
            STROKE_HIT_RADIUS_LOOSE
        )
        .is_none());
    }
}
