//! Bounding boxes for every annotation variant
//!
//! All boxes are computed in canvas pixel space. Text-bearing variants need
//! a string width, which the engine cannot know without a font stack, so
//! width estimation goes through the [`TextMeasurer`] seam; embedders with a
//! real text pipeline substitute their own implementation.

use crate::annotation::{AnnotationKind, MeasureGeometry, ShapeKind};
use crate::geometry::{Bounds, CanvasSize};

/// Padding around a single selected object's box
pub const SINGLE_SELECTION_PADDING: f32 = 5.0;
/// Padding around the unified multi-selection box
pub const MULTI_SELECTION_PADDING: f32 = 10.0;
/// Side of the square hit zone around each resize handle
pub const HANDLE_HIT_AREA: f32 = 80.0;
/// Fixed icon box for comment markers
pub const COMMENT_ICON_SIZE: f32 = 30.0;

/// String width measurement at a given font size, in pixels
pub trait TextMeasurer {
    fn measure_width(&self, text: &str, font_size_px: f32) -> f32;
}

/// Width estimate from an average character width ratio.
///
/// 0.6 of the font size per character is a conservative estimate for
/// proportional fonts.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicTextMeasurer {
    pub char_width_ratio: f32,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_width(&self, text: &str, font_size_px: f32) -> f32 {
        text.chars().count() as f32 * font_size_px * self.char_width_ratio
    }
}

/// One of the eight resize drag targets on a selection box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl Handle {
    /// Corner handles first, so corners win where hit zones overlap
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
    ];

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomLeft | Handle::BottomRight
        )
    }

    /// Handle position on the given box
    pub fn position_on(&self, bounds: &Bounds) -> (f32, f32) {
        let (cx, cy) = bounds.center();
        match self {
            Handle::TopLeft => (bounds.left, bounds.top),
            Handle::TopRight => (bounds.right, bounds.top),
            Handle::BottomLeft => (bounds.left, bounds.bottom),
            Handle::BottomRight => (bounds.right, bounds.bottom),
            Handle::Top => (cx, bounds.top),
            Handle::Bottom => (cx, bounds.bottom),
            Handle::Left => (bounds.left, cy),
            Handle::Right => (bounds.right, cy),
        }
    }

    /// The box corner/edge that stays fixed while this handle is dragged
    pub fn anchor_on(&self, bounds: &Bounds) -> (f32, f32) {
        let (cx, cy) = bounds.center();
        match self {
            Handle::TopLeft => (bounds.right, bounds.bottom),
            Handle::TopRight => (bounds.left, bounds.bottom),
            Handle::BottomLeft => (bounds.right, bounds.top),
            Handle::BottomRight => (bounds.left, bounds.top),
            Handle::Top => (cx, bounds.bottom),
            Handle::Bottom => (cx, bounds.top),
            Handle::Left => (bounds.right, cy),
            Handle::Right => (bounds.left, cy),
        }
    }
}

/// Bounding box of an annotation in canvas pixels.
///
/// `None` only for malformed objects (an empty point sequence).
pub fn bounds_of(
    kind: &AnnotationKind,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
) -> Option<Bounds> {
    match kind {
        AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
            Bounds::from_pixel_points(points.iter().map(|p| p.to_pixels(canvas)))
        }
        // Baseline-anchored: y is the text baseline, box rises by the font size
        AnnotationKind::Text {
            x,
            y,
            font_size,
            width,
            ..
        } => {
            let left = x * canvas.width;
            let baseline = y * canvas.height;
            let font_px = font_size * canvas.height;
            Some(Bounds::new(
                left,
                baseline - font_px,
                left + width * canvas.width,
                baseline,
            ))
        }
        AnnotationKind::Image {
            x,
            y,
            width,
            height,
            ..
        }
        | AnnotationKind::SignatureImage {
            x,
            y,
            width,
            height,
            ..
        }
        | AnnotationKind::TextField {
            x,
            y,
            width,
            height,
            ..
        } => Some(box_from_top_left(
            *x, *y, *width, *height, canvas,
        )),
        AnnotationKind::Redaction {
            x,
            y,
            width,
            height,
            ..
        } => Some(box_from_top_left(*x, *y, *width, *height, canvas)),
        AnnotationKind::Stamp {
            x,
            y,
            width,
            height,
            ..
        } => {
            let cx = x * canvas.width;
            let cy = y * canvas.height;
            let w = width * canvas.width;
            let h = height * canvas.height;
            Some(Bounds::new(
                cx - w / 2.0,
                cy - h / 2.0,
                cx + w / 2.0,
                cy + h / 2.0,
            ))
        }
        AnnotationKind::Checkbox { x, y, size, .. } => {
            let left = x * canvas.width;
            let top = y * canvas.height;
            let side = size * canvas.width;
            Some(Bounds::new(left, top, left + side, top + side))
        }
        AnnotationKind::Shape {
            kind: shape_kind,
            start,
            end,
            radius_x,
            radius_y,
            ..
        } => {
            let (x1, y1) = start.to_pixels(canvas);
            let (x2, y2) = end.to_pixels(canvas);
            match shape_kind {
                ShapeKind::Circle => {
                    let (rx, ry) = match (radius_x, radius_y) {
                        (Some(rx), Some(ry)) => (rx * canvas.width, ry * canvas.height),
                        _ => {
                            let r = crate::geometry::distance(x1, y1, x2, y2);
                            (r, r)
                        }
                    };
                    Some(Bounds::new(x1 - rx, y1 - ry, x1 + rx, y1 + ry))
                }
                ShapeKind::Rectangle | ShapeKind::Line | ShapeKind::Arrow => Some(Bounds::new(
                    x1.min(x2),
                    y1.min(y2),
                    x1.max(x2),
                    y1.max(y2),
                )),
            }
        }
        AnnotationKind::DateStamp {
            x,
            y,
            date,
            font_size,
            ..
        } => {
            let left = x * canvas.width;
            let baseline = y * canvas.height;
            let font_px = font_size * canvas.height;
            let text_width = measurer.measure_width(date, font_px);
            Some(Bounds::new(
                left,
                baseline - font_px,
                left + text_width,
                baseline,
            ))
        }
        AnnotationKind::Watermark {
            text,
            x,
            y,
            font_size,
            ..
        } => {
            let cx = x * canvas.width;
            let cy = y * canvas.height;
            let font_px = font_size * canvas.height;
            let text_width = measurer.measure_width(text, font_px);
            Some(Bounds::new(
                cx - text_width / 2.0,
                cy - font_px / 2.0,
                cx + text_width / 2.0,
                cy + font_px / 2.0,
            ))
        }
        AnnotationKind::Comment { x, y, .. } => {
            let left = x * canvas.width;
            let top = y * canvas.height;
            Some(Bounds::new(
                left,
                top,
                left + COMMENT_ICON_SIZE,
                top + COMMENT_ICON_SIZE,
            ))
        }
        AnnotationKind::Measurement { geometry, .. } => match geometry {
            MeasureGeometry::Distance { start, end } => Bounds::from_pixel_points(
                [start.to_pixels(canvas), end.to_pixels(canvas)],
            ),
            MeasureGeometry::Area { points } => {
                Bounds::from_pixel_points(points.iter().map(|p| p.to_pixels(canvas)))
            }
        },
    }
}

fn box_from_top_left(x: f32, y: f32, width: f32, height: f32, canvas: CanvasSize) -> Bounds {
    let left = x * canvas.width;
    let top = y * canvas.height;
    Bounds::new(
        left,
        top,
        left + width * canvas.width,
        top + height * canvas.height,
    )
}

/// Selection box around a single object, padded on all sides
pub fn selection_bounds_of(
    kind: &AnnotationKind,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    padding: f32,
) -> Option<Bounds> {
    bounds_of(kind, canvas, measurer).map(|b| b.expanded(padding))
}

/// Union box over several objects; `None` when nothing yields bounds
pub fn multi_bounds_of<'a, I>(
    kinds: I,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
) -> Option<Bounds>
where
    I: IntoIterator<Item = &'a AnnotationKind>,
{
    let mut union: Option<Bounds> = None;
    for kind in kinds {
        if let Some(bounds) = bounds_of(kind, canvas, measurer) {
            union = Some(match union {
                None => bounds,
                Some(acc) => Bounds::new(
                    acc.left.min(bounds.left),
                    acc.top.min(bounds.top),
                    acc.right.max(bounds.right),
                    acc.bottom.max(bounds.bottom),
                ),
            });
        }
    }
    union
}

/// Which resize handle, if any, sits under a pixel position.
///
/// The square hit zone is generous but shrinks on small boxes so adjacent
/// zones cannot swallow the whole object; corners are tried before edges.
pub fn handle_at(bounds: &Bounds, x: f32, y: f32) -> Option<Handle> {
    let hit_area = HANDLE_HIT_AREA.min(bounds.min_dimension() / 3.0);
    let half = hit_area / 2.0;

    for handle in Handle::ALL {
        let (hx, hy) = handle.position_on(bounds);
        if (x - hx).abs() <= half && (y - hy).abs() <= half {
            return Some(handle);
        }
    }
    None
}

/// Drag-box selection test: any overlap with the object's bounds qualifies
pub fn intersects_selection_box(
    kind: &AnnotationKind,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    selection_box: &Bounds,
) -> bool {
    match bounds_of(kind, canvas, measurer) {
        Some(bounds) => bounds.intersects(selection_box),
        None => false,
    }
}
