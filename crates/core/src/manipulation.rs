//! Move and resize transforms
//!
//! All drag math is computed against a snapshot of the geometry captured at
//! drag start, never by accumulating per-event deltas, so floating error
//! does not compound across move events. Snapshots live in a gesture-scoped
//! [`DragSnapshot`] map keyed by annotation id; the stored objects are never
//! decorated with transient fields.
//!
//! Deltas are normalized (current pointer minus drag-start pointer, divided
//! by canvas size). Pixel-valued clamps take the canvas explicitly.

use crate::annotation::{AnnotationId, AnnotationKind, MeasureGeometry, ShapeKind};
use crate::bounds::{Handle, TextMeasurer};
use crate::geometry::{clamp, Bounds, CanvasSize, PagePoint};
use std::collections::HashMap;

/// Pre-drag geometry per selected object, captured at gesture start
pub type DragSnapshot = HashMap<AnnotationId, AnnotationKind>;

/// Font size clamp for text resize, in canvas pixels
pub const MIN_TEXT_FONT_PX: f32 = 8.0;
pub const MAX_TEXT_FONT_PX: f32 = 200.0;
/// Smallest image/signature/stamp dimension, in canvas pixels
pub const MIN_IMAGE_SIZE_PX: f32 = 20.0;
/// Smallest circle radius, in canvas pixels
pub const MIN_CIRCLE_RADIUS_PX: f32 = 10.0;
/// Group resize scale floor, preventing inversion
pub const MIN_GROUP_SCALE: f32 = 0.1;

/// The original geometry translated by a normalized delta.
///
/// Applies uniformly to every positional field of the variant: position for
/// boxed and centered types, both endpoints for shapes and distance
/// measurements, all points for paths and area measurements.
pub fn translated_kind(original: &AnnotationKind, dx: f32, dy: f32) -> AnnotationKind {
    let mut moved = original.clone();
    match &mut moved {
        AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
            for p in points.iter_mut() {
                *p = p.translated(dx, dy);
            }
        }
        AnnotationKind::Text { x, y, .. }
        | AnnotationKind::Image { x, y, .. }
        | AnnotationKind::SignatureImage { x, y, .. }
        | AnnotationKind::Stamp { x, y, .. }
        | AnnotationKind::Checkbox { x, y, .. }
        | AnnotationKind::DateStamp { x, y, .. }
        | AnnotationKind::TextField { x, y, .. }
        | AnnotationKind::Comment { x, y, .. }
        | AnnotationKind::Watermark { x, y, .. }
        | AnnotationKind::Redaction { x, y, .. } => {
            *x += dx;
            *y += dy;
        }
        AnnotationKind::Shape { start, end, .. } => {
            *start = start.translated(dx, dy);
            *end = end.translated(dx, dy);
        }
        AnnotationKind::Measurement { geometry, .. } => match geometry {
            MeasureGeometry::Distance { start, end } => {
                *start = start.translated(dx, dy);
                *end = end.translated(dx, dy);
            }
            MeasureGeometry::Area { points } => {
                for p in points.iter_mut() {
                    *p = p.translated(dx, dy);
                }
            }
        },
    }
    moved
}

/// Move an annotation to its snapshot position plus the drag delta
pub fn move_annotation(kind: &mut AnnotationKind, original: &AnnotationKind, dx: f32, dy: f32) {
    *kind = translated_kind(original, dx, dy);
}

/// Resize a single annotation by handle, from its drag-start snapshot.
///
/// Variants without a resize behavior (checkbox, datestamp, comment,
/// watermark, textfield, redaction, measurement) are left untouched; their
/// selection boxes have no meaningful resize semantics.
pub fn resize_annotation(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dx: f32,
    dy: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
) {
    match original {
        AnnotationKind::Text { .. } => resize_text(kind, original, handle, dy, canvas, measurer),
        AnnotationKind::Image { .. } | AnnotationKind::SignatureImage { .. } => {
            resize_image(kind, original, handle, dx, dy, canvas)
        }
        AnnotationKind::Stamp { .. } => resize_stamp(kind, original, handle, dx, dy, canvas),
        AnnotationKind::Shape {
            kind: ShapeKind::Circle,
            ..
        } => resize_circle(kind, original, handle, dx, dy, canvas),
        AnnotationKind::Shape { .. } => resize_shape(kind, original, handle, dx, dy),
        AnnotationKind::Pen { .. } | AnnotationKind::Highlight { .. } => {
            resize_path(kind, original, handle, dx, dy)
        }
        AnnotationKind::Checkbox { .. }
        | AnnotationKind::DateStamp { .. }
        | AnnotationKind::TextField { .. }
        | AnnotationKind::Comment { .. }
        | AnnotationKind::Watermark { .. }
        | AnnotationKind::Redaction { .. }
        | AnnotationKind::Measurement { .. } => {}
    }
}

/// Text resizes through its font size only. Top handles grow inversely
/// with the vertical delta and shift the baseline with the drag; bottom
/// handles grow directly. Width is remeasured at the new size.
fn resize_text(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dy: f32,
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
) {
    let (AnnotationKind::Text {
        y,
        font_size,
        width,
        text,
        ..
    }, AnnotationKind::Text {
        y: orig_y,
        font_size: orig_font,
        ..
    }) = (kind, original)
    else {
        return;
    };

    let mut new_font = *orig_font;
    match handle {
        Handle::TopLeft | Handle::Top | Handle::TopRight => {
            new_font = orig_font - dy;
            *y = orig_y + dy;
        }
        Handle::BottomLeft | Handle::Bottom | Handle::BottomRight => {
            new_font = orig_font + dy;
        }
        Handle::Left | Handle::Right => {}
    }

    new_font = clamp(
        new_font,
        MIN_TEXT_FONT_PX / canvas.height,
        MAX_TEXT_FONT_PX / canvas.height,
    );
    *font_size = new_font;
    *width = measurer.measure_width(text, new_font * canvas.height) / canvas.width;
}

fn image_fields(kind: &AnnotationKind) -> Option<(f32, f32, f32, f32)> {
    match kind {
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
        } => Some((*x, *y, *width, *height)),
        _ => None,
    }
}

fn set_image_fields(kind: &mut AnnotationKind, x: f32, y: f32, width: f32, height: f32) {
    if let AnnotationKind::Image {
        x: kx,
        y: ky,
        width: kw,
        height: kh,
        ..
    }
    | AnnotationKind::SignatureImage {
        x: kx,
        y: ky,
        width: kw,
        height: kh,
        ..
    } = kind
    {
        *kx = x;
        *ky = y;
        *kw = width;
        *kh = height;
    }
}

/// Corner handles keep the drag-start aspect ratio and anchor the opposite
/// corner; edge handles resize one axis freely. Results below the minimum
/// size are rejected whole.
fn resize_image(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dx: f32,
    dy: f32,
    canvas: CanvasSize,
) {
    let Some((orig_x, orig_y, orig_w, orig_h)) = image_fields(original) else {
        return;
    };
    if orig_h == 0.0 {
        return;
    }

    let aspect = orig_w / orig_h;
    let (mut new_x, mut new_y, mut new_w, mut new_h) = (orig_x, orig_y, orig_w, orig_h);

    match handle {
        Handle::BottomRight => {
            new_w = orig_w + dx;
            new_h = new_w / aspect;
        }
        Handle::BottomLeft => {
            new_w = orig_w - dx;
            new_h = new_w / aspect;
            new_x = orig_x + dx;
        }
        Handle::TopRight => {
            new_w = orig_w + dx;
            new_h = new_w / aspect;
            new_y = orig_y + dy;
        }
        Handle::TopLeft => {
            new_w = orig_w - dx;
            new_h = new_w / aspect;
            new_x = orig_x + dx;
            new_y = orig_y + (orig_h - new_h);
        }
        Handle::Right => new_w = orig_w + dx,
        Handle::Left => {
            new_w = orig_w - dx;
            new_x = orig_x + dx;
        }
        Handle::Bottom => new_h = orig_h + dy,
        Handle::Top => {
            new_h = orig_h - dy;
            new_y = orig_y + dy;
        }
    }

    if new_w > MIN_IMAGE_SIZE_PX / canvas.width && new_h > MIN_IMAGE_SIZE_PX / canvas.height {
        set_image_fields(kind, new_x, new_y, new_w, new_h);
    }
}

/// Stamps resize around their own center, so deltas are doubled and the
/// position never moves. Corner handles keep the aspect ratio.
fn resize_stamp(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dx: f32,
    dy: f32,
    canvas: CanvasSize,
) {
    let (AnnotationKind::Stamp { width, height, .. }, AnnotationKind::Stamp {
        width: orig_w,
        height: orig_h,
        ..
    }) = (kind, original)
    else {
        return;
    };
    if *orig_h == 0.0 {
        return;
    }

    let aspect = orig_w / orig_h;
    let (mut new_w, mut new_h) = (*orig_w, *orig_h);

    match handle {
        Handle::BottomRight | Handle::TopRight => {
            new_w = orig_w + dx * 2.0;
            new_h = new_w / aspect;
        }
        Handle::BottomLeft | Handle::TopLeft => {
            new_w = orig_w - dx * 2.0;
            new_h = new_w / aspect;
        }
        Handle::Right => new_w = orig_w + dx * 2.0,
        Handle::Left => new_w = orig_w - dx * 2.0,
        Handle::Bottom => new_h = orig_h + dy * 2.0,
        Handle::Top => new_h = orig_h - dy * 2.0,
    }

    if new_w > MIN_IMAGE_SIZE_PX / canvas.width && new_h > MIN_IMAGE_SIZE_PX / canvas.height {
        *width = new_w;
        *height = new_h;
    }
}

/// Rectangle/line/arrow handles map directly onto the endpoint coordinates,
/// with no aspect constraint.
fn resize_shape(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dx: f32,
    dy: f32,
) {
    let (AnnotationKind::Shape { start, end, .. }, AnnotationKind::Shape {
        start: orig_start,
        end: orig_end,
        ..
    }) = (kind, original)
    else {
        return;
    };

    let mut new_start = *orig_start;
    let mut new_end = *orig_end;

    match handle {
        Handle::BottomRight => {
            new_end.x = orig_end.x + dx;
            new_end.y = orig_end.y + dy;
        }
        Handle::BottomLeft => {
            new_start.x = orig_start.x + dx;
            new_end.y = orig_end.y + dy;
        }
        Handle::TopRight => {
            new_end.x = orig_end.x + dx;
            new_start.y = orig_start.y + dy;
        }
        Handle::TopLeft => {
            new_start.x = orig_start.x + dx;
            new_start.y = orig_start.y + dy;
        }
        Handle::Right => new_end.x = orig_end.x + dx,
        Handle::Left => new_start.x = orig_start.x + dx,
        Handle::Bottom => new_end.y = orig_end.y + dy,
        Handle::Top => new_start.y = orig_start.y + dy,
    }

    *start = new_start;
    *end = new_end;
}

/// Circles keep their center fixed. Corner handles grow the radius by the
/// same pixel delta on both axes, staying circular; edge handles grow one
/// axis only, turning the circle into an ellipse with explicit radii.
fn resize_circle(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dx: f32,
    dy: f32,
    canvas: CanvasSize,
) {
    let (AnnotationKind::Shape {
        radius_x, radius_y, ..
    }, AnnotationKind::Shape {
        start: orig_start,
        end: orig_end,
        radius_x: orig_rx,
        radius_y: orig_ry,
        ..
    }) = (kind, original)
    else {
        return;
    };

    // Drag-start radii in pixels, from explicit radii or the radius point
    let (orig_rx_px, orig_ry_px) = match (orig_rx, orig_ry) {
        (Some(rx), Some(ry)) => (rx * canvas.width, ry * canvas.height),
        _ => {
            let (x1, y1) = orig_start.to_pixels(canvas);
            let (x2, y2) = orig_end.to_pixels(canvas);
            let r = crate::geometry::distance(x1, y1, x2, y2);
            (r, r)
        }
    };

    let dx_px = dx * canvas.width;
    let dy_px = dy * canvas.height;
    let (mut new_rx_px, mut new_ry_px) = (orig_rx_px, orig_ry_px);

    match handle {
        Handle::BottomRight | Handle::TopRight => {
            new_rx_px = orig_rx_px + dx_px;
            new_ry_px = orig_ry_px + dx_px;
        }
        Handle::BottomLeft | Handle::TopLeft => {
            new_rx_px = orig_rx_px - dx_px;
            new_ry_px = orig_ry_px - dx_px;
        }
        Handle::Right => new_rx_px = orig_rx_px + dx_px,
        Handle::Left => new_rx_px = orig_rx_px - dx_px,
        Handle::Bottom => new_ry_px = orig_ry_px + dy_px,
        Handle::Top => new_ry_px = orig_ry_px - dy_px,
    }

    if new_rx_px > MIN_CIRCLE_RADIUS_PX && new_ry_px > MIN_CIRCLE_RADIUS_PX {
        *radius_x = Some(new_rx_px / canvas.width);
        *radius_y = Some(new_ry_px / canvas.height);
    }
}

/// Derive per-axis scale factors and top/left offsets for a handle drag
/// against a box of the given size. Offsets keep the edge opposite the
/// dragged handle anchored.
fn scale_for_handle(handle: Handle, w: f32, h: f32, dx: f32, dy: f32) -> (f32, f32, f32, f32) {
    let sx = |delta: f32| if w != 0.0 { (w + delta) / w } else { 1.0 };
    let sy = |delta: f32| if h != 0.0 { (h + delta) / h } else { 1.0 };

    match handle {
        Handle::BottomRight => (sx(dx), sy(dy), 0.0, 0.0),
        Handle::BottomLeft => (sx(-dx), sy(dy), dx, 0.0),
        Handle::TopRight => (sx(dx), sy(-dy), 0.0, dy),
        Handle::TopLeft => (sx(-dx), sy(-dy), dx, dy),
        Handle::Right => (sx(dx), 1.0, 0.0, 0.0),
        Handle::Left => (sx(-dx), 1.0, dx, 0.0),
        Handle::Bottom => (1.0, sy(dy), 0.0, 0.0),
        Handle::Top => (1.0, sy(-dy), 0.0, dy),
    }
}

/// Full affine scale of a point path relative to its original bounding box
fn resize_path(
    kind: &mut AnnotationKind,
    original: &AnnotationKind,
    handle: Handle,
    dx: f32,
    dy: f32,
) {
    let (AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. }) = kind
    else {
        return;
    };
    let Some(orig_points) = original.stroke_points() else {
        return;
    };
    if orig_points.is_empty() {
        return;
    }

    let min_x = orig_points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let min_y = orig_points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_x = orig_points
        .iter()
        .map(|p| p.x)
        .fold(f32::NEG_INFINITY, f32::max);
    let max_y = orig_points
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max);

    let (scale_x, scale_y, offset_x, offset_y) =
        scale_for_handle(handle, max_x - min_x, max_y - min_y, dx, dy);

    *points = orig_points
        .iter()
        .map(|p| PagePoint {
            x: min_x + offset_x + (p.x - min_x) * scale_x,
            y: min_y + offset_y + (p.y - min_y) * scale_y,
        })
        .collect();
}

/// One shared scale-and-anchor transform for a whole multi-selection.
///
/// Computed once per move event from the unified box captured at resize
/// start; every selected object is transformed relative to the same anchor,
/// so the group resizes as a rigid composition instead of each object
/// scaling around its own center.
#[derive(Debug, Clone, Copy)]
pub struct GroupResize {
    pub scale_x: f32,
    pub scale_y: f32,
    /// Fixed point of the transform, in canvas pixels
    pub anchor_x: f32,
    pub anchor_y: f32,
}

impl GroupResize {
    /// Build from the unified pixel box captured at resize start, the
    /// dragged handle, and the pixel drag delta. Scale factors are floored
    /// to prevent inversion.
    pub fn from_drag(original_box: &Bounds, handle: Handle, dx_px: f32, dy_px: f32) -> Self {
        let (scale_x, scale_y, _, _) = scale_for_handle(
            handle,
            original_box.width(),
            original_box.height(),
            dx_px,
            dy_px,
        );
        let (anchor_x, anchor_y) = handle.anchor_on(original_box);
        Self {
            scale_x: scale_x.max(MIN_GROUP_SCALE),
            scale_y: scale_y.max(MIN_GROUP_SCALE),
            anchor_x,
            anchor_y,
        }
    }

    fn map_px(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.anchor_x + (x - self.anchor_x) * self.scale_x,
            self.anchor_y + (y - self.anchor_y) * self.scale_y,
        )
    }

    fn map_point(&self, p: &PagePoint, canvas: CanvasSize) -> PagePoint {
        let (px, py) = p.to_pixels(canvas);
        let (mx, my) = self.map_px(px, py);
        PagePoint::from_pixels(mx, my, canvas)
    }

    fn map_xy(&self, x: f32, y: f32, canvas: CanvasSize) -> (f32, f32) {
        let (mx, my) = self.map_px(x * canvas.width, y * canvas.height);
        (mx / canvas.width, my / canvas.height)
    }

    /// Transform one object from its drag-start snapshot.
    ///
    /// Sizes scale per axis; text-like variants take the average of the two
    /// factors for their font size (text remeasures its width).
    pub fn apply(
        &self,
        kind: &mut AnnotationKind,
        original: &AnnotationKind,
        canvas: CanvasSize,
        measurer: &dyn TextMeasurer,
    ) {
        let avg_scale = (self.scale_x + self.scale_y) / 2.0;
        let mut scaled = original.clone();

        match &mut scaled {
            AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
                for p in points.iter_mut() {
                    *p = self.map_point(p, canvas);
                }
            }
            AnnotationKind::Text {
                x,
                y,
                font_size,
                width,
                text,
                ..
            } => {
                let (nx, ny) = self.map_xy(*x, *y, canvas);
                *x = nx;
                *y = ny;
                *font_size *= avg_scale;
                *width = measurer.measure_width(text, *font_size * canvas.height) / canvas.width;
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
            }
            | AnnotationKind::Redaction {
                x,
                y,
                width,
                height,
                ..
            } => {
                let (nx, ny) = self.map_xy(*x, *y, canvas);
                *x = nx;
                *y = ny;
                *width *= self.scale_x;
                *height *= self.scale_y;
            }
            AnnotationKind::Stamp {
                x,
                y,
                width,
                height,
                font_size,
                ..
            } => {
                let (nx, ny) = self.map_xy(*x, *y, canvas);
                *x = nx;
                *y = ny;
                *width *= self.scale_x;
                *height *= self.scale_y;
                *font_size *= avg_scale;
            }
            AnnotationKind::Checkbox { x, y, size, .. } => {
                let (nx, ny) = self.map_xy(*x, *y, canvas);
                *x = nx;
                *y = ny;
                *size *= self.scale_x;
            }
            AnnotationKind::DateStamp {
                x, y, font_size, ..
            }
            | AnnotationKind::Watermark {
                x, y, font_size, ..
            } => {
                let (nx, ny) = self.map_xy(*x, *y, canvas);
                *x = nx;
                *y = ny;
                *font_size *= avg_scale;
            }
            AnnotationKind::Comment { x, y, .. } => {
                let (nx, ny) = self.map_xy(*x, *y, canvas);
                *x = nx;
                *y = ny;
            }
            AnnotationKind::Shape {
                start,
                end,
                radius_x,
                radius_y,
                ..
            } => {
                *start = self.map_point(start, canvas);
                *end = self.map_point(end, canvas);
                if let Some(rx) = radius_x {
                    *rx *= self.scale_x;
                }
                if let Some(ry) = radius_y {
                    *ry *= self.scale_y;
                }
            }
            AnnotationKind::Measurement { geometry, .. } => match geometry {
                MeasureGeometry::Distance { start, end } => {
                    *start = self.map_point(start, canvas);
                    *end = self.map_point(end, canvas);
                }
                MeasureGeometry::Area { points } => {
                    for p in points.iter_mut() {
                        *p = self.map_point(p, canvas);
                    }
                }
            },
        }

        *kind = scaled;
    }
}
