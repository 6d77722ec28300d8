//! Annotation object model
//!
//! Every user-placed markup object is one [`Annotation`]: a stable id plus a
//! closed [`AnnotationKind`] sum type. Bounds, hit-detection, and the
//! transform engine all match exhaustively on the kind, so adding a variant
//! forces every consumer to handle it.
//!
//! Annotations are the interchange contract with export and persistence
//! collaborators; the serde representation keeps the original wire names
//! (`"signature-image"`, `"datestamp"`, camelCase fields).

use crate::geometry::PagePoint;
use crate::measurement::MeasureUnit;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an annotation
pub type AnnotationId = Uuid;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha omitted when opaque)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

/// Geometric primitive drawn by the shape tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
    Arrow,
}

/// Geometry of a measurement annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "measureType", rename_all = "lowercase")]
pub enum MeasureGeometry {
    /// Two-point linear measurement
    Distance { start: PagePoint, end: PagePoint },
    /// Closed polygon area measurement
    Area { points: Vec<PagePoint> },
}

/// The closed set of annotation variants.
///
/// Coordinates and sizes are normalized: positions and widths are fractions
/// of canvas width, heights and font sizes fractions of canvas height,
/// except `Checkbox::size` which is a fraction of canvas width (the box is
/// square in pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnnotationKind {
    /// Freehand ink stroke
    Pen {
        color: Color,
        width: f32,
        points: Vec<PagePoint>,
    },
    /// Translucent wide marker stroke
    Highlight {
        color: Color,
        width: f32,
        points: Vec<PagePoint>,
    },
    /// Single line of text; `(x, y)` is the baseline start
    Text {
        text: String,
        x: f32,
        y: f32,
        color: Color,
        font_size: f32,
        width: f32,
    },
    /// Placed raster image, top-left anchored
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data_url: String,
    },
    /// Captured signature image, top-left anchored
    #[serde(rename = "signature-image")]
    SignatureImage {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data_url: String,
    },
    /// Two-point geometric shape. Circles store the center in `start` and a
    /// radius point in `end`; explicit radii appear once an edge-handle
    /// resize turns the circle into an ellipse.
    Shape {
        kind: ShapeKind,
        color: Color,
        width: f32,
        start: PagePoint,
        end: PagePoint,
        #[serde(skip_serializing_if = "Option::is_none")]
        radius_x: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        radius_y: Option<f32>,
    },
    /// Rubber-stamp text, centered on `(x, y)`
    Stamp {
        stamp_type: String,
        text: String,
        color: Color,
        rotation: f32,
        x: f32,
        y: f32,
        font_size: f32,
        width: f32,
        height: f32,
    },
    /// Form checkbox, square of side `size`
    Checkbox {
        x: f32,
        y: f32,
        size: f32,
        checked: bool,
    },
    /// Formatted date text, baseline-anchored like `Text`
    #[serde(rename = "datestamp")]
    DateStamp {
        x: f32,
        y: f32,
        date: String,
        format: String,
        color: Color,
        font_size: f32,
    },
    /// Fillable text box, top-left anchored
    #[serde(rename = "textfield")]
    TextField {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: String,
        font_size: f32,
        color: Color,
    },
    /// Comment marker with a fixed-size icon
    Comment {
        x: f32,
        y: f32,
        content: String,
        color: Color,
        created_at: u64,
    },
    /// Rotated translucent text centered on `(x, y)`
    Watermark {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
        opacity: f32,
        rotation: f32,
    },
    /// Redaction box, top-left anchored
    Redaction {
        redaction_type: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Distance or area measurement with its computed value
    Measurement {
        color: Color,
        value: f64,
        unit: MeasureUnit,
        geometry: MeasureGeometry,
    },
}

impl AnnotationKind {
    /// Stable lowercase name of the variant, matching the serde tag
    pub fn type_name(&self) -> &'static str {
        match self {
            AnnotationKind::Pen { .. } => "pen",
            AnnotationKind::Highlight { .. } => "highlight",
            AnnotationKind::Text { .. } => "text",
            AnnotationKind::Image { .. } => "image",
            AnnotationKind::SignatureImage { .. } => "signature-image",
            AnnotationKind::Shape { .. } => "shape",
            AnnotationKind::Stamp { .. } => "stamp",
            AnnotationKind::Checkbox { .. } => "checkbox",
            AnnotationKind::DateStamp { .. } => "datestamp",
            AnnotationKind::TextField { .. } => "textfield",
            AnnotationKind::Comment { .. } => "comment",
            AnnotationKind::Watermark { .. } => "watermark",
            AnnotationKind::Redaction { .. } => "redaction",
            AnnotationKind::Measurement { .. } => "measurement",
        }
    }

    /// Stroke path for point-carrying variants
    pub fn stroke_points(&self) -> Option<&[PagePoint]> {
        match self {
            AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
                Some(points)
            }
            _ => None,
        }
    }

    /// Primary color, where the variant has one
    pub fn color(&self) -> Option<Color> {
        match self {
            AnnotationKind::Pen { color, .. }
            | AnnotationKind::Highlight { color, .. }
            | AnnotationKind::Text { color, .. }
            | AnnotationKind::Shape { color, .. }
            | AnnotationKind::Stamp { color, .. }
            | AnnotationKind::DateStamp { color, .. }
            | AnnotationKind::TextField { color, .. }
            | AnnotationKind::Comment { color, .. }
            | AnnotationKind::Watermark { color, .. }
            | AnnotationKind::Measurement { color, .. } => Some(*color),
            AnnotationKind::Image { .. }
            | AnnotationKind::SignatureImage { .. }
            | AnnotationKind::Checkbox { .. }
            | AnnotationKind::Redaction { .. } => None,
        }
    }
}

/// One stored markup object: identity plus geometry/content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    #[serde(flatten)]
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Wrap a kind with a fresh id
    pub fn new(kind: AnnotationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#ff0000").unwrap();
        assert_eq!(color, Color::RED);
        assert_eq!(color.to_hex(), "#ff0000");

        let translucent = Color::from_hex("#00ff0080").unwrap();
        assert_eq!(translucent.a, 128);
        assert_eq!(translucent.to_hex(), "#00ff0080");

        assert!(Color::from_hex("red").is_none());
        assert!(Color::from_hex("#12345").is_none());
    }

    #[test]
    fn test_serde_type_tags() {
        let annotation = Annotation::new(AnnotationKind::SignatureImage {
            x: 0.1,
            y: 0.2,
            width: 0.3,
            height: 0.1,
            data_url: "data:image/png;base64,".to_string(),
        });
        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["type"], "signature-image");
        assert_eq!(json["dataUrl"], "data:image/png;base64,");

        let back: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(back, annotation);
    }

    #[test]
    fn test_serde_measurement_tag() {
        let annotation = Annotation::new(AnnotationKind::Measurement {
            color: Color::BLACK,
            value: 12.5,
            unit: MeasureUnit::Cm,
            geometry: MeasureGeometry::Distance {
                start: PagePoint::new(0.1, 0.1),
                end: PagePoint::new(0.5, 0.1),
            },
        });
        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["type"], "measurement");
        assert_eq!(json["geometry"]["measureType"], "distance");
    }

    #[test]
    fn test_stroke_points_accessor() {
        let pen = AnnotationKind::Pen {
            color: Color::default(),
            width: 2.0,
            points: vec![PagePoint::new(0.0, 0.0), PagePoint::new(0.1, 0.1)],
        };
        assert_eq!(pen.stroke_points().unwrap().len(), 2);

        let checkbox = AnnotationKind::Checkbox {
            x: 0.5,
            y: 0.5,
            size: 0.02,
            checked: false,
        };
        assert!(checkbox.stroke_points().is_none());
    }
}
