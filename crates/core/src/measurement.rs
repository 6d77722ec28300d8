//! Measurement units and scale calibration
//!
//! Measurement annotations carry a real-world value computed from pixel
//! geometry: pixel length divided by the calibration (pixels per drawing
//! unit), converted through a fixed per-pixel unit table at 96 dpi. Areas
//! scale with the square of both factors.

use crate::geometry::{CanvasSize, PagePoint};
use serde::{Deserialize, Serialize};

/// Real-world unit for measurement values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    Px,
    In,
    Ft,
    Cm,
    Mm,
}

impl MeasureUnit {
    /// Units per screen pixel at the 96 dpi reference resolution
    pub fn per_pixel_factor(&self) -> f64 {
        match self {
            MeasureUnit::Px => 1.0,
            MeasureUnit::In => 1.0 / 96.0,
            MeasureUnit::Ft => 1.0 / (96.0 * 12.0),
            MeasureUnit::Cm => 2.54 / 96.0,
            MeasureUnit::Mm => 25.4 / 96.0,
        }
    }

    /// Display suffix
    pub fn label(&self) -> &'static str {
        match self {
            MeasureUnit::Px => "px",
            MeasureUnit::In => "in",
            MeasureUnit::Ft => "ft",
            MeasureUnit::Cm => "cm",
            MeasureUnit::Mm => "mm",
        }
    }

    /// Parse a unit label; `None` for anything unrecognized
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "px" => Some(MeasureUnit::Px),
            "in" => Some(MeasureUnit::In),
            "ft" => Some(MeasureUnit::Ft),
            "cm" => Some(MeasureUnit::Cm),
            "mm" => Some(MeasureUnit::Mm),
            _ => None,
        }
    }
}

impl Default for MeasureUnit {
    fn default() -> Self {
        MeasureUnit::Px
    }
}

/// User calibration: how many canvas pixels one drawing unit covers.
///
/// Set from a known reference length on the page (e.g. a scale bar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleCalibration {
    pixels_per_unit: f64,
}

impl ScaleCalibration {
    /// Non-positive ratios are rejected in favor of the identity scale
    pub fn new(pixels_per_unit: f64) -> Self {
        if pixels_per_unit > 0.0 {
            Self { pixels_per_unit }
        } else {
            Self::default()
        }
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }
}

impl Default for ScaleCalibration {
    fn default() -> Self {
        Self {
            pixels_per_unit: 1.0,
        }
    }
}

/// Real-world distance between two normalized points
pub fn distance_value(
    start: &PagePoint,
    end: &PagePoint,
    canvas: CanvasSize,
    scale: ScaleCalibration,
    unit: MeasureUnit,
) -> f64 {
    let (x1, y1) = start.to_pixels(canvas);
    let (x2, y2) = end.to_pixels(canvas);
    let pixel_distance = crate::geometry::distance(x1, y1, x2, y2) as f64;
    pixel_distance / scale.pixels_per_unit * unit.per_pixel_factor()
}

/// Real-world area of a closed polygon of normalized points.
///
/// Shoelace formula over the pixel-space vertices; fewer than three
/// vertices yields zero.
pub fn area_value(
    points: &[PagePoint],
    canvas: CanvasSize,
    scale: ScaleCalibration,
    unit: MeasureUnit,
) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0f64;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        let (xi, yi) = points[i].to_pixels(canvas);
        let (xj, yj) = points[j].to_pixels(canvas);
        area += xi as f64 * yj as f64;
        area -= xj as f64 * yi as f64;
    }
    let pixel_area = (area / 2.0).abs();

    let linear = unit.per_pixel_factor() / scale.pixels_per_unit;
    pixel_area * linear * linear
}

/// Label text for a computed value, e.g. `12.50 cm` or `4.00 cm²`
pub fn format_value(value: f64, unit: MeasureUnit, is_area: bool) -> String {
    if is_area {
        format!("{:.2} {}²", value, unit.label())
    } else {
        format!("{:.2} {}", value, unit.label())
    }
}
