//! CSV export for annotations and measurements
//!
//! Flattens a document's annotations into spreadsheet-friendly rows for
//! reporting and external analysis. Geometry is summarised as a compact
//! human-readable string rather than round-trippable JSON; use serde on
//! [`Annotation`] for lossless interchange.

use crate::annotation::{Annotation, AnnotationKind, MeasureGeometry};
use crate::bounds::{bounds_of, TextMeasurer};
use crate::document::Document;
use crate::geometry::CanvasSize;
use crate::measurement::format_value;
use std::io::Write;

/// Error types for CSV export
#[derive(Debug, thiserror::Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CsvExportResult<T> = Result<T, CsvExportError>;

/// Configuration for CSV export
#[derive(Debug, Clone)]
pub struct CsvExportConfig {
    /// Include column headers in the output
    pub include_headers: bool,

    /// CSV delimiter character
    pub delimiter: u8,

    /// Export only items from specific pages (None = all pages)
    pub page_filter: Option<Vec<usize>>,
}

impl Default for CsvExportConfig {
    fn default() -> Self {
        Self {
            include_headers: true,
            delimiter: b',',
            page_filter: None,
        }
    }
}

/// Flatten a document into `(page_index, annotation)` rows for the export
/// functions, in page order then z-order
pub fn document_rows(document: &Document) -> Vec<(usize, &Annotation)> {
    (0..document.page_count())
        .flat_map(|page| {
            document
                .annotations(page)
                .iter()
                .map(move |annotation| (page, annotation))
        })
        .collect()
}

/// Export annotations to CSV format
///
/// CSV columns:
/// - ID: Unique annotation identifier
/// - Page: Page index (0-based)
/// - Type: Annotation type name (pen, text, shape, etc.)
/// - Color: Hex color code (e.g., #FF0000) or empty for colorless types
/// - Geometry: Compact geometry summary in normalized page coordinates
/// - BBox Min X / Min Y / Max X / Max Y: Bounding box in canvas pixels
///   for the given canvas size, empty when the annotation has no extent
pub fn export_annotations_csv<W: Write>(
    writer: W,
    pages: &[(usize, &Annotation)],
    canvas: CanvasSize,
    measurer: &dyn TextMeasurer,
    config: &CsvExportConfig,
) -> CsvExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.include_headers)
        .from_writer(writer);

    if config.include_headers {
        csv_writer.write_record([
            "ID",
            "Page",
            "Type",
            "Color",
            "Geometry",
            "BBox Min X",
            "BBox Min Y",
            "BBox Max X",
            "BBox Max Y",
        ])?;
    }

    for (page_index, annotation) in pages {
        if let Some(ref filter) = config.page_filter {
            if !filter.contains(page_index) {
                continue;
            }
        }

        let bbox = bounds_of(&annotation.kind, canvas, measurer);
        let (min_x, min_y, max_x, max_y) = match bbox {
            Some(b) => (
                b.left.to_string(),
                b.top.to_string(),
                b.right.to_string(),
                b.bottom.to_string(),
            ),
            None => Default::default(),
        };

        csv_writer.write_record(&[
            annotation.id.to_string(),
            page_index.to_string(),
            annotation.kind.type_name().to_string(),
            annotation
                .kind
                .color()
                .map(|c| c.to_hex())
                .unwrap_or_default(),
            format_geometry(&annotation.kind),
            min_x,
            min_y,
            max_x,
            max_y,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export only the measurement annotations, with their computed values
///
/// CSV columns:
/// - ID: Unique measurement identifier
/// - Page: Page index (0-based)
/// - Type: Measurement kind (Distance or Area)
/// - Value: Computed value in the measurement's unit
/// - Unit: Unit label (px, in, ft, cm, mm)
/// - Formatted: Display label with value and unit
/// - Geometry: Compact geometry summary in normalized page coordinates
pub fn export_measurements_csv<W: Write>(
    writer: W,
    pages: &[(usize, &Annotation)],
    config: &CsvExportConfig,
) -> CsvExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.include_headers)
        .from_writer(writer);

    if config.include_headers {
        csv_writer.write_record(["ID", "Page", "Type", "Value", "Unit", "Formatted", "Geometry"])?;
    }

    for (page_index, annotation) in pages {
        if let Some(ref filter) = config.page_filter {
            if !filter.contains(page_index) {
                continue;
            }
        }
        let AnnotationKind::Measurement {
            value,
            unit,
            geometry,
            ..
        } = &annotation.kind
        else {
            continue;
        };

        let (type_name, is_area) = match geometry {
            MeasureGeometry::Distance { .. } => ("Distance", false),
            MeasureGeometry::Area { .. } => ("Area", true),
        };

        csv_writer.write_record(&[
            annotation.id.to_string(),
            page_index.to_string(),
            type_name.to_string(),
            value.to_string(),
            unit.label().to_string(),
            format_value(*value, *unit, is_area),
            format_geometry(&annotation.kind),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Format geometry as a human-readable string
fn format_geometry(kind: &AnnotationKind) -> String {
    match kind {
        AnnotationKind::Pen { points, .. } | AnnotationKind::Highlight { points, .. } => {
            format!("Stroke[{} points]", points.len())
        }
        AnnotationKind::Text { x, y, font_size, .. } => {
            format!("Text[({:.4},{:.4}),fs={:.4}]", x, y, font_size)
        }
        AnnotationKind::Image {
            x, y, width, height, ..
        }
        | AnnotationKind::SignatureImage {
            x, y, width, height, ..
        }
        | AnnotationKind::TextField {
            x, y, width, height, ..
        }
        | AnnotationKind::Redaction {
            x, y, width, height, ..
        } => {
            format!("Box[({:.4},{:.4}),{:.4}x{:.4}]", x, y, width, height)
        }
        AnnotationKind::Shape { start, end, .. } => {
            format!(
                "Shape[({:.4},{:.4})-({:.4},{:.4})]",
                start.x, start.y, end.x, end.y
            )
        }
        AnnotationKind::Stamp {
            x, y, width, height, ..
        } => {
            format!("Stamp[({:.4},{:.4}),{:.4}x{:.4}]", x, y, width, height)
        }
        AnnotationKind::Checkbox { x, y, size, .. } => {
            format!("Checkbox[({:.4},{:.4}),size={:.4}]", x, y, size)
        }
        AnnotationKind::DateStamp { x, y, .. } => format!("DateStamp[({:.4},{:.4})]", x, y),
        AnnotationKind::Comment { x, y, .. } => format!("Comment[({:.4},{:.4})]", x, y),
        AnnotationKind::Watermark { x, y, rotation, .. } => {
            format!("Watermark[({:.4},{:.4}),rot={:.1}]", x, y, rotation)
        }
        AnnotationKind::Measurement { geometry, .. } => match geometry {
            MeasureGeometry::Distance { start, end } => {
                format!(
                    "Distance[({:.4},{:.4})-({:.4},{:.4})]",
                    start.x, start.y, end.x, end.y
                )
            }
            MeasureGeometry::Area { points } => format!("Area[{} points]", points.len()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Color, ShapeKind};
    use crate::bounds::HeuristicTextMeasurer;
    use crate::geometry::PagePoint;
    use crate::measurement::MeasureUnit;

    const CANVAS: CanvasSize = CanvasSize {
        width: 1000.0,
        height: 1000.0,
    };

    fn line_shape() -> Annotation {
        Annotation::new(AnnotationKind::Shape {
            kind: ShapeKind::Line,
            color: Color::RED,
            width: 2.0,
            start: PagePoint::new(0.1, 0.1),
            end: PagePoint::new(0.5, 0.5),
            radius_x: None,
            radius_y: None,
        })
    }

    fn distance_measurement() -> Annotation {
        Annotation::new(AnnotationKind::Measurement {
            color: Color::BLACK,
            value: 2.5,
            unit: MeasureUnit::Cm,
            geometry: MeasureGeometry::Distance {
                start: PagePoint::new(0.1, 0.1),
                end: PagePoint::new(0.3, 0.1),
            },
        })
    }

    #[test]
    fn test_export_annotations_csv() {
        let measurer = HeuristicTextMeasurer::default();
        let shape = line_shape();
        let stroke = Annotation::new(AnnotationKind::Pen {
            color: Color::BLACK,
            width: 2.0,
            points: vec![PagePoint::new(0.2, 0.2), PagePoint::new(0.3, 0.3)],
        });

        let rows = vec![(0, &shape), (1, &stroke)];
        let mut output = Vec::new();
        export_annotations_csv(
            &mut output,
            &rows,
            CANVAS,
            &measurer,
            &CsvExportConfig::default(),
        )
        .unwrap();

        let csv_content = String::from_utf8(output).unwrap();
        assert!(csv_content.contains("ID,Page,Type"));
        assert!(csv_content.contains("shape"));
        assert!(csv_content.contains("pen"));
        assert!(csv_content.contains("#ff0000"));
        assert!(csv_content.contains("Stroke[2 points]"));
        assert_eq!(csv_content.lines().count(), 3);
    }

    #[test]
    fn test_export_measurements_csv_skips_other_types() {
        let shape = line_shape();
        let measurement = distance_measurement();
        let rows = vec![(0, &shape), (0, &measurement)];

        let mut output = Vec::new();
        export_measurements_csv(&mut output, &rows, &CsvExportConfig::default()).unwrap();

        let csv_content = String::from_utf8(output).unwrap();
        assert_eq!(csv_content.lines().count(), 2);
        assert!(csv_content.contains("Distance"));
        assert!(csv_content.contains("2.50 cm"));
    }

    #[test]
    fn test_csv_with_page_filter() {
        let measurer = HeuristicTextMeasurer::default();
        let a = line_shape();
        let b = line_shape();
        let rows = vec![(0, &a), (1, &b)];

        let mut output = Vec::new();
        let config = CsvExportConfig {
            page_filter: Some(vec![0]),
            ..Default::default()
        };
        export_annotations_csv(&mut output, &rows, CANVAS, &measurer, &config).unwrap();

        let csv_content = String::from_utf8(output).unwrap();
        assert_eq!(csv_content.lines().count(), 2);
    }

    #[test]
    fn test_document_rows_cover_all_pages() {
        let mut document = Document::with_pages(3);
        document.add_annotation(0, line_shape());
        document.add_annotation(2, distance_measurement());
        document.add_annotation(2, line_shape());

        let rows = document_rows(&document);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, 0);
        assert_eq!(rows[1].0, 2);
        assert_eq!(rows[2].0, 2);
    }

    #[test]
    fn test_csv_without_headers_and_custom_delimiter() {
        let measurer = HeuristicTextMeasurer::default();
        let a = line_shape();
        let rows = vec![(0, &a)];

        let mut output = Vec::new();
        let config = CsvExportConfig {
            include_headers: false,
            delimiter: b';',
            ..Default::default()
        };
        export_annotations_csv(&mut output, &rows, CANVAS, &measurer, &config).unwrap();

        let csv_content = String::from_utf8(output).unwrap();
        assert_eq!(csv_content.lines().count(), 1);
        assert!(csv_content.contains(';'));
        assert!(!csv_content.contains("ID"));
    }
}
