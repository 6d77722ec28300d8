//! Markup Editor Core Library
//!
//! Annotation data model and interactive manipulation engine for the
//! markup editor. Geometry is stored in normalized page coordinates;
//! rendering and input embed through [`EditorSession`] and the pure
//! geometry helpers.

pub mod annotation;
pub mod bounds;
pub mod csv_export;
pub mod document;
pub mod eraser;
pub mod geometry;
pub mod history;
pub mod hit_detection;
pub mod manipulation;
pub mod measurement;
pub mod selection;
pub mod session;

pub use annotation::{
    Annotation, AnnotationId, AnnotationKind, Color, MeasureGeometry, ShapeKind,
};
pub use bounds::{
    bounds_of, handle_at, multi_bounds_of, selection_bounds_of, Handle, HeuristicTextMeasurer,
    TextMeasurer,
};
pub use csv_export::{
    document_rows, export_annotations_csv, export_measurements_csv, CsvExportConfig,
    CsvExportError, CsvExportResult,
};
pub use document::{Document, Page};
pub use eraser::{erase_at, DEFAULT_ERASER_RADIUS};
pub use geometry::{Bounds, CanvasSize, PagePoint};
pub use history::HistoryRecord;
pub use hit_detection::{hit_test, hit_test_all, hit_test_any};
pub use manipulation::{move_annotation, resize_annotation, DragSnapshot, GroupResize};
pub use measurement::{
    area_value, distance_value, format_value, MeasureUnit, ScaleCalibration,
};
pub use selection::{Gesture, Selection};
pub use session::{EditorSession, Tool};
