//! Editor session: tool state, selection, and pointer gestures
//!
//! One [`EditorSession`] holds everything a gesture needs: the document,
//! the active tool, the selection, and the in-flight gesture state. All
//! mutation happens synchronously inside the pointer handlers; each handler
//! returns whether the page needs a repaint, and the embedder owns the
//! redraw loop.
//!
//! Creation tools (text prompts, image pickers, signature capture and the
//! rest) live outside the core: they author a fully-formed annotation and
//! hand it to [`EditorSession::add_annotation`]. The session routes only
//! the gestures with engine semantics: select, eraser, and delete.
//!
//! Handlers are permissive: pointer events against missing pages, unknown
//! ids, or a gesture that never started are ignored, never an error.

use crate::annotation::{Annotation, AnnotationId, AnnotationKind, Color, MeasureGeometry};
use crate::bounds::{
    handle_at, multi_bounds_of, selection_bounds_of, HeuristicTextMeasurer, TextMeasurer,
    MULTI_SELECTION_PADDING, SINGLE_SELECTION_PADDING,
};
use crate::document::Document;
use crate::eraser::{self, DEFAULT_ERASER_RADIUS};
use crate::geometry::{Bounds, CanvasSize};
use crate::hit_detection::{hit_test_any, STROKE_HIT_RADIUS_LOOSE, STROKE_HIT_RADIUS_TIGHT};
use crate::manipulation::{move_annotation, resize_annotation, DragSnapshot, GroupResize};
use crate::measurement::{area_value, distance_value, ScaleCalibration};
use crate::selection::{Gesture, Selection};
use log::debug;

/// Pointer tools routed by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand drawing; strokes are authored externally
    Pen,
    /// Selection, move, and resize gestures
    Select,
    /// Brush eraser
    Eraser,
    /// Click-to-delete
    Delete,
}

/// Process-wide editor state, passed by reference into every handler
pub struct EditorSession {
    pub document: Document,
    tool: Tool,
    stroke_color: Color,
    stroke_width: f32,
    eraser_radius: f32,
    scale_calibration: ScaleCalibration,
    selection: Selection,
    gesture: Gesture,
    measurer: Box<dyn TextMeasurer>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            tool: Tool::Pen,
            stroke_color: Color::RED,
            stroke_width: 2.0,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            scale_calibration: ScaleCalibration::default(),
            selection: Selection::None,
            gesture: Gesture::Idle,
            measurer: Box::new(HeuristicTextMeasurer::default()),
        }
    }

    /// Substitute a real text measurement backend
    pub fn with_measurer(measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            measurer,
            ..Self::new()
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switching tools abandons any in-flight gesture
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    pub fn eraser_radius(&self) -> f32 {
        self.eraser_radius
    }

    pub fn set_eraser_radius(&mut self, radius: f32) {
        if radius > 0.0 {
            self.eraser_radius = radius;
        }
    }

    pub fn scale_calibration(&self) -> ScaleCalibration {
        self.scale_calibration
    }

    pub fn set_scale_calibration(&mut self, calibration: ScaleCalibration) {
        self.scale_calibration = calibration;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// The rubber-band rectangle while a drag-box is in progress, for the
    /// renderer
    pub fn drag_box(&self) -> Option<Bounds> {
        match &self.gesture {
            Gesture::DragBox {
                origin_x,
                origin_y,
                current_x,
                current_y,
            } => Some(Bounds::new(
                origin_x.min(*current_x),
                origin_y.min(*current_y),
                origin_x.max(*current_x),
                origin_y.max(*current_y),
            )),
            _ => None,
        }
    }

    /// Store a tool-authored annotation, recording it for undo
    pub fn add_annotation(&mut self, page_index: usize, kind: AnnotationKind) -> AnnotationId {
        let annotation = Annotation::new(kind);
        let id = annotation.id;
        self.document.add_annotation(page_index, annotation);
        id
    }

    /// Delete everything selected. Returns true when anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(page_index) = self.selection.page() else {
            return false;
        };
        let ids = self.selection.ids();
        let Some(page) = self.document.page_mut(page_index) else {
            self.selection = Selection::None;
            return false;
        };
        let mut deleted = false;
        for id in ids {
            deleted |= page.delete_annotation(id);
        }
        self.selection = Selection::None;
        deleted
    }

    /// Undo on a page. The selection is dropped because the object it
    /// points at may no longer exist.
    pub fn undo(&mut self, page_index: usize) -> bool {
        self.selection = Selection::None;
        self.document.undo(page_index)
    }

    pub fn redo(&mut self, page_index: usize) -> bool {
        self.selection = Selection::None;
        self.document.redo(page_index)
    }

    /// Pointer-down entry point. `x`/`y` in canvas pixels.
    pub fn pointer_down(
        &mut self,
        page_index: usize,
        x: f32,
        y: f32,
        canvas: CanvasSize,
    ) -> bool {
        match self.tool {
            Tool::Select => self.select_down(page_index, x, y, canvas),
            Tool::Eraser => {
                let radius = self.eraser_radius;
                self.gesture = Gesture::Erasing { radius };
                self.erase(page_index, x, y, radius, canvas)
            }
            Tool::Delete => self.delete_down(page_index, x, y, canvas),
            Tool::Pen => false,
        }
    }

    /// Pointer-move entry point; drives the in-flight gesture
    pub fn pointer_move(
        &mut self,
        page_index: usize,
        x: f32,
        y: f32,
        canvas: CanvasSize,
    ) -> bool {
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Erasing { radius } => {
                let radius = *radius;
                self.erase(page_index, x, y, radius, canvas)
            }
            Gesture::DragBox {
                current_x,
                current_y,
                ..
            } => {
                *current_x = x;
                *current_y = y;
                true
            }
            Gesture::MovingSingle {
                start_x,
                start_y,
                snapshot,
            }
            | Gesture::MovingMultiple {
                start_x,
                start_y,
                snapshot,
            } => {
                let dx = (x - *start_x) / canvas.width;
                let dy = (y - *start_y) / canvas.height;
                let snapshot = std::mem::take(snapshot);
                let moved = self.apply_move(page_index, &snapshot, dx, dy);
                self.restore_snapshot(snapshot);
                moved
            }
            Gesture::ResizingSingle {
                handle,
                start_x,
                start_y,
                snapshot,
            } => {
                let handle = *handle;
                let dx = (x - *start_x) / canvas.width;
                let dy = (y - *start_y) / canvas.height;
                let snapshot = std::mem::take(snapshot);
                let resized = self.apply_resize(page_index, &snapshot, handle, dx, dy, canvas);
                self.restore_snapshot(snapshot);
                resized
            }
            Gesture::ResizingMultiple {
                handle,
                start_x,
                start_y,
                original_box,
                snapshot,
            } => {
                let resize =
                    GroupResize::from_drag(original_box, *handle, x - *start_x, y - *start_y);
                let snapshot = std::mem::take(snapshot);
                let resized = self.apply_group_resize(page_index, &snapshot, resize, canvas);
                self.restore_snapshot(snapshot);
                resized
            }
        }
    }

    /// Pointer-up entry point; completes drag-box selection and discards
    /// transient snapshots
    pub fn pointer_up(&mut self, page_index: usize, canvas: CanvasSize) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Erasing { .. } => false,
            Gesture::DragBox {
                origin_x,
                origin_y,
                current_x,
                current_y,
            } => {
                let selection_box = Bounds::new(
                    origin_x.min(current_x),
                    origin_y.min(current_y),
                    origin_x.max(current_x),
                    origin_y.max(current_y),
                );
                let ids: Vec<AnnotationId> = self
                    .document
                    .annotations(page_index)
                    .iter()
                    .filter(|a| {
                        crate::bounds::intersects_selection_box(
                            &a.kind,
                            canvas,
                            self.measurer.as_ref(),
                            &selection_box,
                        )
                    })
                    .map(|a| a.id)
                    .collect();
                debug!("drag box selected {} annotations", ids.len());
                self.selection = Selection::from_ids(page_index, ids);
                true
            }
            Gesture::MovingSingle { .. }
            | Gesture::MovingMultiple { .. }
            | Gesture::ResizingSingle { .. }
            | Gesture::ResizingMultiple { .. } => false,
        }
    }

    fn erase(
        &mut self,
        page_index: usize,
        x: f32,
        y: f32,
        radius: f32,
        canvas: CanvasSize,
    ) -> bool {
        let Some(page) = self.document.page_mut(page_index) else {
            return false;
        };
        eraser::erase_at(page, x, y, radius, canvas, self.measurer.as_ref())
    }

    fn delete_down(&mut self, page_index: usize, x: f32, y: f32, canvas: CanvasSize) -> bool {
        let hit_id = hit_test_any(
            self.document.annotations(page_index),
            x,
            y,
            canvas,
            self.measurer.as_ref(),
            STROKE_HIT_RADIUS_TIGHT,
        )
        .map(|a| a.id);

        let Some(id) = hit_id else {
            return false;
        };
        if self.selection.contains(id) {
            self.selection = Selection::None;
        }
        self.document
            .page_mut(page_index)
            .is_some_and(|p| p.delete_annotation(id))
    }

    /// The selection state machine's pointer-down transitions
    fn select_down(&mut self, page_index: usize, x: f32, y: f32, canvas: CanvasSize) -> bool {
        // Selection never spans pages; touching another page drops it
        let mut needs_redraw = false;
        if let Some(selected_page) = self.selection.page() {
            if selected_page != page_index {
                self.selection = Selection::None;
                needs_redraw = true;
            }
        }

        match self.selection.clone() {
            Selection::Multi { ids, .. } => {
                // Handle on the unified box wins, then a grab anywhere
                // inside the box, then object hits
                if let Some(union) = self.selection_union_box(page_index, &ids, canvas) {
                    let padded = union.expanded(MULTI_SELECTION_PADDING);
                    if let Some(handle) = handle_at(&padded, x, y) {
                        self.gesture = Gesture::ResizingMultiple {
                            handle,
                            start_x: x,
                            start_y: y,
                            original_box: union,
                            snapshot: self.capture_snapshot(page_index, &ids),
                        };
                        return true;
                    }
                    if padded.contains(x, y) {
                        self.gesture = Gesture::MovingMultiple {
                            start_x: x,
                            start_y: y,
                            snapshot: self.capture_snapshot(page_index, &ids),
                        };
                        return true;
                    }
                }
                self.select_hit_or_drag_box(page_index, x, y, canvas)
            }
            Selection::Single { id, .. } => {
                if let Some(annotation) = self
                    .document
                    .page(page_index)
                    .and_then(|p| p.annotation(id))
                {
                    let bounds = selection_bounds_of(
                        &annotation.kind,
                        canvas,
                        self.measurer.as_ref(),
                        SINGLE_SELECTION_PADDING,
                    );
                    if let Some(bounds) = bounds {
                        if let Some(handle) = handle_at(&bounds, x, y) {
                            self.gesture = Gesture::ResizingSingle {
                                handle,
                                start_x: x,
                                start_y: y,
                                snapshot: self.capture_snapshot(page_index, &[id]),
                            };
                            return true;
                        }
                    }
                }

                let hit_id = self.hit_id(page_index, x, y, canvas);
                match hit_id {
                    Some(hit) if hit == id => {
                        self.gesture = Gesture::MovingSingle {
                            start_x: x,
                            start_y: y,
                            snapshot: self.capture_snapshot(page_index, &[id]),
                        };
                        true
                    }
                    Some(hit) => {
                        self.selection = Selection::Single {
                            page: page_index,
                            id: hit,
                        };
                        true
                    }
                    None => {
                        self.selection = Selection::None;
                        self.gesture = Gesture::DragBox {
                            origin_x: x,
                            origin_y: y,
                            current_x: x,
                            current_y: y,
                        };
                        true
                    }
                }
            }
            Selection::None => self.select_hit_or_drag_box(page_index, x, y, canvas) || needs_redraw,
        }
    }

    /// Shared tail of the pointer-down transitions: select whatever is
    /// under the pointer, or start a drag box on empty space
    fn select_hit_or_drag_box(
        &mut self,
        page_index: usize,
        x: f32,
        y: f32,
        canvas: CanvasSize,
    ) -> bool {
        match self.hit_id(page_index, x, y, canvas) {
            Some(id) => {
                self.selection = Selection::Single {
                    page: page_index,
                    id,
                };
                true
            }
            None => {
                self.selection = Selection::None;
                self.gesture = Gesture::DragBox {
                    origin_x: x,
                    origin_y: y,
                    current_x: x,
                    current_y: y,
                };
                true
            }
        }
    }

    fn hit_id(
        &self,
        page_index: usize,
        x: f32,
        y: f32,
        canvas: CanvasSize,
    ) -> Option<AnnotationId> {
        hit_test_any(
            self.document.annotations(page_index),
            x,
            y,
            canvas,
            self.measurer.as_ref(),
            STROKE_HIT_RADIUS_LOOSE,
        )
        .map(|a| a.id)
    }

    fn selection_union_box(
        &self,
        page_index: usize,
        ids: &[AnnotationId],
        canvas: CanvasSize,
    ) -> Option<Bounds> {
        let page = self.document.page(page_index)?;
        let kinds: Vec<&AnnotationKind> = ids
            .iter()
            .filter_map(|id| page.annotation(*id).map(|a| &a.kind))
            .collect();
        multi_bounds_of(kinds.into_iter(), canvas, self.measurer.as_ref())
    }

    fn capture_snapshot(&self, page_index: usize, ids: &[AnnotationId]) -> DragSnapshot {
        let mut snapshot = DragSnapshot::new();
        if let Some(page) = self.document.page(page_index) {
            for id in ids {
                if let Some(annotation) = page.annotation(*id) {
                    snapshot.insert(*id, annotation.kind.clone());
                }
            }
        }
        snapshot
    }

    // The gesture briefly lends its snapshot out so `self` can be borrowed
    // mutably; these helpers hand it back afterwards.
    fn restore_snapshot(&mut self, snapshot: DragSnapshot) {
        match &mut self.gesture {
            Gesture::MovingSingle { snapshot: slot, .. }
            | Gesture::MovingMultiple { snapshot: slot, .. }
            | Gesture::ResizingSingle { snapshot: slot, .. }
            | Gesture::ResizingMultiple { snapshot: slot, .. } => *slot = snapshot,
            _ => {}
        }
    }

    fn apply_move(
        &mut self,
        page_index: usize,
        snapshot: &DragSnapshot,
        dx: f32,
        dy: f32,
    ) -> bool {
        let Some(page) = self.document.page_mut(page_index) else {
            return false;
        };
        let mut moved = false;
        for (id, original) in snapshot {
            if let Some(annotation) = page.annotation_mut(*id) {
                move_annotation(&mut annotation.kind, original, dx, dy);
                moved = true;
            }
        }
        moved
    }

    fn apply_resize(
        &mut self,
        page_index: usize,
        snapshot: &DragSnapshot,
        handle: crate::bounds::Handle,
        dx: f32,
        dy: f32,
        canvas: CanvasSize,
    ) -> bool {
        let Some(page) = self.document.page_mut(page_index) else {
            return false;
        };
        let mut resized = false;
        for (id, original) in snapshot {
            if let Some(annotation) = page.annotation_mut(*id) {
                resize_annotation(
                    &mut annotation.kind,
                    original,
                    handle,
                    dx,
                    dy,
                    canvas,
                    self.measurer.as_ref(),
                );
                resized = true;
            }
        }
        resized
    }

    fn apply_group_resize(
        &mut self,
        page_index: usize,
        snapshot: &DragSnapshot,
        resize: GroupResize,
        canvas: CanvasSize,
    ) -> bool {
        let scale = self.scale_calibration;
        let Some(page) = self.document.page_mut(page_index) else {
            return false;
        };
        let mut resized = false;
        for (id, original) in snapshot {
            let Some(annotation) = page.annotation_mut(*id) else {
                continue;
            };
            resize.apply(&mut annotation.kind, original, canvas, self.measurer.as_ref());
            // Scaled measurement geometry invalidates the stored value
            if let AnnotationKind::Measurement {
                value,
                unit,
                geometry,
                ..
            } = &mut annotation.kind
            {
                *value = match geometry {
                    MeasureGeometry::Distance { start, end } => {
                        distance_value(start, end, canvas, scale, *unit)
                    }
                    MeasureGeometry::Area { points } => {
                        area_value(points, canvas, scale, *unit)
                    }
                };
            }
            resized = true;
        }
        resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::ShapeKind;
    use crate::geometry::PagePoint;

    const CANVAS: CanvasSize = CanvasSize {
        width: 1000.0,
        height: 1000.0,
    };

    fn image_kind(x: f32, y: f32, w: f32, h: f32) -> AnnotationKind {
        AnnotationKind::Image {
            x,
            y,
            width: w,
            height: h,
            data_url: String::new(),
        }
    }

    fn session_with_image() -> (EditorSession, AnnotationId) {
        let mut session = EditorSession::new();
        let id = session.add_annotation(0, image_kind(0.1, 0.1, 0.2, 0.2));
        session.set_tool(Tool::Select);
        (session, id)
    }

    #[test]
    fn test_click_selects_object() {
        let (mut session, id) = session_with_image();
        assert!(session.pointer_down(0, 200.0, 200.0, CANVAS));
        assert_eq!(
            *session.selection(),
            Selection::Single { page: 0, id }
        );
    }

    #[test]
    fn test_click_empty_starts_drag_box_and_selects_by_intersection() {
        let (mut session, id) = session_with_image();
        let other = session.add_annotation(0, image_kind(0.5, 0.5, 0.1, 0.1));

        assert!(session.pointer_down(0, 800.0, 900.0, CANVAS));
        assert!(session.selection().is_none());
        assert!(session.drag_box().is_some());

        // Sweep back over both images; partial overlap is enough
        session.pointer_move(0, 150.0, 150.0, CANVAS);
        assert!(session.pointer_up(0, CANVAS));

        let selection = session.selection();
        assert!(selection.contains(id));
        assert!(selection.contains(other));
        assert!(matches!(selection, Selection::Multi { .. }));
    }

    #[test]
    fn test_drag_box_single_result_collapses_to_single() {
        let (mut session, id) = session_with_image();
        session.pointer_down(0, 800.0, 900.0, CANVAS);
        session.pointer_move(0, 250.0, 250.0, CANVAS);
        session.pointer_up(0, CANVAS);
        assert_eq!(*session.selection(), Selection::Single { page: 0, id });
    }

    #[test]
    fn test_move_deltas_do_not_compound() {
        let (mut session, id) = session_with_image();
        session.pointer_down(0, 200.0, 200.0, CANVAS); // select
        session.pointer_up(0, CANVAS);
        session.pointer_down(0, 200.0, 200.0, CANVAS); // start moving
        session.pointer_move(0, 300.0, 200.0, CANVAS);
        session.pointer_move(0, 250.0, 200.0, CANVAS); // partial retreat
        session.pointer_up(0, CANVAS);

        let annotation = session.document.page(0).unwrap().annotation(id).unwrap();
        let AnnotationKind::Image { x, y, .. } = annotation.kind else {
            panic!("variant changed");
        };
        // Final position reflects only the net drag from the start point
        assert!((x - 0.15).abs() < 1e-6);
        assert!((y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_handle_drag_resizes_single() {
        let (mut session, id) = session_with_image();
        session.pointer_down(0, 200.0, 200.0, CANVAS);
        session.pointer_up(0, CANVAS);

        // Bottom-right handle of the padded selection box sits at (305, 305)
        session.pointer_down(0, 305.0, 305.0, CANVAS);
        assert!(matches!(
            session.selection(),
            Selection::Single { .. }
        ));
        session.pointer_move(0, 505.0, 305.0, CANVAS);
        session.pointer_up(0, CANVAS);

        let annotation = session.document.page(0).unwrap().annotation(id).unwrap();
        let AnnotationKind::Image { width, height, .. } = annotation.kind else {
            panic!("variant changed");
        };
        assert!((width - 0.4).abs() < 1e-6);
        assert!((height - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_multi_selection_group_move() {
        let (mut session, a) = session_with_image();
        let b = session.add_annotation(0, image_kind(0.5, 0.1, 0.1, 0.1));

        // Drag-box both, then grab inside the union box and move
        session.pointer_down(0, 900.0, 900.0, CANVAS);
        session.pointer_move(0, 50.0, 50.0, CANVAS);
        session.pointer_up(0, CANVAS);
        assert!(matches!(session.selection(), Selection::Multi { .. }));

        session.pointer_down(0, 350.0, 200.0, CANVAS);
        session.pointer_move(0, 350.0, 300.0, CANVAS);
        session.pointer_up(0, CANVAS);

        let page = session.document.page(0).unwrap();
        let AnnotationKind::Image { y: ya, .. } = page.annotation(a).unwrap().kind else {
            panic!("variant changed");
        };
        let AnnotationKind::Image { y: yb, .. } = page.annotation(b).unwrap().kind else {
            panic!("variant changed");
        };
        assert!((ya - 0.2).abs() < 1e-6);
        assert!((yb - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_selecting_other_page_clears_selection() {
        let (mut session, _) = session_with_image();
        session.pointer_down(0, 200.0, 200.0, CANVAS);
        session.pointer_up(0, CANVAS);
        assert!(!session.selection().is_none());

        session.document.add_annotation(
            1,
            Annotation::new(image_kind(0.1, 0.1, 0.2, 0.2)),
        );
        session.pointer_down(1, 200.0, 200.0, CANVAS);
        assert_eq!(session.selection().page(), Some(1));
    }

    #[test]
    fn test_eraser_tool_routes_to_splitter() {
        let mut session = EditorSession::new();
        session.add_annotation(
            0,
            AnnotationKind::Pen {
                color: Color::RED,
                width: 2.0,
                points: vec![
                    PagePoint::new(0.1, 0.5),
                    PagePoint::new(0.2, 0.5),
                    PagePoint::new(0.3, 0.5),
                ],
            },
        );
        session.set_tool(Tool::Eraser);
        assert!(session.pointer_down(0, 200.0, 500.0, CANVAS));
        assert!(session.pointer_up(0, CANVAS) == false);
        assert_eq!(session.document.annotations(0).len(), 2);
    }

    #[test]
    fn test_delete_tool_removes_topmost() {
        let (mut session, id) = session_with_image();
        session.set_tool(Tool::Delete);
        assert!(session.pointer_down(0, 200.0, 200.0, CANVAS));
        assert!(session.document.annotations(0).is_empty());
        assert!(!session.selection().contains(id));

        // Clicking empty space deletes nothing
        assert!(!session.pointer_down(0, 800.0, 800.0, CANVAS));
    }

    #[test]
    fn test_delete_selected_and_undo() {
        let (mut session, id) = session_with_image();
        session.pointer_down(0, 200.0, 200.0, CANVAS);
        session.pointer_up(0, CANVAS);

        assert!(session.delete_selected());
        assert!(session.selection().is_none());
        assert!(session.document.annotations(0).is_empty());

        assert!(session.undo(0));
        assert_eq!(session.document.annotations(0)[0].id, id);
    }

    #[test]
    fn test_group_resize_through_session() {
        let mut session = EditorSession::new();
        let a = session.add_annotation(0, image_kind(0.1, 0.1, 0.1, 0.1));
        let b = session.add_annotation(0, image_kind(0.3, 0.1, 0.1, 0.1));
        session.set_tool(Tool::Select);

        session.pointer_down(0, 900.0, 900.0, CANVAS);
        session.pointer_move(0, 50.0, 50.0, CANVAS);
        session.pointer_up(0, CANVAS);
        assert!(matches!(session.selection(), Selection::Multi { .. }));

        // Union box is (100,100)-(400,200); padded handle br at (410, 210)
        session.pointer_down(0, 410.0, 210.0, CANVAS);
        assert!(matches!(
            session.selection(),
            Selection::Multi { .. }
        ));
        // Drag right by 300 px: scale_x = 2 from the shared left anchor
        session.pointer_move(0, 710.0, 210.0, CANVAS);
        session.pointer_up(0, CANVAS);

        let page = session.document.page(0).unwrap();
        let AnnotationKind::Image { x: xa, .. } = page.annotation(a).unwrap().kind else {
            panic!("variant changed");
        };
        let AnnotationKind::Image { x: xb, .. } = page.annotation(b).unwrap().kind else {
            panic!("variant changed");
        };
        assert!((xa - 0.1).abs() < 1e-6);
        assert!((xb - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_events_without_gesture_are_noops() {
        let mut session = EditorSession::new();
        session.set_tool(Tool::Select);
        assert!(!session.pointer_move(0, 100.0, 100.0, CANVAS));
        assert!(!session.pointer_up(0, CANVAS));
        // Missing page: empty space, so a drag box starts
        assert!(session.pointer_down(5, 100.0, 100.0, CANVAS));
    }

    #[test]
    fn test_circle_shape_selectable_with_margin() {
        let mut session = EditorSession::new();
        let id = session.add_annotation(
            0,
            AnnotationKind::Shape {
                kind: ShapeKind::Circle,
                color: Color::RED,
                width: 2.0,
                start: PagePoint::new(0.5, 0.5),
                end: PagePoint::new(0.55, 0.5),
                radius_x: None,
                radius_y: None,
            },
        );
        session.set_tool(Tool::Select);
        // 30 px outside the radius box, inside the 35 px hit margin
        assert!(session.pointer_down(0, 580.0, 500.0, CANVAS));
        assert!(session.selection().contains(id));
    }
}
