//! Page store: annotation sequences plus their history stacks
//!
//! A [`Document`] owns one [`Page`] per rendered page. Each page keeps its
//! annotations in insertion order (index is z-order) alongside the undo and
//! redo stacks. Pushing any new mutating record empties the redo stack, so
//! there is no branching redo.
//!
//! Operations on missing pages or unknown ids are no-ops; nothing here
//! panics on out-of-range input.

use crate::annotation::{Annotation, AnnotationId};
use crate::history::{self, HistoryRecord};

/// One page's annotations and history
#[derive(Debug, Default)]
pub struct Page {
    annotations: Vec<Annotation>,
    undo_stack: Vec<HistoryRecord>,
    redo_stack: Vec<HistoryRecord>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view for rendering and export collaborators
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    pub fn index_of(&self, id: AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|a| a.id == id)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record a new mutating action. Any redo state is invalidated.
    fn push_record(&mut self, record: HistoryRecord) {
        self.undo_stack.push(record);
        self.redo_stack.clear();
    }

    /// Append an annotation and record the addition
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.push_record(HistoryRecord::Add {
            annotation: annotation.clone(),
        });
        self.annotations.push(annotation);
    }

    /// Remove an annotation by id, recording a delete. Unknown ids are
    /// ignored.
    pub fn delete_annotation(&mut self, id: AnnotationId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let annotation = self.annotations.remove(index);
        self.push_record(HistoryRecord::Delete { index, annotation });
        true
    }

    /// Apply an eraser split: remove the original at `index` and splice in
    /// the fragments at the same position, recording both for undo.
    pub(crate) fn apply_erase(&mut self, index: usize, fragments: Vec<Annotation>) {
        if index >= self.annotations.len() {
            return;
        }
        let original = self.annotations.remove(index);
        for fragment in fragments.iter().rev() {
            self.annotations.insert(index, fragment.clone());
        }
        self.push_record(HistoryRecord::Erase {
            index,
            original,
            fragments,
        });
    }

    /// Snapshot and empty the whole page. Empty pages are a no-op.
    pub fn clear(&mut self) -> bool {
        if self.annotations.is_empty() {
            return false;
        }
        let cleared = std::mem::take(&mut self.annotations);
        self.push_record(HistoryRecord::Clear {
            annotations: cleared,
        });
        true
    }

    /// Reverse the most recent action. Returns false on an empty stack.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };
        let redo = history::undo_record(record, &mut self.annotations);
        self.redo_stack.push(redo);
        true
    }

    /// Re-apply the most recently undone action
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.redo_stack.pop() else {
            return false;
        };
        let undo = history::redo_record(record, &mut self.annotations);
        self.undo_stack.push(undo);
        true
    }
}

/// All pages of the open document
#[derive(Debug, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate a page store for a known page count
    pub fn with_pages(count: usize) -> Self {
        let mut pages = Vec::with_capacity(count);
        pages.resize_with(count, Page::new);
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Page accessor that grows the store on demand, mirroring how pages
    /// come into existence as they are first rendered
    pub fn page_mut_or_create(&mut self, index: usize) -> &mut Page {
        if index >= self.pages.len() {
            self.pages.resize_with(index + 1, Page::new);
        }
        &mut self.pages[index]
    }

    /// Append an annotation to a page, creating the page if needed
    pub fn add_annotation(&mut self, page_index: usize, annotation: Annotation) {
        self.page_mut_or_create(page_index).add_annotation(annotation);
    }

    /// Annotations of a page; empty for unknown pages
    pub fn annotations(&self, page_index: usize) -> &[Annotation] {
        self.page(page_index)
            .map(|p| p.annotations())
            .unwrap_or(&[])
    }

    pub fn undo(&mut self, page_index: usize) -> bool {
        self.page_mut(page_index).is_some_and(|p| p.undo())
    }

    pub fn redo(&mut self, page_index: usize) -> bool {
        self.page_mut(page_index).is_some_and(|p| p.redo())
    }

    pub fn clear_page(&mut self, page_index: usize) -> bool {
        self.page_mut(page_index).is_some_and(|p| p.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotationKind, Color};
    use crate::geometry::PagePoint;

    fn pen() -> Annotation {
        Annotation::new(AnnotationKind::Pen {
            color: Color::RED,
            width: 2.0,
            points: vec![PagePoint::new(0.1, 0.1)],
        })
    }

    #[test]
    fn test_undo_redo_stack_discipline() {
        let mut page = Page::new();
        let strokes: Vec<Annotation> = (0..4).map(|_| pen()).collect();
        for stroke in &strokes {
            page.add_annotation(stroke.clone());
        }

        for _ in 0..4 {
            assert!(page.undo());
        }
        assert!(page.annotations().is_empty());
        assert_eq!(page.redo_depth(), 4);
        assert!(!page.undo());

        // Redo entries come back newest-last
        assert!(page.redo());
        assert_eq!(page.annotations()[0].id, strokes[0].id);

        // A new action after a partial undo clears the remaining redo
        page.add_annotation(pen());
        assert_eq!(page.redo_depth(), 0);
        assert!(!page.redo());
    }

    #[test]
    fn test_delete_and_undo() {
        let mut page = Page::new();
        let stroke = pen();
        page.add_annotation(stroke.clone());
        assert!(page.delete_annotation(stroke.id));
        assert!(page.annotations().is_empty());

        assert!(page.undo());
        assert_eq!(page.annotations().len(), 1);
        assert_eq!(page.annotations()[0].id, stroke.id);

        // Unknown id is a no-op and records nothing
        let depth = page.undo_depth();
        assert!(!page.delete_annotation(uuid::Uuid::new_v4()));
        assert_eq!(page.undo_depth(), depth);
    }

    #[test]
    fn test_clear_page_round_trip() {
        let mut document = Document::with_pages(2);
        document.add_annotation(1, pen());
        document.add_annotation(1, pen());

        assert!(document.clear_page(1));
        assert!(document.annotations(1).is_empty());
        assert!(document.undo(1));
        assert_eq!(document.annotations(1).len(), 2);

        // Clearing an empty page records nothing
        assert!(!document.clear_page(0));
    }

    #[test]
    fn test_missing_page_operations_are_noops() {
        let mut document = Document::new();
        assert!(!document.undo(3));
        assert!(!document.redo(3));
        assert!(!document.clear_page(3));
        assert!(document.annotations(7).is_empty());

        // Adding grows the store like first render does
        document.add_annotation(2, pen());
        assert_eq!(document.page_count(), 3);
        assert_eq!(document.annotations(2).len(), 1);
    }
}
