//! Reversible operation records for per-page undo/redo
//!
//! Every mutating action pushes one typed record. Undo and redo replay a
//! record against the annotation sequence and hand back the record to push
//! onto the opposite stack, so both directions stay exactly inverse. The
//! erase record carries the fragment list for the same reason: undoing a
//! split removes the fragments and restores the original as one unit.

use crate::annotation::{Annotation, AnnotationId};

/// One reversible mutation of a page's annotation sequence
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRecord {
    /// An annotation was appended
    Add { annotation: Annotation },
    /// An annotation was removed from `index`
    Delete {
        index: usize,
        annotation: Annotation,
    },
    /// The eraser removed `original` at `index`, splicing in `fragments`
    Erase {
        index: usize,
        original: Annotation,
        fragments: Vec<Annotation>,
    },
    /// The whole page was cleared
    Clear { annotations: Vec<Annotation> },
}

fn remove_by_id(annotations: &mut Vec<Annotation>, id: AnnotationId) -> Option<Annotation> {
    let index = annotations.iter().position(|a| a.id == id)?;
    Some(annotations.remove(index))
}

/// Reverse a record against the sequence; returns the record to push onto
/// the redo stack. Records capture the live object state on the way out,
/// so a moved annotation reappears where it was left, not where it was
/// created.
pub fn undo_record(record: HistoryRecord, annotations: &mut Vec<Annotation>) -> HistoryRecord {
    match record {
        HistoryRecord::Add { annotation } => {
            let live = remove_by_id(annotations, annotation.id).unwrap_or(annotation);
            HistoryRecord::Add { annotation: live }
        }
        HistoryRecord::Delete { index, annotation } => {
            let at = index.min(annotations.len());
            annotations.insert(at, annotation.clone());
            HistoryRecord::Delete { index, annotation }
        }
        HistoryRecord::Erase {
            index,
            original,
            fragments,
        } => {
            let live_fragments: Vec<Annotation> = fragments
                .into_iter()
                .map(|f| {
                    let id = f.id;
                    remove_by_id(annotations, id).unwrap_or(f)
                })
                .collect();
            let at = index.min(annotations.len());
            annotations.insert(at, original.clone());
            HistoryRecord::Erase {
                index,
                original,
                fragments: live_fragments,
            }
        }
        HistoryRecord::Clear {
            annotations: cleared,
        } => {
            annotations.extend(cleared.iter().cloned());
            HistoryRecord::Clear {
                annotations: cleared,
            }
        }
    }
}

/// Re-apply a previously undone record; returns the record to push back
/// onto the undo stack.
pub fn redo_record(record: HistoryRecord, annotations: &mut Vec<Annotation>) -> HistoryRecord {
    match record {
        HistoryRecord::Add { annotation } => {
            annotations.push(annotation.clone());
            HistoryRecord::Add { annotation }
        }
        HistoryRecord::Delete { index, annotation } => {
            let live = remove_by_id(annotations, annotation.id).unwrap_or(annotation);
            HistoryRecord::Delete {
                index,
                annotation: live,
            }
        }
        HistoryRecord::Erase {
            index,
            original,
            fragments,
        } => {
            let live_original = remove_by_id(annotations, original.id).unwrap_or(original);
            let at = index.min(annotations.len());
            for fragment in fragments.iter().rev() {
                annotations.insert(at, fragment.clone());
            }
            HistoryRecord::Erase {
                index,
                original: live_original,
                fragments,
            }
        }
        HistoryRecord::Clear { .. } => {
            let cleared = std::mem::take(annotations);
            HistoryRecord::Clear {
                annotations: cleared,
            }
        }
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
            points: vec![PagePoint::new(0.1, 0.1), PagePoint::new(0.2, 0.2)],
        })
    }

    #[test]
    fn test_add_undo_redo() {
        let mut annotations = Vec::new();
        let stroke = pen();
        annotations.push(stroke.clone());

        let redo = undo_record(
            HistoryRecord::Add {
                annotation: stroke.clone(),
            },
            &mut annotations,
        );
        assert!(annotations.is_empty());

        redo_record(redo, &mut annotations);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].id, stroke.id);
    }

    #[test]
    fn test_delete_restores_at_index() {
        let first = pen();
        let second = pen();
        let third = pen();
        let mut annotations = vec![first.clone(), third.clone()];

        let redo = undo_record(
            HistoryRecord::Delete {
                index: 1,
                annotation: second.clone(),
            },
            &mut annotations,
        );
        assert_eq!(annotations[1].id, second.id);
        assert_eq!(annotations.len(), 3);

        redo_record(redo, &mut annotations);
        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.id != second.id));
    }

    #[test]
    fn test_erase_is_exactly_invertible() {
        let original = pen();
        let fragment_a = pen();
        let fragment_b = pen();
        let mut annotations = vec![fragment_a.clone(), fragment_b.clone()];

        let record = HistoryRecord::Erase {
            index: 0,
            original: original.clone(),
            fragments: vec![fragment_a.clone(), fragment_b.clone()],
        };

        let redo = undo_record(record, &mut annotations);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].id, original.id);

        redo_record(redo, &mut annotations);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].id, fragment_a.id);
        assert_eq!(annotations[1].id, fragment_b.id);
    }

    #[test]
    fn test_clear_round_trip() {
        let a = pen();
        let b = pen();
        let mut annotations = Vec::new();

        let redo = undo_record(
            HistoryRecord::Clear {
                annotations: vec![a.clone(), b.clone()],
            },
            &mut annotations,
        );
        assert_eq!(annotations.len(), 2);

        redo_record(redo, &mut annotations);
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_undo_add_keeps_moved_state_for_redo() {
        let mut stroke = pen();
        let record = HistoryRecord::Add {
            annotation: stroke.clone(),
        };
        // The stroke moves after being added
        if let AnnotationKind::Pen { points, .. } = &mut stroke.kind {
            for p in points.iter_mut() {
                p.x += 0.5;
            }
        }
        let mut annotations = vec![stroke.clone()];

        let redo = undo_record(record, &mut annotations);
        redo_record(redo, &mut annotations);
        assert_eq!(annotations[0], stroke);
    }
}
