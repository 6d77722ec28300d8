//! Selection and gesture state
//!
//! Selection is process-wide and single-valued: nothing, one object, or a
//! list of at least two, always on a single page. The enum makes the
//! exclusivity invariant structural; there is no way to hold a single and a
//! multi selection at once, and no page index without a selection.

use crate::annotation::AnnotationId;
use crate::bounds::Handle;
use crate::geometry::Bounds;
use crate::manipulation::DragSnapshot;

/// Current selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Single {
        page: usize,
        id: AnnotationId,
    },
    Multi {
        page: usize,
        ids: Vec<AnnotationId>,
    },
}

impl Selection {
    /// Build from a collected id list: empty stays unselected, one id is a
    /// single selection, more is a multi selection
    pub fn from_ids(page: usize, mut ids: Vec<AnnotationId>) -> Self {
        match ids.len() {
            0 => Selection::None,
            1 => Selection::Single {
                page,
                id: ids.remove(0),
            },
            _ => Selection::Multi { page, ids },
        }
    }

    /// Page the selection lives on; `None` iff nothing is selected
    pub fn page(&self) -> Option<usize> {
        match self {
            Selection::None => None,
            Selection::Single { page, .. } | Selection::Multi { page, .. } => Some(*page),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        match self {
            Selection::None => false,
            Selection::Single { id: selected, .. } => *selected == id,
            Selection::Multi { ids, .. } => ids.contains(&id),
        }
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> Vec<AnnotationId> {
        match self {
            Selection::None => Vec::new(),
            Selection::Single { id, .. } => vec![*id],
            Selection::Multi { ids, .. } => ids.clone(),
        }
    }
}

/// Transient pointer-gesture state, carried explicitly between successive
/// pointer events. Drag positions are canvas pixels; geometry snapshots are
/// captured at gesture start so every move event computes from the drag
/// origin instead of accumulating deltas.
#[derive(Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Rubber-band selection rectangle in progress
    DragBox {
        origin_x: f32,
        origin_y: f32,
        current_x: f32,
        current_y: f32,
    },
    /// Continuous erase while the pointer is down
    Erasing { radius: f32 },
    MovingSingle {
        start_x: f32,
        start_y: f32,
        snapshot: DragSnapshot,
    },
    MovingMultiple {
        start_x: f32,
        start_y: f32,
        snapshot: DragSnapshot,
    },
    ResizingSingle {
        handle: Handle,
        start_x: f32,
        start_y: f32,
        snapshot: DragSnapshot,
    },
    ResizingMultiple {
        handle: Handle,
        start_x: f32,
        start_y: f32,
        /// Unpadded union box of the selection at resize start
        original_box: Bounds,
        snapshot: DragSnapshot,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_from_ids_cardinality() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(Selection::from_ids(0, vec![]), Selection::None);
        assert_eq!(
            Selection::from_ids(2, vec![a]),
            Selection::Single { page: 2, id: a }
        );
        assert!(matches!(
            Selection::from_ids(1, vec![a, b]),
            Selection::Multi { page: 1, .. }
        ));
    }

    #[test]
    fn test_page_is_none_iff_unselected() {
        let id = Uuid::new_v4();
        assert_eq!(Selection::None.page(), None);
        assert_eq!(Selection::Single { page: 3, id }.page(), Some(3));
        assert_eq!(
            Selection::Multi {
                page: 1,
                ids: vec![id, Uuid::new_v4()]
            }
            .page(),
            Some(1)
        );
    }

    #[test]
    fn test_contains() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let selection = Selection::from_ids(0, vec![a, b]);
        assert!(selection.contains(a));
        assert!(!selection.contains(Uuid::new_v4()));
        assert!(!Selection::None.contains(a));
    }
}
