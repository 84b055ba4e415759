//! Pointer state machine of the editor canvas
//!
//! `Idle -> Selected -> Dragging -> Selected`. Dragging only records the
//! pointer travel; the model is touched once, on release.

use crate::render::canvas::{CanvasLayout, ElementId};
use crate::types::PixelRect;

/// Kind of selectable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Photo,
    Text,
}

/// A selected element on the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub kind: ElementKind,
    pub index: usize,
}

impl Selection {
    pub fn photo(index: usize) -> Self {
        Self {
            kind: ElementKind::Photo,
            index,
        }
    }

    pub fn text(index: usize) -> Self {
        Self {
            kind: ElementKind::Text,
            index,
        }
    }

    pub fn element_id(self) -> ElementId {
        match self.kind {
            ElementKind::Photo => ElementId::Photo(self.index),
            ElementKind::Text => ElementId::Text(self.index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected(Selection),
    Dragging {
        selection: Selection,
        /// Element box when the press happened
        origin: PixelRect,
        /// Pointer position at press
        start: (f32, f32),
        /// Last seen pointer position
        last: (f32, f32),
    },
}

/// What a release means for the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// No drag in progress
    Ignored,
    /// Pressed and released without moving
    Clicked(Selection),
    /// New fractional position: slot top-left, or text center
    Moved {
        selection: Selection,
        relx: f32,
        rely: f32,
    },
    /// Photo dropped onto another photo
    Swapped { source: usize, target: usize },
}

impl InteractionState {
    pub fn selection(&self) -> Option<Selection> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Selected(selection) => Some(selection),
            InteractionState::Dragging { selection, .. } => Some(selection),
        }
    }

    /// Press on `hit`, or on empty background when `None`.
    ///
    /// Returns the previously selected element so its highlight can be
    /// removed.
    pub fn press(&mut self, hit: Option<(Selection, PixelRect)>, x: f32, y: f32) -> Option<Selection> {
        let previous = self.selection();
        *self = match hit {
            Some((selection, origin)) => InteractionState::Dragging {
                selection,
                origin,
                start: (x, y),
                last: (x, y),
            },
            None => InteractionState::Idle,
        };
        previous
    }

    /// Pointer moved; returns the element and the step since the last event
    pub fn drag(&mut self, x: f32, y: f32) -> Option<(Selection, f32, f32)> {
        match self {
            InteractionState::Dragging {
                selection, last, ..
            } => {
                let step = (x - last.0, y - last.1);
                *last = (x, y);
                Some((*selection, step.0, step.1))
            }
            _ => None,
        }
    }

    /// Pointer released at `(x, y)`; `layout` is the canvas the drag
    /// happened on.
    pub fn release(&mut self, x: f32, y: f32, layout: &CanvasLayout) -> ReleaseOutcome {
        let InteractionState::Dragging {
            selection,
            origin,
            start,
            ..
        } = *self
        else {
            return ReleaseOutcome::Ignored;
        };
        *self = InteractionState::Selected(selection);

        let (dx, dy) = (x - start.0, y - start.1);
        if dx == 0.0 && dy == 0.0 {
            return ReleaseOutcome::Clicked(selection);
        }

        if selection.kind == ElementKind::Photo {
            if let Some(target) = layout.photo_at_except(x, y, selection.index) {
                return ReleaseOutcome::Swapped {
                    source: selection.index,
                    target,
                };
            }
        }

        let area = layout.area;
        if area.width == 0 || area.height == 0 {
            return ReleaseOutcome::Clicked(selection);
        }
        let (left, top) = (origin.x as f32 + dx, origin.y as f32 + dy);
        let (px, py) = match selection.kind {
            ElementKind::Photo => (left, top),
            ElementKind::Text => (
                left + origin.width as f32 / 2.0,
                top + origin.height as f32 / 2.0,
            ),
        };
        ReleaseOutcome::Moved {
            selection,
            relx: (px - area.x as f32) / area.width as f32,
            rely: (py - area.y as f32) / area.height as f32,
        }
    }

    /// Forget the selection
    pub fn clear(&mut self) -> Option<Selection> {
        let previous = self.selection();
        *self = InteractionState::Idle;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CanvasLayout {
        CanvasLayout {
            size: (200, 100),
            area: PixelRect::new(0, 0, 200, 100),
            photos: vec![
                (0, PixelRect::new(0, 0, 50, 50)),
                (1, PixelRect::new(100, 0, 50, 50)),
            ],
            texts: vec![(0, PixelRect::new(80, 80, 40, 10))],
        }
    }

    #[test]
    fn test_click_selects_without_moving() {
        let mut state = InteractionState::default();
        let rect = PixelRect::new(0, 0, 50, 50);
        assert_eq!(state.press(Some((Selection::photo(0), rect)), 10.0, 10.0), None);
        assert_eq!(
            state.release(10.0, 10.0, &layout()),
            ReleaseOutcome::Clicked(Selection::photo(0))
        );
        assert_eq!(state, InteractionState::Selected(Selection::photo(0)));
    }

    #[test]
    fn test_drag_reports_steps() {
        let mut state = InteractionState::default();
        state.press(Some((Selection::photo(0), PixelRect::new(0, 0, 50, 50))), 10.0, 10.0);
        assert_eq!(state.drag(15.0, 12.0), Some((Selection::photo(0), 5.0, 2.0)));
        assert_eq!(state.drag(20.0, 12.0), Some((Selection::photo(0), 5.0, 0.0)));
    }

    #[test]
    fn test_release_on_empty_space_moves() {
        let mut state = InteractionState::default();
        state.press(Some((Selection::photo(0), PixelRect::new(0, 0, 50, 50))), 10.0, 10.0);
        state.drag(50.0, 60.0);
        match state.release(50.0, 60.0, &layout()) {
            ReleaseOutcome::Moved { selection, relx, rely } => {
                assert_eq!(selection, Selection::photo(0));
                assert!((relx - 0.2).abs() < 1e-6);
                assert!((rely - 0.5).abs() < 1e-6);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_release_on_photo_swaps() {
        let mut state = InteractionState::default();
        state.press(Some((Selection::photo(0), PixelRect::new(0, 0, 50, 50))), 10.0, 10.0);
        assert_eq!(
            state.release(120.0, 20.0, &layout()),
            ReleaseOutcome::Swapped { source: 0, target: 1 }
        );
    }

    #[test]
    fn test_text_commits_center() {
        let mut state = InteractionState::default();
        state.press(Some((Selection::text(0), PixelRect::new(80, 80, 40, 10))), 90.0, 85.0);
        match state.release(110.0, 65.0, &layout()) {
            ReleaseOutcome::Moved { relx, rely, .. } => {
                assert!((relx - 0.6).abs() < 1e-6);
                assert!((rely - 0.65).abs() < 1e-6);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_background_press_deselects() {
        let mut state = InteractionState::Selected(Selection::text(0));
        assert_eq!(state.press(None, 5.0, 95.0), Some(Selection::text(0)));
        assert_eq!(state.selection(), None);
        assert_eq!(state.release(5.0, 95.0, &layout()), ReleaseOutcome::Ignored);
    }
}
