//! Interactive drag lifecycle for the crop selection.
//!
//! The machine owns the current rectangle and, while a drag is live, the
//! anchor point. A rectangle exists exactly in the `Dragging` and `Selected`
//! states; the anchor exists exactly in `Dragging` and is dropped the moment
//! the pointer is released.

use crate::geometry::{normalize_drag, ScreenPoint, ScreenRect};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    /// No crop session (no file, or crop mode not entered).
    #[default]
    Idle,
    /// Crop mode entered, waiting for the first pointer-down.
    Armed,
    /// Pointer is down; the rect is overwritten on every move.
    Dragging {
        anchor: ScreenPoint,
        rect: ScreenRect,
    },
    /// Pointer released; the last rect is held awaiting confirm or cancel.
    Selected { rect: ScreenRect },
}

impl Selection {
    /// Enters crop mode. Only meaningful from `Idle`; the caller guarantees
    /// a document is loaded.
    pub fn arm(&mut self) {
        if matches!(self, Self::Idle) {
            *self = Self::Armed;
        }
    }

    /// Leaves crop mode and discards any rectangle.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Pointer-down inside the viewer. Starts a drag from `Armed`, or
    /// re-arms a fresh drag from `Selected` so the user can redo the
    /// selection without leaving crop mode.
    pub fn pointer_down(&mut self, point: ScreenPoint) {
        match self {
            Self::Armed | Self::Selected { .. } => {
                *self = Self::Dragging {
                    anchor: point,
                    rect: normalize_drag(point, point),
                };
            }
            Self::Idle | Self::Dragging { .. } => {}
        }
    }

    /// Pointer-move. Recomputes the rect from the anchor and the current
    /// point; intermediate positions leave no residue.
    pub fn pointer_move(&mut self, point: ScreenPoint) {
        if let Self::Dragging { anchor, rect } = self {
            *rect = normalize_drag(*anchor, point);
        }
    }

    /// Pointer-up or pointer-leave: finalizes the drag, keeping the last
    /// rect and dropping the anchor.
    pub fn pointer_up(&mut self) {
        if let Self::Dragging { rect, .. } = self {
            *self = Self::Selected { rect: *rect };
        }
    }

    /// Rescales any held rectangle (and a live drag's anchor) after the
    /// viewport it was drawn over is re-rendered at a new pixel size.
    pub fn rescale(&mut self, factor: f32) {
        match self {
            Self::Dragging { anchor, rect } => {
                anchor.x *= factor;
                anchor.y *= factor;
                *rect = rect.scaled(factor);
            }
            Self::Selected { rect } => *rect = rect.scaled(factor),
            Self::Idle | Self::Armed => {}
        }
    }

    /// The current rectangle, if one exists.
    pub fn rect(&self) -> Option<ScreenRect> {
        match self {
            Self::Dragging { rect, .. } | Self::Selected { rect } => Some(*rect),
            Self::Idle | Self::Armed => None,
        }
    }

    /// True once crop mode has been entered, in any sub-state.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// A finalized rectangle that is actually croppable.
    pub fn confirmed_rect(&self) -> Option<ScreenRect> {
        match self {
            Self::Selected { rect } if !rect.is_degenerate() => Some(*rect),
            _ => None,
        }
    }
}
