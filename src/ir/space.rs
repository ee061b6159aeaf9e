//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between drawing coordinates and picture coordinates at compile time.

use std::fmt;

/// Marker type for coordinates in the drawing's native system.
///
/// Drawing coordinates are in big points with y growing upward. The origin
/// is wherever the host application puts it; it is not necessarily a corner
/// of the artwork.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawingSpace {}

/// Marker type for coordinates inside the LaTeX picture.
///
/// Picture coordinates share the unit of the drawing but are re-based so
/// that the bottom-left corner of the merged frame is (0, 0).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PictureSpace {}

impl fmt::Debug for DrawingSpace {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for PictureSpace {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
