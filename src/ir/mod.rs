//! Drawing model for texoverlay.
//!
//! This module defines what the exporter knows about a host document:
//! typed coordinates and bounding boxes, and the drawing/layer/text-frame
//! tree the host reports.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Points carry a marker type for their coordinate space,
//!    so a drawing-space anchor cannot end up in the picture without being
//!    re-projected.
//!
//! 2. **Host Order on the Wire**: Boxes are stored as min/max corners but
//!    read and written in the host's `[left, top, right, bottom]` order.
//!
//! 3. **Permissive Construction**: Inverted boxes and odd transforms can be
//!    represented, so the `check` command can report them instead of the
//!    parser rejecting the whole snapshot.
//!
//! # Example
//!
//! ```
//! use texoverlay::ir::{BBox, Coord, Drawing, Layer, TextFrame};
//!
//! let drawing = Drawing::new("figure.ai", "/work/figure.ai", BBox::from_ltrb(0.0, 100.0, 50.0, 0.0))
//!     .with_layer(Layer::new("Text").with_frame(
//!         TextFrame::point(Coord::new(60.0, 10.0), "Helvetica", 12.0, "Label"),
//!     ));
//! assert_eq!(drawing.layer("Text").unwrap().eligible_frames().count(), 1);
//! ```

mod bbox;
mod coord;
pub mod io_json;
mod model;
mod space;

pub use bbox::BBox;
pub use coord::Coord;
pub use model::{Drawing, FillColor, Justification, Layer, LinearMap, TextFrame, TextKind};
pub use space::{DrawingSpace, PictureSpace};
