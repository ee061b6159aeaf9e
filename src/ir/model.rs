//! Core drawing model for texoverlay.
//!
//! This is a read-only snapshot of the part of a host document the exporter
//! cares about: the drawing's bounds and origins, and the text frames on its
//! layers. Hosts produce it, the exporter consumes it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::bbox::BBox;
use super::coord::Coord;
use super::space::DrawingSpace;

/// A drawing as reported by the host application.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Drawing {
    /// Display name of the document, including its extension (e.g. `figure.ai`).
    pub name: String,

    /// Full path of the document file.
    pub path: PathBuf,

    /// Bounds of the non-text artwork, `[left, top, right, bottom]`.
    pub graphical_bounds: BBox<DrawingSpace>,

    /// Offset of the ruler origin relative to the page.
    #[serde(default)]
    pub ruler_origin: Coord<DrawingSpace>,

    /// Page origin. Only echoed into the diagnostic comments.
    #[serde(default)]
    pub page_origin: Coord<DrawingSpace>,

    /// Crop box, if the document defines one. Only echoed into the
    /// diagnostic comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_box: Option<BBox<DrawingSpace>>,

    /// Layers in stacking order.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Drawing {
    /// Creates a drawing with no layers.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        graphical_bounds: BBox<DrawingSpace>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            graphical_bounds,
            ..Default::default()
        }
    }

    /// Adds a layer to the drawing.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Sets the ruler origin.
    pub fn with_ruler_origin(mut self, x: f64, y: f64) -> Self {
        self.ruler_origin = Coord::new(x, y);
        self
    }

    /// Looks up a layer by exact name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Looks up a layer by exact name for mutation.
    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.name == name)
    }
}

/// A named layer holding text frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,

    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Text frames in drawing order.
    #[serde(default)]
    pub text_frames: Vec<TextFrame>,
}

fn default_visible() -> bool {
    true
}

impl Layer {
    /// Creates a visible, empty layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            text_frames: Vec::new(),
        }
    }

    /// Adds a text frame to the layer.
    pub fn with_frame(mut self, frame: TextFrame) -> Self {
        self.text_frames.push(frame);
        self
    }

    /// Iterates over the frames the exporter will write, paired with their
    /// index in the layer.
    ///
    /// The index counts every frame, so skipped frames leave gaps in the
    /// numbering of the `% Item #` comments.
    pub fn eligible_frames(&self) -> impl Iterator<Item = (usize, &TextFrame)> {
        self.text_frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| frame.is_eligible())
    }
}

/// How the host lays out a text frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Single anchor point, no wrapping.
    #[default]
    Point,
    /// Text flowed into a shape.
    Area,
    /// Text following a path.
    Path,
}

/// Paragraph justification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    #[default]
    Left,
    Right,
    Center,
    /// Full justification has no meaning for point text; it renders centered.
    FullJustify,
}

/// Fill color of the first character of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillColor {
    /// No explicit fill; the text inherits the document default (black).
    #[default]
    None,
    /// RGB color with channels in 0..=255.
    Rgb { red: f64, green: f64, blue: f64 },
    /// A color model that is not translated (CMYK, gray, spot, pattern).
    #[serde(other)]
    Unsupported,
}

impl FillColor {
    /// Creates an RGB color.
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        FillColor::Rgb { red, green, blue }
    }
}

/// A 2x2 linear map without translation.
///
/// Maps `(x, y)` to `(a*x + c*y, b*x + d*y)`, so `(a, b)` is the image of the
/// first basis vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearMap {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl LinearMap {
    pub const IDENTITY: LinearMap = LinearMap {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };

    /// Builds the counter-clockwise rotation by `degrees`.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
        }
    }

    /// Returns the image of the first basis vector.
    #[inline]
    pub fn first_column(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    /// Returns true if both columns are unit length and orthogonal to each
    /// other, within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let len_a = self.a.hypot(self.b);
        let len_c = self.c.hypot(self.d);
        let dot = self.a * self.c + self.b * self.d;
        (len_a - 1.0).abs() <= tolerance
            && (len_c - 1.0).abs() <= tolerance
            && dot.abs() <= tolerance
    }
}

impl Default for LinearMap {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A text frame on a layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextFrame {
    #[serde(default)]
    pub kind: TextKind,

    /// The single reference point of the text.
    pub anchor: Coord<DrawingSpace>,

    /// Rotation applied to the text.
    #[serde(default)]
    pub matrix: LinearMap,

    #[serde(default)]
    pub justification: Justification,

    pub font_name: String,

    pub font_size: f64,

    #[serde(default)]
    pub fill_color: FillColor,

    /// Text content. Line breaks are carriage returns.
    pub contents: String,
}

impl TextFrame {
    /// Creates an unrotated, left-justified point text frame.
    pub fn point(
        anchor: Coord<DrawingSpace>,
        font_name: impl Into<String>,
        font_size: f64,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            kind: TextKind::Point,
            anchor,
            matrix: LinearMap::IDENTITY,
            justification: Justification::Left,
            font_name: font_name.into(),
            font_size,
            fill_color: FillColor::None,
            contents: contents.into(),
        }
    }

    /// Sets the justification.
    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Sets the transform.
    pub fn with_matrix(mut self, matrix: LinearMap) -> Self {
        self.matrix = matrix;
        self
    }

    /// Sets the fill color.
    pub fn with_fill(mut self, fill_color: FillColor) -> Self {
        self.fill_color = fill_color;
        self
    }

    /// Sets the text kind.
    pub fn with_kind(mut self, kind: TextKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns true if this frame is exported: point text with content.
    pub fn is_eligible(&self) -> bool {
        self.kind == TextKind::Point && !self.contents.is_empty()
    }
}
