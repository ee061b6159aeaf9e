//! The seam between the exporter and the drawing application.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TexOverlayError;
use crate::ir::{BBox, Drawing, DrawingSpace};

/// A drawing application with an open document.
///
/// The exporter reads the document through [`DocumentHost::active_document`]
/// and mutates it only through layer visibility and save-as, which it
/// restores before returning.
pub trait DocumentHost {
    /// The open document, or `None` if nothing is open.
    fn active_document(&self) -> Option<&Drawing>;

    /// Visibility of the named layer, or `None` if there is no such layer.
    fn layer_visible(&self, layer: &str) -> Option<bool>;

    /// Shows or hides the named layer.
    fn set_layer_visible(&mut self, layer: &str, visible: bool) -> Result<(), TexOverlayError>;

    /// Bounds of everything visible in the document.
    ///
    /// Hosts leave hidden layers out of this, which is why the exporter hides
    /// the text layer before asking.
    fn geometric_bounds(&self) -> Result<BBox<DrawingSpace>, TexOverlayError>;

    /// True if the document has no unsaved changes.
    fn is_saved(&self) -> bool;

    /// Saves the document to `path` in `format`.
    fn save_as(&mut self, path: &Path, format: &SaveFormat) -> Result<(), TexOverlayError>;
}

/// PDF compatibility level.
///
/// Set with `pdf_compatibility` in the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfCompatibility {
    /// PDF 1.3, readable by every pdfTeX version.
    #[default]
    Acrobat4,
    Acrobat5,
    Acrobat6,
    Acrobat7,
    Acrobat8,
}

/// Options for saving as PDF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfSaveOptions {
    pub preserve_editability: bool,
    pub acrobat_layers: bool,
    pub compatibility: PdfCompatibility,
}

impl Default for PdfSaveOptions {
    fn default() -> Self {
        Self {
            preserve_editability: true,
            acrobat_layers: false,
            compatibility: PdfCompatibility::Acrobat4,
        }
    }
}

/// Options for saving as EPS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpsSaveOptions {
    pub preserve_editability: bool,
}

impl Default for EpsSaveOptions {
    fn default() -> Self {
        Self {
            preserve_editability: true,
        }
    }
}

/// Target format of a save-as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    /// The host's own format, used to put the document back at its path.
    Native,
    Pdf(PdfSaveOptions),
    Eps(EpsSaveOptions),
}

impl SaveFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SaveFormat::Native => "native",
            SaveFormat::Pdf(_) => "PDF",
            SaveFormat::Eps(_) => "EPS",
        }
    }

    /// File extension for the exported file, `None` for the native format.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            SaveFormat::Native => None,
            SaveFormat::Pdf(_) => Some("pdf"),
            SaveFormat::Eps(_) => Some("eps"),
        }
    }
}
