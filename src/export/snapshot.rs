//! A [`DocumentHost`] backed by a JSON drawing snapshot.

use std::path::{Path, PathBuf};

use super::host::{DocumentHost, SaveFormat};
use crate::error::TexOverlayError;
use crate::geometry::merge_extent;
use crate::ir::io_json::{read_drawing_json, write_drawing_json};
use crate::ir::{BBox, Drawing, DrawingSpace};

/// A host whose document is a snapshot loaded from JSON.
///
/// Geometric bounds follow the host convention: the graphical bounds plus
/// the anchors of text on visible layers. PDF and EPS need the real artwork,
/// which a snapshot does not have, so those saves fail.
///
/// A native save writes the snapshot back as JSON to the file it was opened
/// from, whatever path is asked for. [`Drawing::path`] names the artwork the
/// snapshot describes and is never written. A host built from an in-memory
/// drawing has no file to save to and refuses native saves.
#[derive(Clone, Debug, Default)]
pub struct SnapshotHost {
    document: Option<Drawing>,
    source: Option<PathBuf>,
    saved: bool,
    saves: Vec<PathBuf>,
}

impl SnapshotHost {
    /// A host with `drawing` open and no unsaved changes.
    pub fn new(drawing: Drawing) -> Self {
        Self {
            document: Some(drawing),
            source: None,
            saved: true,
            saves: Vec::new(),
        }
    }

    /// A host with nothing open.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Opens the snapshot at `path`.
    pub fn open(path: &Path) -> Result<Self, TexOverlayError> {
        let mut drawing = read_drawing_json(path)?;
        if drawing.path.as_os_str().is_empty() {
            drawing.path = path.to_path_buf();
        }
        Ok(Self {
            source: Some(path.to_path_buf()),
            ..Self::new(drawing)
        })
    }

    /// The snapshot file this host was opened from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Paths written by native saves, oldest first.
    ///
    /// Always the snapshot file, never the artwork path.
    pub fn saves(&self) -> &[PathBuf] {
        &self.saves
    }

    fn document_mut(&mut self) -> Result<&mut Drawing, TexOverlayError> {
        self.document.as_mut().ok_or(TexOverlayError::NoDocument)
    }
}

impl DocumentHost for SnapshotHost {
    fn active_document(&self) -> Option<&Drawing> {
        self.document.as_ref()
    }

    fn layer_visible(&self, layer: &str) -> Option<bool> {
        self.document.as_ref()?.layer(layer).map(|l| l.visible)
    }

    fn set_layer_visible(&mut self, layer: &str, visible: bool) -> Result<(), TexOverlayError> {
        let target = self
            .document_mut()?
            .layer_mut(layer)
            .ok_or_else(|| TexOverlayError::MissingLayer(layer.to_string()))?;
        let changed = target.visible != visible;
        target.visible = visible;
        if changed {
            self.saved = false;
        }
        Ok(())
    }

    fn geometric_bounds(&self) -> Result<BBox<DrawingSpace>, TexOverlayError> {
        let drawing = self.document.as_ref().ok_or(TexOverlayError::NoDocument)?;
        let visible_anchors = drawing
            .layers
            .iter()
            .filter(|layer| layer.visible)
            .flat_map(|layer| layer.text_frames.iter().map(|frame| frame.anchor));
        Ok(merge_extent(visible_anchors, drawing.graphical_bounds))
    }

    fn is_saved(&self) -> bool {
        self.saved
    }

    fn save_as(&mut self, path: &Path, format: &SaveFormat) -> Result<(), TexOverlayError> {
        match format {
            SaveFormat::Native => {
                let drawing = self.document.as_ref().ok_or(TexOverlayError::NoDocument)?;
                let source = self.source.as_ref().ok_or_else(|| TexOverlayError::Host {
                    operation: "save_as",
                    message: format!(
                        "snapshot of {} was not opened from a file",
                        path.display()
                    ),
                })?;
                log::debug!(
                    "native save of {} goes to snapshot {}",
                    path.display(),
                    source.display()
                );
                write_drawing_json(source, drawing)?;
                self.saved = true;
                self.saves.push(source.clone());
                Ok(())
            }
            SaveFormat::Pdf(_) | SaveFormat::Eps(_) => Err(TexOverlayError::Export {
                format: format.name(),
                message: "a drawing snapshot has no artwork to render".to_string(),
            }),
        }
    }
}
