//! JSON snapshots of a drawing.
//!
//! A snapshot is what a host-side script dumps about the open document:
//! bounds, origins, and the text frames of every layer. It lets the exporter
//! run outside the host application, and gives tests a stable input format.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::Drawing;
use crate::error::TexOverlayError;

/// Reads a drawing snapshot from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_drawing_json(path: &Path) -> Result<Drawing, TexOverlayError> {
    let file = File::open(path).map_err(TexOverlayError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TexOverlayError::DrawingJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a drawing snapshot to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_drawing_json(path: &Path, drawing: &Drawing) -> Result<(), TexOverlayError> {
    let file = File::create(path).map_err(TexOverlayError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, drawing).map_err(|source| {
        TexOverlayError::DrawingJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Parses a drawing snapshot from a JSON string.
pub fn from_json_str(json: &str) -> Result<Drawing, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a drawing snapshot from raw bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Drawing, serde_json::Error> {
    serde_json::from_slice(bytes)
}
