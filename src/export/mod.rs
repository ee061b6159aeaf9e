//! Exporting a drawing's text layer as a LaTeX picture.
//!
//! [`export_document`] runs the whole export against a [`DocumentHost`]:
//!
//! 1. **Validate**: a document is open, the text layer exists and holds at
//!    least one point text frame with content. Nothing is touched before this
//!    passes.
//! 2. **Compute frame**: hide the text layer so the host's bounds cover the
//!    artwork only, then merge in the text anchors.
//! 3. **Serialize** every exportable frame in drawing order.
//! 4. **Assemble** and **write** the picture. A write failure is reported in
//!    the summary and does not stop the run.
//! 5. **Save graphics** as EPS and/or PDF if enabled. The first failure stops
//!    the remaining saves.
//! 6. **Restore** the layer's visibility and, if any save was attempted,
//!    save the document back to its own path. This runs on every exit from
//!    steps 2-5.

pub mod host;
pub mod snapshot;

pub use host::{DocumentHost, EpsSaveOptions, PdfCompatibility, PdfSaveOptions, SaveFormat};
pub use snapshot::SnapshotHost;

use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::ExportOptions;
use crate::error::TexOverlayError;
use crate::fonts::FontCatalog;
use crate::ir::TextFrame;
use crate::picture::{serialize_text_frame, PictureDocument, PictureFrame, PictureHeader};

/// What an export run did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportSummary {
    /// Number of text records written.
    pub records: usize,
    /// Frames on the text layer that were not exported.
    pub skipped: usize,
    /// Where the picture was (or should have been) written.
    pub tex_path: PathBuf,
    /// Distinct fonts used, sorted.
    pub fonts: Vec<String>,
    /// Set if writing the picture failed.
    pub write_error: Option<String>,
    /// Formats the drawing was saved as, in order.
    pub saved_formats: Vec<&'static str>,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(err) = &self.write_error {
            writeln!(
                f,
                "Error writing file \"{}\": {}",
                self.tex_path.display(),
                err
            )?;
        }
        writeln!(
            f,
            "Exported {} text frames to {}",
            self.records,
            self.tex_path.display()
        )?;
        write!(f, "Using Fonts:")?;
        for font in &self.fonts {
            write!(f, "\n    {}", font)?;
        }
        writeln!(f)
    }
}

/// Exports the text layer of the host's open document.
///
/// # Errors
/// - [`TexOverlayError::NoDocument`], [`TexOverlayError::MissingLayer`] or
///   [`TexOverlayError::EmptyLayer`] before anything is changed.
/// - [`TexOverlayError::Export`] if saving the graphics failed; visibility
///   and the document path have been restored by then.
/// - [`TexOverlayError::Host`] (or whatever the host reports) if the host
///   refuses a visibility change or the final save.
pub fn export_document<H: DocumentHost>(
    host: &mut H,
    options: &ExportOptions,
) -> Result<ExportSummary, TexOverlayError> {
    let drawing = host.active_document().ok_or(TexOverlayError::NoDocument)?;
    let layer = drawing
        .layer(&options.layer)
        .ok_or_else(|| TexOverlayError::MissingLayer(options.layer.clone()))?;
    let frames: Vec<(usize, TextFrame)> = layer
        .eligible_frames()
        .map(|(index, frame)| (index, frame.clone()))
        .collect();
    if frames.is_empty() {
        return Err(TexOverlayError::EmptyLayer(options.layer.clone()));
    }
    let skipped = layer.text_frames.len() - frames.len();
    if skipped > 0 {
        log::warn!(
            "skipping {} frame(s) on \"{}\" that are empty or not point text",
            skipped,
            options.layer
        );
    }

    let drawing_path = drawing.path.clone();
    let tex_path = options
        .output
        .clone()
        .unwrap_or_else(|| tex_path_for(&drawing_path));
    let header_template = PictureHeader {
        source: drawing_path.display().to_string(),
        tex_name: file_name_of(&tex_path),
        graphics_name: graphics_name_for(&drawing.name),
        frame: PictureFrame::new(
            drawing.graphical_bounds,
            std::iter::empty(),
            drawing.ruler_origin,
        ),
        crop_box: drawing.crop_box,
        page_origin: drawing.page_origin,
    };
    let ruler_origin = drawing.ruler_origin;

    let was_visible = host
        .layer_visible(&options.layer)
        .ok_or_else(|| TexOverlayError::MissingLayer(options.layer.clone()))?;
    log::debug!(
        "text layer visible: {}, document saved: {}",
        was_visible,
        host.is_saved()
    );

    let mut attempted_save = false;
    let outcome = with_layer_hidden(host, &options.layer, was_visible, |host| {
        let graphical = host.geometric_bounds()?;
        let frame = PictureFrame::new(
            graphical,
            frames.iter().map(|(_, f)| f.anchor),
            ruler_origin,
        );
        log::info!(
            "picture frame {} ({} x {})",
            frame.merged,
            frame.width(),
            frame.height()
        );

        let mut document = PictureDocument::new(PictureHeader {
            frame,
            ..header_template
        });
        let mut fonts = FontCatalog::new();
        for (index, text) in &frames {
            document.push_record(&serialize_text_frame(*index, text, &frame, &mut fonts));
        }
        let records = document.records();

        let write_error = match write_picture(&tex_path, &document.render()) {
            Ok(()) => {
                log::info!("wrote {} record(s) to {}", records, tex_path.display());
                None
            }
            Err(err) => {
                log::error!("could not write {}: {}", tex_path.display(), err);
                Some(err.to_string())
            }
        };

        let saved_formats = save_graphics(host, &drawing_path, options, &mut attempted_save)?;

        Ok(ExportSummary {
            records,
            skipped,
            tex_path: tex_path.clone(),
            fonts: fonts.finalize(),
            write_error,
            saved_formats,
        })
    });

    if attempted_save {
        log::info!("saving document back to {}", drawing_path.display());
        if let Err(err) = host.save_as(&drawing_path, &SaveFormat::Native) {
            return match outcome {
                Ok(_) => Err(err),
                Err(first) => {
                    log::error!("could not save document back after failure: {}", err);
                    Err(first)
                }
            };
        }
    }

    outcome
}

/// Hides `layer`, runs `stage`, then sets the layer back to `restore_to`
/// whatever `stage` returned.
///
/// An error from `stage` takes precedence over an error from restoring.
fn with_layer_hidden<H, T, F>(
    host: &mut H,
    layer: &str,
    restore_to: bool,
    stage: F,
) -> Result<T, TexOverlayError>
where
    H: DocumentHost,
    F: FnOnce(&mut H) -> Result<T, TexOverlayError>,
{
    host.set_layer_visible(layer, false)?;
    let result = stage(host);
    let restored = host.set_layer_visible(layer, restore_to);

    match (result, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(restore_err)) => {
            log::error!("could not restore layer \"{}\": {}", layer, restore_err);
            Err(err)
        }
    }
}

/// Saves the drawing as EPS and then PDF, as enabled in `options`.
///
/// `attempted` is set as soon as one save is started, so the caller knows the
/// host may have switched the document over to the exported file.
fn save_graphics<H: DocumentHost>(
    host: &mut H,
    drawing_path: &Path,
    options: &ExportOptions,
    attempted: &mut bool,
) -> Result<Vec<&'static str>, TexOverlayError> {
    let targets = [
        (options.save_eps, SaveFormat::Eps(EpsSaveOptions::default())),
        (
            options.save_pdf,
            SaveFormat::Pdf(PdfSaveOptions {
                compatibility: options.pdf_compatibility,
                ..PdfSaveOptions::default()
            }),
        ),
    ];

    let mut saved = Vec::new();
    for (enabled, format) in targets {
        if !enabled {
            continue;
        }
        let path = match format.extension() {
            Some(ext) => drawing_path.with_extension(ext),
            None => drawing_path.to_path_buf(),
        };
        log::info!("saving {} as {}", path.display(), format.name());
        *attempted = true;
        host.save_as(&path, &format).map_err(|err| match err {
            err @ TexOverlayError::Export { .. } => err,
            other => TexOverlayError::Export {
                format: format.name(),
                message: other.to_string(),
            },
        })?;
        saved.push(format.name());
    }
    Ok(saved)
}

/// Writes the picture as UTF-8. The file is closed on every path out.
fn write_picture(path: &Path, text: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

/// The picture path for a drawing: same directory and stem, `.tex` extension.
pub fn tex_path_for(drawing_path: &Path) -> PathBuf {
    if drawing_path.extension().is_some() {
        return drawing_path.with_extension("tex");
    }
    log::warn!(
        "{} has no extension to replace; appending .tex",
        drawing_path.display()
    );
    let mut name = OsString::from(drawing_path.as_os_str());
    name.push(".tex");
    PathBuf::from(name)
}

/// The name the picture uses to include the exported graphic: the document
/// name without its extension.
fn graphics_name_for(document_name: &str) -> String {
    Path::new(document_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| document_name.to_string())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BBox, Coord, Drawing, Layer, TextKind};

    fn drawing(dir: &Path) -> Drawing {
        Drawing::new(
            "figure.ai",
            dir.join("figure.ai"),
            BBox::from_ltrb(0.0, 100.0, 50.0, 0.0),
        )
        .with_layer(Layer::new("Graphics"))
        .with_layer(
            Layer::new("Text")
                .with_frame(TextFrame::point(
                    Coord::new(60.0, 10.0),
                    "Times",
                    10.0,
                    "right of the art",
                ))
                .with_frame(TextFrame::point(
                    Coord::new(5.0, 5.0),
                    "Arial",
                    8.0,
                    "",
                ))
                .with_frame(
                    TextFrame::point(Coord::new(5.0, 5.0), "Arial", 8.0, "area")
                        .with_kind(TextKind::Area),
                )
                .with_frame(TextFrame::point(
                    Coord::new(20.0, 50.0),
                    "Arial",
                    8.0,
                    "inside",
                )),
        )
    }

    #[test]
    fn exports_eligible_frames_and_restores_visibility() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut host = SnapshotHost::new(drawing(temp.path()));

        let summary = export_document(&mut host, &ExportOptions::default()).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.fonts, vec!["Arial", "Times"]);
        assert_eq!(summary.tex_path, temp.path().join("figure.tex"));
        assert!(summary.write_error.is_none());
        assert!(summary.saved_formats.is_empty());
        assert_eq!(host.layer_visible("Text"), Some(true));
        assert!(host.saves().is_empty());

        let text = std::fs::read_to_string(&summary.tex_path).unwrap();
        assert!(text.contains("\\begin{picture}(60,100)"));
        assert!(text.contains("% Item # 0: 'right of the art'"));
        assert!(text.contains("\\put(60,10){"));
        assert!(text.contains("% Item # 3: 'inside'"));
        assert!(!text.contains("Item # 1"));
    }

    #[test]
    fn precondition_failures_leave_document_alone() {
        let temp = tempfile::tempdir().expect("create temp dir");

        let mut host = SnapshotHost::empty();
        assert!(matches!(
            export_document(&mut host, &ExportOptions::default()),
            Err(TexOverlayError::NoDocument)
        ));

        let mut host = SnapshotHost::new(drawing(temp.path()));
        let opts = ExportOptions {
            layer: "Labels".into(),
            ..Default::default()
        };
        let err = export_document(&mut host, &opts).unwrap_err();
        assert!(err.is_precondition());
        assert!(host.is_saved());

        let mut host = SnapshotHost::new(drawing(temp.path()));
        let opts = ExportOptions {
            layer: "Graphics".into(),
            ..Default::default()
        };
        assert!(matches!(
            export_document(&mut host, &opts),
            Err(TexOverlayError::EmptyLayer(name)) if name == "Graphics"
        ));
        assert!(host.is_saved());
        assert!(!temp.path().join("figure.tex").exists());
    }

    #[test]
    fn write_failure_is_reported_not_fatal() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut host = SnapshotHost::new(drawing(temp.path()));
        let opts = ExportOptions {
            output: Some(temp.path().join("missing-dir").join("figure.tex")),
            ..Default::default()
        };

        let summary = export_document(&mut host, &opts).unwrap();
        assert!(summary.write_error.is_some());
        assert_eq!(summary.records, 2);
        assert_eq!(host.layer_visible("Text"), Some(true));
        assert!(summary.to_string().starts_with("Error writing file"));
    }

    #[test]
    fn failed_graphics_save_still_restores_and_resaves() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let artwork = temp.path().join("figure.ai");
        let snapshot = temp.path().join("figure.json");
        std::fs::write(&artwork, "%!PS-Adobe artwork").expect("write artwork");
        crate::ir::io_json::write_drawing_json(&snapshot, &drawing(temp.path())).unwrap();
        let mut host = SnapshotHost::open(&snapshot).unwrap();
        let opts = ExportOptions {
            save_pdf: true,
            ..Default::default()
        };

        let err = export_document(&mut host, &opts).unwrap_err();
        assert!(matches!(err, TexOverlayError::Export { format: "PDF", .. }));
        assert_eq!(host.layer_visible("Text"), Some(true));
        assert_eq!(host.saves(), &[snapshot]);
        assert!(temp.path().join("figure.tex").exists());
        assert_eq!(
            std::fs::read_to_string(&artwork).unwrap(),
            "%!PS-Adobe artwork"
        );
    }

    #[test]
    fn failed_resave_keeps_the_export_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut host = SnapshotHost::new(drawing(temp.path()));
        let opts = ExportOptions {
            save_eps: true,
            ..Default::default()
        };

        let err = export_document(&mut host, &opts).unwrap_err();
        assert!(matches!(err, TexOverlayError::Export { format: "EPS", .. }));
        assert_eq!(host.layer_visible("Text"), Some(true));
        assert!(host.saves().is_empty());
        assert!(!temp.path().join("figure.ai").exists());
    }

    #[test]
    fn summary_lists_fonts_one_per_line() {
        let summary = ExportSummary {
            records: 3,
            tex_path: PathBuf::from("figure.tex"),
            fonts: vec!["Arial".into(), "Times".into()],
            ..Default::default()
        };
        assert_eq!(
            summary.to_string(),
            "Exported 3 text frames to figure.tex\nUsing Fonts:\n    Arial\n    Times\n"
        );
    }

    #[test]
    fn tex_path_replaces_or_appends_extension() {
        assert_eq!(
            tex_path_for(Path::new("/work/figure.ai")),
            PathBuf::from("/work/figure.tex")
        );
        assert_eq!(
            tex_path_for(Path::new("/work/figure")),
            PathBuf::from("/work/figure.tex")
        );
        assert_eq!(
            tex_path_for(Path::new("/work/fig.v2.ai")),
            PathBuf::from("/work/fig.v2.tex")
        );
    }

    #[test]
    fn graphics_name_strips_extension() {
        assert_eq!(graphics_name_for("figure.ai"), "figure");
        assert_eq!(graphics_name_for("figure"), "figure");
    }
}
