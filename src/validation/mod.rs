//! Preflight checks for drawings.
//!
//! This module looks for the problems that make an export fail or typeset
//! badly, without touching the document:
//! - Structure (text layer present, something to export)
//! - Content (characters TeX will not accept as-is)
//! - Geometry and style (transforms that are not rotations, bad fonts)

mod report;

pub use report::{CheckIssue, CheckReport, IssueCode, IssueContext, Severity};

use crate::ir::{Drawing, TextFrame, TextKind};

/// Column length and orthogonality tolerance for a transform to count as a
/// rotation. Hosts round matrix entries to about four decimals.
const ROTATION_TOLERANCE: f64 = 1e-3;

const TYPOGRAPHER_QUOTES: [char; 4] = ['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Options for check behavior.
#[derive(Clone, Debug)]
pub struct CheckOptions {
    /// Name of the layer holding the text.
    pub layer: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            layer: crate::config::DEFAULT_TEXT_LAYER.to_string(),
        }
    }
}

/// Checks a drawing and returns a report of all issues found.
pub fn check_drawing(drawing: &Drawing, opts: &CheckOptions) -> CheckReport {
    let mut report = CheckReport::new();

    let bounds = drawing.graphical_bounds;
    if !bounds.is_finite() || !bounds.is_ordered() {
        report.add(CheckIssue::warning(
            IssueCode::InvalidGraphicalBounds,
            format!("Graphical bounds {} are inverted or not finite", bounds),
            IssueContext::Document,
        ));
    }

    let Some(layer) = drawing.layer(&opts.layer) else {
        report.add(CheckIssue::error(
            IssueCode::MissingTextLayer,
            format!("Could not find layer named \"{}\"", opts.layer),
            IssueContext::Document,
        ));
        return report;
    };

    for (index, frame) in layer.text_frames.iter().enumerate() {
        let context = || IssueContext::Frame {
            layer: layer.name.clone(),
            index,
        };

        if frame.kind != TextKind::Point {
            report.add(CheckIssue::warning(
                IssueCode::SkippedNonPointText,
                format!("{:?} text is not exported; convert it to point text", frame.kind),
                context(),
            ));
            continue;
        }
        if frame.contents.is_empty() {
            report.add(CheckIssue::warning(
                IssueCode::SkippedEmptyText,
                "Empty text frame is not exported",
                context(),
            ));
            continue;
        }

        report.exportable += 1;
        check_frame(frame, &context, &mut report);
    }

    if report.exportable == 0 {
        report.add(CheckIssue::error(
            IssueCode::NoExportableText,
            format!("\"{}\" layer has no point text to export", layer.name),
            IssueContext::Layer {
                name: layer.name.clone(),
            },
        ));
    }

    report
}

/// Checks one exportable frame.
fn check_frame(
    frame: &TextFrame,
    context: &dyn Fn() -> IssueContext,
    report: &mut CheckReport,
) {
    if !frame.anchor.is_finite() {
        report.add(CheckIssue::error(
            IssueCode::AnchorNotFinite,
            format!("Non-finite anchor ({}, {})", frame.anchor.x, frame.anchor.y),
            context(),
        ));
    }

    if !frame.matrix.is_orthonormal(ROTATION_TOLERANCE) {
        let m = frame.matrix;
        report.add(CheckIssue::error(
            IssueCode::NonRotationTransform,
            format!(
                "Transform [{} {} {} {}] scales or shears the text; only rotation is exported",
                m.a, m.b, m.c, m.d
            ),
            context(),
        ));
    }

    if frame.font_name.trim().is_empty() {
        report.add(CheckIssue::error(
            IssueCode::MissingFontName,
            "No font name",
            context(),
        ));
    }

    if !(frame.font_size.is_finite() && frame.font_size > 0.0) {
        report.add(CheckIssue::error(
            IssueCode::InvalidFontSize,
            format!("Invalid font size {} (must be positive)", frame.font_size),
            context(),
        ));
    }

    if frame.contents.contains(TYPOGRAPHER_QUOTES) {
        report.add(CheckIssue::warning(
            IssueCode::TypographerQuotes,
            "Curly quotes found; turn off typographer's quotes in the host",
            context(),
        ));
    }

    let mut foreign: Vec<char> = frame
        .contents
        .chars()
        .filter(|c| !c.is_ascii() && !TYPOGRAPHER_QUOTES.contains(c))
        .collect();
    if !foreign.is_empty() {
        foreign.sort_unstable();
        foreign.dedup();
        let listed: String = foreign.into_iter().collect();
        report.add(CheckIssue::warning(
            IssueCode::NonAsciiText,
            format!("Non-ASCII characters '{}' need XeLaTeX or LuaLaTeX", listed),
            context(),
        ));
    }
}
