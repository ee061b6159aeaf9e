//! LaTeX picture output: the merged frame, one record per text frame, and
//! the surrounding document.
//!
//! The picture is measured in big points (`\unitlength` = 1bp), the unit the
//! drawing already uses, so coordinates are only translated, never scaled.
//! The macros it emits (`\AIsetfont`, `\AIfontsize`, `\AIcolor`, `\AIrotate`,
//! `\AIdebugspot`, `\AIprefix`, `\AIsuffix`) are defined by the including
//! document.

use std::fmt::Write as _;

use crate::fonts::FontCatalog;
use crate::geometry::{
    extract_rotation, justification_token, merge_extent, merge_multiline, resolve_color,
};
use crate::ir::{BBox, Coord, DrawingSpace, PictureSpace, TextFrame};

/// The coordinate frame of the picture.
///
/// `merged` is the drawing's graphical bounds grown to enclose every exported
/// anchor. Its bottom-left corner becomes picture (0, 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PictureFrame {
    pub graphical: BBox<DrawingSpace>,
    pub merged: BBox<DrawingSpace>,
    pub ruler_origin: Coord<DrawingSpace>,
}

impl PictureFrame {
    /// Computes the merged frame from the graphics-only bounds and the anchors
    /// of the frames that will be exported.
    pub fn new<I>(
        graphical: BBox<DrawingSpace>,
        anchors: I,
        ruler_origin: Coord<DrawingSpace>,
    ) -> Self
    where
        I: IntoIterator<Item = Coord<DrawingSpace>>,
    {
        Self {
            graphical,
            merged: merge_extent(anchors, graphical),
            ruler_origin,
        }
    }

    pub fn width(&self) -> f64 {
        self.merged.width()
    }

    pub fn height(&self) -> f64 {
        self.merged.height()
    }

    /// Re-projects a drawing point into picture coordinates.
    pub fn project(&self, point: Coord<DrawingSpace>) -> Coord<PictureSpace> {
        Coord::new(
            unsigned_zero(point.x - self.merged.left()),
            unsigned_zero(point.y - self.merged.bottom()),
        )
    }

    /// Where the exported graphic has to be put so that it lines up with the
    /// picture origin.
    ///
    /// pdfTeX places an included PDF by its MediaBox, whose origin is the
    /// ruler origin, not the artwork's corner.
    pub fn graphics_offset(&self) -> Coord<PictureSpace> {
        Coord::new(
            unsigned_zero(-self.merged.left() - self.ruler_origin.x),
            unsigned_zero(-self.merged.bottom() - self.ruler_origin.y),
        )
    }
}

/// Maps `-0.0` to `0.0` so it prints as `0`.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Renders one text frame as a picture record and records its font.
///
/// `index` is the frame's position on its layer and only appears in the
/// leading comment.
pub fn serialize_text_frame(
    index: usize,
    frame: &TextFrame,
    picture: &PictureFrame,
    fonts: &mut FontCatalog,
) -> String {
    let pos = picture.project(frame.anchor);
    let rotation = extract_rotation(&frame.matrix);
    let just = justification_token(frame.justification);
    let color = resolve_color(&frame.fill_color);
    let contents = merge_multiline(&frame.contents);

    fonts.record(frame.font_name.as_str());

    let mut record = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(record, "% Item # {index}: '{contents}'");
    let _ = writeln!(
        record,
        "\\put({x},{y}){{{pre}\\makebox(0,0)[{just}b]{{\\raisebox{{0pt}}[0pt][0pt]{{{{\\AIsetfont{{{font}}}\\AIfontsize{{{size}}}{color}{contents}}}}}}}{post}}}",
        x = pos.x,
        y = pos.y,
        pre = rotation.prefix,
        post = rotation.suffix,
        font = frame.font_name,
        size = frame.font_size,
    );
    let _ = writeln!(record, "\\AIdebugspot{{{}}}{{{}}}", pos.x, pos.y);
    record
}

/// Everything the picture header needs to know about the drawing.
#[derive(Clone, Debug)]
pub struct PictureHeader {
    /// Full path of the drawing, for the leading comment.
    pub source: String,
    /// File name of the generated picture.
    pub tex_name: String,
    /// Base name of the exported graphic, without extension.
    pub graphics_name: String,
    pub frame: PictureFrame,
    pub crop_box: Option<BBox<DrawingSpace>>,
    pub page_origin: Coord<DrawingSpace>,
}

/// A complete picture: header, records, footer.
#[derive(Clone, Debug)]
pub struct PictureDocument {
    header: PictureHeader,
    body: String,
    records: usize,
}

impl PictureDocument {
    pub fn new(header: PictureHeader) -> Self {
        Self {
            header,
            body: String::new(),
            records: 0,
        }
    }

    /// Appends one serialized record.
    pub fn push_record(&mut self, record: &str) {
        self.body.push_str(record);
        self.records += 1;
    }

    /// Number of records pushed so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Assembles the final text.
    pub fn render(&self) -> String {
        let h = &self.header;
        let frame = &h.frame;
        let offset = frame.graphics_offset();
        let crop = h
            .crop_box
            .map(|b| b.to_string())
            .unwrap_or_else(|| "none".to_string());

        let mut out = String::with_capacity(self.body.len() + 1024);
        let _ = writeln!(out, "% LaTeX picture environment");
        let _ = writeln!(out, "% converted from {}", h.source);
        let _ = writeln!(out, "% named {}", h.tex_name);
        let _ = writeln!(out, "%");
        let _ = writeln!(
            out,
            "\\setlength{{\\unitlength}}{{1bp}}% bp (\"big\" point) NOT pt!"
        );
        let _ = writeln!(
            out,
            "\\begin{{picture}}({},{})",
            frame.width(),
            frame.height()
        );
        let _ = writeln!(
            out,
            "% pdftex places the graphic by its MediaBox, not its ArtBox, so shift it explicitly:"
        );
        let _ = writeln!(out, "\\put({},{}){{%", offset.x, offset.y);
        let _ = writeln!(
            out,
            "    \\includegraphics{{\\AIprefix {}\\AIsuffix}}}}",
            h.graphics_name
        );
        let _ = writeln!(out, "% cropbox: {crop}");
        let _ = writeln!(out, "% graphical bbox: {}", frame.graphical);
        let _ = writeln!(out, "% complete bbox: {}", frame.merged);
        let _ = writeln!(out, "% page origin: {}", h.page_origin);
        let _ = writeln!(out, "% ruler origin: {}", frame.ruler_origin);
        out.push_str(&self.body);
        out.push_str("\\end{picture}%\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FillColor, Justification, LinearMap};

    fn sample_frame() -> PictureFrame {
        PictureFrame::new(
            BBox::from_ltrb(0.0, 100.0, 50.0, 0.0),
            [Coord::new(60.0, 10.0)],
            Coord::new(0.0, 0.0),
        )
    }

    #[test]
    fn frame_merges_anchor_into_graphics() {
        let frame = sample_frame();
        assert_eq!(frame.merged.right(), 60.0);
        assert_eq!(frame.width(), 60.0);
        assert_eq!(frame.height(), 100.0);
        let pos = frame.project(Coord::new(60.0, 10.0));
        assert_eq!((pos.x, pos.y), (60.0, 10.0));
    }

    #[test]
    fn graphics_offset_accounts_for_ruler_origin() {
        let frame = PictureFrame::new(
            BBox::from_ltrb(10.0, 200.0, 110.0, 20.0),
            std::iter::empty(),
            Coord::new(5.0, -3.0),
        );
        let offset = frame.graphics_offset();
        assert_eq!(offset.x, -15.0);
        assert_eq!(offset.y, -17.0);
    }

    #[test]
    fn serializes_plain_left_justified_record() {
        let picture = PictureFrame::new(
            BBox::from_ltrb(0.0, 100.0, 100.0, 0.0),
            std::iter::empty(),
            Coord::default(),
        );
        let frame = TextFrame::point(Coord::new(20.0, 30.0), "Helvetica", 12.0, "Label");
        let mut fonts = FontCatalog::new();

        let record = serialize_text_frame(0, &frame, &picture, &mut fonts);
        assert_eq!(
            record,
            "% Item # 0: 'Label'\n\
             \\put(20,30){\\makebox(0,0)[lb]{\\raisebox{0pt}[0pt][0pt]{{\\AIsetfont{Helvetica}\\AIfontsize{12}Label}}}}\n\
             \\AIdebugspot{20}{30}\n"
        );
        assert_eq!(fonts.finalize(), vec!["Helvetica"]);
    }

    #[test]
    fn serializes_rotated_colored_multiline_record() {
        let picture = PictureFrame::new(
            BBox::from_ltrb(-10.0, 100.0, 100.0, -5.0),
            std::iter::empty(),
            Coord::default(),
        );
        let frame = TextFrame::point(Coord::new(0.0, 0.0), "Times-Roman", 9.5, "a\rb")
            .with_justification(Justification::Center)
            .with_matrix(LinearMap {
                a: 0.0,
                b: 1.0,
                c: -1.0,
                d: 0.0,
            })
            .with_fill(FillColor::rgb(255.0, 0.0, 0.0));
        let mut fonts = FontCatalog::new();

        let record = serialize_text_frame(7, &frame, &picture, &mut fonts);
        assert_eq!(
            record,
            "% Item # 7: 'a\\\\b'\n\
             \\put(10,5){\\AIrotate{90}{\\makebox(0,0)[b]{\\raisebox{0pt}[0pt][0pt]{{\\AIsetfont{Times-Roman}\\AIfontsize{9.5}\\AIcolor{1}{0}{0}a\\\\b}}}}}\n\
             \\AIdebugspot{10}{5}\n"
        );
    }

    #[test]
    fn document_wraps_records_in_picture_environment() {
        let header = PictureHeader {
            source: "/work/figure.ai".to_string(),
            tex_name: "figure.tex".to_string(),
            graphics_name: "figure".to_string(),
            frame: sample_frame(),
            crop_box: None,
            page_origin: Coord::default(),
        };
        let mut document = PictureDocument::new(header);
        let mut fonts = FontCatalog::new();
        let frame = TextFrame::point(Coord::new(60.0, 10.0), "Helvetica", 12.0, "Label");
        document.push_record(&serialize_text_frame(0, &frame, &sample_frame(), &mut fonts));

        let text = document.render();
        assert_eq!(document.records(), 1);
        assert!(text.starts_with("% LaTeX picture environment\n"));
        assert!(text.contains("% converted from /work/figure.ai\n"));
        assert!(text.contains("\\setlength{\\unitlength}{1bp}"));
        assert!(text.contains("\\begin{picture}(60,100)\n"));
        assert!(text.contains("\\put(0,0){%\n    \\includegraphics{\\AIprefix figure\\AIsuffix}}\n"));
        assert!(text.contains("% graphical bbox: 0,100,50,0\n"));
        assert!(text.contains("% complete bbox: 0,100,60,0\n"));
        assert!(text.contains("% cropbox: none\n"));
        assert!(text.contains("\\put(60,10){\\makebox(0,0)[lb]"));
        assert!(text.ends_with("\\AIdebugspot{60}{10}\n\\end{picture}%\n"));
    }
}
