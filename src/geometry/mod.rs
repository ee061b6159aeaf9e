//! Geometry and styling helpers for text records.
//!
//! Everything here is a pure function of its arguments: extending the
//! drawing's bounds with text anchors, turning a linear map into a rotation
//! wrapper, and translating color, justification and line breaks into the
//! picture macros.

mod rotation;

pub use rotation::{extract_rotation, Rotation};

use crate::ir::{BBox, Coord, FillColor, Justification};

/// Line-break marker inside host text contents.
pub const LINE_BREAK: char = '\r';

/// Explicit line break in the picture output.
pub const TEX_LINE_BREAK: &str = "\\\\";

/// Grows `initial` so that it also encloses every point in `anchors`.
///
/// Left/right follow min/max of x and bottom/top follow min/max of y. The
/// result always contains `initial`, and merging the same points into the
/// result again changes nothing.
pub fn merge_extent<TSpace, I>(anchors: I, initial: BBox<TSpace>) -> BBox<TSpace>
where
    I: IntoIterator<Item = Coord<TSpace>>,
{
    anchors
        .into_iter()
        .fold(initial, |bbox, anchor| bbox.including(anchor))
}

/// Returns the color command for a fill, or an empty string.
///
/// Only RGB fills with at least one non-zero channel produce `\AIcolor`.
/// Black, no fill, and color models that are not translated are left to the
/// document default.
pub fn resolve_color(color: &FillColor) -> String {
    match *color {
        FillColor::Rgb { red, green, blue } if red > 0.0 || green > 0.0 || blue > 0.0 => {
            format!(
                "\\AIcolor{{{}}}{{{}}}{{{}}}",
                red / 255.0,
                green / 255.0,
                blue / 255.0
            )
        }
        _ => String::new(),
    }
}

/// Maps a justification to the horizontal part of a `\makebox` position.
///
/// An empty token centers the box horizontally.
pub fn justification_token(justification: Justification) -> &'static str {
    match justification {
        Justification::Left => "l",
        Justification::Right => "r",
        Justification::Center | Justification::FullJustify => "",
    }
}

/// Joins the lines of `text` with the picture's explicit line break.
///
/// Carriage returns separate lines. A CRLF pair or a lone LF also counts as
/// a single break, since snapshots edited by hand tend to contain them.
pub fn merge_multiline(text: &str) -> String {
    if !text.contains([LINE_BREAK, '\n']) {
        return text.to_string();
    }
    text.replace("\r\n", "\r")
        .split([LINE_BREAK, '\n'])
        .collect::<Vec<_>>()
        .join(TEX_LINE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::DrawingSpace;

    #[test]
    fn merge_extent_grows_to_outlying_anchor() {
        let graphics: BBox<DrawingSpace> = BBox::from_ltrb(0.0, 100.0, 50.0, 0.0);
        let merged = merge_extent([Coord::new(60.0, 10.0)], graphics);
        assert_eq!(merged.to_ltrb(), [0.0, 100.0, 60.0, 0.0]);
    }

    #[test]
    fn merge_extent_is_idempotent() {
        let graphics: BBox<DrawingSpace> = BBox::from_ltrb(0.0, 100.0, 50.0, 0.0);
        let anchors = [
            Coord::new(-5.0, 10.0),
            Coord::new(60.0, 120.0),
            Coord::new(20.0, -3.0),
        ];
        let once = merge_extent(anchors, graphics);
        let twice = merge_extent(anchors, once);
        assert_eq!(once, twice);
        assert!(once.contains(&graphics));
    }

    #[test]
    fn merge_extent_without_anchors_is_a_noop() {
        let graphics: BBox<DrawingSpace> = BBox::from_ltrb(1.0, 2.0, 3.0, 0.5);
        assert_eq!(merge_extent(std::iter::empty(), graphics), graphics);
    }

    #[test]
    fn resolve_color_skips_black_and_unset() {
        assert_eq!(resolve_color(&FillColor::rgb(0.0, 0.0, 0.0)), "");
        assert_eq!(resolve_color(&FillColor::None), "");
        assert_eq!(resolve_color(&FillColor::Unsupported), "");
    }

    #[test]
    fn resolve_color_normalizes_channels() {
        assert_eq!(
            resolve_color(&FillColor::rgb(255.0, 0.0, 0.0)),
            "\\AIcolor{1}{0}{0}"
        );
        assert_eq!(
            resolve_color(&FillColor::rgb(0.0, 51.0, 127.5)),
            "\\AIcolor{0}{0.2}{0.5}"
        );
    }

    #[test]
    fn justification_tokens() {
        assert_eq!(justification_token(Justification::Left), "l");
        assert_eq!(justification_token(Justification::Right), "r");
        assert_eq!(justification_token(Justification::Center), "");
        assert_eq!(justification_token(Justification::FullJustify), "");
    }

    #[test]
    fn merge_multiline_joins_with_tex_break() {
        assert_eq!(merge_multiline("A\rB"), "A\\\\B");
        assert_eq!(merge_multiline("A\rB\rC"), "A\\\\B\\\\C");
        assert_eq!(merge_multiline("A\r\nB"), "A\\\\B");
        assert_eq!(merge_multiline("A\nB"), "A\\\\B");
    }

    #[test]
    fn merge_multiline_leaves_single_line_alone() {
        assert_eq!(merge_multiline("single line"), "single line");
        assert_eq!(merge_multiline(""), "");
    }
}
