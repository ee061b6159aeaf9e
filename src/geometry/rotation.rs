//! Rotation angle extraction from a text frame's linear map.

use crate::ir::LinearMap;

/// Macro that rotates its second argument by the angle in its first.
const ROTATE_MACRO: &str = "\\AIrotate";

/// The rotation wrapper for one text record.
///
/// `prefix` and `suffix` go around the record's `\makebox`. Both are empty
/// for unrotated text, so nothing is emitted in the common case.
#[derive(Clone, Debug, PartialEq)]
pub struct Rotation {
    pub prefix: String,
    pub suffix: String,
    /// Counter-clockwise angle in degrees, in `[0, 360)`.
    pub angle_degrees: f64,
}

impl Rotation {
    /// No rotation: empty wrapper, angle 0.
    pub fn none() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            angle_degrees: 0.0,
        }
    }

    /// A wrapper rotating by `angle_degrees`.
    pub fn by(angle_degrees: f64) -> Self {
        Self {
            prefix: format!("{ROTATE_MACRO}{{{angle_degrees}}}{{"),
            suffix: "}".to_string(),
            angle_degrees,
        }
    }

    /// Returns true if no wrapper is emitted.
    pub fn is_identity(&self) -> bool {
        self.prefix.is_empty()
    }
}

/// Extracts the rotation angle of `matrix` from its first basis vector.
///
/// Right angles are matched exactly so they print as `90`, `180` and `270`
/// rather than as the nearest floating point result. Every other vector is
/// normalized to unit length and turned into an angle with `asin`, then
/// moved into the quadrant given by the sign of x.
///
/// Only the direction of the first column is used. A uniformly scaled
/// rotation yields the right angle; a shear does not, which the preflight
/// check reports. A zero or non-finite vector has no direction and is
/// treated as unrotated.
pub fn extract_rotation(matrix: &LinearMap) -> Rotation {
    let (raw_x, raw_y) = matrix.first_column();
    let length = raw_x.hypot(raw_y);
    if length == 0.0 || !length.is_finite() {
        return Rotation::none();
    }
    let x = raw_x / length;
    let y = raw_y / length;

    if x == 1.0 && y == 0.0 {
        return Rotation::none();
    }
    if x == 0.0 && y == 1.0 {
        return Rotation::by(90.0);
    }
    if x == -1.0 && y == 0.0 {
        return Rotation::by(180.0);
    }
    if x == 0.0 && y == -1.0 {
        return Rotation::by(270.0);
    }

    let angle = y.clamp(-1.0, 1.0).asin().to_degrees();
    let angle = if angle > 0.0 && x < 0.0 {
        180.0 - angle
    } else if angle < 0.0 && x > 0.0 {
        360.0 + angle
    } else if angle < 0.0 && x < 0.0 {
        180.0 - angle
    } else {
        angle
    };

    // 360 + a tiny negative angle rounds to 360, which is no rotation.
    if angle >= 360.0 {
        return Rotation::none();
    }
    Rotation::by(angle)
}
