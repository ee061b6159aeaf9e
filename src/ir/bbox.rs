//! Axis-aligned bounding boxes in the host's left/top/right/bottom order.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// An axis-aligned bounding box.
///
/// Stored as two corners, `min` = (left, bottom) and `max` = (right, top),
/// since drawing coordinates grow upward. On the wire (JSON snapshots and the
/// diagnostic comments of the picture header) the box is written in the
/// host's `[left, top, right, bottom]` order.
///
/// Note: This type does NOT enforce that min <= max in the constructor.
/// A host may report an inverted box for an empty document; [`Self::is_ordered`]
/// lets callers detect that instead of panicking on it.
pub struct BBox<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBox<TSpace> {
    /// Creates a new bounding box from min and max corners.
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box from the host's `[left, top, right, bottom]` order.
    #[inline]
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            min: Coord::new(left, bottom),
            max: Coord::new(right, top),
        }
    }

    /// Returns the box as `[left, top, right, bottom]`.
    #[inline]
    pub fn to_ltrb(&self) -> [f64; 4] {
        [self.left(), self.top(), self.right(), self.bottom()]
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.max.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.min.y
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is inverted (right < left).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is inverted (top < bottom).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box is properly ordered (left <= right, bottom <= top).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Returns a copy of the box grown so that it also encloses `point`.
    ///
    /// Only ever expands: a point already inside leaves the box unchanged.
    #[inline]
    pub fn including(&self, point: Coord<TSpace>) -> Self {
        Self::from_ltrb(
            self.left().min(point.x),
            self.top().max(point.y),
            self.right().max(point.x),
            self.bottom().min(point.y),
        )
    }

    /// Returns true if `point` lies inside or on the border of the box.
    #[inline]
    pub fn contains_point(&self, point: Coord<TSpace>) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Returns true if `other` lies entirely inside this box.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }
}

impl<TSpace> Clone for BBox<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for BBox<TSpace> {}

impl<TSpace> PartialEq for BBox<TSpace> {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl<TSpace> std::fmt::Debug for BBox<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("left", &self.left())
            .field("top", &self.top())
            .field("right", &self.right())
            .field("bottom", &self.bottom())
            .finish()
    }
}

/// Formats as `left,top,right,bottom`.
impl<TSpace> std::fmt::Display for BBox<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left(),
            self.top(),
            self.right(),
            self.bottom()
        )
    }
}

impl<TSpace> Default for BBox<TSpace> {
    fn default() -> Self {
        Self::from_ltrb(0.0, 0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for BBox<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_ltrb().serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for BBox<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [left, top, right, bottom] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBox::from_ltrb(left, top, right, bottom))
    }
}
