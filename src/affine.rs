//! 2×3 affine matrix with pre/post composition.
//!
//! Layout and composition order follow the usual canvas-matrix convention:
//!
//! ```text
//!     | sx  kx  tx |   | x |
//!     | ky  sy  ty | · | y |
//!     |  0   0   1 |   | 1 |
//! ```
//!
//! `post_*` operations apply *after* the current matrix (`M' = op · M`),
//! `pre_*` operations apply *before* it (`M' = M · op`). Chaining
//! `rotate(a).post_scale(..).post_translate(..)` therefore reads in the
//! order the operations hit a point.
//!
//! # Example
//!
//! ```
//! use scanframe::{AffineTransform, Point};
//!
//! let m = AffineTransform::rotate(90.0).post_translate(10.0, 0.0);
//! assert_eq!(m.map_point(Point::new(1.0, 0.0)), Point::new(10.0, 1.0));
//! ```

use num_traits::Float;

use crate::geometry::{Point, Rect};

/// Below this magnitude sine/cosine results snap to zero, so quarter-turn
/// rotations produce exact integer matrices.
const TRIG_SNAP: f64 = 1.0 / 4096.0;

/// Affine transform stored as the top two rows of a 3×3 matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineTransform {
    pub sx: f32,
    pub kx: f32,
    pub tx: f32,
    pub ky: f32,
    pub sy: f32,
    pub ty: f32,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    /// Pure translation.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Pure scale about the origin.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            sx,
            sy,
            ..Self::IDENTITY
        }
    }

    /// Scale about the pivot `(px, py)`.
    pub fn scale_about(sx: f32, sy: f32, px: f32, py: f32) -> Self {
        Self {
            sx,
            sy,
            tx: px - sx * px,
            ty: py - sy * py,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation (in a y-down frame) by `degrees` about the origin.
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        Self {
            sx: cos,
            kx: -sin,
            tx: 0.0,
            ky: sin,
            sy: cos,
            ty: 0.0,
        }
    }

    /// Rotation by `degrees` about the pivot `(px, py)`.
    pub fn rotate_about(degrees: f32, px: f32, py: f32) -> Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        Self {
            sx: cos,
            kx: -sin,
            tx: px - cos * px + sin * py,
            ky: sin,
            sy: cos,
            ty: py - sin * px - cos * py,
        }
    }

    /// Map `src` onto `dst`, scaling each axis independently.
    ///
    /// Returns `None` when `src` has no area.
    pub fn fill_rect_to_rect(src: Rect, dst: Rect) -> Option<Self> {
        if src.is_empty() {
            return None;
        }
        let sx = dst.width() / src.width();
        let sy = dst.height() / src.height();
        Some(Self {
            sx,
            kx: 0.0,
            tx: dst.left - src.left * sx,
            ky: 0.0,
            sy,
            ty: dst.top - src.top * sy,
        })
    }

    /// `self · other`: `other` is applied first.
    pub fn concat(self, other: Self) -> Self {
        Self {
            sx: self.sx * other.sx + self.kx * other.ky,
            kx: self.sx * other.kx + self.kx * other.sy,
            tx: self.sx * other.tx + self.kx * other.ty + self.tx,
            ky: self.ky * other.sx + self.sy * other.ky,
            sy: self.ky * other.kx + self.sy * other.sy,
            ty: self.ky * other.tx + self.sy * other.ty + self.ty,
        }
    }

    /// Apply `other` after this transform.
    pub fn post_concat(self, other: Self) -> Self {
        other.concat(self)
    }

    /// Apply `other` before this transform.
    pub fn pre_concat(self, other: Self) -> Self {
        self.concat(other)
    }

    pub fn post_translate(self, tx: f32, ty: f32) -> Self {
        self.post_concat(Self::translate(tx, ty))
    }

    pub fn post_scale(self, sx: f32, sy: f32) -> Self {
        self.post_concat(Self::scale(sx, sy))
    }

    pub fn post_scale_about(self, sx: f32, sy: f32, px: f32, py: f32) -> Self {
        self.post_concat(Self::scale_about(sx, sy, px, py))
    }

    pub fn post_rotate(self, degrees: f32) -> Self {
        self.post_concat(Self::rotate(degrees))
    }

    pub fn post_rotate_about(self, degrees: f32, px: f32, py: f32) -> Self {
        self.post_concat(Self::rotate_about(degrees, px, py))
    }

    pub fn pre_scale(self, sx: f32, sy: f32) -> Self {
        self.pre_concat(Self::scale(sx, sy))
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f32 {
        self.sx * self.sy - self.kx * self.ky
    }

    /// Whether the matrix has an inverse.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det != 0.0
    }

    /// The inverse transform, `None` when singular.
    pub fn invert(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        let inv = 1.0 / self.determinant();
        Some(Self {
            sx: self.sy * inv,
            kx: -self.kx * inv,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv,
            ky: -self.ky * inv,
            sy: self.sx * inv,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv,
        })
    }

    pub fn map_point(&self, p: Point) -> Point {
        Point::new(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// Map all four corners and return their bounding box.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|c| self.map_point(c));
        Rect::bounding(&corners)
    }

    /// Row-major `[sx, kx, tx, ky, sy, ty]`, the order canvas APIs take.
    pub fn to_array(&self) -> [f32; 6] {
        [self.sx, self.kx, self.tx, self.ky, self.sy, self.ty]
    }
}

/// Sine and cosine of an angle in degrees, snapped so that multiples of
/// 90° are exact.
fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let radians = Float::to_radians(degrees as f64);
    let (sin, cos) = Float::sin_cos(radians);
    (snap_to_zero(sin) as f32, snap_to_zero(cos) as f32)
}

fn snap_to_zero(v: f64) -> f64 {
    if Float::abs(v) <= TRIG_SNAP { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_close(a: AffineTransform, b: AffineTransform) {
        for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-4);
        }
    }

    #[test]
    fn quarter_turns_are_exact() {
        let r90 = AffineTransform::rotate(90.0);
        assert_eq!(r90.to_array(), [0.0, -1.0, 0.0, 1.0, 0.0, 0.0]);
        let r180 = AffineTransform::rotate(180.0);
        assert_eq!(r180.to_array(), [-1.0, 0.0, 0.0, 0.0, -1.0, 0.0]);
        let r270 = AffineTransform::rotate(270.0);
        assert_eq!(r270.to_array(), [0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
        assert_eq!(AffineTransform::rotate(-90.0), r270);
        assert!(AffineTransform::rotate(0.0).is_identity());
        assert!(AffineTransform::rotate(360.0).is_identity());
    }

    #[test]
    fn rotate_maps_x_axis_to_y_axis() {
        // y-down frame: +90 turns the x axis into the y axis
        let p = AffineTransform::rotate(90.0).map_point(Point::new(5.0, 0.0));
        assert_eq!(p, Point::new(0.0, 5.0));
    }

    #[test]
    fn post_operations_apply_in_call_order() {
        let m = AffineTransform::IDENTITY
            .post_scale(2.0, 3.0)
            .post_translate(10.0, 20.0);
        assert_eq!(m.map_point(Point::new(1.0, 1.0)), Point::new(12.0, 23.0));

        let m = AffineTransform::IDENTITY
            .post_translate(10.0, 20.0)
            .post_scale(2.0, 3.0);
        assert_eq!(m.map_point(Point::new(1.0, 1.0)), Point::new(22.0, 63.0));
    }

    #[test]
    fn pre_scale_applies_first() {
        let m = AffineTransform::translate(5.0, 7.0).pre_scale(1.0, -1.0);
        assert_eq!(m.map_point(Point::new(2.0, 3.0)), Point::new(7.0, 4.0));
    }

    #[test]
    fn pivots_stay_fixed() {
        let (px, py) = (40.0, 25.0);
        let pivot = Point::new(px, py);
        for deg in [0.0, 45.0, 90.0, 180.0, 270.0, -90.0] {
            let p = AffineTransform::rotate_about(deg, px, py).map_point(pivot);
            assert_relative_eq!(p.x, px, epsilon = 1e-4);
            assert_relative_eq!(p.y, py, epsilon = 1e-4);
        }
        let p = AffineTransform::scale_about(3.0, 0.5, px, py).map_point(pivot);
        assert_eq!(p, pivot);
    }

    #[test]
    fn rotate_about_matches_translate_rotate_translate() {
        let composed = AffineTransform::translate(-40.0, -25.0)
            .post_rotate(30.0)
            .post_translate(40.0, 25.0);
        assert_close(AffineTransform::rotate_about(30.0, 40.0, 25.0), composed);
    }

    #[test]
    fn fill_rect_to_rect_maps_edges() {
        let src = Rect::new(0.0, 0.0, 100.0, 50.0);
        let dst = Rect::new(10.0, 20.0, 210.0, 220.0);
        let m = AffineTransform::fill_rect_to_rect(src, dst).unwrap();
        assert_eq!(m.map_rect(src), dst);
        assert!(AffineTransform::fill_rect_to_rect(Rect::default(), dst).is_none());
    }

    #[test]
    fn invert_round_trips() {
        let m = AffineTransform::rotate(90.0)
            .post_scale(-0.5, 0.25)
            .post_translate(1080.0, 1440.0);
        let inv = m.invert().unwrap();
        assert_close(m.concat(inv), AffineTransform::IDENTITY);
        assert_close(inv.concat(m), AffineTransform::IDENTITY);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = AffineTransform::scale(0.0, 1.0);
        assert!(!m.is_invertible());
        assert!(m.invert().is_none());
        assert!(!AffineTransform::scale(f32::INFINITY, 1.0).is_invertible());
    }

    #[test]
    fn map_rect_sorts_after_mirror() {
        let m = AffineTransform::scale(-1.0, 1.0);
        let r = m.map_rect(Rect::new(10.0, 0.0, 30.0, 5.0));
        assert_eq!(r, Rect::new(-30.0, 0.0, -10.0, 5.0));
    }
}
