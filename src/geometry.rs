//! Value types shared by every transform: sizes, rectangles, points.

use num_traits::Float;

/// Width × height dimensions in pixels.
///
/// Used for candidate stream resolutions, the chosen preview size,
/// the sensor active array and the on-screen view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel count, widened so large sensor arrays cannot overflow.
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width and height exchanged.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Exact aspect-ratio equality via cross-multiplication.
    ///
    /// `self.width / self.height == other.width / other.height` without
    /// going through floating point.
    pub const fn same_aspect(self, other: Size) -> bool {
        self.width as u64 * other.height as u64 == self.height as u64 * other.width as u64
    }

    /// `width / height` as a float, for diagnostics.
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl core::fmt::Display for Size {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A point in sensor or view coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        Float::sqrt(dx * dx + dy * dy)
    }
}

/// Axis-aligned rectangle stored as edges.
///
/// Only the constructors ([`Rect::new`], [`Rect::from_size`],
/// [`Rect::bounding`]) guarantee `right >= left` and `bottom >= top`. The
/// fields are public, so a rect written by hand may be inverted: its
/// `width`/`height` go negative and [`is_empty`](Rect::is_empty) reports
/// true. Mapping through [`AffineTransform::map_rect`] sorts it again.
///
/// [`AffineTransform::map_rect`]: crate::affine::AffineTransform::map_rect
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rect from its edges, sorting each axis.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// `(0, 0, size.width, size.height)`.
    pub fn from_size(size: Size) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: size.width as f32,
            bottom: size.height as f32,
        }
    }

    /// Smallest rect containing every point.
    ///
    /// Returns the empty rect at the origin for an empty slice.
    pub fn bounding(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };
        let mut r = Self {
            left: first.x,
            top: first.y,
            right: first.x,
            bottom: first.y,
        };
        for p in rest {
            r.left = r.left.min(p.x);
            r.top = r.top.min(p.y);
            r.right = r.right.max(p.x);
            r.bottom = r.bottom.max(p.y);
        }
        r
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center x.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    /// Center y.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Whether the rect has no area.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}
