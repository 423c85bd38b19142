//! Geometry of the scanning overlay drawn on top of the preview.
//!
//! Everything here is positioning math; painting is left to the renderer.
//!
//! ```text
//!      ┌───────────── view ─────────────┐
//!      │          ╭─────────╮           │
//!      │        ╭─┘  ┌─  ─┐ └─╮         │  circle: the scan guide
//!      │        │    face     │         │  brackets: CornerBrackets
//!      │        ╰─╮  └─  ─┘ ╭─╯         │  ─── : scan line sweeping
//!      │          ╰─────────╯           │        top ↔ bottom
//!      │            caption             │
//!      └────────────────────────────────┘
//! ```

use crate::affine::AffineTransform;
use crate::detection::ViewFace;
use crate::geometry::{Point, Rect, Size};

/// Length of each arm of a face corner bracket, in view pixels.
pub const CORNER_ARM: f32 = 20.0;

/// Gap between the guide's cut-out and its outline ring.
pub const RING_GAP: f32 = 10.0;

/// Distance from the bottom of the guide to the caption baseline.
pub const CAPTION_OFFSET: f32 = 150.0;

/// ARGB color, channel order as the platform packs it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Unpack `0xAARRGGBB`.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Placement and style of the circular scan guide.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideOptions {
    pub radius: f32,
    /// Center the circle horizontally instead of using `margin_left`.
    pub center_horizontal: bool,
    /// Center the circle vertically instead of using `margin_top`.
    pub center_vertical: bool,
    pub margin_top: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    /// Outline ring color.
    pub ring_color: Color,
    /// One top-to-bottom pass of the scan line.
    pub sweep_duration_ms: u32,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            radius: 270.0,
            center_horizontal: false,
            center_vertical: false,
            margin_top: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            ring_color: Color::rgb(0x00, 0x8E, 0xD6),
            sweep_duration_ms: 1200,
        }
    }
}

/// The scan guide laid out in a particular view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScanGuide {
    pub center: Point,
    pub radius: f32,
}

impl ScanGuide {
    /// Place the guide. Recompute when the view size changes.
    pub fn layout(options: &GuideOptions, view: Size) -> Self {
        let r = options.radius;
        let cx = if options.center_horizontal {
            view.width as f32 / 2.0
        } else {
            options.margin_left + r
        };
        let cy = if options.center_vertical {
            view.height as f32 / 2.0
        } else {
            options.margin_top + r
        };
        Self {
            center: Point::new(cx, cy),
            radius: r,
        }
    }

    /// Radius of the outline ring drawn around the cut-out.
    pub fn ring_radius(&self) -> f32 {
        self.radius + RING_GAP
    }

    /// Bounding square of the guide circle.
    pub fn bounds(&self) -> Rect {
        let r = self.radius;
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    /// At least half of the face is inside the guide: its center is within
    /// one radius of the guide's center.
    pub fn contains_face(&self, face: &Rect) -> bool {
        self.center.distance(face.center()) <= self.radius
    }

    /// Whether to show the "hold still" hint for a frame. The last face
    /// reported in the frame decides.
    pub fn hint_visible(&self, faces: &[ViewFace]) -> bool {
        faces
            .last()
            .is_some_and(|face| self.contains_face(&face.bounds))
    }

    /// Vertical extent the scan line sweeps through.
    pub fn sweep_range(&self) -> (f32, f32) {
        (self.center.y - self.radius, self.center.y + self.radius)
    }

    /// Scan-line image transform when no sweep is running.
    pub fn scan_line_rest(&self) -> AffineTransform {
        AffineTransform::translate(self.center.x, self.center.y - self.radius).pre_scale(1.0, -1.0)
    }

    /// Scan-line image transform at `progress` (0 = top, 1 = bottom).
    ///
    /// The image is a `2r × 2r` square flipped vertically, anchored at the
    /// guide's left edge.
    pub fn scan_line_at(&self, progress: f32) -> AffineTransform {
        let (top, bottom) = self.sweep_range();
        let y = top + (bottom - top) * progress.clamp(0.0, 1.0);
        AffineTransform::translate(self.center.x - self.radius, y).pre_scale(1.0, -1.0)
    }

    /// Side of the square the scan-line image is scaled to.
    pub fn scan_line_extent(&self) -> f32 {
        self.radius * 2.0
    }

    /// Anchor (horizontally centered baseline) for the caption below the guide.
    pub fn caption_anchor(&self) -> Point {
        Point::new(self.center.x, self.center.y + self.radius + CAPTION_OFFSET)
    }

    /// Anchor for the "hold still" hint inside the guide.
    pub fn hint_anchor(&self) -> Point {
        Point::new(self.center.x, self.center.y - self.radius / 2.0)
    }
}

/// Progress of a sweep that repeats forever and reverses at each end.
///
/// Returns 0 at the start, 1 after one `duration_ms`, back to 0 after two.
pub fn sweep_progress(elapsed_ms: u64, duration_ms: u32) -> f32 {
    if duration_ms == 0 {
        return 0.0;
    }
    let duration = duration_ms as u64;
    let pass = elapsed_ms / duration;
    let phase = (elapsed_ms % duration) as f32 / duration as f32;
    if pass % 2 == 0 { phase } else { 1.0 - phase }
}

/// The four L-shaped strokes marking a face's corners.
///
/// Each stroke is a three-point polyline: arm end, corner, other arm end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CornerBrackets {
    pub top_left: [Point; 3],
    pub top_right: [Point; 3],
    pub bottom_left: [Point; 3],
    pub bottom_right: [Point; 3],
}

impl CornerBrackets {
    pub fn around(rect: Rect, arm: f32) -> Self {
        let Rect {
            left,
            top,
            right,
            bottom,
        } = rect;
        Self {
            top_left: [
                Point::new(left + arm, top),
                Point::new(left, top),
                Point::new(left, top + arm),
            ],
            top_right: [
                Point::new(right - arm, top),
                Point::new(right, top),
                Point::new(right, top + arm),
            ],
            bottom_left: [
                Point::new(left + arm, bottom),
                Point::new(left, bottom),
                Point::new(left, bottom - arm),
            ],
            bottom_right: [
                Point::new(right - arm, bottom),
                Point::new(right, bottom),
                Point::new(right, bottom - arm),
            ],
        }
    }

    /// All strokes, clockwise from top-left.
    pub fn strokes(&self) -> [[Point; 3]; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}
