//! SVG rendering of one overlay frame, for debugging layouts.
//!
//! Draws the view, the fitted preview frame, the scan guide with its ring
//! and scan line, and corner brackets for every mapped face. The guide is
//! highlighted when the hint would show.
//!
//! # Example
//!
//! ```
//! use scanframe::overlay::{GuideOptions, ScanGuide};
//! use scanframe::svg::{OverlayFrame, render_overlay_svg};
//! use scanframe::{Rect, Size, ViewFace};
//!
//! let view = Size::new(1080, 1920);
//! let options = GuideOptions {
//!     center_horizontal: true,
//!     center_vertical: true,
//!     ..GuideOptions::default()
//! };
//! let faces = [ViewFace { bounds: Rect::new(440.0, 860.0, 640.0, 1060.0), score: 80 }];
//! let frame = OverlayFrame::new(view, ScanGuide::layout(&options, view), options.ring_color)
//!     .faces(&faces);
//!
//! let svg = render_overlay_svg(&frame);
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("guide hit"));
//! ```

use crate::detection::ViewFace;
use crate::geometry::{Point, Rect, Size};
use crate::overlay::{CORNER_ARM, Color, CornerBrackets, ScanGuide};

/// Everything visible in one rendered frame.
#[derive(Clone, Debug)]
pub struct OverlayFrame<'a> {
    pub view: Size,
    /// The preview buffer's outline after the preview transform.
    pub preview_frame: Option<Rect>,
    pub guide: ScanGuide,
    pub ring_color: Color,
    pub faces: &'a [ViewFace],
    /// Scan line position, 0 = top of the guide, 1 = bottom.
    pub scan_progress: Option<f32>,
    pub caption: Option<&'a str>,
}

impl<'a> OverlayFrame<'a> {
    pub fn new(view: Size, guide: ScanGuide, ring_color: Color) -> Self {
        Self {
            view,
            preview_frame: None,
            guide,
            ring_color,
            faces: &[],
            scan_progress: None,
            caption: None,
        }
    }

    pub fn preview_frame(mut self, frame: Rect) -> Self {
        self.preview_frame = Some(frame);
        self
    }

    pub fn faces(mut self, faces: &'a [ViewFace]) -> Self {
        self.faces = faces;
        self
    }

    pub fn scan_progress(mut self, progress: f32) -> Self {
        self.scan_progress = Some(progress);
        self
    }

    pub fn caption(mut self, caption: &'a str) -> Self {
        self.caption = Some(caption);
        self
    }
}

/// Render a complete SVG document for `frame`.
pub fn render_overlay_svg(frame: &OverlayFrame<'_>) -> String {
    let (w, h) = (frame.view.width, frame.view.height);
    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    ));
    svg.push('\n');

    // Light and dark palettes via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .view { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .preview { fill: none; stroke: #2c6faa; stroke-width: 2; stroke-dasharray: 8,4; }
  .guide { fill: #ffffff; fill-opacity: 0.3; stroke: none; }
  .guide.hit { fill: #7ed67e; fill-opacity: 0.4; }
  .scan { stroke: #008ed6; stroke-width: 3; }
  .face { fill: none; stroke: #ffffff; stroke-width: 4; }
  .score { font-size: 24px; fill: #ffffff; }
  .caption { font-size: 36px; fill: #333; }
  @media (prefers-color-scheme: dark) {
    .view { fill: #2d2d2d; stroke: #555; }
    .caption { fill: #e0e0e0; }
  }
</style>
"##,
    );

    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" class="view"/>"#
    ));
    svg.push('\n');

    if let Some(p) = frame.preview_frame {
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="preview"/>"#,
            p.left,
            p.top,
            p.width(),
            p.height()
        ));
        svg.push('\n');
    }

    let guide = &frame.guide;
    let class = if guide.hint_visible(frame.faces) {
        "guide hit"
    } else {
        "guide"
    };
    svg.push_str(&format!(
        r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" class="{class}"/>"#,
        guide.center.x, guide.center.y, guide.radius
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="{}" stroke-opacity="{:.3}" stroke-width="4" class="ring"/>"#,
        guide.center.x,
        guide.center.y,
        guide.ring_radius(),
        hex_rgb(frame.ring_color),
        frame.ring_color.a as f32 / 255.0
    ));
    svg.push('\n');

    if let Some(progress) = frame.scan_progress {
        // The flipped image's top edge lands on the translated origin.
        let origin = guide.scan_line_at(progress).map_point(Point::new(0.0, 0.0));
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" class="scan"/>"#,
            origin.x,
            origin.y,
            origin.x + guide.scan_line_extent(),
            origin.y
        ));
        svg.push('\n');
    }

    for face in frame.faces {
        let brackets = CornerBrackets::around(face.bounds, CORNER_ARM);
        for stroke in brackets.strokes() {
            svg.push_str(&format!(
                r#"<polyline points="{}" class="face"/>"#,
                points_attr(&stroke)
            ));
            svg.push('\n');
        }
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="score">{}</text>"#,
            face.bounds.left,
            face.bounds.top - 8.0,
            face.score
        ));
        svg.push('\n');
    }

    if let Some(caption) = frame.caption {
        let anchor = guide.caption_anchor();
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="caption" text-anchor="middle">{}</text>"#,
            anchor.x,
            anchor.y,
            escape_xml(caption)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn hex_rgb(c: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
