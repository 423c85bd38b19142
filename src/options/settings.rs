//! Parsed configuration and its resolution to defaults.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::detection::FaceDetectMode;
use crate::geometry::Size;
use crate::orientation::Facing;
use crate::overlay::{Color, GuideOptions};
use crate::plan::{DEFAULT_PREVIEW, StreamRequest};

/// Parsed configuration. `None` means the key was absent.
///
/// Produced by [`crate::options::parse()`], resolved with
/// [`guide()`](Self::guide) and [`stream()`](Self::stream).
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct Options {
    /// Guide circle radius (`circle_radius`).
    pub radius: Option<f32>,
    /// `circle_center_horizontal`, `centerhorizontal`.
    pub center_horizontal: Option<bool>,
    /// `circle_center_vertical`, `centervertical`.
    pub center_vertical: Option<bool>,
    pub margin_top: Option<f32>,
    pub margin_left: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_bottom: Option<f32>,
    /// Ring color (`inner_circle_color`).
    pub ring_color: Option<Color>,
    /// Scan line pass duration (`anim_duration`).
    pub sweep_duration_ms: Option<u32>,
    /// Preview target, display orientation (`preview=WxH`).
    pub preview: Option<Size>,
    /// Overrides the width of `preview`.
    pub preview_width: Option<u32>,
    /// Overrides the height of `preview`.
    pub preview_height: Option<u32>,
    pub facing: Option<Facing>,
    /// Upper bound on face detection (`face_detect`).
    pub face_detect: Option<FaceDetectMode>,
    /// Non-geometry parameters preserved for the renderer.
    pub extras: BTreeMap<String, String>,
}

/// Stream settings with defaults applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    pub preview_target: Size,
    pub facing: Facing,
    /// `None` lets the camera's best offered mode win.
    pub face_detect: Option<FaceDetectMode>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            preview_target: DEFAULT_PREVIEW,
            facing: Facing::default(),
            face_detect: None,
        }
    }
}

impl StreamOptions {
    /// Carry these settings into a stream request.
    pub fn apply<'a>(&self, request: StreamRequest<'a>) -> StreamRequest<'a> {
        let request = request.preview_target(self.preview_target);
        match self.face_detect {
            Some(mode) => request.face_detect(mode),
            None => request,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Access non-geometry parameters preserved during parsing.
    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }

    /// Guide placement with unspecified keys at their defaults.
    pub fn guide(&self) -> GuideOptions {
        let d = GuideOptions::default();
        GuideOptions {
            radius: self.radius.unwrap_or(d.radius),
            center_horizontal: self.center_horizontal.unwrap_or(d.center_horizontal),
            center_vertical: self.center_vertical.unwrap_or(d.center_vertical),
            margin_top: self.margin_top.unwrap_or(d.margin_top),
            margin_left: self.margin_left.unwrap_or(d.margin_left),
            margin_right: self.margin_right.unwrap_or(d.margin_right),
            margin_bottom: self.margin_bottom.unwrap_or(d.margin_bottom),
            ring_color: self.ring_color.unwrap_or(d.ring_color),
            sweep_duration_ms: self.sweep_duration_ms.unwrap_or(d.sweep_duration_ms),
        }
    }

    /// Stream settings with unspecified keys at their defaults.
    pub fn stream(&self) -> StreamOptions {
        let base = self.preview.unwrap_or(DEFAULT_PREVIEW);
        StreamOptions {
            preview_target: Size::new(
                self.preview_width.unwrap_or(base.width),
                self.preview_height.unwrap_or(base.height),
            ),
            facing: self.facing.unwrap_or_default(),
            face_detect: self.face_detect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let o = Options::new();
        assert_eq!(o.guide(), GuideOptions::default());
        assert_eq!(o.stream(), StreamOptions::default());
        assert_eq!(o.stream().preview_target, Size::new(1080, 1440));
        assert_eq!(o.stream().facing, Facing::Front);
    }

    #[test]
    fn preview_components_override_preview() {
        let o = Options {
            preview: Some(Size::new(720, 960)),
            preview_height: Some(1280),
            ..Options::default()
        };
        assert_eq!(o.stream().preview_target, Size::new(720, 1280));

        let o = Options {
            preview_width: Some(480),
            ..Options::default()
        };
        assert_eq!(o.stream().preview_target, Size::new(480, 1440));
    }
}
