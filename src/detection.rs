//! Mapping face rectangles reported in sensor space into view space.
//!
//! The matrix is built once per stream configuration:
//!
//! 1. rotate by the sensor mounting orientation,
//! 2. scale from the active sensor array to the preview size, negating x for
//!    a mirrored (front) camera,
//! 3. when the orientation context swaps axes, translate by
//!    `(preview.height, preview.width)` to bring the rotated frame back
//!    into positive coordinates.
//!
//! Each frame's rectangles then go through [`DetectionTransform::apply`].
//! For the back camera, `preview.width` is additionally subtracted from both
//! vertical edges. That correction mixes a width into a vertical coordinate;
//! it is kept as-is until it can be checked against real back-camera
//! detections.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use log::debug;

use crate::affine::AffineTransform;
use crate::error::{GeometryError, require_area};
use crate::geometry::{Rect, Size};
use crate::orientation::{Facing, OrientationContext};

/// Face detection level a camera can run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceDetectMode {
    #[default]
    Off,
    /// Bounding boxes and scores.
    Simple,
    /// Bounding boxes, scores, landmarks and ids.
    Full,
}

impl FaceDetectMode {
    /// The most capable mode among those the camera offers.
    pub fn select(available: &[FaceDetectMode]) -> Self {
        available.iter().copied().max().unwrap_or(Self::Off)
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

/// A face as reported by the capture hardware.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorFace {
    /// Bounds in active-array coordinates.
    pub bounds: Rect,
    /// Confidence, 1-100. Passed through untouched.
    pub score: u8,
}

/// A face ready for the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewFace {
    pub bounds: Rect,
    pub score: u8,
}

/// Sensor-to-view mapping for one stream configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DetectionTransform {
    matrix: AffineTransform,
    facing: Facing,
    preview: Size,
}

impl DetectionTransform {
    /// Build the mapping for `ctx`, the chosen preview size and the camera's
    /// active sensor array.
    ///
    /// Fails when the active array is unknown or either size has no area,
    /// since the scale factors would be meaningless.
    pub fn build(
        ctx: &OrientationContext,
        preview: Size,
        active_array: Option<Size>,
    ) -> Result<Self, GeometryError> {
        let active = active_array.ok_or(GeometryError::MissingActiveArray)?;
        let active = require_area("active array", active)?;
        let preview = require_area("preview size", preview)?;

        let scale_x = preview.width as f32 / active.width as f32;
        let scale_y = preview.height as f32 / active.height as f32;
        let mirror = ctx.is_mirrored();

        let mut matrix = AffineTransform::rotate(ctx.sensor_orientation().degrees() as f32)
            .post_scale(if mirror { -scale_x } else { scale_x }, scale_y);
        if ctx.needs_swap() {
            matrix = matrix.post_translate(preview.height as f32, preview.width as f32);
        }

        debug!(
            "active array {active} ratio {}, preview {preview} ratio {}",
            active.aspect_ratio(),
            preview.aspect_ratio()
        );

        Ok(Self {
            matrix,
            facing: ctx.facing(),
            preview,
        })
    }

    /// The sensor-to-view matrix, without the per-rect back-camera offset.
    pub fn matrix(&self) -> AffineTransform {
        self.matrix
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn preview(&self) -> Size {
        self.preview
    }

    /// Map one sensor-space rectangle into view space.
    pub fn apply(&self, sensor: Rect) -> Rect {
        let mapped = self.matrix.map_rect(sensor);
        match self.facing {
            Facing::Front => mapped,
            Facing::Back => mapped.offset(0.0, -(self.preview.width as f32)),
        }
    }

    pub fn map_face(&self, face: &SensorFace) -> ViewFace {
        let bounds = self.apply(face.bounds);
        debug!(
            "face {:?} -> {:?} score {}",
            face.bounds, bounds, face.score
        );
        ViewFace {
            bounds,
            score: face.score,
        }
    }

    /// Map one frame's faces, preserving their order.
    #[cfg(feature = "alloc")]
    pub fn map_faces(&self, faces: &[SensorFace]) -> Vec<ViewFace> {
        faces.iter().map(|f| self.map_face(f)).collect()
    }
}
