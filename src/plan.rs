//! Stream planning: everything the renderer needs for one configuration.
//!
//! A [`StreamRequest`] gathers what the capture layer knows when a stream is
//! opened (camera metadata, display rotation, view size) and
//! [`plan`](StreamRequest::plan) turns it into an immutable [`StreamPlan`].
//! The plan lives until the next rotation change, camera switch or surface
//! resize, when a new one replaces it.
//!
//! # Example
//!
//! ```
//! use scanframe::{CameraInfo, Facing, FaceDetectMode, Size, StreamRequest};
//!
//! let camera = CameraInfo {
//!     facing: Facing::Front,
//!     sensor_orientation: 270,
//!     active_array: Some(Size::new(4000, 3000)),
//!     output_sizes: vec![Size::new(1920, 1080), Size::new(1440, 1080), Size::new(640, 480)],
//!     face_detect_modes: vec![FaceDetectMode::Off, FaceDetectMode::Simple],
//! };
//!
//! let plan = StreamRequest::new(&camera)
//!     .display_rotation(0)
//!     .view(Size::new(1080, 1920))
//!     .plan()
//!     .unwrap();
//!
//! assert_eq!(plan.preview_size(), Size::new(1440, 1080));
//! assert_eq!(plan.view_aspect(), Size::new(1080, 1440));
//! assert!(plan.warnings().is_empty());
//! ```

use alloc::vec::Vec;

use log::{info, warn};

use crate::affine::AffineTransform;
use crate::detection::{DetectionTransform, FaceDetectMode, SensorFace, ViewFace};
use crate::error::{GeometryError, GeometryWarning};
use crate::geometry::Size;
use crate::negotiate::{Negotiation, SizeRequest, fit_to_aspect, view_aspect};
use crate::orientation::{Facing, OrientationContext, Rotation};
use crate::preview::preview_transform;

/// Preview size asked for when the caller does not say otherwise, in
/// display (portrait) orientation.
pub const DEFAULT_PREVIEW: Size = Size::new(1080, 1440);

/// What the capture layer reports about one camera.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraInfo {
    pub facing: Facing,
    /// Sensor mounting orientation in degrees, as reported.
    pub sensor_orientation: i32,
    /// Active pixel array; detection rectangles are relative to it.
    pub active_array: Option<Size>,
    /// Output sizes for the preview surface, in enumeration order.
    pub output_sizes: Vec<Size>,
    pub face_detect_modes: Vec<FaceDetectMode>,
}

/// The camera facing `facing`. When several match, the last one
/// enumerated is used.
pub fn pick_camera(cameras: &[CameraInfo], facing: Facing) -> Option<&CameraInfo> {
    cameras.iter().rev().find(|c| c.facing == facing)
}

/// Inputs for one stream configuration.
#[derive(Clone, Debug)]
pub struct StreamRequest<'a> {
    camera: &'a CameraInfo,
    display_rotation: i32,
    view: Size,
    preview_target: Size,
    landscape: Option<bool>,
    face_detect: Option<FaceDetectMode>,
}

impl<'a> StreamRequest<'a> {
    pub fn new(camera: &'a CameraInfo) -> Self {
        Self {
            camera,
            display_rotation: 0,
            view: DEFAULT_PREVIEW,
            preview_target: DEFAULT_PREVIEW,
            landscape: None,
            face_detect: None,
        }
    }

    /// Current display rotation in degrees.
    pub fn display_rotation(mut self, degrees: i32) -> Self {
        self.display_rotation = degrees;
        self
    }

    /// Size of the preview surface; also bounds the stream size.
    pub fn view(mut self, view: Size) -> Self {
        self.view = view;
        self
    }

    /// Desired preview size in display orientation.
    pub fn preview_target(mut self, target: Size) -> Self {
        self.preview_target = target;
        self
    }

    /// Override the UI orientation. Defaults to landscape when the view is
    /// wider than tall.
    pub fn landscape(mut self, landscape: bool) -> Self {
        self.landscape = Some(landscape);
        self
    }

    /// Cap face detection at `mode`. The camera's best offered mode is used
    /// when it is lower.
    pub fn face_detect(mut self, mode: FaceDetectMode) -> Self {
        self.face_detect = Some(mode);
        self
    }

    /// Negotiate the stream size and build the detection transform.
    pub fn plan(&self) -> Result<StreamPlan, GeometryError> {
        let mut warnings = Vec::new();
        check_rotation("display rotation", self.display_rotation, &mut warnings);
        check_rotation(
            "sensor orientation",
            self.camera.sensor_orientation,
            &mut warnings,
        );
        let orientation = OrientationContext::from_degrees(
            self.display_rotation,
            self.camera.sensor_orientation,
            self.camera.facing,
        );

        let request = SizeRequest::oriented(&orientation, self.preview_target, self.view);
        let negotiation = request
            .negotiate(&self.camera.output_sizes)
            .ok_or(GeometryError::NoOutputSizes)?;
        if negotiation.is_fallback() {
            warnings.push(GeometryWarning::UnsupportedConfiguration {
                target: request.target,
                bound: request.bound,
                fallback: negotiation.size,
            });
        }
        let preview = negotiation.size;

        let offered = FaceDetectMode::select(&self.camera.face_detect_modes);
        let face_detect = match self.face_detect {
            Some(cap) => cap.min(offered),
            None => offered,
        };
        let detection = if face_detect.is_enabled() {
            Some(DetectionTransform::build(
                &orientation,
                preview,
                self.camera.active_array,
            )?)
        } else {
            warn!("face detection off, offered {offered:?}");
            None
        };

        let landscape = self
            .landscape
            .unwrap_or(self.view.width > self.view.height);

        info!(
            "preview size {preview}, ratio {}, face detect {face_detect:?}",
            preview.aspect_ratio()
        );

        Ok(StreamPlan {
            orientation,
            negotiation,
            view_aspect: view_aspect(preview, landscape),
            face_detect,
            detection,
            warnings,
        })
    }
}

fn check_rotation(what: &'static str, degrees: i32, warnings: &mut Vec<GeometryWarning>) {
    if Rotation::from_degrees(degrees).is_none() {
        warn!("{what} is invalid: {degrees}, using 0 without swap");
        warnings.push(GeometryWarning::InvalidOrientation { what, degrees });
    }
}

/// Immutable geometry for one stream configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamPlan {
    orientation: OrientationContext,
    negotiation: Negotiation,
    view_aspect: Size,
    face_detect: FaceDetectMode,
    detection: Option<DetectionTransform>,
    warnings: Vec<GeometryWarning>,
}

impl StreamPlan {
    pub fn orientation(&self) -> &OrientationContext {
        &self.orientation
    }

    /// Chosen stream size; set it as the surface's default buffer size.
    pub fn preview_size(&self) -> Size {
        self.negotiation.size
    }

    pub fn negotiation(&self) -> &Negotiation {
        &self.negotiation
    }

    /// Aspect ratio the preview view should be measured to.
    pub fn view_aspect(&self) -> Size {
        self.view_aspect
    }

    pub fn face_detect(&self) -> FaceDetectMode {
        self.face_detect
    }

    /// `None` when face detection is off.
    pub fn detection(&self) -> Option<&DetectionTransform> {
        self.detection.as_ref()
    }

    pub fn warnings(&self) -> &[GeometryWarning] {
        &self.warnings
    }

    /// Measured view size shrunk to [`view_aspect`](Self::view_aspect).
    pub fn measure_view(&self, measured: Size) -> Size {
        fit_to_aspect(measured, self.view_aspect)
    }

    /// Buffer-to-view matrix for the current rotation and view size.
    pub fn preview_transform(
        &self,
        rotation: Rotation,
        view: Size,
    ) -> Result<AffineTransform, GeometryError> {
        preview_transform(rotation, view, self.preview_size())
    }

    /// Map one frame's detections. Empty when face detection is off.
    pub fn map_faces(&self, faces: &[SensorFace]) -> Vec<ViewFace> {
        match &self.detection {
            Some(t) => t.map_faces(faces),
            None => Vec::new(),
        }
    }
}
