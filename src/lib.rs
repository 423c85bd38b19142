//! Camera stream geometry: resolution negotiation, orientation, and the
//! coordinate transforms between sensor, buffer and view space.
//!
//! Pure geometry over value inputs. No pixels, no I/O, `no_std` compatible.
//!
//! # Modules
//!
//! - [`negotiate`]: pick the stream resolution from the camera's offer
//! - [`orientation`]: display/sensor rotation and the width-height swap
//! - [`detection`]: sensor-to-view mapping for detected faces
//! - [`preview`]: buffer-to-view mapping for the preview surface
//! - [`overlay`]: scan guide and face outline geometry
//! - [`plan`]: one immutable [`StreamPlan`] per stream configuration (`alloc`)
//! - [`snapshot`]: latest-value handoff to the render thread (`std`)
//! - [`options`]: query-string configuration (`options`)
//! - [`svg`]: SVG rendering of an overlay frame (`svg`)
//!
//! # Example
//!
//! ```
//! use scanframe::{Size, needs_swap, select_best_size};
//!
//! // Portrait phone, sensor mounted sideways: negotiate in buffer orientation.
//! assert!(needs_swap(0, 90));
//! let target = Size::new(1080, 1440).transposed();
//! let offered = [Size::new(1920, 1080), Size::new(1440, 1080), Size::new(640, 480)];
//! assert_eq!(
//!     select_best_size(&offered, target, Size::new(1920, 1080)),
//!     Some(Size::new(1440, 1080))
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod affine;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod negotiate;
pub mod orientation;
pub mod overlay;
pub mod preview;

#[cfg(feature = "alloc")]
pub mod plan;

#[cfg(feature = "std")]
pub mod snapshot;

#[cfg(feature = "options")]
pub mod options;

#[cfg(feature = "svg")]
pub mod svg;

pub use affine::AffineTransform;
pub use detection::{DetectionTransform, FaceDetectMode, SensorFace, ViewFace};
pub use error::{GeometryError, GeometryWarning};
pub use geometry::{Point, Rect, Size};
pub use negotiate::{Negotiation, SizeFit, select_best_size};
pub use orientation::{Facing, OrientationContext, Rotation, needs_swap};
pub use overlay::{Color, CornerBrackets, GuideOptions, ScanGuide};
pub use preview::preview_transform;

#[cfg(feature = "alloc")]
pub use plan::{CameraInfo, StreamPlan, StreamRequest, pick_camera};
