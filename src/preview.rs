//! Fitting the raw preview buffer into the view.
//!
//! The capture buffer is always authored in the sensor's landscape
//! orientation. When the device is turned sideways the buffer has to be
//! re-fitted and counter-rotated so the preview is upright and fills the
//! view without stretching; upside down only needs a half turn.

use crate::affine::AffineTransform;
use crate::error::{GeometryError, require_area};
use crate::geometry::{Rect, Size};
use crate::orientation::Rotation;

/// Matrix that maps the preview buffer into the view's coordinate space.
///
/// Recompute whenever the view is resized or the device rotates. Both
/// sizes must have area.
///
/// # Example
///
/// ```
/// use scanframe::{Rotation, Size, preview::preview_transform};
///
/// let m = preview_transform(Rotation::R0, Size::new(1080, 1920), Size::new(1440, 1080)).unwrap();
/// assert!(m.is_identity());
/// ```
pub fn preview_transform(
    rotation: Rotation,
    view: Size,
    buffer: Size,
) -> Result<AffineTransform, GeometryError> {
    let view = require_area("view size", view)?;
    let buffer = require_area("buffer size", buffer)?;

    let view_rect = Rect::from_size(view);
    let (cx, cy) = (view_rect.center_x(), view_rect.center_y());

    let matrix = match rotation {
        Rotation::R90 | Rotation::R270 => {
            let buffer_rect = Rect::from_size(buffer.transposed());
            let buffer_rect =
                buffer_rect.offset(cx - buffer_rect.center_x(), cy - buffer_rect.center_y());
            // Cover the whole view; overflow is cropped, never letterboxed.
            let scale = (view.height as f32 / buffer.height as f32)
                .max(view.width as f32 / buffer.width as f32);
            // Ordinal 1 (90°) turns back by -90°, ordinal 3 (270°) by +90°.
            let degrees = 90.0 * (rotation.ordinal() as f32 - 2.0);
            AffineTransform::fill_rect_to_rect(view_rect, buffer_rect)
                .ok_or(GeometryError::DegenerateGeometry {
                    what: "view size",
                    size: view,
                })?
                .post_scale_about(scale, scale, cx, cy)
                .post_rotate_about(degrees, cx, cy)
        }
        Rotation::R180 => AffineTransform::rotate_about(180.0, cx, cy),
        Rotation::R0 => AffineTransform::IDENTITY,
    };
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_relative_eq;

    #[test]
    fn upright_is_identity_for_any_sizes() {
        for (view, buffer) in [
            (Size::new(1080, 1920), Size::new(1440, 1080)),
            (Size::new(1, 1), Size::new(4000, 3000)),
            (Size::new(720, 1280), Size::new(1920, 1080)),
        ] {
            assert!(preview_transform(Rotation::R0, view, buffer).unwrap().is_identity());
        }
    }

    #[test]
    fn upside_down_is_half_turn_about_center() {
        let m = preview_transform(Rotation::R180, Size::new(1080, 1920), Size::new(1440, 1080))
            .unwrap();
        assert_eq!(m.map_point(Point::new(0.0, 0.0)), Point::new(1080.0, 1920.0));
        assert_eq!(m.map_point(Point::new(540.0, 960.0)), Point::new(540.0, 960.0));
    }

    #[test]
    fn sideways_keeps_center_and_fills_view() {
        let view = Size::new(1920, 1080);
        let buffer = Size::new(1440, 1080);
        for rotation in [Rotation::R90, Rotation::R270] {
            let m = preview_transform(rotation, view, buffer).unwrap();
            let c = m.map_point(Point::new(960.0, 540.0));
            assert_relative_eq!(c.x, 960.0, epsilon = 1e-3);
            assert_relative_eq!(c.y, 540.0, epsilon = 1e-3);

            let shown = m.map_rect(Rect::from_size(view));
            assert!(shown.left <= 1e-3 && shown.top <= 1e-3, "{rotation:?}: {shown:?}");
            assert!(shown.right >= 1920.0 - 1e-3 && shown.bottom >= 1080.0 - 1e-3);
            // Not stretched: the shown frame has the buffer's aspect ratio.
            assert_relative_eq!(
                shown.width() / shown.height(),
                buffer.aspect_ratio(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn sideways_rotation_direction_depends_on_ordinal() {
        let view = Size::new(1920, 1080);
        let buffer = Size::new(1920, 1080);
        let (cx, cy) = (960.0, 540.0);
        let base = AffineTransform::fill_rect_to_rect(
            Rect::from_size(view),
            Rect::new(420.0, -420.0, 1500.0, 1500.0),
        )
        .unwrap()
        .post_scale_about(1.0, 1.0, cx, cy);

        let m90 = preview_transform(Rotation::R90, view, buffer).unwrap();
        let m270 = preview_transform(Rotation::R270, view, buffer).unwrap();
        let expect90 = base.post_rotate_about(-90.0, cx, cy);
        let expect270 = base.post_rotate_about(90.0, cx, cy);
        for (a, b) in m90.to_array().iter().zip(expect90.to_array().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-3);
        }
        for (a, b) in m270.to_array().iter().zip(expect270.to_array().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-3);
        }
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            preview_transform(Rotation::R90, Size::new(0, 1080), Size::new(1440, 1080)),
            Err(GeometryError::DegenerateGeometry { what: "view size", .. })
        ));
        assert!(matches!(
            preview_transform(Rotation::R0, Size::new(1080, 1920), Size::new(1440, 0)),
            Err(GeometryError::DegenerateGeometry { what: "buffer size", .. })
        ));
    }
}
