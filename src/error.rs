//! Errors and non-fatal warnings raised while configuring a stream.

use crate::geometry::Size;

/// Stream configuration failure.
///
/// Every variant is a deterministic function of bad input: the same call
/// fails the same way every time, and nothing is worth retrying.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A size fed into matrix construction has zero width or height.
    #[error("degenerate {what}: {size}")]
    DegenerateGeometry { what: &'static str, size: Size },
    /// The camera did not report its active sensor array.
    #[error("camera reported no active sensor array")]
    MissingActiveArray,
    /// The camera reported no output sizes for the preview surface.
    #[error("camera reported no output sizes")]
    NoOutputSizes,
}

/// Reject a zero-area size before it reaches a division.
pub(crate) fn require_area(what: &'static str, size: Size) -> Result<Size, GeometryError> {
    if size.is_empty() {
        Err(GeometryError::DegenerateGeometry { what, size })
    } else {
        Ok(size)
    }
}

/// Something was off, but a usable result was produced anyway.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryWarning {
    /// No candidate matched the target aspect ratio within bounds; the
    /// first candidate was used.
    UnsupportedConfiguration {
        target: Size,
        bound: Size,
        fallback: Size,
    },
    /// A rotation value outside `{0, 90, 180, 270}`; treated as 0°.
    InvalidOrientation { what: &'static str, degrees: i32 },
}
