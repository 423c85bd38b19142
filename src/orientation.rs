//! Display rotation, sensor mounting orientation, and the width/height swap
//! verdict both transforms depend on.
//!
//! Rotations are quarter turns, so combining a display rotation with a
//! sensor orientation is addition modulo four. The buffer's axes are
//! swapped relative to the display exactly when that sum is odd:
//!
//! ```text
//!                       sensor
//!     display    0°    90°   180°   270°
//!       0°       -     swap   -     swap
//!      90°      swap    -    swap    -
//!     180°       -     swap   -     swap
//!     270°      swap    -    swap    -
//! ```

use log::warn;

/// A quarter-turn rotation.
///
/// The discriminant order matches the platform's display-rotation
/// enumeration (`ROTATION_0 = 0` … `ROTATION_270 = 3`), which the preview
/// transform relies on through [`ordinal`](Self::ordinal).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// All rotations in ordinal order.
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Parse an exact multiple of 90 in `0..=270`. Returns `None` otherwise.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }

    /// Parse a platform rotation ordinal (0-3).
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub const fn degrees(self) -> i32 {
        self.ordinal() as i32 * 90
    }

    /// Position in the platform enumeration, 0-3.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    /// Whether this rotation alone exchanges width and height.
    pub const fn swaps_axes(self) -> bool {
        self.ordinal() % 2 == 1
    }

    /// Apply `self`, then `other`.
    pub const fn compose(self, other: Self) -> Self {
        Self::ALL[((self.ordinal() + other.ordinal()) & 3) as usize]
    }
}

/// Which way the lens faces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Selfie camera. Its image is laterally inverted relative to what the
    /// user expects, so it is mirrored.
    #[default]
    Front,
    Back,
}

impl Facing {
    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Front)
    }

    /// The other camera.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Orientation snapshot taken when a stream is configured.
///
/// Replaced, never mutated, when the device rotates or the active camera
/// changes. The swap verdict is fixed at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrientationContext {
    display_rotation: Rotation,
    sensor_orientation: Rotation,
    facing: Facing,
    swap: bool,
}

impl OrientationContext {
    pub const fn new(
        display_rotation: Rotation,
        sensor_orientation: Rotation,
        facing: Facing,
    ) -> Self {
        Self {
            display_rotation,
            sensor_orientation,
            facing,
            swap: display_rotation.compose(sensor_orientation).swaps_axes(),
        }
    }

    /// Context for raw degree values as reported by the platform.
    ///
    /// A value outside `{0, 90, 180, 270}` resolves to 0° and the context
    /// never swaps, the same verdict [`needs_swap`] gives.
    pub fn from_degrees(display_rotation: i32, sensor_orientation: i32, facing: Facing) -> Self {
        match (
            Rotation::from_degrees(display_rotation),
            Rotation::from_degrees(sensor_orientation),
        ) {
            (Some(display), Some(sensor)) => Self::new(display, sensor, facing),
            (display, sensor) => Self {
                display_rotation: display.unwrap_or_default(),
                sensor_orientation: sensor.unwrap_or_default(),
                facing,
                swap: false,
            },
        }
    }

    pub const fn display_rotation(&self) -> Rotation {
        self.display_rotation
    }

    pub const fn sensor_orientation(&self) -> Rotation {
        self.sensor_orientation
    }

    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether stream width/height must be swapped to compare against the
    /// display. Size negotiation and the detection transform both ask here.
    pub const fn needs_swap(&self) -> bool {
        self.swap
    }

    pub const fn is_mirrored(&self) -> bool {
        self.facing.is_mirrored()
    }
}

/// Swap verdict for raw degree values as reported by the platform.
///
/// A display rotation outside `{0, 90, 180, 270}` is logged and treated as
/// "no swap". A sensor orientation outside that set never swaps.
pub fn needs_swap(display_rotation: i32, sensor_orientation: i32) -> bool {
    let Some(display) = Rotation::from_degrees(display_rotation) else {
        warn!("display rotation is invalid: {display_rotation}");
        return false;
    };
    match Rotation::from_degrees(sensor_orientation) {
        Some(sensor) => OrientationContext::new(display, sensor, Facing::Front).needs_swap(),
        None => false,
    }
}
