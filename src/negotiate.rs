//! Choosing the stream resolution the camera should produce.
//!
//! Candidates come from the camera's stream configuration map in the order
//! the hardware enumerates them. A candidate *fits* when it is within the
//! bound on both axes and has exactly the target aspect ratio; among the
//! fits, the smallest one that still covers the target wins, else the
//! largest one below it. When nothing fits, the first candidate is used
//! rather than failing the stream.
//!
//! # Example
//!
//! ```
//! use scanframe::{Size, negotiate::select_best_size};
//!
//! let sizes = [Size::new(1920, 1080), Size::new(1440, 1080), Size::new(640, 480)];
//! let best = select_best_size(&sizes, Size::new(1440, 1080), Size::new(2000, 1500));
//! assert_eq!(best, Some(Size::new(1440, 1080)));
//! ```

use log::{debug, warn};

use crate::geometry::Size;
use crate::orientation::OrientationContext;

/// Which rule produced the chosen size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizeFit {
    /// Smallest exact-aspect size covering the target.
    AtLeastTarget,
    /// Largest exact-aspect size below the target.
    SmallerThanTarget,
    /// Nothing matched the aspect ratio within bounds; first candidate.
    Fallback,
}

/// Result of [`negotiate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Negotiation {
    pub size: Size,
    pub fit: SizeFit,
}

impl Negotiation {
    /// True when the hardware offered nothing with the target aspect ratio.
    pub fn is_fallback(&self) -> bool {
        self.fit == SizeFit::Fallback
    }
}

/// Pick the best candidate for `target` within `bound`.
///
/// Returns `None` only when `candidates` is empty. Ties on area keep the
/// first candidate encountered.
pub fn select_best_size(candidates: &[Size], target: Size, bound: Size) -> Option<Size> {
    choose(candidates, target, bound).map(|n| n.size)
}

/// [`select_best_size`], plus which rule applied, with the decision logged.
pub fn negotiate(candidates: &[Size], target: Size, bound: Size) -> Option<Negotiation> {
    for size in candidates {
        debug!("supported size {size}, ratio {}", size.aspect_ratio());
    }
    let chosen = choose(candidates, target, bound)?;
    match chosen.fit {
        SizeFit::Fallback => warn!(
            "no size matches {target} (ratio {}) within {bound}, falling back to {}",
            target.aspect_ratio(),
            chosen.size
        ),
        fit => debug!(
            "chose {} ({fit:?}) for target {target} within {bound}",
            chosen.size
        ),
    }
    Some(chosen)
}

fn choose(candidates: &[Size], target: Size, bound: Size) -> Option<Negotiation> {
    let first = *candidates.first()?;
    let mut at_least: Option<Size> = None;
    let mut smaller: Option<Size> = None;

    for &size in candidates {
        let fits = size.width <= bound.width
            && size.height <= bound.height
            && size.same_aspect(target);
        if !fits {
            continue;
        }
        if size.width >= target.width && size.height >= target.height {
            if at_least.is_none_or(|best| size.area() < best.area()) {
                at_least = Some(size);
            }
        } else if smaller.is_none_or(|best| size.area() > best.area()) {
            smaller = Some(size);
        }
    }

    let chosen = match (at_least, smaller) {
        (Some(size), _) => Negotiation {
            size,
            fit: SizeFit::AtLeastTarget,
        },
        (None, Some(size)) => Negotiation {
            size,
            fit: SizeFit::SmallerThanTarget,
        },
        (None, None) => Negotiation {
            size: first,
            fit: SizeFit::Fallback,
        },
    };
    Some(chosen)
}

/// Target and bound for negotiation, in the camera's buffer orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SizeRequest {
    pub target: Size,
    pub bound: Size,
}

impl SizeRequest {
    /// Express a display-oriented preview target and view bound in buffer
    /// orientation: both are transposed when the context needs a swap.
    pub fn oriented(ctx: &OrientationContext, preview_target: Size, view: Size) -> Self {
        if ctx.needs_swap() {
            Self {
                target: preview_target.transposed(),
                bound: view.transposed(),
            }
        } else {
            Self {
                target: preview_target,
                bound: view,
            }
        }
    }

    pub fn negotiate(&self, candidates: &[Size]) -> Option<Negotiation> {
        negotiate(candidates, self.target, self.bound)
    }
}

/// Aspect ratio the preview view should adopt for a chosen stream size.
///
/// Buffers are authored in landscape; a portrait UI shows them transposed.
pub fn view_aspect(preview: Size, landscape: bool) -> Size {
    if landscape { preview } else { preview.transposed() }
}

/// Shrink a measured view so it matches `aspect`, keeping one side.
///
/// A zero aspect component leaves the measurement untouched.
pub fn fit_to_aspect(measured: Size, aspect: Size) -> Size {
    if aspect.is_empty() {
        return measured;
    }
    let (w, h) = (measured.width as u64, measured.height as u64);
    let (aw, ah) = (aspect.width as u64, aspect.height as u64);
    if w < h * aw / ah {
        Size::new(measured.width, (w * ah / aw) as u32)
    } else {
        Size::new((h * aw / ah) as u32, measured.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{Facing, Rotation};

    fn s(w: u32, h: u32) -> Size {
        Size::new(w, h)
    }

    #[test]
    fn smallest_sufficient_size_wins() {
        let candidates = [s(4000, 3000), s(1440, 1080), s(2048, 1536), s(640, 480)];
        let n = negotiate(&candidates, s(1440, 1080), s(4000, 3000)).unwrap();
        assert_eq!(n.size, s(1440, 1080));
        assert_eq!(n.fit, SizeFit::AtLeastTarget);
    }

    #[test]
    fn largest_insufficient_size_when_nothing_covers() {
        let candidates = [s(320, 240), s(1024, 768), s(640, 480), s(1920, 1080)];
        let n = negotiate(&candidates, s(1440, 1080), s(1440, 1080)).unwrap();
        assert_eq!(n.size, s(1024, 768));
        assert_eq!(n.fit, SizeFit::SmallerThanTarget);
    }

    #[test]
    fn bound_excludes_larger_exact_matches() {
        let candidates = [s(2048, 1536), s(800, 600)];
        let n = negotiate(&candidates, s(1440, 1080), s(1440, 1080)).unwrap();
        assert_eq!(n.size, s(800, 600));
    }

    #[test]
    fn no_aspect_match_falls_back_to_first() {
        // Target 1080x1440 swapped to 1440x1080 (4:3); only 16:9 on offer.
        let candidates = [s(1920, 1080), s(1280, 720), s(960, 540)];
        let n = negotiate(&candidates, s(1440, 1080), s(1440, 1080)).unwrap();
        assert_eq!(n.size, s(1920, 1080));
        assert!(n.is_fallback());
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert_eq!(select_best_size(&[], s(4, 3), s(4, 3)), None);
    }

    #[test]
    fn equal_area_keeps_first_encountered() {
        // At a fixed aspect ratio equal area means equal size; duplicates model the tie.
        let candidates = [s(1600, 1200), s(1600, 1200), s(2000, 1500)];
        let n = negotiate(&candidates, s(1600, 1200), s(4000, 3000)).unwrap();
        assert_eq!(n.size, s(1600, 1200));
    }

    #[test]
    fn result_independent_of_order_unless_fallback() {
        let mut candidates = [s(4000, 3000), s(1440, 1080), s(2048, 1536), s(640, 480)];
        let forward = select_best_size(&candidates, s(1024, 768), s(4000, 3000));
        candidates.reverse();
        let backward = select_best_size(&candidates, s(1024, 768), s(4000, 3000));
        assert_eq!(forward, backward);
        assert_eq!(forward, Some(s(1440, 1080)));
    }

    #[test]
    fn oriented_request_transposes_on_swap() {
        let ctx = OrientationContext::new(Rotation::R0, Rotation::R90, Facing::Back);
        let req = SizeRequest::oriented(&ctx, s(1080, 1440), s(1080, 1920));
        assert_eq!(req.target, s(1440, 1080));
        assert_eq!(req.bound, s(1920, 1080));

        let ctx = OrientationContext::new(Rotation::R90, Rotation::R90, Facing::Back);
        let req = SizeRequest::oriented(&ctx, s(1080, 1440), s(1920, 1080));
        assert_eq!(req.target, s(1080, 1440));
        assert_eq!(req.bound, s(1920, 1080));
    }

    #[test]
    fn view_aspect_follows_ui_orientation() {
        assert_eq!(view_aspect(s(1440, 1080), true), s(1440, 1080));
        assert_eq!(view_aspect(s(1440, 1080), false), s(1080, 1440));
    }

    #[test]
    fn fit_to_aspect_keeps_the_limiting_side() {
        // Portrait view 1080x2000 with 3:4 content: width limits.
        assert_eq!(fit_to_aspect(s(1080, 2000), s(1080, 1440)), s(1080, 1440));
        // Landscape view 2000x1080 with 4:3 content: height limits.
        assert_eq!(fit_to_aspect(s(2000, 1080), s(1440, 1080)), s(1440, 1080));
        assert_eq!(fit_to_aspect(s(500, 500), s(0, 3)), s(500, 500));
    }
}
