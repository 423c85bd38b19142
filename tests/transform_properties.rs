//! Stepwise point simulation vs composed matrices.
//!
//! "Stepwise" = move a point through each operation one at a time, in f64,
//! the way the transforms are described: rotate, then scale, then
//! translate, and so on.
//!
//! "Composed" = the single `AffineTransform` the crate builds for the same
//! sequence.
//!
//! Any disagreement in composition order, sign convention or pivot handling
//! shows up as a mismatched point.

use approx::assert_relative_eq;
use scanframe::*;

// ---- Stepwise reference ----

type P = (f64, f64);

fn rotate(p: P, degrees: f64) -> P {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (p.0 * cos - p.1 * sin, p.0 * sin + p.1 * cos)
}

fn rotate_about(p: P, degrees: f64, c: P) -> P {
    let q = rotate((p.0 - c.0, p.1 - c.1), degrees);
    (q.0 + c.0, q.1 + c.1)
}

fn scale(p: P, sx: f64, sy: f64) -> P {
    (p.0 * sx, p.1 * sy)
}

fn scale_about(p: P, s: f64, c: P) -> P {
    ((p.0 - c.0) * s + c.0, (p.1 - c.1) * s + c.1)
}

fn translate(p: P, dx: f64, dy: f64) -> P {
    (p.0 + dx, p.1 + dy)
}

fn to_point(p: P) -> Point {
    Point::new(p.0 as f32, p.1 as f32)
}

fn assert_close(actual: Point, expected: P, tolerance: f32, what: &str) {
    assert!(
        (actual.x - expected.0 as f32).abs() <= tolerance
            && (actual.y - expected.1 as f32).abs() <= tolerance,
        "{what}: composed {actual:?}, stepwise {expected:?}"
    );
}

/// Deterministic sample points.
fn samples(w: f64, h: f64) -> Vec<P> {
    let mut out = vec![(0.0, 0.0), (w, 0.0), (w, h), (0.0, h), (w / 2.0, h / 2.0)];
    let mut state = 0x2545_f491_u32;
    for _ in 0..16 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let x = (state >> 8) as f64 / (1u32 << 24) as f64 * w;
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let y = (state >> 8) as f64 / (1u32 << 24) as f64 * h;
        out.push((x, y));
    }
    out
}

// ---- Affine composition ----

#[test]
fn post_operations_apply_in_call_order() {
    let m = AffineTransform::rotate(30.0)
        .post_scale(2.0, -0.5)
        .post_translate(100.0, 40.0)
        .post_rotate_about(90.0, 10.0, 20.0);
    for p in samples(400.0, 300.0) {
        let q = rotate(p, 30.0);
        let q = scale(q, 2.0, -0.5);
        let q = translate(q, 100.0, 40.0);
        let q = rotate_about(q, 90.0, (10.0, 20.0));
        assert_close(m.map_point(to_point(p)), q, 1e-2, "post chain");
    }
}

#[test]
fn pre_operations_apply_first() {
    let m = AffineTransform::translate(50.0, 60.0).pre_scale(1.0, -1.0);
    for p in samples(100.0, 100.0) {
        let q = scale(p, 1.0, -1.0);
        let q = translate(q, 50.0, 60.0);
        assert_close(m.map_point(to_point(p)), q, 1e-3, "pre scale");
    }
}

#[test]
fn inverse_undoes_every_built_transform() {
    let transforms = [
        AffineTransform::rotate(270.0).post_scale(-0.35, 0.35).post_translate(1080.0, 1440.0),
        AffineTransform::rotate_about(180.0, 540.0, 960.0),
        preview_transform(Rotation::R90, Size::new(1920, 1080), Size::new(1440, 1080)).unwrap(),
        preview_transform(Rotation::R270, Size::new(2160, 1080), Size::new(1920, 1080)).unwrap(),
    ];
    for m in transforms {
        let inv = m.invert().unwrap();
        for p in samples(1000.0, 1000.0) {
            let back = inv.map_point(m.map_point(to_point(p)));
            assert_relative_eq!(back.x, p.0 as f32, epsilon = 0.05);
            assert_relative_eq!(back.y, p.1 as f32, epsilon = 0.05);
        }
    }
}

// ---- Detection transform ----

fn stepwise_detection(ctx: &OrientationContext, preview: Size, active: Size, rect: Rect) -> Rect {
    let sx = preview.width as f64 / active.width as f64;
    let sy = preview.height as f64 / active.height as f64;
    let mirror = ctx.facing() == Facing::Front;
    let corners: Vec<Point> = rect
        .corners()
        .iter()
        .map(|c| {
            let p = rotate((c.x as f64, c.y as f64), ctx.sensor_orientation().degrees() as f64);
            let p = scale(p, if mirror { -sx } else { sx }, sy);
            let p = if ctx.needs_swap() {
                translate(p, preview.height as f64, preview.width as f64)
            } else {
                p
            };
            to_point(p)
        })
        .collect();
    let mapped = Rect::bounding(&corners);
    if ctx.facing() == Facing::Back {
        mapped.offset(0.0, -(preview.width as f32))
    } else {
        mapped
    }
}

#[test]
fn detection_matches_stepwise_for_every_context() {
    let preview = Size::new(1440, 1080);
    let active = Size::new(4032, 3024);
    let rects = [
        Rect::new(0.0, 0.0, 4032.0, 3024.0),
        Rect::new(1816.0, 1312.0, 2216.0, 1712.0),
        Rect::new(100.0, 2500.0, 900.0, 2900.0),
    ];
    for display in Rotation::ALL {
        for sensor in Rotation::ALL {
            for facing in [Facing::Front, Facing::Back] {
                let ctx = OrientationContext::new(display, sensor, facing);
                let t = DetectionTransform::build(&ctx, preview, Some(active)).unwrap();
                for rect in rects {
                    let got = t.apply(rect);
                    let want = stepwise_detection(&ctx, preview, active, rect);
                    for (g, w) in [
                        (got.left, want.left),
                        (got.top, want.top),
                        (got.right, want.right),
                        (got.bottom, want.bottom),
                    ] {
                        assert!(
                            (g - w).abs() <= 0.05,
                            "{ctx:?} {rect:?}: composed {got:?}, stepwise {want:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn swapped_detection_stays_inside_the_portrait_preview() {
    let preview = Size::new(1440, 1080);
    let active = Size::new(4032, 3024);
    for sensor in [Rotation::R90, Rotation::R270] {
        let ctx = OrientationContext::new(Rotation::R0, sensor, Facing::Front);
        let t = DetectionTransform::build(&ctx, preview, Some(active)).unwrap();
        let full = t.apply(Rect::from_size(active));
        if sensor == Rotation::R270 {
            assert_relative_eq!(full.left, 0.0, epsilon = 0.05);
            assert_relative_eq!(full.top, 0.0, epsilon = 0.05);
            assert_relative_eq!(full.right, 1080.0, epsilon = 0.05);
            assert_relative_eq!(full.bottom, 1440.0, epsilon = 0.05);
        } else {
            // Sensor at 90° is translated by the same offsets; the result is
            // shifted, not mirrored back into view.
            assert_relative_eq!(full.width(), 1080.0, epsilon = 0.05);
            assert_relative_eq!(full.height(), 1440.0, epsilon = 0.05);
        }
    }
}

// ---- Preview transform ----

fn stepwise_preview(rotation: Rotation, view: Size, buffer: Size, p: P) -> P {
    let (vw, vh) = (view.width as f64, view.height as f64);
    let (bw, bh) = (buffer.height as f64, buffer.width as f64);
    let c = (vw / 2.0, vh / 2.0);
    match rotation {
        Rotation::R0 => p,
        Rotation::R180 => rotate_about(p, 180.0, c),
        Rotation::R90 | Rotation::R270 => {
            // view rect -> buffer rect centered on the view
            let (left, top) = (c.0 - bw / 2.0, c.1 - bh / 2.0);
            let q = (left + p.0 * bw / vw, top + p.1 * bh / vh);
            let s = (vh / buffer.height as f64).max(vw / buffer.width as f64);
            let q = scale_about(q, s, c);
            let degrees = 90.0 * (rotation.ordinal() as f64 - 2.0);
            rotate_about(q, degrees, c)
        }
    }
}

#[test]
fn preview_matches_stepwise() {
    let cases = [
        (Size::new(1920, 1080), Size::new(1440, 1080)),
        (Size::new(2160, 1080), Size::new(1920, 1080)),
        (Size::new(1080, 1920), Size::new(1440, 1080)),
        (Size::new(800, 800), Size::new(640, 480)),
    ];
    for rotation in Rotation::ALL {
        for (view, buffer) in cases {
            let m = preview_transform(rotation, view, buffer).unwrap();
            for p in samples(view.width as f64, view.height as f64) {
                let want = stepwise_preview(rotation, view, buffer, p);
                assert_close(
                    m.map_point(to_point(p)),
                    want,
                    0.05,
                    &format!("{rotation:?} view {view} buffer {buffer}"),
                );
            }
        }
    }
}

#[test]
fn preview_identity_when_upright() {
    for (view, buffer) in [
        (Size::new(1, 1), Size::new(1, 1)),
        (Size::new(1080, 2400), Size::new(4032, 3024)),
    ] {
        assert_eq!(
            preview_transform(Rotation::R0, view, buffer).unwrap(),
            AffineTransform::IDENTITY
        );
    }
}
