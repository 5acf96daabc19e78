#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn deck(width: f64, length: f64) -> Deck {
    Deck { width, length, height: 4.0, max_weight: 100.0, usable_space_fraction: 0.8 }
}

fn item_at(x: f64, z: f64, width: f64, length: f64) -> Item {
    Item {
        id: 1,
        kind: "Container".into(),
        width,
        length,
        height: 2.0,
        weight: 5.0,
        color: None,
        position_x: x,
        position_y: 0.0,
        position_z: z,
    }
}

// --- Point / Rect ---

#[test]
fn point_distance_is_euclidean() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn rect_contains_is_edge_inclusive() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert!(r.contains(Point::new(10.0, 20.0)));
    assert!(r.contains(Point::new(40.0, 60.0)));
    assert!(r.contains(Point::new(25.0, 30.0)));
    assert!(!r.contains(Point::new(9.99, 30.0)));
    assert!(!r.contains(Point::new(25.0, 60.01)));
}

#[test]
fn rect_center_and_edges() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert!(point_approx_eq(r.center(), Point::new(25.0, 40.0)));
    assert!(approx_eq(r.right(), 40.0));
    assert!(approx_eq(r.bottom(), 60.0));
}

// --- to_surface / from_surface ---

#[test]
fn default_transform_uses_fixed_constants() {
    let t = LayoutTransform::default();
    assert_eq!(t.scale, 20.0);
    assert_eq!(t.margins.left, 50.0);
    assert_eq!(t.margins.top, 30.0);
    assert_eq!(t.margins.right, 20.0);
    assert_eq!(t.margins.bottom, 20.0);
}

#[test]
fn to_surface_applies_scale_and_axis_margin() {
    let t = LayoutTransform::default();
    assert!(approx_eq(t.to_surface(0.0, Axis::X), 50.0));
    assert!(approx_eq(t.to_surface(0.0, Axis::Z), 30.0));
    assert!(approx_eq(t.to_surface(2.5, Axis::X), 100.0));
    assert!(approx_eq(t.to_surface(2.5, Axis::Z), 80.0));
}

#[test]
fn from_surface_inverts_to_surface() {
    let t = LayoutTransform::default();
    for axis in [Axis::X, Axis::Z] {
        for meters in [0.0, 0.05, 1.0, 3.33, 12.7, 99.99] {
            let back = t.from_surface(t.to_surface(meters, axis), axis);
            assert!((back - meters).abs() * t.scale <= 1.0);
        }
    }
}

#[test]
fn from_surface_inside_margin_is_negative() {
    let t = LayoutTransform::default();
    assert!(t.from_surface(10.0, Axis::X) < 0.0);
}

// --- surface_size ---

#[test]
fn surface_size_adds_both_margins() {
    let t = LayoutTransform::default();
    let size = t.surface_size(&deck(10.0, 6.0));
    assert_eq!(size, SurfaceSize::new(200 + 70, 120 + 50));
}

#[test]
fn surface_size_rounds_up_fractional_decks() {
    let t = LayoutTransform::default();
    // 10.01 * 20 = 200.2 -> 201
    let size = t.surface_size(&deck(10.01, 6.02));
    assert_eq!(size.width, 201 + 70);
    assert_eq!(size.height, 121 + 50);
}

#[test]
fn surface_size_never_clips_the_deck() {
    let t = LayoutTransform::default();
    for (w, l) in [(0.1, 0.1), (7.33, 19.99), (25.0, 120.5), (3.049, 3.051)] {
        let d = deck(w, l);
        let size = t.surface_size(&d);
        assert!(f64::from(size.width) >= w * t.scale + t.margins.left + t.margins.right);
        assert!(f64::from(size.height) >= l * t.scale + t.margins.top + t.margins.bottom);
    }
}

// --- rectangles ---

#[test]
fn deck_rect_starts_at_margins() {
    let t = LayoutTransform::default();
    assert_eq!(t.deck_rect(&deck(10.0, 6.0)), Rect::new(50.0, 30.0, 200.0, 120.0));
}

#[test]
fn item_rect_maps_position_and_size() {
    let t = LayoutTransform::default();
    let r = t.item_rect(&item_at(1.0, 2.0, 2.0, 3.0));
    assert_eq!(r, Rect::new(70.0, 70.0, 40.0, 60.0));
}

// --- device mapping ---

#[test]
fn device_to_surface_unscaled_subtracts_origin() {
    let t = LayoutTransform::default();
    let size = SurfaceSize::new(270, 170);
    let screen = ScreenRect::new(100.0, 50.0, 270.0, 170.0);
    let p = t.device_to_surface(Point::new(160.0, 90.0), screen, size);
    assert!(point_approx_eq(p, Point::new(60.0, 40.0)));
}

#[test]
fn device_to_surface_scales_by_display_ratio() {
    let t = LayoutTransform::default();
    let size = SurfaceSize::new(270, 170);
    // Displayed at half size.
    let screen = ScreenRect::new(0.0, 0.0, 135.0, 85.0);
    let p = t.device_to_surface(Point::new(35.0, 20.0), screen, size);
    assert!(point_approx_eq(p, Point::new(70.0, 40.0)));
}

#[test]
fn device_to_surface_zero_screen_uses_unit_ratio() {
    let t = LayoutTransform::default();
    let p = t.device_to_surface(Point::new(5.0, 6.0), ScreenRect::new(0.0, 0.0, 0.0, 0.0), SurfaceSize::new(10, 10));
    assert!(point_approx_eq(p, Point::new(5.0, 6.0)));
}

#[test]
fn device_round_trip_through_scaled_display() {
    let t = LayoutTransform::default();
    let size = SurfaceSize::new(270, 170);
    let screen = ScreenRect::new(13.0, -7.5, 405.0, 255.0);
    let device = Point::new(222.2, 111.1);
    let back = t.surface_to_device(t.device_to_surface(device, screen, size), screen, size);
    assert!(point_approx_eq(device, back));
}

#[test]
fn unscaled_screen_matches_surface_size() {
    let s = ScreenRect::unscaled(SurfaceSize::new(270, 170));
    assert_eq!(s, ScreenRect::new(0.0, 0.0, 270.0, 170.0));
}
