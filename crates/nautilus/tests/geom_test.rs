use nautilus::geom::lerp;
use nautilus::{Point, Rect, Segment, Size};
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_4;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn rect_overlaps_when_interiors_cross() {
    let r1 = Rect::new(0.0, 0.0, 10.0, 10.0);
    let r2 = Rect::new(5.0, 5.0, 15.0, 15.0);
    assert!(r1.overlaps(&r2));
}

#[test]
fn rect_sharing_an_edge_does_not_overlap() {
    let r1 = Rect::new(0.0, 0.0, 10.0, 10.0);
    let r2 = Rect::new(10.0, 0.0, 20.0, 10.0);
    assert!(!r1.overlaps(&r2));
    assert!(!r2.overlaps(&r1));
}

#[test]
fn rect_sharing_a_corner_does_not_overlap() {
    let r1 = Rect::new(0.0, 0.0, 10.0, 10.0);
    let r2 = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(!r1.overlaps(&r2));
}

#[test]
fn rect_contains_point_is_strict() {
    let r = Rect::new(0.0, 0.0, 4.0, 4.0);
    assert!(r.contains_point(Point::new(2.0, 2.0)));
    assert!(!r.contains_point(Point::new(0.0, 2.0)));
    assert!(!r.contains_point(Point::new(4.0, 4.0)));
    assert!(!r.contains_point(Point::new(5.0, 2.0)));
}

#[test]
fn rect_contains_rect_includes_edges() {
    let r = Rect::new(0.0, 0.0, 20.0, 20.0);
    assert!(r.contains_rect(&r));
    assert!(r.contains_rect(&Rect::new(5.0, 5.0, 15.0, 15.0)));
    assert!(r.contains_rect(&Rect::new(14.0, 0.0, 20.0, 6.0)));
    assert!(!r.contains_rect(&Rect::new(14.0, 15.0, 20.0, 21.0)));
    assert!(!r.contains_rect(&Rect::new(-1.0, 5.0, 4.0, 10.0)));
}

#[test]
fn rect_measurements() {
    let r = Rect::new(1.0, 2.0, 5.0, 8.0);
    assert_eq!(r.width(), 4.0);
    assert_eq!(r.height(), 6.0);
    assert_eq!(r.area(), 24.0);
    assert_eq!(r.center(), Point::new(3.0, 5.0));
    assert_eq!(
        r.corners(),
        [
            Point::new(1.0, 2.0),
            Point::new(5.0, 2.0),
            Point::new(5.0, 8.0),
            Point::new(1.0, 8.0),
        ]
    );
    assert_eq!(
        r.translated(Point::new(-1.0, 1.0)),
        Rect::new(0.0, 3.0, 4.0, 9.0)
    );
}

#[test]
fn segment_intersection_crossing() {
    let e1 = Segment::new(Point::new(1.0, 1.0), Point::new(3.0, 4.0));
    let e2 = Segment::new(Point::new(3.0, 1.0), Point::new(1.0, 4.0));
    assert_eq!(e1.intersection(&e2), Some(Point::new(2.0, 2.5)));
}

#[test]
fn segment_intersection_outside_parameter_range() {
    let e1 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    let e2 = Segment::new(Point::new(3.0, 0.0), Point::new(2.0, 1.0));
    assert_eq!(e1.intersection(&e2), None);
}

#[test]
fn segment_intersection_parallel() {
    let e1 = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
    let e2 = Segment::new(Point::new(0.0, 1.0), Point::new(4.0, 1.0));
    assert_eq!(e1.intersection(&e2), None);
}

#[test]
fn point_arithmetic_and_angles() {
    let p = Point::new(1.0, 1.0);
    let q = Point::new(2.0, 2.0);
    assert_eq!(p + q, Point::new(3.0, 3.0));
    assert_eq!(q - p, Point::new(1.0, 1.0));
    assert_eq!(q * 1.5, Point::new(3.0, 3.0));
    assert_eq!(Size::new(30.0, 18.0).center(), Point::new(15.0, 9.0));
    assert!(approx(p.angle_to(q), FRAC_PI_4));
    assert!(approx(p.distance(q), 2f64.sqrt()));
}

#[test]
fn lerp_extrapolates_past_the_end_point() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(2.0, 4.0);
    assert_eq!(lerp(a, b, 0.5), Point::new(1.0, 2.0));
    assert_eq!(lerp(a, b, 1.5), Point::new(3.0, 6.0));
}

#[test]
fn polar_conversion() {
    let p = Point::from_polar(2.0, FRAC_PI_4);
    assert!(approx(p.x, 2f64.sqrt()));
    assert!(approx(p.y, 2f64.sqrt()));
    let (r, theta) = p.to_polar();
    assert!(approx(r, 2.0));
    assert!(approx(theta, FRAC_PI_4));
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-50.0..50.0f64, -50.0..50.0f64, 0.0..30.0f64, 0.0..30.0f64)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn positive_area_rect_overlaps_itself(x in -50.0..50.0f64, y in -50.0..50.0f64, w in 0.1..30.0f64, h in 0.1..30.0f64) {
        let r = Rect::new(x, y, x + w, y + h);
        prop_assert!(r.overlaps(&r));
        prop_assert!(r.contains_point(r.center()));
    }
}
