use ritsmap_layout::dots::palette;
use ritsmap_layout::geom::point;
use ritsmap_layout::{
    ArcSpec, ArcTuning, CalloutRules, CircleLayout, CircleParams, DotStyle, GroupSpacingTable,
    layout_dots, layout_dots_with, place_callouts,
};
use std::f64::consts::FRAC_PI_2;

#[test]
fn half_ellipse_scenario() {
    let arc = ArcSpec::new(point(0.0, 0.0), 100.0, 105.0, -FRAC_PI_2, FRAC_PI_2);
    let dots = layout_dots(&arc, 100, 5.0);
    assert_eq!(dots[0].angle, -FRAC_PI_2);
    assert!(dots[99].angle < FRAC_PI_2);
    assert!((dots[99].t - 672.5 / 680.0).abs() < 1e-12);
}

#[test]
fn default_diagram_markers() {
    let circles = CircleLayout::from_params(&CircleParams::default());
    let arc = ArcSpec::enclosing(&circles, &ArcTuning::default(), 5.0, 100).spec;
    let dots = layout_dots(&arc, 100, 5.0);

    assert_eq!(dots.iter().filter(|d| d.has_companion).count(), 15);
    assert_eq!(dots.iter().filter(|d| d.stroke == palette::RED_STROKE).count(), 4);
    assert_eq!(dots.iter().filter(|d| d.stroke == palette::GREEN_STROKE).count(), 3);
    assert_eq!(dots[99].stroke, palette::CLS_STROKE);
    assert!((dots[99].radius - 28.8).abs() < 1e-12);

    // Markers run top to bottom on the right-hand side of the circles.
    for w in dots.windows(2) {
        assert!(w[1].y() > w[0].y());
    }
    assert!(dots.iter().all(|d| d.x() > circles.big.center.x));
}

#[test]
fn larger_base_radius_scales_every_marker() {
    let arc = ArcSpec::new(point(0.0, 0.0), 200.0, 210.0, -1.0, 1.0);
    let table = GroupSpacingTable::standard();
    let small = layout_dots_with(&arc, 100, 5.0, &table, &DotStyle { base_radius: 1.0 });
    let big = layout_dots_with(&arc, 100, 5.0, &table, &DotStyle { base_radius: 3.0 });
    for (a, b) in small.iter().zip(&big) {
        assert_eq!(a.angle, b.angle);
        assert!((b.radius - 3.0 * a.radius).abs() < 1e-12);
    }
}

#[test]
fn counts_other_than_one_hundred_extrapolate() {
    let arc = ArcSpec::new(point(0.0, 0.0), 100.0, 105.0, -1.0, 1.0);
    let dots = layout_dots(&arc, 120, 5.0);
    assert_eq!(dots.len(), 120);
    assert!(dots.windows(2).all(|w| w[1].angle > w[0].angle));
    assert!(dots[119].t < 1.0);

    let few = layout_dots(&arc, 10, 5.0);
    assert_eq!(few.len(), 10);
    assert!(few[9].t < 1.0);
}

#[test]
fn callouts_for_default_diagram() {
    let circles = CircleLayout::from_params(&CircleParams::default());
    let arc = ArcSpec::enclosing(&circles, &ArcTuning::default(), 5.0, 100).spec;
    let dots = layout_dots(&arc, 100, 5.0);
    let rules = CalloutRules::standard(circles.big.center, 2.4);
    let placed = place_callouts(&dots, &arc, &rules);

    assert_eq!(placed.iter().filter(|p| p.halo.is_some()).count(), 1);
    assert!(placed[0].position.y < dots[0].position.y);
    assert!(placed[99].position.y > dots[99].position.y);
    let moved: Vec<usize> = placed.iter().filter(|p| p.moved).map(|p| p.index()).collect();
    assert_eq!(moved, [0].into_iter().chain(92..100).collect::<Vec<_>>());
}
