use proptest::prelude::*;
use ritsmap_layout::gear::gear_vertices;
use ritsmap_layout::geom::point;
use ritsmap_layout::{ArcSpec, GroupSpacingTable, gear_path, layout_dots};

// ---------------------------------------------------------------------------
// Gear outline
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn gear_has_four_vertices_per_tooth(
        outer in 5.0f64..500.0,
        teeth in 3usize..64,
        height_ratio in 0.01f64..0.5,
        fraction in 0.05f64..0.95,
    ) {
        let height = outer * height_ratio;
        let d = gear_path(outer, teeth, height, fraction);
        prop_assert!(d.starts_with("M "));
        prop_assert!(d.ends_with(" Z"));
        prop_assert!(!d.contains("NaN"));
        prop_assert_eq!(d.matches(" L ").count(), 4 * teeth - 1);

        let v = gear_vertices(outer, teeth, height, fraction);
        let tips = v.iter().filter(|p| (p.to_vector().length() - outer).abs() < 1e-6).count();
        let roots = v.iter().filter(|p| (p.to_vector().length() - (outer - height)).abs() < 1e-6).count();
        prop_assert_eq!(tips, 2 * teeth);
        prop_assert_eq!(roots, 2 * teeth);
    }
}

// ---------------------------------------------------------------------------
// Arc layout
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn angles_strictly_increase(spacing in 0.01f64..50.0) {
        let arc = ArcSpec::new(point(0.0, 0.0), 100.0, 105.0, -1.5, 1.5);
        let dots = layout_dots(&arc, 100, spacing);
        prop_assert_eq!(dots.len(), 100);
        for w in dots.windows(2) {
            prop_assert!(w[1].angle > w[0].angle, "{} !> {}", w[1].angle, w[0].angle);
        }
        prop_assert!(dots[0].t == 0.0);
        prop_assert!(dots[99].t < 1.0);
    }

    #[test]
    fn layout_is_deterministic(spacing in 0.5f64..20.0, count in 0usize..150) {
        let arc = ArcSpec::new(point(221.0, 383.0), 276.0, 289.8, -1.2228, 1.2228);
        let a = layout_dots(&arc, count, spacing);
        let b = layout_dots(&arc, count, spacing);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn companions_sit_inside_the_arc(spacing in 0.5f64..20.0) {
        let arc = ArcSpec::new(point(0.0, 0.0), 276.0, 289.8, -1.2, 1.2);
        for d in layout_dots(&arc, 100, spacing) {
            prop_assert_eq!(d.has_companion, d.companion.is_some());
            if let Some(c) = d.companion {
                prop_assert!(c.position.to_vector().length() < d.position.to_vector().length());
            }
        }
    }

    #[test]
    fn adjusted_index_monotone_past_table_end(spacing in 0.01f64..50.0, extra in 0usize..50) {
        let table = GroupSpacingTable::standard();
        let end = table.end() + extra;
        for i in 1..=end {
            prop_assert!(table.adjusted_index(i, spacing) > table.adjusted_index(i - 1, spacing));
        }
    }
}
