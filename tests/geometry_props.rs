// Property tests for the grid geometry (native).
#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;

use hex_board::board::geometry::{
    HIT_TOLERANCE, compute_canvas_extent, compute_cell_centers, neighbors, resolve_cell,
};
use hex_board::{CellRef, GridSpec, Point};

fn grid() -> impl Strategy<Value = GridSpec> {
    (1usize..=12, 1usize..=12, 5.0f64..60.0)
        .prop_map(|(rows, cols, radius)| GridSpec::new(rows, cols, radius).unwrap())
}

proptest! {
    #[test]
    fn centers_cover_grid_inside_canvas(spec in grid()) {
        let centers = compute_cell_centers(&spec);
        let extent = compute_canvas_extent(&spec);
        prop_assert_eq!(centers.len(), spec.rows() * spec.cols());
        for (cell, center) in centers.iter() {
            prop_assert!(spec.contains(cell));
            prop_assert!(extent.contains(center), "{:?} outside {:?}", center, extent);
        }
    }

    #[test]
    fn centers_are_distinct(spec in grid()) {
        let centers: Vec<Point> = compute_cell_centers(&spec).iter().map(|(_, p)| p).collect();
        let min_gap = spec.radius();
        for (i, a) in centers.iter().enumerate() {
            for b in &centers[i + 1..] {
                prop_assert!(a.distance(*b) > min_gap);
            }
        }
    }

    #[test]
    fn every_center_resolves_to_its_cell(spec in grid()) {
        let centers = compute_cell_centers(&spec);
        for (cell, center) in centers.iter() {
            prop_assert_eq!(resolve_cell(center, &centers, spec.radius()), Some(cell));
        }
    }

    #[test]
    fn resolution_is_nearest_center_within_tolerance(
        spec in grid(),
        fx in -0.1f64..1.1,
        fy in -0.1f64..1.1,
    ) {
        let centers = compute_cell_centers(&spec);
        let extent = compute_canvas_extent(&spec);
        let point = Point::new(fx * extent.width, fy * extent.height);
        let nearest = centers
            .iter()
            .map(|(cell, c)| (cell, point.distance(c)))
            .fold(None::<(CellRef, f64)>, |best, (cell, d)| match best {
                Some((_, bd)) if d >= bd => best,
                _ => Some((cell, d)),
            })
            .unwrap();

        let resolved = resolve_cell(point, &centers, spec.radius());
        if nearest.1 < spec.radius() * HIT_TOLERANCE {
            prop_assert_eq!(resolved, Some(nearest.0));
        } else {
            prop_assert_eq!(resolved, None);
        }
    }

    #[test]
    fn neighbors_are_one_column_step_apart(spec in grid(), r in 0usize..12, c in 0usize..12) {
        let cell = CellRef::new(r % spec.rows(), c % spec.cols());
        let centers = compute_cell_centers(&spec);
        let here = centers.get(cell).unwrap();
        for next in neighbors(cell, &spec) {
            let there = centers.get(next).unwrap();
            prop_assert!((here.distance(there) - spec.column_step()).abs() < 1e-6);
        }
    }
}
