use voroclip::{BoundedVoronoi, BoundingBox, Error, Polygon};

/// 3x3 grid of seeds with unit spacing: every cell is a unit square.
fn grid_voronoi() -> BoundedVoronoi {
    let mut seeds = Vec::new();
    for y in [0.5, 1.5, 2.5] {
        for x in [0.5, 1.5, 2.5] {
            seeds.push(x);
            seeds.push(y);
        }
    }
    let bounds = BoundingBox::new([0.0, 0.0], [3.0, 3.0]);
    let mut voronoi = BoundedVoronoi::from_seeds(seeds, bounds);
    voronoi.calculate().unwrap();
    voronoi
}

#[test]
fn test_boundary_covering_everything_is_identity() {
    let voronoi = grid_voronoi();
    let boundary = Polygon::new(vec![-1.0, -1.0, 4.0, -1.0, 4.0, 4.0, -1.0, 4.0]);
    let clipped = voronoi.clip_to_boundary(&boundary).unwrap();

    assert_eq!(clipped.len(), 9);
    for (seed, pieces) in clipped.iter().enumerate() {
        assert_eq!(pieces.len(), 1, "cell {} fully inside must stay whole", seed);
        let cell = voronoi.cell(seed).unwrap();
        assert!(
            (pieces[0].area() - cell.area()).abs() < 1e-9,
            "clipping a contained cell must not change it"
        );
        let a = pieces[0].centroid();
        let b = cell.centroid();
        assert!((a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9);
    }
}

#[test]
fn test_boundary_excluding_one_cell() {
    let voronoi = grid_voronoi();
    // Covers all of the box except the top-right cell [2,3]x[2,3].
    let boundary = Polygon::new(vec![
        0.0, 0.0, 3.0, 0.0, 3.0, 1.9, 1.9, 1.9, 1.9, 3.0, 0.0, 3.0,
    ]);
    let clipped = voronoi.clip_to_boundary(&boundary).unwrap();

    // Seed 8 owns the excluded corner cell.
    assert!(clipped[8].is_empty(), "excluded cell must produce an empty result");

    // Cells straddling the notch edge get trimmed.
    let top_middle: f64 = clipped[7].iter().map(|p| p.area()).sum();
    assert!((top_middle - 0.9).abs() < 1e-9, "expected 0.9, got {}", top_middle);
    let right_middle: f64 = clipped[5].iter().map(|p| p.area()).sum();
    assert!((right_middle - 0.9).abs() < 1e-9);

    // Cells away from the notch stay whole.
    for seed in [0, 1, 3, 4] {
        let total: f64 = clipped[seed].iter().map(|p| p.area()).sum();
        assert!((total - 1.0).abs() < 1e-9, "cell {} should be untouched", seed);
    }
}

#[test]
fn test_concave_boundary_splits_cell() {
    let voronoi = grid_voronoi();
    // U-shape over the left column with a notch from y=0.5 upwards: the
    // middle-left cell [0,1]x[1,2] is cut into two strips.
    let boundary = Polygon::new(vec![
        0.0, 0.0, 1.0, 0.0, 1.0, 3.0, 0.7, 3.0, 0.7, 0.5, 0.3, 0.5, 0.3, 3.0, 0.0, 3.0,
    ]);
    let clipped = voronoi.clip_to_boundary(&boundary).unwrap();

    let pieces = &clipped[3];
    assert_eq!(pieces.len(), 2, "notch must split the middle-left cell");
    let total: f64 = pieces.iter().map(|p| p.area()).sum();
    assert!((total - 0.6).abs() < 1e-9, "two 0.3x1 strips, got {}", total);
    for p in pieces {
        assert!(p.signed_area() > 0.0, "output must stay counter-clockwise");
    }

    // Cells in other columns are unaffected by the notch.
    assert!(clipped[4].len() == 1 || clipped[4].is_empty());
}

#[test]
fn test_malformed_boundary_aborts_clip_only() {
    let voronoi = grid_voronoi();
    let bowtie = Polygon::new(vec![0.0, 0.0, 3.0, 3.0, 3.0, 0.0, 0.0, 3.0]);
    let err = voronoi.clip_to_boundary(&bowtie).unwrap_err();
    assert!(matches!(err, Error::MalformedBoundary(_)));

    // The tessellation itself is untouched and still usable.
    assert_eq!(voronoi.count_cells(), 9);
    let ok = Polygon::new(vec![0.0, 0.0, 3.0, 0.0, 3.0, 3.0, 0.0, 3.0]);
    assert!(voronoi.clip_to_boundary(&ok).is_ok());
}

#[test]
fn test_explicitly_closed_ring_accepted() {
    let voronoi = grid_voronoi();
    // Shapefile-style ring repeating its first coordinate.
    let boundary = Polygon::new(vec![
        0.0, 0.0, 3.0, 0.0, 3.0, 3.0, 0.0, 3.0, 0.0, 0.0,
    ]);
    let clipped = voronoi.clip_to_boundary(&boundary).unwrap();
    let total: f64 = clipped.iter().flatten().map(|p| p.area()).sum();
    assert!((total - 9.0).abs() < 1e-9);
}
