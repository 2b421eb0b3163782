use plotters::prelude::*;
use rand::Rng;
use voroclip::{BoundedVoronoi, Polygon as CellPolygon, VoronoiDiagram};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let mut seeds = Vec::with_capacity(200 * 2);
    for _ in 0..200 {
        seeds.push(rng.gen_range(0.0..100.0));
        seeds.push(rng.gen_range(0.0..100.0));
    }

    let diagram = VoronoiDiagram::from_seeds(seeds);
    let bounds = BoundedVoronoi::fit_bounds(&diagram, 5.0);
    let mut voronoi = BoundedVoronoi::new(diagram, bounds);
    voronoi.calculate()?;

    draw("bounded_voronoi.svg", &voronoi, None)?;

    // Clip against a hexagonal "map" boundary.
    let mut ring = Vec::new();
    for i in 0..6 {
        let a = (i as f64) * std::f64::consts::TAU / 6.0;
        ring.push(50.0 + 45.0 * a.cos());
        ring.push(50.0 + 45.0 * a.sin());
    }
    let boundary = CellPolygon::new(ring);
    draw("bounded_voronoi_clipped.svg", &voronoi, Some(&boundary))?;

    Ok(())
}

fn draw(
    filename: &str,
    voronoi: &BoundedVoronoi,
    boundary: Option<&CellPolygon>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let b = voronoi.bounds;
    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(b.min[0]..b.max[0], b.min[1]..b.max[1])?;

    let cells: Vec<CellPolygon> = match boundary {
        Some(ring) => voronoi.clip_to_boundary(ring)?.into_iter().flatten().collect(),
        None => voronoi.cells().iter().flatten().cloned().collect(),
    };

    for (i, cell) in cells.iter().enumerate() {
        let mut poly = Vec::new();
        for j in 0..cell.len() {
            let v = cell.vertex(j);
            poly.push((v[0], v[1]));
        }
        let hue = (i as f64 * 0.618_033_988_749_895).fract();
        let color = HSLColor(hue, 0.5, 0.6);
        chart.draw_series(std::iter::once(Polygon::new(poly.clone(), color.mix(0.5).filled())))?;
        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(poly, BLACK.stroke_width(1))))?;
    }

    if let Some(ring) = boundary {
        let mut outline = Vec::new();
        for j in 0..ring.len() {
            let v = ring.vertex(j);
            outline.push((v[0], v[1]));
        }
        outline.push(outline[0]);
        chart.draw_series(std::iter::once(PathElement::new(outline, RED.stroke_width(2))))?;
    }

    root.present()?;
    println!("wrote {}", filename);
    Ok(())
}
