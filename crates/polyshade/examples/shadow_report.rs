//! Analyze a `.geom` file, or the bundled box fixture, and print the report.
//!
//! ```sh
//! cargo run -p polyshade --example shadow_report -- crates/polyshade/data/simple_2.geom
//! ```

use polyshade::{GeomFile, Orientation, ShadowConfig};

fn main() -> polyshade::Result<()> {
    let geom = match std::env::args().nth(1) {
        Some(path) => GeomFile::load(path)?,
        None => GeomFile::parse(include_str!("../data/box_simple.geom"))?,
    };

    let mut poly = geom.polyhedron(Orientation::Identity, ShadowConfig::default())?;
    let report = poly.analyze();

    println!("facets:           {}", report.facet_count);
    println!("edges:            {}", report.edge_count);
    println!("hidden edges:     {}", report.hidden_edges);
    println!("visible segments: {}", report.visible_segments);
    println!("partial facets:   {:?}", report.partial_facets);
    println!("P = {}", report.perimeter);
    Ok(())
}
