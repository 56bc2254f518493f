//! Textures the top of a slab and builds a small tile relief, printing what
//! was produced.
//!
//! ```text
//! cargo run --example honeycomb                    # default log level
//! RUST_LOG=relief=debug cargo run --example honeycomb
//! ```

use relief::merge::MergeOptions;
use relief::progress::ProgressEvent;
use relief::texture::{HoneycombTexture, TextureKind};
use relief::tile::{relief_from_levels, LevelGrid, ReliefParams};
use relief::topology::TopologyStore;
use relief::workplane::Workplane;

fn main() -> relief::Result<()> {
    // Default: WARN for everything, INFO for relief.
    // Override with RUST_LOG env var (e.g. RUST_LOG=relief=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("relief=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut store = TopologyStore::new();
    let texture = TextureKind::from(
        HoneycombTexture::new(5.0, 0.5, 2.0)
            .height_steps(4)
            .rotation_degrees(15.0)
            .random_seed(42),
    );
    let mut log_progress = |e: &ProgressEvent| {
        println!("{}: {}/{} ({:.0}%)", e.stage, e.done, e.total, e.fraction() * 100.0);
    };
    let wp = Workplane::new(&mut store)
        .make_box(50.0, 50.0, 10.0)?
        .faces(">Z")?
        .texture(&texture, &mut log_progress)?;
    if let Some(report) = wp.last_texture() {
        println!(
            "honeycomb: {} faces, {} hexagons ({} skipped)",
            report.faces_textured, report.hexagons_built, report.hexagons_skipped
        );
    }
    if let Some(aabb) = wp.bounding_box()? {
        println!("textured bounds: {:?} .. {:?}", aabb.min, aabb.max);
    }

    let levels = LevelGrid::new(4, 4, vec![0, 1, 2, 3, 1, 2, 3, 4, 2, 3, 4, 5, 3, 4, 5, 6])?;
    let relief = relief_from_levels(
        &mut store,
        &levels,
        &ReliefParams::default(),
        &MergeOptions::default(),
        &mut log_progress,
    )?;
    println!("relief solid: {relief:?}, store holds {} solids", store.solid_count());
    Ok(())
}
