//! Headless session walkthrough: seed a tree, place pledges through every
//! flow, cycle the layouts and report draw-call totals per phase.
//!
//! Run with `cargo run --example headless_run`.

use canopy::{
    NullSurface, PillarId, Placement, RecordingSurface, Session, SessionConfig,
};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut session = Session::new(SessionConfig::default())?;

    // Seed the tree with a crowd, then one animated pledge.
    let report = session.place_bulk(150)?;
    tracing::info!(placed = report.placed, "bulk seeded");

    let placement = session.place_pledge("Ada", PillarId(0), "Every drop counts", None)?;
    if let Placement::Started { slot, .. } = placement {
        tracing::info!(slot = slot.0, "animated placement started");
    }

    // 10 seconds at 60fps.
    let mut surface = NullSurface;
    for frame in 0..600 {
        session.advance(frame as f64 / 60.0, &mut surface);
    }
    tracing::info!(
        occupied = session.occupied_count(),
        total = session.total_placed(),
        people = session.people_count(),
        "tree settled"
    );

    // One recorded frame per mode, to compare draw-call shapes.
    let mut clock = 10.0;
    for (name, enter) in [
        ("tree", None),
        ("chart", Some(true)),
        ("screensaver", Some(false)),
    ] {
        match enter {
            Some(true) => session.enter_chart_mode(),
            Some(false) => {
                session.exit_chart_mode();
                session.enter_screensaver();
            }
            None => {}
        }
        // Let the blend settle before recording.
        for _ in 0..400 {
            clock += 1.0 / 60.0;
            session.advance(clock, &mut surface);
        }
        let mut recording = RecordingSurface::new();
        session.advance(clock, &mut recording);
        tracing::info!(mode = name, draw_ops = recording.ops.len(), "frame recorded");
    }

    Ok(())
}
