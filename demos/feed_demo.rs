//! Runs the simulator with the built-in log subscriber.
//!
//! ```sh
//! RUST_LOG=info cargo run --example feed_demo --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use fleetpulse::{Config, LogWriter, Severity, Simulator, Subscribe, UpdateDraft, UpdateKind};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut cfg = Config::default();
    // Tighten the demo timers so something happens quickly.
    cfg.feed_period = Duration::from_secs(3);
    cfg.status_period = Duration::from_secs(2);
    cfg.generation_probability = 0.6;

    let seeds = vec![
        UpdateDraft::new(
            UpdateKind::Delay,
            Severity::Medium,
            "Bus Delayed",
            "BUS001 is running 5 minutes late due to traffic",
        )
        .with_vehicle("BUS001")
        .with_route("City Center - Airport"),
        UpdateDraft::new(
            UpdateKind::Arrival,
            Severity::Low,
            "Bus Arriving Soon",
            "BUS002 will arrive at University Campus in 3 minutes",
        )
        .with_vehicle("BUS002")
        .with_route("Downtown - University"),
        UpdateDraft::new(
            UpdateKind::Alert,
            Severity::High,
            "Route Change",
            "Temporary route change for BUS003 due to road construction",
        )
        .with_vehicle("BUS003")
        .with_route("Mall - Business District"),
    ];

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let sim = Simulator::builder(cfg)
        .with_subscribers(subs)
        .with_seed_updates(seeds, 2)
        .build();

    let feed = sim.feed();
    println!(
        "seeded: {} updates, {} unread — Ctrl-C to stop",
        feed.len(),
        feed.unread_count()
    );

    match sim.run().await {
        Ok(()) => println!("simulator stopped gracefully"),
        Err(e) => println!("simulator stopped with error: {e}"),
    }

    Ok(())
}
