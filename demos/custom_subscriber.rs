//! A custom subscriber acting as the "notification bell": it keeps the
//! unread badge count current and acknowledges everything after a while.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fleetpulse::{Config, EventKind, FeedEvent, Simulator, Subscribe};

/// Mirrors the unread counter badge next to the bell icon.
struct UnreadBadge {
    unread: Arc<AtomicUsize>,
}

#[async_trait]
impl Subscribe for UnreadBadge {
    async fn on_event(&self, ev: &FeedEvent) {
        if let Some(unread) = ev.unread {
            self.unread.store(unread, Ordering::SeqCst);
        }
        match ev.kind {
            EventKind::UpdatePublished => {
                if let Some(u) = &ev.update {
                    println!("🔔 {} — {}", u.title, u.message);
                }
            }
            EventKind::AllAcknowledged => println!("badge cleared"),
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "unread_badge"
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let mut cfg = Config::default();
    cfg.feed_period = Duration::from_secs(2);
    cfg.generation_probability = 1.0;
    cfg.seed = Some(7);

    let unread = Arc::new(AtomicUsize::new(0));
    let badge: Arc<dyn Subscribe> = Arc::new(UnreadBadge {
        unread: Arc::clone(&unread),
    });

    let sim = Arc::new(Simulator::builder(cfg).with_subscribers(vec![badge]).build());
    let feed = sim.feed();

    // Rider reads the panel after 10 seconds, then the app closes.
    {
        let sim = Arc::clone(&sim);
        let unread = Arc::clone(&unread);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            println!("badge shows {} unread", unread.load(Ordering::SeqCst));
            feed.acknowledge_all();
            tokio::time::sleep(Duration::from_secs(1)).await;
            sim.stop();
        });
    }

    sim.run().await?;
    Ok(())
}
