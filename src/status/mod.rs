//! # Simulated network status.
//!
//! A [`NetworkStatus`] is the small dashboard snapshot a tracking frontend
//! shows alongside the feed: how many vehicles are active, on time, delayed,
//! and the average delay. The simulator perturbs it on its own timer with a
//! clamped random walk — counts step by at most one, the average drifts in
//! small fractions, and every field stays inside the configured bounds.
//!
//! Like the feed, the snapshot is a plain owned value; shared access lives in
//! `core::handle`.

use rand::Rng;

/// Overall health bucket derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Operational,
    Degraded,
    Down,
}

impl Health {
    /// Returns a short stable label (snake_case) for logs and display glue.
    pub fn as_label(&self) -> &'static str {
        match self {
            Health::Operational => "operational",
            Health::Degraded => "degraded",
            Health::Down => "down",
        }
    }
}

/// Floors and ceilings for the random walk.
///
/// Defaults mirror the demo fleet (45 vehicles total, 35–45 active, 30–42 on
/// time, 0–10 delayed, average delay 0–10 minutes). None of these are
/// load-bearing; override them to fit a different fleet size.
#[derive(Debug, Clone, Copy)]
pub struct StatusBounds {
    pub active: (u32, u32),
    pub on_time: (u32, u32),
    pub delayed: (u32, u32),
    pub average_delay: (f64, f64),
}

impl Default for StatusBounds {
    fn default() -> Self {
        Self {
            active: (35, 45),
            on_time: (30, 42),
            delayed: (0, 10),
            average_delay: (0.0, 10.0),
        }
    }
}

/// One dashboard snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkStatus {
    /// Fleet size (static).
    pub total_vehicles: u32,
    /// Vehicles currently in service.
    pub active_vehicles: u32,
    /// Vehicles running on schedule.
    pub on_time: u32,
    /// Vehicles running behind schedule.
    pub delayed: u32,
    /// Mean delay across delayed vehicles, in minutes.
    pub average_delay_minutes: f64,
    /// Derived health bucket.
    pub health: Health,
}

impl Default for NetworkStatus {
    /// The demo fleet's starting point: 45 vehicles, 42 active, 38 on time,
    /// 4 delayed, 3.2 minutes average delay.
    fn default() -> Self {
        Self {
            total_vehicles: 45,
            active_vehicles: 42,
            on_time: 38,
            delayed: 4,
            average_delay_minutes: 3.2,
            health: Health::Operational,
        }
    }
}

impl NetworkStatus {
    /// Applies one random-walk step inside `bounds`.
    ///
    /// Counts move by -1, 0, or +1; the average delay drifts by at most a
    /// quarter minute. Health is re-derived after the step.
    pub fn jitter<R: Rng>(&mut self, rng: &mut R, bounds: &StatusBounds) {
        self.active_vehicles = step(self.active_vehicles, rng, bounds.active);
        self.on_time = step(self.on_time, rng, bounds.on_time);
        self.delayed = step(self.delayed, rng, bounds.delayed);

        let drift = (rng.random::<f64>() - 0.5) * 0.5;
        self.average_delay_minutes = (self.average_delay_minutes + drift)
            .clamp(bounds.average_delay.0, bounds.average_delay.1);

        self.health = self.derive_health();
    }

    /// Share of active vehicles running on time, as a whole percentage.
    ///
    /// Returns 100 when nothing is active (an idle network is not late).
    pub fn reliability(&self) -> u32 {
        if self.active_vehicles == 0 {
            return 100;
        }
        let pct = f64::from(self.on_time.min(self.active_vehicles)) * 100.0
            / f64::from(self.active_vehicles);
        pct.round() as u32
    }

    fn derive_health(&self) -> Health {
        if self.active_vehicles == 0 {
            Health::Down
        } else if self.delayed * 4 > self.active_vehicles {
            // More than a quarter of the active fleet is late.
            Health::Degraded
        } else {
            Health::Operational
        }
    }
}

/// One clamped ±1 step.
fn step<R: Rng>(value: u32, rng: &mut R, (lo, hi): (u32, u32)) -> u32 {
    let delta: i64 = rng.random_range(-1..=1);
    let next = i64::from(value) + delta;
    next.clamp(i64::from(lo), i64::from(hi)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_jitter_stays_within_bounds() {
        let bounds = StatusBounds::default();
        let mut status = NetworkStatus::default();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..2000 {
            status.jitter(&mut rng, &bounds);
            assert!(status.active_vehicles >= bounds.active.0);
            assert!(status.active_vehicles <= bounds.active.1);
            assert!(status.on_time >= bounds.on_time.0);
            assert!(status.on_time <= bounds.on_time.1);
            assert!(status.delayed >= bounds.delayed.0);
            assert!(status.delayed <= bounds.delayed.1);
            assert!(status.average_delay_minutes >= bounds.average_delay.0);
            assert!(status.average_delay_minutes <= bounds.average_delay.1);
        }
    }

    #[test]
    fn test_reliability_is_a_percentage() {
        let mut status = NetworkStatus::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            status.jitter(&mut rng, &StatusBounds::default());
            let r = status.reliability();
            assert!(r <= 100, "reliability {r} out of range");
        }
    }

    #[test]
    fn test_idle_network_reports_full_reliability() {
        let status = NetworkStatus {
            active_vehicles: 0,
            on_time: 0,
            ..NetworkStatus::default()
        };
        assert_eq!(status.reliability(), 100);
    }

    #[test]
    fn test_health_degrades_with_delays() {
        let mut status = NetworkStatus {
            active_vehicles: 20,
            delayed: 6,
            ..NetworkStatus::default()
        };
        assert_eq!(status.derive_health(), Health::Degraded);

        status.delayed = 5;
        assert_eq!(status.derive_health(), Health::Operational);

        status.active_vehicles = 0;
        assert_eq!(status.derive_health(), Health::Down);
    }
}
