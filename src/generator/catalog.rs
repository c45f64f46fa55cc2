//! Message templates the generator draws from.
//!
//! Each template pairs an update kind with its display strings and severity.
//! Templates carry a weight so common situations (delays, arrivals) dominate
//! the synthesized stream while alerts stay rare. `{vehicle}` and `{minutes}`
//! placeholders are filled in by the generator.

use crate::updates::{Severity, UpdateKind};

/// One entry in the template catalog.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Template {
    pub kind: UpdateKind,
    pub severity: Severity,
    pub title: &'static str,
    pub message: &'static str,
    pub weight: u32,
}

/// The built-in catalog.
///
/// Delay and arrival dominate; departures are occasional; alerts are rare
/// and high-severity.
pub(crate) const CATALOG: &[Template] = &[
    Template {
        kind: UpdateKind::Delay,
        severity: Severity::Medium,
        title: "Bus Delayed",
        message: "{vehicle} is running {minutes} minutes late due to traffic",
        weight: 4,
    },
    Template {
        kind: UpdateKind::Delay,
        severity: Severity::Low,
        title: "Minor Delay",
        message: "{vehicle} is running slightly behind schedule",
        weight: 3,
    },
    Template {
        kind: UpdateKind::Arrival,
        severity: Severity::Low,
        title: "Bus Arriving Soon",
        message: "{vehicle} will arrive in {minutes} minutes",
        weight: 4,
    },
    Template {
        kind: UpdateKind::Departure,
        severity: Severity::Low,
        title: "Bus Departed",
        message: "{vehicle} has departed and is en route",
        weight: 2,
    },
    Template {
        kind: UpdateKind::Alert,
        severity: Severity::High,
        title: "Route Change",
        message: "Temporary route change for {vehicle} due to road construction",
        weight: 1,
    },
];

/// Sum of all template weights.
pub(crate) fn total_weight() -> u32 {
    CATALOG.iter().map(|t| t.weight).sum()
}

/// Selects the template for a roll in `0..total_weight()`.
pub(crate) fn pick(mut roll: u32) -> &'static Template {
    for t in CATALOG {
        if roll < t.weight {
            return t;
        }
        roll -= t.weight;
    }
    // roll is always drawn below total_weight; the last template is only
    // reached through the loop above.
    &CATALOG[CATALOG.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_roll_maps_to_a_template() {
        let total = total_weight();
        assert!(total > 0);
        for roll in 0..total {
            let t = pick(roll);
            assert!(!t.title.is_empty());
        }
    }

    #[test]
    fn test_weights_cover_catalog_in_order() {
        assert_eq!(pick(0).title, CATALOG[0].title);
        let total = total_weight();
        assert_eq!(pick(total - 1).title, CATALOG[CATALOG.len() - 1].title);
    }
}
