//! # Vehicle/route directory seam.
//!
//! The generator needs display labels for the vehicles it mentions. The
//! directory is an opaque collaborator: it resolves a vehicle id to a route
//! display label, or nothing. There is no referential-integrity contract —
//! an update may reference a vehicle the directory has since forgotten.

use std::sync::Arc;

/// Resolves vehicle ids to display labels.
///
/// Implementations are consulted by the generator when synthesizing updates
/// and may be backed by anything (static tables, a host app's model, ...).
pub trait VehicleDirectory: Send + Sync + 'static {
    /// Ids of the vehicles currently worth mentioning, in no particular order.
    fn vehicle_ids(&self) -> Vec<Arc<str>>;

    /// Display label of the route the vehicle serves, if known.
    fn route_label(&self, vehicle_id: &str) -> Option<Arc<str>>;
}

/// In-memory directory over a fixed `(vehicle id, route label)` table.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    entries: Vec<(Arc<str>, Arc<str>)>,
}

impl StaticDirectory {
    /// Builds a directory from `(vehicle id, route label)` pairs.
    pub fn new<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<Arc<str>>,
        T: Into<Arc<str>>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, label)| (id.into(), label.into()))
                .collect(),
        }
    }

    /// The small demo fleet used by the examples and as the builder default.
    pub fn demo_fleet() -> Self {
        Self::new([
            ("BUS001", "City Center - Airport"),
            ("BUS002", "Downtown - University"),
            ("BUS003", "Mall - Business District"),
        ])
    }
}

impl VehicleDirectory for StaticDirectory {
    fn vehicle_ids(&self) -> Vec<Arc<str>> {
        self.entries.iter().map(|(id, _)| Arc::clone(id)).collect()
    }

    fn route_label(&self, vehicle_id: &str) -> Option<Arc<str>> {
        self.entries
            .iter()
            .find(|(id, _)| id.as_ref() == vehicle_id)
            .map(|(_, label)| Arc::clone(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_fleet_resolves_labels() {
        let dir = StaticDirectory::demo_fleet();
        assert_eq!(dir.vehicle_ids().len(), 3);
        assert_eq!(
            dir.route_label("BUS002").as_deref(),
            Some("Downtown - University")
        );
        assert!(dir.route_label("BUS999").is_none());
    }
}
