//! Synthetic update generation: randomness, templates, and the vehicle seam.
//!
//! ## Contents
//! - [`UpdateGenerator`] — seedable probability-gated draft synthesis
//! - [`VehicleDirectory`], [`StaticDirectory`] — vehicle/route label seam
//! - `catalog` (private) — the weighted message templates

mod catalog;
mod directory;
#[allow(clippy::module_inception)]
mod generator;

pub use directory::{StaticDirectory, VehicleDirectory};
pub use generator::UpdateGenerator;
