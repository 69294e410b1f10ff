//! Country and electricity cost enrichment.

pub mod costs;
pub mod geocode;

pub use costs::{fold_name, CostEntry, CostObservation, CostTable, MatchKind};
pub use geocode::{NominatimGeocoder, ReverseGeocoder};
