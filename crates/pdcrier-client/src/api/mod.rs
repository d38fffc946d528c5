//! API endpoint modules.

mod incidents;

pub use incidents::{CreateIncidentBuilder, IncidentApi};
