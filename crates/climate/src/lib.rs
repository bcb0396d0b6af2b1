pub mod dates;
pub mod db;
pub mod routes;
pub mod startup;
pub mod stats;
pub mod summary;
pub mod templates;
mod utils;

pub use db::{ClimateAccess, ClimateData, Observation, Tables};
pub use routes::*;
pub use startup::*;
pub use stats::TemperatureSummary;
pub use summary::ClimateSummary;
pub use utils::*;
