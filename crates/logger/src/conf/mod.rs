//! Conf module — logger configuration model and loading.

pub mod load;
pub mod model;

pub use model::LoggerConfig;
