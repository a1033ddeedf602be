pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::linear_model::LinearRegressionModel;
pub use config::Settings;
pub use crate::core::{app::PredictorApp, context::AppContext, controller::InteractionController};
pub use utils::error::{PredictorError, Result};
