pub mod app;
pub mod catalog;
pub mod context;
pub mod controller;
pub mod dataset;
pub mod gateway;

pub use crate::domain::model::{
    FeatureRow, FeatureValue, ListingRecord, OptionCatalog, PredictionInput, PredictionResult,
};
pub use crate::domain::ports::{ConfigProvider, PriceModel};
pub use crate::utils::error::Result;
