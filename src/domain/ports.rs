use crate::domain::model::FeatureRow;
use crate::utils::error::Result;

/// A trained regression model with a single capability.
pub trait PriceModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64>;
}

pub trait ConfigProvider {
    fn dataset_path(&self) -> &str;
    fn model_path(&self) -> &str;
    fn currency_symbol(&self) -> &str;
    fn dark_mode(&self) -> bool;
    fn disclaimer(&self) -> &str;
}
