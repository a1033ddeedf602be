use crate::core::catalog::{build_catalog, models_for_company};
use crate::core::dataset::ReferenceDataset;
use crate::domain::model::OptionCatalog;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

pub const DEFAULT_DISCLAIMER: &str = "Price is an estimate based on historical data.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub disclaimer: String,
    pub dark_mode: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
            dark_mode: false,
        }
    }
}

/// Process-wide, read-only state built once at startup and lent to every
/// component that needs it.
#[derive(Debug)]
pub struct AppContext {
    dataset: ReferenceDataset,
    catalog: OptionCatalog,
    display: DisplaySettings,
}

impl AppContext {
    pub fn new(dataset: ReferenceDataset, display: DisplaySettings) -> Self {
        let catalog = build_catalog(&dataset);
        tracing::debug!("Option catalog derived from {}", dataset.source());
        Self {
            dataset,
            catalog,
            display,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let dataset = ReferenceDataset::from_path(config.dataset_path())?;
        let display = DisplaySettings {
            currency_symbol: config.currency_symbol().to_string(),
            disclaimer: config.disclaimer().to_string(),
            dark_mode: config.dark_mode(),
        };
        Ok(Self::new(dataset, display))
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    /// Re-derives the model list for `company` from the dataset.
    pub fn models_for(&self, company: &str) -> Vec<String> {
        models_for_company(&self.dataset, company)
    }
}
