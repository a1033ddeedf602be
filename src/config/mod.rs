#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::context::DEFAULT_DISCLAIMER;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_DATASET_PATH: &str = "Data/quikr_car.csv";
pub const DEFAULT_MODEL_PATH: &str = "LinearRegressionModel.json";

/// Fully resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dataset_path: String,
    pub model_path: String,
    pub currency_symbol: String,
    pub dark_mode: bool,
    pub disclaimer: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            currency_symbol: "₹".to_string(),
            dark_mode: false,
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
        }
    }
}

impl Settings {
    pub fn merge_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(data) = &file.data {
            if let Some(path) = &data.dataset_path {
                self.dataset_path = path.clone();
            }
        }
        if let Some(model) = &file.model {
            if let Some(path) = &model.artifact_path {
                self.model_path = path.clone();
            }
        }
        if let Some(display) = &file.display {
            if let Some(symbol) = &display.currency_symbol {
                self.currency_symbol = symbol.clone();
            }
            if let Some(dark_mode) = display.dark_mode {
                self.dark_mode = dark_mode;
            }
            if let Some(disclaimer) = &display.disclaimer {
                self.disclaimer = disclaimer.clone();
            }
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    fn disclaimer(&self) -> &str {
        &self.disclaimer
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("dataset_path", &self.dataset_path)?;
        validate_file_extension("dataset_path", &self.dataset_path, &["csv"])?;

        validate_path("model_path", &self.model_path)?;
        validate_file_extension("model_path", &self.model_path, &["json"])?;

        validate_non_empty_string("currency_symbol", &self.currency_symbol)?;
        Ok(())
    }
}
