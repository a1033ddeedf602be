use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "car-price-predictor")]
#[command(about = "Predict the resale price of a used car from historical listings")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Reference dataset CSV [default: Data/quikr_car.csv]")]
    pub dataset: Option<String>,

    #[arg(long, help = "Model artifact JSON [default: LinearRegressionModel.json]")]
    pub model: Option<String>,

    #[arg(long, help = "Currency symbol shown before prices [default: ₹]")]
    pub currency_symbol: Option<String>,

    #[arg(long, help = "Start in dark mode")]
    pub dark_mode: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Flags given on the command line win over the configuration file.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(path) = &self.config {
            tracing::debug!("Reading configuration from {}", path);
            settings = settings.merge_toml(&TomlConfig::from_file(path)?);
        }

        if let Some(dataset) = &self.dataset {
            settings.dataset_path = dataset.clone();
        }
        if let Some(model) = &self.model {
            settings.model_path = model.clone();
        }
        if let Some(symbol) = &self.currency_symbol {
            settings.currency_symbol = symbol.clone();
        }
        if self.dark_mode {
            settings.dark_mode = true;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "car-price-predictor",
            "--dataset",
            "cars.csv",
            "--dark-mode",
            "--verbose",
        ]);
        assert_eq!(cli.dataset.as_deref(), Some("cars.csv"));
        assert!(cli.dark_mode);
        assert!(cli.verbose);
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[data]\ndataset_path = \"from_file.csv\"\n[model]\nartifact_path = \"from_file.json\"\n",
            )
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_str().unwrap().to_string()),
            dataset: Some("from_flag.csv".to_string()),
            ..CliConfig::default()
        };

        let settings = cli.settings().unwrap();
        assert_eq!(settings.dataset_path, "from_flag.csv");
        assert_eq!(settings.model_path, "from_file.json");
    }
}
