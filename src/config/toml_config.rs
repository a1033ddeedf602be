use crate::utils::error::{PredictorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub data: Option<DataConfig>,
    pub model: Option<ModelConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dataset_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency_symbol: Option<String>,
    pub dark_mode: Option<bool>,
    pub disclaimer: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| PredictorError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PredictorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[data]
dataset_path = "Data/quikr_car.csv"

[model]
artifact_path = "models/linear.json"

[display]
currency_symbol = "₹"
dark_mode = true
disclaimer = "Estimate only."
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.data.unwrap().dataset_path.as_deref(),
            Some("Data/quikr_car.csv")
        );
        assert_eq!(
            config.model.unwrap().artifact_path.as_deref(),
            Some("models/linear.json")
        );
        let display = config.display.unwrap();
        assert_eq!(display.dark_mode, Some(true));
        assert_eq!(display.disclaimer.as_deref(), Some("Estimate only."));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CAR_PRICE_TEST_DATA_DIR", "/srv/cars");

        let toml_content = r#"
[data]
dataset_path = "${CAR_PRICE_TEST_DATA_DIR}/quikr_car.csv"

[model]
artifact_path = "${CAR_PRICE_TEST_UNSET_VAR}/model.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.data.unwrap().dataset_path.as_deref(),
            Some("/srv/cars/quikr_car.csv")
        );
        assert_eq!(
            config.model.unwrap().artifact_path.as_deref(),
            Some("${CAR_PRICE_TEST_UNSET_VAR}/model.json")
        );

        std::env::remove_var("CAR_PRICE_TEST_DATA_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[display\ndark_mode = maybe"),
            Err(PredictorError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\ncurrency_symbol = \"Rs.\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.display.unwrap().currency_symbol.as_deref(),
            Some("Rs.")
        );
    }

    #[test]
    fn test_missing_file_is_config_error() {
        assert!(matches!(
            TomlConfig::from_file("no/such/predictor.toml"),
            Err(PredictorError::ConfigError { .. })
        ));
    }
}
