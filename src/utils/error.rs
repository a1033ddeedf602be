use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset is missing required columns: {}", .missing.join(", "))]
    MissingColumnsError { missing: Vec<String> },

    #[error("Dataset '{path}' contains no listings")]
    EmptyDatasetError { path: String },

    #[error("Invalid model artifact: {message}")]
    ModelArtifactError { message: String },

    #[error("Unknown category '{value}' for feature '{feature}'")]
    UnknownCategoryError { feature: String, value: String },

    #[error("Feature '{feature}' is missing from the input record")]
    MissingFeatureError { feature: String },

    #[error("Model returned an unusable price: {value}")]
    InvalidPredictionError { value: f64 },

    #[error("'{value}' is not an available {field} option")]
    InvalidSelectionError { field: String, value: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Startup,
    Configuration,
    Inference,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictorError::CsvError(_)
            | PredictorError::IoError(_)
            | PredictorError::SerializationError(_)
            | PredictorError::MissingColumnsError { .. }
            | PredictorError::EmptyDatasetError { .. }
            | PredictorError::ModelArtifactError { .. } => ErrorCategory::Startup,
            PredictorError::ConfigError { .. } | PredictorError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PredictorError::UnknownCategoryError { .. }
            | PredictorError::MissingFeatureError { .. }
            | PredictorError::InvalidPredictionError { .. } => ErrorCategory::Inference,
            PredictorError::InvalidSelectionError { .. } | PredictorError::ValidationError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    /// 啟動錯誤一律視為致命，推論與輸入錯誤只影響單次互動
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Startup => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Inference => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::Low,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() >= ErrorSeverity::High
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictorError::IoError(e) => format!("Could not read a required file: {}", e),
            PredictorError::CsvError(e) => format!("The reference dataset could not be parsed: {}", e),
            PredictorError::SerializationError(e) => {
                format!("The model artifact is not valid JSON: {}", e)
            }
            PredictorError::UnknownCategoryError { feature, value } => format!(
                "The model has never seen {} '{}', so it cannot price this car",
                feature, value
            ),
            PredictorError::InvalidPredictionError { .. } => {
                "The model could not produce a usable price for this car".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PredictorError::IoError(_) => "Check that the dataset and model paths exist and are readable",
            PredictorError::CsvError(_)
            | PredictorError::MissingColumnsError { .. }
            | PredictorError::EmptyDatasetError { .. } => {
                "Provide a CSV with the columns name, company, fuel_type, year, kms_driven"
            }
            PredictorError::SerializationError(_) | PredictorError::ModelArtifactError { .. } => {
                "Re-export the trained model artifact and point --model at it"
            }
            PredictorError::ConfigError { .. } | PredictorError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and restart"
            }
            PredictorError::UnknownCategoryError { .. }
            | PredictorError::MissingFeatureError { .. } => {
                "The model and dataset are out of sync; retrain the model on this dataset"
            }
            PredictorError::InvalidPredictionError { .. } => "Try a different combination of inputs",
            PredictorError::InvalidSelectionError { .. } | PredictorError::ValidationError { .. } => {
                "Type 'show' to list the available options"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors_are_fatal() {
        let err = PredictorError::EmptyDatasetError {
            path: "cars.csv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Startup);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_inference_errors_are_recoverable() {
        let err = PredictorError::InvalidPredictionError { value: -3.0 };
        assert_eq!(err.category(), ErrorCategory::Inference);
        assert!(!err.is_fatal());
        assert!(err.user_friendly_message().contains("usable price"));
    }

    #[test]
    fn test_missing_columns_message_lists_columns() {
        let err = PredictorError::MissingColumnsError {
            missing: vec!["year".to_string(), "kms_driven".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Dataset is missing required columns: year, kms_driven"
        );
    }
}
