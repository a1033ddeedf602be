use crate::domain::model::{ListingRecord, FEATURE_COLUMNS};
use crate::utils::error::{PredictorError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

static KMS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([\d,]+)(\s*kms?)?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    Name,
    Company,
    FuelType,
}

// CSV 原始列，欄位型別在轉成 ListingRecord 時才驗證
#[derive(Debug, Deserialize)]
struct RawListing {
    name: Option<String>,
    company: Option<String>,
    fuel_type: Option<String>,
    year: Option<String>,
    kms_driven: Option<String>,
}

impl From<RawListing> for ListingRecord {
    fn from(raw: RawListing) -> Self {
        Self {
            name: non_empty(raw.name),
            company: non_empty(raw.company),
            fuel_type: non_empty(raw.fuel_type),
            year: raw.year.as_deref().and_then(parse_year),
            kms_driven: raw.kms_driven.as_deref().and_then(parse_kms),
        }
    }
}

/// Read-only in-memory copy of the historical listings.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    source: String,
    records: Vec<ListingRecord>,
}

impl ReferenceDataset {
    /// 從 CSV 檔案載入，檔案不存在或格式錯誤即為致命錯誤
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading reference dataset from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }

    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<String> = FEATURE_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PredictorError::MissingColumnsError { missing });
        }

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<RawListing>() {
            records.push(ListingRecord::from(row?));
        }

        if records.is_empty() {
            return Err(PredictorError::EmptyDatasetError {
                path: source.to_string(),
            });
        }

        let without_year = records.iter().filter(|r| r.year.is_none()).count();
        tracing::info!(
            "📄 Loaded {} listings from {} ({} without a usable year)",
            records.len(),
            source,
            without_year
        );

        Ok(Self {
            source: source.to_string(),
            records,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct non-null values of a text column.
    pub fn distinct_text(&self, column: TextColumn) -> BTreeSet<&str> {
        self.records
            .iter()
            .filter_map(|record| text_value(record, column))
            .collect()
    }

    pub fn distinct_years(&self) -> BTreeSet<i32> {
        self.records.iter().filter_map(|record| record.year).collect()
    }

    pub fn distinct_names_for_company(&self, company: &str) -> BTreeSet<&str> {
        self.records
            .iter()
            .filter(|record| record.company.as_deref() == Some(company))
            .filter_map(|record| record.name.as_deref())
            .collect()
    }
}

fn text_value(record: &ListingRecord, column: TextColumn) -> Option<&str> {
    match column {
        TextColumn::Name => record.name.as_deref(),
        TextColumn::Company => record.company.as_deref(),
        TextColumn::FuelType => record.fuel_type.as_deref(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_year(value: &str) -> Option<i32> {
    let year = match value.parse::<i32>() {
        Ok(year) => year,
        Err(_) => {
            let float = value.parse::<f64>().ok()?;
            if float.fract() != 0.0 || float < 0.0 || float > f64::from(i32::MAX) {
                return None;
            }
            float as i32
        }
    };
    (year >= 0).then_some(year)
}

fn parse_kms(value: &str) -> Option<u64> {
    let caps = KMS_PATTERN.captures(value)?;
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
