use crate::core::dataset::{ReferenceDataset, TextColumn};
use crate::domain::model::OptionCatalog;
use std::collections::BTreeMap;

/// Derives every selectable option list from the reference dataset.
///
/// The result depends only on the dataset contents, so building twice from
/// the same snapshot yields equal catalogs.
pub fn build_catalog(dataset: &ReferenceDataset) -> OptionCatalog {
    let companies = sorted_strings(dataset.distinct_text(TextColumn::Company));
    let fuels = sorted_strings(dataset.distinct_text(TextColumn::FuelType));
    let years: Vec<i32> = dataset.distinct_years().into_iter().rev().collect();

    let models_by_company: BTreeMap<String, Vec<String>> = companies
        .iter()
        .map(|company| (company.clone(), models_for_company(dataset, company)))
        .collect();

    tracing::debug!(
        "Built option catalog: {} companies, {} fuel types, {} years",
        companies.len(),
        fuels.len(),
        years.len()
    );

    OptionCatalog {
        companies,
        fuels,
        years,
        models_by_company,
    }
}

/// Model names observed under `company`, recomputed on every company change.
pub fn models_for_company(dataset: &ReferenceDataset, company: &str) -> Vec<String> {
    sorted_strings(dataset.distinct_names_for_company(company))
}

fn sorted_strings<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    // BTreeSet 已排序，這裡只做擁有權轉換
    values.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,company,year,kms_driven,fuel_type
Swift VDI,Maruti,2017,30000,Diesel
City,Honda,2015,45000,Petrol
Alto 800,Maruti,2012,60000,Petrol
Swift VDI,Maruti,2017,12000,Diesel
Amaze,Honda,not a year,8000,CNG
Jazz,Honda,2015,,Petrol
";

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::from_reader(SAMPLE.as_bytes(), "sample.csv").unwrap()
    }

    #[test]
    fn test_companies_and_fuels_sorted_ascending_without_duplicates() {
        let catalog = build_catalog(&dataset());
        assert_eq!(catalog.companies, vec!["Honda", "Maruti"]);
        assert_eq!(catalog.fuels, vec!["CNG", "Diesel", "Petrol"]);
    }

    #[test]
    fn test_years_strictly_descending() {
        let catalog = build_catalog(&dataset());
        assert_eq!(catalog.years, vec![2017, 2015, 2012]);
        assert!(catalog.years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_models_filtered_by_company() {
        let dataset = dataset();
        let catalog = build_catalog(&dataset);

        assert_eq!(catalog.models_for("Maruti"), ["Alto 800", "Swift VDI"]);
        assert!(!catalog.models_for("Maruti").contains(&"City".to_string()));
        assert_eq!(catalog.models_for("Honda"), ["Amaze", "City", "Jazz"]);
        assert!(catalog.models_for("Tata").is_empty());

        for company in &catalog.companies {
            for model in catalog.models_for(company) {
                assert!(dataset.records().iter().any(|r| {
                    r.company.as_deref() == Some(company.as_str())
                        && r.name.as_deref() == Some(model.as_str())
                }));
            }
        }
    }

    #[test]
    fn test_models_scenario_two_companies() {
        let csv = "\
name,company,fuel_type,year,kms_driven
Swift VDI,Maruti,Diesel,2017,30000
City,Honda,Petrol,2015,45000
";
        let dataset = ReferenceDataset::from_reader(csv.as_bytes(), "scenario.csv").unwrap();
        assert_eq!(models_for_company(&dataset, "Maruti"), vec!["Swift VDI"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let dataset = dataset();
        assert_eq!(build_catalog(&dataset), build_catalog(&dataset));
    }

    #[test]
    fn test_case_is_preserved() {
        let csv = "\
name,company,fuel_type,year,kms_driven
Nano,tata,Petrol,2011,1000
Indica,Tata,Diesel,2010,2000
";
        let dataset = ReferenceDataset::from_reader(csv.as_bytes(), "case.csv").unwrap();
        let catalog = build_catalog(&dataset);
        assert_eq!(catalog.companies, vec!["Tata", "tata"]);
    }
}
