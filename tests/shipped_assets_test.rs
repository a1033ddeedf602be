use car_price_predictor::core::controller::{Outcome, UserEvent};
use car_price_predictor::{PredictorApp, Settings};
use std::path::Path;

fn shipped_settings() -> Settings {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    Settings {
        dataset_path: root.join("Data/quikr_car.csv").to_str().unwrap().to_string(),
        model_path: root
            .join("LinearRegressionModel.json")
            .to_str()
            .unwrap()
            .to_string(),
        ..Settings::default()
    }
}

#[test]
fn test_shipped_dataset_and_model_load() {
    let app = PredictorApp::from_config(&shipped_settings()).unwrap();
    let catalog = app.context().catalog();

    assert_eq!(catalog.years.first(), Some(&2017));
    assert!(catalog.companies.windows(2).all(|w| w[0] < w[1]));
    assert!(catalog.fuels.contains(&"LPG".to_string()));
}

#[test]
fn test_every_offered_model_is_known_to_the_artifact() {
    let app = PredictorApp::from_config(&shipped_settings()).unwrap();
    let catalog = app.context().catalog();

    for company in &catalog.companies {
        for model in catalog.models_for(company) {
            let mut controller = app.controller();
            controller.handle(UserEvent::SelectCompany(company.clone()));
            controller.handle(UserEvent::SelectModel(model.clone()));
            controller.handle(UserEvent::SetKmsDriven(30000));

            match controller.handle(UserEvent::Submit) {
                Outcome::Estimated(estimate) => {
                    assert!(estimate.formatted_price.starts_with("₹ "));
                }
                other => panic!("{} {} could not be priced: {:?}", company, model, other),
            }
        }
    }
}
