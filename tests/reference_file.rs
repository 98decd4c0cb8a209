use std::path::PathBuf;

use fertilizer_advisor::{MeasurementInput, ReferenceData, compute, compute_with};

fn shipped_table() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/reference_data.toml")
}

#[test]
fn shipped_table_matches_builtin() {
    let loaded = ReferenceData::from_toml_file(shipped_table()).unwrap();
    assert_eq!(&loaded, ReferenceData::builtin());
}

#[test]
fn loaded_table_gives_same_recommendations() {
    let loaded = ReferenceData::from_toml_file(shipped_table()).unwrap();
    let input = MeasurementInput::new("potatoes", "silty").with_levels(800.0, 150.0, 2_000.0);
    assert_eq!(
        compute_with(&loaded, &input).unwrap(),
        compute(&input).unwrap()
    );
}

#[test]
fn custom_table_extends_crops() {
    let custom = r#"
        [[crop]]
        id = "barley"
        name = "Barley"
        nitrogen = 90.0
        phosphorus = 40.0
        potassium = 40.0
        npk_ratio = "4-2-2"
        application_timing = ["Pre-planting", "Tillering"]
        notes = ["Avoid lodging from excess nitrogen"]

        [[soil]]
        id = "loamy"
        nitrogen_factor = 1.0
        phosphorus_factor = 1.0
        potassium_factor = 1.0
    "#;
    let data = ReferenceData::from_toml_str(custom).unwrap();
    let rec = compute_with(&data, &MeasurementInput::new("barley", "loamy")).unwrap();
    assert_eq!(rec.crop_name, "Barley");
    assert_eq!(rec.total_fertilizer, 170.0);
    assert!(rec.soil_amendments.is_empty());

    // Built-in crops are not visible through a custom table
    assert!(
        compute_with(&data, &MeasurementInput::new("corn", "loamy"))
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn form_submission_end_to_end() {
    let input = MeasurementInput::from_form("corn", "sandy", "500", "", "oops", "3");
    let rec = compute(&input).unwrap();
    assert_eq!(rec.nitrogen_needed, 178.8);
    assert_eq!(rec.soil_type_label, "Sandy");
    assert_eq!(rec.field_totals(input.area_acres).unwrap().nitrogen, 536.4);
}
