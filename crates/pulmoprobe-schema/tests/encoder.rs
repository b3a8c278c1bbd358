use pulmoprobe_core::FormInput;
use pulmoprobe_schema::{encode, EncodeError, FieldKind, IntakeSchema};

fn example_patient() -> FormInput {
    FormInput::new()
        .with("age", "55")
        .with("bmi", "22.5")
        .with("cholesterol_level", "180")
        .with("gender", "Male")
        .with("country", "Sweden")
        .with("cancer_stage", "Stage II")
        .with("smoking_status", "Never Smoked")
        .with("treatment_type", "Surgery")
        .with("hypertension", "0")
        .with("asthma", "0")
        .with("cirrhosis", "0")
        .with("other_cancer", "0")
        .with("family_history", "0")
}

#[test]
fn encodes_example_patient() {
    let schema = IntakeSchema::canonical();
    let v = encode(schema, &example_patient()).unwrap();

    assert_eq!(v.get("gender_Male"), Some(1.0));
    assert_eq!(v.get("gender_Female"), Some(0.0));
    assert_eq!(v.get("country_Sweden"), Some(1.0));
    for key in v.keys().filter(|k| k.starts_with("country_") && *k != "country_Sweden") {
        assert_eq!(v.get(key), Some(0.0), "{key} should be cold");
    }
    assert_eq!(v.get("cancer_stage_Stage II"), Some(1.0));
    assert_eq!(v.get("cancer_stage_Stage I"), Some(0.0));
    assert_eq!(v.get("cancer_stage_Stage III"), Some(0.0));
    assert_eq!(v.get("cancer_stage_Stage IV"), Some(0.0));
    assert_eq!(v.get("age"), Some(55.0));
    assert_eq!(v.get("bmi"), Some(22.5));
    assert_eq!(v.get("cholesterol_level"), Some(180.0));
    assert_eq!(v.get("hypertension"), Some(0.0));
    assert!(v.cold_fields().is_empty());
}

#[test]
fn key_set_matches_schema_exactly() {
    let schema = IntakeSchema::canonical();
    let v = encode(schema, &example_patient()).unwrap();

    let mut expected = Vec::new();
    for field in &schema.fields {
        match &field.kind {
            FieldKind::Categorical { options } => {
                expected.extend(options.iter().map(|o| field.indicator_key(o)));
            }
            _ => expected.push(field.name.clone()),
        }
    }
    let actual: Vec<String> = v.keys().map(str::to_string).collect();
    assert_eq!(actual, expected);
    assert_eq!(v.len(), schema.feature_width());
}

#[test]
fn encoding_is_deterministic() {
    let schema = IntakeSchema::canonical();
    let a = encode(schema, &example_patient()).unwrap();
    let b = encode(schema, &example_patient()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn every_selection_sets_exactly_one_indicator() {
    let schema = IntakeSchema::canonical();
    for field in &schema.fields {
        for option in field.options() {
            let mut input = example_patient();
            input.set(field.name.as_str(), option.as_str());
            let v = encode(schema, &input).unwrap();

            let hot: Vec<&str> = field
                .options()
                .iter()
                .filter(|o| v.get(&field.indicator_key(o)) == Some(1.0))
                .map(String::as_str)
                .collect();
            assert_eq!(hot, vec![option.as_str()], "field {}", field.name);
        }
    }
}

#[test]
fn numeric_passthrough_matches_float_parse() {
    let schema = IntakeSchema::canonical();
    for (age, bmi, chol) in [("18", "10", "100"), ("100", "60", "400"), ("42.5", "31.7", "250.25")] {
        let input = example_patient()
            .with("age", age)
            .with("bmi", bmi)
            .with("cholesterol_level", chol);
        let v = encode(schema, &input).unwrap();
        assert_eq!(v.get("age"), age.parse::<f64>().ok());
        assert_eq!(v.get("bmi"), bmi.parse::<f64>().ok());
        assert_eq!(v.get("cholesterol_level"), chol.parse::<f64>().ok());
    }
}

#[test]
fn unset_category_encodes_cold() {
    let schema = IntakeSchema::canonical();
    let input = example_patient().with("cancer_stage", "");
    let v = encode(schema, &input).unwrap();

    for option in schema.field("cancer_stage").unwrap().options() {
        assert_eq!(v.get(&format!("cancer_stage_{option}")), Some(0.0));
    }
    assert_eq!(v.cold_fields(), ["cancer_stage".to_string()]);
}

#[test]
fn unknown_category_is_rejected() {
    let schema = IntakeSchema::canonical();
    let input = example_patient().with("country", "Portugal");
    assert!(matches!(
        encode(schema, &input),
        Err(EncodeError::UnknownCategory { field, value }) if field == "country" && value == "Portugal"
    ));
}

#[test]
fn flags_encode_as_zero_or_one() {
    let schema = IntakeSchema::canonical();
    let input = example_patient()
        .with("asthma", "1")
        .with("cirrhosis", "true");
    let v = encode(schema, &input).unwrap();
    assert_eq!(v.get("asthma"), Some(1.0));
    assert_eq!(v.get("cirrhosis"), Some(1.0));

    let bad = example_patient().with("asthma", "maybe");
    assert!(matches!(encode(schema, &bad), Err(EncodeError::InvalidFlag { .. })));
}

#[test]
fn non_numeric_value_is_rejected() {
    let schema = IntakeSchema::canonical();
    let input = example_patient().with("bmi", "22,5");
    assert!(matches!(
        encode(schema, &input),
        Err(EncodeError::NotANumber { field, .. }) if field == "bmi"
    ));
}
