//! Serde roundtrip and JsonSchema validation for the entity types.

use schemars::schema_for;
use scape_core::entities::{Article, Report, Scent};
use scape_core::enums::SmellCategory;
use scape_core::samples::{sample_articles, sample_reports, sample_scents};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(report_roundtrip, Report, sample_reports().remove(0));

roundtrip_and_validate!(
    report_without_coordinates_roundtrip,
    Report,
    sample_reports().remove(2)
);

roundtrip_and_validate!(
    report_with_unrecognized_category_roundtrip,
    Report,
    Report {
        category: SmellCategory::Unrecognized("industrial".into()),
        ..sample_reports().remove(1)
    }
);

roundtrip_and_validate!(article_roundtrip, Article, sample_articles().remove(0));

roundtrip_and_validate!(scent_roundtrip, Scent, sample_scents().remove(0));

#[test]
fn report_category_serializes_as_plain_string() {
    let value = serde_json::to_value(sample_reports().remove(0)).unwrap();
    assert_eq!(value["category"], "nature");
}
