//! Value transformation evaluator
//!
//! Converts a raw local value into the representation expected by a
//! global schema property. Each rule only acts on the value type it
//! matches; a mismatch leaves the value untouched rather than failing,
//! so projection never drops data.

use schema_mapper_core::types::TransformationRules;
use serde_json::{Number, Value};
use tracing::debug;

/// Apply a mapping's transformation rules to a raw value
///
/// Identity when no rules are configured. `unit_conversion` acts on
/// numeric values only and always yields a float; `string_normalization`
/// acts on string values only, lower-casing before stripping.
#[must_use]
pub fn apply_transformations(value: &Value, rules: &TransformationRules) -> Value {
    if rules.is_empty() {
        return value.clone();
    }

    let mut current = value.clone();

    if let Some(conversion) = &rules.unit_conversion {
        current = match current.as_f64() {
            Some(numeric) => {
                let converted = numeric * conversion.factor + conversion.offset;
                match Number::from_f64(converted) {
                    Some(number) => Value::Number(number),
                    None => {
                        debug!(
                            factor = conversion.factor,
                            offset = conversion.offset,
                            "unit conversion produced a non-finite number, keeping original value"
                        );
                        current
                    }
                }
            }
            None => {
                debug!("unit_conversion skipped, value is not numeric");
                current
            }
        };
    }

    if let Some(normalization) = &rules.string_normalization {
        current = match current {
            Value::String(mut text) => {
                if normalization.lowercase {
                    text = text.to_lowercase();
                }
                if normalization.strip {
                    text = text.trim().to_string();
                }
                Value::String(text)
            }
            other => {
                debug!("string_normalization skipped, value is not a string");
                other
            }
        };
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use schema_mapper_core::types::{StringNormalization, UnitConversion};
    use serde_json::json;

    fn conversion_rules(factor: f64, offset: f64) -> TransformationRules {
        TransformationRules {
            unit_conversion: Some(UnitConversion { factor, offset }),
            string_normalization: None,
        }
    }

    fn normalization_rules(lowercase: bool, strip: bool) -> TransformationRules {
        TransformationRules {
            unit_conversion: None,
            string_normalization: Some(StringNormalization { lowercase, strip }),
        }
    }

    #[test]
    fn test_empty_rules_are_identity() {
        let rules = TransformationRules::default();
        for value in [
            json!("91.44 cm"),
            json!(42),
            json!(2.5),
            json!(true),
            json!(null),
            json!(["a", "b"]),
            json!({"nested": {"depth": 2}}),
        ] {
            assert_eq!(apply_transformations(&value, &rules), value);
        }
    }

    #[test]
    fn test_unit_conversion_factor() {
        let converted = apply_transformations(&json!(10), &conversion_rules(2.54, 0.0));
        let numeric = converted.as_f64().expect("result should be numeric");
        assert!((numeric - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion_factor_and_offset() {
        let converted = apply_transformations(&json!(10), &conversion_rules(2.54, 1.0));
        let numeric = converted.as_f64().expect("result should be numeric");
        assert!((numeric - 26.4).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion_integer_becomes_float() {
        let converted = apply_transformations(&json!(10), &conversion_rules(1.0, 0.0));
        assert!(converted.is_f64());
    }

    #[test]
    fn test_unit_conversion_skips_non_numeric() {
        let value = json!("ABC");
        assert_eq!(
            apply_transformations(&value, &conversion_rules(2.0, 0.0)),
            value
        );

        // Booleans are not numeric for conversion purposes
        let value = json!(true);
        assert_eq!(
            apply_transformations(&value, &conversion_rules(2.0, 0.0)),
            value
        );
    }

    #[test]
    fn test_unit_conversion_keeps_original_on_overflow() {
        let value = json!(1.0e308);
        assert_eq!(
            apply_transformations(&value, &conversion_rules(1.0e10, 0.0)),
            value
        );
    }

    #[test]
    fn test_string_normalization_lowercase_and_strip() {
        let normalized = apply_transformations(&json!("  ABC  "), &normalization_rules(true, true));
        assert_eq!(normalized, json!("abc"));
    }

    #[test]
    fn test_string_normalization_individual_flags() {
        assert_eq!(
            apply_transformations(&json!("  ABC  "), &normalization_rules(true, false)),
            json!("  abc  ")
        );
        assert_eq!(
            apply_transformations(&json!("  ABC  "), &normalization_rules(false, true)),
            json!("ABC")
        );
    }

    #[test]
    fn test_string_normalization_skips_non_string() {
        let value = json!(12.5);
        assert_eq!(
            apply_transformations(&value, &normalization_rules(true, true)),
            value
        );
    }

    #[test]
    fn test_both_rules_dispatch_by_value_type() {
        let rules = TransformationRules {
            unit_conversion: Some(UnitConversion::factor(2.0)),
            string_normalization: Some(StringNormalization {
                lowercase: true,
                strip: true,
            }),
        };

        let numeric = apply_transformations(&json!(5), &rules);
        let converted = numeric.as_f64().expect("result should be numeric");
        assert!((converted - 10.0).abs() < 1e-9);

        let text = apply_transformations(&json!(" Steel Pole "), &rules);
        assert_eq!(text, json!("steel pole"));
    }

    fn leaf_value() -> impl Strategy<Value = serde_json::Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            prop::num::f64::NORMAL.prop_map(Value::from),
            ".*".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn identity_law_holds(value in leaf_value()) {
            let rules = TransformationRules::default();
            prop_assert_eq!(apply_transformations(&value, &rules), value);
        }
    }
}
