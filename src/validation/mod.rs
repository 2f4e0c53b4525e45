//! Declarative field validation for JSON request bodies.
//!
//! A [`RuleSet`] maps field names to an ordered list of [`Rule`]s. Validation
//! walks every field and collects all violations before reporting, so one pass
//! surfaces every problem with the input.

mod rules;

pub use rules::*;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// JSON type a field value must already have. No coercion is applied.
///
/// `Integer` means a value that fits a signed 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Numeric,
    Integer,
    Boolean,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Numeric => value.is_number(),
            Kind::Integer => value.is_i64(),
            Kind::Boolean => value.is_boolean(),
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Kind::String => format!("The {} must be a string.", field),
            Kind::Numeric => format!("The {} must be a number.", field),
            Kind::Integer => format!("The {} must be an integer.", field),
            Kind::Boolean => format!("The {} field must be true or false.", field),
        }
    }
}

/// A single check applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Field must be present, non-null and, for strings, not blank.
    Required,
    /// Field must already be of the given JSON type.
    Type(Kind),
    /// Numeric field must be at least the bound. Ignored for non-numbers.
    Min(f64),
    /// A present string field must not be blank.
    NotBlank,
}

impl Rule {
    /// Check a present, non-null value. `Required` is handled by the caller.
    fn check(&self, field: &str, value: &Value) -> Option<String> {
        match self {
            Rule::Required => None,
            Rule::Type(kind) => (!kind.matches(value)).then(|| kind.message(field)),
            Rule::Min(bound) => match value.as_f64() {
                Some(n) if n < *bound => Some(format!("The {} must be at least {}.", field, bound)),
                _ => None,
            },
            Rule::NotBlank => match value.as_str() {
                Some(s) if s.trim().is_empty() => {
                    Some(format!("The {} field must not be empty.", field))
                }
                _ => None,
            },
        }
    }
}

/// Field name to violated-constraint messages, in field name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for one field, if any.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }
}

/// Ordered collection of per-field rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field. Rules run left to right.
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }

    /// Validate a JSON value. Anything other than an object is treated as an
    /// empty object.
    pub fn validate(&self, input: &Value) -> Result<(), ValidationErrors> {
        let empty = Map::new();
        let object = input.as_object().unwrap_or(&empty);
        let mut errors = ValidationErrors::default();

        for (name, rules) in &self.fields {
            let value = object.get(*name).filter(|v| !v.is_null());

            let Some(value) = value else {
                if rules.contains(&Rule::Required) {
                    errors.push(name, format!("The {} field is required.", name));
                }
                continue;
            };

            if rules.contains(&Rule::Required) && is_blank(value) {
                errors.push(name, format!("The {} field is required.", name));
                continue;
            }

            for rule in rules {
                if let Some(message) = rule.check(name, value) {
                    errors.push(name, message);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_rules() -> RuleSet {
        RuleSet::new()
            .field("name", [Rule::Required, Rule::Type(Kind::String)])
            .field("price", [Rule::Required, Rule::Type(Kind::Numeric), Rule::Min(1.0)])
            .field("serves", [Rule::Type(Kind::Integer), Rule::Min(1.0)])
            .field("flag", [Rule::Type(Kind::Boolean)])
    }

    #[test]
    fn test_valid_input_passes() {
        let input = json!({ "name": "Mug", "price": 12.5, "serves": 4, "flag": true });
        assert!(sample_rules().validate(&input).is_ok());
    }

    #[test]
    fn test_optional_fields_may_be_omitted_or_null() {
        let input = json!({ "name": "Mug", "price": 3, "serves": null });
        assert!(sample_rules().validate(&input).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let errors = sample_rules().validate(&json!({ "price": 3 })).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.field("name").unwrap(),
            ["The name field is required.".to_string()]
        );
    }

    #[test]
    fn test_blank_string_fails_required() {
        let errors = sample_rules()
            .validate(&json!({ "name": "   ", "price": 3 }))
            .unwrap_err();
        assert!(errors.field("name").is_some());
    }

    #[test]
    fn test_all_violations_are_collected() {
        let input = json!({ "name": 7, "price": "12", "serves": 2.5, "flag": "yes" });
        let errors = sample_rules().validate(&input).unwrap_err();

        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, ["flag", "name", "price", "serves"]);
        assert_eq!(
            errors.field("price").unwrap(),
            ["The price must be a number.".to_string()]
        );
        assert_eq!(
            errors.field("serves").unwrap(),
            ["The serves must be an integer.".to_string()]
        );
    }

    #[test]
    fn test_types_are_not_coerced() {
        let errors = sample_rules()
            .validate(&json!({ "name": "Mug", "price": "5" }))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.field("price").is_some());
    }

    #[test]
    fn test_min_bound() {
        let errors = sample_rules()
            .validate(&json!({ "name": "Mug", "price": 0.5, "serves": 0 }))
            .unwrap_err();
        assert_eq!(
            errors.field("price").unwrap(),
            ["The price must be at least 1.".to_string()]
        );
        assert_eq!(
            errors.field("serves").unwrap(),
            ["The serves must be at least 1.".to_string()]
        );

        assert!(sample_rules()
            .validate(&json!({ "name": "Mug", "price": 1 }))
            .is_ok());
    }

    #[test]
    fn test_integer_rejects_floats() {
        let rules = RuleSet::new().field("serves", [Rule::Type(Kind::Integer)]);
        assert!(rules.validate(&json!({ "serves": 6 })).is_ok());
        assert!(rules.validate(&json!({ "serves": -2 })).is_ok());
        assert!(rules.validate(&json!({ "serves": 6.0 })).is_err());
        assert!(rules.validate(&json!({ "serves": 6.1 })).is_err());
    }

    #[test]
    fn test_integer_must_fit_i64() {
        let rules = RuleSet::new().field("serves", [Rule::Type(Kind::Integer), Rule::Min(1.0)]);
        assert!(rules.validate(&json!({ "serves": i64::MAX })).is_ok());

        let too_big: Value = serde_json::from_str(r#"{"serves": 9223372036854775808}"#).unwrap();
        let errors = rules.validate(&too_big).unwrap_err();
        assert_eq!(
            errors.field("serves"),
            Some(&["The serves must be an integer.".to_string()][..])
        );
    }

    #[test]
    fn test_not_blank_only_applies_when_present() {
        let rules = RuleSet::new().field("name", [Rule::Type(Kind::String), Rule::NotBlank]);
        assert!(rules.validate(&json!({})).is_ok());
        assert!(rules.validate(&json!({ "name": "Pie" })).is_ok());

        let errors = rules.validate(&json!({ "name": "" })).unwrap_err();
        assert_eq!(
            errors.field("name").unwrap(),
            ["The name field must not be empty.".to_string()]
        );
    }

    #[test]
    fn test_non_object_input_is_treated_as_empty() {
        let errors = sample_rules().validate(&json!([1, 2, 3])).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, ["name", "price"]);
    }
}
