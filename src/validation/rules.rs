//! Rule sets for the gift and dish resources.

use super::{Kind, Rule, RuleSet};

fn required_string() -> [Rule; 2] {
    [Rule::Required, Rule::Type(Kind::String)]
}

/// Rules for creating or replacing a gift. Every field is mandatory.
pub fn gift_rules() -> RuleSet {
    RuleSet::new()
        .field("name", required_string())
        .field(
            "price",
            [Rule::Required, Rule::Type(Kind::Numeric), Rule::Min(1.0)],
        )
        .field("department", required_string())
        .field("brand", required_string())
        .field("quantity", [Rule::Required, Rule::Type(Kind::Numeric)])
        .field("color", required_string())
        .field("size", required_string())
        .field("store", required_string())
}

/// Rules for creating a dish.
pub fn dish_rules() -> RuleSet {
    dish_optional_fields(RuleSet::new().field("name", required_string()))
}

/// Rules for a partial dish update. `name` may be omitted but never blanked.
pub fn dish_update_rules() -> RuleSet {
    dish_optional_fields(
        RuleSet::new().field("name", [Rule::Type(Kind::String), Rule::NotBlank]),
    )
}

fn dish_optional_fields(rules: RuleSet) -> RuleSet {
    rules
        .field("categoryId", [Rule::Type(Kind::String)])
        .field("participantId", [Rule::Type(Kind::String)])
        .field("description", [Rule::Type(Kind::String)])
        .field("serves", [Rule::Type(Kind::Integer), Rule::Min(1.0)])
        .field("isVegetarian", [Rule::Type(Kind::Boolean)])
        .field("isGlutenFree", [Rule::Type(Kind::Boolean)])
}
