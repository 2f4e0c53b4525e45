//! Dish model. Dishes are created with defaults and updated by merging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Free-form tags that are stored as null rather than an empty string.
const TAG_FIELDS: [&str; 2] = ["categoryId", "participantId"];

/// A stored dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub serves: Option<i64>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a dish.
///
/// Omitted fields take the values of the [`Default`] impl below.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDishRequest {
    pub name: String,
    pub category_id: Option<String>,
    pub participant_id: Option<String>,
    pub description: String,
    pub serves: Option<i64>,
    pub is_vegetarian: bool,
    pub is_gluten_free: bool,
}

impl Default for CreateDishRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            category_id: None,
            participant_id: None,
            description: String::new(),
            serves: None,
            is_vegetarian: false,
            is_gluten_free: false,
        }
    }
}

/// A dish as first written to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDish {
    pub name: String,
    pub category_id: Option<String>,
    pub participant_id: Option<String>,
    pub description: String,
    pub serves: Option<i64>,
    pub is_vegetarian: bool,
    pub is_gluten_free: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewDish {
    /// Apply create-time normalization. Empty tags count as unset.
    pub fn new(request: CreateDishRequest, now: DateTime<Utc>) -> Self {
        Self {
            name: request.name,
            category_id: request.category_id.filter(|s| !s.is_empty()),
            participant_id: request.participant_id.filter(|s| !s.is_empty()),
            description: request.description,
            serves: request.serves,
            is_vegetarian: request.is_vegetarian,
            is_gluten_free: request.is_gluten_free,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(self, id: String) -> Dish {
        Dish {
            id,
            name: self.name,
            category_id: self.category_id,
            participant_id: self.participant_id,
            description: self.description,
            serves: self.serves,
            is_vegetarian: self.is_vegetarian,
            is_gluten_free: self.is_gluten_free,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Request body for a partial dish update. Only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serves: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_vegetarian: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gluten_free: Option<bool>,
}

impl UpdateDishRequest {
    /// Fields to merge into the stored dish, always including a fresh `updatedAt`.
    ///
    /// An empty `categoryId` or `participantId` clears the tag to null, the
    /// same shape create gives it.
    pub fn into_set(self, now: DateTime<Utc>) -> Result<Map<String, Value>, serde_json::Error> {
        let mut set = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for tag in TAG_FIELDS {
            if let Some(value) = set.get_mut(tag) {
                if value.as_str() == Some("") {
                    *value = Value::Null;
                }
            }
        }
        set.insert("updatedAt".to_string(), serde_json::to_value(now)?);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_defaults() {
        let request: CreateDishRequest = serde_json::from_value(json!({ "name": "Pie" })).unwrap();
        assert_eq!(
            request,
            CreateDishRequest {
                name: "Pie".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_new_dish_normalizes_empty_tags() {
        let now = Utc::now();
        let request: CreateDishRequest = serde_json::from_value(json!({
            "name": "Pie",
            "categoryId": "",
            "participantId": "eric"
        }))
        .unwrap();

        let dish = NewDish::new(request, now);
        assert_eq!(dish.category_id, None);
        assert_eq!(dish.participant_id.as_deref(), Some("eric"));
        assert_eq!(dish.created_at, dish.updated_at);

        let value = serde_json::to_value(&dish).unwrap();
        assert_eq!(value["categoryId"], Value::Null);
        assert_eq!(value["serves"], Value::Null);
        assert_eq!(value["description"], "");
        assert_eq!(value["isVegetarian"], false);
        assert_eq!(value["isGlutenFree"], false);
    }

    #[test]
    fn test_update_set_only_contains_supplied_fields() {
        let request: UpdateDishRequest = serde_json::from_value(json!({
            "description": "Less mayo",
            "serves": null,
            "createdAt": "2020-01-01T00:00:00Z",
            "_id": "abc"
        }))
        .unwrap();

        let set = request.into_set(Utc::now()).unwrap();
        let mut keys: Vec<&str> = set.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["description", "updatedAt"]);
    }

    #[test]
    fn test_update_set_clears_empty_tags() {
        let request: UpdateDishRequest = serde_json::from_value(json!({
            "categoryId": "",
            "participantId": "vanessa"
        }))
        .unwrap();

        let set = request.into_set(Utc::now()).unwrap();
        assert_eq!(set["categoryId"], Value::Null);
        assert_eq!(set["participantId"], "vanessa");
    }
}
