//! Request parameters for the catalog services.
//!
//! Every parameter is always present on the wire. An unconstrained slot is
//! sent as the literal `all`, never omitted.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ColorId, FilterValue, ManufacturerId};

/// Parameters for `/api/filter_options`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionsQuery {
    #[serde(rename = "category_id")]
    pub category: FilterValue<CategoryId>,
    #[serde(rename = "manufacturer_id")]
    pub manufacturer: FilterValue<ManufacturerId>,
}

impl OptionsQuery {
    pub fn new(
        category: FilterValue<CategoryId>,
        manufacturer: FilterValue<ManufacturerId>,
    ) -> Self {
        OptionsQuery {
            category,
            manufacturer,
        }
    }
}

/// Parameters for `/api/auto_search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "category_id")]
    pub category: FilterValue<CategoryId>,
    #[serde(rename = "manufacturer_id")]
    pub manufacturer: FilterValue<ManufacturerId>,
    #[serde(rename = "color_id")]
    pub color: FilterValue<ColorId>,
}

impl SearchQuery {
    pub fn new(
        category: FilterValue<CategoryId>,
        manufacturer: FilterValue<ManufacturerId>,
        color: FilterValue<ColorId>,
    ) -> Self {
        SearchQuery {
            category,
            manufacturer,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_sentinels_serialize_literally() {
        let json = serde_json::to_value(SearchQuery::default()).unwrap();
        assert_eq!(
            json,
            json!({"category_id": "all", "manufacturer_id": "all", "color_id": "all"})
        );
    }

    #[test]
    fn sentinel_triple_round_trips() {
        let query = SearchQuery::default();
        let json = serde_json::to_value(query).unwrap();
        let parsed: SearchQuery = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, query);
    }

    #[test]
    fn mixed_query_round_trips() {
        let query = SearchQuery::new(
            FilterValue::Only(CategoryId(5)),
            FilterValue::Only(ManufacturerId(7)),
            FilterValue::All,
        );
        let json = serde_json::to_value(query).unwrap();
        assert_eq!(
            json,
            json!({"category_id": "5", "manufacturer_id": "7", "color_id": "all"})
        );
        let parsed: SearchQuery = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, query);
    }

    #[test]
    fn missing_parameter_is_an_error() {
        let result = serde_json::from_value::<SearchQuery>(
            json!({"category_id": "all", "manufacturer_id": "all"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_parameter_is_an_error() {
        let result = serde_json::from_value::<OptionsQuery>(
            json!({"category_id": "five", "manufacturer_id": "all"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn options_query_uses_wire_names() {
        let query = OptionsQuery::new(FilterValue::Only(CategoryId(3)), FilterValue::All);
        let json = serde_json::to_value(query).unwrap();
        assert_eq!(json, json!({"category_id": "3", "manufacturer_id": "all"}));
    }
}
