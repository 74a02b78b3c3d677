//! JSON shapes returned by the catalog services.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ColorId, FilterOptions, ManufacturerId, OptionEntry, OptionSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category_id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerRow {
    pub manufacturer_id: ManufacturerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRow {
    pub color_id: ColorId,
    pub name: String,
}

/// Body of `/api/filter_options`. Entry order is preserved as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptionsBody {
    pub manufacturers: Vec<ManufacturerRow>,
    pub colors: Vec<ColorRow>,
}

impl From<FilterOptionsBody> for FilterOptions {
    fn from(body: FilterOptionsBody) -> Self {
        FilterOptions::new(
            body.manufacturers
                .into_iter()
                .map(|row| OptionEntry::new(row.manufacturer_id, row.name))
                .collect(),
            body.colors
                .into_iter()
                .map(|row| OptionEntry::new(row.color_id, row.name))
                .collect(),
        )
    }
}

pub fn categories_from_rows(rows: Vec<CategoryRow>) -> OptionSet<CategoryId> {
    rows.into_iter()
        .map(|row| OptionEntry::new(row.category_id, row.name))
        .collect()
}
