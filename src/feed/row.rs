// Maps one tokenized row onto a MenuItem

use super::coerce::{parse_available, parse_integer, parse_price_field};
use super::mapping::{ColumnMapping, Field, HeaderIndex};
use crate::error::RowError;
use crate::models::{MenuItem, SENTINEL_SORT_ORDER};

// Label used when a row has no section at all
pub const DEFAULT_SECTION: &str = "Otros";

// Columns missing from the document are defaulted; an empty name fails the
// row. `row` is the 1-based line number, only used for errors.
pub fn map_row(
    fields: &[String],
    headers: &HeaderIndex,
    mapping: &ColumnMapping,
    row: usize,
) -> Result<MenuItem, RowError> {
    let mut section = None;
    let mut name = String::new();
    let mut description = None;
    let mut price = None;
    let mut price_half = None;
    let mut price_full = None;
    let mut available = None;
    let mut sort_order = None;
    let mut region = None;

    for column in mapping.columns() {
        let Some(index) = headers.get(&column.name) else {
            continue;
        };
        // Short rows read as blank cells
        let value = fields.get(index).map(|v| v.trim()).unwrap_or("");

        match column.field {
            Field::Section => section = non_empty(value),
            Field::Name => name = value.to_string(),
            Field::Description => description = non_empty(value),
            Field::Region => region = non_empty(value),
            Field::Price => price = parse_price_field(value),
            Field::PriceHalf => price_half = parse_price_field(value),
            Field::PriceFull => price_full = parse_price_field(value),
            Field::Available => available = Some(parse_available(Some(value))),
            Field::SortOrder => sort_order = parse_integer(value),
        }
    }

    if name.is_empty() {
        return Err(RowError::MissingName { row });
    }

    Ok(MenuItem {
        section: section.unwrap_or_else(|| DEFAULT_SECTION.to_string()),
        name,
        description,
        price,
        price_half,
        price_full,
        available: available.unwrap_or(true),
        sort_order: sort_order.unwrap_or(SENTINEL_SORT_ORDER),
        region,
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
