// Data structures shared by the parser, the fetcher and the HTTP handlers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Rank given to items without a usable sort order so they land last
pub const SENTINEL_SORT_ORDER: i64 = 999;

// Represents one parsed menu or wine entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub section: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // Prices are stored already rendered with two fraction digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_half: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_full: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default = "default_sort_order")]
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>, // Origin, wine feed only
}

fn default_available() -> bool {
    true
}

fn default_sort_order() -> i64 {
    SENTINEL_SORT_ORDER
}

// A half/full pair wins over the single price
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceDisplay {
    Pair {
        half: Option<String>,
        full: Option<String>,
    },
    Single {
        price: String,
    },
    Unpriced,
}

impl MenuItem {
    pub fn price_display(&self) -> PriceDisplay {
        if self.price_half.is_some() || self.price_full.is_some() {
            PriceDisplay::Pair {
                half: self.price_half.clone(),
                full: self.price_full.clone(),
            }
        } else if let Some(price) = &self.price {
            PriceDisplay::Single { price: price.clone() }
        } else {
            PriceDisplay::Unpriced
        }
    }
}

// Grouped menu items, in render order
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub items: Vec<MenuItem>,
}

// Data is always present, possibly empty or fallback; `error` says why
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FetchResult<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> FetchResult<T> {
    pub fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    pub fn failed(data: T, error: impl Into<String>) -> Self {
        Self {
            data,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        FetchResult {
            data: f(self.data),
            error: self.error,
        }
    }
}

// Unparsed document plus transport metadata, used for health reporting
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub status: Option<u16>,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub body: String,
}

// Non-filtering parse summary for one feed
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub total_rows: usize,
    pub parsed_rows: usize,
    pub available_rows: usize,
    pub disponible_token_histogram: BTreeMap<String, usize>,
    pub headers: Vec<String>,
    pub missing_required_columns: Vec<String>,
}

impl DiagnosticsReport {
    pub fn unavailable(marker: &str) -> Self {
        Self {
            missing_required_columns: vec![marker.to_string()],
            ..Self::default()
        }
    }
}
