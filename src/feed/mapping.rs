// Spreadsheet header to MenuItem field tables, one per feed

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Section,
    Name,
    Description,
    Price,
    PriceHalf,
    PriceFull,
    Available,
    SortOrder,
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Carta,
    Vinos,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Carta => "carta",
            FeedKind::Vinos => "vinos",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "carta" => Some(FeedKind::Carta),
            "vinos" => Some(FeedKind::Vinos),
            _ => None,
        }
    }

    pub fn mapping(&self) -> &'static ColumnMapping {
        match self {
            FeedKind::Carta => &CARTA_MAPPING,
            FeedKind::Vinos => &VINOS_MAPPING,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub field: Field,
    // Absent required columns reject the document
    pub required: bool,
}

impl Column {
    pub fn required(name: &str, field: Field) -> Self {
        Self { name: name.trim().to_lowercase(), field, required: true }
    }

    pub fn optional(name: &str, field: Field) -> Self {
        Self { name: name.trim().to_lowercase(), field, required: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    columns: Vec<Column>,
}

pub static CARTA_MAPPING: Lazy<ColumnMapping> = Lazy::new(|| {
    ColumnMapping::new(vec![
        Column::required("seccion", Field::Section),
        Column::required("nombre", Field::Name),
        Column::optional("descripcion", Field::Description),
        Column::required("precio", Field::Price),
        Column::optional("precio_media", Field::PriceHalf),
        Column::optional("precio_entera", Field::PriceFull),
        Column::required("disponible", Field::Available),
        Column::required("orden", Field::SortOrder),
    ])
});

pub static VINOS_MAPPING: Lazy<ColumnMapping> = Lazy::new(|| {
    ColumnMapping::new(vec![
        Column::required("categoria", Field::Section),
        Column::required("nombre", Field::Name),
        Column::optional("descripcion", Field::Description),
        Column::optional("origen", Field::Region),
        Column::required("precio", Field::Price),
        Column::required("disponible", Field::Available),
        Column::required("orden", Field::SortOrder),
    ])
});

impl ColumnMapping {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn column_for(&self, field: Field) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.name.as_str())
    }

    // In mapping order
    pub fn missing_columns(&self, headers: &HeaderIndex) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.required && headers.get(&c.name).is_none())
            .map(|c| c.name.clone())
            .collect()
    }
}

// Case-insensitive header name to field position
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    indices: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn from_headers(headers: &[String]) -> Self {
        // A repeated header resolves to its last occurrence
        let indices = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (header.trim().to_lowercase(), index))
            .collect();
        Self { indices }
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.indices.get(&column.trim().to_lowercase()).copied()
    }
}
