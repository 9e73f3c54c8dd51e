// Document-level CSV parsing. Row failures are logged and skipped;
// structural failures yield an empty record set.

use super::mapping::{ColumnMapping, FeedKind, HeaderIndex};
use super::row::map_row;
use super::tokenizer::tokenize_line;
use crate::error::{FeedError, RowError};
use crate::models::MenuItem;

#[derive(Debug, Clone)]
pub struct CsvDocument<'a> {
    pub headers: Vec<String>,
    pub index: HeaderIndex,
    // (line number, text), 1-based with the header as line 1
    pub lines: Vec<(usize, &'a str)>,
}

impl<'a> CsvDocument<'a> {
    pub fn split(document: &'a str) -> Option<Self> {
        // Spreadsheet exports may lead with a UTF-8 byte order mark
        let document = document.strip_prefix('\u{feff}').unwrap_or(document);
        let mut lines = document
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let header_line = lines.next()?;
        let headers = tokenize_line(header_line);
        let index = HeaderIndex::from_headers(&headers);
        let lines = lines.enumerate().map(|(i, line)| (i + 2, line)).collect();

        Some(Self { headers, index, lines })
    }

    // Rows whose fields are all blank are skipped
    pub fn rows(&self) -> impl Iterator<Item = (usize, Vec<String>)> + '_ {
        self.lines
            .iter()
            .map(|(row, line)| (*row, tokenize_line(line)))
            .filter(|(_, fields)| fields.iter().any(|f| !f.is_empty()))
    }

    pub fn map_rows<'m>(
        &'m self,
        mapping: &'m ColumnMapping,
    ) -> impl Iterator<Item = Result<MenuItem, RowError>> + 'm {
        self.rows()
            .map(move |(row, fields)| map_row(&fields, &self.index, mapping, row))
    }
}

// `Ok` may still be empty when every row was skipped or unavailable
pub fn try_parse(document: &str, mapping: &ColumnMapping) -> Result<Vec<MenuItem>, FeedError> {
    let doc = CsvDocument::split(document).ok_or(FeedError::NoDataRows)?;
    if doc.lines.is_empty() {
        return Err(FeedError::NoDataRows);
    }

    let missing = mapping.missing_columns(&doc.index);
    if !missing.is_empty() {
        return Err(FeedError::MissingColumns(missing));
    }

    let mut items = Vec::new();
    for result in doc.map_rows(mapping) {
        match result {
            Ok(item) if item.available => items.push(item),
            Ok(item) => tracing::debug!(name = %item.name, "Skipping unavailable item"),
            Err(e) => tracing::warn!(error = %e, "Skipping invalid row"),
        }
    }
    Ok(items)
}

pub fn parse(document: &str, mapping: &ColumnMapping) -> Vec<MenuItem> {
    try_parse(document, mapping).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "CSV document unusable");
        Vec::new()
    })
}

pub fn parse_carta(document: &str) -> Vec<MenuItem> {
    parse(document, FeedKind::Carta.mapping())
}

pub fn parse_vinos(document: &str) -> Vec<MenuItem> {
    parse(document, FeedKind::Vinos.mapping())
}
