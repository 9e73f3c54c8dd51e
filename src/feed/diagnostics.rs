// Health check parse: counts instead of records, missing columns reported
// instead of rejected, raw availability tokens tallied as typed.

use super::mapping::{ColumnMapping, FeedKind, Field, HeaderIndex};
use super::row::map_row;
use super::parser::CsvDocument;
use crate::models::DiagnosticsReport;

// Histogram bucket for empty availability cells
pub const BLANK_TOKEN: &str = "(blank)";

pub fn diagnose(document: &str, mapping: &ColumnMapping) -> DiagnosticsReport {
    let Some(doc) = CsvDocument::split(document) else {
        return DiagnosticsReport {
            missing_required_columns: mapping.missing_columns(&HeaderIndex::default()),
            ..DiagnosticsReport::default()
        };
    };

    let mut report = DiagnosticsReport {
        headers: doc.headers.clone(),
        missing_required_columns: mapping.missing_columns(&doc.index),
        ..DiagnosticsReport::default()
    };

    let availability_index = mapping
        .column_for(Field::Available)
        .and_then(|column| doc.index.get(column));

    for (row, fields) in doc.rows() {
        report.total_rows += 1;

        if let Some(index) = availability_index {
            // Case is kept so "Sí" and "SI" show up as separate buckets
            let token = fields.get(index).map(|v| v.trim()).unwrap_or("");
            let key = if token.is_empty() { BLANK_TOKEN } else { token };
            *report.disponible_token_histogram.entry(key.to_string()).or_default() += 1;
        }

        match map_row(&fields, &doc.index, mapping, row) {
            Ok(item) => {
                report.parsed_rows += 1;
                if item.available {
                    report.available_rows += 1;
                }
            }
            Err(e) => tracing::debug!(error = %e, "Row would be skipped"),
        }
    }

    tracing::info!(
        total = report.total_rows,
        parsed = report.parsed_rows,
        available = report.available_rows,
        missing = ?report.missing_required_columns,
        "CSV diagnostics complete"
    );
    report
}

pub fn diagnose_carta(document: &str) -> DiagnosticsReport {
    diagnose(document, FeedKind::Carta.mapping())
}

pub fn diagnose_vinos(document: &str) -> DiagnosticsReport {
    diagnose(document, FeedKind::Vinos.mapping())
}
