// Spreadsheet feed ingestion

pub mod coerce;
pub mod diagnostics;
pub mod export;
pub mod mapping;
pub mod parser;
pub mod row;
pub mod tokenizer;

pub use diagnostics::{diagnose, diagnose_carta, diagnose_vinos};
pub use export::export_csv;
pub use mapping::{CARTA_MAPPING, Column, ColumnMapping, FeedKind, Field, VINOS_MAPPING};
pub use parser::{parse, parse_carta, parse_vinos, try_parse};
