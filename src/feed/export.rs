// Writes menu items back out as a spreadsheet-ready CSV document

use super::mapping::{ColumnMapping, Field};
use crate::models::MenuItem;
use anyhow::{Context, Result};

// Header uses the mapping's source column names; availability is TRUE/FALSE
pub fn export_csv(items: &[MenuItem], mapping: &ColumnMapping) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    let header: Vec<&str> = mapping.columns().map(|c| c.name.as_str()).collect();
    writer.write_record(&header).context("Failed to write CSV header")?;

    for item in items {
        let record: Vec<String> = mapping
            .columns()
            .map(|c| cell(item, c.field))
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write CSV row for '{}'", item.name))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

fn cell(item: &MenuItem, field: Field) -> String {
    match field {
        Field::Section => item.section.clone(),
        Field::Name => item.name.clone(),
        Field::Description => item.description.clone().unwrap_or_default(),
        Field::Price => item.price.clone().unwrap_or_default(),
        Field::PriceHalf => item.price_half.clone().unwrap_or_default(),
        Field::PriceFull => item.price_full.clone().unwrap_or_default(),
        Field::Available => if item.available { "TRUE" } else { "FALSE" }.to_string(),
        Field::SortOrder => item.sort_order.to_string(),
        Field::Region => item.region.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mapping::{CARTA_MAPPING, VINOS_MAPPING};
    use crate::feed::parser::parse;

    fn wine(name: &str, description: Option<&str>) -> MenuItem {
        MenuItem {
            section: "Tintos".to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            price: Some("24.00".to_string()),
            price_half: None,
            price_full: None,
            available: true,
            sort_order: 2,
            region: Some("Rioja".to_string()),
        }
    }

    #[test]
    fn exported_document_parses_back() {
        let items = vec![
            wine("Muga reserva", Some("Tempranillo, garnacha y \"mazuelo\"")),
            wine("Marqués de Riscal", None),
        ];
        let csv_text = export_csv(&items, &VINOS_MAPPING).unwrap();

        assert!(csv_text.starts_with("categoria,nombre,descripcion,origen,precio,disponible,orden\r\n"));
        assert_eq!(parse(&csv_text, &VINOS_MAPPING), items);
    }

    #[test]
    fn unavailable_items_export_as_false() {
        let mut item = wine("Pingus", None);
        item.available = false;
        let csv_text = export_csv(&[item], &CARTA_MAPPING).unwrap();
        let row = csv_text.lines().nth(1).unwrap();
        assert_eq!(row, "Tintos,Pingus,,24.00,,,FALSE,2");
    }
}
