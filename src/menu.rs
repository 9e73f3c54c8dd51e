// Groups parsed items into render-ready sections

use crate::models::{MenuItem, MenuSection};

// Notes shown under specific sections
const SECTION_NOTES: &[(&str, &str)] = &[(
    "Empanadas Argentinas y Milanesas",
    "Consultar disponibilidad y precio en el local",
)];

pub fn default_section_order() -> Vec<String> {
    [
        "Tablas",
        "Tostas",
        "Hamburguesa",
        "Compartimos",
        "Ensaladas",
        "Pokes",
        "Empanadas Argentinas y Milanesas",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// Listed sections first, the rest in order of first appearance.
// Ties on sort_order keep feed order.
pub fn group_by_section(items: &[MenuItem], section_order: &[String]) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();

    for item in items.iter().filter(|i| i.available) {
        match sections.iter_mut().find(|s| s.name == item.section) {
            Some(section) => section.items.push(item.clone()),
            None => sections.push(MenuSection {
                name: item.section.clone(),
                note: section_note(&item.section),
                items: vec![item.clone()],
            }),
        }
    }

    for section in &mut sections {
        section.items.sort_by_key(|i| i.sort_order);
    }

    // Unlisted sections share one rank so the stable sort keeps them in place
    sections.sort_by_key(|s| {
        section_order
            .iter()
            .position(|name| *name == s.name)
            .unwrap_or(section_order.len())
    });
    sections
}

fn section_note(name: &str) -> Option<String> {
    SECTION_NOTES
        .iter()
        .find(|(section, _)| *section == name)
        .map(|(_, note)| note.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(section: &str, name: &str, sort_order: i64, available: bool) -> MenuItem {
        MenuItem {
            section: section.to_string(),
            name: name.to_string(),
            description: None,
            price: None,
            price_half: None,
            price_full: None,
            available,
            sort_order,
            region: None,
        }
    }

    fn names(section: &MenuSection) -> Vec<&str> {
        section.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn sorts_items_stably_within_sections() {
        let items = vec![
            item("Tostas", "C", 2, true),
            item("Tostas", "A", 1, true),
            item("Tostas", "B", 2, true),
            item("Tostas", "Z", 999, true),
        ];
        let sections = group_by_section(&items, &default_section_order());
        assert_eq!(sections.len(), 1);
        assert_eq!(names(&sections[0]), vec!["A", "C", "B", "Z"]);
    }

    #[test]
    fn orders_sections_by_house_order_then_appearance() {
        let items = vec![
            item("Postres", "Flan", 1, true),
            item("Tostas", "Tosta", 1, true),
            item("Bebidas", "Agua", 1, true),
            item("Tablas", "Tabla", 1, true),
        ];
        let sections = group_by_section(&items, &default_section_order());
        let order: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["Tablas", "Tostas", "Postres", "Bebidas"]);
    }

    #[test]
    fn drops_unavailable_items_and_adds_notes() {
        let items = vec![
            item("Empanadas Argentinas y Milanesas", "Empanada", 1, true),
            item("Tostas", "Agotada", 1, false),
        ];
        let sections = group_by_section(&items, &default_section_order());
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].note.as_deref(),
            Some("Consultar disponibilidad y precio en el local")
        );
    }

    #[test]
    fn empty_order_keeps_appearance() {
        let items = vec![item("B", "1", 1, true), item("A", "2", 1, true)];
        let sections = group_by_section(&items, &[]);
        assert_eq!(sections[0].name, "B");
        assert_eq!(sections[1].name, "A");
    }
}
