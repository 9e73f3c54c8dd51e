// Local fixture data served when a feed cannot be fetched

use crate::error::FeedError;
use crate::feed::FeedKind;
use crate::models::MenuItem;
use serde::Deserialize;
use std::{fs, path::Path};

// The error is reported either way; only the data differs
#[derive(Debug, Clone, Default)]
pub enum FallbackPolicy {
    #[default]
    Strict,
    Fixtures(FixtureSet),
}

impl FallbackPolicy {
    pub fn data_for(&self, kind: FeedKind) -> Vec<MenuItem> {
        match self {
            FallbackPolicy::Strict => Vec::new(),
            FallbackPolicy::Fixtures(set) => set.for_feed(kind).to_vec(),
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, FallbackPolicy::Strict)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureSet {
    pub carta: Vec<MenuItem>,
    pub vinos: Vec<MenuItem>,
}

impl FixtureSet {
    pub fn for_feed(&self, kind: FeedKind) -> &[MenuItem] {
        match kind {
            FeedKind::Carta => &self.carta,
            FeedKind::Vinos => &self.vinos,
        }
    }

    pub fn load(carta_path: &Path, wine_path: &Path) -> Result<Self, FeedError> {
        let carta = parse_carta_fixture(&read(carta_path)?)?;
        let vinos = parse_wine_fixture(&read(wine_path)?)?;
        tracing::info!(
            carta = carta.len(),
            vinos = vinos.len(),
            "Loaded local fixture data"
        );
        Ok(Self { carta, vinos })
    }
}

// --- Fixture file formats ---

#[derive(Deserialize)]
struct CartaFixture {
    items: Vec<MenuItem>,
}

#[derive(Deserialize)]
struct WineFixture {
    categories: Vec<WineCategory>,
}

#[derive(Deserialize)]
struct WineCategory {
    name: String,
    items: Vec<WineEntry>,
}

#[derive(Deserialize)]
struct WineEntry {
    name: String,
    description: Option<String>,
    region: Option<String>,
    price: Option<String>,
}

fn read(path: &Path) -> Result<String, FeedError> {
    fs::read_to_string(path)
        .map_err(|e| FeedError::Fixture(format!("{}: {}", path.display(), e)))
}

pub fn parse_carta_fixture(json: &str) -> Result<Vec<MenuItem>, FeedError> {
    let fixture: CartaFixture =
        serde_json::from_str(json).map_err(|e| FeedError::Fixture(e.to_string()))?;
    Ok(fixture.items)
}

// Every wine is available, numbered in file order from 1
pub fn parse_wine_fixture(json: &str) -> Result<Vec<MenuItem>, FeedError> {
    let fixture: WineFixture =
        serde_json::from_str(json).map_err(|e| FeedError::Fixture(e.to_string()))?;

    let items = fixture
        .categories
        .into_iter()
        .flat_map(|category| {
            let section = category.name;
            category.items.into_iter().map(move |wine| (section.clone(), wine))
        })
        .enumerate()
        .map(|(i, (section, wine))| MenuItem {
            section,
            name: wine.name,
            description: wine.description.filter(|d| !d.is_empty()),
            price: wine.price,
            price_half: None,
            price_full: None,
            available: true,
            sort_order: i as i64 + 1,
            region: wine.region.filter(|r| !r.is_empty()),
        })
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wine_fixture_is_flattened_in_order() {
        let json = r#"{
            "categories": [
                { "name": "Tintos", "items": [
                    { "name": "Rioja crianza", "region": "Rioja", "price": "18.00" },
                    { "name": "Ribera roble", "description": "", "price": "20.00" }
                ]},
                { "name": "Blancos", "items": [
                    { "name": "Verdejo", "region": "Rueda", "price": "16.00" }
                ]}
            ]
        }"#;
        let items = parse_wine_fixture(json).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].section, "Tintos");
        assert_eq!(items[2].section, "Blancos");
        assert_eq!(items.iter().map(|i| i.sort_order).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(items[1].description, None);
        assert!(items.iter().all(|i| i.available));
    }

    #[test]
    fn carta_fixture_uses_item_defaults() {
        let json = r#"{ "items": [ { "section": "Tostas", "name": "Tosta de escalivada", "price": "6.50" } ] }"#;
        let items = parse_carta_fixture(json).unwrap();
        assert_eq!(items[0].price.as_deref(), Some("6.50"));
        assert!(items[0].available);
    }

    #[test]
    fn policy_data_per_feed() {
        let set = FixtureSet {
            carta: parse_carta_fixture(r#"{"items":[{"section":"A","name":"B"}]}"#).unwrap(),
            vinos: Vec::new(),
        };
        let policy = FallbackPolicy::Fixtures(set);
        assert_eq!(policy.data_for(FeedKind::Carta).len(), 1);
        assert!(policy.data_for(FeedKind::Vinos).is_empty());
        assert!(FallbackPolicy::Strict.data_for(FeedKind::Carta).is_empty());
    }

    #[test]
    fn missing_fixture_file_is_an_error() {
        let err = FixtureSet::load(Path::new("no/such/carta.json"), Path::new("no/such/wine.json"))
            .unwrap_err();
        assert!(matches!(err, FeedError::Fixture(_)));
    }

    #[test]
    fn bundled_fixtures_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let set = FixtureSet::load(&root.join("data/carta_items.json"), &root.join("data/wine.es.json"))
            .unwrap();
        assert!(!set.carta.is_empty());
        assert!(!set.vinos.is_empty());
    }
}
