// Service configuration, loaded with the 'config' crate and 'dotenv'

use crate::fallback::{FallbackPolicy, FixtureSet};
use crate::fetcher::FeedSource;
use crate::feed::FeedKind;
use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

// Environment variable names, also used in "not configured" errors
pub const CARTA_URL_VAR: &str = "APP_CARTA_CSV_URL";
pub const VINOS_URL_VAR: &str = "APP_VINOS_CSV_URL";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    pub carta_csv_url: Option<String>,
    pub vinos_csv_url: Option<String>,
    // Gates the diagnostics endpoints
    pub debug_csv: bool,
    // Serve local fixtures instead of an empty menu when a feed fails
    pub allow_local_fallback: bool,
    pub fallback_carta_path: PathBuf,
    pub fallback_wine_path: PathBuf,
    pub cache_ttl_secs: u64,
    #[serde(default = "crate::menu::default_section_order")]
    pub section_order: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::defaults()?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_CARTA_CSV_URL)
            .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"));

        Self::build(builder)
    }

    // Inline TOML layered over the defaults
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::build(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("debug_csv", false)?
            .set_default("allow_local_fallback", false)?
            .set_default("fallback_carta_path", "data/carta_items.json")?
            .set_default("fallback_wine_path", "data/wine.es.json")?
            .set_default("cache_ttl_secs", 60)?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn feed_source(&self, kind: FeedKind) -> FeedSource {
        match kind {
            FeedKind::Carta => FeedSource::new(kind, self.carta_csv_url.clone(), CARTA_URL_VAR),
            FeedKind::Vinos => FeedSource::new(kind, self.vinos_csv_url.clone(), VINOS_URL_VAR),
        }
    }

    // Fixture files are only read when local fallback is enabled
    pub fn fallback_policy(&self) -> Result<FallbackPolicy> {
        if !self.allow_local_fallback {
            return Ok(FallbackPolicy::Strict);
        }
        let fixtures = FixtureSet::load(&self.fallback_carta_path, &self.fallback_wine_path)
            .context("Failed to load local fallback fixtures")?;
        Ok(FallbackPolicy::Fixtures(fixtures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.server_address, "127.0.0.1:3000");
        assert!(!settings.debug_csv);
        assert!(settings.carta_csv_url.is_none());
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.section_order[0], "Tablas");
        assert!(settings.fallback_policy().unwrap().is_strict());
    }

    #[test]
    fn toml_overrides() {
        let settings = Settings::from_toml(
            r#"
            vinos_csv_url = "https://docs.google.com/spreadsheets/d/x/export?format=csv"
            debug_csv = true
            cache_ttl_secs = 5
            section_order = ["Pokes", "Tablas"]
            "#,
        )
        .unwrap();
        assert!(settings.debug_csv);
        assert_eq!(settings.cache_ttl_secs, 5);
        assert_eq!(settings.section_order, vec!["Pokes", "Tablas"]);

        let source = settings.feed_source(FeedKind::Vinos);
        assert!(source.url.is_some());
        assert_eq!(source.env_var, VINOS_URL_VAR);
    }

    #[test]
    fn local_fallback_loads_fixtures() {
        let root = env!("CARGO_MANIFEST_DIR");
        let settings = Settings::from_toml(&format!(
            "allow_local_fallback = true\n\
             fallback_carta_path = \"{root}/data/carta_items.json\"\n\
             fallback_wine_path = \"{root}/data/wine.es.json\"\n"
        ))
        .unwrap();
        let policy = settings.fallback_policy().unwrap();
        assert!(!policy.is_strict());
        assert!(!policy.data_for(FeedKind::Vinos).is_empty());
    }
}
