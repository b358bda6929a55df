use anyhow::{bail, Context, Result};
use std::env;

const DEFAULT_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const DEFAULT_LANGUAGE: &str = "en-US";

/// Connection settings for the catalog API. Required fields are
/// validated at construction, not at first use.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            bail!("TMDB API key must not be empty");
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        let mut config = Self::new(api_key)?;
        if let Ok(base) = env::var("TMDB_BASE_URL") {
            config.base_url = base;
        }
        if let Ok(image_base) = env::var("TMDB_IMAGE_BASE_URL") {
            config.image_base_url = image_base;
        }
        if let Ok(language) = env::var("TMDB_LANGUAGE") {
            config.language = language;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_api_key() {
        assert!(TmdbConfig::new("").is_err());
        assert!(TmdbConfig::new("   ").is_err());
    }

    #[test]
    fn applies_defaults() {
        let config = TmdbConfig::new("secret").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE);
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE);
        assert_eq!(config.language, DEFAULT_LANGUAGE);
    }
}
