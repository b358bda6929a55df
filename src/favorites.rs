//! Durable favorites storage: one JSON array on disk, rewritten
//! wholesale on every change.

use crate::models::Movie;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct FavoritesFile {
    path: PathBuf,
}

impl FavoritesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored favorites. Missing or corrupt data degrades to
    /// an empty list; it is never surfaced to the caller.
    pub fn load(&self) -> Vec<Movie> {
        if !self.path.exists() {
            return Vec::new();
        }
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read favorites from {:?}: {}", self.path, e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Discarding corrupt favorites file {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    pub fn save(&self, favorites: &[Movie]) -> Result<()> {
        let json = serde_json::to_string(favorites).context("serializing favorites")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing favorites to {:?}", self.path))
    }
}
