use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Maps team labels as the site prints them to the names we publish.
/// Lookups are case-insensitive; unknown teams pass through trimmed.
#[derive(Debug, Clone, Default)]
pub struct TeamAliases {
    aliases: HashMap<String, String>,
}

impl TeamAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let aliases = map
            .into_iter()
            .map(|(raw, canonical)| (lookup_key(raw.as_ref()), canonical.into()))
            .collect();
        Self { aliases }
    }

    /// Loads a flat JSON object, `{ "RAW NAME": "Canonical" }`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read team aliases from {}", path.display()))?;
        let map: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Team aliases in {} are not a JSON object of strings", path.display()))?;
        debug!("Loaded {} team aliases from {}", map.len(), path.display());
        Ok(Self::from_map(map))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn normalize(&self, name: &str) -> String {
        let trimmed = name.trim();
        match self.aliases.get(&lookup_key(trimmed)) {
            Some(canonical) => canonical.clone(),
            None => trimmed.to_string(),
        }
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_uppercase()
}
