//! Durable key-value store with typed accessors

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::glossary::GlossaryEntry;
use crate::lines::{LineRecord, Note};

const STORE_FILE_NAME: &str = "store.json";
const APP_NAME: &str = "lingopad";

const KEY_API_KEY: &str = "api_key";
const KEY_SRC: &str = "src";
const KEY_TGT: &str = "tgt";
const KEY_LINES: &str = "lines";
const KEY_NOTES: &str = "saved_notes";
const KEY_GLOSSARY: &str = "glossary";
const KEY_SETTINGS: &str = "settings";
const KEY_LAYOUT: &str = "layout";

pub const DEFAULT_SRC_LANG: &str = "auto";
pub const DEFAULT_TGT_LANG: &str = "ko";
pub const DEFAULT_LAYOUT: &str = "pair";

/// String-keyed durable storage. Everything above this trait treats the
/// backing medium as opaque.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Flat string map persisted as a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        let map = if path.exists() {
            let content = fs::read_to_string(path)
                .context(format!("Failed to read store file: {}", path.display()))?;
            match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("Store file is malformed, starting empty: {}", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join(APP_NAME).join(STORE_FILE_NAME))
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create store directory")?;
        }
        let content = serde_json::to_string_pretty(&self.map).context("Failed to serialize store")?;
        fs::write(&self.path, content)
            .context(format!("Failed to write store file: {}", self.path.display()))?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    map: BTreeMap<String, String>,
}

#[cfg(test)]
impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed accessors over the raw key-value store. Serialized values are JSON;
/// malformed or missing values fall back to defaults instead of failing.
/// Accessors return copies, never a live reference into the store.
pub struct Store {
    kv: Box<dyn KvStore>,
    path: Option<PathBuf>,
}

impl Store {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => JsonFileStore::default_path().context("Could not determine data directory")?,
        };
        let kv = JsonFileStore::open(&path)?;
        Ok(Self {
            kv: Box::new(kv),
            path: Some(path),
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            kv: Box::new(MemoryStore::default()),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.kv.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Malformed value for '{}', using default: {}", key, e);
                None
            }
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).context(format!("Failed to serialize '{key}'"))?;
        self.kv.set(key, &raw)
    }

    pub fn api_key(&self) -> Option<String> {
        self.kv.get(KEY_API_KEY).filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, key: &str) -> Result<()> {
        self.kv.set(KEY_API_KEY, key.trim())
    }

    pub fn src_lang(&self) -> String {
        self.kv
            .get(KEY_SRC)
            .unwrap_or_else(|| DEFAULT_SRC_LANG.to_string())
    }

    pub fn set_src_lang(&mut self, lang: &str) -> Result<()> {
        self.kv.set(KEY_SRC, lang)
    }

    pub fn tgt_lang(&self) -> String {
        self.kv
            .get(KEY_TGT)
            .unwrap_or_else(|| DEFAULT_TGT_LANG.to_string())
    }

    pub fn set_tgt_lang(&mut self, lang: &str) -> Result<()> {
        self.kv.set(KEY_TGT, lang)
    }

    pub fn lines(&self) -> Vec<LineRecord> {
        self.get_json(KEY_LINES).unwrap_or_default()
    }

    pub fn set_lines(&mut self, lines: &[LineRecord]) -> Result<()> {
        self.set_json(KEY_LINES, &lines)
    }

    pub fn notes(&self) -> BTreeMap<String, Note> {
        self.get_json(KEY_NOTES).unwrap_or_default()
    }

    pub fn set_notes(&mut self, notes: &BTreeMap<String, Note>) -> Result<()> {
        self.set_json(KEY_NOTES, notes)
    }

    pub fn glossary(&self) -> Vec<GlossaryEntry> {
        self.get_json(KEY_GLOSSARY).unwrap_or_default()
    }

    pub fn set_glossary(&mut self, glossary: &[GlossaryEntry]) -> Result<()> {
        self.set_json(KEY_GLOSSARY, &glossary)
    }

    pub fn settings(&self) -> Settings {
        self.get_json(KEY_SETTINGS).unwrap_or_default()
    }

    pub fn set_settings(&mut self, settings: &Settings) -> Result<()> {
        self.set_json(KEY_SETTINGS, settings)
    }

    pub fn layout(&self) -> String {
        self.kv
            .get(KEY_LAYOUT)
            .unwrap_or_else(|| DEFAULT_LAYOUT.to_string())
    }

    pub fn set_layout(&mut self, layout: &str) -> Result<()> {
        self.kv.set(KEY_LAYOUT, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let store = Store::in_memory();
        assert!(store.api_key().is_none());
        assert_eq!(store.src_lang(), "auto");
        assert_eq!(store.tgt_lang(), "ko");
        assert!(store.lines().is_empty());
        assert!(store.notes().is_empty());
        assert!(store.glossary().is_empty());
        assert_eq!(store.layout(), "pair");
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let mut store = Store::in_memory();
        store.kv.set(KEY_LINES, "not json").unwrap();
        store.kv.set(KEY_GLOSSARY, "{broken").unwrap();
        assert!(store.lines().is_empty());
        assert!(store.glossary().is_empty());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut store = Store::in_memory();
        store.set_api_key("   ").unwrap();
        assert!(store.api_key().is_none());
        store.set_api_key(" abc123 ").unwrap();
        assert_eq!(store.api_key().as_deref(), Some("abc123"));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("src", "en").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("src").as_deref(), Some("en"));
    }
}
