//! Settings command handlers

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Settings;
use crate::store::Store;

const KNOWN_KEYS: &[&str] = &[
    "model",
    "explainModel",
    "temperature",
    "topP",
    "maxTokens",
    "explainMaxTokens",
    "timeoutMs",
    "tone",
    "variety",
    "preserve",
    "customPrompt",
];

pub fn run(args: ConfigArgs, store: &mut Store) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_settings(store),
        ConfigAction::Get { key } => get_setting(store, &key),
        ConfigAction::Set { key, value } => set_setting(store, &key, &value),
        ConfigAction::Reset => reset_settings(store),
        ConfigAction::Path => show_path(store),
    }
}

fn show_settings(store: &Store) -> Result<()> {
    let settings = store.settings();
    let content = serde_json::to_string_pretty(&settings)?;

    println!("{}", "[Config]".green());
    println!("{}", content);

    Ok(())
}

fn get_setting(store: &Store, key: &str) -> Result<()> {
    let value = serde_json::to_value(store.settings())?;
    match value.get(key) {
        Some(v) => println!("{}", v),
        None => anyhow::bail!("Unknown setting: {}. Known keys: {}", key, KNOWN_KEYS.join(", ")),
    }
    Ok(())
}

fn set_setting(store: &mut Store, key: &str, value: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        anyhow::bail!("Unknown setting: {}. Known keys: {}", key, KNOWN_KEYS.join(", "));
    }

    let mut tree = serde_json::to_value(store.settings())?;
    let obj = tree
        .as_object_mut()
        .context("Settings did not serialize to an object")?;

    // Accept bare strings as well as JSON literals (numbers, booleans)
    let parsed = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    obj.insert(key.to_string(), parsed);

    let settings: Settings = serde_json::from_value(tree)
        .context(format!("Invalid value for '{key}': {value}"))?;
    store.set_settings(&settings)?;

    println!("{}", format!("[Config] Set {} = {}", key, value).green());
    Ok(())
}

fn reset_settings(store: &mut Store) -> Result<()> {
    store.set_settings(&Settings::default())?;
    println!("{}", "[Config] Reset to defaults".green());
    Ok(())
}

fn show_path(store: &Store) -> Result<()> {
    match store.path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(in-memory store)"),
    }
    Ok(())
}
