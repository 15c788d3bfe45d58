//! Glossary command handlers

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::cli::{GlossaryAction, GlossaryArgs};
use crate::glossary::{GlossaryEntry, parse_glossary_file};
use crate::store::Store;

pub fn run(args: GlossaryArgs, store: &mut Store) -> Result<()> {
    match args.action {
        GlossaryAction::Add { src, tgt, whole } => add_entry(store, src, tgt, whole),
        GlossaryAction::List => list_entries(store),
        GlossaryAction::Remove { index } => remove_entry(store, index),
        GlossaryAction::Clear => clear_entries(store),
        GlossaryAction::Import { file, whole } => import_entries(store, &file, whole),
    }
}

fn add_entry(store: &mut Store, src: String, tgt: String, whole: bool) -> Result<()> {
    let src = src.trim().to_string();
    let tgt = tgt.trim().to_string();
    if src.is_empty() || tgt.is_empty() {
        anyhow::bail!("Both source and target terms are required");
    }

    let mut glossary = store.glossary();
    glossary.push(GlossaryEntry { src: src.clone(), tgt: tgt.clone(), whole });
    store.set_glossary(&glossary)?;

    println!(
        "{}",
        format!("[Glossary] Added \"{}\" -> \"{}\"{}", src, tgt, whole_tag(whole)).green()
    );
    Ok(())
}

fn list_entries(store: &Store) -> Result<()> {
    let glossary = store.glossary();
    println!("{}", format!("[Glossary] {} entries", glossary.len()).green());
    for (i, entry) in glossary.iter().enumerate() {
        println!(
            "  {}. \"{}\" -> \"{}\"{}",
            i,
            entry.src,
            entry.tgt,
            whole_tag(entry.whole)
        );
    }
    Ok(())
}

fn remove_entry(store: &mut Store, index: usize) -> Result<()> {
    let mut glossary = store.glossary();
    if index >= glossary.len() {
        anyhow::bail!(
            "No glossary entry at index {} ({} entries)",
            index,
            glossary.len()
        );
    }
    let removed = glossary.remove(index);
    store.set_glossary(&glossary)?;

    println!(
        "{}",
        format!("[Glossary] Removed \"{}\" -> \"{}\"", removed.src, removed.tgt).green()
    );
    Ok(())
}

fn clear_entries(store: &mut Store) -> Result<()> {
    store.set_glossary(&[])?;
    println!("{}", "[Glossary] Cleared".green());
    Ok(())
}

fn import_entries(store: &mut Store, file: &std::path::Path, whole: bool) -> Result<()> {
    let content = fs::read_to_string(file)
        .context(format!("Failed to read glossary file: {}", file.display()))?;
    let imported = parse_glossary_file(&content, whole);
    if imported.is_empty() {
        println!("{}", "[WARN] No glossary entries found".yellow());
        return Ok(());
    }

    let mut glossary = store.glossary();
    let count = imported.len();
    glossary.extend(imported);
    store.set_glossary(&glossary)?;

    println!("{}", format!("[Glossary] Imported {} entries", count).green());
    Ok(())
}

fn whole_tag(whole: bool) -> &'static str {
    if whole { " (whole word)" } else { "" }
}
