//! Translation, retranslation, and explanation commands

pub mod client;
pub mod error;
pub mod prompt;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{ExplainArgs, KeyAction, KeyArgs, RetranslateArgs, TranslateArgs};
use crate::glossary::apply_glossary;
use crate::lines::{LineBoard, LineId};
use crate::store::Store;
use client::{ClientConfig, GeminiClient};
use error::ApiError;

/// API key resolution: store first, then environment. Checked before any
/// request is built.
fn resolve_api_key(store: &Store) -> Result<String, ApiError> {
    store
        .api_key()
        .or_else(|| {
            std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
        })
        .ok_or_else(|| {
            ApiError::Validation(
                "No API key saved. Run 'lingopad key set <key>' or set GEMINI_API_KEY".to_string(),
            )
        })
}

fn make_client(store: &Store) -> Result<GeminiClient> {
    let api_key = resolve_api_key(store)?;
    let client = GeminiClient::new(ClientConfig::new(api_key, store.settings()))?;
    Ok(client)
}

/// Translate text and append the result: validate, build the prompt, one
/// request, deterministic glossary pass over the output, persist.
pub async fn run_translate(args: TranslateArgs, store: &mut Store) -> Result<()> {
    let text = args.text.trim().to_string();
    if text.is_empty() {
        anyhow::bail!("Nothing to translate");
    }

    let src = args.src.unwrap_or_else(|| store.src_lang());
    let tgt = args.tgt.unwrap_or_else(|| store.tgt_lang());

    let client = make_client(store)?;
    let glossary = store.glossary();

    println!("{}", format!("[Translate] {} -> {}", src, tgt).green());
    let raw = client.translate(&text, &src, &tgt, &glossary).await?;
    let translated = apply_glossary(&raw, &glossary);

    // The chosen language pair becomes the new default.
    store.set_src_lang(&src)?;
    store.set_tgt_lang(&tgt)?;

    let mut board = LineBoard::new(store)?;
    board.append(text, translated.clone(), src, tgt)?;

    println!("{}", translated);
    Ok(())
}

/// Re-translate existing lines in place. Requests run concurrently; each
/// one captures the line's stable id at issue time and the result is
/// written back through id resolution, so lines shifted or deleted while a
/// request is in flight cannot corrupt an unrelated line.
pub async fn run_retranslate(args: RetranslateArgs, store: &mut Store) -> Result<()> {
    let client = make_client(store)?;
    let glossary = store.glossary();
    let src = store.src_lang();
    let tgt = store.tgt_lang();

    let mut board = LineBoard::new(store)?;
    let lines = board.lines();
    if lines.is_empty() {
        anyhow::bail!("No lines to retranslate");
    }

    if args.all {
        board.selection_mut().select_all(lines.len());
    } else {
        for &i in &args.indices {
            if i >= lines.len() {
                anyhow::bail!("No line at index {} ({} lines)", i, lines.len());
            }
            board.selection_mut().toggle(i);
        }
    }
    if board.selection().is_empty() {
        return Err(ApiError::Validation("No lines selected".to_string()).into());
    }

    // Snapshot (id, text) pairs at issue time; indices are not re-resolved.
    let targets: Vec<(LineId, String)> = board
        .selection()
        .indices()
        .into_iter()
        .map(|i| (lines[i].id, lines[i].orig.clone()))
        .collect();

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("=>-"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut tasks = tokio::task::JoinSet::new();
    for (id, orig) in targets {
        let client = client.clone();
        let glossary = glossary.clone();
        let src = src.clone();
        let tgt = tgt.clone();
        tasks.spawn(async move {
            let result = client
                .translate(&orig, &src, &tgt, &glossary)
                .await
                .map(|raw| apply_glossary(&raw, &glossary));
            (id, result)
        });
    }

    let mut updated = 0usize;
    let mut failed = 0usize;
    let mut discarded = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (id, result) = joined.context("Translation task panicked")?;
        match result {
            Ok(translated) => {
                if board.commit_translation(id, translated)? {
                    updated += 1;
                } else {
                    discarded += 1;
                }
            }
            Err(e) => {
                failed += 1;
                pb.suspend(|| {
                    eprintln!("{}", format!("[ERROR] Failed to retranslate: {}", e).red());
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{}",
        format!("[Retranslate] {} updated, {} failed", updated, failed).green()
    );
    if discarded > 0 {
        println!(
            "{}",
            format!("[WARN] {} result(s) discarded (lines deleted meanwhile)", discarded).yellow()
        );
    }
    Ok(())
}

/// Fetch (or reuse) the explanation for one line. The cached value on the
/// line makes repeat reads free; the write-back targets the line's id.
pub async fn run_explain(args: ExplainArgs, store: &mut Store) -> Result<()> {
    let client = make_client(store)?;
    let tgt = store.tgt_lang();

    let mut board = LineBoard::new(store)?;
    let lines = board.lines();
    let line = lines
        .get(args.index)
        .with_context(|| format!("No line at index {} ({} lines)", args.index, lines.len()))?;

    let explanation = client
        .explain(
            &line.orig,
            &line.tran,
            &tgt,
            line.explain.as_deref(),
            args.refresh,
        )
        .await?;

    board.commit_explanation(line.id, explanation.clone())?;

    println!("{}", explanation);
    Ok(())
}

pub async fn run_key(args: KeyArgs, store: &mut Store) -> Result<()> {
    match args.action {
        KeyAction::Set { key } => {
            store.set_api_key(&key)?;
            println!("{}", "[Key] Saved".green());
        }
        KeyAction::Show => match store.api_key() {
            Some(key) => println!("{}", mask_key(&key)),
            None => println!("{}", "[Key] Not set".yellow()),
        },
        KeyAction::Test => {
            let client = make_client(store)?;
            client.translate("ping", "en", "ko", &[]).await?;
            println!("{}", "[Key] OK".green());
        }
    }
    Ok(())
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}{}", visible, "*".repeat(key.chars().count().saturating_sub(4)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_key_hides_everything_past_the_prefix() {
        assert_eq!(mask_key("abcd1234"), "abcd****");
        assert_eq!(mask_key("ab"), "ab");
    }
}
