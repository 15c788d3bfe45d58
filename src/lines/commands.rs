//! Line collection command handlers

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::cli::{
    ClearArgs, CopyArgs, CopyMode, DeleteArgs, EditArgs, Layout, ListArgs, NoteAction, NoteArgs,
};
use crate::lines::LineBoard;
use crate::store::Store;

pub fn run_list(args: ListArgs, store: &mut Store) -> Result<()> {
    let layout = match args.layout {
        Some(layout) => {
            store.set_layout(layout.as_str())?;
            layout
        }
        None => Layout::from_store(&store.layout()),
    };

    let lines = store.lines();
    if lines.is_empty() {
        println!("{}", "[List] No lines".yellow());
        return Ok(());
    }

    match layout {
        Layout::Pair => {
            for (i, line) in lines.iter().enumerate() {
                let marker = if line.explain.is_some() { " *" } else { "" };
                println!("{}{}", format!("{}. {}", i, line.orig).bold(), marker);
                println!("   {}", line.tran);
            }
        }
        Layout::Split => {
            println!("{}", "[Original]".cyan());
            for (i, line) in lines.iter().enumerate() {
                println!("{}. {}", i, line.orig);
            }
            println!("{}", "[Translation]".cyan());
            for (i, line) in lines.iter().enumerate() {
                println!("{}. {}", i, line.tran);
            }
        }
    }
    Ok(())
}

pub fn run_edit(args: EditArgs, store: &mut Store) -> Result<()> {
    if args.orig.is_none() && args.tran.is_none() {
        anyhow::bail!("Nothing to edit; pass --orig and/or --tran");
    }
    let mut board = LineBoard::new(store)?;
    board.edit(args.index, args.orig, args.tran)?;
    println!("{}", format!("[Edit] Updated line {}", args.index).green());
    Ok(())
}

pub fn run_delete(args: DeleteArgs, store: &mut Store) -> Result<()> {
    let mut board = LineBoard::new(store)?;
    let count = board.lines().len();
    select(&mut board, &args.indices, args.all, count)?;

    let selected = board.selection().len();
    if !args.yes && !confirm(&format!("Delete {} line(s)?", selected))? {
        println!("{}", "[Delete] Cancelled".yellow());
        return Ok(());
    }

    let indices = board.selection().indices();
    let remaining = board.delete_indices(&indices)?.len();
    println!(
        "{}",
        format!("[Delete] Removed {} line(s), {} remaining", selected, remaining).green()
    );
    Ok(())
}

pub fn run_copy(args: CopyArgs, store: &mut Store) -> Result<()> {
    let mut board = LineBoard::new(store)?;
    let lines = board.lines();
    select(&mut board, &args.indices, args.all, lines.len())?;

    let parts: Vec<String> = board
        .selection()
        .indices()
        .into_iter()
        .map(|i| {
            let line = &lines[i];
            match args.mode {
                CopyMode::Orig => line.orig.clone(),
                CopyMode::Tran => line.tran.clone(),
                CopyMode::Both => format!("{}\n{}", line.orig, line.tran),
            }
        })
        .collect();

    println!("{}", parts.join("\n"));
    Ok(())
}

pub fn run_clear(args: ClearArgs, store: &mut Store) -> Result<()> {
    let mut board = LineBoard::new(store)?;
    let count = board.lines().len();
    if !args.yes && !confirm(&format!("Remove all {} line(s)?", count))? {
        println!("{}", "[Clear] Cancelled".yellow());
        return Ok(());
    }
    board.clear()?;
    println!("{}", format!("[Clear] Removed {} line(s)", count).green());
    Ok(())
}

pub fn run_note(args: NoteArgs, store: &mut Store) -> Result<()> {
    match args.action {
        NoteAction::Save { name, indices, all } => {
            let mut board = LineBoard::new(store)?;
            let count = board.lines().len();
            select(&mut board, &indices, all, count)?;
            let picked = board.selection().indices();
            let saved = board.save_note(&name, &picked)?;
            println!(
                "{}",
                format!("[Note] Saved {} line(s) to '{}'", saved, name).green()
            );
        }
        NoteAction::Load { name } => {
            let mut board = LineBoard::new(store)?;
            let loaded = board.load_note(&name)?;
            let total = board.lines().len();
            println!(
                "{}",
                format!("[Note] Appended {} line(s) from '{}' ({} total)", loaded, name, total)
                    .green()
            );
        }
        NoteAction::List => {
            let notes = store.notes();
            if notes.is_empty() {
                println!("{}", "[Note] No saved notes".yellow());
                return Ok(());
            }
            println!("{}", format!("[Note] {} note(s)", notes.len()).green());
            for (name, note) in &notes {
                println!(
                    "  {} ({} lines, {})",
                    name,
                    note.lines.len(),
                    note.date.format("%Y-%m-%d %H:%M")
                );
            }
        }
        NoteAction::Delete { name } => {
            let mut board = LineBoard::new(store)?;
            board.delete_note(&name)?;
            println!("{}", format!("[Note] Deleted '{}'", name).green());
        }
    }
    Ok(())
}

/// Builds the board's selection from explicit indices or `--all`. An empty
/// selection is a validation error raised before anything is touched.
fn select(board: &mut LineBoard, indices: &[usize], all: bool, count: usize) -> Result<()> {
    if all {
        board.selection_mut().select_all(count);
    } else {
        for &i in indices {
            if i >= count {
                anyhow::bail!("No line at index {} ({} lines)", i, count);
            }
            board.selection_mut().toggle(i);
        }
    }
    if board.selection().is_empty() {
        anyhow::bail!("No lines selected");
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
