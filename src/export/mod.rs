//! CSV export of the line collection

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::cli::ExportArgs;
use crate::lines::LineRecord;
use crate::store::Store;

const BOM: &str = "\u{feff}";
const HEADER: [&str; 4] = ["original", "translation", "src", "tgt"];

/// One row per line record, every field quoted, embedded quotes doubled.
pub fn csv_string(lines: &[LineRecord]) -> String {
    let mut rows = vec![csv_row(HEADER.iter().copied())];
    for line in lines {
        rows.push(csv_row(
            [
                line.orig.as_str(),
                line.tran.as_str(),
                line.src.as_str(),
                line.tgt.as_str(),
            ]
            .into_iter(),
        ));
    }
    rows.join("\n")
}

fn csv_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn run(args: ExportArgs, store: &Store) -> Result<()> {
    let lines = store.lines();
    let csv = format!("{}{}", BOM, csv_string(&lines));

    match args.output {
        Some(path) => {
            fs::write(&path, csv)
                .context(format!("Failed to write CSV file: {}", path.display()))?;
            println!(
                "{}",
                format!("[Export] {} line(s) -> {}", lines.len(), path.display()).green()
            );
        }
        None => print!("{}", csv),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(orig: &str, tran: &str) -> LineRecord {
        LineRecord {
            id: 1,
            orig: orig.to_string(),
            tran: tran.to_string(),
            src: "en".to_string(),
            tgt: "ko".to_string(),
            explain: None,
        }
    }

    #[test]
    fn header_row_comes_first() {
        let csv = csv_string(&[]);
        assert_eq!(csv, "\"original\",\"translation\",\"src\",\"tgt\"");
    }

    #[test]
    fn fields_are_quoted_with_doubled_quote_escaping() {
        let csv = csv_string(&[line("say \"hi\"", "\"안녕\" 해")]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"say \"\"hi\"\"\",\"\"\"안녕\"\" 해\",\"en\",\"ko\"");
    }

    #[test]
    fn commas_and_newlines_stay_inside_the_quotes() {
        let csv = csv_string(&[line("a,b", "c")]);
        assert!(csv.contains("\"a,b\",\"c\""));
    }
}
