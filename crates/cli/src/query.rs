//! Interactive search loop and the output shared with `pricelist search`.
//!
//! The loop only reads lines and prints; searching and exporting are the pure
//! `pricelist_engine::search` and `pricelist_io::export_report` calls, so the
//! loop is driven in tests with in-memory readers and writers.

use std::io::{BufRead, Write};
use std::path::Path;

use serde::Serialize;

use pricelist_engine::rank::format_rank;
use pricelist_engine::search;
use pricelist_engine::{Catalog, Ranked};
use pricelist_io::{export_report, ExportOutcome};

use crate::CliError;

pub const PROMPT: &str = "Enter a product name fragment to search (or 'exit' to quit): ";
pub const EXIT_KEYWORD: &str = "exit";

/// Decimals shown for price per unit in search results.
pub const RESULT_RANK_DECIMALS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Exit,
    Search(&'a str),
}

/// Interpret one input line. Only the line terminator is stripped, so
/// surrounding spaces are part of the search term.
pub fn parse_command(line: &str) -> Command<'_> {
    let term = line.trim_end_matches(['\n', '\r']);
    if term.to_lowercase() == EXIT_KEYWORD {
        Command::Exit
    } else {
        Command::Search(term)
    }
}

// ============================================================================
// Result formatting
// ============================================================================

/// One search result as emitted by `pricelist search --json`.
#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    pub index: usize,
    pub name: Option<&'a str>,
    pub price: Option<&'a str>,
    pub weight: Option<&'a str>,
    pub source_file: &'a str,
    pub price_per_unit: f64,
}

impl<'a> SearchHit<'a> {
    pub fn from_ranked(index: usize, hit: &Ranked<'a>) -> Self {
        Self {
            index,
            name: hit.record.name(),
            price: hit.record.price(),
            weight: hit.record.weight(),
            source_file: hit.record.source_file(),
            price_per_unit: hit.rank,
        }
    }
}

/// Human-readable result line, numbered from 1.
pub fn format_hit(index: usize, hit: &Ranked<'_>) -> String {
    let record = hit.record;
    format!(
        "{}. Name: {}, Price: {}, Weight: {}, File: {}, Price per unit: {}",
        index,
        record.name().unwrap_or_default(),
        record.price().unwrap_or_default(),
        record.weight().unwrap_or_default(),
        record.source_file(),
        format_rank(hit.rank, RESULT_RANK_DECIMALS),
    )
}

/// Print ranked hits, or the "no results" message echoing the term.
pub fn write_results<W: Write>(out: &mut W, term: &str, hits: &[Ranked<'_>]) -> std::io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No results for your query.")?;
        writeln!(out, "You searched for: {term}")?;
        return Ok(());
    }
    for (idx, hit) in hits.iter().enumerate() {
        writeln!(out, "{}", format_hit(idx + 1, hit))?;
    }
    Ok(())
}

/// Operator message for a finished export.
pub fn export_message(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::NoData => "No data to export to HTML.".to_string(),
        ExportOutcome::Written { path, rows } => {
            format!("HTML report written: {} ({rows} rows)", path.display())
        }
    }
}

// ============================================================================
// Loop
// ============================================================================

/// Prompt/search cycle over a loaded catalog.
pub struct QueryLoop<'a> {
    catalog: &'a Catalog,
    output_path: &'a Path,
}

impl<'a> QueryLoop<'a> {
    pub fn new(catalog: &'a Catalog, output_path: &'a Path) -> Self {
        Self { catalog, output_path }
    }

    /// Run until `exit` or end of input, then export the report.
    ///
    /// A record that cannot be ranked fails only the search that reached it;
    /// the loop keeps going. A failed final export is returned.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<(), CliError> {
        let mut line = String::new();
        loop {
            write!(out, "{PROMPT}").map_err(CliError::output)?;
            out.flush().map_err(CliError::output)?;

            line.clear();
            let read = input
                .read_line(&mut line)
                .map_err(|e| CliError::io(format!("cannot read input: {e}")))?;

            let command = if read == 0 {
                // end of input: finish as if the operator typed `exit`
                writeln!(out).map_err(CliError::output)?;
                Command::Exit
            } else {
                parse_command(&line)
            };

            match command {
                Command::Exit => return self.finish(&mut out),
                Command::Search(term) => match search::find(self.catalog, term) {
                    Ok(hits) => write_results(&mut out, term, &hits).map_err(CliError::output)?,
                    Err(err) => {
                        log::warn!("search '{}' failed: {}", term, err);
                        writeln!(out, "error: {err}").map_err(CliError::output)?;
                    }
                },
            }
        }
    }

    fn finish<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let outcome = export_report(self.catalog, self.output_path).map_err(CliError::export)?;
        writeln!(out, "{}", export_message(&outcome)).map_err(CliError::output)?;
        writeln!(out, "Done.").map_err(CliError::output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    use pricelist_engine::Record;

    use crate::exit_codes::EXIT_DATA;

    fn catalog() -> Catalog {
        [
            Record::new("f1.csv").with_name("A").with_price("100").with_weight("2"),
            Record::new("f1.csv").with_name("B").with_price("60").with_weight("3"),
            Record::new("milk.csv").with_name("Молоко").with_price("90").with_weight("0.9"),
        ]
        .into_iter()
        .collect()
    }

    fn drive(catalog: &Catalog, output: &Path, input: &str) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = QueryLoop::new(catalog, output).run(Cursor::new(input), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_exit_any_case() {
        assert_eq!(parse_command("exit\n"), Command::Exit);
        assert_eq!(parse_command("EXIT\r\n"), Command::Exit);
        assert_eq!(parse_command("Exit"), Command::Exit);
        assert_eq!(parse_command(" exit\n"), Command::Search(" exit"));
        assert_eq!(parse_command("exit now\n"), Command::Search("exit now"));
        assert_eq!(parse_command("мол\n"), Command::Search("мол"));
    }

    #[test]
    fn format_hit_two_decimals() {
        let record = Record::new("f1.csv").with_name("B").with_price("60").with_weight("3");
        let hit = Ranked { record: &record, rank: 20.0 };
        assert_eq!(
            format_hit(1, &hit),
            "1. Name: B, Price: 60, Weight: 3, File: f1.csv, Price per unit: 20.00"
        );
    }

    #[test]
    fn session_searches_then_exports() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.html");
        let catalog = catalog();

        let (result, text) = drive(&catalog, &output, "a\nмол\nzzz\nexit\n");
        result.unwrap();

        assert!(text.contains("1. Name: A, Price: 100, Weight: 2, File: f1.csv, Price per unit: 50.00"));
        assert!(!text.contains("Name: B"));
        assert!(text.contains("1. Name: Молоко"));
        assert!(text.contains("Price per unit: 100.00"));
        assert!(text.contains("No results for your query.\nYou searched for: zzz"));
        assert!(text.contains("HTML report written:"));
        assert!(text.trim_end().ends_with("Done."));
        assert_eq!(text.matches(PROMPT).count(), 4);

        let html = fs::read_to_string(&output).unwrap();
        assert_eq!(html.matches("<tr>").count(), 4);
    }

    #[test]
    fn end_of_input_exports() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.html");
        let catalog = catalog();

        let (result, text) = drive(&catalog, &output, "b");
        result.unwrap();
        assert!(text.contains("1. Name: B"));
        assert!(text.contains("Done."));
        assert!(output.exists());
    }

    #[test]
    fn empty_catalog_reports_no_data() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.html");

        let (result, text) = drive(&Catalog::new(), &output, "exit\n");
        result.unwrap();
        assert!(text.contains("No data to export to HTML."));
        assert!(!output.exists());
    }

    #[test]
    fn rank_error_keeps_loop_alive_but_fails_export() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.html");
        let catalog: Catalog = [
            Record::new("f.csv").with_name("bread").with_price("40"),
            Record::new("f.csv").with_name("butter").with_price("abc"),
        ]
        .into_iter()
        .collect();

        let (result, text) = drive(&catalog, &output, "butter\nbread\nexit\n");

        assert!(text.contains("error: f.csv: cannot parse price 'abc'"));
        assert!(text.contains("1. Name: bread"));
        let err = result.unwrap_err();
        assert_eq!(err.code, EXIT_DATA);
        assert!(!output.exists());
    }
}
