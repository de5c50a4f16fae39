//! HTML report of the full catalog, cheapest per unit first.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use pricelist_engine::rank::format_rank;
use pricelist_engine::{sort_ascending, Catalog, Ranked};

use crate::error::ExportError;

pub const REPORT_TITLE: &str = "Позиции продуктов";

/// Column headings, in table order.
pub const REPORT_COLUMNS: [&str; 6] = ["№", "Наименование", "Цена", "Вес", "Файл", "Цена за кг."];

/// Decimals shown in the per-unit column.
pub const REPORT_RANK_DECIMALS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Catalog was empty; no file was touched.
    NoData,
    Written { path: PathBuf, rows: usize },
}

/// Rank the whole catalog and write it as an HTML table to `path`.
///
/// Ranking happens before the file is opened, so a record that cannot be
/// ranked leaves no partial report behind. The parent directory must exist.
pub fn export_report(catalog: &Catalog, path: &Path) -> Result<ExportOutcome, ExportError> {
    if catalog.is_empty() {
        return Ok(ExportOutcome::NoData);
    }

    let ranked = sort_ascending(catalog)?;
    let html = render_report(&ranked);

    let io_err = |e: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    log::debug!("wrote {} report rows to {}", ranked.len(), path.display());

    Ok(ExportOutcome::Written { path: path.to_path_buf(), rows: ranked.len() })
}

/// Render ranked records as a self-contained HTML document.
pub fn render_report(ranked: &[Ranked<'_>]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"ru\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{REPORT_TITLE}</title>\n"));
    html.push_str("</head>\n<body>\n<table>\n<tr>");
    for heading in REPORT_COLUMNS {
        html.push_str(&format!("<th>{heading}</th>"));
    }
    html.push_str("</tr>\n");

    for (idx, item) in ranked.iter().enumerate() {
        let record = item.record;
        let cells = [
            (idx + 1).to_string(),
            escape_html(record.name().unwrap_or_default()).into_owned(),
            escape_html(record.price().unwrap_or_default()).into_owned(),
            escape_html(record.weight().unwrap_or_default()).into_owned(),
            escape_html(record.source_file()).into_owned(),
            format_rank(item.rank, REPORT_RANK_DECIMALS),
        ];
        html.push_str("<tr>");
        for cell in &cells {
            html.push_str("<td>");
            html.push_str(cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use pricelist_engine::Record;

    fn sample() -> Catalog {
        [
            Record::new("f1.csv").with_name("A").with_price("100").with_weight("2"),
            Record::new("f1.csv").with_name("B").with_price("60").with_weight("3"),
            Record::new("f2.csv").with_price("10").with_weight("3"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_catalog_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.html");
        let outcome = export_report(&Catalog::new(), &path).unwrap();
        assert_eq!(outcome, ExportOutcome::NoData);
        assert!(!path.exists());
    }

    #[test]
    fn one_row_per_record_plus_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.html");
        let outcome = export_report(&sample(), &path).unwrap();
        assert_eq!(outcome, ExportOutcome::Written { path: path.clone(), rows: 3 });

        let html = fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("<tr>").count(), 4);
        assert_eq!(html.matches("<th>").count(), 6);
        assert!(html.contains("<title>Позиции продуктов</title>"));
    }

    #[test]
    fn rows_follow_rank_order() {
        let catalog = sample();
        let ranked = sort_ascending(&catalog).unwrap();
        let html = render_report(&ranked);

        // f2 row (3.3) < B (20.0) < A (50.0)
        assert!(html.contains("<tr><td>1</td><td></td><td>10</td><td>3</td><td>f2.csv</td><td>3.3</td></tr>"));
        assert!(html.contains("<tr><td>2</td><td>B</td><td>60</td><td>3</td><td>f1.csv</td><td>20.0</td></tr>"));
        assert!(html.contains("<tr><td>3</td><td>A</td><td>100</td><td>2</td><td>f1.csv</td><td>50.0</td></tr>"));
    }

    #[test]
    fn rank_error_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.html");
        let catalog: Catalog = [Record::new("f.csv").with_name("x").with_price("abc")]
            .into_iter()
            .collect();

        let err = export_report(&catalog, &path).unwrap_err();
        assert!(matches!(err, ExportError::Rank(_)));
        assert!(!path.exists());
    }

    #[test]
    fn missing_parent_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("output.html");
        let err = export_report(&sample(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn cell_text_is_escaped() {
        let catalog: Catalog = [Record::new("f.csv").with_name("<b>Чай & кофе</b>").with_price("1")]
            .into_iter()
            .collect();
        let html = render_report(&sort_ascending(&catalog).unwrap());
        assert!(html.contains("&lt;b&gt;Чай &amp; кофе&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
