//! Rendering of match results and summaries into reply text.
//!
//! Replies are bounded by the transport payload cap: when a reply would
//! exceed it, whole rows are dropped from the end and a truncation notice
//! is appended so the user knows the list was cut.

use thiserror::Error;

use crate::core::dataset::{DatasetSummary, Row};

/// Telegram rejects sendMessage payloads longer than this.
pub const MAX_REPLY_LEN: usize = 4096;

/// Internal signal that rendered content exceeds the payload cap.
/// Always recovered locally by dropping rows; never shown to the user.
#[derive(Debug, Error)]
#[error("formatted reply exceeds the payload cap")]
struct FormatOverflow;

fn render_cell(value: &str) -> String {
    // Cells may contain embedded newlines; flatten them so each row stays
    // exactly one line in the reply.
    value.replace('\n', " ")
}

fn render_row(headers: &[String], row: &Row) -> String {
    headers
        .iter()
        .zip(row.cells())
        .map(|(header, value)| format!("{}: {}", header, render_cell(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncation_notice(shown: usize, total: usize) -> String {
    format!(
        "Showing {} of {} matching rows. Try a narrower query.",
        shown, total
    )
}

fn assemble(
    lines: &[String],
    with_notice: bool,
    total_matches: usize,
) -> Result<String, FormatOverflow> {
    let mut text = lines.join("\n");
    if with_notice {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&truncation_notice(lines.len(), total_matches));
    }
    if text.len() > MAX_REPLY_LEN {
        return Err(FormatOverflow);
    }
    Ok(text)
}

/// Render matched rows, one line per row, `header: value` pairs joined by
/// commas. `truncated` marks that the matcher already capped the result;
/// the notice also appears whenever the payload cap forces rows to be
/// dropped here, regardless of the flag.
pub fn format_rows(
    rows: &[Row],
    headers: &[String],
    truncated: bool,
    total_matches: usize,
) -> String {
    let lines: Vec<String> = rows.iter().map(|row| render_row(headers, row)).collect();

    if let Ok(text) = assemble(&lines, truncated, total_matches) {
        return text;
    }

    // Over the cap: drop rows from the end until the reply (notice
    // included) fits.
    let mut kept = lines.len();
    while kept > 0 {
        kept -= 1;
        if let Ok(text) = assemble(&lines[..kept], true, total_matches) {
            return text;
        }
    }
    truncation_notice(0, total_matches)
}

/// Render the dataset overview: record and column counts, per-column
/// non-empty cell counts, then a few sample rows.
pub fn format_summary(summary: &DatasetSummary) -> String {
    let mut text = String::from("Data summary:\n\n");
    text.push_str(&format!("Total records: {}\n", summary.row_count));
    text.push_str(&format!("Total columns: {}\n\n", summary.columns.len()));

    text.push_str("Columns:\n");
    for column in &summary.columns {
        text.push_str(&format!("- {} ({} values)\n", column.name, column.non_empty));
    }

    if !summary.sample_rows.is_empty() {
        let headers: Vec<String> = summary
            .columns
            .iter()
            .map(|column| column.name.clone())
            .collect();
        text.push_str("\nSample rows:\n");
        for row in &summary.sample_rows {
            text.push_str(&render_row(&headers, row));
            text.push('\n');
        }
    }

    let text = text.trim_end().to_string();
    clamp_to_payload(text)
}

fn clamp_to_payload(mut text: String) -> String {
    if text.len() <= MAX_REPLY_LEN {
        return text;
    }
    let mut cut = MAX_REPLY_LEN;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::TabularDataset;

    fn dataset(rows: &[&[&str]]) -> TabularDataset {
        TabularDataset::from_values(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn headers(dataset: &TabularDataset) -> Vec<String> {
        dataset.headers().to_vec()
    }

    #[test]
    fn renders_one_line_per_row_with_header_value_pairs() {
        let data = dataset(&[
            &["Name", "City", "Price"],
            &["Widget", "NYC", "150"],
            &["Gadget", "LA", "50"],
        ]);

        let text = format_rows(data.rows(), &headers(&data), false, 2);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Name: Widget, City: NYC, Price: 150");
        assert_eq!(lines[1], "Name: Gadget, City: LA, Price: 50");
    }

    #[test]
    fn truncated_flag_appends_a_notice_line() {
        let data = dataset(&[&["N"], &["a"], &["b"]]);
        let text = format_rows(data.rows(), &headers(&data), true, 30);

        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Showing 2 of 30 matching rows. Try a narrower query.");
    }

    #[test]
    fn embedded_newlines_do_not_break_the_one_line_per_row_shape() {
        let data = dataset(&[&["Note"], &["line one\nline two"]]);
        let text = format_rows(data.rows(), &headers(&data), false, 1);
        assert_eq!(text.split('\n').count(), 1);
        assert_eq!(text, "Note: line one line two");
    }

    #[test]
    fn oversized_replies_drop_rows_and_always_show_the_notice() {
        let wide = "x".repeat(600);
        let mut values = vec![vec!["Data".to_string()]];
        for _ in 0..10 {
            values.push(vec![wide.clone()]);
        }
        let data = TabularDataset::from_values(values).unwrap();

        let text = format_rows(data.rows(), &headers(&data), false, 10);
        assert!(text.len() <= MAX_REPLY_LEN);
        assert!(text.contains("Try a narrower query."));
        // Fewer rows than were passed in survive the cap.
        assert!(text.split('\n').count() < 11);
    }

    #[test]
    fn reply_fits_even_when_a_single_row_is_oversized() {
        let data = dataset(&[&["Data"]]);
        let huge_row = TabularDataset::from_values(vec![
            vec!["Data".to_string()],
            vec!["y".repeat(MAX_REPLY_LEN * 2)],
        ])
        .unwrap();

        let text = format_rows(huge_row.rows(), &headers(&data), false, 1);
        assert!(text.len() <= MAX_REPLY_LEN);
        assert_eq!(text, "Showing 0 of 1 matching rows. Try a narrower query.");
    }

    #[test]
    fn summary_lists_counts_columns_and_samples() {
        let data = dataset(&[
            &["Name", "City"],
            &["Widget", "NYC"],
            &["Gadget", ""],
        ]);

        let text = format_summary(&data.summary());
        assert!(text.contains("Total records: 2"));
        assert!(text.contains("Total columns: 2"));
        assert!(text.contains("- Name (2 values)"));
        assert!(text.contains("- City (1 values)"));
        assert!(text.contains("Name: Widget, City: NYC"));
    }

    #[test]
    fn summary_stays_under_the_payload_cap() {
        let mut header_row: Vec<String> = Vec::new();
        for i in 0..400 {
            header_row.push(format!("column-with-a-long-name-{}", i));
        }
        let data = TabularDataset::from_values(vec![header_row]).unwrap();

        let text = format_summary(&data.summary());
        assert!(text.len() <= MAX_REPLY_LEN);
    }
}
