// Domain model for the spreadsheet snapshot.
// Notice how this module has NO Telegram- or Google-specific code.
// It works with plain strings, so the same dataset could back a web UI,
// a CLI tool, or any other frontend.

use super::sheet_source::FetchError;

/// How many rows `summary()` includes as a preview.
pub const SUMMARY_SAMPLE_ROWS: usize = 3;

/// One spreadsheet row. Cells are positionally aligned with the dataset's
/// headers: construction pads short rows and truncates long ones, so every
/// row always carries exactly one cell per header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    fn new(mut cells: Vec<String>, width: usize) -> Self {
        cells.resize(width, String::new());
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// An immutable, internally consistent snapshot of the sheet.
///
/// **Lifecycle:** created empty at startup, replaced wholesale by
/// `DatasetCache::refresh`, never mutated in place.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Per-column stats for the summary reply.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub non_empty: usize,
}

#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub sample_rows: Vec<Row>,
}

impl TabularDataset {
    /// The snapshot the cache holds before the first successful refresh.
    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a dataset from the raw value grid the sheet provider returns.
    /// The first row is the header row; the rest are data rows.
    ///
    /// Fails without producing a partial dataset: an empty grid is
    /// `EmptySheet`, a blank or duplicated header name is `MalformedHeader`.
    /// A header row with zero data rows is a valid (empty) dataset.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Result<Self, FetchError> {
        if values.is_empty() {
            return Err(FetchError::EmptySheet);
        }

        let headers = values.remove(0);
        if headers.is_empty() {
            return Err(FetchError::MalformedHeader("header row is empty".to_string()));
        }

        let mut seen = Vec::with_capacity(headers.len());
        for header in &headers {
            let trimmed = header.trim();
            if trimmed.is_empty() {
                return Err(FetchError::MalformedHeader(
                    "header row contains a blank column name".to_string(),
                ));
            }
            let lowered = trimmed.to_lowercase();
            if seen.contains(&lowered) {
                return Err(FetchError::MalformedHeader(format!(
                    "duplicate column name '{}'",
                    trimmed
                )));
            }
            seen.push(lowered);
        }

        let width = headers.len();
        let rows = values
            .into_iter()
            .map(|cells| Row::new(cells, width))
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Pure read; no side effects.
    pub fn summary(&self) -> DatasetSummary {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(index, name)| ColumnSummary {
                name: name.clone(),
                non_empty: self
                    .rows
                    .iter()
                    .filter(|row| {
                        row.cells()
                            .get(index)
                            .is_some_and(|cell| !cell.trim().is_empty())
                    })
                    .count(),
            })
            .collect();

        DatasetSummary {
            row_count: self.rows.len(),
            columns,
            sample_rows: self.rows.iter().take(SUMMARY_SAMPLE_ROWS).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn builds_dataset_from_value_grid() {
        let dataset = TabularDataset::from_values(grid(&[
            &["Name", "City", "Price"],
            &["Widget", "NYC", "150"],
            &["Gadget", "LA", "50"],
        ]))
        .unwrap();

        assert_eq!(dataset.headers(), &["Name", "City", "Price"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[0].cells(), &["Widget", "NYC", "150"]);
    }

    #[test]
    fn pads_short_rows_and_truncates_long_rows() {
        let dataset = TabularDataset::from_values(grid(&[
            &["A", "B", "C"],
            &["only-a"],
            &["1", "2", "3", "overflow"],
        ]))
        .unwrap();

        assert_eq!(dataset.rows()[0].cells(), &["only-a", "", ""]);
        assert_eq!(dataset.rows()[1].cells(), &["1", "2", "3"]);
    }

    #[test]
    fn empty_grid_is_an_empty_sheet_error() {
        let err = TabularDataset::from_values(Vec::new()).unwrap_err();
        assert!(matches!(err, FetchError::EmptySheet));
    }

    #[test]
    fn header_only_grid_is_a_valid_empty_dataset() {
        let dataset = TabularDataset::from_values(grid(&[&["Name", "City"]])).unwrap();
        assert_eq!(dataset.row_count(), 0);
    }

    #[test]
    fn blank_header_cell_is_malformed() {
        let err = TabularDataset::from_values(grid(&[&["Name", "  "], &["a", "b"]])).unwrap_err();
        assert!(matches!(err, FetchError::MalformedHeader(_)));
    }

    #[test]
    fn duplicate_headers_are_malformed_case_insensitively() {
        let err =
            TabularDataset::from_values(grid(&[&["Name", "name"], &["a", "b"]])).unwrap_err();
        assert!(matches!(err, FetchError::MalformedHeader(_)));
    }

    #[test]
    fn summary_counts_non_empty_cells_per_column() {
        let dataset = TabularDataset::from_values(grid(&[
            &["Name", "City"],
            &["Widget", "NYC"],
            &["Gadget", ""],
            &["", "LA"],
        ]))
        .unwrap();

        let summary = dataset.summary();
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.columns[0].name, "Name");
        assert_eq!(summary.columns[0].non_empty, 2);
        assert_eq!(summary.columns[1].non_empty, 2);
        assert_eq!(summary.sample_rows.len(), 3);
    }

    #[test]
    fn summary_caps_sample_rows() {
        let mut values = grid(&[&["N"]]);
        for i in 0..10 {
            values.push(vec![i.to_string()]);
        }
        let dataset = TabularDataset::from_values(values).unwrap();
        assert_eq!(dataset.summary().sample_rows.len(), SUMMARY_SAMPLE_ROWS);
    }
}
