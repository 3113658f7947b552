// Maps inbound chat text to the summary/search/refresh operations and
// renders every outcome, including failures, as a reply string. No
// Telegram types in here; the transport layer hands us text and sends
// back whatever we return.

use std::sync::Arc;

use crate::core::dataset::{DatasetCache, SheetSource};
use crate::core::format;
use crate::core::search::{self, SearchError, MAX_MATCH_ROWS};

/// One inbound message, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Summary,
    Search(String),
    Refresh,
    FreeText(String),
}

impl Command {
    /// Classify a message. Known `/commands` (optionally suffixed with
    /// `@botname`, which Telegram appends in group chats) are parsed;
    /// anything else, unknown slash commands included, is treated as a
    /// free-text search query.
    pub fn parse(text: &str) -> Command {
        let trimmed = text.trim();
        if let Some(rest) = trimmed.strip_prefix('/') {
            let (name, args) = match rest.split_once(char::is_whitespace) {
                Some((name, args)) => (name, args.trim()),
                None => (rest, ""),
            };
            let name = name.split('@').next().unwrap_or(name);
            match name {
                "start" => return Command::Start,
                "help" => return Command::Help,
                "summary" => return Command::Summary,
                "search" => return Command::Search(args.to_string()),
                "refresh" => return Command::Refresh,
                _ => {}
            }
        }
        Command::FreeText(trimmed.to_string())
    }
}

const NO_DATA_TEXT: &str =
    "No data loaded yet. Send /refresh to fetch the sheet, then try again.";

const INVALID_QUERY_TEXT: &str =
    "Please provide a search query. Example: /search products";

fn start_text() -> String {
    "Welcome to the sheet search bot!\n\n\
     I look up answers in a Google Sheets spreadsheet.\n\n\
     Commands:\n\
     /start - Show this welcome message\n\
     /help - Show help information\n\
     /summary - Overview of the loaded data\n\
     /search <query> - Search for specific data\n\
     /refresh - Reload data from Google Sheets\n\n\
     You can also just send me a few keywords and I'll find the matching rows."
        .to_string()
}

fn help_text() -> String {
    format!(
        "Help guide\n\n\
         Commands:\n\
         /summary - Row and column counts plus a few sample rows\n\
         /search <query> - Search every column for your keywords\n\
         /refresh - Reload data from Google Sheets\n\n\
         Tips:\n\
         - Search is case-insensitive\n\
         - A row is returned when any keyword matches any of its columns\n\
         - At most {} rows are shown; narrow the query if the list is cut off",
        MAX_MATCH_ROWS
    )
}

/// Handles one message at a time against the shared dataset cache.
/// Generic over the sheet source so tests can inject stubs.
pub struct CommandRouter<S: SheetSource> {
    cache: Arc<DatasetCache>,
    source: S,
}

impl<S: SheetSource> CommandRouter<S> {
    pub fn new(cache: Arc<DatasetCache>, source: S) -> Self {
        Self { cache, source }
    }

    /// Handle one inbound message and produce the reply text.
    ///
    /// Every core error is converted to a user-visible message here; none
    /// propagate to the transport loop.
    pub async fn handle(&self, text: &str) -> String {
        match Command::parse(text) {
            Command::Start => start_text(),
            Command::Help => help_text(),
            Command::Summary => self.handle_summary().await,
            Command::Search(query) => self.handle_search(&query).await,
            Command::FreeText(query) => self.handle_search(&query).await,
            Command::Refresh => self.handle_refresh().await,
        }
    }

    async fn handle_summary(&self) -> String {
        let dataset = self.cache.snapshot().await;
        if dataset.headers().is_empty() {
            return NO_DATA_TEXT.to_string();
        }
        format::format_summary(&dataset.summary())
    }

    async fn handle_search(&self, query: &str) -> String {
        let dataset = self.cache.snapshot().await;
        match search::matches(query, &dataset) {
            Ok(result) if result.rows.is_empty() => {
                if dataset.row_count() == 0 {
                    NO_DATA_TEXT.to_string()
                } else {
                    format!("No results found for '{}'.", query.trim())
                }
            }
            Ok(result) => format::format_rows(
                &result.rows,
                dataset.headers(),
                result.truncated,
                result.total_matches,
            ),
            Err(SearchError::InvalidQuery) => INVALID_QUERY_TEXT.to_string(),
        }
    }

    async fn handle_refresh(&self) -> String {
        match self.cache.refresh(&self.source).await {
            Ok(outcome) => {
                tracing::info!(
                    rows = outcome.row_count,
                    columns = outcome.column_count,
                    "dataset refreshed"
                );
                format!(
                    "Data refreshed! Retrieved {} records across {} columns.",
                    outcome.row_count, outcome.column_count
                )
            }
            Err(err) => {
                tracing::warn!("refresh failed: {err}");
                format!(
                    "Could not refresh the sheet: {}. The previously loaded data is still available.",
                    err
                )
            }
        }
    }
}
