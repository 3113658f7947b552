// This is the entry point of the sheet search bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (external APIs)
// - `telegram/` = Telegram-specific adapter (Bot API client, update loop)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Prefetch the dataset
// 4. Start the long-polling loop

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a handful of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "telegram/telegram_layer.rs"]
mod telegram;

use std::sync::Arc;

use crate::core::dataset::DatasetCache;
use crate::core::router::CommandRouter;
use crate::infra::google_sheets::{GoogleSheetsClient, ServiceAccountAuth};
use crate::telegram::client::{TelegramClient, TelegramConfig};

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").expect(
        "Missing TELEGRAM_BOT_TOKEN environment variable! Create a .env file with the token from @BotFather.",
    );
    let sheet_id = std::env::var("GOOGLE_SHEET_ID").expect(
        "Missing GOOGLE_SHEET_ID environment variable! Use the id (or full URL) of your sheet.",
    );
    let range = std::env::var("SHEET_RANGE")
        .unwrap_or_else(|_| GoogleSheetsClient::DEFAULT_RANGE.to_string());
    let poll_timeout = std::env::var("TELEGRAM_POLL_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(30);

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let auth = ServiceAccountAuth::from_env()
        .await
        .expect("Failed to load Google service account credentials");
    let sheets = GoogleSheetsClient::new(auth, &sheet_id, range)
        .expect("Failed to create Google Sheets client");

    let cache = Arc::new(DatasetCache::new());

    // Prefetch so the first /summary or search already has data. A failure
    // here is not fatal; the user can /refresh once the sheet is reachable.
    match cache.refresh(&sheets).await {
        Ok(outcome) => {
            tracing::info!(
                rows = outcome.row_count,
                columns = outcome.column_count,
                "prefetched sheet data"
            );
        }
        Err(err) => {
            tracing::warn!("initial sheet fetch failed, starting with an empty dataset: {err}");
        }
    }

    let router = CommandRouter::new(Arc::clone(&cache), sheets);

    let config = TelegramConfig::new(bot_token).with_polling_timeout(poll_timeout);
    let telegram = TelegramClient::new(config);

    let me = telegram
        .get_me()
        .await
        .expect("Failed to reach the Telegram Bot API. Check TELEGRAM_BOT_TOKEN.");
    tracing::info!(username = ?me.username, id = me.id, "bot is connected");

    if let Err(err) = crate::telegram::update_loop::run(&telegram, &router).await {
        tracing::error!("update loop terminated: {err}");
    }
}
