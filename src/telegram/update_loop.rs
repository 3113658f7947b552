//! The inbound message loop: long-poll Telegram, route each text message
//! through the command router, send the reply back to the originating chat.
//!
//! Each message is handled to completion before the next one; transport
//! errors are logged and retried with a short backoff, never fatal.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::core::dataset::SheetSource;
use crate::core::router::CommandRouter;

use super::client::{TelegramClient, TelegramUpdate};

const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Pull the routable text out of an update.
///
/// Returns the chat id and message text, or `None` for updates we ignore:
/// edits/joins without a message payload, non-text messages, and messages
/// sent by bots (our own echoes included).
fn extract_query(update: TelegramUpdate) -> Option<(i64, String)> {
    let message = update.message?;
    if message.from.as_ref().is_some_and(|user| user.is_bot) {
        return None;
    }
    let text = message.text?;
    Some((message.chat.id, text))
}

/// Run the polling loop until the process is stopped.
pub async fn run<S: SheetSource>(
    client: &TelegramClient,
    router: &CommandRouter<S>,
) -> Result<()> {
    let mut last_update_id: i64 = 0;
    info!("starting Telegram long-polling loop");

    loop {
        let offset = if last_update_id > 0 {
            last_update_id + 1
        } else {
            0
        };

        match client.get_updates(offset).await {
            Ok(updates) => {
                for update in updates {
                    last_update_id = last_update_id.max(update.update_id);

                    let Some((chat_id, text)) = extract_query(update) else {
                        continue;
                    };
                    debug!(chat_id, "inbound message: {}", text);

                    let reply = router.handle(&text).await;
                    if let Err(err) = client.send_message(chat_id, &reply).await {
                        warn!(chat_id, "failed to send reply: {}", err);
                    }
                }
            }
            Err(err) => {
                error!("Telegram polling error: {}", err);
                tokio::time::sleep(POLL_ERROR_BACKOFF).await;
            }
        }
    }
}
