// Telegram layer - Bot API client and the inbound update loop.

#[path = "telegram_client.rs"]
pub mod client;

#[path = "update_loop.rs"]
pub mod update_loop;
