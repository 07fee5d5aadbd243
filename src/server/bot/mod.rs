//! Discord bot integration.
//!
//! The bot serves the `/backup` slash command and its buttons. It is initialized during
//! startup and runs in a separate tokio task so it doesn't block the HTTP server. Its
//! HTTP client is shared with the backup scheduler and the API.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is required. Guild state for backups is read through the REST API, and
//! interactions arrive without any intent.

pub mod command;
pub mod handler;
pub mod start;
