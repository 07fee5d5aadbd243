//! Application state shared across all request handlers.
//!
//! The state includes:
//! - Database connection pool holding snapshots, schedules and sessions
//! - HTTP client and OAuth2 client for the Discord login flow
//! - Discord HTTP client for bot operations
//! - Application URL for redirects after login

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// Initialized once during startup and cloned for each request via Axum's state
/// extraction. Every field is cheap to clone: the database connection and reqwest
/// client share their pools and the Discord client sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for Discord OAuth2 requests.
    ///
    /// Configured without redirects.
    pub http_client: reqwest::Client,

    /// OAuth2 client for Discord authentication flow.
    pub oauth_client: OAuth2Client,

    /// Discord HTTP client shared with the bot and the scheduler.
    pub discord_http: Arc<Http>,

    /// Application base URL, the landing page after login and logout.
    pub app_url: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external API requests
    /// - `oauth_client` - OAuth2 client for Discord authentication
    /// - `discord_http` - Discord HTTP client for bot operations
    /// - `app_url` - Application base URL
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_http: Arc<Http>,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_http,
            app_url,
        }
    }
}
