use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A configured URL could not be parsed.
    ///
    /// Raised while building the OAuth2 client from the Discord endpoint and redirect
    /// URLs.
    #[error("Invalid URL for {name}: {source}")]
    InvalidUrl {
        /// Name of the setting holding the URL
        name: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}
