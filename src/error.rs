// Startup error type
// Everything that can stop the server before it starts accepting traffic

use hyper::Method;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("route already registered: {method} {path}")]
    DuplicateRoute { method: Method, path: String },

    #[error("invalid route path '{0}': must start with '/'")]
    InvalidPath(String),

    #[error("failed to initialise logger: {0}")]
    Logger(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
