// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the Salsa client
//!
//! Expected failures (bad configuration, unreachable server, malformed
//! responses, server-reported errors) are all recoverable: the connector
//! records them as user-facing messages and returns `None` from the
//! failing call instead of bubbling a panic up to the form handler.

use thiserror::Error;

/// Result type alias for Salsa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when host or credentials are missing.
pub const MSG_NOT_CONFIGURED: &str = "This page is not configured correctly.";

/// Message shown when the transport returned nothing.
pub const MSG_UNABLE_TO_CONNECT: &str = "We were unable to connect to the server.";

/// Message shown when the response body would not parse.
pub const MSG_INVALID_RESULTS: &str = "We got invalid results from the server.";

/// Message shown when the login handshake is rejected.
pub const MSG_AUTH_FAILED: &str = "We were unable to authenticate with the server.";

/// Main error type for the Salsa client
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or failed transport response (includes timeouts)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Response body was present but not parseable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered with an error marker
    #[error("Server reported an error: {0}")]
    Remote(String),

    /// A record failed boundary validation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Error::Connection(msg.into())
    }

    /// Create an invalid-response error
    pub fn invalid_response<S: Into<String>>(msg: S) -> Self {
        Error::InvalidResponse(msg.into())
    }

    /// Create a remote error from a server error marker
    pub fn remote<S: Into<String>>(msg: S) -> Self {
        Error::Remote(msg.into())
    }

    /// Create a record validation error
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        Error::InvalidRecord(msg.into())
    }

    /// Check if this is a connection-level failure
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Http(_))
    }

    /// Check if this error was reported by the server itself
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote(_))
    }

    /// The message recorded into the connector's error list.
    ///
    /// Transport and parse details stay in the log; end users only ever see
    /// these fixed strings, except for server-reported markers which pass
    /// through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Error::Config(_) | Error::Url(_) => MSG_NOT_CONFIGURED.to_string(),
            Error::Connection(_) | Error::Http(_) => MSG_UNABLE_TO_CONNECT.to_string(),
            Error::InvalidResponse(_) | Error::Json(_) => MSG_INVALID_RESULTS.to_string(),
            Error::Remote(msg) => msg.clone(),
            Error::InvalidRecord(msg) => msg.clone(),
        }
    }
}
