// src/error.rs

//! Unified error handling for the list scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Target URL is not a recognized list structure
    #[error("{url} is not a valid list URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Page selection string could not be decoded
    #[error("Invalid page selection '{spec}': {reason}")]
    InvalidPageSpec { spec: String, reason: String },

    /// Output name is unusable or collides with another job
    #[error("Output name error: {0}")]
    OutputName(String),

    /// Transport answered with a non-success status
    #[error("Could not load page {url} (status {status})")]
    PageLoad { url: String, status: u16 },

    /// A required field could not be extracted from an item
    #[error("Extraction failed for {context}: {message}")]
    Extraction { context: String, message: String },

    /// Nothing usable was given on the command line
    #[error("Usage error: {0}")]
    Usage(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid page selection error.
    pub fn invalid_pages(spec: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidPageSpec {
            spec: spec.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an output name error.
    pub fn output_name(message: impl Into<String>) -> Self {
        Self::OutputName(message.into())
    }

    /// Create a page load error.
    pub fn page_load(url: impl Into<String>, status: u16) -> Self {
        Self::PageLoad {
            url: url.into(),
            status,
        }
    }

    /// Create an extraction error with context.
    pub fn extraction(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extraction {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
