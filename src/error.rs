//! Error types for buywizard

use std::fmt;

/// Unified error type for buywizard operations
#[derive(Debug)]
pub enum BuywizardError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON response
    Parse(serde_json::Error),
    /// HTTP error status code without a parseable error body
    HttpStatus(reqwest::StatusCode),
    /// Cardmarket returned an error response
    ApiResponse { code: String, details: String },
    /// File I/O error
    Io(std::io::Error),
    /// Configuration missing or invalid
    Config(String),
    /// Card list file produced no card names
    EmptyCardList(String),
    /// No catalog product matched a requested card name
    NoProductMatch(String),
    /// Batch fetch made no progress within the allowed retry rounds
    FetchStalled { resolved: usize, requested: usize },
    /// Item count exceeds the largest known shipping tier
    ShippingTierExceeded(usize),
    /// Seller assignment does not fit the price matrix
    InvalidAssignment(String),
}

impl fmt::Display for BuywizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuywizardError::Network(e) => write!(f, "Network error: {}", e),
            BuywizardError::Parse(e) => write!(f, "Parse error: {}", e),
            BuywizardError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            BuywizardError::ApiResponse { code, details } => write!(f, "{}: {}", code, details),
            BuywizardError::Io(e) => write!(f, "I/O error: {}", e),
            BuywizardError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BuywizardError::EmptyCardList(path) => {
                write!(f, "No card names found in: {}", path)
            }
            BuywizardError::NoProductMatch(name) => {
                write!(f, "No product match for card: {}", name)
            }
            BuywizardError::FetchStalled {
                resolved,
                requested,
            } => write!(
                f,
                "Batch fetch stalled: resolved {}/{} items",
                resolved, requested
            ),
            BuywizardError::ShippingTierExceeded(count) => {
                write!(f, "No shipping tier for {} items (max 40 per seller)", count)
            }
            BuywizardError::InvalidAssignment(msg) => {
                write!(f, "Invalid seller assignment: {}", msg)
            }
        }
    }
}

impl std::error::Error for BuywizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuywizardError::Network(e) => Some(e),
            BuywizardError::Parse(e) => Some(e),
            BuywizardError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BuywizardError {
    fn from(err: reqwest::Error) -> Self {
        BuywizardError::Network(err)
    }
}

impl From<serde_json::Error> for BuywizardError {
    fn from(err: serde_json::Error) -> Self {
        BuywizardError::Parse(err)
    }
}

impl From<std::io::Error> for BuywizardError {
    fn from(err: std::io::Error) -> Self {
        BuywizardError::Io(err)
    }
}

/// Result alias for buywizard operations
pub type Result<T> = std::result::Result<T, BuywizardError>;
