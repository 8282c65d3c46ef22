//! Unified error type for `TallyBuddy`.
//!
//! Lookups, numeric parsing and registration conflicts surface as dedicated
//! variants so the console layer can turn them into a one-line message and
//! return to the enclosing menu. File and CSV failures are wrapped and bubble
//! up to `main`.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable explanation
        message: String,
    },

    /// No product (barcoded or not) is stored under this key
    #[error("Product not found: {key}")]
    ProductNotFound {
        /// Barcode or description that was looked up
        key: String,
    },

    /// A product with this key is already in the catalog
    #[error("Product already exists: {key}")]
    ProductAlreadyExists {
        /// Barcode or description that collided
        key: String,
    },

    /// No member is registered under this code
    #[error("Member not found: {code}")]
    MemberNotFound {
        /// Member code that was looked up
        code: String,
    },

    /// A member with this code is already registered
    #[error("Member already exists: {code}")]
    MemberAlreadyExists {
        /// Member code that collided
        code: String,
    },

    /// Input was expected to be a whole number
    #[error("Invalid input '{input}': a number is required")]
    InvalidNumber {
        /// The raw text that failed to parse
        input: String,
    },

    /// A 1-based position fell outside the listing it refers to
    #[error("Invalid index {index}: expected a value between 1 and {len}")]
    IndexOutOfRange {
        /// The position entered by the user
        index: usize,
        /// Length of the listing the position was checked against
        len: usize,
    },

    /// The member photo could not be decoded
    #[error("Unable to load image {path}: {message}")]
    Image {
        /// Path that was opened
        path: String,
        /// Decoder message
        message: String,
    },

    /// The configured exit action failed to run
    #[error("Exit action failed: {message}")]
    ExitAction {
        /// Human readable explanation
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error belongs to the user-facing taxonomy: the operation is
    /// aborted with a message and the menu carries on.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. }
                | Self::ProductAlreadyExists { .. }
                | Self::MemberNotFound { .. }
                | Self::MemberAlreadyExists { .. }
                | Self::InvalidNumber { .. }
                | Self::IndexOutOfRange { .. }
                | Self::Image { .. }
        )
    }
}
