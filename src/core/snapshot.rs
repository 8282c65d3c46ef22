//! Printed listings and the 1-based positions users pick from them.
//!
//! A [`Snapshot`] is taken right before a numbered listing is printed. The
//! position typed back by the user is validated against that same snapshot,
//! never against the live table, so a position can only ever name the row
//! the user actually saw.

use crate::errors::{Error, Result};

/// Parses a 1-based position typed by the user.
///
/// Only non-negative whole numbers are accepted; the range check happens
/// against a snapshot in [`Snapshot::get`].
pub fn parse_position(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    trimmed.parse::<usize>().map_err(|_| Error::InvalidNumber {
        input: trimmed.to_string(),
    })
}

/// An immutable, ordered copy of a listing as it was shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    items: Vec<T>,
}

impl<T> Snapshot<T> {
    /// Wraps an ordered list of rows.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of rows in the listing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the listing is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows paired with their 1-based display position.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate().map(|(i, item)| (i + 1, item))
    }

    /// Returns the row shown at 1-based `position`.
    pub fn get(&self, position: usize) -> Result<&T> {
        position
            .checked_sub(1)
            .and_then(|idx| self.items.get(idx))
            .ok_or(Error::IndexOutOfRange {
                index: position,
                len: self.items.len(),
            })
    }
}
