//! Member ledger - the member directory and per-member purchase lists.
//!
//! Purchase entries copy the price at the moment of purchase, so later
//! catalog edits never change what a member already owes. Totals are summed
//! from whatever parses as a number; anything else counts as zero.

use crate::{
    core::{snapshot::Snapshot, table::OrderedTable},
    errors::{Error, Result},
};
use tracing::{debug, info};

/// A registered member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Display name
    pub name: String,
    /// Path to the member photo
    pub image_path: String,
}

/// One `(item, price)` pair recorded against a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseEntry {
    /// Barcode or loose item description
    pub item: String,
    /// Price text copied at purchase time
    pub price: String,
}

impl PurchaseEntry {
    /// Creates an entry.
    pub fn new(item: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            price: price.into(),
        }
    }
}

/// Parses a price for summing. Non-numeric and non-finite text yields `None`.
#[must_use]
pub fn parse_price(price: &str) -> Option<f64> {
    price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Sum of the parsable prices in `entries`.
#[must_use]
pub fn sum_prices<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a PurchaseEntry>,
{
    entries
        .into_iter()
        .filter_map(|entry| parse_price(&entry.price))
        .sum()
}

/// Member directory plus purchase lists.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    members: OrderedTable<Member>,
    purchases: OrderedTable<Vec<PurchaseEntry>>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: OrderedTable::new(),
            purchases: OrderedTable::new(),
        }
    }

    /// Builds a ledger from loaded tables.
    ///
    /// Purchase rows whose member code is not registered are kept as-is; the
    /// directory and the purchase lists are not cross-checked on load.
    #[must_use]
    pub const fn from_tables(
        members: OrderedTable<Member>,
        purchases: OrderedTable<Vec<PurchaseEntry>>,
    ) -> Self {
        Self { members, purchases }
    }

    /// Registers a new member.
    ///
    /// An empty `image_path` is replaced with `default_image_path`. The
    /// member starts without a purchase list; one is opened by the first
    /// session.
    ///
    /// # Errors
    /// Returns [`Error::MemberAlreadyExists`] if `code` is already
    /// registered. The existing member is not touched.
    pub fn register(
        &mut self,
        code: &str,
        name: &str,
        image_path: &str,
        default_image_path: &str,
    ) -> Result<&Member> {
        if self.members.contains_key(code) {
            return Err(Error::MemberAlreadyExists {
                code: code.to_string(),
            });
        }

        let image_path = if image_path.trim().is_empty() {
            default_image_path
        } else {
            image_path.trim()
        };
        info!(code, name, "Registering member");
        self.members.insert(
            code,
            Member {
                name: name.to_string(),
                image_path: image_path.to_string(),
            },
        );
        self.find(code).ok_or_else(|| Error::MemberNotFound {
            code: code.to_string(),
        })
    }

    /// Looks up a member by code.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Member> {
        self.members.get(code)
    }

    /// Number of registered members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Purchases recorded for `code`, empty if none.
    #[must_use]
    pub fn entries(&self, code: &str) -> &[PurchaseEntry] {
        self.purchases
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ordered snapshot of a member's purchases.
    #[must_use]
    pub fn list(&self, code: &str) -> Snapshot<PurchaseEntry> {
        Snapshot::new(self.entries(code).to_vec())
    }

    /// Makes sure `code` has a (possibly empty) purchase list.
    pub fn open_account(&mut self, code: &str) {
        self.purchases.get_or_insert_default(code);
    }

    /// Appends a purchase at the tail of the member's list.
    pub fn append_entry(&mut self, code: &str, item: &str, price: &str) -> &PurchaseEntry {
        debug!(code, item, price, "Appending purchase");
        let list = self.purchases.get_or_insert_default(code);
        list.push(PurchaseEntry::new(item, price));
        &list[list.len() - 1]
    }

    /// Removes the purchase at 1-based `position`. Returns the removed entry.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `position` is 0, past the end of
    /// the list, or `code` has no purchase list at all.
    pub fn remove_entry_at(&mut self, code: &str, position: usize) -> Result<PurchaseEntry> {
        let list = self.purchases.get_mut(code);
        let len = list.as_ref().map_or(0, |l| l.len());
        match (list, position.checked_sub(1)) {
            (Some(list), Some(idx)) if idx < len => {
                let removed = list.remove(idx);
                debug!(code, position, item = %removed.item, "Removed purchase");
                Ok(removed)
            }
            _ => Err(Error::IndexOutOfRange {
                index: position,
                len,
            }),
        }
    }

    /// Empties the member's purchase list.
    pub fn clear(&mut self, code: &str) {
        info!(code, "Clearing purchases");
        *self.purchases.get_or_insert_default(code) = Vec::new();
    }

    /// Sum of the member's parsable purchase prices.
    #[must_use]
    pub fn total(&self, code: &str) -> f64 {
        sum_prices(self.entries(code))
    }

    /// Members in registration order, for persistence.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter()
    }

    /// Purchase lists in first-use order, for persistence.
    pub fn purchases(&self) -> impl Iterator<Item = (&str, &Vec<PurchaseEntry>)> {
        self.purchases.iter()
    }
}
