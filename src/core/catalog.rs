//! Catalog business logic - barcoded and non-barcoded price tables.
//!
//! The catalog is two independent tables: barcoded products keyed by
//! barcode, and loose items (sold without a barcode) keyed by their
//! description. Prices are kept as the raw text the operator typed; nothing
//! here parses them.

use crate::{
    core::{snapshot::Snapshot, table::OrderedTable},
    errors::{Error, Result},
};
use tracing::debug;

/// Which side of the catalog a table holds. Used for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Products identified by a scanned barcode
    Barcoded,
    /// Items identified by a free-text description
    Loose,
}

impl ProductKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Barcoded => "barcoded product",
            Self::Loose => "loose item",
        }
    }
}

/// A `(key, price)` row as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceEntry {
    /// Barcode or description
    pub key: String,
    /// Price text
    pub price: String,
}

/// One key -> price table.
#[derive(Debug, Clone)]
pub struct PriceTable {
    kind: ProductKind,
    prices: OrderedTable<String>,
}

impl PriceTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new(kind: ProductKind) -> Self {
        Self {
            kind,
            prices: OrderedTable::new(),
        }
    }

    /// Builds a table from rows in file order.
    pub fn from_rows<I>(kind: ProductKind, rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            kind,
            prices: rows.into_iter().collect(),
        }
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the table has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price stored under `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.prices.get(key).map(String::as_str)
    }

    /// Inserts or overwrites unconditionally. Returns the previous price.
    pub fn set_price(&mut self, key: &str, price: &str) -> Option<String> {
        debug!(kind = self.kind.label(), key, price, "Setting price");
        self.prices.insert(key, price.to_string())
    }

    /// Adds a new product, refusing to overwrite an existing one.
    ///
    /// Use [`PriceTable::update_price`] to change a price that is already
    /// stored.
    ///
    /// # Errors
    /// Returns [`Error::ProductAlreadyExists`] if `key` is already present.
    /// The table is left unchanged.
    pub fn add(&mut self, key: &str, price: &str) -> Result<()> {
        if self.prices.contains_key(key) {
            return Err(Error::ProductAlreadyExists {
                key: key.to_string(),
            });
        }
        self.set_price(key, price);
        Ok(())
    }

    /// Changes the price of an existing product. Returns the old price.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] if `key` is not in the table.
    pub fn update_price(&mut self, key: &str, price: &str) -> Result<String> {
        let slot = self
            .prices
            .get_mut(key)
            .ok_or_else(|| Error::ProductNotFound {
                key: key.to_string(),
            })?;
        debug!(kind = self.kind.label(), key, price, "Updating price");
        Ok(std::mem::replace(slot, price.to_string()))
    }

    /// Removes a product by key. Returns its price.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] if `key` is not in the table.
    pub fn remove(&mut self, key: &str) -> Result<String> {
        let price = self.prices.remove(key).ok_or_else(|| Error::ProductNotFound {
            key: key.to_string(),
        })?;
        debug!(kind = self.kind.label(), key, "Removed product");
        Ok(price)
    }

    /// Ordered snapshot of the current listing.
    #[must_use]
    pub fn list(&self) -> Snapshot<PriceEntry> {
        Snapshot::new(
            self.prices
                .iter()
                .map(|(key, price)| PriceEntry {
                    key: key.to_string(),
                    price: price.clone(),
                })
                .collect(),
        )
    }

    /// Removes the product shown at 1-based `position` in `snapshot`.
    ///
    /// The position is checked against the snapshot, and the row is then
    /// removed from the live table by key. If that key has vanished since the
    /// snapshot was taken, nothing is removed.
    ///
    /// # Errors
    /// - [`Error::IndexOutOfRange`] if `position` is 0 or past the end of
    ///   the snapshot
    /// - [`Error::ProductNotFound`] if the listed key is no longer stored
    pub fn remove_at(
        &mut self,
        snapshot: &Snapshot<PriceEntry>,
        position: usize,
    ) -> Result<PriceEntry> {
        let entry = snapshot.get(position)?.clone();
        self.remove(&entry.key)?;
        Ok(entry)
    }

    /// Rows in insertion order, for persistence.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prices.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// Barcoded products plus loose items.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// barcode -> price
    pub barcoded: PriceTable,
    /// description -> price
    pub loose: PriceTable,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            barcoded: PriceTable::new(ProductKind::Barcoded),
            loose: PriceTable::new(ProductKind::Loose),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_catalog;

    #[test]
    fn test_set_price_inserts_then_overwrites() {
        let mut table = PriceTable::new(ProductKind::Barcoded);
        assert_eq!(table.set_price("0001", "9.50"), None);
        assert_eq!(table.lookup("0001"), Some("9.50"));

        assert_eq!(table.set_price("0001", "10.00"), Some("9.50".to_string()));
        assert_eq!(table.lookup("0001"), Some("10.00"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_add_rejects_existing_key() {
        let mut catalog = sample_catalog();
        let result = catalog.barcoded.add("0001", "1.00");
        assert!(matches!(
            result,
            Err(Error::ProductAlreadyExists { key }) if key == "0001"
        ));
        assert_eq!(catalog.barcoded.lookup("0001"), Some("9.50"));
    }

    #[test]
    fn test_update_price_requires_existing_key() {
        let mut catalog = sample_catalog();
        let old = catalog.barcoded.update_price("0001", "8.00").unwrap();
        assert_eq!(old, "9.50");
        assert_eq!(catalog.barcoded.lookup("0001"), Some("8.00"));

        let result = catalog.barcoded.update_price("9999", "1.00");
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));
        assert_eq!(catalog.barcoded.lookup("9999"), None);
    }

    #[test]
    fn test_remove_missing_reports_not_found() {
        let mut catalog = sample_catalog();
        assert!(matches!(
            catalog.barcoded.remove("nope"),
            Err(Error::ProductNotFound { key }) if key == "nope"
        ));
        assert_eq!(catalog.barcoded.remove("0002").unwrap(), "1.20");
        assert_eq!(catalog.barcoded.lookup("0002"), None);
    }

    #[test]
    fn test_list_follows_insertion_order() {
        let catalog = sample_catalog();
        let listing = catalog.loose.list();
        let keys: Vec<&str> = listing.numbered().map(|(_, e)| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Caffè", "Panino", "Acqua"]);
    }

    #[test]
    fn test_remove_at_removes_exactly_the_listed_item() {
        let mut catalog = sample_catalog();
        let snapshot = catalog.loose.list();

        let removed = catalog.loose.remove_at(&snapshot, 2).unwrap();
        assert_eq!(removed.key, "Panino");

        let remaining: Vec<String> = catalog
            .loose
            .list()
            .numbered()
            .map(|(_, e)| e.key.clone())
            .collect();
        assert_eq!(remaining, vec!["Caffè".to_string(), "Acqua".to_string()]);
    }

    #[test]
    fn test_remove_at_out_of_range_leaves_table_untouched() {
        let mut catalog = sample_catalog();
        let snapshot = catalog.loose.list();

        assert!(matches!(
            catalog.loose.remove_at(&snapshot, 4),
            Err(Error::IndexOutOfRange { index: 4, len: 3 })
        ));
        assert!(matches!(
            catalog.loose.remove_at(&snapshot, 0),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert_eq!(catalog.loose.len(), 3);
    }

    #[test]
    fn test_remove_at_uses_snapshot_not_live_order() {
        let mut catalog = sample_catalog();
        let snapshot = catalog.loose.list();

        // Position 1 in the live table shifts once "Caffè" is gone.
        catalog.loose.remove("Caffè").unwrap();
        let removed = catalog.loose.remove_at(&snapshot, 2).unwrap();
        assert_eq!(removed.key, "Panino");
        assert_eq!(catalog.loose.lookup("Acqua"), Some("0.50"));

        // The snapshot still names "Caffè" at position 1, which is gone now.
        assert!(matches!(
            catalog.loose.remove_at(&snapshot, 1),
            Err(Error::ProductNotFound { .. })
        ));
    }
}
