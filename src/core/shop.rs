//! The in-memory state of the till: catalog plus ledger.
//!
//! All four tables are loaded once at start-up and flushed back only on an
//! explicit exit. Anything not flushed is lost if the process dies.

use crate::{
    config::DataFiles,
    core::{catalog::Catalog, ledger::Ledger},
    errors::Result,
    store::{self, rows},
};
use tracing::info;

/// Catalog and ledger held for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    /// Barcoded and loose product prices
    pub catalog: Catalog,
    /// Members and their purchases
    pub ledger: Ledger,
}

impl Shop {
    /// Loads all four tables. Missing files load as empty tables.
    pub fn load(files: &DataFiles) -> Result<Self> {
        let catalog = Catalog {
            barcoded: rows::products_from_rows(store::load_rows(&files.products)?),
            loose: rows::loose_items_from_rows(store::load_rows(&files.loose_items)?),
        };
        let ledger = Ledger::from_tables(
            rows::members_from_rows(store::load_rows(&files.members)?),
            rows::purchases_from_rows(store::load_rows(&files.purchases)?),
        );

        info!(
            products = catalog.barcoded.len(),
            loose_items = catalog.loose.len(),
            members = ledger.member_count(),
            "Tables loaded"
        );
        Ok(Self { catalog, ledger })
    }

    /// Rewrites all four tables.
    pub fn flush(&self, files: &DataFiles) -> Result<()> {
        let products = store::save_rows(
            &files.products,
            rows::products_to_rows(&self.catalog.barcoded),
        )?;
        let loose_items = store::save_rows(
            &files.loose_items,
            rows::loose_items_to_rows(&self.catalog.loose),
        )?;
        let members = store::save_rows(
            &files.members,
            rows::members_to_rows(self.ledger.members()),
        )?;
        let purchases = store::save_rows(
            &files.purchases,
            rows::purchases_to_rows(self.ledger.purchases()),
        )?;

        info!(products, loose_items, members, purchases, "Tables saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{data_files_in, sample_shop};
    use tempfile::tempdir;

    #[test]
    fn test_load_from_empty_directory() {
        let dir = tempdir().unwrap();
        let shop = Shop::load(&data_files_in(dir.path())).unwrap();
        assert!(shop.catalog.barcoded.is_empty());
        assert!(shop.catalog.loose.is_empty());
        assert_eq!(shop.ledger.member_count(), 0);
    }

    #[test]
    fn test_flush_then_load_reproduces_state() {
        let dir = tempdir().unwrap();
        let files = data_files_in(dir.path());
        let mut shop = sample_shop();
        shop.ledger.append_entry("M1", "0001", "9.50");
        shop.ledger.append_entry("M1", "Caffè", "1.00");

        shop.flush(&files).unwrap();
        let reloaded = Shop::load(&files).unwrap();

        assert_eq!(
            reloaded.catalog.barcoded.iter().collect::<Vec<_>>(),
            shop.catalog.barcoded.iter().collect::<Vec<_>>()
        );
        assert_eq!(
            reloaded.catalog.loose.iter().collect::<Vec<_>>(),
            shop.catalog.loose.iter().collect::<Vec<_>>()
        );
        assert_eq!(reloaded.ledger.find("M1"), shop.ledger.find("M1"));
        assert_eq!(reloaded.ledger.entries("M1"), shop.ledger.entries("M1"));
        assert_eq!(reloaded.ledger.total("M1"), 10.5);
    }

    #[test]
    fn test_load_tolerates_short_member_row() {
        let dir = tempdir().unwrap();
        let files = data_files_in(dir.path());
        std::fs::write(&files.members, "member_code,name,image_path\nM1,Anna\n").unwrap();

        let shop = Shop::load(&files).unwrap();
        let member = shop.ledger.find("M1").unwrap();
        assert_eq!(member.name, "Anna");
        assert_eq!(member.image_path, "");
    }

    #[test]
    fn test_flush_empty_shop_writes_headers() {
        let dir = tempdir().unwrap();
        let files = data_files_in(dir.path());
        Shop::default().flush(&files).unwrap();

        assert_eq!(
            std::fs::read_to_string(&files.purchases).unwrap(),
            "member_code,product,price\n"
        );
        let reloaded = Shop::load(&files).unwrap();
        assert!(reloaded.catalog.barcoded.is_empty());
        assert_eq!(reloaded.ledger.member_count(), 0);
    }
}
