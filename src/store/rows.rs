//! On-disk row shapes and their conversion to in-memory tables.
//!
//! Two table shapes exist: flat `key -> value` tables (products, loose items,
//! members), and `key -> list` tables (purchases) where the member code
//! repeats once per entry and rows accumulate in file order.

use super::Record;
use crate::core::{
    catalog::{PriceTable, ProductKind},
    ledger::{Member, PurchaseEntry},
    table::OrderedTable,
};
use serde::{Deserialize, Serialize};

/// `barcode,price`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    /// Scanned barcode
    pub barcode: String,
    /// Price text
    #[serde(default)]
    pub price: String,
}

impl Record for ProductRow {
    const HEADERS: &'static [&'static str] = &["barcode", "price"];
}

/// `description,price`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LooseItemRow {
    /// Free-text description
    pub description: String,
    /// Price text
    #[serde(default)]
    pub price: String,
}

impl Record for LooseItemRow {
    const HEADERS: &'static [&'static str] = &["description", "price"];
}

/// `member_code,name,image_path`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    /// Unique member code
    pub member_code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Photo path
    #[serde(default)]
    pub image_path: String,
}

impl Record for MemberRow {
    const HEADERS: &'static [&'static str] = &["member_code", "name", "image_path"];
}

/// `member_code,product,price`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRow {
    /// Member the purchase is charged to
    pub member_code: String,
    /// Barcode or loose item description
    #[serde(default)]
    pub product: String,
    /// Price text at purchase time
    #[serde(default)]
    pub price: String,
}

impl Record for PurchaseRow {
    const HEADERS: &'static [&'static str] = &["member_code", "product", "price"];
}

/// Builds the barcoded product table.
pub fn products_from_rows(rows: Vec<ProductRow>) -> PriceTable {
    PriceTable::from_rows(
        ProductKind::Barcoded,
        rows.into_iter().map(|r| (r.barcode, r.price)),
    )
}

/// Rows for the barcoded product table.
pub fn products_to_rows(table: &PriceTable) -> Vec<ProductRow> {
    table
        .iter()
        .map(|(barcode, price)| ProductRow {
            barcode: barcode.to_string(),
            price: price.to_string(),
        })
        .collect()
}

/// Builds the loose item table.
pub fn loose_items_from_rows(rows: Vec<LooseItemRow>) -> PriceTable {
    PriceTable::from_rows(
        ProductKind::Loose,
        rows.into_iter().map(|r| (r.description, r.price)),
    )
}

/// Rows for the loose item table.
pub fn loose_items_to_rows(table: &PriceTable) -> Vec<LooseItemRow> {
    table
        .iter()
        .map(|(description, price)| LooseItemRow {
            description: description.to_string(),
            price: price.to_string(),
        })
        .collect()
}

/// Builds the member directory.
pub fn members_from_rows(rows: Vec<MemberRow>) -> OrderedTable<Member> {
    rows.into_iter()
        .map(|r| {
            (
                r.member_code,
                Member {
                    name: r.name,
                    image_path: r.image_path,
                },
            )
        })
        .collect()
}

/// Rows for the member directory.
pub fn members_to_rows<'a, I>(members: I) -> Vec<MemberRow>
where
    I: IntoIterator<Item = (&'a str, &'a Member)>,
{
    members
        .into_iter()
        .map(|(code, member)| MemberRow {
            member_code: code.to_string(),
            name: member.name.clone(),
            image_path: member.image_path.clone(),
        })
        .collect()
}

/// Groups purchase rows by member code, keeping file order within and
/// across members.
pub fn purchases_from_rows(rows: Vec<PurchaseRow>) -> OrderedTable<Vec<PurchaseEntry>> {
    let mut purchases: OrderedTable<Vec<PurchaseEntry>> = OrderedTable::new();
    for row in rows {
        purchases
            .get_or_insert_default(&row.member_code)
            .push(PurchaseEntry::new(row.product, row.price));
    }
    purchases
}

/// Flattens purchase lists into one row per entry.
pub fn purchases_to_rows<'a, I>(purchases: I) -> Vec<PurchaseRow>
where
    I: IntoIterator<Item = (&'a str, &'a Vec<PurchaseEntry>)>,
{
    purchases
        .into_iter()
        .flat_map(|(code, entries)| {
            entries.iter().map(move |entry| PurchaseRow {
                member_code: code.to_string(),
                product: entry.item.clone(),
                price: entry.price.clone(),
            })
        })
        .collect()
}
