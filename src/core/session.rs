//! Member purchase session - the one stateful workflow of the till.
//!
//! A session moves through three states, encoded as types:
//!
//! - identification: [`identify`] looks the member code up and yields either
//!   an [`ActiveSession`] or a [`PendingRegistration`] for an unknown code;
//! - active: the [`ActiveSession`] records scans and manual selections
//!   against that one member;
//! - terminated: [`ActiveSession::exit`] (or dropping a pending
//!   registration) ends it.
//!
//! Nothing is saved here. Catalog and ledger changes stay in memory until
//! the shop is flushed on program exit.

use crate::{
    core::{
        catalog::PriceEntry,
        ledger::{Member, PurchaseEntry},
        shop::Shop,
        snapshot::Snapshot,
    },
    errors::Result,
};
use tracing::info;

/// Outcome of looking a member code up.
#[derive(Debug)]
pub enum Identification<'a> {
    /// The member is registered; the session is active
    Active(ActiveSession<'a>),
    /// The code is unknown; registration may be offered
    Unregistered(PendingRegistration<'a>),
}

/// Starts a session for `code`.
pub fn identify<'a>(shop: &'a mut Shop, code: &str) -> Identification<'a> {
    let code = code.trim();
    match shop.ledger.find(code).cloned() {
        Some(member) => Identification::Active(ActiveSession::start(shop, code, member)),
        None => Identification::Unregistered(PendingRegistration {
            shop,
            code: code.to_string(),
        }),
    }
}

/// An unknown member code waiting for inline registration.
#[derive(Debug)]
pub struct PendingRegistration<'a> {
    shop: &'a mut Shop,
    code: String,
}

impl<'a> PendingRegistration<'a> {
    /// The code that was not found.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Registers the member under the pending code and starts the session.
    pub fn register(
        self,
        name: &str,
        image_path: &str,
        default_image_path: &str,
    ) -> Result<ActiveSession<'a>> {
        let member = self
            .shop
            .ledger
            .register(&self.code, name, image_path, default_image_path)?
            .clone();
        Ok(ActiveSession::start(self.shop, &self.code, member))
    }

    /// Gives up without registering. Nothing is mutated.
    pub fn decline(self) {
        info!(code = %self.code, "Registration declined");
    }
}

/// Result of scanning a barcode during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The barcode was known; the purchase was recorded
    Recorded(PurchaseEntry),
    /// The barcode is not in the catalog; a price is needed
    UnknownBarcode,
}

/// The member's purchases with their running total.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseSummary {
    /// Entries in purchase order
    pub entries: Snapshot<PurchaseEntry>,
    /// Sum of the parsable prices
    pub total: f64,
}

/// An identified member's open session.
#[derive(Debug)]
pub struct ActiveSession<'a> {
    shop: &'a mut Shop,
    code: String,
    member: Member,
}

impl<'a> ActiveSession<'a> {
    fn start(shop: &'a mut Shop, code: &str, member: Member) -> Self {
        info!(code, name = %member.name, "Member session started");
        shop.ledger.open_account(code);
        Self {
            shop,
            code: code.to_string(),
            member,
        }
    }

    /// The member being served.
    #[must_use]
    pub const fn member(&self) -> &Member {
        &self.member
    }

    /// Scans a barcode. A known price is appended to the member's purchases.
    pub fn scan(&mut self, barcode: &str) -> ScanOutcome {
        let barcode = barcode.trim();
        match self.shop.catalog.barcoded.lookup(barcode) {
            Some(price) => {
                let price = price.to_string();
                ScanOutcome::Recorded(self.record(barcode, &price))
            }
            None => ScanOutcome::UnknownBarcode,
        }
    }

    /// Stores a price for an unknown barcode in the catalog and records the
    /// purchase at that price.
    pub fn scan_with_price(&mut self, barcode: &str, price: &str) -> PurchaseEntry {
        let barcode = barcode.trim();
        self.shop.catalog.barcoded.set_price(barcode, price);
        self.record(barcode, price)
    }

    /// Current listing of the loose items.
    #[must_use]
    pub fn loose_items(&self) -> Snapshot<PriceEntry> {
        self.shop.catalog.loose.list()
    }

    /// Records the loose item shown at `position` in `snapshot`, at the
    /// price the snapshot shows.
    pub fn add_loose(
        &mut self,
        snapshot: &Snapshot<PriceEntry>,
        position: usize,
    ) -> Result<PurchaseEntry> {
        let entry = snapshot.get(position)?.clone();
        Ok(self.record(&entry.key, &entry.price))
    }

    /// The member's purchases and total.
    #[must_use]
    pub fn purchases(&self) -> PurchaseSummary {
        PurchaseSummary {
            entries: self.shop.ledger.list(&self.code),
            total: self.shop.ledger.total(&self.code),
        }
    }

    /// Removes the purchase at 1-based `position`.
    pub fn remove_purchase(&mut self, position: usize) -> Result<PurchaseEntry> {
        self.shop.ledger.remove_entry_at(&self.code, position)
    }

    /// Empties the member's purchases.
    pub fn clear(&mut self) {
        self.shop.ledger.clear(&self.code);
    }

    /// Ends the session. Nothing is saved.
    pub fn exit(self) {
        info!(code = %self.code, "Member session ended");
    }

    fn record(&mut self, item: &str, price: &str) -> PurchaseEntry {
        self.shop.ledger.append_entry(&self.code, item, price).clone()
    }
}
