//! Member mode - the purchase session menu.
//!
//! One member is served at a time: identify (or register inline), then loop
//! over scan / add loose item / view / remove / clear until the member exits.

use super::{Presenter, print_numbered, terminal::{Terminal, is_yes}};
use crate::{
    core::{
        session::{self, ActiveSession, Identification, ScanOutcome},
        shop::Shop,
        snapshot::parse_position,
    },
    errors::Result,
};
use std::io::{BufRead, Write};

/// A member mode menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// 1: scan a barcoded product
    Scan,
    /// 2: pick a loose item from the list
    AddLoose,
    /// 3: show purchases and total
    ViewPurchases,
    /// 4: remove a purchase by position
    RemovePurchase,
    /// 5: reset the member's tally
    ClearPurchases,
    /// 6: leave member mode
    Exit,
}

impl SessionCommand {
    /// Interprets a member menu line.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Scan),
            "2" => Some(Self::AddLoose),
            "3" => Some(Self::ViewPurchases),
            "4" => Some(Self::RemovePurchase),
            "5" => Some(Self::ClearPurchases),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs member mode until the member exits or input ends.
pub fn member_mode<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    shop: &mut Shop,
    presenter: &Presenter,
    default_image_path: &str,
) -> Result<()> {
    let Some(code) = term.prompt("Enter the member code: ")? else {
        return Ok(());
    };
    if code.is_empty() {
        return term.say("No member code entered.");
    }

    let mut session = match session::identify(shop, &code) {
        Identification::Active(session) => session,
        Identification::Unregistered(pending) => {
            let answer = term.prompt("Member not found. Register now? (y/n): ")?;
            if !answer.as_deref().is_some_and(is_yes) {
                pending.decline();
                return Ok(());
            }
            let Some(name) = term.prompt("Enter the member name: ")? else {
                pending.decline();
                return Ok(());
            };
            let Some(image_path) =
                term.prompt("Enter the member image path (leave blank for default): ")?
            else {
                pending.decline();
                return Ok(());
            };
            let registered = pending.register(&name, &image_path, default_image_path);
            let Some(session) = term.recover(registered)? else {
                return Ok(());
            };
            term.say("✅ Member registered.")?;
            session
        }
    };

    presenter.show_member_photo(term, session.member())?;

    loop {
        display_member_menu(term, &session)?;
        let Some(choice) = term.prompt("Select an option: ")? else {
            break;
        };
        match SessionCommand::parse(&choice) {
            Some(SessionCommand::Scan) => scan(term, &mut session, presenter)?,
            Some(SessionCommand::AddLoose) => add_loose(term, &mut session, presenter)?,
            Some(SessionCommand::ViewPurchases) => view_purchases(term, &session)?,
            Some(SessionCommand::RemovePurchase) => remove_purchase(term, &mut session)?,
            Some(SessionCommand::ClearPurchases) => {
                session.clear();
                term.say("✅ The tally has been reset.")?;
            }
            Some(SessionCommand::Exit) => break,
            None => term.say("Invalid option.")?,
        }
    }

    session.exit();
    Ok(())
}

fn display_member_menu<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &ActiveSession<'_>,
) -> Result<()> {
    term.say(format!("\nMember mode - Member: {}", session.member().name))?;
    term.say("1. Scan product (with barcode)")?;
    term.say("2. Add product without barcode (choose from list)")?;
    term.say("3. View purchases")?;
    term.say("4. Remove product from purchases")?;
    term.say("5. Reset the tally")?;
    term.say("6. Leave member mode")
}

fn scan<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut ActiveSession<'_>,
    presenter: &Presenter,
) -> Result<()> {
    let Some(barcode) = term.prompt("Scan the product barcode: ")? else {
        return Ok(());
    };
    if barcode.is_empty() {
        return term.say("No barcode entered.");
    }

    match session.scan(&barcode) {
        ScanOutcome::Recorded(entry) => {
            presenter.show_price(term, &entry.price)?;
            term.say("✅ Product added to the purchase list.")
        }
        ScanOutcome::UnknownBarcode => {
            term.say("Barcode not found in the product database.")?;
            let Some(price) = term.prompt("Enter the price for this product: ")? else {
                return Ok(());
            };
            let entry = session.scan_with_price(&barcode, &price);
            presenter.show_price(term, &entry.price)?;
            term.say("✅ Product added to the database and to the purchase list.")
        }
    }
}

fn add_loose<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut ActiveSession<'_>,
    presenter: &Presenter,
) -> Result<()> {
    let snapshot = session.loose_items();
    if snapshot.is_empty() {
        return term.say("No products without barcode available.");
    }
    print_numbered(term, "Products without barcode available:", &snapshot)?;

    let Some(input) = term.prompt("Select the index of the product to add: ")? else {
        return Ok(());
    };
    let added = parse_position(&input).and_then(|position| session.add_loose(&snapshot, position));
    let Some(entry) = term.recover(added)? else {
        return Ok(());
    };
    presenter.show_price(term, &entry.price)?;
    term.say("✅ Product added to the purchase list.")
}

fn view_purchases<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &ActiveSession<'_>,
) -> Result<()> {
    let summary = session.purchases();
    if summary.entries.is_empty() {
        return term.say("No purchases recorded.");
    }

    term.say(format!("\nPurchases of {}:", session.member().name))?;
    for (position, entry) in summary.entries.numbered() {
        term.say(format!("{position}. {} -> {}", entry.item, entry.price))?;
    }
    term.say(format!("Total: {:.2}", summary.total))
}

fn remove_purchase<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    session: &mut ActiveSession<'_>,
) -> Result<()> {
    let summary = session.purchases();
    if summary.entries.is_empty() {
        return term.say("The purchase list is empty.");
    }

    term.say("Purchased products:")?;
    for (position, entry) in summary.entries.numbered() {
        term.say(format!("{position}. {} -> {}", entry.item, entry.price))?;
    }
    let Some(input) = term.prompt("Enter the index of the product to remove: ")? else {
        return Ok(());
    };
    let removed = parse_position(&input).and_then(|position| session.remove_purchase(position));
    if let Some(entry) = term.recover(removed)? {
        term.say(format!(
            "✅ Product '{}' removed from the purchase list.",
            entry.item
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::ledger::PurchaseEntry;
    use crate::test_utils::{run_script, sample_shop};

    #[test]
    fn test_declining_registration_leaves_tables_untouched() {
        let run = run_script(Shop::default(), "1\nM1\nn\n4\n");
        assert_eq!(run.shop.ledger.member_count(), 0);
        assert_eq!(run.shop.ledger.purchases().count(), 0);
        assert!(!run.output.contains("Member mode - Member"));
    }

    #[test]
    fn test_empty_member_code_is_rejected() {
        let run = run_script(Shop::default(), "1\n\n4\n");
        assert!(run.output.contains("No member code entered."));
        assert!(!run.output.contains("Register now?"));
        assert_eq!(run.shop.ledger.member_count(), 0);
    }

    #[test]
    fn test_inline_registration_enters_session() {
        let run = run_script(Shop::default(), "1\nM7\ny\nGiulia\n\n6\n4\n");
        let member = run.shop.ledger.find("M7").unwrap();
        assert_eq!(member.name, "Giulia");
        assert_eq!(member.image_path, "default_image.jpg");
        assert!(run.output.contains("Member mode - Member: Giulia"));

        let saved = std::fs::read_to_string(&run.files.members).unwrap();
        assert_eq!(
            saved,
            "member_code,name,image_path\nM7,Giulia,default_image.jpg\n"
        );
    }

    #[test]
    fn test_scan_known_barcode_appends_purchase() {
        let run = run_script(sample_shop(), "1\nM1\n1\n0001\n6\n4\n");
        assert_eq!(
            run.shop.ledger.entries("M1"),
            &[PurchaseEntry::new("0001", "9.50")]
        );
        assert_eq!(run.shop.catalog.barcoded.lookup("0001"), Some("9.50"));
        assert!(run.output.contains("Product added to the purchase list."));
    }

    #[test]
    fn test_scan_unknown_barcode_prompts_for_price() {
        let run = run_script(sample_shop(), "1\nM1\n1\n7777\n4.20\n6\n4\n");
        assert_eq!(run.shop.catalog.barcoded.lookup("7777"), Some("4.20"));
        assert_eq!(
            run.shop.ledger.entries("M1"),
            &[PurchaseEntry::new("7777", "4.20")]
        );
    }

    #[test]
    fn test_add_loose_item_by_position() {
        let run = run_script(sample_shop(), "1\nM1\n2\n3\n6\n4\n");
        assert!(run.output.contains("3. Acqua -> 0.50"));
        assert_eq!(
            run.shop.ledger.entries("M1"),
            &[PurchaseEntry::new("Acqua", "0.50")]
        );
    }

    #[test]
    fn test_add_loose_item_rejects_bad_input() {
        let run = run_script(sample_shop(), "1\nM1\n2\nabc\n2\n9\n6\n4\n");
        assert!(run.output.contains("Invalid input 'abc'"));
        assert!(run.output.contains("Invalid index 9"));
        assert!(run.shop.ledger.entries("M1").is_empty());
    }

    #[test]
    fn test_view_shows_total_skipping_text_prices() {
        let mut shop = sample_shop();
        shop.ledger.append_entry("M1", "0001", "9.50");
        shop.ledger.append_entry("M1", "Omaggio", "free");
        let run = run_script(shop, "1\nM1\n3\n6\n4\n");
        assert!(run.output.contains("2. Omaggio -> free"));
        assert!(run.output.contains("Total: 9.50"));
    }

    #[test]
    fn test_remove_and_clear_purchases() {
        let mut shop = sample_shop();
        shop.ledger.append_entry("M1", "a", "1");
        shop.ledger.append_entry("M1", "b", "2");
        shop.ledger.append_entry("M1", "c", "3");

        let run = run_script(shop.clone(), "1\nM1\n4\n2\n6\n4\n");
        assert!(run.output.contains("Product 'b' removed"));
        assert_eq!(run.shop.ledger.total("M1"), 4.0);

        let run = run_script(shop, "1\nM1\n5\n3\n6\n4\n");
        assert!(run.output.contains("No purchases recorded."));
        assert!(run.shop.ledger.entries("M1").is_empty());
        assert!(run.shop.ledger.find("M1").is_some());
    }

    #[test]
    fn test_invalid_member_option() {
        let run = run_script(sample_shop(), "1\nM1\n9\n6\n4\n");
        assert!(run.output.contains("Invalid option."));
    }
}
