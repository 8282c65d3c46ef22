//! Management menu - catalog maintenance and display settings.

use super::{Presenter, print_numbered, print_plain, terminal::Terminal};
use crate::{
    core::{shop::Shop, snapshot::parse_position},
    errors::Result,
    render::BannerFont,
};
use std::io::{BufRead, Write};
use tracing::info;

/// A management menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageCommand {
    /// 1
    ModifyPrice,
    /// 2
    RemoveBarcode,
    /// 3
    AddProduct,
    /// 4
    AddLooseItem,
    /// 5
    RemoveLooseItem,
    /// 6
    ChangeFont,
    /// 7
    ListBarcoded,
    /// 8
    Back,
    /// 9
    ToggleProfileImage,
}

impl ManageCommand {
    /// Interprets a management menu line.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ModifyPrice),
            "2" => Some(Self::RemoveBarcode),
            "3" => Some(Self::AddProduct),
            "4" => Some(Self::AddLooseItem),
            "5" => Some(Self::RemoveLooseItem),
            "6" => Some(Self::ChangeFont),
            "7" => Some(Self::ListBarcoded),
            "8" => Some(Self::Back),
            "9" => Some(Self::ToggleProfileImage),
            _ => None,
        }
    }
}

fn display_manage_menu<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<()> {
    term.say("\nManagement menu:")?;
    term.say("1. Modify a price")?;
    term.say("2. Remove a barcode")?;
    term.say("3. Add a product")?;
    term.say("4. Add an item without barcode")?;
    term.say("5. Remove an item without barcode")?;
    term.say("6. Change banner font")?;
    term.say("7. List items with barcode")?;
    term.say("8. Back to main menu")?;
    term.say("9. Toggle profile image display")
}

/// Runs the management menu until "back" or end of input.
pub fn manage_menu<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    shop: &mut Shop,
    presenter: &mut Presenter,
) -> Result<()> {
    loop {
        display_manage_menu(term)?;
        let Some(choice) = term.prompt("Select an option: ")? else {
            return Ok(());
        };
        match ManageCommand::parse(&choice) {
            Some(ManageCommand::ModifyPrice) => modify_price(term, shop, presenter)?,
            Some(ManageCommand::RemoveBarcode) => remove_barcode(term, shop)?,
            Some(ManageCommand::AddProduct) => add_product(term, shop)?,
            Some(ManageCommand::AddLooseItem) => add_loose_item(term, shop)?,
            Some(ManageCommand::RemoveLooseItem) => remove_loose_item(term, shop)?,
            Some(ManageCommand::ChangeFont) => {
                if let Some(font) = select_font(term)? {
                    presenter.font = font;
                    info!(font = font.name(), "Banner font changed");
                    term.say(format!("✅ Font changed to: {}", font.name()))?;
                }
            }
            Some(ManageCommand::ListBarcoded) => {
                if presenter.clear_screen {
                    term.clear()?;
                }
                print_plain(
                    term,
                    "Items with barcode:",
                    "No items with barcode found.",
                    &shop.catalog.barcoded.list(),
                )?;
            }
            Some(ManageCommand::Back) => return Ok(()),
            Some(ManageCommand::ToggleProfileImage) => {
                presenter.show_profile_image = !presenter.show_profile_image;
                let status = if presenter.show_profile_image {
                    "enabled"
                } else {
                    "disabled"
                };
                info!(status, "Profile image display toggled");
                term.say(format!("Profile image display {status}."))?;
            }
            None => term.say("Invalid option.")?,
        }
    }
}

fn modify_price<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    shop: &mut Shop,
    presenter: &Presenter,
) -> Result<()> {
    let Some(barcode) = term.prompt("Enter the barcode of the product to modify: ")? else {
        return Ok(());
    };
    let Some(current) = shop.catalog.barcoded.lookup(&barcode) else {
        return term.say(format!("❌ Barcode not found: {barcode}"));
    };

    term.say("Current price:")?;
    presenter.show_price(term, current)?;
    let Some(price) = term.prompt("Enter the new price: ")? else {
        return Ok(());
    };
    let updated = shop.catalog.barcoded.update_price(&barcode, &price);
    if term.recover(updated)?.is_some() {
        term.say("✅ Price updated.")?;
    }
    Ok(())
}

fn remove_barcode<R: BufRead, W: Write>(term: &mut Terminal<R, W>, shop: &mut Shop) -> Result<()> {
    let Some(barcode) = term.prompt("Enter the barcode to remove: ")? else {
        return Ok(());
    };
    let removed = shop.catalog.barcoded.remove(&barcode);
    if term.recover(removed)?.is_some() {
        term.say("✅ Barcode removed from the database.")?;
    }
    Ok(())
}

fn add_product<R: BufRead, W: Write>(term: &mut Terminal<R, W>, shop: &mut Shop) -> Result<()> {
    let Some(barcode) = term.prompt("Enter the barcode: ")? else {
        return Ok(());
    };
    if shop.catalog.barcoded.lookup(&barcode).is_some() {
        return term.say("⚠️ The product already exists. Use the modify option.");
    }
    let Some(price) = term.prompt("Enter the price: ")? else {
        return Ok(());
    };
    let added = shop.catalog.barcoded.add(&barcode, &price);
    if term.recover(added)?.is_some() {
        term.say("✅ Product added.")?;
    }
    Ok(())
}

fn add_loose_item<R: BufRead, W: Write>(term: &mut Terminal<R, W>, shop: &mut Shop) -> Result<()> {
    let Some(description) = term.prompt("Enter the product description: ")? else {
        return Ok(());
    };
    if shop.catalog.loose.lookup(&description).is_some() {
        return term.say("⚠️ The product already exists.");
    }
    let Some(price) = term.prompt("Enter the price: ")? else {
        return Ok(());
    };
    let added = shop.catalog.loose.add(&description, &price);
    if term.recover(added)?.is_some() {
        term.say("✅ Product added.")?;
    }
    Ok(())
}

fn remove_loose_item<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    shop: &mut Shop,
) -> Result<()> {
    let snapshot = shop.catalog.loose.list();
    if snapshot.is_empty() {
        return term.say("No items without barcode to remove.");
    }
    print_numbered(term, "Items without barcode:", &snapshot)?;

    let Some(input) = term.prompt("Enter the index of the item to remove: ")? else {
        return Ok(());
    };
    let removed = parse_position(&input)
        .and_then(|position| shop.catalog.loose.remove_at(&snapshot, position));
    if let Some(entry) = term.recover(removed)? {
        term.say(format!("✅ Item '{}' removed from the database.", entry.key))?;
    }
    Ok(())
}

/// Lists the font families and reads a choice, re-prompting until it is
/// valid. Returns `None` if input ends first.
fn select_font<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<Option<BannerFont>> {
    term.say("Available fonts:")?;
    for (idx, font) in BannerFont::ALL.iter().enumerate() {
        term.say(format!("{}. {}", idx + 1, font.name()))?;
    }

    let prompt = format!("Select a font (1-{}): ", BannerFont::ALL.len());
    loop {
        let Some(input) = term.prompt(&prompt)? else {
            return Ok(None);
        };
        if let Some(font) = parse_position(&input)
            .ok()
            .and_then(BannerFont::from_position)
        {
            return Ok(Some(font));
        }
        term.say("Invalid choice, try again.")?;
    }
}
