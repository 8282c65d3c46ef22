//! Console layer - numbered text menus over the core operations.
//!
//! This module provides the main menu loop, the presentation settings shared
//! by every menu, and the listing helpers. Member mode and the management
//! menu live in their own modules.

/// Management menu: catalog edits and display settings
pub mod manage;
/// Member mode: the purchase session menu
pub mod member;
/// Line-oriented terminal I/O
pub mod terminal;

use crate::{
    config::{AppConfig, DataFiles},
    core::{catalog::PriceEntry, ledger::Member, shop::Shop, snapshot::Snapshot},
    errors::Result,
    render::{BannerFont, BannerRenderer, render_mosaic},
};
use std::io::{BufRead, Write};
use terminal::Terminal;
use tracing::info;

/// Display settings that can change at runtime from the management menu.
#[derive(Debug)]
pub struct Presenter {
    banner: BannerRenderer,
    /// Font used for price banners
    pub font: BannerFont,
    /// Show the member photo mosaic after identification
    pub show_profile_image: bool,
    /// Clear the screen before a banner
    pub clear_screen: bool,
    /// Mosaic width in characters
    pub mosaic_width: u32,
}

impl Presenter {
    /// Builds the presenter from the loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            banner: BannerRenderer::new(&config.fonts_dir)?,
            font: config.font,
            show_profile_image: config.show_profile_image,
            clear_screen: config.clear_screen,
            mosaic_width: config.mosaic_width,
        })
    }

    /// Shows `price` as a block-letter banner.
    pub fn show_price<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        price: &str,
    ) -> Result<()> {
        if self.clear_screen {
            term.clear()?;
        }
        term.say(self.banner.render(price, self.font))
    }

    /// Shows the member photo when the profile toggle is on.
    pub fn show_member_photo<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        member: &Member,
    ) -> Result<()> {
        if !self.show_profile_image {
            return Ok(());
        }
        term.say(format!("\nPhoto of {}:", member.name))?;
        term.say(render_mosaic(&member.image_path, self.mosaic_width))
    }
}

/// Prints a numbered listing of `(key, price)` rows.
pub fn print_numbered<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    title: &str,
    snapshot: &Snapshot<PriceEntry>,
) -> Result<()> {
    term.say(title)?;
    for (position, entry) in snapshot.numbered() {
        term.say(format!("{position}. {} -> {}", entry.key, entry.price))?;
    }
    Ok(())
}

/// Prints a plain listing of `(key, price)` rows, or `empty_message`.
pub fn print_plain<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    title: &str,
    empty_message: &str,
    snapshot: &Snapshot<PriceEntry>,
) -> Result<()> {
    if snapshot.is_empty() {
        return term.say(empty_message);
    }
    term.say(title)?;
    for (_, entry) in snapshot.numbered() {
        term.say(format!("{} -> {}", entry.key, entry.price))?;
    }
    Ok(())
}

/// A main menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainChoice {
    /// 1: member mode
    Member,
    /// 2: list loose items
    Browse,
    /// 3: management menu
    Manage,
    /// 4: save and exit
    Exit,
    /// Anything else is a scanned barcode
    Barcode(String),
}

impl MainChoice {
    /// Interprets a main menu line. Empty input yields `None`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "" => None,
            "1" => Some(Self::Member),
            "2" => Some(Self::Browse),
            "3" => Some(Self::Manage),
            "4" => Some(Self::Exit),
            barcode => Some(Self::Barcode(barcode.to_string())),
        }
    }
}

/// How the main loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The operator chose "exit"; the exit action should run
    Requested,
    /// Input ran out; tables were saved but no exit action runs
    EndOfInput,
}

/// The whole interactive program.
#[derive(Debug)]
pub struct App<R, W> {
    term: Terminal<R, W>,
    shop: Shop,
    files: DataFiles,
    presenter: Presenter,
    default_image_path: String,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Assembles the app from an already loaded shop.
    pub fn new(
        term: Terminal<R, W>,
        shop: Shop,
        config: &AppConfig,
        presenter: Presenter,
    ) -> Self {
        Self {
            term,
            shop,
            files: config.data_files(),
            presenter,
            default_image_path: config.default_image_path.clone(),
        }
    }

    /// In-memory state, mainly for inspection after a run.
    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Consumes the app and returns the terminal output stream.
    pub fn into_output(self) -> W {
        self.term.into_output()
    }

    fn display_main_menu(&mut self) -> Result<()> {
        self.term.say("\nMain menu:")?;
        self.term.say("1. Member access")?;
        self.term.say("2. List items without barcode")?;
        self.term.say("3. Management")?;
        self.term.say("4. Exit")
    }

    /// Runs the main menu until exit or end of input. Tables are flushed in
    /// both cases.
    pub fn run(&mut self) -> Result<Shutdown> {
        loop {
            self.display_main_menu()?;
            let Some(input) = self
                .term
                .prompt("Select an option or scan a barcode: ")?
            else {
                info!("Input closed; saving and stopping.");
                self.shop.flush(&self.files)?;
                return Ok(Shutdown::EndOfInput);
            };

            match MainChoice::parse(&input) {
                None => {}
                Some(MainChoice::Member) => member::member_mode(
                    &mut self.term,
                    &mut self.shop,
                    &self.presenter,
                    &self.default_image_path,
                )?,
                Some(MainChoice::Browse) => {
                    if self.presenter.clear_screen {
                        self.term.clear()?;
                    }
                    print_plain(
                        &mut self.term,
                        "Items without barcode:",
                        "No items without barcode found.",
                        &self.shop.catalog.loose.list(),
                    )?;
                }
                Some(MainChoice::Manage) => manage::manage_menu(
                    &mut self.term,
                    &mut self.shop,
                    &mut self.presenter,
                )?,
                Some(MainChoice::Exit) => {
                    self.shop.flush(&self.files)?;
                    self.term.say("✅ Save completed. Goodbye.")?;
                    return Ok(Shutdown::Requested);
                }
                Some(MainChoice::Barcode(barcode)) => self.price_check(&barcode)?,
            }
        }
    }

    /// Shows the price of a barcode scanned at the main menu, or stores a
    /// price for an unknown one. No purchase is recorded.
    fn price_check(&mut self, barcode: &str) -> Result<()> {
        if let Some(price) = self.shop.catalog.barcoded.lookup(barcode) {
            return self.presenter.show_price(&mut self.term, price);
        }

        self.term.say("Barcode not found in the database.")?;
        let Some(price) = self
            .term
            .prompt("Enter the price for this barcode: ")?
        else {
            return Ok(());
        };
        self.shop.catalog.barcoded.set_price(barcode, &price);
        self.term.say("✅ Price added to the database.")
    }
}
