//! Shared test utilities for `TallyBuddy`.
//!
//! This module provides sample tables with known contents and a scripted
//! runner that drives the whole console app from a string of input lines.

#![allow(clippy::unwrap_used)]

use crate::{
    cli::{App, Presenter, Shutdown, terminal::Terminal},
    config::{AppConfig, DataFiles},
    core::{
        catalog::{Catalog, PriceTable, ProductKind},
        ledger::Ledger,
        shop::Shop,
    },
};
use std::{io::Cursor, path::Path};
use tempfile::TempDir;

/// Default image path used by every test registration.
pub const TEST_DEFAULT_IMAGE: &str = "default_image.jpg";

/// Creates a catalog with two barcoded products and three loose items.
///
/// # Contents
/// * barcoded: `0001 -> 9.50`, `0002 -> 1.20`
/// * loose: `Caffè -> 1.00`, `Panino -> 3.50`, `Acqua -> 0.50`
pub fn sample_catalog() -> Catalog {
    let rows = |pairs: &[(&str, &str)]| -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    };
    Catalog {
        barcoded: PriceTable::from_rows(
            ProductKind::Barcoded,
            rows(&[("0001", "9.50"), ("0002", "1.20")]),
        ),
        loose: PriceTable::from_rows(
            ProductKind::Loose,
            rows(&[("Caffè", "1.00"), ("Panino", "3.50"), ("Acqua", "0.50")]),
        ),
    }
}

/// Creates a ledger with one registered member and no purchase list yet.
pub fn ledger_with_member(code: &str, name: &str) -> Ledger {
    let mut ledger = Ledger::new();
    ledger.register(code, name, "", TEST_DEFAULT_IMAGE).unwrap();
    ledger
}

/// The sample catalog plus member `M1` ("Anna").
pub fn sample_shop() -> Shop {
    Shop {
        catalog: sample_catalog(),
        ledger: ledger_with_member("M1", "Anna"),
    }
}

/// Table paths inside `dir`, using the default file names.
pub fn data_files_in(dir: &Path) -> DataFiles {
    AppConfig {
        data_dir: dir.to_path_buf(),
        ..AppConfig::default()
    }
    .data_files()
}

/// Everything a scripted run leaves behind.
pub struct ScriptRun {
    /// How the main loop ended
    pub shutdown: Shutdown,
    /// Everything written to the terminal
    pub output: String,
    /// In-memory state at the end of the run
    pub shop: Shop,
    /// Where the tables were flushed
    pub files: DataFiles,
    _dir: TempDir,
}

/// Runs the app over `script` with `shop` preloaded and tables flushed into
/// a temporary directory.
///
/// Screen clearing is off and the fonts directory does not exist, so banners
/// use the built-in font.
pub fn run_script(shop: Shop, script: &str) -> ScriptRun {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        fonts_dir: dir.path().join("no-fonts"),
        clear_screen: false,
        ..AppConfig::default()
    };
    let presenter = Presenter::from_config(&config).unwrap();
    let term = Terminal::new(Cursor::new(script.to_string()), Vec::new());

    let mut app = App::new(term, shop, &config, presenter);
    let shutdown = app.run().unwrap();
    let shop = app.shop().clone();
    let output = String::from_utf8(app.into_output()).unwrap();

    ScriptRun {
        shutdown,
        output,
        shop,
        files: config.data_files(),
        _dir: dir,
    }
}
