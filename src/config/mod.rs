//! Application configuration loaded from `config.toml` and the environment.
//!
//! Every field has a default, so a missing config file starts the till with
//! the stock file names in the working directory. A handful of environment
//! variables (usually set through `.env`) override the file.

/// Pluggable action run after the final save
pub mod exit;

use crate::{
    errors::{Error, Result},
    render::banner::BannerFont,
};
use exit::ExitAction;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "TALLY_CONFIG";
/// Environment override for [`AppConfig::data_dir`]
pub const DATA_DIR_VAR: &str = "TALLY_DATA_DIR";
/// Environment override for [`AppConfig::show_profile_image`]
pub const SHOW_PROFILE_IMAGE_VAR: &str = "TALLY_SHOW_PROFILE_IMAGE";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the four CSV tables
    pub data_dir: PathBuf,
    /// Barcoded products table
    pub products_file: String,
    /// Non-barcoded items table
    pub loose_items_file: String,
    /// Member directory table
    pub members_file: String,
    /// Purchases table
    pub purchases_file: String,
    /// Initial banner font
    pub font: BannerFont,
    /// Directory searched for `<font>.flf` files
    pub fonts_dir: PathBuf,
    /// Show the member photo mosaic after identification
    pub show_profile_image: bool,
    /// Mosaic width in characters
    pub mosaic_width: u32,
    /// Image path stored for members registered without one
    pub default_image_path: String,
    /// Clear the terminal before printing a price banner
    pub clear_screen: bool,
    /// What to do after the final save
    pub on_exit: ExitAction,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            products_file: "database.csv".to_string(),
            loose_items_file: "items_no_barcode.csv".to_string(),
            members_file: "members.csv".to_string(),
            purchases_file: "acquisti.csv".to_string(),
            font: BannerFont::default(),
            fonts_dir: PathBuf::from("fonts"),
            show_profile_image: false,
            mosaic_width: 80,
            default_image_path: "default_image.jpg".to_string(),
            clear_screen: true,
            on_exit: ExitAction::default(),
        }
    }
}

/// Resolved paths of the four tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    /// `barcode,price`
    pub products: PathBuf,
    /// `description,price`
    pub loose_items: PathBuf,
    /// `member_code,name,image_path`
    pub members: PathBuf,
    /// `member_code,product,price`
    pub purchases: PathBuf,
}

impl AppConfig {
    /// Paths of the four tables under `data_dir`.
    #[must_use]
    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            products: self.data_dir.join(&self.products_file),
            loose_items: self.data_dir.join(&self.loose_items_file),
            members: self.data_dir.join(&self.members_file),
            purchases: self.data_dir.join(&self.purchases_file),
        }
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// An unparsable boolean is logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_VAR) {
            debug!("Overriding data_dir from {}: {}", DATA_DIR_VAR, dir);
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(SHOW_PROFILE_IMAGE_VAR) {
            match parse_flag(&raw) {
                Some(flag) => self.show_profile_image = flag,
                None => warn!(
                    "Ignoring {}={:?}: expected true/false/1/0",
                    SHOW_PROFILE_IMAGE_VAR, raw
                ),
            }
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file.
///
/// A missing file yields the defaults. An unreadable or malformed file is an
/// error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No config file at {:?}; using defaults.", path);
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        }),
    }
}

/// Loads the application configuration: config file named by `TALLY_CONFIG`
/// (default `config.toml`), then environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let mut config = load_config(&path)?;
    config.apply_overrides(|name| std::env::var(name).ok());
    info!(
        data_dir = %config.data_dir.display(),
        font = config.font.name(),
        show_profile_image = config.show_profile_image,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.products_file, "database.csv");
        assert_eq!(config.font, BannerFont::TypeSet);
        assert!(!config.show_profile_image);
        assert_eq!(config.mosaic_width, 80);
        assert_eq!(config.on_exit, ExitAction::None);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            data_dir = "/srv/till"
            members_file = "soci.csv"
            font = "roman"
            show_profile_image = true
            mosaic_width = 40
            clear_screen = false

            [on_exit]
            action = "command"
            program = "systemctl"
            args = ["poweroff"]
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.font, BannerFont::Roman);
        assert!(config.show_profile_image);
        assert!(!config.clear_screen);
        assert_eq!(config.mosaic_width, 40);
        assert_eq!(
            config.on_exit,
            ExitAction::Command {
                program: "systemctl".to_string(),
                args: vec!["poweroff".to_string()],
            }
        );

        let files = config.data_files();
        assert_eq!(files.members, PathBuf::from("/srv/till/soci.csv"));
        assert_eq!(files.products, PathBuf::from("/srv/till/database.csv"));
    }

    #[test]
    fn test_unknown_font_is_rejected() {
        let result = parse_config(r#"font = "comic_sans""#);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("config.toml")).unwrap();
        assert_eq!(config.purchases_file, "acquisti.csv");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (DATA_DIR_VAR, "/tmp/till"),
            (SHOW_PROFILE_IMAGE_VAR, "1"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(ToString::to_string));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/till"));
        assert!(config.show_profile_image);
    }

    #[test]
    fn test_bad_flag_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| {
            (name == SHOW_PROFILE_IMAGE_VAR).then(|| "maybe".to_string())
        });
        assert!(!config.show_profile_image);
    }
}
