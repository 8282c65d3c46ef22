//! Price banners in large FIGlet block letters.
//!
//! Each [`BannerFont`] maps to `<fonts_dir>/<name>.flf`. When that file is
//! missing or cannot be parsed, the built-in standard font is used instead.

use crate::errors::{Error, Result};
use figlet_rs::FIGfont;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Font families selectable from the management menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BannerFont {
    #[default]
    TypeSet,
    Xtty,
    Xsansb,
    Roman,
    Poison,
    Nancyj,
    Katakana,
    IncRaw,
    #[serde(rename = "future_7")]
    Future7,
    Fp2,
    Fireing,
    FairMea,
    #[serde(rename = "ebbs_2")]
    Ebbs2,
    Clb8x10,
}

impl BannerFont {
    /// All families in menu order.
    pub const ALL: [Self; 14] = [
        Self::TypeSet,
        Self::Xtty,
        Self::Xsansb,
        Self::Roman,
        Self::Poison,
        Self::Nancyj,
        Self::Katakana,
        Self::IncRaw,
        Self::Future7,
        Self::Fp2,
        Self::Fireing,
        Self::FairMea,
        Self::Ebbs2,
        Self::Clb8x10,
    ];

    /// Font name as used in config files and on disk.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TypeSet => "type_set",
            Self::Xtty => "xtty",
            Self::Xsansb => "xsansb",
            Self::Roman => "roman",
            Self::Poison => "poison",
            Self::Nancyj => "nancyj",
            Self::Katakana => "katakana",
            Self::IncRaw => "inc_raw",
            Self::Future7 => "future_7",
            Self::Fp2 => "fp2",
            Self::Fireing => "fireing",
            Self::FairMea => "fair_mea",
            Self::Ebbs2 => "ebbs_2",
            Self::Clb8x10 => "clb8x10",
        }
    }

    /// Font at 1-based menu `position`.
    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }
}

/// Renders text with a selectable FIGlet font.
pub struct BannerRenderer {
    fonts_dir: PathBuf,
    standard: FIGfont,
}

impl std::fmt::Debug for BannerRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BannerRenderer")
            .field("fonts_dir", &self.fonts_dir)
            .finish_non_exhaustive()
    }
}

impl BannerRenderer {
    /// Creates a renderer looking up font files in `fonts_dir`.
    pub fn new<P: AsRef<Path>>(fonts_dir: P) -> Result<Self> {
        let standard = FIGfont::standard().map_err(|message| Error::Config {
            message: format!("Failed to load the built-in FIGlet font: {message}"),
        })?;
        Ok(Self {
            fonts_dir: fonts_dir.as_ref().to_path_buf(),
            standard,
        })
    }

    fn load_font(&self, font: BannerFont) -> Option<FIGfont> {
        let path = self.fonts_dir.join(format!("{}.flf", font.name()));
        if !path.is_file() {
            debug!(
                font = font.name(),
                path = %path.display(),
                "Font file not found; using standard font"
            );
            return None;
        }
        FIGfont::from_file(&path.to_string_lossy())
            .inspect_err(|e| debug!(font = font.name(), "Failed to parse font file: {}", e))
            .ok()
    }

    /// Renders `text` as multi-line block letters.
    ///
    /// Falls back to the plain text when the font cannot draw it.
    #[must_use]
    pub fn render(&self, text: &str, font: BannerFont) -> String {
        let custom = self.load_font(font);
        let figfont = custom.as_ref().unwrap_or(&self.standard);
        figfont
            .convert(text)
            .map_or_else(|| text.to_string(), |figure| figure.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_font_positions_follow_menu_order() {
        assert_eq!(BannerFont::from_position(1), Some(BannerFont::TypeSet));
        assert_eq!(BannerFont::from_position(14), Some(BannerFont::Clb8x10));
        assert_eq!(BannerFont::from_position(0), None);
        assert_eq!(BannerFont::from_position(15), None);
    }

    #[test]
    fn test_font_names_match_config_spelling() {
        #[derive(Deserialize)]
        struct Holder {
            font: BannerFont,
        }
        for font in BannerFont::ALL {
            let holder: Holder = toml::from_str(&format!("font = \"{}\"", font.name())).unwrap();
            assert_eq!(holder.font, font);
        }
    }

    #[test]
    fn test_render_falls_back_to_standard_font() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = BannerRenderer::new(dir.path()).unwrap();
        let banner = renderer.render("9.50", BannerFont::Poison);

        assert!(banner.lines().count() > 1);
        assert_ne!(banner.trim(), "9.50");
    }
}
