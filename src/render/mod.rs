//! Presentation - price banners and member photo mosaics.
//!
//! Both are purely cosmetic: nothing rendered here feeds back into the
//! catalog or the ledger.

/// FIGlet price banners
pub mod banner;
/// Grayscale photo mosaics
pub mod mosaic;

pub use banner::{BannerFont, BannerRenderer};
pub use mosaic::render_mosaic;
