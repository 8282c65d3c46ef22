//! Record store - whole-file load/save of the flat CSV tables.
//!
//! Every table is a headed CSV file read completely at start-up and rewritten
//! completely on save. A missing file is not an error: it loads as an empty
//! table and gets created on the next save. There is no locking and no
//! partial-write protection.

/// Row types for each of the four tables
pub mod rows;

use crate::errors::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::{fs::File, io::ErrorKind, path::Path};
use tracing::{debug, warn};

/// A row type bound to a fixed header line.
pub trait Record: Serialize + DeserializeOwned {
    /// Column names written as the header row, in field order
    const HEADERS: &'static [&'static str];
}

/// Reads every row of `path`.
///
/// Returns an empty list (and logs a warning) when the file does not exist.
/// Rows with missing trailing fields load with those fields empty.
///
/// # Errors
/// - [`Error::Io`](crate::errors::Error::Io) if the file exists but cannot
///   be opened
/// - [`Error::Csv`](crate::errors::Error::Csv) if the header does not match
///   `R` or a row is malformed
pub fn load_rows<R: Record, P: AsRef<Path>>(path: P) -> Result<Vec<R>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "File {} does not exist yet; it will be created on save.",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    // The CSV reader is buffered already
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let rows = rdr.deserialize::<R>().collect::<csv::Result<Vec<R>>>()?;
    debug!(path = %path.display(), rows = rows.len(), "Loaded table");
    Ok(rows)
}

/// Overwrites `path` with a header row followed by `rows`.
///
/// The header is always written, so an empty table round-trips as a
/// headers-only file.
///
/// # Errors
/// - [`Error::Io`](crate::errors::Error::Io) if the parent directory cannot
///   be created
/// - [`Error::Csv`](crate::errors::Error::Csv) if the file cannot be written
pub fn save_rows<R, P, I>(path: P, rows: I) -> Result<usize>
where
    R: Record,
    P: AsRef<Path>,
    I: IntoIterator<Item = R>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(R::HEADERS)?;
    let mut count = 0;
    for row in rows {
        wtr.serialize(row)?;
        count += 1;
    }
    wtr.flush()?;

    debug!(path = %path.display(), rows = count, "Saved table");
    Ok(count)
}
