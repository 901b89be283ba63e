use std::collections::BTreeSet;
use std::path::Path;

use crate::{Result, Toolchain};

/// Extract the symbol name from one line of a posix format listing.
///
/// A symbol record has at least three whitespace-delimited fields: the name,
/// a type letter, and a value. Shorter lines are member headers or blank
/// separators. Names starting with `.` or `__` are toolchain artifacts
/// rather than library symbols, so they are not reported either.
pub(crate) fn symbol_name(record: &str) -> Option<&str> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    let name = fields[0];
    if name.starts_with('.') || name.starts_with("__") {
        return None;
    }
    Some(name)
}

/// Enumerate the defined symbols of `archive`.
///
/// The same name may be defined in several archive members; the result is
/// deduplicated and sorted.
pub fn defined_symbols<T: Toolchain + ?Sized>(
    toolchain: &T,
    archive: &Path,
) -> Result<BTreeSet<String>> {
    let records = toolchain.list_defined_symbols(archive)?;
    Ok(records
        .iter()
        .filter_map(|record| symbol_name(record))
        .map(str::to_string)
        .collect())
}
