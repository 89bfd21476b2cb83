//! Location identifiers to county directories

use std::collections::BTreeSet;

use log::debug;

use super::fips::CountyFips;
use super::registry::LocationRegistry;
use crate::error::{PopReaderError, Result};

/// Resolve identifiers to the county directories they cover
///
/// An identifier that is a FIPS code of some location is taken as is;
/// anything else must be a location name. Overlapping identifiers are
/// merged, and the result is sorted so reads happen in a stable order.
pub fn locations_to_dirs<S: AsRef<str>>(
    registry: &LocationRegistry,
    identifiers: &[S],
) -> Result<BTreeSet<CountyFips>> {
    let mut dirs = BTreeSet::new();

    for identifier in identifiers {
        let identifier = identifier.as_ref();
        if registry.is_known_fips(identifier) {
            dirs.insert(CountyFips::padded(identifier));
            continue;
        }

        let codes = registry
            .fips_for(identifier)
            .ok_or_else(|| PopReaderError::UnknownLocation {
                identifier: identifier.to_string(),
            })?;
        dirs.extend(codes.iter().cloned());
    }

    debug!("{} identifiers resolved to {} county directories", identifiers.len(), dirs.len());
    Ok(dirs)
}
