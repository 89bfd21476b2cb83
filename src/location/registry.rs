//! Locations index: logical location names mapped to county FIPS codes

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;

use super::fips::{CountyFips, IntoFipsCodes};
use crate::error::util::safe_read_to_string;
use crate::error::{PopReaderError, Result};
use crate::utils::{list_subdirectories, log_warning};

/// Location name to the FIPS codes of the counties it covers, in index order
pub type LocationMap = BTreeMap<String, Vec<CountyFips>>;

/// Parsed locations index, filtered to the county directories on disk
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    /// Locations with at least one county directory present
    locations: LocationMap,
    /// Sorted, de-duplicated FIPS set to every name defined by exactly that set
    by_fips_set: FxHashMap<Vec<CountyFips>, Vec<String>>,
    /// County directories present in the population directory
    directories: BTreeSet<CountyFips>,
}

impl LocationRegistry {
    /// Parse index content against the set of county directories that exist
    ///
    /// Each non-blank line is `name fips1 fips2 ...` separated by any
    /// whitespace. Codes without a directory are dropped from their location,
    /// and locations left without codes are omitted. A name defined twice
    /// keeps its last definition.
    #[must_use]
    pub fn parse(content: &str, directories: BTreeSet<CountyFips>) -> Self {
        let mut locations = LocationMap::new();

        for line in content.lines() {
            let mut tokens = line.split_whitespace();
            let Some(name) = tokens.next() else {
                continue;
            };

            let codes = tokens
                .map(CountyFips::padded)
                .filter(|code| directories.contains(code))
                .collect_vec();

            if codes.is_empty() {
                debug!("Location {name} has no county directories; omitted");
                locations.remove(name);
                continue;
            }

            if locations.insert(name.to_string(), codes).is_some() {
                debug!("Location {name} is defined more than once; keeping the last definition");
            }
        }

        let mut by_fips_set: FxHashMap<Vec<CountyFips>, Vec<String>> = FxHashMap::default();
        for (name, codes) in &locations {
            by_fips_set
                .entry(canonical_set(codes.iter().cloned()))
                .or_default()
                .push(name.clone());
        }

        Self {
            locations,
            by_fips_set,
            directories,
        }
    }

    /// Read the index at `index_path` and filter it against the county
    /// directories of `population_dir`
    pub fn from_file(index_path: &Path, population_dir: &Path) -> Result<Self> {
        let directories = list_subdirectories(population_dir)?
            .into_iter()
            .filter(|name| CountyFips::is_county_code(name))
            .map(|name| CountyFips::padded(&name))
            .collect::<BTreeSet<_>>();

        let content = safe_read_to_string(index_path, "locations index")?;
        let registry = Self::parse(&content, directories);
        debug!(
            "Parsed {} locations over {} county directories from {}",
            registry.locations.len(),
            registry.directories.len(),
            index_path.display()
        );
        Ok(registry)
    }

    /// Every location with its county FIPS codes
    #[must_use]
    pub const fn locations(&self) -> &LocationMap {
        &self.locations
    }

    /// FIPS codes of one location
    #[must_use]
    pub fn fips_for(&self, name: &str) -> Option<&[CountyFips]> {
        self.locations.get(name).map(Vec::as_slice)
    }

    /// Union of the FIPS codes of every location
    #[must_use]
    pub fn county_fips_codes(&self) -> BTreeSet<CountyFips> {
        self.locations.values().flatten().cloned().collect()
    }

    /// Whether `code` belongs to at least one location
    #[must_use]
    pub fn is_known_fips(&self, code: &str) -> bool {
        self.locations
            .values()
            .any(|codes| codes.iter().any(|c| c.as_str() == code))
    }

    /// County directories present on disk
    #[must_use]
    pub const fn directories(&self) -> &BTreeSet<CountyFips> {
        &self.directories
    }

    /// The location defined by exactly this set of FIPS codes
    ///
    /// Codes are padded to five characters; order and repeats do not matter.
    /// A location covering a superset or a subset does not match.
    pub fn resolve_location_name(&self, fips_codes: impl IntoFipsCodes) -> Result<String> {
        let key = canonical_set(fips_codes.into_fips_codes());
        let codes = || key.iter().map(ToString::to_string).collect_vec();

        match self.by_fips_set.get(&key).map(Vec::as_slice) {
            Some([name]) => Ok(name.clone()),
            Some(names) if !names.is_empty() => Err(PopReaderError::AmbiguousFipsSet {
                fips_codes: codes(),
                names: names.to_vec(),
            }),
            _ => Err(PopReaderError::UnknownFipsSet {
                fips_codes: codes(),
            }),
        }
    }

    /// Single-county location name for every county directory present
    ///
    /// Directories that no single-county location names are skipped.
    #[must_use]
    pub fn available_locations(&self) -> LocationMap {
        self.directories
            .iter()
            .filter_map(|code| match self.resolve_location_name(code.clone()) {
                Ok(name) => Some((name, vec![code.clone()])),
                Err(e) => {
                    log_warning(&format!("Skipping county directory {code}: {e}"), None);
                    None
                }
            })
            .collect()
    }
}

fn canonical_set(codes: impl IntoIterator<Item = CountyFips>) -> Vec<CountyFips> {
    codes.into_iter().sorted().dedup().collect()
}
