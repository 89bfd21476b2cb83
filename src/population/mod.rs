//! Synthetic population access
//!
//! This module defines the [`SyntheticPopulation`] trait, the uniform API over
//! both on-disk formats, and the factory that picks an implementation for a
//! population directory.

pub mod current;
pub mod factory;
pub mod legacy;
pub mod loader;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::location::{CountyFips, LocationCatalog, LocationMap, locations_to_dirs};
use crate::schema::SchemaVersion;

pub use current::CurrentPopulation;
pub use factory::{detect_schema_version, population_from_config, population_from_path};
pub use legacy::LegacyPopulation;
pub use loader::LoadOptions;

/// Read access to one synthetic population
///
/// Every loader takes a list of location identifiers: county FIPS codes
/// (e.g. `48301`) or location names from the locations index (e.g.
/// `Loving_County_TX`). The identifiers are resolved to a duplicate-free set
/// of county directories and the entity file of every directory is read and
/// concatenated. A missing file in any requested directory fails the call.
///
/// An empty `locations` slice reads no directory and yields a table with no
/// rows. Its columns are only those the format fixes for that entity: the
/// full layout for every legacy table, and for current tables the people,
/// group-quarters and cross-reference columns, `ID, Block_Group` for
/// households and `ID` for schools and workplaces.
pub trait SyntheticPopulation: Send + Sync {
    /// On-disk format this implementation reads
    fn version(&self) -> SchemaVersion;

    /// Population directory holding the per-county subdirectories
    fn root(&self) -> &Path;

    /// Cached locations index
    fn catalog(&self) -> &LocationCatalog;

    /// Per-directory read settings
    fn load_options(&self) -> &LoadOptions;

    /// Every location whose counties are present, with their FIPS codes
    fn locations(&self) -> Result<LocationMap> {
        Ok(self.catalog().registry()?.locations().clone())
    }

    /// Union of the FIPS codes of every location
    fn county_fips_codes(&self) -> Result<BTreeSet<CountyFips>> {
        Ok(self.catalog().registry()?.county_fips_codes())
    }

    /// The location defined by exactly this set of FIPS codes
    ///
    /// Takes one code or several; codes are padded to five digits and their
    /// order and repeats do not matter.
    fn resolve_location_name(&self, fips_codes: &[&str]) -> Result<String> {
        self.catalog().registry()?.resolve_location_name(fips_codes)
    }

    /// Single-county location name for every county directory present
    fn available_locations(&self) -> Result<LocationMap> {
        Ok(self.catalog().registry()?.available_locations())
    }

    /// Forget the cached locations index
    fn invalidate_locations(&self) {
        self.catalog().invalidate();
    }

    /// County directories covered by `locations`, in sorted order
    fn locations_to_dirs(&self, locations: &[&str]) -> Result<Vec<PathBuf>> {
        let registry = self.catalog().registry()?;
        let dirs = locations_to_dirs(&registry, locations)?;
        Ok(dirs
            .iter()
            .map(|code| self.root().join(code.as_str()))
            .collect())
    }

    /// People living in `locations`, optionally with group-quarters people
    fn load_people(&self, locations: &[&str], include_gq_people: bool) -> Result<RecordBatch>;

    /// People living in group quarters
    fn load_gq_people(&self, locations: &[&str]) -> Result<RecordBatch>;

    /// Schools, with records repeated across county extracts removed
    fn load_schools(&self, locations: &[&str]) -> Result<RecordBatch>;

    /// Workplaces, with records repeated across county extracts removed
    fn load_workplaces(&self, locations: &[&str]) -> Result<RecordBatch>;

    /// Households
    fn load_households(&self, locations: &[&str]) -> Result<RecordBatch>;

    /// Person to household linkage as (person, household, role)
    fn load_people_household_xref(&self, locations: &[&str]) -> Result<RecordBatch>;

    /// Number of people without materializing the people table
    fn population_count(&self, locations: &[&str], include_gq_people: bool) -> Result<usize>;

    /// Number of group-quarters people
    fn gq_population_count(&self, locations: &[&str]) -> Result<usize>;
}
