//! Legacy (RTI) population: tab-delimited files with positional layouts

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::debug;

use super::SyntheticPopulation;
use super::loader::{LoadOptions, count_records, load_table};
use crate::error::Result;
use crate::location::LocationCatalog;
use crate::reader::{count_legacy_records, legacy_field_count, read_legacy_table};
use crate::schema::legacy::{
    GQ_PEOPLE, GQ_PEOPLE_FILE, HOUSEHOLD_XREF_COLUMNS, HOUSEHOLDS, HOUSEHOLDS_FILE,
    LOCATIONS_FILE, PEOPLE, PEOPLE_FILE, SCHOOLS, SCHOOLS_FILE, SCHOOLS_NO_ELEVATION, WORKPLACES,
    WORKPLACES_FILE,
};
use crate::schema::{
    ColumnSpec, SchemaVersion, TableLayout, concat_tables, conform_batch, unify_schemas,
};
use crate::utils::arrow::{drop_duplicates, project_columns};

/// Population in the legacy format, e.g. `US_2010.v4`
///
/// The locations index lives in the country directory, one level above the
/// population directory, and is shared by every version of that country.
#[derive(Debug)]
pub struct LegacyPopulation {
    root: PathBuf,
    catalog: LocationCatalog,
    options: LoadOptions,
}

impl LegacyPopulation {
    /// Open the population at `root`; no file is read until the first call
    #[must_use]
    pub fn new(root: PathBuf, options: LoadOptions, cache_locations: bool) -> Self {
        let index_path = root.parent().map_or_else(
            || PathBuf::from(LOCATIONS_FILE),
            |country| country.join(LOCATIONS_FILE),
        );
        let catalog = LocationCatalog::new(index_path, root.clone(), cache_locations);
        Self {
            root,
            catalog,
            options,
        }
    }

    fn load(
        &self,
        locations: &[&str],
        file: &str,
        layout: &TableLayout,
        entity: &str,
    ) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        load_table(&self.root, &dirs, entity, &layout.schema(), &self.options, |dir| {
            read_legacy_table(&dir.join(file), layout, self.options.batch_size, entity)
        })
    }

    /// Schools of one directory, whichever of the two published widths it has
    fn read_schools(&self, dir: &Path) -> Result<RecordBatch> {
        let path = dir.join(SCHOOLS_FILE);
        let width = legacy_field_count(&path, "schools")?;
        if width > 0 && width < SCHOOLS.min_width() {
            debug!("{} has no elevation column", path.display());
            let table = read_legacy_table(
                &path,
                &SCHOOLS_NO_ELEVATION,
                self.options.batch_size,
                "schools",
            )?;
            return conform_batch(&table, &SCHOOLS.schema(), &path);
        }
        read_legacy_table(&path, &SCHOOLS, self.options.batch_size, "schools")
    }

    fn count(&self, locations: &[&str], file: &str, entity: &str) -> Result<usize> {
        let dirs = self.locations_to_dirs(locations)?;
        count_records(&dirs, entity, &self.options, |dir| {
            count_legacy_records(&dir.join(file), entity)
        })
    }
}

impl SyntheticPopulation for LegacyPopulation {
    fn version(&self) -> SchemaVersion {
        SchemaVersion::Legacy
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    fn load_options(&self) -> &LoadOptions {
        &self.options
    }

    /// Columns are those of `people.txt`, followed by `sp_gq_id` when
    /// group-quarters people are included
    fn load_people(&self, locations: &[&str], include_gq_people: bool) -> Result<RecordBatch> {
        let people = self.load(locations, PEOPLE_FILE, &PEOPLE, "people")?;
        if !include_gq_people {
            return Ok(people);
        }

        let gq_people = self.load_gq_people(locations)?;
        let schema = unify_schemas([&PEOPLE.schema(), &GQ_PEOPLE.schema()]);
        concat_tables(&[people, gq_people], &schema, &self.root)
    }

    fn load_gq_people(&self, locations: &[&str]) -> Result<RecordBatch> {
        self.load(locations, GQ_PEOPLE_FILE, &GQ_PEOPLE, "group quarters people")
    }

    fn load_schools(&self, locations: &[&str]) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        let schools = load_table(
            &self.root,
            &dirs,
            "schools",
            &SCHOOLS.schema(),
            &self.options,
            |dir| self.read_schools(dir),
        )?;
        drop_duplicates(&schools)
    }

    fn load_workplaces(&self, locations: &[&str]) -> Result<RecordBatch> {
        let workplaces = self.load(locations, WORKPLACES_FILE, &WORKPLACES, "workplaces")?;
        drop_duplicates(&workplaces)
    }

    fn load_households(&self, locations: &[&str]) -> Result<RecordBatch> {
        self.load(locations, HOUSEHOLDS_FILE, &HOUSEHOLDS, "households")
    }

    /// The household columns of `people.txt`: `sp_id, sp_hh_id, relate`
    fn load_people_household_xref(&self, locations: &[&str]) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        let schema: SchemaRef = Arc::new(Schema::new(
            PEOPLE
                .columns
                .iter()
                .filter(|c| HOUSEHOLD_XREF_COLUMNS.contains(&c.name))
                .map(ColumnSpec::field)
                .collect::<Vec<_>>(),
        ));

        load_table(
            &self.root,
            &dirs,
            "household cross reference",
            &schema,
            &self.options,
            |dir| {
                let path = dir.join(PEOPLE_FILE);
                let people = read_legacy_table(&path, &PEOPLE, self.options.batch_size, "people")?;
                project_columns(&people, &HOUSEHOLD_XREF_COLUMNS, &path)
            },
        )
    }

    fn population_count(&self, locations: &[&str], include_gq_people: bool) -> Result<usize> {
        let people = self.count(locations, PEOPLE_FILE, "people")?;
        if include_gq_people {
            Ok(people + self.gq_population_count(locations)?)
        } else {
            Ok(people)
        }
    }

    fn gq_population_count(&self, locations: &[&str]) -> Result<usize> {
        self.count(locations, GQ_PEOPLE_FILE, "group quarters people")
    }
}
