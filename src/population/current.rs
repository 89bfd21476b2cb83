//! Current (Epistemix) population: CSV files with headers and linkage tables

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use super::SyntheticPopulation;
use super::loader::{LoadOptions, count_records, load_table};
use crate::error::Result;
use crate::location::LocationCatalog;
use crate::reader::{CsvOptions, count_csv_records, read_csv_table};
use crate::schema::adapt::select_columns;
use crate::schema::current::{
    BLOCK_GROUP, DECLARED_COLUMNS, GQ_METADATA_COLUMNS, GQ_PEOPLE_FILE, GQ_PERSON_COLUMNS,
    HOUSEHOLD_BLOCK_GROUP_FILE, HOUSEHOLDS_FILE, ID, LOCATIONS_FILE, PEOPLE_COLUMNS, PEOPLE_FILE,
    SCHOOLS_FILE, WORKPLACES_FILE, XREF_COLUMNS,
};
use crate::schema::{ColumnType, SchemaVersion, concat_tables, nullable_schema};
use crate::utils::arrow::{drop_duplicates, left_join};
use crate::xref::{group_quarters_types, load_gq_metadata, load_household_xref, read_block_groups};

/// Population in the current format, e.g. `US_2010.v5`
///
/// Everything but the per-county data lives under `metadata/` in the
/// population directory.
#[derive(Debug)]
pub struct CurrentPopulation {
    root: PathBuf,
    catalog: LocationCatalog,
    options: LoadOptions,
}

impl CurrentPopulation {
    /// Open the population at `root`; no file is read until the first call
    #[must_use]
    pub fn new(root: PathBuf, options: LoadOptions, cache_locations: bool) -> Self {
        let catalog = LocationCatalog::new(root.join(LOCATIONS_FILE), root.clone(), cache_locations);
        Self {
            root,
            catalog,
            options,
        }
    }

    /// Group-quarters types recognized by this population
    pub fn group_quarters_types(&self) -> Result<Vec<String>> {
        group_quarters_types(&self.root)
    }

    fn read(&self, dir: &Path, file: &str, purpose: &str) -> Result<RecordBatch> {
        read_csv_table(
            &dir.join(file),
            &CsvOptions::named(DECLARED_COLUMNS, self.options.batch_size),
            purpose,
        )
    }

    fn load(
        &self,
        locations: &[&str],
        file: &str,
        entity: &str,
        empty_schema: &SchemaRef,
    ) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        load_table(&self.root, &dirs, entity, empty_schema, &self.options, |dir| {
            self.read(dir, file, entity)
        })
    }

    /// Group-quarters people of one directory with their facility metadata
    fn read_gq_people(&self, dir: &Path, gq_types: &[String]) -> Result<RecordBatch> {
        let path = dir.join(GQ_PEOPLE_FILE);
        let gq_people = self.read(dir, GQ_PEOPLE_FILE, "group quarters people")?;
        let metadata = load_gq_metadata(dir, gq_types, self.options.batch_size)?;
        left_join(&gq_people, ID, &metadata, ID, &path)
    }

    /// Households of one directory with their block group
    fn read_households(&self, dir: &Path) -> Result<RecordBatch> {
        let households = self.read(dir, HOUSEHOLDS_FILE, "households")?;
        let linkage_path = dir.join(HOUSEHOLD_BLOCK_GROUP_FILE);
        let block_groups = read_block_groups(&linkage_path, ID, self.options.batch_size)?;
        left_join(&households, ID, &block_groups, ID, &linkage_path)
    }

    fn count(&self, locations: &[&str], file: &str, entity: &str) -> Result<usize> {
        let dirs = self.locations_to_dirs(locations)?;
        count_records(&dirs, entity, &self.options, |dir| {
            count_csv_records(&dir.join(file), entity)
        })
    }
}

/// `gq_person.txt` columns followed by the metadata columns
fn gq_people_schema() -> SchemaRef {
    let person = nullable_schema(GQ_PERSON_COLUMNS);
    let metadata = nullable_schema(GQ_METADATA_COLUMNS);
    let fields = person
        .fields()
        .iter()
        .chain(metadata.fields().iter().filter(|f| f.name() != ID))
        .cloned()
        .collect::<Vec<_>>();
    Arc::new(Schema::new(fields))
}

/// Facility tables have no fixed column set beyond the identifier
fn id_schema() -> SchemaRef {
    nullable_schema(&[(ID, ColumnType::Int64)])
}

impl SyntheticPopulation for CurrentPopulation {
    fn version(&self) -> SchemaVersion {
        SchemaVersion::Current
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

    /// Columns are `ID, AGE, sex, race, household_relationship,
    /// household_income` with or without group-quarters people
    fn load_people(&self, locations: &[&str], include_gq_people: bool) -> Result<RecordBatch> {
        let schema = nullable_schema(PEOPLE_COLUMNS);
        let people = self.load(locations, PEOPLE_FILE, "people", &schema)?;
        let people = select_columns(&people, PEOPLE_COLUMNS)?;
        if !include_gq_people {
            return Ok(people);
        }

        let gq_people = select_columns(&self.load_gq_people(locations)?, PEOPLE_COLUMNS)?;
        concat_tables(&[people, gq_people], &schema, &self.root)
    }

    /// `gq_person.txt` columns followed by `ROLE, PLACE, Block_Group, gq_type`
    fn load_gq_people(&self, locations: &[&str]) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        let gq_types = self.group_quarters_types()?;
        load_table(
            &self.root,
            &dirs,
            "group quarters people",
            &gq_people_schema(),
            &self.options,
            |dir| self.read_gq_people(dir, &gq_types),
        )
    }

    fn load_schools(&self, locations: &[&str]) -> Result<RecordBatch> {
        let schools = self.load(locations, SCHOOLS_FILE, "schools", &id_schema())?;
        drop_duplicates(&schools)
    }

    fn load_workplaces(&self, locations: &[&str]) -> Result<RecordBatch> {
        let workplaces = self.load(locations, WORKPLACES_FILE, "workplaces", &id_schema())?;
        drop_duplicates(&workplaces)
    }

    /// `household.txt` columns followed by `Block_Group`
    fn load_households(&self, locations: &[&str]) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        let schema = nullable_schema(&[(ID, ColumnType::Int64), (BLOCK_GROUP, ColumnType::Utf8)]);
        load_table(&self.root, &dirs, "households", &schema, &self.options, |dir| {
            self.read_households(dir)
        })
    }

    /// `ID, PLACE, ROLE` from `person-household.txt`
    fn load_people_household_xref(&self, locations: &[&str]) -> Result<RecordBatch> {
        let dirs = self.locations_to_dirs(locations)?;
        load_table(
            &self.root,
            &dirs,
            "household cross reference",
            &nullable_schema(XREF_COLUMNS),
            &self.options,
            |dir| load_household_xref(dir, self.options.batch_size),
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
