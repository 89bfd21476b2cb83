//! Cross-reference tables of the current population format
//!
//! Linkage files carry no meaningful header names: `person-<place>.txt` holds
//! (person, place, role) and `<place>-block_group.txt` holds (place, block
//! group), so both are addressed by position and renamed here.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::debug;
use regex::Regex;

use crate::error::util::safe_read_to_string;
use crate::error::{PopReaderError, Result};
use crate::reader::{CsvOptions, read_csv_table};
use crate::schema::current::{
    BLOCK_GROUP, BLOCK_GROUP_POSITIONS, GQ_METADATA_COLUMNS, GQ_TYPE, GROUP_METADATA_FILE, ID,
    MEMBERSHIP_POSITIONS, NON_GROUP_QUARTERS_TYPES, PERSON_HOUSEHOLD_FILE, PLACE, ROLE,
    block_group_file, membership_file,
};
use crate::schema::{concat_tables, nullable_schema};
use crate::utils::arrow::{left_join, project_columns, rename_columns, with_constant_column};

/// Pattern of a membership file name inside the group metadata listing
const MEMBERSHIP_PATTERN: &str = r"person-([A-Za-z0-9_]+)\.txt";

/// Place types named by `person-<type>.txt` patterns in `content`, minus the
/// household, school and workplace types, in first-seen order
pub fn parse_group_quarters_types(content: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(MEMBERSHIP_PATTERN).map_err(|e| {
        PopReaderError::ConfigurationError(format!("invalid membership file pattern: {e}"))
    })?;

    let types = pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|place_type| !NON_GROUP_QUARTERS_TYPES.contains(place_type))
        .unique()
        .map(str::to_string)
        .collect_vec();

    Ok(types)
}

/// Group-quarters types listed in `metadata/group_metadata.txt`
pub fn group_quarters_types(population_dir: &Path) -> Result<Vec<String>> {
    let path = population_dir.join(GROUP_METADATA_FILE);
    let content = safe_read_to_string(&path, "group quarters metadata")?;
    let types = parse_group_quarters_types(&content)?;
    debug!("Group quarters types: {}", types.join(", "));
    Ok(types)
}

/// Read a `person-<place>.txt` membership file as `ID, PLACE, ROLE`
pub fn read_membership(path: &Path, batch_size: usize) -> Result<RecordBatch> {
    let table = read_csv_table(
        path,
        &CsvOptions::positional(MEMBERSHIP_POSITIONS, batch_size),
        "place membership",
    )?;
    let table = rename_columns(&table, &[(0, ID), (1, PLACE), (2, ROLE)], path)?;
    project_columns(&table, &[ID, PLACE, ROLE], path)
}

/// Read a `<place>-block_group.txt` linkage file as `<key>, Block_Group`
pub fn read_block_groups(path: &Path, key: &str, batch_size: usize) -> Result<RecordBatch> {
    let table = read_csv_table(
        path,
        &CsvOptions::positional(BLOCK_GROUP_POSITIONS, batch_size),
        "block group linkage",
    )?;
    let table = rename_columns(&table, &[(0, key), (1, BLOCK_GROUP)], path)?;
    project_columns(&table, &[key, BLOCK_GROUP], path)
}

/// Person-household cross reference of one county directory
pub fn load_household_xref(dir: &Path, batch_size: usize) -> Result<RecordBatch> {
    read_membership(&dir.join(PERSON_HOUSEHOLD_FILE), batch_size)
}

/// Group-quarters membership of one county directory, annotated with the
/// block group of each facility and tagged with its type
///
/// Output columns are `ID, ROLE, PLACE, Block_Group, gq_type`. A type with
/// no membership file in this directory contributes nothing; a membership
/// file without its block group linkage is an error.
pub fn load_gq_metadata(dir: &Path, gq_types: &[String], batch_size: usize) -> Result<RecordBatch> {
    let mut tables = Vec::with_capacity(gq_types.len());

    for gq_type in gq_types {
        let membership_path = dir.join(membership_file(gq_type));
        if !membership_path.is_file() {
            debug!("No {gq_type} membership in {}", dir.display());
            continue;
        }

        let membership = read_membership(&membership_path, batch_size)?;
        let linkage_path = dir.join(block_group_file(gq_type));
        let block_groups = read_block_groups(&linkage_path, PLACE, batch_size)?;

        let joined = left_join(&membership, PLACE, &block_groups, PLACE, &linkage_path)?;
        let tagged = with_constant_column(&joined, GQ_TYPE, gq_type)?;
        tables.push(project_columns(
            &tagged,
            &[ID, ROLE, PLACE, BLOCK_GROUP, GQ_TYPE],
            &membership_path,
        )?);
    }

    concat_tables(&tables, &nullable_schema(GQ_METADATA_COLUMNS), dir)
}
