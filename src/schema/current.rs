//! Files and columns of the current self-describing CSV population format

use super::ColumnType::{self, Int64, Utf8};

/// Metadata directory inside the population directory
pub const METADATA_DIR: &str = "metadata";
/// Locations index, relative to the population directory
pub const LOCATIONS_FILE: &str = "metadata/locations.txt";
/// Listing of `person-<type>.txt` membership files
pub const GROUP_METADATA_FILE: &str = "metadata/group_metadata.txt";

pub const PEOPLE_FILE: &str = "person.txt";
pub const GQ_PEOPLE_FILE: &str = "gq_person.txt";
pub const SCHOOLS_FILE: &str = "school.txt";
pub const WORKPLACES_FILE: &str = "workplace.txt";
pub const HOUSEHOLDS_FILE: &str = "household.txt";
pub const PERSON_HOUSEHOLD_FILE: &str = "person-household.txt";
pub const HOUSEHOLD_BLOCK_GROUP_FILE: &str = "household-block_group.txt";

/// Person and place identifier column
pub const ID: &str = "ID";
/// Place identifier in linkage tables
pub const PLACE: &str = "PLACE";
/// Relationship of an agent to a place
pub const ROLE: &str = "ROLE";
/// Enclosing census block group
pub const BLOCK_GROUP: &str = "Block_Group";
/// Group-quarters type tag, e.g. `college_dorm`
pub const GQ_TYPE: &str = "gq_type";

/// Columns of the unified people table, with or without group-quarters people
pub const PEOPLE_COLUMNS: &[(&str, ColumnType)] = &[
    (ID, Int64),
    ("AGE", Int64),
    ("sex", Utf8),
    ("race", Int64),
    ("household_relationship", Int64),
    ("household_income", Int64),
];

/// Columns of `gq_person.txt`
pub const GQ_PERSON_COLUMNS: &[(&str, ColumnType)] =
    &[(ID, Int64), ("AGE", Int64), ("sex", Utf8), ("race", Int64)];

/// Columns appended to group-quarters people by the metadata join
pub const GQ_METADATA_COLUMNS: &[(&str, ColumnType)] = &[
    (ID, Int64),
    (ROLE, Int64),
    (PLACE, Int64),
    (BLOCK_GROUP, Utf8),
    (GQ_TYPE, Utf8),
];

/// Output of the person-household cross reference
pub const XREF_COLUMNS: &[(&str, ColumnType)] = &[(ID, Int64), (PLACE, Int64), (ROLE, Int64)];

/// Columns whose type is declared rather than inferred, matched by header name
///
/// Block groups stay text so state FIPS prefixes keep their leading zero.
pub const DECLARED_COLUMNS: &[(&str, ColumnType)] = &[
    (ID, Int64),
    ("AGE", Int64),
    (PLACE, Int64),
    (BLOCK_GROUP, Utf8),
];

/// Positional types of `person-<place>.txt`: person, place, role
pub const MEMBERSHIP_POSITIONS: &[(usize, ColumnType)] = &[(0, Int64), (1, Int64)];

/// Positional types of `<place>-block_group.txt`: place, block group
pub const BLOCK_GROUP_POSITIONS: &[(usize, ColumnType)] = &[(0, Int64), (1, Utf8)];

/// Membership file patterns that are not group quarters
pub const NON_GROUP_QUARTERS_TYPES: &[&str] = &["household", "school", "workplace"];

/// `person-<place>.txt`
#[must_use]
pub fn membership_file(place_type: &str) -> String {
    format!("person-{place_type}.txt")
}

/// `<place>-block_group.txt`
#[must_use]
pub fn block_group_file(place_type: &str) -> String {
    format!("{place_type}-block_group.txt")
}
