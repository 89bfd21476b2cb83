//! Layouts of the legacy (RTI) tab-delimited population files

use super::ColumnType::{Float64, Int64, Utf8};
use super::{ColumnSpec, TableLayout};

/// Missing-value marker in legacy person and household files
pub const NA_TOKEN: &str = "X";

/// Locations index, stored in the country directory shared by all versions
pub const LOCATIONS_FILE: &str = "locations.txt";

pub const PEOPLE_FILE: &str = "people.txt";
pub const GQ_PEOPLE_FILE: &str = "gq_people.txt";
pub const SCHOOLS_FILE: &str = "schools.txt";
pub const WORKPLACES_FILE: &str = "workplaces.txt";
pub const HOUSEHOLDS_FILE: &str = "households.txt";

/// `people.txt`
pub const PEOPLE: TableLayout = TableLayout {
    columns: &[
        ColumnSpec::new("sp_id", 0, Int64),
        ColumnSpec::new("sp_hh_id", 1, Int64),
        ColumnSpec::new("age", 2, Int64),
        ColumnSpec::new("sex", 3, Utf8),
        ColumnSpec::new("race", 4, Int64),
        ColumnSpec::new("relate", 5, Int64),
        ColumnSpec::new("school_id", 6, Int64),
        ColumnSpec::new("work_id", 7, Int64),
    ],
    na_token: Some(NA_TOKEN),
};

/// `gq_people.txt`
pub const GQ_PEOPLE: TableLayout = TableLayout {
    columns: &[
        ColumnSpec::new("sp_id", 0, Int64),
        ColumnSpec::new("sp_gq_id", 1, Int64),
        ColumnSpec::new("age", 2, Int64),
        ColumnSpec::new("sex", 3, Utf8),
    ],
    na_token: Some(NA_TOKEN),
};

/// `schools.txt`
pub const SCHOOLS: TableLayout = TableLayout {
    columns: &[
        ColumnSpec::new("sp_id", 0, Int64),
        ColumnSpec::new("stco", 1, Int64),
        ColumnSpec::new("latitude", 2, Float64),
        ColumnSpec::new("longitude", 3, Float64),
        ColumnSpec::new("elevation", 4, Float64),
    ],
    na_token: None,
};

/// `schools.txt` extracts that were published without an elevation column
pub const SCHOOLS_NO_ELEVATION: TableLayout = TableLayout {
    columns: &[
        ColumnSpec::new("sp_id", 0, Int64),
        ColumnSpec::new("stco", 1, Int64),
        ColumnSpec::new("latitude", 2, Float64),
        ColumnSpec::new("longitude", 3, Float64),
    ],
    na_token: None,
};

/// `households.txt`
pub const HOUSEHOLDS: TableLayout = TableLayout {
    columns: &[
        ColumnSpec::new("sp_id", 0, Int64),
        ColumnSpec::new("stcotrbg", 1, Int64),
        ColumnSpec::new("race", 2, Int64),
        ColumnSpec::new("hh_income", 3, Int64),
        ColumnSpec::new("latitude", 4, Float64),
        ColumnSpec::new("longitude", 5, Float64),
        ColumnSpec::new("elevation", 6, Float64),
    ],
    na_token: Some(NA_TOKEN),
};

/// `workplaces.txt`
pub const WORKPLACES: TableLayout = TableLayout {
    columns: &[
        ColumnSpec::new("sp_id", 0, Int64),
        ColumnSpec::new("latitude", 1, Float64),
        ColumnSpec::new("longitude", 2, Float64),
        ColumnSpec::new("elevation", 3, Float64),
        ColumnSpec::new("zip", 4, Int64),
    ],
    na_token: None,
};

/// Columns of the person file that carry the household linkage
pub const HOUSEHOLD_XREF_COLUMNS: [&str; 3] = ["sp_id", "sp_hh_id", "relate"];
