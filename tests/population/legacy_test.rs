use arrow::array::{Array, AsArray};
use arrow::datatypes::{Float64Type, Int64Type};
use pop_reader::{PopReaderError, SchemaVersion};

use crate::utils::{column_names, legacy_fixture};

const PEOPLE_COLUMNS: [&str; 8] = [
    "sp_id",
    "sp_hh_id",
    "age",
    "sex",
    "race",
    "relate",
    "school_id",
    "work_id",
];

#[test]
fn test_people_with_and_without_gq_people() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let population = fixture.population();
    assert_eq!(population.version(), SchemaVersion::Legacy);

    let people = population.load_people(&["Allegheny_County_PA"], false)?;
    assert_eq!(people.num_rows(), 3);
    assert_eq!(column_names(&people), PEOPLE_COLUMNS);

    let everyone = population.load_people(&["Allegheny_County_PA"], true)?;
    assert_eq!(everyone.num_rows(), 4);
    let names = column_names(&everyone);
    assert_eq!(names[..8], PEOPLE_COLUMNS);
    assert_eq!(names[8], "sp_gq_id");

    let gq_id = everyone.column(8).as_primitive::<Int64Type>();
    assert_eq!(gq_id.null_count(), 3);
    assert_eq!(gq_id.value(3), 900);
    Ok(())
}

#[test]
fn test_na_token_becomes_null() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let population = fixture.population();

    let people = population.load_people(&["42003"], false)?;
    let age = people.column(2).as_primitive::<Int64Type>();
    assert_eq!(age.value(0), 34);
    assert!(age.is_null(2));
    assert_eq!(people.column(6).null_count(), 2);

    let households = population.load_households(&["42003"])?;
    let income = households.column(3).as_primitive::<Int64Type>();
    assert_eq!(income.value(0), 52000);
    assert!(income.is_null(1));
    assert_eq!(
        households.column(1).as_primitive::<Int64Type>().value(0),
        420_030_101_001
    );
    Ok(())
}

#[test]
fn test_schools_without_elevation_are_conformed() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let population = fixture.population();

    let schools = population.load_schools(&["Jefferson_County_PA"])?;
    assert_eq!(schools.num_rows(), 1);
    assert_eq!(
        column_names(&schools),
        ["sp_id", "stco", "latitude", "longitude", "elevation"]
    );
    assert!(schools.column(4).is_null(0));

    let schools = population.load_schools(&["Pittsburgh_PA"])?;
    assert_eq!(schools.num_rows(), 3);
    let elevation = schools.column(4).as_primitive::<Float64Type>();
    assert_eq!(elevation.value(0), 250.0);
    assert_eq!(elevation.null_count(), 1);
    Ok(())
}

#[test]
fn test_workplaces_are_deduplicated() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let population = fixture.population();

    let allegheny = population.load_workplaces(&["Allegheny_County_PA"])?.num_rows();
    let jefferson = population.load_workplaces(&["Jefferson_County_PA"])?.num_rows();
    let metro = population.load_workplaces(&["Pittsburgh_PA"])?;

    assert_eq!(metro.num_rows(), 2);
    assert!(metro.num_rows() < allegheny + jefferson);
    assert_eq!(
        column_names(&metro),
        ["sp_id", "latitude", "longitude", "elevation", "zip"]
    );
    Ok(())
}

#[test]
fn test_household_xref_comes_from_people() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let xref = fixture
        .population()
        .load_people_household_xref(&["Pittsburgh_PA"])?;

    assert_eq!(column_names(&xref), ["sp_id", "sp_hh_id", "relate"]);
    assert_eq!(xref.num_rows(), 5);
    assert_eq!(xref.column(1).as_primitive::<Int64Type>().value(4), 30);
    Ok(())
}

#[test]
fn test_counts_use_line_scan() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let population = fixture.population();

    assert_eq!(population.population_count(&["Pittsburgh_PA"], false)?, 5);
    assert_eq!(population.gq_population_count(&["Pittsburgh_PA"])?, 2);

    // A trailing blank line is not a record
    fixture.write("42065/gq_people.txt", "sp_id\tsp_gq_id\tage\tsex\n22\t910\t80\tF\n\n");
    assert_eq!(population.gq_population_count(&["42065"])?, 1);
    Ok(())
}

#[test]
fn test_non_numeric_value_is_schema_error() {
    let fixture = legacy_fixture();
    fixture.write(
        "42065/workplaces.txt",
        "sp_id\tlatitude\tlongitude\televation\tzip\n510\t41.1\t-78.9\t400.0\tnorth\n",
    );

    let err = fixture
        .population()
        .load_workplaces(&["Jefferson_County_PA"])
        .unwrap_err();
    assert!(matches!(err, PopReaderError::SchemaError { .. }));
}

#[test]
fn test_missing_gq_people_file_fails_the_call() {
    let fixture = legacy_fixture();
    fixture.remove("42065/gq_people.txt");
    let population = fixture.population();

    let err = population.load_people(&["Pittsburgh_PA"], true).unwrap_err();
    assert!(matches!(err, PopReaderError::MissingFileError { .. }));

    let err = population.gq_population_count(&["Pittsburgh_PA"]).unwrap_err();
    assert!(matches!(err, PopReaderError::MissingFileError { .. }));
}
