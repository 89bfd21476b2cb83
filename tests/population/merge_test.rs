use pop_reader::SyntheticPopulation;

use crate::utils::{current_fixture, legacy_fixture};

const METRO: &str = "San_Jose-Sunnyvale-Santa_Clara_CA_MSA";

fn rows(population: &dyn SyntheticPopulation, locations: &[&str]) -> pop_reader::Result<[usize; 4]> {
    Ok([
        population.load_people(locations, false)?.num_rows(),
        population.load_gq_people(locations)?.num_rows(),
        population.load_households(locations)?.num_rows(),
        population.load_people_household_xref(locations)?.num_rows(),
    ])
}

#[test]
fn test_disjoint_locations_are_additive() -> pop_reader::Result<()> {
    let fixture = current_fixture();
    let population = fixture.population();

    let loving = rows(population.as_ref(), &["Loving_County_TX"])?;
    let metro = rows(population.as_ref(), &[METRO])?;
    let both = rows(population.as_ref(), &["Loving_County_TX", METRO])?;

    for ((total, a), b) in both.iter().zip(loving).zip(metro) {
        assert_eq!(*total, a + b);
    }
    Ok(())
}

#[test]
fn test_overlapping_locations_read_each_county_once() -> pop_reader::Result<()> {
    let fixture = current_fixture();
    let population = fixture.population();

    let metro = rows(population.as_ref(), &[METRO])?;
    let overlapping = rows(population.as_ref(), &[METRO, "Santa_Clara_County_CA", "06069"])?;
    assert_eq!(overlapping, metro);
    Ok(())
}

#[test]
fn test_facilities_are_at_most_the_sum() -> pop_reader::Result<()> {
    let fixture = current_fixture();
    let population = fixture.population();

    let schools = population.load_schools(&["San_Benito_County_CA"])?.num_rows()
        + population.load_schools(&["Santa_Clara_County_CA"])?.num_rows();
    assert!(population.load_schools(&[METRO])?.num_rows() <= schools);

    let workplaces = population.load_workplaces(&["San_Benito_County_CA"])?.num_rows()
        + population.load_workplaces(&["Santa_Clara_County_CA"])?.num_rows();
    assert_eq!(population.load_workplaces(&[METRO])?.num_rows(), workplaces);
    Ok(())
}

#[test]
fn test_metro_equals_its_counties_current() -> pop_reader::Result<()> {
    let fixture = current_fixture();
    let population = fixture.population();
    let counties = ["San_Benito_County_CA", "Santa_Clara_County_CA"];

    assert_eq!(
        population.load_people(&[METRO], true)?,
        population.load_people(&counties, true)?
    );
    assert_eq!(
        population.load_gq_people(&[METRO])?,
        population.load_gq_people(&counties)?
    );
    assert_eq!(
        population.load_households(&[METRO])?,
        population.load_households(&counties)?
    );
    assert_eq!(
        population.load_people_household_xref(&[METRO])?,
        population.load_people_household_xref(&["06085", "06069"])?
    );
    Ok(())
}

#[test]
fn test_metro_equals_its_counties_legacy() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    let population = fixture.population();
    let counties = ["Jefferson_County_PA", "Allegheny_County_PA"];

    assert_eq!(
        population.load_people(&["Pittsburgh_PA"], true)?,
        population.load_people(&counties, true)?
    );
    assert_eq!(
        population.load_gq_people(&["Pittsburgh_PA"])?,
        population.load_gq_people(&["42003", "42065"])?
    );
    assert_eq!(
        population.load_households(&["Pittsburgh_PA"])?,
        population.load_households(&counties)?
    );
    assert_eq!(
        population.load_people_household_xref(&["Pittsburgh_PA"])?,
        population.load_people_household_xref(&counties)?
    );
    assert_eq!(
        population.population_count(&["Pittsburgh_PA"], true)?,
        population.load_people(&counties, true)?.num_rows()
    );
    Ok(())
}

#[test]
fn test_merged_column_types_match_single_county() -> pop_reader::Result<()> {
    let fixture = current_fixture();
    // San Benito: no income values, no group-quarters residents, no elevation
    fixture.write(
        "06069/person.txt",
        "ID,AGE,sex,race,household_relationship,household_income\n\
         10,41,F,1,0,NA\n\
         11,12,M,1,2,\n",
    );
    fixture.write("06069/gq_person.txt", "ID,AGE,sex,race\n");
    fixture.remove("06069/person-college_dorm.txt");
    fixture.write("06069/household.txt", "ID,LAT,LON,ELEV,income\n110,36.85,-121.40,NA,87000\n");
    let population = fixture.population();

    let clara = ["Santa_Clara_County_CA"];
    let both = ["Santa_Clara_County_CA", "San_Benito_County_CA"];

    for include_gq_people in [false, true] {
        assert_eq!(
            population.load_people(&both, include_gq_people)?.schema(),
            population.load_people(&clara, include_gq_people)?.schema()
        );
    }
    assert_eq!(
        population.load_gq_people(&both)?.schema(),
        population.load_gq_people(&clara)?.schema()
    );

    let households = population.load_households(&both)?;
    assert_eq!(households.schema(), population.load_households(&clara)?.schema());
    assert_eq!(households.num_rows(), 3);
    Ok(())
}

#[test]
fn test_merged_column_types_match_single_county_legacy() -> pop_reader::Result<()> {
    let fixture = legacy_fixture();
    fixture.write(
        "42065/people.txt",
        "sp_id\tsp_hh_id\tage\tsex\trace\trelate\tschool_id\twork_id\n\
         20\t30\tX\tM\t1\t0\tX\tX\n",
    );
    fixture.write("42065/gq_people.txt", "sp_id\tsp_gq_id\tage\tsex\n");
    let population = fixture.population();

    assert_eq!(
        population.load_people(&["Pittsburgh_PA"], true)?.schema(),
        population.load_people(&["Allegheny_County_PA"], true)?.schema()
    );
    assert_eq!(
        population.load_households(&["Pittsburgh_PA"])?.schema(),
        population.load_households(&["42065"])?.schema()
    );
    Ok(())
}
