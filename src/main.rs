use std::time::Instant;

use anyhow::{Context, bail};
use log::info;
use pop_reader::{PopReaderConfig, population_from_config};

/// Optional JSON configuration file; defaults and `FRED_DATA` apply otherwise
const CONFIG_ENV: &str = "POP_READER_CONFIG";

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let locations: Vec<String> = std::env::args().skip(1).collect();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => PopReaderConfig::from_json_file(path.as_ref())
            .with_context(|| format!("Failed to load {CONFIG_ENV}"))?,
        None => PopReaderConfig::default(),
    };
    let population = population_from_config(&config).context("Failed to open population")?;

    if locations.is_empty() {
        let available = population.available_locations()?;
        info!("{} single-county locations available", available.len());
        bail!("usage: pop-reader <location>...");
    }

    let locations: Vec<&str> = locations.iter().map(String::as_str).collect();
    let start = Instant::now();

    let people = population.load_people(&locations, true)?;
    info!("people: {} rows", people.num_rows());

    let gq_people = population.load_gq_people(&locations)?;
    info!("group quarters people: {} rows", gq_people.num_rows());

    let households = population.load_households(&locations)?;
    info!("households: {} rows", households.num_rows());

    let schools = population.load_schools(&locations)?;
    info!("schools: {} rows", schools.num_rows());

    let workplaces = population.load_workplaces(&locations)?;
    info!("workplaces: {} rows", workplaces.num_rows());

    let xref = population.load_people_household_xref(&locations)?;
    info!("person-household links: {} rows", xref.num_rows());

    info!(
        "Population count {} ({} in group quarters), loaded in {:?}",
        population.population_count(&locations, true)?,
        population.gq_population_count(&locations)?,
        start.elapsed()
    );

    Ok(())
}
