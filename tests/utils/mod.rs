use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use pop_reader::{PopReaderConfig, SyntheticPopulation, population_from_config};
use tempfile::TempDir;

pub const COUNTRY: &str = "usa";
pub const CURRENT_VERSION: &str = "US_2010.v5";
pub const LEGACY_VERSION: &str = "US_2010.v4";

/// A population written to a temporary data root
pub struct PopulationFixture {
    root: TempDir,
    pub config: PopReaderConfig,
}

impl PopulationFixture {
    /// Data root holding `country/<country>/<version>`
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Directory holding the per-county subdirectories
    #[must_use]
    pub fn population_dir(&self) -> PathBuf {
        self.root()
            .join("country")
            .join(&self.config.country)
            .join(&self.config.version)
    }

    /// Open the population through the configuration
    #[must_use]
    pub fn population(&self) -> Arc<dyn SyntheticPopulation> {
        population_from_config(&self.config).unwrap()
    }

    /// Overwrite or add a file relative to the population directory
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.population_dir().join(relative);
        std::fs::write(path, content).unwrap();
    }

    /// Remove a file relative to the population directory
    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.population_dir().join(relative)).unwrap();
    }
}

fn write_files(dir: &Path, files: &[(&str, &str)]) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
}

fn fixture(version: &str) -> PopulationFixture {
    let root = tempfile::tempdir().unwrap();
    let config = PopReaderConfig::new(COUNTRY, version).with_data_root(root.path());
    PopulationFixture { root, config }
}

/// Current-format population with three counties and one two-county metro
///
/// | county | people | gq people | households | schools | workplaces |
/// |--------|--------|-----------|------------|---------|------------|
/// | 48301  | 3      | 1         | 2          | 1       | 2          |
/// | 06069  | 2      | 2         | 1          | 2       | 1          |
/// | 06085  | 4      | 1         | 2          | 2       | 2          |
///
/// School 601 appears identically in 06069 and 06085. The index also names
/// 06075, which has no directory.
#[must_use]
pub fn current_fixture() -> PopulationFixture {
    let fixture = fixture(CURRENT_VERSION);
    let pop = fixture.population_dir();

    write_files(
        &pop.join("metadata"),
        &[
            (
                "locations.txt",
                "Loving_County_TX 48301\n\
                 San_Benito_County_CA 06069\n\
                 Santa_Clara_County_CA 06085\n\
                 San_Jose-Sunnyvale-Santa_Clara_CA_MSA 06069 06085\n\
                 San_Francisco_County_CA 06075\n",
            ),
            (
                "group_metadata.txt",
                "person-household.txt,household.txt,household-block_group.txt\n\
                 person-school.txt,school.txt,school-block_group.txt\n\
                 person-workplace.txt,workplace.txt,workplace-block_group.txt\n\
                 person-college_dorm.txt,college_dorm.txt,college_dorm-block_group.txt\n\
                 person-nursing_home.txt,nursing_home.txt,nursing_home-block_group.txt\n",
            ),
        ],
    );

    write_files(
        &pop.join("48301"),
        &[
            (
                "person.txt",
                "ID,AGE,sex,race,household_relationship,household_income\n\
                 1,34,F,1,0,52000\n\
                 2,36,M,1,1,52000\n\
                 3,70,F,2,0,NA\n",
            ),
            ("gq_person.txt", "ID,AGE,sex,race\n4,88,M,1\n"),
            (
                "household.txt",
                "ID,LAT,LON,ELEV,income\n\
                 100,31.84,-103.58,861.2,52000\n\
                 101,31.85,-103.60,865.0,\n",
            ),
            (
                "household-block_group.txt",
                "HOUSEHOLD,BLOCK_GROUP\n100,483019501001\n101,483019501002\n",
            ),
            (
                "person-household.txt",
                "PERSON,HOUSEHOLD,ROLE\n1,100,0\n2,100,1\n3,101,0\n",
            ),
            ("person-nursing_home.txt", "PERSON,NURSING_HOME,ROLE\n4,950,0\n"),
            ("nursing_home-block_group.txt", "NURSING_HOME,BLOCK_GROUP\n950,483019501001\n"),
            ("school.txt", "ID,NAME,LAT,LON\n500,Wink High,31.75,-103.16\n"),
            ("workplace.txt", "ID,LAT,LON\n700,31.8,-103.5\n701,31.9,-103.4\n"),
        ],
    );

    write_files(
        &pop.join("06069"),
        &[
            (
                "person.txt",
                "ID,AGE,sex,race,household_relationship,household_income\n\
                 10,41,F,1,0,87000\n\
                 11,12,M,1,2,87000\n",
            ),
            ("gq_person.txt", "ID,AGE,sex,race\n12,19,F,1\n13,20,M,2\n"),
            ("household.txt", "ID,LAT,LON,ELEV,income\n110,36.85,-121.40,85.0,87000\n"),
            ("household-block_group.txt", "HOUSEHOLD,BLOCK_GROUP\n110,060690001001\n"),
            ("person-household.txt", "PERSON,HOUSEHOLD,ROLE\n10,110,0\n11,110,2\n"),
            ("person-college_dorm.txt", "PERSON,COLLEGE_DORM,ROLE\n12,900,5\n13,900,5\n"),
            ("college_dorm-block_group.txt", "COLLEGE_DORM,BLOCK_GROUP\n900,060690002001\n"),
            (
                "school.txt",
                "ID,NAME,LAT,LON\n600,Gavilan,36.85,-121.4\n601,Regional High,37.0,-121.5\n",
            ),
            ("workplace.txt", "ID,LAT,LON\n710,36.8,-121.4\n"),
        ],
    );

    write_files(
        &pop.join("06085"),
        &[
            (
                "person.txt",
                "ID,AGE,sex,race,household_relationship,household_income\n\
                 20,45,M,6,0,120000\n\
                 21,43,F,6,1,120000\n\
                 22,29,F,1,0,64000\n\
                 23,3,M,1,2,64000\n",
            ),
            ("gq_person.txt", "ID,AGE,sex,race\n24,91,F,6\n"),
            (
                "household.txt",
                "ID,LAT,LON,ELEV,income\n\
                 120,37.33,-121.89,25.0,120000\n\
                 121,37.35,-121.95,30.5,64000\n",
            ),
            (
                "household-block_group.txt",
                "HOUSEHOLD,BLOCK_GROUP\n120,060855001001\n121,060855001002\n",
            ),
            (
                "person-household.txt",
                "PERSON,HOUSEHOLD,ROLE\n20,120,0\n21,120,1\n22,121,0\n23,121,2\n",
            ),
            ("person-nursing_home.txt", "PERSON,NURSING_HOME,ROLE\n24,960,0\n"),
            ("nursing_home-block_group.txt", "NURSING_HOME,BLOCK_GROUP\n960,060855003001\n"),
            (
                "school.txt",
                "ID,NAME,LAT,LON\n601,Regional High,37.0,-121.5\n602,Lincoln,37.3,-121.9\n",
            ),
            ("workplace.txt", "ID,LAT,LON\n720,37.3,-121.9\n721,37.4,-122.0\n"),
        ],
    );

    fixture
}

/// Legacy-format population with two counties and one metro
///
/// | county | people | gq people | households | schools | workplaces |
/// |--------|--------|-----------|------------|---------|------------|
/// | 42003  | 3      | 1         | 2          | 2       | 1          |
/// | 42065  | 2      | 1         | 1          | 1       | 2          |
///
/// Workplace 500 appears identically in both counties, and the 42065 schools
/// file has no elevation column.
#[must_use]
pub fn legacy_fixture() -> PopulationFixture {
    let fixture = fixture(LEGACY_VERSION);
    let pop = fixture.population_dir();

    write_files(
        pop.parent().unwrap(),
        &[(
            "locations.txt",
            "Allegheny_County_PA 42003\n\
             Jefferson_County_PA 42065\n\
             Pittsburgh_PA 42003 42065\n\
             Philadelphia_County_PA 42101\n",
        )],
    );

    write_files(
        &pop.join("42003"),
        &[
            (
                "people.txt",
                "sp_id\tsp_hh_id\tage\tsex\trace\trelate\tschool_id\twork_id\n\
                 1\t10\t34\tF\t1\t0\tX\t500\n\
                 2\t10\t8\tM\t1\t2\t300\tX\n\
                 3\t11\tX\tF\t2\t0\tX\tX\n",
            ),
            ("gq_people.txt", "sp_id\tsp_gq_id\tage\tsex\n4\t900\t19\tM\n"),
            (
                "households.txt",
                "sp_id\tstcotrbg\trace\thh_income\tlatitude\tlongitude\televation\n\
                 10\t420030101001\t1\t52000\t40.44\t-79.99\t230.0\n\
                 11\t420030101002\t2\tX\t40.45\t-79.98\t240.5\n",
            ),
            (
                "schools.txt",
                "sp_id\tstco\tlatitude\tlongitude\televation\n\
                 300\t42003\t40.4\t-80.0\t250.0\n\
                 301\t42003\t40.5\t-80.1\t260.0\n",
            ),
            (
                "workplaces.txt",
                "sp_id\tlatitude\tlongitude\televation\tzip\n\
                 500\t40.44\t-79.99\t230.0\t15222\n",
            ),
        ],
    );

    write_files(
        &pop.join("42065"),
        &[
            (
                "people.txt",
                "sp_id\tsp_hh_id\tage\tsex\trace\trelate\tschool_id\twork_id\n\
                 20\t30\t50\tM\t1\t0\tX\tX\n\
                 21\t30\t48\tF\t1\t1\tX\t510\n",
            ),
            ("gq_people.txt", "sp_id\tsp_gq_id\tage\tsex\n22\t910\t80\tF\n"),
            (
                "households.txt",
                "sp_id\tstcotrbg\trace\thh_income\tlatitude\tlongitude\televation\n\
                 30\t420659501001\t1\t61000\t41.1\t-78.9\t400.0\n",
            ),
            (
                "schools.txt",
                "sp_id\tstco\tlatitude\tlongitude\n310\t42065\t41.1\t-78.9\n",
            ),
            (
                "workplaces.txt",
                "sp_id\tlatitude\tlongitude\televation\tzip\n\
                 500\t40.44\t-79.99\t230.0\t15222\n\
                 510\t41.1\t-78.9\t400.0\t15825\n",
            ),
        ],
    );

    fixture
}

/// Column names of a table, in order
#[must_use]
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}
