//! County-level FIPS codes

use std::borrow::Borrow;
use std::fmt;

/// Width of a county FIPS code: two state digits and three county digits
pub const COUNTY_FIPS_WIDTH: usize = 5;

/// A county FIPS code in its canonical zero-padded form, e.g. `06069`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountyFips(String);

impl CountyFips {
    /// Canonicalize a code by left-padding it with zeros to five characters
    ///
    /// Codes that are already five characters or longer are kept as given,
    /// so an over-long code simply never matches a directory.
    #[must_use]
    pub fn padded(code: &str) -> Self {
        Self(format!("{:0>width$}", code.trim(), width = COUNTY_FIPS_WIDTH))
    }

    /// The code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` looks like a county directory name (five ASCII digits)
    #[must_use]
    pub fn is_county_code(name: &str) -> bool {
        name.len() == COUNTY_FIPS_WIDTH && name.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for CountyFips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CountyFips {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CountyFips {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountyFips {
    fn from(code: &str) -> Self {
        Self::padded(code)
    }
}

impl From<String> for CountyFips {
    fn from(code: String) -> Self {
        Self::padded(&code)
    }
}

impl From<&String> for CountyFips {
    fn from(code: &String) -> Self {
        Self::padded(code)
    }
}

impl From<u32> for CountyFips {
    fn from(code: u32) -> Self {
        Self::padded(&code.to_string())
    }
}

/// Anything that names one or several county FIPS codes
///
/// Lets lookups accept a single code as readily as a list of them.
pub trait IntoFipsCodes {
    /// The codes, canonicalized
    fn into_fips_codes(self) -> Vec<CountyFips>;
}

impl IntoFipsCodes for &str {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        vec![CountyFips::padded(self)]
    }
}

impl IntoFipsCodes for String {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        vec![CountyFips::padded(&self)]
    }
}

impl IntoFipsCodes for u32 {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        vec![CountyFips::from(self)]
    }
}

impl IntoFipsCodes for CountyFips {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        vec![self]
    }
}

impl<T: Into<CountyFips>> IntoFipsCodes for Vec<T> {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<CountyFips> + Clone> IntoFipsCodes for &[T] {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<T: Into<CountyFips>, const N: usize> IntoFipsCodes for [T; N] {
    fn into_fips_codes(self) -> Vec<CountyFips> {
        self.into_iter().map(Into::into).collect()
    }
}
