use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};

// ---------------------------------------------------------------------------
// Region – the seven state/territory codes used by the dataset
// ---------------------------------------------------------------------------

/// Australian state or territory, identified in the dataset by a short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Region {
    #[value(name = "NSW")]
    NewSouthWales,
    #[value(name = "NT")]
    NorthernTerritory,
    #[value(name = "QL")]
    Queensland,
    #[value(name = "SA")]
    SouthAustralia,
    #[value(name = "TA")]
    Tasmania,
    #[value(name = "VI")]
    Victoria,
    #[value(name = "WA")]
    WesternAustralia,
}

impl Region {
    /// All regions in selector order.
    pub const ALL: [Region; 7] = [
        Region::NewSouthWales,
        Region::NorthernTerritory,
        Region::Queensland,
        Region::SouthAustralia,
        Region::Tasmania,
        Region::Victoria,
        Region::WesternAustralia,
    ];

    /// The code as it appears in the `Region` column.
    pub fn code(self) -> &'static str {
        match self {
            Region::NewSouthWales => "NSW",
            Region::NorthernTerritory => "NT",
            Region::Queensland => "QL",
            Region::SouthAustralia => "SA",
            Region::Tasmania => "TA",
            Region::Victoria => "VI",
            Region::WesternAustralia => "WA",
        }
    }

    /// Human-readable name for the region selector.
    pub fn label(self) -> &'static str {
        match self {
            Region::NewSouthWales => "New South Wales",
            Region::NorthernTerritory => "Northern Territory",
            Region::Queensland => "Queensland",
            Region::SouthAustralia => "South Australia",
            Region::Tasmania => "Tasmania",
            Region::Victoria => "Victoria",
            Region::WesternAustralia => "Western Australia",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::NewSouthWales
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not one of the seven region codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region code '{0}' (expected one of NSW, NT, QL, SA, TA, VI, WA)")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Months
// ---------------------------------------------------------------------------

/// Calendar months indexed by `month0()`.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Zero-based position of a month in the calendar.
pub fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

// ---------------------------------------------------------------------------
// Observation – one row of the dataset
// ---------------------------------------------------------------------------

/// A single wildfire observation with its calendar fields derived from `date`.
///
/// The derived `month` and `year` can only be set by [`Observation::new`], so
/// they always agree with `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    date: NaiveDate,
    region: String,
    estimated_fire_area: Option<f64>,
    pixel_count: Option<f64>,
    month: Month,
    year: i32,
}

impl Observation {
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        estimated_fire_area: Option<f64>,
        pixel_count: Option<f64>,
    ) -> Self {
        Observation {
            date,
            region: region.into(),
            estimated_fire_area,
            pixel_count,
            month: MONTHS[date.month0() as usize],
            year: date.year(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Region code exactly as read from the source.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn estimated_fire_area(&self) -> Option<f64> {
        self.estimated_fire_area
    }

    pub fn pixel_count(&self) -> Option<f64> {
        self.pixel_count
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

// ---------------------------------------------------------------------------
// WildfireDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed selector values.
#[derive(Debug, Clone, Default)]
pub struct WildfireDataset {
    /// All observations (rows), in source order.
    pub observations: Vec<Observation>,
    /// Sorted unique years, used to populate the year selector.
    pub years: BTreeSet<i32>,
    /// Region codes that occur in the data.
    pub regions: BTreeSet<String>,
}

impl WildfireDataset {
    /// Build selector indices from the loaded observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let years = observations.iter().map(Observation::year).collect();
        let regions = observations
            .iter()
            .map(|o| o.region().to_string())
            .collect();
        WildfireDataset {
            observations,
            years,
            regions,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_follow_the_date() {
        let date = NaiveDate::from_ymd_opt(2011, 9, 30).unwrap();
        let obs = Observation::new(date, "WA", Some(3.5), Some(2.0));
        assert_eq!(obs.month(), Month::September);
        assert_eq!(obs.month().name(), "September");
        assert_eq!(obs.year(), 2011);
        assert_eq!(obs.region(), "WA");
    }

    #[test]
    fn region_codes_round_trip_through_from_str() {
        for region in Region::ALL {
            assert_eq!(region.code().parse::<Region>(), Ok(region));
        }
        assert_eq!(
            "XX".parse::<Region>(),
            Err(UnknownRegion("XX".to_string()))
        );
        // codes are case sensitive, as in the data
        assert!("nsw".parse::<Region>().is_err());
    }

    #[test]
    fn month_index_matches_table() {
        for (i, m) in MONTHS.iter().enumerate() {
            assert_eq!(month_index(*m), i);
        }
    }

    #[test]
    fn dataset_collects_years_and_regions() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let ds = WildfireDataset::from_observations(vec![
            Observation::new(d(2007, 1, 1), "NSW", Some(1.0), Some(1.0)),
            Observation::new(d(2005, 6, 2), "QL", Some(1.0), Some(1.0)),
            Observation::new(d(2007, 3, 3), "NSW", None, None),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2005, 2007]);
        assert!(ds.regions.contains("QL"));
        assert_eq!(ds.regions.len(), 2);
    }
}
