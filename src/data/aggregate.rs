use chrono::Month;
use serde::Serialize;

use super::model::{month_index, WildfireDataset};

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// The `(region, year)` slice the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub region: String,
    pub year: i32,
}

impl Selection {
    pub fn new(region: impl Into<String>, year: i32) -> Self {
        Selection {
            region: region.into(),
            year,
        }
    }
}

/// How months are ordered in an [`AggregateSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MonthOrder {
    /// Order in which months first appear among the matching rows.
    #[default]
    FirstSeen,
    /// January through December.
    Calendar,
    /// Sorted by English month name (April, August, December, …).
    Alphabetical,
}

impl MonthOrder {
    pub const ALL: [MonthOrder; 3] = [
        MonthOrder::FirstSeen,
        MonthOrder::Calendar,
        MonthOrder::Alphabetical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MonthOrder::FirstSeen => "First seen",
            MonthOrder::Calendar => "Calendar",
            MonthOrder::Alphabetical => "Alphabetical",
        }
    }
}

// ---------------------------------------------------------------------------
// AggregateSeries – month → mean
// ---------------------------------------------------------------------------

/// Ordered month → mean mapping.  Months with no matching rows are absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateSeries {
    entries: Vec<(Month, f64)>,
}

impl AggregateSeries {
    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, month: Month) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == month)
            .map(|(_, v)| *v)
    }

    pub fn months(&self) -> Vec<Month> {
        self.entries.iter().map(|(m, _)| *m).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The two per-month series shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyAggregates {
    pub fire_area: AggregateSeries,
    pub pixel_count: AggregateSeries,
    /// Number of observations that matched the selection.
    pub matched_rows: usize,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Running sum/count that skips missing values.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    n: usize,
}

impl MeanAcc {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.n += 1;
        }
    }

    /// NaN when every value in the group was missing.
    fn mean(self) -> f64 {
        if self.n == 0 {
            f64::NAN
        } else {
            self.sum / self.n as f64
        }
    }
}

/// Per-month means of fire area and pixel count for one region and year,
/// months in first-seen order.
///
/// The region is compared verbatim with the `Region` column, so an unknown
/// code simply matches nothing and both series come back empty.
pub fn compute(dataset: &WildfireDataset, region: &str, year: i32) -> MonthlyAggregates {
    compute_ordered(dataset, region, year, MonthOrder::FirstSeen)
}

/// [`compute`] with an explicit month ordering.
pub fn compute_ordered(
    dataset: &WildfireDataset,
    region: &str,
    year: i32,
    order: MonthOrder,
) -> MonthlyAggregates {
    // slot[month0] → index into `groups`
    let mut slot: [Option<usize>; 12] = [None; 12];
    let mut groups: Vec<(Month, MeanAcc, MeanAcc)> = Vec::new();
    let mut matched_rows = 0;

    for obs in dataset
        .observations
        .iter()
        .filter(|o| o.region() == region && o.year() == year)
    {
        matched_rows += 1;
        let m = month_index(obs.month());
        let idx = *slot[m].get_or_insert_with(|| {
            groups.push((obs.month(), MeanAcc::default(), MeanAcc::default()));
            groups.len() - 1
        });
        let (_, area, pixels) = &mut groups[idx];
        area.push(obs.estimated_fire_area());
        pixels.push(obs.pixel_count());
    }

    match order {
        MonthOrder::FirstSeen => {}
        MonthOrder::Calendar => groups.sort_by_key(|(m, _, _)| month_index(*m)),
        MonthOrder::Alphabetical => groups.sort_by_key(|(m, _, _)| m.name()),
    }

    let (fire_area, pixel_count): (Vec<_>, Vec<_>) = groups
        .into_iter()
        .map(|(m, area, pixels)| ((m, area.mean()), (m, pixels.mean())))
        .unzip();

    MonthlyAggregates {
        fire_area: AggregateSeries { entries: fire_area },
        pixel_count: AggregateSeries {
            entries: pixel_count,
        },
        matched_rows,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{Observation, MONTHS};

    fn obs(region: &str, y: i32, m: u32, area: f64, count: f64) -> Observation {
        let date = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        Observation::new(date, region, Some(area), Some(count))
    }

    fn two_row_dataset() -> WildfireDataset {
        WildfireDataset::from_observations(vec![
            obs("NSW", 2005, 1, 10.0, 4.0),
            obs("NSW", 2005, 1, 20.0, 8.0),
        ])
    }

    #[test]
    fn january_means_for_nsw_2005() {
        let out = compute(&two_row_dataset(), "NSW", 2005);
        assert_eq!(out.fire_area.iter().collect::<Vec<_>>(), vec![(Month::January, 15.0)]);
        assert_eq!(out.pixel_count.iter().collect::<Vec<_>>(), vec![(Month::January, 6.0)]);
        assert_eq!(out.matched_rows, 2);
    }

    #[test]
    fn year_without_data_is_empty() {
        let out = compute(&two_row_dataset(), "NSW", 2006);
        assert!(out.fire_area.is_empty());
        assert!(out.pixel_count.is_empty());
        assert_eq!(out.matched_rows, 0);
    }

    #[test]
    fn region_mismatch_is_empty() {
        let out = compute(&two_row_dataset(), "QL", 2005);
        assert!(out.fire_area.is_empty());
        assert!(out.pixel_count.is_empty());
    }

    #[test]
    fn unknown_region_code_is_empty_not_an_error() {
        let out = compute(&two_row_dataset(), "Atlantis", 2005);
        assert_eq!(out, MonthlyAggregates::default());
    }

    #[test]
    fn only_exact_region_and_year_rows_are_averaged() {
        let ds = WildfireDataset::from_observations(vec![
            obs("VI", 2010, 3, 2.0, 1.0),
            obs("VI", 2010, 3, 4.0, 3.0),
            obs("VI", 2011, 3, 100.0, 100.0),
            obs("WA", 2010, 3, 100.0, 100.0),
            obs("VI", 2010, 7, 9.0, 5.0),
        ]);
        let out = compute(&ds, "VI", 2010);
        assert_eq!(out.fire_area.get(Month::March), Some(3.0));
        assert_eq!(out.fire_area.get(Month::July), Some(9.0));
        assert_eq!(out.pixel_count.get(Month::March), Some(2.0));
        assert_eq!(out.pixel_count.get(Month::July), Some(5.0));
        assert_eq!(out.fire_area.get(Month::January), None);
        assert_eq!(out.matched_rows, 3);
    }

    #[test]
    fn months_are_a_subset_of_the_calendar() {
        let ds = WildfireDataset::from_observations(
            (1..=12)
                .flat_map(|m| [obs("SA", 2008, m, m as f64, 1.0), obs("SA", 2008, m, 0.0, 3.0)])
                .collect(),
        );
        let out = compute(&ds, "SA", 2008);
        assert_eq!(out.fire_area.months(), MONTHS.to_vec());
        for (m, v) in out.fire_area.iter() {
            assert_eq!(v, month_index(m) as f64 / 2.0 + 0.5);
        }
        assert!(out.pixel_count.iter().all(|(_, v)| v == 2.0));
    }

    #[test]
    fn orderings() {
        let ds = WildfireDataset::from_observations(vec![
            obs("TA", 2009, 12, 1.0, 1.0),
            obs("TA", 2009, 2, 1.0, 1.0),
            obs("TA", 2009, 8, 1.0, 1.0),
            obs("TA", 2009, 2, 1.0, 1.0),
        ]);
        let months = |order| compute_ordered(&ds, "TA", 2009, order).fire_area.months();

        assert_eq!(
            months(MonthOrder::FirstSeen),
            vec![Month::December, Month::February, Month::August]
        );
        assert_eq!(
            months(MonthOrder::Calendar),
            vec![Month::February, Month::August, Month::December]
        );
        assert_eq!(
            months(MonthOrder::Alphabetical),
            vec![Month::August, Month::December, Month::February]
        );
    }

    #[test]
    fn missing_values_are_skipped_per_field() {
        let d = NaiveDate::from_ymd_opt(2012, 5, 1).unwrap();
        let ds = WildfireDataset::from_observations(vec![
            Observation::new(d, "NT", Some(6.0), None),
            Observation::new(d, "NT", None, None),
            Observation::new(d, "NT", Some(2.0), None),
        ]);
        let out = compute(&ds, "NT", 2012);
        assert_eq!(out.fire_area.get(Month::May), Some(4.0));
        let pixels = out.pixel_count.get(Month::May).unwrap();
        assert!(pixels.is_nan());
    }

    #[test]
    fn compute_is_idempotent() {
        let ds = two_row_dataset();
        assert_eq!(compute(&ds, "NSW", 2005), compute(&ds, "NSW", 2005));
    }
}
