use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Observation, WildfireDataset};

/// Public copy of the historical wildfire observations for Australia.
pub const DEFAULT_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/\
IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/Historical_Wildfires.csv";

/// Columns the dashboard reads; everything else in the file is ignored.
const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Region", "Estimated_fire_area", "Count"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("failed to open {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to read CSV header: {0}")]
    Header(#[source] csv::Error),
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("CSV row {row}: {source}")]
    Csv { row: usize, source: csv::Error },
    #[error("CSV row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("dataset contains no observations")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the wildfire dataset.  Dispatch by source kind.
///
/// * `http://…` / `https://…` – fetched with a blocking GET
/// * anything else            – treated as a local file path
pub fn load_source(source: &str) -> Result<WildfireDataset, LoadError> {
    if is_url(source) {
        let body = fetch(source)?;
        parse_csv(body.as_bytes())
    } else {
        load_path(Path::new(source))
    }
}

/// Load a CSV file from disk.
pub fn load_path(path: &Path) -> Result<WildfireDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch(url: &str) -> Result<String, LoadError> {
    log::info!("Fetching dataset from {url}");
    reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// The subset of a CSV row the dashboard uses.  Empty numeric cells
/// deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Estimated_fire_area")]
    estimated_fire_area: Option<f64>,
    #[serde(rename = "Count")]
    count: Option<f64>,
}

/// Parse CSV text with a header row into a dataset.
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn parse_csv<R: Read>(input: R) -> Result<WildfireDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().map_err(LoadError::Header)?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut observations = Vec::new();
    for (i, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row = i + 1;
        let raw = result.map_err(|source| LoadError::Csv { row, source })?;
        let date = parse_date(raw.date.trim()).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: raw.date.clone(),
        })?;
        observations.push(Observation::new(
            date,
            raw.region.trim(),
            raw.estimated_fire_area,
            raw.count,
        ));
    }

    if observations.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(WildfireDataset::from_observations(observations))
}

/// Accepts ISO dates, US-style `M/D/YYYY`, and either with a time part.
fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use chrono::Month;

    use super::*;

    const SAMPLE: &str = "\
Region,Date,Estimated_fire_area,Mean_estimated_fire_brightness,Count,Replaced
NSW,1/4/2005,8.68,312.27,26,R
NSW,2005-01-05,16.61,322.48,89,R
QL,2005-02-10 00:00:00,,301.0,,R
";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let ds = parse_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.observations[0];
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2005, 1, 4).unwrap());
        assert_eq!(first.region(), "NSW");
        assert_eq!(first.estimated_fire_area(), Some(8.68));
        assert_eq!(first.pixel_count(), Some(26.0));
        assert_eq!(first.month(), Month::January);

        let third = &ds.observations[2];
        assert_eq!(third.month(), Month::February);
        assert_eq!(third.estimated_fire_area(), None);
        assert_eq!(third.pixel_count(), None);

        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2005]);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "Region,Date,Estimated_fire_area\nNSW,2005-01-01,1.0\n";
        match parse_csv(csv.as_bytes()) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Count"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_names_the_row() {
        let csv = "Region,Date,Estimated_fire_area,Count\n\
                   NSW,2005-01-01,1.0,2\n\
                   NSW,yesterday,1.0,2\n";
        match parse_csv(csv.as_bytes()) {
            Err(LoadError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_value_is_a_csv_error() {
        let csv = "Region,Date,Estimated_fire_area,Count\nNSW,2005-01-01,lots,2\n";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(LoadError::Csv { row: 1, .. })
        ));
    }

    #[test]
    fn header_only_is_empty() {
        let csv = "Region,Date,Estimated_fire_area,Count\n";
        assert!(matches!(parse_csv(csv.as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_source("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn url_detection() {
        assert!(is_url(DEFAULT_SOURCE));
        assert!(is_url("http://localhost/x.csv"));
        assert!(!is_url("data/Historical_Wildfires.csv"));
    }
}
