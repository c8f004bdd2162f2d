use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use clap::Parser;
use serde::Serialize;

use wildfire_dashboard::data::model::Region;

/// Write a synthetic wildfire CSV with the same columns as the public dataset.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Output file
    #[arg(default_value = "sample_wildfires.csv")]
    output: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 2005)]
    first_year: i32,

    #[arg(long, default_value_t = 2020)]
    last_year: i32,
}

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Region")]
    region: &'static str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Estimated_fire_area")]
    estimated_fire_area: f64,
    #[serde(rename = "Mean_estimated_fire_brightness")]
    brightness: f64,
    #[serde(rename = "Count")]
    count: u32,
    #[serde(rename = "Replaced")]
    replaced: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Relative fire activity: northern regions burn in the dry season
/// (Jun–Oct), southern ones in summer (Dec–Feb).
fn season_weight(region: Region, day_of_year: u32) -> f64 {
    let peak_day = match region {
        Region::NorthernTerritory | Region::Queensland | Region::WesternAustralia => 240.0,
        _ => 15.0,
    };
    let d = day_of_year as f64 - peak_day;
    // circular distance in days
    let d = d.abs().min(365.0 - d.abs());
    0.15 + (-(d * d) / (2.0 * 50.0 * 50.0)).exp()
}

fn region_scale(region: Region) -> f64 {
    match region {
        Region::NorthernTerritory => 120.0,
        Region::WesternAustralia => 90.0,
        Region::Queensland => 70.0,
        Region::NewSouthWales => 40.0,
        Region::SouthAustralia => 25.0,
        Region::Victoria => 20.0,
        Region::Tasmania => 8.0,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let start = NaiveDate::from_ymd_opt(args.first_year, 1, 1).context("invalid first year")?;
    let end = NaiveDate::from_ymd_opt(args.last_year, 12, 31).context("invalid last year")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut rows = 0usize;
    let mut date = start;
    while date <= end {
        for region in Region::ALL {
            let weight = season_weight(region, date.ordinal());
            // quiet days leave no observation for the region
            if rng.next_f64() > 0.35 + 0.6 * weight.min(1.0) {
                continue;
            }
            let area = (region_scale(region) * weight * rng.gauss(1.0, 0.4)).max(0.5);
            let count = (area * rng.gauss(3.0, 0.8)).max(1.0).round() as u32;
            writer.serialize(Row {
                region: region.code(),
                date: date.format("%Y-%m-%d").to_string(),
                estimated_fire_area: (area * 100.0).round() / 100.0,
                brightness: (rng.gauss(315.0, 8.0) * 100.0).round() / 100.0,
                count,
                replaced: if date.year() < 2019 { "R" } else { "N" },
            })?;
            rows += 1;
        }
        date += Duration::days(1);
    }
    writer.flush()?;

    println!(
        "Wrote {rows} observations for {}..={} to {}",
        args.first_year,
        args.last_year,
        args.output.display()
    );
    Ok(())
}
