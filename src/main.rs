use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use eframe::egui;

use wildfire_dashboard::app::WildfireDashboardApp;
use wildfire_dashboard::data::aggregate::{MonthOrder, Selection};
use wildfire_dashboard::data::loader::{load_source, DEFAULT_SOURCE};
use wildfire_dashboard::data::model::Region;
use wildfire_dashboard::state::{default_year, handle_query, AppState, DashboardCharts};

/// Australia wildfire dashboard: monthly fire area and pixel counts for one
/// region and year.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV to load: an http(s) URL or a local path
    #[arg(long, env = "WILDFIRE_SOURCE", default_value = DEFAULT_SOURCE, value_hint = ValueHint::AnyPath)]
    source: String,

    /// Region selected at startup
    #[arg(long, value_enum, default_value_t = Region::NewSouthWales)]
    region: Region,

    /// Year selected at startup (default 2005, or the earliest year in the data)
    #[arg(long)]
    year: Option<i32>,

    /// Order of months in both charts
    #[arg(long, value_enum, default_value_t = MonthOrder::FirstSeen)]
    month_order: MonthOrder,

    /// Print both chart specs as JSON and exit instead of opening a window
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = load_source(&args.source)
        .inspect_err(|e| log::error!("Failed to load dataset: {e}"))
        .with_context(|| format!("loading dataset from {}", args.source))?;
    log::info!(
        "Loaded {} observations covering years {:?} from {}",
        dataset.len(),
        dataset.years,
        args.source
    );

    let year = args.year.unwrap_or_else(|| default_year(&dataset));

    if args.json {
        let charts = handle_query(
            &dataset,
            &Selection::new(args.region.code(), year),
            args.month_order,
        );
        println!("{}", charts_json(&charts)?);
        return Ok(());
    }

    let state = AppState::new(dataset, args.source, args.region, year, args.month_order);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Australia Wildfire Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(WildfireDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}

/// Headless output: the selection and both chart specs.
fn charts_json(charts: &DashboardCharts) -> Result<String> {
    let value = serde_json::json!({
        "selection": charts.selection,
        "matched_rows": charts.matched_rows,
        "pie": charts.pie,
        "bar": charts.bar,
    });
    serde_json::to_string_pretty(&value).context("serializing chart specs")
}
