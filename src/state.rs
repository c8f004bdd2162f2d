use crate::chart::{to_bar_spec, to_pie_spec, ChartSpec};
use crate::color::MonthColors;
use crate::data::aggregate::{compute_ordered, MonthOrder, Selection};
use crate::data::model::{Region, WildfireDataset};

/// Year shown first when the data covers it.
pub const DEFAULT_YEAR: i32 = 2005;

// ---------------------------------------------------------------------------
// Query result
// ---------------------------------------------------------------------------

/// Both chart specs for one selection, plus how many rows fed them.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub selection: Selection,
    pub month_order: MonthOrder,
    pub pie: ChartSpec,
    pub bar: ChartSpec,
    pub matched_rows: usize,
}

/// Run one dashboard query: aggregate the slice and build both charts.
pub fn handle_query(
    dataset: &WildfireDataset,
    selection: &Selection,
    order: MonthOrder,
) -> DashboardCharts {
    let agg = compute_ordered(dataset, &selection.region, selection.year, order);
    log::debug!(
        "{} {}: {} rows, {} months",
        selection.region,
        selection.year,
        agg.matched_rows,
        agg.fire_area.len()
    );
    if agg.matched_rows == 0 {
        log::warn!(
            "No observations for region {} in {}",
            selection.region,
            selection.year
        );
    }
    DashboardCharts {
        pie: to_pie_spec(&agg.fire_area, &selection.region, selection.year),
        bar: to_bar_spec(&agg.pixel_count, &selection.region, selection.year),
        matched_rows: agg.matched_rows,
        selection: selection.clone(),
        month_order: order,
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, owned here and lent to every query.
    pub dataset: WildfireDataset,

    /// Where the dataset came from (URL or path), for the status bar.
    pub source: String,

    pub region: Region,
    pub year: i32,
    pub month_order: MonthOrder,

    /// Charts for the current selection (recomputed by `refresh`).
    pub charts: DashboardCharts,

    pub colors: MonthColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        dataset: WildfireDataset,
        source: String,
        region: Region,
        year: i32,
        month_order: MonthOrder,
    ) -> Self {
        let charts = handle_query(&dataset, &Selection::new(region.code(), year), month_order);
        Self {
            dataset,
            source,
            region,
            year,
            month_order,
            charts,
            colors: MonthColors::default(),
            status_message: None,
        }
    }

    /// Current `(region, year)` query.
    pub fn selection(&self) -> Selection {
        Selection::new(self.region.code(), self.year)
    }

    /// Recompute the charts if any input changed since the last query.
    pub fn refresh(&mut self) {
        let selection = self.selection();
        if selection != self.charts.selection || self.month_order != self.charts.month_order {
            self.charts = handle_query(&self.dataset, &selection, self.month_order);
        }
    }

    /// Ingest a newly loaded dataset, keep the region and snap the year to
    /// one the new data covers.
    pub fn set_dataset(&mut self, dataset: WildfireDataset, source: String) {
        if !dataset.years.contains(&self.year) {
            self.year = default_year(&dataset);
        }
        self.dataset = dataset;
        self.source = source;
        self.charts = handle_query(&self.dataset, &self.selection(), self.month_order);
        self.status_message = None;
    }
}

/// 2005 when present, otherwise the earliest year in the data.
pub fn default_year(dataset: &WildfireDataset) -> i32 {
    if dataset.years.contains(&DEFAULT_YEAR) {
        DEFAULT_YEAR
    } else {
        dataset.years.first().copied().unwrap_or(DEFAULT_YEAR)
    }
}
